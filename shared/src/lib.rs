pub mod camera;
pub mod config;
pub mod feature;
pub mod legend;
pub mod style;

pub use camera::{CameraOptions, LngLat, MapOptions, ScreenPoint};
pub use config::MapConfig;
pub use feature::{Feature, indicator_text, popup_html};
pub use legend::{LegendEntry, legend_entries};
