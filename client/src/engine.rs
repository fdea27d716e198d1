use income_map_shared::{CameraOptions, Feature, LngLat, ScreenPoint};
use serde::Serialize;
use serde_json::Value;

/// `addSource` payload for a hosted vector tileset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorSource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub url: String,
}

impl VectorSource {
    pub fn new(url: &str) -> Self {
        Self {
            kind: "vector",
            url: url.to_owned(),
        }
    }
}

/// `addLayer` payload for a fill layer backed by a vector source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillLayer {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub source: String,
    #[serde(rename = "source-layer")]
    pub source_layer: String,
    pub paint: Value,
}

/// The subset of the map engine the page drives.
///
/// Fallible calls mirror the engine methods that throw (duplicate ids,
/// unknown layers) and report the thrown message.
pub trait MapEngine {
    fn has_source(&self, id: &str) -> bool;
    fn add_source(&self, id: &str, source: &VectorSource) -> Result<(), String>;
    fn has_layer(&self, id: &str) -> bool;
    fn add_layer(&self, layer: &FillLayer) -> Result<(), String>;
    fn set_paint_property(&self, layer_id: &str, name: &str, value: &Value)
    -> Result<(), String>;
    fn set_layout_property(&self, layer_id: &str, name: &str, value: &str)
    -> Result<(), String>;
    /// Features under `point` on the given layers, topmost first.
    fn query_rendered_features(&self, point: ScreenPoint, layers: &[&str]) -> Vec<Feature>;
    fn set_canvas_cursor(&self, cursor: &str);
    fn set_default_fog(&self);
    fn fly_to(&self, camera: &CameraOptions);
    fn open_popup(&self, at: LngLat, html: &str) -> Result<(), String>;
}
