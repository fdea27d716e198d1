use std::sync::Arc;

use income_map_shared::MapConfig;

#[derive(Clone)]
pub struct AppState {
    pub map_config: Arc<MapConfig>,
    pub static_dir: Arc<str>,
}

impl AppState {
    pub fn new(map_config: MapConfig, static_dir: &str) -> Self {
        Self {
            map_config: Arc::new(map_config),
            static_dir: Arc::from(static_dir),
        }
    }
}
