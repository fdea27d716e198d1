use income_map_shared::MapConfig;

/// Fetch runtime map settings from the server.
pub async fn fetch_map_config() -> Result<MapConfig, String> {
    let resp = gloo_net::http::Request::get("/api/config")
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<MapConfig>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

/// Settings to build the map with: the server's, or the built-in defaults
/// when the server can't be reached.
pub async fn load_map_config() -> MapConfig {
    let config = match fetch_map_config().await {
        Ok(config) => config,
        Err(e) => {
            crate::console::warn(&format!("Map config fetch failed, using defaults: {e}"));
            MapConfig::default()
        }
    };
    if !config.has_access_token() {
        crate::console::warn("No Mapbox access token configured; tiles will not load");
    }
    config
}
