use serde::{Deserialize, Serialize};

use crate::config::MapConfig;

pub const TORONTO_CENTER: [f64; 2] = [-79.425, 43.685];
pub const HOME_ZOOM: f64 = 10.0;
pub const HOME_BEARING: f64 = -16.6;
pub const MIN_ZOOM: f64 = 9.5;
pub const MAX_ZOOM: f64 = 12.5;
pub const PROJECTION: &str = "globe";

/// Geographic coordinate as reported by the engine (`e.lngLat`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

/// Pixel position on the map canvas (`e.point`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Constructor options for the map engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub container: String,
    pub style: String,
    pub projection: &'static str,
    pub center: [f64; 2],
    pub zoom: f64,
    pub bearing: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub access_token: String,
}

impl MapOptions {
    pub fn new(container: &str, config: &MapConfig) -> Self {
        Self {
            container: container.to_owned(),
            style: config.style_url.clone(),
            projection: PROJECTION,
            center: TORONTO_CENTER,
            zoom: HOME_ZOOM,
            bearing: HOME_BEARING,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            access_token: config.access_token.clone(),
        }
    }
}

/// Target of an animated camera transition (`flyTo`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraOptions {
    pub center: [f64; 2],
    pub zoom: f64,
    pub bearing: f64,
    /// Keeps the animation when the user prefers reduced motion.
    pub essential: bool,
}

impl CameraOptions {
    /// The fixed "reset view" preset over Toronto.
    pub fn home() -> Self {
        Self {
            center: TORONTO_CENTER,
            zoom: HOME_ZOOM,
            bearing: HOME_BEARING,
            essential: true,
        }
    }
}
