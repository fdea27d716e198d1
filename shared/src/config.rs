use serde::{Deserialize, Serialize};

pub const DEFAULT_STYLE_URL: &str = "mapbox://styles/mapbox/dark-v11";
pub const DEFAULT_TILESET_URL: &str = "mapbox://ryansiu.cg9kiflm";
pub const DEFAULT_SOURCE_ID: &str = "2015-Toronto-Income";
pub const DEFAULT_SOURCE_LAYER: &str = "2015-Toronto-Income-0ngmhw";
pub const DEFAULT_LAYER_ID: &str = "Income-Layer";
pub const DEFAULT_GEOCODER_COUNTRY: &str = "ca";

/// Runtime map settings served at `/api/config`.
///
/// Missing keys fall back to the defaults above, so a partial payload still
/// yields a usable map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    pub access_token: String,
    pub style_url: String,
    pub tileset_url: String,
    pub source_id: String,
    pub source_layer: String,
    pub layer_id: String,
    pub geocoder_country: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            style_url: DEFAULT_STYLE_URL.to_owned(),
            tileset_url: DEFAULT_TILESET_URL.to_owned(),
            source_id: DEFAULT_SOURCE_ID.to_owned(),
            source_layer: DEFAULT_SOURCE_LAYER.to_owned(),
            layer_id: DEFAULT_LAYER_ID.to_owned(),
            geocoder_country: DEFAULT_GEOCODER_COUNTRY.to_owned(),
        }
    }
}

impl MapConfig {
    pub fn has_access_token(&self) -> bool {
        !self.access_token.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_payload_keeps_defaults() {
        let config: MapConfig =
            serde_json::from_str(r#"{"accessToken":"pk.abc"}"#).expect("parse config");
        assert_eq!(config.access_token, "pk.abc");
        assert_eq!(config.layer_id, "Income-Layer");
        assert_eq!(config.source_layer, "2015-Toronto-Income-0ngmhw");
        assert!(config.has_access_token());
    }

    #[test]
    fn serializes_camel_case_keys() {
        let value = serde_json::to_value(MapConfig::default()).expect("serialize");
        assert_eq!(value["styleUrl"], DEFAULT_STYLE_URL);
        assert_eq!(value["tilesetUrl"], DEFAULT_TILESET_URL);
        assert_eq!(value["geocoderCountry"], "ca");
    }

    #[test]
    fn blank_token_is_not_configured() {
        let config = MapConfig {
            access_token: "   ".into(),
            ..MapConfig::default()
        };
        assert!(!config.has_access_token());
    }
}
