use income_map_shared::MapConfig;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "client/dist";

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

pub fn server_port() -> u16 {
    env_value("SERVER_PORT")
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn static_dir() -> String {
    env_value("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_owned())
}

/// Map settings handed to the browser; each field can be overridden by env.
pub fn map_config_from_env() -> MapConfig {
    let defaults = MapConfig::default();
    MapConfig {
        access_token: env_value("MAPBOX_ACCESS_TOKEN").unwrap_or(defaults.access_token),
        style_url: env_value("MAP_STYLE_URL").unwrap_or(defaults.style_url),
        tileset_url: env_value("MAP_TILESET_URL").unwrap_or(defaults.tileset_url),
        source_id: defaults.source_id,
        source_layer: env_value("MAP_SOURCE_LAYER").unwrap_or(defaults.source_layer),
        layer_id: defaults.layer_id,
        geocoder_country: env_value("GEOCODER_COUNTRY").unwrap_or(defaults.geocoder_country),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_config_uses_defaults_without_env() {
        temp_env::with_vars_unset(
            [
                "MAPBOX_ACCESS_TOKEN",
                "MAP_STYLE_URL",
                "MAP_TILESET_URL",
                "MAP_SOURCE_LAYER",
                "GEOCODER_COUNTRY",
            ],
            || {
                assert_eq!(map_config_from_env(), MapConfig::default());
            },
        );
    }

    #[test]
    fn map_config_reads_overrides() {
        temp_env::with_vars(
            [
                ("MAPBOX_ACCESS_TOKEN", Some(" pk.from-env ")),
                ("MAP_TILESET_URL", Some("mapbox://someone.tiles")),
                ("GEOCODER_COUNTRY", Some("us")),
                ("MAP_STYLE_URL", None),
                ("MAP_SOURCE_LAYER", None),
            ],
            || {
                let config = map_config_from_env();
                assert_eq!(config.access_token, "pk.from-env");
                assert_eq!(config.tileset_url, "mapbox://someone.tiles");
                assert_eq!(config.geocoder_country, "us");
                assert_eq!(config.style_url, "mapbox://styles/mapbox/dark-v11");
                assert_eq!(config.layer_id, "Income-Layer");
            },
        );
    }

    #[test]
    fn blank_env_values_fall_back() {
        temp_env::with_var("MAP_STYLE_URL", Some("   "), || {
            assert_eq!(
                map_config_from_env().style_url,
                "mapbox://styles/mapbox/dark-v11"
            );
        });
    }

    #[test]
    fn server_port_rejects_invalid_values() {
        temp_env::with_var("SERVER_PORT", Some("not-a-port"), || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("SERVER_PORT", Some("0"), || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("SERVER_PORT", Some("8080"), || {
            assert_eq!(server_port(), 8080);
        });
    }

    #[test]
    fn static_dir_defaults_to_client_dist() {
        temp_env::with_var_unset("STATIC_DIR", || {
            assert_eq!(static_dir(), "client/dist");
        });
    }
}
