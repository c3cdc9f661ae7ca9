use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::preset::SerializationPolicy;

/// Where `get_config` looks for the config file, relative to the working directory.
pub const CONFIG_PATH: &str = "config.yaml";

/// User-facing strings, so they can be translated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Localization {
    /// Name given to new presets, and presets read from the host.
    #[serde(default = "Localization::default_preset_name")]
    pub default_preset_name: String,
    /// Shown instead of the zone name when looking it up failed.
    #[serde(default = "Localization::default_zone_name_error")]
    pub zone_name_error: String,
    #[serde(default = "Localization::default_zone_label")]
    pub zone_label: String,
    #[serde(default = "Localization::default_last_modified_label")]
    pub last_modified_label: String,
}

impl Default for Localization {
    fn default() -> Self {
        Self {
            default_preset_name: Self::default_preset_name(),
            zone_name_error: Self::default_zone_name_error(),
            zone_label: Self::default_zone_label(),
            last_modified_label: Self::default_last_modified_label(),
        }
    }
}

impl Localization {
    fn default_preset_name() -> String {
        "New Preset".to_string()
    }

    fn default_zone_name_error() -> String {
        "Error retrieving zone name!".to_string()
    }

    fn default_zone_label() -> String {
        "Zone: ".to_string()
    }

    fn default_last_modified_label() -> String {
        "Last Modified: ".to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub localization: Localization,
    #[serde(default)]
    pub serialization: SerializationPolicy,
}

/// Reads the config from `path`. A missing file is not an error, and gives the default config.
pub fn load_config(path: &Path) -> Result<Config, serde_yaml_ng::Error> {
    match std::fs::read_to_string(path) {
        Ok(data) => serde_yaml_ng::from_str(&data),
        Err(err) => {
            tracing::debug!("Not reading {}: {err}, using defaults", path.display());
            Ok(Config::default())
        }
    }
}

pub fn get_config() -> Result<Config, serde_yaml_ng::Error> {
    load_config(Path::new(CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_is_default() {
        let config = load_config(Path::new("this/does/not/exist.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.localization.default_preset_name, "New Preset");
        assert!(config.serialization.include_time);
    }

    #[test]
    fn partial_config() {
        let config: Config = serde_yaml_ng::from_str(
            "localization:\n  zone_label: \"Gebiet: \"\nserialization:\n  include_time: false\n",
        )
        .unwrap();

        assert_eq!(config.localization.zone_label, "Gebiet: ");
        assert_eq!(config.localization.default_preset_name, "New Preset");
        assert!(!config.serialization.include_time);
    }

    #[test]
    fn invalid_config_is_an_error() {
        assert!(serde_yaml_ng::from_str::<Config>("localization: [1, 2").is_err());
    }
}
