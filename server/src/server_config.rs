use std::net::SocketAddr;
use std::path::PathBuf;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::gravity_four::Difficulty;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE_NAME: &str = "gravity_four_server.yaml";

pub fn get_config_manager(
    path: impl Into<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, ServerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub listen_address: String,
    pub static_files_path: String,
    /// Preset preselected in the setup form.
    #[serde(default = "default_difficulty")]
    pub default_difficulty: String,
}

fn default_difficulty() -> String {
    "easy".to_string()
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.listen_address
            .parse()
            .map_err(|e| format!("Invalid listen address '{}': {}", self.listen_address, e))
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.socket_addr()?;
        if self.static_files_path.is_empty() {
            return Err("static_files_path must not be empty".to_string());
        }
        Difficulty::from_key(&self.default_difficulty).map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:8000".to_string(),
            static_files_path: "static".to_string(),
            default_difficulty: default_difficulty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::ConfigSerializer;

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_gravity_four_server_config_{}.yaml", random_number))
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr().unwrap().port(), 8000);
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = ServerConfig::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: ServerConfig = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_missing_file_yields_default_config() {
        let manager = get_config_manager(get_temp_file_path());
        assert_eq!(manager.get_config().unwrap(), ServerConfig::default());
    }

    #[test]
    fn test_config_written_and_read_back() {
        let path = get_temp_file_path();
        let config = ServerConfig {
            listen_address: "127.0.0.1:9100".to_string(),
            static_files_path: "/srv/gravity/static".to_string(),
            default_difficulty: "hard".to_string(),
        };
        get_config_manager(path.clone()).set_config(&config).unwrap();

        let loaded = get_config_manager(path.clone()).get_config().unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_default_difficulty_field_uses_easy() {
        let serializer = YamlConfigSerializer::new();
        let config: ServerConfig = serializer
            .deserialize("listen_address: 127.0.0.1:8000\nstatic_files_path: static\n")
            .unwrap();
        assert_eq!(config.default_difficulty, "easy");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_address = ServerConfig {
            listen_address: "not-an-address".to_string(),
            ..ServerConfig::default()
        };
        assert!(bad_address.validate().is_err());

        let bad_static = ServerConfig {
            static_files_path: String::new(),
            ..ServerConfig::default()
        };
        assert!(bad_static.validate().is_err());

        let bad_difficulty = ServerConfig {
            default_difficulty: "extreme".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(
            bad_difficulty.validate().unwrap_err(),
            "Unknown difficulty: extreme"
        );
    }
}
