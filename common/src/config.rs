use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TConfig, String>;
}

pub trait ConfigContentProvider {
    /// `Ok(None)` means no stored config yet; callers fall back to defaults.
    fn get_config_content(&self) -> Result<Option<String>, String>;
    fn set_config_content(&self, content: &str) -> Result<(), String>;
}

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

#[derive(Default)]
pub struct YamlConfigSerializer;

impl YamlConfigSerializer {
    pub fn new() -> Self {
        Self {}
    }
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> Result<String, String> {
        serde_yaml_ng::to_string(config).map_err(|e| format!("Failed to serialize config: {}", e))
    }

    fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to deserialize config: {}", e))
    }
}

pub struct FileContentConfigProvider {
    file_path: PathBuf,
}

impl FileContentConfigProvider {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self { file_path: file_path.into() }
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!(
                "Failed to read config file {}: {}",
                self.file_path.display(),
                err
            )),
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        std::fs::write(&self.file_path, content).map_err(|e| {
            format!("Failed to write config file {}: {}", self.file_path.display(), e)
        })
    }
}

/// Loads a config once, validates it and caches the result.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer::new())
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(config_content_provider: TConfigContentProvider, config_serializer: TConfigSerializer) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let config = match self.config_content_provider.get_config_content()? {
            Some(content) => self.config_serializer.deserialize(&content)?,
            None => TConfig::default(),
        };

        config.validate().map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config.validate().map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider.set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct SampleConfig {
        name: String,
        size: u32,
    }

    impl Default for SampleConfig {
        fn default() -> Self {
            Self { name: "sample".to_string(), size: 3 }
        }
    }

    impl Validate for SampleConfig {
        fn validate(&self) -> Result<(), String> {
            if self.size == 0 {
                return Err("size must be greater than 0".to_string());
            }
            Ok(())
        }
    }

    struct MemoryProvider {
        content: Mutex<Option<String>>,
    }

    impl MemoryProvider {
        fn new(content: Option<&str>) -> Self {
            Self { content: Mutex::new(content.map(str::to_string)) }
        }
    }

    impl ConfigContentProvider for MemoryProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Ok(self.content.lock().unwrap().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), String> {
            *self.content.lock().unwrap() = Some(content.to_string());
            Ok(())
        }
    }

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_gravity_four_config_{}.yaml", random_number))
    }

    #[test]
    fn test_missing_content_yields_default() {
        let manager: ConfigManager<_, SampleConfig> =
            ConfigManager::new(MemoryProvider::new(None), YamlConfigSerializer::new());
        assert_eq!(manager.get_config().unwrap(), SampleConfig::default());
    }

    #[test]
    fn test_stored_content_is_parsed() {
        let manager: ConfigManager<_, SampleConfig> = ConfigManager::new(
            MemoryProvider::new(Some("name: custom\nsize: 9\n")),
            YamlConfigSerializer::new(),
        );
        let config = manager.get_config().unwrap();
        assert_eq!(config.name, "custom");
        assert_eq!(config.size, 9);
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        let manager: ConfigManager<_, SampleConfig> = ConfigManager::new(
            MemoryProvider::new(Some("name: custom\nsize: 0\n")),
            YamlConfigSerializer::new(),
        );
        let err = manager.get_config().unwrap_err();
        assert!(err.contains("size must be greater than 0"), "{}", err);

        let garbage: ConfigManager<_, SampleConfig> =
            ConfigManager::new(MemoryProvider::new(Some("size: [")), YamlConfigSerializer::new());
        assert!(garbage.get_config().is_err());
    }

    #[test]
    fn test_set_config_rejects_invalid() {
        let manager: ConfigManager<_, SampleConfig> =
            ConfigManager::new(MemoryProvider::new(None), YamlConfigSerializer::new());
        let invalid = SampleConfig { name: "x".to_string(), size: 0 };
        assert!(manager.set_config(&invalid).is_err());
        assert_eq!(manager.get_config().unwrap(), SampleConfig::default());
    }

    #[test]
    fn test_file_round_trip() {
        let path = get_temp_file_path();
        let config = SampleConfig { name: "on disk".to_string(), size: 12 };

        let writer: ConfigManager<_, SampleConfig> = ConfigManager::from_yaml_file(path.clone());
        writer.set_config(&config).unwrap();

        let reader: ConfigManager<_, SampleConfig> = ConfigManager::from_yaml_file(path.clone());
        assert_eq!(reader.get_config().unwrap(), config);

        let _ = std::fs::remove_file(path);
    }
}
