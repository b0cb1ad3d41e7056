use link_engine::settings::LevelSettings;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;

pub trait ConfigContentProvider {
    fn get_config_content(&self) -> Result<Option<String>, String>;
    fn set_config_content(&self, content: &str) -> Result<(), String>;
}

pub struct FileContentConfigProvider {
    file_path: String,
}

impl FileContentConfigProvider {
    pub fn new(file_path: String) -> Self {
        Self { file_path }
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(self.file_path.as_str()) {
            Ok(content) => Ok(Some(content)),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Ok(None),
                _ => Err(format!("Failed to read config file: {}", err)),
            },
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        std::fs::write(self.file_path.as_str(), content)
            .map_err(|e| format!("Failed to write config file: {}", e))
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub level: LevelSettings,
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        self.level.validate()
    }
}

// A missing config file is not an error; it means defaults.
pub fn load_config<P: ConfigContentProvider>(provider: &P) -> Result<Config, String> {
    let Some(content) = provider.get_config_content()? else {
        return Ok(Config::default());
    };

    let config: Config = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("Failed to deserialize config: {}", e))?;

    config
        .validate()
        .map_err(|e| format!("Config validation error: {}", e))?;

    Ok(config)
}

pub fn save_config<P: ConfigContentProvider>(provider: &P, config: &Config) -> Result<(), String> {
    config
        .validate()
        .map_err(|e| format!("Config validation error: {}", e))?;

    let content = serde_yaml_ng::to_string(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    provider.set_config_content(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_temp_file_path() -> String {
        use std::env;
        let mut path = env::temp_dir();
        let random_number: u32 = rand::random();
        let file_name = format!("temp_link_cli_config_{}.yaml", random_number);
        path.push(file_name);
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_round_trips_through_file() {
        let config = Config::default();
        let provider = FileContentConfigProvider::new(get_temp_file_path());

        save_config(&provider, &config).unwrap();
        let loaded = load_config(&provider).unwrap();

        assert_eq!(config, loaded);
    }

    #[test]
    fn test_missing_file_returns_default_config() {
        let provider = FileContentConfigProvider::new("this_file_does_not_exist.yaml".to_string());

        let loaded = load_config(&provider).unwrap();

        assert_eq!(Config::default(), loaded);
    }

    #[test]
    fn test_out_of_range_level_rejected_on_load() {
        let invalid_config_content = r#"
            level:
              rows: 1
              cols: 10
              pattern_kinds: 20
              pattern_count: 40
        "#;

        let provider = FileContentConfigProvider::new(get_temp_file_path());
        provider.set_config_content(invalid_config_content).unwrap();

        let result = load_config(&provider);

        assert!(result.is_err());
    }

    #[test]
    fn test_incomplete_level_rejected_on_load() {
        let invalid_config_content = r#"
            level:
              rows: 8
              cols: 10
        "#;

        let provider = FileContentConfigProvider::new(get_temp_file_path());
        provider.set_config_content(invalid_config_content).unwrap();

        let result = load_config(&provider);

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_level_rejected_on_save() {
        let config = Config {
            level: LevelSettings {
                rows: 1,
                ..LevelSettings::default()
            },
        };
        let provider = FileContentConfigProvider::new(get_temp_file_path());

        assert!(save_config(&provider, &config).is_err());
    }
}
