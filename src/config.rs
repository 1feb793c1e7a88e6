use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// First day of the week for the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => write!(f, "sunday"),
            WeekStart::Monday => write!(f, "monday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sunday" => Ok(WeekStart::Sunday),
            "monday" => Ok(WeekStart::Monday),
            _ => Err(format!(
                "Invalid week start '{}'. Valid options: sunday, monday",
                s
            )),
        }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Path to the wishes snapshot file
    pub data_path: ConfigValue<PathBuf>,
    /// First day of the week in the calendar view
    pub week_start: ConfigValue<WeekStart>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_path: Option<PathBuf>,
    week_start: Option<WeekStart>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let default_data_path = Self::default_data_dir().join("wishes.json");

        // Start with defaults
        let mut data_path = ConfigValue::new(default_data_path, ConfigSource::Default);
        let mut week_start = ConfigValue::new(WeekStart::default(), ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(file_path) = file_config.data_path {
                // Resolve relative paths against config file's directory
                let resolved_path = if file_path.is_relative() {
                    path.parent()
                        .map(|p| p.join(&file_path))
                        .unwrap_or(file_path)
                } else {
                    file_path
                };
                data_path = ConfigValue::new(resolved_path, ConfigSource::File);
            }
            if let Some(ws) = file_config.week_start {
                week_start = ConfigValue::new(ws, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(env_path) = std::env::var("WISH_DATA_PATH") {
            data_path = ConfigValue::new(PathBuf::from(env_path), ConfigSource::Environment);
        }
        if let Ok(ws) = std::env::var("WISH_WEEK_START") {
            let parsed = ws
                .parse::<WeekStart>()
                .map_err(|e| ConfigError::InvalidValue("WISH_WEEK_START".to_string(), e))?;
            week_start = ConfigValue::new(parsed, ConfigSource::Environment);
        }

        Ok(Self {
            data_path,
            week_start,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/wishplanet/
    /// - macOS: ~/Library/Application Support/wishplanet/
    /// - Windows: %APPDATA%/wishplanet/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wishplanet")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/wishplanet/
    /// - macOS: ~/Library/Application Support/wishplanet/
    /// - Windows: %APPDATA%/wishplanet/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wishplanet")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(String, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(key, e) => {
                write!(f, "Invalid value for {}: {}", key, e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config
            .data_path
            .value
            .to_string_lossy()
            .contains("wishes.json"));
        assert_eq!(config.data_path.source, ConfigSource::Default);
        assert_eq!(config.week_start.value, WeekStart::Sunday);
        assert_eq!(config.week_start.source, ConfigSource::Default);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_path: /custom/path/wishes.json").unwrap();
        writeln!(file, "week_start: monday").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(
            config.data_path.value,
            PathBuf::from("/custom/path/wishes.json")
        );
        assert_eq!(config.data_path.source, ConfigSource::File);
        assert_eq!(config.week_start.value, WeekStart::Monday);
        assert_eq!(config.week_start.source, ConfigSource::File);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_relative_data_path_resolved_against_config_dir() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_path: data/wishes.json").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(
            config.data_path.value,
            temp_dir.path().join("data/wishes.json")
        );
    }

    #[test]
    fn test_partial_file_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "week_start: monday").unwrap();
        // data_path not specified

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_path.source, ConfigSource::Default);
        assert_eq!(config.week_start.value, WeekStart::Monday);
        assert_eq!(config.week_start.source, ConfigSource::File);
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_week_start_in_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "week_start: saturday").unwrap();

        assert!(Config::load(Some(config_path)).is_err());
    }

    #[test]
    fn test_week_start_from_str() {
        assert_eq!("sunday".parse::<WeekStart>().unwrap(), WeekStart::Sunday);
        assert_eq!("MONDAY".parse::<WeekStart>().unwrap(), WeekStart::Monday);
        assert!("friday".parse::<WeekStart>().is_err());
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "week_start: monday").unwrap();

        std::env::set_var("WISH_WEEK_START", "sunday");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.week_start.value, WeekStart::Sunday);
        assert_eq!(config.week_start.source, ConfigSource::Environment);

        std::env::remove_var("WISH_WEEK_START");
    }
}
