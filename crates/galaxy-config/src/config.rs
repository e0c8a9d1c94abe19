//! Persisted settings: galaxy shape, regeneration watching, and logging.

use std::path::{Path, PathBuf};

use galaxy_core::GalaxyParameters;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the settings file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Galaxy shape parameters, the record the control panel edits.
    pub galaxy: GalaxyParameters,
    /// Random source settings.
    pub generator: GeneratorConfig,
    /// Regenerate when the config file changes.
    pub watch: WatchConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Random source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible clouds. `None` seeds from system entropy.
    pub seed: Option<u64>,
    /// Clamp and step-snap parameters to the control panel ranges before generating.
    pub snap_to_editor: bool,
}

/// File watching configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WatchConfig {
    /// Keep running and regenerate whenever `config.ron` changes.
    pub enabled: bool,
    /// How often to check the file, in milliseconds.
    pub poll_interval_ms: u64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log cloud statistics after every generation.
    pub log_stats: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            poll_interval_ms: 500,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_stats: true,
        }
    }
}

/// Platform config directory for this application, e.g. `~/.config/spiral-galaxy`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("spiral-galaxy"))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// The galaxy parameters to generate from, snapped to editor ranges if configured.
    pub fn effective_parameters(&self) -> GalaxyParameters {
        if self.generator.snap_to_editor {
            self.galaxy.snapped_to_editor()
        } else {
            self.galaxy.clone()
        }
    }

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(config_path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use galaxy_core::Rgb;

    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("count: 100000"));
        assert!(ron_str.contains("inside_color: \"#00ff00\""));
        assert!(ron_str.contains("poll_interval_ms: 500"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.galaxy.outside_color = Rgb::from_hex("#1b3984").unwrap();
        config.generator.seed = Some(42);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(galaxy: (branches: 5))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.galaxy.branches, 5);
        assert_eq!(config.galaxy.count, 100_000);
        assert_eq!(config.watch, WatchConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_color_produces_error() {
        let result: Result<Config, _> = ron::from_str("(galaxy: (inside_color: \"green\"))");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.galaxy.count = 2_500;
        config.galaxy.spin_angle = -1.5;
        config.watch.enabled = true;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.galaxy.branches = 7;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.galaxy.branches), Some(7));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_reload_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        let result = Config::default().reload(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_effective_parameters_snaps_when_enabled() {
        let mut config = Config::default();
        config.galaxy.count = 1_234_567;
        assert_eq!(config.effective_parameters().count, 1_234_567);

        config.generator.snap_to_editor = true;
        assert_eq!(config.effective_parameters().count, 100_000);
    }
}
