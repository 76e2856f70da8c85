mod carousel;
mod theme;
mod watcher;

pub use carousel::CarouselConfig;
pub use theme::{CarouselStyle, Theme};
pub use watcher::{ConfigEvent, ConfigWatcherMode};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use directories::BaseDirs;

use crate::error::{CarouselError, Result};

const CONFIG_DIR: &str = "carousel-tui";
const MAIN_CONFIG_FILE: &str = "config.toml";
const THEME_FILE: &str = "theme.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub carousel: CarouselConfig,
}

/// What the app does when the last page is advanced past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishBehavior {
    /// No finish callback: the carousel wraps to the first page
    #[default]
    Wrap,
    /// Show a status message and stay on the last page
    Notify,
    /// Exit the application
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub tick_interval_ms: u64,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub watch_config: bool,
    pub config_poll_interval_ms: u64,
    pub on_finish: FinishBehavior,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
            log_level: "info".to_string(),
            log_file: None,
            watch_config: true,
            config_poll_interval_ms: 2000,
            on_finish: FinishBehavior::Wrap,
        }
    }
}

pub struct ConfigManager {
    config_dir: PathBuf,
    app_config: AppConfig,
    theme: Theme,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Ok(Self::with_dir(Self::get_config_dir()?))
    }

    pub fn with_dir(config_dir: PathBuf) -> Self {
        let app_config = Self::load_app_config(&config_dir);
        let theme = Self::load_theme(&config_dir);

        Self {
            config_dir,
            app_config,
            theme,
        }
    }

    /// Use `dir` when given, the platform config directory otherwise.
    pub fn load(dir: Option<PathBuf>) -> Result<Self> {
        match dir {
            Some(dir) if !dir.is_dir() => Err(CarouselError::ConfigNotFound { path: dir }),
            Some(dir) => Ok(Self::with_dir(dir)),
            None => Self::new(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.app_config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn reload_all(&mut self) {
        self.app_config = Self::load_app_config(&self.config_dir);
        self.theme = Self::load_theme(&self.config_dir);
    }

    pub fn reload_file(&mut self, path: &Path) {
        let file_name = path.file_name().and_then(|n| n.to_str());

        match file_name {
            Some(MAIN_CONFIG_FILE) => {
                self.app_config = Self::load_app_config(&self.config_dir);
            }
            Some(THEME_FILE) => {
                self.theme = Self::load_theme(&self.config_dir);
            }
            _ => {
                self.reload_all();
            }
        }
    }

    fn get_config_dir() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR))
            .ok_or_else(|| CarouselError::Config("Could not determine config directory".to_string()))
    }

    fn load_app_config(config_dir: &Path) -> AppConfig {
        let path = config_dir.join(MAIN_CONFIG_FILE);
        Self::load_toml_file(&path).unwrap_or_default()
    }

    fn load_theme(config_dir: &Path) -> Theme {
        let path = config_dir.join(THEME_FILE);
        Self::load_toml_file(&path).unwrap_or_default()
    }

    fn load_toml_file<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Option<T> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)
                .map_err(|e| CarouselError::Config(format!("Failed to create config dir: {}", e)))?;
        }
        Ok(())
    }

    /// Write default config.toml and theme.toml, leaving existing files alone.
    pub fn write_default_configs(&self) -> Result<()> {
        self.ensure_config_dir()?;

        let main_path = self.config_dir.join(MAIN_CONFIG_FILE);
        if !main_path.exists() {
            let content = toml::to_string_pretty(&AppConfig::default())
                .map_err(|e| CarouselError::Config(format!("Failed to serialize config: {}", e)))?;
            std::fs::write(&main_path, content)
                .map_err(|e| CarouselError::Config(format!("Failed to write config: {}", e)))?;
        }

        let theme_path = self.config_dir.join(THEME_FILE);
        if !theme_path.exists() {
            let content = toml::to_string_pretty(&Theme::default())
                .map_err(|e| CarouselError::Config(format!("Failed to serialize theme: {}", e)))?;
            std::fs::write(&theme_path, content)
                .map_err(|e| CarouselError::Config(format!("Failed to write theme: {}", e)))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();
        assert_eq!(config.general.tick_interval_ms, 50);
        assert!(config.general.watch_config);
        assert_eq!(config.general.on_finish, FinishBehavior::Wrap);
        assert_eq!(config.carousel, CarouselConfig::default());
    }

    #[test]
    fn test_app_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_finish_behavior_names() {
        let general: GeneralConfig = toml::from_str("on_finish = \"quit\"").unwrap();
        assert_eq!(general.on_finish, FinishBehavior::Quit);
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(dir.path().to_path_buf());
        assert_eq!(manager.app_config(), &AppConfig::default());
        assert_eq!(manager.theme(), &Theme::default());
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MAIN_CONFIG_FILE), "[carousel\nbroken").unwrap();
        let manager = ConfigManager::with_dir(dir.path().to_path_buf());
        assert_eq!(manager.app_config(), &AppConfig::default());
    }

    #[test]
    fn test_reload_file_picks_up_changes() {
        let dir = TempDir::new().unwrap();
        let mut manager = ConfigManager::with_dir(dir.path().to_path_buf());

        let path = dir.path().join(MAIN_CONFIG_FILE);
        std::fs::write(&path, "[carousel]\nautomatic = true\ninterval_ms = 250\n").unwrap();
        manager.reload_file(&path);

        assert!(manager.app_config().carousel.automatic);
        assert_eq!(manager.app_config().carousel.interval_ms, 250);
    }

    #[test]
    fn test_write_default_configs() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join("nested");
        let manager = ConfigManager::with_dir(config_dir.clone());
        manager.write_default_configs().unwrap();

        assert!(config_dir.join(MAIN_CONFIG_FILE).exists());
        assert!(config_dir.join(THEME_FILE).exists());

        let reloaded = ConfigManager::with_dir(config_dir);
        assert_eq!(reloaded.app_config(), &AppConfig::default());
    }

    #[test]
    fn test_load_rejects_missing_dir() {
        let err = ConfigManager::load(Some(PathBuf::from("/nonexistent/carousel"))).err();
        assert!(matches!(err, Some(CarouselError::ConfigNotFound { .. })));
    }
}
