use crate::index::build::CorpusOptions;
use crate::index::types::NgramRange;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "hotgram";
const CONFIG_FILE: &str = "config.json";
const CONFIG_ENV: &str = "HOTGRAM_CONFIG";

/// Application configuration stored in the user's config directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shortest n-gram harvested from each leaked password
    #[serde(default = "default_min_n")]
    pub min_n: usize,

    /// Longest n-gram harvested from each leaked password
    #[serde(default = "default_max_n")]
    pub max_n: usize,

    /// Strip surrounding whitespace from corpus lines (opt-in)
    #[serde(default)]
    pub trim_whitespace: bool,

    /// Ignore corpus lines starting with `#`
    #[serde(default)]
    pub skip_comments: bool,
}

fn default_min_n() -> usize {
    3
}

fn default_max_n() -> usize {
    6
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            min_n: default_min_n(),
            max_n: default_max_n(),
            trim_whitespace: false,
            skip_comments: false,
        }
    }
}

impl AppConfig {
    /// Load config from the resolved config path, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path, or return default if it does not exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
        Ok(config)
    }

    /// Save config to the resolved config path
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = get_config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file {}", config_path.display()))?;
        Ok(())
    }

    /// The configured n-gram range, rejected if `min_n`/`max_n` are unusable
    pub fn ngram_range(&self) -> Result<NgramRange> {
        NgramRange::new(self.min_n, self.max_n).context("Invalid n-gram range in config")
    }

    pub fn corpus_options(&self, show_progress: bool) -> CorpusOptions {
        CorpusOptions {
            trim_whitespace: self.trim_whitespace,
            skip_comments: self.skip_comments,
            show_progress,
        }
    }
}

/// Get the path to the config file.
///
/// `HOTGRAM_CONFIG` wins when set; otherwise the platform config directory is used.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.min_n, 3);
        assert_eq!(config.max_n, 6);
        assert!(!config.trim_whitespace);
        assert!(!config.skip_comments);
        assert!(config.ngram_range().is_ok());
    }

    #[test]
    fn test_app_config_serialization() {
        let config = AppConfig {
            min_n: 2,
            max_n: 4,
            trim_whitespace: false,
            skip_comments: true,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_app_config_partial_json() {
        // Should use defaults for missing fields
        let json = r#"{"max_n": 8}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.min_n, 3);
        assert_eq!(config.max_n, 8);
        assert!(!config.trim_whitespace);
    }

    #[test]
    fn test_app_config_empty_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_app_config_invalid_range() {
        let config = AppConfig {
            min_n: 5,
            max_n: 2,
            ..AppConfig::default()
        };
        assert!(config.ngram_range().is_err());

        let config = AppConfig {
            min_n: 0,
            ..AppConfig::default()
        };
        assert!(config.ngram_range().is_err());
    }

    #[test]
    fn test_app_config_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        assert_eq!(AppConfig::load_from(&path).unwrap(), AppConfig::default());

        let config = AppConfig {
            min_n: 4,
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_app_config_save_uses_env_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hotgram").join(CONFIG_FILE);
        // No other test in this binary reads the config env var
        unsafe { std::env::set_var(CONFIG_ENV, &path) };

        let config = AppConfig {
            max_n: 9,
            ..AppConfig::default()
        };
        let written = config.save().unwrap();
        unsafe { std::env::remove_var(CONFIG_ENV) };

        assert_eq!(written, path);
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_corpus_options() {
        let config = AppConfig {
            skip_comments: true,
            ..AppConfig::default()
        };
        let options = config.corpus_options(true);
        assert!(options.skip_comments);
        assert!(!options.trim_whitespace);
        assert!(options.show_progress);
    }
}
