//! Configuration loader and validator for the bank-feed listing service.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Root configuration struct mirroring the YAML schema exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub app: App,
    #[serde(default)]
    pub listing: Listing,
}

/// App-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct App {
    pub data_dir: String,
}

/// Listing defaults and limits for uncategorized transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Listing {
    pub default_page_size: i64,
    pub max_page_size: i64,
    /// Match `matchDescription` ignoring case. SQLite's `lower()` folds ASCII
    /// letters only, so `É` and `é` still differ.
    pub case_insensitive_description: bool,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 200,
            case_insensitive_description: false,
        }
    }
}

impl App {
    /// Data directory with a leading `~/` expanded to `$HOME`.
    pub fn resolved_data_dir(&self) -> String {
        if let Some(rest) = self.data_dir.strip_prefix("~/") {
            if let Ok(home) = std::env::var("HOME") {
                return format!("{}/{}", home.trim_end_matches('/'), rest);
            }
        }
        self.data_dir.clone()
    }
}

impl Config {
    /// Ensure required directories exist (creates `app.data_dir` if missing).
    pub fn ensure_dirs(&self) -> Result<(), std::io::Error> {
        if self.app.data_dir.trim().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(self.app.resolved_data_dir())
    }

    /// `DATABASE_URL` if set, otherwise a SQLite file inside the data dir.
    pub fn database_url(&self) -> String {
        std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| format!("sqlite://{}/bankfeed.db", self.app.resolved_data_dir()))
    }
}

/// Load configuration from a YAML file and validate it.
/// - If `path` is None, uses `config.yaml` in the current working directory.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("config.yaml"));
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Validate a configuration instance.
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.app.data_dir.trim().is_empty() {
        return Err(ConfigError::Invalid("app.data_dir must be non-empty"));
    }
    if cfg.listing.default_page_size <= 0 {
        return Err(ConfigError::Invalid("listing.default_page_size must be > 0"));
    }
    if cfg.listing.max_page_size < cfg.listing.default_page_size {
        return Err(ConfigError::Invalid(
            "listing.max_page_size must be >= listing.default_page_size",
        ));
    }
    Ok(())
}

/// Returns the example YAML shipped with the CLI.
pub fn example() -> &'static str {
    r#"app:
  data_dir: "./data"

listing:
  default_page_size: 20
  max_page_size: 200
  case_insensitive_description: false
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_example_ok() {
        let cfg: Config = serde_yaml::from_str(example()).unwrap();
        validate(&cfg).unwrap();
        assert_eq!(cfg.listing, Listing::default());
    }

    #[test]
    fn listing_section_is_optional() {
        let cfg: Config = serde_yaml::from_str("app:\n  data_dir: ./data\n").unwrap();
        validate(&cfg).unwrap();
        assert_eq!(cfg.listing.default_page_size, 20);
    }

    #[test]
    fn invalid_data_dir() {
        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.app.data_dir = "  ".into();
        let err = validate(&cfg).unwrap_err();
        match err {
            ConfigError::Invalid(msg) => assert!(msg.contains("app.data_dir")),
            _ => panic!("wrong error"),
        }
    }

    #[test]
    fn invalid_page_sizes() {
        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.listing.default_page_size = 0;
        let err = validate(&cfg).unwrap_err();
        match err {
            ConfigError::Invalid(msg) => assert!(msg.contains("default_page_size")),
            _ => panic!("wrong error"),
        }

        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.listing.max_page_size = 10;
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn ensure_dirs_creates_data_dir() {
        let td = tempdir().unwrap();
        let data_path = td.path().join("data");
        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.app.data_dir = data_path.to_string_lossy().to_string();
        cfg.ensure_dirs().unwrap();
        assert!(data_path.exists());
    }

    #[test]
    fn load_from_file_ok() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.yaml");
        fs::write(&p, example()).unwrap();
        let cfg = load(Some(&p)).unwrap();
        assert_eq!(cfg.listing.max_page_size, 200);
    }
}
