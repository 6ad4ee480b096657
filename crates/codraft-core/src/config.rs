// Configuration loading and parsing (codraft.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::draft::pick::DEFAULT_TEAM_COUNT;

const CONFIG_FILE: &str = "codraft.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub draft: DraftConfig,
    pub data: DataPaths,
    pub report: ReportConfig,
}

/// Settings that shape the draft model itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    /// Teams (slots) per round. Must match the dataset or every slot is wrong.
    pub team_count: u32,
    /// Reject drafts whose pick numbers are not exactly 1..=N.
    pub require_contiguous_picks: bool,
}

impl Default for DraftConfig {
    fn default() -> Self {
        DraftConfig {
            team_count: DEFAULT_TEAM_COUNT,
            require_contiguous_picks: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub drafts: String,
    pub player_info: Option<String>,
}

impl DataPaths {
    /// Resolve relative data paths against `base_dir`. Absolute paths are
    /// left alone.
    pub fn rebase(&mut self, base_dir: &Path) {
        let join = |p: &str| -> String {
            if Path::new(p).is_absolute() {
                p.to_string()
            } else {
                base_dir.join(p).display().to_string()
            }
        };
        self.drafts = join(&self.drafts);
        self.player_info = self.player_info.as_deref().map(join);
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths {
            drafts: "data/drafts.csv".into(),
            player_info: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Maximum next-pick rows printed by the command-line front end.
    pub max_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig { max_rows: 25 }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Per-user config directory (e.g. `~/.config/codraft` on Linux).
pub fn user_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "codraft").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Candidate config files for `base_dir`, most specific first:
/// `config/codraft.toml`, `defaults/codraft.toml`, then `user_dir` if given.
pub fn config_search_paths(base_dir: &Path, user_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![
        base_dir.join("config").join(CONFIG_FILE),
        base_dir.join("defaults").join(CONFIG_FILE),
    ];
    if let Some(dir) = user_dir {
        paths.push(dir.join(CONFIG_FILE));
    }
    paths
}

/// Load and validate configuration for `base_dir`, falling back to the
/// per-user config directory.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    load_config_with(base_dir, user_config_dir().as_deref())
}

/// Load and validate configuration for `base_dir` with an explicit per-user
/// directory.
///
/// The first existing file from `config_search_paths` wins. When none exists
/// the built-in defaults are used; that is not an error.
pub fn load_config_with(base_dir: &Path, user_dir: Option<&Path>) -> Result<Config, ConfigError> {
    match config_search_paths(base_dir, user_dir)
        .into_iter()
        .find(|p| p.is_file())
    {
        Some(path) => load_config_file(&path),
        None => {
            info!("No {} found; using built-in defaults", CONFIG_FILE);
            let config = Config::default();
            validate(&config)?;
            Ok(config)
        }
    }
}

/// Load and validate one specific config file.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let text = read_file(path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    info!("Config loaded from {}", path.display());
    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.draft.team_count == 0 {
        return Err(ConfigError::ValidationError {
            field: "draft.team_count".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.data.drafts.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.drafts".into(),
            message: "must not be empty".into(),
        });
    }

    if config
        .data
        .player_info
        .as_deref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(ConfigError::ValidationError {
            field: "data.player_info".into(),
            message: "must not be empty when set".into(),
        });
    }

    if config.report.max_rows == 0 {
        return Err(ConfigError::ValidationError {
            field: "report.max_rows".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
