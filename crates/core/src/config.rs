//! Classroom configuration
//!
//! Defines the TOML format for a classroom: grid shape, roster, and the
//! generation model used for AI grouping. Every field is optional; missing
//! values fall back to the built-in 4x6 class.
//!
//! ```toml
//! rows = 4
//! cols = 6
//!
//! [ai]
//! model = "gemini-2.5-flash"
//!
//! [[students]]
//! id = 1
//! name = "Liam Carter"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::grid;
use crate::models::Student;
use crate::roster::{Roster, DEFAULT_COLS, DEFAULT_ROWS};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "SEATPLAN_CONFIG";

/// File name looked up in the platform config directory
pub const CONFIG_FILE_NAME: &str = "classroom.toml";

/// Model used when the config does not name one
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Raw config as written in TOML
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassroomToml {
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub cols: Option<usize>,
    /// Roster in seating order; empty means the built-in roster
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub ai: AiSettings,
}

/// Generation service settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AiSettings {
    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,
    /// Override for the service base URL
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// Validated classroom configuration
#[derive(Debug, Clone)]
pub struct ClassroomConfig {
    pub rows: usize,
    pub cols: usize,
    pub roster: Roster,
    pub ai: AiSettings,
}

impl Default for ClassroomConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            roster: Roster::default(),
            ai: AiSettings::default(),
        }
    }
}

impl ClassroomConfig {
    /// Parse and validate config from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: ClassroomToml = toml::from_str(content)?;
        Self::from_raw(raw)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!(
            path = %path.display(),
            rows = config.rows,
            cols = config.cols,
            students = config.roster.len(),
            "Loaded classroom config"
        );
        Ok(config)
    }

    /// Locate and load the active config.
    ///
    /// Order: `SEATPLAN_CONFIG`, then `classroom.toml` in the platform
    /// config directory, then built-in defaults. An explicitly named file
    /// that fails to load is an error; a broken file in the config
    /// directory is logged and skipped.
    pub fn discover() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let config_dir = ProjectDirs::from("dev", "seatplan", "seatplan")
            .map(|dirs| dirs.config_dir().to_path_buf());
        Self::discover_from(explicit.as_deref(), config_dir.as_deref())
    }

    pub(crate) fn discover_from(explicit: Option<&Path>, config_dir: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(dir) = config_dir {
            let path = dir.join(CONFIG_FILE_NAME);
            if path.exists() {
                match Self::load(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid classroom config");
                    }
                }
            }
        }

        tracing::info!("Using built-in classroom config");
        Ok(Self::default())
    }

    fn from_raw(raw: ClassroomToml) -> Result<Self> {
        let rows = raw.rows.unwrap_or(DEFAULT_ROWS);
        let cols = raw.cols.unwrap_or(DEFAULT_COLS);
        grid::seat_count(rows, cols)?;

        let roster = if raw.students.is_empty() {
            Roster::default()
        } else {
            Roster::new(raw.students)?
        };

        if raw.ai.model.trim().is_empty() {
            return Err(Error::InvalidConfig("ai.model must not be empty".to_string()));
        }

        Ok(Self {
            rows,
            cols,
            roster,
            ai: raw.ai,
        })
    }
}
