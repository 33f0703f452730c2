//! Settings loading
//!
//! Recognised environment variables (a `.env` file is honoured when `main` loads it):
//! - `AUTO_SAVE`: save history after every successful calculation (`1/true/yes/on`)
//! - `HISTORY_CSV_PATH`: default CSV file for `save`, `load` and auto-save

use figment::{providers::Serialized, Figment};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable enabling auto-save
pub const AUTO_SAVE_ENV: &str = "AUTO_SAVE";
/// Environment variable holding the default CSV path
pub const CSV_PATH_ENV: &str = "HISTORY_CSV_PATH";
/// File used by `save`/`load` when no path is configured
pub const FALLBACK_CSV_PATH: &str = "history.csv";

/// Session settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub auto_save: bool,
    pub csv_path: Option<PathBuf>,
}

/// Environment values exactly as written; `Env` would coerce `007` to `7`
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawEnv {
    auto_save: Option<String>,
    history_csv_path: Option<String>,
}

impl RawEnv {
    fn capture() -> Self {
        let var = |key: &str| env::var_os(key).map(|v| v.to_string_lossy().into_owned());
        Self {
            auto_save: var(AUTO_SAVE_ENV),
            history_csv_path: var(CSV_PATH_ENV),
        }
    }
}

impl From<RawEnv> for Settings {
    fn from(raw: RawEnv) -> Self {
        Self {
            auto_save: raw.auto_save.as_deref().is_some_and(parse_flag),
            csv_path: raw
                .history_csv_path
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

impl Settings {
    /// Load settings from the process environment
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract::<RawEnv>().map(Settings::from)
    }

    /// Figment over a snapshot of `AUTO_SAVE` and `HISTORY_CSV_PATH`
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(RawEnv::default()))
            .merge(Serialized::defaults(RawEnv::capture()))
    }

    /// Apply command-line overrides; flags only ever switch things on
    pub fn with_overrides(mut self, auto_save: bool, csv_path: Option<PathBuf>) -> Self {
        if auto_save {
            self.auto_save = true;
        }
        if let Some(path) = csv_path {
            self.csv_path = Some(path);
        }
        self
    }

    /// Path used by `save`/`load` without an argument
    pub fn csv_path_or_default(&self) -> &Path {
        self.csv_path
            .as_deref()
            .unwrap_or_else(|| Path::new(FALLBACK_CSV_PATH))
    }

    /// Auto-save target, if auto-save is on and a path is configured
    pub fn auto_save_path(&self) -> Option<&Path> {
        if self.auto_save {
            self.csv_path.as_deref()
        } else {
            None
        }
    }
}

/// Interpret a bool-like string: `1`, `true`, `yes`, `on` (case-insensitive)
pub fn parse_flag(raw: &str) -> bool {
    let t = raw.trim();
    ["1", "true", "yes", "on"]
        .iter()
        .any(|accepted| t.eq_ignore_ascii_case(accepted))
}
