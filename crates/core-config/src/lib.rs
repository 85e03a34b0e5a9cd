//! Configuration loading and parsing.
//!
//! Parses `mote.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [editor]
//! tab_stop = 8            # visual width of a tab stop, clamped to >= 1
//! status_name_width = 20  # max chars of the file name in the status line
//!
//! [input]
//! read_timeout_ms = 100   # how long one read waits before the loop repaints (>= 1)
//! letter_motions = true   # h j k l 0 $ J K act as motions instead of text
//! ```
//!
//! Missing sections fall back to defaults; unknown fields are ignored so the
//! file can evolve. A file that fails to parse is logged and replaced by
//! defaults rather than aborting startup.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "mote.toml";

/// Lower bound for `[input] read_timeout_ms`.
pub const MIN_READ_TIMEOUT_MS: u64 = 1;

#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_stop")]
    pub tab_stop: usize,
    #[serde(default = "EditorConfig::default_status_name_width")]
    pub status_name_width: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: Self::default_tab_stop(),
            status_name_width: Self::default_status_name_width(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_stop() -> usize {
        8
    }
    const fn default_status_name_width() -> usize {
        20
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    #[serde(default = "InputConfig::default_letter_motions")]
    pub letter_motions: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            read_timeout_ms: Self::default_read_timeout_ms(),
            letter_motions: Self::default_letter_motions(),
        }
    }
}

impl InputConfig {
    const fn default_read_timeout_ms() -> u64 {
        100
    }
    const fn default_letter_motions() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path: working directory first, then the platform
/// config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("mote").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let mut cfg = Config {
                raw: Some(content),
                file,
            };
            cfg.normalize();
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(cfg)
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Clamp values that would break column arithmetic or spin the input
    /// loop.
    fn normalize(&mut self) {
        let raw = self.file.editor.tab_stop;
        if raw == 0 {
            self.file.editor.tab_stop = 1;
            info!(target: "config", raw, clamped = 1, "tab_stop_clamped");
        }
        let raw = self.file.input.read_timeout_ms;
        if raw < MIN_READ_TIMEOUT_MS {
            self.file.input.read_timeout_ms = MIN_READ_TIMEOUT_MS;
            info!(target: "config", raw, clamped = MIN_READ_TIMEOUT_MS, "read_timeout_clamped");
        }
    }

    pub fn tab_stop(&self) -> usize {
        self.file.editor.tab_stop
    }

    pub fn status_name_width(&self) -> usize {
        self.file.editor.status_name_width
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.file.input.read_timeout_ms)
    }

    pub fn letter_motions(&self) -> bool {
        self.file.input.letter_motions
    }
}
