//! Shared configuration for the queuescope CLI and TUI.
//!
//! One TOML file plus `QUEUESCOPE_*` environment overrides, layered over
//! built-in defaults. Both binaries depend on this crate; command-line
//! flags are applied on top by each binary.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_PREFIX: &str = "QUEUESCOPE_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    /// Terminal UI timing.
    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    /// Canvas width in pixels when the host does not supply one.
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f64,

    /// Queue snapshot read when no `--input` is given.
    pub queues_file: Option<PathBuf>,

    /// Cluster metrics snapshot read when no `--input` is given.
    pub metrics_file: Option<PathBuf>,

    /// Emit entrance animations in SVG output.
    #[serde(default = "default_true")]
    pub animate: bool,

    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            queues_file: None,
            metrics_file: None,
            animate: true,
            output: default_output(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TuiConfig {
    /// Data tick interval.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Frame interval; also the transition sampling rate.
    #[serde(default = "default_render_ms")]
    pub render_ms: u64,

    /// Two clicks on the same queue within this window fold it.
    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            render_ms: default_render_ms(),
            double_click_ms: default_double_click_ms(),
        }
    }
}

fn default_canvas_width() -> f64 {
    1600.0
}
fn default_true() -> bool {
    true
}
fn default_output() -> String {
    "table".into()
}
fn default_tick_ms() -> u64 {
    1000
}
fn default_render_ms() -> u64 {
    33
}
fn default_double_click_ms() -> u64 {
    400
}

impl Config {
    /// Reject values the dashboards cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let width = self.defaults.canvas_width;
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::Validation {
                field: "defaults.canvas_width".into(),
                reason: format!("expected a positive width, got {width}"),
            });
        }
        if self.tui.render_ms == 0 || self.tui.tick_ms == 0 {
            return Err(ConfigError::Validation {
                field: "tui".into(),
                reason: "intervals must be at least 1 ms".into(),
            });
        }
        Ok(())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "queuescope", "queuescope").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("queuescope");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load config from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    config.validate()?;
    Ok(config)
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}
