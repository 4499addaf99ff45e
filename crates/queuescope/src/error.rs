//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use queuescope_config::ConfigError;
use queuescope_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const INVALID_SNAPSHOT: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Input ────────────────────────────────────────────────────────

    #[error("No {kind} snapshot given")]
    #[diagnostic(
        code(queuescope::no_input),
        help(
            "Pass --input <FILE>, or set defaults.{key} in the config file.\n\
             Run: queuescope config path"
        )
    )]
    NoInput { kind: &'static str, key: &'static str },

    #[error("Cannot read {path}")]
    #[diagnostic(code(queuescope::read_failed), help("Check that the file exists and is readable."))]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot: {message}")]
    #[diagnostic(
        code(queuescope::invalid_snapshot),
        help(
            "Expected a scheduler payload ({{\"scheduler\": {{\"schedulerInfo\": ...}}}}),\n\
             a JSON array of queue records, or a cluster metrics object."
        )
    )]
    InvalidSnapshot { message: String },

    // ── Queues ───────────────────────────────────────────────────────

    #[error("Queue '{name}' not found")]
    #[diagnostic(code(queuescope::not_found), help("Run: queuescope queues list"))]
    QueueNotFound { name: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(queuescope::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(queuescope::config_exists),
        help("Use --force to overwrite.\nLocation: {path}")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(queuescope::config))]
    Config(#[from] ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::QueueNotFound { .. } => exit_code::NOT_FOUND,
            Self::NoInput { .. } | Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            Self::InvalidSnapshot { .. } => exit_code::INVALID_SNAPSHOT,
            Self::ReadFailed { .. } | Self::Config(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Io { path, source } => CliError::ReadFailed {
                path: path.display().to_string(),
                source,
            },
            CoreError::Parse { message } => CliError::InvalidSnapshot { message },
            CoreError::MissingField { field } => CliError::InvalidSnapshot {
                message: format!("missing `{field}`"),
            },
        }
    }
}
