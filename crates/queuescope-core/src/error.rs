// ── Core error types ──
//
// Layout and charting never fail: every degenerate input has a degrade
// policy. Only snapshot ingest can go wrong, and those failures land here.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot read snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed snapshot: {message}")]
    Parse { message: String },

    #[error("Snapshot is missing `{field}`")]
    MissingField { field: String },
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}
