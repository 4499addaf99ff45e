//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use queuescope_core::{ClusterMetrics, QueueRecord};

use crate::screen::ScreenId;

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ──
    SwitchScreen(ScreenId),
    ToggleHelp,

    // ── Data ──
    /// Ask the loader to read the snapshot files again.
    Reload,
    QueuesLoaded(Arc<Vec<QueueRecord>>),
    MetricsLoaded(Arc<ClusterMetrics>),
    LoadFailed(String),

    /// One-line message for the status bar.
    Notify(String),
}
