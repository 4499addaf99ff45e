//! Snapshot loader: reads the queue and cluster files off the event loop
//! and forwards the results as [`Action`]s.
//!
//! Runs as a background task. Loads once on start, then again every time
//! a reload is requested, until cancelled.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use queuescope_core::{CoreError, source};

use crate::action::Action;

/// Snapshot files to watch. Either may be absent.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub queues: Option<PathBuf>,
    pub metrics: Option<PathBuf>,
}

pub async fn spawn_loader(
    sources: Sources,
    action_tx: mpsc::UnboundedSender<Action>,
    mut reload_rx: mpsc::UnboundedReceiver<()>,
    cancel: CancellationToken,
) {
    load_all(&sources, &action_tx).await;

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            request = reload_rx.recv() => {
                if request.is_none() {
                    break;
                }
                load_all(&sources, &action_tx).await;
            }
        }
    }

    debug!("loader shut down");
}

async fn load_all(sources: &Sources, action_tx: &mpsc::UnboundedSender<Action>) {
    if sources.queues.is_none() && sources.metrics.is_none() {
        let _ = action_tx.send(Action::Notify(
            "no snapshot files configured (pass --queues / --metrics)".into(),
        ));
        return;
    }

    if let Some(path) = &sources.queues {
        let action = match read(path.clone(), source::load_queues).await {
            Ok(records) => {
                info!(queues = records.len(), path = %path.display(), "queue snapshot loaded");
                Action::QueuesLoaded(Arc::new(records))
            }
            Err(message) => Action::LoadFailed(message),
        };
        let _ = action_tx.send(action);
    }

    if let Some(path) = &sources.metrics {
        let action = match read(path.clone(), source::load_cluster_metrics).await {
            Ok(metrics) => {
                info!(path = %path.display(), "cluster metrics loaded");
                Action::MetricsLoaded(Arc::new(metrics))
            }
            Err(message) => Action::LoadFailed(message),
        };
        let _ = action_tx.send(action);
    }
}

/// Run a blocking file parser on the blocking pool.
async fn read<T, F>(path: PathBuf, parse: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce(&Path) -> Result<T, CoreError> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || parse(&path)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            warn!(error = %e, "snapshot load failed");
            Err(e.to_string())
        }
        Err(e) => Err(format!("loader task failed: {e}")),
    }
}
