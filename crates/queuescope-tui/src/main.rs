//! `queuescope-tui`: interactive terminal dashboard for scheduler queue
//! trees and cluster metrics.
//!
//! Built on [ratatui](https://ratatui.rs). The Queues screen draws the
//! queue tree with charts for the selected queue; the Cluster screen draws
//! the cluster metric donuts. Hover shows chart values, click selects a
//! queue and double-click folds it.
//!
//! Logs go to a file (default `/tmp/queuescope-tui.log`) so they never
//! corrupt the terminal. A background loader task reads the snapshot files
//! and feeds them into the action loop; `r` reloads them.

mod action;
mod app;
mod component;
mod event;
mod loader;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use queuescope_config::Config;

use crate::app::{App, Timing};
use crate::loader::Sources;

/// Terminal dashboard for scheduler queues and cluster metrics.
#[derive(Parser, Debug)]
#[command(name = "queuescope-tui", version, about)]
struct Cli {
    /// Queue snapshot (flat queue array or scheduler payload)
    #[arg(short = 'i', long)]
    queues: Option<PathBuf>,

    /// Cluster metrics snapshot
    #[arg(short = 'm', long)]
    metrics: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "QUEUESCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long, default_value = "/tmp/queuescope-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing; stdout belongs to the terminal UI. Hold the guard
/// for the lifetime of the app so logs flush.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("queuescope_tui={log_level},queuescope_core={log_level}")));

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("queuescope-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Flags override the configured snapshot files.
fn sources(cli: &Cli, cfg: &Config) -> Sources {
    Sources {
        queues: cli.queues.clone().or_else(|| cfg.defaults.queues_file.clone()),
        metrics: cli.metrics.clone().or_else(|| cfg.defaults.metrics_file.clone()),
    }
}

fn timing(cfg: &Config) -> Timing {
    Timing {
        tick: Duration::from_millis(cfg.tui.tick_ms),
        render: Duration::from_millis(cfg.tui.render_ms),
        double_click: Duration::from_millis(cfg.tui.double_click_ms),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal switches modes.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let cfg = match &cli.config {
        Some(path) => queuescope_config::load_config_from(path)?,
        None => queuescope_config::load_config_or_default(),
    };
    let sources = sources(&cli, &cfg);
    info!(
        queues = ?sources.queues,
        metrics = ?sources.metrics,
        "starting queuescope-tui"
    );

    let mut app = App::new(sources, timing(&cfg));
    app.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_configured_files() {
        let cli = Cli::parse_from(["queuescope-tui", "--queues", "/a.json"]);
        let mut cfg = Config::default();
        cfg.defaults.queues_file = Some("/cfg-q.json".into());
        cfg.defaults.metrics_file = Some("/cfg-m.json".into());
        let s = sources(&cli, &cfg);
        assert_eq!(s.queues, Some(PathBuf::from("/a.json")));
        assert_eq!(s.metrics, Some(PathBuf::from("/cfg-m.json")));
    }

    #[test]
    fn timing_comes_from_config() {
        let t = timing(&Config::default());
        assert_eq!(t.double_click, Duration::from_millis(400));
        assert_eq!(t.render, Duration::from_millis(33));
    }
}
