//! Clap derive structures for the `queuescope` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// queuescope -- render scheduler queue dashboards
#[derive(Debug, Parser)]
#[command(
    name = "queuescope",
    version,
    about = "Render scheduler queue trees and cluster metrics",
    long_about = "Lays out a scheduler's queue hierarchy and charts its capacities.\n\n\
        Reads scheduler snapshots (the REST payload or a flat queue array) and\n\
        writes SVG dashboards or prints the computed layout.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "QUEUESCOPE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', env = "QUEUESCOPE_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Canvas width in pixels (overrides config)
    #[arg(long, short = 'w', global = true)]
    pub width: Option<f64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Queue tree dashboard
    #[command(alias = "q")]
    Queues(QueuesArgs),

    /// Cluster metrics dashboard
    #[command(alias = "c")]
    Cluster(ClusterArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Snapshot file (defaults to the configured file)
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Write the SVG here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Emit a static picture without entrance animations
    #[arg(long)]
    pub no_animate: bool,
}

// ── Queues ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct QueuesArgs {
    #[command(subcommand)]
    pub command: QueuesCommand,
}

#[derive(Debug, Subcommand)]
pub enum QueuesCommand {
    /// Render the queue dashboard as SVG
    Render {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        render: RenderArgs,

        /// Queue whose charts are shown (defaults to root)
        #[arg(long, short = 's')]
        select: Option<String>,

        /// Fold a queue (repeatable)
        #[arg(long, short = 'f')]
        fold: Vec<String>,
    },

    /// Print computed tree positions
    Layout {
        #[command(flatten)]
        input: InputArgs,

        /// Fold a queue (repeatable)
        #[arg(long, short = 'f')]
        fold: Vec<String>,
    },

    /// List queues with their capacities
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        input: InputArgs,
    },

    /// List the charts shown for a queue
    Charts {
        #[command(flatten)]
        input: InputArgs,

        /// Queue to inspect (defaults to root)
        #[arg(long, short = 's')]
        select: Option<String>,
    },
}

// ── Cluster ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ClusterArgs {
    #[command(subcommand)]
    pub command: ClusterCommand,
}

#[derive(Debug, Subcommand)]
pub enum ClusterCommand {
    /// Render the cluster dashboard as SVG
    Render {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show the cluster metric record
    Show {
        #[command(flatten)]
        input: InputArgs,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,
}
