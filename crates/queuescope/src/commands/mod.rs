//! Command dispatch: bridges CLI args -> core dashboards -> output formatting.

pub mod cluster;
pub mod config_cmd;
pub mod queues;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use queuescope_config::Config;

use crate::cli::{Command, GlobalOpts, InputArgs, OutputFormat, RenderArgs};
use crate::error::CliError;
use crate::output;

/// Resolved settings shared by every handler: flags layered over config.
pub struct Context<'a> {
    pub global: &'a GlobalOpts,
    pub config: Config,
}

impl<'a> Context<'a> {
    pub fn new(global: &'a GlobalOpts, config: Config) -> Self {
        Self { global, config }
    }

    pub fn output(&self) -> OutputFormat {
        self.global.output.unwrap_or_else(|| {
            OutputFormat::from_str(&self.config.defaults.output, true).unwrap_or(OutputFormat::Table)
        })
    }

    pub fn width(&self) -> Result<f64, CliError> {
        let width = self.global.width.unwrap_or(self.config.defaults.canvas_width);
        if width.is_finite() && width > 0.0 {
            Ok(width)
        } else {
            Err(CliError::Validation {
                field: "--width".into(),
                reason: format!("expected a positive number of pixels, got {width}"),
            })
        }
    }

    pub fn animate(&self, render: &RenderArgs) -> bool {
        !render.no_animate && self.config.defaults.animate
    }

    pub fn queues_input(&self, args: &InputArgs) -> Result<PathBuf, CliError> {
        args.input
            .clone()
            .or_else(|| self.config.defaults.queues_file.clone())
            .ok_or(CliError::NoInput {
                kind: "queue",
                key: "queues_file",
            })
    }

    pub fn metrics_input(&self, args: &InputArgs) -> Result<PathBuf, CliError> {
        args.input
            .clone()
            .or_else(|| self.config.defaults.metrics_file.clone())
            .ok_or(CliError::NoInput {
                kind: "cluster metrics",
                key: "metrics_file",
            })
    }

    /// Write `svg` to `--out`, or to stdout when no file is given.
    pub fn emit_svg(&self, out: Option<&Path>, svg: &str) -> Result<(), CliError> {
        match out {
            Some(path) => {
                std::fs::write(path, svg)?;
                if !self.global.quiet {
                    let color = output::should_color(self.global.color);
                    eprintln!("{}", output::status("Wrote", &path.display().to_string(), color));
                }
            }
            None => output::print_output(svg.trim_end(), self.global.quiet),
        }
        Ok(())
    }
}

/// Dispatch a snapshot-bound command to the appropriate handler.
pub fn dispatch(cmd: Command, ctx: &Context<'_>) -> Result<(), CliError> {
    match cmd {
        Command::Queues(args) => queues::handle(args, ctx),
        Command::Cluster(args) => cluster::handle(args, ctx),
        Command::Config(args) => config_cmd::handle(args, ctx.global),
    }
}
