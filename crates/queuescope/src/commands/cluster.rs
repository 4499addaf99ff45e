//! Cluster command handlers.

use std::fmt::Write as _;

use queuescope_core::source;
use queuescope_core::svg::{self, SvgOptions};
use queuescope_core::{ClusterDashboard, ClusterMetrics, PlannedChart};
use tabled::builder::Builder;
use tabled::settings::Style;

use super::Context;
use crate::cli::{ClusterArgs, ClusterCommand};
use crate::error::CliError;
use crate::output;

/// One table per chart: the same groupings the dashboard draws.
fn detail(plan: &[PlannedChart]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Chart", "Series", "Value"]);
    for chart in plan {
        for (i, datum) in chart.data.iter().enumerate() {
            let title = if i == 0 { chart.title.as_str() } else { "" };
            builder.push_record([title.to_owned(), datum.label.clone(), datum.value.to_string()]);
        }
    }
    builder.build().with(Style::rounded()).to_string()
}

fn plain(plan: &[PlannedChart]) -> String {
    let mut out = String::new();
    for chart in plan {
        for datum in &chart.data {
            let _ = writeln!(out, "{}.{}={}", chart.title, datum.label, datum.value);
        }
    }
    out.trim_end().to_owned()
}

pub fn handle(args: ClusterArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    match args.command {
        ClusterCommand::Render { input, render } => {
            let metrics = source::load_cluster_metrics(&ctx.metrics_input(&input)?)?;
            let mut dash = ClusterDashboard::new(ctx.width()?);
            dash.load(metrics);
            let svg = svg::to_svg(
                dash.scene(),
                &SvgOptions {
                    animate: ctx.animate(&render),
                },
            );
            ctx.emit_svg(render.out.as_deref(), &svg)
        }

        ClusterCommand::Show { input } => {
            let metrics = source::load_cluster_metrics(&ctx.metrics_input(&input)?)?;
            let mut dash = ClusterDashboard::new(ctx.width()?);
            dash.load(metrics);
            let plan = dash.chart_plan();
            let out = output::render_single(
                ctx.output(),
                dash.metrics(),
                |_: &ClusterMetrics| detail(&plan),
                |_: &ClusterMetrics| plain(&plan),
            );
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }
    }
}
