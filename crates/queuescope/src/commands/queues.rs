//! Queue command handlers.

use queuescope_core::dashboard::ChartSummary;
use queuescope_core::layout::PlacedNode;
use queuescope_core::source;
use queuescope_core::svg::{self, SvgOptions};
use queuescope_core::{FoldedSet, QueueDashboard, QueueNode, QueueRecord, QueueTree, TreeLayout};
use tabled::Tabled;

use super::Context;
use crate::cli::{QueuesArgs, QueuesCommand};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct QueueRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Parent")]
    parent: String,
    #[tabled(rename = "Children")]
    children: usize,
    #[tabled(rename = "Cap")]
    capacity: String,
    #[tabled(rename = "MaxCap")]
    max_capacity: String,
    #[tabled(rename = "UsedCap")]
    used_capacity: String,
    #[tabled(rename = "Abs Used")]
    abs_used: String,
    #[tabled(rename = "State")]
    state: String,
}

fn pct(v: f64) -> String {
    format!("{v:.1}%")
}

impl From<&QueueRecord> for QueueRow {
    fn from(q: &QueueRecord) -> Self {
        Self {
            name: q.name.clone(),
            parent: q.parent.clone().unwrap_or_default(),
            children: q.children.len(),
            capacity: pct(q.capacity),
            max_capacity: pct(q.max_capacity),
            used_capacity: pct(q.used_capacity),
            abs_used: pct(q.abs_used_capacity),
            state: q.state.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "Queue")]
    label: String,
    #[tabled(rename = "Depth")]
    depth: usize,
    #[tabled(rename = "X")]
    x: f64,
    #[tabled(rename = "Y")]
    y: f64,
}

impl From<&PlacedNode> for NodeRow {
    fn from(n: &PlacedNode) -> Self {
        Self {
            label: format!("{}{}", "  ".repeat(n.depth), n.label()),
            depth: n.depth,
            x: n.position.x,
            y: n.position.y,
        }
    }
}

#[derive(Tabled)]
struct ChartRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Series")]
    series: usize,
}

impl From<&ChartSummary> for ChartRow {
    fn from(c: &ChartSummary) -> Self {
        Self {
            title: c.title.clone(),
            kind: c.kind,
            series: c.series,
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn ensure_queue(tree: &QueueTree, name: &str) -> Result<(), CliError> {
    if tree.by_name(name).is_some() {
        Ok(())
    } else {
        Err(CliError::QueueNotFound { name: name.into() })
    }
}

fn folded_set(tree: &QueueTree, names: &[String]) -> Result<FoldedSet, CliError> {
    for name in names {
        ensure_queue(tree, name)?;
        if !tree.by_name(name).is_some_and(QueueNode::has_children) {
            return Err(CliError::Validation {
                field: "--fold".into(),
                reason: format!("queue '{name}' has no children to fold"),
            });
        }
    }
    Ok(names.iter().map(String::as_str).collect())
}

fn dashboard(ctx: &Context<'_>, records: Vec<QueueRecord>, fold: &[String]) -> Result<QueueDashboard, CliError> {
    let mut dash = QueueDashboard::new(ctx.width()?);
    dash.load(records);
    let folded = folded_set(dash.tree(), fold)?;
    for name in folded.iter() {
        dash.toggle_fold(name);
    }
    Ok(dash)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: QueuesArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let global = ctx.global;
    match args.command {
        QueuesCommand::Render {
            input,
            render,
            select,
            fold,
        } => {
            let records = source::load_queues(&ctx.queues_input(&input)?)?;
            let mut dash = dashboard(ctx, records, &fold)?;
            if let Some(name) = select {
                ensure_queue(dash.tree(), &name)?;
                dash.select(&name);
            }
            tracing::debug!(charts = dash.chart_plan().len(), "rendering queue dashboard");
            let svg = svg::to_svg(
                dash.scene(),
                &SvgOptions {
                    animate: ctx.animate(&render),
                },
            );
            ctx.emit_svg(render.out.as_deref(), &svg)
        }

        QueuesCommand::Layout { input, fold } => {
            let records = source::load_queues(&ctx.queues_input(&input)?)?;
            let tree = QueueTree::build(records);
            let folded = folded_set(&tree, &fold)?;
            let layout = TreeLayout::compute(&tree, &folded);
            let out = output::render_list(ctx.output(), layout.nodes(), |n| NodeRow::from(n), |n| n.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        QueuesCommand::List { input } => {
            let records = source::load_queues(&ctx.queues_input(&input)?)?;
            let out = output::render_list(ctx.output(), &records, |q| QueueRow::from(q), |q| q.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        QueuesCommand::Charts { input, select } => {
            let records = source::load_queues(&ctx.queues_input(&input)?)?;
            let dash = {
                let mut dash = dashboard(ctx, records, &[])?;
                if let Some(name) = select {
                    ensure_queue(dash.tree(), &name)?;
                    dash.select(&name);
                }
                dash
            };
            let charts: Vec<ChartSummary> = dash.chart_plan().iter().map(ChartSummary::from).collect();
            let out = output::render_list(ctx.output(), &charts, |c| ChartRow::from(c), |c| c.title.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
