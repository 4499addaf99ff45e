//! Dashboards: state plus a scene built from the chart primitives.
//!
//! A dashboard decides which charts to show as a list of
//! [`PlannedChart`]s, then renders them into grid panels. Every redraw
//! rebuilds the scene from scratch.

mod cluster;
mod queues;

pub use cluster::ClusterDashboard;
pub use queues::QueueDashboard;

use serde::Serialize;

use crate::chart::{self, ChartDatum, DonutOptions, bar::DEFAULT_LABEL_WIDTH};
use crate::geometry::{Point, count};
use crate::grid::GridLayoutAllocator;
use crate::palette::{self, Palette};
use crate::scene::{Element, Layer, Shape};

/// Background grid pitch.
pub const GRID_STEP: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Bar { label_width: f64 },
    Donut(DonutOptions),
}

impl ChartKind {
    pub fn bar() -> Self {
        Self::Bar {
            label_width: DEFAULT_LABEL_WIDTH,
        }
    }
}

/// One chart a dashboard wants on screen, before it gets a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedChart {
    pub title: String,
    pub data: Vec<ChartDatum>,
    pub kind: ChartKind,
}

impl PlannedChart {
    pub fn new(title: impl Into<String>, data: Vec<ChartDatum>, kind: ChartKind) -> Self {
        Self {
            title: title.into(),
            data,
            kind,
        }
    }
}

/// Serializable summary of a plan, for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSummary {
    pub title: String,
    pub kind: &'static str,
    pub series: usize,
}

impl From<&PlannedChart> for ChartSummary {
    fn from(chart: &PlannedChart) -> Self {
        Self {
            title: chart.title.clone(),
            kind: match chart.kind {
                ChartKind::Bar { .. } => "bar",
                ChartKind::Donut(_) => "donut",
            },
            series: chart.data.len(),
        }
    }
}

/// Render `plan` into consecutive panels, one layer per chart.
pub(crate) fn render_plan(plan: &[PlannedChart], grid: &mut GridLayoutAllocator, palette: &Palette) -> Vec<Layer> {
    plan.iter()
        .map(|chart| {
            let rect = grid.allocate();
            match &chart.kind {
                ChartKind::Bar { label_width } => {
                    chart::render_bar_chart(&chart.data, &chart.title, &rect, *label_width, palette)
                }
                ChartKind::Donut(options) => {
                    chart::render_donut_chart(&chart.data, &chart.title, &rect, options, palette)
                }
            }
        })
        .collect()
}

/// Light grid lines every [`GRID_STEP`] across the canvas.
pub(crate) fn background(width: f64, height: f64) -> Layer {
    let mut layer = Layer::new("grid");
    let lines = |extent: f64| (1..).map(|i| count(i) * GRID_STEP).take_while(move |v| *v < extent);
    for x in lines(width) {
        layer.push(
            Element::new(Shape::line(Point::new(x, 0.0), Point::new(x, height)))
                .stroke(palette::GRID, 1.0)
                .class("grid"),
        );
    }
    for y in lines(height) {
        layer.push(
            Element::new(Shape::line(Point::new(0.0, y), Point::new(width, y)))
                .stroke(palette::GRID, 1.0)
                .class("grid"),
        );
    }
    layer
}

/// Dashed vertical rule between the tree banner and the charts.
pub(crate) fn separator(x: f64, height: f64) -> Layer {
    let mut layer = Layer::new("banner");
    layer.push(
        Element::new(Shape::line(Point::new(x, 0.0), Point::new(x, height)))
            .stroke(palette::SEPARATOR, 2.0)
            .dashed(10.0, 10.0)
            .class("chart-leftbanner"),
    );
    layer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_stays_inside_canvas() {
        let layer = background(95.0, 61.0);
        // x = 30, 60, 90 and y = 30, 60
        assert_eq!(layer.elements.len(), 5);
        assert!(background(0.0, 0.0).is_empty());
    }
}
