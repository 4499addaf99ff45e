// ── Donut chart ──

use std::f64::consts::TAU;

use serde::Serialize;

use super::{ChartDatum, DatumAccess, format_value, label, panel_layer};
use crate::animation::Transition;
use crate::geometry::{Point, Sector, count};
use crate::grid::PanelRect;
use crate::palette::{self, Palette};
use crate::scene::{Anchor, Element, Layer, Shape};
use crate::tooltip::TooltipController;

/// Values at or below this are drawn as empty dashed slices.
pub const EPSILON: f64 = 1e-6;
pub const INNER_RATIO: f64 = 0.618;
/// Vertical room reserved for the title.
const TITLE_ROOM: f64 = 50.0;
const SWATCH: f64 = 15.0;
const SWATCH_GAP: f64 = 10.0;
const CENTER_VALUE_SIZE: f64 = 40.0;
const CENTER_LABEL_SIZE: f64 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DonutOptions {
    /// Legend column to the right of the ring; moves the ring left.
    pub side_labels: bool,
    /// Caption in the hole. `None` or empty hides both caption and value.
    pub center_label: Option<String>,
    /// Number under the caption. Defaults to the sum of the values.
    pub center_value: Option<f64>,
}

impl Default for DonutOptions {
    fn default() -> Self {
        Self {
            side_labels: false,
            center_label: Some("Total".to_owned()),
            center_value: None,
        }
    }
}

impl DonutOptions {
    pub fn with_side_labels(mut self) -> Self {
        self.side_labels = true;
        self
    }

    pub fn with_center(mut self, label: impl Into<String>, value: f64) -> Self {
        self.center_label = Some(label.into());
        self.center_value = Some(value);
        self
    }
}

/// A datum placed on the ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub datum: ChartDatum,
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Slice {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn is_near_zero(&self) -> bool {
        self.datum.magnitude() <= EPSILON
    }
}

impl DatumAccess for Slice {
    fn datum(&self) -> &ChartDatum {
        &self.datum
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieLayout {
    pub slices: Vec<Slice>,
    pub all_zero: bool,
    pub total: f64,
}

/// Angular layout in input order, clockwise from twelve o'clock. Each value
/// is floored to [`EPSILON`] so that zero entries keep a sliver and an
/// all-zero input splits the ring evenly.
pub fn pie(data: &[ChartDatum]) -> PieLayout {
    let total = data.iter().map(ChartDatum::magnitude).sum();
    let all_zero = data.iter().all(|d| d.magnitude() <= EPSILON);
    let floored: f64 = data.iter().map(|d| d.magnitude().max(EPSILON)).sum();

    let mut angle = 0.0;
    let slices = data
        .iter()
        .enumerate()
        .map(|(index, datum)| {
            let span = datum.magnitude().max(EPSILON) / floored * TAU;
            let slice = Slice {
                datum: datum.clone(),
                index,
                start_angle: angle,
                end_angle: angle + span,
            };
            angle += span;
            slice
        })
        .collect();

    PieLayout {
        slices,
        all_zero,
        total,
    }
}

/// Ring placement inside a panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DonutGeometry {
    pub center: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
}

pub fn donut_geometry(rect: &PanelRect, side_labels: bool) -> DonutGeometry {
    let outer_radius = ((rect.height() - TITLE_ROOM - 2.0 * rect.margin) / 2.0).max(0.0);
    let cy = rect.y1 + TITLE_ROOM + rect.margin + outer_radius;
    let cx = if side_labels {
        rect.x1 + rect.margin + outer_radius
    } else {
        rect.center_x()
    };
    DonutGeometry {
        center: Point::new(cx, cy),
        outer_radius,
        inner_radius: outer_radius * INNER_RATIO,
    }
}

pub fn render_donut_chart(
    data: &[ChartDatum],
    title: &str,
    rect: &PanelRect,
    options: &DonutOptions,
    palette: &Palette,
) -> Layer {
    let mut layer = panel_layer(title, rect);
    let layout = pie(data);
    let ring = donut_geometry(rect, options.side_labels);

    for slice in &layout.slices {
        let sector = Sector {
            center: ring.center,
            inner_radius: ring.inner_radius,
            outer_radius: ring.outer_radius,
            start_angle: slice.start_angle,
            end_angle: slice.end_angle,
        };
        let color = palette.color(slice.index);
        let mut element = Element::new(Shape::Sector(sector))
            .class("arc")
            .transition(Transition::sweep_angles());
        element = if slice.is_near_zero() {
            let outline = if layout.all_zero { color } else { palette::NEUTRAL };
            element.fill(palette::BACKGROUND).stroke(outline, 1.0).dashed(10.0, 10.0)
        } else if layout.all_zero {
            element.fill(color).stroke(color, 1.0)
        } else {
            element.fill(color)
        };
        layer.push(TooltipController::bind(element, slice));
    }

    if options.side_labels {
        let lx = rect.x1 + rect.margin + ring.outer_radius * 2.0 + 30.0;
        for (i, datum) in data.iter().enumerate() {
            let y = rect.y1 + TITLE_ROOM + (SWATCH + SWATCH_GAP) * count(i) + rect.margin;
            layer.push(
                Element::new(Shape::rect(lx, y, SWATCH, SWATCH))
                    .fill(palette.color(i))
                    .class("swatch"),
            );
            layer.push(
                label(
                    Point::new(lx + SWATCH + SWATCH_GAP, y + SWATCH / 2.0),
                    datum.describe(),
                    palette::TEXT,
                )
                .class("side-label"),
            );
        }
    }

    if let Some(caption) = options.center_label.as_deref().filter(|c| !c.is_empty()) {
        let value = options.center_value.unwrap_or(layout.total);
        let highlight = palette.primary();
        layer.push(
            label(ring.center.offset(0.0, -20.0), caption, highlight)
                .anchor(Anchor::Middle)
                .font_size(CENTER_LABEL_SIZE)
                .class("donut-highlight-text"),
        );
        layer.push(
            label(ring.center.offset(0.0, 30.0), format_value(value), highlight)
                .anchor(Anchor::Middle)
                .font_size(CENTER_VALUE_SIZE)
                .class("donut-highlight-text"),
        );
    }

    layer
}
