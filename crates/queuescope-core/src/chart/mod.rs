//! Chart primitives.
//!
//! Both renderers are free functions: labeled values plus a panel go in,
//! a scene [`Layer`] comes out. The layer holds the panel frame, the title,
//! the series shapes (tooltip-bound, with an entrance transition) and any
//! value text.

pub mod bar;
pub mod donut;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::grid::PanelRect;
use crate::palette::{self, Rgb};
use crate::scene::{Anchor, Element, Layer, Shape};

pub use bar::render_bar_chart;
pub use donut::{DonutOptions, PieLayout, Slice, render_donut_chart};

pub const TITLE_SIZE: f64 = 14.0;

/// One labeled value. Its color is decided by its position in the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDatum {
    pub label: String,
    pub value: f64,
}

impl ChartDatum {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// The value as charts see it: negative and non-finite inputs count
    /// as zero.
    pub fn magnitude(&self) -> f64 {
        if self.value.is_finite() { self.value.max(0.0) } else { 0.0 }
    }

    /// `"<label> = <value>"`, shared by tooltips and side labels.
    pub fn describe(&self) -> String {
        format!("{} = {}", self.label, format_value(self.value))
    }
}

/// Anything a tooltip can read a datum from. Pie slices wrap their datum;
/// the accessor unwraps it.
pub trait DatumAccess {
    fn datum(&self) -> &ChartDatum;
}

impl DatumAccess for ChartDatum {
    fn datum(&self) -> &ChartDatum {
        self
    }
}

/// Shortest decimal rendering: `60` rather than `60.0`.
pub fn format_value(v: f64) -> String {
    format!("{v}")
}

/// Layer for one panel, pre-filled with its title and frame.
pub(crate) fn panel_layer(title: &str, rect: &PanelRect) -> Layer {
    let mut layer = Layer::new(format!("chart-{}", rect.id));
    layer.push(
        Element::new(Shape::text(Point::new(rect.center_x(), rect.y1 + rect.margin + 20.0), title))
            .anchor(Anchor::Middle)
            .font_size(TITLE_SIZE)
            .fill(palette::TEXT)
            .class("chart-title"),
    );
    layer.push(
        Element::new(Shape::rect(rect.x1, rect.y1, rect.width(), rect.height()))
            .stroke(palette::FRAME, 1.0)
            .class("chart-frame"),
    );
    layer
}

pub(crate) fn label(at: Point, text: impl Into<String>, color: Rgb) -> Element {
    Element::new(Shape::text(at, text)).fill(color)
}
