//! Retained render instructions.
//!
//! A [`Scene`] is the complete picture for one canvas: ordered layers of
//! styled shapes. Later layers and later elements paint on top. Elements
//! may carry a [`Target`] (what the pointer is over when it hits them) and
//! a [`Transition`] (how they enter).

use std::time::Duration;

use serde::Serialize;

use crate::animation::{Transition, TransitionKind, lerp};
use crate::chart::ChartDatum;
use crate::geometry::{Path, Point, Sector, count};
use crate::palette::Rgb;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Anchor {
    #[default]
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    Path(Path),
    Sector(Sector),
    Text {
        at: Point,
        text: String,
        anchor: Anchor,
        size: f64,
    },
}

impl Shape {
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::Rect {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    pub fn line(from: Point, to: Point) -> Self {
        Self::Line { from, to }
    }

    pub fn text(at: Point, text: impl Into<String>) -> Self {
        Self::Text {
            at,
            text: text.into(),
            anchor: Anchor::Start,
            size: 12.0,
        }
    }

    /// Rough bounding box of a text run: `(left, top, width, height)`.
    /// Glyph advance is estimated at 0.6 em.
    pub fn text_bounds(at: Point, text: &str, anchor: Anchor, size: f64) -> (f64, f64, f64, f64) {
        let width = count(text.chars().count()) * size * 0.6;
        let left = match anchor {
            Anchor::Start => at.x,
            Anchor::Middle => at.x - width / 2.0,
            Anchor::End => at.x - width,
        };
        (left, at.y - size, width, size)
    }

    /// Point-in-shape test used for pointer hit testing. Lines and paths
    /// have no interior and never match.
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Self::Rect {
                origin,
                width,
                height,
            } => p.x >= origin.x && p.x <= origin.x + width && p.y >= origin.y && p.y <= origin.y + height,
            Self::Circle { center, radius } => p.distance(*center) <= *radius,
            Self::Sector(sector) => sector.contains(p),
            Self::Text {
                at,
                text,
                anchor,
                size,
            } => {
                let (left, top, width, height) = Self::text_bounds(*at, text, *anchor, *size);
                p.x >= left && p.x <= left + width && p.y >= top && p.y <= top + height
            }
            Self::Line { .. } | Self::Path(_) => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Style {
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
    pub stroke_width: f64,
    /// Dash and gap lengths.
    pub dash: Option<(f64, f64)>,
    pub class: Option<&'static str>,
}

/// What an element stands for when the pointer lands on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Target {
    /// A chart value; the tooltip shows it.
    Datum(ChartDatum),
    /// A queue in the tree; clicks select or fold it.
    Queue(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub shape: Shape,
    pub style: Style,
    pub target: Option<Target>,
    pub transition: Option<Transition>,
}

impl Element {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            style: Style::default(),
            target: None,
            transition: None,
        }
    }

    pub fn fill(mut self, color: Rgb) -> Self {
        self.style.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: Rgb, width: f64) -> Self {
        self.style.stroke = Some(color);
        self.style.stroke_width = width;
        self
    }

    pub fn dashed(mut self, dash: f64, gap: f64) -> Self {
        self.style.dash = Some((dash, gap));
        self
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.style.class = Some(class);
        self
    }

    pub fn anchor(mut self, value: Anchor) -> Self {
        if let Shape::Text { anchor, .. } = &mut self.shape {
            *anchor = value;
        }
        self
    }

    pub fn font_size(mut self, value: f64) -> Self {
        if let Shape::Text { size, .. } = &mut self.shape {
            *size = value;
        }
        self
    }

    pub fn target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    /// The shape as it looks `elapsed` after the scene was drawn.
    pub fn sampled_shape(&self, elapsed: Duration) -> Shape {
        let Some(transition) = self.transition else {
            return self.shape.clone();
        };
        let t = transition.progress(elapsed);
        match (&self.shape, transition.kind) {
            (
                Shape::Rect {
                    origin,
                    width,
                    height,
                },
                TransitionKind::GrowWidth,
            ) => Shape::Rect {
                origin: *origin,
                width: lerp(0.0, *width, t),
                height: *height,
            },
            (Shape::Sector(sector), TransitionKind::SweepAngles) => Shape::Sector(sector.with_angles(
                lerp(0.0, sector.start_angle, t),
                lerp(0.0, sector.end_angle, t),
            )),
            (shape, _) => shape.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub id: String,
    pub elements: Vec<Element>,
}

impl Layer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn extend(&mut self, other: Layer) {
        self.elements.extend(other.elements);
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            layers: Vec::new(),
        }
    }

    pub fn push_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// All elements in paint order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.layers.iter().flat_map(|l| l.elements.iter())
    }

    /// Topmost targeted element under `p`.
    pub fn hit_test(&self, p: Point) -> Option<&Element> {
        self.layers
            .iter()
            .rev()
            .flat_map(|l| l.elements.iter().rev())
            .find(|e| e.target.is_some() && e.shape.contains(p))
    }

    /// Whether any entrance transition is still running at `elapsed`.
    pub fn is_animating(&self, elapsed: Duration) -> bool {
        self.elements()
            .filter_map(|e| e.transition)
            .any(|t| !t.is_finished(elapsed))
    }
}
