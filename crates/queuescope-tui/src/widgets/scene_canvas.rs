//! Paints a core [`Scene`] onto a braille canvas.
//!
//! Scene coordinates are pixels with y growing downward. One terminal cell
//! stands for [`CELL_WIDTH`] × [`CELL_HEIGHT`] pixels, so a braille dot is
//! a 4 px square. Fills are approximated with parallel strokes one dot
//! apart.

use std::f64::consts::TAU;
use std::time::{Duration, Instant};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::Widget;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};

use queuescope_core::geometry::Sector;
use queuescope_core::scene::Element;
use queuescope_core::{Point, Scene, Shape};

use crate::theme;

pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;
/// Braille dot pitch in scene pixels.
const DOT: f64 = 4.0;

#[allow(clippy::as_conversions)]
fn px(cells: u16) -> f64 {
    f64::from(cells)
}

// ── Viewport ─────────────────────────────────────────────────────────

/// Vertical scroll position over a scene taller than the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub scroll: f64,
}

impl Viewport {
    /// Scene width that exactly fills `columns` cells.
    pub fn scene_width(columns: u16) -> f64 {
        px(columns) * CELL_WIDTH
    }

    pub fn visible_height(area: Rect) -> f64 {
        px(area.height) * CELL_HEIGHT
    }

    /// Scene point at the center of a terminal cell, if the cell is in `area`.
    pub fn to_scene(&self, area: Rect, column: u16, row: u16) -> Option<Point> {
        let inside = column >= area.x && column < area.right() && row >= area.y && row < area.bottom();
        inside.then(|| {
            Point::new(
                px(column - area.x) * CELL_WIDTH + CELL_WIDTH / 2.0,
                self.scroll + px(row - area.y) * CELL_HEIGHT + CELL_HEIGHT / 2.0,
            )
        })
    }

    /// Terminal cell showing scene point `p`, if it is on screen.
    pub fn to_cell(&self, area: Rect, p: Point) -> Option<(u16, u16)> {
        let col = (p.x / CELL_WIDTH).floor();
        let row = ((p.y - self.scroll) / CELL_HEIGHT).floor();
        if col < 0.0 || row < 0.0 || col >= px(area.width) || row >= px(area.height) {
            return None;
        }
        #[allow(clippy::as_conversions, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (col, row) = (col as u16, row as u16);
        Some((area.x + col, area.y + row))
    }

    /// Scroll by `delta` pixels, clamped so the scene bottom stays reachable.
    pub fn scroll_by(&mut self, delta: f64, scene_height: f64, area: Rect) {
        let max = (scene_height - Self::visible_height(area)).max(0.0);
        self.scroll = (self.scroll + delta).clamp(0.0, max);
    }
}

// ── Transition clock ─────────────────────────────────────────────────

/// Restarts whenever the dashboard reports a new scene generation.
#[derive(Debug, Clone, Copy)]
pub struct SceneClock {
    drawn_at: Instant,
    generation: u64,
}

impl SceneClock {
    pub fn new() -> Self {
        Self {
            drawn_at: Instant::now(),
            generation: 0,
        }
    }

    pub fn sync(&mut self, generation: u64) {
        if generation != self.generation {
            self.generation = generation;
            self.drawn_at = Instant::now();
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.drawn_at.elapsed()
    }
}

// ── Primitives ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Segment(Point, Point),
    Label { at: Point, text: String },
}

fn steps(length: f64) -> usize {
    let n = (length / DOT).ceil();
    if !n.is_finite() || n < 1.0 {
        return 1;
    }
    #[allow(clippy::as_conversions, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = n as usize;
    n
}

#[allow(clippy::as_conversions, clippy::cast_precision_loss)]
fn frac(i: usize, n: usize) -> f64 {
    i as f64 / n as f64
}

fn polyline(points: &[Point]) -> impl Iterator<Item = Primitive> + '_ {
    points.windows(2).filter_map(|w| match w {
        [a, b] => Some(Primitive::Segment(*a, *b)),
        _ => None,
    })
}

fn arc(sector: &Sector, radius: f64) -> Vec<Point> {
    let n = steps(sector.span() * radius);
    (0..=n)
        .map(|i| sector.point_at(radius, sector.start_angle + sector.span() * frac(i, n)))
        .collect()
}

/// Strokes that draw `shape`; `filled` adds interior hatching.
pub fn primitives(shape: &Shape, filled: bool) -> Vec<Primitive> {
    let mut out = Vec::new();
    match shape {
        Shape::Line { from, to } => out.push(Primitive::Segment(*from, *to)),
        Shape::Rect { origin, width, height } => {
            if *width <= 0.0 || *height <= 0.0 {
                return out;
            }
            let (x0, y0, x1, y1) = (origin.x, origin.y, origin.x + width, origin.y + height);
            let corners = [
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
                Point::new(x0, y0),
            ];
            out.extend(polyline(&corners));
            if filled {
                let n = steps(*height);
                out.extend((1..n).map(|i| {
                    let y = y0 + height * frac(i, n);
                    Primitive::Segment(Point::new(x0, y), Point::new(x1, y))
                }));
            }
        }
        Shape::Circle { center, radius } => {
            let ring = |r: f64| {
                let n = steps(TAU * r).max(8);
                (0..=n)
                    .map(|i| {
                        let a = TAU * frac(i, n);
                        Point::new(center.x + r * a.cos(), center.y + r * a.sin())
                    })
                    .collect::<Vec<_>>()
            };
            out.extend(polyline(&ring(*radius)));
            if filled {
                let n = steps(*radius);
                for i in 1..n {
                    out.extend(polyline(&ring(radius * frac(i, n))));
                }
            }
        }
        Shape::Path(path) => out.extend(polyline(&path.flatten(12))),
        Shape::Sector(sector) => {
            if sector.span() <= 0.0 {
                return out;
            }
            out.extend(polyline(&arc(sector, sector.outer_radius)));
            out.extend(polyline(&arc(sector, sector.inner_radius)));
            for angle in [sector.start_angle, sector.end_angle] {
                out.push(Primitive::Segment(
                    sector.point_at(sector.inner_radius, angle),
                    sector.point_at(sector.outer_radius, angle),
                ));
            }
            if filled {
                let n = steps(sector.span() * sector.outer_radius);
                out.extend((1..n).map(|i| {
                    let angle = sector.start_angle + sector.span() * frac(i, n);
                    Primitive::Segment(
                        sector.point_at(sector.inner_radius, angle),
                        sector.point_at(sector.outer_radius, angle),
                    )
                }));
            }
        }
        Shape::Text {
            at,
            text,
            anchor,
            size,
        } => {
            let (left, top, _, height) = Shape::text_bounds(*at, text, *anchor, *size);
            out.push(Primitive::Label {
                at: Point::new(left, top + height / 2.0),
                text: text.clone(),
            });
        }
    }
    out
}

/// Primitives for one element as it looks `elapsed` into its entrance.
fn element_strokes(element: &Element, elapsed: Duration) -> Vec<(Primitive, Color)> {
    let shape = element.sampled_shape(elapsed);
    let style = &element.style;
    let mut out = Vec::new();
    if let Shape::Text { .. } = shape {
        let color = style.fill.map_or(theme::DIM_WHITE, theme::scene_color);
        out.extend(primitives(&shape, false).into_iter().map(|p| (p, color)));
        return out;
    }
    if let Some(fill) = style.fill {
        let color = theme::scene_color(fill);
        out.extend(primitives(&shape, true).into_iter().map(|p| (p, color)));
    }
    if let Some(stroke) = style.stroke {
        let color = theme::scene_color(stroke);
        out.extend(primitives(&shape, false).into_iter().map(|p| (p, color)));
    }
    out
}

// ── Widget ───────────────────────────────────────────────────────────

pub struct SceneCanvas<'a> {
    scene: &'a Scene,
    elapsed: Duration,
    viewport: Viewport,
}

impl<'a> SceneCanvas<'a> {
    pub fn new(scene: &'a Scene, elapsed: Duration, viewport: Viewport) -> Self {
        Self {
            scene,
            elapsed,
            viewport,
        }
    }
}

impl Widget for SceneCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let strokes: Vec<(Primitive, Color)> = self
            .scene
            .elements()
            .flat_map(|e| element_strokes(e, self.elapsed))
            .collect();
        let top = self.viewport.scroll;
        let bottom = top + Viewport::visible_height(area);

        // Canvas y grows upward; scene y grows downward.
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, Viewport::scene_width(area.width)])
            .y_bounds([-bottom, -top])
            .paint(|ctx: &mut Context<'_>| {
                for (primitive, color) in &strokes {
                    match primitive {
                        Primitive::Segment(a, b) => ctx.draw(&CanvasLine::new(a.x, -a.y, b.x, -b.y, *color)),
                        Primitive::Label { at, text } => {
                            ctx.print(at.x, -at.y, Span::styled(text.clone(), Style::default().fg(*color)));
                        }
                    }
                }
            })
            .render(area, buf);
    }
}
