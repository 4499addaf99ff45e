//! Plane geometry shared by the tree layout and the charts.
//!
//! Screen coordinates: x grows right, y grows down. Angles are radians,
//! measured clockwise from twelve o'clock, so `0` points up and `π/2`
//! points right.

use std::f64::consts::TAU;
use std::fmt::Write as _;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Element counts used as coordinates.
#[allow(clippy::as_conversions, clippy::cast_precision_loss)]
pub(crate) fn count(n: usize) -> f64 {
    n as f64
}

/// Compact number formatting for SVG attributes: at most two decimals,
/// trailing zeros dropped.
pub(crate) fn fmt_coord(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

// ── Paths ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Path {
    commands: Vec<PathCommand>,
}

// Uniform cubic B-spline basis, split into Bézier control weights.
const BASIS_C1: [f64; 4] = [0.0, 2.0 / 3.0, 1.0 / 3.0, 0.0];
const BASIS_C2: [f64; 4] = [0.0, 1.0 / 3.0, 2.0 / 3.0, 0.0];
const BASIS_END: [f64; 4] = [0.0, 1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0];

fn dot4(weights: [f64; 4], window: &[Point; 4]) -> Point {
    let mut p = Point::default();
    for (w, q) in weights.iter().zip(window) {
        p.x += w * q.x;
        p.y += w * q.y;
    }
    p
}

impl Path {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Straight segments through every point.
    pub fn polyline(points: &[Point]) -> Self {
        let mut commands = Vec::with_capacity(points.len());
        for (i, &p) in points.iter().enumerate() {
            commands.push(if i == 0 {
                PathCommand::MoveTo(p)
            } else {
                PathCommand::LineTo(p)
            });
        }
        Self { commands }
    }

    /// Smoothed curve through the control points using the uniform
    /// B-spline basis. The curve starts at the first point and ends at the
    /// last one; interior points pull the curve without being touched.
    /// Fewer than three points degrade to a polyline.
    pub fn basis(points: &[Point]) -> Self {
        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            return Self::default();
        };
        if points.len() < 3 {
            return Self::polyline(points);
        }

        let mut commands = vec![PathCommand::MoveTo(first)];
        let mut window = [first, first, first, points[1]];
        commands.push(PathCommand::LineTo(dot4(BASIS_END, &window)));

        for &p in points[2..].iter().chain(std::iter::once(&last)) {
            window.rotate_left(1);
            window[3] = p;
            commands.push(PathCommand::CubicTo(
                dot4(BASIS_C1, &window),
                dot4(BASIS_C2, &window),
                dot4(BASIS_END, &window),
            ));
        }
        commands.push(PathCommand::LineTo(last));
        Self { commands }
    }

    /// SVG `d` attribute.
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();
        for command in &self.commands {
            match command {
                PathCommand::MoveTo(p) => {
                    let _ = write!(d, "M{},{}", fmt_coord(p.x), fmt_coord(p.y));
                }
                PathCommand::LineTo(p) => {
                    let _ = write!(d, "L{},{}", fmt_coord(p.x), fmt_coord(p.y));
                }
                PathCommand::CubicTo(c1, c2, p) => {
                    let _ = write!(
                        d,
                        "C{},{},{},{},{},{}",
                        fmt_coord(c1.x),
                        fmt_coord(c1.y),
                        fmt_coord(c2.x),
                        fmt_coord(c2.y),
                        fmt_coord(p.x),
                        fmt_coord(p.y)
                    );
                }
            }
        }
        d
    }

    /// Approximate the path with straight segments, `steps` per curve.
    pub fn flatten(&self, steps: usize) -> Vec<Point> {
        let steps = steps.max(1);
        let mut out = Vec::new();
        let mut cursor = Point::default();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                    out.push(p);
                    cursor = p;
                }
                PathCommand::CubicTo(c1, c2, p) => {
                    for i in 1..=steps {
                        let t = count(i) / count(steps);
                        let u = 1.0 - t;
                        let (a, b, c, e) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
                        out.push(Point::new(
                            a * cursor.x + b * c1.x + c * c2.x + e * p.x,
                            a * cursor.y + b * c1.y + c * c2.y + e * p.y,
                        ));
                    }
                    cursor = p;
                }
            }
        }
        out
    }

    pub fn start(&self) -> Option<Point> {
        match self.commands.first()? {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) | PathCommand::CubicTo(_, _, p) => {
                Some(*p)
            }
        }
    }

    pub fn end(&self) -> Option<Point> {
        match self.commands.last()? {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) | PathCommand::CubicTo(_, _, p) => {
                Some(*p)
            }
        }
    }
}

// ── Annular sectors ──────────────────────────────────────────────────

/// One donut wedge: the ring between two radii, swept between two angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sector {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Sector {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn with_angles(self, start_angle: f64, end_angle: f64) -> Self {
        Self {
            start_angle,
            end_angle,
            ..self
        }
    }

    pub fn point_at(&self, radius: f64, angle: f64) -> Point {
        Point::new(
            self.center.x + radius * angle.sin(),
            self.center.y - radius * angle.cos(),
        )
    }

    /// Angle of `p` around the center, normalized to `[0, 2π)`.
    pub fn angle_of(&self, p: Point) -> f64 {
        let a = (p.x - self.center.x).atan2(self.center.y - p.y);
        if a < 0.0 { a + TAU } else { a }
    }

    pub fn contains(&self, p: Point) -> bool {
        let r = p.distance(self.center);
        if r < self.inner_radius || r > self.outer_radius || self.span() <= 0.0 {
            return false;
        }
        if self.span() >= TAU {
            return true;
        }
        let a = self.angle_of(p);
        a >= self.start_angle && a < self.end_angle
    }

    /// Midpoint of the wedge, handy for anchoring labels.
    pub fn centroid(&self) -> Point {
        let mid = (self.start_angle + self.end_angle) / 2.0;
        self.point_at((self.inner_radius + self.outer_radius) / 2.0, mid)
    }

    /// SVG `d` attribute for the wedge outline.
    pub fn to_svg_d(&self) -> String {
        let (r0, r1) = (self.inner_radius, self.outer_radius);
        let f = fmt_coord;

        if self.span() >= TAU - 1e-9 {
            // Full ring: two half-circle arcs per radius.
            let top1 = self.point_at(r1, 0.0);
            let bottom1 = self.point_at(r1, TAU / 2.0);
            let top0 = self.point_at(r0, 0.0);
            let bottom0 = self.point_at(r0, TAU / 2.0);
            return format!(
                "M{},{}A{r1},{r1} 0 1,1 {},{}A{r1},{r1} 0 1,1 {},{}M{},{}A{r0},{r0} 0 1,0 {},{}A{r0},{r0} 0 1,0 {},{}Z",
                f(top1.x),
                f(top1.y),
                f(bottom1.x),
                f(bottom1.y),
                f(top1.x),
                f(top1.y),
                f(top0.x),
                f(top0.y),
                f(bottom0.x),
                f(bottom0.y),
                f(top0.x),
                f(top0.y),
                r1 = f(r1),
                r0 = f(r0),
            );
        }

        let large = u8::from(self.span() > TAU / 2.0);
        let o0 = self.point_at(r1, self.start_angle);
        let o1 = self.point_at(r1, self.end_angle);
        let i1 = self.point_at(r0, self.end_angle);
        let i0 = self.point_at(r0, self.start_angle);
        format!(
            "M{},{}A{r1},{r1} 0 {large},1 {},{}L{},{}A{r0},{r0} 0 {large},0 {},{}Z",
            f(o0.x),
            f(o0.y),
            f(o1.x),
            f(o1.y),
            f(i1.x),
            f(i1.y),
            f(i0.x),
            f(i0.y),
            r1 = f(r1),
            r0 = f(r0),
        )
    }
}
