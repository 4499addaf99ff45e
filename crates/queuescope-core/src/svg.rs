//! SVG serialization of a [`Scene`].
//!
//! Entrance transitions become SMIL `<animate>` elements so a browser
//! replays them on load. Tooltip targets become `<title>` children.

use std::fmt::Write as _;
use std::time::Duration;

use crate::animation::TransitionKind;
use crate::geometry::{count, fmt_coord};
use crate::scene::{Anchor, Element, Scene, Shape, Target};

/// Key frames per swept sector.
const SWEEP_FRAMES: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgOptions {
    pub animate: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self { animate: true }
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

pub fn to_svg(scene: &Scene, options: &SvgOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
        w = fmt_coord(scene.width),
        h = fmt_coord(scene.height),
    );
    for layer in &scene.layers {
        let _ = writeln!(out, r#"<g id="{}">"#, escape(&layer.id));
        for element in &layer.elements {
            write_element(&mut out, element, options);
        }
        out.push_str("</g>\n");
    }
    out.push_str("</svg>\n");
    out
}

fn style_attrs(element: &Element) -> String {
    let style = &element.style;
    let mut attrs = String::new();
    let fill = style.fill.map_or_else(|| "none".to_owned(), |c| c.to_string());
    let _ = write!(attrs, r#" fill="{fill}""#);
    if let Some(stroke) = style.stroke {
        let _ = write!(
            attrs,
            r#" stroke="{stroke}" stroke-width="{}""#,
            fmt_coord(style.stroke_width)
        );
    }
    if let Some((dash, gap)) = style.dash {
        let _ = write!(attrs, r#" stroke-dasharray="{},{}""#, fmt_coord(dash), fmt_coord(gap));
    }
    if let Some(class) = style.class {
        let _ = write!(attrs, r#" class="{class}""#);
    }
    attrs
}

fn title(element: &Element) -> Option<String> {
    match element.target.as_ref()? {
        Target::Datum(datum) => Some(datum.describe()),
        Target::Queue(name) => Some(name.clone()),
    }
}

fn animation(element: &Element, options: &SvgOptions) -> Option<String> {
    if !options.animate {
        return None;
    }
    let transition = element.transition?;
    let dur = transition.duration.as_secs_f64();
    match (&element.shape, transition.kind) {
        (Shape::Rect { width, .. }, TransitionKind::GrowWidth) => Some(format!(
            r#"<animate attributeName="width" from="0" to="{}" dur="{dur}s" fill="freeze"/>"#,
            fmt_coord(*width)
        )),
        (Shape::Sector(_), TransitionKind::SweepAngles) => {
            let frames: Vec<String> = (0..=SWEEP_FRAMES)
                .map(|i| {
                    let at = transition.duration.mul_f64(count(i) / count(SWEEP_FRAMES));
                    match element.sampled_shape(at) {
                        Shape::Sector(s) => s.to_svg_d(),
                        _ => String::new(),
                    }
                })
                .collect();
            Some(format!(
                r#"<animate attributeName="d" values="{}" dur="{dur}s" fill="freeze"/>"#,
                frames.join(";")
            ))
        }
        _ => None,
    }
}

fn write_element(out: &mut String, element: &Element, options: &SvgOptions) {
    let attrs = style_attrs(element);
    let mut children = String::new();
    if let Some(title) = title(element) {
        let _ = write!(children, "<title>{}</title>", escape(&title));
    }
    if let Some(animate) = animation(element, options) {
        children.push_str(&animate);
    }

    // With animation on, shapes start in their zero state.
    let shape = if options.animate && element.transition.is_some() {
        element.sampled_shape(Duration::ZERO)
    } else {
        element.shape.clone()
    };

    let f = fmt_coord;
    let open = match &shape {
        Shape::Line { from, to } => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{attrs}"#,
            f(from.x),
            f(from.y),
            f(to.x),
            f(to.y)
        ),
        Shape::Rect {
            origin,
            width,
            height,
        } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"{attrs}"#,
            f(origin.x),
            f(origin.y),
            f(*width),
            f(*height)
        ),
        Shape::Circle { center, radius } => format!(
            r#"<circle cx="{}" cy="{}" r="{}"{attrs}"#,
            f(center.x),
            f(center.y),
            f(*radius)
        ),
        Shape::Path(path) => format!(r#"<path d="{}"{attrs}"#, path.to_svg_d()),
        Shape::Sector(sector) => format!(r#"<path d="{}"{attrs}"#, sector.to_svg_d()),
        Shape::Text {
            at,
            text,
            anchor,
            size,
        } => {
            let anchor = match anchor {
                Anchor::Start => "start",
                Anchor::Middle => "middle",
                Anchor::End => "end",
            };
            let _ = writeln!(
                out,
                r#"<text x="{}" y="{}" text-anchor="{anchor}" font-size="{}"{attrs}>{children}{}</text>"#,
                f(at.x),
                f(at.y),
                f(*size),
                escape(text)
            );
            return;
        }
    };

    if children.is_empty() {
        let _ = writeln!(out, "{open}/>");
    } else {
        let tag = match shape {
            Shape::Line { .. } => "line",
            Shape::Rect { .. } => "rect",
            Shape::Circle { .. } => "circle",
            Shape::Path(_) | Shape::Sector(_) | Shape::Text { .. } => "path",
        };
        let _ = writeln!(out, "{open}>{children}</{tag}>");
    }
}
