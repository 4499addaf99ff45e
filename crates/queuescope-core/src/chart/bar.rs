// ── Horizontal bar chart ──

use serde::Serialize;

use super::{ChartDatum, format_value, label, panel_layer};
use crate::animation::Transition;
use crate::geometry::{Point, count};
use crate::grid::PanelRect;
use crate::palette::{self, Palette};
use crate::scene::{Element, Layer, Shape};
use crate::tooltip::TooltipController;

pub const BAR_HEIGHT: f64 = 30.0;
pub const MIN_BAR_WIDTH: f64 = 3.0;
pub const DEFAULT_LABEL_WIDTH: f64 = 50.0;
/// Vertical room reserved for the title.
const TITLE_ROOM: f64 = 30.0;
const VALUE_OFFSET: f64 = 15.0;

/// Final placement of one bar and its two texts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label_at: Point,
    pub value_at: Point,
}

/// Space between consecutive bars. A single bar has no gap.
pub fn bar_gap(rect: &PanelRect, n: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let room = rect.height() - 2.0 * rect.margin - TITLE_ROOM;
    (room - count(n) * BAR_HEIGHT) / count(n - 1)
}

pub fn bar_geometry(data: &[ChartDatum], rect: &PanelRect, label_width: f64) -> Vec<BarGeometry> {
    let max_value = data.iter().map(ChartDatum::magnitude).fold(0.0, f64::max);
    let span = (rect.width() - 2.0 * rect.margin - label_width).max(0.0);
    let scale = |v: f64| if max_value > 0.0 { v / max_value * span } else { 0.0 };
    let gap = bar_gap(rect, data.len());
    let x = rect.x1 + rect.margin + label_width;

    data.iter()
        .enumerate()
        .map(|(i, datum)| {
            let y = rect.y1 + TITLE_ROOM + rect.margin + (gap + BAR_HEIGHT) * count(i);
            let mid = y + BAR_HEIGHT / 2.0;
            let scaled = scale(datum.magnitude());
            BarGeometry {
                x,
                y,
                width: scaled.max(MIN_BAR_WIDTH),
                height: BAR_HEIGHT,
                label_at: Point::new(rect.x1 + rect.margin, mid),
                value_at: Point::new(x + VALUE_OFFSET + scaled, mid),
            }
        })
        .collect()
}

/// Render `data` as horizontal bars inside `rect`. `label_width` is the
/// column kept free on the left for the labels.
pub fn render_bar_chart(
    data: &[ChartDatum],
    title: &str,
    rect: &PanelRect,
    label_width: f64,
    palette: &Palette,
) -> Layer {
    let mut layer = panel_layer(title, rect);

    let bars = bar_geometry(data, rect, label_width);
    for (i, (datum, bar)) in data.iter().zip(&bars).enumerate() {
        layer.push(label(bar.label_at, datum.label.clone(), palette::TEXT).class("bar-label"));
        let shape = Element::new(Shape::rect(bar.x, bar.y, bar.width, bar.height))
            .fill(palette.color(i))
            .class("bar")
            .transition(Transition::grow_width());
        layer.push(TooltipController::bind(shape, datum));
        layer.push(label(bar.value_at, format_value(datum.value), palette::TEXT).class("bar-value"));
    }
    layer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid;

    fn caps() -> Vec<ChartDatum> {
        vec![
            ChartDatum::new("Cap", 60.0),
            ChartDatum::new("MaxCap", 100.0),
            ChartDatum::new("UsedCap", 0.0),
        ]
    }

    #[test]
    fn bars_scale_to_the_largest_value() {
        let rect = grid::layout(0, 1000.0, 0.0);
        let bars = bar_geometry(&caps(), &rect, 60.0);
        // 400 - 2·10 - 60
        assert!((bars[1].width - 320.0).abs() < 1e-9);
        assert!((bars[0].width - 192.0).abs() < 1e-9);
        assert!((bars[2].width - MIN_BAR_WIDTH).abs() < 1e-9);
        assert!((bars[0].x - (rect.x1 + 70.0)).abs() < 1e-9);
    }

    #[test]
    fn gap_fills_the_panel() {
        let rect = grid::layout(0, 1000.0, 0.0);
        assert!((bar_gap(&rect, 3) - 80.0).abs() < 1e-9);
        assert!(bar_gap(&rect, 1).abs() < f64::EPSILON);
        let bars = bar_geometry(&caps(), &rect, 60.0);
        assert!((bars[0].y - (rect.y1 + 40.0)).abs() < 1e-9);
        assert!((bars[2].y + BAR_HEIGHT - (rect.y2 - rect.margin)).abs() < 1e-9);
    }

    #[test]
    fn all_zero_domain_keeps_minimum_width() {
        let rect = grid::layout(0, 1000.0, 0.0);
        let data = [ChartDatum::new("a", 0.0), ChartDatum::new("b", 0.0)];
        for bar in bar_geometry(&data, &rect, DEFAULT_LABEL_WIDTH) {
            assert!((bar.width - MIN_BAR_WIDTH).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_chart_is_frame_and_title() {
        let rect = grid::layout(0, 1000.0, 0.0);
        let layer = render_bar_chart(&[], "Empty", &rect, DEFAULT_LABEL_WIDTH, &Palette::default());
        assert_eq!(layer.elements.len(), 2);
        assert_eq!(layer.id, "chart-0");
    }

    #[test]
    fn bars_are_bound_and_animated() {
        let rect = grid::layout(0, 1000.0, 0.0);
        let layer = render_bar_chart(&caps(), "Queue Capacities", &rect, 60.0, &Palette::default());
        let bars: Vec<_> = layer.elements.iter().filter(|e| e.style.class == Some("bar")).collect();
        assert_eq!(bars.len(), 3);
        assert!(bars.iter().all(|b| b.target.is_some() && b.transition.is_some()));
    }
}
