//! Floating one-line tooltip drawn over the scene canvas.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Clear, Paragraph};

use queuescope_core::{Point, Tooltip};

use super::scene_canvas::Viewport;
use crate::theme;

/// Cell rectangle for `tooltip`, kept inside `area`. `None` while hidden
/// or scrolled out of view.
pub fn placement(tooltip: &Tooltip, viewport: &Viewport, area: Rect) -> Option<Rect> {
    if !tooltip.is_visible() {
        return None;
    }
    // Pointer offset can push the box above the visible top row.
    let anchor = Point::new(tooltip.position.x, tooltip.position.y.max(viewport.scroll));
    let (column, row) = viewport.to_cell(area, anchor)?;
    let width = u16::try_from(tooltip.text.chars().count() + 2)
        .unwrap_or(u16::MAX)
        .min(area.width);
    let x = column.min(area.right().saturating_sub(width)).max(area.x);
    Some(Rect::new(x, row, width, 1))
}

pub fn render(frame: &mut Frame, tooltip: &Tooltip, viewport: &Viewport, area: Rect) {
    let Some(rect) = placement(tooltip, viewport, area) else {
        return;
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(format!(" {} ", tooltip.text)).style(theme::tooltip()), rect);
}
