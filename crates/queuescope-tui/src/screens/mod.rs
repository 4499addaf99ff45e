//! Screen implementations. Each screen is a top-level Component.

pub mod cluster;
pub mod queues;

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::scene_canvas::{CELL_HEIGHT, Viewport};

/// Create screen components for the tab bar.
pub fn create_screens(double_click: Duration) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Queues, Box::new(queues::QueuesScreen::new(double_click))),
        (ScreenId::Cluster, Box::new(cluster::ClusterScreen::new())),
    ]
}

/// Scene width for a terminal `columns` wide: everything inside the
/// screen border.
pub fn canvas_width(columns: u16) -> f64 {
    Viewport::scene_width(columns.saturating_sub(2))
}

/// Bordered panel with a hint line at the bottom. Returns the canvas area.
pub fn render_chrome(frame: &mut Frame, area: Rect, title: &str, focused: bool, hints: &[(&str, &str)]) -> Rect {
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [canvas, hint_area] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, what)| {
            [
                Span::styled(format!("  {key} "), theme::key_hint_key()),
                Span::styled(*what, theme::key_hint()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), hint_area);
    canvas
}

/// Shared scrolling keys. Returns whether `key` was consumed.
pub fn scroll_key(key: KeyEvent, viewport: &mut Viewport, scene_height: f64, area: Rect) -> bool {
    let page = Viewport::visible_height(area) / 2.0;
    let delta = match (key.modifiers, key.code) {
        (_, KeyCode::PageDown) | (KeyModifiers::CONTROL, KeyCode::Char('d')) => page,
        (_, KeyCode::PageUp) | (KeyModifiers::CONTROL, KeyCode::Char('u')) => -page,
        (KeyModifiers::NONE, KeyCode::Char('J')) | (KeyModifiers::SHIFT, KeyCode::Char('J')) => CELL_HEIGHT,
        (KeyModifiers::NONE, KeyCode::Char('K')) | (KeyModifiers::SHIFT, KeyCode::Char('K')) => -CELL_HEIGHT,
        _ => return false,
    };
    viewport.scroll_by(delta, scene_height, area);
    true
}

/// Three rows per wheel notch.
pub const WHEEL_STEP: f64 = CELL_HEIGHT * 3.0;

/// Placeholder shown before a snapshot arrives.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!("  {message}"), theme::key_hint()))),
        area,
    );
}
