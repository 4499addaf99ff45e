//! Terminal palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

use queuescope_core::Rgb;

// ── Core Palette ──────────────────────────────────────────────────────

pub const STEEL_BLUE: Color = Color::Rgb(70, 130, 180); // #4682b4
pub const SKY: Color = Color::Rgb(135, 206, 250); // #87cefa
pub const SALMON: Color = Color::Rgb(255, 160, 122); // #ffa07a
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

/// Scene colors are picked for a light page. On a dark terminal the
/// near-white ones become a dim gray and the near-black ones light text.
pub fn scene_color(c: Rgb) -> Color {
    let Rgb(r, g, b) = c;
    if r > 235 && g > 235 && b > 235 {
        Color::Rgb(60, 62, 74)
    } else if r < 80 && g < 80 && b < 80 {
        DIM_WHITE
    } else {
        Color::Rgb(r, g, b)
    }
}

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(SKY).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(STEEL_BLUE)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn tab_active() -> Style {
    Style::default().fg(SALMON).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn tooltip() -> Style {
    Style::default().fg(Color::Black).bg(SKY)
}

pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(SKY).add_modifier(Modifier::BOLD)
}

pub fn error() -> Style {
    Style::default().fg(ERROR_RED)
}
