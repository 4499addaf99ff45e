//! Fixed-size panel grid.
//!
//! Charts are laid out in 400×300 panels separated by 30 px gaps, filled
//! row-major into whatever width is left of the tree banner.

use serde::Serialize;

use crate::geometry::count;

pub const PANEL_WIDTH: f64 = 400.0;
pub const PANEL_HEIGHT: f64 = PANEL_WIDTH * 0.75;
pub const PANEL_GAP: f64 = 30.0;
/// Padding renderers keep inside a panel.
pub const PANEL_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub id: usize,
    pub margin: f64,
}

impl PanelRect {
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center_x(&self) -> f64 {
        (self.x1 + self.x2) / 2.0
    }

    /// True when the two rectangles share interior area.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }
}

/// Panels that fit side by side in `available_width`, never fewer than one.
pub fn panels_per_row(available_width: f64) -> usize {
    let fit = (available_width / (PANEL_WIDTH + PANEL_GAP)).floor();
    if !fit.is_finite() || fit < 1.0 {
        return 1;
    }
    #[allow(clippy::as_conversions, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = fit as usize;
    n.max(1)
}

/// Rectangle of the `index`-th panel.
pub fn layout(index: usize, available_width: f64, left_offset: f64) -> PanelRect {
    let per_row = panels_per_row(available_width);
    let row = count(index / per_row);
    let col = count(index % per_row);
    let x1 = left_offset + (col + 1.0) * PANEL_GAP + col * PANEL_WIDTH;
    let y1 = (row + 1.0) * PANEL_GAP + row * PANEL_HEIGHT;
    PanelRect {
        x1,
        y1,
        x2: x1 + PANEL_WIDTH,
        y2: y1 + PANEL_HEIGHT,
        id: index,
        margin: PANEL_MARGIN,
    }
}

/// Hands out consecutive panels for one redraw.
#[derive(Debug, Clone)]
pub struct GridLayoutAllocator {
    available_width: f64,
    left_offset: f64,
    next: usize,
}

impl GridLayoutAllocator {
    pub fn new(available_width: f64, left_offset: f64) -> Self {
        Self {
            available_width,
            left_offset,
            next: 0,
        }
    }

    pub fn allocate(&mut self) -> PanelRect {
        let rect = layout(self.next, self.available_width, self.left_offset);
        self.next += 1;
        rect
    }

    pub fn allocated(&self) -> usize {
        self.next
    }

    /// Bottom edge of the lowest panel handed out so far.
    pub fn bottom(&self) -> f64 {
        self.next
            .checked_sub(1)
            .map_or(0.0, |last| layout(last, self.available_width, self.left_offset).y2)
    }
}
