//! Colors. Chart series take their color from a fixed palette indexed by
//! position in the input, never by label.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Self = Self(255, 255, 255);
    pub const BLACK: Self = Self(0, 0, 0);

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
        Some(Self(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

// ── Fixed colors ─────────────────────────────────────────────────────

/// Canvas background, also the fill of near-zero donut slices.
pub const BACKGROUND: Rgb = Rgb::WHITE;
/// Background grid lines.
pub const GRID: Rgb = Rgb(245, 245, 245); // whitesmoke
/// Dashed separator between the tree banner and the charts.
pub const SEPARATOR: Rgb = Rgb(128, 128, 128);
/// Chart frame outline.
pub const FRAME: Rgb = Rgb(211, 211, 211);
/// Outline of near-zero slices when the chart is not all-zero.
pub const NEUTRAL: Rgb = Rgb(160, 160, 160);
/// Tree connectors.
pub const CONNECTOR: Rgb = Rgb(176, 196, 222);
/// Regular text.
pub const TEXT: Rgb = Rgb(51, 51, 51);

/// The classic ten-color categorical scheme.
const CATEGORY10: [Rgb; 10] = [
    Rgb(0x1f, 0x77, 0xb4),
    Rgb(0xff, 0x7f, 0x0e),
    Rgb(0x2c, 0xa0, 0x2c),
    Rgb(0xd6, 0x27, 0x28),
    Rgb(0x94, 0x67, 0xbd),
    Rgb(0x8c, 0x56, 0x4b),
    Rgb(0xe3, 0x77, 0xc2),
    Rgb(0x7f, 0x7f, 0x7f),
    Rgb(0xbc, 0xbd, 0x22),
    Rgb(0x17, 0xbe, 0xcf),
];

/// Softer scheme used by the queue dashboard.
const QUEUES: [Rgb; 13] = [
    Rgb(70, 130, 180),  // steelblue
    Rgb(255, 160, 122), // lightsalmon
    Rgb(135, 206, 250), // lightskyblue
    Rgb(221, 160, 221), // plum
    Rgb(72, 209, 204),  // mediumturquoise
    Rgb(127, 255, 212), // aquamarine
    Rgb(255, 105, 180), // hotpink
    Rgb(240, 230, 140), // khaki
    Rgb(222, 184, 135), // burlywood
    Rgb(255, 182, 193), // lightpink
    Rgb(0, 191, 255),   // deepskyblue
    Rgb(144, 238, 144), // lightgreen
    Rgb(32, 178, 170),  // lightseagreen
];

/// Ordered series colors. Index `i` wraps around the palette length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Build a palette from explicit colors. An empty list falls back to
    /// the default scheme.
    pub fn new(colors: Vec<Rgb>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    /// The queue dashboard scheme. Tree nodes use its first three colors
    /// for normal, hovered and selected.
    pub fn queues() -> Self {
        Self {
            colors: QUEUES.to_vec(),
        }
    }

    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }

    /// Emphasis color: center labels, unselected tree nodes.
    pub fn primary(&self) -> Rgb {
        self.color(0)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: CATEGORY10.to_vec(),
        }
    }
}
