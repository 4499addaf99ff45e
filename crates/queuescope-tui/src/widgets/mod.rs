//! Reusable rendering pieces shared by the dashboard screens.

pub mod scene_canvas;
pub mod tooltip;
