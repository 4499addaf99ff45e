//! Floating value label.
//!
//! Each dashboard owns one [`TooltipController`]. Chart renderers bind
//! their series shapes to a datum; the host feeds pointer events and reads
//! back [`Tooltip`] state to draw.

use serde::Serialize;

use crate::chart::DatumAccess;
use crate::geometry::Point;
use crate::scene::{Element, Scene, Target};

/// Tooltips float this far above the pointer.
pub const POINTER_OFFSET: f64 = -28.0;
pub const VISIBLE_OPACITY: f64 = 0.9;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tooltip {
    pub position: Point,
    pub opacity: f64,
    pub text: String,
}

impl Tooltip {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct TooltipController {
    state: Tooltip,
    /// Target currently under the pointer, for enter/leave detection.
    hovered: Option<Target>,
}

impl TooltipController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the datum behind `accessor` to `element` as its hover target.
    pub fn bind<A: DatumAccess + ?Sized>(element: Element, accessor: &A) -> Element {
        element.target(Target::Datum(accessor.datum().clone()))
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.state
    }

    pub fn on_enter(&mut self, pointer: Point) {
        self.state.position = pointer.offset(0.0, POINTER_OFFSET);
    }

    pub fn on_move<A: DatumAccess + ?Sized>(&mut self, accessor: &A, pointer: Point) {
        self.state.opacity = VISIBLE_OPACITY;
        self.state.text = accessor.datum().describe();
        self.state.position = pointer.offset(0.0, POINTER_OFFSET);
    }

    pub fn on_leave(&mut self) {
        self.state.opacity = 0.0;
        self.hovered = None;
    }

    /// Route a raw pointer position through the scene: enter/move when it
    /// is over a datum, leave when it is not.
    pub fn track(&mut self, scene: &Scene, pointer: Point) {
        let target = scene.hit_test(pointer).and_then(|e| e.target.as_ref());
        match target {
            Some(Target::Datum(datum)) => {
                if self.hovered.as_ref() != target {
                    self.on_enter(pointer);
                    self.hovered = target.cloned();
                }
                self.on_move(datum, pointer);
            }
            _ => {
                if self.hovered.is_some() || self.state.is_visible() {
                    self.on_leave();
                }
            }
        }
    }

    /// Forget everything; used when the scene is rebuilt.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
