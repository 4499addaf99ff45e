//! Cluster metrics screen: five donuts over the latest metric record.

use std::cell::Cell;

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::Rect;

use queuescope_core::ClusterDashboard;

use super::{WHEEL_STEP, canvas_width, render_chrome, render_empty, scroll_key};
use crate::action::Action;
use crate::component::Component;
use crate::widgets::scene_canvas::{SceneCanvas, SceneClock, Viewport};
use crate::widgets::tooltip;

const HINTS: &[(&str, &str)] = &[("hover", "values"), ("PgUp/PgDn", "scroll"), ("r", "reload")];

pub struct ClusterScreen {
    focused: bool,
    loaded: bool,
    dashboard: ClusterDashboard,
    viewport: Viewport,
    clock: SceneClock,
    canvas_area: Cell<Rect>,
}

impl ClusterScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            loaded: false,
            dashboard: ClusterDashboard::new(canvas_width(80)),
            viewport: Viewport::default(),
            clock: SceneClock::new(),
            canvas_area: Cell::new(Rect::default()),
        }
    }
}

impl Component for ClusterScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        scroll_key(key, &mut self.viewport, self.dashboard.height(), self.canvas_area.get());
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let area = self.canvas_area.get();
        match mouse.kind {
            MouseEventKind::Moved => match self.viewport.to_scene(area, mouse.column, mouse.row) {
                Some(p) => self.dashboard.pointer_moved(p),
                None => self.dashboard.pointer_left(),
            },
            MouseEventKind::ScrollDown => self.viewport.scroll_by(WHEEL_STEP, self.dashboard.height(), area),
            MouseEventKind::ScrollUp => self.viewport.scroll_by(-WHEEL_STEP, self.dashboard.height(), area),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::MetricsLoaded(metrics) => {
                self.dashboard.load(metrics.as_ref().clone());
                self.loaded = true;
            }
            Action::Resize(columns, _) => self.dashboard.resize(canvas_width(*columns)),
            _ => return Ok(None),
        }
        self.clock.sync(self.dashboard.generation());
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let canvas = render_chrome(frame, area, "Cluster", self.focused, HINTS);
        self.canvas_area.set(canvas);
        if !self.loaded {
            render_empty(frame, canvas, "No cluster metrics yet. Pass --metrics <FILE> or set defaults.metrics_file.");
            return;
        }
        frame.render_widget(
            SceneCanvas::new(self.dashboard.scene(), self.clock.elapsed(), self.viewport),
            canvas,
        );
        tooltip::render(frame, self.dashboard.tooltip().tooltip(), &self.viewport, canvas);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Cluster"
    }
}
