//! Queue tree screen: the tree banner on the left, charts for the
//! selected queue on the right.

use std::cell::Cell;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::Rect;
use tracing::debug;

use queuescope_core::QueueDashboard;

use super::{WHEEL_STEP, canvas_width, render_chrome, render_empty, scroll_key};
use crate::action::Action;
use crate::component::Component;
use crate::event::{Click, ClickTracker};
use crate::widgets::scene_canvas::{SceneCanvas, SceneClock, Viewport};
use crate::widgets::tooltip;

const HINTS: &[(&str, &str)] = &[
    ("j/k", "select"),
    ("enter", "fold"),
    ("click", "select"),
    ("dbl-click", "fold"),
    ("PgUp/PgDn", "scroll"),
    ("r", "reload"),
];

pub struct QueuesScreen {
    focused: bool,
    loaded: bool,
    dashboard: QueueDashboard,
    viewport: Viewport,
    clock: SceneClock,
    clicks: ClickTracker,
    /// Canvas area from the last render, for mapping mouse cells.
    canvas_area: Cell<Rect>,
}

impl QueuesScreen {
    pub fn new(double_click: Duration) -> Self {
        Self {
            focused: false,
            loaded: false,
            dashboard: QueueDashboard::new(canvas_width(80)),
            viewport: Viewport::default(),
            clock: SceneClock::new(),
            clicks: ClickTracker::new(double_click),
            canvas_area: Cell::new(Rect::default()),
        }
    }

    fn select_neighbor(&mut self, offset: isize) {
        if let Some(name) = self.dashboard.neighbor(offset).map(str::to_owned) {
            self.dashboard.select(&name);
        }
    }

    fn toggle_selected(&mut self) {
        if let Some(name) = self.dashboard.selected().map(str::to_owned) {
            self.dashboard.toggle_fold(&name);
        }
    }

    /// Entrance transitions restart whenever the dashboard redrew.
    fn sync_clock(&mut self) {
        self.clock.sync(self.dashboard.generation());
    }

    fn title(&self) -> String {
        match self.dashboard.selected() {
            Some(name) => format!("Queues · {name}"),
            None => "Queues".into(),
        }
    }
}

impl Component for QueuesScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let area = self.canvas_area.get();
        if scroll_key(key, &mut self.viewport, self.dashboard.height(), area) {
            return Ok(None);
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.select_neighbor(1),
            KeyCode::Char('k') | KeyCode::Up => self.select_neighbor(-1),
            KeyCode::Char('g') | KeyCode::Home => self.select_neighbor(isize::MIN),
            KeyCode::Char('G') | KeyCode::End => self.select_neighbor(isize::MAX),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            _ => return Ok(None),
        }
        self.sync_clock();
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let area = self.canvas_area.get();
        let pointer = self.viewport.to_scene(area, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => match pointer {
                Some(p) => self.dashboard.pointer_moved(p),
                None => self.dashboard.pointer_left(),
            },
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(p) = pointer else {
                    return Ok(None);
                };
                let acted = match self.clicks.register(mouse.column, mouse.row) {
                    Click::Single => self.dashboard.click(p),
                    Click::Double => self.dashboard.double_click(p),
                };
                if let Some(name) = acted {
                    debug!(queue = %name, "queue activated");
                }
            }
            MouseEventKind::ScrollDown => self.viewport.scroll_by(WHEEL_STEP, self.dashboard.height(), area),
            MouseEventKind::ScrollUp => self.viewport.scroll_by(-WHEEL_STEP, self.dashboard.height(), area),
            _ => {}
        }
        self.sync_clock();
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::QueuesLoaded(records) => {
                self.dashboard.load(records.as_ref().clone());
                self.viewport = Viewport::default();
                self.loaded = true;
                self.sync_clock();
                return Ok(Some(Action::Notify(format!("{} queues loaded", self.dashboard.tree().len()))));
            }
            Action::Resize(columns, _) => {
                self.dashboard.resize(canvas_width(*columns));
                self.sync_clock();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let canvas = render_chrome(frame, area, &self.title(), self.focused, HINTS);
        self.canvas_area.set(canvas);
        if !self.loaded {
            render_empty(frame, canvas, "No queue snapshot yet. Pass --queues <FILE> or set defaults.queues_file.");
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
        "Queues"
    }
}
