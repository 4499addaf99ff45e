//! Terminal input for the dashboards.
//!
//! A background task merges crossterm input with two clocks: a slow tick
//! and a render tick that also paces pointer motion, since every move
//! costs a scene hit test. [`ClickTracker`] turns consecutive left clicks
//! into single and double activations.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    /// Slow clock.
    Tick,
    /// Frame clock; entrance transitions are sampled on it.
    Render,
}

/// Key presses, mouse and resize. Releases, repeats, focus and paste are
/// of no use to the dashboards.
fn translate(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

/// Keeps only the latest pointer move and lets it through on the next
/// frame, or just before any other input so clicks see a fresh hover.
#[derive(Debug, Default)]
struct MotionFilter {
    pending: Option<MouseEvent>,
}

impl MotionFilter {
    fn admit(&mut self, event: Event) -> [Option<Event>; 2] {
        match event {
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => {
                self.pending = Some(mouse);
                [None, None]
            }
            Event::Tick => [Some(Event::Tick), None],
            other => [self.pending.take().map(Event::Mouse), Some(other)],
        }
    }
}

/// Receiving end of the input task. Dropping it stops the task.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(pump(tx, cancel.clone(), tick_rate, render_rate));
        Self { rx, cancel }
    }

    /// `None` once the task has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn pump(
    tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
    tick_rate: Duration,
    render_rate: Duration,
) {
    let mut input = EventStream::new();
    let mut tick = time::interval(tick_rate);
    let mut frame = time::interval(render_rate);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut motion = MotionFilter::default();

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => break,
            _ = tick.tick() => Event::Tick,
            _ = frame.tick() => Event::Render,
            Some(Ok(raw)) = input.next() => match translate(raw) {
                Some(event) => event,
                None => continue,
            },
        };

        for event in motion.admit(event).into_iter().flatten() {
            if tx.send(event).is_err() {
                return;
            }
        }
    }
}

// ── Click tracking ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    Single,
    Double,
}

/// Pairs left clicks on the same cell within `window` into a double click.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    window: Duration,
    last: Option<(Instant, u16, u16)>,
}

impl ClickTracker {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn register(&mut self, column: u16, row: u16) -> Click {
        self.register_at(Instant::now(), column, row)
    }

    /// A double click consumes both clicks; a third click starts over.
    pub fn register_at(&mut self, at: Instant, column: u16, row: u16) -> Click {
        match self.last.take() {
            Some((prev, c, r))
                if c == column && r == row && at.saturating_duration_since(prev) <= self.window =>
            {
                Click::Double
            }
            _ => {
                self.last = Some((at, column, row));
                Click::Single
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    use super::*;

    fn moved(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn only_key_presses_get_through() {
        let press = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(translate(CrosstermEvent::Key(press)), Some(Event::Key(press)));
        assert_eq!(translate(CrosstermEvent::Key(release)), None);
        assert_eq!(translate(CrosstermEvent::Resize(80, 24)), Some(Event::Resize(80, 24)));
        assert_eq!(translate(CrosstermEvent::FocusGained), None);
    }

    #[test]
    fn pointer_motion_is_paced_by_frames() {
        let mut motion = MotionFilter::default();
        assert_eq!(motion.admit(moved(1, 1)), [None, None]);
        assert_eq!(motion.admit(moved(5, 2)), [None, None]);
        assert_eq!(motion.admit(Event::Tick), [Some(Event::Tick), None]);
        assert_eq!(motion.admit(Event::Render), [Some(moved(5, 2)), Some(Event::Render)]);
        assert_eq!(motion.admit(Event::Render), [None, Some(Event::Render)]);
    }

    #[test]
    fn other_input_flushes_the_last_move_first() {
        let mut motion = MotionFilter::default();
        motion.admit(moved(3, 3));
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: 3,
            row: 3,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(motion.admit(click.clone()), [Some(moved(3, 3)), Some(click)]);
    }

    #[test]
    fn second_click_in_window_is_double() {
        let mut clicks = ClickTracker::new(Duration::from_millis(400));
        let t0 = Instant::now();
        assert_eq!(clicks.register_at(t0, 3, 4), Click::Single);
        assert_eq!(clicks.register_at(t0 + Duration::from_millis(200), 3, 4), Click::Double);
        assert_eq!(clicks.register_at(t0 + Duration::from_millis(300), 3, 4), Click::Single);
    }

    #[test]
    fn slow_or_moved_clicks_stay_single() {
        let mut clicks = ClickTracker::new(Duration::from_millis(400));
        let t0 = Instant::now();
        assert_eq!(clicks.register_at(t0, 3, 4), Click::Single);
        assert_eq!(clicks.register_at(t0 + Duration::from_millis(500), 3, 4), Click::Single);
        assert_eq!(clicks.register_at(t0 + Duration::from_millis(600), 9, 4), Click::Single);
    }
}
