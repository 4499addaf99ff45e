// ── Entrance transitions ──
//
// Elements carry their end state plus a transition that says how to get
// there from a zero state. Hosts sample the element at an elapsed time;
// a redraw resets the clock.

use std::time::Duration;

use serde::Serialize;

/// Duration of every chart entrance.
pub const ENTRANCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransitionKind {
    /// Rect width grows from zero, left edge fixed.
    GrowWidth,
    /// Sector start and end angles sweep from zero.
    SweepAngles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub kind: TransitionKind,
    pub duration: Duration,
}

impl Transition {
    pub const fn grow_width() -> Self {
        Self {
            kind: TransitionKind::GrowWidth,
            duration: ENTRANCE,
        }
    }

    pub const fn sweep_angles() -> Self {
        Self {
            kind: TransitionKind::SweepAngles,
            duration: ENTRANCE,
        }
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return 1.0;
        }
        ease_cubic_in_out(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert!(ease_cubic_in_out(0.0).abs() < 1e-12);
        assert!((ease_cubic_in_out(1.0) - 1.0).abs() < 1e-12);
        assert!((ease_cubic_in_out(0.5) - 0.5).abs() < 1e-12);
        assert!(ease_cubic_in_out(0.25) < 0.25);
    }

    #[test]
    fn progress_saturates() {
        let t = Transition::grow_width();
        assert!(t.progress(Duration::ZERO).abs() < 1e-12);
        assert!((t.progress(Duration::from_secs(2)) - 1.0).abs() < 1e-12);
        assert!(t.is_finished(ENTRANCE));
        assert!(!t.is_finished(Duration::from_millis(100)));
    }
}
