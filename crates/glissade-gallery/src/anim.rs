//! Scroll transitions.

/// Quadratic ease-in interpolation between two scroll positions.
///
/// The start time latches on the first `advance` call, so a tween created
/// while handling an event begins its run at the next frame tick.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f64,
    to: f64,
    duration_ms: u64,
    start: Option<u64>,
    done: bool,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            start: None,
            done: false,
        }
    }

    /// Position at `now`, clamped to the destination once the duration has
    /// elapsed.
    pub fn advance(&mut self, now: u64) -> f64 {
        let start = *self.start.get_or_insert(now);
        let progress = if self.duration_ms == 0 {
            1.0
        } else {
            (now.saturating_sub(start) as f64 / self.duration_ms as f64).min(1.0)
        };
        if progress >= 1.0 {
            self.done = true;
        }
        (self.to - self.from) * progress * progress + self.from
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}
