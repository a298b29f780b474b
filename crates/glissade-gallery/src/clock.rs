//! Wall-clock source for hosts that drive ticks from real time.

use web_time::Instant;

/// Monotonic millisecond clock anchored at construction. `web_time` keeps
/// the same code path working on native targets and wasm.
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
