//! Recognizer state machine core.
//!
//! Each recognizer is an independent classifier fed the session's computed
//! records. The engine drives them through a shared lifecycle: reset terminal
//! states back to possible, run [`Recognizer::process`], then publish if the
//! new state is an active or terminal one and the recognizer's failure
//! requirements allow it.

mod pan;
mod pinch;
mod press;
mod rotate;
mod swipe;
mod tap;

pub use pan::{PanOptions, PanRecognizer};
pub use pinch::{PinchOptions, PinchRecognizer};
pub use press::{PressOptions, PressRecognizer};
pub use rotate::{RotateOptions, RotateRecognizer};
pub use swipe::{SwipeOptions, SwipeRecognizer};
pub use tap::{TapOptions, TapRecognizer};

use crate::emitter::Emitter;
use crate::event::GestureEvent;
use crate::input::PointerPhase;
use crate::session::InputState;

/// Bitmask of recognizer lifecycle states.
///
/// Continuous recognizers accumulate bits (`BEGAN | ENDED` marks a gesture
/// that ended on the same record it was still moving on); terminal checks are
/// therefore mask tests, not equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecognizerState(u8);

impl RecognizerState {
    pub const POSSIBLE: Self = Self(1);
    pub const BEGAN: Self = Self(2);
    pub const CHANGED: Self = Self(4);
    pub const ENDED: Self = Self(8);
    pub const CANCELLED: Self = Self(16);
    pub const FAILED: Self = Self(32);
    /// A discrete recognizer's single-shot success is the same bit as ENDED.
    pub const RECOGNIZED: Self = Self::ENDED;

    pub fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn intersects(&self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    pub(crate) fn raw(&self) -> u8 {
        self.0
    }

    /// Event-name suffix for active/terminal states. Cancellation wins over
    /// end so a `BEGAN | CANCELLED` combination reads as a cancel.
    pub fn suffix(&self) -> Option<&'static str> {
        if self.intersects(Self::CANCELLED) {
            Some("cancel")
        } else if self.intersects(Self::ENDED) {
            Some("end")
        } else if self.intersects(Self::CHANGED) {
            Some("move")
        } else if self.intersects(Self::BEGAN) {
            Some("start")
        } else {
            None
        }
    }
}

impl std::ops::BitOr for RecognizerState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Facts the engine resolves for a recognizer before driving it.
#[derive(Clone, Copy, Debug)]
pub struct ProcessContext {
    /// Whether any failure requirements are registered for this recognizer.
    pub has_failure_requirements: bool,
}

/// Publishing surface handed to recognizers while emitting.
pub struct RecognizerContext<'a> {
    pub(crate) emitter: &'a mut Emitter<GestureEvent>,
}

impl RecognizerContext<'_> {
    pub(crate) fn publish(&mut self, name: &str, state: &InputState, tap_count: u32) {
        log::trace!("gesture event {name}");
        let event = GestureEvent::new(name, state, tap_count);
        self.emitter.emit(name, &event);
    }

    /// Standard fan-out for continuous recognizers: `<base><suffix>` around
    /// the plain `<base>` name, with the optional directional name between.
    pub(crate) fn publish_with_suffix(
        &mut self,
        base: &str,
        state: RecognizerState,
        input: &InputState,
        additional: Option<&str>,
    ) {
        let suffix = state.suffix();
        let before_end = state.raw() < RecognizerState::ENDED.raw();
        if before_end {
            if let Some(suffix) = suffix {
                self.publish(&format!("{base}{suffix}"), input, 0);
            }
        }
        self.publish(base, input, 0);
        if let Some(additional) = additional {
            self.publish(additional, input, 0);
        }
        if !before_end {
            if let Some(suffix) = suffix {
                self.publish(&format!("{base}{suffix}"), input, 0);
            }
        }
    }
}

/// One gesture classifier.
///
/// State lives in the engine's slot and is passed in, so recognizers stay
/// pure transition functions plus whatever per-gesture progress they track
/// (previous deltas, tap series, armed deadlines).
pub trait Recognizer {
    /// Base event name; directional and phase names derive from it.
    fn name(&self) -> &str;

    /// One step of the state machine. May rewrite the record's direction
    /// (axis locking) before it is published.
    fn process(
        &mut self,
        state: RecognizerState,
        input: &mut InputState,
        cx: &ProcessContext,
    ) -> RecognizerState;

    /// Publish events for a state produced by [`Self::process`] or a fired
    /// deadline. `input` is absent when a deadline recognized the gesture.
    fn emit(&mut self, state: RecognizerState, input: Option<&InputState>, cx: &mut RecognizerContext);

    /// Clear per-gesture progress (armed deadlines, series bookkeeping).
    fn reset(&mut self) {}

    /// Earliest pending deadline, in session-timestamp milliseconds.
    fn deadline(&self) -> Option<u64> {
        None
    }

    /// Consume a due deadline and return the state it transitions to.
    fn fire_deadline(&mut self, _now: u64) -> RecognizerState {
        RecognizerState::FAILED
    }
}

/// Shared transition algebra for pan/pinch/rotate.
///
/// `valid` is the recognizer's attribute test for this record. An in-flight
/// gesture is cancelled by a cancel record or by turning invalid; otherwise
/// a valid record advances began -> changed -> ended with the phase.
pub(crate) fn continuous_transition(
    state: RecognizerState,
    phase: PointerPhase,
    valid: bool,
) -> RecognizerState {
    let in_flight = state.intersects(RecognizerState::BEGAN | RecognizerState::CHANGED);
    if in_flight && (phase == PointerPhase::Cancel || !valid) {
        state | RecognizerState::CANCELLED
    } else if in_flight || valid {
        if phase == PointerPhase::End {
            state | RecognizerState::ENDED
        } else if !state.contains(RecognizerState::BEGAN) {
            RecognizerState::BEGAN
        } else {
            state | RecognizerState::CHANGED
        }
    } else {
        RecognizerState::FAILED
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_priority() {
        assert_eq!(RecognizerState::BEGAN.suffix(), Some("start"));
        assert_eq!((RecognizerState::BEGAN | RecognizerState::CHANGED).suffix(), Some("move"));
        assert_eq!((RecognizerState::CHANGED | RecognizerState::ENDED).suffix(), Some("end"));
        assert_eq!(
            (RecognizerState::BEGAN | RecognizerState::CANCELLED).suffix(),
            Some("cancel")
        );
        assert_eq!(RecognizerState::POSSIBLE.suffix(), None);
    }

    #[test]
    fn continuous_transition_walks_the_lifecycle() {
        let began = continuous_transition(RecognizerState::POSSIBLE, PointerPhase::Move, true);
        assert_eq!(began, RecognizerState::BEGAN);

        let changed = continuous_transition(began, PointerPhase::Move, true);
        assert!(changed.contains(RecognizerState::CHANGED));

        let ended = continuous_transition(changed, PointerPhase::End, true);
        assert!(ended.contains(RecognizerState::ENDED));
    }

    #[test]
    fn continuous_transition_cancels_in_flight_gestures() {
        let began = continuous_transition(RecognizerState::POSSIBLE, PointerPhase::Move, true);
        let cancelled = continuous_transition(began, PointerPhase::Cancel, true);
        assert!(cancelled.contains(RecognizerState::CANCELLED));

        let invalidated = continuous_transition(began, PointerPhase::Move, false);
        assert!(invalidated.contains(RecognizerState::CANCELLED));
    }

    #[test]
    fn continuous_transition_fails_when_never_valid() {
        assert_eq!(
            continuous_transition(RecognizerState::POSSIBLE, PointerPhase::Move, false),
            RecognizerState::FAILED
        );
    }
}
