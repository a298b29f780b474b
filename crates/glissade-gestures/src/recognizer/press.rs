//! Press: a pointer held in place past a minimum time.
//!
//! The hold itself recognizes from a deadline while the pointer is still
//! down; the release after a recognized hold publishes a separate `pressup`.

use crate::input::PointerPhase;
use crate::session::InputState;

use super::{ProcessContext, Recognizer, RecognizerContext, RecognizerState};

#[derive(Clone, Copy, Debug)]
pub struct PressOptions {
    /// Required pointer count.
    pub pointers: usize,
    /// Minimum hold time, ms.
    pub time: u64,
    /// Movement allowance while holding, px.
    pub threshold: f32,
}

impl Default for PressOptions {
    fn default() -> Self {
        Self {
            pointers: 1,
            time: 251,
            threshold: 9.0,
        }
    }
}

pub struct PressRecognizer {
    name: String,
    options: PressOptions,
    /// Last processed record, republished when the hold deadline fires.
    stored: Option<InputState>,
    deadline: Option<u64>,
}

impl PressRecognizer {
    pub fn new(options: PressOptions) -> Self {
        Self {
            name: "press".to_owned(),
            options,
            stored: None,
            deadline: None,
        }
    }

    pub fn options(&self) -> &PressOptions {
        &self.options
    }
}

impl Recognizer for PressRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(
        &mut self,
        _state: RecognizerState,
        input: &mut InputState,
        _cx: &ProcessContext,
    ) -> RecognizerState {
        let valid_pointers = input.pointer_count() == self.options.pointers;
        let valid_movement = input.distance < self.options.threshold;
        let valid_time = input.delta_time > self.options.time;

        self.stored = Some(input.clone());

        if !valid_movement
            || !valid_pointers
            || (input.phase.is_terminal() && !valid_time)
        {
            self.reset();
        } else if input.phase == PointerPhase::Start {
            self.reset();
            self.deadline = Some(input.timestamp + self.options.time);
        } else if input.phase == PointerPhase::End {
            return RecognizerState::RECOGNIZED;
        }
        RecognizerState::FAILED
    }

    fn emit(
        &mut self,
        state: RecognizerState,
        input: Option<&InputState>,
        cx: &mut RecognizerContext,
    ) {
        if state != RecognizerState::RECOGNIZED {
            return;
        }
        if let Some(input) = input {
            if input.phase == PointerPhase::End {
                cx.publish(&format!("{}up", self.name), input, 0);
                return;
            }
        }
        if let Some(stored) = &self.stored {
            cx.publish(&self.name, stored, 0);
        }
    }

    fn reset(&mut self) {
        self.deadline = None;
    }

    fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    fn fire_deadline(&mut self, now: u64) -> RecognizerState {
        self.deadline = None;
        if let Some(stored) = &mut self.stored {
            stored.timestamp = now;
        }
        RecognizerState::RECOGNIZED
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use super::*;

    fn record(phase: PointerPhase, timestamp: u64, delta_time: u64) -> InputState {
        let mut input = test_support::state(phase);
        input.timestamp = timestamp;
        input.delta_time = delta_time;
        input
    }

    #[test]
    fn touch_down_arms_the_hold_deadline() {
        let mut press = PressRecognizer::new(PressOptions::default());
        let cx = ProcessContext {
            has_failure_requirements: false,
        };

        let mut down = record(PointerPhase::Start, 1_000, 0);
        assert_eq!(
            press.process(RecognizerState::POSSIBLE, &mut down, &cx),
            RecognizerState::FAILED
        );
        assert_eq!(press.deadline(), Some(1_251));

        let state = press.fire_deadline(1_251);
        assert_eq!(state, RecognizerState::RECOGNIZED);
        assert_eq!(press.deadline(), None);
    }

    #[test]
    fn movement_past_the_allowance_disarms() {
        let mut press = PressRecognizer::new(PressOptions::default());
        let cx = ProcessContext {
            has_failure_requirements: false,
        };

        let mut down = record(PointerPhase::Start, 0, 0);
        press.process(RecognizerState::POSSIBLE, &mut down, &cx);
        assert!(press.deadline().is_some());

        let mut wander = record(PointerPhase::Move, 100, 100);
        wander.distance = 12.0;
        assert_eq!(
            press.process(RecognizerState::POSSIBLE, &mut wander, &cx),
            RecognizerState::FAILED
        );
        assert_eq!(press.deadline(), None);
    }

    #[test]
    fn early_release_disarms() {
        let mut press = PressRecognizer::new(PressOptions::default());
        let cx = ProcessContext {
            has_failure_requirements: false,
        };

        let mut down = record(PointerPhase::Start, 0, 0);
        press.process(RecognizerState::POSSIBLE, &mut down, &cx);

        let mut up = record(PointerPhase::End, 120, 120);
        up.is_final = true;
        assert_eq!(
            press.process(RecognizerState::POSSIBLE, &mut up, &cx),
            RecognizerState::FAILED
        );
        assert_eq!(press.deadline(), None);
    }

    #[test]
    fn release_after_the_hold_time_recognizes_directly() {
        let mut press = PressRecognizer::new(PressOptions::default());
        let cx = ProcessContext {
            has_failure_requirements: false,
        };

        let mut up = record(PointerPhase::End, 400, 400);
        up.is_final = true;
        assert_eq!(
            press.process(RecognizerState::POSSIBLE, &mut up, &cx),
            RecognizerState::RECOGNIZED
        );
    }

    #[test]
    fn deadline_refreshes_the_stored_timestamp() {
        let mut press = PressRecognizer::new(PressOptions::default());
        let cx = ProcessContext {
            has_failure_requirements: false,
        };

        let mut down = record(PointerPhase::Start, 2_000, 0);
        press.process(RecognizerState::POSSIBLE, &mut down, &cx);
        press.fire_deadline(2_251);
        assert_eq!(press.stored.as_ref().map(|s| s.timestamp), Some(2_251));
    }
}
