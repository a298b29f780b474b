//! Pinch: two pointers moving toward or away from each other.

use crate::session::InputState;

use super::{continuous_transition, ProcessContext, Recognizer, RecognizerContext, RecognizerState};

#[derive(Clone, Copy, Debug)]
pub struct PinchOptions {
    /// Required pointer count; 0 accepts any.
    pub pointers: usize,
    /// Minimum deviation of the scale factor from 1 before the pinch begins.
    pub threshold: f32,
}

impl Default for PinchOptions {
    fn default() -> Self {
        Self {
            pointers: 2,
            threshold: 0.0,
        }
    }
}

pub struct PinchRecognizer {
    name: String,
    options: PinchOptions,
}

impl PinchRecognizer {
    pub fn new(options: PinchOptions) -> Self {
        Self {
            name: "pinch".to_owned(),
            options,
        }
    }

    pub fn options(&self) -> &PinchOptions {
        &self.options
    }

    fn attr_test(&self, state: RecognizerState, input: &InputState) -> bool {
        let pointers_ok =
            self.options.pointers == 0 || input.pointer_count() == self.options.pointers;
        pointers_ok
            && ((input.scale - 1.0).abs() > self.options.threshold
                || state.intersects(RecognizerState::BEGAN))
    }
}

impl Recognizer for PinchRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(
        &mut self,
        state: RecognizerState,
        input: &mut InputState,
        _cx: &ProcessContext,
    ) -> RecognizerState {
        let valid = self.attr_test(state, input);
        continuous_transition(state, input.phase, valid)
    }

    fn emit(
        &mut self,
        state: RecognizerState,
        input: Option<&InputState>,
        cx: &mut RecognizerContext,
    ) {
        let Some(input) = input else { return };
        let additional = if input.scale != 1.0 {
            let in_out = if input.scale < 1.0 { "in" } else { "out" };
            Some(format!("{}{in_out}", self.name))
        } else {
            None
        };
        cx.publish_with_suffix(&self.name, state, input, additional.as_deref());
    }
}
