//! Rotate: two pointers turning around their midpoint.

use crate::session::InputState;

use super::{continuous_transition, ProcessContext, Recognizer, RecognizerContext, RecognizerState};

#[derive(Clone, Copy, Debug)]
pub struct RotateOptions {
    /// Required pointer count; 0 accepts any.
    pub pointers: usize,
    /// Minimum rotation away from the initial grip, degrees.
    pub threshold: f32,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self {
            pointers: 2,
            threshold: 0.0,
        }
    }
}

pub struct RotateRecognizer {
    name: String,
    options: RotateOptions,
}

impl RotateRecognizer {
    pub fn new(options: RotateOptions) -> Self {
        Self {
            name: "rotate".to_owned(),
            options,
        }
    }

    pub fn options(&self) -> &RotateOptions {
        &self.options
    }

    fn attr_test(&self, state: RecognizerState, input: &InputState) -> bool {
        let pointers_ok =
            self.options.pointers == 0 || input.pointer_count() == self.options.pointers;
        pointers_ok
            && (input.rotation.abs() > self.options.threshold
                || state.intersects(RecognizerState::BEGAN))
    }
}

impl Recognizer for RotateRecognizer {
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
        cx.publish_with_suffix(&self.name, state, input, None);
    }
}
