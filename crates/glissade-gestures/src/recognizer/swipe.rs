//! Swipe: a fast release past distance and velocity thresholds.

use crate::direction::Direction;
use crate::input::PointerPhase;
use crate::session::InputState;

use super::{continuous_transition, ProcessContext, Recognizer, RecognizerContext, RecognizerState};

#[derive(Clone, Copy, Debug)]
pub struct SwipeOptions {
    /// Required pointer count over the whole session.
    pub pointers: usize,
    /// Minimum travel, px.
    pub threshold: f32,
    /// Minimum session velocity magnitude, px/s.
    pub velocity: f32,
    /// Directions a swipe may point in.
    pub direction: Direction,
}

impl Default for SwipeOptions {
    fn default() -> Self {
        Self {
            pointers: 1,
            threshold: 10.0,
            velocity: 300.0,
            direction: Direction::HORIZONTAL | Direction::VERTICAL,
        }
    }
}

pub struct SwipeRecognizer {
    name: String,
    options: SwipeOptions,
}

impl SwipeRecognizer {
    pub fn new(options: SwipeOptions) -> Self {
        Self {
            name: "swipe".to_owned(),
            options,
        }
    }

    pub fn options(&self) -> &SwipeOptions {
        &self.options
    }

    /// Velocity axis follows the configured mask: a mask allowing both axes
    /// compares the dominant-axis session velocity, a single-axis mask
    /// compares that axis alone.
    fn relevant_velocity(&self, input: &InputState) -> f32 {
        let direction = self.options.direction;
        let both = Direction::HORIZONTAL | Direction::VERTICAL;
        if direction.contains(both) {
            input.overall_velocity
        } else if direction.intersects(Direction::HORIZONTAL) {
            input.overall_velocity_x
        } else if direction.intersects(Direction::VERTICAL) {
            input.overall_velocity_y
        } else {
            0.0
        }
    }

    fn attr_test(&self, input: &InputState) -> bool {
        let pointers_ok =
            self.options.pointers == 0 || input.pointer_count() == self.options.pointers;
        pointers_ok
            && self.options.direction.intersects(input.offset_direction)
            && input.distance > self.options.threshold
            && input.max_pointers == self.options.pointers
            && self.relevant_velocity(input).abs() > self.options.velocity
            && input.phase == PointerPhase::End
    }
}

impl Recognizer for SwipeRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(
        &mut self,
        state: RecognizerState,
        input: &mut InputState,
        _cx: &ProcessContext,
    ) -> RecognizerState {
        let valid = self.attr_test(input);
        continuous_transition(state, input.phase, valid)
    }

    fn emit(
        &mut self,
        _state: RecognizerState,
        input: Option<&InputState>,
        cx: &mut RecognizerContext,
    ) {
        let Some(input) = input else { return };
        if let Some(label) = input.offset_direction.label() {
            cx.publish(&format!("{}{label}", self.name), input, 0);
        }
        cx.publish(&self.name, input, 0);
    }
}
