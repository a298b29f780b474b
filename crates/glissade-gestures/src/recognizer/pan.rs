//! Pan: pointer movement past a slop threshold, in allowed directions.

use crate::direction::Direction;
use crate::geometry::Point;
use crate::session::InputState;

use super::{continuous_transition, ProcessContext, Recognizer, RecognizerContext, RecognizerState};

#[derive(Clone, Copy, Debug)]
pub struct PanOptions {
    /// Required pointer count; 0 accepts any.
    pub pointers: usize,
    /// Minimum travel before the pan begins, px.
    pub threshold: f32,
    /// Directions the pan may begin in.
    pub direction: Direction,
}

impl Default for PanOptions {
    fn default() -> Self {
        Self {
            pointers: 1,
            threshold: 10.0,
            direction: Direction::ALL,
        }
    }
}

pub struct PanRecognizer {
    name: String,
    options: PanOptions,
    /// Delta of the last emitted record, for the has-moved check while the
    /// direction is locked to one axis.
    prev_delta: Option<Point>,
}

impl PanRecognizer {
    pub fn new(options: PanOptions) -> Self {
        Self {
            name: "pan".to_owned(),
            options,
            prev_delta: None,
        }
    }

    pub fn options(&self) -> &PanOptions {
        &self.options
    }

    /// Gate for beginning a pan. When the current motion direction falls
    /// outside the configured mask the test locks onto the configured axis:
    /// direction, gating distance, and the has-moved check all come from
    /// that axis alone. The (possibly rewritten) direction is left on the
    /// record so directional event names match what the consumer sees.
    fn direction_test(&self, input: &mut InputState) -> bool {
        let allowed = self.options.direction;
        let mut has_moved = true;
        let mut distance = input.distance;
        let mut direction = input.direction;

        if !allowed.intersects(direction) {
            if allowed.intersects(Direction::HORIZONTAL) {
                direction = axis_direction(input.delta.x, Direction::LEFT, Direction::RIGHT);
                has_moved = Some(input.delta.x) != self.prev_delta.map(|p| p.x);
                distance = input.delta.x.abs();
            } else {
                direction = axis_direction(input.delta.y, Direction::UP, Direction::DOWN);
                has_moved = Some(input.delta.y) != self.prev_delta.map(|p| p.y);
                distance = input.delta.y.abs();
            }
        }

        input.direction = direction;
        has_moved && distance > self.options.threshold && allowed.intersects(direction)
    }

    fn attr_test(&self, state: RecognizerState, input: &mut InputState) -> bool {
        let pointers_ok =
            self.options.pointers == 0 || input.pointer_count() == self.options.pointers;
        pointers_ok && (state.contains(RecognizerState::BEGAN) || self.direction_test(input))
    }
}

fn axis_direction(delta: f32, negative: Direction, positive: Direction) -> Direction {
    if delta == 0.0 {
        Direction::NONE
    } else if delta < 0.0 {
        negative
    } else {
        positive
    }
}

impl Recognizer for PanRecognizer {
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
        self.prev_delta = Some(input.delta);

        let additional = input
            .direction
            .label()
            .map(|label| format!("{}{label}", self.name));
        cx.publish_with_suffix(&self.name, state, input, additional.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use super::super::test_support;
    use crate::input::PointerPhase;

    fn record(phase: PointerPhase, delta: Point, direction: Direction, distance: f32) -> InputState {
        let mut input = test_support::state(phase);
        input.delta = delta;
        input.direction = direction;
        input.distance = distance;
        input
    }

    #[test]
    fn begins_after_threshold_in_allowed_direction() {
        let mut pan = PanRecognizer::new(PanOptions {
            direction: Direction::HORIZONTAL,
            ..Default::default()
        });
        let cx = ProcessContext {
            has_failure_requirements: false,
        };

        let mut small = record(PointerPhase::Move, Point::new(4.0, 0.0), Direction::RIGHT, 4.0);
        assert_eq!(
            pan.process(RecognizerState::POSSIBLE, &mut small, &cx),
            RecognizerState::FAILED
        );

        let mut past = record(PointerPhase::Move, Point::new(14.0, 0.0), Direction::RIGHT, 14.0);
        assert_eq!(
            pan.process(RecognizerState::POSSIBLE, &mut past, &cx),
            RecognizerState::BEGAN
        );
    }

    #[test]
    fn vertical_motion_locks_to_the_configured_axis() {
        let pan = PanRecognizer::new(PanOptions {
            direction: Direction::HORIZONTAL,
            ..Default::default()
        });

        // Mostly vertical drag: the gate only counts the horizontal travel.
        let mut diagonal = record(PointerPhase::Move, Point::new(12.0, 40.0), Direction::DOWN, 41.8);
        assert!(pan.direction_test(&mut diagonal));
        assert_eq!(diagonal.direction, Direction::RIGHT);

        let mut vertical = record(PointerPhase::Move, Point::new(2.0, 40.0), Direction::DOWN, 40.0);
        assert!(!pan.direction_test(&mut vertical));
        assert_eq!(vertical.direction, Direction::RIGHT);
    }

    #[test]
    fn wrong_pointer_count_cancels_an_active_pan() {
        let mut pan = PanRecognizer::new(PanOptions::default());
        let cx = ProcessContext {
            has_failure_requirements: false,
        };

        let mut begun = record(PointerPhase::Move, Point::new(20.0, 0.0), Direction::RIGHT, 20.0);
        let state = pan.process(RecognizerState::POSSIBLE, &mut begun, &cx);
        assert_eq!(state, RecognizerState::BEGAN);

        let mut second_finger = record(PointerPhase::Move, Point::new(25.0, 0.0), Direction::RIGHT, 25.0);
        second_finger.pointers.push(crate::input::TouchPoint {
            id: 99,
            position: Point::new(50.0, 0.0),
        });
        let next = pan.process(state, &mut second_finger, &cx);
        assert!(next.contains(RecognizerState::CANCELLED));
    }
}
