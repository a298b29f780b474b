//! Tap and multi-tap.
//!
//! A tap series survives across pointer sessions: the previous tap's time and
//! position decide whether the next one continues the series or starts a new
//! one. With failure requirements registered the recognizer holds a matched
//! series in `BEGAN` until the multi-tap interval passes, then recognizes
//! from the deadline.

use crate::geometry::Point;
use crate::input::PointerPhase;
use crate::session::InputState;

use super::{ProcessContext, Recognizer, RecognizerContext, RecognizerState};

#[derive(Clone, Copy, Debug)]
pub struct TapOptions {
    /// Required pointer count.
    pub pointers: usize,
    /// Taps needed to recognize (2 for a double tap); 0 never recognizes.
    pub taps: u32,
    /// Maximum time between taps of one series, ms.
    pub interval: u64,
    /// Maximum touch-down time of a single tap, ms.
    pub time: u64,
    /// Movement allowance within a tap, px.
    pub threshold: f32,
    /// Maximum distance between consecutive taps of one series, px.
    pub pos_threshold: f32,
}

impl Default for TapOptions {
    fn default() -> Self {
        Self {
            pointers: 1,
            taps: 1,
            interval: 300,
            time: 250,
            threshold: 9.0,
            pos_threshold: 10.0,
        }
    }
}

#[derive(Clone, Copy)]
enum Timer {
    /// Confirms the failure once the interval passes without a follow-up tap.
    FailAt(u64),
    /// Recognizes a matched series after waiting out possible further taps.
    RecognizeAt(u64),
}

impl Timer {
    fn at(self) -> u64 {
        match self {
            Timer::FailAt(at) | Timer::RecognizeAt(at) => at,
        }
    }
}

pub struct TapRecognizer {
    name: String,
    options: TapOptions,
    count: u32,
    prev_time: Option<u64>,
    prev_center: Option<Point>,
    /// Record of the last completed tap, republished on recognition.
    stored: Option<InputState>,
    timer: Option<Timer>,
}

impl TapRecognizer {
    pub fn new(options: TapOptions) -> Self {
        Self::named("tap", options)
    }

    /// Same machine under another event name, e.g. a two-tap recognizer
    /// published as `doubletap`.
    pub fn named(name: &str, options: TapOptions) -> Self {
        if options.taps == 0 {
            log::warn!("{name}: a zero-tap series never recognizes");
        }
        Self {
            name: name.to_owned(),
            options,
            count: 0,
            prev_time: None,
            prev_center: None,
            stored: None,
            timer: None,
        }
    }

    pub fn options(&self) -> &TapOptions {
        &self.options
    }

    fn fail_timeout(&mut self, now: u64) -> RecognizerState {
        self.timer = Some(Timer::FailAt(now + self.options.interval));
        RecognizerState::FAILED
    }
}

impl Recognizer for TapRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(
        &mut self,
        _state: RecognizerState,
        input: &mut InputState,
        cx: &ProcessContext,
    ) -> RecognizerState {
        let valid_pointers = input.pointer_count() == self.options.pointers;
        let valid_movement = input.distance < self.options.threshold;
        let valid_touch_time = input.delta_time < self.options.time;

        self.reset();

        if input.phase == PointerPhase::Start && self.count == 0 {
            return self.fail_timeout(input.timestamp);
        }

        if valid_movement && valid_touch_time && valid_pointers {
            if input.phase != PointerPhase::End {
                return self.fail_timeout(input.timestamp);
            }

            let valid_interval = self
                .prev_time
                .map_or(true, |t| input.timestamp.saturating_sub(t) < self.options.interval);
            let valid_position = self
                .prev_center
                .map_or(true, |c| c.distance_to(input.center) < self.options.pos_threshold);

            self.prev_time = Some(input.timestamp);
            self.prev_center = Some(input.center);

            if !valid_position || !valid_interval {
                self.count = 1;
            } else {
                self.count += 1;
            }
            self.stored = Some(input.clone());

            if self.options.taps > 0 && self.count % self.options.taps == 0 {
                // A bare tap fires at once; with failure requirements it
                // waits out the interval so a longer series can veto it.
                if !cx.has_failure_requirements {
                    return RecognizerState::RECOGNIZED;
                }
                self.timer = Some(Timer::RecognizeAt(input.timestamp + self.options.interval));
                return RecognizerState::BEGAN;
            }
        }
        RecognizerState::FAILED
    }

    fn emit(
        &mut self,
        state: RecognizerState,
        _input: Option<&InputState>,
        cx: &mut RecognizerContext,
    ) {
        if state != RecognizerState::RECOGNIZED {
            return;
        }
        if let Some(stored) = &self.stored {
            cx.publish(&self.name, stored, self.count);
        }
    }

    /// Clears the armed timer; the tap series itself survives so the next
    /// session can continue it.
    fn reset(&mut self) {
        self.timer = None;
    }

    fn deadline(&self) -> Option<u64> {
        self.timer.map(Timer::at)
    }

    fn fire_deadline(&mut self, _now: u64) -> RecognizerState {
        match self.timer.take() {
            Some(Timer::RecognizeAt(_)) => RecognizerState::RECOGNIZED,
            _ => RecognizerState::FAILED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use super::*;

    fn end_record(timestamp: u64, delta_time: u64, center: Point) -> InputState {
        let mut input = test_support::state(PointerPhase::End);
        input.timestamp = timestamp;
        input.delta_time = delta_time;
        input.center = center;
        input.is_final = true;
        input
    }

    const NO_REQUIREMENTS: ProcessContext = ProcessContext {
        has_failure_requirements: false,
    };
    const WITH_REQUIREMENTS: ProcessContext = ProcessContext {
        has_failure_requirements: true,
    };

    #[test]
    fn quick_release_recognizes_a_single_tap() {
        let mut tap = TapRecognizer::new(TapOptions::default());

        let mut down = test_support::state(PointerPhase::Start);
        assert_eq!(
            tap.process(RecognizerState::POSSIBLE, &mut down, &NO_REQUIREMENTS),
            RecognizerState::FAILED
        );

        let mut up = end_record(80, 80, Point::ZERO);
        assert_eq!(
            tap.process(RecognizerState::POSSIBLE, &mut up, &NO_REQUIREMENTS),
            RecognizerState::RECOGNIZED
        );
        assert_eq!(tap.count, 1);
    }

    #[test]
    fn slow_release_is_not_a_tap() {
        let mut tap = TapRecognizer::new(TapOptions::default());

        let mut up = end_record(400, 400, Point::ZERO);
        assert_eq!(
            tap.process(RecognizerState::POSSIBLE, &mut up, &NO_REQUIREMENTS),
            RecognizerState::FAILED
        );
    }

    #[test]
    fn two_tap_series_recognizes_on_the_second_release() {
        let mut doubletap = TapRecognizer::named("doubletap", TapOptions {
            taps: 2,
            ..Default::default()
        });

        let mut first = end_record(100, 80, Point::ZERO);
        assert_eq!(
            doubletap.process(RecognizerState::POSSIBLE, &mut first, &NO_REQUIREMENTS),
            RecognizerState::FAILED
        );

        let mut second = end_record(300, 60, Point::new(3.0, 2.0));
        assert_eq!(
            doubletap.process(RecognizerState::POSSIBLE, &mut second, &NO_REQUIREMENTS),
            RecognizerState::RECOGNIZED
        );
        assert_eq!(doubletap.count, 2);
    }

    #[test]
    fn late_second_tap_restarts_the_series() {
        let mut doubletap = TapRecognizer::named("doubletap", TapOptions {
            taps: 2,
            ..Default::default()
        });

        let mut first = end_record(100, 80, Point::ZERO);
        doubletap.process(RecognizerState::POSSIBLE, &mut first, &NO_REQUIREMENTS);

        // Past the 300 ms interval: the series starts over at one.
        let mut late = end_record(600, 80, Point::ZERO);
        assert_eq!(
            doubletap.process(RecognizerState::POSSIBLE, &mut late, &NO_REQUIREMENTS),
            RecognizerState::FAILED
        );
        assert_eq!(doubletap.count, 1);
    }

    #[test]
    fn distant_second_tap_restarts_the_series() {
        let mut doubletap = TapRecognizer::named("doubletap", TapOptions {
            taps: 2,
            ..Default::default()
        });

        let mut first = end_record(100, 80, Point::ZERO);
        doubletap.process(RecognizerState::POSSIBLE, &mut first, &NO_REQUIREMENTS);

        let mut far = end_record(250, 80, Point::new(40.0, 0.0));
        assert_eq!(
            doubletap.process(RecognizerState::POSSIBLE, &mut far, &NO_REQUIREMENTS),
            RecognizerState::FAILED
        );
        assert_eq!(doubletap.count, 1);
    }

    #[test]
    fn failure_requirements_hold_the_tap_until_the_interval_passes() {
        let mut tap = TapRecognizer::new(TapOptions::default());

        let mut up = end_record(100, 80, Point::ZERO);
        assert_eq!(
            tap.process(RecognizerState::POSSIBLE, &mut up, &WITH_REQUIREMENTS),
            RecognizerState::BEGAN
        );
        assert_eq!(tap.deadline(), Some(400));

        assert_eq!(tap.fire_deadline(400), RecognizerState::RECOGNIZED);
        assert_eq!(tap.deadline(), None);
    }

    #[test]
    fn touching_down_again_arms_a_failure_deadline() {
        let mut tap = TapRecognizer::new(TapOptions::default());

        let mut up = end_record(100, 80, Point::ZERO);
        tap.process(RecognizerState::POSSIBLE, &mut up, &NO_REQUIREMENTS);

        let mut down = test_support::state(PointerPhase::Start);
        down.timestamp = 200;
        assert_eq!(
            tap.process(RecognizerState::POSSIBLE, &mut down, &NO_REQUIREMENTS),
            RecognizerState::FAILED
        );
        assert_eq!(tap.deadline(), Some(500));
        assert_eq!(tap.fire_deadline(500), RecognizerState::FAILED);
    }
}
