//! Engine: input normalization, recognizer arbitration, and event delivery.

use crate::direction::Direction;
use crate::emitter::{Emitter, Subscription};
use crate::event::GestureEvent;
use crate::input::{PointerRegistry, PointerUpdate};
use crate::recognizer::{
    PanOptions, PanRecognizer, PinchOptions, PinchRecognizer, PressOptions, PressRecognizer,
    ProcessContext, Recognizer, RecognizerContext, RecognizerState, RotateOptions,
    RotateRecognizer, SwipeOptions, SwipeRecognizer, TapOptions, TapRecognizer,
};
use crate::session::{InputState, Session};

/// Handle to a recognizer registered with an engine. Stable for the
/// engine's lifetime.
pub type RecognizerId = usize;

struct Slot {
    recognizer: Box<dyn Recognizer>,
    state: RecognizerState,
    enabled: bool,
    /// Ids this recognizer may run simultaneously with while one of them
    /// owns the session.
    simultaneous: Vec<RecognizerId>,
    /// Ids that must be in FAILED or POSSIBLE for this recognizer to emit.
    require_fail: Vec<RecognizerId>,
}

/// Drives a set of competing recognizers over a normalized pointer stream.
///
/// Feed one [`PointerUpdate`] per platform pointer transition through
/// [`handle`](Self::handle); call [`poll`](Self::poll) when the host clock
/// reaches [`next_deadline`](Self::next_deadline) so hold and multi-tap
/// deadlines fire between updates. Recognized gestures are delivered to
/// [`on`](Self::on) subscribers.
pub struct GestureEngine {
    registry: PointerRegistry,
    session: Session,
    slots: Vec<Slot>,
    emitter: Emitter<GestureEvent>,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureEngine {
    /// An engine with no recognizers registered.
    pub fn new() -> Self {
        Self {
            registry: PointerRegistry::new(),
            session: Session::new(),
            slots: Vec::new(),
            emitter: Emitter::new(),
        }
    }

    /// The standard recognizer set: horizontal swipe and pan (linked
    /// simultaneous), tap and doubletap (linked simultaneous), press, and
    /// disabled pinch/rotate ready to be enabled.
    pub fn with_default_recognizers() -> Self {
        let mut engine = Self::new();

        let rotate = engine.add(Box::new(RotateRecognizer::new(RotateOptions::default())));
        engine.set_enabled(rotate, false);

        let pinch = engine.add(Box::new(PinchRecognizer::new(PinchOptions::default())));
        engine.set_enabled(pinch, false);
        engine.recognize_with(pinch, rotate);

        let swipe = engine.add(Box::new(SwipeRecognizer::new(SwipeOptions {
            direction: Direction::HORIZONTAL,
            ..Default::default()
        })));

        let pan = engine.add(Box::new(PanRecognizer::new(PanOptions {
            direction: Direction::HORIZONTAL,
            ..Default::default()
        })));
        engine.recognize_with(pan, swipe);

        let tap = engine.add(Box::new(TapRecognizer::new(TapOptions::default())));

        let doubletap = engine.add(Box::new(TapRecognizer::named(
            "doubletap",
            TapOptions {
                taps: 2,
                ..Default::default()
            },
        )));
        engine.recognize_with(doubletap, tap);

        engine.add(Box::new(PressRecognizer::new(PressOptions::default())));
        engine
    }

    /// Registers a recognizer at the end of the recognition order.
    pub fn add(&mut self, recognizer: Box<dyn Recognizer>) -> RecognizerId {
        let id = self.slots.len();
        self.slots.push(Slot {
            recognizer,
            state: RecognizerState::POSSIBLE,
            enabled: true,
            simultaneous: Vec::new(),
            require_fail: Vec::new(),
        });
        id
    }

    /// Id of the first recognizer with the given base event name.
    pub fn id_of(&self, name: &str) -> Option<RecognizerId> {
        self.slots.iter().position(|s| s.recognizer.name() == name)
    }

    /// Borrows a registered recognizer.
    pub fn recognizer(&self, id: RecognizerId) -> Option<&dyn Recognizer> {
        self.slots.get(id).map(|s| &*s.recognizer)
    }

    pub fn recognizer_mut(&mut self, id: RecognizerId) -> Option<&mut dyn Recognizer> {
        match self.slots.get_mut(id) {
            Some(s) => Some(&mut *s.recognizer),
            None => None,
        }
    }

    pub fn set_enabled(&mut self, id: RecognizerId, enabled: bool) {
        match self.slots.get_mut(id) {
            Some(slot) => slot.enabled = enabled,
            None => log::warn!("set_enabled: unknown recognizer id {id}"),
        }
    }

    pub fn state_of(&self, id: RecognizerId) -> Option<RecognizerState> {
        self.slots.get(id).map(|s| s.state)
    }

    /// Allows `a` and `b` to recognize simultaneously. Registered on both
    /// sides; [`drop_recognize_with`](Self::drop_recognize_with) removes
    /// one side only.
    pub fn recognize_with(&mut self, a: RecognizerId, b: RecognizerId) {
        if a == b || a >= self.slots.len() || b >= self.slots.len() {
            log::warn!("recognize_with: invalid pair {a}/{b}");
            return;
        }
        if !self.slots[a].simultaneous.contains(&b) {
            self.slots[a].simultaneous.push(b);
            self.recognize_with(b, a);
        }
    }

    pub fn drop_recognize_with(&mut self, a: RecognizerId, b: RecognizerId) {
        if let Some(slot) = self.slots.get_mut(a) {
            slot.simultaneous.retain(|&id| id != b);
        }
    }

    /// Makes each of `a` and `b` wait for the other to be failed (or still
    /// possible) before emitting. Registered on both sides, resolved in
    /// registration order; [`drop_require_failure`](Self::drop_require_failure)
    /// removes one side only.
    pub fn require_failure(&mut self, a: RecognizerId, b: RecognizerId) {
        if a == b || a >= self.slots.len() || b >= self.slots.len() {
            log::warn!("require_failure: invalid pair {a}/{b}");
            return;
        }
        if !self.slots[a].require_fail.contains(&b) {
            self.slots[a].require_fail.push(b);
            self.require_failure(b, a);
        }
    }

    pub fn drop_require_failure(&mut self, a: RecognizerId, b: RecognizerId) {
        if let Some(slot) = self.slots.get_mut(a) {
            slot.require_fail.retain(|&id| id != b);
        }
    }

    /// Subscribes to one emitted gesture name (`pan`, `panstart`,
    /// `swipeleft`, `doubletap`, ...).
    pub fn on(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&GestureEvent) + 'static,
    ) -> Subscription {
        self.emitter.on(name, handler)
    }

    pub fn off(&mut self, subscription: Subscription) {
        self.emitter.off(subscription)
    }

    /// Feeds one pointer transition through the engine.
    ///
    /// Deadlines due at or before the update's timestamp fire first, so
    /// recognition does not depend on how often the host polls.
    pub fn handle(&mut self, update: PointerUpdate) {
        self.poll(update.timestamp);
        let Some(snapshot) = self.registry.apply(update) else {
            return;
        };
        let input = self.session.compute(&snapshot);
        self.recognize(input);
    }

    /// Fires every deadline due at or before `now`, earliest first;
    /// same-timestamp deadlines fire in recognition order.
    pub fn poll(&mut self, now: u64) {
        loop {
            let due = self
                .slots
                .iter()
                .enumerate()
                .filter_map(|(i, s)| s.recognizer.deadline().map(|at| (at, i)))
                .filter(|&(at, _)| at <= now)
                .min();
            let Some((at, i)) = due else { break };

            let state = self.slots[i].recognizer.fire_deadline(at);
            self.slots[i].state = state;
            log::debug!(
                "{} deadline fired at t={at}",
                self.slots[i].recognizer.name()
            );
            if state.intersects(
                RecognizerState::BEGAN
                    | RecognizerState::CHANGED
                    | RecognizerState::ENDED
                    | RecognizerState::CANCELLED,
            ) {
                self.try_emit(i, None);
            }
        }
    }

    /// Earliest pending deadline across all recognizers, for host wakeup
    /// scheduling.
    pub fn next_deadline(&self) -> Option<u64> {
        self.slots.iter().filter_map(|s| s.recognizer.deadline()).min()
    }

    fn recognize(&mut self, input: InputState) {
        if let Some(cur) = self.session.current {
            if self.slots[cur].state.contains(RecognizerState::RECOGNIZED) {
                self.session.current = None;
            }
        }

        for i in 0..self.slots.len() {
            let allowed = match self.session.current {
                None => true,
                Some(cur) => i == cur || self.slots[i].simultaneous.contains(&cur),
            };
            if allowed {
                self.drive(i, &input);
            } else {
                self.slots[i].recognizer.reset();
            }

            if self.session.current.is_none()
                && self.slots[i].state.intersects(
                    RecognizerState::BEGAN | RecognizerState::CHANGED | RecognizerState::ENDED,
                )
            {
                log::debug!("{} owns the session", self.slots[i].recognizer.name());
                self.session.current = Some(i);
            }
        }
    }

    /// One recognizer's step for one record. Each recognizer works on its
    /// own copy of the record since it may rewrite the direction before
    /// emitting.
    fn drive(&mut self, i: RecognizerId, input: &InputState) {
        if !self.slots[i].enabled {
            self.slots[i].recognizer.reset();
            self.slots[i].state = RecognizerState::FAILED;
            return;
        }
        if self.slots[i].state.intersects(
            RecognizerState::RECOGNIZED | RecognizerState::CANCELLED | RecognizerState::FAILED,
        ) {
            self.slots[i].state = RecognizerState::POSSIBLE;
        }

        let cx = ProcessContext {
            has_failure_requirements: !self.slots[i].require_fail.is_empty(),
        };
        let mut record = input.clone();
        let slot = &mut self.slots[i];
        slot.state = slot.recognizer.process(slot.state, &mut record, &cx);

        if slot.state.intersects(
            RecognizerState::BEGAN
                | RecognizerState::CHANGED
                | RecognizerState::ENDED
                | RecognizerState::CANCELLED,
        ) {
            self.try_emit(i, Some(&record));
        }
    }

    /// The emission gate: every failure requirement must currently be
    /// failed or still possible, otherwise the recognizer itself fails.
    fn try_emit(&mut self, i: RecognizerId, input: Option<&InputState>) {
        let requirements_met = self.slots[i].require_fail.iter().all(|&j| {
            self.slots[j]
                .state
                .intersects(RecognizerState::FAILED | RecognizerState::POSSIBLE)
        });
        if requirements_met {
            let slot = &mut self.slots[i];
            let mut cx = RecognizerContext {
                emitter: &mut self.emitter,
            };
            slot.recognizer.emit(slot.state, input, &mut cx);
        } else {
            self.slots[i].state = RecognizerState::FAILED;
        }
    }
}
