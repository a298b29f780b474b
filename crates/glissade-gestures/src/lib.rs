//! Multi-touch gesture recognition for Glissade
//!
//! Hosts feed per-pointer transitions ([`PointerUpdate`]) into a
//! [`GestureEngine`]; the engine normalizes them into uniform input records
//! and runs a set of competing recognizer state machines (pan, swipe,
//! pinch, rotate, tap, press), publishing named [`GestureEvent`]s through a
//! subscription emitter. No platform event handling: timestamps and
//! positions come from the caller, and timer-driven gestures (press,
//! multi-tap) fire through explicit deadline polling.

mod direction;
mod emitter;
mod engine;
mod event;
mod geometry;
mod input;
mod recognizer;
mod session;

pub use direction::*;
pub use emitter::*;
pub use engine::*;
pub use event::*;
pub use geometry::*;
pub use input::*;
pub use recognizer::*;
pub use session::*;

pub mod prelude {
    pub use crate::direction::Direction;
    pub use crate::engine::{GestureEngine, RecognizerId};
    pub use crate::event::GestureEvent;
    pub use crate::geometry::Point;
    pub use crate::input::{PointerId, PointerPhase, PointerUpdate};
    pub use crate::recognizer::RecognizerState;
}
