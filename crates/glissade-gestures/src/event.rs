//! Public gesture event payload.

use smallvec::SmallVec;

use crate::direction::Direction;
use crate::geometry::Point;
use crate::input::{PointerPhase, TouchPoint};
use crate::session::InputState;

/// Snapshot delivered to subscribers for every emitted gesture name.
///
/// One physical update can fan out under several names (`panstart`, `pan`,
/// `panleft`); each delivery carries the same computed record with `name`
/// set to the topic it was published under.
#[derive(Clone, Debug)]
pub struct GestureEvent {
    pub name: String,
    pub phase: PointerPhase,
    pub timestamp: u64,
    pub pointers: SmallVec<[TouchPoint; 2]>,
    pub center: Point,
    pub delta: Point,
    pub delta_time: u64,
    pub distance: f32,
    pub angle: f32,
    pub direction: Direction,
    pub offset_direction: Direction,
    pub velocity: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub overall_velocity: f32,
    pub overall_velocity_x: f32,
    pub overall_velocity_y: f32,
    pub scale: f32,
    pub rotation: f32,
    pub max_pointers: usize,
    pub is_first: bool,
    pub is_final: bool,
    /// Position in a tap series; 0 for everything but tap events.
    pub tap_count: u32,
}

impl GestureEvent {
    pub(crate) fn new(name: &str, state: &InputState, tap_count: u32) -> Self {
        Self {
            name: name.to_owned(),
            phase: state.phase,
            timestamp: state.timestamp,
            pointers: state.pointers.clone(),
            center: state.center,
            delta: state.delta,
            delta_time: state.delta_time,
            distance: state.distance,
            angle: state.angle,
            direction: state.direction,
            offset_direction: state.offset_direction,
            velocity: state.velocity,
            velocity_x: state.velocity_x,
            velocity_y: state.velocity_y,
            overall_velocity: state.overall_velocity,
            overall_velocity_x: state.overall_velocity_x,
            overall_velocity_y: state.overall_velocity_y,
            scale: state.scale,
            rotation: state.rotation,
            max_pointers: state.max_pointers,
            is_first: state.is_first,
            is_final: state.is_final,
            tap_count,
        }
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }
}
