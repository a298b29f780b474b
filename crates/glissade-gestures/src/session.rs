//! Input session and the computed record recognizers consume.
//!
//! A session spans one continuous interaction, from first contact to last
//! release. Every [`PointerSnapshot`] is folded into an [`InputState`]: the
//! centroid, accumulated displacement, interval-sampled velocity, and the
//! multi-touch scale/rotation measured against the first two-finger frame.

use smallvec::SmallVec;

use crate::direction::Direction;
use crate::geometry::Point;
use crate::input::{PointerId, PointerPhase, PointerSnapshot, TouchPoint};

/// Window length for velocity and live-direction sampling.
///
/// Motion shorter than this keeps the previous sample, so velocity reflects
/// the last ~25 ms of movement instead of a single inter-event delta, which
/// on touch hardware can be one or two noisy pixels.
pub const COMPUTE_INTERVAL_MS: u64 = 25;

/// Uniform record computed from one pointer snapshot.
#[derive(Clone, Debug)]
pub struct InputState {
    pub phase: PointerPhase,
    pub timestamp: u64,
    pub pointers: SmallVec<[TouchPoint; 2]>,
    pub changed_id: PointerId,
    pub is_first: bool,
    pub is_final: bool,
    /// Unweighted centroid of the pointer set.
    pub center: Point,
    /// Milliseconds since the session's first contact.
    pub delta_time: u64,
    /// Accumulated displacement, kept continuous across pointer count changes.
    pub delta: Point,
    /// Distance from the session anchor (first multi-touch centroid if any,
    /// else the first contact point) to the current centroid.
    pub distance: f32,
    /// Heading from the session anchor to the current centroid, degrees.
    pub angle: f32,
    /// Direction of recent motion, from the sampling window.
    pub direction: Direction,
    /// Direction of the accumulated displacement.
    pub offset_direction: Direction,
    /// Signed dominant-axis velocity over the sampling window, px/s.
    pub velocity: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    /// Signed dominant-axis velocity over the whole session, px/s.
    pub overall_velocity: f32,
    pub overall_velocity_x: f32,
    pub overall_velocity_y: f32,
    /// Spread of the first two pointers relative to the first multi-touch
    /// frame; 1.0 while fewer than two pointers are down.
    pub scale: f32,
    /// Turn of the first two pointers relative to the first multi-touch
    /// frame, degrees; 0.0 while fewer than two pointers are down.
    pub rotation: f32,
    /// Largest pointer count seen this session.
    pub max_pointers: usize,
}

impl InputState {
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }
}

#[derive(Clone, Copy, Debug)]
struct FirstSnapshot {
    timestamp: u64,
    center: Point,
}

#[derive(Clone, Copy, Debug)]
struct MultiSnapshot {
    center: Point,
    pair: [Point; 2],
}

#[derive(Clone, Copy, Debug)]
struct PrevSample {
    phase: PointerPhase,
    delta: Point,
}

#[derive(Clone, Copy, Debug)]
struct IntervalSample {
    timestamp: u64,
    delta: Point,
    velocity: f32,
    velocity_x: f32,
    velocity_y: f32,
    direction: Direction,
}

/// Accumulated state for the current interaction.
#[derive(Debug, Default)]
pub struct Session {
    first_input: Option<FirstSnapshot>,
    first_multiple: Option<MultiSnapshot>,
    offset_delta: Point,
    prev_delta: Point,
    prev: Option<PrevSample>,
    last_interval: Option<IntervalSample>,
    max_pointers: usize,
    /// Index of the recognizer currently owning this session, if any.
    pub(crate) current: Option<usize>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin(&mut self) {
        *self = Self::default();
    }

    /// Folds one snapshot into the session and produces the computed record.
    pub fn compute(&mut self, snapshot: &PointerSnapshot) -> InputState {
        if snapshot.is_first {
            self.begin();
            log::debug!("session started at t={}", snapshot.timestamp);
        }

        let pointer_count = snapshot.pointers.len();
        let center = centroid(&snapshot.pointers);

        let first_input = *self.first_input.get_or_insert(FirstSnapshot {
            timestamp: snapshot.timestamp,
            center,
        });
        let delta_time = snapshot.timestamp.saturating_sub(first_input.timestamp);

        if pointer_count > 1 && self.first_multiple.is_none() {
            self.first_multiple = Some(MultiSnapshot {
                center,
                pair: [snapshot.pointers[0].position, snapshot.pointers[1].position],
            });
        } else if pointer_count == 1 {
            self.first_multiple = None;
        }

        let anchor = self
            .first_multiple
            .map(|m| m.center)
            .unwrap_or(first_input.center);

        let delta = self.accumulate_delta(snapshot.phase, center);
        let offset_direction = Direction::from_delta(delta.x, delta.y);

        let overall = velocity_between(delta_time, delta);
        let (scale, rotation) = match self.first_multiple {
            Some(multi) if pointer_count > 1 => {
                let pair = [snapshot.pointers[0].position, snapshot.pointers[1].position];
                (
                    pair[0].distance_to(pair[1]) / multi.pair[0].distance_to(multi.pair[1]),
                    pair[0].angle_to(pair[1]) - multi.pair[0].angle_to(multi.pair[1]),
                )
            }
            _ => (1.0, 0.0),
        };

        let interval = self.sample_interval(snapshot.phase, snapshot.timestamp, delta);

        self.max_pointers = self.max_pointers.max(pointer_count);
        self.prev = Some(PrevSample {
            phase: snapshot.phase,
            delta,
        });

        InputState {
            phase: snapshot.phase,
            timestamp: snapshot.timestamp,
            pointers: snapshot.pointers.clone(),
            changed_id: snapshot.changed_id,
            is_first: snapshot.is_first,
            is_final: snapshot.is_final,
            center,
            delta_time,
            delta,
            distance: anchor.distance_to(center),
            angle: anchor.angle_to(center),
            direction: interval.direction,
            offset_direction,
            velocity: interval.velocity,
            velocity_x: interval.velocity_x,
            velocity_y: interval.velocity_y,
            overall_velocity: dominant_axis(overall),
            overall_velocity_x: overall.x,
            overall_velocity_y: overall.y,
            scale,
            rotation,
            max_pointers: self.max_pointers,
        }
    }

    /// Displacement accumulation. The base point is re-anchored whenever a
    /// pointer goes down or the previous snapshot released one, so the delta
    /// carries over instead of jumping when the centroid shifts.
    fn accumulate_delta(&mut self, phase: PointerPhase, center: Point) -> Point {
        let prev_phase_was_end = matches!(
            self.prev,
            Some(PrevSample {
                phase: PointerPhase::End,
                ..
            })
        );
        if phase == PointerPhase::Start || prev_phase_was_end {
            self.prev_delta = self.prev.map(|p| p.delta).unwrap_or(Point::ZERO);
            self.offset_delta = center;
        }
        self.prev_delta + (center - self.offset_delta)
    }

    /// Velocity and live direction over the most recent sampling window.
    /// `Cancel` never refreshes the sample, so a cancelled interaction keeps
    /// the velocity it had while it was still valid.
    fn sample_interval(&mut self, phase: PointerPhase, timestamp: u64, delta: Point) -> IntervalSample {
        match self.last_interval {
            Some(last)
                if phase == PointerPhase::Cancel
                    || timestamp.saturating_sub(last.timestamp) <= COMPUTE_INTERVAL_MS =>
            {
                last
            }
            last => {
                let (window_start, window_delta) = match last {
                    Some(sample) => (sample.timestamp, delta - sample.delta),
                    None => (timestamp, Point::ZERO),
                };
                let v = velocity_between(timestamp.saturating_sub(window_start), window_delta);
                let sample = IntervalSample {
                    timestamp,
                    delta,
                    velocity: dominant_axis(v),
                    velocity_x: v.x,
                    velocity_y: v.y,
                    direction: Direction::from_delta(window_delta.x, window_delta.y),
                };
                self.last_interval = Some(sample);
                sample
            }
        }
    }
}

fn centroid(pointers: &[TouchPoint]) -> Point {
    if pointers.is_empty() {
        return Point::ZERO;
    }
    let mut sum = Point::ZERO;
    for p in pointers {
        sum += p.position;
    }
    Point::new(sum.x / pointers.len() as f32, sum.y / pointers.len() as f32)
}

/// Average velocity in px/s; zero when no time has passed.
fn velocity_between(delta_time_ms: u64, delta: Point) -> Point {
    if delta_time_ms == 0 {
        return Point::ZERO;
    }
    let seconds = delta_time_ms as f32 / 1000.0;
    Point::new(delta.x / seconds, delta.y / seconds)
}

/// Signed component with the larger magnitude; the y axis wins ties.
fn dominant_axis(v: Point) -> f32 {
    if v.x.abs() > v.y.abs() {
        v.x
    } else {
        v.y
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
