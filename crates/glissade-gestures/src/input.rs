//! Pointer stream model.
//!
//! Hosts feed one [`PointerUpdate`] per platform pointer transition. The
//! [`PointerRegistry`] tracks which pointers are currently down and expands
//! each update into a [`PointerSnapshot`] carrying the full pointer set, which
//! is what the session computation consumes. A lifted pointer is still part of
//! the snapshot of its own `End`/`Cancel` update and disappears afterwards.

use smallvec::SmallVec;

use crate::geometry::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    Cancel,
}

impl PointerPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PointerPhase::End | PointerPhase::Cancel)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: PointerId,
    pub position: Point,
}

/// One pointer transition as reported by the host platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerUpdate {
    pub pointer_id: PointerId,
    pub phase: PointerPhase,
    pub position: Point,
    /// Milliseconds from an arbitrary monotonic origin.
    pub timestamp: u64,
}

impl PointerUpdate {
    pub fn new(pointer_id: PointerId, phase: PointerPhase, position: Point, timestamp: u64) -> Self {
        Self {
            pointer_id,
            phase,
            position,
            timestamp,
        }
    }
}

/// Snapshot of every tracked pointer at one update.
#[derive(Clone, Debug)]
pub struct PointerSnapshot {
    pub phase: PointerPhase,
    pub timestamp: u64,
    pub pointers: SmallVec<[TouchPoint; 2]>,
    pub changed_id: PointerId,
    /// First contact of an interaction: a `Start` with no other pointer down.
    pub is_first: bool,
    /// Last release of an interaction: an `End`/`Cancel` leaving none down.
    pub is_final: bool,
}

/// Tracks active pointers in arrival order.
#[derive(Debug, Default)]
pub struct PointerRegistry {
    active: SmallVec<[TouchPoint; 2]>,
}

impl PointerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Applies one update and expands it into a full snapshot.
    ///
    /// Updates that do not make sense for the current registry state (a
    /// duplicate `Start`, or motion for a pointer that was never started) are
    /// dropped with a warning so one misbehaving host event cannot corrupt an
    /// ongoing interaction.
    pub fn apply(&mut self, update: PointerUpdate) -> Option<PointerSnapshot> {
        let known = self.position_of(update.pointer_id).is_some();
        match update.phase {
            PointerPhase::Start => {
                if known {
                    log::warn!("pointer {} started twice; update dropped", update.pointer_id);
                    return None;
                }
                self.active.push(TouchPoint {
                    id: update.pointer_id,
                    position: update.position,
                });
                let is_first = self.active.len() == 1;
                Some(PointerSnapshot {
                    phase: update.phase,
                    timestamp: update.timestamp,
                    pointers: self.active.clone(),
                    changed_id: update.pointer_id,
                    is_first,
                    is_final: false,
                })
            }
            PointerPhase::Move => {
                if !known {
                    log::warn!("move for unknown pointer {}; update dropped", update.pointer_id);
                    return None;
                }
                self.set_position(update.pointer_id, update.position);
                Some(PointerSnapshot {
                    phase: update.phase,
                    timestamp: update.timestamp,
                    pointers: self.active.clone(),
                    changed_id: update.pointer_id,
                    is_first: false,
                    is_final: false,
                })
            }
            PointerPhase::End | PointerPhase::Cancel => {
                if !known {
                    log::warn!(
                        "release for unknown pointer {}; update dropped",
                        update.pointer_id
                    );
                    return None;
                }
                self.set_position(update.pointer_id, update.position);
                let pointers = self.active.clone();
                self.active.retain(|p| p.id != update.pointer_id);
                Some(PointerSnapshot {
                    phase: update.phase,
                    timestamp: update.timestamp,
                    pointers,
                    changed_id: update.pointer_id,
                    is_first: false,
                    is_final: self.active.is_empty(),
                })
            }
        }
    }

    fn position_of(&self, id: PointerId) -> Option<Point> {
        self.active.iter().find(|p| p.id == id).map(|p| p.position)
    }

    fn set_position(&mut self, id: PointerId, position: Point) {
        if let Some(p) = self.active.iter_mut().find(|p| p.id == id) {
            p.position = position;
        }
    }
}
