use smallvec::smallvec;

use crate::geometry::Point;
use crate::input::{PointerPhase, PointerRegistry, PointerSnapshot, PointerUpdate};
use crate::session::Session;
use crate::Direction;

struct Harness {
    registry: PointerRegistry,
    session: Session,
}

impl Harness {
    fn new() -> Self {
        Self {
            registry: PointerRegistry::new(),
            session: Session::new(),
        }
    }

    fn feed(&mut self, id: u64, phase: PointerPhase, x: f32, y: f32, t: u64) -> crate::InputState {
        let snapshot = self
            .registry
            .apply(PointerUpdate::new(id, phase, Point::new(x, y), t))
            .expect("valid update");
        self.session.compute(&snapshot)
    }
}

#[test]
fn first_contact_produces_zeroed_record() {
    let mut h = Harness::new();
    let state = h.feed(1, PointerPhase::Start, 100.0, 100.0, 0);

    assert!(state.is_first);
    assert_eq!(state.delta, Point::ZERO);
    assert_eq!(state.delta_time, 0);
    assert_eq!(state.velocity, 0.0);
    assert_eq!(state.direction, Direction::NONE);
    assert_eq!(state.offset_direction, Direction::NONE);
    assert_eq!(state.scale, 1.0);
    assert_eq!(state.rotation, 0.0);
    assert_eq!(state.max_pointers, 1);
}

#[test]
fn delta_accumulates_and_survives_pointer_arrival() {
    let mut h = Harness::new();
    h.feed(1, PointerPhase::Start, 100.0, 100.0, 0);

    let moved = h.feed(1, PointerPhase::Move, 110.0, 100.0, 30);
    assert_eq!(moved.delta, Point::new(10.0, 0.0));
    assert_eq!(moved.offset_direction, Direction::RIGHT);

    // A second finger shifts the centroid; the accumulated delta must not jump.
    let second = h.feed(2, PointerPhase::Start, 130.0, 100.0, 35);
    assert_eq!(second.center, Point::new(120.0, 100.0));
    assert_eq!(second.delta, Point::new(10.0, 0.0));

    let both = h.feed(1, PointerPhase::Move, 120.0, 100.0, 70);
    assert_eq!(both.center, Point::new(125.0, 100.0));
    assert_eq!(both.delta, Point::new(15.0, 0.0));
}

#[test]
fn distance_is_measured_from_the_session_anchor() {
    let mut h = Harness::new();
    h.feed(1, PointerPhase::Start, 100.0, 100.0, 0);
    let moved = h.feed(1, PointerPhase::Move, 130.0, 140.0, 40);
    assert_eq!(moved.distance, 50.0);
    assert!((moved.angle - 53.13).abs() < 0.01, "angle was {}", moved.angle);

    // Once two fingers are down the anchor becomes the multi-touch centroid.
    let second = h.feed(2, PointerPhase::Start, 170.0, 140.0, 45);
    assert_eq!(second.distance, 0.0);
}

#[test]
fn interval_velocity_recomputes_only_after_the_window() {
    let mut h = Harness::new();
    h.feed(1, PointerPhase::Start, 0.0, 0.0, 0);

    let fast = h.feed(1, PointerPhase::Move, 10.0, 0.0, 30);
    assert!((fast.velocity_x - 333.33).abs() < 0.1, "vx was {}", fast.velocity_x);
    assert_eq!(fast.direction, Direction::RIGHT);

    // 5 ms later: inside the window, the sample is carried unchanged.
    let carried = h.feed(1, PointerPhase::Move, 11.0, 0.0, 35);
    assert_eq!(carried.velocity_x, fast.velocity_x);
    assert_eq!(carried.direction, Direction::RIGHT);

    // 40 ms after the sample: recomputed over the new window.
    let resampled = h.feed(1, PointerPhase::Move, 15.0, 0.0, 70);
    assert!((resampled.velocity_x - 125.0).abs() < 0.1, "vx was {}", resampled.velocity_x);
}

#[test]
fn cancel_keeps_the_last_valid_velocity() {
    let mut h = Harness::new();
    h.feed(1, PointerPhase::Start, 0.0, 0.0, 0);
    let moved = h.feed(1, PointerPhase::Move, 50.0, 0.0, 50);
    assert!(moved.velocity_x > 0.0);

    let cancelled = h.feed(1, PointerPhase::Cancel, 50.0, 0.0, 400);
    assert_eq!(cancelled.velocity_x, moved.velocity_x);
    assert_eq!(cancelled.direction, moved.direction);
}

#[test]
fn overall_velocity_spans_the_whole_session() {
    let mut h = Harness::new();
    h.feed(1, PointerPhase::Start, 0.0, 0.0, 0);
    let state = h.feed(1, PointerPhase::Move, 100.0, 0.0, 200);
    assert!((state.overall_velocity_x - 500.0).abs() < 0.1);
    assert_eq!(state.overall_velocity, state.overall_velocity_x);

    let leftward = {
        let mut h = Harness::new();
        h.feed(1, PointerPhase::Start, 100.0, 0.0, 0);
        h.feed(1, PointerPhase::Move, 0.0, 0.0, 200)
    };
    assert!((leftward.overall_velocity + 500.0).abs() < 0.1, "signed velocity");
}

#[test]
fn scale_and_rotation_use_the_first_two_finger_frame() {
    let mut h = Harness::new();
    h.feed(1, PointerPhase::Start, 100.0, 100.0, 0);
    let base = h.feed(2, PointerPhase::Start, 200.0, 100.0, 10);
    assert_eq!(base.scale, 1.0);
    assert_eq!(base.rotation, 0.0);

    let spread = h.feed(2, PointerPhase::Move, 240.0, 100.0, 50);
    assert!((spread.scale - 1.4).abs() < 1e-6, "scale was {}", spread.scale);
    assert_eq!(spread.rotation, 0.0);

    let turned = h.feed(2, PointerPhase::Move, 100.0, 200.0, 90);
    assert!((turned.rotation - 90.0).abs() < 1e-4, "rotation was {}", turned.rotation);
}

#[test]
fn scale_resets_when_back_to_one_pointer() {
    let mut h = Harness::new();
    h.feed(1, PointerPhase::Start, 100.0, 100.0, 0);
    h.feed(2, PointerPhase::Start, 200.0, 100.0, 10);
    h.feed(2, PointerPhase::Move, 300.0, 100.0, 40);

    // Lifting back to one finger clears the multi-touch frame.
    let lift = h.feed(2, PointerPhase::End, 300.0, 100.0, 60);
    assert_eq!(lift.pointer_count(), 2);
    assert!(lift.scale > 1.0);
    let alone = h.feed(1, PointerPhase::Move, 110.0, 100.0, 90);
    assert_eq!(alone.scale, 1.0);
    assert_eq!(alone.rotation, 0.0);
}

#[test]
fn new_contact_resets_the_session() {
    let mut h = Harness::new();
    h.feed(1, PointerPhase::Start, 0.0, 0.0, 0);
    h.feed(2, PointerPhase::Start, 50.0, 0.0, 10);
    h.feed(2, PointerPhase::End, 50.0, 0.0, 20);
    let end = h.feed(1, PointerPhase::End, 30.0, 0.0, 100);
    assert!(end.is_final);
    assert_eq!(end.max_pointers, 2);

    let fresh = h.feed(3, PointerPhase::Start, 500.0, 500.0, 1000);
    assert!(fresh.is_first);
    assert_eq!(fresh.delta, Point::ZERO);
    assert_eq!(fresh.delta_time, 0);
    assert_eq!(fresh.max_pointers, 1);
}

#[test]
fn release_rebases_the_delta_for_the_remaining_pointer() {
    let mut h = Harness::new();
    h.feed(1, PointerPhase::Start, 0.0, 0.0, 0);
    h.feed(2, PointerPhase::Start, 100.0, 0.0, 10);
    h.feed(1, PointerPhase::Move, 20.0, 0.0, 40);
    let lift = h.feed(1, PointerPhase::End, 20.0, 0.0, 60);
    let carried = lift.delta;

    // The next record re-anchors at the new centroid and keeps accumulating.
    let alone = h.feed(2, PointerPhase::Move, 100.0, 0.0, 90);
    assert_eq!(alone.delta, carried);
    let moved = h.feed(2, PointerPhase::Move, 130.0, 0.0, 130);
    assert_eq!(moved.delta, Point::new(carried.x + 30.0, carried.y));
}

#[test]
fn snapshot_centroid_averages_all_pointers() {
    let snapshot = PointerSnapshot {
        phase: PointerPhase::Move,
        timestamp: 5,
        pointers: smallvec![
            crate::TouchPoint {
                id: 1,
                position: Point::new(0.0, 0.0)
            },
            crate::TouchPoint {
                id: 2,
                position: Point::new(100.0, 50.0)
            },
        ],
        changed_id: 1,
        is_first: true,
        is_final: false,
    };
    let mut session = Session::new();
    let state = session.compute(&snapshot);
    assert_eq!(state.center, Point::new(50.0, 25.0));
}
