//! Drives a three-slide gallery through a drag-and-release, a snap
//! animation and keyboard navigation, printing every frame it produces.
//!
//! Run with `RUST_LOG=debug` to watch the engine's state transitions.

use glissade_gallery::prelude::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let clock = Clock::new();
    let images = vec![
        ImageSource { id: 1, width: 1600, height: 900 },
        ImageSource { id: 2, width: 1200, height: 1200 },
        ImageSource { id: 3, width: 900, height: 1600 },
    ];
    let mut gallery = Gallery::new(images, GalleryOptions::new(900.0)).expect("gallery setup");

    gallery.on("ready", |event| println!("ready: {event:?}"));
    gallery.on("update", |event| println!("update: {event:?}"));
    if let Some(engine) = gallery.engine() {
        engine.on("swipe", |event| {
            println!("swipe at {:.0} px/s", event.overall_velocity_x);
        });
    }

    // Settle one frame, then drag the strip most of a viewport to the left.
    print_frame(gallery.tick(0));
    gallery.pointer_update(PointerUpdate::new(
        1,
        PointerPhase::Start,
        Point::new(700.0, 400.0),
        100,
    ));
    for (x, at) in [(620.0, 116), (520.0, 132), (380.0, 148)] {
        gallery.pointer_update(PointerUpdate::new(1, PointerPhase::Move, Point::new(x, 400.0), at));
        print_frame(gallery.tick(at));
    }
    gallery.pointer_update(PointerUpdate::new(
        1,
        PointerPhase::End,
        Point::new(380.0, 400.0),
        164,
    ));

    // Let the snap to the next slide run out.
    for at in (180..=460).step_by(40) {
        print_frame(gallery.tick(at));
    }

    // Arrow-key over to the last slide.
    gallery.handle_key(NavKey::ArrowRight, Modifiers::default());
    for at in (480..=1040).step_by(80) {
        print_frame(gallery.tick(at));
    }

    println!(
        "finished on slide {}/{} at position {:.0} ({}ms wall time)",
        gallery.current_slide() + 1,
        gallery.num_slides(),
        gallery.position(),
        clock.now_ms()
    );
}

fn print_frame(frame: Option<&FrameInfo>) {
    let Some(frame) = frame else { return };
    let slides: Vec<String> = frame
        .commands
        .iter()
        .map(|c| format!("#{} at x={:.0} (parallax {:.0})", c.image_id, c.dst.x, c.parallax))
        .collect();
    println!(
        "t={:>4}ms pos={:>6.1} [{}]",
        frame.timestamp,
        frame.position,
        slides.join(", ")
    );
}
