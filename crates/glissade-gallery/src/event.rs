//! Gallery lifecycle events.

/// Payload delivered to gallery subscribers, published under the topic
/// matching the variant: `ready` once on the first frame tick, `update`
/// whenever the current slide changes, `draw` on every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GalleryEvent {
    Ready {
        num_slides: usize,
        current_slide: usize,
    },
    Update {
        num_slides: usize,
        current_slide: usize,
    },
    Draw {
        timestamp: u64,
    },
}
