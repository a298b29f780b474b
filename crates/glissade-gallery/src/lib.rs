//! Headless horizontal image carousel.
//!
//! A [`Gallery`] consumes pointer updates (through an embedded
//! [`glissade_gestures::GestureEngine`]), keyboard navigation and frame
//! ticks, and produces scroll positions plus per-slide [`PaintCommand`]s a
//! host can render with any canvas-like API. No windowing, no rasterizing:
//! image handles and timestamps come from the caller.

mod anim;
mod clock;
mod error;
mod event;
mod frame;
mod gallery;
mod keyboard;
mod layout;

pub use anim::*;
pub use clock::*;
pub use error::*;
pub use event::*;
pub use frame::*;
pub use gallery::*;
pub use keyboard::*;
pub use layout::*;

pub mod prelude {
    //! Everything a host embedding the carousel usually needs.
    pub use crate::clock::Clock;
    pub use crate::event::GalleryEvent;
    pub use crate::frame::{FrameInfo, PaintCommand, Rect};
    pub use crate::gallery::{Gallery, GalleryOptions};
    pub use crate::keyboard::{Modifiers, NavKey};
    pub use crate::layout::ImageSource;
    pub use glissade_gestures::prelude::*;
}
