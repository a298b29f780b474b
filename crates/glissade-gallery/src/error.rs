//! Gallery construction errors.

use std::error::Error;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GalleryError {
    /// The image list was empty.
    NoSlides,
    /// An image or the viewport had a zero or negative dimension.
    InvalidDimensions,
}

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryError::NoSlides => write!(f, "gallery needs at least one image"),
            GalleryError::InvalidDimensions => {
                write!(f, "image and viewport dimensions must be positive")
            }
        }
    }
}

impl Error for GalleryError {}
