//! Per-frame paint output.

/// Axis-aligned rectangle in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One slide blit: draw the image scaled into `dst`, with the natural-size
/// image shifted `parallax` pixels horizontally inside its slide frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintCommand {
    pub image_id: u64,
    pub dst: Rect,
    pub parallax: f64,
}

/// Everything a host needs to repaint one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInfo {
    pub timestamp: u64,
    /// Scroll position the commands were built for.
    pub position: f64,
    pub commands: Vec<PaintCommand>,
}
