//! Slide scaling and strip geometry.

/// Host-owned image handle with its natural pixel size. The gallery never
/// touches pixel data; `id` is echoed back in paint commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSource {
    pub id: u64,
    pub width: u32,
    pub height: u32,
}

/// Scales `width x height` to fit a `max_width x max_height` frame while
/// keeping the aspect ratio. Images at or above the frame's ratio fill the
/// width, the rest fill the height; results are whole pixels.
pub fn scale_to_fit(width: f64, height: f64, max_width: f64, max_height: f64) -> (f64, f64) {
    let item_ratio = width / height;
    let frame_ratio = max_width / max_height;
    if item_ratio >= frame_ratio {
        (max_width.round(), (height * max_width / width).round())
    } else {
        ((width * max_height / height).round(), max_height.round())
    }
}

/// One slide's placement inside the scrolling strip.
#[derive(Clone, Debug, PartialEq)]
pub struct Slide {
    pub image_id: u64,
    /// Scaled paint size.
    pub width: f64,
    pub height: f64,
    /// Centering offsets inside the viewport.
    pub x_offset: f64,
    pub y_offset: f64,
    /// Scroll position at which this slide rests centered.
    pub left_offset: f64,
    /// Scroll range within which any part of the slide is on screen.
    pub left_bound: f64,
    pub right_bound: f64,
}

impl Slide {
    pub fn in_view(&self, position: f64) -> bool {
        position >= self.left_bound && position <= self.right_bound
    }
}

/// Lays out every slide for a `width`-wide viewport. Returns the slides and
/// the viewport height, which is the tallest scaled slide.
pub(crate) fn layout_slides(
    images: &[ImageSource],
    width: f64,
    max_height: f64,
    margin: f64,
) -> (Vec<Slide>, f64) {
    let scaled: Vec<(f64, f64)> = images
        .iter()
        .map(|img| scale_to_fit(f64::from(img.width), f64::from(img.height), width, max_height))
        .collect();
    let tallest = scaled.iter().fold(0.0_f64, |acc, &(_, h)| acc.max(h));

    let slides = images
        .iter()
        .zip(&scaled)
        .enumerate()
        .map(|(idx, (img, &(w, h)))| {
            let i = idx as f64;
            Slide {
                image_id: img.id,
                width: w,
                height: h,
                x_offset: (width - w) / 2.0,
                y_offset: (tallest - h) / 2.0,
                left_offset: i * width + i * margin,
                left_bound: (i - 1.0) * width + i * margin,
                right_bound: (i + 1.0) * width + i * margin,
            }
        })
        .collect();

    (slides, tallest)
}
