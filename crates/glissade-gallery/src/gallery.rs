//! The carousel itself: scroll state, gesture wiring, navigation and the
//! frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use glissade_gestures::{Direction, Emitter, GestureEngine, PointerUpdate, Subscription};

use crate::anim::Tween;
use crate::error::GalleryError;
use crate::event::GalleryEvent;
use crate::frame::{FrameInfo, PaintCommand, Rect};
use crate::keyboard::{Modifiers, NavKey};
use crate::layout::{layout_slides, ImageSource, Slide};

/// Carousel construction knobs. `width` is the one required setting.
#[derive(Clone, Copy, Debug)]
pub struct GalleryOptions {
    /// Viewport width in pixels.
    pub width: f64,
    /// Cap on the scaled slide height.
    pub max_height: f64,
    /// Gap between neighbouring slides.
    pub margin: f64,
    pub keyboard: bool,
    pub touch: bool,
    /// Whether `resize` calls are honoured.
    pub fluid: bool,
    pub keyboard_transition_ms: u64,
    pub snap_transition_ms: u64,
}

impl GalleryOptions {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            max_height: 800.0,
            margin: 40.0,
            keyboard: true,
            touch: true,
            fluid: true,
            keyboard_transition_ms: 500,
            snap_transition_ms: 250,
        }
    }
}

/// What the pan subscription hands over to the scroll logic.
#[derive(Clone, Copy, Debug)]
struct PanSample {
    drag: f64,
    direction: Direction,
    is_final: bool,
}

/// Headless horizontal image strip.
///
/// Drive it with [`Gallery::pointer_update`], [`Gallery::handle_key`] and a
/// stream of [`Gallery::tick`] calls; paint whatever the ticks return.
pub struct Gallery {
    options: GalleryOptions,
    images: Vec<ImageSource>,
    slides: Vec<Slide>,
    height: f64,
    /// Scrollable span, `(width + margin) * (slides - 1)`.
    full_width: f64,
    current_slide: usize,
    /// Resting position of the current slide.
    current_position: f64,
    /// Live position, including in-flight drags and tweens.
    position: f64,
    last_painted: Option<f64>,
    tween: Option<Tween>,
    /// Last horizontal direction seen while panning.
    drag_direction: Option<Direction>,
    pending_width: Option<f64>,
    started: bool,
    engine: Option<GestureEngine>,
    pan_feed: Rc<RefCell<Vec<PanSample>>>,
    frame: FrameInfo,
    emitter: Emitter<GalleryEvent>,
}

impl Gallery {
    pub fn new(images: Vec<ImageSource>, options: GalleryOptions) -> Result<Self, GalleryError> {
        if images.is_empty() {
            return Err(GalleryError::NoSlides);
        }
        if options.width <= 0.0
            || options.max_height <= 0.0
            || images.iter().any(|img| img.width == 0 || img.height == 0)
        {
            return Err(GalleryError::InvalidDimensions);
        }

        let (slides, height) =
            layout_slides(&images, options.width, options.max_height, options.margin);
        let full_width = (options.width + options.margin) * (images.len() as f64 - 1.0);
        let pan_feed = Rc::new(RefCell::new(Vec::new()));
        let engine = options.touch.then(|| {
            let mut engine = GestureEngine::with_default_recognizers();
            let feed = Rc::clone(&pan_feed);
            engine.on("pan", move |event| {
                feed.borrow_mut().push(PanSample {
                    drag: f64::from(event.delta.x).round(),
                    direction: event.direction,
                    is_final: event.is_final,
                });
            });
            engine
        });
        let position = slides[0].left_offset;

        log::debug!(
            "gallery laid out {} slides, viewport {}x{height}",
            slides.len(),
            options.width
        );

        Ok(Self {
            options,
            images,
            slides,
            height,
            full_width,
            current_slide: 0,
            current_position: position,
            position,
            last_painted: None,
            tween: None,
            drag_direction: None,
            pending_width: None,
            started: false,
            engine,
            pan_feed,
            frame: FrameInfo::default(),
            emitter: Emitter::new(),
        })
    }

    /// Feeds one pointer transition through the gesture engine. Does
    /// nothing when touch support is off.
    pub fn pointer_update(&mut self, update: PointerUpdate) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        engine.handle(update);
        let samples: Vec<PanSample> = self.pan_feed.borrow_mut().drain(..).collect();
        for sample in samples {
            self.track_pan(sample);
        }
    }

    /// Raw gesture access, for hosts that want more than scrolling.
    pub fn engine(&mut self) -> Option<&mut GestureEngine> {
        self.engine.as_mut()
    }

    pub fn on(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&GalleryEvent) + 'static,
    ) -> Subscription {
        self.emitter.on(name, handler)
    }

    pub fn off(&mut self, subscription: Subscription) {
        self.emitter.off(subscription)
    }

    fn track_pan(&mut self, sample: PanSample) {
        if sample.direction == Direction::LEFT || sample.direction == Direction::RIGHT {
            self.drag_direction = Some(sample.direction);
        }

        let drag = sample.drag;
        let mut tentative = self.current_position - drag;
        if tentative <= 0.0 || tentative >= self.full_width {
            // Dragging past either end only moves half as far.
            tentative = self.current_position - drag * 0.5;
        }
        self.position = tentative;

        if !sample.is_final {
            return;
        }
        if drag.abs() >= self.options.width / 3.0 && !self.at_edge() {
            let target = if drag < 0.0 {
                self.current_slide as isize + 1
            } else {
                self.current_slide as isize - 1
            };
            self.go_to_index(target, self.options.snap_transition_ms);
        } else {
            self.tween = Some(Tween::new(
                self.position,
                self.current_position,
                self.options.snap_transition_ms,
            ));
        }
    }

    /// True when the remembered drag direction points past the first or
    /// last slide.
    fn at_edge(&self) -> bool {
        let Some(direction) = self.drag_direction else {
            return false;
        };
        (self.current_slide == 0 && direction == Direction::RIGHT)
            || (self.current_slide + 1 == self.slides.len() && direction == Direction::LEFT)
    }

    /// Animates to `slide`; indices outside the strip are ignored.
    pub fn go_to(&mut self, slide: usize, duration_ms: u64) {
        if slide >= self.slides.len() {
            return;
        }
        self.current_slide = slide;
        self.current_position = self.slides[slide].left_offset;
        self.tween = Some(Tween::new(self.position, self.current_position, duration_ms));
        log::debug!("gallery heading to slide {slide}");
        self.emitter.emit(
            "update",
            &GalleryEvent::Update {
                num_slides: self.slides.len(),
                current_slide: slide,
            },
        );
    }

    fn go_to_index(&mut self, slide: isize, duration_ms: u64) {
        if slide >= 0 {
            self.go_to(slide as usize, duration_ms);
        }
    }

    pub fn next(&mut self) {
        self.go_to_index(
            self.current_slide as isize + 1,
            self.options.snap_transition_ms,
        );
    }

    pub fn previous(&mut self) {
        self.go_to_index(
            self.current_slide as isize - 1,
            self.options.snap_transition_ms,
        );
    }

    /// Arrow-key navigation; ignored mid-transition or with shift, ctrl or
    /// alt held.
    pub fn handle_key(&mut self, key: NavKey, modifiers: Modifiers) {
        if !self.options.keyboard {
            return;
        }
        if self.tween.is_some() || modifiers.alt || modifiers.ctrl || modifiers.shift {
            return;
        }
        let target = match key {
            NavKey::ArrowLeft => self.current_slide as isize - 1,
            NavKey::ArrowRight => self.current_slide as isize + 1,
        };
        self.go_to_index(target, self.options.keyboard_transition_ms);
    }

    /// Records a new viewport width, applied at the next tick. The last
    /// width wins when several arrive within one frame.
    pub fn resize(&mut self, width: f64) {
        if !self.options.fluid {
            return;
        }
        if width <= 0.0 {
            log::warn!("ignoring resize to non-positive width {width}");
            return;
        }
        self.pending_width = Some(width);
    }

    fn apply_resize(&mut self, width: f64) {
        self.options.width = width;
        let (slides, height) =
            layout_slides(&self.images, width, self.options.max_height, self.options.margin);
        self.slides = slides;
        self.height = height;
        self.full_width = (width + self.options.margin) * (self.slides.len() as f64 - 1.0);
        // A resize interrupts any animation and re-centers the current
        // slide in the new geometry.
        self.tween = None;
        self.current_position = self.slides[self.current_slide].left_offset;
        self.position = self.current_position;
        self.last_painted = None;
        log::debug!("gallery resized to {width}x{}", self.height);
    }

    /// Advances one frame: fires due recognizer deadlines, emits `draw`
    /// (plus `ready` on the first tick), applies a pending resize and runs
    /// the active tween. Returns the paint state, or None when the frame
    /// would look exactly like the previous one.
    pub fn tick(&mut self, now: u64) -> Option<&FrameInfo> {
        if let Some(engine) = self.engine.as_mut() {
            engine.poll(now);
        }

        self.emitter.emit("draw", &GalleryEvent::Draw { timestamp: now });

        let first = !self.started;
        if first {
            self.started = true;
            self.emitter.emit(
                "ready",
                &GalleryEvent::Ready {
                    num_slides: self.slides.len(),
                    current_slide: self.current_slide,
                },
            );
        }

        if let Some(width) = self.pending_width.take() {
            self.apply_resize(width);
        }

        let animating = self.tween.is_some();
        if !first && !animating && self.last_painted == Some(self.position) {
            return None;
        }

        if let Some(tween) = self.tween.as_mut() {
            self.position = tween.advance(now);
            if tween.is_done() {
                self.tween = None;
            }
        }

        self.frame.timestamp = now;
        self.frame.position = self.position;
        self.frame.commands.clear();
        for slide in &self.slides {
            if slide.in_view(self.position) {
                self.frame.commands.push(PaintCommand {
                    image_id: slide.image_id,
                    dst: Rect {
                        x: slide.left_offset - self.position + slide.x_offset,
                        y: slide.y_offset,
                        width: slide.width,
                        height: slide.height,
                    },
                    parallax: ((slide.left_offset - self.position) * -0.25).round(),
                });
            }
        }
        self.last_painted = Some(self.position);
        Some(&self.frame)
    }

    pub fn num_slides(&self) -> usize {
        self.slides.len()
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    /// Live scroll position in strip pixels.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_transitioning(&self) -> bool {
        self.tween.is_some()
    }

    pub fn viewport_width(&self) -> f64 {
        self.options.width
    }

    pub fn viewport_height(&self) -> f64 {
        self.height
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Indices of the slides the current position keeps on screen.
    pub fn slides_in_view(&self) -> Vec<usize> {
        self.slides
            .iter()
            .enumerate()
            .filter(|(_, slide)| slide.in_view(self.position))
            .map(|(i, _)| i)
            .collect()
    }
}
