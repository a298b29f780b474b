//! Keyboard navigation input.

/// Navigation keys the gallery reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
}

/// Modifier state at the time of the key press. Shift, ctrl and alt
/// suppress navigation so host shortcuts keep working; meta does not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}
