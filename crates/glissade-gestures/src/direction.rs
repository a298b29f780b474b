//! Movement direction bitmask.
//!
//! Recognizer options take combined masks (for example [`Direction::HORIZONTAL`])
//! while computed input records carry the single direction that best matches the
//! current motion.

use std::ops::BitOr;

/// Bitmask of movement directions.
///
/// `NONE` is a real bit rather than an empty mask so that "no movement" can be
/// matched and combined like any other direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Direction(u8);

impl Direction {
    pub const NONE: Self = Self(1);
    pub const LEFT: Self = Self(2);
    pub const RIGHT: Self = Self(4);
    pub const UP: Self = Self(8);
    pub const DOWN: Self = Self(16);
    pub const HORIZONTAL: Self = Self(2 | 4);
    pub const VERTICAL: Self = Self(8 | 16);
    pub const ALL: Self = Self(2 | 4 | 8 | 16);

    /// Dominant direction of a displacement.
    ///
    /// Equal components (including the at-rest 0,0 case) resolve to `NONE`;
    /// otherwise the axis with the larger magnitude wins, with the horizontal
    /// axis taking ties.
    pub fn from_delta(dx: f32, dy: f32) -> Self {
        if dx == dy {
            return Self::NONE;
        }
        if dx.abs() >= dy.abs() {
            if dx < 0.0 {
                Self::LEFT
            } else {
                Self::RIGHT
            }
        } else if dy < 0.0 {
            Self::UP
        } else {
            Self::DOWN
        }
    }

    pub fn contains(&self, other: Direction) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn intersects(&self, other: Direction) -> bool {
        (self.0 & other.0) != 0
    }

    /// Lowercase label used when composing directional event names
    /// (`panleft`, `swiperight`, ...). Combined masks and `NONE` have none.
    pub fn label(&self) -> Option<&'static str> {
        match *self {
            Self::LEFT => Some("left"),
            Self::RIGHT => Some("right"),
            Self::UP => Some("up"),
            Self::DOWN => Some("down"),
            _ => None,
        }
    }
}

impl BitOr for Direction {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}
