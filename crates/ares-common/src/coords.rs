//! Coordinate types for world and surface positions.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Point in world units, origin at the world centre, y pointing up.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Pod, Zeroable,
)]
#[repr(C)]
pub struct WorldPoint {
    /// X coordinate in world space
    pub x: i64,
    /// Y coordinate in world space
    pub y: i64,
}

impl WorldPoint {
    /// The world centre.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a new world point.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance from the world centre.
    ///
    /// Computed in `f64` so that points far outside the world cannot overflow.
    #[must_use]
    pub fn distance_squared(self) -> f64 {
        let x = self.x as f64;
        let y = self.y as f64;
        x * x + y * y
    }

    /// Returns true if the point lies strictly inside a circle of `radius`
    /// centred on the origin.
    #[must_use]
    pub fn is_within(self, radius: f64) -> bool {
        self.distance_squared() < radius * radius
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Point on a rendering surface, origin at the top-left, y pointing down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct PixelPoint {
    /// Horizontal offset in pixels
    pub x: f32,
    /// Vertical offset in pixels
    pub y: f32,
}

impl PixelPoint {
    /// Creates a new pixel point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
