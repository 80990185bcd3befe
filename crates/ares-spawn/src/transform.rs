//! Mapping between surface pixels and world coordinates.
//!
//! The surface is square with side `extent`. World x grows to the right like
//! pixel x, but world y grows upward while pixel y grows downward, so the
//! vertical axis is flipped in both directions.

use ares_common::{PixelPoint, WorldPoint};

/// Bidirectional world/pixel transform for a square surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    outer_radius: f64,
    extent: f64,
}

impl CoordinateTransform {
    /// Creates a transform mapping the world diameter onto `extent` pixels.
    ///
    /// `extent` is clamped to at least one pixel.
    #[must_use]
    pub fn new(outer_radius: f64, extent: f64) -> Self {
        Self {
            outer_radius,
            extent: extent.max(1.0),
        }
    }

    /// Outer world radius the transform was built for.
    #[must_use]
    pub const fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Surface side length in pixels.
    #[must_use]
    pub const fn extent(&self) -> f64 {
        self.extent
    }

    /// Pixels per world unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.extent / (2.0 * self.outer_radius)
    }

    /// World point to pixel, floored to whole pixels.
    #[must_use]
    pub fn to_pixel(&self, point: WorldPoint) -> PixelPoint {
        let scale = self.scale();
        let px = ((point.x as f64 + self.outer_radius) * scale).floor();
        let py = ((self.outer_radius - point.y as f64) * scale).floor();
        PixelPoint::new(px as f32, py as f32)
    }

    /// Pixel to world point, floored to whole world units.
    ///
    /// Offsets outside the surface map to points outside the world; nothing
    /// here rejects them.
    #[must_use]
    pub fn to_world(&self, pixel: PixelPoint) -> WorldPoint {
        let per_pixel = 2.0 * self.outer_radius / self.extent;
        let wx = (f64::from(pixel.x) * per_pixel - self.outer_radius).floor();
        let wy = -(f64::from(pixel.y) * per_pixel - self.outer_radius).floor();
        WorldPoint::new(wx as i64, wy as i64)
    }

    /// Converts a world-space length into pixels.
    #[must_use]
    pub fn length_to_pixels(&self, length: f64) -> f32 {
        (length * self.scale()) as f32
    }

    /// Pixel position of the world centre.
    #[must_use]
    pub fn center(&self) -> PixelPoint {
        let half = (self.extent / 2.0) as f32;
        PixelPoint::new(half, half)
    }
}
