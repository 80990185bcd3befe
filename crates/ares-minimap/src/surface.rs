//! Drawing primitives the backdrop painter renders through.

use ares_common::PixelPoint;
use ares_spawn::Rgba;
use image::RgbaImage;

/// A fixed-size pixel canvas.
///
/// Coordinates are in pixels from the top-left corner. Drawing outside the
/// canvas is clipped, never an error.
pub trait RenderSurface {
    /// Canvas width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Overwrites every pixel with `color`.
    fn clear(&mut self, color: Rgba);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba);

    /// Fills a disc.
    fn fill_circle(&mut self, center: PixelPoint, radius: f32, color: Rgba);

    /// Strokes a circle outline of the given line width.
    fn stroke_circle(&mut self, center: PixelPoint, radius: f32, width: f32, color: Rgba);

    /// Draws `image` scaled into the given rectangle.
    fn blit(&mut self, image: &RgbaImage, x: f32, y: f32, width: f32, height: f32);
}
