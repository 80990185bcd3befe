//! CPU raster canvas backed by an `image::RgbaImage`.

use std::path::Path;

use ares_common::{AresError, AresResult, PixelPoint};
use ares_spawn::Rgba;
use image::{imageops, ImageFormat, Pixel, RgbaImage};
use tracing::info;

use crate::surface::RenderSurface;

/// Software canvas with source-over alpha blending and no anti-aliasing.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    /// Creates a transparent square canvas.
    #[must_use]
    pub fn new(side: u32) -> Self {
        Self::with_size(side, side)
    }

    /// Creates a transparent canvas of the given size.
    #[must_use]
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    /// Color at a pixel, `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Underlying image.
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the canvas, returning the image.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Writes the canvas as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> AresResult<()> {
        let path = path.as_ref();
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| AresError::Image(e.to_string()))?;
        info!("Saved minimap to {}", path.display());
        Ok(())
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(pixel) = self.image.get_pixel_mut_checked(x as u32, y as u32) {
            match color[3] {
                0 => {},
                255 => *pixel = image::Rgba(color),
                _ => pixel.blend(&image::Rgba(color)),
            }
        }
    }

    /// Pixel rows and columns whose centres fall inside `[min, max)`, clipped.
    fn span(min: f32, max: f32, limit: u32) -> std::ops::Range<i64> {
        let start = (min - 0.5).ceil().max(0.0) as i64;
        let end = ((max - 0.5).ceil() as i64).min(i64::from(limit));
        start..end.max(start)
    }

    /// Blends `color` into every pixel whose centre satisfies `inside`.
    fn fill_where(
        &mut self,
        bounds: (f32, f32, f32, f32),
        color: Rgba,
        inside: impl Fn(f32, f32) -> bool,
    ) {
        let (width, height) = self.size();
        let (min_x, min_y, max_x, max_y) = bounds;
        for y in Self::span(min_y, max_y, height) {
            for x in Self::span(min_x, max_x, width) {
                if inside(x as f32 + 0.5, y as f32 + 0.5) {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

impl RenderSurface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self, color: Rgba) {
        for pixel in self.image.pixels_mut() {
            *pixel = image::Rgba(color);
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        self.fill_where((x, y, x + width, y + height), color, |_, _| true);
    }

    fn fill_circle(&mut self, center: PixelPoint, radius: f32, color: Rgba) {
        let r2 = radius * radius;
        self.fill_where(
            (
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            ),
            color,
            |px, py| {
                let dx = px - center.x;
                let dy = py - center.y;
                dx * dx + dy * dy <= r2
            },
        );
    }

    fn stroke_circle(&mut self, center: PixelPoint, radius: f32, width: f32, color: Rgba) {
        let half = (width / 2.0).max(0.5);
        let inner = (radius - half).max(0.0);
        let outer = radius + half;
        self.fill_where(
            (
                center.x - outer,
                center.y - outer,
                center.x + outer,
                center.y + outer,
            ),
            color,
            |px, py| {
                let dx = px - center.x;
                let dy = py - center.y;
                let d2 = dx * dx + dy * dy;
                d2 >= inner * inner && d2 <= outer * outer
            },
        );
    }

    fn blit(&mut self, image: &RgbaImage, x: f32, y: f32, width: f32, height: f32) {
        let width = width.round();
        let height = height.round();
        if width < 1.0 || height < 1.0 {
            return;
        }
        let scaled = imageops::resize(
            image,
            width as u32,
            height as u32,
            imageops::FilterType::Triangle,
        );
        imageops::overlay(&mut self.image, &scaled, x.round() as i64, y.round() as i64);
    }
}
