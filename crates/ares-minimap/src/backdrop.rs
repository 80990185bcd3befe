//! Static minimap backdrop: sampled space types, world outline, rim and logo.

use ares_spawn::{CoordinateTransform, SampledPoint, SpawnConfig, WorldGeometry};
use image::RgbaImage;
use tracing::info;

use crate::surface::RenderSurface;

/// Fraction of the on-screen world radius covered by the centre logo.
pub const LOGO_SCALE: f32 = 0.8;

/// Paints the backdrop onto a surface. Runs once per mount.
#[derive(Debug, Clone, Copy)]
pub struct BackdropPainter<'a> {
    config: &'a SpawnConfig,
    geometry: WorldGeometry,
    transform: CoordinateTransform,
}

impl<'a> BackdropPainter<'a> {
    /// Creates a painter for one world and surface layout.
    #[must_use]
    pub fn new(
        config: &'a SpawnConfig,
        geometry: WorldGeometry,
        transform: CoordinateTransform,
    ) -> Self {
        Self {
            config,
            geometry,
            transform,
        }
    }

    /// Clears the surface and draws the whole backdrop.
    ///
    /// Returns the number of sample dots drawn.
    pub fn paint<S, I>(&self, surface: &mut S, samples: I, logo: Option<&RgbaImage>) -> usize
    where
        S: RenderSurface + ?Sized,
        I: IntoIterator<Item = SampledPoint>,
    {
        surface.clear(self.config.palette.background);
        let count = self.paint_samples(surface, samples);
        self.paint_outline(surface);
        self.paint_rim(surface);
        if let Some(logo) = logo {
            self.paint_logo(surface, logo);
        }
        info!("Painted minimap backdrop with {count} samples");
        count
    }

    /// One square dot per sample, centred on its pixel.
    pub fn paint_samples<S, I>(&self, surface: &mut S, samples: I) -> usize
    where
        S: RenderSurface + ?Sized,
        I: IntoIterator<Item = SampledPoint>,
    {
        let dot = self.config.dot_size;
        let mut count = 0;
        for sample in samples {
            let pixel = self.transform.to_pixel(sample.world_point);
            let color = self.config.palette.space_color(sample.space_type);
            let left = pixel.x + 0.5 - dot / 2.0;
            let top = pixel.y + 0.5 - dot / 2.0;
            surface.fill_rect(left, top, dot, dot, color);
            count += 1;
        }
        count
    }

    /// World boundary circle.
    pub fn paint_outline<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        let radius = self.transform.length_to_pixels(self.geometry.outer_radius());
        surface.stroke_circle(
            self.transform.center(),
            radius,
            self.config.outline_width,
            self.config.palette.boundary,
        );
    }

    /// Filled rim disc.
    pub fn paint_rim<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        let radius = self.transform.length_to_pixels(self.geometry.rim_radius());
        if radius > 0.0 {
            surface.fill_circle(self.transform.center(), radius, self.config.palette.rim);
        }
    }

    /// Logo centred on the world.
    pub fn paint_logo<S: RenderSurface + ?Sized>(&self, surface: &mut S, logo: &RgbaImage) {
        let side = self.transform.length_to_pixels(self.geometry.outer_radius()) * LOGO_SCALE;
        let center = self.transform.center();
        surface.blit(
            logo,
            center.x - side / 2.0,
            center.y - side / 2.0,
            side,
            side,
        );
    }
}
