//! World geometry: the outer disc and the central rim exclusion zone.

use ares_common::SpawnError;
use serde::{Deserialize, Serialize};

/// Source of the world's current size.
///
/// Implemented by whatever owns the live game state. Read once when a
/// minimap is created, never per pointer event.
pub trait WorldGeometryProvider {
    /// Outer world radius in world units.
    fn world_radius(&self) -> f64;

    /// Area of the central disc where spawning is forbidden.
    fn rim_area(&self) -> f64;
}

/// Immutable world geometry for one selection session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldGeometry {
    outer_radius: f64,
    rim_radius: f64,
}

impl WorldGeometry {
    /// Creates geometry from explicit radii.
    ///
    /// Fails unless `0 <= rim_radius < outer_radius` and both are finite.
    pub fn new(outer_radius: f64, rim_radius: f64) -> Result<Self, SpawnError> {
        let valid = outer_radius.is_finite()
            && rim_radius.is_finite()
            && outer_radius > 0.0
            && rim_radius >= 0.0
            && rim_radius < outer_radius;

        if !valid {
            return Err(SpawnError::InvalidGeometry {
                outer_radius,
                rim_radius,
            });
        }

        Ok(Self {
            outer_radius,
            rim_radius,
        })
    }

    /// Reads geometry from a provider. The rim radius is `sqrt(rim_area)`.
    pub fn from_provider<P: WorldGeometryProvider + ?Sized>(
        provider: &P,
    ) -> Result<Self, SpawnError> {
        let outer_radius = provider.world_radius();
        let rim_area = provider.rim_area();
        // sqrt of a negative area is NaN, which `new` rejects
        Self::new(outer_radius, rim_area.sqrt())
    }

    /// Outer world radius.
    #[must_use]
    pub const fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Radius of the central exclusion disc.
    #[must_use]
    pub const fn rim_radius(&self) -> f64 {
        self.rim_radius
    }
}

/// Geometry provider backed by fixed values, e.g. read from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedWorld {
    /// Outer world radius
    pub radius: f64,
    /// Rim exclusion area
    pub rim_area: f64,
}

impl Default for FixedWorld {
    fn default() -> Self {
        Self {
            radius: 100_000.0,
            rim_area: 100_000_000.0,
        }
    }
}

impl WorldGeometryProvider for FixedWorld {
    fn world_radius(&self) -> f64 {
        self.radius
    }

    fn rim_area(&self) -> f64 {
        self.rim_area
    }
}
