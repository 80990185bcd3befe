//! # Ares Spawn
//!
//! Spawn coordinate selection for a circular, procedurally classified world.
//!
//! This crate provides:
//! - World geometry and the rim exclusion zone
//! - Space types and classifiers
//! - Pixel/world coordinate transform
//! - Lattice sampling of the world for the minimap backdrop
//! - Spawn validity checks
//! - The interactive selection controller and its completion signal
//! - Configuration and a diagnostics event bus

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod controller;
pub mod events;
pub mod feedback;
pub mod geometry;
pub mod sampler;
pub mod space;
pub mod transform;
pub mod validity;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::controller::*;
    pub use crate::events::*;
    pub use crate::feedback::*;
    pub use crate::geometry::*;
    pub use crate::sampler::{SampledPoint, Samples, WorldSampler};
    pub use crate::space::*;
    pub use crate::transform::*;
    pub use crate::validity::{SpawnValidityOracle, Validity};
}

pub use prelude::*;
