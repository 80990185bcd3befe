//! # Ares Minimap
//!
//! Minimap spawn picker for the DFARES client.
//!
//! This crate provides:
//! - Drawing primitives and a CPU raster canvas
//! - The static backdrop painter
//! - Host containers (headless and egui) and the pointer event source
//! - The spawn plugin tying sampling, rendering and selection together

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod backdrop;
pub mod egui_host;
pub mod host;
pub mod plugin;
pub mod raster;
pub mod surface;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::backdrop::*;
    pub use crate::egui_host::*;
    pub use crate::host::*;
    pub use crate::plugin::*;
    pub use crate::raster::*;
    pub use crate::surface::*;
}

pub use prelude::*;
