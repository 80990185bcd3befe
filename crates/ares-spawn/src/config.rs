//! Spawn picker configuration.
//!
//! Surface size, sampling density and palette. Configuration can be loaded
//! from and saved to a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::space::{NoiseClassifierConfig, SpaceType};

/// RGBA color.
pub type Rgba = [u8; 4];

/// Colors used by the backdrop and the hover label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Inner nebula dots and the eligible label
    pub inner_nebula: Rgba,
    /// Outer nebula dots
    pub outer_nebula: Rgba,
    /// Deep space dots
    pub deep_space: Rgba,
    /// Corrupted space dots
    pub corrupted_space: Rgba,
    /// World boundary outline
    pub boundary: Rgba,
    /// Rim disc fill
    pub rim: Rgba,
    /// "Can't spawn here" label
    pub warning: Rgba,
    /// Cleared surface
    pub background: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            inner_nebula: [0x00, 0xAD, 0xE1, 255],
            outer_nebula: [0x50, 0x50, 0x50, 255],
            deep_space: [0x50, 0x50, 0x50, 255],
            corrupted_space: [0x50, 0x50, 0x50, 255],
            boundary: [255, 192, 203, 255],
            rim: [255, 180, 193, 255],
            warning: [255, 192, 203, 255],
            background: [0, 0, 0, 0],
        }
    }
}

impl Palette {
    /// Backdrop color for a space type.
    #[must_use]
    pub const fn space_color(&self, space: SpaceType) -> Rgba {
        match space {
            SpaceType::InnerNebula => self.inner_nebula,
            SpaceType::OuterNebula => self.outer_nebula,
            SpaceType::DeepSpace => self.deep_space,
            SpaceType::CorruptedSpace => self.corrupted_space,
        }
    }
}

/// Spawn picker configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Surface side in pixels
    pub canvas_size: u32,
    /// Pixels left unused at the right and bottom edges
    pub edge_margin: u32,
    /// Lattice spacing in world units
    pub sample_step: u32,
    /// Side of the square drawn per sample
    pub dot_size: f32,
    /// Stroke width of the world boundary
    pub outline_width: f32,
    /// Label font size
    pub label_font_size: f32,
    /// Colors
    pub palette: Palette,
    /// Space classifier parameters
    pub classifier: NoiseClassifierConfig,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            canvas_size: 600,
            edge_margin: 18,
            sample_step: 1500,
            dot_size: 5.5,
            outline_width: 4.0,
            label_font_size: 20.0,
            palette: Palette::default(),
            classifier: NoiseClassifierConfig::default(),
        }
    }
}

impl SpawnConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Spawn config not found at {}, using defaults", path.display());
            return Self::default();
        }

        let mut contents = String::new();
        match fs::File::open(path).and_then(|mut file| file.read_to_string(&mut contents)) {
            Ok(_) => match toml::from_str::<Self>(&contents) {
                Ok(mut config) => {
                    config.validate();
                    info!("Loaded spawn config from {}", path.display());
                    config
                },
                Err(e) => {
                    warn!("Failed to parse spawn config: {e}");
                    Self::default()
                },
            },
            Err(e) => {
                warn!("Failed to read spawn config: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved spawn config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.canvas_size = self.canvas_size.clamp(64, 4096);
        self.edge_margin = self.edge_margin.min(self.canvas_size / 2);
        self.sample_step = self.sample_step.max(1);
        self.dot_size = self.dot_size.clamp(0.5, 64.0);
        self.outline_width = self.outline_width.clamp(0.0, 32.0);
        self.label_font_size = self.label_font_size.clamp(8.0, 72.0);
        self.classifier.scale = self.classifier.scale.max(1.0);
    }

    /// Side length the world diameter is mapped onto.
    #[must_use]
    pub fn extent(&self) -> f64 {
        f64::from(self.canvas_size.saturating_sub(self.edge_margin).max(1))
    }
}
