//! Binary configuration: world, picker settings and scripted input.

use std::fs;
use std::path::{Path, PathBuf};

use ares_common::PixelPoint;
use ares_minimap::PointerEvent;
use ares_spawn::{FixedWorld, SpawnConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "ares.toml";

/// One scripted pointer input, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptedPointer {
    /// Pointer move
    Move {
        /// Horizontal offset
        x: f32,
        /// Vertical offset
        y: f32,
    },
    /// Click
    Click {
        /// Horizontal offset
        x: f32,
        /// Vertical offset
        y: f32,
    },
}

impl From<ScriptedPointer> for PointerEvent {
    fn from(input: ScriptedPointer) -> Self {
        match input {
            ScriptedPointer::Move { x, y } => Self::Moved(PixelPoint::new(x, y)),
            ScriptedPointer::Click { x, y } => Self::Clicked(PixelPoint::new(x, y)),
        }
    }
}

/// Binary configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World geometry
    pub world: FixedWorld,
    /// Picker settings
    pub spawn: SpawnConfig,
    /// Optional logo drawn at the world centre
    pub logo: Option<PathBuf>,
    /// Where to write the rendered backdrop
    pub backdrop_png: Option<PathBuf>,
    /// Pointer input to replay; empty means click the first eligible sample
    pub script: Vec<ScriptedPointer>,
}

impl EngineConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(mut config) => {
                    config.spawn.validate();
                    info!("Loaded config from {}", path.display());
                    config
                },
                Err(e) => {
                    warn!("Failed to parse config file: {e}");
                    Self::default()
                },
            },
            Err(e) => {
                warn!("Failed to read config file: {e}");
                Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.script.is_empty());
        assert!(config.backdrop_png.is_none());
        assert_eq!(config.spawn.canvas_size, 600);
    }

    #[test]
    fn test_load_script() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("ares.toml");
        fs::write(
            &path,
            r#"
backdrop_png = "out.png"

[world]
radius = 5000.0
rim_area = 250000.0

[spawn]
sample_step = 250

[[script]]
kind = "move"
x = 10.0
y = 20.0

[[script]]
kind = "click"
x = 10.0
y = 20.0
"#,
        )
        .expect("Failed to write config");

        let config = EngineConfig::load_from(&path);
        assert!((config.world.radius - 5000.0).abs() < f64::EPSILON);
        assert_eq!(config.spawn.sample_step, 250);
        assert_eq!(config.backdrop_png, Some(PathBuf::from("out.png")));
        assert_eq!(
            config.script,
            vec![
                ScriptedPointer::Move { x: 10.0, y: 20.0 },
                ScriptedPointer::Click { x: 10.0, y: 20.0 },
            ]
        );
        assert_eq!(
            PointerEvent::from(config.script[1]),
            PointerEvent::Clicked(PixelPoint::new(10.0, 20.0))
        );
    }

    #[test]
    fn test_load_missing_file() {
        assert_eq!(
            EngineConfig::load_from("/nonexistent/ares.toml"),
            EngineConfig::default()
        );
    }
}
