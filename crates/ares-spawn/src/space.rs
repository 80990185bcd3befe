//! Space types and the classifier that assigns them to world points.

use ares_common::{SpawnError, WorldPoint};
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Upper bound of the noise value range fed to the thresholds.
pub const NOISE_RANGE: f64 = 32.0;

/// Discrete terrain category of a point in space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum SpaceType {
    /// Calm inner region; the only category players may spawn in.
    #[default]
    InnerNebula = 0,
    /// Outer nebula.
    OuterNebula = 1,
    /// Deep space.
    DeepSpace = 2,
    /// Corrupted space.
    CorruptedSpace = 3,
}

impl SpaceType {
    /// All space types in ordinal order.
    pub const ALL: [Self; 4] = [
        Self::InnerNebula,
        Self::OuterNebula,
        Self::DeepSpace,
        Self::CorruptedSpace,
    ];

    /// The category spawning is permitted in.
    pub const SPAWNABLE: Self = Self::InnerNebula;

    /// Converts an ordinal (0-3) into a space type.
    pub fn from_ordinal(ordinal: u8) -> Result<Self, SpawnError> {
        Self::ALL
            .get(usize::from(ordinal))
            .copied()
            .ok_or(SpawnError::UnknownSpaceType(ordinal))
    }

    /// Returns the ordinal value.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Get the display name for this space type.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::InnerNebula => "Inner Nebula",
            Self::OuterNebula => "Outer Nebula",
            Self::DeepSpace => "Deep Space",
            Self::CorruptedSpace => "Corrupted Space",
        }
    }
}

impl TryFrom<u8> for SpaceType {
    type Error = SpawnError;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        Self::from_ordinal(ordinal)
    }
}

/// Deterministic terrain classification of world points.
///
/// The same point must always yield the same space type.
pub trait SpaceClassifier: Send + Sync {
    /// Returns the space type at `point`.
    fn space_type(&self, point: WorldPoint) -> SpaceType;
}

impl<F> SpaceClassifier for F
where
    F: Fn(WorldPoint) -> SpaceType + Send + Sync,
{
    fn space_type(&self, point: WorldPoint) -> SpaceType {
        self(point)
    }
}

/// Parameters for [`NoiseSpaceClassifier`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseClassifierConfig {
    /// Noise seed
    pub seed: u32,
    /// World units per noise period (larger = smoother regions)
    pub scale: f64,
    /// Upper bounds for inner nebula, outer nebula and deep space, in `[0, 32)`
    pub thresholds: [f64; 3],
}

impl Default for NoiseClassifierConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            scale: 4096.0,
            thresholds: [14.0, 15.0, 19.0],
        }
    }
}

/// Classifier driven by a seeded Perlin field.
pub struct NoiseSpaceClassifier {
    config: NoiseClassifierConfig,
    noise: Perlin,
}

impl std::fmt::Debug for NoiseSpaceClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseSpaceClassifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NoiseSpaceClassifier {
    /// Creates a classifier with the given config.
    #[must_use]
    pub fn new(config: NoiseClassifierConfig) -> Self {
        Self {
            noise: Perlin::new(config.seed),
            config,
        }
    }

    /// Creates a classifier with default thresholds.
    #[must_use]
    pub fn with_seed(seed: u32) -> Self {
        Self::new(NoiseClassifierConfig {
            seed,
            ..Default::default()
        })
    }

    /// Returns the classifier configuration.
    #[must_use]
    pub const fn config(&self) -> &NoiseClassifierConfig {
        &self.config
    }

    /// Raw noise value at `point`, mapped onto `[0, NOISE_RANGE)`.
    #[must_use]
    pub fn noise_value(&self, point: WorldPoint) -> f64 {
        let scale = self.config.scale.max(1.0);
        let sample = self
            .noise
            .get([point.x as f64 / scale, point.y as f64 / scale]);
        ((sample + 1.0) / 2.0 * NOISE_RANGE).clamp(0.0, NOISE_RANGE - f64::EPSILON)
    }

    /// Maps a noise value onto a space type using the configured thresholds.
    #[must_use]
    pub fn space_type_from_noise(&self, value: f64) -> SpaceType {
        let [inner, outer, deep] = self.config.thresholds;
        match value {
            v if v < inner => SpaceType::InnerNebula,
            v if v < outer => SpaceType::OuterNebula,
            v if v < deep => SpaceType::DeepSpace,
            _ => SpaceType::CorruptedSpace,
        }
    }
}

impl SpaceClassifier for NoiseSpaceClassifier {
    fn space_type(&self, point: WorldPoint) -> SpaceType {
        self.space_type_from_noise(self.noise_value(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals() {
        for (i, space) in SpaceType::ALL.iter().enumerate() {
            assert_eq!(usize::from(space.ordinal()), i);
            assert_eq!(SpaceType::from_ordinal(i as u8), Ok(*space));
        }
        assert_eq!(
            SpaceType::try_from(4),
            Err(SpawnError::UnknownSpaceType(4))
        );
    }

    #[test]
    fn test_closure_classifier() {
        let classifier = |p: WorldPoint| {
            if p.x >= 0 {
                SpaceType::InnerNebula
            } else {
                SpaceType::OuterNebula
            }
        };
        assert_eq!(
            classifier.space_type(WorldPoint::new(10, 0)),
            SpaceType::InnerNebula
        );
        assert_eq!(
            classifier.space_type(WorldPoint::new(-10, 0)),
            SpaceType::OuterNebula
        );
    }

    #[test]
    fn test_thresholds() {
        let classifier = NoiseSpaceClassifier::with_seed(7);
        assert_eq!(classifier.space_type_from_noise(0.0), SpaceType::InnerNebula);
        assert_eq!(classifier.space_type_from_noise(13.9), SpaceType::InnerNebula);
        assert_eq!(classifier.space_type_from_noise(14.0), SpaceType::OuterNebula);
        assert_eq!(classifier.space_type_from_noise(15.5), SpaceType::DeepSpace);
        assert_eq!(classifier.space_type_from_noise(19.0), SpaceType::CorruptedSpace);
        assert_eq!(classifier.space_type_from_noise(31.9), SpaceType::CorruptedSpace);
    }

    #[test]
    fn test_noise_classifier_deterministic() {
        let a = NoiseSpaceClassifier::with_seed(42);
        let b = NoiseSpaceClassifier::with_seed(42);
        for x in (-20_000..20_000).step_by(3_700) {
            for y in (-20_000..20_000).step_by(4_100) {
                let p = WorldPoint::new(x, y);
                assert_eq!(a.space_type(p), b.space_type(p));
                let value = a.noise_value(p);
                assert!((0.0..NOISE_RANGE).contains(&value));
            }
        }
    }
}
