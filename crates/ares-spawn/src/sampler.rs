//! Lattice sampling of the world disc for the minimap backdrop.

use ares_common::WorldPoint;
use serde::{Deserialize, Serialize};

use crate::geometry::WorldGeometry;
use crate::space::{SpaceClassifier, SpaceType};

/// A classified lattice point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampledPoint {
    /// Lattice position
    pub world_point: WorldPoint,
    /// Classifier output at that position
    pub space_type: SpaceType,
}

/// Walks a square lattice over the world and classifies points inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSampler {
    geometry: WorldGeometry,
    step: i64,
}

impl WorldSampler {
    /// Creates a sampler. A zero step is treated as one.
    #[must_use]
    pub fn new(geometry: WorldGeometry, step: u32) -> Self {
        Self {
            geometry,
            step: i64::from(step.max(1)),
        }
    }

    /// Lattice spacing in world units.
    #[must_use]
    pub const fn step(&self) -> i64 {
        self.step
    }

    /// First lattice coordinate on each axis.
    fn lattice_start(&self) -> i64 {
        (-self.geometry.outer_radius()).ceil() as i64
    }

    /// Number of lattice coordinates per axis in `[-R, R)`.
    #[must_use]
    pub fn lattice_len(&self) -> usize {
        let start = self.lattice_start() as f64;
        let span = self.geometry.outer_radius() - start;
        (span / self.step as f64).ceil().max(0.0) as usize
    }

    /// Lazily samples the world. The sequence restarts from scratch on every call.
    pub fn sample<'a>(&self, classifier: &'a dyn SpaceClassifier) -> Samples<'a> {
        let start = self.lattice_start();
        Samples {
            classifier,
            radius: self.geometry.outer_radius(),
            step: self.step,
            start,
            x: start,
            y: start,
        }
    }
}

/// Samples the world disc at `step` spacing.
pub fn sample<'a>(
    geometry: &WorldGeometry,
    classifier: &'a dyn SpaceClassifier,
    step: u32,
) -> Samples<'a> {
    WorldSampler::new(*geometry, step).sample(classifier)
}

/// Iterator over the classified lattice points inside the world.
///
/// Walks x-major: every y for the first column, then the next column.
pub struct Samples<'a> {
    classifier: &'a dyn SpaceClassifier,
    radius: f64,
    step: i64,
    start: i64,
    x: i64,
    y: i64,
}

impl Iterator for Samples<'_> {
    type Item = SampledPoint;

    fn next(&mut self) -> Option<Self::Item> {
        while (self.x as f64) < self.radius {
            let point = WorldPoint::new(self.x, self.y);

            self.y += self.step;
            if (self.y as f64) >= self.radius {
                self.y = self.start;
                self.x += self.step;
            }

            if point.is_within(self.radius) {
                return Some(SampledPoint {
                    world_point: point,
                    space_type: self.classifier.space_type(point),
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn right_half(p: WorldPoint) -> SpaceType {
        if p.x >= 0 {
            SpaceType::InnerNebula
        } else {
            SpaceType::OuterNebula
        }
    }

    #[test]
    fn test_small_world_lattice() {
        let geometry = WorldGeometry::new(10.0, 1.0).expect("valid geometry");
        let points: Vec<_> = sample(&geometry, &right_half, 5).collect();

        // Lattice is {-10, -5, 0, 5}; the -10 column and row touch the circle.
        let expected: Vec<_> = [-5, 0, 5]
            .iter()
            .flat_map(|&x| [-5, 0, 5].iter().map(move |&y| WorldPoint::new(x, y)))
            .collect();
        let got: Vec<_> = points.iter().map(|s| s.world_point).collect();
        assert_eq!(got, expected);

        for s in &points {
            assert_eq!(s.space_type, right_half(s.world_point));
        }
    }

    #[test]
    fn test_classifier_called_once_per_retained_point() {
        let calls = AtomicUsize::new(0);
        let counting = |p: WorldPoint| {
            calls.fetch_add(1, Ordering::Relaxed);
            right_half(p)
        };
        let geometry = WorldGeometry::new(1000.0, 100.0).expect("valid geometry");
        let count = sample(&geometry, &counting, 50).count();
        assert_eq!(calls.load(Ordering::Relaxed), count);
    }

    #[test]
    fn test_sampling_is_restartable() {
        let geometry = WorldGeometry::new(3000.0, 100.0).expect("valid geometry");
        let sampler = WorldSampler::new(geometry, 250);
        let first: Vec<_> = sampler.sample(&right_half).collect();
        let second: Vec<_> = sampler.sample(&right_half).collect();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_step_is_clamped() {
        let geometry = WorldGeometry::new(3.0, 1.0).expect("valid geometry");
        let sampler = WorldSampler::new(geometry, 0);
        assert_eq!(sampler.step(), 1);
        assert_eq!(sampler.lattice_len(), 6);
        assert!(sampler.sample(&right_half).count() > 0);
    }

    #[test]
    fn test_step_larger_than_world() {
        let geometry = WorldGeometry::new(100.0, 10.0).expect("valid geometry");
        assert_eq!(sample(&geometry, &right_half, 10_000).count(), 0);
    }

    proptest! {
        #[test]
        fn prop_sampling_bound(radius in 1i64..20_000, divisions in 1i64..300) {
            let step = ((2 * radius) / divisions).max(1) as u32;
            let geometry = WorldGeometry::new(radius as f64, 0.0).expect("valid geometry");
            let r = radius as f64;
            let mut count = 0usize;
            for s in sample(&geometry, &right_half, step) {
                prop_assert!(s.world_point.distance_squared() < r * r);
                count += 1;
            }
            let bound = (2.0 * r / f64::from(step)).powi(2);
            prop_assert!(count as f64 <= bound, "{count} > {bound}");
        }
    }
}
