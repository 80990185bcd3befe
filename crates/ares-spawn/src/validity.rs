//! Spawn eligibility of a single world point.

use std::fmt;
use std::sync::Arc;

use ares_common::WorldPoint;
use serde::{Deserialize, Serialize};

use crate::geometry::WorldGeometry;
use crate::space::{SpaceClassifier, SpaceType};

/// Outcome of checking a candidate spawn point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Validity {
    /// Inside the central rim.
    TooCloseToCenter,
    /// On or beyond the outer world radius.
    OutsideWorld,
    /// Inside the world and outside the rim, but not a spawnable space type.
    WrongSpaceType,
    /// A valid spawn point.
    Eligible,
}

impl Validity {
    /// Returns true for [`Validity::Eligible`].
    #[must_use]
    pub const fn is_eligible(self) -> bool {
        matches!(self, Self::Eligible)
    }

    /// Short reason used in diagnostics.
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::TooCloseToCenter => "too close to the centre",
            Self::OutsideWorld => "outside the world",
            Self::WrongSpaceType => "not inner nebula",
            Self::Eligible => "eligible",
        }
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Classifies `point` against the world geometry and space type.
///
/// First match wins: rim, then outer radius, then space type. The classifier
/// is only consulted for points in the annulus.
pub fn classify(
    point: WorldPoint,
    geometry: &WorldGeometry,
    classifier: &dyn SpaceClassifier,
) -> Validity {
    if point.is_within(geometry.rim_radius()) {
        Validity::TooCloseToCenter
    } else if !point.is_within(geometry.outer_radius()) {
        Validity::OutsideWorld
    } else if classifier.space_type(point) != SpaceType::SPAWNABLE {
        Validity::WrongSpaceType
    } else {
        Validity::Eligible
    }
}

/// Spawn predicate bound to one world and classifier.
///
/// Holds no cache: every call re-runs the full check.
#[derive(Clone)]
pub struct SpawnValidityOracle {
    geometry: WorldGeometry,
    classifier: Arc<dyn SpaceClassifier>,
}

impl fmt::Debug for SpawnValidityOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpawnValidityOracle")
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

impl SpawnValidityOracle {
    /// Creates an oracle for the given world.
    #[must_use]
    pub fn new(geometry: WorldGeometry, classifier: Arc<dyn SpaceClassifier>) -> Self {
        Self {
            geometry,
            classifier,
        }
    }

    /// Classifies a candidate spawn point.
    #[must_use]
    pub fn classify(&self, point: WorldPoint) -> Validity {
        classify(point, &self.geometry, self.classifier.as_ref())
    }

    /// World geometry the oracle checks against.
    #[must_use]
    pub const fn geometry(&self) -> &WorldGeometry {
        &self.geometry
    }

    /// Space classifier the oracle consults.
    #[must_use]
    pub fn classifier(&self) -> &dyn SpaceClassifier {
        self.classifier.as_ref()
    }
}
