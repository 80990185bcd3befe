//! Hover feedback: pointer affordance and the coordinate label.

use ares_common::WorldPoint;
use serde::{Deserialize, Serialize};

use crate::config::{Palette, Rgba};
use crate::validity::Validity;

/// Label shown over points where spawning is refused.
pub const CANNOT_SPAWN_LABEL: &str = "Can't Spawn Here";

/// Pointer affordance over the minimap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cursor {
    /// Neutral pointer
    #[default]
    Default,
    /// Clickable spawn point
    Pointer,
    /// Refused spawn point
    NoDrop,
}

/// What the host should display for the current hover.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoverFeedback {
    /// Pointer affordance
    pub cursor: Cursor,
    /// Label text, empty outside the world
    pub label: String,
    /// Label color, `None` for the host's default
    pub color: Option<Rgba>,
}

impl HoverFeedback {
    /// Builds feedback for a point with the given validity.
    #[must_use]
    pub fn for_validity(point: WorldPoint, validity: Validity, palette: &Palette) -> Self {
        match validity {
            Validity::Eligible => Self {
                cursor: Cursor::Pointer,
                label: point.to_string(),
                color: Some(palette.inner_nebula),
            },
            Validity::TooCloseToCenter | Validity::WrongSpaceType => Self {
                cursor: Cursor::NoDrop,
                label: CANNOT_SPAWN_LABEL.to_string(),
                color: Some(palette.warning),
            },
            Validity::OutsideWorld => Self::default(),
        }
    }

    /// Feedback after a commit: coordinates stay visible, the pointer goes
    /// back to neutral.
    #[must_use]
    pub fn committed(point: WorldPoint, palette: &Palette) -> Self {
        Self {
            cursor: Cursor::Default,
            label: point.to_string(),
            color: Some(palette.inner_nebula),
        }
    }
}
