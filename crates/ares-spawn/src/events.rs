//! Event bus for spawn selection diagnostics.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use tracing::debug;

use ares_common::WorldPoint;

use crate::validity::Validity;

/// Events published by the selection controller.
///
/// Only selection outcomes go on the bus; hover is logged instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnEvent {
    /// A click was refused
    SelectionRejected {
        /// Clicked point
        point: WorldPoint,
        /// Why it was refused
        reason: Validity,
    },
    /// A click committed the spawn point
    SelectionCommitted {
        /// Committed point
        point: WorldPoint,
    },
    /// The selection was cancelled before any commit
    SelectionAbandoned,
}

/// Bounded bus collecting [`SpawnEvent`]s until a host drains them.
#[derive(Debug)]
pub struct SpawnEventBus {
    sender: Sender<SpawnEvent>,
    receiver: Receiver<SpawnEvent>,
    capacity: usize,
}

impl Default for SpawnEventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl SpawnEventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self {
            sender,
            receiver,
            capacity: capacity.max(1),
        }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: SpawnEvent) {
        // Non-blocking send - if full, event is dropped
        if self.sender.try_send(event).is_err() {
            debug!("Spawn event bus full, dropped {event:?}");
        }
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<SpawnEvent> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Creates a new sender handle for publishing events.
    #[must_use]
    pub fn sender(&self) -> Sender<SpawnEvent> {
        self.sender.clone()
    }

    /// Creates a receiver handle that competes with [`Self::drain`] for events.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<SpawnEvent> {
        self.receiver.clone()
    }
}
