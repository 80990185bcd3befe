//! Interactive spawn selection state machine.
//!
//! The controller turns pointer-move and click events on the minimap into
//! hover feedback and, eventually, one committed spawn point. Commitment is
//! terminal: later hovers and clicks are ignored.
//!
//! Waiters are woken through a `watch` channel, so `await_selection` never
//! polls and works on any executor. Cancelling (or tearing down, or dropping
//! the controller) before a commit resolves every waiter with
//! [`SpawnError::SelectionAbandoned`].

use std::future::Future;
use std::sync::Arc;

use ares_common::{PixelPoint, SpawnError, WorldPoint};
use crossbeam_channel::Sender;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::Palette;
use crate::events::{SpawnEvent, SpawnEventBus};
use crate::feedback::HoverFeedback;
use crate::geometry::WorldGeometry;
use crate::space::SpaceClassifier;
use crate::transform::CoordinateTransform;
use crate::validity::{SpawnValidityOracle, Validity};

/// Where the controller is in the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No point considered yet
    #[default]
    Idle,
    /// Pointer is over a point
    Hovering {
        /// Point under the pointer
        point: WorldPoint,
        /// Validity computed for that point
        validity: Validity,
    },
    /// A valid point was clicked
    Committed(WorldPoint),
}

/// Result of a click event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click committed this point
    Committed(WorldPoint),
    /// The click was refused
    Rejected {
        /// Clicked point
        point: WorldPoint,
        /// Why it was refused
        reason: Validity,
    },
    /// The selection was already resolved
    Ignored,
}

/// Value carried by the completion channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Pending,
    Committed(WorldPoint),
    Abandoned,
}

/// Moves a pending resolution to `outcome`. Returns false if already resolved.
fn settle(sender: &watch::Sender<Resolution>, outcome: Resolution) -> bool {
    sender.send_if_modified(|current| {
        if *current == Resolution::Pending {
            *current = outcome;
            true
        } else {
            false
        }
    })
}

/// Interactive spawn point selection.
#[derive(Debug)]
pub struct SelectionController {
    oracle: SpawnValidityOracle,
    transform: CoordinateTransform,
    palette: Palette,
    state: SelectionState,
    resolution: Arc<watch::Sender<Resolution>>,
    events: SpawnEventBus,
}

impl SelectionController {
    /// Creates a controller from its two collaborators.
    #[must_use]
    pub fn new(oracle: SpawnValidityOracle, transform: CoordinateTransform) -> Self {
        let (resolution, _) = watch::channel(Resolution::Pending);
        Self {
            oracle,
            transform,
            palette: Palette::default(),
            state: SelectionState::Idle,
            resolution: Arc::new(resolution),
            events: SpawnEventBus::default(),
        }
    }

    /// Creates a controller for a world drawn onto a surface of side `extent`.
    #[must_use]
    pub fn for_world(
        geometry: WorldGeometry,
        classifier: Arc<dyn SpaceClassifier>,
        extent: f64,
    ) -> Self {
        let transform = CoordinateTransform::new(geometry.outer_radius(), extent);
        Self::new(SpawnValidityOracle::new(geometry, classifier), transform)
    }

    /// Uses `palette` for hover feedback colors.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SelectionState {
        self.state
    }

    /// The committed point, if any.
    #[must_use]
    pub const fn committed_point(&self) -> Option<WorldPoint> {
        match self.state {
            SelectionState::Committed(point) => Some(point),
            _ => None,
        }
    }

    /// Returns true once a point has been committed.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.committed_point().is_some()
    }

    /// Returns true while neither committed nor abandoned.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        *self.resolution.borrow() == Resolution::Pending
    }

    /// Pixel/world transform in use.
    #[must_use]
    pub const fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    /// Validity oracle in use.
    #[must_use]
    pub const fn oracle(&self) -> &SpawnValidityOracle {
        &self.oracle
    }

    /// Diagnostics bus.
    #[must_use]
    pub const fn events(&self) -> &SpawnEventBus {
        &self.events
    }

    /// Handles a pointer move at a surface offset.
    ///
    /// Returns the feedback to display, or `None` once the selection is
    /// resolved.
    pub fn on_pointer_move(&mut self, pixel: PixelPoint) -> Option<HoverFeedback> {
        let point = self.transform.to_world(pixel);
        self.hover_at(point)
    }

    /// Handles a click at a surface offset.
    pub fn on_click(&mut self, pixel: PixelPoint) -> ClickOutcome {
        let point = self.transform.to_world(pixel);
        self.click_at(point)
    }

    /// Hovers a world point directly.
    pub fn hover_at(&mut self, point: WorldPoint) -> Option<HoverFeedback> {
        if !self.is_pending() {
            return None;
        }

        let validity = self.oracle.classify(point);
        debug!("Hovering {point}: {validity}");
        self.state = SelectionState::Hovering { point, validity };

        Some(HoverFeedback::for_validity(point, validity, &self.palette))
    }

    /// Clicks a world point directly.
    ///
    /// Validity is recomputed here, never taken from the last hover.
    pub fn click_at(&mut self, point: WorldPoint) -> ClickOutcome {
        if !self.is_pending() {
            return ClickOutcome::Ignored;
        }

        let validity = self.oracle.classify(point);
        if !validity.is_eligible() {
            warn!("Spawn selection rejected at {point}: {validity}");
            self.events.publish(SpawnEvent::SelectionRejected {
                point,
                reason: validity,
            });
            return ClickOutcome::Rejected {
                point,
                reason: validity,
            };
        }

        if !settle(&self.resolution, Resolution::Committed(point)) {
            return ClickOutcome::Ignored;
        }

        info!("Spawn point committed at {point}");
        self.state = SelectionState::Committed(point);
        self.events.publish(SpawnEvent::SelectionCommitted { point });
        ClickOutcome::Committed(point)
    }

    /// Returns a handle that resolves with the committed point.
    #[must_use]
    pub fn pending_selection(&self) -> PendingSelection {
        PendingSelection {
            receiver: self.resolution.subscribe(),
        }
    }

    /// Waits for the committed point.
    ///
    /// The returned future does not borrow the controller, so events can keep
    /// flowing while it is pending. Once committed, every call resolves
    /// immediately to the same point.
    pub fn await_selection(
        &self,
    ) -> impl Future<Output = Result<WorldPoint, SpawnError>> + Send + 'static {
        self.pending_selection().wait()
    }

    /// Returns a handle that can abandon the selection from elsewhere.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            resolution: Arc::clone(&self.resolution),
            events: self.events.sender(),
        }
    }

    /// Releases the selection. A committed point stays committed; anything
    /// else is abandoned and hover state is cleared.
    pub fn teardown(&mut self) {
        if self.is_committed() {
            return;
        }
        self.state = SelectionState::Idle;
        if settle(&self.resolution, Resolution::Abandoned) {
            info!("Spawn selection torn down before commit");
            self.events.publish(SpawnEvent::SelectionAbandoned);
        }
    }
}

impl Drop for SelectionController {
    fn drop(&mut self) {
        // Cancel handles keep the channel alive; waiters must still be released.
        settle(&self.resolution, Resolution::Abandoned);
    }
}

/// Cloneable handle that abandons a pending selection.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    resolution: Arc<watch::Sender<Resolution>>,
    events: Sender<SpawnEvent>,
}

impl CancelHandle {
    /// Abandons the selection. Returns false if it was already resolved.
    pub fn cancel(&self) -> bool {
        let cancelled = settle(&self.resolution, Resolution::Abandoned);
        if cancelled {
            info!("Spawn selection cancelled");
            let _ = self.events.try_send(SpawnEvent::SelectionAbandoned);
        }
        cancelled
    }

    /// Returns true if the selection was abandoned.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.resolution.borrow() == Resolution::Abandoned
    }
}

/// A pending wait for the committed spawn point.
#[derive(Debug, Clone)]
pub struct PendingSelection {
    receiver: watch::Receiver<Resolution>,
}

impl PendingSelection {
    /// The committed point, without waiting.
    #[must_use]
    pub fn try_get(&self) -> Option<WorldPoint> {
        match *self.receiver.borrow() {
            Resolution::Committed(point) => Some(point),
            _ => None,
        }
    }

    /// Waits until the selection is committed or abandoned.
    pub async fn wait(mut self) -> Result<WorldPoint, SpawnError> {
        let resolution = self
            .receiver
            .wait_for(|r| *r != Resolution::Pending)
            .await
            .map(|r| *r)
            .map_err(|_| SpawnError::SelectionAbandoned)?;

        match resolution {
            Resolution::Committed(point) => Ok(point),
            Resolution::Pending | Resolution::Abandoned => Err(SpawnError::SelectionAbandoned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{Cursor, CANNOT_SPAWN_LABEL};
    use crate::space::SpaceType;
    use proptest::prelude::*;

    fn right_half(p: WorldPoint) -> SpaceType {
        if p.x >= 0 {
            SpaceType::InnerNebula
        } else {
            SpaceType::OuterNebula
        }
    }

    fn controller() -> SelectionController {
        let geometry = WorldGeometry::new(1000.0, 100.0).expect("valid geometry");
        SelectionController::for_world(geometry, Arc::new(right_half), 2000.0)
    }

    #[test]
    fn test_starts_idle() {
        let controller = controller();
        assert_eq!(controller.state(), SelectionState::Idle);
        assert!(controller.is_pending());
        assert!(controller.pending_selection().try_get().is_none());
    }

    #[test]
    fn test_hover_updates_state_and_feedback() {
        let mut controller = controller();

        let feedback = controller
            .hover_at(WorldPoint::new(150, 0))
            .expect("pending controller gives feedback");
        assert_eq!(feedback.cursor, Cursor::Pointer);
        assert_eq!(feedback.label, "(150,0)");
        assert_eq!(
            controller.state(),
            SelectionState::Hovering {
                point: WorldPoint::new(150, 0),
                validity: Validity::Eligible,
            }
        );

        let feedback = controller
            .hover_at(WorldPoint::new(50, 0))
            .expect("pending controller gives feedback");
        assert_eq!(feedback.cursor, Cursor::NoDrop);
        assert_eq!(feedback.label, CANNOT_SPAWN_LABEL);

        let feedback = controller
            .hover_at(WorldPoint::new(1500, 0))
            .expect("pending controller gives feedback");
        assert_eq!(feedback.cursor, Cursor::Default);
        assert!(feedback.label.is_empty());
        assert!(!controller.is_committed());
    }

    #[test]
    fn test_pixel_events_use_transform() {
        let mut controller = controller();
        // extent 2000 over a 1000 radius world: one pixel per unit.
        let outcome = controller.on_click(PixelPoint::new(1150.0, 1000.0));
        assert_eq!(outcome, ClickOutcome::Committed(WorldPoint::new(150, 0)));
    }

    #[test]
    fn test_off_surface_click_is_outside_world() {
        let mut controller = controller();
        let outcome = controller.on_click(PixelPoint::new(-500.0, 5000.0));
        assert!(matches!(
            outcome,
            ClickOutcome::Rejected {
                reason: Validity::OutsideWorld,
                ..
            }
        ));
    }

    #[test]
    fn test_rejected_clicks_keep_pending() {
        let mut controller = controller();
        controller.hover_at(WorldPoint::new(150, 0));

        for (point, reason) in [
            (WorldPoint::new(50, 0), Validity::TooCloseToCenter),
            (WorldPoint::new(-150, 0), Validity::WrongSpaceType),
            (WorldPoint::new(1500, 0), Validity::OutsideWorld),
        ] {
            assert_eq!(
                controller.click_at(point),
                ClickOutcome::Rejected { point, reason }
            );
        }

        assert!(controller.is_pending());
        assert!(matches!(
            controller.state(),
            SelectionState::Hovering { .. }
        ));

        let rejected = controller
            .events()
            .drain()
            .into_iter()
            .filter(|e| matches!(e, SpawnEvent::SelectionRejected { .. }))
            .count();
        assert_eq!(rejected, 3);
    }

    #[test]
    fn test_outcomes_survive_hover_flood() {
        let mut controller = controller();
        assert!(controller.events().capacity() < 300);
        for x in 0..300 {
            controller.hover_at(WorldPoint::new(x, 0));
        }
        assert_eq!(controller.events().pending_count(), 0);

        controller.click_at(WorldPoint::new(50, 0));
        controller.click_at(WorldPoint::new(150, 0));

        assert_eq!(
            controller.events().drain(),
            vec![
                SpawnEvent::SelectionRejected {
                    point: WorldPoint::new(50, 0),
                    reason: Validity::TooCloseToCenter,
                },
                SpawnEvent::SelectionCommitted {
                    point: WorldPoint::new(150, 0),
                },
            ]
        );
    }

    #[test]
    fn test_click_ignores_stale_hover() {
        let mut controller = controller();
        controller.hover_at(WorldPoint::new(150, 0));
        // Pointer raced into the rim before the click landed.
        assert_eq!(
            controller.click_at(WorldPoint::new(10, 0)),
            ClickOutcome::Rejected {
                point: WorldPoint::new(10, 0),
                reason: Validity::TooCloseToCenter,
            }
        );
        assert!(!controller.is_committed());
    }

    #[test]
    fn test_commit_is_terminal() {
        let mut controller = controller();
        let point = WorldPoint::new(150, 0);
        assert_eq!(controller.click_at(point), ClickOutcome::Committed(point));

        assert!(controller.hover_at(WorldPoint::new(50, 0)).is_none());
        assert_eq!(
            controller.click_at(WorldPoint::new(300, 0)),
            ClickOutcome::Ignored
        );
        assert_eq!(controller.state(), SelectionState::Committed(point));

        controller.teardown();
        assert_eq!(controller.state(), SelectionState::Committed(point));
        assert!(!controller.cancel_handle().cancel());
    }

    #[test]
    fn test_await_selection_is_idempotent() {
        let mut controller = controller();
        let waiter = controller.await_selection();
        let pending = controller.pending_selection();

        controller.click_at(WorldPoint::new(400, 300));

        let expected = Ok(WorldPoint::new(400, 300));
        assert_eq!(pollster::block_on(waiter), expected);
        assert_eq!(pollster::block_on(controller.await_selection()), expected);
        assert_eq!(pollster::block_on(controller.await_selection()), expected);
        assert_eq!(pending.try_get(), Some(WorldPoint::new(400, 300)));
        assert_eq!(pollster::block_on(pending.wait()), expected);
    }

    #[test]
    fn test_cancel_releases_waiters() {
        let mut controller = controller();
        let waiter = controller.await_selection();
        let handle = controller.cancel_handle();

        assert!(handle.cancel());
        assert!(handle.is_cancelled());
        assert!(!handle.cancel());
        assert_eq!(
            pollster::block_on(waiter),
            Err(SpawnError::SelectionAbandoned)
        );

        // Abandoned selections ignore further input.
        assert_eq!(
            controller.click_at(WorldPoint::new(150, 0)),
            ClickOutcome::Ignored
        );
        assert!(controller
            .events()
            .drain()
            .contains(&SpawnEvent::SelectionAbandoned));
    }

    #[test]
    fn test_teardown_before_commit_abandons() {
        let mut controller = controller();
        controller.hover_at(WorldPoint::new(150, 0));
        let waiter = controller.await_selection();

        controller.teardown();

        assert_eq!(controller.state(), SelectionState::Idle);
        assert_eq!(
            pollster::block_on(waiter),
            Err(SpawnError::SelectionAbandoned)
        );
    }

    #[test]
    fn test_drop_releases_waiters_despite_cancel_handle() {
        let controller = controller();
        let waiter = controller.await_selection();
        let handle = controller.cancel_handle();
        drop(controller);

        assert!(handle.is_cancelled());
        assert_eq!(
            pollster::block_on(waiter),
            Err(SpawnError::SelectionAbandoned)
        );
    }

    #[test]
    fn test_waiter_on_another_thread() {
        let mut controller = controller();
        let waiter = controller.await_selection();
        let thread = std::thread::spawn(move || pollster::block_on(waiter));

        controller.click_at(WorldPoint::new(-150, 0));
        controller.click_at(WorldPoint::new(0, 150));

        let result = thread.join().expect("waiter thread panicked");
        assert_eq!(result, Ok(WorldPoint::new(0, 150)));
    }

    #[derive(Debug, Clone, Copy)]
    enum Input {
        Move(i64, i64),
        Click(i64, i64),
    }

    fn input() -> impl Strategy<Value = Input> {
        prop_oneof![
            (-1200i64..1200, -1200i64..1200).prop_map(|(x, y)| Input::Move(x, y)),
            (-1200i64..1200, -1200i64..1200).prop_map(|(x, y)| Input::Click(x, y)),
        ]
    }

    proptest! {
        #[test]
        fn prop_commit_only_via_eligible_click(inputs in prop::collection::vec(input(), 0..40)) {
            let mut controller = controller();
            let mut committed = None;

            for input in inputs {
                match input {
                    Input::Move(x, y) => {
                        let was_committed = controller.is_committed();
                        controller.hover_at(WorldPoint::new(x, y));
                        prop_assert_eq!(controller.is_committed(), was_committed);
                    },
                    Input::Click(x, y) => {
                        let point = WorldPoint::new(x, y);
                        let eligible = controller.oracle().classify(point).is_eligible();
                        let outcome = controller.click_at(point);
                        if let ClickOutcome::Committed(p) = outcome {
                            prop_assert!(eligible);
                            prop_assert!(committed.is_none());
                            committed = Some(p);
                        }
                    },
                }
            }

            prop_assert_eq!(controller.committed_point(), committed);
        }

        #[test]
        fn prop_hovers_never_commit(moves in prop::collection::vec((-1200i64..1200, -1200i64..1200), 0..60)) {
            let mut controller = controller();
            for (x, y) in moves {
                controller.hover_at(WorldPoint::new(x, y));
            }
            prop_assert!(!controller.is_committed());
            prop_assert!(controller.is_pending());
        }
    }
}
