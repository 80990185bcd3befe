//! Minimap spawn plugin: mounts the backdrop into a host and turns pointer
//! input into a committed spawn point.
//!
//! Lifecycle: `new` (fails on bad geometry) → `mount` → pointer events →
//! `run_and_get_user_coords` resolves → `teardown`. Teardown is safe in any
//! state and abandons a selection that has not been committed.

use std::fmt;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use ares_common::{AresError, AresResult, SpawnError, WorldPoint};
use ares_spawn::{
    CancelHandle, ClickOutcome, HoverFeedback, SelectionController, SpaceClassifier, SpawnConfig,
    WorldGeometry, WorldGeometryProvider, WorldSampler,
};
use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::backdrop::BackdropPainter;
use crate::host::{pointer_channel, HostContainer, PointerEvent, PointerReceiver, PointerSender};
use crate::raster::RasterSurface;
use crate::surface::RenderSurface;

/// Next pointer event, or `None` when there is no listener or every sender is gone.
async fn next_event(events: &mut Option<PointerReceiver>) -> Option<PointerEvent> {
    match events {
        Some(events) => events.recv().await,
        None => None,
    }
}

/// Spawn picker bound to one world.
pub struct MinimapSpawnPlugin {
    config: SpawnConfig,
    geometry: WorldGeometry,
    classifier: Arc<dyn SpaceClassifier>,
    surface: RasterSurface,
    logo: Option<RgbaImage>,
    controller: SelectionController,
    host: Option<Box<dyn HostContainer>>,
    events: Option<PointerReceiver>,
}

impl fmt::Debug for MinimapSpawnPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinimapSpawnPlugin")
            .field("config", &self.config)
            .field("geometry", &self.geometry)
            .field("state", &self.controller.state())
            .field("mounted", &self.is_mounted())
            .finish_non_exhaustive()
    }
}

impl MinimapSpawnPlugin {
    /// Creates a plugin. Geometry is read from `provider` once, here.
    pub fn new<P>(
        mut config: SpawnConfig,
        provider: &P,
        classifier: Arc<dyn SpaceClassifier>,
    ) -> Result<Self, SpawnError>
    where
        P: WorldGeometryProvider + ?Sized,
    {
        config.validate();
        let geometry = WorldGeometry::from_provider(provider)?;
        let controller = Self::new_controller(&config, geometry, &classifier);

        info!(
            "Spawn minimap for world radius {} (rim {:.1})",
            geometry.outer_radius(),
            geometry.rim_radius()
        );

        Ok(Self {
            surface: RasterSurface::new(config.canvas_size),
            config,
            geometry,
            classifier,
            logo: None,
            controller,
            host: None,
            events: None,
        })
    }

    fn new_controller(
        config: &SpawnConfig,
        geometry: WorldGeometry,
        classifier: &Arc<dyn SpaceClassifier>,
    ) -> SelectionController {
        SelectionController::for_world(geometry, Arc::clone(classifier), config.extent())
            .with_palette(config.palette)
    }

    /// Draws `logo` at the world centre.
    #[must_use]
    pub fn with_logo(mut self, logo: RgbaImage) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Loads the centre logo from an image file.
    pub fn load_logo<P: AsRef<Path>>(self, path: P) -> AresResult<Self> {
        let logo = image::open(path.as_ref())
            .map_err(|e| AresError::Image(e.to_string()))?
            .to_rgba8();
        Ok(self.with_logo(logo))
    }

    /// Renders the backdrop, attaches it to `host` and starts listening.
    ///
    /// The returned sender is the host's pointer event source.
    pub fn mount(&mut self, mut host: Box<dyn HostContainer>) -> Result<PointerSender, SpawnError> {
        if self.host.is_some() {
            return Err(SpawnError::AlreadyMounted);
        }

        if !self.controller.is_pending() && !self.controller.is_committed() {
            debug!("Previous selection was abandoned, starting a new one");
            self.controller = Self::new_controller(&self.config, self.geometry, &self.classifier);
        }

        let sampler = WorldSampler::new(self.geometry, self.config.sample_step);
        let painter = BackdropPainter::new(&self.config, self.geometry, *self.controller.transform());
        painter.paint(
            &mut self.surface,
            sampler.sample(self.classifier.as_ref()),
            self.logo.as_ref(),
        );

        host.attach(self.surface.image(), self.config.label_font_size);
        if let Some(point) = self.controller.committed_point() {
            host.show_feedback(&HoverFeedback::committed(point, &self.config.palette));
        }

        let (sender, receiver) = pointer_channel();
        self.host = Some(host);
        self.events = Some(receiver);
        Ok(sender)
    }

    /// Routes pointer events into the controller until a point is committed.
    ///
    /// Fails with [`SpawnError::SelectionAbandoned`] if the selection is
    /// cancelled, or if every [`PointerSender`] is dropped first. Dropping the
    /// returned future leaves the plugin listening, so a later call picks up
    /// where this one stopped. Once committed, returns the point immediately.
    pub async fn run_and_get_user_coords(&mut self) -> Result<WorldPoint, SpawnError> {
        if let Some(point) = self.controller.committed_point() {
            return Ok(point);
        }
        if self.events.is_none() {
            return Err(SpawnError::NotMounted);
        }

        let waiter = self.controller.await_selection();
        tokio::pin!(waiter);

        loop {
            tokio::select! {
                biased;
                outcome = &mut waiter => return outcome,
                event = next_event(&mut self.events) => match event {
                    Some(event) => self.dispatch(event),
                    None => {
                        warn!("Pointer source closed before a spawn point was chosen");
                        self.controller.teardown();
                    },
                },
            }
        }
    }

    /// Applies one pointer event and updates the host's feedback.
    ///
    /// A commit stops the listener; later host input is discarded.
    pub fn dispatch(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Moved(position) => {
                if let Some(feedback) = self.controller.on_pointer_move(position) {
                    self.show_feedback(&feedback);
                }
            },
            PointerEvent::Clicked(position) => {
                if let ClickOutcome::Committed(point) = self.controller.on_click(position) {
                    let feedback = HoverFeedback::committed(point, &self.config.palette);
                    self.show_feedback(&feedback);
                    if self.events.take().is_some() {
                        debug!("Spawn committed, pointer listener released");
                    }
                }
            },
        }
    }

    fn show_feedback(&mut self, feedback: &HoverFeedback) {
        if let Some(host) = self.host.as_mut() {
            host.show_feedback(feedback);
        }
    }

    /// Detaches listeners, clears the surface and releases the host.
    pub fn teardown(&mut self) {
        self.events = None;
        self.controller.teardown();
        self.surface.clear(self.config.palette.background);
        if let Some(mut host) = self.host.take() {
            host.detach();
            info!("Spawn minimap torn down");
        }
    }

    /// Waits for the committed point without driving events.
    pub fn await_selection(
        &self,
    ) -> impl Future<Output = Result<WorldPoint, SpawnError>> + Send + 'static {
        self.controller.await_selection()
    }

    /// Handle that abandons the selection.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.controller.cancel_handle()
    }

    /// Returns true between `mount` and `teardown`.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.host.is_some()
    }

    /// Selection controller.
    #[must_use]
    pub const fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// Rendered surface.
    #[must_use]
    pub const fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// World geometry read at construction.
    #[must_use]
    pub const fn geometry(&self) -> &WorldGeometry {
        &self.geometry
    }

    /// Validated configuration.
    #[must_use]
    pub const fn config(&self) -> &SpawnConfig {
        &self.config
    }
}
