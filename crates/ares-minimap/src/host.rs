//! Host containers and the pointer event source.

use std::sync::Arc;

use ares_common::PixelPoint;
use ares_spawn::HoverFeedback;
use image::RgbaImage;
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Pointer input on the minimap, in surface offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved
    Moved(PixelPoint),
    /// Primary button clicked
    Clicked(PixelPoint),
}

/// Sending half of the pointer event source, handed to the host on mount.
///
/// Dropping every sender tells the plugin the host is gone.
#[derive(Debug, Clone)]
pub struct PointerSender {
    sender: mpsc::UnboundedSender<PointerEvent>,
}

/// Receiving half of the pointer event source.
pub type PointerReceiver = mpsc::UnboundedReceiver<PointerEvent>;

/// Creates a connected pointer sender and receiver.
#[must_use]
pub fn pointer_channel() -> (PointerSender, PointerReceiver) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (PointerSender { sender }, receiver)
}

impl PointerSender {
    /// Delivers an event. Returns false once the listener is detached.
    pub fn send(&self, event: PointerEvent) -> bool {
        self.sender.send(event).is_ok()
    }

    /// Reports a pointer move.
    pub fn pointer_moved(&self, position: PixelPoint) -> bool {
        self.send(PointerEvent::Moved(position))
    }

    /// Reports a click.
    pub fn clicked(&self, position: PixelPoint) -> bool {
        self.send(PointerEvent::Clicked(position))
    }

    /// Returns true once the listener is detached.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.sender.is_closed()
    }
}

/// UI container that displays the minimap surface and its feedback label.
pub trait HostContainer: Send {
    /// Shows the rendered surface and an empty label of `font_size`.
    fn attach(&mut self, surface: &RgbaImage, font_size: f32);

    /// Updates the label text, its color and the pointer affordance.
    fn show_feedback(&mut self, feedback: &HoverFeedback);

    /// Removes the surface and label.
    fn detach(&mut self);
}

/// What a [`HeadlessHost`] has been asked to display.
#[derive(Debug, Clone, Default)]
pub struct HeadlessView {
    /// Whether a surface is attached
    pub attached: bool,
    /// Size of the attached surface
    pub surface_size: Option<(u32, u32)>,
    /// Label font size
    pub font_size: f32,
    /// Latest feedback
    pub feedback: HoverFeedback,
    /// Every feedback update, oldest first
    pub history: Vec<HoverFeedback>,
    /// Number of times `attach` was called
    pub attach_count: usize,
}

/// Host without a UI that records what it is asked to display.
///
/// Clones share the same view, so a copy kept by the caller observes what the
/// plugin does with the one it was given.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    view: Arc<Mutex<HeadlessView>>,
}

impl HeadlessHost {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current view.
    #[must_use]
    pub fn view(&self) -> HeadlessView {
        self.view.lock().clone()
    }
}

impl HostContainer for HeadlessHost {
    fn attach(&mut self, surface: &RgbaImage, font_size: f32) {
        let mut view = self.view.lock();
        view.attached = true;
        view.surface_size = Some(surface.dimensions());
        view.font_size = font_size;
        view.feedback = HoverFeedback::default();
        view.attach_count += 1;
    }

    fn show_feedback(&mut self, feedback: &HoverFeedback) {
        let mut view = self.view.lock();
        view.feedback = feedback.clone();
        view.history.push(feedback.clone());
    }

    fn detach(&mut self) {
        let mut view = self.view.lock();
        view.attached = false;
        view.surface_size = None;
        view.feedback = HoverFeedback::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ares_spawn::Cursor;

    #[test]
    fn test_pointer_channel_delivers_in_order() {
        let (sender, mut receiver) = pointer_channel();
        assert!(sender.pointer_moved(PixelPoint::new(1.0, 2.0)));
        assert!(sender.clicked(PixelPoint::new(3.0, 4.0)));

        assert_eq!(
            receiver.try_recv().ok(),
            Some(PointerEvent::Moved(PixelPoint::new(1.0, 2.0)))
        );
        assert_eq!(
            receiver.try_recv().ok(),
            Some(PointerEvent::Clicked(PixelPoint::new(3.0, 4.0)))
        );
    }

    #[test]
    fn test_sender_detects_detached_listener() {
        let (sender, receiver) = pointer_channel();
        drop(receiver);
        assert!(sender.is_detached());
        assert!(!sender.clicked(PixelPoint::default()));
    }

    #[test]
    fn test_headless_host_records() {
        let observer = HeadlessHost::new();
        let mut host = observer.clone();

        host.attach(&RgbaImage::new(32, 32), 20.0);
        host.show_feedback(&HoverFeedback {
            cursor: Cursor::Pointer,
            label: "(1,2)".to_string(),
            color: None,
        });

        let view = observer.view();
        assert!(view.attached);
        assert_eq!(view.surface_size, Some((32, 32)));
        assert_eq!(view.feedback.label, "(1,2)");
        assert_eq!(view.history.len(), 1);

        host.detach();
        let view = observer.view();
        assert!(!view.attached);
        assert_eq!(view.feedback, HoverFeedback::default());
    }
}
