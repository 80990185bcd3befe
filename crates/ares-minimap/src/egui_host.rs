//! egui host for the spawn minimap.
//!
//! The plugin and the UI run on different loops, so the picker is a cheap
//! handle over shared view state: give one clone to `mount`, keep another for
//! `show` in the frame callback.

use std::sync::Arc;

use ares_common::PixelPoint;
use ares_spawn::{Cursor, HoverFeedback};
use egui::{
    Color32, ColorImage, CursorIcon, Response, RichText, Sense, TextureHandle, TextureOptions, Ui,
};
use image::RgbaImage;
use parking_lot::Mutex;

use crate::host::{HostContainer, PointerSender};

#[derive(Default)]
struct PickerView {
    image: Option<ColorImage>,
    texture: Option<TextureHandle>,
    dirty: bool,
    feedback: HoverFeedback,
    font_size: f32,
}

/// egui widget hosting the spawn minimap.
#[derive(Clone, Default)]
pub struct EguiSpawnPicker {
    view: Arc<Mutex<PickerView>>,
}

impl std::fmt::Debug for EguiSpawnPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let view = self.view.lock();
        f.debug_struct("EguiSpawnPicker")
            .field("attached", &view.image.is_some())
            .field("feedback", &view.feedback)
            .finish()
    }
}

impl EguiSpawnPicker {
    /// Creates an empty picker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a surface is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.view.lock().image.is_some()
    }

    /// Latest feedback from the plugin.
    #[must_use]
    pub fn feedback(&self) -> HoverFeedback {
        self.view.lock().feedback.clone()
    }

    /// Draws the minimap and label, forwarding hover and clicks to `events`.
    ///
    /// Returns the image response, or `None` when nothing is attached.
    pub fn show(&self, ui: &mut Ui, events: &PointerSender) -> Option<Response> {
        let mut view = self.view.lock();

        if view.dirty {
            let texture = view.image.clone().map(|image| {
                ui.ctx()
                    .load_texture("spawn-minimap", image, TextureOptions::NEAREST)
            });
            view.texture = texture;
            view.dirty = false;
        }

        let texture = view.texture.as_ref()?;
        let size = texture.size_vec2();
        let image = egui::Image::new((texture.id(), size)).sense(Sense::click());
        let response = ui.add(image);

        let origin = response.rect.min;
        if let Some(pos) = response.hover_pos() {
            events.pointer_moved(PixelPoint::new(pos.x - origin.x, pos.y - origin.y));
            ui.ctx().set_cursor_icon(cursor_icon(view.feedback.cursor));
        }
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.clicked(PixelPoint::new(pos.x - origin.x, pos.y - origin.y));
            }
        }

        let color = view
            .feedback
            .color
            .map_or(ui.visuals().text_color(), |[r, g, b, a]| {
                Color32::from_rgba_unmultiplied(r, g, b, a)
            });
        let label = RichText::new(view.feedback.label.as_str())
            .size(view.font_size)
            .color(color);
        ui.vertical_centered(|ui| ui.label(label));

        Some(response)
    }
}

/// egui cursor for a pointer affordance.
#[must_use]
pub fn cursor_icon(cursor: Cursor) -> CursorIcon {
    match cursor {
        Cursor::Default => CursorIcon::Default,
        Cursor::Pointer => CursorIcon::PointingHand,
        Cursor::NoDrop => CursorIcon::NotAllowed,
    }
}

impl HostContainer for EguiSpawnPicker {
    fn attach(&mut self, surface: &RgbaImage, font_size: f32) {
        let (width, height) = surface.dimensions();
        let image = ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            surface.as_raw(),
        );
        let mut view = self.view.lock();
        view.image = Some(image);
        view.dirty = true;
        view.font_size = font_size;
        view.feedback = HoverFeedback::default();
    }

    fn show_feedback(&mut self, feedback: &HoverFeedback) {
        self.view.lock().feedback = feedback.clone();
    }

    fn detach(&mut self) {
        let mut view = self.view.lock();
        view.image = None;
        view.dirty = true;
        view.feedback = HoverFeedback::default();
    }
}
