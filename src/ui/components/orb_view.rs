//! The rendered dot disc, shown as a texture

use crate::ui::state::AppState;
use egui::{self, Vec2};

/// Square view of the widget's frame, centered in the available space
pub struct OrbView<'a> {
    state: &'a mut AppState,
    /// Pixels kept free around the orb
    margin: f32,
}

impl<'a> OrbView<'a> {
    pub fn new(state: &'a mut AppState) -> Self {
        Self {
            state,
            margin: 40.0,
        }
    }

    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let available = ui.available_size();
        let side = (available.x.min(available.y) - self.margin).max(0.0);
        self.state.fit_to(side as u32);

        let geometry = self.state.widget.geometry();
        let size = Vec2::new(geometry.width() as f32, geometry.height() as f32);
        let texture_id = self.state.texture(ui.ctx()).id();

        let response = ui
            .centered_and_justified(|ui| ui.image((texture_id, size)))
            .inner;
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Other, true, "Voice orb")
        });
        response
    }
}
