//! Theme and styling for the desktop demo

use crate::config::Palette;
use crate::state::AnimationStateKind;
use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Vec2, Visuals};

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Demo button color
    pub demo: Color32,
    /// Demo button color while the demo runs
    pub demo_active: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_banner: Color32,
    pub bg_highlight: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_dark: Color32,
    pub text_muted: Color32,

    /// Border radius for buttons
    pub button_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    /// Small spacing
    pub spacing_sm: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme
    pub fn dark() -> Self {
        Self {
            demo: Color32::from_rgb(100, 180, 100),        // Green
            demo_active: Color32::from_rgb(180, 100, 100), // Muted red

            bg_primary: Color32::BLACK,
            bg_banner: Color32::from_rgb(40, 40, 50),
            bg_highlight: Color32::from_rgb(60, 60, 80),

            text_primary: Color32::from_rgb(255, 255, 255),
            text_dark: Color32::from_rgb(20, 20, 20),
            text_muted: Color32::from_rgb(180, 180, 180),

            button_rounding: Rounding::same(4.0),

            spacing: 20.0,
            spacing_sm: 8.0,
        }
    }

    /// Button fill for a state, taken from the dot palette
    pub fn state_color(&self, palette: &Palette, state: AnimationStateKind) -> Color32 {
        let rgb = palette.color_for(state);
        Color32::from_rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Button text color readable on top of [`state_color`](Self::state_color)
    pub fn state_text_color(&self, state: AnimationStateKind) -> Color32 {
        match state {
            AnimationStateKind::Idle => self.text_muted,
            _ => self.text_dark,
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_banner;

        visuals.widgets.inactive.bg_fill = self.bg_highlight;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_muted);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::splat(self.spacing_sm);
        style.spacing.button_padding = Vec2::new(self.spacing, self.spacing_sm);

        style.text_styles.insert(
            egui::TextStyle::Heading,
            FontId::new(24.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            FontId::new(18.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            FontId::new(16.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
    }
}
