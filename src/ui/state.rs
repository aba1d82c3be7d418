//! Application state for the desktop demo
//!
//! Keeps the widget, the demo sequence and the on-screen texture together so
//! the components and the eframe app share one mutable view.

use crate::audio::AudioFeatures;
use crate::config::AnimationConfig;
use crate::demo::DemoSequence;
use crate::error::Result;
use crate::state::AnimationStateKind;
use crate::widget::VoiceWidget;
use egui::{ColorImage, TextureHandle, TextureOptions};
use tracing::{info, warn};

/// Smallest orb the window will shrink the widget to
pub const MIN_ORB_SIZE: u32 = 120;

pub struct AppState {
    pub widget: VoiceWidget,
    pub demo: DemoSequence,
    /// Feed oscillating audio features while speaking
    pub simulate_audio: bool,
    texture: Option<TextureHandle>,
}

impl AppState {
    pub fn new(config: AnimationConfig) -> Result<Self> {
        let demo = DemoSequence::new(config.target_fps);
        Ok(Self {
            widget: VoiceWidget::new(config)?,
            demo,
            simulate_audio: true,
            texture: None,
        })
    }

    /// Manual state choice; stops the demo
    pub fn select_state(&mut self, state: AnimationStateKind) {
        self.demo.stop();
        self.widget.set_state(state);
    }

    pub fn toggle_demo(&mut self) {
        if self.demo.is_active() {
            self.demo.stop();
        } else {
            let first = self.demo.start();
            info!("Demo started");
            self.widget.set_state(first);
        }
    }

    pub fn toggle_simulated_audio(&mut self) {
        self.simulate_audio = !self.simulate_audio;
        if !self.simulate_audio {
            self.widget.clear_audio_features();
        }
    }

    /// Advance the demo and the widget by one frame
    ///
    /// `seconds` is wall-clock time since start, used for simulated audio.
    pub fn tick(&mut self, seconds: f64) {
        if let Some(next) = self.demo.tick() {
            self.widget.set_state(next);
        }
        if self.simulate_audio && self.widget.state() == AnimationStateKind::Speaking {
            self.widget
                .set_audio_features(AudioFeatures::simulated(seconds));
        }
        self.widget.update();
    }

    /// Match the widget to a square of `side` pixels
    pub fn fit_to(&mut self, side: u32) {
        let side = side.max(MIN_ORB_SIZE);
        let geometry = self.widget.geometry();
        if (geometry.width(), geometry.height()) == (side, side) {
            return;
        }
        if let Err(e) = self.widget.resize(side, side) {
            warn!("Keeping orb size: {}", e.user_message());
        }
    }

    /// Upload the current frame and return its texture
    pub fn texture(&mut self, ctx: &egui::Context) -> &TextureHandle {
        let frame = self.widget.current_surface();
        let image = ColorImage::from_rgb(
            [frame.width() as usize, frame.height() as usize],
            frame.as_raw(),
        );
        match &mut self.texture {
            Some(texture) => {
                texture.set(image, TextureOptions::LINEAR);
                texture
            }
            slot => slot.insert(ctx.load_texture("voice-dots-orb", image, TextureOptions::LINEAR)),
        }
    }

    /// One-line description for the status bar
    pub fn status_text(&self) -> String {
        if self.demo.is_active() {
            format!(
                "Demo: {} ({:.1}s remaining)",
                self.demo.current_step().state,
                self.demo.remaining_seconds()
            )
        } else if self.widget.is_transitioning() {
            format!("Transitioning to {}", self.widget.state())
        } else {
            format!("State: {}", self.widget.state())
        }
    }
}
