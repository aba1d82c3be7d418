//! Main application struct and eframe integration

use crate::config::AnimationConfig;
use crate::error::Result;
use crate::state::AnimationStateKind;
use crate::ui::components::{OrbView, StateSelector};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, Key, RichText, TopBottomPanel};
use std::time::{Duration, Instant};
use tracing::info;

/// Desktop demo hosting one [`VoiceWidget`](crate::widget::VoiceWidget)
pub struct VoiceDotsApp {
    state: AppState,
    theme: Theme,
    started: Instant,
    frame_interval: Duration,
}

impl VoiceDotsApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AnimationConfig) -> Result<Self> {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        let frame_interval = config.frame_interval();
        info!("Voice Dots UI initialized at {} FPS", config.target_fps);

        Ok(Self {
            state: AppState::new(config)?,
            theme,
            started: Instant::now(),
            frame_interval,
        })
    }

    /// Number keys pick a state, D toggles the demo
    fn handle_keys(&mut self, ctx: &egui::Context) {
        let shortcuts = [
            (Key::Num0, AnimationStateKind::Idle),
            (Key::Num1, AnimationStateKind::Listening),
            (Key::Num2, AnimationStateKind::Processing),
            (Key::Num3, AnimationStateKind::Speaking),
        ];
        for (key, kind) in shortcuts {
            if ctx.input(|i| i.key_pressed(key)) {
                self.state.select_state(kind);
            }
        }
        if ctx.input(|i| i.key_pressed(Key::D)) {
            self.state.toggle_demo();
        }
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(self.theme.bg_primary).inner_margin(self.theme.spacing))
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("AI Voice Visualization")
                        .size(24.0)
                        .strong()
                        .color(self.theme.text_primary),
                );
                ui.label(
                    RichText::new(self.state.status_text())
                        .size(18.0)
                        .color(self.theme.text_muted),
                );
                ui.label(
                    RichText::new("Press 0-3 for states, D for demo, ESC to quit")
                        .size(14.0)
                        .color(self.theme.text_muted),
                );
            });
    }

    fn show_banner(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("banner")
            .exact_height(80.0)
            .frame(egui::Frame::none().fill(self.theme.bg_banner).inner_margin(self.theme.spacing))
            .show(ctx, |ui| {
                StateSelector::new(&mut self.state, &self.theme).show(ui);
            });
    }

    fn show_orb(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                OrbView::new(&mut self.state).show(ui);
            });
    }
}

impl eframe::App for VoiceDotsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);
        self.state.tick(self.started.elapsed().as_secs_f64());

        self.show_header(ctx);
        self.show_banner(ctx);
        self.show_orb(ctx);

        ctx.request_repaint_after(self.frame_interval);
    }
}
