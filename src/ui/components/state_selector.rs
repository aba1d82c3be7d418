//! Banner with one button per state, the demo toggle and the audio toggle

use crate::state::AnimationStateKind;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Button, RichText, Vec2};

const BUTTON_SIZE: Vec2 = Vec2::new(120.0, 40.0);

/// Display order of the state buttons
const BUTTON_ORDER: [AnimationStateKind; 4] = [
    AnimationStateKind::Listening,
    AnimationStateKind::Processing,
    AnimationStateKind::Speaking,
    AnimationStateKind::Idle,
];

pub struct StateSelector<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> StateSelector<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let palette = self.state.widget.config().palette.clone();
            let current = self.state.widget.state();

            for kind in BUTTON_ORDER {
                let mut fill = self.theme.state_color(&palette, kind);
                if kind != current {
                    fill = fill.gamma_multiply(0.8);
                }
                let button = Button::new(
                    RichText::new(kind.label()).color(self.theme.state_text_color(kind)),
                )
                .fill(fill)
                .rounding(self.theme.button_rounding)
                .min_size(BUTTON_SIZE);

                let response = ui.add(button);
                response.widget_info(|| {
                    egui::WidgetInfo::labeled(egui::WidgetType::Button, true, kind.label())
                });
                if response.clicked() {
                    self.state.select_state(kind);
                }
            }

            ui.add_space(self.theme.spacing);

            let demo_active = self.state.demo.is_active();
            let (text, fill) = if demo_active {
                ("Stop Demo", self.theme.demo_active)
            } else {
                ("Run Demo", self.theme.demo)
            };
            let response = ui.add(
                Button::new(RichText::new(text).color(self.theme.text_primary))
                    .fill(fill)
                    .rounding(self.theme.button_rounding)
                    .min_size(BUTTON_SIZE),
            );
            response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, true, text)
            });
            if response.clicked() {
                self.state.toggle_demo();
            }

            let mut simulate = self.state.simulate_audio;
            let response = ui.checkbox(&mut simulate, "Simulated audio");
            if response.changed() {
                self.state.toggle_simulated_audio();
            }
        });
    }
}
