//! UI automation tests using egui_kittest and AccessKit
//!
//! These tests render the demo components, click buttons through the
//! accessibility tree and check the widget state they drive.

use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use voice_dots::ui::{AppState, OrbView, StateSelector, Theme};
use voice_dots::{AnimationConfig, AnimationStateKind};

/// Application state wrapper for testing
struct TestApp {
    state: AppState,
    theme: Theme,
}

impl TestApp {
    fn new() -> Self {
        Self {
            state: AppState::new(
                AnimationConfig::default()
                    .with_size(300, 300)
                    .with_seed(23),
            )
            .unwrap(),
            theme: Theme::dark(),
        }
    }
}

/// Render the banner and the orb the way the app lays them out
fn render_demo_ui(ctx: &egui::Context, app: &mut TestApp) {
    egui::TopBottomPanel::bottom("banner").show(ctx, |ui| {
        StateSelector::new(&mut app.state, &app.theme).show(ui);
    });
    egui::CentralPanel::default().show(ctx, |ui| {
        OrbView::new(&mut app.state).show(ui);
    });
}

fn harness(app: TestApp) -> Harness<'static, TestApp> {
    Harness::builder()
        .with_size(egui::Vec2::new(800.0, 600.0))
        .build_state(render_demo_ui, app)
}

/// Test that every state button is reachable by its label
#[test]
fn test_state_buttons_exist() {
    let mut harness = harness(TestApp::new());
    harness.run();

    for kind in AnimationStateKind::ALL {
        let _button = harness.get_by_label(kind.label());
    }
    let _demo = harness.get_by_label("Run Demo");
    let _orb = harness.get_by_label("Voice orb");
}

/// Test that clicking a state button starts a transition to that state
#[test]
fn test_click_processing_switches_state() {
    let mut harness = harness(TestApp::new());
    harness.run();

    harness.get_by_label("Processing").click();
    harness.run();

    let state = &harness.state().state;
    assert_eq!(state.widget.state(), AnimationStateKind::Processing);
    assert!(state.widget.is_transitioning());
}

/// Test that the demo button toggles and relabels itself
#[test]
fn test_demo_button_toggles() {
    let mut harness = harness(TestApp::new());
    harness.run();

    harness.get_by_label("Run Demo").click();
    harness.run();
    assert!(harness.state().state.demo.is_active());

    harness.get_by_label("Stop Demo").click();
    harness.run();
    assert!(!harness.state().state.demo.is_active());
}

/// Test that the orb view fits the widget into the available space
#[test]
fn test_orb_view_resizes_widget() {
    let mut harness = harness(TestApp::new());
    harness.run();

    let width = harness.state().state.widget.geometry().width();
    assert_ne!(width, 300, "Orb should have been fitted to the panel");
    assert_eq!(
        width,
        harness.state().state.widget.geometry().height(),
        "Orb should stay square"
    );
}

/// Test that the simulated audio checkbox can be turned off
#[test]
fn test_simulated_audio_checkbox() {
    let mut harness = harness(TestApp::new());
    harness.run();
    assert!(harness.state().state.simulate_audio);

    harness.get_by_label("Simulated audio").click();
    harness.run();
    assert!(!harness.state().state.simulate_audio);
}
