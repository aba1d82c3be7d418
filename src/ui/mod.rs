//! egui/eframe desktop demo around the widget

mod app;
pub mod components;
mod state;
mod theme;

pub use app::VoiceDotsApp;
pub use components::{OrbView, StateSelector};
pub use state::{AppState, MIN_ORB_SIZE};
pub use theme::Theme;
