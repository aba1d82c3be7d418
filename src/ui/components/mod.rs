//! Reusable UI components for the desktop demo

pub mod orb_view;
pub mod state_selector;

pub use orb_view::OrbView;
pub use state_selector::StateSelector;
