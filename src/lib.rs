//! Voice Dots - dot-matrix disc indicator for a voice assistant
//!
//! A circular field of dots animates procedurally for each conversational
//! state (listening, processing, speaking, idle) and morphs between states
//! with pair-specific transitions. [`VoiceWidget`] is the embeddable entry
//! point: set a state, optionally feed audio features, call `update()` each
//! frame and draw the returned RGB frame.

pub mod audio;
pub mod config;
pub mod demo;
pub mod error;
pub mod field;
pub mod generators;
pub mod geometry;
pub mod render;
pub mod scenario;
pub mod smoothing;
pub mod snapshot;
pub mod state;
pub mod transition;
pub mod ui;
pub mod widget;

// Re-export error types
pub use error::{Result, VoiceDotsError};

pub use audio::AudioFeatures;
pub use config::{AnimationConfig, Palette};
pub use field::IntensityField;
pub use geometry::GridGeometry;
pub use render::FrameImage;
pub use state::AnimationStateKind;
pub use transition::{TransitionEngine, TransitionKind};
pub use widget::VoiceWidget;
