//! Scripted playback for headless rendering and automated checks
//!
//! A scenario is a TOML file with an optional widget configuration and a list
//! of frame-indexed actions. Each action may carry an assertion that is
//! checked right after the action runs.

mod runner;

pub use runner::{AssertionResult, ScenarioReport, ScenarioRunner};

use crate::audio::AudioFeatures;
use crate::config::AnimationConfig;
use crate::error::{Result, VoiceDotsError};
use crate::state::AnimationStateKind;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A scenario loaded from a TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Scenario metadata
    pub scenario: ScenarioMetadata,
    /// Widget configuration, defaults when absent
    #[serde(default)]
    pub config: AnimationConfig,
    /// Actions, ordered by frame
    pub actions: Vec<ScenarioAction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A single action, run once the widget has rendered `frame` frames
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioAction {
    pub frame: u64,
    pub action: ActionType,
    /// Optional assertion to validate after the action
    #[serde(default)]
    pub assert: Option<Assertion>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionType {
    /// Switch the widget state
    SetState { state: AnimationStateKind },
    /// Feed audio features to the speaking pattern
    Audio {
        energy: f32,
        #[serde(default)]
        onset: f32,
    },
    /// Drop audio features
    ClearAudio,
    Resize { width: u32, height: u32 },
    /// Save the current frame as `<name>.png`
    Snapshot { name: String },
    Log { message: String },
    /// Stop playback
    Exit {
        #[serde(default)]
        code: i32,
    },
}

impl ActionType {
    /// Audio features for an [`ActionType::Audio`] action
    pub fn audio_features(&self) -> Option<AudioFeatures> {
        match self {
            ActionType::Audio { energy, onset } => Some(AudioFeatures::new(*energy, *onset)),
            _ => None,
        }
    }
}

/// Conditions checked against the widget
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    StateIs { state: AnimationStateKind },
    /// A transition is running
    IsTransitioning,
    /// No transition is running
    IsSettled,
    /// At least `count` cells are lit in the displayed field
    LitCellsMin { count: usize },
}

impl Scenario {
    /// Load and validate a scenario file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            VoiceDotsError::ScenarioError(format!(
                "Failed to read scenario '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| {
            VoiceDotsError::ScenarioError(format!("{}: {}", path.display(), e))
        })
    }

    /// Parse and validate scenario TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)
            .map_err(|e| VoiceDotsError::ScenarioError(format!("Invalid TOML: {}", e)))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Validate the scenario
    pub fn validate(&self) -> Result<()> {
        if self.actions.is_empty() {
            return Err(VoiceDotsError::ScenarioError(
                "Scenario must have at least one action".to_string(),
            ));
        }

        let mut last_frame = 0;
        for action in &self.actions {
            if action.frame < last_frame {
                return Err(VoiceDotsError::ScenarioError(format!(
                    "Actions must be ordered by frame. Found frame {} after frame {}",
                    action.frame, last_frame
                )));
            }
            last_frame = action.frame;
        }

        let has_exit = self
            .actions
            .iter()
            .any(|a| matches!(a.action, ActionType::Exit { .. }));
        if !has_exit {
            return Err(VoiceDotsError::ScenarioError(
                "Scenario must have an exit action".to_string(),
            ));
        }

        self.config.validate()
    }
}
