//! Headless scenario playback
//!
//! [`ScenarioRunner`] owns a [`VoiceWidget`] and steps it frame by frame,
//! running each action once the widget has rendered the action's frame.

use super::{ActionType, Assertion, Scenario, ScenarioAction};
use crate::error::Result;
use crate::snapshot;
use crate::widget::VoiceWidget;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Result of an assertion check
#[derive(Debug, Clone, PartialEq)]
pub enum AssertionResult {
    Passed,
    Failed(String),
}

/// Outcome of a full playback
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: String,
    /// Frames rendered before exit
    pub frames: u64,
    pub passed: bool,
    pub failures: Vec<String>,
    pub snapshots: Vec<PathBuf>,
    /// Exit code requested by the scenario, 1 when an assertion failed
    pub exit_code: i32,
}

impl ScenarioReport {
    pub fn summary(&self) -> String {
        let status = if self.passed { "PASSED" } else { "FAILED" };
        format!(
            "[SCENARIO] '{}' {}: {} frames, {} snapshots, {} failures",
            self.name,
            status,
            self.frames,
            self.snapshots.len(),
            self.failures.len()
        )
    }
}

/// Plays a [`Scenario`] against its own widget
pub struct ScenarioRunner {
    scenario: Scenario,
    widget: VoiceWidget,
    next_action: usize,
    failures: Vec<String>,
    snapshots: Vec<PathBuf>,
    exit_code: Option<i32>,
}

impl ScenarioRunner {
    pub fn new(scenario: Scenario) -> Result<Self> {
        info!("[SCENARIO] Loaded scenario: {}", scenario.scenario.name);
        if !scenario.scenario.description.is_empty() {
            info!("[SCENARIO] Description: {}", scenario.scenario.description);
        }
        info!("[SCENARIO] Total actions: {}", scenario.actions.len());

        let widget = VoiceWidget::new(scenario.config.clone())?;
        Ok(Self {
            scenario,
            widget,
            next_action: 0,
            failures: Vec::new(),
            snapshots: Vec::new(),
            exit_code: None,
        })
    }

    pub fn widget(&self) -> &VoiceWidget {
        &self.widget
    }

    pub fn is_completed(&self) -> bool {
        self.exit_code.is_some() || self.next_action >= self.scenario.actions.len()
    }

    /// Next action due at the widget's current frame, if any
    fn poll(&mut self) -> Option<ScenarioAction> {
        let action = self.scenario.actions.get(self.next_action)?;
        if action.frame > self.widget.frame_count() {
            return None;
        }
        self.next_action += 1;
        Some(action.clone())
    }

    /// Run every due action, then render one frame unless playback ended
    ///
    /// Snapshots go to `output_dir`; they are skipped when it is `None`.
    pub fn step(&mut self, output_dir: Option<&Path>) -> Result<()> {
        while let Some(action) = self.poll() {
            debug!(
                "[SCENARIO] Executing action at frame {}: {:?}",
                action.frame, action.action
            );
            self.execute(&action.action, output_dir)?;

            if let Some(assertion) = &action.assert {
                self.check_assertion(assertion);
            }
            if self.exit_code.is_some() {
                return Ok(());
            }
        }

        if !self.is_completed() {
            self.widget.update();
        }
        Ok(())
    }

    /// Play the scenario to its exit action
    pub fn run(mut self, output_dir: Option<&Path>) -> Result<ScenarioReport> {
        while !self.is_completed() {
            self.step(output_dir)?;
        }

        let passed = self.failures.is_empty();
        let requested = self.exit_code.unwrap_or(0);
        let report = ScenarioReport {
            name: self.scenario.scenario.name.clone(),
            frames: self.widget.frame_count(),
            passed,
            failures: self.failures,
            snapshots: self.snapshots,
            exit_code: if passed { requested } else { 1 },
        };
        info!("{}", report.summary());
        Ok(report)
    }

    fn execute(&mut self, action: &ActionType, output_dir: Option<&Path>) -> Result<()> {
        match action {
            ActionType::SetState { state } => self.widget.set_state(*state),
            ActionType::Audio { .. } => {
                if let Some(features) = action.audio_features() {
                    self.widget.set_audio_features(features);
                }
            }
            ActionType::ClearAudio => self.widget.clear_audio_features(),
            ActionType::Resize { width, height } => {
                if let Err(e) = self.widget.resize(*width, *height) {
                    if !e.is_recoverable() {
                        return Err(e);
                    }
                    warn!("[SCENARIO] Resize to {}x{} rejected: {}", width, height, e);
                }
            }
            ActionType::Snapshot { name } => match output_dir {
                Some(dir) => {
                    let path = snapshot::save_frame(self.widget.current_surface(), dir, name)?;
                    self.snapshots.push(path);
                }
                None => debug!("[SCENARIO] No output directory, skipping snapshot '{}'", name),
            },
            ActionType::Log { message } => info!("[SCENARIO] Log: {}", message),
            ActionType::Exit { code } => {
                info!("[SCENARIO] Exit with code {}", code);
                self.exit_code = Some(*code);
            }
        }
        Ok(())
    }

    /// Check an assertion against the widget, recording failures
    pub fn check_assertion(&mut self, assertion: &Assertion) -> AssertionResult {
        let widget = &self.widget;
        let result = match assertion {
            Assertion::StateIs { state } => {
                if widget.state() == *state {
                    AssertionResult::Passed
                } else {
                    AssertionResult::Failed(format!(
                        "Expected state {}, got {}",
                        state,
                        widget.state()
                    ))
                }
            }
            Assertion::IsTransitioning => {
                if widget.is_transitioning() {
                    AssertionResult::Passed
                } else {
                    AssertionResult::Failed("Expected a running transition".to_string())
                }
            }
            Assertion::IsSettled => {
                if widget.is_transitioning() {
                    AssertionResult::Failed("Expected no running transition".to_string())
                } else {
                    AssertionResult::Passed
                }
            }
            Assertion::LitCellsMin { count } => {
                let lit = widget.displayed_field().count_above(0.0);
                if lit >= *count {
                    AssertionResult::Passed
                } else {
                    AssertionResult::Failed(format!(
                        "Expected at least {} lit cells, got {}",
                        count, lit
                    ))
                }
            }
        };

        match &result {
            AssertionResult::Passed => {
                info!("[SCENARIO] PASS: Assertion {:?}", assertion);
            }
            AssertionResult::Failed(reason) => {
                error!("[SCENARIO] FAIL: Assertion {:?} - {}", assertion, reason);
                self.failures.push(reason.clone());
            }
        }
        result
    }
}
