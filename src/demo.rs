//! Scripted walk through the conversational states

use crate::state::AnimationStateKind;
use tracing::debug;

/// One step of the demo: hold `state` for `frames` frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoStep {
    pub state: AnimationStateKind,
    pub frames: u64,
}

/// Looping Listening → Processing → Speaking → Listening sequence
#[derive(Debug, Clone)]
pub struct DemoSequence {
    steps: Vec<DemoStep>,
    fps: u32,
    current: usize,
    elapsed: u64,
    active: bool,
}

impl DemoSequence {
    /// Standard sequence timed for `fps` frames per second
    pub fn new(fps: u32) -> Self {
        let fps = fps.max(1);
        let step = |state, seconds: u64| DemoStep {
            state,
            frames: seconds * fps as u64,
        };
        Self {
            steps: vec![
                step(AnimationStateKind::Listening, 3),
                step(AnimationStateKind::Processing, 3),
                step(AnimationStateKind::Speaking, 5),
                step(AnimationStateKind::Listening, 3),
            ],
            fps,
            current: 0,
            elapsed: 0,
            active: false,
        }
    }

    /// Restart from the first step and return its state
    pub fn start(&mut self) -> AnimationStateKind {
        self.active = true;
        self.current = 0;
        self.elapsed = 0;
        debug!("Demo started");
        self.steps[0].state
    }

    pub fn stop(&mut self) {
        if self.active {
            debug!("Demo stopped at step {}", self.current);
        }
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_step(&self) -> DemoStep {
        self.steps[self.current]
    }

    /// Seconds left in the current step
    pub fn remaining_seconds(&self) -> f32 {
        let left = self.current_step().frames.saturating_sub(self.elapsed);
        left as f32 / self.fps as f32
    }

    /// Advance one frame; returns the new state when the step changes
    pub fn tick(&mut self) -> Option<AnimationStateKind> {
        if !self.active {
            return None;
        }
        self.elapsed += 1;
        if self.elapsed < self.current_step().frames {
            return None;
        }

        self.current = (self.current + 1) % self.steps.len();
        self.elapsed = 0;
        let state = self.current_step().state;
        debug!("Demo step {} -> {}", self.current, state);
        Some(state)
    }
}
