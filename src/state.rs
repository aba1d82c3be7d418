//! Conversational states shown by the indicator

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of the voice assistant as shown by the dot disc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStateKind {
    /// Nothing going on; rendered as a muted listening pattern
    Idle,
    /// Waiting for the user to speak
    #[default]
    Listening,
    /// Thinking about a response
    Processing,
    /// Speaking a response
    Speaking,
}

/// Which procedural pattern drives a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    Listening,
    Processing,
    Speaking,
}

impl AnimationStateKind {
    /// All states, in display order
    pub const ALL: [AnimationStateKind; 4] = [
        AnimationStateKind::Idle,
        AnimationStateKind::Listening,
        AnimationStateKind::Processing,
        AnimationStateKind::Speaking,
    ];

    /// Generator used to render this state. Idle borrows the listening pattern.
    pub fn generator(self) -> GeneratorKind {
        match self {
            AnimationStateKind::Idle | AnimationStateKind::Listening => GeneratorKind::Listening,
            AnimationStateKind::Processing => GeneratorKind::Processing,
            AnimationStateKind::Speaking => GeneratorKind::Speaking,
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            AnimationStateKind::Idle => "Idle",
            AnimationStateKind::Listening => "Listening",
            AnimationStateKind::Processing => "Processing",
            AnimationStateKind::Speaking => "Speaking",
        }
    }
}

impl fmt::Display for AnimationStateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
