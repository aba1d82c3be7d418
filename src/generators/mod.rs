//! Procedural intensity patterns, one per conversational state
//!
//! Each pattern is a pure function of the frame clock, the grid, optional
//! audio features and a random source. [`StateGenerator`] pairs a pattern with
//! the previous-frame field it needs for hysteresis and smoothing.

pub mod listening;
pub mod processing;
pub mod speaking;

use crate::audio::AudioFeatures;
use crate::field::IntensityField;
use crate::geometry::GridGeometry;
use crate::smoothing;
use crate::state::GeneratorKind;
use rand::Rng;

/// Cells brighter than this light up from dark
pub const LIGHT_THRESHOLD: f32 = 0.35;

/// Cells lit last frame stay lit while brighter than this
pub const HOLD_THRESHOLD: f32 = 0.2;

/// Largest sparkle added to a cell
const SPARKLE_AMOUNT: f32 = 0.2;

/// Everything a pattern needs to render one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// `frame_count * animation_speed`
    pub time: f32,
    pub geometry: &'a GridGeometry,
    pub audio: Option<&'a AudioFeatures>,
}

/// Threshold with hysteresis: a lower bar for cells that were already lit
pub fn hysteresis(intensity: f32, was_lit: bool) -> f32 {
    if intensity > LIGHT_THRESHOLD || (was_lit && intensity > HOLD_THRESHOLD) {
        intensity.min(1.0)
    } else {
        0.0
    }
}

/// Random "data bit": with probability `chance` a small random boost
pub(crate) fn sparkle<R: Rng + ?Sized>(rng: &mut R, chance: f32) -> f32 {
    if rng.gen::<f32>() < chance {
        rng.gen::<f32>() * SPARKLE_AMOUNT
    } else {
        0.0
    }
}

/// `0.5 + 0.5 * sin(x)`, a sine remapped to 0.0 - 1.0
pub(crate) fn wave(x: f32) -> f32 {
    0.5 + 0.5 * x.sin()
}

/// A pattern plus its own previous-frame field
#[derive(Debug, Clone)]
pub struct StateGenerator {
    kind: GeneratorKind,
    previous: IntensityField,
}

impl StateGenerator {
    pub fn new(kind: GeneratorKind, geometry: &GridGeometry) -> Self {
        Self {
            kind,
            previous: geometry.empty_field(),
        }
    }

    /// Produce the raw (unsmoothed) field for this frame
    pub fn generate<R: Rng + ?Sized>(&self, input: &FrameInput<'_>, rng: &mut R) -> IntensityField {
        match self.kind {
            GeneratorKind::Listening => listening::generate(input, &self.previous, rng),
            GeneratorKind::Processing => processing::generate(input, rng),
            GeneratorKind::Speaking => speaking::generate(input, &self.previous, rng),
        }
    }

    /// Generate, smooth against the previous frame and keep the result
    pub fn next_frame<R: Rng + ?Sized>(
        &mut self,
        input: &FrameInput<'_>,
        rng: &mut R,
    ) -> &IntensityField {
        let mut field = self.generate(input, rng);
        smoothing::smooth(&mut field, &self.previous);
        self.previous = field;
        &self.previous
    }

    /// Most recent smoothed field
    pub fn latest(&self) -> &IntensityField {
        &self.previous
    }

    /// Forget history, e.g. after a resize
    pub fn reset(&mut self, geometry: &GridGeometry) {
        self.previous = geometry.empty_field();
    }
}
