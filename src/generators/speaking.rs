//! Speaking pattern: audio-reactive matrix with a white-hot center

use super::{hysteresis, sparkle, wave, FrameInput};
use crate::audio::AudioFeatures;
use crate::field::IntensityField;
use rand::Rng;
use std::f32::consts::PI;

/// Highest value this pattern produces
pub const CEILING: f32 = 2.0;

const CENTER_DISC_RADIUS: f32 = 0.35;
const WHITE_HOT_RADIUS: f32 = 0.2;
const WHITE_HOT_THRESHOLD: f32 = 0.7;

/// How strongly the audio drives the pattern this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioDrive {
    pub energy_scale: f32,
    pub onset_scale: f32,
}

impl AudioDrive {
    /// Scale live features, or fall back to slow oscillators of the clock
    pub fn new(audio: Option<&AudioFeatures>, t: f32) -> Self {
        match audio {
            Some(features) => Self {
                energy_scale: (features.energy * 35.0).clamp(0.0, 1.0),
                onset_scale: (features.onset * 90.0).clamp(0.0, 1.0),
            },
            None => Self {
                energy_scale: 0.5 + 0.3 * (t * 0.5).sin(),
                onset_scale: 0.1 + 0.1 * (t * 2.0).sin(),
            },
        }
    }
}

/// Sparkle probability by distance from center: rarer in the core
fn sparkle_chance(dist: f32) -> f32 {
    if dist < 0.3 {
        0.01
    } else if dist > 0.7 {
        0.04
    } else {
        0.03
    }
}

/// Generate one raw speaking frame
pub fn generate<R: Rng + ?Sized>(
    input: &FrameInput<'_>,
    previous: &IntensityField,
    rng: &mut R,
) -> IntensityField {
    let t = input.time;
    let geometry = input.geometry;
    let drive = AudioDrive::new(input.audio, t);
    let mut field = geometry.empty_field();
    let track_previous = previous.same_shape(&field);

    let energy_gain = 0.7 + 0.3 * drive.energy_scale;
    let disc_pulse = 0.8 + 0.2 * wave(t * 3.0);

    for (col, row, pos) in geometry.valid_cells() {
        let stream_phase = ((pos.ny * 0.5 + 0.5) * 10.0 + t * 1.5).rem_euclid(3.0);
        let stream = wave(stream_phase * PI);
        let bands = wave(pos.ny * 12.0 + t * 0.75);
        let radial = wave(pos.dist * 15.0 - t * 1.5);
        let pulse = (-pos.dist * 2.5).exp() * wave(t * 2.0);

        let center_disc = if pos.dist < CENTER_DISC_RADIUS {
            (0.9 * (1.0 - (pos.dist / CENTER_DISC_RADIUS).powf(1.5))).max(0.0) * disc_pulse
        } else {
            0.0
        };

        let base = (stream + bands + radial + pulse) * 0.25 * energy_gain;
        let center_bias = 1.0 - pos.dist.powf(1.2);
        let mut intensity = center_disc.max(base * center_bias);
        intensity += sparkle(rng, sparkle_chance(pos.dist));

        let was_lit = track_previous && previous.is_lit(col, row);
        let mut value = hysteresis(intensity, was_lit);

        if pos.dist < WHITE_HOT_RADIUS && intensity > WHITE_HOT_THRESHOLD {
            value = (intensity + (1.0 - pos.dist / WHITE_HOT_RADIUS)).min(CEILING);
        }

        field.set(col, row, value);
    }

    field
}
