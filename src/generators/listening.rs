//! Listening pattern: radial waves over vertical data streams

use super::{hysteresis, sparkle, wave, FrameInput};
use crate::field::IntensityField;
use rand::Rng;
use std::f32::consts::PI;

const STREAM_WEIGHT: f32 = 0.3;
const BAND_WEIGHT: f32 = 0.2;
const RADIAL_WEIGHT: f32 = 0.4;
const PULSE_WEIGHT: f32 = 0.1;
const SPARKLE_CHANCE: f32 = 0.03;

/// Generate one raw listening frame
///
/// `previous` is this pattern's last smoothed field, used for hysteresis.
pub fn generate<R: Rng + ?Sized>(
    input: &FrameInput<'_>,
    previous: &IntensityField,
    rng: &mut R,
) -> IntensityField {
    let t = input.time;
    let geometry = input.geometry;
    let mut field = geometry.empty_field();
    let track_previous = previous.same_shape(&field);

    for (col, row, pos) in geometry.valid_cells() {
        let stream_phase = ((pos.ny * 0.5 + 0.5) * 10.0 + t * 1.2).rem_euclid(3.0);
        let stream = wave(stream_phase * PI);
        let bands = wave(pos.ny * 12.0 + t * 0.6);
        let radial = wave(pos.dist * 15.0 - t * 1.2);
        let pulse = (-pos.dist * 3.0).exp() * wave(t * 2.0);

        let mut intensity = (stream * STREAM_WEIGHT
            + bands * BAND_WEIGHT
            + radial * RADIAL_WEIGHT
            + pulse * PULSE_WEIGHT)
            * (1.0 - pos.dist * 0.5);
        intensity += sparkle(rng, SPARKLE_CHANCE);

        let was_lit = track_previous && previous.is_lit(col, row);
        field.set(col, row, hysteresis(intensity, was_lit));
    }

    field
}
