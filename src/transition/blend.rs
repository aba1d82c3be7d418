//! Per-pair blend choreography
//!
//! Every function takes the frozen pre-transition field (`from`) and the
//! freshly smoothed field of the new state (`to`) and returns the field to
//! display at `progress`.

use super::particles::{ParticleSnapshot, PARTICLE_THRESHOLD};
use crate::field::IntensityField;
use crate::geometry::GridGeometry;
use rand::Rng;

/// Speaking → Listening: hold and dim the speaking dots, then morph
///
/// Until 0.6 the previously lit dots dim to 70%. After that every cell
/// cross-fades from its held level to the target; dots that only exist in the
/// listening pattern ease in quadratically.
pub fn speaking_to_listening(
    from: &IntensityField,
    to: &IntensityField,
    progress: f32,
) -> IntensityField {
    let mut out = IntensityField::new(to.rows(), to.cols());
    let target = to.as_slice();

    if progress < 0.6 {
        let dim = 1.0 - (progress / 0.6) * 0.3;
        for (value, &prev) in out.as_mut_slice().iter_mut().zip(from.as_slice()) {
            *value = if prev > PARTICLE_THRESHOLD { prev * dim } else { prev };
        }
        return out;
    }

    let b = (progress - 0.6) / 0.4;
    for ((value, &prev), &next) in out
        .as_mut_slice()
        .iter_mut()
        .zip(from.as_slice())
        .zip(target)
    {
        let was_active = prev > PARTICLE_THRESHOLD;
        let held = if was_active { prev * 0.7 } else { prev };
        let weight = if next > PARTICLE_THRESHOLD && !was_active {
            b * b
        } else {
            b
        };
        *value = held * (1.0 - b) + next * weight;
    }
    out
}

/// Listening → Processing: the white dots float away, then the rings fade in
pub fn listening_to_processing<R: Rng + ?Sized>(
    from: &IntensityField,
    to: &IntensityField,
    particles: &[ParticleSnapshot],
    progress: f32,
    time: f32,
    geometry: &GridGeometry,
    rng: &mut R,
) -> IntensityField {
    if progress < 0.4 {
        let fade = 1.0 - progress * 0.5;
        let mut out = from.clone();
        out.as_mut_slice().iter_mut().for_each(|v| *v *= fade);

        for particle in particles {
            let rise = particle.float_speed * progress * 3.0 * 0.1;
            let drift = 0.2 * (time + particle.phase_offset).sin() * progress;
            if let Some((col, row)) = particle.displaced(rise, drift, geometry) {
                out.raise(col, row, particle.intensity * fade);
            }
        }
        return out;
    }

    let b = (progress - 0.4) / 0.6;
    let mut out = to.clone();
    out.as_mut_slice().iter_mut().for_each(|v| *v *= b);

    if progress < 0.7 {
        let fade = 1.0 - (progress - 0.4) / 0.3;
        for particle in particles {
            // roughly a third of the dots linger
            if rng.gen::<f32>() <= 0.7 {
                continue;
            }
            let rise = particle.float_speed * progress * 5.0 * 0.15;
            let drift = 0.3 * (time + particle.phase_offset).sin() * progress;
            if let Some((col, row)) = particle.displaced(rise, drift, geometry) {
                out.raise(col, row, particle.intensity * 0.3 * fade);
            }
        }
    }
    out
}

/// Processing → Speaking: the center resolves first, data bits emerge late
pub fn processing_to_speaking<R: Rng + ?Sized>(
    from: &IntensityField,
    to: &IntensityField,
    progress: f32,
    geometry: &GridGeometry,
    rng: &mut R,
) -> IntensityField {
    let mut out = IntensityField::new(to.rows(), to.cols());
    let ease = progress * (2.0 - progress);
    let center_rate = (progress * 1.5).min(1.0);

    for (col, row, pos) in geometry.valid_cells() {
        let rate = if pos.dist < 0.3 { center_rate } else { ease };
        let mut value = from.get(col, row) * (1.0 - rate) + to.get(col, row) * rate;

        if progress > 0.5 && rng.gen::<f32>() < 0.03 {
            value += rng.gen::<f32>() * 0.2 * (progress - 0.5) * 2.0;
        }
        out.set(col, row, value);
    }
    out
}

/// Any other pair: plain linear cross-fade
pub fn crossfade(from: &IntensityField, to: &IntensityField, progress: f32) -> IntensityField {
    let mut out = IntensityField::new(to.rows(), to.cols());
    for ((value, &prev), &next) in out
        .as_mut_slice()
        .iter_mut()
        .zip(from.as_slice())
        .zip(to.as_slice())
    {
        *value = prev * (1.0 - progress) + next * progress;
    }
    out
}
