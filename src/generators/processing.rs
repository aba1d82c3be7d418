//! Processing pattern: concentric rings flowing inward to a pulsing core
//!
//! Layers are combined with `max`. Ring points near the center may be boosted
//! past 1.0 toward white, up to [`CEILING`].

use super::FrameInput;
use crate::field::IntensityField;
use crate::geometry::NormalizedPos;
use rand::Rng;
use std::f32::consts::TAU;

/// Highest value this pattern produces
pub const CEILING: f32 = 1.8;

const RING_COUNT: usize = 6;
const PARTICLE_COUNT: usize = 25;

/// One inward-travelling ring at a given instant
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ring {
    radius: f32,
    width: f32,
    peak: f32,
}

impl Ring {
    fn at(index: usize, t: f32) -> Self {
        let phase = (t * 0.4 + index as f32 / RING_COUNT as f32).rem_euclid(1.0);
        let outer_fade = (phase * 5.0).min(1.0);
        let inner_fade = ((1.0 - phase) * 5.0).min(1.0);
        Self {
            radius: 1.0 - phase,
            width: 0.05 + 0.02 * phase,
            peak: (0.4 + 0.3 * (1.0 - phase)) * outer_fade * inner_fade,
        }
    }

    /// Contribution at `pos`, if the point lies on the ring
    fn sample(&self, pos: &NormalizedPos, t: f32) -> Option<f32> {
        let reach = self.width * 1.5;
        let offset = (pos.dist - self.radius).abs();
        if offset >= reach {
            return None;
        }
        let falloff = offset / reach;
        let angle = pos.ny.atan2(pos.nx);
        let ripple = 1.0 + 0.05 * (angle * 4.0 + t * 1.5).sin();
        Some(self.peak * (1.0 - falloff * falloff) * ripple)
    }

    /// Extra brightness for rings close to the center
    fn white_blend(&self) -> f32 {
        1.0 + (1.0 - self.radius) * 0.8
    }
}

/// Generate one raw processing frame
pub fn generate<R: Rng + ?Sized>(input: &FrameInput<'_>, rng: &mut R) -> IntensityField {
    let t = input.time;
    let geometry = input.geometry;
    let mut field = geometry.empty_field();

    let rings: Vec<Ring> = (0..RING_COUNT).map(|i| Ring::at(i, t)).collect();
    let core_radius = 0.2 + 0.05 * (t * 1.5).sin();
    let core_pulse = 0.9 + 0.1 * (t * 2.0).sin();
    let glow_pulse = 0.9 + 0.1 * (t * 1.2).sin();

    for (col, row, pos) in geometry.valid_cells() {
        let mut value = 0.15 * (1.0 - pos.dist.powf(1.5)) * glow_pulse;

        for ring in &rings {
            let Some(point) = ring.sample(&pos, t) else {
                continue;
            };
            let below = value;
            value = value.max(point);
            if point > 0.3 && point > below {
                value = (point * ring.white_blend()).min(CEILING);
            }
        }

        if pos.dist < core_radius {
            let ratio = pos.dist / core_radius;
            let core = (1.0 - ratio * ratio) * core_pulse;
            value = value.max(core);

            let inner_radius = core_radius * 0.5;
            if pos.dist < inner_radius {
                let tint = 1.0 - pos.dist / inner_radius;
                value = value.max(core * (1.0 - tint * 0.2));
            }
        }

        field.set(col, row, value.clamp(0.0, CEILING));
    }

    for i in 0..PARTICLE_COUNT {
        let angle = rng.gen::<f32>() * TAU;
        let dist = 0.2 + 0.8 * rng.gen::<f32>();
        let pull = 0.15 * (1.0 - (t * 1.5 + i as f32 * 0.7).cos());
        let nx = angle.cos() * dist * (1.0 - pull);
        let ny = angle.sin() * dist * (1.0 - pull);

        if let Some((col, row)) = geometry.cell_for_normalized(nx, ny) {
            field.raise(col, row, 0.4 + 0.2 * rng.gen::<f32>());
        }
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GridGeometry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ring_radius_moves_inward() {
        let a = Ring::at(0, 0.0);
        let b = Ring::at(0, 0.5);
        assert_eq!(a.radius, 1.0);
        assert!(b.radius < a.radius);
        // fades out at the rim and at the center
        assert_eq!(a.peak, 0.0);
    }

    #[test]
    fn test_output_respects_ceiling() {
        let geo = GridGeometry::compute(500, 500).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for frame in 0..60 {
            let input = FrameInput {
                time: frame as f32 * 0.05,
                geometry: &geo,
                audio: None,
            };
            let field = generate(&input, &mut rng);
            assert!(field.max_value() <= CEILING);
            for (col, row, value) in field.cells() {
                if !geo.is_valid(col, row) {
                    assert_eq!(value, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_core_is_bright() {
        let geo = GridGeometry::compute(600, 600).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let input = FrameInput {
            time: 0.0,
            geometry: &geo,
            audio: None,
        };
        let field = generate(&input, &mut rng);
        assert!(field.get(33, 33) > 0.85);
    }

    #[test]
    fn test_ambient_glow_covers_disc() {
        let geo = GridGeometry::compute(300, 300).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let input = FrameInput {
            time: 3.0,
            geometry: &geo,
            audio: None,
        };
        let field = generate(&input, &mut rng);
        // everything strictly inside the rim glows at least a little
        for (col, row, pos) in geo.valid_cells() {
            if pos.dist < 0.95 {
                assert!(field.get(col, row) > 0.0);
            }
        }
    }
}
