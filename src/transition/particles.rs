//! Frozen snapshots taken at the start of a transition

use crate::field::IntensityField;
use crate::geometry::GridGeometry;
use rand::Rng;
use std::f32::consts::TAU;

/// Cells brighter than this become floating particles
pub const PARTICLE_THRESHOLD: f32 = 0.2;

/// A lit dot captured when a transition starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSnapshot {
    pub grid_x: usize,
    pub grid_y: usize,
    pub intensity: f32,
    pub norm_x: f32,
    pub norm_y: f32,
    pub distance: f32,
    /// Random phase for the sideways drift, 0 - 2π
    pub phase_offset: f32,
    /// Random float rate, 0.5 - 1.5
    pub float_speed: f32,
}

impl ParticleSnapshot {
    /// Cell the particle lands on after floating `rise` rows up and
    /// drifting `drift` columns sideways, if still inside the disc
    pub fn displaced(&self, rise: f32, drift: f32, geometry: &GridGeometry) -> Option<(usize, usize)> {
        let col = (self.grid_x as f32 + drift) as i64;
        let row = (self.grid_y as f32 - rise) as i64;
        geometry
            .is_valid_signed(col, row)
            .then_some((col as usize, row as usize))
    }
}

/// Field and particles frozen at transition start
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenSnapshot {
    pub field: IntensityField,
    pub particles: Vec<ParticleSnapshot>,
}

/// Copy `field` and capture every cell above [`PARTICLE_THRESHOLD`] as a
/// particle, in row-major order
pub fn freeze_field<R: Rng + ?Sized>(
    field: &IntensityField,
    geometry: &GridGeometry,
    rng: &mut R,
) -> FrozenSnapshot {
    let particles = field
        .cells()
        .filter(|(_, _, value)| *value > PARTICLE_THRESHOLD)
        .map(|(col, row, value)| {
            let pos = geometry.to_normalized(col, row);
            ParticleSnapshot {
                grid_x: col,
                grid_y: row,
                intensity: value,
                norm_x: pos.nx,
                norm_y: pos.ny,
                distance: pos.dist,
                phase_offset: rng.gen::<f32>() * TAU,
                float_speed: 0.5 + rng.gen::<f32>(),
            }
        })
        .collect();

    FrozenSnapshot {
        field: field.clone(),
        particles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_freeze_captures_cells_above_threshold() {
        let geo = GridGeometry::compute(300, 300).unwrap();
        let mut field = geo.empty_field();
        field.set(50, 50, 0.9);
        field.set(40, 52, 0.21);
        field.set(60, 45, 0.5);
        field.set(50, 51, 0.2);
        field.set(51, 50, 0.1);

        let mut rng = StdRng::seed_from_u64(0);
        let snapshot = freeze_field(&field, &geo, &mut rng);

        assert_eq!(snapshot.particles.len(), 3);
        assert_eq!(snapshot.field, field);
        // row-major order
        let cells: Vec<_> = snapshot
            .particles
            .iter()
            .map(|p| (p.grid_x, p.grid_y))
            .collect();
        assert_eq!(cells, vec![(60, 45), (50, 50), (40, 52)]);
        for p in &snapshot.particles {
            assert!((0.0..TAU).contains(&p.phase_offset));
            assert!((0.5..1.5).contains(&p.float_speed));
        }
    }

    #[test]
    fn test_freeze_records_normalized_position() {
        let geo = GridGeometry::compute(600, 600).unwrap();
        let mut field = geo.empty_field();
        field.set(33, 33, 1.0);
        let snapshot = freeze_field(&field, &geo, &mut StdRng::seed_from_u64(1));
        let p = snapshot.particles[0];
        assert_eq!(p.intensity, 1.0);
        assert!(p.distance < 0.02);
        assert_eq!(p.distance, geo.to_normalized(33, 33).dist);
    }

    #[test]
    fn test_displacement_leaving_disc_is_dropped() {
        let geo = GridGeometry::compute(600, 600).unwrap();
        let mut field = geo.empty_field();
        field.set(33, 33, 1.0);
        let snapshot = freeze_field(&field, &geo, &mut StdRng::seed_from_u64(1));
        let p = snapshot.particles[0];

        assert_eq!(p.displaced(1.2, 0.3, &geo), Some((33, 31)));
        assert_eq!(p.displaced(40.0, 0.0, &geo), None);
    }
}
