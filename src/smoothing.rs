//! Temporal smoothing of generated fields
//!
//! Blends each freshly generated field with the one the same generator
//! produced on the previous frame to reduce flicker.

use crate::field::{IntensityField, OFF};
use tracing::debug;

/// Weight of the previous frame in the blend
pub const CARRY_OVER: f32 = 0.4;

/// Blend `new` with `previous` in place
///
/// Cells off in both stay off. Returns `false` and leaves `new` untouched when
/// the shapes differ, e.g. on the first frame after a resize.
pub fn smooth(new: &mut IntensityField, previous: &IntensityField) -> bool {
    if !new.same_shape(previous) {
        debug!(
            "Skipping smoothing: shape {:?} vs previous {:?}",
            new.shape(),
            previous.shape()
        );
        return false;
    }

    for (value, prev) in new.as_mut_slice().iter_mut().zip(previous.as_slice()) {
        if *value > OFF || *prev > OFF {
            *value = *value * (1.0 - CARRY_OVER) + *prev * CARRY_OVER;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_weights() {
        let mut new = IntensityField::from_vec(1, 3, vec![1.0, 0.0, 0.0]).unwrap();
        let prev = IntensityField::from_vec(1, 3, vec![0.5, 0.5, 0.0]).unwrap();

        assert!(smooth(&mut new, &prev));
        let out = new.as_slice();
        assert!((out[0] - 0.8).abs() < 1e-6);
        assert!((out[1] - 0.2).abs() < 1e-6);
        assert_eq!(out[2], 0.0);
    }

    #[test]
    fn test_shape_mismatch_skips_blend() {
        let mut new = IntensityField::from_vec(1, 2, vec![0.9, 0.0]).unwrap();
        let prev = IntensityField::new(2, 2);

        assert!(!smooth(&mut new, &prev));
        assert_eq!(new.as_slice(), &[0.9, 0.0]);
    }
}
