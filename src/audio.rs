//! Audio features consumed by the speaking pattern
//!
//! Feature extraction happens elsewhere; the engine only looks at overall
//! energy and onset strength.

use serde::{Deserialize, Serialize};

/// Summary of the assistant's outgoing audio for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    /// Overall energy, roughly 0.0 - 1.0
    pub energy: f32,
    /// Onset detection strength, roughly 0.0 - 1.0
    pub onset: f32,
    /// Spectrum bins, opaque to the engine
    #[serde(default)]
    pub spectrum: Option<Vec<f32>>,
}

impl AudioFeatures {
    pub fn new(energy: f32, onset: f32) -> Self {
        Self {
            energy,
            onset,
            spectrum: None,
        }
    }

    /// Oscillating stand-in for live audio, `seconds` being wall-clock time
    pub fn simulated(seconds: f64) -> Self {
        Self::new(
            (0.5 + 0.5 * (seconds * 0.5).sin()) as f32,
            (0.1 + 0.1 * (seconds * 2.0).sin()) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrum_is_optional_in_toml() {
        let features: AudioFeatures = toml::from_str("energy = 0.2\nonset = 0.1").unwrap();
        assert_eq!(features, AudioFeatures::new(0.2, 0.1));

        let features: AudioFeatures =
            toml::from_str("energy = 0.2\nonset = 0.1\nspectrum = [0.5, 0.25]").unwrap();
        assert_eq!(features.spectrum, Some(vec![0.5, 0.25]));
    }

    #[test]
    fn test_simulated_features_stay_in_range() {
        for step in 0..200 {
            let f = AudioFeatures::simulated(step as f64 * 0.1);
            assert!((0.0..=1.0).contains(&f.energy));
            assert!((0.0..=0.2).contains(&f.onset));
        }
    }
}
