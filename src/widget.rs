//! The embeddable state indicator
//!
//! [`VoiceWidget`] owns the geometry, one generator per pattern, the
//! transition engine and the frame buffer. The host calls
//! [`update`](VoiceWidget::update) once per tick.

use crate::audio::AudioFeatures;
use crate::config::AnimationConfig;
use crate::error::Result;
use crate::field::IntensityField;
use crate::generators::{FrameInput, StateGenerator};
use crate::geometry::GridGeometry;
use crate::render::{self, mix_colors, FrameImage};
use crate::state::{AnimationStateKind, GeneratorKind};
use crate::transition::{BlendContext, TransitionEngine};
use image::Rgb;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// Dot-disc indicator for a voice assistant
pub struct VoiceWidget {
    config: AnimationConfig,
    geometry: GridGeometry,
    frame_count: u64,
    state: AnimationStateKind,
    listening: StateGenerator,
    processing: StateGenerator,
    speaking: StateGenerator,
    transition: TransitionEngine,
    audio: Option<AudioFeatures>,
    /// What the last frame showed, after any transition blend
    displayed: IntensityField,
    surface: FrameImage,
    rng: StdRng,
}

impl VoiceWidget {
    /// Create a widget at the configured size
    pub fn new(config: AnimationConfig) -> Result<Self> {
        config.validate()?;
        let geometry = GridGeometry::compute(config.width, config.height)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            "Voice widget {}x{}: {}x{} dots, spacing {}",
            geometry.width(),
            geometry.height(),
            geometry.cols(),
            geometry.rows(),
            geometry.dot_spacing()
        );

        Ok(Self {
            listening: StateGenerator::new(GeneratorKind::Listening, &geometry),
            processing: StateGenerator::new(GeneratorKind::Processing, &geometry),
            speaking: StateGenerator::new(GeneratorKind::Speaking, &geometry),
            displayed: geometry.empty_field(),
            surface: FrameImage::new(geometry.width(), geometry.height()),
            state: config.initial_state,
            frame_count: 0,
            transition: TransitionEngine::new(),
            audio: None,
            geometry,
            config,
            rng,
        })
    }

    /// Change the surface size
    ///
    /// On error the widget keeps its previous size. On success any running
    /// transition is dropped and all pattern history starts from zero.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if (width, height) == (self.geometry.width(), self.geometry.height()) {
            return Ok(());
        }
        let geometry = GridGeometry::compute(width, height)?;

        self.transition.cancel();
        for generator in [&mut self.listening, &mut self.processing, &mut self.speaking] {
            generator.reset(&geometry);
        }
        self.displayed = geometry.empty_field();
        self.surface = FrameImage::new(width, height);
        self.geometry = geometry;

        debug!(
            "Resized to {}x{} ({}x{} dots)",
            width,
            height,
            self.geometry.cols(),
            self.geometry.rows()
        );
        Ok(())
    }

    /// Switch to `target`, starting a transition; same state is a no-op
    pub fn set_state(&mut self, target: AnimationStateKind) {
        if target == self.state {
            return;
        }
        info!("State {} -> {}", self.state, target);

        self.transition.start(
            self.state,
            target,
            self.config.transition_frames,
            self.frame_count,
            &self.displayed,
            &self.geometry,
            &mut self.rng,
        );
        self.state = target;
    }

    /// Provide live audio features for the speaking pattern
    pub fn set_audio_features(&mut self, features: AudioFeatures) {
        self.audio = Some(features);
    }

    /// Go back to the speaking pattern's built-in oscillators
    pub fn clear_audio_features(&mut self) {
        self.audio = None;
    }

    /// Advance one frame and draw it
    pub fn update(&mut self) -> &FrameImage {
        self.frame_count += 1;
        let time = self.frame_count as f32 * self.config.animation_speed;
        let color = self.base_color();

        let audio = match self.state {
            AnimationStateKind::Speaking => self.audio.as_ref(),
            _ => None,
        };
        let input = FrameInput {
            time,
            geometry: &self.geometry,
            audio,
        };
        let generator = match self.state.generator() {
            GeneratorKind::Listening => &mut self.listening,
            GeneratorKind::Processing => &mut self.processing,
            GeneratorKind::Speaking => &mut self.speaking,
        };
        let target = generator.next_frame(&input, &mut self.rng);

        self.displayed = if self.transition.is_active() {
            let ctx = BlendContext {
                frame: self.frame_count,
                time,
                geometry: &self.geometry,
            };
            self.transition.apply(target, &ctx, &mut self.rng)
        } else {
            target.clone()
        };

        let dots = render::render(&self.displayed, &self.geometry, color);
        render::rasterize(&dots, &mut self.surface);
        &self.surface
    }

    /// Dot color for the current frame, shifting during a transition
    fn base_color(&self) -> Rgb<u8> {
        let palette = &self.config.palette;
        match self.transition.state() {
            Some(t) => mix_colors(
                palette.color_for(t.from),
                palette.color_for(t.to),
                t.color_mix(self.frame_count),
            ),
            None => palette.color_for(self.state),
        }
    }

    /// Last rendered frame
    pub fn current_surface(&self) -> &FrameImage {
        &self.surface
    }

    pub fn state(&self) -> AnimationStateKind {
        self.state
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Field shown on the last frame
    pub fn displayed_field(&self) -> &IntensityField {
        &self.displayed
    }

    pub fn audio_features(&self) -> Option<&AudioFeatures> {
        self.audio.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_active()
    }

    /// Progress of the running transition at the current frame, if any
    pub fn transition_progress(&self) -> Option<f32> {
        self.transition
            .state()
            .map(|t| t.progress_at(self.frame_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> VoiceWidget {
        VoiceWidget::new(AnimationConfig::default().with_size(300, 300).with_seed(42)).unwrap()
    }

    #[test]
    fn test_update_produces_full_frame() {
        let mut w = widget();
        let frame = w.update();
        assert_eq!(frame.dimensions(), (300, 300));
        assert_eq!(w.frame_count(), 1);
        assert!(w.displayed_field().max_value() > 0.0);
    }

    #[test]
    fn test_same_state_is_noop() {
        let mut w = widget();
        w.update();
        w.set_state(AnimationStateKind::Listening);
        assert!(!w.is_transitioning());
    }

    #[test]
    fn test_transition_runs_for_configured_frames() {
        let mut w = VoiceWidget::new(
            AnimationConfig::default()
                .with_size(300, 300)
                .with_seed(1)
                .with_transition_frames(10),
        )
        .unwrap();
        for _ in 0..5 {
            w.update();
        }
        w.set_state(AnimationStateKind::Processing);
        assert!(w.is_transitioning());

        for _ in 0..9 {
            w.update();
            assert!(w.is_transitioning());
        }
        w.update();
        assert!(!w.is_transitioning());
        assert_eq!(w.state(), AnimationStateKind::Processing);
    }

    #[test]
    fn test_resize_resets_history() {
        let mut w = widget();
        w.update();
        w.set_state(AnimationStateKind::Speaking);
        w.update();

        w.resize(500, 400).unwrap();
        assert!(!w.is_transitioning());
        assert_eq!(w.displayed_field().shape(), w.geometry().shape());
        assert_eq!(w.displayed_field().max_value(), 0.0);
        assert_eq!(w.current_surface().dimensions(), (500, 400));

        w.update();
        assert_eq!(w.displayed_field().shape(), (66, 83));
    }

    #[test]
    fn test_rejected_resize_keeps_geometry() {
        let mut w = widget();
        let err = w.resize(20, 20).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(w.geometry().width(), 300);
        w.update();
    }

    #[test]
    fn test_idle_uses_muted_color() {
        let mut w = VoiceWidget::new(
            AnimationConfig::default()
                .with_size(300, 300)
                .with_seed(5)
                .with_initial_state(AnimationStateKind::Idle),
        )
        .unwrap();
        let frame = w.update();
        let idle = Rgb([80, 80, 100]);
        // every lit pixel is a scaled-down idle color
        for p in frame.pixels() {
            assert!(p[0] <= idle[0] && p[1] <= idle[1] && p[2] <= idle[2]);
        }
    }
}
