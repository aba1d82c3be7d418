//! Transitions between conversational states
//!
//! A transition is a small state machine keyed on frame counts: it becomes
//! active in [`TransitionEngine::start`] and deactivates on the first frame
//! its progress reaches 1.0. Blending is chosen per (from, to) pair when the
//! transition starts.

pub mod blend;
pub mod particles;

pub use particles::{freeze_field, FrozenSnapshot, ParticleSnapshot};

use crate::field::IntensityField;
use crate::geometry::GridGeometry;
use crate::state::AnimationStateKind;
use rand::Rng;
use tracing::{debug, warn};

/// Blend choreography for a state pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    SpeakingToListening,
    ListeningToProcessing,
    ProcessingToSpeaking,
    Crossfade {
        from: AnimationStateKind,
        to: AnimationStateKind,
    },
}

impl TransitionKind {
    pub fn for_pair(from: AnimationStateKind, to: AnimationStateKind) -> Self {
        use AnimationStateKind::*;
        match (from, to) {
            (Speaking, Listening) => TransitionKind::SpeakingToListening,
            (Listening, Processing) => TransitionKind::ListeningToProcessing,
            (Processing, Speaking) => TransitionKind::ProcessingToSpeaking,
            (from, to) => TransitionKind::Crossfade { from, to },
        }
    }

    /// How fast the dot color shifts relative to progress
    pub fn color_rate(&self) -> f32 {
        match self {
            TransitionKind::SpeakingToListening => 1.5,
            TransitionKind::ListeningToProcessing => 2.5,
            _ => 1.0,
        }
    }
}

/// Everything about the running transition
#[derive(Debug, Clone)]
pub struct TransitionState {
    pub kind: TransitionKind,
    pub from: AnimationStateKind,
    pub to: AnimationStateKind,
    pub start_frame: u64,
    pub duration_frames: u32,
    pub frozen_field: IntensityField,
    pub frozen_particles: Vec<ParticleSnapshot>,
}

impl TransitionState {
    /// Progress at `frame`, clamped to 0.0 - 1.0; no side effects
    pub fn progress_at(&self, frame: u64) -> f32 {
        if self.duration_frames == 0 {
            return 1.0;
        }
        let elapsed = frame.saturating_sub(self.start_frame);
        (elapsed as f64 / self.duration_frames as f64).min(1.0) as f32
    }

    /// Fraction of the way from the old color to the new one
    pub fn color_mix(&self, frame: u64) -> f32 {
        (self.progress_at(frame) * self.kind.color_rate()).min(1.0)
    }
}

/// Holds at most one active transition
#[derive(Debug, Default)]
pub struct TransitionEngine {
    active: Option<TransitionState>,
}

/// Per-frame inputs the blend strategies need besides the two fields
#[derive(Debug, Clone, Copy)]
pub struct BlendContext<'a> {
    pub frame: u64,
    /// Frame clock, `frame * animation_speed`
    pub time: f32,
    pub geometry: &'a GridGeometry,
}

impl TransitionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a transition, replacing any transition already running
    ///
    /// `field` is what was on screen at the switch; it is frozen together with
    /// particles for its brighter dots.
    #[allow(clippy::too_many_arguments)]
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        from: AnimationStateKind,
        to: AnimationStateKind,
        duration_frames: u32,
        current_frame: u64,
        field: &IntensityField,
        geometry: &GridGeometry,
        rng: &mut R,
    ) {
        if let Some(old) = &self.active {
            debug!(
                "Interrupting transition {} -> {} at {:.2}",
                old.from,
                old.to,
                old.progress_at(current_frame)
            );
        }

        let FrozenSnapshot { field, particles } = freeze_field(field, geometry, rng);
        let kind = TransitionKind::for_pair(from, to);
        debug!(
            "Transition {} -> {} ({:?}) over {} frames, {} particles",
            from,
            to,
            kind,
            duration_frames,
            particles.len()
        );

        self.active = Some(TransitionState {
            kind,
            from,
            to,
            start_frame: current_frame,
            duration_frames,
            frozen_field: field,
            frozen_particles: particles,
        });
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn state(&self) -> Option<&TransitionState> {
        self.active.as_ref()
    }

    /// Progress at `frame`; deactivates the transition once it reaches 1.0
    ///
    /// Returns 1.0 when nothing is running.
    pub fn progress(&mut self, frame: u64) -> f32 {
        let Some(state) = &self.active else {
            return 1.0;
        };
        let progress = state.progress_at(frame);
        if progress >= 1.0 {
            self.finish();
        }
        progress
    }

    /// Drop the running transition, e.g. when the geometry changes
    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            debug!("Transition cancelled");
        }
    }

    /// Blend the frozen field into `target` for this frame
    ///
    /// Returns `target` unchanged when no transition is running. Like
    /// [`progress`](Self::progress), this deactivates the transition on the
    /// frame it completes.
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        target: &IntensityField,
        ctx: &BlendContext<'_>,
        rng: &mut R,
    ) -> IntensityField {
        let Some(state) = &self.active else {
            return target.clone();
        };

        if !state.frozen_field.same_shape(target) {
            warn!(
                "Dropping stale transition: frozen {:?} vs target {:?}",
                state.frozen_field.shape(),
                target.shape()
            );
            self.active = None;
            return target.clone();
        }

        let progress = state.progress_at(ctx.frame);
        let from = &state.frozen_field;
        let blended = match state.kind {
            TransitionKind::SpeakingToListening => {
                blend::speaking_to_listening(from, target, progress)
            }
            TransitionKind::ListeningToProcessing => blend::listening_to_processing(
                from,
                target,
                &state.frozen_particles,
                progress,
                ctx.time,
                ctx.geometry,
                rng,
            ),
            TransitionKind::ProcessingToSpeaking => {
                blend::processing_to_speaking(from, target, progress, ctx.geometry, rng)
            }
            TransitionKind::Crossfade { .. } => blend::crossfade(from, target, progress),
        };

        if progress >= 1.0 {
            self.finish();
        }
        blended
    }

    fn finish(&mut self) {
        if let Some(state) = self.active.take() {
            debug!("Transition {} -> {} complete", state.from, state.to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use AnimationStateKind::*;

    fn started(from: AnimationStateKind, to: AnimationStateKind, duration: u32) -> TransitionEngine {
        let geo = GridGeometry::compute(300, 300).unwrap();
        let mut engine = TransitionEngine::new();
        engine.start(
            from,
            to,
            duration,
            100,
            &geo.empty_field(),
            &geo,
            &mut StdRng::seed_from_u64(0),
        );
        engine
    }

    #[test]
    fn test_pair_dispatch() {
        assert_eq!(
            TransitionKind::for_pair(Speaking, Listening),
            TransitionKind::SpeakingToListening
        );
        assert_eq!(
            TransitionKind::for_pair(Listening, Processing),
            TransitionKind::ListeningToProcessing
        );
        assert_eq!(
            TransitionKind::for_pair(Processing, Speaking),
            TransitionKind::ProcessingToSpeaking
        );
        assert_eq!(
            TransitionKind::for_pair(Listening, Speaking),
            TransitionKind::Crossfade {
                from: Listening,
                to: Speaking
            }
        );
        assert!(matches!(
            TransitionKind::for_pair(Idle, Listening),
            TransitionKind::Crossfade { .. }
        ));
    }

    #[test]
    fn test_progress_halfway() {
        let mut engine = started(Listening, Processing, 30);
        assert_eq!(engine.progress(115), 0.5);
        assert!(engine.is_active());
    }

    #[test]
    fn test_progress_is_monotonic_and_deactivates_at_end() {
        let engine = started(Listening, Processing, 45);
        let state = engine.state().unwrap().clone();

        let mut last = 0.0;
        for frame in 90..160 {
            let p = state.progress_at(frame);
            assert!(p >= last);
            assert!((0.0..=1.0).contains(&p));
            last = p;
        }
        assert_eq!(state.progress_at(145), 1.0);

        let mut engine = engine;
        assert!(engine.progress(144) < 1.0);
        assert!(engine.is_active());
        assert_eq!(engine.progress(145), 1.0);
        assert!(!engine.is_active());
        assert_eq!(engine.progress(146), 1.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut engine = started(Idle, Speaking, 0);
        assert_eq!(engine.progress(100), 1.0);
        assert!(!engine.is_active());
    }

    #[test]
    fn test_new_transition_replaces_old() {
        let geo = GridGeometry::compute(300, 300).unwrap();
        let mut engine = started(Listening, Processing, 45);
        engine.start(
            Processing,
            Speaking,
            20,
            110,
            &geo.empty_field(),
            &geo,
            &mut StdRng::seed_from_u64(1),
        );
        let state = engine.state().unwrap();
        assert_eq!(state.kind, TransitionKind::ProcessingToSpeaking);
        assert_eq!(state.start_frame, 110);
        assert_eq!(state.duration_frames, 20);
    }

    #[test]
    fn test_apply_finishes_with_target() {
        let geo = GridGeometry::compute(300, 300).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let mut engine = started(Idle, Listening, 10);
        let mut target = geo.empty_field();
        target.set(50, 50, 0.8);

        let ctx = BlendContext {
            frame: 105,
            time: 5.25,
            geometry: &geo,
        };
        let mid = engine.apply(&target, &ctx, &mut rng);
        assert!((mid.get(50, 50) - 0.4).abs() < 1e-6);

        let ctx = BlendContext { frame: 110, ..ctx };
        let end = engine.apply(&target, &ctx, &mut rng);
        assert_eq!(end, target);
        assert!(!engine.is_active());
    }

    #[test]
    fn test_apply_drops_transition_on_shape_change() {
        let small = GridGeometry::compute(200, 200).unwrap();
        let mut engine = started(Speaking, Listening, 45);
        let target = small.empty_field();
        let ctx = BlendContext {
            frame: 101,
            time: 5.05,
            geometry: &small,
        };
        let out = engine.apply(&target, &ctx, &mut StdRng::seed_from_u64(0));
        assert_eq!(out, target);
        assert!(!engine.is_active());
    }

    #[test]
    fn test_color_mix_rates() {
        let engine = started(Listening, Processing, 40);
        let state = engine.state().unwrap();
        assert_eq!(state.color_mix(108), 0.5);
        assert_eq!(state.color_mix(120), 1.0);

        let engine = started(Listening, Speaking, 40);
        assert_eq!(engine.state().unwrap().color_mix(120), 0.5);
    }
}
