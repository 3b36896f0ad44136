//! Per-frame fusion of audio, interaction state and emotion into shader inputs.

use std::cell::Cell;

use crate::analysis::EmotionData;
use crate::constants::{
    BLOOM_BASE_STRENGTH, BLOOM_MAX_STRENGTH, BLOOM_SPEAKING_BOOST, BLOOM_THINKING_BOOST,
    BLOOM_VOLUME_GAIN, MAX_FRAME_DT_SEC,
};
use crate::influence::AudioInfluence;
use crate::interaction::{InteractionMachine, InteractionState, StateUniforms};
use crate::presets::{Emotion, EmotionPreset};
use crate::spectrum::FrequencyFrame;
use crate::transition::EmotionTransition;

/// Everything the renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    pub time: f32,
    pub audio_low: f32,
    pub audio_mid: f32,
    pub audio_high: f32,
    pub state: StateUniforms,
    /// Smoothed, drives bloom.
    pub volume: f32,
    /// This frame's analyzer volume, for level meters.
    pub raw_volume: f32,
    pub bloom_strength: f32,
    pub preset: EmotionPreset,
}

/// Latches written by the turn loop and read by the frame loop.
///
/// Both live on the one UI thread; a `Cell` store is a whole-value write, so the
/// reader never sees half of an update.
#[derive(Debug, Default)]
pub struct SceneInputs {
    state: Cell<InteractionState>,
    emotion: Cell<Option<Emotion>>,
}

impl SceneInputs {
    pub fn set_state(&self, state: InteractionState) {
        self.state.set(state);
    }

    pub fn state(&self) -> InteractionState {
        self.state.get()
    }

    pub fn set_emotion(&self, emotion: Emotion) {
        self.emotion.set(Some(emotion));
    }

    pub fn take_emotion(&self) -> Option<Emotion> {
        self.emotion.take()
    }
}

pub fn bloom_strength(preset: &EmotionPreset, volume: f32, state: InteractionState) -> f32 {
    let boost = match state {
        InteractionState::Thinking => BLOOM_THINKING_BOOST,
        InteractionState::Speaking => BLOOM_SPEAKING_BOOST,
        _ => 1.0,
    };
    (BLOOM_BASE_STRENGTH * preset.bloom_intensity * (1.0 + volume * BLOOM_VOLUME_GAIN) * boost)
        .min(BLOOM_MAX_STRENGTH)
}

#[derive(Clone, Debug, Default)]
pub struct VisualEngine {
    influence: AudioInfluence,
    interaction: InteractionMachine,
    transition: EmotionTransition,
    shader_time: f64,
}

impl VisualEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_interaction_state(&mut self, state: InteractionState) {
        self.interaction.set_state(state);
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.state()
    }

    pub fn set_emotion(&mut self, data: &EmotionData, now_sec: f64) {
        self.set_emotion_target(Emotion::from_label(&data.emotion), now_sec);
    }

    pub fn set_emotion_target(&mut self, emotion: Emotion, now_sec: f64) {
        self.transition.set_target(emotion, now_sec);
    }

    /// Applies whatever the turn loop latched since the previous frame.
    pub fn apply_inputs(&mut self, inputs: &SceneInputs, now_sec: f64) {
        self.set_interaction_state(inputs.state());
        if let Some(emotion) = inputs.take_emotion() {
            self.set_emotion_target(emotion, now_sec);
        }
    }

    pub fn transition(&self) -> &EmotionTransition {
        &self.transition
    }

    pub fn influence(&self) -> AudioInfluence {
        self.influence
    }

    /// Advances all smoothed state by `dt_sec`. Call once per frame.
    pub fn update(&mut self, frame: &FrequencyFrame<'_>, dt_sec: f32, now_sec: f64) -> FrameParams {
        let dt = if dt_sec.is_finite() {
            dt_sec.clamp(0.0, MAX_FRAME_DT_SEC)
        } else {
            0.0
        };
        self.influence.update(frame, dt);
        let state = self.interaction.step(dt);
        let preset = self.transition.active(now_sec);
        // phase accumulates so a speed change never jumps the noise field
        self.shader_time += dt as f64 * preset.speed as f64;
        FrameParams {
            time: self.shader_time as f32,
            audio_low: self.influence.bass * preset.scale,
            audio_mid: self.influence.mid,
            audio_high: self.influence.treble,
            state,
            volume: self.influence.volume,
            raw_volume: if frame.volume.is_finite() { frame.volume } else { 0.0 },
            bloom_strength: bloom_strength(&preset, self.influence.volume, self.interaction.state()),
            preset,
        }
    }

    /// Back to construction state; the next transition starts from neutral.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
