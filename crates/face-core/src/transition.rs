use crate::constants::TRANSITION_DURATION_SEC;
use crate::easing::ease_in_out_cubic;
use crate::presets::{interpolate, Emotion, EmotionPreset};

/// Eased, time-boxed blend from the preset on screen to the latest emotion.
///
/// Times are seconds on any monotonic clock shared by all calls.
#[derive(Clone, Debug)]
pub struct EmotionTransition {
    current: EmotionPreset,
    target: Emotion,
    progress: f32,
    start_sec: f64,
    duration_sec: f64,
}

impl Default for EmotionTransition {
    fn default() -> Self {
        Self::new(Emotion::Neutral)
    }
}

impl EmotionTransition {
    pub fn new(initial: Emotion) -> Self {
        Self {
            current: *initial.preset(),
            target: initial,
            progress: 1.0,
            start_sec: 0.0,
            duration_sec: TRANSITION_DURATION_SEC,
        }
    }

    pub fn target(&self) -> Emotion {
        self.target
    }

    /// Bundle the next blend starts from; equals the target once committed.
    pub fn current(&self) -> &EmotionPreset {
        &self.current
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn in_flight(&self) -> bool {
        self.progress < 1.0
    }

    /// Latches a new target. Re-sending the settled target does nothing; an
    /// interruption restarts from the blend visible at `now_sec`.
    pub fn set_target(&mut self, emotion: Emotion, now_sec: f64) {
        if emotion == self.target && !self.in_flight() {
            return;
        }
        if self.in_flight() {
            let t = self.raw_progress(now_sec);
            self.current = interpolate(&self.current, self.target.preset(), ease_in_out_cubic(t));
        }
        log::info!("[emotion] -> {}", emotion.label());
        self.target = emotion;
        self.progress = 0.0;
        self.start_sec = now_sec;
    }

    /// Active bundle for this frame. Call once per frame: it commits the target
    /// on the frame the blend completes.
    pub fn active(&mut self, now_sec: f64) -> EmotionPreset {
        if !self.in_flight() {
            return self.current;
        }
        self.progress = self.raw_progress(now_sec);
        if self.progress >= 1.0 {
            self.current = *self.target.preset();
            return self.current;
        }
        interpolate(
            &self.current,
            self.target.preset(),
            ease_in_out_cubic(self.progress),
        )
    }

    fn raw_progress(&self, now_sec: f64) -> f32 {
        let elapsed = (now_sec - self.start_sec).max(0.0);
        (elapsed / self.duration_sec).min(1.0) as f32
    }
}
