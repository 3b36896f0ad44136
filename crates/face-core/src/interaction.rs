use crate::constants::{
    IDLE_TARGETS, INITIAL_STATE_UNIFORMS, LISTENING_TARGETS, SPEAKING_TARGETS,
    STATE_SMOOTHING_PER_FRAME, THINKING_TARGETS,
};
use crate::easing::smoothing_factor;

/// Conversation phase as seen by the visuals. Last write wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionState {
    #[default]
    Idle,
    Listening,
    Thinking,
    Speaking,
}

impl InteractionState {
    pub fn targets(self) -> StateUniforms {
        StateUniforms::from_array(match self {
            InteractionState::Idle => IDLE_TARGETS,
            InteractionState::Listening => LISTENING_TARGETS,
            InteractionState::Thinking => THINKING_TARGETS,
            InteractionState::Speaking => SPEAKING_TARGETS,
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Listening => "listening",
            InteractionState::Thinking => "thinking",
            InteractionState::Speaking => "speaking",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "idle" => Some(InteractionState::Idle),
            "listening" => Some(InteractionState::Listening),
            "thinking" => Some(InteractionState::Thinking),
            "speaking" => Some(InteractionState::Speaking),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateUniforms {
    pub speed_scale: f32,
    pub noise_amp: f32,
    pub expand: f32,
    pub color_shift: f32,
}

impl Default for StateUniforms {
    fn default() -> Self {
        Self::from_array(INITIAL_STATE_UNIFORMS)
    }
}

impl StateUniforms {
    pub const fn from_array(v: [f32; 4]) -> Self {
        Self {
            speed_scale: v[0],
            noise_amp: v[1],
            expand: v[2],
            color_shift: v[3],
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.speed_scale, self.noise_amp, self.expand, self.color_shift]
    }
}

/// The four smoothed uniforms chasing the targets of the latest state.
#[derive(Clone, Debug, Default)]
pub struct InteractionMachine {
    state: InteractionState,
    uniforms: StateUniforms,
}

impl InteractionMachine {
    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn uniforms(&self) -> StateUniforms {
        self.uniforms
    }

    pub fn set_state(&mut self, state: InteractionState) {
        if state != self.state {
            log::debug!("[state] {} -> {}", self.state.label(), state.label());
        }
        self.state = state;
    }

    /// Moves every uniform part of the way to its target; never jumps.
    pub fn step(&mut self, dt_sec: f32) -> StateUniforms {
        let k = smoothing_factor(STATE_SMOOTHING_PER_FRAME, dt_sec);
        let target = self.state.targets().to_array();
        let mut cur = self.uniforms.to_array();
        for (v, t) in cur.iter_mut().zip(target) {
            *v += (t - *v) * k;
        }
        self.uniforms = StateUniforms::from_array(cur);
        self.uniforms
    }
}
