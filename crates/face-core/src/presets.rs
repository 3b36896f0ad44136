//! Static emotion presets and the blend between two of them.

use crate::constants::EFFECT_SWITCH_POINT;
use crate::easing::{lerp, lerp3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emotion {
    Neutral,
    Happy,
    Excited,
    Sad,
    Angry,
    Thinking,
    Calm,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Excited,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Thinking,
        Emotion::Calm,
    ];

    /// Total: labels outside the table resolve to `Neutral`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "happy" => Emotion::Happy,
            "excited" => Emotion::Excited,
            "sad" => Emotion::Sad,
            "angry" => Emotion::Angry,
            "thinking" => Emotion::Thinking,
            "calm" => Emotion::Calm,
            _ => Emotion::Neutral,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Happy => "happy",
            Emotion::Excited => "excited",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Thinking => "thinking",
            Emotion::Calm => "calm",
        }
    }

    pub fn preset(self) -> &'static EmotionPreset {
        match self {
            Emotion::Neutral => &NEUTRAL,
            Emotion::Happy => &HAPPY,
            Emotion::Excited => &EXCITED,
            Emotion::Sad => &SAD,
            Emotion::Angry => &ANGRY,
            Emotion::Thinking => &THINKING,
            Emotion::Calm => &CALM,
        }
    }

    /// Badge colour for the UI, `#rrggbb`.
    pub fn css_color(self) -> &'static str {
        match self {
            Emotion::Neutral => "#00ffff",
            Emotion::Happy => "#ffff00",
            Emotion::Excited => "#ff6600",
            Emotion::Sad => "#0066ff",
            Emotion::Angry => "#ff0033",
            Emotion::Thinking => "#aa00ff",
            Emotion::Calm => "#00ff88",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialEffect {
    Sparkle,
    Lightning,
    Trail,
    Orbit,
    Breath,
    Rain,
    Explode,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ForeheadMorph {
    pub offset_y: f32,
    pub rotation: f32,
    pub scatter: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EyesMorph {
    pub offset_y: f32,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MouthMorph {
    pub offset_y: f32,
    pub curve: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EyebrowsMorph {
    pub offset_y: f32,
    pub angle: f32,
}

/// Full visual identity of one emotion. Values are immutable table entries;
/// blends produce fresh values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmotionPreset {
    pub color: [f32; 3],
    pub speed: f32,
    pub scale: f32,
    pub forehead: ForeheadMorph,
    pub eyes: EyesMorph,
    pub mouth: MouthMorph,
    pub eyebrows: EyebrowsMorph,
    pub special_effect: Option<SpecialEffect>,
    pub noise_amplitude: f32,
    pub pulse_speed: f32,
    pub bloom_intensity: f32,
}

const fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

pub static NEUTRAL: EmotionPreset = EmotionPreset {
    color: rgb(0x00ffff),
    speed: 1.0,
    scale: 1.0,
    forehead: ForeheadMorph { offset_y: 0.0, rotation: 0.0, scatter: 0.0 },
    eyes: EyesMorph { offset_y: 0.0, scale: 1.0 },
    mouth: MouthMorph { offset_y: 0.0, curve: 0.0 },
    eyebrows: EyebrowsMorph { offset_y: 0.0, angle: 0.0 },
    special_effect: Some(SpecialEffect::Breath),
    noise_amplitude: 0.02,
    pulse_speed: 1.0,
    bloom_intensity: 1.0,
};

pub static HAPPY: EmotionPreset = EmotionPreset {
    color: rgb(0xffff00),
    speed: 1.5,
    scale: 1.2,
    forehead: ForeheadMorph { offset_y: 0.0, rotation: 0.0, scatter: 0.0 },
    eyes: EyesMorph { offset_y: 0.02, scale: 1.1 },
    mouth: MouthMorph { offset_y: 0.05, curve: 0.3 },
    eyebrows: EyebrowsMorph { offset_y: 0.03, angle: 0.1 },
    special_effect: Some(SpecialEffect::Sparkle),
    noise_amplitude: 0.03,
    pulse_speed: 1.5,
    bloom_intensity: 1.5,
};

pub static EXCITED: EmotionPreset = EmotionPreset {
    color: rgb(0xff6600),
    speed: 2.0,
    scale: 1.6,
    forehead: ForeheadMorph { offset_y: 0.0, rotation: 0.0, scatter: 0.1 },
    eyes: EyesMorph { offset_y: 0.03, scale: 1.2 },
    mouth: MouthMorph { offset_y: 0.08, curve: 0.5 },
    eyebrows: EyebrowsMorph { offset_y: 0.05, angle: 0.2 },
    special_effect: Some(SpecialEffect::Explode),
    noise_amplitude: 0.08,
    pulse_speed: 2.5,
    bloom_intensity: 2.0,
};

pub static SAD: EmotionPreset = EmotionPreset {
    color: rgb(0x0066ff),
    speed: 0.5,
    scale: 0.7,
    forehead: ForeheadMorph { offset_y: 0.0, rotation: 0.0, scatter: 0.0 },
    eyes: EyesMorph { offset_y: -0.02, scale: 0.9 },
    mouth: MouthMorph { offset_y: -0.05, curve: -0.3 },
    eyebrows: EyebrowsMorph { offset_y: -0.02, angle: -0.15 },
    special_effect: Some(SpecialEffect::Rain),
    noise_amplitude: 0.01,
    pulse_speed: 0.5,
    bloom_intensity: 0.6,
};

pub static ANGRY: EmotionPreset = EmotionPreset {
    color: rgb(0xff0033),
    speed: 1.8,
    scale: 1.3,
    forehead: ForeheadMorph { offset_y: -0.02, rotation: 0.0, scatter: 0.05 },
    eyes: EyesMorph { offset_y: -0.01, scale: 1.15 },
    mouth: MouthMorph { offset_y: -0.02, curve: -0.1 },
    eyebrows: EyebrowsMorph { offset_y: -0.04, angle: -0.3 },
    special_effect: Some(SpecialEffect::Lightning),
    noise_amplitude: 0.06,
    pulse_speed: 3.0,
    bloom_intensity: 1.8,
};

pub static THINKING: EmotionPreset = EmotionPreset {
    color: rgb(0xaa00ff),
    speed: 1.2,
    scale: 0.9,
    forehead: ForeheadMorph { offset_y: 0.03, rotation: 0.5, scatter: 0.15 },
    eyes: EyesMorph { offset_y: 0.0, scale: 0.95 },
    mouth: MouthMorph { offset_y: 0.0, curve: 0.0 },
    eyebrows: EyebrowsMorph { offset_y: 0.02, angle: 0.05 },
    special_effect: Some(SpecialEffect::Orbit),
    noise_amplitude: 0.04,
    pulse_speed: 1.2,
    bloom_intensity: 1.3,
};

pub static CALM: EmotionPreset = EmotionPreset {
    color: rgb(0x00ff88),
    speed: 0.3,
    scale: 0.8,
    forehead: ForeheadMorph { offset_y: 0.0, rotation: 0.0, scatter: 0.0 },
    eyes: EyesMorph { offset_y: -0.01, scale: 0.95 },
    mouth: MouthMorph { offset_y: 0.01, curve: 0.1 },
    eyebrows: EyebrowsMorph { offset_y: 0.0, angle: 0.0 },
    special_effect: Some(SpecialEffect::Breath),
    noise_amplitude: 0.015,
    pulse_speed: 0.4,
    bloom_intensity: 0.8,
};

/// Preset for an arbitrary label; never fails.
pub fn lookup(label: &str) -> &'static EmotionPreset {
    Emotion::from_label(label).preset()
}

/// Componentwise blend. The special effect is not blended: it is `a`'s below
/// the midpoint and `b`'s from the midpoint on.
pub fn interpolate(a: &EmotionPreset, b: &EmotionPreset, t: f32) -> EmotionPreset {
    EmotionPreset {
        color: lerp3(a.color, b.color, t),
        speed: lerp(a.speed, b.speed, t),
        scale: lerp(a.scale, b.scale, t),
        forehead: ForeheadMorph {
            offset_y: lerp(a.forehead.offset_y, b.forehead.offset_y, t),
            rotation: lerp(a.forehead.rotation, b.forehead.rotation, t),
            scatter: lerp(a.forehead.scatter, b.forehead.scatter, t),
        },
        eyes: EyesMorph {
            offset_y: lerp(a.eyes.offset_y, b.eyes.offset_y, t),
            scale: lerp(a.eyes.scale, b.eyes.scale, t),
        },
        mouth: MouthMorph {
            offset_y: lerp(a.mouth.offset_y, b.mouth.offset_y, t),
            curve: lerp(a.mouth.curve, b.mouth.curve, t),
        },
        eyebrows: EyebrowsMorph {
            offset_y: lerp(a.eyebrows.offset_y, b.eyebrows.offset_y, t),
            angle: lerp(a.eyebrows.angle, b.eyebrows.angle, t),
        },
        special_effect: if t < EFFECT_SWITCH_POINT {
            a.special_effect
        } else {
            b.special_effect
        },
        noise_amplitude: lerp(a.noise_amplitude, b.noise_amplitude, t),
        pulse_speed: lerp(a.pulse_speed, b.pulse_speed, t),
        bloom_intensity: lerp(a.bloom_intensity, b.bloom_intensity, t),
    }
}
