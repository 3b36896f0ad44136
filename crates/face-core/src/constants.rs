// Shared visual/audio tuning constants used by both web and native frontends.

// Frequency analysis
pub const FFT_SIZE: usize = 2048;
pub const FREQUENCY_BIN_COUNT: usize = FFT_SIZE / 2;
pub const ANALYSER_SMOOTHING: f64 = 0.8; // WebAudio smoothingTimeConstant
pub const BASS_BINS: (usize, usize) = (0, 10); // bin-index ranges, not Hz
pub const MID_BINS: (usize, usize) = (10, 100);
pub const TREBLE_BINS: (usize, usize) = (100, 512);

// Smoothing, expressed per frame at the reference cadence and rescaled by dt
pub const REFERENCE_FRAME_RATE: f32 = 60.0;
pub const STATE_SMOOTHING_PER_FRAME: f32 = 0.05;
pub const AUDIO_SMOOTHING_PER_FRAME: f32 = 0.15;
pub const MAX_FRAME_DT_SEC: f32 = 0.25; // long stalls (hidden tab) commit at most this much

// Emotion transitions
pub const TRANSITION_DURATION_SEC: f64 = 1.0;
pub const EFFECT_SWITCH_POINT: f32 = 0.5; // special effect flips from a to b here

// Interaction state targets: (speed_scale, noise_amp, expand, color_shift)
pub const IDLE_TARGETS: [f32; 4] = [0.5, 0.5, 0.0, 0.0];
pub const LISTENING_TARGETS: [f32; 4] = [1.0, 1.2, 0.0, 0.1];
pub const THINKING_TARGETS: [f32; 4] = [3.0, 2.0, 0.0, 1.0];
pub const SPEAKING_TARGETS: [f32; 4] = [1.5, 1.5, 1.0, 0.0];
pub const INITIAL_STATE_UNIFORMS: [f32; 4] = [1.0, 1.0, 0.0, 0.0];

// Bloom
pub const BLOOM_BASE_STRENGTH: f32 = 0.4;
pub const BLOOM_VOLUME_GAIN: f32 = 0.2;
pub const BLOOM_MAX_STRENGTH: f32 = 1.5;
pub const BLOOM_THINKING_BOOST: f32 = 2.0;
pub const BLOOM_SPEAKING_BOOST: f32 = 1.5;
pub const BLOOM_RADIUS: f32 = 0.3;
pub const BLOOM_THRESHOLD: f32 = 0.7;

// Scene and camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 50.0;
pub const AUTO_ROTATE_SPEED: f32 = 0.3; // orbit-control units, 2.0 = one turn per 30 s
pub const FOG_NEAR: f32 = 80.0;
pub const FOG_FAR: f32 = 250.0;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Face model import
pub const MODEL_SCALE: f32 = 50.0;
pub const MODEL_Y_OFFSET: f32 = -5.0;
pub const DOWNSAMPLE_ABOVE_VERTICES: usize = 50_000;
pub const PARTICLE_BASE_SIZE: f32 = 1.2;
pub const FALLBACK_TEXEL_COLOR: [f32; 3] = [0.5, 0.8, 0.9]; // uv lands outside the image
pub const UNTEXTURED_COLOR: [f32; 3] = [0.5, 0.8, 1.0];

// Particle shader tuning (fed to WGSL as pipeline overrides)
pub const FLOW_FREQUENCY: f32 = 0.05;
pub const FLOW_TIME_RATE: f32 = 0.3;
pub const FLOW_AMPLITUDE: f32 = 0.2;
pub const BEAT_GAIN: f32 = 2.5;
pub const EXPAND_BEAT_GAIN: f32 = 2.0;
pub const EXPAND_PUSH_GAIN: f32 = 3.0;
pub const FACE_CENTER_Y: f32 = -5.0;
pub const JITTER_FREQUENCY: f32 = 2.0;
pub const JITTER_TIME_RATE: f32 = 15.0;
pub const JITTER_BASE: f32 = 0.1;
pub const JITTER_SHIFT_GAIN: f32 = 0.5;
pub const THINK_THRESHOLD: f32 = 0.1;
pub const THINK_FREQUENCY: f32 = 0.1;
pub const THINK_TIME_RATE: f32 = 2.0;
pub const THINK_GAIN: f32 = 2.0;
pub const SIZE_ATTENUATION: f32 = 300.0;
pub const SIZE_MID_GAIN: f32 = 0.5;
pub const ACCENT_COLOR: [f32; 3] = [0.2, 0.4, 1.0]; // electric blue
pub const FLICKER_RATE: f32 = 10.0;
pub const SPEAK_GLOW_GAIN: f32 = 0.3;
pub const DISC_SOFT_EDGE: f32 = 0.3;
pub const GLOW_FALLOFF: f32 = 4.0;
pub const GLOW_GAIN: f32 = 0.3;
pub const POINT_OPACITY: f32 = 0.8;
pub const FOG_AMOUNT: f32 = 0.0; // 0 keeps the points unfogged; 1 fades them over FOG_NEAR..FOG_FAR

// Analysis service
pub const RETRY_COUNT: u32 = 3;
pub const RETRY_BASE_DELAY_MS: u32 = 1000;
pub const SILENCE_CLIP_BYTES: u32 = 1000; // shorter clips are treated as silence

