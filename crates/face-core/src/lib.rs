pub mod analysis;
pub mod asset;
pub mod camera;
pub mod cloud;
pub mod constants;
pub mod easing;
pub mod error;
pub mod influence;
pub mod interaction;
pub mod presets;
pub mod spectrum;
pub mod transition;
pub mod turn;
pub mod visual;

#[cfg(feature = "gpu")]
pub mod render;

// Shaders bundled as string constants
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use camera::*;
pub use cloud::ParticleCloud;
pub use error::FaceError;
pub use interaction::{InteractionState, StateUniforms};
pub use presets::{Emotion, EmotionPreset, SpecialEffect};
pub use spectrum::{FrequencyAnalyzer, FrequencyFrame, SpectrumSource};
pub use visual::{FrameParams, SceneInputs, VisualEngine};
