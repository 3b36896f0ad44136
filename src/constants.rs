// Web front-end configuration: DOM hooks, service endpoints and turn timing.
//
// Engine tuning (audio bands, smoothing, shader constants) lives in
// `face_core::constants`; this module only holds what the page wiring needs.

// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const MIC_BUTTON_ID: &str = "mic-button";
pub const STATUS_TEXT_ID: &str = "status-text";
pub const STATUS_DOT_ID: &str = "status-dot";
pub const TOAST_ID: &str = "error-toast";
pub const CHAT_LIST_ID: &str = "chat-list";
pub const AUDIO_LEVEL_ID: &str = "audio-level";
pub const EMOTION_BADGE_ID: &str = "emotion-badge";
pub const LOADING_ID: &str = "loading";

// Analysis service
pub const ANALYZE_ENDPOINT: &str = "/api/analyze";
pub const HEALTH_ENDPOINT: &str = "/api/health";
pub const UPLOAD_FIELD: &str = "audio";
pub const UPLOAD_FILENAME: &str = "recording.webm";

// Self-contained model (.glb or .gltf with embedded buffers)
pub const MODEL_URL: &str = "/assets/models/face/FacePractice.glb";

// Conversation turn timing
pub const RECORD_WINDOW_MS: i32 = 5000;
pub const TURN_PAUSE_MS: i32 = 500;

// UI limits
pub const TOAST_MS: i32 = 4000;
pub const MAX_CHAT_MESSAGES: u32 = 5;

// MediaRecorder preference, first supported wins; none supported -> browser default
pub const RECORDER_MIME_TYPES: [&str; 3] = [
    "audio/webm;codecs=opus",
    "audio/webm",
    "audio/ogg;codecs=opus",
];

/// First preferred MIME type the recorder accepts.
pub fn pick_mime(is_supported: impl Fn(&str) -> bool) -> Option<&'static str> {
    RECORDER_MIME_TYPES.into_iter().find(|m| is_supported(m))
}

/// Backing-store scale for the canvas; very dense displays are capped.
pub fn capped_pixel_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(face_core::constants::MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}
