use thiserror::Error;

pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
pub const SERVER_ERROR: &str = "SERVER_ERROR";

/// Failures of the collaborators around the frame loop. None of these stop it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FaceError {
    #[error("microphone permission denied")]
    MicrophoneDenied,
    #[error("microphone unavailable: {0}")]
    Microphone(String),
    #[error("analysis service unreachable: {0}")]
    Network(String),
    #[error("analysis failed [{code}]: {message}")]
    Service { code: String, message: String },
    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),
    #[error("face model failed to load: {0}")]
    AssetLoad(String),
    #[error("playback failed: {0}")]
    Playback(String),
}

impl FaceError {
    /// Worth another attempt within the same request.
    pub fn is_transient(&self) -> bool {
        matches!(self, FaceError::Network(_) | FaceError::MalformedResponse(_))
    }

    /// Text for the error toast.
    pub fn user_message(&self) -> String {
        match self {
            FaceError::MicrophoneDenied => {
                "Microphone access is required. Allow it in the browser settings.".to_string()
            }
            FaceError::Microphone(_) => "Could not start the microphone. Please try again.".to_string(),
            FaceError::Network(_) => {
                "Cannot reach the server. Please check your network.".to_string()
            }
            FaceError::Service { message, .. } => format!("Analysis error: {message}"),
            FaceError::MalformedResponse(_) => "Analysis error: unexpected server reply".to_string(),
            FaceError::AssetLoad(_) => "The face model could not be loaded.".to_string(),
            FaceError::Playback(_) => "Could not play the reply.".to_string(),
        }
    }

    /// Service code, for logs and the wire-level error object.
    pub fn code(&self) -> &str {
        match self {
            FaceError::Network(_) => NETWORK_ERROR,
            FaceError::Service { code, .. } => code,
            FaceError::MalformedResponse(_) => SERVER_ERROR,
            FaceError::MicrophoneDenied => "MICROPHONE_DENIED",
            FaceError::Microphone(_) => "MICROPHONE_ERROR",
            FaceError::AssetLoad(_) => "ASSET_ERROR",
            FaceError::Playback(_) => "PLAYBACK_ERROR",
        }
    }
}
