//! Payloads of the remote analysis service and the client's retry schedule.

use serde::{Deserialize, Serialize};

use crate::constants::{RETRY_BASE_DELAY_MS, RETRY_COUNT};
use crate::error::{FaceError, SERVER_ERROR};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionData {
    #[serde(default)]
    pub text: String,
    /// Free-form label; see [`crate::presets::Emotion::from_label`].
    #[serde(default)]
    pub emotion: String,
    #[serde(default)]
    pub intensity: f32,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceError {
    pub code: String,
    pub message: String,
}

impl From<ServiceError> for FaceError {
    fn from(e: ServiceError) -> Self {
        FaceError::Service {
            code: e.code,
            message: e.message,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EmotionData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServiceError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ServiceError>,
}

/// Decodes a 2xx body.
pub fn parse_response(body: &str) -> Result<AnalyzeResponse, FaceError> {
    serde_json::from_str(body).map_err(|e| FaceError::MalformedResponse(e.to_string()))
}

/// Error for a non-2xx reply: the server's own error object when it sent one.
/// A body that is not JSON at all (proxy pages, truncated replies) is treated
/// like an unreadable 2xx body and retried.
pub fn server_error(status: u16, body: &str) -> FaceError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error: Some(e) }) => e.into(),
        Ok(ErrorBody { error: None }) => FaceError::Service {
            code: SERVER_ERROR.to_string(),
            message: format!("server error ({status})"),
        },
        Err(e) => FaceError::MalformedResponse(format!("HTTP {status}: {e}")),
    }
}

/// What the caller sees once every attempt failed transiently.
pub fn exhausted(last: &FaceError) -> FaceError {
    FaceError::Network(format!("gave up after retries: {last}"))
}

#[derive(Deserialize)]
struct HealthBody {
    status: Option<String>,
}

pub fn is_healthy(body: &str) -> bool {
    serde_json::from_str::<HealthBody>(body)
        .ok()
        .and_then(|h| h.status)
        .is_some_and(|s| s == "ok")
}

/// Exponential backoff for transient failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: RETRY_COUNT,
            base_delay_ms: RETRY_BASE_DELAY_MS,
        }
    }
}

impl RetryPolicy {
    /// Pause after failed attempt `attempt` (0-based), `None` after the last one.
    pub fn delay_after(&self, attempt: u32) -> Option<u32> {
        if attempt + 1 >= self.attempts {
            return None;
        }
        Some(self.base_delay_ms.saturating_mul(1u32 << attempt.min(16)))
    }
}
