//! fetch client for the analysis service.

use face_core::analysis::{
    exhausted, is_healthy, parse_response, server_error, AnalyzeResponse, RetryPolicy,
};
use face_core::FaceError;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::constants::{ANALYZE_ENDPOINT, HEALTH_ENDPOINT, UPLOAD_FIELD, UPLOAD_FILENAME};
use crate::dom::{js_error_text, sleep_ms};

/// Uploads one clip. Network failures and unreadable replies are retried with
/// backoff; a well-formed HTTP error reply is final.
pub async fn analyze(clip: &web::Blob) -> Result<AnalyzeResponse, FaceError> {
    let policy = RetryPolicy::default();
    let mut attempt = 0;
    loop {
        match post_clip(clip).await {
            Err(e) if e.is_transient() => match policy.delay_after(attempt) {
                Some(delay) => {
                    log::warn!("[api] attempt {} failed: {e}; retrying in {delay} ms", attempt + 1);
                    sleep_ms(delay as i32).await;
                    attempt += 1;
                }
                None => {
                    log::error!("[api] giving up after {} attempts: {e}", attempt + 1);
                    return Err(exhausted(&e));
                }
            },
            other => return other,
        }
    }
}

async fn post_clip(clip: &web::Blob) -> Result<AnalyzeResponse, FaceError> {
    let form = web::FormData::new().map_err(|e| FaceError::Network(js_error_text(&e)))?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, clip, UPLOAD_FILENAME)
        .map_err(|e| FaceError::Network(js_error_text(&e)))?;
    let init = web::RequestInit::new();
    init.set_method("POST");
    init.set_body(&form);
    let (status, ok, body) = fetch_text(ANALYZE_ENDPOINT, &init).await?;
    if !ok {
        return Err(server_error(status, &body));
    }
    let response = parse_response(&body)?;
    if let Some(ms) = response.processing_time {
        log::info!("[api] analyzed in {ms} ms");
    }
    Ok(response)
}

/// Probes the service once; any failure counts as unhealthy.
pub async fn check_health() -> bool {
    let init = web::RequestInit::new();
    init.set_method("GET");
    match fetch_text(HEALTH_ENDPOINT, &init).await {
        Ok((_, true, body)) => is_healthy(&body),
        Ok((status, false, _)) => {
            log::warn!("[api] health check returned {status}");
            false
        }
        Err(e) => {
            log::warn!("[api] health check failed: {e}");
            false
        }
    }
}

async fn fetch_text(url: &str, init: &web::RequestInit) -> Result<(u16, bool, String), FaceError> {
    let window = web::window().ok_or_else(|| FaceError::Network("no window".into()))?;
    let reply = JsFuture::from(window.fetch_with_str_and_init(url, init))
        .await
        .map_err(|e| FaceError::Network(js_error_text(&e)))?;
    let response: web::Response = reply
        .dyn_into()
        .map_err(|e| FaceError::Network(js_error_text(&e)))?;
    let text = response
        .text()
        .map_err(|e| FaceError::Network(js_error_text(&e)))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|e| FaceError::Network(js_error_text(&e)))?
        .as_string()
        .unwrap_or_default();
    Ok((response.status(), response.ok(), body))
}
