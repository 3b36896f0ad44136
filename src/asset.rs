use face_core::asset::cloud_from_slice;
use face_core::{FaceError, ParticleCloud};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::dom::js_error_text;

/// Fetches a self-contained glTF model and turns it into the particle cloud.
pub async fn load_cloud(url: &str) -> Result<ParticleCloud, FaceError> {
    let bytes = fetch_bytes(url).await?;
    log::info!("[asset] {url}: {} bytes", bytes.len());
    cloud_from_slice(&bytes)
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, FaceError> {
    let load_err = |e: wasm_bindgen::JsValue| FaceError::AssetLoad(format!("{url}: {}", js_error_text(&e)));
    let window = web::window().ok_or_else(|| FaceError::AssetLoad("no window".into()))?;
    let response: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(load_err)?
        .dyn_into()
        .map_err(load_err)?;
    if !response.ok() {
        return Err(FaceError::AssetLoad(format!("{url}: HTTP {}", response.status())));
    }
    let buffer = JsFuture::from(response.array_buffer().map_err(load_err)?)
        .await
        .map_err(load_err)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
