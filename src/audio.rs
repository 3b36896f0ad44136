//! Microphone capture: analyser for the visuals, MediaRecorder clips for the
//! analysis service, and reply playback.

use face_core::constants::{ANALYSER_SMOOTHING, FFT_SIZE};
use face_core::{FaceError, SpectrumSource};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::constants::pick_mime;
use crate::dom::{js_error_text, sleep_ms};

/// Live microphone graph. Cloning shares the same underlying stream.
#[derive(Clone)]
pub struct MicCapture {
    ctx: web::AudioContext,
    stream: web::MediaStream,
    analyser: web::AnalyserNode,
}

impl MicCapture {
    pub async fn open() -> Result<Self, FaceError> {
        let window = web::window().ok_or_else(|| FaceError::Microphone("no window".into()))?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| FaceError::Microphone(js_error_text(&e)))?;
        let constraints = web::MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        let request = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(mic_error)?;
        let stream: web::MediaStream = JsFuture::from(request)
            .await
            .map_err(mic_error)?
            .dyn_into()
            .map_err(|e| FaceError::Microphone(js_error_text(&e)))?;

        let ctx = web::AudioContext::new().map_err(|e| FaceError::Microphone(js_error_text(&e)))?;
        let analyser = ctx
            .create_analyser()
            .map_err(|e| FaceError::Microphone(js_error_text(&e)))?;
        analyser.set_fft_size(FFT_SIZE as u32);
        analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);
        let source = ctx
            .create_media_stream_source(&stream)
            .map_err(|e| FaceError::Microphone(js_error_text(&e)))?;
        source
            .connect_with_audio_node(&analyser)
            .map_err(|e| FaceError::Microphone(js_error_text(&e)))?;
        _ = ctx.resume();
        log::info!(
            "[audio] microphone open, {} bins",
            analyser.frequency_bin_count()
        );
        Ok(Self {
            ctx,
            stream,
            analyser,
        })
    }

    pub fn stream(&self) -> &web::MediaStream {
        &self.stream
    }

    /// Stops every track and closes the context. Safe to repeat.
    pub fn close(&self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
        _ = self.ctx.close();
        log::info!("[audio] microphone closed");
    }
}

impl SpectrumSource for MicCapture {
    fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        self.analyser.get_byte_frequency_data(out);
    }
}

fn mic_error(e: JsValue) -> FaceError {
    let denied = e
        .dyn_ref::<web::DomException>()
        .is_some_and(|ex| ex.name() == "NotAllowedError");
    if denied {
        FaceError::MicrophoneDenied
    } else {
        FaceError::Microphone(js_error_text(&e))
    }
}

/// Records `ms` milliseconds of `stream` into one blob.
pub async fn record_clip(stream: &web::MediaStream, ms: i32) -> Result<web::Blob, FaceError> {
    let mime = pick_mime(web::MediaRecorder::is_type_supported);
    let recorder = match mime {
        Some(m) => {
            let opts = web::MediaRecorderOptions::new();
            opts.set_mime_type(m);
            web::MediaRecorder::new_with_media_stream_and_media_recorder_options(stream, &opts)
        }
        None => web::MediaRecorder::new_with_media_stream(stream),
    }
    .map_err(|e| FaceError::Microphone(js_error_text(&e)))?;

    let chunks = js_sys::Array::new();
    let sink = chunks.clone();
    let on_data = Closure::wrap(Box::new(move |ev: web::BlobEvent| {
        if let Some(blob) = ev.data() {
            if blob.size() > 0.0 {
                sink.push(&blob);
            }
        }
    }) as Box<dyn FnMut(web::BlobEvent)>);
    recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));
    let stopped = js_sys::Promise::new(&mut |resolve, _reject| {
        recorder.set_onstop(Some(&resolve));
    });

    recorder
        .start()
        .map_err(|e| FaceError::Microphone(js_error_text(&e)))?;
    sleep_ms(ms).await;
    if recorder.state() != web::RecordingState::Inactive {
        _ = recorder.stop();
    }
    _ = JsFuture::from(stopped).await;
    recorder.set_ondataavailable(None);
    recorder.set_onstop(None);
    drop(on_data);

    let bag = web::BlobPropertyBag::new();
    bag.set_type(mime.unwrap_or("audio/webm"));
    web::Blob::new_with_blob_sequence_and_options(&chunks, &bag)
        .map_err(|e| FaceError::Microphone(js_error_text(&e)))
}

/// Plays the reply and resolves when it ends or fails.
pub async fn play_reply(url: &str) -> Result<(), FaceError> {
    let audio =
        web::HtmlAudioElement::new_with_src(url).map_err(|e| FaceError::Playback(js_error_text(&e)))?;
    let finished = js_sys::Promise::new(&mut |resolve, reject| {
        audio.set_onended(Some(&resolve));
        audio.set_onerror(Some(&reject));
    });
    let started = audio
        .play()
        .map_err(|e| FaceError::Playback(js_error_text(&e)))?;
    let result = match JsFuture::from(started).await {
        Ok(_) => JsFuture::from(finished)
            .await
            .map(|_| ())
            .map_err(|e| FaceError::Playback(js_error_text(&e))),
        Err(e) => Err(FaceError::Playback(js_error_text(&e))),
    };
    audio.set_onended(None);
    audio.set_onerror(None);
    result
}
