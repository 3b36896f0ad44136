//! Default input device into the shared sample ring.

use anyhow::anyhow;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig};

use crate::spectrum::SharedRing;

/// Opens and starts the default microphone. The stream stops when dropped.
pub fn start_capture(ring: SharedRing) -> anyhow::Result<Stream> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| anyhow!("no input device"))?;
    let supported = device.default_input_config()?;
    let config: StreamConfig = supported.config();
    log::info!(
        "[audio] {} @ {} Hz, {} ch, {:?}",
        device.name().unwrap_or_else(|_| "input".into()),
        config.sample_rate.0,
        config.channels,
        supported.sample_format()
    );
    let channels = config.channels.max(1) as usize;
    let err_fn = |err: cpal::StreamError| log::error!("[audio] input stream error: {err}");

    let stream = match supported.sample_format() {
        SampleFormat::F32 => device.build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| push_mono(&ring, data, channels, |s| s),
            err_fn,
            None,
        )?,
        SampleFormat::I16 => device.build_input_stream(
            &config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                push_mono(&ring, data, channels, |s| s as f32 / i16::MAX as f32)
            },
            err_fn,
            None,
        )?,
        SampleFormat::U16 => device.build_input_stream(
            &config,
            move |data: &[u16], _: &cpal::InputCallbackInfo| {
                let mid = u16::MAX as f32 / 2.0;
                push_mono(&ring, data, channels, |s| (s as f32 - mid) / mid)
            },
            err_fn,
            None,
        )?,
        other => return Err(anyhow!("unsupported sample format: {other}")),
    };
    stream.play()?;
    Ok(stream)
}

fn push_mono<T: Copy>(ring: &SharedRing, data: &[T], channels: usize, to_f32: impl Fn(T) -> f32) {
    let mono: Vec<f32> = data
        .chunks_exact(channels)
        .map(|frame| frame.iter().map(|&s| to_f32(s)).sum::<f32>() / channels as f32)
        .collect();
    if let Ok(mut ring) = ring.lock() {
        ring.push(&mono);
    }
}
