use std::sync::Arc;
use std::time::Instant;

use face_core::asset::cloud_from_path;
use face_core::render::Renderer;
use face_core::{Emotion, FrequencyAnalyzer, InteractionState, SpectrumSource, VisualEngine};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

mod capture;
mod spectrum;

use spectrum::FftSpectrum;

struct App {
    window: Arc<Window>,
    renderer: Renderer<'static>,
    engine: VisualEngine,
    analyzer: FrequencyAnalyzer,
    spectrum: Option<FftSpectrum>,
    started: Instant,
    last_frame: Instant,
}

impl App {
    async fn new(window: Arc<Window>, spectrum: Option<FftSpectrum>) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;
        let renderer = Renderer::new(&instance, surface, size.width, size.height).await?;
        let now = Instant::now();
        Ok(Self {
            window,
            renderer,
            engine: VisualEngine::new(),
            analyzer: FrequencyAnalyzer::default(),
            spectrum,
            started: now,
            last_frame: now,
        })
    }

    fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt_sec = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        let now_sec = self.started.elapsed().as_secs_f64();

        let source = self.spectrum.as_mut().map(|s| s as &mut dyn SpectrumSource);
        let frame = self.analyzer.sample(source);
        let params = self.engine.update(&frame, dt_sec, now_sec);
        self.renderer.camera_mut().orbit(dt_sec);
        self.renderer.render(&params)
    }

    fn on_key(&mut self, key: &Key) {
        let now_sec = self.started.elapsed().as_secs_f64();
        match key_action(key) {
            Some(KeyAction::State(state)) => {
                log::info!("state -> {}", state.label());
                self.engine.set_interaction_state(state);
            }
            Some(KeyAction::Emotion(emotion)) => {
                log::info!("emotion -> {}", emotion.label());
                self.engine.set_emotion_target(emotion, now_sec);
            }
            None => {}
        }
    }
}

enum KeyAction {
    State(InteractionState),
    Emotion(Emotion),
}

fn key_action(key: &Key) -> Option<KeyAction> {
    let Key::Character(c) = key else {
        return None;
    };
    let action = match c.as_str() {
        "1" => KeyAction::State(InteractionState::Idle),
        "2" => KeyAction::State(InteractionState::Listening),
        "3" => KeyAction::State(InteractionState::Thinking),
        "4" => KeyAction::State(InteractionState::Speaking),
        "n" => KeyAction::Emotion(Emotion::Neutral),
        "h" => KeyAction::Emotion(Emotion::Happy),
        "e" => KeyAction::Emotion(Emotion::Excited),
        "s" => KeyAction::Emotion(Emotion::Sad),
        "a" => KeyAction::Emotion(Emotion::Angry),
        "t" => KeyAction::Emotion(Emotion::Thinking),
        "c" => KeyAction::Emotion(Emotion::Calm),
        _ => return None,
    };
    Some(action)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Microphone is optional; without one the face idles on a silent spectrum
    let ring = spectrum::shared_ring();
    let input_stream = match capture::start_capture(ring.clone()) {
        Ok(stream) => Some(stream),
        Err(e) => {
            log::warn!("[audio] microphone unavailable: {e:#}");
            None
        }
    };
    let spectrum = input_stream.as_ref().map(|_| FftSpectrum::new(ring));

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Face Visualizer (native)")
            .build(&event_loop)?,
    );

    let mut app = pollster::block_on(App::new(window, spectrum))?;
    match std::env::args().nth(1) {
        Some(path) => match cloud_from_path(&path) {
            Ok(cloud) => app.renderer.set_cloud(&cloud),
            Err(e) => log::error!("[asset] {e}"),
        },
        None => log::warn!("[asset] no model path given; rendering an empty scene"),
    }

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => app.renderer.resize_if_needed(size.width, size.height),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                },
            ..
        } => {
            if logical_key == Key::Named(NamedKey::Escape) {
                elwt.exit();
            } else {
                app.on_key(&logical_key);
            }
        }
        Event::AboutToWait => match app.frame() {
            Ok(()) => app.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => app.renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory");
                elwt.exit();
            }
            Err(e) => log::warn!("[gpu] {e:?}"),
        },
        Event::LoopExiting => app.renderer.dispose(),
        _ => {}
    })?;
    Ok(())
}
