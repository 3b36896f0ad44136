use std::cell::RefCell;
use std::rc::Rc;

use face_core::analysis::EmotionData;
use face_core::render::Renderer;
use face_core::{FrameParams, FrequencyAnalyzer, SceneInputs, SpectrumSource, VisualEngine};
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::MicCapture;
use crate::ui::Ui;

pub struct FrameContext {
    pub engine: VisualEngine,
    pub analyzer: FrequencyAnalyzer,
    pub mic: Rc<RefCell<Option<MicCapture>>>,
    pub inputs: Rc<SceneInputs>,
    pub gpu: Option<Renderer<'static>>,
    pub canvas: web::HtmlCanvasElement,
    pub ui: Ui,
    pub started: Instant,
    pub last_instant: Instant,
    pub params: Option<FrameParams>,
    pub disposed: bool,
}

impl FrameContext {
    pub fn new(
        gpu: Option<Renderer<'static>>,
        canvas: web::HtmlCanvasElement,
        mic: Rc<RefCell<Option<MicCapture>>>,
        inputs: Rc<SceneInputs>,
        ui: Ui,
    ) -> Self {
        let now = Instant::now();
        Self {
            engine: VisualEngine::new(),
            analyzer: FrequencyAnalyzer::default(),
            mic,
            inputs,
            gpu,
            canvas,
            ui,
            started: now,
            last_instant: now,
            params: None,
            disposed: false,
        }
    }

    fn now_sec(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Advances the engine by the wall time since the previous update.
    pub fn update(&mut self) -> Option<FrameParams> {
        if self.disposed {
            return None;
        }
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let now_sec = self.now_sec();

        self.engine.apply_inputs(&self.inputs, now_sec);
        let params = {
            let mut mic = self.mic.borrow_mut();
            let source = mic.as_mut().map(|m| m as &mut dyn SpectrumSource);
            let frame = self.analyzer.sample(source);
            self.engine.update(&frame, dt_sec, now_sec)
        };
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.camera_mut().orbit(dt_sec);
        }
        // the meter shows the unsmoothed level
        if self.mic.borrow().is_some() {
            self.ui.set_level(params.raw_volume);
        }
        self.params = Some(params);
        Some(params)
    }

    /// Draws the latest parameters; picks up canvas resizes first.
    pub fn render(&mut self) {
        let Some(params) = self.params else {
            return;
        };
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        match gpu.render(&params) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(wgpu::SurfaceError::Timeout) => log::warn!("[gpu] frame timeout"),
            Err(e) => log::error!("[gpu] render error: {e:?}"),
        }
    }

    pub fn frame(&mut self) {
        if self.update().is_some() {
            self.render();
        }
    }

    pub fn set_emotion(&mut self, data: &EmotionData) {
        let now_sec = self.now_sec();
        self.engine.set_emotion(data, now_sec);
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.dispose();
        }
        self.engine.reset();
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<Renderer<'static>> {
    let instance = wgpu::Instance::default();
    let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
        Ok(s) => s,
        Err(e) => {
            log::error!("WebGPU surface error: {:?}", e);
            return None;
        }
    };
    match Renderer::new(&instance, surface, canvas.width(), canvas.height()).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// requestAnimationFrame loop; stops rescheduling once the context is disposed.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let keep_going = {
            let mut ctx = frame_ctx_tick.borrow_mut();
            ctx.frame();
            !ctx.disposed
        };
        if keep_going {
            request_frame(&tick_clone);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
