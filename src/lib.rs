#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use face_core::analysis::EmotionData;
use face_core::{InteractionState, SceneInputs};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod api;
mod asset;
mod audio;
mod constants;
mod dom;
mod frame;
mod turn;
mod ui;

use constants::{CANVAS_ID, MIC_BUTTON_ID, MODEL_URL};
use turn::Conversation;

/// Handle to a running face. The module entry builds one for the page's
/// canvas; hosts that drive frames themselves can build their own with
/// [`FaceApp::init`].
#[wasm_bindgen]
pub struct FaceApp {
    frame: Rc<RefCell<frame::FrameContext>>,
    conversation: Rc<Conversation>,
    inputs: Rc<SceneInputs>,
}

#[wasm_bindgen]
impl FaceApp {
    /// Sets up WebGPU, the UI hooks and the face model. A missing GPU or model
    /// is logged and leaves an empty scene; only a missing canvas fails.
    pub async fn init(canvas_id: String) -> Result<FaceApp, JsValue> {
        build(&canvas_id)
            .await
            .map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    pub fn update(&self) {
        self.frame.borrow_mut().update();
    }

    pub fn render(&self) {
        self.frame.borrow_mut().render();
    }

    pub fn set_interaction_state(&self, state: &str) -> Result<(), JsValue> {
        let state = InteractionState::from_label(state)
            .ok_or_else(|| JsValue::from_str(&format!("unknown interaction state: {state}")))?;
        self.inputs.set_state(state);
        Ok(())
    }

    /// Accepts an analysis `data` object (`{ emotion, intensity, ... }`).
    pub fn set_emotion(&self, data: JsValue) -> Result<(), JsValue> {
        let json = js_sys::JSON::stringify(&data)?;
        let data: EmotionData = serde_json::from_str(&String::from(json))
            .map_err(|e| JsValue::from_str(&format!("invalid emotion data: {e}")))?;
        self.frame.borrow_mut().set_emotion(&data);
        Ok(())
    }

    pub fn toggle_microphone(&self) {
        self.conversation.toggle();
    }

    /// Stops the conversation and frees GPU resources. Safe to call twice.
    pub fn dispose(&self) {
        self.conversation.stop();
        self.frame.borrow_mut().dispose();
    }
}

async fn build(canvas_id: &str) -> anyhow::Result<FaceApp> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{canvas_id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::wire_canvas_resize(&canvas);

    let ui = ui::Ui::new(document.clone());
    let mut gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        ui.toast("WebGPU is not available in this browser.");
    }
    if let Some(gpu) = gpu.as_mut() {
        match asset::load_cloud(MODEL_URL).await {
            Ok(cloud) => gpu.set_cloud(&cloud),
            Err(e) => log::error!("[asset] {e}"),
        }
    }
    ui.hide_loading();

    let inputs = Rc::new(SceneInputs::default());
    let mic = Rc::new(RefCell::new(None));
    let conversation = Rc::new(Conversation::new(mic.clone(), inputs.clone(), ui.clone()));
    let frame = Rc::new(RefCell::new(frame::FrameContext::new(
        gpu,
        canvas,
        mic,
        inputs.clone(),
        ui,
    )));
    Ok(FaceApp {
        frame,
        conversation,
        inputs,
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("face-web starting");

    let has_canvas = dom::window_document()
        .and_then(|d| d.get_element_by_id(CANVAS_ID))
        .is_some();
    if has_canvas {
        spawn_local(async move {
            if let Err(e) = boot().await {
                log::error!("init error: {:?}", e);
            }
        });
    }
    Ok(())
}

async fn boot() -> anyhow::Result<()> {
    let app = build(CANVAS_ID).await?;
    if let Some(document) = dom::window_document() {
        let conversation = app.conversation.clone();
        dom::add_click_listener(&document, MIC_BUTTON_ID, move || conversation.toggle());
    }
    app.frame.borrow().ui.set_status(ui::Status::Idle);
    spawn_local(async {
        if api::check_health().await {
            log::info!("[api] service healthy");
        } else {
            log::warn!("[api] analysis service unreachable; turns will fail until it is up");
        }
    });
    frame::start_loop(app.frame.clone());
    Ok(())
}
