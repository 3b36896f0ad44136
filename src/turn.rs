//! Conversation loop: listen, analyze, answer, repeat while the mic is on.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use face_core::turn::{is_silent, latch_plan, plan_turn, Session};
use face_core::{FaceError, InteractionState, SceneInputs};
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::audio::{self, MicCapture};
use crate::constants::{RECORD_WINDOW_MS, TURN_PAUSE_MS};
use crate::dom::sleep_ms;
use crate::ui::{Status, Ui};

/// Owns the microphone and the loop's lifetime. Each start gets a fresh
/// [`Session`] so a loop still awaiting from a previous one exits.
pub struct Conversation {
    mic: Rc<RefCell<Option<MicCapture>>>,
    session: RefCell<Session>,
    starting: Cell<bool>,
    inputs: Rc<SceneInputs>,
    ui: Ui,
}

impl Conversation {
    pub fn new(mic: Rc<RefCell<Option<MicCapture>>>, inputs: Rc<SceneInputs>, ui: Ui) -> Self {
        Self {
            mic,
            session: RefCell::new(Session::default()),
            starting: Cell::new(false),
            inputs,
            ui,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.borrow().is_active()
    }

    pub fn toggle(self: &Rc<Self>) {
        if self.is_active() {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn start(self: &Rc<Self>) {
        if self.is_active() || self.starting.replace(true) {
            return;
        }
        let this = self.clone();
        spawn_local(async move {
            let opened = MicCapture::open().await;
            this.starting.set(false);
            let mic = match opened {
                Ok(mic) => mic,
                Err(e) => {
                    log::error!("[audio] {e}");
                    this.ui.set_status(Status::Error);
                    this.ui.toast(&e.user_message());
                    return;
                }
            };
            let stream = mic.stream().clone();
            *this.mic.borrow_mut() = Some(mic);
            let session = Session::start();
            *this.session.borrow_mut() = session.clone();
            this.ui.set_mic_active(true);
            run_loop(stream, session, this.inputs.clone(), this.ui.clone()).await;
        });
    }

    /// Ends the session. A request already in flight still completes, but its
    /// loop exits at the next turn.
    pub fn stop(&self) {
        self.session.borrow().stop();
        if let Some(mic) = self.mic.borrow_mut().take() {
            mic.close();
        }
        self.inputs.set_state(InteractionState::Idle);
        self.ui.set_mic_active(false);
        self.ui.set_status(Status::Idle);
        self.ui.set_level(0.0);
    }
}

async fn run_loop(stream: web_sys::MediaStream, session: Session, inputs: Rc<SceneInputs>, ui: Ui) {
    log::info!("[turn] loop started");
    while session.is_active() {
        let result = take_turn(&stream, &session, &inputs, &ui).await;
        if !session.is_active() {
            break;
        }
        if let Err(e) = result {
            log::warn!("[turn] {e}");
            ui.set_status(Status::Error);
            ui.toast(&e.user_message());
        } else {
            ui.set_status(Status::Idle);
        }
        inputs.set_state(InteractionState::Idle);
        sleep_ms(TURN_PAUSE_MS).await;
    }
    log::info!("[turn] loop stopped");
}

async fn take_turn(
    stream: &web_sys::MediaStream,
    session: &Session,
    inputs: &SceneInputs,
    ui: &Ui,
) -> Result<(), FaceError> {
    inputs.set_state(InteractionState::Listening);
    ui.set_status(Status::Listening);
    let clip = audio::record_clip(stream, RECORD_WINDOW_MS).await?;
    if !session.is_active() {
        return Ok(());
    }
    if is_silent(clip.size() as u32) {
        log::debug!("[turn] silent clip ({} bytes)", clip.size());
        return Ok(());
    }

    inputs.set_state(InteractionState::Thinking);
    ui.set_status(Status::Processing);
    let plan = plan_turn(api::analyze(&clip).await);
    if !latch_plan(&plan, session, inputs) {
        log::debug!("[turn] session ended during analysis; result dropped");
        return Ok(());
    }
    if let Some((label, intensity)) = &plan.badge {
        ui.set_badge(label, *intensity);
    }
    for entry in &plan.messages {
        ui.push_chat(entry);
    }
    if let Some(url) = &plan.playback_url {
        inputs.set_state(InteractionState::Speaking);
        if let Err(e) = audio::play_reply(url).await {
            log::warn!("[turn] {e}");
        }
    }
    match plan.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
