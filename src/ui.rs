//! Page chrome around the canvas: status line, toast, chat, level bar, badge.
//!
//! All text goes in through `textContent`; nothing from the service is parsed
//! as HTML.

use std::cell::Cell;
use std::rc::Rc;

use face_core::turn::ChatEntry;
use face_core::Emotion;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::*;
use crate::dom::element_by_id;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Listening,
    Processing,
    Error,
}

impl Status {
    fn class(self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Listening => "listening",
            Status::Processing => "processing",
            Status::Error => "error",
        }
    }

    fn text(self) -> &'static str {
        match self {
            Status::Idle => "Ready",
            Status::Listening => "Listening...",
            Status::Processing => "Thinking...",
            Status::Error => "Error",
        }
    }
}

#[derive(Clone)]
pub struct Ui {
    document: web::Document,
    toast_generation: Rc<Cell<u32>>,
}

impl Ui {
    pub fn new(document: web::Document) -> Self {
        Self {
            document,
            toast_generation: Rc::new(Cell::new(0)),
        }
    }

    fn el(&self, id: &str) -> Option<web::HtmlElement> {
        element_by_id(&self.document, id)
    }

    pub fn set_status(&self, status: Status) {
        if let Some(text) = self.el(STATUS_TEXT_ID) {
            text.set_text_content(Some(status.text()));
        }
        if let Some(dot) = self.el(STATUS_DOT_ID) {
            dot.set_class_name(&format!("status-dot {}", status.class()));
        }
    }

    pub fn hide_loading(&self) {
        if let Some(el) = self.el(LOADING_ID) {
            let _ = el.set_attribute("style", "display:none");
        }
    }

    pub fn set_mic_active(&self, active: bool) {
        if let Some(btn) = self.el(MIC_BUTTON_ID) {
            let _ = btn.class_list().toggle_with_force("active", active);
            btn.set_text_content(Some(if active { "Stop" } else { "Start" }));
        }
    }

    /// Shows `message` and hides it again after a few seconds; a newer toast
    /// keeps its own full display time.
    pub fn toast(&self, message: &str) {
        let Some(el) = self.el(TOAST_ID) else {
            log::warn!("[ui] {message}");
            return;
        };
        el.set_text_content(Some(message));
        let _ = el.set_attribute("style", "");
        let generation = self.toast_generation.get().wrapping_add(1);
        self.toast_generation.set(generation);
        let current = self.toast_generation.clone();
        let hide = Closure::once_into_js(move || {
            if current.get() == generation {
                let _ = el.set_attribute("style", "display:none");
            }
        });
        if let Some(w) = web::window() {
            let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                hide.unchecked_ref(),
                TOAST_MS,
            );
        }
    }

    pub fn set_level(&self, volume: f32) {
        if let Some(bar) = self.el(AUDIO_LEVEL_ID) {
            let pct = (volume.clamp(0.0, 1.0) * 100.0).round();
            let _ = bar.style().set_property("width", &format!("{pct}%"));
        }
    }

    pub fn set_badge(&self, label: &str, intensity: f32) {
        let Some(badge) = self.el(EMOTION_BADGE_ID) else {
            return;
        };
        let emotion = Emotion::from_label(label);
        let pct = (intensity.clamp(0.0, 1.0) * 100.0).round();
        badge.set_text_content(Some(&format!("{} ({pct}%)", emotion.label())));
        let _ = badge.style().set_property("color", emotion.css_color());
        let _ = badge.style().set_property("border-color", emotion.css_color());
    }

    pub fn push_chat(&self, entry: &ChatEntry) {
        let Some(list) = self.el(CHAT_LIST_ID) else {
            return;
        };
        let Ok(item) = self.document.create_element("div") else {
            return;
        };
        let who = if entry.from_assistant { "ai" } else { "user" };
        item.set_class_name(&format!("chat-message {who}"));
        item.set_text_content(Some(&entry.text));
        if !entry.from_assistant {
            let color = Emotion::from_label(&entry.emotion_label).css_color();
            let _ = item.set_attribute("style", &format!("border-left-color: {color}"));
        }
        let _ = list.append_child(&item);
        while list.child_element_count() > MAX_CHAT_MESSAGES {
            match list.first_element_child() {
                Some(oldest) => oldest.remove(),
                None => break,
            }
        }
    }
}
