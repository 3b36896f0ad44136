//! What one conversation turn does with an analysis result.
//!
//! The async loop that records, uploads and plays replies lives in the front-end;
//! the decisions it makes are kept here so they can be tested on the host.

use std::cell::Cell;
use std::rc::Rc;

use crate::analysis::AnalyzeResponse;
use crate::constants::SILENCE_CLIP_BYTES;
use crate::error::FaceError;
use crate::presets::Emotion;
use crate::visual::SceneInputs;

/// Cancellation flag of one microphone session. Every start makes a new one,
/// so a turn still awaiting from an earlier session sees itself stopped even
/// after the mic is switched back on.
#[derive(Clone, Debug, Default)]
pub struct Session(Rc<Cell<bool>>);

impl Session {
    pub fn start() -> Self {
        Session(Rc::new(Cell::new(true)))
    }

    pub fn is_active(&self) -> bool {
        self.0.get()
    }

    pub fn stop(&self) {
        self.0.set(false);
    }
}

pub fn is_silent(clip_bytes: u32) -> bool {
    clip_bytes < SILENCE_CLIP_BYTES
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatEntry {
    pub text: String,
    /// Label exactly as the service sent it.
    pub emotion_label: String,
    pub from_assistant: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnPlan {
    /// Next visual target; applied for every successful analysis.
    pub emotion: Option<Emotion>,
    /// Badge label and intensity, only when something was said.
    pub badge: Option<(String, f32)>,
    pub messages: Vec<ChatEntry>,
    /// Reply audio to play while speaking.
    pub playback_url: Option<String>,
    /// Surfaced once to the user, then the turn ends.
    pub error: Option<FaceError>,
}

pub fn plan_turn(result: Result<AnalyzeResponse, FaceError>) -> TurnPlan {
    let response = match result {
        Ok(r) => r,
        Err(e) => {
            return TurnPlan {
                error: Some(e),
                ..Default::default()
            }
        }
    };
    let mut plan = TurnPlan::default();
    match (response.success, response.data, response.error) {
        (true, Some(data), _) => {
            plan.emotion = Some(Emotion::from_label(&data.emotion));
            if data.text.trim().is_empty() {
                return plan;
            }
            plan.badge = Some((data.emotion.clone(), data.intensity));
            plan.messages.push(ChatEntry {
                text: data.text,
                emotion_label: data.emotion.clone(),
                from_assistant: false,
            });
            if let Some(reply) = data.response_text.filter(|r| !r.is_empty()) {
                plan.messages.push(ChatEntry {
                    text: reply,
                    emotion_label: data.emotion,
                    from_assistant: true,
                });
            }
            plan.playback_url = data.audio_url.filter(|u| !u.is_empty());
        }
        (_, _, Some(err)) => plan.error = Some(err.into()),
        _ => {}
    }
    plan
}

/// Hands the plan's emotion to the frame loop. Returns `false`, touching
/// nothing, when the session ended while the analysis was in flight.
pub fn latch_plan(plan: &TurnPlan, session: &Session, inputs: &SceneInputs) -> bool {
    if !session.is_active() {
        return false;
    }
    if let Some(emotion) = plan.emotion {
        inputs.set_emotion(emotion);
    }
    true
}
