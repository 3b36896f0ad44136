use face_core::analysis::{exhausted, is_healthy, parse_response, server_error, RetryPolicy};
use face_core::error::{FaceError, NETWORK_ERROR, SERVER_ERROR};
use face_core::turn::{is_silent, latch_plan, plan_turn, Session};
use face_core::SceneInputs;
use face_core::Emotion;

const OK_BODY: &str = r#"{
    "success": true,
    "data": {
        "text": "I got the job",
        "emotion": "excited",
        "intensity": 0.8,
        "state": "speaking",
        "keywords": ["job"],
        "confidence": 0.93,
        "responseText": "Congratulations!",
        "audioUrl": "/audio/reply.mp3"
    },
    "processingTime": 812
}"#;

#[test]
fn parses_success_payload() {
    let r = parse_response(OK_BODY).unwrap();
    assert!(r.success);
    let data = r.data.unwrap();
    assert_eq!(data.emotion, "excited");
    assert_eq!(data.response_text.as_deref(), Some("Congratulations!"));
    assert_eq!(data.audio_url.as_deref(), Some("/audio/reply.mp3"));
    assert_eq!(data.language, None);
    assert_eq!(r.processing_time, Some(812.0));
}

#[test]
fn garbage_body_is_malformed() {
    let err = parse_response("<html>").unwrap_err();
    assert!(matches!(err, FaceError::MalformedResponse(_)));
    assert_eq!(err.code(), SERVER_ERROR);
}

#[test]
fn non_2xx_prefers_server_error_object() {
    let body = r#"{"success":false,"error":{"code":"TRANSCRIBE_FAILED","message":"no speech"}}"#;
    let err = server_error(422, body);
    assert_eq!(
        err,
        FaceError::Service {
            code: "TRANSCRIBE_FAILED".into(),
            message: "no speech".into()
        }
    );
    let fallback = server_error(500, r#"{"success":false}"#);
    assert_eq!(fallback.code(), SERVER_ERROR);
    assert!(fallback.to_string().contains("500"));
    assert!(!fallback.is_transient());
}

#[test]
fn non_json_error_page_is_retried() {
    let err = server_error(502, "<html>Bad Gateway</html>");
    assert!(matches!(err, FaceError::MalformedResponse(_)), "{err:?}");
    assert!(err.to_string().contains("502"));
    assert!(err.is_transient());
}

#[test]
fn health_needs_status_ok() {
    assert!(is_healthy(r#"{"status":"ok","uptime":3}"#));
    assert!(!is_healthy(r#"{"status":"degraded"}"#));
    assert!(!is_healthy("ok"));
}

#[test]
fn retry_backs_off_exponentially() {
    let p = RetryPolicy::default();
    assert_eq!(p.attempts, 3);
    assert_eq!(p.delay_after(0), Some(1000));
    assert_eq!(p.delay_after(1), Some(2000));
    assert_eq!(p.delay_after(2), None);
}

#[test]
fn network_and_unreadable_replies_are_retried() {
    let net = FaceError::Network("offline".into());
    assert!(net.is_transient());
    assert_eq!(net.code(), NETWORK_ERROR);
    assert!(parse_response("{\"success\":").unwrap_err().is_transient());
    assert!(server_error(500, "").is_transient());
    assert!(!FaceError::MicrophoneDenied.is_transient());
    let service = FaceError::Service {
        code: "TRANSCRIBE_FAILED".into(),
        message: "no speech".into(),
    };
    assert!(!service.is_transient());
}

#[test]
fn exhausted_retries_surface_as_network_error() {
    let last = parse_response("<html>").unwrap_err();
    let err = exhausted(&last);
    assert_eq!(err.code(), NETWORK_ERROR);
    assert_eq!(err.user_message(), FaceError::Network(String::new()).user_message());
    assert!(err.to_string().contains("malformed"));
}

#[test]
fn short_clips_are_silence() {
    assert!(is_silent(0));
    assert!(is_silent(999));
    assert!(!is_silent(1000));
}

#[test]
fn successful_turn_plans_everything() {
    let plan = plan_turn(parse_response(OK_BODY));
    assert_eq!(plan.emotion, Some(Emotion::Excited));
    assert_eq!(plan.badge, Some(("excited".to_string(), 0.8)));
    assert_eq!(plan.messages.len(), 2);
    assert!(!plan.messages[0].from_assistant);
    assert_eq!(plan.messages[1].text, "Congratulations!");
    assert!(plan.messages[1].from_assistant);
    assert_eq!(plan.playback_url.as_deref(), Some("/audio/reply.mp3"));
    assert_eq!(plan.error, None);
}

#[test]
fn blank_transcript_still_sets_emotion() {
    let body = r#"{"success":true,"data":{"text":"  ","emotion":"sad","intensity":0.2}}"#;
    let plan = plan_turn(parse_response(body));
    assert_eq!(plan.emotion, Some(Emotion::Sad));
    assert_eq!(plan.badge, None);
    assert!(plan.messages.is_empty());
    assert_eq!(plan.playback_url, None);
}

#[test]
fn reply_without_audio_has_no_playback() {
    let body = r#"{"success":true,"data":{"text":"hi","emotion":"mystery","responseText":"","audioUrl":""}}"#;
    let plan = plan_turn(parse_response(body));
    assert_eq!(plan.emotion, Some(Emotion::Neutral));
    assert_eq!(plan.messages.len(), 1);
    assert_eq!(plan.playback_url, None);
}

#[test]
fn failures_surface_one_error() {
    let plan = plan_turn(Err(FaceError::Network("timeout".into())));
    assert_eq!(plan.emotion, None);
    assert!(matches!(plan.error, Some(FaceError::Network(_))));

    let body = r#"{"success":false,"error":{"code":"RATE_LIMITED","message":"slow down"}}"#;
    let plan = plan_turn(parse_response(body));
    assert_eq!(plan.emotion, None);
    assert_eq!(plan.error.map(|e| e.code().to_string()), Some("RATE_LIMITED".to_string()));
}

#[test]
fn restarted_session_ignores_the_old_turn() {
    let inputs = SceneInputs::default();
    let old = Session::start();
    old.stop();
    let new = Session::start();
    assert!(new.is_active());
    assert!(!old.is_active());

    let plan = plan_turn(parse_response(OK_BODY));
    assert!(!latch_plan(&plan, &old, &inputs));
    assert_eq!(inputs.take_emotion(), None);

    assert!(latch_plan(&plan, &new, &inputs));
    assert_eq!(inputs.take_emotion(), Some(Emotion::Excited));
}

#[test]
fn idle_conversation_has_no_active_session() {
    assert!(!Session::default().is_active());
}
