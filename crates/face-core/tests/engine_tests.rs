use face_core::analysis::EmotionData;
use face_core::constants::{BLOOM_MAX_STRENGTH, MAX_FRAME_DT_SEC};
use face_core::influence::AudioInfluence;
use face_core::visual::{bloom_strength, SceneInputs, VisualEngine};
use face_core::{Emotion, FrequencyFrame, InteractionState};

const FRAME: f32 = 1.0 / 60.0;

fn loud() -> FrequencyFrame<'static> {
    FrequencyFrame {
        bass: 1.0,
        mid: 0.5,
        treble: 0.25,
        volume: 0.6,
        raw: &[],
    }
}

#[test]
fn silent_first_frame() {
    let mut e = VisualEngine::new();
    let p = e.update(&FrequencyFrame::SILENT, FRAME, 0.0);
    assert_eq!(p.audio_low, 0.0);
    assert_eq!(p.audio_mid, 0.0);
    assert_eq!(p.volume, 0.0);
    assert!((p.state.speed_scale - 0.975).abs() < 1e-4, "idle pull {}", p.state.speed_scale);
    assert!((p.bloom_strength - 0.4).abs() < 1e-6);
    assert_eq!(p.preset, *Emotion::Neutral.preset());
}

#[test]
fn audio_is_smoothed_not_copied() {
    let mut e = VisualEngine::new();
    let p = e.update(&loud(), FRAME, 0.0);
    assert!((p.audio_low - 0.15).abs() < 1e-4, "bass {}", p.audio_low);
    assert!((p.audio_mid - 0.075).abs() < 1e-4);
    for _ in 0..300 {
        e.update(&loud(), FRAME, 0.0);
    }
    let inf = e.influence();
    assert!((inf.bass - 1.0).abs() < 1e-3);
    assert!((inf.volume - 0.6).abs() < 1e-3);
}

#[test]
fn impulse_never_overshoots_and_settles_back() {
    let level = |v: f32| FrequencyFrame {
        bass: v,
        mid: v,
        treble: v,
        volume: v,
        raw: &[],
    };
    let steady = 0.2;
    let mut inf = AudioInfluence::default();
    for _ in 0..400 {
        inf.update(&level(steady), FRAME);
    }
    assert!((inf.volume - steady).abs() < 1e-4);

    inf.update(&level(1.0), FRAME);
    let peak = inf.volume;
    assert!(peak <= 1.0 && peak > steady, "peak {peak}");

    let mut steps = 0;
    while (inf.volume - steady).abs() > 1e-3 {
        inf.update(&level(steady), FRAME);
        assert!(inf.volume <= peak);
        steps += 1;
        assert!(steps < 100, "still at {} after {steps} frames", inf.volume);
    }
    for v in [inf.bass, inf.mid, inf.treble] {
        assert!(v <= 1.0 && (v - steady).abs() <= 1e-3);
    }
}

#[test]
fn level_meter_sees_the_raw_volume() {
    let mut e = VisualEngine::new();
    let p = e.update(&loud(), FRAME, 0.0);
    assert_eq!(p.raw_volume, 0.6);
    assert!((p.volume - 0.09).abs() < 1e-4, "smoothed {}", p.volume);
    let p = e.update(&FrequencyFrame::SILENT, FRAME, 0.0);
    assert_eq!(p.raw_volume, 0.0);
    assert!(p.volume > 0.0);
}

#[test]
fn bass_is_scaled_by_emotion() {
    let mut e = VisualEngine::new();
    e.set_emotion_target(Emotion::Excited, 0.0);
    for _ in 0..300 {
        e.update(&loud(), FRAME, 2.0);
    }
    let p = e.update(&loud(), FRAME, 2.0);
    assert!((p.audio_low - 1.6).abs() < 1e-2, "excited bass {}", p.audio_low);
}

#[test]
fn non_finite_audio_is_ignored() {
    let mut inf = AudioInfluence::default();
    inf.update(&loud(), FRAME);
    let before = inf;
    let bad = FrequencyFrame {
        bass: f32::NAN,
        mid: f32::INFINITY,
        treble: f32::NAN,
        volume: f32::NEG_INFINITY,
        raw: &[],
    };
    inf.update(&bad, FRAME);
    assert_eq!(inf, before);
    inf.reset();
    assert_eq!(inf, AudioInfluence::default());
}

#[test]
fn bloom_rules() {
    let neutral = Emotion::Neutral.preset();
    assert!((bloom_strength(neutral, 0.0, InteractionState::Idle) - 0.4).abs() < 1e-6);
    assert!((bloom_strength(neutral, 1.0, InteractionState::Idle) - 0.48).abs() < 1e-6);
    assert!((bloom_strength(neutral, 0.0, InteractionState::Thinking) - 0.8).abs() < 1e-6);
    assert!((bloom_strength(neutral, 0.0, InteractionState::Speaking) - 0.6).abs() < 1e-6);
    let excited = Emotion::Excited.preset();
    assert_eq!(bloom_strength(excited, 1.0, InteractionState::Thinking), BLOOM_MAX_STRENGTH);
}

#[test]
fn shader_time_advances_by_preset_speed() {
    let mut e = VisualEngine::new();
    let a = e.update(&FrequencyFrame::SILENT, 0.1, 0.0).time;
    assert!((a - 0.1).abs() < 1e-6);
    e.set_emotion_target(Emotion::Sad, 0.0);
    e.update(&FrequencyFrame::SILENT, 0.1, 2.0);
    let b = e.update(&FrequencyFrame::SILENT, 0.1, 2.0).time;
    assert!((b - 0.15 - 0.05).abs() < 1e-5, "time {b}");
}

#[test]
fn stalls_and_bad_dt_are_clamped() {
    let mut e = VisualEngine::new();
    let t = e.update(&FrequencyFrame::SILENT, 30.0, 0.0).time;
    assert!((t - MAX_FRAME_DT_SEC).abs() < 1e-6);
    let t2 = e.update(&FrequencyFrame::SILENT, f32::NAN, 0.0).time;
    assert_eq!(t, t2);
    let t3 = e.update(&FrequencyFrame::SILENT, -1.0, 0.0).time;
    assert_eq!(t, t3);
}

#[test]
fn emotion_data_drives_transition() {
    let mut e = VisualEngine::new();
    let data = EmotionData {
        text: "great news".into(),
        emotion: "HAPPY".into(),
        intensity: 0.9,
        ..Default::default()
    };
    e.set_emotion(&data, 0.0);
    assert_eq!(e.transition().target(), Emotion::Happy);
    let p = e.update(&FrequencyFrame::SILENT, FRAME, 1.0);
    assert_eq!(p.preset, *Emotion::Happy.preset());
}

#[test]
fn inputs_latch_is_applied_once() {
    let inputs = SceneInputs::default();
    inputs.set_state(InteractionState::Listening);
    inputs.set_emotion(Emotion::Calm);
    let mut e = VisualEngine::new();
    e.apply_inputs(&inputs, 0.0);
    assert_eq!(e.interaction_state(), InteractionState::Listening);
    assert_eq!(e.transition().target(), Emotion::Calm);
    assert_eq!(inputs.take_emotion(), None);
    assert_eq!(inputs.state(), InteractionState::Listening);
}

#[test]
fn reset_returns_to_neutral_idle() {
    let mut e = VisualEngine::new();
    e.set_interaction_state(InteractionState::Speaking);
    e.set_emotion_target(Emotion::Angry, 0.0);
    e.update(&loud(), FRAME, 0.5);
    e.reset();
    assert_eq!(e.interaction_state(), InteractionState::Idle);
    assert_eq!(e.transition().target(), Emotion::Neutral);
    assert_eq!(e.influence(), AudioInfluence::default());
    assert_eq!(e.update(&FrequencyFrame::SILENT, 0.0, 0.0).time, 0.0);
}
