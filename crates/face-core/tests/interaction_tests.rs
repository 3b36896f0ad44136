use face_core::constants::{INITIAL_STATE_UNIFORMS, SPEAKING_TARGETS, THINKING_TARGETS};
use face_core::easing::{smoothing_factor, time_constant_sec};
use face_core::interaction::{InteractionMachine, InteractionState, StateUniforms};

const FRAME: f32 = 1.0 / 60.0;

#[test]
fn starts_idle_with_initial_uniforms() {
    let m = InteractionMachine::default();
    assert_eq!(m.state(), InteractionState::Idle);
    assert_eq!(m.uniforms().to_array(), INITIAL_STATE_UNIFORMS);
}

#[test]
fn one_frame_covers_five_percent() {
    let mut m = InteractionMachine::default();
    m.set_state(InteractionState::Listening);
    let u = m.step(FRAME);
    assert!((u.noise_amp - 1.01).abs() < 1e-4, "noise_amp {}", u.noise_amp);
    assert!((u.color_shift - 0.005).abs() < 1e-4, "color_shift {}", u.color_shift);
    assert!((u.speed_scale - 1.0).abs() < 1e-6);
}

#[test]
fn uniforms_never_jump_and_converge() {
    let mut m = InteractionMachine::default();
    m.set_state(InteractionState::Thinking);
    let mut prev = m.uniforms().to_array();
    for _ in 0..600 {
        let cur = m.step(FRAME).to_array();
        for i in 0..4 {
            let step = (cur[i] - prev[i]).abs();
            let gap = (THINKING_TARGETS[i] - prev[i]).abs();
            assert!(step <= gap * 0.051 + 1e-6, "uniform {i} jumped {step} of {gap}");
        }
        prev = cur;
    }
    for i in 0..4 {
        assert!((prev[i] - THINKING_TARGETS[i]).abs() < 1e-3, "uniform {i} at {}", prev[i]);
    }
}

#[test]
fn last_state_wins() {
    let mut m = InteractionMachine::default();
    m.set_state(InteractionState::Thinking);
    m.set_state(InteractionState::Speaking);
    assert_eq!(m.state(), InteractionState::Speaking);
    for _ in 0..600 {
        m.step(FRAME);
    }
    let u = m.uniforms().to_array();
    for i in 0..4 {
        assert!((u[i] - SPEAKING_TARGETS[i]).abs() < 1e-3);
    }
}

#[test]
fn speaking_settles_within_two_hundred_frames() {
    let mut m = InteractionMachine::default();
    m.set_state(InteractionState::Speaking);
    let mut u = m.uniforms();
    for _ in 0..200 {
        u = m.step(FRAME);
    }
    assert!((u.expand - 1.0).abs() < 0.01, "expand {}", u.expand);
    assert!(u.color_shift.abs() < 0.01, "color_shift {}", u.color_shift);
}

#[test]
fn frame_rate_does_not_change_the_curve() {
    let mut at60 = InteractionMachine::default();
    let mut at120 = InteractionMachine::default();
    at60.set_state(InteractionState::Thinking);
    at120.set_state(InteractionState::Thinking);
    for _ in 0..30 {
        at60.step(FRAME);
    }
    for _ in 0..60 {
        at120.step(FRAME / 2.0);
    }
    let (a, b) = (at60.uniforms().to_array(), at120.uniforms().to_array());
    for i in 0..4 {
        assert!((a[i] - b[i]).abs() < 1e-3, "uniform {i}: {} vs {}", a[i], b[i]);
    }
}

#[test]
fn smoothing_constants_at_reference_rate() {
    assert!((smoothing_factor(0.05, FRAME) - 0.05).abs() < 1e-5);
    assert!((smoothing_factor(0.15, FRAME) - 0.15).abs() < 1e-5);
    assert_eq!(smoothing_factor(0.05, 0.0), 0.0);
    assert!((time_constant_sec(0.05) - 0.325).abs() < 1e-3);
    assert!((time_constant_sec(0.15) - 0.1026).abs() < 1e-3);
}

#[test]
fn state_labels_round_trip() {
    for s in [
        InteractionState::Idle,
        InteractionState::Listening,
        InteractionState::Thinking,
        InteractionState::Speaking,
    ] {
        assert_eq!(InteractionState::from_label(s.label()), Some(s));
    }
    assert_eq!(InteractionState::from_label("dreaming"), None);
    assert_eq!(StateUniforms::default().to_array(), INITIAL_STATE_UNIFORMS);
}
