use face_core::presets::{Emotion, SpecialEffect};
use face_core::transition::EmotionTransition;

#[test]
fn starts_settled_on_neutral() {
    let mut t = EmotionTransition::default();
    assert_eq!(t.target(), Emotion::Neutral);
    assert!(!t.in_flight());
    assert_eq!(t.active(10.0), *Emotion::Neutral.preset());
}

#[test]
fn blend_starts_at_current_and_commits_after_duration() {
    let mut t = EmotionTransition::default();
    t.set_target(Emotion::Happy, 2.0);
    assert!(t.in_flight());
    assert_eq!(t.active(2.0), *Emotion::Neutral.preset());

    let mid = t.active(2.5);
    assert!((mid.speed - 1.25).abs() < 1e-6, "eased midpoint, got {}", mid.speed);
    assert_eq!(mid.special_effect, Some(SpecialEffect::Sparkle));

    assert_eq!(t.active(3.0), *Emotion::Happy.preset());
    assert!(!t.in_flight());
    assert_eq!(*t.current(), *Emotion::Happy.preset());
}

#[test]
fn easing_is_slow_at_the_ends() {
    let mut t = EmotionTransition::default();
    t.set_target(Emotion::Excited, 0.0);
    let early = t.active(0.1).speed - 1.0;
    let late = 2.0 - t.active(0.9).speed;
    assert!(early < 0.01, "early step {early}");
    assert!((early - late).abs() < 1e-4, "symmetric ease, {early} vs {late}");
}

#[test]
fn resending_settled_target_is_a_no_op() {
    let mut t = EmotionTransition::default();
    t.set_target(Emotion::Calm, 0.0);
    t.active(5.0);
    t.set_target(Emotion::Calm, 6.0);
    assert!(!t.in_flight());
    assert_eq!(t.active(6.0), *Emotion::Calm.preset());
}

#[test]
fn interruption_continues_from_visible_blend() {
    let mut t = EmotionTransition::default();
    t.set_target(Emotion::Happy, 0.0);
    let before = t.active(0.5);
    t.set_target(Emotion::Sad, 0.5);
    let after = t.active(0.5);
    assert!((before.speed - after.speed).abs() < 1e-6);
    assert!((before.scale - after.scale).abs() < 1e-6);
    assert_eq!(t.target(), Emotion::Sad);
    assert_eq!(t.active(1.5), *Emotion::Sad.preset());
}

#[test]
fn clock_going_backwards_holds_the_start() {
    let mut t = EmotionTransition::default();
    t.set_target(Emotion::Angry, 4.0);
    assert_eq!(t.active(3.0), *Emotion::Neutral.preset());
    assert_eq!(t.progress(), 0.0);
}
