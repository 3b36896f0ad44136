#![cfg(feature = "gpu")]

use face_core::render::particles::{shader_overrides, ParticleInstance, ParticleUniforms};
use face_core::render::post::PostUniforms;
use face_core::render::bloom_size;
use face_core::{PARTICLES_WGSL, POST_WGSL};

#[test]
fn uniform_structs_match_wgsl_sizes() {
    assert_eq!(std::mem::size_of::<ParticleUniforms>(), 176);
    assert_eq!(std::mem::size_of::<PostUniforms>(), 32);
    assert_eq!(std::mem::size_of::<ParticleInstance>(), 28);
    assert_eq!(ParticleInstance::layout().array_stride, 28);
}

#[test]
fn every_override_is_declared_in_the_shader() {
    let overrides = shader_overrides();
    assert_eq!(overrides.len(), 27);
    for key in overrides.keys() {
        assert!(
            PARTICLES_WGSL.contains(&format!("override {key}: f32")),
            "missing override {key}"
        );
    }
}

#[test]
fn points_are_not_fogged_by_default() {
    let overrides = shader_overrides();
    assert_eq!(overrides.get("FOG_AMOUNT"), Some(&0.0));
    assert!(PARTICLES_WGSL.contains("* FOG_AMOUNT"));
}

#[test]
fn shader_entry_points_exist() {
    for entry in ["fn vs_main", "fn fs_main"] {
        assert!(PARTICLES_WGSL.contains(entry));
    }
    for entry in ["fn vs_fullscreen", "fn fs_bright", "fn fs_blur", "fn fs_composite"] {
        assert!(POST_WGSL.contains(entry));
    }
}

#[test]
fn bloom_targets_are_half_size_and_never_empty() {
    assert_eq!(bloom_size(1920, 1080), (960, 540));
    assert_eq!(bloom_size(1, 1), (1, 1));
    assert_eq!(bloom_size(0, 0), (1, 1));
}
