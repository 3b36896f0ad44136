use face_core::cloud::{MeshSource, ParticleCloud, TextureImage};
use face_core::constants::{FALLBACK_TEXEL_COLOR, PARTICLE_BASE_SIZE, UNTEXTURED_COLOR};
use glam::{Mat4, Vec3};

// 2x2 RGB, rows top to bottom: red green / blue white
const PIXELS: [u8; 12] = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];

fn image() -> TextureImage<'static> {
    TextureImage {
        width: 2,
        height: 2,
        channels: 3,
        pixels: &PIXELS,
    }
}

#[test]
fn texture_sampling_flips_v() {
    let img = image();
    assert_eq!(img.sample([0.25, 0.75]), Some([1.0, 0.0, 0.0]));
    assert_eq!(img.sample([0.75, 0.75]), Some([0.0, 1.0, 0.0]));
    assert_eq!(img.sample([0.25, 0.25]), Some([0.0, 0.0, 1.0]));
    assert_eq!(img.sample([0.75, 0.25]), Some([1.0, 1.0, 1.0]));
    assert_eq!(img.sample([1.0, 0.0]), None);
    assert_eq!(img.sample([-0.5, 1.0]), None);
}

#[test]
fn vertices_are_placed_and_scaled() {
    let cloud = ParticleCloud::from_meshes([MeshSource {
        world: Mat4::from_translation(Vec3::new(0.0, 0.1, 0.0)),
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, -0.5]],
        uvs: None,
        texture: None,
    }]);
    assert_eq!(cloud.count(), 2);
    assert!((cloud.positions()[0] - Vec3::new(0.0, 0.0, 0.0)).length() < 1e-4);
    assert!((cloud.positions()[1] - Vec3::new(50.0, 0.0, -25.0)).length() < 1e-4);
    assert_eq!(cloud.colors(), &[UNTEXTURED_COLOR, UNTEXTURED_COLOR]);
    assert!(cloud.sizes().iter().all(|&s| s == PARTICLE_BASE_SIZE));
    assert_eq!(cloud.original_positions(), cloud.positions());
}

#[test]
fn texture_colors_and_fallback() {
    let cloud = ParticleCloud::from_meshes([MeshSource {
        world: Mat4::IDENTITY,
        positions: vec![[0.0; 3]; 3],
        uvs: Some(vec![[0.75, 0.75], [1.0, 0.0]]),
        texture: Some(image()),
    }]);
    assert_eq!(cloud.colors()[0], [0.0, 1.0, 0.0]);
    // outside the image, then missing uv
    assert_eq!(cloud.colors()[1], FALLBACK_TEXEL_COLOR);
    assert_eq!(cloud.colors()[2], FALLBACK_TEXEL_COLOR);
}

#[test]
fn dense_meshes_are_halved() {
    let dense = ParticleCloud::from_meshes([MeshSource {
        world: Mat4::IDENTITY,
        positions: vec![[0.0; 3]; 50_001],
        uvs: None,
        texture: None,
    }]);
    assert_eq!(dense.count(), 25_001);
    let limit = ParticleCloud::from_meshes([MeshSource {
        world: Mat4::IDENTITY,
        positions: vec![[0.0; 3]; 50_000],
        uvs: None,
        texture: None,
    }]);
    assert_eq!(limit.count(), 50_000);
}

#[test]
fn meshes_concatenate_and_reset_is_stable() {
    let mesh = |x: f32| MeshSource {
        world: Mat4::IDENTITY,
        positions: vec![[x, 0.0, 0.0]],
        uvs: None,
        texture: None,
    };
    let mut cloud = ParticleCloud::from_meshes([mesh(0.0), mesh(1.0)]);
    assert_eq!(cloud.count(), 2);
    let before = cloud.clone();
    cloud.reset_positions();
    assert_eq!(cloud, before);
    assert!(ParticleCloud::from_meshes(Vec::<MeshSource>::new()).is_empty());
}

#[test]
fn broken_model_bytes_are_an_asset_error() {
    let err = face_core::asset::cloud_from_slice(b"not a model").unwrap_err();
    assert!(matches!(err, face_core::FaceError::AssetLoad(_)), "{err:?}");
}
