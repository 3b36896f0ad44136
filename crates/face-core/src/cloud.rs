//! Static particle geometry built once from the face model's meshes.

use glam::{Mat4, Vec3};

use crate::constants::{
    DOWNSAMPLE_ABOVE_VERTICES, FALLBACK_TEXEL_COLOR, MODEL_SCALE, MODEL_Y_OFFSET,
    PARTICLE_BASE_SIZE, UNTEXTURED_COLOR,
};

/// Decoded base-colour texture, 8 bits per channel, rows top to bottom.
#[derive(Clone, Copy, Debug)]
pub struct TextureImage<'a> {
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub pixels: &'a [u8],
}

impl TextureImage<'_> {
    /// Colour under a UV coordinate; `None` when the texel index falls outside
    /// the pixel data.
    pub fn sample(&self, uv: [f32; 2]) -> Option<[f32; 3]> {
        let w = self.width as i64;
        let h = self.height as i64;
        let tx = (uv[0] * self.width as f32).floor() as i64;
        let ty = ((1.0 - uv[1]) * self.height as f32).floor() as i64;
        let idx = (ty * w + tx) * self.channels as i64;
        if w == 0 || h == 0 || self.channels < 3 || idx < 0 {
            return None;
        }
        let idx = idx as usize;
        let px = self.pixels.get(idx..idx + 3)?;
        Some([
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
        ])
    }
}

/// One mesh primitive in model space plus its world transform.
#[derive(Clone, Debug)]
pub struct MeshSource<'a> {
    pub world: Mat4,
    pub positions: Vec<[f32; 3]>,
    pub uvs: Option<Vec<[f32; 2]>>,
    pub texture: Option<TextureImage<'a>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleCloud {
    positions: Vec<Vec3>,
    original_positions: Vec<Vec3>,
    colors: Vec<[f32; 3]>,
    sizes: Vec<f32>,
}

impl ParticleCloud {
    pub fn from_meshes<'a>(meshes: impl IntoIterator<Item = MeshSource<'a>>) -> Self {
        let mut cloud = ParticleCloud::default();
        for mesh in meshes {
            cloud.push_mesh(&mesh);
        }
        cloud.original_positions = cloud.positions.clone();
        cloud
    }

    fn push_mesh(&mut self, mesh: &MeshSource<'_>) {
        let count = mesh.positions.len();
        let step = if count > DOWNSAMPLE_ABOVE_VERTICES { 2 } else { 1 };
        log::info!("[asset] mesh with {count} vertices, step {step}");
        let lookup = mesh.texture.as_ref().zip(mesh.uvs.as_deref());
        for i in (0..count).step_by(step) {
            let world = mesh.world.transform_point3(Vec3::from(mesh.positions[i]));
            self.positions.push(Vec3::new(
                world.x * MODEL_SCALE,
                world.y * MODEL_SCALE + MODEL_Y_OFFSET,
                world.z * MODEL_SCALE,
            ));
            let color = match lookup {
                Some((tex, uvs)) => uvs
                    .get(i)
                    .and_then(|&uv| tex.sample(uv))
                    .unwrap_or(FALLBACK_TEXEL_COLOR),
                None => UNTEXTURED_COLOR,
            };
            self.colors.push(color);
            self.sizes.push(PARTICLE_BASE_SIZE);
        }
    }

    pub fn count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Import-time positions, kept for resets.
    pub fn original_positions(&self) -> &[Vec3] {
        &self.original_positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Puts every point back at its import position.
    pub fn reset_positions(&mut self) {
        self.positions.copy_from_slice(&self.original_positions);
    }
}
