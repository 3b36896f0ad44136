//! glTF face model to particle cloud.
//!
//! Every mesh primitive reachable from the default scene contributes its
//! vertices, placed in world space through the node hierarchy and coloured from
//! the base-colour texture when the primitive has one.

use std::path::Path;

use glam::Mat4;
use gltf::image::Format;

use crate::cloud::{MeshSource, ParticleCloud, TextureImage};
use crate::error::FaceError;

/// Self-contained model bytes (`.glb`, or `.gltf` with embedded buffers).
pub fn cloud_from_slice(bytes: &[u8]) -> Result<ParticleCloud, FaceError> {
    let (doc, buffers, images) =
        gltf::import_slice(bytes).map_err(|e| FaceError::AssetLoad(e.to_string()))?;
    cloud_from_document(&doc, &buffers, &images)
}

/// Model on disk; external buffers and images resolve next to it.
pub fn cloud_from_path(path: impl AsRef<Path>) -> Result<ParticleCloud, FaceError> {
    let path = path.as_ref();
    let (doc, buffers, images) = gltf::import(path)
        .map_err(|e| FaceError::AssetLoad(format!("{}: {e}", path.display())))?;
    cloud_from_document(&doc, &buffers, &images)
}

fn cloud_from_document(
    doc: &gltf::Document,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
) -> Result<ParticleCloud, FaceError> {
    let scene = doc
        .default_scene()
        .or_else(|| doc.scenes().next())
        .ok_or_else(|| FaceError::AssetLoad("model has no scene".to_string()))?;
    let mut meshes = Vec::new();
    for node in scene.nodes() {
        collect_meshes(&node, Mat4::IDENTITY, buffers, images, &mut meshes);
    }
    let cloud = ParticleCloud::from_meshes(meshes);
    if cloud.is_empty() {
        return Err(FaceError::AssetLoad("model has no vertices".to_string()));
    }
    log::info!("[asset] particle cloud ready: {} points", cloud.count());
    Ok(cloud)
}

fn collect_meshes<'a>(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    images: &'a [gltf::image::Data],
    out: &mut Vec<MeshSource<'a>>,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        for prim in mesh.primitives() {
            let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let uvs = reader
                .read_tex_coords(0)
                .map(|tc| tc.into_f32().collect::<Vec<_>>());
            let texture = prim
                .material()
                .pbr_metallic_roughness()
                .base_color_texture()
                .and_then(|info| images.get(info.texture().source().index()))
                .and_then(texture_image);
            out.push(MeshSource {
                world,
                positions: positions.collect(),
                uvs,
                texture,
            });
        }
    }
    for child in node.children() {
        collect_meshes(&child, world, buffers, images, out);
    }
}

fn texture_image(img: &gltf::image::Data) -> Option<TextureImage<'_>> {
    let channels = match img.format {
        Format::R8G8B8 => 3,
        Format::R8G8B8A8 => 4,
        other => {
            log::warn!("[asset] unsupported texture format {other:?}, using flat colour");
            return None;
        }
    };
    Some(TextureImage {
        width: img.width,
        height: img.height,
        channels,
        pixels: &img.pixels,
    })
}
