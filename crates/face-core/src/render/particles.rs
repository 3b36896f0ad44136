use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::helpers::uniform_entry;
use super::targets::HDR_FORMAT;
use crate::camera::Camera;
use crate::cloud::ParticleCloud;
use crate::constants::*;
use crate::visual::FrameParams;

/// Mirrors `ParticleUniforms` in particles.wgsl (176 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct ParticleUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub time: f32,
    pub audio_low: f32,
    pub audio_mid: f32,
    pub audio_high: f32,
    pub speed_scale: f32,
    pub noise_amp: f32,
    pub expand: f32,
    pub color_shift: f32,
    pub fog_near: f32,
    pub fog_far: f32,
}

impl ParticleUniforms {
    pub fn new(camera: &Camera, resolution: [f32; 2], frame: &FrameParams) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            resolution,
            time: frame.time,
            audio_low: frame.audio_low,
            audio_mid: frame.audio_mid,
            audio_high: frame.audio_high,
            speed_scale: frame.state.speed_scale,
            noise_amp: frame.state.noise_amp,
            expand: frame.state.expand,
            color_shift: frame.state.color_shift,
            fog_near: FOG_NEAR,
            fog_far: FOG_FAR,
        }
    }
}

/// Per-particle instance data.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub size: f32,
}

impl ParticleInstance {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub fn instances(cloud: &ParticleCloud) -> Vec<ParticleInstance> {
    cloud
        .positions()
        .iter()
        .zip(cloud.colors())
        .zip(cloud.sizes())
        .map(|((p, c), s)| ParticleInstance {
            position: p.to_array(),
            color: *c,
            size: *s,
        })
        .collect()
}

/// Pipeline-overridable shader tuning values, keyed by the WGSL `override` names.
pub fn shader_overrides() -> HashMap<String, f64> {
    [
        ("FLOW_FREQUENCY", FLOW_FREQUENCY),
        ("FLOW_TIME_RATE", FLOW_TIME_RATE),
        ("FLOW_AMPLITUDE", FLOW_AMPLITUDE),
        ("BEAT_GAIN", BEAT_GAIN),
        ("EXPAND_BEAT_GAIN", EXPAND_BEAT_GAIN),
        ("EXPAND_PUSH_GAIN", EXPAND_PUSH_GAIN),
        ("FACE_CENTER_Y", FACE_CENTER_Y),
        ("JITTER_FREQUENCY", JITTER_FREQUENCY),
        ("JITTER_TIME_RATE", JITTER_TIME_RATE),
        ("JITTER_BASE", JITTER_BASE),
        ("JITTER_SHIFT_GAIN", JITTER_SHIFT_GAIN),
        ("THINK_THRESHOLD", THINK_THRESHOLD),
        ("THINK_FREQUENCY", THINK_FREQUENCY),
        ("THINK_TIME_RATE", THINK_TIME_RATE),
        ("THINK_GAIN", THINK_GAIN),
        ("SIZE_ATTENUATION", SIZE_ATTENUATION),
        ("SIZE_MID_GAIN", SIZE_MID_GAIN),
        ("ACCENT_R", ACCENT_COLOR[0]),
        ("ACCENT_G", ACCENT_COLOR[1]),
        ("ACCENT_B", ACCENT_COLOR[2]),
        ("FLICKER_RATE", FLICKER_RATE),
        ("SPEAK_GLOW_GAIN", SPEAK_GLOW_GAIN),
        ("DISC_SOFT_EDGE", DISC_SOFT_EDGE),
        ("GLOW_FALLOFF", GLOW_FALLOFF),
        ("GLOW_GAIN", GLOW_GAIN),
        ("POINT_OPACITY", POINT_OPACITY),
        ("FOG_AMOUNT", FOG_AMOUNT),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v as f64))
    .collect()
}

pub(crate) struct ParticlePass {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    instances: Option<(wgpu::Buffer, u32)>,
}

impl ParticlePass {
    pub(crate) fn new(device: &wgpu::Device, shader: &wgpu::ShaderModule) -> Self {
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("particles_bgl"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_uniforms"),
            size: std::mem::size_of::<ParticleUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("particles_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_particles"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let constants = shader_overrides();
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particles_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[ParticleInstance::layout()],
                compilation_options: wgpu::PipelineCompilationOptions {
                    constants: &constants,
                    ..Default::default()
                },
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions {
                    constants: &constants,
                    ..Default::default()
                },
            }),
            cache: None,
            multiview: None,
        });
        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            instances: None,
        }
    }

    /// Replaces the instance buffer; the previous one is destroyed.
    pub(crate) fn upload(&mut self, device: &wgpu::Device, cloud: &ParticleCloud) {
        if let Some((old, _)) = self.instances.take() {
            old.destroy();
        }
        if cloud.is_empty() {
            return;
        }
        let data = instances(cloud);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle_instances"),
            contents: bytemuck::cast_slice(&data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        self.instances = Some((buffer, data.len() as u32));
    }

    pub(crate) fn count(&self) -> u32 {
        self.instances.as_ref().map_or(0, |(_, n)| *n)
    }

    pub(crate) fn draw(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("particles_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        if let Some((buffer, count)) = &self.instances {
            r.set_pipeline(&self.pipeline);
            r.set_bind_group(0, &self.bind_group, &[]);
            r.set_vertex_buffer(0, buffer.slice(..));
            r.draw(0..6, 0..*count);
        }
    }

    pub(crate) fn destroy(&mut self) {
        if let Some((buffer, _)) = self.instances.take() {
            buffer.destroy();
        }
        self.uniform_buffer.destroy();
    }
}
