//! wgpu renderer shared by the web and native front ends.
//!
//! Frame layout: particles into an HDR target, bright pass, separable blur at
//! half resolution, then composite onto the surface.

mod helpers;
pub mod particles;
pub mod post;
mod targets;

use anyhow::anyhow;

use crate::camera::Camera;
use crate::cloud::ParticleCloud;
use crate::visual::FrameParams;
use crate::{PARTICLES_WGSL, POST_WGSL};
use particles::{ParticlePass, ParticleUniforms};
use post::{PostBindGroups, PostResources, PostUniforms};
use targets::RenderTargets;

pub use targets::bloom_size;

pub struct Renderer<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,
    particles: ParticlePass,
    camera: Camera,
    width: u32,
    height: u32,
    disposed: bool,
}

impl<'a> Renderer<'a> {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'a>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow!("request_device error: {e:?}"))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let particle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles_wgsl"),
            source: wgpu::ShaderSource::Wgsl(PARTICLES_WGSL.into()),
        });
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_wgsl"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });

        let targets = RenderTargets::new(&device, width, height);
        let post = post::create_post_resources(&device, &post_shader, format);
        let post_groups = post.bind_groups(&device, &targets);
        let particles = ParticlePass::new(&device, &particle_shader);
        let mut camera = Camera::default();
        camera.set_viewport(width, height);
        log::info!("[gpu] surface {width}x{height} format={format:?}");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            post,
            post_groups,
            particles,
            camera,
            width,
            height,
            disposed: false,
        })
    }

    /// Uploads a freshly loaded point cloud; replaces any previous one.
    pub fn set_cloud(&mut self, cloud: &ParticleCloud) {
        if self.disposed {
            return;
        }
        self.particles.upload(&self.device, cloud);
        log::info!("[gpu] {} particles uploaded", self.particles.count());
    }

    pub fn particle_count(&self) -> u32 {
        self.particles.count()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if self.disposed || width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.camera.set_viewport(width, height);

            // Recreate offscreen render targets and dependent bind groups
            self.targets.destroy();
            self.targets = RenderTargets::new(&self.device, width, height);
            self.post_groups = self.post.bind_groups(&self.device, &self.targets);
        }
    }

    /// Reapplies the surface configuration after `Lost` / `Outdated`.
    pub fn reconfigure(&mut self) {
        if !self.disposed {
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn render(&mut self, frame: &FrameParams) -> Result<(), wgpu::SurfaceError> {
        if self.disposed {
            return Ok(());
        }
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let resolution = [self.width as f32, self.height as f32];
        let uniforms = ParticleUniforms::new(&self.camera, resolution, frame);
        self.queue
            .write_buffer(&self.particles.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let (bw, bh) = bloom_size(self.width, self.height);
        let bloom_res = [bw as f32, bh as f32];
        let post_h = PostUniforms::bloom(bloom_res, [1.0, 0.0], frame.bloom_strength);
        let post_v = PostUniforms::bloom(bloom_res, [0.0, 1.0], frame.bloom_strength);
        self.queue
            .write_buffer(&self.post.uniforms_h, 0, bytemuck::bytes_of(&post_h));
        self.queue
            .write_buffer(&self.post.uniforms_v, 0, bytemuck::bytes_of(&post_v));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: particles -> hdr
        self.particles.draw(&mut encoder, &self.targets.hdr_view);

        // Pass 2: bright pass -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            &self.post.bright_pipeline,
            &self.post_groups.from_hdr,
            None,
        );

        // Pass 3: blur horizontal bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_a,
            None,
        );

        // Pass 4: blur vertical bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_b,
            None,
        );

        // Pass 5: composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            &self.post.composite_pipeline,
            &self.post_groups.from_hdr,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Releases GPU buffers and textures. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.particles.destroy();
        self.post.destroy();
        self.targets.destroy();
        log::info!("[gpu] disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
