//! Orbiting perspective camera shared by the web and native renderers.
//!
//! The camera circles the face at a fixed radius; aspect changes are applied
//! by the renderer right before the frame's passes are encoded, so a frame
//! never mixes matrices from two viewport sizes.

use glam::{Mat4, Vec3};

use crate::constants::{AUTO_ROTATE_SPEED, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_Z};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    orbit_angle: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
            orbit_angle: 0.0,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Auto-rotation around the vertical axis, at the orbit-controls rate
    /// (speed 2.0 is one revolution per 30 s).
    pub fn orbit(&mut self, dt_sec: f32) {
        let offset = self.eye - self.target;
        let radius = offset.x.hypot(offset.z);
        self.orbit_angle = (self.orbit_angle + auto_rotate_rad_per_sec() * dt_sec.max(0.0))
            % std::f32::consts::TAU;
        let (s, c) = self.orbit_angle.sin_cos();
        self.eye = self.target + Vec3::new(radius * s, offset.y, radius * c);
    }
}

#[inline]
pub fn auto_rotate_rad_per_sec() -> f32 {
    std::f32::consts::TAU / 60.0 * AUTO_ROTATE_SPEED
}
