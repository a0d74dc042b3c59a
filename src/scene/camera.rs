use crate::config::CameraConfig;
use crate::foundation::core::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    pub fovy_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn from_config(cfg: &CameraConfig, aspect: f32) -> Self {
        Self {
            eye: cfg.eye,
            center: cfg.center,
            up: cfg.up,
            fovy_degrees: cfg.fovy_degrees,
            aspect,
            near: cfg.near,
            far: cfg.far,
        }
    }

    /// Unit vector from the eye towards the center.
    pub fn forward(&self) -> Vec3 {
        (self.center - self.eye).normalize_or_zero()
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.center, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}
