use crate::config::ShadingConfig;
use crate::foundation::core::{Color, Mat4, Vec2, Vec3};
use crate::scene::compose::SceneObject;

/// Interpolated attributes at one pixel.
#[derive(Clone, Copy, Debug)]
pub struct Fragment {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Directional-light Phong shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhongShader {
    /// Model-to-clip transform applied to every vertex.
    pub matrix: Mat4,
    /// Normalized direction towards the light.
    pub light_direction: Vec3,
    pub camera_position: Vec3,
    pub ambient_color: Color,
    pub diffuse_color: Color,
    pub specular_color: Color,
    pub specular_power: f32,
}

impl PhongShader {
    pub fn new(matrix: Mat4, shading: &ShadingConfig, camera_position: Vec3) -> Self {
        Self {
            matrix,
            light_direction: shading.light_direction.normalize_or_zero(),
            camera_position,
            ambient_color: shading.ambient_color,
            diffuse_color: shading.diffuse_color,
            specular_color: shading.specular_color,
            specular_power: shading.specular_power,
        }
    }

    pub fn fragment(&self, object: &SceneObject, f: &Fragment) -> Color {
        let base = match &object.texture {
            Some(tex) => tex.sample(f.uv),
            None => object.color,
        };

        let n = f.normal.normalize_or_zero();
        let diffuse = n.dot(self.light_direction).max(0.0);
        let mut light = self.ambient_color.add(self.diffuse_color.scale(diffuse));

        if diffuse > 0.0 && self.specular_power > 0.0 {
            let to_camera = (self.camera_position - f.position).normalize_or_zero();
            let incident = -self.light_direction;
            let reflected = incident - 2.0 * incident.dot(n) * n;
            let specular = to_camera.dot(reflected).max(0.0).powf(self.specular_power);
            light = light.add(self.specular_color.scale(specular));
        }

        base.mul(light).saturate_with_alpha(base.a)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/shader.rs"]
mod tests;
