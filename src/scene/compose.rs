use crate::assets::mesh::Mesh;
use crate::assets::texture::Texture;
use crate::config::RenderConfig;
use crate::foundation::core::{Aabb, Color, Mat4, Vec3, Vec4};
use crate::foundation::error::{ThumbnailError, ThumbnailResult};
use crate::render::shader::PhongShader;
use crate::scene::camera::Camera;

/// A mesh with its texture and fallback color.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub mesh: Mesh,
    pub texture: Option<Texture>,
    pub color: Color,
}

/// Camera, shader and objects for a single frame.
///
/// A scene is drawable only once it has been framed: [`Scene::fit_to_objects`] must run after
/// the last object is added. Adding an object afterwards clears the framed state.
#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,
    pub shader: PhongShader,
    objects: Vec<SceneObject>,
    framed: bool,
}

/// Camera adjustment that brings every object fully into frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    /// Eye position after any dolly away from the near plane.
    pub eye: Vec3,
    /// Replacement for the shader matrix.
    pub matrix: Mat4,
}

impl Scene {
    pub fn new(camera: Camera, shader: PhongShader) -> Self {
        Self {
            camera,
            shader,
            objects: Vec::new(),
            framed: false,
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
        self.framed = false;
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn is_framed(&self) -> bool {
        self.framed
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        let boxes = self.objects.iter().filter_map(|o| o.mesh.bounding_box());
        Aabb::from_points(boxes.flat_map(|b| [b.min, b.max]))
    }

    /// Compute the [`Fit`] for the current objects without applying it.
    pub fn fit_objects(&self, margin: f32) -> ThumbnailResult<Fit> {
        let bounds = self
            .bounding_box()
            .ok_or_else(|| ThumbnailError::asset_load("scene has no geometry to frame"))?;
        let corners = bounds.corners();

        // Keep every corner at least two near-planes in front of the eye.
        let mut camera = self.camera;
        let view = camera.view();
        let min_depth = corners
            .iter()
            .map(|c| -(view * c.extend(1.0)).z)
            .fold(f32::INFINITY, f32::min);
        let clearance = 2.0 * camera.near;
        if min_depth < clearance {
            camera.eye -= camera.forward() * (clearance - min_depth);
        }

        let base = camera.view_projection();
        let (mut lo_x, mut lo_y) = (f32::INFINITY, f32::INFINITY);
        let (mut hi_x, mut hi_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for c in corners {
            let clip = base * c.extend(1.0);
            let (x, y) = (clip.x / clip.w, clip.y / clip.w);
            lo_x = lo_x.min(x);
            lo_y = lo_y.min(y);
            hi_x = hi_x.max(x);
            hi_y = hi_y.max(y);
        }

        let (cx, cy) = ((lo_x + hi_x) * 0.5, (lo_y + hi_y) * 0.5);
        let half = ((hi_x - lo_x) * 0.5).max((hi_y - lo_y) * 0.5);
        let s = if half > f32::EPSILON {
            (1.0 - margin.clamp(0.0, 0.9)) / half
        } else {
            1.0
        };

        // Clip-space recentre and uniform scale: x' = s * (x - cx * w), likewise for y.
        let fit = Mat4::from_cols(
            Vec4::new(s, 0.0, 0.0, 0.0),
            Vec4::new(0.0, s, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(-s * cx, -s * cy, 0.0, 1.0),
        );

        Ok(Fit {
            eye: camera.eye,
            matrix: fit * base,
        })
    }

    /// Compute and apply the [`Fit`], marking the scene drawable.
    pub fn fit_to_objects(&mut self, margin: f32) -> ThumbnailResult<()> {
        let fit = self.fit_objects(margin)?;
        self.camera.eye = fit.eye;
        self.shader.camera_position = fit.eye;
        self.shader.matrix = fit.matrix;
        self.framed = true;
        Ok(())
    }
}

/// Build the thumbnail scene for one mesh and texture and frame it.
pub fn compose(mesh: Mesh, texture: Texture, cfg: &RenderConfig) -> ThumbnailResult<Scene> {
    if mesh.is_empty() {
        return Err(ThumbnailError::asset_load("mesh contains no triangles"));
    }

    // Output is always square.
    let camera = Camera::from_config(&cfg.camera, 1.0);
    let shader = PhongShader::new(camera.view_projection(), &cfg.shading, camera.eye);
    let mut scene = Scene::new(camera, shader);
    scene.add_object(SceneObject {
        mesh,
        texture: Some(texture),
        color: cfg.shading.object_color,
    });
    scene.fit_to_objects(cfg.fit_margin)?;
    Ok(scene)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compose.rs"]
mod tests;
