use crate::assets::mesh::Triangle;
use crate::foundation::core::{Color, Vec2, Vec3, Vec4};
use crate::render::shader::{Fragment, PhongShader};
use crate::scene::compose::SceneObject;

/// A rendered frame as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

/// Offscreen color and depth buffers.
///
/// Single-threaded and order-dependent only through the depth test, so the same triangles in the
/// same order always produce the same pixels.
pub struct Context {
    width: u32,
    height: u32,
    color: Vec<u8>,
    depth: Vec<f32>,
}

#[derive(Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    z: f32,
    inv_w: f32,
}

impl Context {
    pub fn new(width: u32, height: u32, clear: Color) -> Self {
        let n = width as usize * height as usize;
        let px = clear.to_rgba8();
        let mut color = Vec::with_capacity(n * 4);
        for _ in 0..n {
            color.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            color,
            depth: vec![f32::INFINITY; n],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Draw every triangle of `object` through `shader`.
    pub fn draw_object(&mut self, shader: &PhongShader, object: &SceneObject) -> usize {
        let mut drawn = 0;
        for tri in &object.mesh.triangles {
            if self.draw_triangle(shader, object, tri) {
                drawn += 1;
            }
        }
        drawn
    }

    /// Rasterize one triangle. Returns `false` when it was culled entirely.
    pub fn draw_triangle(
        &mut self,
        shader: &PhongShader,
        object: &SceneObject,
        tri: &Triangle,
    ) -> bool {
        let clip: [Vec4; 3] = tri.v.map(|v| shader.matrix * v.position.extend(1.0));

        // Framing keeps geometry in front of the eye; anything else is dropped, not clipped.
        if clip.iter().any(|c| c.w <= f32::EPSILON) {
            return false;
        }
        if outside_same_plane(&clip) {
            return false;
        }

        let (w, h) = (self.width as f32, self.height as f32);
        let s: [ScreenVertex; 3] = clip.map(|c| {
            let inv_w = 1.0 / c.w;
            ScreenVertex {
                x: (c.x * inv_w + 1.0) * 0.5 * w,
                y: (1.0 - c.y * inv_w) * 0.5 * h,
                z: c.z * inv_w,
                inv_w,
            }
        });

        let area = edge(s[0], s[1], s[2].x, s[2].y);
        if area.abs() <= f32::EPSILON {
            return false;
        }

        let min_x = s.iter().map(|v| v.x).fold(f32::INFINITY, f32::min).floor().max(0.0);
        let min_y = s.iter().map(|v| v.y).fold(f32::INFINITY, f32::min).floor().max(0.0);
        let max_x = s
            .iter()
            .map(|v| v.x)
            .fold(f32::NEG_INFINITY, f32::max)
            .ceil()
            .min(w - 1.0);
        let max_y = s
            .iter()
            .map(|v| v.y)
            .fold(f32::NEG_INFINITY, f32::max)
            .ceil()
            .min(h - 1.0);
        if min_x > max_x || min_y > max_y {
            return false;
        }

        for py in min_y as u32..=max_y as u32 {
            for px in min_x as u32..=max_x as u32 {
                let (fx, fy) = (px as f32 + 0.5, py as f32 + 0.5);
                let b0 = edge(s[1], s[2], fx, fy) / area;
                let b1 = edge(s[2], s[0], fx, fy) / area;
                let b2 = edge(s[0], s[1], fx, fy) / area;
                if b0 < 0.0 || b1 < 0.0 || b2 < 0.0 {
                    continue;
                }

                let z = b0 * s[0].z + b1 * s[1].z + b2 * s[2].z;
                if !(0.0..=1.0).contains(&z) {
                    continue;
                }
                let i = (py * self.width + px) as usize;
                if z >= self.depth[i] {
                    continue;
                }

                // Perspective-correct weights.
                let p = [b0 * s[0].inv_w, b1 * s[1].inv_w, b2 * s[2].inv_w];
                let norm = p[0] + p[1] + p[2];
                let p = p.map(|k| k / norm);
                let [v0, v1, v2] = tri.v;
                let frag = Fragment {
                    position: lerp3(p, v0.position, v1.position, v2.position),
                    normal: lerp3(p, v0.normal, v1.normal, v2.normal),
                    uv: lerp2(p, v0.uv, v1.uv, v2.uv),
                };

                let color = shader.fragment(object, &frag).to_rgba8();
                self.depth[i] = z;
                self.color[i * 4..i * 4 + 4].copy_from_slice(&color);
            }
        }
        true
    }

    pub fn into_frame(self) -> FrameRGBA {
        FrameRGBA {
            width: self.width,
            height: self.height,
            data: self.color,
        }
    }
}

fn edge(a: ScreenVertex, b: ScreenVertex, x: f32, y: f32) -> f32 {
    (x - a.x) * (b.y - a.y) - (y - a.y) * (b.x - a.x)
}

/// True when all three vertices are outside the same clip plane.
fn outside_same_plane(clip: &[Vec4; 3]) -> bool {
    let all = |f: fn(&Vec4) -> bool| clip.iter().all(f);
    all(|c| c.x < -c.w)
        || all(|c| c.x > c.w)
        || all(|c| c.y < -c.w)
        || all(|c| c.y > c.w)
        || all(|c| c.z < 0.0)
        || all(|c| c.z > c.w)
}

fn lerp3(p: [f32; 3], a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    a * p[0] + b * p[1] + c * p[2]
}

fn lerp2(p: [f32; 3], a: Vec2, b: Vec2, c: Vec2) -> Vec2 {
    a * p[0] + b * p[1] + c * p[2]
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
