//! CPU rendering of a composed [`Scene`] into PNG bytes.

/// PNG encoding of rendered frames.
pub mod encode;
/// Offscreen color/depth buffers and triangle rasterization.
pub mod raster;
/// Phong shading.
pub mod shader;

use crate::config::RenderConfig;
use crate::foundation::core::Color;
use crate::foundation::error::{ThumbnailError, ThumbnailResult};
use crate::render::raster::{Context, FrameRGBA};
use crate::scene::compose::Scene;

/// Rasterize `scene` at `size * cfg.scale` pixels square.
#[tracing::instrument(skip(scene, cfg))]
pub fn render_scene(scene: &Scene, size: u32, cfg: &RenderConfig) -> ThumbnailResult<FrameRGBA> {
    if !scene.is_framed() {
        return Err(ThumbnailError::validation(
            "scene must be fitted to its objects before drawing",
        ));
    }

    let side = cfg.buffer_size(size)?;
    let mut ctx = Context::new(side, side, Color::TRANSPARENT);
    let mut drawn = 0;
    for object in scene.objects() {
        drawn += ctx.draw_object(&scene.shader, object);
    }
    tracing::debug!(side, drawn, "rasterized scene");
    Ok(ctx.into_frame())
}

/// Render and encode in one step. The PNG is `size * cfg.scale` pixels on each axis.
pub fn render_png(scene: &Scene, size: u32, cfg: &RenderConfig) -> ThumbnailResult<Vec<u8>> {
    let frame = render_scene(scene, size, cfg)?;
    encode::encode_png(frame)
}

#[cfg(test)]
#[path = "../tests/unit/render/render.rs"]
mod tests;
