use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Color, Vec2};
use crate::foundation::error::{ThumbnailError, ThumbnailResult};

/// Decoded straight-alpha RGBA8 texture.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    /// Row-major, tightly packed, top row first.
    pub rgba8: Vec<u8>,
}

impl Texture {
    /// Bilinear sample with wrap-around. `v` follows the OBJ convention (0 at the bottom row).
    pub fn sample(&self, uv: Vec2) -> Color {
        let u = uv.x - uv.x.floor();
        let v = 1.0 - (uv.y - uv.y.floor());

        let x = u * (self.width - 1) as f32;
        let y = v * (self.height - 1) as f32;
        let (x0, y0) = (x.floor() as u32, y.floor() as u32);
        let (x1, y1) = (
            (x0 + 1).min(self.width - 1),
            (y0 + 1).min(self.height - 1),
        );
        let (fx, fy) = (x - x0 as f32, y - y0 as f32);

        let top = self.texel(x0, y0).lerp(self.texel(x1, y0), fx);
        let bottom = self.texel(x0, y1).lerp(self.texel(x1, y1), fx);
        top.lerp(bottom, fy)
    }

    fn texel(&self, x: u32, y: u32) -> Color {
        let i = ((y * self.width + x) * 4) as usize;
        Color::from_rgba8([
            self.rgba8[i],
            self.rgba8[i + 1],
            self.rgba8[i + 2],
            self.rgba8[i + 3],
        ])
    }
}

/// Decode encoded image bytes (PNG in practice) into a [`Texture`].
pub fn decode_texture(bytes: &[u8]) -> ThumbnailResult<Texture> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode texture from memory")
        .map_err(|e| ThumbnailError::asset_load(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ThumbnailError::asset_load("texture has zero size"));
    }
    Ok(Texture {
        width,
        height,
        rgba8: rgba.into_raw(),
    })
}

/// Read and decode a texture file.
pub fn load_texture(path: &Path) -> ThumbnailResult<Texture> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read texture '{}'", path.display()))
        .map_err(|e| ThumbnailError::asset_load(format!("{e:#}")))?;
    decode_texture(&bytes).map_err(|e| match e {
        ThumbnailError::AssetLoad(msg) => {
            ThumbnailError::asset_load(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/texture.rs"]
mod tests;
