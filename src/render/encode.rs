use std::io::Cursor;

use crate::foundation::error::{ThumbnailError, ThumbnailResult};
use crate::render::raster::FrameRGBA;

/// Encode a frame as an RGBA8 PNG at its full resolution, consuming its buffer.
pub fn encode_png(frame: FrameRGBA) -> ThumbnailResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.width == 0 || frame.height == 0 || frame.data.len() != expected {
        return Err(ThumbnailError::encoding(format!(
            "frame buffer of {} bytes does not match {}x{} rgba8",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.data)
        .ok_or_else(|| ThumbnailError::encoding("frame buffer rejected by png encoder"))?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| ThumbnailError::encoding(format!("png encode failed: {e}")))?;
    Ok(out)
}
