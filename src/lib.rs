//! Deterministic avatar thumbnails.
//!
//! A request carries an opaque avatar description (JSON owned by the external exporter) and an
//! output size. The pipeline:
//!
//! 1. derives a [`ContentId`] from the description to name scratch artifacts,
//! 2. asks a [`MeshExporter`] for an OBJ mesh and a PNG texture,
//! 3. composes a fixed-camera scene and fits the camera to the mesh bounds,
//! 4. rasterizes on the CPU at `size * 3` pixels square and encodes a PNG,
//! 5. returns the base64 PNG together with the [`ContentId`] of its exact bytes.
//!
//! Scratch artifacts are deleted before [`Pipeline::handle`] returns, whatever the outcome.
#![forbid(unsafe_code)]

mod foundation;

pub mod assets;
pub mod config;
pub mod export;
pub mod identity;
pub mod pipeline;
pub mod render;
pub mod scene;

pub use crate::config::{EnvConfig, ExporterConfig, RenderConfig};
pub use crate::export::artifacts::Artifacts;
pub use crate::export::exporter::{MeshExporter, SubprocessExporter};
pub use crate::foundation::core::{Aabb, Color};
pub use crate::foundation::error::{ThumbnailError, ThumbnailResult};
pub use crate::identity::{ContentId, derive};
pub use crate::pipeline::{
    DEFAULT_AVATAR_DESCRIPTION, ImageResponse, Pipeline, RenderEvent, Stage,
    handle_render_event,
};
pub use crate::render::raster::FrameRGBA;
