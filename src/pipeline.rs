//! The request handler: description in, content-addressed PNG out.
//!
//! Stages run strictly in order:
//!
//! 1. **Validating**: an empty description becomes [`DEFAULT_AVATAR_DESCRIPTION`]; the size is
//!    checked against [`RenderConfig::max_size`].
//! 2. **Exporting**: the [`MeshExporter`] writes `<id>.obj` and `<id>.png` to scratch storage.
//! 3. **Loading**: both artifacts are parsed; any failure aborts the request.
//! 4. **Composing**: camera, shader and object are assembled and the camera is fitted.
//! 5. **Rendering**: the scene is rasterized at `size * scale` and encoded to PNG.
//! 6. **Encoding**: the PNG is base64-encoded and its [`ContentId`] derived.
//! 7. **CleaningUp**: both artifacts are deleted, on success and on failure alike.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::assets::mesh::load_obj;
use crate::assets::texture::load_texture;
use crate::config::{EnvConfig, RenderConfig};
use crate::export::artifacts::Artifacts;
use crate::export::exporter::{MeshExporter, SubprocessExporter};
use crate::foundation::error::{ThumbnailError, ThumbnailResult};
use crate::identity::ContentId;
use crate::render::render_png;
use crate::scene::compose::compose;

/// Description rendered when a request carries an empty one.
pub const DEFAULT_AVATAR_DESCRIPTION: &str = r#"{"user_id":13,"items":{"face":0,"hats":[20121,0,0,0,0],"head":0,"tool":0,"pants":0,"shirt":0,"figure":0,"tshirt":0},"colors":{"head":"eab372","torso":"85ad00","left_arm":"eab372","left_leg":"37302c","right_arm":"eab372","right_leg":"37302c"}}"#;

/// Input record of one render request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderEvent {
    /// Opaque avatar JSON; empty means [`DEFAULT_AVATAR_DESCRIPTION`].
    #[serde(rename = "AvatarJSON", default)]
    pub avatar_json: String,
    /// Output side length in pixels, before the supersampling factor.
    #[serde(rename = "Size")]
    pub size: u32,
}

impl RenderEvent {
    pub fn new(avatar_json: impl Into<String>, size: u32) -> Self {
        Self {
            avatar_json: avatar_json.into(),
            size,
        }
    }
}

/// Output record: the PNG and the id derived from its exact bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    #[serde(rename = "UUID")]
    uuid: String,
    #[serde(rename = "Image")]
    image: String,
}

impl ImageResponse {
    fn new(id: ContentId, png: &[u8]) -> Self {
        Self {
            uuid: id.to_string(),
            image: base64::engine::general_purpose::STANDARD.encode(png),
        }
    }

    /// Content id of the PNG bytes, in canonical text form.
    pub fn content_id(&self) -> &str {
        &self.uuid
    }

    /// Base64 (standard alphabet, padded) PNG bytes.
    pub fn image_base64(&self) -> &str {
        &self.image
    }

    /// Decode the base64 payload back into PNG bytes.
    pub fn png_bytes(&self) -> ThumbnailResult<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.image)
            .map_err(|e| ThumbnailError::encoding(format!("invalid base64 image: {e}")))
    }
}

/// Pipeline stage, reported in logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Exporting,
    Loading,
    Composing,
    Rendering,
    Encoding,
    CleaningUp,
    Done,
    Failed,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Validating => "validating",
            Stage::Exporting => "exporting",
            Stage::Loading => "loading",
            Stage::Composing => "composing",
            Stage::Rendering => "rendering",
            Stage::Encoding => "encoding",
            Stage::CleaningUp => "cleaning-up",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substitute `default` for an empty description.
pub fn resolve_description<'a>(description: &'a str, default: &'a str) -> &'a str {
    if description.is_empty() {
        default
    } else {
        description
    }
}

/// Stateless request handler. Shareable across threads when `E` is.
///
/// Artifact paths depend only on the description, so overlapping requests for the same
/// description share files: the first to clean up removes them, and the other fails to load.
#[derive(Clone, Debug)]
pub struct Pipeline<E> {
    namespace: ContentId,
    scratch_dir: PathBuf,
    exporter: E,
    render: RenderConfig,
    default_description: &'static str,
}

impl Pipeline<SubprocessExporter> {
    /// Pipeline driving the external exporter named in `cfg`.
    pub fn from_config(cfg: &EnvConfig) -> Self {
        let render = RenderConfig {
            max_size: cfg.max_size,
            ..RenderConfig::default()
        };
        Self::new(
            cfg.namespace,
            cfg.scratch_dir.clone(),
            SubprocessExporter::new(cfg.exporter.clone()),
        )
        .with_render_config(render)
    }
}

impl<E: MeshExporter> Pipeline<E> {
    pub fn new(namespace: ContentId, scratch_dir: impl Into<PathBuf>, exporter: E) -> Self {
        Self {
            namespace,
            scratch_dir: scratch_dir.into(),
            exporter,
            render: RenderConfig::default(),
            default_description: DEFAULT_AVATAR_DESCRIPTION,
        }
    }

    /// Replace the camera/shading constants.
    pub fn with_render_config(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Id naming the artifacts of `description` (after default substitution).
    pub fn description_id(&self, description: &str) -> ContentId {
        let description = resolve_description(description, self.default_description);
        self.namespace.derive(description.as_bytes())
    }

    /// Artifact paths a request for `description` uses.
    pub fn artifacts_for(&self, description: &str) -> Artifacts {
        Artifacts::new(&self.scratch_dir, &self.description_id(description))
    }

    /// Run one request to completion.
    ///
    /// Artifacts are removed before returning on every path. Errors carry no partial response.
    #[tracing::instrument(
        skip_all,
        fields(size = event.size, description_len = event.avatar_json.len())
    )]
    pub fn handle(&self, event: &RenderEvent) -> ThumbnailResult<ImageResponse> {
        let mut stage = Stage::Validating;
        advance(&mut stage, Stage::Validating);
        let description = resolve_description(&event.avatar_json, self.default_description);
        self.render.validate_size(event.size)?;

        let id = self.namespace.derive(description.as_bytes());
        let artifacts = Artifacts::new(&self.scratch_dir, &id);
        tracing::debug!(%id, "derived description id");

        let result = self.run(&mut stage, description, event.size, &artifacts);
        let failed_at = stage;

        advance(&mut stage, Stage::CleaningUp);
        if let Err(e) = artifacts.remove() {
            tracing::warn!(error = %e, "artifact cleanup failed");
        }

        match result {
            Ok(resp) => {
                advance(&mut stage, Stage::Done);
                tracing::info!(uuid = %resp.content_id(), "rendered thumbnail");
                Ok(resp)
            }
            Err(e) => {
                advance(&mut stage, Stage::Failed);
                tracing::warn!(stage = %failed_at, error = %e, "render request failed");
                Err(e)
            }
        }
    }

    fn run(
        &self,
        stage: &mut Stage,
        description: &str,
        size: u32,
        artifacts: &Artifacts,
    ) -> ThumbnailResult<ImageResponse> {
        advance(stage, Stage::Exporting);
        self.exporter.export(description, artifacts)?;

        advance(stage, Stage::Loading);
        let texture = load_texture(artifacts.texture_path())?;
        let mesh = load_obj(artifacts.mesh_path())?;
        tracing::debug!(
            triangles = mesh.triangles.len(),
            texture_w = texture.width,
            texture_h = texture.height,
            "loaded artifacts"
        );

        advance(stage, Stage::Composing);
        let scene = compose(mesh, texture, &self.render)?;

        advance(stage, Stage::Rendering);
        let png = render_png(&scene, size, &self.render)?;

        advance(stage, Stage::Encoding);
        let image_id = self.namespace.derive(&png);
        Ok(ImageResponse::new(image_id, &png))
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    *stage = next;
    tracing::debug!(stage = %next, "pipeline stage");
}

/// Handle one request with configuration read from the process environment.
pub fn handle_render_event(event: &RenderEvent) -> ThumbnailResult<ImageResponse> {
    let cfg = EnvConfig::from_env()?;
    Pipeline::from_config(&cfg).handle(event)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline/pipeline.rs"]
mod tests;
