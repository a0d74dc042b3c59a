//! Process-level settings and the immutable render constants.

use std::path::PathBuf;

use crate::foundation::core::{Color, Vec3};
use crate::foundation::error::{ThumbnailError, ThumbnailResult};
use crate::identity::ContentId;

/// Environment variable holding the content id namespace.
pub const ENV_NAMESPACE: &str = "THUMBNAIL_UUID_NAMESPACE";
/// Environment variable overriding the exporter binary.
pub const ENV_EXPORTER_BIN: &str = "THUMBNAIL_EXPORTER_BIN";
/// Environment variable overriding the exporter script argument.
pub const ENV_EXPORTER_SCRIPT: &str = "THUMBNAIL_EXPORTER_SCRIPT";
/// Environment variable overriding the artifact scratch directory.
pub const ENV_SCRATCH_DIR: &str = "THUMBNAIL_SCRATCH_DIR";
/// Environment variable capping the requested output size.
pub const ENV_MAX_SIZE: &str = "THUMBNAIL_MAX_SIZE";

/// Default location of the avatar exporter.
pub const DEFAULT_EXPORTER_BIN: &str = "/opt/bin/exporter/avatar-exporter";
/// Default exporter script, passed as `-s <script>`.
pub const DEFAULT_EXPORTER_SCRIPT: &str = "export_avatar_rs.gd";

/// Settings read once from the process environment.
#[derive(Clone, Debug)]
pub struct EnvConfig {
    /// Seed for every derived [`ContentId`].
    pub namespace: ContentId,
    /// External exporter invocation.
    pub exporter: ExporterConfig,
    /// Directory where mesh/texture artifacts are written and read.
    pub scratch_dir: PathBuf,
    /// Largest accepted request size. `None` accepts any positive size.
    pub max_size: Option<u32>,
}

/// How to launch the external mesh exporter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExporterConfig {
    pub program: PathBuf,
    pub script: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_EXPORTER_BIN),
            script: DEFAULT_EXPORTER_SCRIPT.to_string(),
        }
    }
}

impl EnvConfig {
    /// Build a config with defaults for everything except the namespace.
    pub fn with_namespace(namespace: ContentId) -> Self {
        Self {
            namespace,
            exporter: ExporterConfig::default(),
            scratch_dir: PathBuf::from("."),
            max_size: None,
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> ThumbnailResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ThumbnailResult<Self> {
        let raw = lookup(ENV_NAMESPACE)
            .ok_or_else(|| ThumbnailError::configuration(format!("{ENV_NAMESPACE} is not set")))?;
        let mut cfg = Self::with_namespace(ContentId::parse(&raw)?);

        if let Some(v) = non_empty(lookup(ENV_EXPORTER_BIN)) {
            cfg.exporter.program = PathBuf::from(v);
        }
        if let Some(v) = non_empty(lookup(ENV_EXPORTER_SCRIPT)) {
            cfg.exporter.script = v;
        }
        if let Some(v) = non_empty(lookup(ENV_SCRATCH_DIR)) {
            cfg.scratch_dir = PathBuf::from(v);
        }
        if let Some(v) = non_empty(lookup(ENV_MAX_SIZE)) {
            let max = v.trim().parse::<u32>().ok().filter(|&n| n > 0).ok_or_else(|| {
                ThumbnailError::configuration(format!(
                    "{ENV_MAX_SIZE} must be a positive integer, got '{v}'"
                ))
            })?;
            cfg.max_size = Some(max);
        }
        Ok(cfg)
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// Fixed camera placement and projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fovy_degrees: f32,
    pub near: f32,
    pub far: f32,
}

/// Flat Phong shading parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingConfig {
    /// Normalized direction towards the light.
    pub light_direction: Vec3,
    /// Base color of the avatar object where no texture applies.
    pub object_color: Color,
    pub ambient_color: Color,
    pub diffuse_color: Color,
    pub specular_color: Color,
    /// Zero disables the specular term.
    pub specular_power: f32,
}

/// Every constant the composer and renderer need, constructed once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub camera: CameraConfig,
    pub shading: ShadingConfig,
    /// Integer supersampling factor; the output is `size * scale` pixels square.
    pub scale: u32,
    /// Fraction of the half-frame left empty around the fitted object.
    pub fit_margin: f32,
    /// Upper bound on the requested size, checked before any export work.
    pub max_size: Option<u32>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let gray = |v: u8| Color::from_rgba8([v, v, v, 255]);
        Self {
            camera: CameraConfig {
                eye: Vec3::new(-0.75, 0.85, -2.0),
                center: Vec3::new(0.0, 0.06, 0.0),
                up: Vec3::Y,
                fovy_degrees: 50.0,
                near: 0.1,
                far: 1000.0,
            },
            shading: ShadingConfig {
                light_direction: Vec3::new(0.0, 6.0, -4.0).normalize(),
                object_color: gray(0x77),
                ambient_color: gray(0xaa),
                diffuse_color: gray(0x77),
                specular_color: Color::WHITE,
                specular_power: 0.0,
            },
            scale: 3,
            fit_margin: 0.0,
            max_size: None,
        }
    }
}

impl RenderConfig {
    /// Reject sizes of zero or above `max_size`.
    pub fn validate_size(&self, size: u32) -> ThumbnailResult<()> {
        if size == 0 {
            return Err(ThumbnailError::validation("size must be positive, got 0"));
        }
        match self.max_size {
            Some(max) if size > max => Err(ThumbnailError::validation(format!(
                "size must be in 1..={max}, got {size}"
            ))),
            _ => Ok(()),
        }
    }

    /// Side length of the offscreen buffer for a requested output size.
    pub fn buffer_size(&self, size: u32) -> ThumbnailResult<u32> {
        size.checked_mul(self.scale)
            .filter(|&n| n > 0)
            .ok_or_else(|| ThumbnailError::validation(format!("invalid render size {size}")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
