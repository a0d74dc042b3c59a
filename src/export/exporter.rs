use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::ExporterConfig;
use crate::export::artifacts::Artifacts;
use crate::foundation::error::{ThumbnailError, ThumbnailResult};

/// Capability that materializes the mesh and texture of an avatar description.
///
/// On success both [`Artifacts::mesh_path`] and [`Artifacts::texture_path`] must exist. Content
/// is not validated here; loading does that.
pub trait MeshExporter {
    /// Write the mesh and texture of `description` to the paths in `artifacts`.
    fn export(&self, description: &str, artifacts: &Artifacts) -> ThumbnailResult<()>;
}

impl<T: MeshExporter + ?Sized> MeshExporter for &T {
    fn export(&self, description: &str, artifacts: &Artifacts) -> ThumbnailResult<()> {
        (**self).export(description, artifacts)
    }
}

impl<T: MeshExporter + ?Sized> MeshExporter for Box<T> {
    fn export(&self, description: &str, artifacts: &Artifacts) -> ThumbnailResult<()> {
        (**self).export(description, artifacts)
    }
}

/// Runs the external exporter as a blocking child process.
///
/// Command line: `<program> -s <script> --json <description> --obj-path <mesh> --png-path <texture>`.
#[derive(Clone, Debug)]
pub struct SubprocessExporter {
    config: ExporterConfig,
}

impl SubprocessExporter {
    /// Create an exporter for the given program and script.
    pub fn new(config: ExporterConfig) -> Self {
        Self { config }
    }

    /// Program and script this exporter invokes.
    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    fn command(&self, description: &str, artifacts: &Artifacts) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.arg("-s")
            .arg(&self.config.script)
            .arg("--json")
            .arg(description)
            .arg("--obj-path")
            .arg(artifacts.mesh_path())
            .arg("--png-path")
            .arg(artifacts.texture_path());
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd
    }
}

impl MeshExporter for SubprocessExporter {
    fn export(&self, description: &str, artifacts: &Artifacts) -> ThumbnailResult<()> {
        ensure_parent_dir(artifacts.mesh_path())?;
        ensure_parent_dir(artifacts.texture_path())?;

        let program = self.config.program.display();
        let output = self
            .command(description, artifacts)
            .output()
            .map_err(|e| ThumbnailError::export(format!("failed to launch '{program}': {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ThumbnailError::export(format!(
                "'{program}' exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        for p in [artifacts.mesh_path(), artifacts.texture_path()] {
            if !p.is_file() {
                return Err(ThumbnailError::export(format!(
                    "'{program}' reported success but did not write '{}'",
                    p.display()
                )));
            }
        }
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ThumbnailResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create scratch directory '{}'", parent.display())
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/exporter.rs"]
mod tests;
