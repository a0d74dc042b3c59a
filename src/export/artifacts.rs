use std::io;
use std::path::{Path, PathBuf};

use crate::identity::ContentId;

/// Mesh and texture files belonging to one request.
///
/// Created before the exporter runs and removed on drop, so every exit path of the pipeline
/// (success, error or unwinding panic) leaves the scratch directory as it found it.
/// An explicit [`Artifacts::remove`] disarms the drop.
#[derive(Debug)]
pub struct Artifacts {
    mesh: PathBuf,
    texture: PathBuf,
    armed: bool,
}

impl Artifacts {
    /// Reserve `<id>.obj` and `<id>.png` under `scratch_dir`.
    pub fn new(scratch_dir: &Path, id: &ContentId) -> Self {
        Self {
            mesh: scratch_dir.join(format!("{id}.obj")),
            texture: scratch_dir.join(format!("{id}.png")),
            armed: true,
        }
    }

    /// Path of the Wavefront OBJ mesh.
    pub fn mesh_path(&self) -> &Path {
        &self.mesh
    }

    /// Path of the PNG texture.
    pub fn texture_path(&self) -> &Path {
        &self.texture
    }

    /// Delete both files now, reporting the first failure to the caller instead of logging it
    /// on drop. Missing files are not an error.
    pub fn remove(mut self) -> io::Result<()> {
        self.armed = false;
        let mesh = remove_if_present(&self.mesh);
        let texture = remove_if_present(&self.texture);
        mesh.and(texture)
    }
}

impl Drop for Artifacts {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        for p in [&self.mesh, &self.texture] {
            if let Err(e) = remove_if_present(p) {
                tracing::warn!(path = %p.display(), error = %e, "failed to remove artifact");
            }
        }
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/artifacts.rs"]
mod tests;
