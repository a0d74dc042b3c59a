//! External mesh export.
//!
//! The exporter turns an avatar description into a Wavefront OBJ mesh and a PNG texture at paths
//! derived from the description's [`ContentId`](crate::ContentId). [`Artifacts`] owns those paths
//! and deletes both files when dropped.

/// Artifact paths and their drop-time cleanup.
pub mod artifacts;
/// The [`MeshExporter`](exporter::MeshExporter) capability and its subprocess implementation.
pub mod exporter;
