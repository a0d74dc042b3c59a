/// Wavefront OBJ meshes.
pub mod mesh;
/// Image textures and sampling.
pub mod texture;
