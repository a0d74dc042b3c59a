/// Look-at camera with a perspective projection.
pub mod camera;
/// Scene construction and automatic framing.
pub mod compose;
