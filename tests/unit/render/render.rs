use super::*;
use crate::assets::mesh::parse_obj;
use crate::assets::texture::Texture;
use crate::scene::compose::compose;

const TRIANGLE: &str = "v -0.5 0 0\nv 0.5 0 0\nv 0 1 0\nvn 0 0 -1\nf 1//1 2//1 3//1\n";

fn scene() -> Scene {
    let texture = Texture {
        width: 1,
        height: 1,
        rgba8: vec![200, 100, 50, 255],
    };
    compose(parse_obj(TRIANGLE).unwrap(), texture, &RenderConfig::default()).unwrap()
}

#[test]
fn output_is_supersampled() {
    let frame = render_scene(&scene(), 16, &RenderConfig::default()).unwrap();
    assert_eq!(frame.width, 48);
    assert_eq!(frame.height, 48);
    assert_eq!(frame.data.len(), 48 * 48 * 4);
}

#[test]
fn render_draws_the_object_and_leaves_background_transparent() {
    let frame = render_scene(&scene(), 16, &RenderConfig::default()).unwrap();
    let alphas: Vec<u8> = frame.data.chunks_exact(4).map(|px| px[3]).collect();
    assert!(alphas.iter().any(|&a| a == 255));
    assert!(alphas.iter().any(|&a| a == 0));
}

#[test]
fn render_is_deterministic() {
    let cfg = RenderConfig::default();
    let s = scene();
    assert_eq!(
        render_png(&s, 16, &cfg).unwrap(),
        render_png(&s, 16, &cfg).unwrap()
    );
}

#[test]
fn unframed_scene_is_refused() {
    let cfg = RenderConfig::default();
    let mut s = scene();
    let extra = s.objects()[0].clone();
    s.add_object(extra);
    assert!(render_scene(&s, 4, &cfg).is_err());
}

#[test]
fn zero_size_is_a_validation_error() {
    let err = render_scene(&scene(), 0, &RenderConfig::default()).unwrap_err();
    assert!(matches!(err, ThumbnailError::Validation(_)));
}
