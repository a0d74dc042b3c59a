use std::io::Cursor;

use super::*;

fn png(width: u32, height: u32, pixels: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, pixels).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_keeps_straight_alpha() {
    let tex = decode_texture(&png(1, 1, vec![100, 50, 200, 128])).unwrap();
    assert_eq!(tex.width, 1);
    assert_eq!(tex.height, 1);
    assert_eq!(tex.rgba8, vec![100, 50, 200, 128]);
}

#[test]
fn garbage_is_an_asset_load_error() {
    let err = decode_texture(b"definitely not a png").unwrap_err();
    assert!(matches!(err, ThumbnailError::AssetLoad(_)), "{err}");
}

#[test]
fn sample_flips_v_and_interpolates() {
    // top row red, bottom row blue
    let tex = Texture {
        width: 2,
        height: 2,
        rgba8: vec![
            255, 0, 0, 255, 255, 0, 0, 255, //
            0, 0, 255, 255, 0, 0, 255, 255,
        ],
    };
    assert_eq!(tex.sample(Vec2::new(0.0, 0.0)).to_rgba8(), [0, 0, 255, 255]);
    assert_eq!(tex.sample(Vec2::new(0.0, 0.999_999)).to_rgba8(), [255, 0, 0, 255]);
    let mid = tex.sample(Vec2::new(0.25, 0.5)).to_rgba8();
    assert_eq!(mid, [128, 0, 128, 255]);
}

#[test]
fn sample_wraps_out_of_range_coordinates() {
    let tex = decode_texture(&png(2, 1, vec![10, 20, 30, 255, 40, 50, 60, 255])).unwrap();
    assert_eq!(
        tex.sample(Vec2::new(1.0, 0.0)),
        tex.sample(Vec2::new(0.0, 0.0))
    );
    assert_eq!(
        tex.sample(Vec2::new(-0.75, 3.0)),
        tex.sample(Vec2::new(0.25, 0.0))
    );
}

#[test]
fn load_missing_file_is_an_asset_load_error() {
    let err = load_texture(Path::new("target/unit_texture/nope.png")).unwrap_err();
    assert!(matches!(err, ThumbnailError::AssetLoad(_)));
}
