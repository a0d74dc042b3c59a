use std::collections::HashMap;

use super::*;

const NS: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k: &str| map.get(k).cloned()
}

#[test]
fn namespace_only_uses_defaults() {
    let cfg = EnvConfig::from_lookup(lookup(&[(ENV_NAMESPACE, NS)])).unwrap();
    assert_eq!(cfg.namespace.to_string(), NS);
    assert_eq!(cfg.exporter, ExporterConfig::default());
    assert_eq!(cfg.exporter.program, PathBuf::from(DEFAULT_EXPORTER_BIN));
    assert_eq!(cfg.scratch_dir, PathBuf::from("."));
    assert_eq!(cfg.max_size, None);
}

#[test]
fn overrides_are_applied_and_blank_values_ignored() {
    let cfg = EnvConfig::from_lookup(lookup(&[
        (ENV_NAMESPACE, NS),
        (ENV_EXPORTER_BIN, "/usr/local/bin/exporter"),
        (ENV_EXPORTER_SCRIPT, "  "),
        (ENV_SCRATCH_DIR, "/tmp/thumbs"),
    ]))
    .unwrap();
    assert_eq!(cfg.exporter.program, PathBuf::from("/usr/local/bin/exporter"));
    assert_eq!(cfg.exporter.script, DEFAULT_EXPORTER_SCRIPT);
    assert_eq!(cfg.scratch_dir, PathBuf::from("/tmp/thumbs"));
}

#[test]
fn max_size_is_read_and_validated() {
    let cfg =
        EnvConfig::from_lookup(lookup(&[(ENV_NAMESPACE, NS), (ENV_MAX_SIZE, " 2048 ")])).unwrap();
    assert_eq!(cfg.max_size, Some(2048));

    for bad in ["0", "-5", "big"] {
        let vars = [(ENV_NAMESPACE, NS), (ENV_MAX_SIZE, bad)];
        let err = EnvConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ThumbnailError::Configuration(_)), "{bad}");
    }
}

#[test]
fn missing_or_bad_namespace_is_a_configuration_error() {
    let err = EnvConfig::from_lookup(lookup(&[])).unwrap_err();
    assert!(matches!(err, ThumbnailError::Configuration(_)));

    let err = EnvConfig::from_lookup(lookup(&[(ENV_NAMESPACE, "nope")])).unwrap_err();
    assert!(matches!(err, ThumbnailError::Configuration(_)));
}

#[test]
fn default_render_config_matches_thumbnail_constants() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.scale, 3);
    assert_eq!(cfg.camera.eye, Vec3::new(-0.75, 0.85, -2.0));
    assert_eq!(cfg.camera.center, Vec3::new(0.0, 0.06, 0.0));
    assert_eq!(cfg.camera.fovy_degrees, 50.0);
    assert_eq!(cfg.shading.specular_power, 0.0);
    assert_eq!(cfg.shading.ambient_color.to_rgba8(), [0xaa, 0xaa, 0xaa, 255]);
    assert!((cfg.shading.light_direction.length() - 1.0).abs() < 1e-6);
}

#[test]
fn size_validation_without_a_limit_accepts_any_positive_size() {
    let cfg = RenderConfig::default();
    assert!(cfg.validate_size(1).is_ok());
    assert!(cfg.validate_size(1025).is_ok());
    assert!(cfg.validate_size(u32::MAX).is_ok());
    assert!(matches!(
        cfg.validate_size(0),
        Err(ThumbnailError::Validation(_))
    ));
}

#[test]
fn size_validation_honours_a_configured_limit() {
    let cfg = RenderConfig {
        max_size: Some(64),
        ..RenderConfig::default()
    };
    assert!(cfg.validate_size(64).is_ok());
    let err = cfg.validate_size(65).unwrap_err();
    assert!(matches!(err, ThumbnailError::Validation(_)));
    assert!(err.to_string().contains("1..=64"));
}

#[test]
fn buffer_size_applies_supersampling() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.buffer_size(512).unwrap(), 1536);
    assert!(cfg.buffer_size(0).is_err());
    assert!(cfg.buffer_size(u32::MAX).is_err());
}
