use std::path::PathBuf;

use super::*;
use crate::identity::ContentId;

fn artifacts(name: &str) -> Artifacts {
    let dir = PathBuf::from("target").join("unit_exporter").join(name);
    let id = ContentId::parse("6ba7b810-9dad-11d1-80b4-00c04fd430c8")
        .unwrap()
        .derive(name.as_bytes());
    Artifacts::new(&dir, &id)
}

#[test]
fn command_line_follows_exporter_contract() {
    let exporter = SubprocessExporter::new(ExporterConfig {
        program: PathBuf::from("/bin/exporter"),
        script: "script.gd".to_string(),
    });
    let a = artifacts("cmdline");
    let cmd = exporter.command("{\"a\":1}", &a);

    assert_eq!(cmd.get_program(), "/bin/exporter");
    let args: Vec<_> = cmd.get_args().map(|s| s.to_os_string()).collect();
    let expected: Vec<std::ffi::OsString> = vec![
        "-s".into(),
        "script.gd".into(),
        "--json".into(),
        "{\"a\":1}".into(),
        "--obj-path".into(),
        a.mesh_path().as_os_str().to_os_string(),
        "--png-path".into(),
        a.texture_path().as_os_str().to_os_string(),
    ];
    assert_eq!(args, expected);
}

#[test]
fn missing_program_is_an_export_error() {
    let exporter = SubprocessExporter::new(ExporterConfig {
        program: PathBuf::from("target/unit_exporter/definitely-not-here"),
        script: "x".to_string(),
    });
    let err = exporter.export("{}", &artifacts("missing")).unwrap_err();
    assert!(matches!(err, ThumbnailError::Export(_)), "{err}");
}

#[cfg(unix)]
#[test]
fn nonzero_exit_is_an_export_error() {
    let exporter = SubprocessExporter::new(ExporterConfig {
        program: PathBuf::from("false"),
        script: String::new(),
    });
    let err = exporter.export("{}", &artifacts("nonzero")).unwrap_err();
    assert!(matches!(err, ThumbnailError::Export(_)), "{err}");
    assert!(err.to_string().contains("exited with status"));
}

#[cfg(unix)]
#[test]
fn success_without_files_is_an_export_error() {
    let exporter = SubprocessExporter::new(ExporterConfig {
        program: PathBuf::from("true"),
        script: String::new(),
    });
    let err = exporter.export("{}", &artifacts("nofiles")).unwrap_err();
    assert!(err.to_string().contains("did not write"), "{err}");
}
