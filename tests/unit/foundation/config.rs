use super::*;

#[test]
fn empty_object_uses_defaults() {
    let cfg = PathsConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, PathsConfig::default());
    assert_eq!(cfg.path_file, PathBuf::from("resources/Paths.pth"));
}

#[test]
fn explicit_fields_override_defaults() {
    let cfg = PathsConfig::from_reader(
        r#"{ "path_file": "scene/paths.pth", "fps": 24 }"#.as_bytes(),
    )
    .unwrap();
    assert_eq!(cfg.path_file, PathBuf::from("scene/paths.pth"));
    assert_eq!(cfg.fps, 24);
    assert_eq!(cfg.debug_line_samples, 64);
}

#[test]
fn invalid_values_are_rejected() {
    let err = PathsConfig::from_reader(r#"{ "fps": 0 }"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("fps"));
    let err = PathsConfig::from_reader(r#"{ "debug_line_samples": 1 }"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("debug_line_samples"));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = PathsConfig::from_path("target/definitely/missing.json").unwrap_err();
    assert!(matches!(err, PathError::Io(_)));
}
