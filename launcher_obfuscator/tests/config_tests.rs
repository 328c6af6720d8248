use std::io::Write;

use launcher_obfuscator::config::{load_config, ConfigError, ObfuscatorConfig};

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn defaults_without_file() {
    let cfg = load_config(None).unwrap();
    assert_eq!(cfg.identifier_length, 128);
    assert_eq!(cfg.tag_prefix, "ob");
    assert_eq!(cfg.check_marker, "// OB_CHECK");
    assert_eq!(cfg.strip_tool, "strip");
    assert_eq!(cfg.tool_timeout_secs, 120);
    assert_eq!(cfg.tool_retries, 1);
    assert!(cfg.preserved_literals.is_empty());
}

#[test]
fn file_values_override_defaults() {
    let file = config_file(
        r#"{ "identifier_length": 32, "tag_prefix": "zz", "preserved_literals": ["\"%s\""] }"#,
    );
    let cfg = load_config(file.path().to_str()).unwrap();
    assert_eq!(cfg.identifier_length, 32);
    assert_eq!(cfg.tag_prefix, "zz");
    assert_eq!(cfg.preserved_literals, vec!["\"%s\"".to_string()]);
    assert_eq!(cfg.check_marker, "// OB_CHECK");
}

#[test]
fn environment_overrides_file() {
    std::env::set_var("LAUNCHER_OBF_SED_TOOL", "/opt/bin/gsed");
    let file = config_file(r#"{ "sed_tool": "sed-from-file" }"#);
    let cfg = load_config(file.path().to_str()).unwrap();
    std::env::remove_var("LAUNCHER_OBF_SED_TOOL");
    assert_eq!(cfg.sed_tool, "/opt/bin/gsed");
}

#[test]
fn invalid_values_are_rejected() {
    let file = config_file(r#"{ "identifier_length": 0 }"#);
    let err = load_config(file.path().to_str()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "identifier_length", .. }));

    let cfg = ObfuscatorConfig {
        tag_prefix: "o-b".into(),
        ..Default::default()
    };
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { field: "tag_prefix", .. })));
}

#[test]
fn missing_file_is_an_error() {
    assert!(matches!(
        load_config(Some("/nonexistent/launcher-obfuscator.json")),
        Err(ConfigError::Config(_))
    ));
}
