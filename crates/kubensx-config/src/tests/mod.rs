use super::*;

#[test]
fn embedded_defaults_parse() {
    let config: AppConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn defaults_match_general_default() {
    let config = AppConfig::default();
    assert_eq!(config.general, GeneralConfig::default());
    assert_eq!(config.general.match_mode, MatchModeSetting::Wildcard);
    assert!(!config.general.ignore_assoc);
    assert!(!config.general.ignore_config_ns);
    assert!(config.general.color);
}

#[test]
fn partial_general_keeps_other_defaults() {
    let raw = r#"
[general]
match_mode = "fuzzy"
"#;
    let mut base = AppConfig::default();
    base.merge(toml::from_str(raw).unwrap());
    assert_eq!(base.general.match_mode, MatchModeSetting::Fuzzy);
    assert!(base.general.color);
}

#[test]
fn kebab_case_aliases() {
    let raw = r#"
[general]
match-mode = "exact"
ignore-assoc = true
ignore-config-ns = true
"#;
    let config: AppConfig = toml::from_str(raw).unwrap();
    assert_eq!(config.general.match_mode, MatchModeSetting::Exact);
    assert!(config.general.ignore_assoc);
    assert!(config.general.ignore_config_ns);
}

#[test]
fn unknown_match_mode_is_rejected_at_load() {
    let raw = "[general]\nmatch_mode = \"regex\"\n";
    assert!(toml::from_str::<AppConfig>(raw).is_err());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, raw).unwrap();
    assert!(AppConfig::load_from(&path).is_err());
    assert_eq!(AppConfig::load_lenient(&path).general.match_mode, MatchModeSetting::Wildcard);
}

#[test]
fn empty_file_is_all_defaults() {
    let config: AppConfig = toml::from_str("").unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[general]\ncolor = false\n").unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert!(!config.general.color);
    assert_eq!(config.general.match_mode, MatchModeSetting::Wildcard);
}

#[test]
fn load_from_rejects_invalid_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[general\ncolor = ").unwrap();
    assert!(AppConfig::load_from(&path).is_err());
}

#[test]
fn lenient_load_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(AppConfig::load_lenient(&dir.path().join("missing.toml")), AppConfig::default());

    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[general]\ncolor = \"sometimes\"\n").unwrap();
    assert_eq!(AppConfig::load_lenient(&path), AppConfig::default());
}

#[test]
fn default_path_ends_with_app_dir() {
    let path = AppConfig::default_path();
    assert!(path.ends_with("kubensx/config.toml"));
}
