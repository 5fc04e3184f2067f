use std::io::Write;

use egui::Color32;
use story_canvas::error::ConfigError;
use story_canvas::{CanvasConfig, RedoPolicy};

fn write_config(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn saved_config_loads_back_unchanged() {
    let config = CanvasConfig {
        background_color: Color32::from_rgb(0x10, 0x20, 0x30),
        redo_policy: RedoPolicy::ClearOnCommit,
        size_presets: vec![3.0, 6.0, 12.0],
        ..Default::default()
    };
    let file = write_config(&serde_json::to_string_pretty(&config).unwrap());

    let loaded = CanvasConfig::load(file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let file = write_config(r#"{"session": {"session_limit_minutes": 30}}"#);

    let loaded = CanvasConfig::load(file.path()).unwrap();
    assert_eq!(
        loaded.session.session_limit(),
        Some(std::time::Duration::from_secs(30 * 60))
    );
    assert_eq!(loaded.session.poll_interval_secs, 60);
    assert_eq!(loaded.palette, CanvasConfig::default().palette);
}

#[test]
fn invalid_values_are_rejected() {
    for json in [
        r#"{"palette": []}"#,
        r#"{"size_presets": [5.0, -1.0]}"#,
        r#"{"default_opacity": 2.0}"#,
        r#"{"insets": {"left": -4.0}}"#,
        r#"{"session": {"poll_interval_secs": 0}}"#,
        r#"{"session": {"poll_interval_secs": 18446744073709551615}}"#,
        r#"{"session": {"session_limit_minutes": 18446744073709551615}}"#,
    ] {
        let file = write_config(json);
        let result = CanvasConfig::load(file.path());
        assert!(
            matches!(result, Err(ConfigError::Invalid(_))),
            "{json} gave {result:?}"
        );
    }
}

#[test]
fn malformed_color_is_a_parse_error() {
    let file = write_config(r#"{"background_color": "white"}"#);
    assert!(matches!(
        CanvasConfig::load(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = CanvasConfig::load(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Read(_))));
}
