//! Configuration system tests

use codecanvas::cli::CliArgs;
use codecanvas::config::AppConfig;
use codecanvas::config_paths;
use codecanvas::model::EditorState;
use codecanvas::theme::ThemeId;
use tempfile::TempDir;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_file_location() {
    if let Some(file) = config_paths::config_file() {
        assert!(file.ends_with("config.yaml"));
        assert!(file.to_string_lossy().contains("codecanvas"));
    }
}

#[test]
fn test_themes_dir_under_config_dir() {
    if let (Some(config), Some(themes)) = (config_paths::config_dir(), config_paths::themes_dir()) {
        assert!(themes.starts_with(&config));
        assert!(themes.ends_with("themes"));
    }
}

// ========================================================================
// AppConfig Tests
// ========================================================================

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::load_from(&dir.path().join("nope.yaml"));
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_invalid_yaml_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "theme: [unclosed").unwrap();
    assert_eq!(AppConfig::load_from(&path), AppConfig::default());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "theme: dracula\nshow_line_numbers: true\n").unwrap();

    let config = AppConfig::load_from(&path);
    assert_eq!(config.theme, ThemeId::Dracula);
    assert!(config.show_line_numbers);
    assert_eq!(config.padding, 64);
    assert_eq!(config.font_size, 14);
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let config = AppConfig {
        theme: ThemeId::Nord,
        padding: 16,
        background: 3,
        output_dir: Some(dir.path().join("out")),
        ..AppConfig::default()
    };

    config.save_to(&path).unwrap();
    assert_eq!(AppConfig::load_from(&path), config);
}

#[test]
fn test_state_seeded_from_config() {
    let config = AppConfig {
        theme: ThemeId::OneDark,
        font_size: 18,
        background: 8,
        ..AppConfig::default()
    };
    let state = EditorState::from_config(&config);
    assert_eq!(state.theme, ThemeId::OneDark);
    assert_eq!(state.font_size, 18);
    // Index wraps around the seven descriptors
    assert_eq!(state.background, codecanvas::background::BACKGROUNDS[1]);
}

#[test]
fn test_cli_flags_override_config() {
    let mut config = AppConfig::default();
    let args = CliArgs {
        out_dir: Some("shots".into()),
        font: Some("mono.ttf".into()),
        ..CliArgs::default()
    };
    args.apply_to_config(&mut config);
    assert_eq!(config.output_dir(), std::path::PathBuf::from("shots"));
    assert_eq!(config.font_path, Some("mono.ttf".into()));
}
