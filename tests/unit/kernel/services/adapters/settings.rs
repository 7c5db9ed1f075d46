use super::*;
use crate::kernel::state::ThemeMode;

#[test]
fn settings_path_lives_under_dot_dir() {
    let path = get_settings_path().unwrap();
    assert!(path.ends_with(".mdtyper/settings.json"));
}

#[test]
fn default_settings_file_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join(SETTINGS_FILE);

    write_default_settings(&path).unwrap();
    let loaded = load_settings_from(&path).unwrap();

    assert_eq!(loaded.assistant.model, "gemini-2.5-flash");
    assert!(loaded.keybindings.is_empty());
}

#[test]
fn existing_settings_file_is_not_overwritten() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(SETTINGS_FILE);
    std::fs::write(&path, r#"{"theme":"light"}"#).unwrap();

    write_default_settings(&path).unwrap();

    assert_eq!(load_settings_from(&path).unwrap().theme, ThemeMode::Light);
}

#[test]
fn malformed_settings_file_yields_none() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(SETTINGS_FILE);
    std::fs::write(&path, "{not json").unwrap();

    assert!(load_settings_from(&path).is_none());
}
