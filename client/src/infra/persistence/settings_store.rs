//! YAML persistence for [`GameSettings`].

use std::fs;
use std::path::Path;

use crate::settings::{GameSettings, SETTINGS_FILE_PATH, SettingsIoError};

/// Loads `./settings.yaml`, falling back to defaults when it is missing or
/// unreadable.
pub fn load() -> GameSettings {
    load_or_default(Path::new(SETTINGS_FILE_PATH))
}

pub fn ensure_exists(settings: &GameSettings) -> Result<(), SettingsIoError> {
    let path = Path::new(SETTINGS_FILE_PATH);
    if path.exists() {
        return Ok(());
    }
    write_to_path(settings, path)
}

pub fn load_or_default(path: &Path) -> GameSettings {
    if !path.exists() {
        return GameSettings::default();
    }

    match load_from_path(path) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!(
                "Failed to load settings from '{}': {}. Falling back to defaults.",
                path.display(),
                error
            );
            GameSettings::default()
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<GameSettings, SettingsIoError> {
    let raw = fs::read_to_string(path).map_err(SettingsIoError::Read)?;
    serde_yaml::from_str::<GameSettings>(&raw).map_err(SettingsIoError::Deserialize)
}

pub fn write_to_path(settings: &GameSettings, path: &Path) -> Result<(), SettingsIoError> {
    let encoded = serde_yaml::to_string(settings).map_err(SettingsIoError::Serialize)?;
    fs::write(path, encoded).map_err(SettingsIoError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use buddy_protocol::GameMode;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "balloon-buddy-{}-{}.yaml",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn saved_settings_load_back_unchanged() {
        let path = scratch_path("roundtrip");
        let mut settings = GameSettings::default();
        settings.gameplay.last_mode = GameMode::Daily;
        settings.gameplay.timer_enabled = true;
        settings.audio.effects_enabled = false;

        write_to_path(&settings, &path).unwrap();
        let loaded = load_from_path(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let path = scratch_path("garbage");
        fs::write(&path, "graphics: [not, a, map").unwrap();
        let loaded = load_or_default(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, GameSettings::default());
    }

    #[test]
    fn missing_file_uses_defaults() {
        assert_eq!(
            load_or_default(&scratch_path("missing")),
            GameSettings::default()
        );
    }
}
