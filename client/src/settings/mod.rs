use crate::scene_runtime::components::SunLight;
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PresentMode, PrimaryWindow, WindowMode, WindowResolution};
use bevy::winit::{UpdateMode, WinitSettings};
use buddy_protocol::{Difficulty, GameMode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::infra::persistence::settings_store;

pub const SETTINGS_FILE_PATH: &str = "./settings.yaml";

const RESOLUTION_PRESETS: [ResolutionSetting; 4] = [
    ResolutionSetting {
        width: 960,
        height: 720,
    },
    ResolutionSetting {
        width: 1280,
        height: 800,
    },
    ResolutionSetting {
        width: 1600,
        height: 900,
    },
    ResolutionSetting {
        width: 1920,
        height: 1080,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowModeSetting {
    #[default]
    Windowed,
    Fullscreen,
}

impl WindowModeSetting {
    pub const ALL: [Self; 2] = [Self::Windowed, Self::Fullscreen];

    pub fn to_bevy(self) -> WindowMode {
        match self {
            Self::Windowed => WindowMode::Windowed,
            Self::Fullscreen => WindowMode::BorderlessFullscreen(MonitorSelection::Current),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Windowed => "Windowed",
            Self::Fullscreen => "Fullscreen",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FpsLimitSetting {
    #[default]
    Default60,
    Monitor,
    Unlimited,
}

impl FpsLimitSetting {
    pub const ALL: [Self; 3] = [Self::Default60, Self::Monitor, Self::Unlimited];

    /// Animations are continuous, so the reactive mode still ticks every frame
    /// interval instead of waiting for input.
    pub fn to_update_mode(self) -> UpdateMode {
        match self {
            Self::Default60 => UpdateMode::reactive(Duration::from_secs_f64(1.0 / 60.0)),
            Self::Monitor | Self::Unlimited => UpdateMode::Continuous,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default60 => "60 FPS",
            Self::Monitor => "Monitor",
            Self::Unlimited => "Unlimited",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionSetting {
    pub width: u32,
    pub height: u32,
}

impl Default for ResolutionSetting {
    fn default() -> Self {
        RESOLUTION_PRESETS[1]
    }
}

impl ResolutionSetting {
    pub fn presets() -> &'static [Self] {
        &RESOLUTION_PRESETS
    }

    pub fn label(self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsSettings {
    pub window_mode: WindowModeSetting,
    pub resolution: ResolutionSetting,
    pub vsync: bool,
    pub fps_limit: FpsLimitSetting,
    /// When false the avatar is drawn with the text fallback only.
    pub enable_3d: bool,
    pub shadows: bool,
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            window_mode: WindowModeSetting::Windowed,
            resolution: ResolutionSetting::default(),
            vsync: true,
            fps_limit: FpsLimitSetting::Default60,
            enable_3d: true,
            shadows: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub effects_enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            effects_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub base_url: String,
    pub timeout_ms: u64,
    pub dictionary_url: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_ms: 10_000,
            dictionary_url: "https://api.dictionaryapi.dev/api/v2/entries/en/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceInputSetting {
    /// Speech recognition is unavailable on this host.
    #[default]
    None,
    /// Transcripts are typed on stdin, one utterance per line.
    Terminal,
}

impl VoiceInputSetting {
    pub const ALL: [Self; 2] = [Self::None, Self::Terminal];

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Terminal => "Terminal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    pub input: VoiceInputSetting,
    pub restart_backoff_ms: u64,
    /// Rough speaking rate used to estimate how long narration lasts.
    pub words_per_minute: u32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            input: VoiceInputSetting::None,
            restart_backoff_ms: 300,
            words_per_minute: 165,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Mode of the last game started; picks the status endpoint at startup.
    pub last_mode: GameMode,
    pub timer_enabled: bool,
    pub default_difficulty: Difficulty,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            last_mode: GameMode::Random,
            timer_enabled: false,
            default_difficulty: Difficulty::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct GameSettings {
    pub graphics: GraphicsSettings,
    pub audio: AudioSettings,
    pub backend: BackendSettings,
    pub voice: VoiceSettings,
    pub gameplay: GameplaySettings,
}

#[derive(Debug, Error)]
pub enum SettingsIoError {
    #[error("failed to read settings file: {0}")]
    Read(std::io::Error),
    #[error("failed to write settings file: {0}")]
    Write(std::io::Error),
    #[error("failed to decode YAML settings: {0}")]
    Deserialize(serde_yaml::Error),
    #[error("failed to encode YAML settings: {0}")]
    Serialize(serde_yaml::Error),
}

#[derive(Resource, Clone)]
pub struct SettingsResource {
    pub current: GameSettings,
    path: PathBuf,
}

impl SettingsResource {
    pub fn new(current: GameSettings) -> Self {
        Self::with_path(current, PathBuf::from(SETTINGS_FILE_PATH))
    }

    pub fn with_path(current: GameSettings, path: PathBuf) -> Self {
        Self { current, path }
    }

    pub fn save_to_disk(&self) -> Result<(), SettingsIoError> {
        settings_store::write_to_path(&self.current, &self.path)
    }

    /// Saves and logs instead of failing; settings writes are never fatal.
    pub fn persist(&self) {
        if let Err(error) = self.save_to_disk() {
            warn!(
                "Failed to save settings file '{}': {}",
                self.path.display(),
                error
            );
        }
    }
}

#[derive(Resource, Clone, Debug)]
pub struct AudioCategoryState {
    pub effects_enabled: bool,
}

impl Default for AudioCategoryState {
    fn default() -> Self {
        Self {
            effects_enabled: true,
        }
    }
}

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioCategoryState>()
            .add_systems(Update, apply_runtime_settings);
    }
}

pub fn present_mode_for(graphics: &GraphicsSettings) -> PresentMode {
    if matches!(graphics.fps_limit, FpsLimitSetting::Unlimited) {
        PresentMode::AutoNoVsync
    } else if graphics.vsync {
        PresentMode::AutoVsync
    } else {
        PresentMode::AutoNoVsync
    }
}

fn apply_runtime_settings(
    settings: Res<SettingsResource>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    winit_settings: Option<ResMut<WinitSettings>>,
    mut sun_query: Query<&mut DirectionalLight, With<SunLight>>,
    added_sun_query: Query<(), Added<SunLight>>,
    mut audio_categories: ResMut<AudioCategoryState>,
    mut last_applied: Local<Option<GameSettings>>,
) {
    let sun_spawned = !added_sun_query.is_empty();
    if last_applied.as_ref() == Some(&settings.current) && !sun_spawned {
        return;
    }

    let graphics = &settings.current.graphics;
    let window_changed = last_applied
        .as_ref()
        .is_none_or(|previous| previous.graphics != *graphics);

    if window_changed {
        if let Ok(mut window) = windows.single_mut() {
            let target_mode = graphics.window_mode.to_bevy();
            window.mode = target_mode;

            // Borderless fullscreen keeps the monitor's native size.
            if matches!(target_mode, WindowMode::Windowed) {
                window.resolution = WindowResolution::new(
                    graphics.resolution.width,
                    graphics.resolution.height,
                );
            }

            window.present_mode = present_mode_for(graphics);
        }

        if let Some(mut winit_settings) = winit_settings {
            let update_mode = graphics.fps_limit.to_update_mode();
            winit_settings.focused_mode = update_mode;
            winit_settings.unfocused_mode = update_mode;
        }
    }

    for mut light in &mut sun_query {
        light.shadows_enabled = graphics.shadows;
    }

    audio_categories.effects_enabled = settings.current.audio.effects_enabled;

    *last_applied = Some(settings.current.clone());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_fills_missing_sections_with_defaults() {
        let yaml = "backend:\n  base_url: http://games.local:8080\ngameplay:\n  last_mode: daily\n";
        let settings: GameSettings = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(settings.backend.base_url, "http://games.local:8080");
        assert_eq!(settings.backend.timeout_ms, 10_000);
        assert_eq!(settings.gameplay.last_mode, GameMode::Daily);
        assert_eq!(settings.voice.restart_backoff_ms, 300);
        assert!(settings.graphics.enable_3d);
    }

    #[test]
    fn audio_toggle_is_mirrored_at_runtime() {
        let mut app = App::new();
        let mut settings = GameSettings::default();
        settings.audio.effects_enabled = false;
        app.add_plugins(MinimalPlugins)
            .insert_resource(SettingsResource::new(settings))
            .add_plugins(SettingsPlugin);

        app.update();

        assert!(!app.world().resource::<AudioCategoryState>().effects_enabled);
    }
}
