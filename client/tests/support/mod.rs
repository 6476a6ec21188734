#![allow(dead_code)]

use balloon_buddy::RenderMode;
use balloon_buddy::settings::{GameSettings, SettingsResource};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use buddy_protocol::{Difficulty, GameMode, GameStatus};
use std::path::PathBuf;
use std::time::Duration;

pub const FRAME: Duration = Duration::from_millis(100);

/// Headless app with fixed 100 ms frames, asset storage for scene
/// materials and a settings file under the temp dir.
pub fn headless_app(name: &str, mode: RenderMode) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, AssetPlugin::default()))
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .init_resource::<GlobalAmbientLight>()
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(SettingsResource::with_path(
            GameSettings::default(),
            settings_path(name),
        ))
        .insert_state(mode);
    app
}

pub fn settings_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "balloon-buddy-{}-{}.yaml",
        name,
        std::process::id()
    ))
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

pub fn status(masked_word: &str, attempts_left: u8, guesses: &[char]) -> GameStatus {
    GameStatus {
        mode: GameMode::Random,
        date: None,
        category: "Animals".into(),
        difficulty: Some(Difficulty::Medium),
        masked_word: masked_word.into(),
        attempts_left,
        max_attempts: Some(6),
        guesses: guesses.to_vec(),
        game_over: false,
        win: false,
        word: None,
        hint: Some("It purrs".into()),
        learning: None,
        streak_current: None,
        streak_best: None,
    }
}

pub fn finished(masked_word: &str, attempts_left: u8, guesses: &[char], win: bool) -> GameStatus {
    GameStatus {
        game_over: true,
        win,
        word: Some("CAT".into()),
        ..status(masked_word, attempts_left, guesses)
    }
}
