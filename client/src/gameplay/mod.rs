//! Game flow: player input, the backend worker, the bridge onto the scene,
//! voice, sound and the timer.

pub mod audio;
pub mod backend;
pub mod bridge;
pub mod feedback;
pub mod intent;
pub mod keyboard;
pub mod themes;
pub mod timer;
pub mod voice;

use bevy::prelude::*;

use crate::scene_runtime::messages::{AvatarCommand, EffectTrigger};
use crate::scene_runtime::pipeline::SceneRenderPipeline;
use crate::ui::UiInputCapture;
use audio::{SoundCue, SoundCuePlugin};
use backend::{BackendReply, drain_backend_replies, spawn_backend_worker};
use bridge::{
    GameSession, finish_letter_reveal, handle_backend_replies, handle_player_intents,
    request_initial_state,
};
use feedback::{HudFeedback, expire_hud_feedback};
use intent::PlayerIntent;
use keyboard::physical_keyboard_guesses;
use timer::{GameTimer, tick_game_timer, toggle_timer};
use voice::{
    Narration, VoiceControl, install_speech_io, poll_voice_input, speak_narration, toggle_voice,
};

pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        register_gameplay(app);
        app.add_plugins(SoundCuePlugin).add_systems(
            Startup,
            (spawn_backend_worker, install_speech_io, request_initial_state).chain(),
        );
    }
}

/// Resources, messages and per-frame systems of the game flow. The backend
/// worker and speech seams are installed separately so tests can provide
/// their own.
pub fn register_gameplay(app: &mut App) {
    app.init_resource::<GameSession>()
        .init_resource::<HudFeedback>()
        .init_resource::<GameTimer>()
        .init_resource::<VoiceControl>()
        .init_resource::<UiInputCapture>()
        .add_message::<PlayerIntent>()
        .add_message::<BackendReply>()
        .add_message::<Narration>()
        .add_message::<SoundCue>()
        .add_message::<AvatarCommand>()
        .add_message::<EffectTrigger>()
        .add_systems(
            Update,
            (
                drain_backend_replies,
                (physical_keyboard_guesses, toggle_voice, poll_voice_input).chain(),
                handle_player_intents,
                handle_backend_replies,
                finish_letter_reveal,
                (speak_narration, expire_hud_feedback, toggle_timer, tick_game_timer),
            )
                .chain()
                .before(SceneRenderPipeline::Sync),
        );
}
