use crate::app::state::RenderMode;
use crate::scene_runtime::messages::{AvatarChanged, AvatarCommand, EffectTrigger};
use crate::scene_runtime::pipeline::SceneRenderPipeline;
use crate::scene_runtime::state::{AnimationClock, AvatarState, ScreenFlags};
use crate::scene_runtime::systems::{
    EffectRunList, advance_animation_clock, advance_effects, animate_avatar_group,
    apply_mood, breathe_avatar_materials, build_scene_scaffold, drift_clouds,
    handle_window_resize, pick_avatar, spawn_sparkles, sway_camera, sync_avatar_scene,
    trigger_effects, update_avatar_model, update_poof_particles, update_sparkles,
};
use crate::gameplay::audio::SoundCue;
use crate::ui::UiInputCapture;
use bevy::prelude::*;
use bevy::state::prelude::{OnEnter, in_state};
use bevy::window::WindowResized;

/// Registers the avatar model, effect run-list and every scene system.
/// Model and HUD-facing effects run in all render modes; anything touching
/// meshes only runs in `active_state`.
pub fn register_scene_runtime(app: &mut App, active_state: RenderMode) {
    app.init_resource::<AvatarState>()
        .init_resource::<AnimationClock>()
        .init_resource::<ScreenFlags>()
        .init_resource::<EffectRunList>()
        .init_resource::<UiInputCapture>()
        .add_message::<AvatarCommand>()
        .add_message::<AvatarChanged>()
        .add_message::<EffectTrigger>()
        .add_message::<SoundCue>()
        .add_message::<WindowResized>()
        .configure_sets(
            Update,
            (
                SceneRenderPipeline::Sync,
                SceneRenderPipeline::Ambient,
                SceneRenderPipeline::Effects,
                SceneRenderPipeline::Camera,
            )
                .chain(),
        )
        .add_systems(OnEnter(active_state), build_scene_scaffold)
        .add_systems(
            Update,
            (
                update_avatar_model,
                (sync_avatar_scene, apply_mood)
                    .chain()
                    .run_if(in_state(active_state)),
            )
                .chain()
                .in_set(SceneRenderPipeline::Sync),
        )
        .add_systems(
            Update,
            (
                advance_animation_clock,
                (
                    breathe_avatar_materials,
                    animate_avatar_group,
                    drift_clouds,
                    update_poof_particles,
                    update_sparkles,
                )
                    .run_if(in_state(active_state)),
            )
                .chain()
                .in_set(SceneRenderPipeline::Ambient),
        )
        .add_systems(
            Update,
            (
                trigger_effects,
                spawn_sparkles.run_if(in_state(active_state)),
                advance_effects,
            )
                .chain()
                .in_set(SceneRenderPipeline::Effects),
        )
        .add_systems(
            Update,
            (sway_camera, handle_window_resize, pick_avatar)
                .in_set(SceneRenderPipeline::Camera)
                .run_if(in_state(active_state)),
        );
}
