use bevy::prelude::*;
use bevy::state::app::AppExtStates;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiPlugin;

use crate::app::plugins::{build_bevy_plugins, create_winit_settings};
use crate::app::state::RenderMode;
use crate::gameplay::GameplayPlugin;
use crate::scene_runtime::registration::register_scene_runtime;
use crate::settings::{GameSettings, SettingsPlugin, SettingsResource};
use crate::ui::HudPlugin;

pub fn configure_client_app(app: &mut App, startup_settings: &GameSettings) {
    app.insert_resource(SettingsResource::new(startup_settings.clone()))
        .add_plugins(build_bevy_plugins(startup_settings))
        .insert_resource(create_winit_settings(startup_settings))
        .add_plugins(EguiPlugin::default())
        .add_plugins(SettingsPlugin)
        .init_state::<RenderMode>()
        .add_systems(
            Update,
            probe_render_mode.run_if(in_state(RenderMode::Probing)),
        );

    register_scene_runtime(app, RenderMode::Scene3d);
    app.add_plugins(GameplayPlugin).add_plugins(HudPlugin);
}

/// Settles the render mode once the primary window exists. A disabled or
/// zero-sized surface falls back to the text avatar.
pub fn probe_render_mode(
    settings: Res<SettingsResource>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut next_mode: ResMut<NextState<RenderMode>>,
) {
    let mode = match windows.single() {
        Ok(window) => render_mode_for(
            settings.current.graphics.enable_3d,
            window.width(),
            window.height(),
        ),
        Err(_) if !settings.current.graphics.enable_3d => RenderMode::TextFallback,
        Err(_) => return,
    };

    info!("Render mode settled: {:?}", mode);
    next_mode.set(mode);
}

pub fn render_mode_for(enable_3d: bool, width: f32, height: f32) -> RenderMode {
    if enable_3d && width > 0.0 && height > 0.0 {
        RenderMode::Scene3d
    } else {
        RenderMode::TextFallback
    }
}
