use bevy::app::PluginGroupBuilder;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::render::pipelined_rendering::PipelinedRenderingPlugin;
use bevy::window::{WindowResizeConstraints, WindowResolution};
use bevy::winit::WinitSettings;

use crate::settings::{self, GameSettings};

/// Default log filter; `RUST_LOG` still overrides it.
const LOG_FILTER: &str = "wgpu=error,naga=warn,balloon_buddy=info";

/// Smallest window the HUD panels and the scene still fit into.
const MIN_WINDOW_SIZE: (f32, f32) = (800.0, 600.0);

pub fn build_bevy_plugins(startup_settings: &GameSettings) -> PluginGroupBuilder {
    DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(create_window_settings(startup_settings)),
            ..Default::default()
        })
        .set(LogPlugin {
            filter: LOG_FILTER.into(),
            ..Default::default()
        })
        .disable::<PipelinedRenderingPlugin>()
}

pub fn create_winit_settings(startup_settings: &GameSettings) -> WinitSettings {
    let update_mode = startup_settings.graphics.fps_limit.to_update_mode();
    WinitSettings {
        focused_mode: update_mode,
        unfocused_mode: update_mode,
    }
}

fn create_window_settings(startup_settings: &GameSettings) -> Window {
    let graphics = &startup_settings.graphics;
    Window {
        title: "Balloon Buddy".into(),
        resolution: WindowResolution::new(graphics.resolution.width, graphics.resolution.height),
        resize_constraints: WindowResizeConstraints {
            min_width: MIN_WINDOW_SIZE.0,
            min_height: MIN_WINDOW_SIZE.1,
            ..Default::default()
        },
        mode: graphics.window_mode.to_bevy(),
        present_mode: settings::present_mode_for(graphics),
        ..Default::default()
    }
}
