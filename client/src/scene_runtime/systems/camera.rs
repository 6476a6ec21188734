use crate::scene_runtime::components::SceneCamera;
use crate::scene_runtime::easing;
use crate::scene_runtime::state::AnimationClock;
use crate::scene_runtime::systems::scaffold::CAMERA_TARGET;
use bevy::camera::Projection;
use bevy::prelude::*;
use bevy::window::WindowResized;

pub fn sway_camera(
    clock: Res<AnimationClock>,
    mut cameras: Query<&mut Transform, With<SceneCamera>>,
) {
    for mut transform in &mut cameras {
        transform.translation.x = easing::camera_sway_x(clock.animation);
        transform.look_at(CAMERA_TARGET, Vec3::Y);
    }
}

/// Keeps the perspective aspect in step with the window. Zero-sized and
/// repeated sizes are ignored.
pub fn handle_window_resize(
    mut resized: MessageReader<WindowResized>,
    mut last_size: Local<Option<(f32, f32)>>,
    mut projections: Query<&mut Projection, With<SceneCamera>>,
) {
    let Some(event) = resized.read().last() else {
        return;
    };
    let size = (event.width, event.height);
    if size.0 <= 0.0 || size.1 <= 0.0 || *last_size == Some(size) {
        return;
    }
    *last_size = Some(size);

    for mut projection in &mut projections {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.aspect_ratio = size.0 / size.1;
        }
    }
    debug!("Scene camera aspect set for {}x{}", size.0, size.1);
}
