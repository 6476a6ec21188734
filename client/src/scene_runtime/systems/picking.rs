use crate::gameplay::audio::SoundCue;
use crate::scene_runtime::components::{BodyPart, SceneCamera};
use crate::scene_runtime::easing::ray_hits_sphere;
use crate::scene_runtime::messages::EffectTrigger;
use crate::ui::UiInputCapture;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// True when the ray touches any part's bounding sphere. Ghost parts count;
/// the whole outline is clickable.
pub fn ray_hits_avatar(ray: Ray3d, spheres: impl IntoIterator<Item = (Vec3, f32)>) -> bool {
    spheres
        .into_iter()
        .any(|(center, radius)| ray_hits_sphere(ray.origin, *ray.direction, center, radius).is_some())
}

/// Clicking the avatar makes it wobble.
pub fn pick_avatar(
    buttons: Res<ButtonInput<MouseButton>>,
    capture: Res<UiInputCapture>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<SceneCamera>>,
    parts: Query<(&BodyPart, &GlobalTransform)>,
    mut effects: MessageWriter<EffectTrigger>,
    mut sounds: MessageWriter<SoundCue>,
) {
    if !buttons.just_pressed(MouseButton::Left) || capture.pointer {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };

    let spheres = parts.iter().map(|(part, global)| {
        let (scale, _, center) = global.to_scale_rotation_translation();
        (center, part.radius * scale.max_element())
    });
    if ray_hits_avatar(ray, spheres) {
        effects.write(EffectTrigger::Wobble);
        sounds.write(SoundCue::Click);
    }
}
