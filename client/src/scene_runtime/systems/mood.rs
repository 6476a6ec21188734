use crate::scene_runtime::components::{BodyPart, SceneCamera};
use crate::scene_runtime::easing;
use crate::scene_runtime::palette::{
    CLOUD_BRIGHT, CLOUD_GLOW_HAPPY, CLOUD_GLOW_STORMY, CLOUD_STORMY, HAPPY_SKY, STORMY_SKY,
};
use crate::scene_runtime::state::{AnimationClock, AvatarState, SceneHandles};
use bevy::pbr::DistanceFog;
use bevy::prelude::*;
use buddy_common::{MAX_ATTEMPTS, mood_percent};

/// Cloud glow at full mood.
const MAX_CLOUD_GLOW: f32 = 0.15;

/// Colors of the world for a given number of remaining attempts. Storminess
/// rises linearly as attempts run out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodState {
    pub mood_percent: f32,
    pub cloud_color: Srgba,
    pub cloud_glow_hue: Srgba,
    pub cloud_glow_intensity: f32,
    pub sky: Srgba,
}

impl MoodState {
    pub fn for_attempts(attempts_left: u8) -> Self {
        let mood = mood_percent(attempts_left);
        let storm = 1.0 - mood;
        Self {
            mood_percent: mood,
            cloud_color: CLOUD_BRIGHT.mix(&CLOUD_STORMY, storm),
            cloud_glow_hue: if mood < 0.5 {
                CLOUD_GLOW_STORMY
            } else {
                CLOUD_GLOW_HAPPY
            },
            cloud_glow_intensity: mood * MAX_CLOUD_GLOW,
            sky: HAPPY_SKY.mix(&STORMY_SKY, storm),
        }
    }

    pub fn calm() -> Self {
        Self::for_attempts(MAX_ATTEMPTS)
    }

    pub fn cloud_emissive(&self) -> LinearRgba {
        let hue = LinearRgba::from(self.cloud_glow_hue);
        LinearRgba::rgb(
            hue.red * self.cloud_glow_intensity,
            hue.green * self.cloud_glow_intensity,
            hue.blue * self.cloud_glow_intensity,
        )
    }
}

/// Re-derives sky, fog and cloud colors whenever the avatar state changes.
pub fn apply_mood(
    avatar: Res<AvatarState>,
    handles: Res<SceneHandles>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut clear_color: ResMut<ClearColor>,
    mut fogs: Query<&mut DistanceFog, With<SceneCamera>>,
) {
    if !avatar.is_changed() {
        return;
    }

    let mood = MoodState::for_attempts(avatar.0.attempts_left());
    if let Some(cloud) = materials.get_mut(&handles.cloud_material) {
        cloud.base_color = Color::from(mood.cloud_color.with_alpha(cloud.base_color.alpha()));
        cloud.emissive = mood.cloud_emissive();
    }
    clear_color.0 = Color::from(mood.sky);
    for mut fog in &mut fogs {
        fog.color = Color::from(mood.sky);
    }
}

/// Slow lightness pulse on every avatar material. Ghost parts keep their
/// transparency.
pub fn breathe_avatar_materials(
    clock: Res<AnimationClock>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    parts: Query<(&BodyPart, &MeshMaterial3d<StandardMaterial>)>,
) {
    for (body_part, material) in &parts {
        let Some(material) = materials.get_mut(&material.0) else {
            continue;
        };
        let alpha = material.base_color.alpha();
        material.base_color = Color::from(easing::breathing_color(
            body_part.base_color,
            clock.color_cycle,
            alpha,
        ));
    }
}

pub fn advance_animation_clock(time: Res<Time>, mut clock: ResMut<AnimationClock>) {
    clock.advance(time.delta_secs());
}
