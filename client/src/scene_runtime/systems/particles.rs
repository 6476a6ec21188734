use crate::scene_runtime::components::{
    BalloonGroup, POOF_LIFETIME_FRAMES, PoofParticle, RuntimeSceneEntity, SparkleParticle,
};
use crate::scene_runtime::easing::SPARKLE_SECS;
use crate::scene_runtime::messages::EffectTrigger;
use crate::scene_runtime::palette::SPARKLE_COLORS;
use crate::scene_runtime::state::SceneHandles;
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

pub const POOF_PARTICLE_COUNT: usize = 8;
pub const SPARKLE_COUNT: usize = 12;

const POOF_SPEED: f32 = 0.05;
const POOF_SHRINK_PER_FRAME: f32 = 0.95;
const SPARKLE_CENTER_OFFSET: Vec3 = Vec3::new(0.0, 0.8, 0.0);

/// Bursts [`POOF_PARTICLE_COUNT`] puffs at `position` in the part's color.
pub fn spawn_poof(
    commands: &mut Commands,
    handles: &SceneHandles,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    color: Srgba,
) {
    let mut rng = rand::thread_rng();
    for _ in 0..POOF_PARTICLE_COUNT {
        let velocity = Vec3::new(
            rng.gen_range(-POOF_SPEED..=POOF_SPEED),
            rng.gen_range(-POOF_SPEED..=POOF_SPEED),
            rng.gen_range(-POOF_SPEED..=POOF_SPEED),
        );
        let material = materials.add(StandardMaterial {
            base_color: Color::from(color),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            ..default()
        });
        commands.spawn((
            RuntimeSceneEntity,
            PoofParticle::new(velocity),
            Mesh3d(handles.poof_mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(position),
        ));
    }
}

/// Poofs advance a fixed step per frame, not per second.
pub fn update_poof_particles(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut particles: Query<(
        Entity,
        &mut PoofParticle,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    for (entity, mut particle, mut transform, material) in &mut particles {
        particle.frames_lived += 1;
        if particle.frames_lived >= POOF_LIFETIME_FRAMES {
            materials.remove(&material.0);
            commands.entity(entity).try_despawn();
            continue;
        }

        transform.translation += particle.velocity;
        transform.scale *= POOF_SHRINK_PER_FRAME;
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color.set_alpha(particle.life());
        }
    }
}

pub fn spawn_sparkles(
    mut commands: Commands,
    time: Res<Time>,
    mut triggers: MessageReader<EffectTrigger>,
    handles: Option<Res<SceneHandles>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    groups: Query<&GlobalTransform, With<BalloonGroup>>,
) {
    let bursts = triggers
        .read()
        .filter(|trigger| matches!(trigger, EffectTrigger::Sparkles))
        .count();
    let Some(handles) = handles else {
        return;
    };
    if bursts == 0 {
        return;
    }

    let center = groups
        .get(handles.balloon_group)
        .map(|group| group.translation())
        .unwrap_or_default()
        + SPARKLE_CENTER_OFFSET;
    let now = time.elapsed_secs();
    let mut rng = rand::thread_rng();

    for _ in 0..bursts {
        for index in 0..SPARKLE_COUNT {
            let angle = index as f32 / SPARKLE_COUNT as f32 * TAU;
            let radius = rng.gen_range(0.6..1.4);
            let origin = center
                + Vec3::new(
                    angle.cos() * radius,
                    rng.gen_range(-0.2..0.6),
                    angle.sin() * radius * 0.5,
                );
            let color = SPARKLE_COLORS[rng.gen_range(0..SPARKLE_COLORS.len())];
            let material = materials.add(StandardMaterial {
                base_color: Color::from(color),
                emissive: LinearRgba::from(color) * 2.0,
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                ..default()
            });
            commands.spawn((
                RuntimeSceneEntity,
                SparkleParticle {
                    spawned_at: now,
                    origin,
                    rise: rng.gen_range(0.3..0.7),
                },
                Mesh3d(handles.sparkle_mesh.clone()),
                MeshMaterial3d(material),
                Transform::from_translation(origin),
            ));
        }
    }
}

pub fn update_sparkles(
    mut commands: Commands,
    time: Res<Time>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut sparkles: Query<(
        Entity,
        &SparkleParticle,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    let now = time.elapsed_secs();
    for (entity, sparkle, mut transform, material) in &mut sparkles {
        let progress = (now - sparkle.spawned_at) / SPARKLE_SECS;
        if progress >= 1.0 {
            materials.remove(&material.0);
            commands.entity(entity).try_despawn();
            continue;
        }

        let progress = progress.max(0.0);
        transform.translation = sparkle.origin + Vec3::Y * sparkle.rise * progress;
        transform.scale = Vec3::splat(1.0 - progress);
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color.set_alpha(1.0 - progress);
        }
    }
}
