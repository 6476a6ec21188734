use crate::scene_runtime::components::{Cloud, RuntimeSceneEntity};
use crate::scene_runtime::palette::CLOUD_BRIGHT;
use crate::scene_runtime::state::AnimationClock;
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

const CLOUD_COUNT: usize = 4;
const WRAP_X: f32 = 8.0;
/// Vertical bob amplitude in world units per second.
const BOB_RATE: f32 = 0.03;

/// Spawns the puffy cloud groups. All puffs share one material so the mood
/// field can recolor every cloud at once.
pub fn spawn_clouds(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Handle<StandardMaterial> {
    let material = materials.add(StandardMaterial {
        base_color: Color::from(CLOUD_BRIGHT.with_alpha(0.98)),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        emissive: LinearRgba::rgb(0.15, 0.15, 0.15),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let mut rng = rand::thread_rng();

    for index in 0..CLOUD_COUNT {
        let scale = rng.gen_range(1.2..1.7);
        let cloud = commands
            .spawn((
                RuntimeSceneEntity,
                Cloud {
                    speed: rng.gen_range(0.24..0.42),
                    bob_speed: rng.gen_range(0.3..0.6),
                    bob_offset: rng.gen_range(0.0..TAU),
                },
                Transform::from_xyz(
                    -7.0 + index as f32 * 4.5 + rng.gen_range(-0.75..0.75),
                    rng.gen_range(2.0..2.8),
                    rng.gen_range(-6.0..-4.0),
                )
                .with_scale(Vec3::new(scale, scale * 0.75, scale)),
                Visibility::default(),
            ))
            .id();

        let base_size = rng.gen_range(0.5..0.8);
        let puffs = rng.gen_range(10..16);
        for puff in 0..puffs {
            let angle = puff as f32 / puffs as f32 * TAU;
            let ring = rng.gen_range(0.6..1.0);
            let variation = rng.gen_range(0.9..1.2);
            commands.spawn((
                RuntimeSceneEntity,
                Mesh3d(meshes.add(
                    Sphere::new(base_size * rng.gen_range(0.5..1.2))
                        .mesh()
                        .uv(16, 12),
                )),
                MeshMaterial3d(material.clone()),
                Transform::from_xyz(
                    angle.cos() * ring + rng.gen_range(-0.25..0.25),
                    rng.gen_range(-0.12..0.28),
                    angle.sin() * ring * 0.4 + rng.gen_range(-0.15..0.15),
                )
                .with_scale(Vec3::new(variation, variation * 0.85, variation)),
                ChildOf(cloud),
            ));
        }
        for _ in 0..5 {
            commands.spawn((
                RuntimeSceneEntity,
                Mesh3d(meshes.add(
                    Sphere::new(base_size * rng.gen_range(0.9..1.4))
                        .mesh()
                        .uv(16, 12),
                )),
                MeshMaterial3d(material.clone()),
                Transform::from_xyz(
                    rng.gen_range(-0.3..0.3),
                    rng.gen_range(0.1..0.35),
                    rng.gen_range(-0.15..0.15),
                ),
                ChildOf(cloud),
            ));
        }
    }

    material
}

pub fn drift_clouds(
    time: Res<Time>,
    clock: Res<AnimationClock>,
    mut clouds: Query<(&Cloud, &mut Transform)>,
) {
    let delta = time.delta_secs();
    for (cloud, mut transform) in &mut clouds {
        transform.translation.x += cloud.speed * delta;
        if transform.translation.x > WRAP_X {
            transform.translation.x = -WRAP_X;
        }
        transform.translation.y +=
            (clock.animation * cloud.bob_speed + cloud.bob_offset).sin() * BOB_RATE * delta;
    }
}
