use crate::scene_runtime::components::{
    AvatarEye, BalloonGroup, BodyPart, PumpRod, RuntimeSceneEntity, SceneCamera, SunLight,
};
use crate::scene_runtime::easing::{self, ROD_UP};
use crate::scene_runtime::palette::{self, HAPPY_SKY};
use crate::scene_runtime::state::{AvatarState, SceneHandles};
use crate::scene_runtime::systems::clouds::spawn_clouds;
use crate::settings::SettingsResource;
use bevy::camera::{PerspectiveProjection, Projection};
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::{CascadeShadowConfigBuilder, GlobalAmbientLight};
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use buddy_common::{BodyPartSlot, GHOST_OPACITY, expression_for};
use std::f32::consts::PI;

const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.5, 6.5);
pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const FOG_START: f32 = 5.0;
const FOG_END: f32 = 20.0;

struct PartSpec {
    slot: BodyPartSlot,
    radius: f32,
    position: Vec3,
    scale: Vec3,
}

const PART_SPECS: [PartSpec; 6] = [
    PartSpec {
        slot: BodyPartSlot::Head,
        radius: 0.55,
        position: Vec3::new(0.0, 1.1, 0.0),
        scale: Vec3::new(1.0, 0.95, 0.9),
    },
    PartSpec {
        slot: BodyPartSlot::Body,
        radius: 0.42,
        position: Vec3::new(0.0, 0.35, 0.0),
        scale: Vec3::new(0.9, 1.1, 0.8),
    },
    PartSpec {
        slot: BodyPartSlot::LeftArm,
        radius: 0.15,
        position: Vec3::new(-0.5, 0.45, 0.0),
        scale: Vec3::new(1.2, 0.7, 0.7),
    },
    PartSpec {
        slot: BodyPartSlot::RightArm,
        radius: 0.15,
        position: Vec3::new(0.5, 0.45, 0.0),
        scale: Vec3::new(1.2, 0.7, 0.7),
    },
    PartSpec {
        slot: BodyPartSlot::LeftLeg,
        radius: 0.13,
        position: Vec3::new(-0.2, -0.25, 0.0),
        scale: Vec3::new(0.7, 1.3, 0.7),
    },
    PartSpec {
        slot: BodyPartSlot::RightLeg,
        radius: 0.13,
        position: Vec3::new(0.2, -0.25, 0.0),
        scale: Vec3::new(0.7, 1.3, 0.7),
    },
];

/// Builds the whole scene once when 3D rendering is available.
pub fn build_scene_scaffold(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut ambient_light: ResMut<GlobalAmbientLight>,
    settings: Res<SettingsResource>,
    avatar: Res<AvatarState>,
) {
    commands.insert_resource(ClearColor(Color::from(HAPPY_SKY)));
    ambient_light.color = Color::WHITE;
    ambient_light.brightness = 450.0;

    let camera = spawn_camera(&mut commands);
    spawn_lights(&mut commands, settings.current.graphics.shadows);
    spawn_scenery(&mut commands, &mut meshes, &mut materials);
    let pump_rod = spawn_pump(&mut commands, &mut meshes, &mut materials);
    let cloud_material = spawn_clouds(&mut commands, &mut meshes, &mut materials);
    let balloon_group = spawn_balloon_buddy(&mut commands, &mut meshes, &mut materials, &avatar);

    commands.insert_resource(SceneHandles {
        balloon_group,
        pump_rod,
        camera,
        cloud_material,
        poof_mesh: meshes.add(Sphere::new(0.05).mesh().uv(8, 8)),
        sparkle_mesh: meshes.add(Sphere::new(0.04).mesh().uv(6, 6)),
    });

    info!(
        "Scene scaffold built with {} body parts",
        PART_SPECS.len()
    );
}

fn spawn_camera(commands: &mut Commands) -> Entity {
    commands
        .spawn((
            RuntimeSceneEntity,
            SceneCamera,
            Camera3d::default(),
            Tonemapping::None,
            Projection::Perspective(PerspectiveProjection {
                fov: 45.0_f32.to_radians(),
                near: 0.1,
                far: 1000.0,
                ..default()
            }),
            DistanceFog {
                color: Color::from(HAPPY_SKY),
                falloff: FogFalloff::Linear {
                    start: FOG_START,
                    end: FOG_END,
                },
                ..default()
            },
            Transform::from_translation(CAMERA_POSITION).looking_at(CAMERA_TARGET, Vec3::Y),
        ))
        .id()
}

fn spawn_lights(commands: &mut Commands, shadows: bool) {
    commands.spawn((
        RuntimeSceneEntity,
        SunLight,
        DirectionalLight {
            color: Color::from(palette::SUN_LIGHT),
            illuminance: 6_000.0,
            shadows_enabled: shadows,
            ..default()
        },
        CascadeShadowConfigBuilder {
            num_cascades: 1,
            minimum_distance: 0.1,
            maximum_distance: 30.0,
            first_cascade_far_bound: 30.0,
            overlap_proportion: 0.2,
        }
        .build(),
        Transform::from_xyz(5.0, 10.0, 7.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        RuntimeSceneEntity,
        PointLight {
            color: Color::from(palette::FILL_LIGHT),
            intensity: 300_000.0,
            range: 20.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-3.0, 5.0, 5.0),
    ));
}

fn matte(color: Srgba) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::from(color),
        perceptual_roughness: 0.8,
        metallic: 0.0,
        ..default()
    }
}

fn spawn_scenery(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        RuntimeSceneEntity,
        Mesh3d(meshes.add(Cylinder::new(6.0, 0.5).mesh().resolution(32))),
        MeshMaterial3d(materials.add(matte(palette::GROUND))),
        Transform::from_xyz(0.0, -2.7, 0.0),
    ));

    let post_material = materials.add(matte(palette::POST));
    commands.spawn((
        RuntimeSceneEntity,
        Mesh3d(meshes.add(ConicalFrustum {
            radius_top: 0.15,
            radius_bottom: 0.18,
            height: 2.5,
        })),
        MeshMaterial3d(post_material.clone()),
        Transform::from_xyz(-1.5, -1.5, 0.0),
    ));
    commands.spawn((
        RuntimeSceneEntity,
        Mesh3d(meshes.add(Sphere::new(0.2).mesh().uv(12, 12))),
        MeshMaterial3d(post_material),
        Transform::from_xyz(-1.5, -0.2, 0.0),
    ));

    // Half ring opening towards the avatar.
    let hook_points: Vec<Vec3> = (0..=12)
        .map(|step| {
            let angle = step as f32 / 12.0 * PI;
            Vec3::new(angle.cos() * 0.15, angle.sin() * 0.15, 0.0)
        })
        .collect();
    let hook = commands
        .spawn((
            RuntimeSceneEntity,
            Transform::from_xyz(-1.2, -0.1, 0.0).with_rotation(Quat::from_rotation_z(-PI / 2.0)),
            Visibility::default(),
        ))
        .id();
    spawn_tube(
        commands,
        meshes,
        materials.add(matte(palette::HOOK)),
        &hook_points,
        0.03,
        Some(hook),
    );

    let hose_points: Vec<Vec3> = (0..=20)
        .map(|step| {
            easing::cubic_bezier(
                Vec3::new(1.35, -2.3, 0.0),
                Vec3::new(0.5, -2.3, 0.0),
                Vec3::new(0.5, -2.5, 0.0),
                Vec3::new(0.0, -2.5, 0.0),
                step as f32 / 20.0,
            )
        })
        .collect();
    spawn_tube(
        commands,
        meshes,
        materials.add(matte(palette::DARK_RUBBER)),
        &hose_points,
        0.04,
        None,
    );
}

/// Spawns the pump and returns its rod, which moves on every stroke.
fn spawn_pump(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    commands.spawn((
        RuntimeSceneEntity,
        Mesh3d(meshes.add(Cylinder::new(0.4, 0.2).mesh().resolution(12))),
        MeshMaterial3d(materials.add(matte(palette::PUMP_BASE))),
        Transform::from_xyz(1.5, -2.4, 0.0),
    ));
    commands.spawn((
        RuntimeSceneEntity,
        Mesh3d(meshes.add(Cylinder::new(0.15, 1.2).mesh().resolution(12))),
        MeshMaterial3d(materials.add(matte(palette::PUMP_CYLINDER))),
        Transform::from_xyz(1.5, -1.7, 0.0),
    ));

    let rod = commands
        .spawn((
            RuntimeSceneEntity,
            PumpRod,
            Mesh3d(meshes.add(Cylinder::new(0.05, 1.2).mesh().resolution(8))),
            MeshMaterial3d(materials.add(matte(palette::PUMP_ROD))),
            Transform::from_xyz(1.5, ROD_UP, 0.0),
        ))
        .id();
    commands.spawn((
        RuntimeSceneEntity,
        Mesh3d(meshes.add(Cuboid::new(0.8, 0.1, 0.15))),
        MeshMaterial3d(materials.add(matte(palette::DARK_RUBBER))),
        Transform::from_xyz(0.0, 0.6, 0.0),
        ChildOf(rod),
    ));
    rod
}

fn spawn_balloon_buddy(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    avatar: &AvatarState,
) -> Entity {
    let group = commands
        .spawn((
            RuntimeSceneEntity,
            BalloonGroup,
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let mut head = None;
    for spec in &PART_SPECS {
        let color = palette::body_part_color(spec.slot);
        let shown = avatar.0.phase(spec.slot).is_shown();
        let opacity = if shown { 1.0 } else { GHOST_OPACITY };
        let material = materials.add(StandardMaterial {
            base_color: Color::from(color.with_alpha(opacity)),
            perceptual_roughness: 0.4,
            metallic: 0.0,
            clearcoat: 0.3,
            clearcoat_perceptual_roughness: 0.4,
            alpha_mode: if shown {
                AlphaMode::Opaque
            } else {
                AlphaMode::Blend
            },
            double_sided: true,
            cull_mode: None,
            ..default()
        });
        let part = commands
            .spawn((
                RuntimeSceneEntity,
                BodyPart {
                    slot: spec.slot,
                    base_scale: spec.scale,
                    base_color: color,
                    radius: spec.radius,
                },
                Mesh3d(meshes.add(Sphere::new(spec.radius).mesh().uv(32, 24))),
                MeshMaterial3d(material),
                Transform::from_translation(spec.position).with_scale(spec.scale),
                ChildOf(group),
            ))
            .id();
        if spec.slot == BodyPartSlot::Head {
            head = Some(part);
        }
    }

    if let Some(head) = head {
        spawn_face(commands, meshes, materials, head, avatar);
    }

    let string_points: Vec<Vec3> = (0..=20)
        .map(|step| {
            easing::quadratic_bezier(
                Vec3::new(0.0, -0.4, 0.0),
                Vec3::new(-0.3, -0.8, 0.0),
                Vec3::new(-0.8, -0.2, 0.0),
                step as f32 / 20.0,
            )
        })
        .collect();
    let string_material = materials.add(StandardMaterial {
        base_color: Color::from(palette::STRING),
        unlit: true,
        ..default()
    });
    spawn_tube(
        commands,
        meshes,
        string_material,
        &string_points,
        0.015,
        Some(group),
    );

    group
}

fn spawn_face(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    head: Entity,
    avatar: &AvatarState,
) {
    let expression = expression_for(avatar.0.attempts_left());
    let eye_mesh = meshes.add(Sphere::new(0.06).mesh().uv(16, 16));
    let highlight_mesh = meshes.add(Sphere::new(0.02).mesh().uv(8, 8));
    let eye_material = materials.add(StandardMaterial {
        base_color: Color::from(palette::EYE),
        unlit: true,
        ..default()
    });
    let highlight_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    for x in [-0.15, 0.15] {
        let eye = commands
            .spawn((
                RuntimeSceneEntity,
                AvatarEye,
                Mesh3d(eye_mesh.clone()),
                MeshMaterial3d(eye_material.clone()),
                Transform::from_xyz(x, expression.eye_offset_y, 0.48)
                    .with_scale(Vec3::splat(expression.eye_scale)),
                ChildOf(head),
            ))
            .id();
        commands.spawn((
            RuntimeSceneEntity,
            Mesh3d(highlight_mesh.clone()),
            MeshMaterial3d(highlight_material.clone()),
            Transform::from_xyz(0.02, 0.02, 0.03),
            ChildOf(eye),
        ));
    }

    let smile_points: Vec<Vec3> = (0..=12)
        .map(|step| {
            easing::quadratic_bezier(
                Vec3::new(-0.12, -0.08, 0.5),
                Vec3::new(0.0, -0.15, 0.52),
                Vec3::new(0.12, -0.08, 0.5),
                step as f32 / 12.0,
            )
        })
        .collect();
    spawn_tube(
        commands,
        meshes,
        eye_material,
        &smile_points,
        0.018,
        Some(head),
    );
}

/// Approximates a curved tube with one cylinder per sampled segment.
fn spawn_tube(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    points: &[Vec3],
    radius: f32,
    parent: Option<Entity>,
) {
    let mesh = meshes.add(Cylinder::new(radius, 1.0).mesh().resolution(8));
    for segment in easing::tube_segments(points) {
        let mut entity = commands.spawn((
            RuntimeSceneEntity,
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform {
                translation: segment.center,
                rotation: segment.rotation,
                scale: Vec3::new(1.0, segment.length, 1.0),
            },
        ));
        if let Some(parent) = parent {
            entity.insert(ChildOf(parent));
        }
    }
}
