use crate::app::state::RenderMode;
use crate::scene_runtime::components::{AvatarEye, BalloonGroup, BodyPart, PumpRod};
use crate::scene_runtime::easing::{self, GroupPose};
use crate::scene_runtime::messages::{AvatarChanged, AvatarCommand};
use crate::scene_runtime::state::{AnimationClock, AvatarState, SceneHandles};
use crate::scene_runtime::systems::effects::{
    EffectKind, EffectRunList, GroupQuery, PartQuery, RodQuery, complete_all_effects,
    start_part_appear,
};
use crate::scene_runtime::systems::particles::spawn_poof;
use bevy::prelude::*;
use buddy_common::{Expression, GHOST_OPACITY, expression_for};

/// Height the avatar drifts up to after the game is lost.
const FLOAT_AWAY_CEILING: f32 = 5.0;
const FLOAT_AWAY_SPEED: f32 = 1.2;

type EyeQuery<'w, 's> = Query<
    'w,
    's,
    &'static mut Transform,
    (
        With<AvatarEye>,
        Without<BodyPart>,
        Without<BalloonGroup>,
        Without<PumpRod>,
    ),
>;

/// Applies commands to the phase model in every render mode. Without a
/// scene there is no appear animation to wait for, so parts settle at once.
pub fn update_avatar_model(
    render_mode: Res<State<RenderMode>>,
    mut commands_in: MessageReader<AvatarCommand>,
    mut avatar: ResMut<AvatarState>,
    mut changed: MessageWriter<AvatarChanged>,
) {
    let animated = matches!(render_mode.get(), RenderMode::Scene3d);
    for command in commands_in.read() {
        match *command {
            AvatarCommand::Apply(attempts_left) => {
                let transition = avatar.0.apply(attempts_left);
                if !animated {
                    for slot in &transition.appeared {
                        avatar.0.settle(*slot);
                    }
                }
                debug!(
                    "Avatar applied {} attempts left: {} shown, {}",
                    attempts_left,
                    avatar.0.shown_count(),
                    transition.expression.tier.label()
                );
                changed.write(AvatarChanged::Transition(transition));
            }
            AvatarCommand::Reset => {
                avatar.0.reset();
                changed.write(AvatarChanged::Reset);
            }
        }
    }
}

/// Binds model transitions to meshes, materials and effects.
pub fn sync_avatar_scene(
    mut commands: Commands,
    time: Res<Time>,
    clock: Res<AnimationClock>,
    handles: Res<SceneHandles>,
    mut changes: MessageReader<AvatarChanged>,
    mut avatar: ResMut<AvatarState>,
    mut run_list: ResMut<EffectRunList>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    part_positions: Query<(Entity, &BodyPart, &GlobalTransform)>,
    mut parts: PartQuery,
    mut groups: GroupQuery,
    mut rods: RodQuery,
    mut eyes: EyeQuery,
) {
    let now = time.elapsed_secs();
    for change in changes.read() {
        match change {
            AvatarChanged::Transition(transition) => {
                for (entity, body_part, global) in &part_positions {
                    if transition.appeared.contains(&body_part.slot) {
                        let Ok((_, mut transform, material)) = parts.get_mut(entity) else {
                            continue;
                        };
                        set_part_opacity(&mut materials, &material.0, 1.0);
                        start_part_appear(
                            &mut run_list,
                            entity,
                            body_part.slot,
                            &mut transform,
                            now,
                        );
                        spawn_poof(
                            &mut commands,
                            &handles,
                            &mut materials,
                            global.translation(),
                            body_part.base_color,
                        );
                    } else if transition.hidden.contains(&body_part.slot) {
                        run_list.cancel_part_appear(entity);
                        ghost_part(entity, &mut parts, &mut materials);
                    }
                }

                if transition.pump_stroke {
                    run_list.push(EffectKind::PumpStroke, now);
                }
                if !transition.floating_away {
                    for mut group in &mut groups {
                        group.translation = Vec3::ZERO;
                        group.rotation = Quat::IDENTITY;
                    }
                }
                apply_expression(&mut eyes, transition.expression);
            }
            AvatarChanged::Reset => {
                complete_all_effects(
                    &mut run_list,
                    clock.color_cycle,
                    &mut avatar,
                    &mut materials,
                    &mut parts,
                    &mut groups,
                    &mut rods,
                );
                for (entity, _, _) in &part_positions {
                    ghost_part(entity, &mut parts, &mut materials);
                }
                for mut group in &mut groups {
                    *group = GroupPose::NEUTRAL.to_transform();
                }
                apply_expression(&mut eyes, expression_for(avatar.0.attempts_left()));
            }
        }
    }
}

/// Idle bob while tethered, a slow climb once the game is lost.
pub fn animate_avatar_group(
    time: Res<Time>,
    clock: Res<AnimationClock>,
    avatar: Res<AvatarState>,
    mut groups: Query<&mut Transform, With<BalloonGroup>>,
) {
    for mut group in &mut groups {
        if avatar.0.is_floating_away() {
            group.translation.y = (group.translation.y + FLOAT_AWAY_SPEED * time.delta_secs())
                .min(FLOAT_AWAY_CEILING);
            group.rotation = Quat::from_rotation_z(easing::float_away_roll(clock.animation));
        } else {
            let (y, roll) = easing::idle_bob(clock.animation);
            group.translation.y = y;
            group.rotation = Quat::from_rotation_z(roll);
        }
    }
}

fn ghost_part(entity: Entity, parts: &mut PartQuery, materials: &mut Assets<StandardMaterial>) {
    let Ok((body_part, mut transform, material)) = parts.get_mut(entity) else {
        return;
    };
    transform.scale = body_part.base_scale;
    set_part_opacity(materials, &material.0, GHOST_OPACITY);
    if let Some(material) = materials.get_mut(&material.0) {
        material.emissive = LinearRgba::BLACK;
    }
}

fn set_part_opacity(
    materials: &mut Assets<StandardMaterial>,
    handle: &Handle<StandardMaterial>,
    opacity: f32,
) {
    let Some(material) = materials.get_mut(handle) else {
        return;
    };
    material.base_color.set_alpha(opacity);
    material.alpha_mode = if opacity < 1.0 {
        AlphaMode::Blend
    } else {
        AlphaMode::Opaque
    };
}

fn apply_expression(eyes: &mut EyeQuery, expression: Expression) {
    for mut eye in eyes.iter_mut() {
        eye.scale = Vec3::splat(expression.eye_scale);
        eye.translation.y = expression.eye_offset_y;
    }
}

