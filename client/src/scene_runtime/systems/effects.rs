use crate::scene_runtime::components::{BalloonGroup, BodyPart, PumpRod};
use crate::scene_runtime::easing::{
    self, APPEAR_START_SCALE, GroupPose, PART_APPEAR_SECS, PUMP_STROKE_SECS, ROD_UP,
    SCREEN_SHAKE_SECS, SUCCESS_PULSE_SECS, VICTORY_DANCE_SECS, WOBBLE_SECS,
};
use crate::scene_runtime::messages::EffectTrigger;
use crate::scene_runtime::state::{AnimationClock, AvatarState, ScreenFlags};
use bevy::prelude::*;
use buddy_common::BodyPartSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    PartAppear { part: Entity, slot: BodyPartSlot },
    PumpStroke,
    Wobble,
    VictoryDance,
    ScreenShake,
    SuccessPulse,
}

impl EffectKind {
    pub fn duration_secs(self) -> f32 {
        match self {
            Self::PartAppear { .. } => PART_APPEAR_SECS,
            Self::PumpStroke => PUMP_STROKE_SECS,
            Self::Wobble => WOBBLE_SECS,
            Self::VictoryDance => VICTORY_DANCE_SECS,
            Self::ScreenShake => SCREEN_SHAKE_SECS,
            Self::SuccessPulse => SUCCESS_PULSE_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub started_at: f32,
}

impl ActiveEffect {
    pub fn elapsed_secs(&self, now: f32) -> f32 {
        (now - self.started_at).max(0.0)
    }

    pub fn progress(&self, now: f32) -> f32 {
        (self.elapsed_secs(now) / self.kind.duration_secs()).min(1.0)
    }
}

/// Live transient effects. Every trigger adds its own record; records are
/// dropped once their completion frame has been written.
#[derive(Resource, Default, Debug)]
pub struct EffectRunList {
    effects: Vec<ActiveEffect>,
}

impl EffectRunList {
    pub fn push(&mut self, kind: EffectKind, now: f32) {
        self.effects.push(ActiveEffect {
            kind,
            started_at: now,
        });
    }

    pub fn is_running(&self, predicate: impl Fn(&EffectKind) -> bool) -> bool {
        self.effects.iter().any(|effect| predicate(&effect.kind))
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Drops a part's appear records without writing their completion, so a
    /// part hidden mid-animation keeps its ghost look.
    pub fn cancel_part_appear(&mut self, part: Entity) {
        self.effects.retain(|effect| {
            !matches!(effect.kind, EffectKind::PartAppear { part: running, .. } if running == part)
        });
    }

    /// Removes every record so the caller can write completion frames.
    pub fn expire_all(&mut self) -> Vec<ActiveEffect> {
        std::mem::take(&mut self.effects)
    }
}

/// Scene state touched by effect frames.
pub type PartQuery<'w, 's> = Query<
    'w,
    's,
    (&'static BodyPart, &'static mut Transform, &'static MeshMaterial3d<StandardMaterial>),
    (Without<BalloonGroup>, Without<PumpRod>),
>;
pub type GroupQuery<'w, 's> =
    Query<'w, 's, &'static mut Transform, (With<BalloonGroup>, Without<BodyPart>, Without<PumpRod>)>;
pub type RodQuery<'w, 's> =
    Query<'w, 's, &'static mut Transform, (With<PumpRod>, Without<BodyPart>, Without<BalloonGroup>)>;

pub fn trigger_effects(
    time: Res<Time>,
    mut triggers: MessageReader<EffectTrigger>,
    mut run_list: ResMut<EffectRunList>,
) {
    let now = time.elapsed_secs();
    for trigger in triggers.read() {
        let kind = match trigger {
            EffectTrigger::SuccessPulse => EffectKind::SuccessPulse,
            EffectTrigger::ScreenShake => EffectKind::ScreenShake,
            EffectTrigger::VictoryDance => EffectKind::VictoryDance,
            EffectTrigger::Wobble => {
                if run_list.is_running(|kind| matches!(kind, EffectKind::Wobble)) {
                    continue;
                }
                EffectKind::Wobble
            }
            // Sparkles are particles, not run-list records.
            EffectTrigger::Sparkles => continue,
        };
        run_list.push(kind, now);
    }
}

pub fn advance_effects(
    time: Res<Time>,
    clock: Res<AnimationClock>,
    mut run_list: ResMut<EffectRunList>,
    mut avatar: ResMut<AvatarState>,
    mut flags: ResMut<ScreenFlags>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut parts: PartQuery,
    mut groups: GroupQuery,
    mut rods: RodQuery,
) {
    let now = time.elapsed_secs();
    let mut finished = Vec::new();

    for effect in &run_list.effects {
        let progress = effect.progress(now);
        if progress >= 1.0 {
            finished.push(*effect);
            continue;
        }
        write_effect_frame(
            effect,
            progress,
            now,
            clock.color_cycle,
            &mut materials,
            &mut parts,
            &mut groups,
            &mut rods,
        );
    }

    if !finished.is_empty() {
        run_list
            .effects
            .retain(|effect| effect.progress(now) < 1.0);
        for effect in &finished {
            complete_effect(
                effect,
                clock.color_cycle,
                &mut avatar,
                &mut materials,
                &mut parts,
                &mut groups,
                &mut rods,
            );
        }
    }

    let next_flags = ScreenFlags {
        shake: run_list.is_running(|kind| matches!(kind, EffectKind::ScreenShake)),
        success_glow: run_list.is_running(|kind| matches!(kind, EffectKind::SuccessPulse)),
    };
    if *flags != next_flags {
        *flags = next_flags;
    }
}

fn write_effect_frame(
    effect: &ActiveEffect,
    progress: f32,
    now: f32,
    color_clock: f32,
    materials: &mut Assets<StandardMaterial>,
    parts: &mut PartQuery,
    groups: &mut GroupQuery,
    rods: &mut RodQuery,
) {
    match effect.kind {
        EffectKind::PartAppear { part, .. } => {
            let Ok((body_part, mut transform, material)) = parts.get_mut(part) else {
                return;
            };
            transform.scale = body_part.base_scale * easing::bounce(progress);
            if let Some(material) = materials.get_mut(&material.0) {
                let flash = easing::appear_flash(progress);
                let alpha = material.base_color.alpha();
                let breathed = easing::breathing_color(body_part.base_color, color_clock, alpha);
                material.base_color = Color::from(
                    Srgba::WHITE.with_alpha(alpha).mix(&breathed, flash.color_mix),
                );
                material.emissive = LinearRgba::WHITE * flash.emissive;
            }
        }
        EffectKind::PumpStroke => {
            for mut rod in rods.iter_mut() {
                rod.translation.y = easing::pump_rod_y(progress);
            }
        }
        EffectKind::Wobble => {
            for mut group in groups.iter_mut() {
                group.scale = easing::wobble_scale(progress);
            }
        }
        EffectKind::VictoryDance => {
            let pose = easing::victory_pose(effect.elapsed_secs(now) * 1000.0);
            for mut group in groups.iter_mut() {
                *group = pose.to_transform();
            }
        }
        EffectKind::ScreenShake | EffectKind::SuccessPulse => {}
    }
}

/// Writes the neutral value an effect leaves behind.
fn complete_effect(
    effect: &ActiveEffect,
    color_clock: f32,
    avatar: &mut AvatarState,
    materials: &mut Assets<StandardMaterial>,
    parts: &mut PartQuery,
    groups: &mut GroupQuery,
    rods: &mut RodQuery,
) {
    match effect.kind {
        EffectKind::PartAppear { part, slot } => {
            avatar.0.settle(slot);
            let Ok((body_part, mut transform, material)) = parts.get_mut(part) else {
                return;
            };
            transform.scale = body_part.base_scale;
            if let Some(material) = materials.get_mut(&material.0) {
                let alpha = material.base_color.alpha();
                material.base_color =
                    Color::from(easing::breathing_color(body_part.base_color, color_clock, alpha));
                material.emissive = LinearRgba::BLACK;
            }
        }
        EffectKind::PumpStroke => {
            for mut rod in rods.iter_mut() {
                rod.translation.y = ROD_UP;
            }
        }
        EffectKind::Wobble => {
            for mut group in groups.iter_mut() {
                group.scale = Vec3::ONE;
            }
        }
        EffectKind::VictoryDance => {
            for mut group in groups.iter_mut() {
                *group = GroupPose::NEUTRAL.to_transform();
            }
        }
        EffectKind::ScreenShake | EffectKind::SuccessPulse => {}
    }
}

/// Completes every running effect at once. Used by avatar resets so nothing
/// is left mid-animation.
pub fn complete_all_effects(
    run_list: &mut EffectRunList,
    color_clock: f32,
    avatar: &mut AvatarState,
    materials: &mut Assets<StandardMaterial>,
    parts: &mut PartQuery,
    groups: &mut GroupQuery,
    rods: &mut RodQuery,
) {
    for effect in run_list.expire_all() {
        complete_effect(&effect, color_clock, avatar, materials, parts, groups, rods);
    }
}

/// Shrinks a part before its appear animation takes over.
pub fn start_part_appear(
    run_list: &mut EffectRunList,
    part: Entity,
    slot: BodyPartSlot,
    transform: &mut Transform,
    now: f32,
) {
    run_list.cancel_part_appear(part);
    transform.scale = Vec3::splat(APPEAR_START_SCALE);
    run_list.push(EffectKind::PartAppear { part, slot }, now);
}
