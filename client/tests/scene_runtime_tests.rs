mod support;

use balloon_buddy::RenderMode;
use balloon_buddy::scene_runtime::components::{
    BalloonGroup, BodyPart, POOF_LIFETIME_FRAMES, PoofParticle, PumpRod,
};
use balloon_buddy::scene_runtime::easing::ROD_UP;
use balloon_buddy::scene_runtime::messages::{AvatarCommand, EffectTrigger};
use balloon_buddy::scene_runtime::palette::STORMY_SKY;
use balloon_buddy::scene_runtime::registration::register_scene_runtime;
use balloon_buddy::scene_runtime::state::{AvatarState, ScreenFlags};
use balloon_buddy::scene_runtime::systems::EffectRunList;
use bevy::prelude::*;
use buddy_common::{BodyPartSlot, GHOST_OPACITY, PartPhase};
use support::{headless_app, run_frames};

fn scene_app(name: &str, mode: RenderMode) -> App {
    let mut app = headless_app(name, mode);
    register_scene_runtime(&mut app, RenderMode::Scene3d);
    app.update();
    app
}

fn part_opacities(app: &mut App) -> Vec<(BodyPartSlot, f32)> {
    let mut query = app
        .world_mut()
        .query::<(&BodyPart, &MeshMaterial3d<StandardMaterial>)>();
    let handles: Vec<_> = query
        .iter(app.world())
        .map(|(part, material)| (part.slot, material.0.clone()))
        .collect();
    let materials = app.world().resource::<Assets<StandardMaterial>>();
    handles
        .into_iter()
        .filter_map(|(slot, handle)| {
            materials
                .get(&handle)
                .map(|material| (slot, material.base_color.alpha()))
        })
        .collect()
}

fn head_alpha(app: &mut App) -> Option<f32> {
    part_opacities(app)
        .into_iter()
        .find(|(slot, _)| *slot == BodyPartSlot::Head)
        .map(|(_, alpha)| alpha)
}

fn poof_count(app: &mut App) -> usize {
    let mut query = app.world_mut().query::<&PoofParticle>();
    query.iter(app.world()).count()
}

#[test]
fn scaffold_builds_a_ghost_outline_of_every_part() {
    let mut app = scene_app("scaffold", RenderMode::Scene3d);

    let opacities = part_opacities(&mut app);
    assert_eq!(opacities.len(), BodyPartSlot::ALL.len());
    for (slot, alpha) in opacities {
        assert!(
            (alpha - GHOST_OPACITY).abs() < 1e-4,
            "{slot:?} should start as a ghost"
        );
    }
}

#[test]
fn wrong_answer_inflates_one_part_and_settles_it() {
    let mut app = scene_app("inflate", RenderMode::Scene3d);

    app.world_mut().write_message(AvatarCommand::Apply(5));
    app.update();

    let avatar = app.world().resource::<AvatarState>();
    assert_eq!(avatar.0.phase(BodyPartSlot::Head), PartPhase::Appearing);
    assert_eq!(avatar.0.shown_count(), 1);

    run_frames(&mut app, 6);

    let avatar = app.world().resource::<AvatarState>();
    assert_eq!(avatar.0.phase(BodyPartSlot::Head), PartPhase::Solid);
    assert_eq!(head_alpha(&mut app), Some(1.0));
}

#[test]
fn poof_particles_are_gone_after_their_lifetime() {
    let mut app = scene_app("poof", RenderMode::Scene3d);

    app.world_mut().write_message(AvatarCommand::Apply(5));
    app.update();
    assert!(poof_count(&mut app) > 0);

    run_frames(&mut app, POOF_LIFETIME_FRAMES as usize + 1);
    assert_eq!(poof_count(&mut app), 0);
}

#[test]
fn reset_mid_animation_leaves_nothing_running() {
    let mut app = scene_app("reset", RenderMode::Scene3d);

    app.world_mut().write_message(AvatarCommand::Apply(3));
    app.update();
    assert!(!app.world().resource::<EffectRunList>().is_empty());

    app.world_mut().write_message(AvatarCommand::Reset);
    app.update();

    assert!(app.world().resource::<EffectRunList>().is_empty());
    let avatar = app.world().resource::<AvatarState>();
    assert_eq!(avatar.0.shown_count(), 0);
    for slot in BodyPartSlot::ALL {
        assert_eq!(avatar.0.phase(slot), PartPhase::Ghost);
    }
    for (_, alpha) in part_opacities(&mut app) {
        assert!((alpha - GHOST_OPACITY).abs() < 1e-4);
    }
}

#[test]
fn last_attempt_turns_the_sky_stormy() {
    let mut app = scene_app("stormy", RenderMode::Scene3d);

    app.world_mut().write_message(AvatarCommand::Apply(0));
    app.update();

    assert_eq!(
        app.world().resource::<ClearColor>().0,
        Color::from(STORMY_SKY)
    );
    assert!(app.world().resource::<AvatarState>().0.is_floating_away());
}

#[test]
fn text_fallback_settles_parts_without_a_scene() {
    let mut app = scene_app("fallback", RenderMode::TextFallback);

    app.world_mut().write_message(AvatarCommand::Apply(4));
    app.update();

    let avatar = app.world().resource::<AvatarState>();
    assert_eq!(avatar.0.shown_count(), 2);
    assert_eq!(avatar.0.phase(BodyPartSlot::Head), PartPhase::Solid);
    assert_eq!(avatar.0.phase(BodyPartSlot::Body), PartPhase::Solid);
    assert!(part_opacities(&mut app).is_empty());
}

#[test]
fn shake_flag_follows_the_effect_lifetime() {
    let mut app = scene_app("shake", RenderMode::TextFallback);

    app.world_mut().write_message(EffectTrigger::ScreenShake);
    app.update();
    assert!(app.world().resource::<ScreenFlags>().shake);

    run_frames(&mut app, 6);
    assert_eq!(*app.world().resource::<ScreenFlags>(), ScreenFlags::default());
}

#[test]
fn overlapping_triggers_each_get_an_instance_except_wobble() {
    let mut app = scene_app("overlap", RenderMode::TextFallback);

    app.world_mut().write_message(EffectTrigger::ScreenShake);
    app.world_mut().write_message(EffectTrigger::ScreenShake);
    app.world_mut().write_message(EffectTrigger::Wobble);
    app.world_mut().write_message(EffectTrigger::Wobble);
    app.update();

    assert_eq!(app.world().resource::<EffectRunList>().len(), 3);
}

#[test]
fn part_hidden_mid_appear_returns_to_a_ghost() {
    let mut app = scene_app("hide-mid-appear", RenderMode::Scene3d);

    app.world_mut().write_message(AvatarCommand::Apply(5));
    app.update();
    app.world_mut().write_message(AvatarCommand::Apply(6));
    app.update();

    let alpha = head_alpha(&mut app).unwrap_or_default();
    assert!((alpha - GHOST_OPACITY).abs() < 1e-4, "alpha was {alpha}");

    run_frames(&mut app, 6);

    let avatar = app.world().resource::<AvatarState>();
    assert_eq!(avatar.0.phase(BodyPartSlot::Head), PartPhase::Ghost);
    assert!(app.world().resource::<EffectRunList>().is_empty());

    let alpha = head_alpha(&mut app).unwrap_or_default();
    assert!((alpha - GHOST_OPACITY).abs() < 1e-4, "alpha was {alpha}");

    let mut query = app.world_mut().query::<(&BodyPart, &Transform)>();
    let (head, transform) = query
        .iter(app.world())
        .find(|(part, _)| part.slot == BodyPartSlot::Head)
        .expect("head part is spawned");
    assert_eq!(transform.scale, head.base_scale);
}

#[test]
fn overlapping_group_effects_end_neutral() {
    let mut app = scene_app("neutral-end", RenderMode::Scene3d);

    app.world_mut().write_message(AvatarCommand::Apply(5));
    app.world_mut().write_message(EffectTrigger::VictoryDance);
    app.world_mut().write_message(EffectTrigger::Wobble);
    app.update();
    app.world_mut().write_message(AvatarCommand::Apply(4));
    app.update();

    run_frames(&mut app, 35);

    assert!(app.world().resource::<EffectRunList>().is_empty());

    let mut rods = app
        .world_mut()
        .query_filtered::<&Transform, With<PumpRod>>();
    for rod in rods.iter(app.world()) {
        assert!((rod.translation.y - ROD_UP).abs() < 1e-5);
    }

    let mut groups = app
        .world_mut()
        .query_filtered::<&Transform, With<BalloonGroup>>();
    let group = groups
        .single(app.world())
        .expect("one balloon group");
    assert!(group.scale.abs_diff_eq(Vec3::ONE, 1e-5));
    assert_eq!(group.translation.x, 0.0);
    assert_eq!(group.translation.z, 0.0);
}
