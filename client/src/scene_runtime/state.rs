use bevy::prelude::*;
use buddy_common::AvatarModel;

/// Entities and shared assets of the built scene. Inserted once by the
/// scaffold and read by every scene system.
#[derive(Resource)]
pub struct SceneHandles {
    pub balloon_group: Entity,
    pub pump_rod: Entity,
    pub camera: Entity,
    pub cloud_material: Handle<StandardMaterial>,
    pub poof_mesh: Handle<Mesh>,
    pub sparkle_mesh: Handle<Mesh>,
}

/// Persistent avatar phases. Updated in every render mode so the text
/// fallback and the HUD read the same state the scene shows.
#[derive(Resource, Default, Debug, Clone)]
pub struct AvatarState(pub AvatarModel);

/// Slow clocks driving ambient motion, in abstract units.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct AnimationClock {
    pub animation: f32,
    pub color_cycle: f32,
}

impl AnimationClock {
    pub const ANIMATION_RATE: f32 = 1.2;
    pub const COLOR_CYCLE_RATE: f32 = 0.48;

    pub fn advance(&mut self, delta_secs: f32) {
        self.animation += delta_secs * Self::ANIMATION_RATE;
        self.color_cycle += delta_secs * Self::COLOR_CYCLE_RATE;
    }
}

/// HUD-level effect flags. The scene never reads them.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenFlags {
    pub shake: bool,
    pub success_glow: bool,
}
