use bevy::prelude::*;
use buddy_common::BodyPartSlot;

/// Marker applied to every entity owned by the runtime scene lifecycle.
#[derive(Component)]
pub struct RuntimeSceneEntity;

#[derive(Component)]
pub struct SceneCamera;

/// Shadow-casting key light; its shadows follow the graphics settings.
#[derive(Component)]
pub struct SunLight;

/// Root of the avatar. Idle motion, wobble and the victory dance all move
/// this entity; parts and the face hang below it.
#[derive(Component)]
pub struct BalloonGroup;

/// One inflatable part. Each part owns its material so ghost and solid can
/// be switched per part.
#[derive(Component, Debug, Clone, Copy)]
pub struct BodyPart {
    pub slot: BodyPartSlot,
    pub base_scale: Vec3,
    pub base_color: Srgba,
    /// Pick radius before scaling.
    pub radius: f32,
}

/// Eye on the head. Expression tiers scale it and move it vertically.
#[derive(Component)]
pub struct AvatarEye;

#[derive(Component)]
pub struct PumpRod;

#[derive(Component, Debug, Clone, Copy)]
pub struct Cloud {
    /// Horizontal drift in world units per second.
    pub speed: f32,
    pub bob_speed: f32,
    pub bob_offset: f32,
}

/// Debris from a part inflating. Moves a fixed step per frame and fades
/// out over exactly [`POOF_LIFETIME_FRAMES`] frames.
#[derive(Component, Debug, Clone, Copy)]
pub struct PoofParticle {
    pub velocity: Vec3,
    pub frames_lived: u32,
}

pub const POOF_LIFETIME_FRAMES: u32 = 50;

impl PoofParticle {
    pub fn new(velocity: Vec3) -> Self {
        Self {
            velocity,
            frames_lived: 0,
        }
    }

    /// Remaining life in `[0, 1]`.
    pub fn life(&self) -> f32 {
        1.0 - self.frames_lived.min(POOF_LIFETIME_FRAMES) as f32 / POOF_LIFETIME_FRAMES as f32
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct SparkleParticle {
    pub spawned_at: f32,
    pub origin: Vec3,
    pub rise: f32,
}
