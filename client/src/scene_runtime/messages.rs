use bevy::prelude::*;
use buddy_common::AvatarTransition;

/// Persistent avatar updates requested by the game bridge.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarCommand {
    Apply(u8),
    Reset,
}

/// Emitted after the avatar model changed, for the scene binding to follow.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AvatarChanged {
    Transition(AvatarTransition),
    Reset,
}

/// One-shot reactions that are not tied to a body part.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTrigger {
    SuccessPulse,
    Sparkles,
    ScreenShake,
    VictoryDance,
    Wobble,
}
