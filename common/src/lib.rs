//! Balloon Buddy domain model
//!
//! Engine-free building blocks shared by the client: the avatar phase model
//! driven by remaining attempts, the expression and danger tiers derived from
//! it, the voice command interpreter, and the textual fallback art used when
//! no 3D context is available.
//!
//! Nothing in this crate touches the renderer, the network or the clock, so
//! every rule here is exercised directly by unit tests.

pub mod avatar;
pub mod fallback_art;
pub mod voice;

pub use avatar::{
    danger_glow, expression_for, mood_percent, AvatarModel, AvatarTransition, BodyPartSlot,
    Expression, ExpressionTier, PartPhase, GHOST_OPACITY, MAX_ATTEMPTS,
};
pub use fallback_art::fallback_art;
pub use voice::{PhoneticTable, VoiceAction, VoiceInterpreter, DEFAULT_PHONETIC_PAIRS};
