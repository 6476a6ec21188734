use bevy::prelude::*;

/// How the avatar is presented. Decided once at startup.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum RenderMode {
    /// Waiting for the primary window to report a usable size.
    #[default]
    Probing,
    Scene3d,
    /// No 3D context; the HUD draws the text fallback instead.
    TextFallback,
}
