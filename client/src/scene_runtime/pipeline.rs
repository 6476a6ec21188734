use bevy::prelude::*;

/// Per-frame ordering of the scene runtime. Persistent state is synced
/// first, ambient motion runs next, and transient effects write last so
/// their frame wins over the ambient pose.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SceneRenderPipeline {
    Sync,
    Ambient,
    Effects,
    Camera,
}
