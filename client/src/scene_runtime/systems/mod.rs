pub mod avatar;
pub mod camera;
pub mod clouds;
pub mod effects;
pub mod mood;
pub mod particles;
pub mod picking;
pub mod scaffold;

pub use avatar::{animate_avatar_group, sync_avatar_scene, update_avatar_model};
pub use camera::{handle_window_resize, sway_camera};
pub use clouds::drift_clouds;
pub use effects::{EffectKind, EffectRunList, advance_effects, trigger_effects};
pub use mood::{MoodState, advance_animation_clock, apply_mood, breathe_avatar_materials};
pub use particles::{spawn_sparkles, update_poof_particles, update_sparkles};
pub use picking::pick_avatar;
pub use scaffold::build_scene_scaffold;
