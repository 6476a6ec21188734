pub mod components;
pub mod easing;
pub mod messages;
pub mod palette;
pub mod pipeline;
pub mod registration;
pub mod state;
pub mod systems;
