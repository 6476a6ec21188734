#![allow(
    private_interfaces,
    clippy::collapsible_if,
    clippy::derivable_impls,
    clippy::too_many_arguments,
    clippy::type_complexity
)]

pub mod app;
pub mod composition;
pub mod gameplay;
pub mod infra;
pub mod scene_runtime;
pub mod settings;
pub mod ui;

pub use app::state::RenderMode;
