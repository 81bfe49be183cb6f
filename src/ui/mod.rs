//! Terminal UI for the game screen.

pub mod game_common;
pub mod scene_view;

pub use scene_view::render_scene;
