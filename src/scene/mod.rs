//! The single game scene and the minimal engine services it runs on.
//!
//! `GameScene` is the controller. The sibling modules stand in for what a
//! platform 2D engine would provide: geometry, a fixed-step physics world
//! with category bitmasks, and timed actions (spawner, animations).

pub mod banner;
pub mod bird;
pub mod category;
pub mod floor;
pub mod game_scene;
pub mod geometry;
pub mod physics;
pub mod pipes;
pub mod status;

pub use category::{CategoryMask, Contact};
pub use game_scene::{GameScene, SceneEvent};
pub use status::GameStatus;
