//! Flappy - terminal Flappy Bird library
//!
//! Exposes the scene, configuration and records for the binaries and tests.

pub mod autopilot;
pub mod build_info;
pub mod config;
pub mod constants;
pub mod input;
pub mod logging;
pub mod persistence;
pub mod records;
pub mod scene;
pub mod ui;

pub use config::{ConfigError, GameConfig};
pub use records::{Records, RecordsManager};
pub use scene::{CategoryMask, Contact, GameScene, GameStatus, SceneEvent};
