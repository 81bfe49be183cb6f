//! A simple pilot for headless runs: flap whenever the bird sinks below the
//! centre of the next gap.

use crate::scene::{GameScene, GameStatus};

/// How far under the gap centre the bird may sink before flapping.
const AIM_BELOW_CENTER: f64 = 10.0;

/// Height the pilot is currently steering toward.
pub fn target_height(scene: &GameScene) -> f64 {
    match scene.upcoming_gap() {
        Some((low, high)) => (low + high) / 2.0,
        None => {
            let config = scene.config();
            config.floor_height + config.playfield_height() / 2.0
        }
    }
}

pub fn should_flap(scene: &GameScene) -> bool {
    if scene.status() != GameStatus::Running {
        return false;
    }
    let bird = scene.bird();
    bird.velocity < 0.0 && bird.position.y < target_height(scene) - AIM_BELOW_CENTER
}
