//! Integration test: configuration files and run records
//!
//! Loads configs from disk the way `--config` does and feeds finished games
//! into the records file.

use flappy::config::ConfigError;
use flappy::{GameConfig, GameScene, GameStatus, Records, RecordsManager, SceneEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::io;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("flappy_it_{}_{}", std::process::id(), name))
}

#[test]
fn test_load_config_from_file() {
    let path = temp_path("config.json");
    fs::write(&path, r#"{ "scroll_speed": 1.5, "spawn_wait_secs": 2.0 }"#).unwrap();

    let config = GameConfig::load_from(&path).unwrap();
    assert!((config.scroll_speed - 1.5).abs() < f64::EPSILON);
    assert!((config.spawn_wait_secs - 2.0).abs() < f64::EPSILON);
    assert_eq!(config.scene_width, GameConfig::default().scene_width);

    fs::remove_file(path).ok();
}

#[test]
fn test_invalid_config_file_is_invalid_data() {
    let path = temp_path("bad_config.json");
    fs::write(&path, r#"{ "floor_height": 9000.0 }"#).unwrap();

    let err = GameConfig::load_from(&path).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("floor height"));

    fs::remove_file(path).ok();
}

#[test]
fn test_missing_config_file_is_not_found() {
    let err = GameConfig::load_from(&temp_path("does_not_exist.json")).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn test_config_round_trips_through_json() {
    let config = GameConfig {
        gravity: -600.0,
        pipe_width: 52.0,
        ..Default::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(GameConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_negative_spawn_window_rejected() {
    let result = GameConfig::from_json(r#"{ "spawn_wait_secs": 0.5, "spawn_wait_range_secs": 2.0 }"#);
    assert!(matches!(result, Err(ConfigError::NonPositive { .. })));
}

#[test]
fn test_custom_config_drives_scene() {
    let config = GameConfig {
        scroll_speed: 3.0,
        ..Default::default()
    };
    let mut scene = GameScene::new(config);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    scene.update(&mut rng);
    assert_eq!(scene.floors()[0].origin.x, -3.0);
}

#[test]
fn test_finished_games_update_records_file() {
    let manager = RecordsManager::with_path(temp_path("records.dat"));
    manager.reset().unwrap();
    let mut records = manager.load_or_default();
    assert_eq!(records, Records::default());

    let mut scene = GameScene::new(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let mut finished = Vec::new();

    while finished.len() < 3 {
        match scene.status() {
            GameStatus::Idle => {
                scene.touch(&mut rng);
            }
            GameStatus::Over if scene.interaction_enabled() => {
                scene.touch(&mut rng);
            }
            _ => {}
        }
        for event in scene.update(&mut rng) {
            if let SceneEvent::GameOver { meters } = event {
                records.record_run(meters);
                manager.save(&records).unwrap();
                finished.push(meters);
            }
        }
    }

    let loaded = manager.load().unwrap();
    assert_eq!(loaded.games_played, 3);
    assert_eq!(loaded.best_meters, *finished.iter().max().unwrap());
    assert_eq!(loaded.total_meters, finished.iter().sum::<u64>());

    manager.reset().unwrap();
}
