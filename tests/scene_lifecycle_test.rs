//! Integration test: scene lifecycle
//!
//! Drives `GameScene` through whole games with seeded RNGs and checks the
//! gameplay guarantees: pipe geometry, meters accounting, game-over and
//! restart behavior, and the status cycle.

use flappy::autopilot;
use flappy::scene::pipes::{PipeKind, PipePair};
use flappy::{CategoryMask, Contact, GameConfig, GameScene, GameStatus, SceneEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

fn seeded(seed: u64) -> (GameScene, ChaCha8Rng) {
    (
        GameScene::new(GameConfig::default()),
        ChaCha8Rng::seed_from_u64(seed),
    )
}

/// Steer toward the next gap.
fn pilot(scene: &mut GameScene, rng: &mut ChaCha8Rng) {
    if autopilot::should_flap(scene) {
        scene.touch(rng);
    }
}

/// Keep the bird hovering near the middle of the playfield, ignoring pipes.
fn hover(scene: &mut GameScene, rng: &mut ChaCha8Rng) {
    if scene.status() == GameStatus::Running
        && scene.bird().velocity < 0.0
        && scene.bird().position.y < 260.0
    {
        scene.touch(rng);
    }
}

/// Tap through game over and back into a running game.
fn restart_when_possible(scene: &mut GameScene, rng: &mut ChaCha8Rng) {
    match scene.status() {
        GameStatus::Over if scene.interaction_enabled() => {
            scene.touch(rng);
        }
        GameStatus::Idle => {
            scene.touch(rng);
        }
        _ => {}
    }
}

// =============================================================================
// Obstacle geometry
// =============================================================================

#[test]
fn test_every_spawned_pair_fits_playfield() {
    let (mut scene, mut rng) = seeded(11);
    let config = scene.config().clone();
    let mut pairs = Vec::new();

    for _ in 0..200_000 {
        restart_when_possible(&mut scene, &mut rng);
        hover(&mut scene, &mut rng);
        for event in scene.update(&mut rng) {
            if let SceneEvent::PipesSpawned(pair) = event {
                pairs.push(pair);
            }
        }
        if pairs.len() >= 100 {
            break;
        }
    }

    assert!(pairs.len() >= 100, "only {} pairs spawned", pairs.len());
    for pair in pairs {
        assert!(pair.gap > 0.0);
        assert!(pair.gap >= config.min_pipe_gap());
        assert!(pair.gap < config.max_pipe_gap());
        let total = pair.top + pair.bottom + pair.gap;
        assert!((total - config.playfield_height()).abs() < 1e-9);
    }
}

#[test]
fn test_spawned_sprites_match_pair() {
    let (mut scene, mut rng) = seeded(3);
    scene.touch(&mut rng);
    let config = scene.config().clone();

    let pair = (0..400)
        .find_map(|_| {
            hover(&mut scene, &mut rng);
            scene.update(&mut rng).into_iter().find_map(|e| match e {
                SceneEvent::PipesSpawned(pair) => Some(pair),
                _ => None,
            })
        })
        .expect("a pair within the maximum wait");

    let top = scene
        .pipes()
        .iter()
        .find(|p| p.kind == PipeKind::Top)
        .unwrap();
    let bottom = scene
        .pipes()
        .iter()
        .find(|p| p.kind == PipeKind::Bottom)
        .unwrap();
    assert_eq!(top.size.height, pair.top);
    assert_eq!(bottom.size.height, pair.bottom);
    assert_eq!(top.frame().max_y(), config.scene_height);
    assert_eq!(bottom.frame().min_y(), config.floor_height);
    assert!((top.frame().min_y() - bottom.frame().max_y() - pair.gap).abs() < 1e-9);
    assert_eq!(top.frame().min_x(), config.scene_width);
}

#[test]
fn test_generation_directly_over_many_seeds() {
    let config = GameConfig::default();
    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let pair = PipePair::generate(&config, &mut rng);
        assert!(pair.gap >= 60.0 && pair.gap < 84.0);
        assert!(pair.top >= 0.0 && pair.bottom > 0.0);
    }
}

#[test]
fn test_pipes_removed_only_after_leaving_screen() {
    let (mut scene, mut rng) = seeded(21);
    let speed = scene.config().scroll_speed;
    let mut last_x: HashMap<u64, (f64, f64)> = HashMap::new();
    let mut removed = 0;

    for _ in 0..60_000 {
        let before = scene.status();
        restart_when_possible(&mut scene, &mut rng);
        if before == GameStatus::Over && scene.status() == GameStatus::Idle {
            last_x.clear();
        }
        pilot(&mut scene, &mut rng);
        let was_running = scene.status() != GameStatus::Over;
        scene.update(&mut rng);

        let current: HashMap<u64, (f64, f64)> = scene
            .pipes()
            .iter()
            .map(|p| (p.id, (p.center.x, p.size.width)))
            .collect();
        for pipe in scene.pipes() {
            assert!(pipe.center.x >= -pipe.size.width / 2.0);
        }
        for (id, (x, width)) in &last_x {
            if !current.contains_key(id) {
                assert!(was_running);
                assert!(x - speed < -width / 2.0, "pipe {} removed at x={}", id, x);
                removed += 1;
            }
        }
        last_x = current;
    }
    assert!(removed > 0);
}

// =============================================================================
// Meters
// =============================================================================

#[test]
fn test_meters_frozen_while_idle() {
    let (mut scene, mut rng) = seeded(1);
    for _ in 0..500 {
        scene.update(&mut rng);
        assert_eq!(scene.meters(), 0);
    }
    assert_eq!(scene.status(), GameStatus::Idle);
}

#[test]
fn test_meters_increment_once_per_running_tick() {
    let (mut scene, mut rng) = seeded(2);
    scene.touch(&mut rng);
    let mut previous = scene.meters();
    while scene.status() == GameStatus::Running && scene.tick_count() < 5_000 {
        pilot(&mut scene, &mut rng);
        scene.update(&mut rng);
        assert_eq!(scene.meters(), previous + 1);
        previous = scene.meters();
    }
    if scene.status() == GameStatus::Running {
        scene.did_begin(Contact::new(CategoryMask::BIRD, CategoryMask::PIPE));
    }

    let at_crash = scene.meters();
    assert!(at_crash > 0);
    for _ in 0..200 {
        scene.update(&mut rng);
        assert_eq!(scene.meters(), at_crash);
    }
}

// =============================================================================
// Game over
// =============================================================================

#[test]
fn test_floor_crash_ends_game_exactly_once() {
    let (mut scene, mut rng) = seeded(4);
    scene.touch(&mut rng);

    let mut game_overs = 0;
    for _ in 0..600 {
        game_overs += scene
            .update(&mut rng)
            .iter()
            .filter(|e| matches!(e, SceneEvent::GameOver { .. }))
            .count();
    }
    assert_eq!(game_overs, 1);
    assert_eq!(scene.status(), GameStatus::Over);
    // bird comes to rest on the floor
    assert!((scene.bird().frame().min_y() - scene.config().floor_height).abs() < 1e-9);
}

#[test]
fn test_pipe_crash_ends_game() {
    let config = GameConfig {
        gravity: 0.0,
        ..Default::default()
    };
    let mut scene = GameScene::new(config);
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    scene.touch(&mut rng);

    let mut crashed = false;
    for _ in 0..50_000 {
        if scene
            .update(&mut rng)
            .iter()
            .any(|e| matches!(e, SceneEvent::GameOver { .. }))
        {
            crashed = true;
            break;
        }
    }
    assert!(crashed);
    let bird = scene.bird().frame();
    assert!(scene.pipes().iter().any(|p| p.frame().touches(&bird)));
    assert!(bird.min_y() > scene.config().floor_height);
}

#[test]
fn test_repeated_fatal_contacts_report_once() {
    let (mut scene, mut rng) = seeded(5);
    scene.touch(&mut rng);
    let contact = Contact::new(CategoryMask::PIPE, CategoryMask::BIRD);
    assert!(matches!(
        scene.did_begin(contact),
        Some(SceneEvent::GameOver { .. })
    ));
    assert!(scene.did_begin(contact).is_none());
    assert!(scene
        .did_begin(Contact::new(CategoryMask::BIRD, CategoryMask::FLOOR))
        .is_none());
    assert_eq!(scene.status(), GameStatus::Over);
}

// =============================================================================
// Restart and status cycle
// =============================================================================

#[test]
fn test_restart_clears_pipes_and_meters() {
    let (mut scene, mut rng) = seeded(6);
    scene.touch(&mut rng);
    while scene.status() == GameStatus::Running {
        scene.update(&mut rng);
    }
    assert!(scene.meters() > 0);

    // taps are ignored until the banner lands
    assert!(scene.touch(&mut rng).is_none());
    while !scene.interaction_enabled() {
        scene.update(&mut rng);
    }
    assert_eq!(scene.touch(&mut rng), Some(SceneEvent::Restarted));
    assert_eq!(scene.status(), GameStatus::Idle);
    assert_eq!(scene.meters(), 0);
    assert!(scene.pipes().is_empty());
    assert!(scene.banner().is_none());
    assert!(!scene.bird().dynamic);
    assert_eq!(scene.bird().position.y, scene.config().scene_height / 2.0);
}

#[test]
fn test_status_changes_follow_cycle() {
    let (mut scene, mut rng) = seeded(7);
    let mut status = scene.status();
    let mut games = 0;

    for _ in 0..30_000 {
        restart_when_possible(&mut scene, &mut rng);
        if scene.status() != status {
            assert!(status.can_transition_to(scene.status()));
            status = scene.status();
        }
        hover(&mut scene, &mut rng);
        scene.update(&mut rng);
        if scene.status() != status {
            assert!(status.can_transition_to(scene.status()));
            if scene.status() == GameStatus::Over {
                games += 1;
            }
            status = scene.status();
        }
    }
    assert!(games > 1);
}

#[test]
fn test_same_seed_replays_identically() {
    let play = |seed| {
        let (mut scene, mut rng) = seeded(seed);
        scene.touch(&mut rng);
        while scene.status() == GameStatus::Running && scene.tick_count() < 20_000 {
            pilot(&mut scene, &mut rng);
            scene.update(&mut rng);
        }
        (scene.meters(), scene.pipes().len())
    };
    assert_eq!(play(99), play(99));
}
