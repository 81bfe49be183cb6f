//! Flappy headless simulator
//!
//! Runs `GameScene::update` with no terminal, steering the bird with the
//! library autopilot. Useful for checking that a config is playable and for
//! reproducing a seed.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --ticks N       Tick limit per run (default: 36000 = 10 minutes)
//!   --seed N        RNG seed of the first run (default: 42)
//!   --runs N        Number of runs with incrementing seeds (default: 1)
//!   --config PATH   Load a config file instead of the defaults
//!   --idle          Never tap after starting (free fall baseline)
//!   --verbose       Log scene events to stderr
//!   --quiet         Only the final summary line

use flappy::autopilot;
use flappy::config::GameConfig;
use flappy::logging;
use flappy::scene::{GameScene, GameStatus, SceneEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    ticks: u64,
    seed: u64,
    runs: u32,
    config_path: Option<PathBuf>,
    idle: bool,
    verbose: bool,
    quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 36_000,
            seed: 42,
            runs: 1,
            config_path: None,
            idle: false,
            verbose: false,
            quiet: false,
        }
    }
}

fn take_value(args: &[String], i: &mut usize, name: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("{} requires a value", name))
}

fn parse_args() -> Result<SimConfig, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--ticks" => {
                config.ticks = take_value(&args, &mut i, "--ticks")?
                    .parse()
                    .map_err(|_| "--ticks requires a number")?;
            }
            "--seed" => {
                config.seed = take_value(&args, &mut i, "--seed")?
                    .parse()
                    .map_err(|_| "--seed requires a number")?;
            }
            "--runs" => {
                config.runs = take_value(&args, &mut i, "--runs")?
                    .parse()
                    .map_err(|_| "--runs requires a number")?;
            }
            "--config" => {
                config.config_path = Some(PathBuf::from(take_value(&args, &mut i, "--config")?));
            }
            "--idle" => config.idle = true,
            "--verbose" => config.verbose = true,
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(config)
}

fn print_usage() {
    eprintln!(
        "Flappy Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --ticks N       Tick limit per run (default: 36000)\n\
         \x20 --seed N        RNG seed (default: 42)\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 1)\n\
         \x20 --config PATH   Load a config file instead of the defaults\n\
         \x20 --idle          Never tap after starting\n\
         \x20 --verbose       Log scene events to stderr\n\
         \x20 --quiet         Only final summary line\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Simulation ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct RunStats {
    meters: u64,
    ticks: u64,
    flaps: u64,
    pipes_spawned: u64,
    crashed: bool,
}

fn simulate_run(game_config: &GameConfig, sim: &SimConfig, seed: u64) -> RunStats {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut scene = GameScene::new(game_config.clone());
    let mut stats = RunStats::default();

    scene.touch(&mut rng);
    while stats.ticks < sim.ticks {
        if !sim.idle && scene.status() == GameStatus::Running && autopilot::should_flap(&scene) {
            if let Some(SceneEvent::Flapped) = scene.touch(&mut rng) {
                stats.flaps += 1;
            }
        }
        for event in scene.update(&mut rng) {
            match event {
                SceneEvent::PipesSpawned(pair) => {
                    stats.pipes_spawned += 1;
                    log::debug!("tick {}: pipes gap={}", stats.ticks, pair.gap);
                }
                SceneEvent::GameOver { meters } => {
                    stats.crashed = true;
                    log::debug!("tick {}: crashed at {} meters", stats.ticks, meters);
                }
                _ => {}
            }
        }
        stats.ticks += 1;
        if stats.crashed {
            break;
        }
    }
    stats.meters = scene.meters();
    stats
}

fn main() {
    let sim = match parse_args() {
        Ok(sim) => sim,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            std::process::exit(1);
        }
    };
    logging::init_stderr(if sim.verbose { "debug" } else { "warn" });

    let game_config = match &sim.config_path {
        Some(path) => match GameConfig::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let mut all = Vec::with_capacity(sim.runs as usize);
    for run in 0..sim.runs {
        let seed = sim.seed + run as u64;
        let stats = simulate_run(&game_config, &sim, seed);
        if !sim.quiet {
            println!(
                "run {:>3} seed={:<6} meters={:<7} pipes={:<4} flaps={:<5} {}",
                run + 1,
                seed,
                stats.meters,
                stats.pipes_spawned,
                stats.flaps,
                if stats.crashed { "crashed" } else { "timeout" }
            );
        }
        all.push(stats);
    }

    let total: u64 = all.iter().map(|s| s.meters).sum();
    let best = all.iter().map(|s| s.meters).max().unwrap_or(0);
    let crashes = all.iter().filter(|s| s.crashed).count();
    let avg = if all.is_empty() {
        0
    } else {
        total / all.len() as u64
    };
    println!(
        "runs={} avg_meters={} best_meters={} crashes={}",
        all.len(),
        avg,
        best,
        crashes
    );
}
