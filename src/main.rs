use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy::build_info;
use flappy::config::GameConfig;
use flappy::constants::{CONFIG_FILE, INPUT_POLL_MS, MAX_CATCHUP_TICKS, REALTIME_FRAME_MS};
use flappy::input::{map_key, PlayerInput};
use flappy::logging;
use flappy::persistence;
use flappy::records::{Records, RecordsManager};
use flappy::scene::{GameScene, SceneEvent};
use flappy::ui::render_scene;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::Backend;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Default)]
struct PlayOptions {
    seed: Option<u64>,
    config_path: Option<PathBuf>,
}

enum Command {
    Play(PlayOptions),
    InitConfig,
    ResetRecords,
    Version,
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = PlayOptions::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "init-config" => return Ok(Command::InitConfig),
            "reset-records" => return Ok(Command::ResetRecords),
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--seed" => {
                i += 1;
                let value = args.get(i).ok_or("--seed requires a number")?;
                options.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("--seed requires a number, got '{}'", value))?,
                );
            }
            "--config" => {
                i += 1;
                let value = args.get(i).ok_or("--config requires a path")?;
                options.config_path = Some(PathBuf::from(value));
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(Command::Play(options))
}

fn print_help() {
    println!("Flappy - Terminal Flappy Bird\n");
    println!("Usage: flappy [options] [command]\n");
    println!("Commands:");
    println!("  init-config    Write the default config to ~/.flappy/{}", CONFIG_FILE);
    println!("  reset-records  Forget the best run and play statistics");
    println!("\nOptions:");
    println!("  --seed N       Seed the pipe generator for a repeatable run");
    println!("  --config PATH  Load settings from PATH instead of ~/.flappy/");
    println!("  --version      Show version information");
    println!("  --help         Show this help message");
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Command::Play(options)) => options,
        Ok(Command::InitConfig) => {
            GameConfig::default().save()?;
            println!(
                "Wrote default config to {}",
                persistence::save_path(CONFIG_FILE)?.display()
            );
            return Ok(());
        }
        Ok(Command::ResetRecords) => {
            RecordsManager::new()?.reset()?;
            println!("Records cleared.");
            return Ok(());
        }
        Ok(Command::Version) => {
            println!("flappy {}", build_info::version_string());
            return Ok(());
        }
        Ok(Command::Help) => {
            print_help();
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'flappy --help' for usage.");
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init() {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    let config = match &options.config_path {
        Some(path) => GameConfig::load_from(path)?,
        None => GameConfig::load()?,
    };
    let records_manager = RecordsManager::new()?;
    let records = records_manager.load_or_default();
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!(
        "starting flappy {} (best {} meters)",
        build_info::version_string(),
        records.best_meters
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut session = Session {
        scene: GameScene::new(config),
        rng,
        records,
        records_manager,
        new_best: false,
    };
    let result = session.run(&mut terminal);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("exited with error: {}", e);
    }
    result
}

/// Everything the interactive loop mutates.
struct Session {
    scene: GameScene,
    rng: StdRng,
    records: Records,
    records_manager: RecordsManager,
    new_best: bool,
}

impl Session {
    fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let tick = Duration::from_secs_f64(self.scene.config().tick_secs());
        let frame_interval = Duration::from_millis(REALTIME_FRAME_MS);
        let mut last_tick = Instant::now();
        let mut last_draw: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        loop {
            if last_draw.map_or(true, |t| t.elapsed() >= frame_interval) {
                terminal.draw(|frame| {
                    let area = frame.size();
                    render_scene(frame, area, &self.scene, &self.records, self.new_best);
                })?;
                last_draw = Some(Instant::now());
            }

            if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
                if let Event::Key(key) = event::read()? {
                    match map_key(key) {
                        PlayerInput::Tap => {
                            if let Some(event) = self.scene.touch(&mut self.rng) {
                                self.handle_event(event);
                            }
                        }
                        PlayerInput::Quit => {
                            log::info!("quit at {} meters", self.scene.meters());
                            return Ok(());
                        }
                        PlayerInput::Other => {}
                    }
                }
            }

            let now = Instant::now();
            accumulated += now - last_tick;
            last_tick = now;

            let mut steps = 0;
            while accumulated >= tick && steps < MAX_CATCHUP_TICKS {
                accumulated -= tick;
                steps += 1;
                for event in self.scene.update(&mut self.rng) {
                    self.handle_event(event);
                }
            }
            if steps == MAX_CATCHUP_TICKS {
                // fell behind (suspended terminal); drop the backlog
                accumulated = Duration::ZERO;
            }
        }
    }

    fn handle_event(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::GameOver { meters } => {
                self.new_best = self.records.record_run(meters);
                if self.new_best {
                    log::info!("new best: {} meters", meters);
                }
                if let Err(e) = self.records_manager.save(&self.records) {
                    log::error!("failed to save records: {}", e);
                }
            }
            SceneEvent::Restarted => self.new_best = false,
            SceneEvent::PipesSpawned(_)
            | SceneEvent::Started
            | SceneEvent::Flapped
            | SceneEvent::InteractionEnabled => {}
        }
    }
}
