//! The scene controller: owns every entity, reacts to taps, frame ticks and
//! contact callbacks, and drives the idle → running → over cycle.

use super::banner::GameOverBanner;
use super::bird::Bird;
use super::category::Contact;
use super::floor::{self, FloorTile};
use super::geometry::Vec2;
use super::physics::{BodyId, PhysicsWorld, StaticBody};
use super::pipes::{self, Pipe, PipeKind, PipePair, PipeSpawner};
use super::status::GameStatus;
use crate::config::GameConfig;
use rand::Rng;

/// Notable things that happened during a tap or a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    Started,
    Flapped,
    PipesSpawned(PipePair),
    GameOver { meters: u64 },
    /// Banner settled; taps are accepted again.
    InteractionEnabled,
    Restarted,
}

#[derive(Debug, Clone)]
pub struct GameScene {
    config: GameConfig,
    status: GameStatus,
    bird: Bird,
    floors: [FloorTile; 2],
    pipes: Vec<Pipe>,
    spawner: PipeSpawner,
    physics: PhysicsWorld,
    banner: Option<GameOverBanner>,
    interaction_enabled: bool,
    meters: u64,
    next_pipe_id: u64,
    tick_count: u64,
}

impl GameScene {
    /// Build the floor and bird and put the scene in its idle state.
    pub fn new(config: GameConfig) -> Self {
        let fly_ticks = config.secs_to_ticks(config.fly_frame_secs);
        let center = Vec2::new(config.scene_width / 2.0, config.scene_height / 2.0);
        let mut scene = Self {
            status: GameStatus::Idle,
            bird: Bird::new(center, config.bird_size(), fly_ticks),
            floors: floor::initial_tiles(config.floor_size()),
            pipes: Vec::new(),
            spawner: PipeSpawner::new(&config),
            physics: PhysicsWorld::new(&config),
            banner: None,
            interaction_enabled: true,
            meters: 0,
            next_pipe_id: 0,
            tick_count: 0,
            config,
        };
        scene.reset_entities();
        scene
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn meters(&self) -> u64 {
        self.meters
    }

    pub fn meters_label(&self) -> String {
        format!("meters:{}", self.meters)
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn floors(&self) -> &[FloorTile; 2] {
        &self.floors
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn banner(&self) -> Option<&GameOverBanner> {
        self.banner.as_ref()
    }

    pub fn spawner(&self) -> &PipeSpawner {
        &self.spawner
    }

    pub fn interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    fn set_status(&mut self, to: GameStatus) {
        debug_assert!(self.status.can_transition_to(to));
        log::debug!("status {:?} -> {:?}", self.status, to);
        self.status = to;
    }

    fn reset_entities(&mut self) {
        self.pipes.clear();
        self.banner = None;
        self.bird.reset_to(Vec2::new(
            self.config.scene_width / 2.0,
            self.config.scene_height / 2.0,
        ));
        self.physics.reset_contacts();
        self.meters = 0;
        self.bird.animation.start();
    }

    /// Restart after a game over: clear pipes, recentre the bird, zero meters.
    pub fn shuffle(&mut self) -> Option<SceneEvent> {
        if self.status != GameStatus::Over {
            return None;
        }
        self.set_status(GameStatus::Idle);
        self.reset_entities();
        log::info!("scene reset");
        Some(SceneEvent::Restarted)
    }

    /// Release the bird and begin spawning pipes.
    pub fn start_game<R: Rng>(&mut self, rng: &mut R) -> Option<SceneEvent> {
        if self.status != GameStatus::Idle {
            return None;
        }
        self.set_status(GameStatus::Running);
        self.bird.dynamic = true;
        self.spawner.start(rng);
        log::info!("game started");
        Some(SceneEvent::Started)
    }

    /// Freeze the scene and slide in the banner. Taps are ignored until it lands.
    pub fn game_over(&mut self) -> Option<SceneEvent> {
        if self.status != GameStatus::Running {
            return None;
        }
        self.set_status(GameStatus::Over);
        self.spawner.stop();
        self.bird.animation.stop();
        self.interaction_enabled = false;
        self.banner = Some(GameOverBanner::new(
            self.config.scene_height,
            self.config.scene_height / 2.0,
            self.config.secs_to_ticks(self.config.banner_slide_secs),
        ));
        log::info!("game over at {} meters", self.meters);
        Some(SceneEvent::GameOver {
            meters: self.meters,
        })
    }

    /// Player tap: start, flap or restart depending on status.
    pub fn touch<R: Rng>(&mut self, rng: &mut R) -> Option<SceneEvent> {
        if !self.interaction_enabled {
            return None;
        }
        match self.status {
            GameStatus::Idle => self.start_game(rng),
            GameStatus::Running => {
                self.bird
                    .apply_impulse(self.config.flap_impulse, self.config.max_rise_speed);
                Some(SceneEvent::Flapped)
            }
            GameStatus::Over => self.shuffle(),
        }
    }

    /// Contact-begin callback. Ends the run when the bird hits a pipe or the floor.
    pub fn did_begin(&mut self, contact: Contact) -> Option<SceneEvent> {
        if self.status != GameStatus::Running {
            return None;
        }
        if contact.is_fatal() {
            self.game_over()
        } else {
            None
        }
    }

    /// Advance one frame: scroll and count, run scheduled actions, then
    /// simulate physics and dispatch contacts.
    pub fn update<R: Rng>(&mut self, rng: &mut R) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        self.tick_count += 1;

        if self.status.scrolls() {
            self.move_scene();
        }
        if self.status.counts_meters() {
            self.meters += 1;
        }

        if self.spawner.tick(rng) {
            events.push(self.create_random_pipes(rng));
        }
        self.bird.animation.tick();
        if let Some(banner) = self.banner.as_mut() {
            if banner.tick() {
                self.interaction_enabled = true;
                events.push(SceneEvent::InteractionEnabled);
            }
        }

        let bodies = self.static_bodies();
        let dt = self.config.tick_secs();
        for contact in self.physics.step(&mut self.bird, &bodies, dt) {
            events.extend(self.did_begin(contact));
        }

        events
    }

    fn move_scene(&mut self) {
        let dx = self.config.scroll_speed;
        floor::scroll_tiles(&mut self.floors, dx);
        pipes::scroll_pipes(&mut self.pipes, dx);
    }

    fn create_random_pipes<R: Rng>(&mut self, rng: &mut R) -> SceneEvent {
        let pair = PipePair::generate(&self.config, rng);
        let top_id = self.next_pipe_id;
        self.next_pipe_id += 2;
        self.pipes
            .extend(pair.sprites(&self.config, top_id, top_id + 1));
        log::debug!(
            "pipes spawned: top={} gap={} bottom={}",
            pair.top,
            pair.gap,
            pair.bottom
        );
        SceneEvent::PipesSpawned(pair)
    }

    fn static_bodies(&self) -> Vec<StaticBody> {
        let floors = self
            .floors
            .iter()
            .enumerate()
            .map(|(i, tile)| StaticBody {
                id: BodyId::Floor(i),
                category: FloorTile::CATEGORY,
                frame: tile.frame(),
                solid: true,
            });
        let pipes = self.pipes.iter().map(|pipe| StaticBody {
            id: BodyId::Pipe(pipe.id),
            category: Pipe::CATEGORY,
            frame: pipe.frame(),
            solid: false,
        });
        floors.chain(pipes).collect()
    }

    /// Opening of the nearest pipe pair the bird has not yet cleared, as
    /// `(low, high)` scene y values.
    pub fn upcoming_gap(&self) -> Option<(f64, f64)> {
        let bird_left = self.bird.frame().min_x();
        let bottom = self
            .pipes
            .iter()
            .filter(|p| p.kind == PipeKind::Bottom && p.frame().max_x() >= bird_left)
            .min_by(|a, b| a.center.x.total_cmp(&b.center.x))?;
        let top = self
            .pipes
            .iter()
            .find(|p| p.kind == PipeKind::Top && p.id + 1 == bottom.id)?;
        Some((bottom.frame().max_y(), top.frame().min_y()))
    }
}
