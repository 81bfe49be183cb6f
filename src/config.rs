//! Tunable game parameters.
//!
//! Every size, speed and timing the scene uses lives here so it can be
//! overridden from `~/.flappy/config.json` or `--config PATH`.

use crate::constants::*;
use crate::persistence;
use crate::scene::geometry::Size;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

/// Reasons a configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("floor height {floor_height} leaves no playfield in a scene {scene_height} tall")]
    FloorTooTall { floor_height: f64, scene_height: f64 },

    #[error("floor width {floor_width} is narrower than the scene ({scene_width}); scrolling would show a seam")]
    FloorTooNarrow { floor_width: f64, scene_width: f64 },

    #[error("largest pipe gap {max_gap} does not fit the {playfield} point playfield")]
    GapDoesNotFit { max_gap: f64, playfield: f64 },

    #[error("ticks_per_second must be at least 1")]
    ZeroTickRate,

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<ConfigError> for io::Error {
    fn from(err: ConfigError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub scene_width: f64,
    pub scene_height: f64,
    pub floor_width: f64,
    pub floor_height: f64,
    pub bird_width: f64,
    pub bird_height: f64,
    pub pipe_width: f64,

    /// Vertical acceleration in points/s² (negative pulls down).
    pub gravity: f64,
    /// Upward velocity added per tap, points/s.
    pub flap_impulse: f64,
    pub max_rise_speed: f64,
    pub max_fall_speed: f64,
    /// Horizontal scroll in points per tick.
    pub scroll_speed: f64,

    /// Mean wait between pipe spawns.
    pub spawn_wait_secs: f64,
    /// Full width of the uniform window around `spawn_wait_secs`.
    pub spawn_wait_range_secs: f64,
    pub fly_frame_secs: f64,
    pub banner_slide_secs: f64,

    pub ticks_per_second: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            scene_width: SCENE_WIDTH,
            scene_height: SCENE_HEIGHT,
            floor_width: FLOOR_WIDTH,
            floor_height: FLOOR_HEIGHT,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            pipe_width: PIPE_WIDTH,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            max_rise_speed: MAX_RISE_SPEED,
            max_fall_speed: MAX_FALL_SPEED,
            scroll_speed: SCROLL_SPEED,
            spawn_wait_secs: SPAWN_WAIT_SECONDS,
            spawn_wait_range_secs: SPAWN_WAIT_RANGE_SECONDS,
            fly_frame_secs: FLY_FRAME_SECONDS,
            banner_slide_secs: BANNER_SLIDE_SECONDS,
            ticks_per_second: TICKS_PER_SECOND,
        }
    }
}

impl GameConfig {
    pub fn scene_size(&self) -> Size {
        Size::new(self.scene_width, self.scene_height)
    }

    pub fn floor_size(&self) -> Size {
        Size::new(self.floor_width, self.floor_height)
    }

    pub fn bird_size(&self) -> Size {
        Size::new(self.bird_width, self.bird_height)
    }

    /// Height available to pipes and gap: scene minus floor.
    pub fn playfield_height(&self) -> f64 {
        self.scene_height - self.floor_height
    }

    /// Smallest gap a pipe pair can be generated with.
    pub fn min_pipe_gap(&self) -> f64 {
        self.bird_height * PIPE_GAP_MIN_FACTOR
    }

    /// Exclusive upper bound on generated gaps.
    pub fn max_pipe_gap(&self) -> f64 {
        self.bird_height * (PIPE_GAP_MIN_FACTOR + PIPE_GAP_RANGE_FACTOR)
    }

    /// Fixed simulation step in seconds.
    pub fn tick_secs(&self) -> f64 {
        1.0 / self.ticks_per_second.max(1) as f64
    }

    /// Converts a duration to whole ticks, never less than one.
    pub fn secs_to_ticks(&self, secs: f64) -> u32 {
        ((secs * self.ticks_per_second as f64).round() as u32).max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("scene_width", self.scene_width),
            ("scene_height", self.scene_height),
            ("floor_width", self.floor_width),
            ("floor_height", self.floor_height),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("pipe_width", self.pipe_width),
            ("flap_impulse", self.flap_impulse),
            ("max_rise_speed", self.max_rise_speed),
            ("max_fall_speed", self.max_fall_speed),
            ("scroll_speed", self.scroll_speed),
            ("spawn_wait_secs", self.spawn_wait_secs),
            ("fly_frame_secs", self.fly_frame_secs),
            ("banner_slide_secs", self.banner_slide_secs),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.spawn_wait_range_secs < 0.0 || self.spawn_wait_range_secs / 2.0 >= self.spawn_wait_secs {
            return Err(ConfigError::NonPositive {
                field: "spawn_wait_secs - spawn_wait_range_secs / 2",
                value: self.spawn_wait_secs - self.spawn_wait_range_secs / 2.0,
            });
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.floor_height >= self.scene_height {
            return Err(ConfigError::FloorTooTall {
                floor_height: self.floor_height,
                scene_height: self.scene_height,
            });
        }
        if self.floor_width < self.scene_width {
            return Err(ConfigError::FloorTooNarrow {
                floor_width: self.floor_width,
                scene_width: self.scene_width,
            });
        }
        if self.max_pipe_gap() > self.playfield_height() {
            return Err(ConfigError::GapDoesNotFit {
                max_gap: self.max_pipe_gap(),
                playfield: self.playfield_height(),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path. A missing file is an error here.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Load `~/.flappy/config.json`, falling back to defaults when absent.
    pub fn load() -> io::Result<Self> {
        let path = persistence::save_path(CONFIG_FILE)?;
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::load_from(&path)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Write this config to `~/.flappy/config.json`.
    pub fn save(&self) -> io::Result<()> {
        persistence::save_json(CONFIG_FILE, self)
    }
}
