//! Gated obstacles: pair generation, the repeating spawn action and
//! scroll-off removal.

use super::category::CategoryMask;
use super::geometry::{Rect, Size, Vec2};
use crate::config::GameConfig;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeKind {
    Top,
    Bottom,
}

/// One pipe sprite. Pairs share an x position but are independent bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub id: u64,
    pub kind: PipeKind,
    pub center: Vec2,
    pub size: Size,
}

impl Pipe {
    pub const CATEGORY: CategoryMask = CategoryMask::PIPE;

    pub fn frame(&self) -> Rect {
        Rect::centered(self.center, self.size)
    }

    /// Fully past the left edge of the screen.
    pub fn is_offscreen(&self) -> bool {
        self.center.x < -self.size.width / 2.0
    }
}

/// Uniform draw in `0..n`, zero when `n` is zero.
fn uniform_below<R: Rng>(rng: &mut R, n: u32) -> u32 {
    if n == 0 {
        0
    } else {
        rng.gen_range(0..n)
    }
}

/// Vertical layout of a pipe pair. `top + gap + bottom` is the playfield height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipePair {
    pub top: f64,
    pub gap: f64,
    pub bottom: f64,
}

impl PipePair {
    pub fn generate<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let height = config.playfield_height();
        let gap = uniform_below(rng, config.bird_height as u32) as f64 + config.min_pipe_gap();
        let top = uniform_below(rng, (height - gap).max(0.0) as u32) as f64;
        let bottom = height - gap - top;
        Self { top, gap, bottom }
    }

    /// Build both sprites just beyond the right edge of the scene.
    pub fn sprites(&self, config: &GameConfig, top_id: u64, bottom_id: u64) -> [Pipe; 2] {
        let width = config.pipe_width;
        let x = config.scene_width + width / 2.0;
        [
            Pipe {
                id: top_id,
                kind: PipeKind::Top,
                center: Vec2::new(x, config.scene_height - self.top / 2.0),
                size: Size::new(width, self.top),
            },
            Pipe {
                id: bottom_id,
                kind: PipeKind::Bottom,
                center: Vec2::new(x, config.floor_height + self.bottom / 2.0),
                size: Size::new(width, self.bottom),
            },
        ]
    }

    /// Scene y range of the opening.
    pub fn gap_span(&self, config: &GameConfig) -> (f64, f64) {
        let low = config.floor_height + self.bottom;
        (low, low + self.gap)
    }
}

/// Repeating `wait(duration ± range/2) → spawn` action.
#[derive(Debug, Clone)]
pub struct PipeSpawner {
    min_wait: u32,
    max_wait: u32,
    remaining: Option<u32>,
}

impl PipeSpawner {
    pub fn new(config: &GameConfig) -> Self {
        let half = config.spawn_wait_range_secs / 2.0;
        let min_wait = config.secs_to_ticks(config.spawn_wait_secs - half);
        let max_wait = config.secs_to_ticks(config.spawn_wait_secs + half).max(min_wait);
        Self {
            min_wait,
            max_wait,
            remaining: None,
        }
    }

    pub fn wait_bounds(&self) -> (u32, u32) {
        (self.min_wait, self.max_wait)
    }

    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    /// Ticks until the next spawn, if running.
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    pub fn start<R: Rng>(&mut self, rng: &mut R) {
        self.remaining = Some(self.draw_wait(rng));
    }

    pub fn stop(&mut self) {
        self.remaining = None;
    }

    /// Advance one tick. Returns true when a pair should be spawned now.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        if remaining <= 1 {
            self.remaining = Some(self.draw_wait(rng));
            true
        } else {
            self.remaining = Some(remaining - 1);
            false
        }
    }

    fn draw_wait<R: Rng>(&self, rng: &mut R) -> u32 {
        if self.min_wait == self.max_wait {
            self.min_wait
        } else {
            rng.gen_range(self.min_wait..=self.max_wait)
        }
    }
}

/// Shift every pipe left by `dx` and drop the ones that left the screen.
pub fn scroll_pipes(pipes: &mut Vec<Pipe>, dx: f64) {
    for pipe in pipes.iter_mut() {
        pipe.center.x -= dx;
    }
    pipes.retain(|p| !p.is_offscreen());
}
