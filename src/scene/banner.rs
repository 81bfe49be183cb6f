//! "Game Over" label sliding in from the top of the scene.

#[derive(Debug, Clone)]
pub struct GameOverBanner {
    start_y: f64,
    end_y: f64,
    duration_ticks: u32,
    elapsed: u32,
}

impl GameOverBanner {
    pub const TEXT: &'static str = "Game Over";

    pub fn new(start_y: f64, end_y: f64, duration_ticks: u32) -> Self {
        Self {
            start_y,
            end_y,
            duration_ticks: duration_ticks.max(1),
            elapsed: 0,
        }
    }

    /// Current label y in scene points.
    pub fn y(&self) -> f64 {
        let t = self.elapsed as f64 / self.duration_ticks as f64;
        self.start_y + (self.end_y - self.start_y) * t
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration_ticks
    }

    /// Advance the slide. Returns true on the tick it completes.
    pub fn tick(&mut self) -> bool {
        if self.is_settled() {
            return false;
        }
        self.elapsed += 1;
        self.is_settled()
    }
}
