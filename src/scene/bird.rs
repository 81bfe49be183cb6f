//! The player's bird: body state plus the looping flap animation.

use super::category::CategoryMask;
use super::geometry::{Rect, Size, Vec2};

/// Sprite frames of the bird.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdTexture {
    Player1,
    Player2,
    Player3,
}

/// Wing cycle: up, level, down, level.
pub const FLY_SEQUENCE: [BirdTexture; 4] = [
    BirdTexture::Player1,
    BirdTexture::Player2,
    BirdTexture::Player3,
    BirdTexture::Player2,
];

/// Repeating texture animation keyed "fly".
#[derive(Debug, Clone)]
pub struct FlyAnimation {
    ticks_per_frame: u32,
    elapsed: u32,
    running: bool,
    texture: BirdTexture,
}

impl FlyAnimation {
    pub fn new(ticks_per_frame: u32) -> Self {
        Self {
            ticks_per_frame: ticks_per_frame.max(1),
            elapsed: 0,
            running: false,
            texture: FLY_SEQUENCE[0],
        }
    }

    /// Restart from the first frame.
    pub fn start(&mut self) {
        self.running = true;
        self.elapsed = 0;
        self.texture = FLY_SEQUENCE[0];
    }

    /// Freeze on whatever frame is showing.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn texture(&self) -> BirdTexture {
        self.texture
    }

    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.elapsed = self.elapsed.wrapping_add(1);
        let frame = (self.elapsed / self.ticks_per_frame) as usize % FLY_SEQUENCE.len();
        self.texture = FLY_SEQUENCE[frame];
    }
}

#[derive(Debug, Clone)]
pub struct Bird {
    /// Centre of the sprite.
    pub position: Vec2,
    /// Vertical velocity in points/s; positive is up.
    pub velocity: f64,
    pub size: Size,
    /// Non-dynamic bodies ignore gravity and impulses.
    pub dynamic: bool,
    pub animation: FlyAnimation,
}

impl Bird {
    pub const CATEGORY: CategoryMask = CategoryMask::BIRD;

    pub fn new(position: Vec2, size: Size, ticks_per_frame: u32) -> Self {
        Self {
            position,
            velocity: 0.0,
            size,
            dynamic: false,
            animation: FlyAnimation::new(ticks_per_frame),
        }
    }

    /// Categories whose contact with the bird is reported.
    pub fn contact_test_mask() -> CategoryMask {
        CategoryMask::FLOOR.union(CategoryMask::PIPE)
    }

    pub fn frame(&self) -> Rect {
        Rect::centered(self.position, self.size)
    }

    /// Add upward velocity, capped at `max_rise`. No effect on a static body.
    pub fn apply_impulse(&mut self, dv: f64, max_rise: f64) {
        if !self.dynamic {
            return;
        }
        self.velocity = (self.velocity + dv).min(max_rise);
    }

    /// Park the bird at `position` as a static, motionless body.
    pub fn reset_to(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = 0.0;
        self.dynamic = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_cycles_through_sequence() {
        let mut anim = FlyAnimation::new(2);
        anim.start();
        let mut seen = vec![anim.texture()];
        for _ in 0..8 {
            anim.tick();
            seen.push(anim.texture());
        }
        assert_eq!(
            seen,
            vec![
                BirdTexture::Player1,
                BirdTexture::Player1,
                BirdTexture::Player2,
                BirdTexture::Player2,
                BirdTexture::Player3,
                BirdTexture::Player3,
                BirdTexture::Player2,
                BirdTexture::Player2,
                BirdTexture::Player1,
            ]
        );
    }

    #[test]
    fn test_stopped_animation_holds_frame() {
        let mut anim = FlyAnimation::new(1);
        anim.start();
        anim.tick();
        anim.tick();
        let held = anim.texture();
        anim.stop();
        for _ in 0..5 {
            anim.tick();
        }
        assert_eq!(anim.texture(), held);
        assert!(!anim.is_running());
    }

    #[test]
    fn test_impulse_ignored_when_static() {
        let mut bird = Bird::new(Vec2::new(10.0, 10.0), Size::new(34.0, 24.0), 9);
        bird.apply_impulse(100.0, 200.0);
        assert_eq!(bird.velocity, 0.0);
    }

    #[test]
    fn test_impulse_is_additive_and_capped() {
        let mut bird = Bird::new(Vec2::new(10.0, 10.0), Size::new(34.0, 24.0), 9);
        bird.dynamic = true;
        bird.velocity = -50.0;
        bird.apply_impulse(100.0, 200.0);
        assert!((bird.velocity - 50.0).abs() < f64::EPSILON);
        bird.apply_impulse(500.0, 200.0);
        assert!((bird.velocity - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_contact_mask_covers_pipes_and_floor() {
        let mask = Bird::contact_test_mask();
        assert!(mask.intersects(CategoryMask::PIPE));
        assert!(mask.intersects(CategoryMask::FLOOR));
        assert!(!mask.intersects(CategoryMask::BIRD));
    }
}
