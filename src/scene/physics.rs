//! Fixed-step physics for the scene: gravity on the bird, a solid edge loop
//! and floor, and contact-begin reporting against static bodies.

use super::bird::Bird;
use super::category::{CategoryMask, Contact};
use super::geometry::Rect;
use crate::config::GameConfig;
use std::collections::HashSet;

/// Identity of a static body, stable across ticks for contact tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyId {
    Edge,
    Floor(usize),
    Pipe(u64),
}

/// A non-dynamic body the bird can touch.
#[derive(Debug, Clone, Copy)]
pub struct StaticBody {
    pub id: BodyId,
    pub category: CategoryMask,
    pub frame: Rect,
    /// Solid bodies stop the bird; others only report contact.
    pub solid: bool,
}

#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    gravity: f64,
    max_fall_speed: f64,
    bounds: Rect,
    touching: HashSet<BodyId>,
}

impl PhysicsWorld {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            gravity: config.gravity,
            max_fall_speed: config.max_fall_speed,
            bounds: Rect::new(0.0, 0.0, config.scene_width, config.scene_height),
            touching: HashSet::new(),
        }
    }

    /// Forget ongoing contacts so the next touch fires again.
    pub fn reset_contacts(&mut self) {
        self.touching.clear();
    }

    pub fn is_touching(&self, id: BodyId) -> bool {
        self.touching.contains(&id)
    }

    /// Integrate the bird over `dt` seconds and return contacts that began.
    pub fn step(&mut self, bird: &mut Bird, bodies: &[StaticBody], dt: f64) -> Vec<Contact> {
        if !bird.dynamic {
            self.touching.clear();
            return Vec::new();
        }

        bird.velocity = (bird.velocity + self.gravity * dt).max(-self.max_fall_speed);
        bird.position.y += bird.velocity * dt;

        self.resolve_solids(bird, bodies);
        self.collect_contacts(bird, bodies)
    }

    fn resolve_solids(&self, bird: &mut Bird, bodies: &[StaticBody]) {
        let half_h = bird.size.height / 2.0;

        // Edge loop: the bird never leaves the frame.
        if bird.position.y + half_h > self.bounds.max_y() {
            bird.position.y = self.bounds.max_y() - half_h;
            bird.velocity = bird.velocity.min(0.0);
        }
        if bird.position.y - half_h < self.bounds.min_y() {
            bird.position.y = self.bounds.min_y() + half_h;
            bird.velocity = bird.velocity.max(0.0);
        }

        for body in bodies.iter().filter(|b| b.solid) {
            if bird.frame().overlaps(&body.frame) && bird.velocity <= 0.0 {
                bird.position.y = body.frame.max_y() + half_h;
                bird.velocity = 0.0;
            }
        }
    }

    fn collect_contacts(&mut self, bird: &Bird, bodies: &[StaticBody]) -> Vec<Contact> {
        let frame = bird.frame();
        let mask = Bird::contact_test_mask();
        let mut now_touching = HashSet::new();
        let mut began = Vec::new();

        let at_edge =
            frame.max_y() >= self.bounds.max_y() || frame.min_y() <= self.bounds.min_y();
        if at_edge {
            now_touching.insert(BodyId::Edge);
            if !self.touching.contains(&BodyId::Edge) && mask.intersects(CategoryMask::EDGE) {
                began.push(Contact::new(Bird::CATEGORY, CategoryMask::EDGE));
            }
        }

        for body in bodies {
            if !frame.touches(&body.frame) {
                continue;
            }
            now_touching.insert(body.id);
            if !self.touching.contains(&body.id) && mask.intersects(body.category) {
                began.push(Contact::new(Bird::CATEGORY, body.category));
            }
        }

        self.touching = now_touching;
        began
    }
}
