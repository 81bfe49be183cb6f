//! Collision categories and the contact predicate.

/// Collision class bitmask attached to every physics body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryMask(pub u32);

impl CategoryMask {
    pub const BIRD: CategoryMask = CategoryMask(1 << 0);
    pub const PIPE: CategoryMask = CategoryMask(1 << 1);
    pub const FLOOR: CategoryMask = CategoryMask(1 << 2);
    /// Untagged bodies (the scene's edge loop) belong to every category.
    pub const EDGE: CategoryMask = CategoryMask(u32::MAX);
    pub const NONE: CategoryMask = CategoryMask(0);

    pub fn union(self, other: CategoryMask) -> CategoryMask {
        CategoryMask(self.0 | other.0)
    }

    pub fn intersects(self, other: CategoryMask) -> bool {
        self.0 & other.0 != 0
    }
}

/// A contact-begin notification between two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub body_a: CategoryMask,
    pub body_b: CategoryMask,
}

impl Contact {
    pub fn new(body_a: CategoryMask, body_b: CategoryMask) -> Self {
        Self { body_a, body_b }
    }

    /// Both bodies ordered by ascending bitmask.
    pub fn ordered(&self) -> (CategoryMask, CategoryMask) {
        if self.body_a < self.body_b {
            (self.body_a, self.body_b)
        } else {
            (self.body_b, self.body_a)
        }
    }

    /// True when the bird hit a pipe or the floor.
    pub fn is_fatal(&self) -> bool {
        let (lower, higher) = self.ordered();
        lower == CategoryMask::BIRD
            && (higher == CategoryMask::PIPE || higher == CategoryMask::FLOOR)
    }
}
