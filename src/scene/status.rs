//! Game state machine.

use serde::{Deserialize, Serialize};

/// Top-level game status. Every per-tick and per-tap decision branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Bird hovers at the centre waiting for the first tap.
    #[default]
    Idle,
    /// Bird is under gravity, pipes spawn and meters accumulate.
    Running,
    /// Bird crashed. The scene is frozen until the player restarts.
    Over,
}

impl GameStatus {
    /// Successor in the idle → running → over → idle cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Idle => Self::Running,
            Self::Running => Self::Over,
            Self::Over => Self::Idle,
        }
    }

    /// Only single steps along the cycle are legal.
    pub fn can_transition_to(self, to: GameStatus) -> bool {
        self.next() == to
    }

    /// Whether the floor and pipes scroll this tick.
    pub fn scrolls(self) -> bool {
        self != Self::Over
    }

    /// Whether the meters counter advances this tick.
    pub fn counts_meters(self) -> bool {
        self == Self::Running
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Running => "Flying",
            Self::Over => "Game Over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle() {
        assert_eq!(GameStatus::Idle.next(), GameStatus::Running);
        assert_eq!(GameStatus::Running.next(), GameStatus::Over);
        assert_eq!(GameStatus::Over.next(), GameStatus::Idle);
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!GameStatus::Idle.can_transition_to(GameStatus::Over));
        assert!(!GameStatus::Running.can_transition_to(GameStatus::Idle));
        assert!(!GameStatus::Over.can_transition_to(GameStatus::Running));
        assert!(!GameStatus::Idle.can_transition_to(GameStatus::Idle));
    }

    #[test]
    fn test_tick_gates() {
        assert!(GameStatus::Idle.scrolls());
        assert!(GameStatus::Running.scrolls());
        assert!(!GameStatus::Over.scrolls());

        assert!(!GameStatus::Idle.counts_meters());
        assert!(GameStatus::Running.counts_meters());
        assert!(!GameStatus::Over.counts_meters());
    }
}
