//! Game configuration.
//!
//! A `GameConfig` fixes the table size, the deal, the opening threshold,
//! and the shuffle seed. Everything else about a session is derived.

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::tile::DECK_SIZE;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 8;

/// Points a player's first placement must reach.
pub const INITIAL_MELD_POINTS: u32 = 30;

/// Configuration for a single session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2-8).
    pub player_count: usize,

    /// Tiles dealt to each player at the start.
    pub hand_size: usize,

    /// Points needed to break the ice.
    pub initial_meld_points: u32,

    /// Seed for the deck shuffle and every later pool reshuffle.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            hand_size: 10,
            initial_meld_points: INITIAL_MELD_POINTS,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Create the default configuration with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    #[must_use]
    pub fn with_initial_meld_points(mut self, points: u32) -> Self {
        self.initial_meld_points = points;
        self
    }

    /// Check the table can actually be dealt.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(GameError::InvalidPlayerCount(self.player_count));
        }
        let needed = self.player_count.saturating_mul(self.hand_size);
        if needed > DECK_SIZE {
            return Err(GameError::NotEnoughTiles {
                needed,
                available: DECK_SIZE,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new(9);
        assert_eq!(config.player_count, 4);
        assert_eq!(config.hand_size, 10);
        assert_eq!(config.initial_meld_points, 30);
        assert_eq!(config.seed, 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new(1)
            .with_player_count(2)
            .with_hand_size(14)
            .with_initial_meld_points(25);

        assert_eq!(config.player_count, 2);
        assert_eq!(config.hand_size, 14);
        assert_eq!(config.initial_meld_points, 25);
    }

    #[test]
    fn test_validate_player_count() {
        assert_eq!(
            GameConfig::new(0).with_player_count(1).validate(),
            Err(GameError::InvalidPlayerCount(1))
        );
        assert_eq!(
            GameConfig::new(0).with_player_count(9).validate(),
            Err(GameError::InvalidPlayerCount(9))
        );
    }

    #[test]
    fn test_validate_deal_size() {
        let config = GameConfig::new(0).with_player_count(8).with_hand_size(10);
        assert_eq!(
            config.validate(),
            Err(GameError::NotEnoughTiles {
                needed: 80,
                available: 77
            })
        );
    }

    #[test]
    fn test_validate_huge_hand() {
        let config = GameConfig::new(0).with_hand_size(usize::MAX);
        assert_eq!(
            config.validate(),
            Err(GameError::NotEnoughTiles {
                needed: usize::MAX,
                available: 77
            })
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::new(5).with_player_count(3);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
