//! Pool manager: the undealt and returned tiles.
//!
//! The `Pool` owns every tile not currently in a hand or on the board.
//! It supports:
//! - Deterministic deck construction and shuffling
//! - Dealing opening hands
//! - Single and paired draws (the paired draw backs the keep-one-of-two rule)
//! - Returning an unchosen tile, which triggers a reshuffle

use log::debug;

use crate::core::error::GameError;
use crate::core::rng::GameRng;
use crate::core::tile::{JokerColor, Tile, TileColor, DECK_SIZE, MAX_RANK, MIN_RANK};

/// Build the full 77-tile deck and shuffle it with `seed`.
///
/// ```
/// use rust_rummi::pool::create_deck;
///
/// let deck = create_deck(42);
/// assert_eq!(deck.len(), 77);
/// assert_eq!(deck, create_deck(42));
/// ```
#[must_use]
pub fn create_deck(seed: u64) -> Vec<Tile> {
    let mut deck = ordered_deck();
    GameRng::new(seed).for_context("deck").shuffle(&mut deck);
    deck
}

/// The canonical deck in id order, unshuffled.
#[must_use]
pub fn ordered_deck() -> Vec<Tile> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in TileColor::ALL {
        for rank in MIN_RANK..=MAX_RANK {
            deck.push(Tile::numbered(color, rank));
        }
    }
    deck.push(Tile::joker(JokerColor::Black));
    deck.push(Tile::joker(JokerColor::Red));
    deck
}

/// Unordered reservoir of tiles available for drawing.
///
/// Draws take from the end of the internal vec; order only matters for
/// reproducibility, never for rules.
#[derive(Clone, Debug)]
pub struct Pool {
    tiles: Vec<Tile>,
    rng: GameRng,
}

impl Pool {
    /// A full, shuffled pool for a new session.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::from_tiles(create_deck(seed), seed)
    }

    /// A pool holding exactly `tiles`, reshuffled later with `seed`.
    ///
    /// Useful for setting up specific situations (e.g. one tile left).
    #[must_use]
    pub fn from_tiles(tiles: Vec<Tile>, seed: u64) -> Self {
        Self {
            tiles,
            rng: GameRng::new(seed).for_context("pool"),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles currently in the pool.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Deal `hand_size` tiles to each of `player_count` hands, then
    /// reshuffle what is left.
    pub fn deal(&mut self, player_count: usize, hand_size: usize) -> Result<Vec<Vec<Tile>>, GameError> {
        let needed = player_count.saturating_mul(hand_size);
        if needed > self.tiles.len() {
            return Err(GameError::NotEnoughTiles {
                needed,
                available: self.tiles.len(),
            });
        }

        let hands = (0..player_count)
            .map(|_| {
                let split = self.tiles.len() - hand_size;
                self.tiles.split_off(split)
            })
            .collect();
        self.reshuffle();

        debug!(
            "Dealt {} hands of {}, {} tiles left in pool",
            player_count,
            hand_size,
            self.tiles.len()
        );
        Ok(hands)
    }

    /// Take one tile. `None` when the pool is empty.
    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    /// Take up to two tiles for a keep-one choice.
    ///
    /// With one tile left the second slot is `None`; with none left both are.
    pub fn draw_two(&mut self) -> [Option<Tile>; 2] {
        let first = self.tiles.pop();
        let second = first.and_then(|_| self.tiles.pop());
        [first, second]
    }

    /// Put a tile back and reshuffle.
    pub fn return_tile(&mut self, tile: Tile) {
        debug_assert!(
            !self.tiles.iter().any(|t| t.id == tile.id),
            "{} returned to a pool that already holds it",
            tile
        );
        self.tiles.push(tile);
        self.reshuffle();
    }

    fn reshuffle(&mut self) {
        self.rng.shuffle(&mut self.tiles);
    }
}
