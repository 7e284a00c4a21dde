//! Player identification, per-seat storage, and the `Player` record.
//!
//! ## PlayerId
//!
//! 0-based seat index. Turn order is seat order.
//!
//! ## PlayerMap
//!
//! One entry per seat, backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## Player
//!
//! A hand of tiles plus the one-way "ice broken" flag.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::tile::{Tile, TileId};

/// Seat identifier. The first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that plays after this one.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all seats for a game with `player_count` players.
    ///
    /// ```
    /// use rust_rummi::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use rust_rummi::core::{PlayerId, PlayerMap};
///
/// let mut drawn: PlayerMap<u32> = PlayerMap::new(4, |_| 0);
/// drawn[PlayerId::new(2)] += 1;
/// assert_eq!(drawn[PlayerId::new(2)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Build from one value per seat, in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// One seat at the table.
///
/// `ice_broken` flips from `false` to `true` at most once and never reverts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    hand: Vec<Tile>,
    ice_broken: bool,
}

impl Player {
    #[must_use]
    pub fn with_hand(hand: Vec<Tile>) -> Self {
        Self {
            hand,
            ice_broken: false,
        }
    }

    /// Tiles in hand, in hand order.
    #[must_use]
    pub fn hand(&self) -> &[Tile] {
        &self.hand
    }

    #[must_use]
    pub fn ice_broken(&self) -> bool {
        self.ice_broken
    }

    /// Record that the initial-meld threshold has been met.
    pub fn break_ice(&mut self) {
        self.ice_broken = true;
    }

    #[must_use]
    pub fn holds(&self, id: TileId) -> bool {
        self.hand.iter().any(|t| t.id == id)
    }

    #[must_use]
    pub fn find(&self, id: TileId) -> Option<Tile> {
        self.hand.iter().copied().find(|t| t.id == id)
    }

    pub fn add(&mut self, tile: Tile) {
        self.hand.push(tile);
    }

    /// Remove every tile whose id is in `ids`, keeping hand order.
    pub fn remove_all(&mut self, ids: &[TileId]) {
        self.hand.retain(|t| !ids.contains(&t.id));
    }
}
