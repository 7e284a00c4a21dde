//! Tile identity and point values.
//!
//! Every physical tile in the deck has a unique `TileId`.
//!
//! ## ID Layout
//!
//! IDs are canonical, derived from the tile face rather than allocated:
//! - `0..75`: numbered tiles, `color_index * 15 + (rank - 1)`
//! - `75`: black joker
//! - `76`: red joker
//!
//! Because the id is a function of the face, a deck built from faces can
//! never hold two copies of the same tile.
//!
//! ## Usage
//!
//! ```
//! use rust_rummi::core::{Tile, TileColor};
//!
//! let tile = Tile::numbered(TileColor::Red, 12);
//! assert_eq!(tile.rank(), Some(12));
//! assert_eq!(tile.points(), 10);
//! assert_eq!(Tile::from_id(tile.id), Some(tile));
//! ```

use serde::{Deserialize, Serialize};

/// Lowest rank printed on a numbered tile.
pub const MIN_RANK: u8 = 1;

/// Highest rank printed on a numbered tile.
pub const MAX_RANK: u8 = 15;

/// Number of tiles in a full deck: 5 colours x 15 ranks plus two jokers.
pub const DECK_SIZE: usize = TileColor::ALL.len() * MAX_RANK as usize + 2;

/// Unique identifier for a physical tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u8);

impl TileId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// The five colours of numbered tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileColor {
    Blue,
    Red,
    Orange,
    Black,
    Green,
}

impl TileColor {
    /// All colours, in id order.
    pub const ALL: [TileColor; 5] = [
        TileColor::Blue,
        TileColor::Red,
        TileColor::Orange,
        TileColor::Black,
        TileColor::Green,
    ];

    /// 0-based position of this colour in [`TileColor::ALL`].
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for TileColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TileColor::Blue => "Blue",
            TileColor::Red => "Red",
            TileColor::Orange => "Orange",
            TileColor::Black => "Black",
            TileColor::Green => "Green",
        };
        write!(f, "{name}")
    }
}

/// The two jokers are told apart by their print colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JokerColor {
    Black,
    Red,
}

/// What is printed on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileFace {
    Numbered { color: TileColor, rank: u8 },
    Joker(JokerColor),
}

/// A single tile. Immutable once created.
///
/// Where the tile currently sits (pool, hand, board) is tracked by the
/// container that owns it, never by the tile itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub face: TileFace,
}

impl Tile {
    /// Create a numbered tile.
    ///
    /// Panics if `rank` is outside `1..=15`.
    #[must_use]
    pub fn numbered(color: TileColor, rank: u8) -> Self {
        assert!(
            (MIN_RANK..=MAX_RANK).contains(&rank),
            "Rank must be {MIN_RANK}-{MAX_RANK}, got {rank}"
        );
        Self {
            id: TileId(color.index() * MAX_RANK + (rank - 1)),
            face: TileFace::Numbered { color, rank },
        }
    }

    /// Create a joker.
    #[must_use]
    pub const fn joker(color: JokerColor) -> Self {
        let id = match color {
            JokerColor::Black => TileId(75),
            JokerColor::Red => TileId(76),
        };
        Self {
            id,
            face: TileFace::Joker(color),
        }
    }

    /// Rebuild a tile from its canonical id.
    ///
    /// Returns `None` for ids outside the deck.
    #[must_use]
    pub fn from_id(id: TileId) -> Option<Self> {
        let raw = id.raw();
        match raw {
            75 => Some(Self::joker(JokerColor::Black)),
            76 => Some(Self::joker(JokerColor::Red)),
            r if (r as usize) < DECK_SIZE - 2 => {
                let color = TileColor::ALL[(r / MAX_RANK) as usize];
                Some(Self::numbered(color, r % MAX_RANK + 1))
            }
            _ => None,
        }
    }

    /// Colour of a numbered tile; `None` for jokers.
    #[must_use]
    pub const fn color(&self) -> Option<TileColor> {
        match self.face {
            TileFace::Numbered { color, .. } => Some(color),
            TileFace::Joker(_) => None,
        }
    }

    /// Rank of a numbered tile; `None` for jokers.
    #[must_use]
    pub const fn rank(&self) -> Option<u8> {
        match self.face {
            TileFace::Numbered { rank, .. } => Some(rank),
            TileFace::Joker(_) => None,
        }
    }

    #[must_use]
    pub const fn is_joker(&self) -> bool {
        matches!(self.face, TileFace::Joker(_))
    }

    /// Point value: face value for 1-9, 10 for 10-15, 0 for jokers.
    #[must_use]
    pub const fn points(&self) -> u32 {
        match self.face {
            TileFace::Numbered { rank, .. } if rank <= 9 => rank as u32,
            TileFace::Numbered { .. } => 10,
            TileFace::Joker(_) => 0,
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.face {
            TileFace::Numbered { color, rank } => write!(f, "{color} {rank}"),
            TileFace::Joker(JokerColor::Black) => write!(f, "Black Joker"),
            TileFace::Joker(JokerColor::Red) => write!(f, "Red Joker"),
        }
    }
}

/// Total points of a set of tiles.
#[must_use]
pub fn total_points(tiles: &[Tile]) -> u32 {
    tiles.iter().map(Tile::points).sum()
}
