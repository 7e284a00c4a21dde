//! Resolved actions and the history record.
//!
//! A `TurnAction` is what a turn actually did once it resolved, not what
//! was requested. Rejected requests are never recorded.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use super::tile::TileId;

/// Tile ids carried by an action. Most melds are 3-4 tiles.
pub type TileIds = SmallVec<[TileId; 4]>;

/// What a resolved turn did.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnAction {
    /// Tiles laid down as a new board row.
    Place { row: usize, tiles: TileIds },

    /// Tiles merged into an existing board row.
    Extend { row: usize, tiles: TileIds },

    /// Whole-board layout committed; `tiles` came from the hand.
    SubmitBoard { tiles: TileIds },

    /// One tile kept from the pool. `None` when the pool was empty.
    Draw { kept: Option<TileId> },

    /// Robot played a pair; `from_board` when both tiles were already placed.
    RobotPair { tiles: [TileId; 2], from_board: bool },
}

impl TurnAction {
    /// Tile ids that left the acting player's hand.
    #[must_use]
    pub fn tiles_played(&self) -> &[TileId] {
        match self {
            TurnAction::Place { tiles, .. }
            | TurnAction::Extend { tiles, .. }
            | TurnAction::SubmitBoard { tiles } => tiles.as_slice(),
            TurnAction::RobotPair {
                tiles,
                from_board: false,
            } => tiles.as_slice(),
            TurnAction::RobotPair { .. } | TurnAction::Draw { .. } => &[],
        }
    }
}

/// A recorded action with the seat and round it happened in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: TurnAction,
    /// Round number (starts at 1, increments when play wraps to seat 0).
    pub round: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: TurnAction, round: u32) -> Self {
        Self {
            player,
            action,
            round,
        }
    }
}
