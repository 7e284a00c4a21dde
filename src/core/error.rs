//! Error types.
//!
//! Player mistakes (a low opening meld, a bad board layout) are not errors:
//! they come back as `TurnOutcome::Rejected` so the caller can re-prompt.
//! `GameError` is for calls the caller should never have made.

use thiserror::Error;

use super::player::PlayerId;
use super::tile::TileId;

/// Why a set of tiles is not a meld.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MeldError {
    #[error("a meld needs at least 3 tiles, got {len}")]
    TooFewTiles { len: usize },
    #[error("jokers cannot form part of a meld")]
    ContainsJoker,
    #[error("tiles form neither a run nor a group")]
    NotRunOrGroup,
}

/// Errors from misuse of the engine API.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("player count must be 2-8, got {0}")]
    InvalidPlayerCount(usize),
    #[error("cannot deal {needed} tiles from a pool of {available}")]
    NotEnoughTiles { needed: usize, available: usize },
    #[error("no seat for {0}")]
    UnknownPlayer(PlayerId),
    #[error("it is {current}'s turn, not {requested}'s")]
    NotYourTurn {
        current: PlayerId,
        requested: PlayerId,
    },
    #[error("{player} does not hold {tile}")]
    TileNotInHand { player: PlayerId, tile: TileId },
    #[error("{0} selected more than once")]
    DuplicateTile(TileId),
    #[error("a drawn-tile choice is pending")]
    DrawPending,
    #[error("no drawn-tile choice is pending")]
    NoDrawPending,
    #[error("{0} was not offered")]
    TileNotOffered(TileId),
    #[error("{0} is neither on the board nor in the current hand")]
    UnknownBoardTile(TileId),
    #[error("board slot ({row}, {col}) holds more than one tile")]
    SlotOccupied { row: usize, col: usize },
    #[error("{0} was on the board and cannot be taken back")]
    BoardTileRemoved(TileId),
    #[error("the game is over")]
    GameOver,
}
