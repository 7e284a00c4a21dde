//! Core engine types: tiles, players, RNG, configuration, actions, errors.
//!
//! Everything here is rule-agnostic plumbing; meld rules live in `rules`
//! and the turn flow lives in `game`.

pub mod tile;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use tile::{total_points, JokerColor, Tile, TileColor, TileFace, TileId, DECK_SIZE, MAX_RANK, MIN_RANK};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, INITIAL_MELD_POINTS, MAX_PLAYERS, MIN_PLAYERS};
pub use action::{ActionRecord, TileIds, TurnAction};
pub use error::{GameError, MeldError};
