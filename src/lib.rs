//! # rust-rummi
//!
//! A rule engine for a Rummikub-style tile game.
//!
//! ## Design Principles
//!
//! 1. **UI-Agnostic**: The engine never renders or prompts. Every action
//!    returns a `TurnOutcome` or a `GameError` and the caller decides what
//!    to show.
//!
//! 2. **N-Player**: 2-8 seats. Every API takes a `PlayerId`; there is no
//!    "local player" shortcut.
//!
//! 3. **Deterministic**: Shuffles come from a seeded ChaCha stream, so the
//!    same seed and the same actions replay the same session.
//!
//! ## Rules in brief
//!
//! A meld is three or more numbered tiles forming either a *run* (one
//! colour, one parity, ranks stepping by exactly 2) or a *group* (one rank,
//! all colours distinct). Jokers are dealt but never meld. A board row is
//! valid when it splits into consecutive melds.
//!
//! ## Modules
//!
//! - `core`: Tiles, players, RNG, configuration, actions, errors
//! - `pool`: Deck construction, dealing, and drawing
//! - `rules`: Meld classification and row partitioning
//! - `game`: Board, turn phases, and the `Game` state machine
//! - `robot`: Automated seat policies

pub mod core;
pub mod pool;
pub mod rules;
pub mod game;
pub mod robot;

// Re-export commonly used types
pub use crate::core::{
    total_points, GameConfig, GameError, GameRng, GameRngState, MeldError, Player, PlayerId, PlayerMap, Tile,
    TileColor, TileFace, TileId, JokerColor, ActionRecord, TurnAction, DECK_SIZE,
};

pub use crate::pool::{create_deck, Pool};

pub use crate::rules::{classify_meld, is_row_valid, is_valid_meld, partition_row, validate_board, MeldKind, PlacedTile};

pub use crate::game::{
    deal_initial_hands, Board, DrawOffer, Game, GameBuilder, GameView, RejectReason, RobotAction, TurnOutcome,
    TurnPhase,
};

pub use crate::robot::{GreedyPairs, RobotMove, RobotPolicy};
