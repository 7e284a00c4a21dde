//! Turn phases and the verdicts handed back to the caller.

use serde::{Deserialize, Serialize};

use crate::core::tile::{Tile, TileId};

/// Where the current turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// The current player has not broken the ice yet.
    AwaitingInitialMeld,
    /// Normal turn.
    AwaitingAction,
    /// Two tiles were drawn; the player must keep one.
    ChoosingDrawnTile,
    /// The acting player's turn has resolved. `Game::phase` moves straight
    /// on to the next seat, so this is reported through `TurnOutcome::phase`.
    TurnComplete,
    /// A player emptied their hand. No further turns.
    GameOver,
}

/// Why a requested action was refused. The turn does not advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Opening placement worth fewer points than required.
    InitialMeldTooLow { points: u32, required: u32 },
    /// A proposed board has a row that does not split into melds.
    InvalidMeldShape,
    /// A proposed board adds no tiles from the hand.
    EmptySelection,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::InitialMeldTooLow { points, required } => {
                write!(f, "initial meld of {points} points is below {required}")
            }
            RejectReason::InvalidMeldShape => write!(f, "board contains an invalid meld"),
            RejectReason::EmptySelection => write!(f, "no tiles played from hand"),
        }
    }
}

/// Two pool tiles on offer; the player keeps one and the other goes back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOffer {
    tiles: [Tile; 2],
}

impl DrawOffer {
    #[must_use]
    pub fn new(first: Tile, second: Tile) -> Self {
        Self {
            tiles: [first, second],
        }
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile; 2] {
        &self.tiles
    }

    #[must_use]
    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.iter().any(|t| t.id == id)
    }

    /// Split into `(kept, returned)` around the chosen tile.
    #[must_use]
    pub fn split(&self, chosen: TileId) -> Option<(Tile, Tile)> {
        let [a, b] = self.tiles;
        if a.id == chosen {
            Some((a, b))
        } else if b.id == chosen {
            Some((b, a))
        } else {
            None
        }
    }
}

/// Result of a player action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// Selection laid down as a new row.
    Placed { row: usize, broke_ice: bool },
    /// Selection merged into an existing row.
    Extended { row: usize, broke_ice: bool },
    /// A whole proposed board was accepted.
    BoardAccepted { broke_ice: bool },
    /// Two tiles drawn; resolve with `Game::resolve_draw_choice`.
    DrawOffered(DrawOffer),
    /// The only tile left in the pool was kept.
    Drew(Tile),
    /// Nothing to draw; the turn passed with the hand unchanged.
    PoolEmpty,
    /// Action refused; same player, same phase.
    Rejected(RejectReason),
}

impl TurnOutcome {
    #[must_use]
    pub fn accepted(&self) -> bool {
        !matches!(self, TurnOutcome::Rejected(_))
    }

    #[must_use]
    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            TurnOutcome::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Phase the acting seat is left in. `None` for a rejection, which
    /// leaves the phase unchanged.
    #[must_use]
    pub fn phase(&self) -> Option<TurnPhase> {
        match self {
            TurnOutcome::Rejected(_) => None,
            TurnOutcome::DrawOffered(_) => Some(TurnPhase::ChoosingDrawnTile),
            _ => Some(TurnPhase::TurnComplete),
        }
    }

    #[must_use]
    pub fn draw_offer(&self) -> Option<&DrawOffer> {
        match self {
            TurnOutcome::DrawOffered(offer) => Some(offer),
            _ => None,
        }
    }
}
