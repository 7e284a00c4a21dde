//! Robot policies.
//!
//! A `RobotPolicy` looks at a seat's hand and the board and picks a move.
//! The game applies the move; the policy never mutates state.

use crate::core::tile::Tile;
use crate::game::board::Board;
use crate::rules::meld::is_valid_meld;

/// What a policy decided to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RobotMove {
    /// Lay down two tiles from the hand.
    FromHand([Tile; 2]),
    /// Claim two tiles already on the board.
    FromBoard([Tile; 2]),
    /// Nothing found; draw one tile.
    Draw,
}

/// Decision policy for an automated seat.
pub trait RobotPolicy {
    fn choose(&self, hand: &[Tile], board: &Board) -> RobotMove;
}

/// Greedy pairwise search.
///
/// Scans every unordered pair in the hand, then every unordered pair of
/// board tiles in row-major order. The first pair accepted by `accepts`
/// wins. With the default predicate (`is_valid_meld`) no pair can ever
/// qualify because a meld needs three tiles, so the robot always draws.
#[derive(Clone, Copy)]
pub struct GreedyPairs {
    accepts: fn(&[Tile]) -> bool,
}

impl std::fmt::Debug for GreedyPairs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreedyPairs").finish_non_exhaustive()
    }
}

impl Default for GreedyPairs {
    fn default() -> Self {
        Self {
            accepts: is_valid_meld,
        }
    }
}

impl GreedyPairs {
    /// Greedy search with a custom pair predicate.
    #[must_use]
    pub fn with_predicate(accepts: fn(&[Tile]) -> bool) -> Self {
        Self { accepts }
    }

    fn first_pair<'a>(&self, tiles: impl Iterator<Item = &'a Tile>) -> Option<[Tile; 2]> {
        let all: Vec<Tile> = tiles.copied().collect();
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                let pair = [all[i], all[j]];
                if (self.accepts)(&pair) {
                    return Some(pair);
                }
            }
        }
        None
    }
}

impl RobotPolicy for GreedyPairs {
    fn choose(&self, hand: &[Tile], board: &Board) -> RobotMove {
        if let Some(pair) = self.first_pair(hand.iter()) {
            return RobotMove::FromHand(pair);
        }
        if let Some(pair) = self.first_pair(board.tiles()) {
            return RobotMove::FromBoard(pair);
        }
        RobotMove::Draw
    }
}
