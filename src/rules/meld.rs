//! Single-meld validation.
//!
//! A meld is at least three tiles forming exactly one of:
//! - **Run**: one colour, ranks sharing the lowest rank's parity and
//!   stepping by exactly 2 once sorted (e.g. 3-5-7, not 3-4-5)
//! - **Group**: one rank, every colour distinct (so at most 5 tiles)
//!
//! Jokers have neither colour nor rank and never satisfy either rule.
//! Validation is order-independent.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::error::MeldError;
use crate::core::tile::Tile;

/// Fewest tiles a meld can have.
pub const MIN_MELD_LEN: usize = 3;

/// Rank distance between neighbouring tiles of a run.
pub const RUN_STEP: u8 = 2;

/// Which rule a valid meld satisfies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeldKind {
    Run,
    Group,
}

/// Decide which rule, if any, `tiles` satisfies.
///
/// ```
/// use rust_rummi::core::{Tile, TileColor};
/// use rust_rummi::rules::{classify_meld, MeldKind};
///
/// let run = [
///     Tile::numbered(TileColor::Blue, 7),
///     Tile::numbered(TileColor::Blue, 3),
///     Tile::numbered(TileColor::Blue, 5),
/// ];
/// assert_eq!(classify_meld(&run), Ok(MeldKind::Run));
/// ```
pub fn classify_meld(tiles: &[Tile]) -> Result<MeldKind, MeldError> {
    if tiles.len() < MIN_MELD_LEN {
        return Err(MeldError::TooFewTiles { len: tiles.len() });
    }
    if tiles.iter().any(Tile::is_joker) {
        return Err(MeldError::ContainsJoker);
    }

    if is_run(tiles) {
        Ok(MeldKind::Run)
    } else if is_group(tiles) {
        Ok(MeldKind::Group)
    } else {
        Err(MeldError::NotRunOrGroup)
    }
}

/// `true` if `tiles` is a legal run or group.
#[must_use]
pub fn is_valid_meld(tiles: &[Tile]) -> bool {
    classify_meld(tiles).is_ok()
}

fn is_run(tiles: &[Tile]) -> bool {
    let color = tiles[0].color();
    if color.is_none() || tiles.iter().any(|t| t.color() != color) {
        return false;
    }

    let mut ranks: Vec<u8> = tiles.iter().filter_map(Tile::rank).collect();
    ranks.sort_unstable();

    let parity = ranks[0] % 2;
    ranks.iter().all(|r| r % 2 == parity)
        && ranks.windows(2).all(|w| w[1] == w[0] + RUN_STEP)
}

fn is_group(tiles: &[Tile]) -> bool {
    let rank = tiles[0].rank();
    if rank.is_none() || tiles.iter().any(|t| t.rank() != rank) {
        return false;
    }

    let colors: FxHashSet<_> = tiles.iter().filter_map(Tile::color).collect();
    colors.len() == tiles.len()
}
