//! Row and board validation.
//!
//! A board row is a left-to-right sequence of tiles that may hold several
//! melds back to back with no separator. Meld boundaries are recovered by
//! a partition search: from each offset try every segment of at least
//! `MIN_MELD_LEN` tiles that is a valid meld, then recurse on the rest.
//! Offsets already shown to fail are memoized, so the search is
//! polynomial in the row length.

use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::meld::{is_valid_meld, MIN_MELD_LEN};
use crate::core::tile::{Tile, DECK_SIZE};

/// Longest row worth searching. No longer row can be built from one deck.
pub const MAX_ROW_LEN: usize = DECK_SIZE;

/// Split a row into consecutive melds.
///
/// Returns the meld ranges in row order, or `None` if no split exists.
/// An empty row splits into zero melds.
///
/// ```
/// use rust_rummi::core::{Tile, TileColor};
/// use rust_rummi::rules::partition_row;
///
/// let row = [
///     Tile::numbered(TileColor::Red, 1),
///     Tile::numbered(TileColor::Red, 3),
///     Tile::numbered(TileColor::Red, 5),
///     Tile::numbered(TileColor::Blue, 9),
///     Tile::numbered(TileColor::Red, 9),
///     Tile::numbered(TileColor::Green, 9),
/// ];
/// assert_eq!(partition_row(&row), Some(vec![0..3, 3..6]));
/// ```
#[must_use]
pub fn partition_row(row: &[Tile]) -> Option<Vec<Range<usize>>> {
    if row.len() > MAX_ROW_LEN {
        return None;
    }

    let mut failed = vec![false; row.len()];
    let mut melds = Vec::new();
    search(row, 0, &mut failed, &mut melds).then_some(melds)
}

fn search(row: &[Tile], start: usize, failed: &mut [bool], melds: &mut Vec<Range<usize>>) -> bool {
    if start >= row.len() {
        return true;
    }
    if failed[start] {
        return false;
    }

    for end in (start + MIN_MELD_LEN)..=row.len() {
        if is_valid_meld(&row[start..end]) {
            melds.push(start..end);
            if search(row, end, failed, melds) {
                return true;
            }
            melds.pop();
        }
    }

    failed[start] = true;
    false
}

/// `true` if the row splits entirely into valid melds.
#[must_use]
pub fn is_row_valid(row: &[Tile]) -> bool {
    partition_row(row).is_some()
}

/// `true` if every row is valid and at least one tile is on the board.
#[must_use]
pub fn validate_board<R: AsRef<[Tile]>>(rows: &[R]) -> bool {
    let placed: usize = rows.iter().map(|r| r.as_ref().len()).sum();
    placed > 0 && rows.iter().all(|r| is_row_valid(r.as_ref()))
}

/// A tile at a board slot, as reported by the layout layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub tile: Tile,
    /// Vertical slot index.
    pub row: usize,
    /// Horizontal slot index.
    pub col: usize,
}

impl PlacedTile {
    #[must_use]
    pub fn new(tile: Tile, row: usize, col: usize) -> Self {
        Self { tile, row, col }
    }
}

/// Group placed tiles by row and order each row by column.
///
/// Rows come back in ascending row index; empty slot rows are skipped.
#[must_use]
pub fn arrange_rows(placed: &[PlacedTile]) -> Vec<Vec<Tile>> {
    let mut rows: BTreeMap<usize, Vec<&PlacedTile>> = BTreeMap::new();
    for p in placed {
        rows.entry(p.row).or_default().push(p);
    }

    rows.into_values()
        .map(|mut row| {
            row.sort_by_key(|p| p.col);
            row.into_iter().map(|p| p.tile).collect()
        })
        .collect()
}

/// Board-level check on free slot coordinates.
#[must_use]
pub fn validate_placement(placed: &[PlacedTile]) -> bool {
    validate_board(&arrange_rows(placed))
}
