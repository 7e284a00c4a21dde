//! The shared board: rows of placed tiles.
//!
//! A tile's board position is its `(row, column)` here. The board, the
//! hands, and the pool are the only containers, and a tile is in exactly
//! one of them at any time.

use serde::{Deserialize, Serialize};

use crate::core::tile::{Tile, TileId};
use crate::rules::board::validate_board;

/// Rows of tiles, each ordered left to right.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: Vec<Vec<Tile>>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Board with the given rows already laid out.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[Tile]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tile_count() == 0
    }

    /// All placed tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.rows.iter().flatten()
    }

    /// `(row, column)` of a placed tile.
    #[must_use]
    pub fn position(&self, id: TileId) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.iter().position(|t| t.id == id).map(|c| (r, c))
        })
    }

    /// The placed tile with this id.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<Tile> {
        self.tiles().copied().find(|t| t.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: TileId) -> bool {
        self.position(id).is_some()
    }

    /// `true` if the board holds tiles and every row splits into melds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        validate_board(&self.rows)
    }

    /// Append a new row, returning its index.
    pub(crate) fn push_row(&mut self, tiles: Vec<Tile>) -> usize {
        self.rows.push(tiles);
        self.rows.len() - 1
    }

    pub(crate) fn replace_row(&mut self, index: usize, tiles: Vec<Tile>) {
        self.rows[index] = tiles;
    }

    pub(crate) fn replace_all(&mut self, rows: Vec<Vec<Tile>>) {
        self.rows = rows;
    }
}
