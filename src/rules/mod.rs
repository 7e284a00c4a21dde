//! Pure rule checks: melds, rows, and whole boards.
//!
//! Nothing here mutates state or logs; callers branch on the result.

pub mod meld;
pub mod board;

pub use meld::{classify_meld, is_valid_meld, MeldKind, MIN_MELD_LEN, RUN_STEP};
pub use board::{
    arrange_rows, is_row_valid, partition_row, validate_board, validate_placement, PlacedTile, MAX_ROW_LEN,
};
