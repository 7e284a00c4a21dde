//! Deck construction and the shared tile pool.
//!
//! ## Key Types
//!
//! - `create_deck`: seeded 77-tile deck (5 colours x 15 ranks + 2 jokers)
//! - `Pool`: draw, paired draw, deal, and return-with-reshuffle

pub mod manager;

pub use manager::{create_deck, ordered_deck, Pool};
