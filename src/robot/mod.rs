//! Automated players.
//!
//! Policies are trait-based so a smarter search can replace the greedy
//! pair scan without touching the turn machine:
//! - `RobotPolicy`: picks a move from a hand and a board
//! - `GreedyPairs`: first qualifying pair wins, hand before board

pub mod policy;

pub use policy::{GreedyPairs, RobotMove, RobotPolicy};
