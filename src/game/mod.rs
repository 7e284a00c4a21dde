//! Turn state machine.
//!
//! A `Game` owns the pool, the seats, and the board, and exposes the
//! actions the rendering/input layer calls:
//! - `attempt_turn`: play selected tiles (fresh row, checked extension, or draw)
//! - `draw_tile` / `resolve_draw_choice`: the keep-one-of-two draw
//! - `submit_board`: commit a whole rearranged board
//! - `run_robot_turn`: let a policy act for the current seat
//!
//! Supports 2-8 seats.

pub mod board;
pub mod turn;
mod session;

pub use board::Board;
pub use session::{deal_initial_hands, Game, GameBuilder, GameView, RobotAction};
pub use turn::{DrawOffer, RejectReason, TurnOutcome, TurnPhase};
