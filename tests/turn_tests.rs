//! Turn state machine scenarios.
//!
//! Tables are set up with `GameBuilder` so hands, pool, and board are
//! known exactly.

use rust_rummi::core::{GameError, PlayerId, Tile, TileColor, TileId, TurnAction};
use rust_rummi::game::{Game, GameBuilder, RejectReason, TurnOutcome, TurnPhase};
use rust_rummi::rules::PlacedTile;

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn t(color: TileColor, rank: u8) -> Tile {
    Tile::numbered(color, rank)
}

fn ids(tiles: &[Tile]) -> Vec<TileId> {
    tiles.iter().map(|t| t.id).collect()
}

fn hand_of(game: &Game, player: PlayerId) -> Vec<Tile> {
    game.player(player).unwrap().hand().to_vec()
}

// =============================================================================
// Opening meld
// =============================================================================

#[test]
fn test_opening_meld_at_threshold_is_accepted() {
    let opening = [t(TileColor::Blue, 10), t(TileColor::Red, 10), t(TileColor::Green, 10)];
    let mut game = GameBuilder::new()
        .hands(vec![vec![opening[0], opening[1], opening[2], t(TileColor::Blue, 1)], vec![]])
        .build(7)
        .unwrap();

    assert_eq!(game.phase(), TurnPhase::AwaitingInitialMeld);
    let outcome = game.attempt_turn(P0, &ids(&opening)).unwrap();

    assert_eq!(outcome, TurnOutcome::Placed { row: 0, broke_ice: true });
    assert!(game.player(P0).unwrap().ice_broken());
    assert_eq!(hand_of(&game, P0), vec![t(TileColor::Blue, 1)]);
    assert_eq!(game.board().row(0), Some(&opening[..]));
    assert_eq!(game.current_player(), P1);
}

#[test]
fn test_opening_meld_below_threshold_is_rejected() {
    // 9 + 10 + 10 = 29
    let run = [t(TileColor::Red, 9), t(TileColor::Red, 11), t(TileColor::Red, 13)];
    let mut game = GameBuilder::new().hands(vec![run.to_vec(), vec![]]).build(7).unwrap();
    let pool_before = game.pool().len();

    let outcome = game.attempt_turn(P0, &ids(&run)).unwrap();

    assert_eq!(
        outcome,
        TurnOutcome::Rejected(RejectReason::InitialMeldTooLow {
            points: 29,
            required: 30
        })
    );
    assert_eq!(game.current_player(), P0);
    assert_eq!(game.phase(), TurnPhase::AwaitingInitialMeld);
    assert_eq!(hand_of(&game, P0), run.to_vec());
    assert_eq!(game.pool().len(), pool_before);
    assert!(game.history().is_empty());
}

#[test]
fn test_empty_opening_is_rejected() {
    let mut game = GameBuilder::new().hands(vec![vec![t(TileColor::Red, 1)], vec![]]).build(7).unwrap();

    let outcome = game.attempt_turn(P0, &[]).unwrap();
    assert_eq!(
        outcome.reason(),
        Some(RejectReason::InitialMeldTooLow {
            points: 0,
            required: 30
        })
    );
}

#[test]
fn test_custom_threshold() {
    let run = [t(TileColor::Red, 1), t(TileColor::Red, 3), t(TileColor::Red, 5)];
    let mut game = GameBuilder::new()
        .initial_meld_points(9)
        .hands(vec![run.to_vec(), vec![t(TileColor::Blue, 1)]])
        .build(7)
        .unwrap();

    let outcome = game.attempt_turn(P0, &ids(&run)).unwrap();
    assert!(matches!(outcome, TurnOutcome::Placed { .. }));
}

#[test]
fn test_reaching_threshold_breaks_ice_even_when_drawing() {
    let selection = [t(TileColor::Blue, 10), t(TileColor::Red, 10), t(TileColor::Green, 11)];
    let pool = vec![t(TileColor::Black, 1), t(TileColor::Black, 2), t(TileColor::Black, 3)];
    let mut game = GameBuilder::new()
        .hands(vec![selection.to_vec(), vec![]])
        .pool(pool)
        .build(7)
        .unwrap();

    let outcome = game.attempt_turn(P0, &ids(&selection)).unwrap();

    assert!(outcome.draw_offer().is_some());
    assert!(game.player(P0).unwrap().ice_broken());
    assert_eq!(game.phase(), TurnPhase::ChoosingDrawnTile);
    assert_eq!(game.pool().len(), 1);
}

#[test]
fn test_multi_meld_opening() {
    let selection = [
        t(TileColor::Orange, 2),
        t(TileColor::Orange, 4),
        t(TileColor::Orange, 6),
        t(TileColor::Blue, 9),
        t(TileColor::Red, 9),
        t(TileColor::Green, 9),
    ];
    let mut game = GameBuilder::new().hands(vec![selection.to_vec(), vec![]]).build(1).unwrap();

    let outcome = game.attempt_turn(P0, &ids(&selection)).unwrap();
    assert_eq!(outcome, TurnOutcome::Placed { row: 0, broke_ice: true });
    assert_eq!(game.board().tile_count(), 6);
}

// =============================================================================
// Drawing
// =============================================================================

#[test]
fn test_draw_choice_returns_other_tile() {
    let a = t(TileColor::Green, 4);
    let b = t(TileColor::Green, 5);
    let c = t(TileColor::Green, 6);
    let mut game = GameBuilder::new()
        .hands(vec![vec![t(TileColor::Red, 1)], vec![t(TileColor::Red, 2)]])
        .pool(vec![a, b, c])
        .build(3)
        .unwrap();

    let outcome = game.draw_tile(P0).unwrap();
    let offer = *outcome.draw_offer().unwrap();
    let [first, second] = *offer.tiles();
    assert_eq!(game.pool().len(), 1);

    // Nothing else is allowed while the choice is pending
    assert_eq!(game.draw_tile(P0), Err(GameError::DrawPending));
    assert_eq!(game.attempt_turn(P0, &[]), Err(GameError::DrawPending));
    assert_eq!(
        game.resolve_draw_choice(P0, TileId(0)),
        Err(GameError::TileNotOffered(TileId(0)))
    );
    assert!(matches!(
        game.resolve_draw_choice(P1, first.id),
        Err(GameError::NotYourTurn { .. })
    ));

    let kept = game.resolve_draw_choice(P0, second.id).unwrap();

    assert_eq!(kept, second);
    assert!(game.player(P0).unwrap().holds(second.id));
    assert!(!game.player(P0).unwrap().holds(first.id));
    assert_eq!(game.pool().len(), 2);
    assert!(game.pool().tiles().contains(&first));
    assert_eq!(game.current_player(), P1);
    assert!(game.pending_offer().is_none());
    assert_eq!(
        game.history().back().map(|r| r.action.clone()),
        Some(TurnAction::Draw { kept: Some(second.id) })
    );
}

#[test]
fn test_resolve_without_offer() {
    let mut game = GameBuilder::new().hands(vec![vec![], vec![]]).build(3).unwrap();
    assert_eq!(
        game.resolve_draw_choice(P0, TileId(1)),
        Err(GameError::NoDrawPending)
    );
}

#[test]
fn test_last_tile_is_kept_automatically() {
    let last = t(TileColor::Black, 15);
    let mut game = GameBuilder::new()
        .hands(vec![vec![t(TileColor::Red, 1)], vec![t(TileColor::Red, 2)]])
        .pool(vec![last])
        .build(3)
        .unwrap();

    assert_eq!(game.draw_tile(P0), Ok(TurnOutcome::Drew(last)));
    assert!(game.pool().is_empty());
    assert!(game.player(P0).unwrap().holds(last.id));
    assert_eq!(game.current_player(), P1);
}

#[test]
fn test_empty_pool_passes_and_wraps_round() {
    let mut game = GameBuilder::new()
        .hands(vec![vec![t(TileColor::Red, 1)], vec![t(TileColor::Red, 2)]])
        .pool(vec![])
        .build(3)
        .unwrap();

    assert_eq!(game.draw_tile(P0), Ok(TurnOutcome::PoolEmpty));
    assert_eq!(game.round(), 1);
    assert_eq!(game.draw_tile(P1), Ok(TurnOutcome::PoolEmpty));

    assert_eq!(game.current_player(), P0);
    assert_eq!(game.round(), 2);
    assert_eq!(hand_of(&game, P0).len(), 1);
    assert_eq!(game.history().len(), 2);
    assert!(game.history().iter().all(|r| r.round == 1));
}

#[test]
fn test_empty_selection_after_ice_draws() {
    let mut game = GameBuilder::new()
        .hands(vec![vec![t(TileColor::Red, 1)], vec![]])
        .pool(vec![t(TileColor::Red, 2)])
        .ice_broken(&[P0])
        .build(3)
        .unwrap();

    assert_eq!(game.phase(), TurnPhase::AwaitingAction);
    assert_eq!(game.attempt_turn(P0, &[]), Ok(TurnOutcome::Drew(t(TileColor::Red, 2))));
}

// =============================================================================
// Extension
// =============================================================================

#[test]
fn test_extend_existing_run() {
    let mut game = GameBuilder::new()
        .hands(vec![vec![t(TileColor::Red, 7), t(TileColor::Blue, 2)], vec![]])
        .board(vec![vec![t(TileColor::Red, 1), t(TileColor::Red, 3), t(TileColor::Red, 5)]])
        .ice_broken(&[P0])
        .build(3)
        .unwrap();

    let outcome = game.attempt_turn(P0, &[t(TileColor::Red, 7).id]).unwrap();

    assert_eq!(outcome, TurnOutcome::Extended { row: 0, broke_ice: false });
    assert_eq!(game.board().row(0).map(<[Tile]>::len), Some(4));
    assert!(game.board().is_valid());
    assert_eq!(hand_of(&game, P0), vec![t(TileColor::Blue, 2)]);
}

#[test]
fn test_opening_can_extend_existing_row() {
    // Completes a partial row: R2 R4 | R6 B10 G10 O10 -> two melds.
    let selection = [
        t(TileColor::Red, 6),
        t(TileColor::Blue, 10),
        t(TileColor::Green, 10),
        t(TileColor::Orange, 10),
    ];
    let board = vec![vec![t(TileColor::Red, 2), t(TileColor::Red, 4)]];

    let mut fresh = GameBuilder::new()
        .hands(vec![selection.to_vec(), vec![]])
        .board(board.clone())
        .build(3)
        .unwrap();

    // Worth 6 points on its own: below the opening threshold
    let outcome = fresh.attempt_turn(P0, &[selection[0].id]).unwrap();
    assert_eq!(
        outcome.reason(),
        Some(RejectReason::InitialMeldTooLow {
            points: 6,
            required: 30
        })
    );
    assert_eq!(fresh.board().tile_count(), 2);

    let outcome = fresh.attempt_turn(P0, &ids(&selection)).unwrap();
    assert_eq!(outcome, TurnOutcome::Extended { row: 0, broke_ice: true });
    assert!(fresh.player(P0).unwrap().ice_broken());
    assert_eq!(fresh.board().tile_count(), 6);
    assert!(fresh.board().is_valid());

    let mut seasoned = GameBuilder::new()
        .hands(vec![selection.to_vec(), vec![]])
        .board(board)
        .ice_broken(&[P0])
        .build(3)
        .unwrap();
    let outcome = seasoned.attempt_turn(P0, &ids(&selection)).unwrap();
    assert_eq!(outcome, TurnOutcome::Extended { row: 0, broke_ice: false });
}

#[test]
fn test_invalid_extension_draws() {
    let board = vec![vec![t(TileColor::Red, 1), t(TileColor::Red, 3), t(TileColor::Red, 5)]];
    let mut game = GameBuilder::new()
        .hands(vec![vec![t(TileColor::Red, 8)], vec![]])
        .board(board.clone())
        .pool(vec![t(TileColor::Black, 1)])
        .ice_broken(&[P0])
        .build(3)
        .unwrap();

    let outcome = game.attempt_turn(P0, &[t(TileColor::Red, 8).id]).unwrap();
    assert_eq!(outcome, TurnOutcome::Drew(t(TileColor::Black, 1)));
    assert_eq!(game.board().rows(), &board[..]);
}

// =============================================================================
// Whole-board submission
// =============================================================================

fn rearrange_table() -> Game {
    GameBuilder::new()
        .hands(vec![
            vec![
                t(TileColor::Red, 7),
                t(TileColor::Blue, 9),
                t(TileColor::Green, 9),
                t(TileColor::Orange, 9),
                t(TileColor::Black, 2),
            ],
            vec![t(TileColor::Blue, 1)],
        ])
        .board(vec![vec![t(TileColor::Red, 1), t(TileColor::Red, 3), t(TileColor::Red, 5)]])
        .ice_broken(&[P0])
        .build(11)
        .unwrap()
}

fn row(tiles: &[Tile], index: usize) -> Vec<PlacedTile> {
    tiles
        .iter()
        .enumerate()
        .map(|(col, &tile)| PlacedTile::new(tile, index, col))
        .collect()
}

#[test]
fn test_submit_board_accepts_valid_layout() {
    let mut game = rearrange_table();
    let mut layout = row(
        &[t(TileColor::Red, 1), t(TileColor::Red, 3), t(TileColor::Red, 5), t(TileColor::Red, 7)],
        0,
    );
    layout.extend(row(&[t(TileColor::Blue, 9), t(TileColor::Green, 9), t(TileColor::Orange, 9)], 1));

    let outcome = game.submit_board(P0, &layout).unwrap();

    assert_eq!(outcome, TurnOutcome::BoardAccepted { broke_ice: false });
    assert_eq!(game.board().rows().len(), 2);
    assert_eq!(hand_of(&game, P0), vec![t(TileColor::Black, 2)]);
    assert_eq!(game.current_player(), P1);
}

#[test]
fn test_submit_board_rejects_invalid_row() {
    let mut game = rearrange_table();
    let mut layout = row(&[t(TileColor::Red, 1), t(TileColor::Red, 3), t(TileColor::Red, 5)], 0);
    layout.extend(row(&[t(TileColor::Red, 7)], 1));

    let outcome = game.submit_board(P0, &layout).unwrap();

    assert_eq!(outcome, TurnOutcome::Rejected(RejectReason::InvalidMeldShape));
    assert_eq!(game.board().rows().len(), 1);
    assert_eq!(hand_of(&game, P0).len(), 5);
    assert_eq!(game.current_player(), P0);
}

#[test]
fn test_submit_board_cannot_take_back_tiles() {
    let mut game = rearrange_table();
    let layout = row(&[t(TileColor::Red, 3), t(TileColor::Red, 5), t(TileColor::Red, 7)], 0);

    assert_eq!(
        game.submit_board(P0, &layout),
        Err(GameError::BoardTileRemoved(t(TileColor::Red, 1).id))
    );
}

#[test]
fn test_submit_board_rejects_foreign_tiles() {
    let mut game = rearrange_table();
    let mut layout = row(&[t(TileColor::Red, 1), t(TileColor::Red, 3), t(TileColor::Red, 5)], 0);
    layout.push(PlacedTile::new(t(TileColor::Blue, 1), 1, 0));

    assert_eq!(
        game.submit_board(P0, &layout),
        Err(GameError::UnknownBoardTile(t(TileColor::Blue, 1).id))
    );
}

#[test]
fn test_submit_board_rejects_stacked_slot() {
    let mut game = rearrange_table();
    let mut layout = row(
        &[t(TileColor::Red, 1), t(TileColor::Red, 3), t(TileColor::Red, 5), t(TileColor::Red, 7)],
        0,
    );
    layout.push(PlacedTile::new(t(TileColor::Blue, 9), 0, 3));

    assert_eq!(
        game.submit_board(P0, &layout),
        Err(GameError::SlotOccupied { row: 0, col: 3 })
    );
    assert_eq!(game.board().tile_count(), 3);
    assert_eq!(hand_of(&game, P0).len(), 5);
}

#[test]
fn test_submit_board_needs_new_tiles() {
    let mut game = rearrange_table();
    let layout = row(&[t(TileColor::Red, 1), t(TileColor::Red, 3), t(TileColor::Red, 5)], 0);

    assert_eq!(
        game.submit_board(P0, &layout),
        Ok(TurnOutcome::Rejected(RejectReason::EmptySelection))
    );
}

#[test]
fn test_submit_board_applies_opening_threshold() {
    let hand = vec![t(TileColor::Red, 7), t(TileColor::Blue, 1)];
    let mut game = GameBuilder::new()
        .hands(vec![hand, vec![]])
        .board(vec![vec![t(TileColor::Red, 1), t(TileColor::Red, 3), t(TileColor::Red, 5)]])
        .build(11)
        .unwrap();
    let layout = row(
        &[t(TileColor::Red, 1), t(TileColor::Red, 3), t(TileColor::Red, 5), t(TileColor::Red, 7)],
        0,
    );

    assert_eq!(
        game.submit_board(P0, &layout),
        Ok(TurnOutcome::Rejected(RejectReason::InitialMeldTooLow {
            points: 7,
            required: 30
        }))
    );
}

// =============================================================================
// Turn order and winning
// =============================================================================

#[test]
fn test_out_of_turn_actions_fail() {
    let mut game = rearrange_table();

    assert!(matches!(game.draw_tile(P1), Err(GameError::NotYourTurn { .. })));
    assert!(matches!(game.attempt_turn(P1, &[]), Err(GameError::NotYourTurn { .. })));
    assert!(matches!(game.submit_board(P1, &[]), Err(GameError::NotYourTurn { .. })));
}

#[test]
fn test_emptying_hand_wins() {
    let last = [t(TileColor::Blue, 9), t(TileColor::Green, 9), t(TileColor::Orange, 9)];
    let mut game = GameBuilder::new()
        .hands(vec![last.to_vec(), vec![t(TileColor::Blue, 1)]])
        .ice_broken(&[P0])
        .build(5)
        .unwrap();

    let outcome = game.attempt_turn(P0, &ids(&last)).unwrap();

    assert_eq!(outcome, TurnOutcome::Placed { row: 0, broke_ice: false });
    assert_eq!(outcome.phase(), Some(TurnPhase::TurnComplete));
    assert_eq!(game.winner(), Some(P0));
    assert_eq!(game.phase(), TurnPhase::GameOver);
    assert_eq!(game.draw_tile(P1), Err(GameError::GameOver));
}

#[test]
fn test_tiles_are_conserved_through_play() {
    let mut game = Game::new(rust_rummi::GameConfig::new(99).with_player_count(3)).unwrap();
    let total = |g: &Game| {
        g.pool().len()
            + g.board().tile_count()
            + g.players().iter().map(|(_, p)| p.hand().len()).sum::<usize>()
    };
    assert_eq!(total(&game), 77);

    for _ in 0..30 {
        let seat = game.current_player();
        let outcome = game.draw_tile(seat).unwrap();
        if let Some(offer) = outcome.draw_offer() {
            let keep = offer.tiles()[0].id;
            game.resolve_draw_choice(seat, keep).unwrap();
        }
        assert_eq!(total(&game), 77);
    }
    assert_eq!(game.round(), 11);
}
