//! The `Game` aggregate: pool, seats, board, and the turn state machine.
//!
//! One player acts at a time. Each action either resolves the turn (and
//! play passes to the next seat) or is rejected (and the same player is
//! asked again). The only suspended state is a pending two-tile draw
//! offer, which blocks everything except `resolve_draw_choice`.

use im::Vector;
use log::{debug, info, warn};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{
    total_points, ActionRecord, GameConfig, GameError, GameRng, Player, PlayerId, PlayerMap, Tile, TileId,
    TileIds, TurnAction, MAX_PLAYERS, MIN_PLAYERS,
};
use crate::pool::{ordered_deck, Pool};
use crate::robot::{GreedyPairs, RobotMove, RobotPolicy};
use crate::rules::{arrange_rows, is_row_valid, validate_board, PlacedTile};

use super::board::Board;
use super::turn::{DrawOffer, RejectReason, TurnOutcome, TurnPhase};

/// Shuffle a fresh deck and deal opening hands.
///
/// Returns one hand per seat and the pool holding everything else.
pub fn deal_initial_hands(config: &GameConfig) -> Result<(Vec<Vec<Tile>>, Pool), GameError> {
    config.validate()?;
    let mut pool = Pool::new(config.seed);
    let hands = pool.deal(config.player_count, config.hand_size)?;
    Ok((hands, pool))
}

/// The deck minus `used`, shuffled the same way `create_deck` shuffles.
fn undealt_tiles<'a>(used: impl Iterator<Item = &'a Tile>, seed: u64) -> Vec<Tile> {
    let used: FxHashSet<TileId> = used.map(|t| t.id).collect();
    let mut rest: Vec<Tile> = ordered_deck().into_iter().filter(|t| !used.contains(&t.id)).collect();
    GameRng::new(seed).for_context("deck").shuffle(&mut rest);
    rest
}

/// What a robot turn did, for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotAction {
    PlayedFromHand([Tile; 2]),
    PlayedFromBoard([Tile; 2]),
    Drew(Tile),
    PoolEmpty,
}

/// Builder for creating a `Game`.
///
/// By default deals a shuffled deck per the config. `hands`, `pool`,
/// `board`, and `ice_broken` set up a specific table instead.
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    config: GameConfig,
    hands: Option<Vec<Vec<Tile>>>,
    pool: Option<Vec<Tile>>,
    board: Vec<Vec<Tile>>,
    ice_broken: Vec<PlayerId>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn player_count(mut self, count: usize) -> Self {
        self.config.player_count = count;
        self
    }

    pub fn hand_size(mut self, size: usize) -> Self {
        self.config.hand_size = size;
        self
    }

    pub fn initial_meld_points(mut self, points: u32) -> Self {
        self.config.initial_meld_points = points;
        self
    }

    /// Seat these hands instead of dealing. Sets the player count.
    pub fn hands(mut self, hands: Vec<Vec<Tile>>) -> Self {
        self.hands = Some(hands);
        self
    }

    /// Use exactly these tiles as the pool.
    pub fn pool(mut self, tiles: Vec<Tile>) -> Self {
        self.pool = Some(tiles);
        self
    }

    /// Start with these rows already on the board.
    pub fn board(mut self, rows: Vec<Vec<Tile>>) -> Self {
        self.board = rows;
        self
    }

    /// Seats that start with the ice already broken.
    pub fn ice_broken(mut self, players: &[PlayerId]) -> Self {
        self.ice_broken.extend_from_slice(players);
        self
    }

    /// Build the game.
    pub fn build(self, seed: u64) -> Result<Game, GameError> {
        let mut config = self.config;
        config.seed = seed;

        let (hands, pool) = match self.hands {
            Some(hands) => {
                if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&hands.len()) {
                    return Err(GameError::InvalidPlayerCount(hands.len()));
                }
                config.player_count = hands.len();

                let tiles = match self.pool {
                    Some(tiles) => tiles,
                    None => undealt_tiles(hands.iter().chain(&self.board).flatten(), seed),
                };
                (hands, Pool::from_tiles(tiles, seed))
            }
            None => {
                config.validate()?;
                let tiles = match self.pool {
                    Some(tiles) => tiles,
                    None => undealt_tiles(self.board.iter().flatten(), seed),
                };
                let mut pool = Pool::from_tiles(tiles, seed);
                let hands = pool.deal(config.player_count, config.hand_size)?;
                (hands, pool)
            }
        };

        let mut seen = FxHashSet::default();
        let all = hands.iter().chain(&self.board).flatten().chain(pool.tiles());
        for tile in all {
            if !seen.insert(tile.id) {
                return Err(GameError::DuplicateTile(tile.id));
            }
        }

        let mut players = PlayerMap::from_vec(hands.into_iter().map(Player::with_hand).collect());
        for &seat in &self.ice_broken {
            if seat.index() >= players.player_count() {
                return Err(GameError::UnknownPlayer(seat));
            }
            players[seat].break_ice();
        }

        debug!(
            "New game: {} players, {} tiles in pool, seed {}",
            players.player_count(),
            pool.len(),
            seed
        );

        Ok(Game {
            config,
            pool,
            players,
            board: Board::from_rows(self.board),
            current: PlayerId::new(0),
            round: 1,
            pending_offer: None,
            history: Vector::new(),
            winner: None,
        })
    }
}

/// A single session. Memory only; dropped at session end.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    pool: Pool,
    players: PlayerMap<Player>,
    board: Board,
    current: PlayerId,
    round: u32,
    pending_offer: Option<DrawOffer>,
    history: Vector<ActionRecord>,
    winner: Option<PlayerId>,
}

impl Game {
    /// Deal a new game from `config`.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let seed = config.seed;
        GameBuilder::new().config(config).build(seed)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        (id.index() < self.player_count()).then(|| &self.players[id])
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Round number, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn pending_offer(&self) -> Option<&DrawOffer> {
        self.pending_offer.as_ref()
    }

    /// Every resolved action, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        if self.winner.is_some() {
            TurnPhase::GameOver
        } else if self.pending_offer.is_some() {
            TurnPhase::ChoosingDrawnTile
        } else if !self.players[self.current].ice_broken() {
            TurnPhase::AwaitingInitialMeld
        } else {
            TurnPhase::AwaitingAction
        }
    }

    // === Player actions ===

    /// Play `selected` tiles from the current player's hand.
    ///
    /// Before the ice is broken the selection must reach the opening
    /// threshold or the action is rejected; reaching it breaks the ice
    /// for good, even if the turn ends in a draw. The selection is then
    /// laid down as a new row if it splits into melds, merged into an
    /// existing row if that row stays valid, or the player draws instead.
    pub fn attempt_turn(&mut self, player: PlayerId, selected: &[TileId]) -> Result<TurnOutcome, GameError> {
        self.check_can_act(player)?;
        let tiles = self.selected_tiles(player, selected)?;

        let mut broke_ice = false;
        if !self.players[player].ice_broken() {
            let points = total_points(&tiles);
            let required = self.config.initial_meld_points;
            if points < required {
                warn!("{player} opening of {points} points rejected, {required} required");
                return Ok(TurnOutcome::Rejected(RejectReason::InitialMeldTooLow { points, required }));
            }
            broke_ice = self.break_ice(player);
        }

        if !tiles.is_empty() && is_row_valid(&tiles) {
            let ids = self.take_from_hand(player, &tiles);
            let row = self.board.push_row(tiles);
            debug!("{player} placed {} tiles as row {row}", ids.len());
            self.finish_turn(player, TurnAction::Place { row, tiles: ids });
            return Ok(TurnOutcome::Placed { row, broke_ice });
        }

        if !tiles.is_empty() {
            if let Some((row, merged)) = self.find_extension(&tiles) {
                let ids = self.take_from_hand(player, &tiles);
                self.board.replace_row(row, merged);
                debug!("{player} extended row {row} with {} tiles", ids.len());
                self.finish_turn(player, TurnAction::Extend { row, tiles: ids });
                return Ok(TurnOutcome::Extended { row, broke_ice });
            }
        }

        debug!("{player} has no placement, drawing");
        Ok(self.start_draw(player))
    }

    /// Skip placing and draw.
    pub fn draw_tile(&mut self, player: PlayerId) -> Result<TurnOutcome, GameError> {
        self.check_can_act(player)?;
        Ok(self.start_draw(player))
    }

    /// Keep `chosen` from the pending offer; the other tile goes back to
    /// the pool, which is reshuffled.
    pub fn resolve_draw_choice(&mut self, player: PlayerId, chosen: TileId) -> Result<Tile, GameError> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }
        if player != self.current {
            return Err(GameError::NotYourTurn {
                current: self.current,
                requested: player,
            });
        }
        let offer = self.pending_offer.ok_or(GameError::NoDrawPending)?;
        let (kept, returned) = offer.split(chosen).ok_or(GameError::TileNotOffered(chosen))?;

        self.pending_offer = None;
        self.pool.return_tile(returned);
        self.players[player].add(kept);
        debug!("{player} kept {kept}, returned {returned}");
        self.finish_turn(player, TurnAction::Draw { kept: Some(kept.id) });
        Ok(kept)
    }

    /// Commit a whole proposed board layout.
    ///
    /// `placements` must contain every tile already on the board plus at
    /// least one tile from the current player's hand, one tile per
    /// `(row, col)` slot. The layout is accepted only if every row splits into melds; otherwise nothing
    /// changes and the player may try again.
    pub fn submit_board(&mut self, player: PlayerId, placements: &[PlacedTile]) -> Result<TurnOutcome, GameError> {
        self.check_can_act(player)?;

        let mut seen = FxHashSet::default();
        let mut slots = FxHashSet::default();
        let mut added = Vec::new();
        for placed in placements {
            let id = placed.tile.id;
            if !seen.insert(id) {
                return Err(GameError::DuplicateTile(id));
            }
            if !slots.insert((placed.row, placed.col)) {
                return Err(GameError::SlotOccupied {
                    row: placed.row,
                    col: placed.col,
                });
            }
            let known = match self.board.get(id) {
                Some(tile) => tile,
                None => {
                    let tile = self.players[player]
                        .find(id)
                        .ok_or(GameError::UnknownBoardTile(id))?;
                    added.push(tile);
                    tile
                }
            };
            if known != placed.tile {
                return Err(GameError::UnknownBoardTile(id));
            }
        }
        if let Some(missing) = self.board.tiles().find(|t| !seen.contains(&t.id)) {
            return Err(GameError::BoardTileRemoved(missing.id));
        }

        if added.is_empty() {
            warn!("{player} submitted a board with no new tiles");
            return Ok(TurnOutcome::Rejected(RejectReason::EmptySelection));
        }
        if !self.players[player].ice_broken() {
            let points = total_points(&added);
            let required = self.config.initial_meld_points;
            if points < required {
                warn!("{player} opening of {points} points rejected, {required} required");
                return Ok(TurnOutcome::Rejected(RejectReason::InitialMeldTooLow { points, required }));
            }
        }

        let rows = arrange_rows(placements);
        if !validate_board(&rows) {
            warn!("{player} submitted an invalid board");
            return Ok(TurnOutcome::Rejected(RejectReason::InvalidMeldShape));
        }

        let ids = self.take_from_hand(player, &added);
        let broke_ice = self.break_ice(player);
        self.board.replace_all(rows);
        debug!("{player} committed a board with {} new tiles", ids.len());
        self.finish_turn(player, TurnAction::SubmitBoard { tiles: ids });
        Ok(TurnOutcome::BoardAccepted { broke_ice })
    }

    /// Play the current seat with the default greedy policy.
    pub fn run_robot_turn(&mut self, player: PlayerId) -> Result<RobotAction, GameError> {
        self.run_robot_turn_with(player, &GreedyPairs::default())
    }

    /// Play the current seat with `policy`.
    ///
    /// Robots skip the opening threshold. A draw takes one tile with no
    /// choice.
    pub fn run_robot_turn_with<P: RobotPolicy + ?Sized>(
        &mut self,
        player: PlayerId,
        policy: &P,
    ) -> Result<RobotAction, GameError> {
        self.check_can_act(player)?;

        match policy.choose(self.players[player].hand(), &self.board) {
            RobotMove::FromHand(pair) => {
                let ids = [pair[0].id, pair[1].id];
                if ids[0] == ids[1] {
                    return Err(GameError::DuplicateTile(ids[0]));
                }
                if let Some(missing) = ids.iter().find(|&&id| !self.players[player].holds(id)) {
                    return Err(GameError::TileNotInHand {
                        player,
                        tile: *missing,
                    });
                }
                self.players[player].remove_all(&ids);
                let row = self.board.push_row(pair.to_vec());
                debug!("{player} (robot) placed {} and {} as row {row}", pair[0], pair[1]);
                self.finish_turn(
                    player,
                    TurnAction::RobotPair {
                        tiles: ids,
                        from_board: false,
                    },
                );
                Ok(RobotAction::PlayedFromHand(pair))
            }
            RobotMove::FromBoard(pair) => {
                let ids = [pair[0].id, pair[1].id];
                if let Some(missing) = ids.iter().find(|&&id| !self.board.contains(id)) {
                    return Err(GameError::UnknownBoardTile(*missing));
                }
                debug!("{player} (robot) claimed {} and {} on the board", pair[0], pair[1]);
                self.finish_turn(
                    player,
                    TurnAction::RobotPair {
                        tiles: ids,
                        from_board: true,
                    },
                );
                Ok(RobotAction::PlayedFromBoard(pair))
            }
            RobotMove::Draw => match self.pool.draw() {
                Some(tile) => {
                    self.players[player].add(tile);
                    debug!("{player} (robot) drew {tile}");
                    self.finish_turn(player, TurnAction::Draw { kept: Some(tile.id) });
                    Ok(RobotAction::Drew(tile))
                }
                None => {
                    debug!("{player} (robot) passes on an empty pool");
                    self.finish_turn(player, TurnAction::Draw { kept: None });
                    Ok(RobotAction::PoolEmpty)
                }
            },
        }
    }

    /// Snapshot for the rendering layer, from one seat's point of view.
    ///
    /// Other seats' hands are reduced to their sizes.
    #[must_use]
    pub fn view(&self, viewer: PlayerId) -> Option<GameView> {
        let seat = self.player(viewer)?;
        Some(GameView {
            viewer,
            hand: seat.hand().to_vec(),
            board: self.board.rows().to_vec(),
            hand_sizes: self.players.iter().map(|(_, p)| p.hand().len()).collect(),
            ice_broken: self.players.iter().map(|(_, p)| p.ice_broken()).collect(),
            pool_size: self.pool.len(),
            current_player: self.current,
            round: self.round,
            phase: self.phase(),
            draw_offer: self.pending_offer.filter(|_| viewer == self.current),
            winner: self.winner,
        })
    }

    // === Internals ===

    fn check_can_act(&self, player: PlayerId) -> Result<(), GameError> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }
        if player != self.current {
            return Err(GameError::NotYourTurn {
                current: self.current,
                requested: player,
            });
        }
        if self.pending_offer.is_some() {
            return Err(GameError::DrawPending);
        }
        Ok(())
    }

    fn selected_tiles(&self, player: PlayerId, selected: &[TileId]) -> Result<Vec<Tile>, GameError> {
        let hand = &self.players[player];
        let mut seen = FxHashSet::default();
        selected
            .iter()
            .map(|&id| {
                if !seen.insert(id) {
                    return Err(GameError::DuplicateTile(id));
                }
                hand.find(id).ok_or(GameError::TileNotInHand { player, tile: id })
            })
            .collect()
    }

    /// First row that stays valid with `tiles` appended or prepended.
    fn find_extension(&self, tiles: &[Tile]) -> Option<(usize, Vec<Tile>)> {
        self.board.rows().iter().enumerate().find_map(|(index, row)| {
            let appended: Vec<Tile> = row.iter().chain(tiles).copied().collect();
            if is_row_valid(&appended) {
                return Some((index, appended));
            }
            let prepended: Vec<Tile> = tiles.iter().chain(row).copied().collect();
            is_row_valid(&prepended).then_some((index, prepended))
        })
    }

    fn take_from_hand(&mut self, player: PlayerId, tiles: &[Tile]) -> TileIds {
        let ids: TileIds = tiles.iter().map(|t| t.id).collect();
        self.players[player].remove_all(&ids);
        ids
    }

    /// Returns `true` if this call broke the ice.
    fn break_ice(&mut self, player: PlayerId) -> bool {
        let seat = &mut self.players[player];
        if seat.ice_broken() {
            return false;
        }
        seat.break_ice();
        info!("{player} broke the ice");
        true
    }

    fn start_draw(&mut self, player: PlayerId) -> TurnOutcome {
        match self.pool.draw_two() {
            [Some(first), Some(second)] => {
                let offer = DrawOffer::new(first, second);
                debug!("{player} offered {first} or {second}");
                self.pending_offer = Some(offer);
                TurnOutcome::DrawOffered(offer)
            }
            [Some(only), None] => {
                self.players[player].add(only);
                debug!("{player} drew the last tile, {only}");
                self.finish_turn(player, TurnAction::Draw { kept: Some(only.id) });
                TurnOutcome::Drew(only)
            }
            _ => {
                debug!("Pool empty, {player} passes");
                self.finish_turn(player, TurnAction::Draw { kept: None });
                TurnOutcome::PoolEmpty
            }
        }
    }

    /// Record the action, check for a win, and pass to the next seat.
    fn finish_turn(&mut self, player: PlayerId, action: TurnAction) {
        let played = !action.tiles_played().is_empty();
        self.history.push_back(ActionRecord::new(player, action, self.round));

        if played && self.players[player].hand().is_empty() {
            info!("{player} emptied their hand and wins");
            self.winner = Some(player);
        }

        self.current = player.next(self.player_count());
        if self.current.index() == 0 {
            self.round += 1;
        }
        debug!("Turn passes to {} (round {})", self.current, self.round);
    }
}

/// Serializable view of a game for one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub viewer: PlayerId,
    pub hand: Vec<Tile>,
    pub board: Vec<Vec<Tile>>,
    pub hand_sizes: Vec<usize>,
    pub ice_broken: Vec<bool>,
    pub pool_size: usize,
    pub current_player: PlayerId,
    pub round: u32,
    pub phase: TurnPhase,
    /// Only shown to the seat that has to choose.
    pub draw_offer: Option<DrawOffer>,
    pub winner: Option<PlayerId>,
}
