//! Core game state machine.
//!
//! This module contains the main `Game` struct and all rule logic. Every
//! command re-checks the same predicate a caller would use and fails with a
//! `GameError` without touching the game, so no sequence of calls can break
//! the board's invariants.

use crate::actions::{GameAction, GameEvent, Purchase};
use crate::board::{Board, HarborKind, Resource, Tile};
use crate::config::MatchConfig;
use crate::hex::{TileCorner, TileEdge, TilePosition};
use crate::player::{DevelopmentCard, Player, PlayerColor, PlayerId, ResourceHand};
use crate::rng::GameRng;
use crate::turn::{GamePhase, Turn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Fewest players a match can start with
pub const MIN_PLAYERS: usize = 2;
/// Most players a match can start with
pub const MAX_PLAYERS: usize = 4;

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("A match needs 2 to 4 players, got {0}")]
    InvalidPlayerCount(usize),

    #[error("Color {0:?} was picked twice")]
    DuplicateColor(PlayerColor),

    #[error("Invalid action for current phase")]
    InvalidPhase,

    #[error("Invalid placement location")]
    InvalidLocation,

    #[error("Cannot afford this")]
    CannotAfford,

    #[error("No pieces remaining")]
    NoPiecesRemaining,

    #[error("No development cards left in deck")]
    EmptyDeck,

    #[error("Nowhere to build this")]
    NoBuildableCorner,
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    /// Players in turn order
    players: Vec<Player>,
    turn: Turn,
    robber: TilePosition,
    /// Shuffled deck; cards before `cards_dealt` are in players' hands
    development_cards: Vec<DevelopmentCard>,
    cards_dealt: usize,
    dice: [u8; 2],
    rng: GameRng,
}

impl Game {
    /// Lay out a new match. Colors are seated in the given order and then
    /// shuffled, so seat 0 is not necessarily `colors[0]`.
    pub fn new(colors: &[PlayerColor], seed: u64) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&colors.len()) {
            return Err(GameError::InvalidPlayerCount(colors.len()));
        }
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(GameError::DuplicateColor(*color));
            }
        }

        let mut rng = GameRng::new(seed);
        let board = Board::generate(&mut rng);
        let robber = board.desert();

        let mut game = Self {
            board,
            players: colors.iter().map(|&c| Player::new(c)).collect(),
            turn: Turn::default(),
            robber,
            development_cards: DevelopmentCard::standard_deck(),
            cards_dealt: 0,
            dice: [0, 0],
            rng,
        };
        game.shuffle_seats();
        game.rng.shuffle(&mut game.development_cards);

        info!(
            seed,
            players = game.players.len(),
            robber = ?game.robber,
            "match created"
        );
        Ok(game)
    }

    pub fn from_config(config: &MatchConfig) -> Result<Self, GameError> {
        Self::new(&config.colors, config.seed)
    }

    // ==================== Queries ====================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tiles(&self) -> &[Tile] {
        self.board.tiles()
    }

    /// Get a tile by position. Positions off the island are a plain miss.
    pub fn tile_at(&self, position: TilePosition) -> Option<&Tile> {
        self.board.tile_at(position)
    }

    /// Players in turn order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.turn.player]
    }

    pub fn current_player_id(&self) -> PlayerId {
        self.turn.player
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn phase(&self) -> GamePhase {
        self.turn.phase
    }

    pub fn robber(&self) -> TilePosition {
        self.robber
    }

    /// Last roll, `[0, 0]` before the first one
    pub fn dice(&self) -> [u8; 2] {
        self.dice
    }

    pub fn cards_dealt(&self) -> usize {
        self.cards_dealt
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn remaining_roads(&self) -> usize {
        self.current_player().remaining_roads()
    }

    pub fn remaining_settlements(&self) -> usize {
        self.current_player().remaining_settlements()
    }

    pub fn remaining_cities(&self) -> usize {
        self.current_player().remaining_cities()
    }

    /// Buildings count 1 (settlement) or 2 (city), Victory Point cards 1,
    /// and each achievement 2
    pub fn victory_points(&self, id: PlayerId) -> u32 {
        let Some(player) = self.players.get(id) else {
            return 0;
        };
        let cards = player
            .development_cards
            .iter()
            .filter(|c| **c == DevelopmentCard::VictoryPoint)
            .count();
        let mut points = player.settlements.count() + 2 * player.cities.count() + cards;
        if player.has_longest_road {
            points += 2;
        }
        if player.has_largest_army {
            points += 2;
        }
        points as u32
    }

    /// Harbors the player has a building at
    pub fn harbors_of(&self, id: PlayerId) -> Vec<HarborKind> {
        let Some(player) = self.players.get(id) else {
            return Vec::new();
        };
        self.board
            .harbors()
            .filter_map(|tile| {
                let harbor = tile.harbor?;
                let dock = tile.harbor_dock()?;
                dock.adjacent_corners()
                    .iter()
                    .any(|c| player.has_building_on(c))
                    .then_some(harbor.kind)
            })
            .collect()
    }

    // ==================== Build Legality ====================

    /// Free corner on the island with no building one step away
    fn is_settlement_site(&self, corner: TileCorner) -> bool {
        let touches_land = corner
            .adjacent_tiles()
            .iter()
            .any(|t| self.board.is_land(*t));
        if !touches_land {
            return false;
        }

        let occupied = |c: &TileCorner| self.players.iter().any(|p| p.has_building_on(c));
        !occupied(&corner) && !corner.adjacent_corners().iter().any(occupied)
    }

    /// Whether the current player may put a settlement on `corner`. Outside
    /// the placement settlements the corner must end one of their roads.
    pub fn can_build_settlement_at(&self, corner: TileCorner) -> bool {
        let player = self.current_player();
        if player.settlements.is_full() || !self.is_settlement_site(corner) {
            return false;
        }
        matches!(
            self.turn.phase,
            GamePhase::BuildingFirstSettlement | GamePhase::BuildingSecondSettlement
        ) || corner
                .adjacent_edges()
                .iter()
                .any(|e| player.has_road_on(e))
    }

    pub fn can_build_road_at(&self, edge: TileEdge) -> bool {
        let player = self.current_player();
        if player.roads.is_full() {
            return false;
        }
        if self.players.iter().any(|p| p.has_road_on(&edge)) {
            return false;
        }
        if !edge.adjacent_tiles().iter().any(|t| self.board.is_land(*t)) {
            return false;
        }

        let corners = edge.adjacent_corners();
        match self.turn.phase {
            GamePhase::BuildingFirstRoad => corners.iter().any(|c| player.has_building_on(c)),
            // The new settlement is the one without a road yet
            GamePhase::BuildingSecondRoad => corners.iter().any(|c| {
                player.settlements.contains(c)
                    && !c.adjacent_edges().iter().any(|e| player.has_road_on(e))
            }),
            _ => Self::extends_network(player, edge),
        }
    }

    /// Edge touches one of the player's buildings or roads
    fn extends_network(player: &Player, edge: TileEdge) -> bool {
        edge.adjacent_corners()
            .iter()
            .any(|c| player.has_building_on(c))
            || edge.adjacent_edges().iter().any(|e| player.has_road_on(e))
    }

    pub fn can_build_city_at(&self, corner: TileCorner) -> bool {
        let player = self.current_player();
        !player.cities.is_full() && player.settlements.contains(&corner)
    }

    /// Corners touching a land tile, in coordinate order
    fn island_corners(&self) -> BTreeSet<TileCorner> {
        self.board
            .land_tiles()
            .flat_map(|t| t.position.adjacent_corners())
            .collect()
    }

    fn island_edges(&self) -> BTreeSet<TileEdge> {
        self.board
            .land_tiles()
            .flat_map(|t| t.position.adjacent_edges())
            .collect()
    }

    pub fn legal_settlement_corners(&self) -> Vec<TileCorner> {
        self.island_corners()
            .into_iter()
            .filter(|c| self.can_build_settlement_at(*c))
            .collect()
    }

    pub fn legal_road_edges(&self) -> Vec<TileEdge> {
        self.island_edges()
            .into_iter()
            .filter(|e| self.can_build_road_at(*e))
            .collect()
    }

    pub fn legal_city_corners(&self) -> Vec<TileCorner> {
        let player = self.current_player();
        player
            .settlements
            .iter()
            .copied()
            .filter(|c| self.can_build_city_at(*c))
            .collect()
    }

    // ==================== Purchase Legality ====================

    /// Also requires a free edge the new road could extend the network to
    pub fn can_buy_road(&self) -> bool {
        let player = self.current_player();
        !player.roads.is_full()
            && player.resources.can_afford(&Purchase::Road.cost())
            && self.has_buildable_edge()
    }

    /// Also requires a corner at the end of one of the player's roads where
    /// the settlement could go
    pub fn can_buy_settlement(&self) -> bool {
        let player = self.current_player();
        !player.settlements.is_full()
            && player.resources.can_afford(&Purchase::Settlement.cost())
            && self.has_buildable_corner()
    }

    pub fn can_buy_city(&self) -> bool {
        let player = self.current_player();
        !player.cities.is_full()
            && !player.settlements.is_empty()
            && player.resources.can_afford(&Purchase::City.cost())
    }

    pub fn can_buy_development_card(&self) -> bool {
        self.cards_dealt < self.development_cards.len()
            && self
                .current_player()
                .resources
                .can_afford(&Purchase::DevelopmentCard.cost())
    }

    pub fn can_buy(&self, purchase: Purchase) -> bool {
        match purchase {
            Purchase::Road => self.can_buy_road(),
            Purchase::Settlement => self.can_buy_settlement(),
            Purchase::City => self.can_buy_city(),
            Purchase::DevelopmentCard => self.can_buy_development_card(),
        }
    }

    fn has_buildable_corner(&self) -> bool {
        self.current_player()
            .roads
            .iter()
            .flat_map(|e| e.adjacent_corners())
            .any(|c| self.is_settlement_site(c))
    }

    fn has_buildable_edge(&self) -> bool {
        let player = self.current_player();
        self.island_edges().into_iter().any(|edge| {
            !self.players.iter().any(|p| p.has_road_on(&edge))
                && Self::extends_network(player, edge)
        })
    }

    /// Every action the current player may take right now
    pub fn legal_actions(&self) -> Vec<GameAction> {
        let phase = self.turn.phase;
        match phase {
            GamePhase::NotStarted => vec![GameAction::Start],
            GamePhase::RollingDice => vec![GameAction::RollDice],
            GamePhase::ChoosingNextAction => Purchase::ALL
                .into_iter()
                .filter(|p| self.can_buy(*p))
                .map(GameAction::Buy)
                .chain(std::iter::once(GameAction::EndTurn))
                .collect(),
            GamePhase::BuildingNewCity => self
                .legal_city_corners()
                .into_iter()
                .map(GameAction::BuildCity)
                .collect(),
            _ if phase.is_placing_settlement() => self
                .legal_settlement_corners()
                .into_iter()
                .map(GameAction::BuildSettlement)
                .collect(),
            _ => self
                .legal_road_edges()
                .into_iter()
                .map(GameAction::BuildRoad)
                .collect(),
        }
    }

    // ==================== Commands ====================

    /// Apply any action for the current player
    pub fn apply(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        debug!(player = self.turn.player, ?action, "applying action");
        match action {
            GameAction::Start => self.start(),
            GameAction::BuildSettlement(corner) => self.build_settlement(corner),
            GameAction::BuildRoad(edge) => self.build_road(edge),
            GameAction::BuildCity(corner) => self.build_city(corner),
            GameAction::Buy(purchase) => self.buy(purchase),
            GameAction::RollDice => self.roll_dice(),
            GameAction::EndTurn => self.next_turn(),
        }
    }

    pub fn start(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let next = self.turn.start().ok_or(GameError::InvalidPhase)?;
        let mut events = Vec::new();
        self.advance(next, &mut events);
        Ok(events)
    }

    pub fn build_settlement(&mut self, corner: TileCorner) -> Result<Vec<GameEvent>, GameError> {
        let next = self.turn.settlement_built().ok_or(GameError::InvalidPhase)?;
        if self.current_player().settlements.is_full() {
            return Err(GameError::NoPiecesRemaining);
        }
        if !self.can_build_settlement_at(corner) {
            return Err(GameError::InvalidLocation);
        }

        let id = self.turn.player;
        self.players[id].settlements.add(corner);
        debug!(player = id, ?corner, "settlement built");
        let mut events = vec![GameEvent::SettlementBuilt {
            player: id,
            location: corner,
        }];

        if self.turn.phase == GamePhase::BuildingSecondSettlement {
            let mut granted = ResourceHand::new();
            for resource in corner
                .adjacent_tiles()
                .iter()
                .filter_map(|t| self.board.tile_at(*t))
                .filter_map(Tile::resource)
            {
                granted.add(resource, 1);
            }
            let player = &mut self.players[id];
            for resource in Resource::ALL {
                player.resources.add(resource, granted.get(resource));
            }
            trace!(player = id, ?granted, "starting resources");
            events.push(GameEvent::StartingResourcesGranted {
                player: id,
                resources: granted,
            });
        }

        self.advance(next, &mut events);
        Ok(events)
    }

    pub fn build_road(&mut self, edge: TileEdge) -> Result<Vec<GameEvent>, GameError> {
        let next = self
            .turn
            .road_built(self.players.len())
            .ok_or(GameError::InvalidPhase)?;
        if self.current_player().roads.is_full() {
            return Err(GameError::NoPiecesRemaining);
        }
        if !self.can_build_road_at(edge) {
            return Err(GameError::InvalidLocation);
        }

        let id = self.turn.player;
        self.players[id].roads.add(edge);
        debug!(player = id, ?edge, "road built");
        let mut events = vec![GameEvent::RoadBuilt {
            player: id,
            location: edge,
        }];

        if self.turn.phase == GamePhase::BuildingSecondRoad && next.phase == GamePhase::RollingDice
        {
            self.shuffle_seats();
            info!("placement rounds finished");
            events.push(GameEvent::TurnOrderShuffled {
                order: self.players.iter().map(|p| p.color).collect(),
            });
        }

        self.advance(next, &mut events);
        Ok(events)
    }

    pub fn build_city(&mut self, corner: TileCorner) -> Result<Vec<GameEvent>, GameError> {
        let next = self.turn.city_built().ok_or(GameError::InvalidPhase)?;
        if self.current_player().cities.is_full() {
            return Err(GameError::NoPiecesRemaining);
        }
        if !self.can_build_city_at(corner) {
            return Err(GameError::InvalidLocation);
        }

        let id = self.turn.player;
        let player = &mut self.players[id];
        let removed = player.settlements.remove(&corner);
        debug_assert!(removed, "city needs a settlement to replace");
        let added = player.cities.add(corner);
        debug_assert!(added, "city capacity checked above");
        debug!(player = id, ?corner, "city built");
        let mut events = vec![GameEvent::CityBuilt {
            player: id,
            location: corner,
        }];

        self.advance(next, &mut events);
        Ok(events)
    }

    /// Pay for a menu item. Pieces move on to their placement phase, a
    /// development card is dealt right away.
    pub fn buy(&mut self, purchase: Purchase) -> Result<Vec<GameEvent>, GameError> {
        let next = self
            .turn
            .purchased(purchase)
            .ok_or(GameError::InvalidPhase)?;

        let player = self.current_player();
        match purchase {
            Purchase::Road if player.roads.is_full() => {
                return Err(GameError::NoPiecesRemaining)
            }
            Purchase::Settlement if player.settlements.is_full() => {
                return Err(GameError::NoPiecesRemaining)
            }
            Purchase::City if player.cities.is_full() => {
                return Err(GameError::NoPiecesRemaining)
            }
            Purchase::DevelopmentCard if self.cards_dealt >= self.development_cards.len() => {
                return Err(GameError::EmptyDeck)
            }
            _ => {}
        }
        if !player.resources.can_afford(&purchase.cost()) {
            return Err(GameError::CannotAfford);
        }
        let nowhere = match purchase {
            Purchase::Settlement => !self.has_buildable_corner(),
            Purchase::City => player.settlements.is_empty(),
            Purchase::Road => !self.has_buildable_edge(),
            Purchase::DevelopmentCard => false,
        };
        if nowhere {
            return Err(GameError::NoBuildableCorner);
        }

        let id = self.turn.player;
        let paid = self.players[id].resources.try_subtract(&purchase.cost());
        debug_assert!(paid, "cost checked above");
        debug!(player = id, ?purchase, "purchased");
        let mut events = vec![GameEvent::Purchased {
            player: id,
            purchase,
        }];

        if purchase == Purchase::DevelopmentCard {
            let card = self.development_cards[self.cards_dealt];
            self.cards_dealt += 1;
            self.players[id].development_cards.push(card);
            events.push(GameEvent::DevelopmentCardDealt { player: id, card });
        }

        self.advance(next, &mut events);
        Ok(events)
    }

    pub fn buy_road(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.buy(Purchase::Road)
    }

    pub fn buy_settlement(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.buy(Purchase::Settlement)
    }

    pub fn buy_city(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.buy(Purchase::City)
    }

    pub fn buy_development_card(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.buy(Purchase::DevelopmentCard)
    }

    pub fn roll_dice(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let next = self.turn.dice_rolled().ok_or(GameError::InvalidPhase)?;

        let roll = (self.rng.die(), self.rng.die());
        let total = roll.0 + roll.1;
        self.dice = [roll.0, roll.1];
        debug!(player = self.turn.player, ?roll, "dice rolled");

        let mut events = vec![
            GameEvent::DiceRolled {
                player: self.turn.player,
                roll,
                total,
            },
            self.deal_resources(total),
        ];
        self.advance(next, &mut events);
        Ok(events)
    }

    pub fn next_turn(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let next = self
            .turn
            .next_turn(self.players.len())
            .ok_or(GameError::InvalidPhase)?;
        let mut events = vec![GameEvent::TurnEnded {
            player: self.turn.player,
            next_player: next.player,
        }];
        self.advance(next, &mut events);
        Ok(events)
    }

    /// Pay out every tile numbered `total` that the robber is not on: 1 per
    /// settlement and 2 per city on its corners. This is what a roll does
    /// after the dice land.
    pub fn deal_resources(&mut self, total: u8) -> GameEvent {
        let mut distributions = Vec::new();
        let mut blocked = None;

        for tile in self.board.tiles() {
            if tile.number != Some(total) {
                continue;
            }
            let Some(resource) = tile.resource() else {
                continue;
            };
            if tile.position == self.robber {
                blocked = Some(tile.position);
                continue;
            }

            for corner in tile.position.adjacent_corners() {
                for (id, player) in self.players.iter_mut().enumerate() {
                    let amount = player.yield_at(&corner);
                    if amount > 0 {
                        player.resources.add(resource, amount);
                        trace!(player = id, ?resource, amount, "resource credited");
                        distributions.push((id, resource, amount));
                    }
                }
            }
        }

        GameEvent::ResourcesDistributed {
            total,
            distributions,
            blocked,
        }
    }

    // ==================== Helper Methods ====================

    fn advance(&mut self, next: Turn, events: &mut Vec<GameEvent>) {
        if next != self.turn {
            debug!(from = ?self.turn, to = ?next, "turn advanced");
            events.push(GameEvent::PhaseChanged {
                player: next.player,
                phase: next.phase,
            });
        }
        self.turn = next;
    }

    /// Reseat players by drawing each next seat from those still standing
    fn shuffle_seats(&mut self) {
        let mut standing = std::mem::take(&mut self.players);
        while !standing.is_empty() {
            let pick = self.rng.below(standing.len());
            self.players.push(standing.remove(pick));
        }
    }
}
