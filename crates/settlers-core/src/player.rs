//! Player state and resource management.
//!
//! This module contains:
//! - Player struct with pieces, resources, development cards, and achievements
//! - BuildingSet for the fixed-capacity pools of roads, settlements, and cities
//! - ResourceHand for managing resource counts
//! - Development card kinds and the standard deck
//! - Building costs

use crate::board::Resource;
use crate::hex::{TileCorner, TileEdge};
use serde::{Deserialize, Serialize};

/// Seat of a player in the current turn order (0-3)
pub type PlayerId = usize;

/// Roads each player owns
pub const ROAD_CAPACITY: usize = 15;
/// Settlements each player owns
pub const SETTLEMENT_CAPACITY: usize = 5;
/// Cities each player owns
pub const CITY_CAPACITY: usize = 4;

/// Player color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    White,
    Blue,
    Orange,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 4] = [
        PlayerColor::Red,
        PlayerColor::White,
        PlayerColor::Blue,
        PlayerColor::Orange,
    ];

    /// Parse a color name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerColor::Red => "red",
            PlayerColor::White => "white",
            PlayerColor::Blue => "blue",
            PlayerColor::Orange => "orange",
        }
    }
}

/// Development card types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DevelopmentCard {
    /// Moves the robber, counts toward Largest Army
    Knight,
    /// Worth 1 VP
    VictoryPoint,
    /// Take all resources of one kind from every other player
    Monopoly,
    /// Build 2 roads for free
    BuildTwoRoads,
    /// Take any 2 resources from the bank
    TakeTwoResources,
}

impl DevelopmentCard {
    /// Number of cards in the standard deck
    pub const DECK_SIZE: usize = 25;

    /// The standard deck in printed order: 5 Victory Point, 2 Monopoly,
    /// 2 Build-Two-Roads, 2 Take-Two-Resources, 14 Knights
    pub fn standard_deck() -> Vec<DevelopmentCard> {
        let mut deck = Vec::with_capacity(Self::DECK_SIZE);
        deck.extend(std::iter::repeat(DevelopmentCard::VictoryPoint).take(5));
        deck.extend(std::iter::repeat(DevelopmentCard::Monopoly).take(2));
        deck.extend(std::iter::repeat(DevelopmentCard::BuildTwoRoads).take(2));
        deck.extend(std::iter::repeat(DevelopmentCard::TakeTwoResources).take(2));
        deck.extend(std::iter::repeat(DevelopmentCard::Knight).take(14));
        deck
    }
}

/// A hand of resources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHand {
    pub lumber: u32,
    pub brick: u32,
    pub wool: u32,
    pub ore: u32,
    pub grain: u32,
}

impl ResourceHand {
    /// Create an empty hand
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand with specific amounts
    pub const fn with_amounts(lumber: u32, brick: u32, wool: u32, ore: u32, grain: u32) -> Self {
        Self {
            lumber,
            brick,
            wool,
            ore,
            grain,
        }
    }

    /// Total number of resource cards
    pub fn total(&self) -> u32 {
        self.lumber + self.brick + self.wool + self.ore + self.grain
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Get count of a specific resource
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Lumber => self.lumber,
            Resource::Brick => self.brick,
            Resource::Wool => self.wool,
            Resource::Ore => self.ore,
            Resource::Grain => self.grain,
        }
    }

    /// Add resources to hand
    pub fn add(&mut self, resource: Resource, amount: u32) {
        match resource {
            Resource::Lumber => self.lumber += amount,
            Resource::Brick => self.brick += amount,
            Resource::Wool => self.wool += amount,
            Resource::Ore => self.ore += amount,
            Resource::Grain => self.grain += amount,
        }
    }

    /// Check if can afford a cost
    pub fn can_afford(&self, cost: &ResourceHand) -> bool {
        self.lumber >= cost.lumber
            && self.brick >= cost.brick
            && self.wool >= cost.wool
            && self.ore >= cost.ore
            && self.grain >= cost.grain
    }

    /// Subtract a cost, leaving the hand untouched and returning false if it
    /// cannot be paid in full
    pub fn try_subtract(&mut self, cost: &ResourceHand) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.lumber -= cost.lumber;
        self.brick -= cost.brick;
        self.wool -= cost.wool;
        self.ore -= cost.ore;
        self.grain -= cost.grain;
        true
    }
}

/// Building costs
pub mod costs {
    use super::ResourceHand;

    /// Cost to build a road: 1 lumber, 1 brick
    pub const ROAD: ResourceHand = ResourceHand::with_amounts(1, 1, 0, 0, 0);

    /// Cost to build a settlement: 1 lumber, 1 brick, 1 wool, 1 grain
    pub const SETTLEMENT: ResourceHand = ResourceHand::with_amounts(1, 1, 1, 0, 1);

    /// Cost to upgrade to city: 3 ore, 2 grain
    pub const CITY: ResourceHand = ResourceHand::with_amounts(0, 0, 0, 3, 2);

    /// Cost to buy a development card: 1 wool, 1 ore, 1 grain
    pub const DEVELOPMENT_CARD: ResourceHand = ResourceHand::with_amounts(0, 0, 1, 1, 1);
}

/// A fixed-capacity pool of placed pieces, in build order.
///
/// Only placed pieces are stored, so there is no "unset" slot and removing a
/// piece keeps the rest contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingSet<T> {
    capacity: usize,
    built: Vec<T>,
}

impl<T: Copy + PartialEq> BuildingSet<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            built: Vec::with_capacity(capacity),
        }
    }

    /// Place a piece. Returns false when every piece is already on the board.
    pub fn add(&mut self, position: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.built.push(position);
        true
    }

    /// Take a piece back off the board. Returns false if none stands there.
    pub fn remove(&mut self, position: &T) -> bool {
        match self.built.iter().position(|p| p == position) {
            Some(index) => {
                self.built.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, position: &T) -> bool {
        self.built.contains(position)
    }

    /// Number of pieces on the board
    pub fn count(&self) -> usize {
        self.built.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pieces still in the player's supply
    pub fn remaining(&self) -> usize {
        self.capacity - self.built.len()
    }

    pub fn is_full(&self) -> bool {
        self.built.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.built.is_empty()
    }

    /// Placed pieces in build order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.built.iter()
    }

    /// The most recently placed piece
    pub fn last(&self) -> Option<&T> {
        self.built.last()
    }
}

/// A single player's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub color: PlayerColor,
    pub roads: BuildingSet<TileEdge>,
    pub settlements: BuildingSet<TileCorner>,
    pub cities: BuildingSet<TileCorner>,
    pub resources: ResourceHand,
    /// Development cards dealt to this player, in purchase order
    pub development_cards: Vec<DevelopmentCard>,
    /// Longest Road holder flag; never awarded by the engine yet
    pub has_longest_road: bool,
    /// Largest Army holder flag; never awarded by the engine yet
    pub has_largest_army: bool,
}

impl Player {
    /// Create a new player with a full supply of pieces
    pub fn new(color: PlayerColor) -> Self {
        Self {
            color,
            roads: BuildingSet::new(ROAD_CAPACITY),
            settlements: BuildingSet::new(SETTLEMENT_CAPACITY),
            cities: BuildingSet::new(CITY_CAPACITY),
            resources: ResourceHand::new(),
            development_cards: Vec::new(),
            has_longest_road: false,
            has_largest_army: false,
        }
    }

    /// Whether this player has a settlement or a city on the corner
    pub fn has_building_on(&self, corner: &TileCorner) -> bool {
        self.settlements.contains(corner) || self.cities.contains(corner)
    }

    pub fn has_road_on(&self, edge: &TileEdge) -> bool {
        self.roads.contains(edge)
    }

    /// Resources produced per matching roll by this player's building on the
    /// corner: 1 for a settlement, 2 for a city
    pub fn yield_at(&self, corner: &TileCorner) -> u32 {
        let settlements = self.settlements.iter().filter(|s| *s == corner).count() as u32;
        let cities = self.cities.iter().filter(|c| *c == corner).count() as u32;
        settlements + 2 * cities
    }

    pub fn remaining_roads(&self) -> usize {
        self.roads.remaining()
    }

    pub fn remaining_settlements(&self) -> usize {
        self.settlements.remaining()
    }

    pub fn remaining_cities(&self) -> usize {
        self.cities.remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_hand_total() {
        let hand = ResourceHand::with_amounts(1, 2, 3, 4, 5);
        assert_eq!(hand.total(), 15);
        assert_eq!(hand.get(Resource::Ore), 4);
    }

    #[test]
    fn test_resource_hand_can_afford() {
        let hand = ResourceHand::with_amounts(2, 2, 2, 2, 2);
        assert!(hand.can_afford(&costs::SETTLEMENT));

        let expensive = ResourceHand::with_amounts(3, 0, 0, 0, 0);
        assert!(!hand.can_afford(&expensive));
    }

    #[test]
    fn test_try_subtract_is_all_or_nothing() {
        let mut hand = ResourceHand::with_amounts(0, 1, 1, 3, 1);
        assert!(!hand.try_subtract(&costs::CITY));
        assert_eq!(hand, ResourceHand::with_amounts(0, 1, 1, 3, 1));

        hand.add(Resource::Grain, 1);
        assert!(hand.try_subtract(&costs::CITY));
        assert_eq!(hand, ResourceHand::with_amounts(0, 1, 1, 0, 0));
    }

    #[test]
    fn test_building_costs() {
        assert_eq!(costs::ROAD.total(), 2);
        assert_eq!(costs::SETTLEMENT.total(), 4);
        assert_eq!(costs::CITY.total(), 5);
        assert_eq!(costs::DEVELOPMENT_CARD.total(), 3);
    }

    #[test]
    fn test_dev_card_deck_composition() {
        let deck = DevelopmentCard::standard_deck();
        assert_eq!(deck.len(), DevelopmentCard::DECK_SIZE);

        let count = |kind| deck.iter().filter(|c| **c == kind).count();
        assert_eq!(count(DevelopmentCard::Knight), 14);
        assert_eq!(count(DevelopmentCard::VictoryPoint), 5);
        assert_eq!(count(DevelopmentCard::Monopoly), 2);
        assert_eq!(count(DevelopmentCard::BuildTwoRoads), 2);
        assert_eq!(count(DevelopmentCard::TakeTwoResources), 2);
    }

    #[test]
    fn test_building_set_capacity() {
        let mut set = BuildingSet::new(2);
        assert!(set.add(TileCorner::new(1, 1)));
        assert!(set.add(TileCorner::new(3, 1)));
        assert!(!set.add(TileCorner::new(5, 1)));
        assert!(set.is_full());
        assert_eq!(set.remaining(), 0);
    }

    #[test]
    fn test_building_set_remove_keeps_order() {
        let mut set = BuildingSet::new(5);
        for x in [2, 4, 6] {
            set.add(TileCorner::new(x, 2));
        }

        assert!(set.remove(&TileCorner::new(4, 2)));
        assert!(!set.remove(&TileCorner::new(4, 2)));

        let left: Vec<_> = set.iter().copied().collect();
        assert_eq!(left, vec![TileCorner::new(2, 2), TileCorner::new(6, 2)]);
        assert_eq!(set.remaining(), 3);
    }

    #[test]
    fn test_new_player_has_full_supply() {
        let player = Player::new(PlayerColor::Blue);
        assert_eq!(player.remaining_roads(), 15);
        assert_eq!(player.remaining_settlements(), 5);
        assert_eq!(player.remaining_cities(), 4);
        assert!(player.resources.is_empty());
        assert!(!player.has_longest_road && !player.has_largest_army);
    }

    #[test]
    fn test_yield_at() {
        let mut player = Player::new(PlayerColor::Red);
        let corner = TileCorner::new(7, 3);
        assert_eq!(player.yield_at(&corner), 0);

        player.settlements.add(corner);
        assert_eq!(player.yield_at(&corner), 1);

        player.settlements.remove(&corner);
        player.cities.add(corner);
        assert_eq!(player.yield_at(&corner), 2);
        assert!(player.has_building_on(&corner));
    }

    #[test]
    fn test_color_names() {
        assert_eq!(PlayerColor::from_name(" Orange "), Some(PlayerColor::Orange));
        assert_eq!(PlayerColor::from_name("purple"), None);
        for color in PlayerColor::ALL {
            assert_eq!(PlayerColor::from_name(color.name()), Some(color));
        }
    }
}
