//! Game board representation including tiles, terrain, and harbors.
//!
//! This module contains:
//! - Resource and terrain types
//! - Harbor kinds and their docking side
//! - The fixed 37-tile island layout and its seeded generator
//! - Board query methods
//!
//! The island layout never changes: water, harbor, and land slots are fixed,
//! and only which terrain and which harbor kind land in those slots is
//! shuffled. Dice numbers follow a fixed spiral over the land slots, so they
//! are determined by where the desert ends up.

use crate::hex::{Direction, TileEdge, TilePosition};
use crate::rng::GameRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Lumber,
    Brick,
    Wool,
    Ore,
    Grain,
}

impl Resource {
    /// All resource types
    pub const ALL: [Resource; 5] = [
        Resource::Lumber,
        Resource::Brick,
        Resource::Wool,
        Resource::Ore,
        Resource::Grain,
    ];
}

/// Terrain of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Hills,
    Pasture,
    Mountains,
    Field,
    Forest,
    /// No production, holds the robber at the start
    Desert,
    /// Surrounds the island, may carry a harbor
    Water,
}

impl Terrain {
    /// The resource this terrain produces, if any
    pub fn resource(&self) -> Option<Resource> {
        match self {
            Terrain::Hills => Some(Resource::Brick),
            Terrain::Pasture => Some(Resource::Wool),
            Terrain::Mountains => Some(Resource::Ore),
            Terrain::Field => Some(Resource::Grain),
            Terrain::Forest => Some(Resource::Lumber),
            Terrain::Desert | Terrain::Water => None,
        }
    }

    /// Everything but water counts as land, the desert included
    pub fn is_land(&self) -> bool {
        !matches!(self, Terrain::Water)
    }
}

/// Harbor types for maritime trading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarborKind {
    /// 3:1 trade any resource
    Generic,
    /// 2:1 trade for a specific resource
    Specific(Resource),
}

impl HarborKind {
    /// The exchange rate for this harbor
    pub fn rate(&self) -> u32 {
        match self {
            HarborKind::Generic => 3,
            HarborKind::Specific(_) => 2,
        }
    }
}

/// A harbor on a water tile, docking on the side facing `direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Harbor {
    pub kind: HarborKind,
    pub direction: Direction,
}

/// A single tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub position: TilePosition,
    pub terrain: Terrain,
    /// Dice number that triggers production (2-12 without 7, None for desert/water)
    pub number: Option<u8>,
    /// Only ever set on water tiles
    pub harbor: Option<Harbor>,
}

impl Tile {
    fn water(position: TilePosition) -> Self {
        Self {
            position,
            terrain: Terrain::Water,
            number: None,
            harbor: None,
        }
    }

    pub fn is_land(&self) -> bool {
        self.terrain.is_land()
    }

    /// Get the resource this tile produces, if any
    pub fn resource(&self) -> Option<Resource> {
        self.terrain.resource()
    }

    /// The edge ships dock at, if this tile carries a harbor
    pub fn harbor_dock(&self) -> Option<TileEdge> {
        self.harbor
            .map(|harbor| self.position.edge_towards(harbor.direction))
    }
}

/// Tile positions by slot, top row first
const TILE_POSITIONS: [TilePosition; 37] = [
    TilePosition::new(3, 0),
    TilePosition::new(5, 0),
    TilePosition::new(7, 0),
    TilePosition::new(9, 0),
    TilePosition::new(2, 1),
    TilePosition::new(4, 1),
    TilePosition::new(6, 1),
    TilePosition::new(8, 1),
    TilePosition::new(10, 1),
    TilePosition::new(1, 2),
    TilePosition::new(3, 2),
    TilePosition::new(5, 2),
    TilePosition::new(7, 2),
    TilePosition::new(9, 2),
    TilePosition::new(11, 2),
    TilePosition::new(0, 3),
    TilePosition::new(2, 3),
    TilePosition::new(4, 3),
    TilePosition::new(6, 3),
    TilePosition::new(8, 3),
    TilePosition::new(10, 3),
    TilePosition::new(12, 3),
    TilePosition::new(1, 4),
    TilePosition::new(3, 4),
    TilePosition::new(5, 4),
    TilePosition::new(7, 4),
    TilePosition::new(9, 4),
    TilePosition::new(11, 4),
    TilePosition::new(2, 5),
    TilePosition::new(4, 5),
    TilePosition::new(6, 5),
    TilePosition::new(8, 5),
    TilePosition::new(10, 5),
    TilePosition::new(3, 6),
    TilePosition::new(5, 6),
    TilePosition::new(7, 6),
    TilePosition::new(9, 6),
];

/// Water slots carrying a harbor, with the side the harbor docks on
const HARBOR_SLOTS: [(usize, Direction); 9] = [
    (0, Direction::BottomRight),
    (2, Direction::BottomLeft),
    (8, Direction::BottomLeft),
    (9, Direction::Right),
    (21, Direction::Left),
    (22, Direction::Right),
    (32, Direction::TopLeft),
    (33, Direction::TopRight),
    (35, Direction::TopLeft),
];

const HARBOR_KINDS: [HarborKind; 9] = [
    HarborKind::Specific(Resource::Lumber),
    HarborKind::Specific(Resource::Wool),
    HarborKind::Specific(Resource::Brick),
    HarborKind::Specific(Resource::Ore),
    HarborKind::Specific(Resource::Grain),
    HarborKind::Generic,
    HarborKind::Generic,
    HarborKind::Generic,
    HarborKind::Generic,
];

const LAND_SLOTS: [usize; 19] = [
    5, 6, 7, 10, 11, 12, 13, 16, 17, 18, 19, 20, 23, 24, 25, 26, 29, 30, 31,
];

const TERRAINS: [Terrain; 19] = [
    Terrain::Desert,
    Terrain::Hills,
    Terrain::Hills,
    Terrain::Hills,
    Terrain::Mountains,
    Terrain::Mountains,
    Terrain::Mountains,
    Terrain::Pasture,
    Terrain::Pasture,
    Terrain::Pasture,
    Terrain::Pasture,
    Terrain::Forest,
    Terrain::Forest,
    Terrain::Forest,
    Terrain::Forest,
    Terrain::Field,
    Terrain::Field,
    Terrain::Field,
    Terrain::Field,
];

/// Spiral over the land slots, starting at the south-west coast
const NUMBER_ORDER: [usize; 19] = [
    16, 23, 29, 30, 31, 26, 20, 13, 7, 6, 5, 10, 17, 24, 25, 19, 12, 11, 18,
];

const NUMBERS: [u8; 18] = [5, 2, 6, 3, 8, 10, 9, 12, 11, 4, 8, 10, 9, 4, 5, 6, 3, 11];

/// The complete game board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// All 37 tiles in slot order
    tiles: Vec<Tile>,
    desert: TilePosition,
}

impl Board {
    /// Number of tiles on the island, water included
    pub const TILE_COUNT: usize = 37;

    /// Lattice extent `(width, height)` covered by tile positions
    pub const SIZE: (i32, i32) = (13, 7);

    /// Lay out a board. Draws from `rng` for the harbor shuffle first, then the
    /// terrain shuffle.
    pub fn generate(rng: &mut GameRng) -> Self {
        let mut harbor_kinds = HARBOR_KINDS;
        rng.shuffle(&mut harbor_kinds);
        let mut terrains = TERRAINS;
        rng.shuffle(&mut terrains);

        let mut tiles: Vec<Tile> = TILE_POSITIONS.iter().map(|&p| Tile::water(p)).collect();

        for (&(slot, direction), kind) in HARBOR_SLOTS.iter().zip(harbor_kinds) {
            tiles[slot].harbor = Some(Harbor { kind, direction });
        }

        let mut desert = TILE_POSITIONS[LAND_SLOTS[0]];
        for (&slot, terrain) in LAND_SLOTS.iter().zip(terrains) {
            tiles[slot].terrain = terrain;
            if terrain == Terrain::Desert {
                desert = tiles[slot].position;
            }
        }

        let mut numbers = NUMBERS.iter().copied();
        for slot in NUMBER_ORDER {
            if tiles[slot].terrain != Terrain::Desert {
                tiles[slot].number = numbers.next();
            }
        }

        debug!(seed = rng.seed(), ?desert, "board generated");
        Self { tiles, desert }
    }

    /// All tiles, water included, in slot order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get a tile by position
    pub fn tile_at(&self, position: TilePosition) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.position == position)
    }

    /// Whether a land tile (desert included) lies at the position
    pub fn is_land(&self, position: TilePosition) -> bool {
        self.tile_at(position).map_or(false, Tile::is_land)
    }

    pub fn land_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| t.is_land())
    }

    /// Water tiles that carry a harbor
    pub fn harbors(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| t.harbor.is_some())
    }

    /// Where the desert, and so the robber's starting tile, ended up
    pub fn desert(&self) -> TilePosition {
        self.desert
    }
}
