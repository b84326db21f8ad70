//! Settlers - a hex-island settlement-building game engine
//!
//! This crate provides the core game logic, including:
//! - Lattice coordinate system for tiles, corners, and edges
//! - Seeded board generation with terrain, numbers, and harbors
//! - Player state and resource management
//! - Turn state machine with full rule enforcement
//!
//! # Architecture
//!
//! The engine performs no I/O and holds no global state. A `Game` is created
//! from a list of colors and a seed, then driven one command at a time; the
//! same seed and the same commands always produce the same match.
//!
//! # Modules
//!
//! - [`hex`]: Coordinate system for tiles, corners, and edges
//! - [`board`]: The 37-tile island and its generator
//! - [`rng`]: Seeded random sequence
//! - [`player`]: Player state, pieces, and resources
//! - [`turn`]: Turn state machine
//! - [`game`]: Build legality and commands
//! - [`actions`]: Actions, purchases, and resulting events
//! - [`config`]: Match configuration

pub mod actions;
pub mod board;
pub mod config;
pub mod game;
pub mod hex;
pub mod player;
pub mod rng;
pub mod turn;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent, Purchase};
pub use board::{Board, Harbor, HarborKind, Resource, Terrain, Tile};
pub use config::MatchConfig;
pub use game::{Game, GameError};
pub use hex::{Direction, TileCorner, TileEdge, TilePosition};
pub use player::{costs, BuildingSet, DevelopmentCard, Player, PlayerColor, PlayerId, ResourceHand};
pub use rng::GameRng;
pub use turn::{GamePhase, Turn};
