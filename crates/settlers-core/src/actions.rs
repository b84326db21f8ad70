//! Game actions that players can take.
//!
//! This module defines every command a player can issue, the purchase
//! catalogue, and the events that result from those commands.

use crate::board::Resource;
use crate::hex::{TileCorner, TileEdge, TilePosition};
use crate::player::{costs, DevelopmentCard, PlayerColor, PlayerId, ResourceHand};
use crate::turn::GamePhase;
use serde::{Deserialize, Serialize};

/// All possible actions a player can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Leave the lobby and open the first placement round
    Start,

    // ==================== Building ====================
    /// Place a settlement (setup or after buying one)
    BuildSettlement(TileCorner),
    /// Place a road (setup or after buying one)
    BuildRoad(TileEdge),
    /// Replace one of your settlements with a city (after buying one)
    BuildCity(TileCorner),

    // ==================== Turn Actions ====================
    /// Pay for a piece or a development card
    Buy(Purchase),
    /// Roll the dice (must be done at start of turn)
    RollDice,
    /// End your turn
    EndTurn,
}

/// Things a player can pay for from the build menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purchase {
    Road,
    Settlement,
    City,
    DevelopmentCard,
}

impl Purchase {
    /// Build menu order
    pub const ALL: [Purchase; 4] = [
        Purchase::Road,
        Purchase::Settlement,
        Purchase::City,
        Purchase::DevelopmentCard,
    ];

    /// Resolve a build menu entry.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a menu entry; callers only hold indices
    /// they got from `Purchase::ALL`.
    pub fn from_index(index: usize) -> Purchase {
        match Self::ALL.get(index) {
            Some(purchase) => *purchase,
            None => panic!("illegal purchase index {index}"),
        }
    }

    pub fn cost(&self) -> ResourceHand {
        match self {
            Purchase::Road => costs::ROAD,
            Purchase::Settlement => costs::SETTLEMENT,
            Purchase::City => costs::CITY,
            Purchase::DevelopmentCard => costs::DEVELOPMENT_CARD,
        }
    }
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The acting seat or its phase changed
    PhaseChanged { player: PlayerId, phase: GamePhase },

    /// A settlement was built
    SettlementBuilt {
        player: PlayerId,
        location: TileCorner,
    },

    /// A road was built
    RoadBuilt { player: PlayerId, location: TileEdge },

    /// A settlement was upgraded to a city
    CityBuilt {
        player: PlayerId,
        location: TileCorner,
    },

    /// The second settlement paid out its neighboring tiles
    StartingResourcesGranted {
        player: PlayerId,
        resources: ResourceHand,
    },

    /// Resources were paid for an item from the build menu
    Purchased { player: PlayerId, purchase: Purchase },

    /// A development card was dealt from the deck
    DevelopmentCardDealt {
        player: PlayerId,
        card: DevelopmentCard,
    },

    /// Dice were rolled
    DiceRolled {
        player: PlayerId,
        roll: (u8, u8),
        total: u8,
    },

    /// Resources were distributed after a dice roll
    ResourcesDistributed {
        total: u8,
        /// One entry per producing tile and building
        distributions: Vec<(PlayerId, Resource, u32)>,
        /// Tile that would have produced but holds the robber
        blocked: Option<TilePosition>,
    },

    /// Seats were reassigned after the placement rounds
    TurnOrderShuffled { order: Vec<PlayerColor> },

    /// Turn ended
    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
    },
}
