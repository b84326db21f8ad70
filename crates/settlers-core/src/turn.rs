//! Turn state machine.
//!
//! The whole turn state is one `Turn` value: whose seat is acting and what
//! they are expected to do. Each transition function consumes an outcome
//! and returns the next `Turn`, or `None` when that outcome is not legal in
//! the current phase. `Game` only ever replaces its turn with a value
//! produced here.
//!
//! ```text
//! NotStarted
//!   -> BuildingFirstSettlement -> BuildingFirstRoad      (seats 0..n-1)
//!   -> BuildingSecondSettlement -> BuildingSecondRoad    (seats n-1..0)
//!   -> RollingDice <-> ChoosingNextAction <-> BuildingNew{Road,Settlement,City}
//! ```

use crate::actions::Purchase;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};

/// What the acting player is expected to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    BuildingFirstSettlement,
    BuildingFirstRoad,
    BuildingSecondSettlement,
    BuildingSecondRoad,
    RollingDice,
    ChoosingNextAction,
    BuildingNewRoad,
    BuildingNewSettlement,
    BuildingNewCity,
}

impl GamePhase {
    /// Initial placement phases, where pieces are free and settlements need
    /// no road
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            GamePhase::BuildingFirstSettlement
                | GamePhase::BuildingFirstRoad
                | GamePhase::BuildingSecondSettlement
                | GamePhase::BuildingSecondRoad
        )
    }

    pub fn is_placing_settlement(&self) -> bool {
        matches!(
            self,
            GamePhase::BuildingFirstSettlement
                | GamePhase::BuildingSecondSettlement
                | GamePhase::BuildingNewSettlement
        )
    }

    pub fn is_placing_road(&self) -> bool {
        matches!(
            self,
            GamePhase::BuildingFirstRoad | GamePhase::BuildingSecondRoad | GamePhase::BuildingNewRoad
        )
    }
}

/// Acting seat plus phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub player: PlayerId,
    pub phase: GamePhase,
}

impl Default for Turn {
    fn default() -> Self {
        Self::new(0, GamePhase::NotStarted)
    }
}

impl Turn {
    pub const fn new(player: PlayerId, phase: GamePhase) -> Self {
        Self { player, phase }
    }

    /// Seat 0 opens the first placement round
    pub fn start(self) -> Option<Turn> {
        match self.phase {
            GamePhase::NotStarted => Some(Turn::new(0, GamePhase::BuildingFirstSettlement)),
            _ => None,
        }
    }

    pub fn settlement_built(self) -> Option<Turn> {
        let phase = match self.phase {
            GamePhase::BuildingFirstSettlement => GamePhase::BuildingFirstRoad,
            GamePhase::BuildingSecondSettlement => GamePhase::BuildingSecondRoad,
            GamePhase::BuildingNewSettlement => GamePhase::ChoosingNextAction,
            _ => return None,
        };
        Some(Turn::new(self.player, phase))
    }

    /// The first round walks the seats forward, the second walks them back.
    /// The last second road hands seat 0 the dice.
    pub fn road_built(self, player_count: usize) -> Option<Turn> {
        match self.phase {
            GamePhase::BuildingFirstRoad => {
                let next = self.player + 1;
                if next < player_count {
                    Some(Turn::new(next, GamePhase::BuildingFirstSettlement))
                } else {
                    Some(Turn::new(
                        player_count.saturating_sub(1),
                        GamePhase::BuildingSecondSettlement,
                    ))
                }
            }
            GamePhase::BuildingSecondRoad => match self.player.checked_sub(1) {
                Some(previous) => Some(Turn::new(previous, GamePhase::BuildingSecondSettlement)),
                None => Some(Turn::new(0, GamePhase::RollingDice)),
            },
            GamePhase::BuildingNewRoad => {
                Some(Turn::new(self.player, GamePhase::ChoosingNextAction))
            }
            _ => None,
        }
    }

    pub fn city_built(self) -> Option<Turn> {
        match self.phase {
            GamePhase::BuildingNewCity => {
                Some(Turn::new(self.player, GamePhase::ChoosingNextAction))
            }
            _ => None,
        }
    }

    /// Paying for a piece moves on to placing it. A development card has no
    /// placement step.
    pub fn purchased(self, purchase: Purchase) -> Option<Turn> {
        if self.phase != GamePhase::ChoosingNextAction {
            return None;
        }
        let phase = match purchase {
            Purchase::Road => GamePhase::BuildingNewRoad,
            Purchase::Settlement => GamePhase::BuildingNewSettlement,
            Purchase::City => GamePhase::BuildingNewCity,
            Purchase::DevelopmentCard => GamePhase::ChoosingNextAction,
        };
        Some(Turn::new(self.player, phase))
    }

    pub fn dice_rolled(self) -> Option<Turn> {
        match self.phase {
            GamePhase::RollingDice => Some(Turn::new(self.player, GamePhase::ChoosingNextAction)),
            _ => None,
        }
    }

    pub fn next_turn(self, player_count: usize) -> Option<Turn> {
        match self.phase {
            GamePhase::ChoosingNextAction if player_count > 0 => Some(Turn::new(
                (self.player + 1) % player_count,
                GamePhase::RollingDice,
            )),
            _ => None,
        }
    }
}
