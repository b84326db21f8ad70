//! Match configuration.

use crate::player::PlayerColor;
use serde::{Deserialize, Serialize};

/// Everything needed to lay out a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Player colors in seating order, before the seats are shuffled
    pub colors: Vec<PlayerColor>,
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            colors: vec![PlayerColor::Red, PlayerColor::Blue, PlayerColor::White],
            seed: 0,
        }
    }
}

impl MatchConfig {
    pub fn new(colors: Vec<PlayerColor>, seed: u64) -> Self {
        Self { colors, seed }
    }

    /// Parse a comma separated list of color names such as `red,blue`.
    /// Returns the first name that is not a color on failure.
    pub fn parse_colors(list: &str) -> Result<Vec<PlayerColor>, String> {
        list.split(',')
            .filter(|name| !name.trim().is_empty())
            .map(|name| PlayerColor::from_name(name).ok_or_else(|| name.trim().to_string()))
            .collect()
    }
}
