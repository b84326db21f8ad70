//! JSON-lines protocol for driving a match from stdin.

use serde::{Deserialize, Serialize};
use settlers_core::{
    GameAction, MatchConfig, PlayerColor, Tile, TileCorner, TileEdge, TilePosition,
};

/// One line read from stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Request {
    /// Apply an action for the acting player
    Action { action: GameAction },

    /// Throw the current match away and lay out a new one
    NewMatch { config: MatchConfig },

    /// Full match snapshot
    State,

    /// Actions the acting player may take
    LegalActions,

    /// Check a placement for the acting player without applying it
    CanBuildSettlement { corner: TileCorner },
    CanBuildRoad { edge: TileEdge },
    CanBuildCity { corner: TileCorner },

    /// Look up a tile
    TileAt { position: TilePosition },

    /// Ping for keepalive
    Ping,
}

/// One line written to stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Response {
    /// A new match was laid out
    MatchCreated { seed: u64, order: Vec<PlayerColor> },

    /// Action applied or rejected
    ActionResult {
        success: bool,
        events: Vec<serde_json::Value>,
        error: Option<String>,
    },

    /// Match snapshot
    GameState { state: serde_json::Value },

    /// Actions for the acting player
    LegalActions { actions: Vec<serde_json::Value> },

    /// Answer to a placement check
    Allowed { allowed: bool },

    /// Tile lookup result, `null` off the island
    Tile { tile: Option<Tile> },

    /// Error occurred
    Error { message: String },

    /// Pong response
    Pong,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request: Request = serde_json::from_str(
            r#"{"type":"Action","payload":{"action":{"BuildSettlement":{"x":7,"y":3}}}}"#,
        )
        .unwrap();
        match request {
            Request::Action {
                action: GameAction::BuildSettlement(corner),
            } => assert_eq!(corner, TileCorner::new(7, 3)),
            other => panic!("unexpected request {:?}", other),
        }

        let ping: Request = serde_json::from_str(r#"{"type":"Ping"}"#).unwrap();
        assert!(matches!(ping, Request::Ping));
    }

    #[test]
    fn test_response_shape() {
        let json = serde_json::to_string(&Response::Allowed { allowed: true }).unwrap();
        assert_eq!(json, r#"{"type":"Allowed","payload":{"allowed":true}}"#);
    }
}
