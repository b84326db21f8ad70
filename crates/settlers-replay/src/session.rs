//! A single hosted match.

use settlers_core::{Game, GameAction, GameError, GameEvent, MatchConfig, PlayerColor};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::protocol::{Request, Response};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Could not create match: {0}")]
    Setup(#[from] GameError),

    #[error("Could not encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The match being driven plus every action accepted so far.
pub struct Session {
    pub config: MatchConfig,
    pub game: Game,
    /// Accepted actions in order; replaying them on a fresh match with the
    /// same config reproduces `game`
    pub history: Vec<GameAction>,
}

impl Session {
    pub fn new(config: MatchConfig) -> Result<Self, SessionError> {
        let game = Game::from_config(&config)?;
        info!(seed = config.seed, players = config.colors.len(), "session opened");
        Ok(Self {
            config,
            game,
            history: Vec::new(),
        })
    }

    pub fn seating(&self) -> Vec<PlayerColor> {
        self.game.players().iter().map(|p| p.color).collect()
    }

    pub fn created(&self) -> Response {
        Response::MatchCreated {
            seed: self.game.seed(),
            order: self.seating(),
        }
    }

    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        let events = self.game.apply(action)?;
        self.history.push(action);
        Ok(events)
    }

    /// Answer one request. Rule violations come back as responses; only a
    /// failure to encode one is an error.
    pub fn handle(&mut self, request: Request) -> Result<Response, SessionError> {
        debug!(?request, "request");
        let response = match request {
            Request::Action { action } => match self.apply_action(action) {
                Ok(events) => Response::ActionResult {
                    success: true,
                    events: events
                        .iter()
                        .map(serde_json::to_value)
                        .collect::<Result<_, _>>()?,
                    error: None,
                },
                Err(e) => {
                    warn!(?action, error = %e, "action rejected");
                    Response::ActionResult {
                        success: false,
                        events: Vec::new(),
                        error: Some(e.to_string()),
                    }
                }
            },
            Request::NewMatch { config } => match Session::new(config) {
                Ok(session) => {
                    *self = session;
                    self.created()
                }
                Err(e) => Response::Error {
                    message: e.to_string(),
                },
            },
            Request::State => Response::GameState {
                state: serde_json::to_value(&self.game)?,
            },
            Request::LegalActions => Response::LegalActions {
                actions: self
                    .game
                    .legal_actions()
                    .iter()
                    .map(serde_json::to_value)
                    .collect::<Result<_, _>>()?,
            },
            Request::CanBuildSettlement { corner } => Response::Allowed {
                allowed: self.game.can_build_settlement_at(corner),
            },
            Request::CanBuildRoad { edge } => Response::Allowed {
                allowed: self.game.can_build_road_at(edge),
            },
            Request::CanBuildCity { corner } => Response::Allowed {
                allowed: self.game.can_build_city_at(corner),
            },
            Request::TileAt { position } => Response::Tile {
                tile: self.game.tile_at(position).copied(),
            },
            Request::Ping => Response::Pong,
        };
        Ok(response)
    }
}
