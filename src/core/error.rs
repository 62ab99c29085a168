//! Error types for rejected operations.
//!
//! Every variant is recoverable: the operation that produced it left the
//! game state untouched. Bankruptcy is an economic outcome and is reported
//! through events, never as an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::DecisionKind;
use super::player::PlayerId;
use crate::board::TileIndex;

/// Why an operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("not your turn")]
    NotYourTurn,

    #[error("game is full")]
    GameFull,

    #[error("game has already started")]
    AlreadyStarted,

    #[error("need at least {required} players to start")]
    TooFewPlayers { required: usize },

    #[error("game has not started")]
    GameNotStarted,

    #[error("game is over")]
    GameOver,

    #[error("resolve the pending {0} action first")]
    ActionPending(DecisionKind),

    #[error("no matching {kind} action pending for {player} on tile {tile:?}")]
    NoMatchingPendingAction {
        player: PlayerId,
        kind: DecisionKind,
        tile: Option<TileIndex>,
    },

    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("invalid target tile {0}")]
    InvalidTarget(TileIndex),

    #[error("{0} is not in this game")]
    PlayerNotFound(PlayerId),

    #[error("{0} is not in jail")]
    NotInJail(PlayerId),

    #[error("snapshot encoding failed: {0}")]
    Snapshot(String),
}

impl From<bincode::Error> for GameError {
    fn from(err: bincode::Error) -> Self {
        GameError::Snapshot(err.to_string())
    }
}
