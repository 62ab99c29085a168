//! Public views of a match for broadcast.

use serde::{Deserialize, Serialize};

use crate::board::{Tile, TileIndex};
use crate::core::{GameError, GameState, Player, PlayerId};
use crate::economy::Economy;
use crate::events::GameEvent;
use crate::rules::{DiceRoll, PendingAction};

/// One player as seen by every client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub cash: u64,
    pub position: TileIndex,
    pub holdings: Vec<TileIndex>,
    pub in_jail: bool,
    pub jail_turns: u8,
    pub immunity_turns: u8,
    pub active: bool,
    /// Cash plus holdings at liquidation value.
    pub valuation: u64,
}

impl PlayerSnapshot {
    fn capture(state: &GameState, player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            cash: player.cash,
            position: player.position,
            holdings: player.holdings.to_vec(),
            in_jail: player.in_jail,
            jail_turns: player.jail_turns,
            immunity_turns: player.immunity_turns,
            active: player.active,
            valuation: Economy::valuation(&state.board, player),
        }
    }
}

/// Everything a client needs to render the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub tiles: Vec<Tile>,
    pub players: Vec<PlayerSnapshot>,
    /// Whose turn it is, once the game has started.
    pub current: Option<PlayerId>,
    pub doubles_streak: u8,
    pub last_roll: Option<DiceRoll>,
    pub pending: Option<PendingAction>,
    pub started: bool,
    pub winner: Option<PlayerId>,
    pub turn_number: u32,
}

impl GameSnapshot {
    /// Capture the public state of a match.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        Self {
            tiles: state.board.tiles().cloned().collect(),
            players: state
                .players
                .iter()
                .map(|p| PlayerSnapshot::capture(state, p))
                .collect(),
            current: state
                .started
                .then(|| state.current_player_id())
                .flatten(),
            doubles_streak: state.doubles_streak,
            last_roll: state.last_roll,
            pending: state.pending.current().cloned(),
            started: state.started,
            winner: state.winner,
            turn_number: state.turn_number,
        }
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GameError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// What an accepted operation produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Events, in the order they happened.
    pub events: Vec<GameEvent>,

    /// State after the operation.
    pub snapshot: GameSnapshot,
}

impl Outcome {
    /// Whether the operation ended the game.
    #[must_use]
    pub fn ended_game(&self) -> bool {
        self.events.iter().any(GameEvent::is_game_over)
    }

    /// The decision the operation opened, if any.
    #[must_use]
    pub fn required_action(&self) -> Option<&PendingAction> {
        self.events.iter().rev().find_map(|e| match e {
            GameEvent::ActionRequired { action } => Some(action),
            _ => None,
        })
    }
}
