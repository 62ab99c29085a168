//! Events emitted by engine operations.
//!
//! Every accepted operation returns the events it produced, in order.
//! Callers forward them to clients; the engine never reads them back.

use serde::{Deserialize, Serialize};

use crate::board::TileIndex;
use crate::chance::{ChanceCard, ChanceOutcome};
use crate::core::{DecisionKind, PlayerId};
use crate::rules::{DiceRoll, Landing, PendingAction};

/// Something that happened during an operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerJoined {
        player: PlayerId,
        name: String,
    },

    GameStarted {
        first: PlayerId,
    },

    DiceRolled {
        player: PlayerId,
        roll: DiceRoll,
        doubles_streak: u8,
    },

    Moved {
        player: PlayerId,
        from: TileIndex,
        to: TileIndex,
        passed_start: bool,
    },

    Landed {
        player: PlayerId,
        tile: TileIndex,
        landing: Landing,
    },

    /// A chance card fired (also carried inside `Landed`).
    ChanceDrawn {
        player: PlayerId,
        card: ChanceCard,
        outcome: ChanceOutcome,
    },

    /// A decision is waiting on `action.player`.
    ActionRequired {
        action: PendingAction,
    },

    PropertyBought {
        player: PlayerId,
        tile: TileIndex,
        price: u64,
    },

    RentPaid {
        payer: PlayerId,
        creditor: PlayerId,
        tile: TileIndex,
        amount: u64,
    },

    Bankrupted {
        player: PlayerId,
        creditor: PlayerId,
        recovered: u64,
        released: Vec<TileIndex>,
    },

    Upgraded {
        player: PlayerId,
        tile: TileIndex,
        houses: u8,
        cost: u64,
    },

    Teleported {
        player: PlayerId,
        from: TileIndex,
        to: TileIndex,
    },

    /// The holder passed on a decision.
    DecisionDeclined {
        player: PlayerId,
        kind: DecisionKind,
    },

    /// A decision was dropped because its holder left.
    DecisionCancelled {
        player: PlayerId,
        kind: DecisionKind,
    },

    TurnChanged {
        player: PlayerId,
        turn: u32,
    },

    PlayerLeft {
        player: PlayerId,
        released: Vec<TileIndex>,
    },

    /// A jailed player's roll was spent serving time.
    JailTurn {
        player: PlayerId,
        served: u8,
    },

    JailReleased {
        player: PlayerId,
    },

    JailFinePaid {
        player: PlayerId,
        amount: u64,
    },

    GameOver {
        winner: PlayerId,
        name: String,
        valuation: u64,
    },

    /// Everyone left a running game; the match is an empty lobby again.
    MatchReset,
}

impl GameEvent {
    /// Whether this event ends the game.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self, GameEvent::GameOver { .. })
    }
}
