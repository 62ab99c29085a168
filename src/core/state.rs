//! Game state: the single mutable root of a match.
//!
//! ## GameState
//!
//! Owns everything that changes during play:
//! - Board (tile owners and houses)
//! - Players in seating order
//! - Turn pointer, doubles streak, last roll
//! - The pending-decision slot
//! - Lifecycle flags (started, winner)
//! - Action history
//!
//! Every engine operation is a transaction against one `GameState`; there
//! is no global state, so running several matches means holding several
//! values.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::player::{Player, PlayerId};
use crate::board::Board;
use crate::rules::{DiceRoll, PendingSlot};

/// Complete state of one match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    pub board: Board,

    /// Seated players, in seating (join) order.
    pub players: Vec<Player>,

    /// Seat index of the player whose turn it is.
    pub current: usize,

    /// Consecutive doubles in the current turn.
    ///
    /// Tracked for display only; doubles grant no extra roll.
    pub doubles_streak: u8,

    /// Most recent dice roll, used for utility rent.
    pub last_roll: Option<DiceRoll>,

    /// The single outstanding decision.
    pub pending: PendingSlot,

    /// Whether the game has left the lobby.
    pub started: bool,

    /// Winner, once the game has ended.
    pub winner: Option<PlayerId>,

    /// The winner's valuation at the moment the game ended.
    pub final_valuation: Option<u64>,

    /// Turn number (starts at 1, increments on every advance).
    pub turn_number: u32,

    /// Accepted actions, in order.
    pub history: Vector<ActionRecord>,

    next_player_id: u32,
    next_sequence: u32,
}

impl GameState {
    /// Create an empty lobby on the given board.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            players: Vec::new(),
            current: 0,
            doubles_streak: 0,
            last_roll: None,
            pending: PendingSlot::default(),
            started: false,
            winner: None,
            final_valuation: None,
            turn_number: 1,
            history: Vector::new(),
            next_player_id: 0,
            next_sequence: 0,
        }
    }

    /// Allocate the next player id.
    pub fn alloc_player_id(&mut self) -> PlayerId {
        let id = PlayerId::new(self.next_player_id);
        self.next_player_id += 1;
        id
    }

    // === Players ===

    /// Number of seated players, active or not.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Seat index of a player.
    #[must_use]
    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Get a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Get a mutable player.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    /// Id of the player whose turn it is.
    #[must_use]
    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.current_player().map(|p| p.id)
    }

    /// Players that are still in the game.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.active)
    }

    /// Number of players still in the game.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    /// Whether a winner has been declared.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    // === Turn Advancement ===

    /// Move the turn to the next active player in seating order.
    ///
    /// Inactive seats are skipped, with at most one full lap of attempts
    /// so a table where everyone but one is bankrupt cannot spin forever.
    /// Resets the doubles streak.
    ///
    /// Returns the player who now holds the turn.
    pub fn advance_turn(&mut self) -> Option<PlayerId> {
        self.doubles_streak = 0;
        let count = self.players.len();
        if count == 0 {
            self.current = 0;
            return None;
        }

        let mut next = (self.current + 1) % count;
        let mut attempts = 0;
        while !self.players[next].active && attempts < count {
            next = (next + 1) % count;
            attempts += 1;
        }

        self.current = next;
        self.turn_number += 1;
        self.current_player_id()
    }

    // === Action History ===

    /// Record an accepted action.
    pub fn record_action(&mut self, player: PlayerId, action: Action) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.history
            .push_back(ActionRecord::new(player, action, self.turn_number, sequence));
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Board::standard())
    }
}
