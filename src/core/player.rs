//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! Stable identifier handed out on join. Seats can disappear when a player
//! leaves, so ids are never reused as seat indices.
//!
//! ## Player
//!
//! Cash, position, holdings and the jail/immunity counters of one seat.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::TileIndex;

/// Stable player identifier, allocated in join order starting at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Tiles owned by a player, in purchase order.
///
/// Most players hold a handful of tiles, so the inline capacity avoids a
/// heap allocation for the common case.
pub type Holdings = SmallVec<[TileIndex; 8]>;

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier.
    pub id: PlayerId,

    /// Display name supplied on join.
    pub name: String,

    /// Cash balance. Never negative: debits are checked first.
    pub cash: u64,

    /// Current tile.
    pub position: TileIndex,

    /// Owned tiles in purchase order.
    pub holdings: Holdings,

    /// Serving a jail sentence.
    pub in_jail: bool,

    /// Turns spent in jail during the current sentence.
    pub jail_turns: u8,

    /// Remaining landings covered by penalty-tile immunity.
    pub immunity_turns: u8,

    /// False once bankrupt.
    pub active: bool,
}

impl Player {
    /// Create a player at the start tile with the given cash.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, cash: u64) -> Self {
        Self {
            id,
            name: name.into(),
            cash,
            position: TileIndex::START,
            holdings: Holdings::new(),
            in_jail: false,
            jail_turns: 0,
            immunity_turns: 0,
            active: true,
        }
    }

    /// Whether penalty-tile immunity is still running.
    #[must_use]
    pub fn is_immune(&self) -> bool {
        self.immunity_turns > 0
    }

    /// Whether this player owns the given tile.
    #[must_use]
    pub fn owns(&self, tile: TileIndex) -> bool {
        self.holdings.contains(&tile)
    }

    /// Add to cash, saturating at `u64::MAX`.
    pub fn credit(&mut self, amount: u64) {
        self.cash = self.cash.saturating_add(amount);
    }

    /// Subtract from cash if the balance covers it.
    ///
    /// Returns false (and leaves cash untouched) when it does not.
    pub fn debit(&mut self, amount: u64) -> bool {
        match self.cash.checked_sub(amount) {
            Some(rest) => {
                self.cash = rest;
                true
            }
            None => false,
        }
    }

    /// Apply a signed cash delta, flooring the balance at zero.
    pub fn adjust_cash(&mut self, delta: i64) {
        if delta >= 0 {
            self.credit(delta.unsigned_abs());
        } else {
            self.cash = self.cash.saturating_sub(delta.unsigned_abs());
        }
    }
}
