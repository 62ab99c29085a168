//! Rules configuration.
//!
//! Every economic constant of the game lives in `RulesConfig` so a match
//! can be set up with house rules without touching the engine. The defaults
//! are the standard rules:
//!
//! | Setting | Default |
//! |---|---|
//! | starting cash | 1500 |
//! | start bonus | 200 |
//! | players | 2–4 |
//! | winning valuation | 6000 |
//! | houses per property | 4 |
//! | penalty immunity | 3 landings |
//! | jail fine / sentence | 50 / 3 turns |

use serde::{Deserialize, Serialize};

/// Tunable rules for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Cash each player receives on join.
    pub starting_cash: u64,

    /// Credited whenever a player passes or lands on the start tile.
    pub start_bonus: u64,

    /// Players required before the game can start.
    pub min_players: usize,

    /// Seats available.
    pub max_players: usize,

    /// Valuation that immediately wins the game.
    pub win_valuation: u64,

    /// Maximum houses on a single property.
    pub max_houses: u8,

    /// Landings covered by immunity after hitting the penalty tile.
    pub immunity_turns: u8,

    /// Cost of buying your way out of jail.
    pub jail_fine: u64,

    /// Turns served before a jailed player is released automatically.
    pub jail_sentence: u8,

    /// Whether the "Go directly to JAIL" card imprisons instead of
    /// relocating the player for a plain visit.
    pub jail_card_imprisons: bool,

    /// Seed for dice and card draws.
    pub seed: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_cash: 1500,
            start_bonus: 200,
            min_players: 2,
            max_players: 4,
            win_valuation: 6000,
            max_houses: 4,
            immunity_turns: 3,
            jail_fine: 50,
            jail_sentence: 3,
            jail_card_imprisons: false,
            seed: 42,
        }
    }
}

impl RulesConfig {
    /// Set the starting cash.
    #[must_use]
    pub fn with_starting_cash(mut self, cash: u64) -> Self {
        self.starting_cash = cash;
        self
    }

    /// Set the winning valuation.
    #[must_use]
    pub fn with_win_valuation(mut self, valuation: u64) -> Self {
        self.win_valuation = valuation;
        self
    }

    /// Set the number of seats.
    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max;
        self
    }

    /// Make the jail card send players to jail.
    #[must_use]
    pub fn with_jail_card_imprisons(mut self, enabled: bool) -> Self {
        self.jail_card_imprisons = enabled;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
