//! Match sessions.
//!
//! A `Match` owns one `GameState`, its `Rules` and its random source, and
//! exposes the player-facing operations (join, roll, resolve, pass, leave).
//! Each operation returns an `Outcome`: the events it produced plus a
//! fresh `GameSnapshot`.
//!
//! Several matches are simply several `Match` values; there is no shared
//! state between them.

mod session;
mod snapshot;

pub use session::{Match, MatchBuilder};
pub use snapshot::{GameSnapshot, Outcome, PlayerSnapshot};
