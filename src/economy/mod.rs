//! Economy: buying, building, rent and net worth.
//!
//! - `rent`: pure price arithmetic (rent, house cost, house value)
//! - `Economy`: operations that move cash and ownership on a `GameState`
//! - `Settlement`: how a rent payment ended
//!
//! ## Bankruptcy
//!
//! A payer who cannot cover rent is not an error. `Economy::settle_rent`
//! liquidates them instead: every holding returns to the bank with its
//! houses, their remaining cash goes to the creditor, and they stop taking
//! turns.

pub mod rent;
mod engine;

pub use engine::{Economy, Settlement};
