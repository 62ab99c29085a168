//! Chance cards: a fixed deck, uniform draws, and effect application.
//!
//! Effects are a closed enum, so adding a card kind means the compiler
//! points at every place that must handle it.

mod card;
mod resolver;

pub use card::{ChanceCard, ChanceDeck, ChanceEffect};
pub use resolver::{ChanceOutcome, ChanceResolver};
