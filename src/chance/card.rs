//! Chance cards and the deck they are drawn from.

use serde::{Deserialize, Serialize};

use crate::board::TileIndex;
use crate::core::RandomSource;

/// What a chance card does when applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChanceEffect {
    /// Jump to a tile. Pays the start bonus when the jump wraps past start
    /// or targets it.
    MoveTo(TileIndex),

    /// Step back a number of tiles, stopping at the start tile.
    MoveBack(u8),

    /// Jump to the closest utility by ring distance.
    NearestUtility,

    /// Credit or debit cash. Cash never goes below zero.
    Money(i64),

    /// Let the player choose any tile to move to.
    Teleport,
}

/// A single chance card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChanceCard {
    /// Text shown to players.
    pub description: String,

    /// Effect applied when drawn.
    pub effect: ChanceEffect,
}

impl ChanceCard {
    pub fn new(description: impl Into<String>, effect: ChanceEffect) -> Self {
        Self {
            description: description.into(),
            effect,
        }
    }

    /// Whether drawing this card opens a teleport decision.
    #[must_use]
    pub fn is_teleport(&self) -> bool {
        matches!(self.effect, ChanceEffect::Teleport)
    }
}

/// An immutable deck. Draws are with replacement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChanceDeck {
    cards: Vec<ChanceCard>,
}

impl ChanceDeck {
    pub fn new(cards: Vec<ChanceCard>) -> Self {
        Self { cards }
    }

    /// The fourteen cards of the standard game.
    #[must_use]
    pub fn standard() -> Self {
        use ChanceEffect::*;

        let card = |description: &str, effect| ChanceCard::new(description, effect);
        Self::new(vec![
            card("Advance to START - Collect $200", MoveTo(TileIndex::START)),
            card("Advance to GAZEBO", MoveTo(TileIndex::new(17))),
            card("Go directly to JAIL - Do not pass GO", MoveTo(TileIndex::new(18))),
            card("Take a trip to ADMIN BLOCK", MoveTo(TileIndex::new(35))),
            card("Bank pays you dividend of $100", Money(100)),
            card("Pay poor tax of $50", Money(-50)),
            card("You won a coding contest! Collect $200", Money(200)),
            card("Library fine - Pay $25", Money(-25)),
            card("Advance to the nearest Utility and pay double rent", NearestUtility),
            card("Go back 3 spaces", MoveBack(3)),
            card("Your semester fees are waived! Collect $300", Money(300)),
            card("Pay for hostel damages - $75", Money(-75)),
            card("Bank error in your favor - Collect $150", Money(150)),
            card("You lost your ID card - Pay $40 for replacement", Money(-40)),
        ])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[ChanceCard] {
        &self.cards
    }

    /// Draw one card uniformly at random.
    ///
    /// Returns `None` only for an empty deck.
    pub fn draw(&self, rng: &mut dyn RandomSource) -> Option<&ChanceCard> {
        if self.cards.is_empty() {
            return None;
        }
        self.cards.get(rng.pick_index(self.cards.len()))
    }
}

impl Default for ChanceDeck {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, ScriptedRng};

    #[test]
    fn test_standard_deck_contents() {
        let deck = ChanceDeck::standard();

        assert_eq!(deck.len(), 14);
        let money = deck
            .cards()
            .iter()
            .filter(|c| matches!(c.effect, ChanceEffect::Money(_)))
            .count();
        assert_eq!(money, 8);
        assert!(deck.cards().iter().all(|c| !c.is_teleport()));
        assert!(deck
            .cards()
            .iter()
            .any(|c| c.effect == ChanceEffect::MoveBack(3)));
    }

    #[test]
    fn test_draw_uses_picked_index() {
        let deck = ChanceDeck::standard();
        let mut rng = ScriptedRng::new();
        rng.push_picks([9, 4]);

        assert_eq!(deck.draw(&mut rng).unwrap().effect, ChanceEffect::MoveBack(3));
        assert_eq!(deck.draw(&mut rng).unwrap().effect, ChanceEffect::Money(100));
    }

    #[test]
    fn test_draw_empty_deck() {
        let deck = ChanceDeck::new(Vec::new());
        let mut rng = GameRng::new(1);

        assert!(deck.is_empty());
        assert!(deck.draw(&mut rng).is_none());
    }

    #[test]
    fn test_draw_reaches_every_card() {
        let deck = ChanceDeck::standard();
        let mut rng = GameRng::new(7);
        let mut seen = vec![false; deck.len()];

        for _ in 0..2000 {
            let card = deck.draw(&mut rng).unwrap();
            let i = deck.cards().iter().position(|c| c == card).unwrap();
            seen[i] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }
}
