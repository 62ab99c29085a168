//! A single match: rules, state and randomness behind one `&mut self` API.

use tracing::debug;

use super::snapshot::{GameSnapshot, Outcome};
use crate::board::{Board, TileIndex};
use crate::chance::ChanceDeck;
use crate::core::{
    Action, DecisionKind, GameError, GameRng, GameState, PlayerId, RandomSource, RulesConfig,
};
use crate::events::GameEvent;
use crate::rules::{GameResult, Rules, RulesEngine};

/// Builder for creating a [`Match`].
pub struct MatchBuilder {
    config: RulesConfig,
    deck: ChanceDeck,
    board: Board,
}

impl Default for MatchBuilder {
    fn default() -> Self {
        Self {
            config: RulesConfig::default(),
            deck: ChanceDeck::standard(),
            board: Board::standard(),
        }
    }
}

impl MatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    pub fn chance_deck(mut self, deck: ChanceDeck) -> Self {
        self.deck = deck;
        self
    }

    pub fn board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Build a match seeded from the config.
    pub fn build(self) -> Match<GameRng> {
        let rng = GameRng::new(self.config.seed);
        self.build_with_rng(rng)
    }

    /// Build a match drawing dice and cards from `rng`.
    pub fn build_with_rng<R: RandomSource>(self, rng: R) -> Match<R> {
        Match {
            state: GameState::new(self.board),
            rules: Rules::new(self.config, self.deck),
            rng,
        }
    }
}

/// One game from lobby to winner.
///
/// Every method is a single transaction: it either applies completely and
/// returns the resulting events and snapshot, or fails and changes nothing.
pub struct Match<R: RandomSource = GameRng> {
    rules: Rules,
    state: GameState,
    rng: R,
}

impl Match<GameRng> {
    /// Standard board and deck with the given rules.
    pub fn new(config: RulesConfig) -> Self {
        MatchBuilder::new().config(config).build()
    }
}

impl<R: RandomSource> Match<R> {
    // === Lobby ===

    /// Take a seat. Cash and position come from the rules config.
    pub fn join(&mut self, name: impl Into<String>) -> Result<(PlayerId, Outcome), GameError> {
        let (id, events) = self.rules.join(&mut self.state, name)?;
        Ok((id, self.outcome(events)))
    }

    pub fn start(&mut self) -> Result<Outcome, GameError> {
        let events = self.rules.start(&mut self.state)?;
        Ok(self.outcome(events))
    }

    /// Leave the match, forfeiting every tile.
    pub fn leave(&mut self, player: PlayerId) -> Result<Outcome, GameError> {
        let events = self.rules.leave(&mut self.state, player)?;
        Ok(self.outcome(events))
    }

    // === Turn ===

    pub fn roll(&mut self, player: PlayerId) -> Result<Outcome, GameError> {
        self.apply(player, Action::Roll)
    }

    pub fn resolve_buy(&mut self, player: PlayerId, tile: TileIndex) -> Result<Outcome, GameError> {
        self.resolve(player, DecisionKind::Buy, tile)
    }

    pub fn resolve_pay_rent(
        &mut self,
        player: PlayerId,
        tile: TileIndex,
    ) -> Result<Outcome, GameError> {
        self.resolve(player, DecisionKind::PayRent, tile)
    }

    pub fn resolve_upgrade(
        &mut self,
        player: PlayerId,
        tile: TileIndex,
    ) -> Result<Outcome, GameError> {
        self.resolve(player, DecisionKind::Upgrade, tile)
    }

    pub fn resolve_teleport(
        &mut self,
        player: PlayerId,
        tile: TileIndex,
    ) -> Result<Outcome, GameError> {
        self.resolve(player, DecisionKind::Teleport, tile)
    }

    /// Decline the pending decision, or end the turn.
    pub fn pass(&mut self, player: PlayerId) -> Result<Outcome, GameError> {
        self.apply(player, Action::Pass)
    }

    pub fn pay_jail_fine(&mut self, player: PlayerId) -> Result<Outcome, GameError> {
        self.apply(player, Action::PayJailFine)
    }

    /// Apply any in-game action.
    pub fn apply(&mut self, player: PlayerId, action: Action) -> Result<Outcome, GameError> {
        let events = self
            .rules
            .apply_action(&mut self.state, &mut self.rng, player, &action)
            .inspect_err(|err| debug!(%player, ?action, %err, "Action rejected"))?;
        Ok(self.outcome(events))
    }

    // === Queries ===

    /// Actions `player` may take right now.
    #[must_use]
    pub fn legal_actions(&self, player: PlayerId) -> Vec<Action> {
        self.rules.legal_actions(&self.state, player)
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state)
    }

    /// Final result, once someone has won.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.rules.is_terminal(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for table setup in tools and tests.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &RulesConfig {
        self.rules.config()
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    fn resolve(
        &mut self,
        player: PlayerId,
        kind: DecisionKind,
        tile: TileIndex,
    ) -> Result<Outcome, GameError> {
        let action = match kind {
            DecisionKind::Buy => Action::Buy(tile),
            DecisionKind::PayRent => Action::PayRent(tile),
            DecisionKind::Upgrade => Action::Upgrade(tile),
            DecisionKind::Teleport => Action::Teleport(tile),
        };
        self.apply(player, action)
    }

    fn outcome(&self, events: Vec<GameEvent>) -> Outcome {
        Outcome {
            events,
            snapshot: self.snapshot(),
        }
    }
}
