//! Shared table setup for integration tests.

#![allow(dead_code)]

use rust_monopoly::{Match, MatchBuilder, PlayerId, RulesConfig, ScriptedRng, TileIndex};

/// A started match with scripted dice and the given player names.
pub fn scripted_match(names: &[&str], dice: &[u8]) -> (Match<ScriptedRng>, Vec<PlayerId>) {
    scripted_match_with(RulesConfig::default(), names, dice)
}

pub fn scripted_match_with(
    config: RulesConfig,
    names: &[&str],
    dice: &[u8],
) -> (Match<ScriptedRng>, Vec<PlayerId>) {
    let mut game = MatchBuilder::new()
        .config(config)
        .build_with_rng(ScriptedRng::with_dice(dice.to_vec()));
    let ids = names.iter().map(|n| game.join(*n).unwrap().0).collect();
    game.start().unwrap();
    (game, ids)
}

/// Hand tiles to a player as if bought.
pub fn give(game: &mut Match<ScriptedRng>, player: PlayerId, tiles: &[u8]) {
    let state = game.state_mut();
    for &i in tiles {
        let tile = TileIndex::new(i);
        state.board.tile_mut(tile).unwrap().owner = Some(player);
        state.player_mut(player).unwrap().holdings.push(tile);
    }
}

pub fn place(game: &mut Match<ScriptedRng>, player: PlayerId, position: u8) {
    game.state_mut().player_mut(player).unwrap().position = TileIndex::new(position);
}

pub fn set_cash(game: &mut Match<ScriptedRng>, player: PlayerId, cash: u64) {
    game.state_mut().player_mut(player).unwrap().cash = cash;
}

pub fn cash(game: &Match<ScriptedRng>, player: PlayerId) -> u64 {
    game.state().player(player).unwrap().cash
}
