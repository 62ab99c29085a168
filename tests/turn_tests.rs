//! Dice, movement, landing effects and win detection.

mod common;

use common::{cash, give, place, scripted_match, scripted_match_with, set_cash};
use rust_monopoly::{
    Action, ChanceEffect, ChanceOutcome, DecisionKind, GameError, GameEvent, Landing,
    MatchBuilder, RulesConfig, ScriptedRng, TileIndex,
};

#[test]
fn test_roll_guards_in_order() {
    let mut game = MatchBuilder::new().build_with_rng(ScriptedRng::with_dice([5, 3]));
    let a = game.join("A").unwrap().0;
    let b = game.join("B").unwrap().0;

    assert_eq!(game.roll(a).unwrap_err(), GameError::GameNotStarted);

    game.start().unwrap();
    assert_eq!(game.roll(b).unwrap_err(), GameError::NotYourTurn);

    game.roll(a).unwrap();
    assert_eq!(
        game.roll(a).unwrap_err(),
        GameError::ActionPending(DecisionKind::Buy)
    );
}

#[test]
fn test_lobby_guards() {
    let mut game = MatchBuilder::new().build();
    let a = game.join("A").unwrap().0;

    assert_eq!(
        game.start().unwrap_err(),
        GameError::TooFewPlayers { required: 2 }
    );
    for name in ["B", "C", "D"] {
        game.join(name).unwrap();
    }
    assert_eq!(game.join("E").unwrap_err(), GameError::GameFull);

    game.start().unwrap();
    assert_eq!(game.join("E").unwrap_err(), GameError::AlreadyStarted);
    assert_eq!(game.start().unwrap_err(), GameError::AlreadyStarted);
    assert_eq!(game.snapshot().current, Some(a));
}

#[test]
fn test_doubles_do_not_grant_extra_roll() {
    // 1 + 1 lands on Delta Block; decline and the turn moves on
    let (mut game, ids) = scripted_match(&["A", "B"], &[1, 1]);
    let (a, b) = (ids[0], ids[1]);

    let outcome = game.roll(a).unwrap();
    assert_eq!(outcome.snapshot.doubles_streak, 1);

    let outcome = game.pass(a).unwrap();
    assert_eq!(outcome.snapshot.current, Some(b));
    assert_eq!(outcome.snapshot.doubles_streak, 0);
}

#[test]
fn test_passing_start_pays_bonus() {
    let (mut game, ids) = scripted_match(&["A", "B"], &[2, 3]);
    let a = ids[0];
    place(&mut game, a, 33);

    let outcome = game.roll(a).unwrap();

    assert!(outcome.events.contains(&GameEvent::Moved {
        player: a,
        from: TileIndex::new(33),
        to: TileIndex::new(2),
        passed_start: true,
    }));
    assert_eq!(cash(&game, a), 1700);
}

#[test]
fn test_win_supersedes_pending_decision() {
    let (mut game, ids) = scripted_match(&["A", "B"], &[2, 3]);
    let a = ids[0];
    place(&mut game, a, 33);
    set_cash(&mut game, a, 5900);

    let outcome = game.roll(a).unwrap();

    assert!(outcome.ended_game());
    assert!(outcome.required_action().is_none());
    assert!(outcome.snapshot.pending.is_none());
    assert_eq!(outcome.snapshot.winner, Some(a));
    assert!(outcome.events.contains(&GameEvent::GameOver {
        winner: a,
        name: "A".to_string(),
        valuation: 6100,
    }));
    assert!(game.legal_actions(a).is_empty());
    assert_eq!(game.pass(a).unwrap_err(), GameError::GameOver);
}

#[test]
fn test_chance_card_relocates_without_second_landing() {
    // 4 + 5 reaches chance; card 1 sends the player to Gazebo (17)
    let (mut game, ids) = scripted_match(&["A", "B"], &[4, 5]);
    let (a, b) = (ids[0], ids[1]);
    game.rng_mut().push_picks([1]);

    let outcome = game.roll(a).unwrap();

    let drawn = outcome
        .events
        .iter()
        .find_map(|e| match e {
            GameEvent::ChanceDrawn { card, outcome, .. } => Some((card.clone(), outcome.clone())),
            _ => None,
        })
        .unwrap();
    assert_eq!(drawn.0.effect, ChanceEffect::MoveTo(TileIndex::new(17)));
    assert_eq!(
        drawn.1,
        ChanceOutcome::Moved {
            from: TileIndex::new(9),
            to: TileIndex::new(17),
            start_bonus: 0
        }
    );
    assert!(outcome.required_action().is_none());
    assert_eq!(outcome.snapshot.player(a).unwrap().position, TileIndex::new(17));
    assert_eq!(outcome.snapshot.current, Some(b));
}

#[test]
fn test_chance_money_card_floors_at_zero() {
    // Card 11: hostel damages, $75
    let (mut game, ids) = scripted_match(&["A", "B"], &[4, 5]);
    let a = ids[0];
    set_cash(&mut game, a, 30);
    game.rng_mut().push_picks([11]);

    game.roll(a).unwrap();

    assert_eq!(cash(&game, a), 0);
    assert!(game.state().player(a).unwrap().active);
}

#[test]
fn test_penalty_grants_immunity_from_rent() {
    let (mut game, ids) = scripted_match(&["A", "B"], &[1, 1, 1, 1]);
    let (a, b) = (ids[0], ids[1]);
    give(&mut game, b, &[29]);
    place(&mut game, a, 25);

    let outcome = game.roll(a).unwrap();
    assert!(outcome.events.iter().any(|e| matches!(
        e,
        GameEvent::Landed { landing: Landing::Penalty { immunity_turns: 3 }, .. }
    )));
    assert_eq!(outcome.snapshot.current, Some(b));

    game.pass(b).unwrap();
    let outcome = game.roll(a).unwrap();

    assert!(outcome.events.iter().any(|e| matches!(
        e,
        GameEvent::Landed { landing: Landing::ImmunityTick { remaining: 2 }, .. }
    )));
    assert!(outcome.snapshot.pending.is_none());
    assert_eq!(cash(&game, a), 1500);
    assert_eq!(outcome.snapshot.player(a).unwrap().immunity_turns, 2);
}

#[test]
fn test_jail_card_imprisons_when_enabled() {
    // Card 2: go directly to jail
    let config = RulesConfig::default().with_jail_card_imprisons(true);
    let (mut game, ids) = scripted_match_with(config, &["A", "B"], &[4, 5]);
    let (a, b) = (ids[0], ids[1]);
    game.rng_mut().push_picks([2]);

    let outcome = game.roll(a).unwrap();

    let me = outcome.snapshot.player(a).unwrap();
    assert!(me.in_jail);
    assert_eq!(me.position, TileIndex::new(18));
    assert_eq!(me.cash, 1500);

    // Next turn: pay the fine, then roll normally
    game.pass(b).unwrap();
    assert_eq!(
        game.legal_actions(a),
        vec![Action::Roll, Action::PayJailFine, Action::Pass]
    );
    let outcome = game.pay_jail_fine(a).unwrap();
    assert_eq!(
        outcome.events,
        vec![GameEvent::JailFinePaid { player: a, amount: 50 }]
    );
    assert!(!outcome.snapshot.player(a).unwrap().in_jail);
    assert_eq!(outcome.snapshot.current, Some(a));
}

#[test]
fn test_jail_sentence_expires() {
    let config = RulesConfig::default().with_jail_card_imprisons(true);
    let (mut game, ids) = scripted_match_with(config, &["A", "B"], &[4, 5]);
    let (a, b) = (ids[0], ids[1]);
    game.rng_mut().push_picks([2]);
    game.roll(a).unwrap();
    game.pass(b).unwrap();

    for served in 1..=2 {
        let outcome = game.roll(a).unwrap();
        assert_eq!(outcome.events[0], GameEvent::JailTurn { player: a, served });
        assert_eq!(outcome.snapshot.current, Some(b));
        game.pass(b).unwrap();
    }

    game.rng_mut().push_dice([1, 2]);
    let outcome = game.roll(a).unwrap();
    assert_eq!(outcome.events[0], GameEvent::JailReleased { player: a });
    assert_eq!(
        outcome.snapshot.player(a).unwrap().position,
        TileIndex::new(21)
    );
}

#[test]
fn test_pass_without_decision_ends_turn() {
    let (mut game, ids) = scripted_match(&["A", "B"], &[]);
    let (a, b) = (ids[0], ids[1]);

    assert_eq!(game.pass(b).unwrap_err(), GameError::NotYourTurn);

    let outcome = game.pass(a).unwrap();
    assert_eq!(outcome.snapshot.current, Some(b));
    assert_eq!(outcome.snapshot.turn_number, 2);
}
