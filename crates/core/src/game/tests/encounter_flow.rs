use std::time::Duration;

use super::support::*;
use crate::content::keys;

#[test]
fn advance_is_idle_before_start() {
    let mut game = recording_game(1);
    let result = game.advance(10);
    assert_eq!(result.stop_reason, AdvanceStopReason::Idle);
    assert_eq!(result.executed_steps, 0);
    assert_eq!(game.phase(), Phase::Idle);
}

#[test]
fn intro_beats_arrive_in_order_with_their_pauses() {
    let mut game = recording_game(2);
    start_and_reach_menu(&mut game);

    assert_eq!(
        game.presenter().messages(),
        vec![
            "......",
            "Something is approaching...",
            "It suddenly grew dark!",
            "Humanoid UMA appeared!",
            "What will you do?",
        ]
    );
    let pauses: Vec<Duration> = game
        .presenter()
        .calls
        .iter()
        .filter_map(|call| match call {
            PresenterCall::Pause(delay) => Some(*delay),
            _ => None,
        })
        .collect();
    let millis = [1500, 2000, 3000, 1000].map(Duration::from_millis);
    assert_eq!(pauses, millis.to_vec());
    assert_eq!(game.clock(), Duration::from_millis(7500));
    assert!(game.presenter().calls.contains(&PresenterCall::Theme(ThemeKind::Battle)));
    assert_eq!(game.phase(), Phase::CommandSelect);
    assert!(game.state().encounter_active);
}

#[test]
fn budget_stops_between_intro_beats() {
    let mut game = recording_game(3);
    game.start_game().expect("start");

    let first = game.advance(2);
    assert_eq!(first.stop_reason, AdvanceStopReason::BudgetExhausted);
    assert_eq!(first.executed_steps, 2);
    assert_eq!(first.elapsed, Duration::from_millis(3500));
    assert_eq!(game.phase(), Phase::Intro);
    assert!(!game.state().encounter_active);

    let prompt_id = expect_command_prompt(&mut game);
    assert_eq!(prompt_id, PromptId(0));
}

#[test]
fn start_is_rejected_mid_encounter() {
    let mut game = recording_game(4);
    start_and_reach_menu(&mut game);
    assert_eq!(
        game.start_game(),
        Err(GameError::EncounterInProgress { phase: Phase::CommandSelect })
    );
}

#[test]
fn boss_encounter_plays_boss_theme() {
    let player = Player { exp: 8, ..Player::new() };
    let mut game = constant_rng_game(0.5, player);
    start_and_reach_menu(&mut game);

    let enemy = game.state().enemy.expect("boss present");
    assert_eq!(enemy.id, keys::ENEMY_TIER_ONE_BOSS);
    assert!(game.presenter().calls.contains(&PresenterCall::Theme(ThemeKind::Boss)));
    assert!(game.presenter().messages().contains(&"King Monkey appeared!"));
}

#[test]
fn tutorial_encounter_won_with_two_correct_answers() {
    let mut game = recording_game(5);
    let menu = start_and_reach_menu(&mut game);
    assert_eq!(game.state().enemy.map(|enemy| enemy.id), Some(keys::ENEMY_TUTORIAL));

    game.apply_command(menu, Command::Attack).expect("attack accepted");
    for _ in 0..2 {
        let (prompt_id, answer) = expect_answer_prompt(&mut game);
        let outcome = game.apply_answer(prompt_id, answer).expect("answer accepted");
        assert!(outcome.correct);
        assert_eq!(outcome.damage, if outcome.enemy_defeated { 6 } else { 10 });
    }

    // Runs through the victory and into the next encounter's menu.
    expect_command_prompt(&mut game);

    let trace = phase_trace(&game);
    assert_eq!(
        trace[..4],
        [Phase::Intro, Phase::CommandSelect, Phase::RushInProgress, Phase::Victory]
    );
    assert!(!trace.contains(&Phase::EnemyCounter));
    assert_eq!(game.state().player.exp, 3);
    assert_eq!(game.state().player.level, 1);
    assert!(game.log().contains(&LogEvent::ExpAwarded { amount: 3 }));
    assert!(game.presenter().messages().contains(&"Gained 3 EXP!"));
    assert!(!game.presenter().calls.contains(&PresenterCall::Effect(EffectKind::Win)));
}

#[test]
fn tier_one_boss_needs_two_rushes_and_sets_its_flag() {
    let player = Player { exp: 8, ..Player::new() };
    let mut game = constant_rng_game(0.5, player);
    let menu = start_and_reach_menu(&mut game);

    game.apply_command(menu, Command::Attack).expect("attack");
    for _ in 0..5 {
        let (prompt_id, answer) = expect_answer_prompt(&mut game);
        game.apply_answer(prompt_id, answer).expect("answer");
    }
    // Five hits of 10 leave the boss standing, so it counterattacks.
    let menu = expect_command_prompt(&mut game);
    assert_eq!(game.state().enemy.map(|enemy| enemy.hp), Some(10));
    assert!(phase_trace(&game).contains(&Phase::EnemyCounter));

    game.apply_command(menu, Command::Attack).expect("attack again");
    let (prompt_id, answer) = expect_answer_prompt(&mut game);
    let outcome = game.apply_answer(prompt_id, answer).expect("final hit");
    assert!(outcome.enemy_defeated);
    expect_command_prompt(&mut game);

    let state = game.state();
    assert!(state.flags.tier_one_boss_defeated);
    assert!(!state.flags.final_boss_defeated);
    // 8 + 15 exp crosses the 10 and 20 thresholds.
    assert_eq!(state.player.exp, 23);
    assert_eq!(state.player.level, 3);
    assert_eq!(state.player.max_hp, 70);
    assert_eq!(state.player.hp, state.player.max_hp);
    assert!(game.log().contains(&LogEvent::LevelUp { level: 2 }));
    assert!(game.log().contains(&LogEvent::LevelUp { level: 3 }));
    assert!(game.presenter().messages().contains(&"You defeated the level 1 boss!"));
    assert!(game.presenter().messages().contains(&"Level up! Now level 3!"));
    let win_cues = game
        .presenter()
        .calls
        .iter()
        .filter(|call| **call == PresenterCall::Effect(EffectKind::Win))
        .count();
    assert_eq!(win_cues, 1);
}

#[test]
fn final_boss_victory_clears_the_game_without_rewards() {
    let player = Player { level: 10, exp: 95, hp: 140, max_hp: 140, mp: 50 };
    let mut game = constant_rng_game(0.5, player);
    let menu = start_and_reach_menu(&mut game);
    assert!(game.state().enemy.is_some_and(|enemy| enemy.is_final_boss()));

    game.apply_command(menu, Command::Attack).expect("attack");
    // 28 damage per hit against 100 hp.
    for _ in 0..4 {
        let (prompt_id, answer) = expect_answer_prompt(&mut game);
        game.apply_answer(prompt_id, answer).expect("answer");
    }

    assert_eq!(settle(&mut game), AdvanceStopReason::Finished(RunOutcome::GameClear));
    assert_eq!(game.phase(), Phase::GameClear);
    assert_eq!(game.outcome(), Some(RunOutcome::GameClear));
    assert!(game.state().flags.final_boss_defeated);
    assert_eq!(game.state().player.exp, 95);
    assert!(game.state().enemy.is_none());
    assert!(!game.log().iter().any(|event| matches!(event, LogEvent::ExpAwarded { .. })));
    assert!(game.presenter().calls.contains(&PresenterCall::Theme(ThemeKind::Victory)));
    assert_eq!(game.start_game(), Err(GameError::EncounterInProgress { phase: Phase::GameClear }));
}

#[test]
fn same_seed_gives_same_hash_and_trace() {
    let run = |seed| {
        let mut game = recording_game(seed);
        let menu = start_and_reach_menu(&mut game);
        game.apply_command(menu, Command::Attack).expect("attack");
        let (prompt_id, answer) = expect_answer_prompt(&mut game);
        game.apply_answer(prompt_id, answer + 1).expect("miss");
        settle(&mut game);
        (game.snapshot_hash(), game.log().to_vec(), game.presenter().calls.clone())
    };
    assert_eq!(run(77), run(77));
}
