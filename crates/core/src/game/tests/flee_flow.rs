use super::support::*;

#[test]
fn escaping_a_regular_enemy_skips_the_counter() {
    let mut game = recording_game(20);
    let menu = start_and_reach_menu(&mut game);
    assert!(game.state().enemy.is_some_and(|enemy| !enemy.is_boss));

    game.apply_command(menu, Command::Run).expect("run");
    assert_eq!(game.phase(), Phase::Fled);
    assert!(game.state().enemy.is_none());
    assert!(!game.state().encounter_active);

    assert_eq!(settle(&mut game), AdvanceStopReason::Idle);
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(
        phase_trace(&game),
        vec![Phase::Intro, Phase::CommandSelect, Phase::Flee, Phase::Fled, Phase::Idle]
    );
    assert_eq!(game.state().player.hp, 50);
    assert!(game.presenter().messages().contains(&"Eito ran away!"));
    assert!(game.presenter().calls.contains(&PresenterCall::StopTheme));
}

#[test]
fn a_new_encounter_can_start_after_escaping() {
    let mut game = recording_game(21);
    let menu = start_and_reach_menu(&mut game);
    game.apply_command(menu, Command::Run).expect("run");
    settle(&mut game);

    let menu = start_and_reach_menu(&mut game);
    assert_eq!(game.pending_prompt(), Some(&Prompt::Command { prompt_id: menu }));
    assert_eq!(game.state().player.exp, 0);
}

#[test]
fn escaping_a_boss_is_blocked_and_countered() {
    let player = Player { exp: 8, ..Player::new() };
    let mut game = constant_rng_game(0.99, player);
    let menu = start_and_reach_menu(&mut game);

    game.apply_command(menu, Command::Run).expect("run");
    assert_eq!(game.phase(), Phase::Flee);
    assert!(game.state().enemy.is_some());

    let next_menu = expect_command_prompt(&mut game);
    assert_ne!(next_menu, menu);
    assert_eq!(
        phase_trace(&game)[2..],
        [Phase::Flee, Phase::EnemyCounter, Phase::CommandSelect]
    );
    // Highest roll at level 1: 6 damage.
    assert_eq!(game.state().player.hp, 44);
    assert!(game.presenter().messages().contains(&"But the way was blocked!"));
}

#[test]
fn boss_flee_never_escapes() {
    let player = Player { exp: 8, hp: 500, max_hp: 500, ..Player::new() };
    let mut game = recording_game(22).with_progress(player, EncounterFlags::default());
    let mut menu = start_and_reach_menu(&mut game);

    for _ in 0..10 {
        game.apply_command(menu, Command::Run).expect("run");
        menu = expect_command_prompt(&mut game);
        assert!(game.state().enemy.is_some_and(|enemy| enemy.is_boss));
    }
    let counters =
        phase_trace(&game).iter().filter(|phase| **phase == Phase::EnemyCounter).count();
    assert_eq!(counters, 10);
    assert!(!phase_trace(&game).contains(&Phase::Fled));
}
