use quest_core::content::keys;
use quest_core::{
    AdvanceStopReason, Command, ContentPack, Game, LogEvent, Phase, Prompt, RecordingPresenter,
};

fn phase_trace(game: &Game<RecordingPresenter>) -> Vec<Phase> {
    game.log()
        .iter()
        .filter_map(|event| match event {
            LogEvent::PhaseChanged { to, .. } => Some(*to),
            _ => None,
        })
        .collect()
}

#[test]
fn test_smoke_tutorial_encounter() {
    let mut game = Game::new(2025, ContentPack::default(), RecordingPresenter::new());
    game.start_game().expect("start");

    let Some(Prompt::Command { prompt_id }) = game.advance(100).stop_reason.into_prompt() else {
        panic!("expected the command menu");
    };
    assert_eq!(game.state().enemy.map(|enemy| enemy.id), Some(keys::ENEMY_TUTORIAL));
    game.apply_command(prompt_id, Command::Attack).expect("attack");

    for _ in 0..2 {
        let Some(Prompt::Answer { prompt_id, problem, .. }) =
            game.advance(100).stop_reason.into_prompt()
        else {
            panic!("expected a problem");
        };
        game.apply_answer(prompt_id, problem.answer).expect("answer");
    }

    // Stop right after the victory beat, before the next encounter starts.
    while game.phase() != Phase::Victory {
        assert_eq!(game.advance(1).executed_steps, 1);
    }
    assert_eq!(
        phase_trace(&game),
        vec![Phase::Intro, Phase::CommandSelect, Phase::RushInProgress, Phase::Victory]
    );
    assert_eq!(game.state().player.exp, 3);
    assert_eq!(game.state().player.level, 1);
    assert!(game.presenter().messages().contains(&"Humanoid UMA was defeated!"));
}

#[test]
fn test_smoke_flee_returns_to_idle() {
    let mut game = Game::new(2026, ContentPack::default(), RecordingPresenter::new());
    game.start_game().expect("start");
    let Some(Prompt::Command { prompt_id }) = game.advance(100).stop_reason.into_prompt() else {
        panic!("expected the command menu");
    };

    game.apply_command(prompt_id, Command::Run).expect("run");
    assert_eq!(game.advance(100).stop_reason, AdvanceStopReason::Idle);
    assert_eq!(game.phase(), Phase::Idle);
    assert!(!phase_trace(&game).contains(&Phase::EnemyCounter));
    assert!(game.state().enemy.is_none());
}
