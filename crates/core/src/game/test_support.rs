//! Shared fixtures for the `game` test suites.

use super::*;
use crate::presenter::RecordingPresenter;
use crate::testing::ScriptedRng;

pub(super) const SETTLE_BUDGET: u32 = 1_000;

pub(super) fn recording_game(seed: u64) -> Game<RecordingPresenter> {
    Game::new(seed, ContentPack::default(), RecordingPresenter::new())
}

/// Game whose every random draw returns `value`.
pub(super) fn constant_rng_game(value: f64, player: Player) -> Game<RecordingPresenter> {
    recording_game(0)
        .with_rng(ScriptedRng::constant(value))
        .with_progress(player, EncounterFlags::default())
}

pub(super) fn settle<P: Presenter>(game: &mut Game<P>) -> AdvanceStopReason {
    game.advance(SETTLE_BUDGET).stop_reason
}

pub(super) fn expect_command_prompt<P: Presenter>(game: &mut Game<P>) -> PromptId {
    match settle(game) {
        AdvanceStopReason::AwaitingInput(Prompt::Command { prompt_id }) => prompt_id,
        other => panic!("expected the command menu, got {other:?}"),
    }
}

/// Returns the prompt id and the correct answer of the awaited problem.
pub(super) fn expect_answer_prompt<P: Presenter>(game: &mut Game<P>) -> (PromptId, u32) {
    match settle(game) {
        AdvanceStopReason::AwaitingInput(Prompt::Answer { prompt_id, problem, .. }) => {
            (prompt_id, problem.answer)
        }
        other => panic!("expected a problem, got {other:?}"),
    }
}

pub(super) fn start_and_reach_menu<P: Presenter>(game: &mut Game<P>) -> PromptId {
    game.start_game().expect("idle game starts");
    expect_command_prompt(game)
}

/// Target phases of every logged transition, in order.
pub(super) fn phase_trace<P: Presenter>(game: &Game<P>) -> Vec<Phase> {
    game.log()
        .iter()
        .filter_map(|event| match event {
            LogEvent::PhaseChanged { to, .. } => Some(*to),
            _ => None,
        })
        .collect()
}
