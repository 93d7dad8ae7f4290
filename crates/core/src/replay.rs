use std::time::Duration;

use crate::content::ContentPack;
use crate::game::Game;
use crate::journal::{InputJournal, InputPayload, JOURNAL_FORMAT_VERSION};
use crate::presenter::NullPresenter;
use crate::state::Player;
use crate::types::{AdvanceStopReason, GameError, Phase, RunOutcome};

const STEPS_PER_BATCH: u32 = 256;
const MAX_SETTLE_BATCHES: usize = 64;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ReplayError {
    #[error("journal format {found} is not supported (expected {JOURNAL_FORMAT_VERSION})")]
    UnsupportedFormat { found: u16 },
    #[error("input #{seq} was rejected: {source}")]
    Rejected { seq: u64, source: GameError },
    #[error("engine did not settle before input #{seq}")]
    Stalled { seq: u64 },
    #[error("journal starts from progress no run can reach: {player:?}")]
    InvalidProgress { player: Player },
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    /// `None` when the journal stops mid-run.
    pub final_outcome: Option<RunOutcome>,
    pub final_phase: Phase,
    pub final_snapshot_hash: u64,
    pub final_clock: Duration,
    pub inputs_applied: usize,
}

/// Rebuilds a run from its journal and reports where it ends up.
pub fn replay_to_end(
    content: &ContentPack,
    journal: &InputJournal,
) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedFormat { found: journal.format_version });
    }
    if !journal.initial_player.is_valid_progress() {
        return Err(ReplayError::InvalidProgress { player: journal.initial_player });
    }

    let mut game = Game::new(journal.seed, content.clone(), NullPresenter)
        .with_progress(journal.initial_player, journal.initial_flags);

    for record in &journal.inputs {
        settle(&mut game).ok_or(ReplayError::Stalled { seq: record.seq })?;
        let applied = match record.payload {
            InputPayload::StartGame => game.start_game(),
            InputPayload::Command { prompt_id, command } => game.apply_command(prompt_id, command),
            InputPayload::Answer { prompt_id, value } => {
                game.apply_answer(prompt_id, value).map(|_| ())
            }
            InputPayload::Reset => {
                game.reset();
                Ok(())
            }
        };
        applied.map_err(|source| ReplayError::Rejected { seq: record.seq, source })?;
    }

    let end_seq = journal.inputs.len() as u64;
    let final_stop = settle(&mut game).ok_or(ReplayError::Stalled { seq: end_seq })?;
    tracing::debug!(?final_stop, inputs = journal.inputs.len(), "replay finished");

    Ok(ReplayResult {
        final_outcome: game.outcome(),
        final_phase: game.phase(),
        final_snapshot_hash: game.snapshot_hash(),
        final_clock: game.clock(),
        inputs_applied: journal.inputs.len(),
    })
}

/// Runs scheduled steps until the game waits on input, goes idle, or ends.
fn settle(game: &mut Game<NullPresenter>) -> Option<AdvanceStopReason> {
    for _ in 0..MAX_SETTLE_BATCHES {
        let batch = game.advance(STEPS_PER_BATCH);
        if batch.stop_reason != AdvanceStopReason::BudgetExhausted {
            return Some(batch.stop_reason);
        }
    }
    None
}
