//! Turn sequencer for a single battle run.
//!
//! `Game` owns all mutable battle state and drives it through a queue of
//! scheduled steps. Callers alternate between `advance`, which runs steps
//! until the engine needs input, and `apply_command` / `apply_answer`.

mod commands;
mod hash;
mod intro;
mod resolution;
mod rush_flow;
mod schedule;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

use std::time::Duration;

use crate::content::ContentPack;
use crate::journal::{InputJournal, InputPayload};
use crate::presenter::Presenter;
use crate::rng::{RandomSource, SeededRng};
use crate::state::{BattleState, EncounterFlags, Player};
use crate::types::*;

use schedule::{Scheduler, Step};

pub struct Game<P: Presenter> {
    seed: u64,
    rng: Box<dyn RandomSource>,
    content: ContentPack,
    presenter: P,
    state: BattleState,
    phase: Phase,
    scheduler: Scheduler,
    pending_prompt: Option<Prompt>,
    next_prompt_seq: u64,
    outcome: Option<RunOutcome>,
    log: Vec<LogEvent>,
    journal: InputJournal,
}

impl<P: Presenter> Game<P> {
    pub fn new(seed: u64, content: ContentPack, presenter: P) -> Self {
        Self {
            seed,
            rng: Box::new(SeededRng::new(seed)),
            content,
            presenter,
            state: BattleState::default(),
            phase: Phase::Idle,
            scheduler: Scheduler::default(),
            pending_prompt: None,
            next_prompt_seq: 0,
            outcome: None,
            log: Vec::new(),
            journal: InputJournal::new(seed),
        }
    }

    /// Swaps the random source. Journals recorded afterwards replay only
    /// against the same source, not the seed.
    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Starts from saved progression instead of a fresh level 1 hero.
    /// Out-of-range stats are clamped; see [`Player::clamped`].
    pub fn with_progress(mut self, player: Player, flags: EncounterFlags) -> Self {
        let clamped = player.clamped();
        if clamped != player {
            tracing::warn!(?player, ?clamped, "saved progress clamped into range");
        }
        let player = clamped;
        self.state = BattleState::new(player, flags);
        self.journal = InputJournal::with_progress(self.seed, player, flags);
        self
    }

    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Idle || self.outcome.is_some() {
            return Err(GameError::EncounterInProgress { phase: self.phase });
        }
        self.journal.append(InputPayload::StartGame);
        self.begin_encounter();
        Ok(())
    }

    /// Throws away the run, including progression, and returns to the idle screen.
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.pending_prompt = None;
        self.outcome = None;
        self.state = BattleState::default();
        self.presenter.stop_theme();
        self.set_phase(Phase::Idle);
        self.journal.append(InputPayload::Reset);
        tracing::info!(seed = self.seed, "run reset");
    }

    pub fn advance(&mut self, max_steps: u32) -> AdvanceResult {
        let mut executed_steps = 0;
        let mut elapsed = Duration::ZERO;

        loop {
            if let Some(outcome) = self.outcome {
                return AdvanceResult {
                    executed_steps,
                    elapsed,
                    stop_reason: AdvanceStopReason::Finished(outcome),
                };
            }
            if let Some(prompt) = &self.pending_prompt {
                return AdvanceResult {
                    executed_steps,
                    elapsed,
                    stop_reason: AdvanceStopReason::AwaitingInput(prompt.clone()),
                };
            }
            if executed_steps >= max_steps {
                return AdvanceResult {
                    executed_steps,
                    elapsed,
                    stop_reason: AdvanceStopReason::BudgetExhausted,
                };
            }
            let Some(next) = self.scheduler.pop() else {
                return AdvanceResult {
                    executed_steps,
                    elapsed,
                    stop_reason: AdvanceStopReason::Idle,
                };
            };

            if !next.delay.is_zero() {
                self.presenter.pause(next.delay);
            }
            elapsed += next.delay;
            self.run_step(next.step);
            executed_steps += 1;
        }
    }

    fn run_step(&mut self, step: Step) {
        match step {
            Step::IntroApproach => self.intro_approach(),
            Step::IntroDarkness => self.intro_darkness(),
            Step::IntroReveal => self.intro_reveal(),
            Step::OpenCommandMenu => self.open_command_menu(),
            Step::NextQuestion => self.next_question(),
            Step::EndRush => self.end_rush(),
            Step::EnemyWindUp => self.enemy_wind_up(),
            Step::EnemyStrike => self.enemy_strike(),
            Step::ResolveVictory => self.resolve_victory(),
            Step::AwardExperience { exp, drop } => self.award_experience(exp, drop),
            Step::AnnounceDrop { drop, leveled_up } => self.announce_drop(drop, leveled_up),
            Step::NextEncounter => self.begin_encounter(),
            Step::GameOver => self.game_over(),
            Step::GameClear => self.game_clear(),
            Step::ReturnToTitle => self.set_phase(Phase::Idle),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn content(&self) -> &ContentPack {
        &self.content
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn journal(&self) -> &InputJournal {
        &self.journal
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn pending_prompt(&self) -> Option<&Prompt> {
        self.pending_prompt.as_ref()
    }

    /// Total pacing time consumed so far.
    pub fn clock(&self) -> Duration {
        self.scheduler.clock()
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        self.log.push(LogEvent::PhaseChanged { from, to });
        tracing::debug!(?from, ?to, clock_ms = self.clock().as_millis() as u64, "phase changed");
    }

    fn issue_prompt_id(&mut self) -> PromptId {
        let id = PromptId(self.next_prompt_seq);
        self.next_prompt_seq += 1;
        id
    }

    fn hero_name(&self) -> &str {
        &self.content.hero_name
    }
}
