use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::problem::{CHOICE_COUNT, MathProblem};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PromptId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Attack,
    Spell,
    Item,
    Run,
}

impl Command {
    pub const ALL: [Command; 4] = [Command::Attack, Command::Spell, Command::Item, Command::Run];

    pub fn label(self) -> &'static str {
        match self {
            Command::Attack => "attack",
            Command::Spell => "spell",
            Command::Item => "item",
            Command::Run => "run",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown command '{0}'")]
pub struct ParseCommandError(pub String);

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "a" | "attack" | "fight" => Ok(Command::Attack),
            "2" | "s" | "spell" | "heal" => Ok(Command::Spell),
            "3" | "i" | "item" => Ok(Command::Item),
            "4" | "r" | "run" | "flee" => Ok(Command::Run),
            _ => Err(ParseCommandError(raw.trim().to_string())),
        }
    }
}

/// Turn-sequencer states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Pre-encounter screen: nothing is in progress.
    Idle,
    Intro,
    CommandSelect,
    RushInProgress,
    SpellResolve,
    ItemResolve,
    Flee,
    EnemyCounter,
    Victory,
    Defeat,
    GameClear,
    Fled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunOutcome {
    Defeat,
    GameClear,
}

/// Input the sequencer is currently blocked on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    Command {
        prompt_id: PromptId,
    },
    Answer {
        prompt_id: PromptId,
        problem: MathProblem,
        choices: [u32; CHOICE_COUNT],
        question_number: u32,
        total_questions: u32,
    },
}

impl Prompt {
    pub fn id(&self) -> PromptId {
        match self {
            Prompt::Command { prompt_id } | Prompt::Answer { prompt_id, .. } => *prompt_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    AwaitingInput(Prompt),
    /// Nothing scheduled and no encounter running; `start_game` begins one.
    Idle,
    Finished(RunOutcome),
    BudgetExhausted,
}

impl AdvanceStopReason {
    pub fn into_prompt(self) -> Option<Prompt> {
        match self {
            AdvanceStopReason::AwaitingInput(prompt) => Some(prompt),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AdvanceResult {
    pub executed_steps: u32,
    /// Pacing time covered by the executed steps.
    pub elapsed: Duration,
    pub stop_reason: AdvanceStopReason,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("no command is awaited in phase {phase:?}")]
    InvalidCommand { phase: Phase },
    #[error("not enough MP: have {available}, need {required}")]
    InsufficientMp { available: u32, required: u32 },
    #[error("answer does not belong to the current problem")]
    StaleAnswer,
    #[error("an encounter is already in progress (phase {phase:?})")]
    EncounterInProgress { phase: Phase },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Select,
    Attack,
    Miss,
    Heal,
    Approaching,
    Darkness,
    LevelUp,
    ItemGet,
    Win,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeKind {
    Battle,
    Boss,
    Victory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    PhaseChanged { from: Phase, to: Phase },
    EnemyAppeared { id: &'static str, level: u32, hp: u32 },
    CommandAccepted { command: Command },
    AnswerResolved { correct: bool, damage: u32 },
    PlayerDamaged { amount: u32, hp_after: u32 },
    PlayerHealed { amount: u32 },
    ExpAwarded { amount: u32 },
    LevelUp { level: u32 },
    ItemDropped { id: &'static str },
    BossDefeated { id: &'static str },
}
