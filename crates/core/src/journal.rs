use serde::{Deserialize, Serialize};

use crate::state::{EncounterFlags, Player};
use crate::types::{Command, PromptId};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Every accepted input of a run, in order, plus what is needed to rebuild
/// the starting state. Rejected inputs are never recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    pub seed: u64,
    pub initial_player: Player,
    pub initial_flags: EncounterFlags,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPayload {
    StartGame,
    Command { prompt_id: PromptId, command: Command },
    Answer { prompt_id: PromptId, value: u32 },
    Reset,
}

impl InputJournal {
    pub fn new(seed: u64) -> Self {
        Self::with_progress(seed, Player::new(), EncounterFlags::default())
    }

    pub fn with_progress(seed: u64, initial_player: Player, initial_flags: EncounterFlags) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: env!("CARGO_PKG_VERSION").to_string(),
            seed,
            initial_player,
            initial_flags,
            inputs: Vec::new(),
        }
    }

    pub fn append(&mut self, payload: InputPayload) {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, payload });
    }
}
