pub mod content;
pub mod enemy;
pub mod game;
pub mod journal;
pub mod presenter;
pub mod problem;
pub mod replay;
pub mod rng;
pub mod rush;
pub mod state;
pub mod testing;
pub mod types;

pub use content::ContentPack;
pub use game::Game;
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use presenter::{NullPresenter, Presenter, PresenterCall, RecordingPresenter};
pub use problem::MathProblem;
pub use replay::*;
pub use rng::{RandomSource, SeededRng};
pub use rush::AnswerOutcome;
pub use state::{BattleState, EncounterFlags, Enemy, Player};
pub use types::*;
