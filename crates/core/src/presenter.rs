//! Outbound interface from the battle engine to whatever renders it.
//!
//! The engine never touches a screen or an audio device. It calls these hooks
//! in a fixed order; how fast or how fancy they are rendered is up to the
//! implementation.

use std::time::Duration;

use crate::problem::{CHOICE_COUNT, MathProblem};
use crate::state::{Enemy, Player};
use crate::types::{EffectKind, ThemeKind};

pub trait Presenter {
    /// A narrative or feedback line. A new call supersedes any line still being revealed.
    fn render_message(&mut self, text: &str);
    fn render_enemy(&mut self, enemy: &Enemy);
    fn render_enemy_hp(&mut self, current: u32, max: u32);
    fn render_player_stats(&mut self, player: &Player);
    fn present_problem(&mut self, problem: &MathProblem, choices: &[u32; CHOICE_COUNT]);
    fn present_command_menu(&mut self);
    fn play_effect(&mut self, effect: EffectKind);
    fn play_theme(&mut self, theme: ThemeKind);
    fn stop_theme(&mut self);

    /// Pacing hint issued before each scheduled beat.
    fn pause(&mut self, _delay: Duration) {}
}

/// Discards everything. Used for replays and headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render_message(&mut self, _text: &str) {}
    fn render_enemy(&mut self, _enemy: &Enemy) {}
    fn render_enemy_hp(&mut self, _current: u32, _max: u32) {}
    fn render_player_stats(&mut self, _player: &Player) {}
    fn present_problem(&mut self, _problem: &MathProblem, _choices: &[u32; CHOICE_COUNT]) {}
    fn present_command_menu(&mut self) {}
    fn play_effect(&mut self, _effect: EffectKind) {}
    fn play_theme(&mut self, _theme: ThemeKind) {}
    fn stop_theme(&mut self) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresenterCall {
    Message(String),
    Enemy { id: &'static str, name: &'static str },
    EnemyHp { current: u32, max: u32 },
    PlayerStats(Player),
    Problem { prompt: String, choices: [u32; CHOICE_COUNT] },
    CommandMenu,
    Effect(EffectKind),
    Theme(ThemeKind),
    StopTheme,
    Pause(Duration),
}

/// Keeps every call in order so tests can assert on the narrative.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<PresenterCall>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PresenterCall::Message(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn total_pause(&self) -> Duration {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PresenterCall::Pause(delay) => Some(*delay),
                _ => None,
            })
            .sum()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn render_message(&mut self, text: &str) {
        self.calls.push(PresenterCall::Message(text.to_string()));
    }

    fn render_enemy(&mut self, enemy: &Enemy) {
        self.calls.push(PresenterCall::Enemy { id: enemy.id, name: enemy.name });
    }

    fn render_enemy_hp(&mut self, current: u32, max: u32) {
        self.calls.push(PresenterCall::EnemyHp { current, max });
    }

    fn render_player_stats(&mut self, player: &Player) {
        self.calls.push(PresenterCall::PlayerStats(*player));
    }

    fn present_problem(&mut self, problem: &MathProblem, choices: &[u32; CHOICE_COUNT]) {
        self.calls.push(PresenterCall::Problem { prompt: problem.prompt.clone(), choices: *choices });
    }

    fn present_command_menu(&mut self) {
        self.calls.push(PresenterCall::CommandMenu);
    }

    fn play_effect(&mut self, effect: EffectKind) {
        self.calls.push(PresenterCall::Effect(effect));
    }

    fn play_theme(&mut self, theme: ThemeKind) {
        self.calls.push(PresenterCall::Theme(theme));
    }

    fn stop_theme(&mut self) {
        self.calls.push(PresenterCall::StopTheme);
    }

    fn pause(&mut self, delay: Duration) {
        self.calls.push(PresenterCall::Pause(delay));
    }
}
