//! Plain-text presenter for interactive play.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use quest_core::problem::CHOICE_COUNT;
use quest_core::{Command, EffectKind, Enemy, MathProblem, Player, Presenter, ThemeKind};

use crate::config::Pacing;

const HP_BAR_WIDTH: u32 = 20;

pub struct TerminalPresenter<W: Write> {
    out: W,
    pacing: Pacing,
    typing_delay: Duration,
    theme: Option<ThemeKind>,
    error: Option<io::Error>,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, pacing: Pacing, typing_delay: Duration) -> Self {
        Self { out, pacing, typing_delay, theme: None, error: None }
    }

    /// The first write failure since the last call. The presenter hooks cannot
    /// return errors, so the caller polls this between `advance` calls.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Writes an input prompt without a trailing newline.
    pub fn prompt(&mut self, text: &str) {
        let result = write!(self.out, "{text}").and_then(|()| self.out.flush());
        self.record(result);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        let result = writeln!(self.out, "{text}");
        self.record(result);
    }

    fn type_out(&mut self, text: &str) -> io::Result<()> {
        let delay = self.pacing.scale(self.typing_delay);
        if delay.is_zero() {
            return writeln!(self.out, "{text}");
        }
        for ch in text.chars() {
            write!(self.out, "{ch}")?;
            self.out.flush()?;
            thread::sleep(delay);
        }
        writeln!(self.out)
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result
            && self.error.is_none()
        {
            self.error = Some(err);
        }
    }
}

pub fn hp_bar(current: u32, max: u32) -> String {
    let filled = if max == 0 { 0 } else { (current.min(max) * HP_BAR_WIDTH).div_ceil(max) };
    let empty = HP_BAR_WIDTH - filled;
    format!("[{}{}] {current}/{max}", "#".repeat(filled as usize), "-".repeat(empty as usize))
}

fn effect_cue(effect: EffectKind) -> Option<&'static str> {
    match effect {
        EffectKind::Select => None,
        EffectKind::Attack => Some("*slash*"),
        EffectKind::Miss => Some("*thud*"),
        EffectKind::Heal => Some("*sparkle*"),
        EffectKind::Approaching => Some("*footsteps*"),
        EffectKind::Darkness => Some("*the light fades*"),
        EffectKind::LevelUp => Some("*fanfare*"),
        EffectKind::ItemGet => Some("*chime*"),
        EffectKind::Win => Some("*victory jingle*"),
    }
}

fn menu_label(command: Command) -> &'static str {
    match command {
        Command::Attack => "Attack",
        Command::Spell => "Spell",
        Command::Item => "Item",
        Command::Run => "Run",
    }
}

fn theme_name(theme: ThemeKind) -> &'static str {
    match theme {
        ThemeKind::Battle => "battle theme",
        ThemeKind::Boss => "boss theme",
        ThemeKind::Victory => "ending theme",
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render_message(&mut self, text: &str) {
        let result = self.type_out(text);
        self.record(result);
    }

    fn render_enemy(&mut self, enemy: &Enemy) {
        let marker = if enemy.is_boss { " [BOSS]" } else { "" };
        self.line(&format!("=== {} Lv {}{marker} ===", enemy.name, enemy.level));
    }

    fn render_enemy_hp(&mut self, current: u32, max: u32) {
        self.line(&format!("Enemy HP {}", hp_bar(current, max)));
    }

    fn render_player_stats(&mut self, player: &Player) {
        self.line(&format!(
            "Lv {}  HP {}  MP {}  EXP {}/{}",
            player.level,
            hp_bar(player.hp, player.max_hp),
            player.mp,
            player.exp,
            player.next_level_threshold()
        ));
    }

    fn present_problem(&mut self, problem: &MathProblem, choices: &[u32; CHOICE_COUNT]) {
        let options = choices
            .iter()
            .enumerate()
            .map(|(index, value)| format!("{}) {value}", index + 1))
            .collect::<Vec<_>>()
            .join("   ");
        self.line(&format!("  {}", problem.prompt));
        self.line(&format!("  {options}"));
    }

    fn present_command_menu(&mut self) {
        let options = Command::ALL
            .iter()
            .enumerate()
            .map(|(index, command)| format!("{}) {}", index + 1, menu_label(*command)))
            .collect::<Vec<_>>()
            .join("   ");
        self.line(&format!("  {options}"));
    }

    fn play_effect(&mut self, effect: EffectKind) {
        if let Some(cue) = effect_cue(effect) {
            self.line(cue);
        }
    }

    fn play_theme(&mut self, theme: ThemeKind) {
        self.theme = Some(theme);
        self.line(&format!("~ {} ~", theme_name(theme)));
    }

    fn stop_theme(&mut self) {
        if self.theme.take().is_some() {
            self.line("~ the music stops ~");
        }
    }

    fn pause(&mut self, delay: Duration) {
        let result = self.out.flush();
        self.record(result);
        let delay = self.pacing.scale(delay);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}
