//! Command menu handling.

use super::schedule::pacing;
use super::*;
use crate::rush::RushSession;

pub const SPELL_MP_COST: u32 = 3;
const SPELL_HEAL_MIN: u32 = 20;
const SPELL_HEAL_MAX: u32 = 29;
pub const HERB_HEAL: u32 = 30;

impl<P: Presenter> Game<P> {
    /// Accepts a menu choice for the command prompt `prompt_id`.
    ///
    /// A spell without enough MP is reported to the presenter and leaves the
    /// same prompt open; the error is returned so callers can react too.
    pub fn apply_command(&mut self, prompt_id: PromptId, command: Command) -> Result<(), GameError> {
        let awaiting = matches!(
            self.pending_prompt,
            Some(Prompt::Command { prompt_id: current }) if current == prompt_id
        );
        if !awaiting || !self.state.encounter_active || self.phase != Phase::CommandSelect {
            tracing::debug!(?prompt_id, %command, phase = ?self.phase, "command rejected");
            return Err(GameError::InvalidCommand { phase: self.phase });
        }

        self.presenter.play_effect(EffectKind::Select);
        if command == Command::Spell && self.state.player.mp < SPELL_MP_COST {
            self.presenter.render_message("Not enough MP!");
            self.presenter.play_effect(EffectKind::Miss);
            self.presenter.present_command_menu();
            self.presenter.render_message("What will you do?");
            return Err(GameError::InsufficientMp {
                available: self.state.player.mp,
                required: SPELL_MP_COST,
            });
        }

        self.pending_prompt = None;
        self.journal.append(InputPayload::Command { prompt_id, command });
        self.log.push(LogEvent::CommandAccepted { command });
        tracing::debug!(%command, "command accepted");

        match command {
            Command::Attack => self.command_attack(),
            Command::Spell => self.command_spell(),
            Command::Item => self.command_item(),
            Command::Run => self.command_run(),
        }
        Ok(())
    }

    fn command_attack(&mut self) {
        let line = format!("{} attacks!", self.hero_name());
        self.presenter.render_message(&line);
        self.state.rush = Some(RushSession::begin(&self.state.player));
        self.set_phase(Phase::RushInProgress);
        self.scheduler.schedule(pacing::ATTACK_WIND_UP, Step::NextQuestion);
    }

    fn command_spell(&mut self) {
        self.set_phase(Phase::SpellResolve);
        self.state.player.mp -= SPELL_MP_COST;
        let rolled = self.rng.between(SPELL_HEAL_MIN, SPELL_HEAL_MAX);
        let restored = self.state.player.heal(rolled);
        self.presenter.render_player_stats(&self.state.player);
        self.presenter.render_message(&format!("Heal! Recovered {restored} HP!"));
        self.presenter.play_effect(EffectKind::Heal);
        self.log.push(LogEvent::PlayerHealed { amount: restored });
        self.scheduler.schedule(pacing::ACTION_TO_COUNTER, Step::EnemyWindUp);
    }

    fn command_item(&mut self) {
        self.set_phase(Phase::ItemResolve);
        let restored = self.state.player.heal(HERB_HEAL);
        self.presenter.render_player_stats(&self.state.player);
        self.presenter.render_message(&format!("Used a Medicinal Herb! Recovered {restored} HP!"));
        self.presenter.play_effect(EffectKind::Heal);
        self.log.push(LogEvent::PlayerHealed { amount: restored });
        self.scheduler.schedule(pacing::ACTION_TO_COUNTER, Step::EnemyWindUp);
    }

    fn command_run(&mut self) {
        self.set_phase(Phase::Flee);
        let is_boss = self.state.enemy.is_some_and(|enemy| enemy.is_boss);
        if is_boss {
            self.presenter.render_message("But the way was blocked!");
            self.scheduler.schedule(pacing::ACTION_TO_COUNTER, Step::EnemyWindUp);
            return;
        }

        let line = format!("{} ran away!", self.hero_name());
        self.presenter.render_message(&line);
        self.presenter.stop_theme();
        self.scheduler.cancel_all();
        self.state.end_encounter();
        self.set_phase(Phase::Fled);
        self.scheduler.schedule(pacing::FLEE_TO_TITLE, Step::ReturnToTitle);
    }
}
