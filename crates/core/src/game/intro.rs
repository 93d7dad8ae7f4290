//! Encounter opening: enemy selection, the three intro beats and the command menu.

use super::schedule::pacing;
use super::*;
use crate::enemy::select_enemy;

impl<P: Presenter> Game<P> {
    pub(super) fn begin_encounter(&mut self) {
        self.state.end_encounter();
        self.set_phase(Phase::Intro);

        let enemy =
            select_enemy(&self.state.player, &self.state.flags, &self.content, self.rng.as_mut());
        self.log.push(LogEvent::EnemyAppeared { id: enemy.id, level: enemy.level, hp: enemy.hp });
        tracing::info!(
            enemy = enemy.id,
            level = enemy.level,
            hp = enemy.hp,
            boss = enemy.is_boss,
            "encounter started"
        );
        self.state.enemy = Some(enemy);

        self.presenter.render_player_stats(&self.state.player);
        self.presenter.render_message("......");
        self.scheduler.schedule(pacing::INTRO_SILENCE, Step::IntroApproach);
    }

    pub(super) fn intro_approach(&mut self) {
        self.presenter.render_message("Something is approaching...");
        self.presenter.play_effect(EffectKind::Approaching);
        self.scheduler.schedule(pacing::INTRO_APPROACH, Step::IntroDarkness);
    }

    pub(super) fn intro_darkness(&mut self) {
        self.presenter.render_message("It suddenly grew dark!");
        self.presenter.play_effect(EffectKind::Darkness);
        self.scheduler.schedule(pacing::INTRO_DARKNESS, Step::IntroReveal);
    }

    pub(super) fn intro_reveal(&mut self) {
        let Some(enemy) = self.state.enemy else {
            return;
        };
        self.presenter.render_enemy(&enemy);
        self.presenter.render_enemy_hp(enemy.hp, enemy.max_hp);
        self.presenter.render_message(&format!("{} appeared!", enemy.name));
        self.presenter.play_theme(if enemy.is_boss { ThemeKind::Boss } else { ThemeKind::Battle });
        self.scheduler.schedule(pacing::INTRO_REVEAL, Step::OpenCommandMenu);
    }

    pub(super) fn open_command_menu(&mut self) {
        if self.state.enemy.is_none() {
            return;
        }
        self.state.encounter_active = true;
        self.set_phase(Phase::CommandSelect);
        self.presenter.present_command_menu();
        self.presenter.render_message("What will you do?");
        let prompt_id = self.issue_prompt_id();
        self.pending_prompt = Some(Prompt::Command { prompt_id });
    }
}
