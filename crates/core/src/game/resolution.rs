//! Enemy counterattacks and the end of an encounter: victory rewards,
//! defeat and the final clear.

use super::schedule::pacing;
use super::*;
use crate::content::ItemDrop;
use crate::enemy::roll_drop;

const COUNTER_MIN: u32 = 2;
const COUNTER_MAX: u32 = 6;

/// Counterattack damage: a 2..=6 roll plus half the player's level.
pub(crate) fn counter_damage(player_level: u32, rng: &mut dyn RandomSource) -> u32 {
    rng.between(COUNTER_MIN, COUNTER_MAX) + player_level / 2
}

impl<P: Presenter> Game<P> {
    pub(super) fn enemy_wind_up(&mut self) {
        let Some(enemy) = self.state.enemy else {
            return;
        };
        self.set_phase(Phase::EnemyCounter);
        self.presenter.render_message(&format!("{} attacks!", enemy.name));
        self.scheduler.schedule(pacing::COUNTER_WIND_UP, Step::EnemyStrike);
    }

    pub(super) fn enemy_strike(&mut self) {
        if self.state.enemy.is_none() {
            return;
        }
        let damage = counter_damage(self.state.player.level, self.rng.as_mut());
        let lost = self.state.player.take_damage(damage);
        self.presenter.play_effect(EffectKind::Miss);
        self.presenter.render_player_stats(&self.state.player);
        let line = format!("{} took {damage} damage!", self.hero_name());
        self.presenter.render_message(&line);
        self.log.push(LogEvent::PlayerDamaged { amount: lost, hp_after: self.state.player.hp });

        if self.state.player.is_defeated() {
            self.state.encounter_active = false;
            self.scheduler.schedule(pacing::TO_GAME_OVER, Step::GameOver);
        } else {
            self.scheduler.schedule(pacing::COUNTER_TO_MENU, Step::OpenCommandMenu);
        }
    }

    pub(super) fn resolve_victory(&mut self) {
        let Some(enemy) = self.state.enemy else {
            return;
        };
        self.state.encounter_active = false;
        self.set_phase(Phase::Victory);
        self.presenter.stop_theme();
        self.presenter.render_message(&format!("{} was defeated!", enemy.name));
        self.presenter.play_effect(EffectKind::Attack);

        if enemy.is_tier_one_boss {
            self.state.flags.tier_one_boss_defeated = true;
            self.log.push(LogEvent::BossDefeated { id: enemy.id });
            self.presenter.render_message("You defeated the level 1 boss!");
            self.presenter.play_effect(EffectKind::Win);
        }
        if enemy.is_final_boss() {
            self.state.flags.final_boss_defeated = true;
            self.log.push(LogEvent::BossDefeated { id: enemy.id });
            self.scheduler.schedule(pacing::TO_GAME_CLEAR, Step::GameClear);
            return;
        }

        let exp = enemy.exp_reward;
        self.state.player.exp += exp;
        self.log.push(LogEvent::ExpAwarded { amount: exp });
        let drop = roll_drop(&self.content.drops, self.rng.as_mut()).copied();
        self.scheduler.schedule(pacing::VICTORY_TO_EXP, Step::AwardExperience { exp, drop });
    }

    pub(super) fn award_experience(&mut self, exp: u32, drop: Option<ItemDrop>) {
        self.presenter.render_message(&format!("Gained {exp} EXP!"));
        let before = self.state.player.level;
        let gained = self.state.player.apply_level_ups();
        for level in before + 1..=before + gained {
            self.log.push(LogEvent::LevelUp { level });
            self.presenter.render_message(&format!("Level up! Now level {level}!"));
            self.presenter.play_effect(EffectKind::LevelUp);
            tracing::info!(level, "level up");
        }
        self.presenter.render_player_stats(&self.state.player);
        self.scheduler.schedule(
            pacing::EXP_TO_DROP,
            Step::AnnounceDrop { drop, leveled_up: gained > 0 },
        );
    }

    pub(super) fn announce_drop(&mut self, drop: Option<ItemDrop>, leveled_up: bool) {
        let delay = match drop {
            Some(drop) => {
                self.log.push(LogEvent::ItemDropped { id: drop.id });
                self.presenter.render_message(&format!("Obtained {}!", drop.name));
                self.presenter.play_effect(EffectKind::ItemGet);
                pacing::DROP_TO_NEXT
            }
            None if leveled_up => pacing::LEVEL_UP_TO_NEXT,
            None => pacing::PLAIN_TO_NEXT,
        };
        self.scheduler.schedule(delay, Step::NextEncounter);
    }

    pub(super) fn game_over(&mut self) {
        self.scheduler.cancel_all();
        self.state.end_encounter();
        self.set_phase(Phase::Defeat);
        self.presenter.stop_theme();
        let line = format!("{} was defeated... GAME OVER", self.hero_name());
        self.presenter.render_message(&line);
        self.outcome = Some(RunOutcome::Defeat);
        tracing::info!(level = self.state.player.level, "run ended in defeat");
    }

    pub(super) fn game_clear(&mut self) {
        self.scheduler.cancel_all();
        let boss = self.state.enemy.map_or("the final boss", |enemy| enemy.name);
        self.state.end_encounter();
        self.set_phase(Phase::GameClear);
        self.presenter.play_theme(ThemeKind::Victory);
        let line = format!("{} defeated {boss}! GAME CLEAR!", self.hero_name());
        self.presenter.render_message(&line);
        self.outcome = Some(RunOutcome::GameClear);
        tracing::info!(level = self.state.player.level, "run cleared");
    }
}
