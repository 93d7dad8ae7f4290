//! The attack rush: issuing problems, judging answers, closing the rush.

use super::schedule::pacing;
use super::*;
use crate::problem::build_choices;
use crate::rush::{AnswerOutcome, RushEnd, RushStep, RushSummary};

impl<P: Presenter> Game<P> {
    /// Judges `value` against the problem issued with `prompt_id`.
    ///
    /// Answers for any other prompt, or arriving outside an active encounter,
    /// are rejected as stale and change nothing.
    pub fn apply_answer(
        &mut self,
        prompt_id: PromptId,
        value: u32,
    ) -> Result<AnswerOutcome, GameError> {
        let current = match &self.pending_prompt {
            Some(Prompt::Answer { prompt_id: current, .. }) => *current,
            _ => return Err(GameError::StaleAnswer),
        };
        if current != prompt_id || !self.state.encounter_active {
            tracing::debug!(?prompt_id, ?current, "stale answer ignored");
            return Err(GameError::StaleAnswer);
        }

        let state = &mut self.state;
        let (Some(problem), Some(session), Some(enemy)) =
            (state.problem.as_ref(), state.rush.as_mut(), state.enemy.as_mut())
        else {
            return Err(GameError::StaleAnswer);
        };
        let outcome = session.submit_answer(problem, value, &mut state.player, enemy);
        let enemy = *enemy;

        self.pending_prompt = None;
        self.state.problem = None;
        self.journal.append(InputPayload::Answer { prompt_id, value });
        self.log.push(LogEvent::AnswerResolved { correct: outcome.correct, damage: outcome.damage });
        tracing::debug!(
            value,
            correct = outcome.correct,
            damage = outcome.damage,
            "answer resolved"
        );

        if outcome.correct {
            self.presenter.render_message("Correct!");
            self.presenter.play_effect(EffectKind::Attack);
            self.presenter.render_enemy_hp(enemy.hp, enemy.max_hp);
            if outcome.enemy_defeated {
                self.presenter.render_message(&format!("{} was defeated!", enemy.name));
                self.scheduler.schedule(pacing::ENEMY_FALLS, Step::EndRush);
            } else {
                self.scheduler.schedule(pacing::AFTER_HIT, Step::NextQuestion);
            }
        } else {
            self.presenter.render_message("Miss! You took damage!");
            self.presenter.play_effect(EffectKind::Miss);
            self.presenter.render_player_stats(&self.state.player);
            self.log.push(LogEvent::PlayerDamaged {
                amount: outcome.damage,
                hp_after: self.state.player.hp,
            });
            if outcome.player_defeated {
                self.state.rush = None;
                self.state.encounter_active = false;
                self.scheduler.schedule(pacing::TO_GAME_OVER, Step::GameOver);
            } else {
                self.scheduler.schedule(pacing::AFTER_MISS, Step::NextQuestion);
            }
        }
        Ok(outcome)
    }

    pub(super) fn next_question(&mut self) {
        let level = self.state.player.level;
        let Some(session) = self.state.rush.as_mut() else {
            return;
        };
        let problem = match session.advance(level, self.rng.as_mut()) {
            RushStep::Question(problem) => problem,
            RushStep::Complete(summary) => {
                self.finish_rush(summary);
                return;
            }
        };
        let question_number = session.question_index;
        let total_questions = session.max_questions;
        let choices = build_choices(problem.answer, self.rng.as_mut());

        self.presenter.present_problem(&problem, &choices);
        self.presenter.render_message(&format!("Question {question_number} / {total_questions}"));
        let prompt_id = self.issue_prompt_id();
        self.pending_prompt = Some(Prompt::Answer {
            prompt_id,
            problem: problem.clone(),
            choices,
            question_number,
            total_questions,
        });
        self.state.problem = Some(problem);
    }

    pub(super) fn end_rush(&mut self) {
        let level = self.state.player.level;
        let Some(session) = self.state.rush.as_mut() else {
            return;
        };
        if let RushStep::Complete(summary) = session.advance(level, self.rng.as_mut()) {
            self.finish_rush(summary);
        }
    }

    fn finish_rush(&mut self, summary: RushSummary) {
        self.state.rush = None;
        tracing::debug!(
            hits = summary.hits_landed,
            asked = summary.questions_asked,
            end = ?summary.end,
            "rush finished"
        );
        let enemy_down = summary.end == RushEnd::EnemyDefeated
            || self.state.enemy.is_some_and(|enemy| enemy.is_defeated());
        if enemy_down {
            self.scheduler.schedule(pacing::RUSH_TO_VICTORY, Step::ResolveVictory);
        } else {
            self.presenter.render_message("The attack is over!");
            self.scheduler.schedule(pacing::RUSH_TO_COUNTER, Step::EnemyWindUp);
        }
    }
}
