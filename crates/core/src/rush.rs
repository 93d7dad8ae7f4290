//! The attack action: a fixed run of problems where every correct answer
//! lands a hit and every miss costs the player hp.

use crate::problem::{self, MathProblem};
use crate::rng::RandomSource;
use crate::state::{Enemy, Player};

pub const RUSH_LENGTH: u32 = 5;
const BASE_HIT_DAMAGE: u32 = 8;
const HIT_DAMAGE_PER_LEVEL: u32 = 2;
const MISS_DAMAGE_FLAT: u32 = 5;

pub fn hit_damage(player: &Player) -> u32 {
    BASE_HIT_DAMAGE + player.level * HIT_DAMAGE_PER_LEVEL
}

/// Penalty for a wrong answer: a tenth of max hp plus a flat amount.
pub fn miss_damage(player: &Player) -> u32 {
    player.max_hp / 10 + MISS_DAMAGE_FLAT
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RushEnd {
    EnemyDefeated,
    PlayerDefeated,
    QuestionsExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RushSummary {
    pub hits_landed: u32,
    pub questions_asked: u32,
    pub end: RushEnd,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RushStep {
    Question(MathProblem),
    Complete(RushSummary),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Damage dealt to the enemy on a hit, or taken by the player on a miss.
    pub damage: u32,
    pub enemy_defeated: bool,
    pub player_defeated: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RushSession {
    pub question_index: u32,
    pub max_questions: u32,
    pub damage_per_hit: u32,
    pub hits_landed: u32,
    end: Option<RushEnd>,
}

impl RushSession {
    pub fn begin(player: &Player) -> Self {
        Self {
            question_index: 0,
            max_questions: RUSH_LENGTH,
            damage_per_hit: hit_damage(player),
            hits_landed: 0,
            end: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.end.is_some() || self.question_index >= self.max_questions
    }

    /// Issues the next problem, or reports why the rush is over.
    pub fn advance(&mut self, level: u32, rng: &mut dyn RandomSource) -> RushStep {
        if self.is_complete() {
            let end = *self.end.get_or_insert(RushEnd::QuestionsExhausted);
            return RushStep::Complete(self.summary(end));
        }
        self.question_index += 1;
        RushStep::Question(problem::generate(level, rng))
    }

    /// Resolves one answer against the problem it was given for.
    pub fn submit_answer(
        &mut self,
        problem: &MathProblem,
        chosen: u32,
        player: &mut Player,
        enemy: &mut Enemy,
    ) -> AnswerOutcome {
        if problem.is_correct(chosen) {
            let damage = enemy.take_damage(self.damage_per_hit);
            self.hits_landed += 1;
            let enemy_defeated = enemy.is_defeated();
            if enemy_defeated {
                self.end = Some(RushEnd::EnemyDefeated);
            }
            AnswerOutcome { correct: true, damage, enemy_defeated, player_defeated: false }
        } else {
            let damage = player.take_damage(miss_damage(player));
            let player_defeated = player.is_defeated();
            if player_defeated {
                self.end = Some(RushEnd::PlayerDefeated);
            }
            AnswerOutcome { correct: false, damage, enemy_defeated: false, player_defeated }
        }
    }

    fn summary(&self, end: RushEnd) -> RushSummary {
        RushSummary { hits_landed: self.hits_landed, questions_asked: self.question_index, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPack;
    use crate::enemy::select_enemy;
    use crate::rng::SeededRng;
    use crate::state::EncounterFlags;

    fn tutorial_enemy() -> Enemy {
        let mut rng = SeededRng::new(0);
        select_enemy(&Player::new(), &EncounterFlags::default(), &ContentPack::default(), &mut rng)
    }

    fn next_problem(session: &mut RushSession, rng: &mut SeededRng) -> MathProblem {
        match session.advance(1, rng) {
            RushStep::Question(problem) => problem,
            RushStep::Complete(summary) => panic!("rush ended early: {summary:?}"),
        }
    }

    #[test]
    fn level_one_hits_for_ten() {
        assert_eq!(RushSession::begin(&Player::new()).damage_per_hit, 10);
        let veteran = Player { level: 10, ..Player::new() };
        assert_eq!(hit_damage(&veteran), 28);
    }

    #[test]
    fn tutorial_enemy_falls_to_two_hits() {
        let mut rng = SeededRng::new(10);
        let mut player = Player::new();
        let mut enemy = tutorial_enemy();
        let mut session = RushSession::begin(&player);

        let first = next_problem(&mut session, &mut rng);
        let outcome = session.submit_answer(&first, first.answer, &mut player, &mut enemy);
        assert!(outcome.correct && !outcome.enemy_defeated);
        assert_eq!(enemy.hp, 6);

        let second = next_problem(&mut session, &mut rng);
        let outcome = session.submit_answer(&second, second.answer, &mut player, &mut enemy);
        assert!(outcome.enemy_defeated);
        assert_eq!(outcome.damage, 6);
        assert_eq!(enemy.hp, 0);

        let RushStep::Complete(summary) = session.advance(1, &mut rng) else {
            panic!("defeated enemy must end the rush");
        };
        assert_eq!(
            summary,
            RushSummary { hits_landed: 2, questions_asked: 2, end: RushEnd::EnemyDefeated }
        );
    }

    #[test]
    fn wrong_answer_costs_tenth_of_max_hp_plus_five() {
        let mut rng = SeededRng::new(12);
        let mut player = Player::new();
        let mut enemy = tutorial_enemy();
        let mut session = RushSession::begin(&player);

        let problem = next_problem(&mut session, &mut rng);
        let outcome = session.submit_answer(&problem, problem.answer + 1, &mut player, &mut enemy);
        assert!(!outcome.correct);
        assert_eq!(outcome.damage, 10);
        assert_eq!(player.hp, 40);
        assert_eq!(enemy.hp, enemy.max_hp);
    }

    #[test]
    fn five_questions_then_complete() {
        let mut rng = SeededRng::new(13);
        let mut player = Player { hp: 500, max_hp: 500, ..Player::new() };
        let mut enemy = tutorial_enemy();
        let mut session = RushSession::begin(&player);

        for _ in 0..RUSH_LENGTH {
            let problem = next_problem(&mut session, &mut rng);
            session.submit_answer(&problem, problem.answer + 1, &mut player, &mut enemy);
        }
        let RushStep::Complete(summary) = session.advance(1, &mut rng) else {
            panic!("rush is limited to five questions");
        };
        assert_eq!(summary.end, RushEnd::QuestionsExhausted);
        assert_eq!(summary.questions_asked, 5);
        assert_eq!(summary.hits_landed, 0);
    }

    #[test]
    fn player_defeat_aborts_the_rush() {
        let mut rng = SeededRng::new(14);
        let mut player = Player { hp: 4, ..Player::new() };
        let mut enemy = tutorial_enemy();
        let mut session = RushSession::begin(&player);

        let problem = next_problem(&mut session, &mut rng);
        let outcome = session.submit_answer(&problem, problem.answer + 2, &mut player, &mut enemy);
        assert!(outcome.player_defeated);
        assert_eq!(player.hp, 0);
        assert!(session.is_complete());
        assert!(matches!(
            session.advance(1, &mut rng),
            RushStep::Complete(RushSummary { end: RushEnd::PlayerDefeated, .. })
        ));
    }
}
