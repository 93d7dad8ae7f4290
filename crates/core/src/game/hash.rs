//! Stable snapshot hashing for deterministic verification.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl<P: Presenter> Game<P> {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.scheduler.clock().as_millis() as u64);
        hasher.write_u64(self.next_prompt_seq);
        hasher.write_u8(self.phase as u8);

        let player = &self.state.player;
        for value in [player.hp, player.max_hp, player.mp, player.level, player.exp] {
            hasher.write_u32(value);
        }
        hasher.write_u8(u8::from(self.state.flags.tier_one_boss_defeated));
        hasher.write_u8(u8::from(self.state.flags.final_boss_defeated));
        hasher.write_u8(u8::from(self.state.encounter_active));

        if let Some(enemy) = &self.state.enemy {
            hasher.write(enemy.id.as_bytes());
            hasher.write_u32(enemy.hp);
            hasher.write_u32(enemy.max_hp);
            hasher.write_u32(enemy.level);
        }
        if let Some(rush) = &self.state.rush {
            hasher.write_u32(rush.question_index);
            hasher.write_u32(rush.hits_landed);
        }
        if let Some(problem) = &self.state.problem {
            hasher.write(problem.prompt.as_bytes());
            hasher.write_u32(problem.answer);
        }
        hasher.finish()
    }
}
