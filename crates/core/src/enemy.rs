//! Opponent selection and level scaling.
//!
//! Selection is a priority chain: progression bosses first, then the fixed
//! tutorial opener, then a catalog roll scaled around the player's level.

use crate::content::{
    BossTemplate, ContentPack, EnemyTemplate, FINAL_BOSS, ItemDrop, TIER_ONE_BOSS, TUTORIAL_ENEMY,
};
use crate::rng::RandomSource;
use crate::state::{EncounterFlags, Enemy, Player};

const TIER_ONE_BOSS_EXP_TRIGGER: u32 = 8;
const FINAL_BOSS_LEVEL: u32 = 10;
const LEVEL_SCALE_STEP: f64 = 0.15;
const DROP_CHANCE: f64 = 0.5;

pub fn select_enemy(
    player: &Player,
    flags: &EncounterFlags,
    content: &ContentPack,
    rng: &mut dyn RandomSource,
) -> Enemy {
    if player.level == 1
        && player.exp >= TIER_ONE_BOSS_EXP_TRIGGER
        && !flags.tier_one_boss_defeated
    {
        return boss_enemy(&TIER_ONE_BOSS, true);
    }

    if player.level >= FINAL_BOSS_LEVEL && !flags.final_boss_defeated {
        return boss_enemy(&FINAL_BOSS, false);
    }

    if player.level == 1 && player.exp == 0 {
        return scaled_enemy(&TUTORIAL_ENEMY, 1);
    }

    let template = roll_template(player, content, rng);
    let offset = rng.below(3);
    let level = (player.level + offset).saturating_sub(1).max(1);
    scaled_enemy(&template, level)
}

fn roll_template(player: &Player, content: &ContentPack, rng: &mut dyn RandomSource) -> EnemyTemplate {
    if player.level == 1 && rng.next_unit() < 0.5 {
        return TUTORIAL_ENEMY;
    }
    if content.enemies.is_empty() {
        return TUTORIAL_ENEMY;
    }
    let index = rng.below(content.enemies.len() as u32) as usize;
    content.enemies[index]
}

/// Stat multiplier for an enemy of `level`.
pub fn level_scale(level: u32) -> f64 {
    1.0 + f64::from(level.saturating_sub(1)) * LEVEL_SCALE_STEP
}

fn scale_stat(base: u32, scale: f64) -> u32 {
    (f64::from(base) * scale).floor() as u32
}

fn scaled_enemy(template: &EnemyTemplate, level: u32) -> Enemy {
    let scale = level_scale(level);
    let hp = scale_stat(template.hp, scale);
    Enemy {
        id: template.id,
        name: template.name,
        hp,
        max_hp: hp,
        exp_reward: scale_stat(template.exp, scale),
        level,
        is_boss: false,
        is_tier_one_boss: false,
    }
}

fn boss_enemy(template: &BossTemplate, is_tier_one_boss: bool) -> Enemy {
    Enemy {
        id: template.id,
        name: template.name,
        hp: template.hp,
        max_hp: template.hp,
        exp_reward: template.exp,
        level: template.level,
        is_boss: true,
        is_tier_one_boss,
    }
}

/// Half of all victories yield one item, picked by weight. Flavour only.
pub fn roll_drop<'a>(drops: &'a [ItemDrop], rng: &mut dyn RandomSource) -> Option<&'a ItemDrop> {
    if rng.next_unit() >= DROP_CHANCE {
        return None;
    }
    let total: f64 = drops.iter().map(|drop| drop.weight).sum();
    if total <= 0.0 {
        return None;
    }
    let mut roll = rng.next_unit() * total;
    for drop in drops {
        if roll < drop.weight {
            return Some(drop);
        }
        roll -= drop.weight;
    }
    drops.last()
}
