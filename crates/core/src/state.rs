use serde::{Deserialize, Serialize};

use crate::content::keys;
use crate::problem::MathProblem;
use crate::rush::RushSession;

pub const STARTING_HP: u32 = 50;
pub const STARTING_MP: u32 = 10;
pub const MP_CAP: u32 = 50;
pub const MAX_LEVEL: u32 = 99;
pub const MAX_SAVED_HP: u32 = 9_999;
const LEVEL_UP_HP_GAIN: u32 = 10;
const LEVEL_UP_MP_GAIN: u32 = 5;
const EXP_PER_LEVEL: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub level: u32,
    pub exp: u32,
}

impl Player {
    pub fn new() -> Self {
        Self { hp: STARTING_HP, max_hp: STARTING_HP, mp: STARTING_MP, level: 1, exp: 0 }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Applies damage, flooring hp at zero. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores hp up to `max_hp`. Returns the hp actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += restored;
        restored
    }

    pub fn next_level_threshold(&self) -> u32 {
        self.level.saturating_mul(EXP_PER_LEVEL)
    }

    /// Pulls saved progress back inside sane ranges: level in `1..=MAX_LEVEL`,
    /// max hp in `1..=MAX_SAVED_HP`, hp within `1..=max_hp`, mp within the cap
    /// and exp below the next threshold.
    pub fn clamped(self) -> Self {
        let level = self.level.clamp(1, MAX_LEVEL);
        let max_hp = self.max_hp.clamp(1, MAX_SAVED_HP);
        let player = Self {
            level,
            max_hp,
            hp: self.hp.clamp(1, max_hp),
            mp: self.mp.min(MP_CAP),
            exp: self.exp,
        };
        Self { exp: self.exp.min(player.next_level_threshold() - 1), ..player }
    }

    pub fn is_valid_progress(&self) -> bool {
        *self == self.clamped()
    }

    /// Raises the level for as long as accumulated exp crosses the threshold.
    /// Returns the number of levels gained.
    pub fn apply_level_ups(&mut self) -> u32 {
        let mut gained = 0;
        while self.exp >= self.next_level_threshold() {
            self.level += 1;
            self.max_hp += LEVEL_UP_HP_GAIN;
            self.hp = self.max_hp;
            self.mp = (self.mp + LEVEL_UP_MP_GAIN).min(MP_CAP);
            gained += 1;
        }
        gained
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Enemy {
    pub id: &'static str,
    pub name: &'static str,
    pub hp: u32,
    pub max_hp: u32,
    pub exp_reward: u32,
    pub level: u32,
    pub is_boss: bool,
    pub is_tier_one_boss: bool,
}

impl Enemy {
    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    pub fn is_final_boss(&self) -> bool {
        self.id == keys::ENEMY_FINAL_BOSS
    }

    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }
}

/// Progression gates that outlive a single encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncounterFlags {
    pub tier_one_boss_defeated: bool,
    pub final_boss_defeated: bool,
}

pub struct BattleState {
    pub player: Player,
    pub flags: EncounterFlags,
    pub enemy: Option<Enemy>,
    pub rush: Option<RushSession>,
    pub problem: Option<MathProblem>,
    pub encounter_active: bool,
}

impl BattleState {
    pub fn new(player: Player, flags: EncounterFlags) -> Self {
        Self { player, flags, enemy: None, rush: None, problem: None, encounter_active: false }
    }

    /// Drops everything tied to the current encounter, keeping progression.
    pub fn end_encounter(&mut self) {
        self.enemy = None;
        self.rush = None;
        self.problem = None;
        self.encounter_active = false;
    }
}

impl Default for BattleState {
    fn default() -> Self {
        Self::new(Player::new(), EncounterFlags::default())
    }
}
