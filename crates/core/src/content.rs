pub mod keys {
    pub const ENEMY_TUTORIAL: &str = "C000";
    pub const ENEMY_TIER_ONE_BOSS: &str = "BOSS_LV1";
    pub const ENEMY_FINAL_BOSS: &str = "F001";

    pub const DROP_MEDICINAL_HERB: &str = "drop_medicinal_herb";
    pub const DROP_COPPER_SWORD: &str = "drop_copper_sword";
    pub const DROP_SEED_OF_AGILITY: &str = "drop_seed_of_agility";
    pub const DROP_HOLY_WATER: &str = "drop_holy_water";
}

pub const DEFAULT_HERO_NAME: &str = "Eito";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub hp: u32,
    pub exp: u32,
}

/// Fixed encounter that bypasses the catalog roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub hp: u32,
    pub exp: u32,
    pub level: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemDrop {
    pub id: &'static str,
    pub name: &'static str,
    /// Relative weight inside the drop table.
    pub weight: f64,
}

pub const TUTORIAL_ENEMY: EnemyTemplate =
    EnemyTemplate { id: keys::ENEMY_TUTORIAL, name: "Humanoid UMA", hp: 16, exp: 3 };

pub const TIER_ONE_BOSS: BossTemplate =
    BossTemplate { id: keys::ENEMY_TIER_ONE_BOSS, name: "King Monkey", hp: 60, exp: 15, level: 3 };

pub const FINAL_BOSS: BossTemplate =
    BossTemplate { id: keys::ENEMY_FINAL_BOSS, name: "Bigfoot", hp: 100, exp: 0, level: 10 };

/// Base stats for catalog entries, keyed by the first letter of the id.
pub fn base_stats_for_prefix(prefix: char) -> (u32, u32) {
    match prefix {
        'F' => (25, 8),
        'G' => (20, 7),
        'M' => (30, 10),
        'S' => (25, 9),
        'O' => (40, 12),
        'L' => (35, 11),
        'R' => (50, 15),
        _ => (15, 5),
    }
}

fn catalog_entry(id: &'static str, name: &'static str) -> EnemyTemplate {
    let (hp, exp) = base_stats_for_prefix(id.chars().next().unwrap_or('C'));
    EnemyTemplate { id, name, hp, exp }
}

#[derive(Clone, Debug)]
pub struct ContentPack {
    pub hero_name: String,
    /// Catalog rolled for regular encounters. The tutorial enemy sits at index 0.
    pub enemies: Vec<EnemyTemplate>,
    pub drops: Vec<ItemDrop>,
}

impl ContentPack {
    pub fn build_default() -> Self {
        Self {
            hero_name: DEFAULT_HERO_NAME.to_string(),
            enemies: vec![
                TUTORIAL_ENEMY,
                catalog_entry("C001", "Mothman"),
                catalog_entry("C002", "Chupacabra"),
                catalog_entry("C003", "Jersey Devil"),
                catalog_entry("G001", "Flatwoods Monster"),
                catalog_entry("G002", "Dover Demon"),
                catalog_entry("F002", "Yeti"),
                catalog_entry("S001", "Sea Serpent"),
                catalog_entry("M001", "Mokele-mbembe"),
                catalog_entry("L001", "Nessie"),
                catalog_entry("O001", "Ogopogo"),
                catalog_entry("R001", "Ropen"),
            ],
            drops: vec![
                ItemDrop { id: keys::DROP_MEDICINAL_HERB, name: "Medicinal Herb", weight: 0.30 },
                ItemDrop { id: keys::DROP_COPPER_SWORD, name: "Copper Sword", weight: 0.10 },
                ItemDrop { id: keys::DROP_SEED_OF_AGILITY, name: "Seed of Agility", weight: 0.05 },
                ItemDrop { id: keys::DROP_HOLY_WATER, name: "Holy Water", weight: 0.15 },
            ],
        }
    }

    pub fn with_hero_name(mut self, hero_name: impl Into<String>) -> Self {
        self.hero_name = hero_name.into();
        self
    }
}

impl Default for ContentPack {
    fn default() -> Self {
        Self::build_default()
    }
}
