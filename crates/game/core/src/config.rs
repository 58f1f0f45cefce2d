//! Game configuration: compile-time limits and runtime balance tables.
//!
//! [`GameConfig`] carries the constants used as capacities and hard caps.
//! [`BalanceConfig`] carries every tuning knob of the combat and progression
//! formulas. Each section deserializes with `#[serde(default)]` so a partial
//! TOML file overrides only the values it names.

use crate::state::{CharacterClass, Element};

/// Compile-time limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameConfig;

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 16;

    // ===== hard caps =====
    pub const MAX_LEVEL: u32 = 30;
    pub const MAX_QUESTS: usize = 100;
    pub const DEFAULT_INVENTORY_SLOTS: usize = 20;
    pub const MIN_SEVERITY: u8 = 1;
    pub const MAX_SEVERITY: u8 = 5;
}

// ============================================================================
// Balance Config
// ============================================================================

/// All tuning knobs in one place.
///
/// The default preset is the reference balance; [`BalanceConfig::easy`] and
/// [`BalanceConfig::hard`] are the shipped alternatives.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceConfig {
    pub damage: DamageConfig,
    pub elements: ElementConfig,
    pub characters: CharacterConfig,
    pub xp: XpConfig,
    pub monsters: MonsterScalingConfig,
    pub combat: CombatConfig,
    pub encounters: EncounterConfig,
    pub inventory: InventoryConfig,
    pub quests: QuestConfig,
}

impl BalanceConfig {
    /// Forgiving preset: softer mitigation curve, stronger heals, fewer encounters.
    pub fn easy() -> Self {
        let mut config = Self::default();
        config.damage.defense_constant = 15.0;
        config.damage.base_crit_chance = 0.08;
        config.combat.defend_defense_bonus = 8;
        config.combat.heal_attack_ratio = 0.7;
        config.encounters.random_encounter_chance = 0.10;
        config.encounters.encounter_cooldown = 5;
        config
    }

    /// Punishing preset: steeper monster scaling, weaker support, frequent encounters.
    pub fn hard() -> Self {
        let mut config = Self::default();
        config.damage.defense_constant = 25.0;
        config.damage.base_crit_chance = 0.03;
        config.monsters.severity_step = 0.45;
        config.combat.heal_attack_ratio = 0.3;
        config.combat.shield_defense_ratio = 0.3;
        config.encounters.random_encounter_chance = 0.25;
        config.encounters.encounter_cooldown = 2;
        config
    }
}

/// Damage formula constants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageConfig {
    /// At this defense value exactly half of the raw power passes through.
    pub defense_constant: f64,
    pub base_crit_chance: f64,
    pub crit_multiplier: f64,
    pub max_crit_chance: f64,
    /// Crit chance gained per point of speed.
    pub crit_per_speed: f64,
    /// Variance is `variance_min + roll * variance_range`.
    pub variance_min: f64,
    pub variance_range: f64,
    pub min_damage: i32,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            defense_constant: 20.0,
            base_crit_chance: 0.05,
            crit_multiplier: 1.5,
            max_crit_chance: 0.25,
            crit_per_speed: 0.005,
            variance_min: 0.85,
            variance_range: 0.15,
            min_damage: 1,
        }
    }
}

/// Element effectiveness chart, indexed `[attacker][defender]`.
///
/// Row and column order follows [`Element::ALL`]: fire, water, earth, air, none.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementConfig {
    pub effectiveness: [[f64; 5]; 5],
}

impl ElementConfig {
    pub fn multiplier(&self, attacker: Element, defender: Element) -> f64 {
        self.effectiveness[attacker.index()][defender.index()]
    }
}

impl Default for ElementConfig {
    fn default() -> Self {
        Self {
            effectiveness: [
                // fire  water  earth  air   none
                [0.5, 0.5, 1.5, 1.0, 1.0], // fire
                [1.5, 0.5, 1.0, 0.5, 1.0], // water
                [1.0, 1.5, 0.5, 1.5, 1.0], // earth
                [1.0, 1.5, 0.5, 0.5, 1.0], // air
                [1.0, 1.0, 1.0, 1.0, 1.0], // none
            ],
        }
    }
}

/// Level-1 stats of a character class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassBaseStats {
    pub health: i32,
    pub mana: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

/// Per-level stat growth of a character class.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthRates {
    pub hp: f64,
    pub mana: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
}

/// One value per character class.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerClass<T> {
    pub tank: T,
    pub healer: T,
    pub dps: T,
}

impl<T> PerClass<T> {
    pub fn get(&self, class: CharacterClass) -> &T {
        match class {
            CharacterClass::Tank => &self.tank,
            CharacterClass::Healer => &self.healer,
            CharacterClass::Dps => &self.dps,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharacterConfig {
    pub base_stats: PerClass<ClassBaseStats>,
    pub growth_rates: PerClass<GrowthRates>,
    pub max_level: u32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            base_stats: PerClass {
                tank: ClassBaseStats { health: 150, mana: 50, attack: 5, defense: 15, speed: 6 },
                healer: ClassBaseStats { health: 100, mana: 100, attack: 3, defense: 8, speed: 8 },
                dps: ClassBaseStats { health: 80, mana: 75, attack: 15, defense: 5, speed: 7 },
            },
            growth_rates: PerClass {
                tank: GrowthRates { hp: 8.0, mana: 2.0, attack: 1.0, defense: 2.0, speed: 1.0 },
                healer: GrowthRates { hp: 5.0, mana: 5.0, attack: 0.5, defense: 1.0, speed: 1.5 },
                dps: GrowthRates { hp: 3.0, mana: 3.0, attack: 2.0, defense: 0.5, speed: 1.0 },
            },
            max_level: GameConfig::MAX_LEVEL,
        }
    }
}

/// Experience curves for characters and monsters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct XpConfig {
    /// `total_xp(level) = base * level^exponent`
    pub base: f64,
    pub exponent: i32,
    /// `monster_xp = monster_base * severity^monster_exponent * (1 + bonus * complexity)`
    pub monster_base: f64,
    pub monster_exponent: i32,
    pub monster_complexity_bonus: f64,
}

impl Default for XpConfig {
    fn default() -> Self {
        Self {
            base: 50.0,
            exponent: 2,
            monster_base: 25.0,
            monster_exponent: 2,
            monster_complexity_bonus: 0.05,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonsterScalingConfig {
    /// Stat multiplier per severity step: `1 + step * (severity - 1)`.
    pub severity_step: f64,
    /// Stat multiplier per complexity point: `1 + step * complexity`.
    pub complexity_step: f64,
    pub boss_xp_multiplier: u32,
    pub miniboss_xp_multiplier: u32,
}

impl Default for MonsterScalingConfig {
    fn default() -> Self {
        Self {
            severity_step: 0.35,
            complexity_step: 0.1,
            boss_xp_multiplier: 3,
            miniboss_xp_multiplier: 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    pub defend_defense_bonus: i32,
    pub defend_duration: u32,
    pub heal_attack_ratio: f64,
    pub shield_defense_ratio: f64,
    /// Turns a spell-granted shield lasts.
    pub shield_duration: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            defend_defense_bonus: 5,
            defend_duration: 1,
            heal_attack_ratio: 0.5,
            shield_defense_ratio: 0.5,
            shield_duration: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterConfig {
    /// Files strictly above this complexity spawn a boss.
    pub boss_complexity_threshold: u32,
    /// Hotspots at or above this risk spawn a miniboss.
    pub miniboss_risk_threshold: f64,
    pub random_encounter_chance: f64,
    /// Steps that must pass before another encounter can trigger.
    pub encounter_cooldown: u32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            boss_complexity_threshold: 20,
            miniboss_risk_threshold: 6.0,
            random_encounter_chance: 0.15,
            encounter_cooldown: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InventoryConfig {
    pub max_slots: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            max_slots: GameConfig::DEFAULT_INVENTORY_SLOTS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestConfig {
    pub max_quests: usize,
    /// Files strictly above this complexity become archaeology quests.
    pub archaeology_threshold: u32,
    /// Commits touching at least this many files grant a knowledge reward.
    pub knowledge_min_files: usize,
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            max_quests: GameConfig::MAX_QUESTS,
            archaeology_threshold: 15,
            knowledge_min_files: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_chart_matches_reference_pairs() {
        let chart = ElementConfig::default();
        assert_eq!(chart.multiplier(Element::Water, Element::Fire), 1.5);
        assert_eq!(chart.multiplier(Element::Fire, Element::Earth), 1.5);
        assert_eq!(chart.multiplier(Element::Fire, Element::Fire), 0.5);
        assert_eq!(chart.multiplier(Element::Air, Element::Fire), 1.0);
        for element in Element::ALL {
            assert_eq!(chart.multiplier(Element::None, element), 1.0);
            assert_eq!(chart.multiplier(element, Element::None), 1.0);
        }
    }

    #[test]
    fn presets_only_touch_their_knobs() {
        let easy = BalanceConfig::easy();
        let hard = BalanceConfig::hard();
        let base = BalanceConfig::default();

        assert_eq!(easy.damage.defense_constant, 15.0);
        assert_eq!(easy.encounters.encounter_cooldown, 5);
        assert_eq!(hard.monsters.severity_step, 0.45);
        assert_eq!(hard.combat.shield_defense_ratio, 0.3);
        assert_eq!(easy.characters, base.characters);
        assert_eq!(hard.xp, base.xp);
    }
}
