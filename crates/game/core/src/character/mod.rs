//! Character classes, creation and levelling.
//!
//! Stats grow linearly from the class's level-1 base:
//! `stat(L) = floor(base + growth * (L - 1))`. The experience curve is
//! `total_xp(L) = floor(base * L^exponent)`, `50 * L^2` by default.

mod tables;

pub use tables::{UNLOCK_LEVELS, starter_spells, unlock_at};

use std::collections::BTreeMap;

use crate::config::{BalanceConfig, CharacterConfig, XpConfig};
use crate::state::{Character, CharacterClass, IdSequence, StatusEffects, Stats};

fn grow(base: i32, growth: f64, level: u32) -> i32 {
    (f64::from(base) + growth * f64::from(level.saturating_sub(1))).floor() as i32
}

/// Full-resource stats of a class at `level`.
pub fn stats_at_level(class: CharacterClass, level: u32, config: &CharacterConfig) -> Stats {
    let base = config.base_stats.get(class);
    let growth = config.growth_rates.get(class);

    let max_health = grow(base.health, growth.hp, level);
    let max_mana = grow(base.mana, growth.mana, level);
    Stats {
        health: max_health,
        max_health,
        mana: max_mana,
        max_mana,
        attack: grow(base.attack, growth.attack, level),
        defense: grow(base.defense, growth.defense, level),
        speed: grow(base.speed, growth.speed, level),
    }
}

/// Cumulative experience needed to reach `level`.
pub fn total_xp_for_level(level: u32, config: &XpConfig) -> u32 {
    (config.base * f64::from(level).powi(config.exponent)).floor() as u32
}

/// Experience between `level` and the next one.
pub fn xp_to_next_level(level: u32, config: &XpConfig) -> u32 {
    total_xp_for_level(level + 1, config) - total_xp_for_level(level, config)
}

/// Builds a character at `level` with its class's starter spells.
///
/// Experience starts at exactly the threshold for `level`.
pub fn create_character(
    class: CharacterClass,
    name: impl Into<String>,
    level: u32,
    config: &BalanceConfig,
    ids: &mut IdSequence,
) -> Character {
    let level = level.clamp(1, config.characters.max_level);
    Character {
        id: ids.next_id(),
        name: name.into(),
        class,
        level,
        experience: total_xp_for_level(level, &config.xp),
        stats: stats_at_level(class, level, &config.characters),
        spells: starter_spells(class).iter().map(|s| s.to_string()).collect(),
        effects: StatusEffects::empty(),
        cooldowns: BTreeMap::new(),
    }
}

/// Result of [`gain_experience`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp {
    pub leveled_up: bool,
    pub levels_gained: u32,
    /// Spells unlocked on the way, in level order.
    pub new_spells: Vec<String>,
}

/// Adds experience and applies every level it crosses, up to the cap.
///
/// A level-up recomputes stats for the new level and restores health and
/// mana to full. Experience keeps accumulating past the cap.
pub fn gain_experience(character: &mut Character, xp: u32, config: &BalanceConfig) -> LevelUp {
    character.experience = character.experience.saturating_add(xp);

    let mut result = LevelUp::default();
    while character.level < config.characters.max_level
        && character.experience >= total_xp_for_level(character.level + 1, &config.xp)
    {
        character.level += 1;
        result.levels_gained += 1;
        if let Some(spell) = unlock_at(character.class, character.level) {
            result.new_spells.push(spell.to_string());
        }
    }

    if result.levels_gained == 0 {
        return result;
    }

    result.leveled_up = true;
    character.stats = stats_at_level(character.class, character.level, &config.characters);
    for spell in &result.new_spells {
        if !character.knows_spell(spell) {
            character.spells.push(spell.clone());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BalanceConfig {
        BalanceConfig::default()
    }

    #[test]
    fn xp_curve_is_quadratic() {
        let xp = XpConfig::default();
        assert_eq!(total_xp_for_level(1, &xp), 50);
        assert_eq!(total_xp_for_level(5, &xp), 1250);
        assert_eq!(xp_to_next_level(1, &xp), 150);
        assert_eq!(xp_to_next_level(4, &xp), 450);
    }

    #[test]
    fn stats_grow_from_class_base() {
        let characters = CharacterConfig::default();
        let tank = stats_at_level(CharacterClass::Tank, 1, &characters);
        assert_eq!((tank.max_health, tank.defense), (150, 15));

        let healer = stats_at_level(CharacterClass::Healer, 4, &characters);
        assert_eq!(healer.max_health, 115);
        assert_eq!(healer.attack, 4);
        assert_eq!(healer.speed, 12);
        assert_eq!(healer.health, healer.max_health);
    }

    #[test]
    fn create_character_uses_starter_kit_and_sequence() {
        let mut ids = IdSequence::new("char");
        let first = create_character(CharacterClass::Dps, "Ada", 1, &config(), &mut ids);
        let second = create_character(CharacterClass::Healer, "Grace", 3, &config(), &mut ids);

        assert_eq!(first.id, "char-1");
        assert_eq!(second.id, "char-2");
        assert_eq!(first.spells.len(), 4);
        assert!(first.knows_spell("spell-regex-nuke"));
        assert_eq!(second.experience, 450);
    }

    #[test]
    fn gaining_xp_can_cross_several_levels_and_unlock_spells() {
        let mut ids = IdSequence::new("char");
        let mut hero = create_character(CharacterClass::Dps, "Ada", 1, &config(), &mut ids);
        hero.stats.health = 1;

        let result = gain_experience(&mut hero, 1250 - 50, &config());

        assert!(result.leveled_up);
        assert_eq!(result.levels_gained, 4);
        assert_eq!(hero.level, 5);
        assert_eq!(result.new_spells, vec!["spell-zero-day".to_string()]);
        assert!(hero.knows_spell("spell-zero-day"));
        assert_eq!(hero.stats.health, hero.stats.max_health);
    }

    #[test]
    fn small_gain_only_adds_experience() {
        let mut ids = IdSequence::new("char");
        let mut hero = create_character(CharacterClass::Tank, "Linus", 1, &config(), &mut ids);
        let before = hero.stats;

        let result = gain_experience(&mut hero, 10, &config());

        assert_eq!(result, LevelUp::default());
        assert_eq!(hero.experience, 60);
        assert_eq!(hero.stats, before);
    }

    #[test]
    fn level_is_capped() {
        let mut ids = IdSequence::new("char");
        let mut hero = create_character(CharacterClass::Healer, "Grace", 29, &config(), &mut ids);

        let result = gain_experience(&mut hero, 1_000_000, &config());

        assert_eq!(hero.level, 30);
        assert_eq!(result.levels_gained, 1);
        assert_eq!(result.new_spells, vec!["spell-formal-verification".to_string()]);
    }
}
