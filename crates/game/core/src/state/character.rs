use std::collections::BTreeMap;

use super::{CharacterClass, StatusEffects, Stats};

/// Player character.
///
/// Created once per session; battle resolution, item use, and progression
/// are the only writers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: String,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    /// Total experience accumulated since level 1.
    pub experience: u32,
    pub stats: Stats,
    /// Known spell ids in learn order.
    pub spells: Vec<String>,
    pub effects: StatusEffects,
    /// Remaining cooldown turns per spell id. Spells at zero are absent.
    pub cooldowns: BTreeMap<String, u32>,
}

impl Character {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn knows_spell(&self, spell_id: &str) -> bool {
        self.spells.iter().any(|s| s == spell_id)
    }

    /// Remaining cooldown for a spell (zero when ready).
    pub fn cooldown(&self, spell_id: &str) -> u32 {
        self.cooldowns.get(spell_id).copied().unwrap_or(0)
    }

    /// Puts a spell on cooldown. A zero cooldown clears the entry.
    pub fn set_cooldown(&mut self, spell_id: &str, turns: u32) {
        if turns == 0 {
            self.cooldowns.remove(spell_id);
        } else {
            self.cooldowns.insert(spell_id.to_string(), turns);
        }
    }

    /// Decrements every cooldown, dropping entries that reach zero.
    pub fn tick_cooldowns(&mut self) {
        self.cooldowns.retain(|_, turns| {
            *turns = turns.saturating_sub(1);
            *turns > 0
        });
    }

    /// Clears battle-scoped state: status effects and cooldowns.
    pub fn reset_for_battle(&mut self) {
        self.effects.clear();
        self.cooldowns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Character {
        Character {
            id: "char-1".into(),
            name: "Ada".into(),
            class: CharacterClass::Healer,
            level: 1,
            experience: 50,
            stats: Stats::default(),
            spells: vec!["spell-try-catch".into()],
            effects: StatusEffects::empty(),
            cooldowns: BTreeMap::new(),
        }
    }

    #[test]
    fn cooldowns_tick_down_and_drop_at_zero() {
        let mut character = sample();
        character.set_cooldown("spell-rollback", 2);
        character.set_cooldown("spell-patch", 1);

        character.tick_cooldowns();
        assert_eq!(character.cooldown("spell-rollback"), 1);
        assert_eq!(character.cooldown("spell-patch"), 0);
        assert!(!character.cooldowns.contains_key("spell-patch"));

        character.tick_cooldowns();
        assert!(character.cooldowns.is_empty());
    }

    #[test]
    fn knows_only_learned_spells() {
        let character = sample();
        assert!(character.knows_spell("spell-try-catch"));
        assert!(!character.knows_spell("spell-regex-nuke"));
    }
}
