//! Damage calculation.

use crate::config::{DamageConfig, ElementConfig};
use crate::env::{RngState, rng};
use crate::state::Element;

// ============================================================================
// Modifiers
// ============================================================================

/// Fraction of raw power that passes through `defense`.
///
/// At `defense == C` exactly half passes; at zero defense all of it does.
pub fn mitigation(defense: i32, config: &DamageConfig) -> f64 {
    let c = config.defense_constant;
    c / (c + f64::from(defense.max(0)))
}

/// Rolls for a critical hit; returns `(is_critical, multiplier, rng')`.
///
/// Chance is `base + per_speed * speed`, capped at `max_crit_chance`.
pub fn roll_critical(speed: i32, state: RngState, config: &DamageConfig) -> (bool, f64, RngState) {
    let chance = (config.base_crit_chance + f64::from(speed) * config.crit_per_speed)
        .min(config.max_crit_chance);
    let (is_critical, state) = rng::chance(chance, state);
    let multiplier = if is_critical {
        config.crit_multiplier
    } else {
        1.0
    };
    (is_critical, multiplier, state)
}

pub fn element_multiplier(attacker: Element, defender: Element, chart: &ElementConfig) -> f64 {
    chart.multiplier(attacker, defender)
}

/// Attack after status modifiers, never below 1.
pub fn effective_attack(attack: i32, modifier: i32) -> i32 {
    (attack + modifier).max(1)
}

/// Defense after status modifiers, never below 0.
pub fn effective_defense(defense: i32, modifier: i32) -> i32 {
    (defense + modifier).max(0)
}

// ============================================================================
// Damage
// ============================================================================

/// Inputs to a single damage computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageInput {
    pub attack: i32,
    pub speed: i32,
    pub power: i32,
    pub defense: i32,
    pub attack_element: Element,
    pub defender_element: Element,
}

impl DamageInput {
    /// A plain weapon hit: no spell power, no elements.
    pub fn basic(attack: i32, speed: i32, defense: i32) -> Self {
        Self {
            attack,
            speed,
            power: 0,
            defense,
            attack_element: Element::None,
            defender_element: Element::None,
        }
    }
}

/// Outcome of one damage computation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    pub damage: i32,
    pub element_multiplier: f64,
    pub is_critical: bool,
}

impl DamageRoll {
    /// Renders the roll for the battle log, e.g. `"42 damage — CRITICAL — super effective"`.
    pub fn describe(&self) -> String {
        let mut text = format!("{} damage", self.damage);
        if self.is_critical {
            text.push_str(" — CRITICAL");
        }
        if self.element_multiplier > 1.0 {
            text.push_str(" — super effective");
        } else if self.element_multiplier < 1.0 {
            text.push_str(" — not very effective");
        }
        text
    }
}

/// Computes spell damage.
///
/// Never returns less than `min_damage`, whatever the mitigation, element,
/// or variance.
pub fn spell_damage(
    input: DamageInput,
    state: RngState,
    damage: &DamageConfig,
    elements: &ElementConfig,
) -> (DamageRoll, RngState) {
    let raw = f64::from(input.power + input.attack);
    let base = raw * mitigation(input.defense, damage);

    let (is_critical, crit, state) = roll_critical(input.speed, state, damage);
    let element = element_multiplier(input.attack_element, input.defender_element, elements);

    let (variance_roll, state) = rng::next(state);
    let variance = damage.variance_min + variance_roll * damage.variance_range;

    let value = (base * crit * element * variance).floor() as i32;
    let roll = DamageRoll {
        damage: value.max(damage.min_damage),
        element_multiplier: element,
        is_critical,
    };
    (roll, state)
}

/// Computes a basic attack: spell damage with zero power and neutral elements.
pub fn basic_attack(
    attack: i32,
    defense: i32,
    speed: i32,
    state: RngState,
    damage: &DamageConfig,
    elements: &ElementConfig,
) -> (DamageRoll, RngState) {
    spell_damage(DamageInput::basic(attack, speed, defense), state, damage, elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mitigation_halves_at_defense_constant() {
        let config = DamageConfig::default();
        assert_eq!(mitigation(20, &config), 0.5);
        assert_eq!(mitigation(0, &config), 1.0);
    }

    #[test]
    fn damage_never_drops_below_one() {
        let damage = DamageConfig::default();
        let elements = ElementConfig::default();
        let mut state = RngState::from_seed(3);
        for defense in [0, 50, 500, 10_000] {
            let (roll, next) = basic_attack(1, defense, 0, state, &damage, &elements);
            assert!(roll.damage >= 1, "defense {defense} produced {}", roll.damage);
            state = next;
        }
    }

    #[test]
    fn crit_chance_is_capped() {
        let mut config = DamageConfig::default();
        config.max_crit_chance = 0.0;
        let (is_critical, multiplier, _) = roll_critical(1_000, RngState::from_seed(1), &config);
        assert!(!is_critical);
        assert_eq!(multiplier, 1.0);
    }

    #[test]
    fn describe_lists_modifiers() {
        let roll = DamageRoll {
            damage: 42,
            element_multiplier: 1.5,
            is_critical: true,
        };
        assert_eq!(roll.describe(), "42 damage — CRITICAL — super effective");

        let resisted = DamageRoll {
            damage: 3,
            element_multiplier: 0.5,
            is_critical: false,
        };
        assert_eq!(resisted.describe(), "3 damage — not very effective");
    }

    #[test]
    fn super_effective_hits_harder_on_the_same_rolls() {
        let damage = DamageConfig::default();
        let elements = ElementConfig::default();
        let seed = RngState::from_seed(77);
        let mut input = DamageInput::basic(30, 5, 5);
        input.power = 40;

        input.attack_element = Element::Water;
        input.defender_element = Element::Fire;
        let (strong, _) = spell_damage(input, seed.clone(), &damage, &elements);

        input.attack_element = Element::Fire;
        let (weak, _) = spell_damage(input, seed, &damage, &elements);

        assert!(strong.damage > weak.damage);
        assert_eq!(strong.element_multiplier, 1.5);
        assert_eq!(weak.element_multiplier, 0.5);
    }
}
