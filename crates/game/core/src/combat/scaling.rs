//! Healing, shields, and monster scaling.

use crate::config::{CombatConfig, MonsterScalingConfig, XpConfig};
use crate::state::Severity;

/// `floor(power + attack * ratio)`. Healing ignores defense.
pub fn healing(power: i32, attack: i32, config: &CombatConfig) -> i32 {
    (f64::from(power) + f64::from(attack) * config.heal_attack_ratio).floor() as i32
}

/// `floor(power + defense * ratio)`.
pub fn shield_value(power: i32, defense: i32, config: &CombatConfig) -> i32 {
    (f64::from(power) + f64::from(defense) * config.shield_defense_ratio).floor() as i32
}

/// Scales a template stat by severity and complexity.
///
/// Severity follows a linear curve: ×1.0 at 1, ×1.7 at 3, ×2.4 at 5 with the
/// default step.
pub fn scale_monster_stat(
    base: i32,
    severity: Severity,
    complexity: u32,
    config: &MonsterScalingConfig,
) -> i32 {
    let severity_mult = 1.0 + config.severity_step * f64::from(severity.get() - 1);
    let complexity_mult = 1.0 + config.complexity_step * f64::from(complexity);
    (f64::from(base) * severity_mult * complexity_mult).floor() as i32
}

/// Experience granted for defeating a monster.
pub fn xp_reward(severity: Severity, complexity: u32, config: &XpConfig) -> u32 {
    let s = f64::from(severity.get());
    let value = config.monster_base
        * s.powi(config.monster_exponent)
        * (1.0 + config.monster_complexity_bonus * f64::from(complexity));
    value.floor() as u32
}
