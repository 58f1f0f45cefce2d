//! Combat formulas.
//!
//! Pure functions over numbers and [`RngState`](crate::env::RngState). The
//! engine, the AI, and the simulation harness all resolve damage, healing,
//! and monster scaling through here.
//!
//! # Core formula
//!
//! ```text
//! base   = (power + attack) * C / (C + defense)
//! damage = max(1, floor(base * crit * element * variance))
//! ```
//!
//! The critical roll is drawn before the variance roll, so every damage
//! computation consumes exactly two draws.

pub mod damage;
pub mod scaling;

pub use damage::{
    DamageInput, DamageRoll, basic_attack, effective_attack, effective_defense,
    element_multiplier, mitigation, roll_critical, spell_damage,
};
pub use scaling::{healing, scale_monster_stat, shield_value, xp_reward};
