//! Fine-grained combat events.
//!
//! The engine records one event per observable change in the order it
//! computed them. They are telemetry for animation and statistics; replay
//! correctness never depends on them.

use super::{EffectId, Element, StatusKind};

/// A participant in a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Actor {
    Player,
    /// Index into `BattleState::enemies`.
    Enemy(usize),
    /// Engine bookkeeping such as phase changes.
    System,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "kebab-case"))]
pub enum CombatEvent {
    TurnStart {
        turn: u32,
        actor: Actor,
    },
    TurnEnd {
        turn: u32,
    },
    Damage {
        source: Actor,
        target: Actor,
        /// Damage that reached health.
        amount: i32,
        /// Damage eaten by shields.
        absorbed: i32,
        element: Element,
        is_critical: bool,
    },
    SpellResolved {
        caster: Actor,
        spell_id: String,
    },
    StatusApplied {
        target: Actor,
        effect_id: EffectId,
        kind: StatusKind,
        value: i32,
        duration: u32,
    },
    StatusExpired {
        target: Actor,
        effect_id: EffectId,
        kind: StatusKind,
    },
    HealthChanged {
        target: Actor,
        delta: i32,
        health: i32,
        max_health: i32,
    },
    ManaChanged {
        target: Actor,
        delta: i32,
        mana: i32,
        max_mana: i32,
    },
}
