//! Authoritative data shapes for characters, monsters, and battles.
//!
//! Everything here is plain data. Rules that mutate it live in
//! [`crate::engine`], [`crate::character`], and [`crate::progression`].
mod battle;
mod character;
mod common;
mod event;
mod monster;
pub mod status;

pub use battle::{BattlePhase, BattleState, LogEntry};
pub use character::Character;
pub use common::{
    BugType, CharacterClass, Element, IdSequence, Severity, SeverityOutOfRange, Stats,
};
pub use event::{Actor, CombatEvent};
pub use monster::{LootEntry, Monster, MonsterRank};
pub use status::{
    Absorption, ApplyOutcome, EffectId, StatModifiers, StatusEffect, StatusEffects, StatusKind,
    TickReport,
};
