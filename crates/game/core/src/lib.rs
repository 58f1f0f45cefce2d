//! Deterministic battle and progression rules for CodeQuest.
//!
//! `codequest-core` turns repository-analysis artifacts into monsters, quests
//! and encounters, and resolves turn-based battles against them. Every random
//! decision draws from an explicit [`RngState`], so a seed plus an action log
//! reproduces a battle exactly. All battle mutation flows through
//! [`engine::BattleEngine`]; the runtime crate composes these pieces into a
//! session.
pub mod ai;
pub mod artifacts;
pub mod character;
pub mod combat;
pub mod config;
pub mod encounter;
pub mod engine;
pub mod env;
pub mod error;
pub mod inventory;
pub mod monster;
pub mod progression;
pub mod quest;
pub mod spell;
pub mod state;

pub use ai::{EnemyDecision, EnemyIntent, choose_action};
pub use artifacts::{Hotspot, ParsedCommit, ParsedFile};
pub use character::{LevelUp, create_character, gain_experience};
pub use config::{BalanceConfig, GameConfig};
pub use encounter::{
    Encounter, EncounterDensity, EncounterKind, EncounterState, check_encounter,
    encounter_density, scan_all_encounters,
};
pub use engine::{
    ActionMask, AvailableActions, BattleAction, BattleEngine, TurnError, TurnOutcome,
    available_actions, execute_turn, init_battle, replay_battle,
};
pub use env::{GameEnv, RegistryError, RngState};
pub use error::{ErrorSeverity, GameError};
pub use inventory::{Inventory, ItemRegistry, use_item};
pub use progression::{
    BattleRewards, BattleStatistics, ProgressionResult, VictoryScreen, apply_battle_rewards,
    apply_quest_rewards, build_victory_screen, resolve_battle_rewards, update_battle_statistics,
};
pub use quest::{Quest, QuestError, QuestGenerator, QuestKind, QuestReward, QuestStatus};
pub use spell::{Spell, SpellRegistry};
pub use state::{
    Actor, BattlePhase, BattleState, BugType, Character, CharacterClass, CombatEvent, Element,
    IdSequence, LogEntry, Monster, MonsterRank, Severity, Stats, StatusEffect, StatusKind,
};
