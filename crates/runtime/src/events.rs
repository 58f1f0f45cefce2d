//! Domain events published by a session.
//!
//! The battle engine records low-level [`CombatEvent`]s for each transition;
//! [`extract_events`] lifts them into [`GameEvent`]s. Session-level
//! occurrences (encounters, rewards, quest changes) are emitted directly by
//! [`crate::Session`].

use codequest_core::quest::QuestStatus;
use codequest_core::state::EffectId;
use codequest_core::{
    Actor, BugType, CombatEvent, Element, EncounterKind, Severity, Stats, StatusKind,
};
use serde::{Deserialize, Serialize};

/// How a battle ended.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

/// Stat deltas granted by a level-up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatChanges {
    pub health: i32,
    pub mana: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

impl StatChanges {
    pub fn between(before: &Stats, after: &Stats) -> Self {
        Self {
            health: after.max_health - before.max_health,
            mana: after.max_mana - before.max_mana,
            attack: after.attack - before.attack,
            defense: after.defense - before.defense,
            speed: after.speed - before.speed,
        }
    }
}

/// High-level game events, in the order they happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    /// Visiting a file spawned an opponent.
    EncounterTriggered {
        kind: EncounterKind,
        file: String,
        monster_id: String,
        severity: Severity,
    },

    CombatStarted {
        monster_id: String,
        monster_name: String,
        bug_type: BugType,
        severity: Severity,
        monster_health: i32,
        monster_max_health: i32,
    },

    CombatTurnStart {
        turn: u32,
        actor: Actor,
    },

    CombatTurnEnd {
        turn: u32,
    },

    /// Damage that reached health, with the part shields absorbed.
    DamageDealt {
        source: Actor,
        target: Actor,
        amount: i32,
        absorbed: i32,
        element: Element,
        is_critical: bool,
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

    SpellResolved {
        caster: Actor,
        spell_id: String,
    },

    StatusEffectApplied {
        target: Actor,
        effect_id: EffectId,
        kind: StatusKind,
        value: i32,
        remaining_turns: u32,
    },

    StatusEffectExpired {
        target: Actor,
        effect_id: EffectId,
        kind: StatusKind,
    },

    /// `xp_gained` is only set for victories.
    CombatEnded {
        outcome: CombatOutcome,
        turns: u32,
        xp_gained: Option<u32>,
    },

    ExperienceGained {
        character_id: String,
        amount: u32,
        total_experience: u32,
    },

    LevelUp {
        character_id: String,
        new_level: u32,
        stat_changes: StatChanges,
    },

    LootDropped {
        monster_id: String,
        items: Vec<String>,
    },

    QuestUpdated {
        quest_id: String,
        status: QuestStatus,
    },
}

impl From<&CombatEvent> for GameEvent {
    fn from(event: &CombatEvent) -> Self {
        match event {
            CombatEvent::TurnStart { turn, actor } => GameEvent::CombatTurnStart {
                turn: *turn,
                actor: *actor,
            },
            CombatEvent::TurnEnd { turn } => GameEvent::CombatTurnEnd { turn: *turn },
            CombatEvent::Damage {
                source,
                target,
                amount,
                absorbed,
                element,
                is_critical,
            } => GameEvent::DamageDealt {
                source: *source,
                target: *target,
                amount: *amount,
                absorbed: *absorbed,
                element: *element,
                is_critical: *is_critical,
            },
            CombatEvent::SpellResolved { caster, spell_id } => GameEvent::SpellResolved {
                caster: *caster,
                spell_id: spell_id.clone(),
            },
            CombatEvent::StatusApplied {
                target,
                effect_id,
                kind,
                value,
                duration,
            } => GameEvent::StatusEffectApplied {
                target: *target,
                effect_id: *effect_id,
                kind: *kind,
                value: *value,
                remaining_turns: *duration,
            },
            CombatEvent::StatusExpired {
                target,
                effect_id,
                kind,
            } => GameEvent::StatusEffectExpired {
                target: *target,
                effect_id: *effect_id,
                kind: *kind,
            },
            CombatEvent::HealthChanged {
                target,
                delta,
                health,
                max_health,
            } => GameEvent::HealthChanged {
                target: *target,
                delta: *delta,
                health: *health,
                max_health: *max_health,
            },
            CombatEvent::ManaChanged {
                target,
                delta,
                mana,
                max_mana,
            } => GameEvent::ManaChanged {
                target: *target,
                delta: *delta,
                mana: *mana,
                max_mana: *max_mana,
            },
        }
    }
}

/// Lifts one transition's combat telemetry into domain events.
///
/// Order is preserved one-to-one.
pub fn extract_events(events: &[CombatEvent]) -> Vec<GameEvent> {
    if events.is_empty() {
        tracing::warn!(
            target: "runtime::events",
            "extract_events called with no combat events"
        );
    }
    events.iter().map(GameEvent::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combat_events_map_in_order() {
        let raw = vec![
            CombatEvent::TurnStart {
                turn: 2,
                actor: Actor::Player,
            },
            CombatEvent::Damage {
                source: Actor::Player,
                target: Actor::Enemy(0),
                amount: 9,
                absorbed: 3,
                element: Element::Fire,
                is_critical: true,
            },
            CombatEvent::TurnEnd { turn: 2 },
        ];

        let events = extract_events(&raw);

        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], GameEvent::CombatTurnStart { turn: 2, .. }));
        assert!(matches!(
            events[1],
            GameEvent::DamageDealt {
                amount: 9,
                absorbed: 3,
                is_critical: true,
                ..
            }
        ));
        assert_eq!(events[2], GameEvent::CombatTurnEnd { turn: 2 });
    }

    #[test]
    fn status_duration_becomes_remaining_turns() {
        let event = GameEvent::from(&CombatEvent::StatusApplied {
            target: Actor::Enemy(1),
            effect_id: EffectId(4),
            kind: StatusKind::Poison,
            value: 5,
            duration: 3,
        });
        assert!(matches!(
            event,
            GameEvent::StatusEffectApplied {
                remaining_turns: 3,
                ..
            }
        ));
    }

    #[test]
    fn events_serialize_with_type_tags() {
        let json = serde_json::to_string(&GameEvent::CombatEnded {
            outcome: CombatOutcome::Victory,
            turns: 4,
            xp_gained: Some(30),
        })
        .unwrap();
        assert!(json.contains("\"type\":\"COMBAT_ENDED\""));
        assert!(json.contains("\"outcome\":\"victory\""));
    }

    #[test]
    fn stat_changes_compare_maximums() {
        let before = Stats {
            health: 10,
            max_health: 100,
            mana: 0,
            max_mana: 50,
            attack: 10,
            defense: 5,
            speed: 6,
        };
        let after = Stats {
            health: 120,
            max_health: 120,
            mana: 60,
            max_mana: 60,
            attack: 13,
            defense: 6,
            speed: 6,
        };
        assert_eq!(
            StatChanges::between(&before, &after),
            StatChanges {
                health: 20,
                mana: 10,
                attack: 3,
                defense: 1,
                speed: 0,
            }
        );
    }
}
