//! Enemy decision making.
//!
//! Each bug archetype owns a small behavior tree. A decision consumes exactly
//! one draw from the battle generator; the tree then reads that roll together
//! with the monster's health, the turn number and its spell list.
mod trees;

use crate::env::{RngState, rng};
use crate::state::{BattleState, BugType, Monster};

/// What an enemy intends to do this turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "kebab-case"))]
pub enum EnemyIntent {
    /// Basic attack with the monster's element.
    Attack,
    /// Cast a spell picked by [`resolve_spell`].
    Special,
    /// One-time desperate cast of the strongest spell.
    Ultimate,
    /// Cast a specific spell.
    Cast { spell_id: String },
    /// Two basic attacks back to back.
    DoubleAttack,
    /// Restore the player's health.
    HealPlayer { amount: i32 },
    /// Damage itself, bypassing shields.
    HitSelf { amount: i32 },
    Skip,
}

/// A decision plus the log line announcing it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDecision {
    pub intent: EnemyIntent,
    pub log: String,
}

impl EnemyDecision {
    fn new(intent: EnemyIntent, log: String) -> Self {
        Self { intent, log }
    }
}

/// Blackboard read by the decision trees.
#[derive(Clone, Debug, Default)]
pub struct AiContext {
    pub name: String,
    /// The single roll drawn for this decision, in `[0, 1)`.
    pub roll: f64,
    pub turn: u32,
    pub health: i32,
    pub max_health: i32,
    pub spells: Vec<String>,
    pub ultimate_used: bool,
    /// Written by the first tree leaf that commits.
    pub decision: Option<EnemyDecision>,
}

impl AiContext {
    fn for_monster(monster: &Monster, turn: u32, roll: f64) -> Self {
        Self {
            name: monster.name.clone(),
            roll,
            turn,
            health: monster.stats.health,
            max_health: monster.stats.max_health,
            spells: monster.spells.clone(),
            ultimate_used: monster.ultimate_used,
            decision: None,
        }
    }

    pub fn health_ratio(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        f64::from(self.health) / f64::from(self.max_health)
    }

    pub fn knows(&self, spell_id: &str) -> bool {
        self.spells.iter().any(|s| s == spell_id)
    }

    fn decide(&mut self, intent: EnemyIntent, log: String) {
        self.decision = Some(EnemyDecision::new(intent, log));
    }
}

/// Picks the action of `state.enemies[enemy_index]`.
///
/// Returns `None` for an index with no enemy behind it. The returned
/// generator state has advanced by exactly one draw.
pub fn choose_action(enemy_index: usize, state: &BattleState) -> Option<(EnemyDecision, RngState)> {
    let monster = state.enemies.get(enemy_index)?;
    let (roll, rng) = rng::next(state.rng.clone());
    let mut ctx = AiContext::for_monster(monster, state.turn, roll);

    let tree = trees::tree_for(monster.rank.is_elevated(), monster.bug_type);
    tree.tick(&mut ctx);

    let decision = ctx.decision.unwrap_or_else(|| {
        EnemyDecision::new(EnemyIntent::Attack, format!("{} attacks!", monster.name))
    });
    Some((decision, rng))
}

/// Spell an intent resolves to, if any.
///
/// Specials use the first spell, or the strongest (last) once the monster is
/// at a quarter health or below. Ultimates always use the last spell.
pub fn resolve_spell<'m>(monster: &'m Monster, intent: &'m EnemyIntent) -> Option<&'m str> {
    let spells = &monster.spells;
    match intent {
        EnemyIntent::Cast { spell_id } => Some(spell_id.as_str()),
        EnemyIntent::Ultimate => spells.last().map(String::as_str),
        EnemyIntent::Special => {
            let desperate = monster.stats.max_health > 0
                && f64::from(monster.stats.health) / f64::from(monster.stats.max_health) <= 0.25;
            if desperate && spells.len() > 1 {
                spells.last().map(String::as_str)
            } else {
                spells.first().map(String::as_str)
            }
        }
        _ => None,
    }
}

/// Archetype label used by simulation reports.
pub fn archetype(monster: &Monster) -> &'static str {
    if monster.rank.is_elevated() {
        return "boss";
    }
    match monster.bug_type {
        BugType::NullPointer => "null-pointer",
        BugType::MemoryLeak => "memory-leak",
        BugType::RaceCondition => "race-condition",
        BugType::OffByOne => "off-by-one",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::GameEnv;
    use crate::monster::create_monster;
    use crate::state::{BattlePhase, Character, CharacterClass, MonsterRank, Severity, Stats, StatusEffects};
    use std::collections::BTreeMap;

    fn player() -> Character {
        Character {
            id: "char-1".into(),
            name: "Dev".into(),
            class: CharacterClass::Dps,
            level: 1,
            experience: 50,
            stats: Stats {
                health: 80,
                max_health: 80,
                mana: 60,
                max_mana: 60,
                attack: 15,
                defense: 5,
                speed: 10,
            },
            spells: vec![],
            effects: StatusEffects::empty(),
            cooldowns: BTreeMap::new(),
        }
    }

    fn battle_with(monster: Monster, turn: u32, seed: u32) -> BattleState {
        BattleState {
            turn,
            phase: BattlePhase::PlayerTurn,
            player: player(),
            enemies: vec![monster],
            log: vec![],
            rng: RngState::from_seed(seed),
            events: vec![],
        }
    }

    fn monster(bug: BugType) -> Monster {
        let env = GameEnv::builtin();
        create_monster(bug, Severity::MIN, 0, RngState::from_seed(3), &env).0
    }

    #[test]
    fn consumes_exactly_one_draw() {
        let state = battle_with(monster(BugType::NullPointer), 1, 42);
        let (_, after) = choose_action(0, &state).unwrap();
        let (_, expected) = rng::next(state.rng.clone());
        assert_eq!(after, expected);
    }

    #[test]
    fn unknown_enemy_index_yields_none() {
        let state = battle_with(monster(BugType::OffByOne), 1, 1);
        assert!(choose_action(5, &state).is_none());
    }

    #[test]
    fn race_condition_double_attacks_on_even_turns() {
        let state = battle_with(monster(BugType::RaceCondition), 2, 9);
        let (decision, _) = choose_action(0, &state).unwrap();
        assert_eq!(decision.intent, EnemyIntent::DoubleAttack);
        assert!(decision.log.ends_with("context-switches at the worst time! Double attack!"));
    }

    #[test]
    fn memory_leak_grows_heap_every_third_turn() {
        let state = battle_with(monster(BugType::MemoryLeak), 3, 9);
        let (decision, _) = choose_action(0, &state).unwrap();
        assert_eq!(
            decision.intent,
            EnemyIntent::Cast {
                spell_id: "spell-heap-grow".into()
            }
        );
        assert!(decision.log.contains("memory consumption grows"));
    }

    #[test]
    fn boss_unleashes_ultimate_once_when_critical() {
        let mut boss = monster(BugType::NullPointer);
        boss.rank = MonsterRank::Boss;
        boss.spells = vec!["spell-null-deref".into(), "spell-segfault".into()];
        boss.stats.health = boss.stats.max_health / 5;

        let state = battle_with(boss.clone(), 1, 11);
        let (decision, _) = choose_action(0, &state).unwrap();
        assert_eq!(decision.intent, EnemyIntent::Ultimate);
        assert_eq!(resolve_spell(&boss, &decision.intent), Some("spell-segfault"));

        boss.ultimate_used = true;
        let state = battle_with(boss, 1, 11);
        let (decision, _) = choose_action(0, &state).unwrap();
        assert_ne!(decision.intent, EnemyIntent::Ultimate);
    }

    #[test]
    fn boss_holds_its_ultimate_above_a_quarter_health() {
        let mut boss = monster(BugType::NullPointer);
        boss.rank = MonsterRank::Boss;
        boss.spells = vec!["spell-null-deref".into(), "spell-segfault".into()];

        for seed in 0..50 {
            let (decision, _) = choose_action(0, &battle_with(boss.clone(), 1, seed)).unwrap();
            assert_ne!(decision.intent, EnemyIntent::Ultimate);
        }
    }

    #[test]
    fn special_prefers_strongest_spell_when_desperate() {
        let mut m = monster(BugType::NullPointer);
        m.spells = vec!["spell-null-deref".into(), "spell-segfault".into()];
        assert_eq!(resolve_spell(&m, &EnemyIntent::Special), Some("spell-null-deref"));

        m.stats.health = 1;
        assert_eq!(resolve_spell(&m, &EnemyIntent::Special), Some("spell-segfault"));
        assert_eq!(resolve_spell(&m, &EnemyIntent::Attack), None);
    }

    #[test]
    fn off_by_one_outcomes_follow_the_roll() {
        let mut seen = std::collections::BTreeSet::new();
        for seed in 0..200 {
            let state = battle_with(monster(BugType::OffByOne), 1, seed);
            let (decision, _) = choose_action(0, &state).unwrap();
            let (roll, _) = rng::next(RngState::from_seed(seed));
            let expected = if roll < 0.1 {
                EnemyIntent::HealPlayer { amount: 5 }
            } else if roll < 0.25 {
                EnemyIntent::HitSelf { amount: 5 }
            } else {
                EnemyIntent::Attack
            };
            assert_eq!(decision.intent, expected);
            seen.insert(format!("{:?}", decision.intent));
        }
        assert_eq!(seen.len(), 3);
    }
}
