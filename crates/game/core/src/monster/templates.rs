//! Base monster templates per bug type.

use std::sync::LazyLock;

use crate::state::{BugType, Element};

/// Level-1 stats and spell lists of a bug archetype.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub bug_type: BugType,
    pub base_name: String,
    pub element: Element,
    pub base_hp: i32,
    pub base_attack: i32,
    pub base_defense: i32,
    pub base_speed: i32,
    pub spells: Vec<String>,
    /// Granted at severity 4+ and to bosses and minibosses.
    pub boss_spells: Vec<String>,
}

/// Template lookup. Total over [`BugType`]: every archetype has a template.
pub trait MonsterTemplates: Send + Sync {
    fn template(&self, bug_type: BugType) -> &MonsterTemplate;
}

/// The four shipped archetypes.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinTemplates;

impl MonsterTemplates for BuiltinTemplates {
    fn template(&self, bug_type: BugType) -> &MonsterTemplate {
        match bug_type {
            BugType::NullPointer => &*NULL_POINTER,
            BugType::MemoryLeak => &*MEMORY_LEAK,
            BugType::RaceCondition => &*RACE_CONDITION,
            BugType::OffByOne => &*OFF_BY_ONE,
        }
    }
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

fn template(
    bug_type: BugType,
    base_name: &str,
    element: Element,
    [hp, attack, defense, speed]: [i32; 4],
    spells: &[&str],
    boss_spells: &[&str],
) -> MonsterTemplate {
    MonsterTemplate {
        bug_type,
        base_name: base_name.to_string(),
        element,
        base_hp: hp,
        base_attack: attack,
        base_defense: defense,
        base_speed: speed,
        spells: ids(spells),
        boss_spells: ids(boss_spells),
    }
}

static NULL_POINTER: LazyLock<MonsterTemplate> = LazyLock::new(|| {
    template(
        BugType::NullPointer,
        "NullPointerException",
        Element::None,
        [40, 8, 3, 6],
        &["spell-null-deref"],
        &["spell-null-deref", "spell-segfault", "spell-deadlock-boss"],
    )
});

static MEMORY_LEAK: LazyLock<MonsterTemplate> = LazyLock::new(|| {
    template(
        BugType::MemoryLeak,
        "MemoryLeak",
        Element::Earth,
        [60, 5, 6, 3],
        &["spell-heap-grow"],
        &["spell-heap-grow", "spell-oom-kill", "spell-stack-smash"],
    )
});

static RACE_CONDITION: LazyLock<MonsterTemplate> = LazyLock::new(|| {
    template(
        BugType::RaceCondition,
        "RaceCondition",
        Element::Air,
        [35, 10, 2, 12],
        &["spell-thread-swap"],
        &["spell-thread-swap", "spell-deadlock-boss"],
    )
});

static OFF_BY_ONE: LazyLock<MonsterTemplate> = LazyLock::new(|| {
    template(
        BugType::OffByOne,
        "OffByOneError",
        Element::None,
        [25, 6, 4, 8],
        &["spell-fence-post"],
        &["spell-fence-post", "spell-stack-smash"],
    )
});
