//! Monster construction from analysis artifacts.

use crate::artifacts::{Hotspot, ParsedCommit, ParsedFile};
use crate::combat::{scale_monster_stat, xp_reward};
use crate::env::{GameEnv, RngState, rng};
use crate::state::{
    BugType, LootEntry, Monster, MonsterRank, Severity, StatusEffects, Stats,
};

use super::MonsterTemplate;

const ADJECTIVES: [&str; 15] = [
    "Recursive",
    "Polymorphic",
    "Async",
    "Deprecated",
    "Volatile",
    "Orphaned",
    "Dangling",
    "Corrupted",
    "Uninitialized",
    "Phantom",
    "Legacy",
    "Stale",
    "Circular",
    "Transient",
    "Persistent",
];

const BOSS_PREFIXES: [&str; 5] = ["Catastrophic", "Critical", "Fatal", "Systemic", "Cascading"];

/// Complexity is capped before it scales stats.
const MAX_COMPLEXITY: u32 = 10;

// ============================================================================
// Public constructors
// ============================================================================

/// Creates a monster of the given archetype.
///
/// Severity 4 and up receives the archetype's boss spells.
pub fn create_monster(
    bug_type: BugType,
    severity: Severity,
    complexity: u32,
    state: RngState,
    env: &GameEnv<'_>,
) -> (Monster, RngState) {
    let template = env.monsters().template(bug_type);
    let spells = if severity.get() >= 4 {
        &template.boss_spells
    } else {
        &template.spells
    };
    build(
        template,
        Blueprint {
            severity,
            complexity,
            spells: spells.clone(),
            rank: MonsterRank::Normal,
        },
        state,
        env,
    )
}

/// Spawns the bug a commit introduced.
///
/// Bug type comes from message keywords, severity from change size, and
/// complexity from the number of touched files.
pub fn generate_bug_monster(
    commit: &ParsedCommit,
    state: RngState,
    env: &GameEnv<'_>,
) -> (Monster, RngState) {
    spawn_from_commit(commit, infer_severity(commit), state, env)
}

/// Spawns a severity-1 bug for a random encounter.
pub fn generate_random_bug(
    commit: &ParsedCommit,
    state: RngState,
    env: &GameEnv<'_>,
) -> (Monster, RngState) {
    spawn_from_commit(commit, Severity::MIN, state, env)
}

/// Spawns the boss guarding a high-complexity file.
pub fn generate_boss(file: &ParsedFile, state: RngState, env: &GameEnv<'_>) -> (Monster, RngState) {
    let template = env.monsters().template(bug_type_for_language(&file.language));
    let (mut monster, state) = build(
        template,
        Blueprint {
            severity: Severity::MAX,
            complexity: (file.complexity / 5).min(MAX_COMPLEXITY),
            spells: template.boss_spells.clone(),
            rank: MonsterRank::Boss,
        },
        state,
        env,
    );
    monster.xp_reward *= env.balance().monsters.boss_xp_multiplier;
    monster.source_file = Some(file.path.clone());
    (monster, state)
}

/// Spawns the miniboss of a hotspot.
pub fn generate_miniboss(
    hotspot: &Hotspot,
    state: RngState,
    env: &GameEnv<'_>,
) -> (Monster, RngState) {
    let bug_type = if hotspot.risk_score > 7.0 {
        BugType::MemoryLeak
    } else {
        BugType::NullPointer
    };
    let template = env.monsters().template(bug_type);
    let (mut monster, state) = build(
        template,
        Blueprint {
            severity: Severity::clamped((hotspot.risk_score / 2.0).floor() as i64),
            complexity: (hotspot.complexity / 3).min(MAX_COMPLEXITY),
            spells: template.boss_spells.clone(),
            rank: MonsterRank::Miniboss,
        },
        state,
        env,
    );
    monster.xp_reward *= env.balance().monsters.miniboss_xp_multiplier;
    monster.source_file = Some(hotspot.path.clone());
    (monster, state)
}

// ============================================================================
// Heuristics
// ============================================================================

/// Classifies a commit message by keyword; defaults to null-pointer.
pub fn infer_bug_type(message: &str) -> BugType {
    let msg = message.to_lowercase();
    let any = |words: &[&str]| words.iter().any(|w| msg.contains(w));

    if any(&["null", "undefined", "typeerror"]) {
        BugType::NullPointer
    } else if any(&["memory", "leak", "gc"]) {
        BugType::MemoryLeak
    } else if any(&["race", "concurrent", "async", "deadlock"]) {
        BugType::RaceCondition
    } else if any(&["off-by", "index", "bound", "fence"]) {
        BugType::OffByOne
    } else {
        BugType::NullPointer
    }
}

/// Severity by total lines changed: >200 → 5, >100 → 4, >50 → 3, >20 → 2.
pub fn infer_severity(commit: &ParsedCommit) -> Severity {
    let level = match commit.total_changes() {
        n if n > 200 => 5,
        n if n > 100 => 4,
        n if n > 50 => 3,
        n if n > 20 => 2,
        _ => 1,
    };
    Severity::clamped(level)
}

pub fn bug_type_for_language(language: &str) -> BugType {
    match language.to_lowercase().as_str() {
        "c" | "c++" | "rust" => BugType::MemoryLeak,
        "go" | "java" => BugType::RaceCondition,
        "python" | "javascript" | "typescript" => BugType::NullPointer,
        _ => BugType::OffByOne,
    }
}

/// Loot table; one more entry per severity level.
pub fn loot_table(severity: Severity) -> Vec<LootEntry> {
    const TIERS: [(&str, f64); 5] = [
        ("item-debug-log", 0.5),
        ("item-stack-trace", 0.3),
        ("item-core-dump", 0.2),
        ("item-memory-snapshot", 0.15),
        ("item-root-cause", 0.1),
    ];
    TIERS
        .iter()
        .take(usize::from(severity.get()))
        .map(|&(id, chance)| LootEntry::new(id, chance))
        .collect()
}

// ============================================================================
// Internals
// ============================================================================

struct Blueprint {
    severity: Severity,
    complexity: u32,
    spells: Vec<String>,
    rank: MonsterRank,
}

fn spawn_from_commit(
    commit: &ParsedCommit,
    severity: Severity,
    state: RngState,
    env: &GameEnv<'_>,
) -> (Monster, RngState) {
    let template = env.monsters().template(infer_bug_type(&commit.message));
    let touched = commit.files_changed.len() as f64;
    let complexity = ((touched * 1.5).floor() as u32).min(MAX_COMPLEXITY);
    let (mut monster, state) = build(
        template,
        Blueprint {
            severity,
            complexity,
            spells: template.spells.clone(),
            rank: MonsterRank::Normal,
        },
        state,
        env,
    );
    monster.source_commit = Some(commit.hash.clone());
    (monster, state)
}

/// Name draw (severity 2+ only), then id draw.
fn build(
    template: &MonsterTemplate,
    blueprint: Blueprint,
    state: RngState,
    env: &GameEnv<'_>,
) -> (Monster, RngState) {
    let (mut name, state) = monster_name(template, blueprint.severity, state);
    if let Some(marker) = blueprint.rank.marker() {
        name = format!("{name} {marker}");
    }
    let (raw_id, state) = rng::next_u32(state);

    let scaling = &env.balance().monsters;
    let scale = |base| scale_monster_stat(base, blueprint.severity, blueprint.complexity, scaling);
    let max_health = scale(template.base_hp);

    let monster = Monster {
        id: format!("monster-{raw_id:08x}"),
        name,
        bug_type: template.bug_type,
        element: template.element,
        severity: blueprint.severity,
        stats: Stats {
            health: max_health,
            max_health,
            mana: 0,
            max_mana: 0,
            attack: scale(template.base_attack),
            defense: scale(template.base_defense),
            speed: scale(template.base_speed),
        },
        spells: blueprint.spells,
        effects: StatusEffects::empty(),
        xp_reward: xp_reward(blueprint.severity, blueprint.complexity, &env.balance().xp),
        loot_table: loot_table(blueprint.severity),
        source_commit: None,
        source_file: None,
        rank: blueprint.rank,
        ultimate_used: false,
    };
    (monster, state)
}

fn monster_name(template: &MonsterTemplate, severity: Severity, state: RngState) -> (String, RngState) {
    let pool: &[&str] = match severity.get() {
        4.. => &BOSS_PREFIXES,
        2..=3 => &ADJECTIVES,
        _ => return (template.base_name.clone(), state),
    };
    let (word, state) = rng::pick(pool, state);
    let name = match word {
        Some(word) => format!("{word} {}", template.base_name),
        None => template.base_name.clone(),
    };
    (name, state)
}
