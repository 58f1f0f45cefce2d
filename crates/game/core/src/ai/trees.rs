//! Decision trees, one per archetype.
//!
//! Trees are built once and shared; all per-decision data lives in
//! [`AiContext`].
use std::sync::LazyLock;

use behavior_tree::{Behavior, Status, action, condition, guard, inverter, selector, sequence};

use super::{AiContext, EnemyIntent};
use crate::state::BugType;

type Tree = Box<dyn Behavior<AiContext>>;

const HEAP_GROW: &str = "spell-heap-grow";
const OOM_KILL: &str = "spell-oom-kill";
const THREAD_SWAP: &str = "spell-thread-swap";

/// Leaf that commits `intent` with a log line built from the monster name.
fn commit(intent: EnemyIntent, text: &'static str) -> Tree {
    action(move |ctx: &mut AiContext| {
        let log = format!("{}{}", ctx.name, text);
        ctx.decide(intent.clone(), log);
        Status::Success
    })
}

fn when(predicate: impl Fn(&AiContext) -> bool + Send + Sync + 'static, then: Tree) -> Tree {
    guard(condition(predicate), then)
}

static BOSS: LazyLock<Tree> = LazyLock::new(|| {
    selector(vec![
        sequence(vec![
            condition(|c: &AiContext| c.health_ratio() <= 0.25),
            inverter(condition(|c: &AiContext| c.ultimate_used)),
            condition(|c: &AiContext| !c.spells.is_empty()),
            commit(
                EnemyIntent::Ultimate,
                " enters CRITICAL PHASE! Unleashes ultimate ability!",
            ),
        ]),
        when(
            |c| c.health_ratio() <= 0.5 && c.roll < 0.6 && c.spells.len() > 1,
            commit(EnemyIntent::Special, " is enraged! Uses special ability!"),
        ),
        when(
            |c| c.roll < 0.3 && !c.spells.is_empty(),
            commit(EnemyIntent::Special, " uses a special attack!"),
        ),
        commit(EnemyIntent::Attack, " attacks with full force!"),
    ])
});

static NULL_POINTER: LazyLock<Tree> = LazyLock::new(|| {
    selector(vec![
        when(
            |c| c.roll < 0.15,
            commit(
                EnemyIntent::Skip,
                " tried to dereference null and crashed! (skips turn)",
            ),
        ),
        when(
            |c| c.roll < 0.35 && !c.spells.is_empty(),
            action(|ctx: &mut AiContext| {
                let log = format!("{} throws a {}!", ctx.name, ctx.spells[0]);
                ctx.decide(EnemyIntent::Special, log);
                Status::Success
            }),
        ),
        commit(EnemyIntent::Attack, " attacks!"),
    ])
});

static MEMORY_LEAK: LazyLock<Tree> = LazyLock::new(|| {
    selector(vec![
        when(
            |c| c.turn % 3 == 0 && c.knows(HEAP_GROW),
            commit(
                EnemyIntent::Cast {
                    spell_id: HEAP_GROW.into(),
                },
                "'s memory consumption grows... (ATK up!)",
            ),
        ),
        when(
            |c| c.health_ratio() < 0.3 && c.knows(OOM_KILL),
            commit(
                EnemyIntent::Cast {
                    spell_id: OOM_KILL.into(),
                },
                " triggers OOM Killer!",
            ),
        ),
        commit(EnemyIntent::Attack, " slowly leaks into your system..."),
    ])
});

static RACE_CONDITION: LazyLock<Tree> = LazyLock::new(|| {
    selector(vec![
        when(
            |c| c.turn % 2 == 0 && c.knows(THREAD_SWAP),
            commit(
                EnemyIntent::DoubleAttack,
                " context-switches at the worst time! Double attack!",
            ),
        ),
        when(
            |c| c.turn % 2 == 1 && c.roll < 0.3,
            commit(EnemyIntent::Skip, " is waiting for a lock... (skips turn)"),
        ),
        commit(EnemyIntent::Attack, " races ahead!"),
    ])
});

static OFF_BY_ONE: LazyLock<Tree> = LazyLock::new(|| {
    selector(vec![
        when(
            |c| c.roll < 0.1,
            commit(
                EnemyIntent::HealPlayer { amount: 5 },
                " miscounted and healed you instead! (off by one)",
            ),
        ),
        when(
            |c| c.roll < 0.25,
            commit(
                EnemyIntent::HitSelf { amount: 5 },
                " hit itself in confusion! (index out of bounds)",
            ),
        ),
        commit(EnemyIntent::Attack, " attacks... probably at the right target."),
    ])
});

pub(super) fn tree_for(elevated: bool, bug_type: BugType) -> &'static dyn Behavior<AiContext> {
    let tree: &'static Tree = if elevated {
        &*BOSS
    } else {
        match bug_type {
            BugType::NullPointer => &*NULL_POINTER,
            BugType::MemoryLeak => &*MEMORY_LEAK,
            BugType::RaceCondition => &*RACE_CONDITION,
            BugType::OffByOne => &*OFF_BY_ONE,
        }
    };
    tree.as_ref()
}
