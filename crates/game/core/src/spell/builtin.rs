//! Shipped spell table.

use std::sync::LazyLock;

use crate::state::Element::{self, Air, Earth, Fire, None as Neutral, Water};

use super::SpellEffectKind::{
    self, AoeDamage, Buff, Cleanse, Damage, Debuff, Dot, Heal, Revive, Shield, Taunt,
};
use super::SpellTarget::{self, AllAllies, AllEnemies, Enemy, SelfCast};
use super::{Spell, SpellCatalog, SpellEffect, SpellRegistry};

/// The built-in spell registry: 12 class spells, 18 unlockable spells, and
/// 8 monster spells.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinSpells;

impl BuiltinSpells {
    pub fn catalog() -> &'static SpellCatalog {
        &BUILTIN
    }
}

impl SpellRegistry for BuiltinSpells {
    fn spell(&self, id: &str) -> Option<&Spell> {
        BUILTIN.spell(id)
    }

    fn all_spells(&self) -> Vec<&Spell> {
        BUILTIN.all_spells()
    }
}

static BUILTIN: LazyLock<SpellCatalog> = LazyLock::new(|| {
    TABLE
        .iter()
        .map(|row| {
            let mut effect = SpellEffect::new(row.kind, row.target, row.value);
            effect.duration = row.duration;
            Spell::new(row.id, row.name, row.cost, row.cooldown, row.element, effect)
                .with_description(row.description)
        })
        .collect()
});

struct Row {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    cost: i32,
    cooldown: u32,
    element: Element,
    kind: SpellEffectKind,
    target: SpellTarget,
    value: i32,
    duration: Option<u32>,
}

#[allow(clippy::too_many_arguments)]
const fn row(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    cost: i32,
    cooldown: u32,
    element: Element,
    kind: SpellEffectKind,
    target: SpellTarget,
    value: i32,
    duration: Option<u32>,
) -> Row {
    Row { id, name, description, cost, cooldown, element, kind, target, value, duration }
}

#[rustfmt::skip]
const TABLE: &[Row] = &[
    // ===== tank =====
    row("spell-mutex-lock", "Mutex Lock", "Acquire a lock and hide behind it.", 10, 0, Earth, Shield, SelfCast, 20, None),
    row("spell-load-balancer", "Load Balancer", "Spread the load. Draws enemy attention.", 15, 2, Neutral, Taunt, SelfCast, 0, Some(2)),
    row("spell-firewall", "Firewall", "A wall of rules that soaks damage for the party.", 20, 3, Fire, Shield, AllAllies, 15, None),
    row("spell-deadlock", "Deadlock", "Circular wait. The target cannot act for a turn.", 25, 4, Earth, Debuff, Enemy, 0, Some(1)),
    // ===== healer =====
    row("spell-try-catch", "Try-Catch", "Handle the error before it spreads. Restores HP.", 15, 0, Water, Heal, SelfCast, 30, None),
    row("spell-rollback", "Rollback", "Revert to the last good state.", 35, 5, Water, Revive, SelfCast, 50, None),
    row("spell-garbage-collect", "Garbage Collect", "Sweep away every ailment.", 20, 3, Air, Cleanse, SelfCast, 0, None),
    row("spell-patch", "Patch", "A quick fix that keeps healing.", 12, 1, Water, Heal, SelfCast, 10, Some(3)),
    // ===== dps =====
    row("spell-sql-injection", "SQL Injection", "Untrusted input straight into the target.", 20, 0, Fire, Damage, Enemy, 40, None),
    row("spell-fork-bomb", "Fork Bomb", "Processes everywhere. Hits every enemy.", 30, 3, Fire, AoeDamage, AllEnemies, 25, None),
    row("spell-buffer-overflow", "Buffer Overflow", "Write past the end. Damage over time.", 18, 2, Earth, Dot, Enemy, 12, Some(3)),
    row("spell-regex-nuke", "Regex Nuke", "Catastrophic backtracking.", 40, 5, Air, Damage, Enemy, 65, None),
    // ===== unlockable =====
    row("spell-docker-compose", "Docker Compose", "Containers stacked into a wall.", 30, 4, Earth, Shield, SelfCast, 40, None),
    row("spell-kubernetes", "Kubernetes", "Self-healing workloads. Regeneration.", 25, 4, Water, Heal, SelfCast, 15, Some(4)),
    row("spell-terraform", "Terraform", "Declare a shield into existence.", 35, 5, Earth, Shield, SelfCast, 55, None),
    row("spell-circuit-breaker", "Circuit Breaker", "Trip before the cascade.", 20, 3, Neutral, Buff, SelfCast, 5, Some(3)),
    row("spell-chaos-monkey", "Chaos Monkey", "Pull the plug on the enemy.", 30, 4, Air, Debuff, Enemy, 0, Some(2)),
    row("spell-immutable-infra", "Immutable Infrastructure", "Nothing changes, nothing breaks.", 45, 6, Earth, Shield, SelfCast, 80, None),
    row("spell-lint-fix", "Lint Fix", "Autofix the small stuff. Light heal.", 8, 0, Air, Heal, SelfCast, 15, None),
    row("spell-bisect", "Git Bisect", "Halve the search space. Weakens defenses.", 15, 3, Neutral, Debuff, Enemy, 3, Some(3)),
    row("spell-hot-reload", "Hot Reload", "Swap the code, keep the process. Burst heal.", 25, 3, Fire, Heal, SelfCast, 45, None),
    row("spell-snapshot-restore", "Snapshot Restore", "Back to a known good image.", 40, 5, Water, Heal, SelfCast, 60, None),
    row("spell-time-travel-debug", "Time-Travel Debug", "Step backwards to before it went wrong.", 50, 8, Air, Revive, SelfCast, 50, None),
    row("spell-formal-verification", "Formal Verification", "Proven correct. Full restore.", 60, 10, Neutral, Heal, SelfCast, 100, None),
    row("spell-zero-day", "Zero Day", "An exploit nobody has patched yet.", 22, 2, Fire, Damage, Enemy, 45, None),
    row("spell-privilege-escalation", "Privilege Escalation", "Root access. Attack up.", 18, 3, Neutral, Buff, SelfCast, 5, Some(3)),
    row("spell-ddos", "DDoS", "Flood every endpoint at once.", 35, 4, Air, AoeDamage, AllEnemies, 35, None),
    row("spell-cryptominer", "Cryptominer", "Quietly drains the target every turn.", 25, 3, Earth, Dot, Enemy, 18, Some(3)),
    row("spell-rootkit", "Rootkit", "Compromise at the lowest level.", 45, 5, Fire, Damage, Enemy, 75, None),
    row("spell-quantum-crack", "Quantum Crack", "Every key at once.", 60, 8, Air, Damage, Enemy, 100, None),
    // ===== monster =====
    row("spell-null-deref", "Null Dereference", "Reaches for nothing and hits you.", 0, 0, Neutral, Damage, Enemy, 15, None),
    row("spell-heap-grow", "Heap Growth", "The heap swells. Attack up for the rest of the fight.", 0, 2, Earth, Buff, SelfCast, 3, Some(99)),
    row("spell-thread-swap", "Thread Swap", "A context switch at the worst moment.", 0, 2, Air, Damage, Enemy, 20, None),
    row("spell-fence-post", "Fence Post", "One past the end.", 0, 0, Neutral, Damage, Enemy, 18, None),
    row("spell-segfault", "Segfault", "Illegal access. Heavy damage.", 0, 3, Earth, Damage, Enemy, 35, None),
    row("spell-oom-kill", "OOM Killer", "Memory is gone and so is your process.", 0, 4, Earth, Damage, Enemy, 50, None),
    row("spell-deadlock-boss", "System Deadlock", "Every thread waits forever. Stun.", 0, 5, Earth, Debuff, Enemy, 0, Some(1)),
    row("spell-stack-smash", "Stack Smash", "Corrupts the stack. Poison.", 0, 3, Fire, Dot, Enemy, 10, Some(3)),
];
