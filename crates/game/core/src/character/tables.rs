//! Starter kits and the spell unlock schedule.

use crate::state::CharacterClass;

/// Spells every new character of a class knows.
pub fn starter_spells(class: CharacterClass) -> &'static [&'static str] {
    match class {
        CharacterClass::Tank => &[
            "spell-mutex-lock",
            "spell-load-balancer",
            "spell-firewall",
            "spell-deadlock",
        ],
        CharacterClass::Healer => &[
            "spell-try-catch",
            "spell-rollback",
            "spell-garbage-collect",
            "spell-patch",
        ],
        CharacterClass::Dps => &[
            "spell-sql-injection",
            "spell-fork-bomb",
            "spell-buffer-overflow",
            "spell-regex-nuke",
        ],
    }
}

/// Levels at which a new spell unlocks.
pub const UNLOCK_LEVELS: [u32; 6] = [5, 10, 15, 20, 25, 30];

/// The spell a class unlocks on reaching `level`, if any.
pub fn unlock_at(class: CharacterClass, level: u32) -> Option<&'static str> {
    let slot = UNLOCK_LEVELS.iter().position(|&l| l == level)?;
    let schedule: [&str; 6] = match class {
        CharacterClass::Tank => [
            "spell-docker-compose",
            "spell-kubernetes",
            "spell-terraform",
            "spell-circuit-breaker",
            "spell-chaos-monkey",
            "spell-immutable-infra",
        ],
        CharacterClass::Healer => [
            "spell-lint-fix",
            "spell-bisect",
            "spell-hot-reload",
            "spell-snapshot-restore",
            "spell-time-travel-debug",
            "spell-formal-verification",
        ],
        CharacterClass::Dps => [
            "spell-zero-day",
            "spell-privilege-escalation",
            "spell-ddos",
            "spell-cryptominer",
            "spell-rootkit",
            "spell-quantum-crack",
        ],
    };
    Some(schedule[slot])
}
