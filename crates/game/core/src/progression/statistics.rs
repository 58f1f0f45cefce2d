//! Running battle statistics.

use crate::state::{Actor, BattlePhase, BattleState};

use super::BattleRewards;

/// Lifetime combat totals of a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleStatistics {
    pub total_battles: u32,
    pub victories: u32,
    pub defeats: u32,
    pub total_damage_dealt: u64,
    pub total_damage_received: u64,
    pub total_healing: u64,
    pub total_spells_cast: u32,
    pub total_turns: u32,
    pub monsters_defeated: u32,
    pub bosses_defeated: u32,
    pub critical_hits: u32,
    /// Turn count of the longest battle.
    pub longest_battle: u32,
    /// Turn count of the quickest victory; `None` until the first win.
    pub fastest_victory: Option<u32>,
}

/// Folds a finished battle into the totals.
///
/// Damage, healing, casts and crits are read back from the battle log.
pub fn update_battle_statistics(
    stats: &BattleStatistics,
    state: &BattleState,
    rewards: Option<&BattleRewards>,
) -> BattleStatistics {
    let victory = matches!(state.phase, BattlePhase::Victory { .. });
    let turns = state.turn;

    let mut tally = LogTally::default();
    for entry in &state.log {
        tally.record(entry.actor, &entry.text);
    }

    BattleStatistics {
        total_battles: stats.total_battles + 1,
        victories: stats.victories + u32::from(victory),
        defeats: stats.defeats + u32::from(!victory),
        total_damage_dealt: stats.total_damage_dealt + tally.dealt,
        total_damage_received: stats.total_damage_received + tally.received,
        total_healing: stats.total_healing + tally.healing,
        total_spells_cast: stats.total_spells_cast + tally.spells,
        total_turns: stats.total_turns + turns,
        monsters_defeated: stats.monsters_defeated + rewards.map_or(0, |r| r.monsters_defeated),
        bosses_defeated: stats.bosses_defeated + u32::from(rewards.is_some_and(|r| r.boss_defeated)),
        critical_hits: stats.critical_hits + tally.crits,
        longest_battle: stats.longest_battle.max(turns),
        fastest_victory: match (victory, stats.fastest_victory) {
            (true, Some(best)) => Some(best.min(turns)),
            (true, None) => Some(turns),
            (false, best) => best,
        },
    }
}

#[derive(Default)]
struct LogTally {
    dealt: u64,
    received: u64,
    healing: u64,
    spells: u32,
    crits: u32,
}

impl LogTally {
    fn record(&mut self, actor: Actor, text: &str) {
        match actor {
            Actor::Player => {
                self.dealt += amount_before(text, " damage").unwrap_or(0);
                self.healing += amount_after(text, "healing for ")
                    .or_else(|| amount_after(text, "restoring "))
                    .unwrap_or(0);
                self.spells += u32::from(text.contains("casts"));
                self.crits += u32::from(text.contains("CRITICAL"));
            }
            Actor::Enemy(_) => {
                self.received += amount_before(text, " damage").unwrap_or(0);
            }
            Actor::System => {}
        }
    }
}

/// First number immediately followed by `marker`.
fn amount_before(text: &str, marker: &str) -> Option<u64> {
    text.match_indices(marker).find_map(|(at, _)| {
        let head = &text[..at];
        let digits = head.len() - head.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        head[at - digits..].parse().ok()
    })
}

/// Number immediately following the first `marker`.
fn amount_after(text: &str, marker: &str) -> Option<u64> {
    let (_, tail) = text.split_once(marker)?;
    let end = tail
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(tail.len());
    tail[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::RngState;
    use crate::state::{
        Character, CharacterClass, LogEntry, Stats, StatusEffects,
    };
    use std::collections::BTreeMap;

    fn state(phase: BattlePhase, turn: u32, lines: &[(Actor, &str)]) -> BattleState {
        let player = Character {
            id: "char-1".into(),
            name: "Ada".into(),
            class: CharacterClass::Healer,
            level: 1,
            experience: 50,
            stats: Stats {
                health: 10,
                max_health: 10,
                mana: 0,
                max_mana: 0,
                attack: 1,
                defense: 1,
                speed: 1,
            },
            spells: vec![],
            effects: StatusEffects::empty(),
            cooldowns: BTreeMap::new(),
        };
        BattleState {
            turn,
            phase,
            player,
            enemies: vec![],
            log: lines
                .iter()
                .map(|(actor, text)| LogEntry {
                    turn: 1,
                    actor: *actor,
                    text: text.to_string(),
                })
                .collect(),
            rng: RngState::from_seed(1),
            events: vec![],
        }
    }

    #[test]
    fn log_is_tallied_by_actor() {
        let won = state(
            BattlePhase::Victory {
                xp_gained: 30,
                loot: vec![],
            },
            3,
            &[
                (Actor::Player, "Ada attacks Leak for 12 damage — CRITICAL"),
                (Actor::Player, "Ada casts Rollback, healing for 20 HP"),
                (Actor::Enemy(0), "Leak deals 7 damage to Ada (2 absorbed by shield)"),
                (Actor::Player, "Ada uses Caffeine, restoring 15 mana"),
            ],
        );
        let rewards = BattleRewards {
            xp: 30,
            monsters_defeated: 1,
            boss_defeated: true,
            turns_elapsed: 3,
            ..Default::default()
        };

        let stats = update_battle_statistics(&BattleStatistics::default(), &won, Some(&rewards));

        assert_eq!(stats.total_battles, 1);
        assert_eq!(stats.victories, 1);
        assert_eq!(stats.total_damage_dealt, 12);
        assert_eq!(stats.total_damage_received, 7);
        assert_eq!(stats.total_healing, 35);
        assert_eq!(stats.total_spells_cast, 1);
        assert_eq!(stats.critical_hits, 1);
        assert_eq!(stats.bosses_defeated, 1);
        assert_eq!(stats.fastest_victory, Some(3));
    }

    #[test]
    fn fastest_victory_ignores_defeats() {
        let won = state(
            BattlePhase::Victory {
                xp_gained: 0,
                loot: vec![],
            },
            5,
            &[],
        );
        let lost = state(
            BattlePhase::Defeat {
                cause: "Killed by Leak".into(),
            },
            2,
            &[],
        );

        let stats = update_battle_statistics(&BattleStatistics::default(), &lost, None);
        assert_eq!(stats.fastest_victory, None);
        assert_eq!(stats.defeats, 1);

        let stats = update_battle_statistics(&stats, &won, None);
        assert_eq!(stats.fastest_victory, Some(5));
        assert_eq!(stats.longest_battle, 5);
        assert_eq!(stats.total_turns, 7);
    }

    #[test]
    fn amounts_are_parsed_around_markers() {
        assert_eq!(amount_before("x for 42 damage", " damage"), Some(42));
        assert_eq!(amount_before("no damage here", " damage"), None);
        assert_eq!(amount_after("restoring 9 HP!", "restoring "), Some(9));
    }
}
