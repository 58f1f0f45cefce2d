//! Monte Carlo balance simulation.
//!
//! Runs many seeded battles per class/monster pairing and flags pairings
//! whose win rate falls outside the target band. Trial `i` of a matchup is
//! seeded with `base_seed + i * 7919`, so a report is reproducible from its
//! configuration alone (apart from the wall-clock duration).

mod report;

pub use report::{format_csv, format_report};

use std::time::{Duration, Instant};

use codequest_core::monster::create_monster;
use codequest_core::{
    BattleAction, BattleState, BugType, Character, CharacterClass, GameEnv, IdSequence, Monster,
    RngState, Severity, available_actions, create_character, execute_turn, init_battle,
};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Prime stride between trial seeds.
const SEED_STRIDE: u32 = 7919;

/// Share of draws above which a matchup is flagged.
const DRAW_HEAVY_RATIO: f64 = 0.1;

/// Levels sampled by a default progression sweep.
pub const PROGRESSION_LEVELS: [u32; 7] = [1, 5, 10, 15, 20, 25, 30];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Trials per matchup; treated as at least one.
    pub trials: u32,
    /// Turns before a battle is declared a draw.
    pub max_turns: u32,
    /// Win rates below this are too hard.
    pub low_win_threshold: f64,
    /// Win rates above this are too easy.
    pub high_win_threshold: f64,
    pub base_seed: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            max_turns: 100,
            low_win_threshold: 0.3,
            high_win_threshold: 0.8,
            base_seed: 12345,
        }
    }
}

/// Scripted player behaviour used by the simulator.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Strategy {
    AttackOnly,
    SpellFirst,
    /// Spell every third turn, defend when low, otherwise attack.
    #[default]
    Mixed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BattleResult {
    Victory,
    Defeat,
    /// The turn limit ran out.
    Draw,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub result: BattleResult,
    pub turns: u32,
    pub player_hp_remaining: i32,
    pub monster_hp_remaining: i32,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BalanceFlag {
    Ok,
    TooEasy,
    TooHard,
    DrawHeavy,
}

/// Aggregate of all trials of one pairing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchupResult {
    pub player_class: CharacterClass,
    pub player_level: u32,
    pub monster_type: BugType,
    pub monster_severity: Severity,
    pub monster_complexity: u32,
    pub trials: u32,
    pub victories: u32,
    pub defeats: u32,
    pub draws: u32,
    pub win_rate: f64,
    pub avg_turns: f64,
    pub avg_player_hp_remaining: f64,
    pub avg_monster_hp_remaining: f64,
    pub median_turns: u32,
    pub flag: BalanceFlag,
}

impl MatchupResult {
    #[inline]
    pub fn balanced(&self) -> bool {
        self.flag == BalanceFlag::Ok
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub config: SimulationConfig,
    pub matchups: Vec<MatchupResult>,
    pub total_trials: u32,
    pub overall_win_rate: f64,
    pub flagged_matchups: Vec<MatchupResult>,
    pub duration: Duration,
}

// ============================================================================
// Single battle
// ============================================================================

/// Plays one battle to completion with a scripted strategy.
pub fn simulate_battle(
    player: Character,
    monster: Monster,
    seed: u32,
    max_turns: u32,
    strategy: Strategy,
    env: GameEnv<'_>,
) -> BattleOutcome {
    let mut state = init_battle(player, vec![monster], seed);
    let mut step = 0;
    while !state.is_terminal() && step < max_turns {
        let action = choose_player_action(&state, strategy, step, &env);
        state = execute_turn(state, &action, env);
        step += 1;
    }

    let player_hp = state.player.stats.health;
    let monster_hp = state.enemies.first().map_or(0, |m| m.stats.health);
    let (result, player_hp_remaining, monster_hp_remaining) = if state.all_enemies_defeated() {
        (BattleResult::Victory, player_hp, 0)
    } else if !state.player.is_alive() {
        (BattleResult::Defeat, 0, monster_hp)
    } else {
        (BattleResult::Draw, player_hp, monster_hp)
    };

    BattleOutcome {
        result,
        turns: state.turn,
        player_hp_remaining,
        monster_hp_remaining,
    }
}

fn choose_player_action(
    state: &BattleState,
    strategy: Strategy,
    step: u32,
    env: &GameEnv<'_>,
) -> BattleAction {
    let first_castable = || {
        available_actions(state, env.spells())
            .spells
            .into_iter()
            .next()
            .map(|spell| BattleAction::cast(spell, 0))
    };

    match strategy {
        Strategy::AttackOnly => BattleAction::attack(0),
        Strategy::SpellFirst => first_castable().unwrap_or(BattleAction::attack(0)),
        Strategy::Mixed => {
            if step % 3 == 0 {
                if let Some(cast) = first_castable() {
                    return cast;
                }
            }
            let stats = &state.player.stats;
            if step % 5 == 0 && f64::from(stats.health) < f64::from(stats.max_health) * 0.3 {
                return BattleAction::Defend;
            }
            BattleAction::attack(0)
        }
    }
}

// ============================================================================
// Matchups
// ============================================================================

/// Runs every trial of one class/monster pairing with the mixed strategy.
pub fn simulate_matchup(
    player_class: CharacterClass,
    player_level: u32,
    monster_type: BugType,
    monster_severity: Severity,
    monster_complexity: u32,
    config: &SimulationConfig,
    env: GameEnv<'_>,
) -> MatchupResult {
    let trials = config.trials.max(1);
    let mut ids = IdSequence::new("sim");
    let mut victories = 0;
    let mut defeats = 0;
    let mut draws = 0;
    let mut total_player_hp = 0i64;
    let mut total_monster_hp = 0i64;
    let mut turn_counts = Vec::with_capacity(trials as usize);

    for i in 0..trials {
        let seed = config.base_seed.wrapping_add(i.wrapping_mul(SEED_STRIDE));
        let player = create_character(
            player_class,
            format!("Sim-{player_class}"),
            player_level,
            env.balance(),
            &mut ids,
        );
        let (monster, _) = create_monster(
            monster_type,
            monster_severity,
            monster_complexity,
            RngState::from_seed(seed),
            &env,
        );

        let outcome = simulate_battle(player, monster, seed, config.max_turns, Strategy::Mixed, env);
        match outcome.result {
            BattleResult::Victory => victories += 1,
            BattleResult::Defeat => defeats += 1,
            BattleResult::Draw => draws += 1,
        }
        total_player_hp += i64::from(outcome.player_hp_remaining);
        total_monster_hp += i64::from(outcome.monster_hp_remaining);
        turn_counts.push(outcome.turns);
    }

    let n = f64::from(trials);
    let win_rate = f64::from(victories) / n;
    turn_counts.sort_unstable();
    let median_turns = turn_counts[turn_counts.len() / 2];
    let avg_turns = turn_counts.iter().map(|&t| f64::from(t)).sum::<f64>() / n;

    let flag = if f64::from(draws) / n > DRAW_HEAVY_RATIO {
        BalanceFlag::DrawHeavy
    } else if win_rate < config.low_win_threshold {
        BalanceFlag::TooHard
    } else if win_rate > config.high_win_threshold {
        BalanceFlag::TooEasy
    } else {
        BalanceFlag::Ok
    };

    tracing::debug!(
        class = %player_class,
        level = player_level,
        monster = %monster_type,
        severity = %monster_severity,
        win_rate,
        %flag,
        "matchup simulated"
    );

    MatchupResult {
        player_class,
        player_level,
        monster_type,
        monster_severity,
        monster_complexity,
        trials,
        victories,
        defeats,
        draws,
        win_rate,
        avg_turns,
        avg_player_hp_remaining: total_player_hp as f64 / n,
        avg_monster_hp_remaining: total_monster_hp as f64 / n,
        median_turns,
        flag,
    }
}

// ============================================================================
// Suites
// ============================================================================

/// Every class against every bug type at one level and severity.
pub fn run_full_simulation(
    player_level: u32,
    monster_severity: Severity,
    monster_complexity: u32,
    config: &SimulationConfig,
    env: GameEnv<'_>,
) -> SimulationReport {
    let start = Instant::now();
    let mut matchups = Vec::new();
    for class in CharacterClass::iter() {
        for bug_type in BugType::iter() {
            matchups.push(simulate_matchup(
                class,
                player_level,
                bug_type,
                monster_severity,
                monster_complexity,
                config,
                env,
            ));
        }
    }

    let total_trials = matchups.iter().map(|m| m.trials).sum::<u32>();
    let total_wins = matchups.iter().map(|m| m.victories).sum::<u32>();
    let flagged_matchups: Vec<MatchupResult> =
        matchups.iter().filter(|m| !m.balanced()).cloned().collect();

    for m in &flagged_matchups {
        tracing::warn!(
            class = %m.player_class,
            monster = %m.monster_type,
            win_rate = m.win_rate,
            flag = %m.flag,
            "unbalanced matchup"
        );
    }

    let report = SimulationReport {
        config: config.clone(),
        matchups,
        total_trials,
        overall_win_rate: f64::from(total_wins) / f64::from(total_trials.max(1)),
        flagged_matchups,
        duration: start.elapsed(),
    };
    tracing::info!(
        total_trials = report.total_trials,
        overall_win_rate = report.overall_win_rate,
        flagged = report.flagged_matchups.len(),
        "simulation finished"
    );
    report
}

/// One class against the null-pointer baseline across levels and severities.
pub fn run_progression_simulation(
    player_class: CharacterClass,
    levels: &[u32],
    severities: &[Severity],
    config: &SimulationConfig,
    env: GameEnv<'_>,
) -> Vec<MatchupResult> {
    levels
        .iter()
        .flat_map(|&level| {
            severities.iter().map(move |&severity| {
                simulate_matchup(
                    player_class,
                    level,
                    BugType::NullPointer,
                    severity,
                    0,
                    config,
                    env,
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> SimulationConfig {
        SimulationConfig {
            trials: 20,
            ..Default::default()
        }
    }

    fn severity(value: u8) -> Severity {
        Severity::new(value).unwrap()
    }

    #[test]
    fn battles_are_deterministic_per_seed() {
        let env = GameEnv::builtin();
        let mut ids = IdSequence::new("sim");
        let player = create_character(CharacterClass::Dps, "Sim", 5, env.balance(), &mut ids);
        let (monster, _) =
            create_monster(BugType::OffByOne, severity(2), 0, RngState::from_seed(9), &env);

        let first = simulate_battle(player.clone(), monster.clone(), 9, 100, Strategy::Mixed, env);
        let second = simulate_battle(player, monster, 9, 100, Strategy::Mixed, env);

        assert_eq!(first, second);
    }

    #[test]
    fn turn_limit_produces_draws() {
        let env = GameEnv::builtin();
        let mut ids = IdSequence::new("sim");
        let player = create_character(CharacterClass::Tank, "Sim", 1, env.balance(), &mut ids);
        let (mut monster, _) =
            create_monster(BugType::NullPointer, severity(1), 0, RngState::from_seed(2), &env);
        monster.stats.health = 10_000;
        monster.stats.max_health = 10_000;

        let outcome = simulate_battle(player, monster, 2, 0, Strategy::AttackOnly, env);

        assert_eq!(outcome.result, BattleResult::Draw);
        assert_eq!(outcome.turns, 1);
        assert_eq!(outcome.monster_hp_remaining, 10_000);
    }

    #[test]
    fn matchup_counts_add_up() {
        let result = simulate_matchup(
            CharacterClass::Dps,
            5,
            BugType::MemoryLeak,
            severity(2),
            0,
            &small(),
            GameEnv::builtin(),
        );

        assert_eq!(result.trials, 20);
        assert_eq!(result.victories + result.defeats + result.draws, 20);
        assert!((0.0..=1.0).contains(&result.win_rate));
    }

    #[test]
    fn overwhelming_matchups_are_flagged_too_easy() {
        let result = simulate_matchup(
            CharacterClass::Dps,
            30,
            BugType::NullPointer,
            severity(1),
            0,
            &small(),
            GameEnv::builtin(),
        );
        assert_eq!(result.flag, BalanceFlag::TooEasy);
        assert!(!result.balanced());
    }

    #[test]
    fn full_simulation_covers_every_pairing() {
        let config = SimulationConfig {
            trials: 3,
            ..Default::default()
        };
        let report = run_full_simulation(5, severity(2), 0, &config, GameEnv::builtin());

        assert_eq!(report.matchups.len(), 12);
        assert_eq!(report.total_trials, 36);
        assert!(report.flagged_matchups.iter().all(|m| !m.balanced()));
    }

    #[test]
    fn progression_sweep_is_level_major() {
        let config = SimulationConfig {
            trials: 2,
            ..Default::default()
        };
        let results = run_progression_simulation(
            CharacterClass::Healer,
            &[1, 10],
            &[severity(1), severity(3)],
            &config,
            GameEnv::builtin(),
        );

        let order: Vec<(u32, u8)> = results
            .iter()
            .map(|m| (m.player_level, m.monster_severity.get()))
            .collect();
        assert_eq!(order, [(1, 1), (1, 3), (10, 1), (10, 3)]);
    }
}
