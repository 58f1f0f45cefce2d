//! Encounter triggers derived from the analysed codebase.
//!
//! Visiting a file can spawn at most one encounter, in priority order:
//! boss (complex file) > miniboss (risky hotspot) > bug (bug-fix commit
//! touching the file) > random bug. Anything already defeated is skipped, and
//! nothing triggers until the cooldown has elapsed since the last encounter.

use std::collections::BTreeSet;

use crate::artifacts::{Hotspot, ParsedCommit, ParsedFile};
use crate::config::EncounterConfig;
use crate::env::{GameEnv, RngState, rng};
use crate::monster::{generate_boss, generate_bug_monster, generate_miniboss, generate_random_bug};
use crate::state::Monster;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum EncounterKind {
    Boss,
    Miniboss,
    Bug,
}

/// Why an encounter fired.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "kebab-case"))]
pub enum EncounterTrigger {
    /// File or hotspot complexity.
    Complexity { complexity: u32 },
    /// A bug-fix commit touched the file.
    BugFix { file: String },
    /// Random roll while exploring the file.
    Random { file: String },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encounter {
    pub kind: EncounterKind,
    pub monster: Monster,
    pub trigger: EncounterTrigger,
}

/// Per-session encounter bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterState {
    pub steps_since_last_encounter: u32,
    /// File paths whose boss is defeated.
    pub defeated_bosses: BTreeSet<String>,
    /// Hotspot paths whose miniboss is defeated.
    pub defeated_minibosses: BTreeSet<String>,
    /// Commit hashes whose bug is defeated.
    pub defeated_bugs: BTreeSet<String>,
}

impl EncounterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_boss_defeated(&mut self, file_path: impl Into<String>) {
        self.defeated_bosses.insert(file_path.into());
    }

    pub fn mark_miniboss_defeated(&mut self, hotspot_path: impl Into<String>) {
        self.defeated_minibosses.insert(hotspot_path.into());
    }

    pub fn mark_bug_defeated(&mut self, commit_hash: impl Into<String>) {
        self.defeated_bugs.insert(commit_hash.into());
    }
}

fn is_boss_file(file: &ParsedFile, config: &EncounterConfig) -> bool {
    file.complexity > config.boss_complexity_threshold
}

fn risky_hotspot<'h>(
    file: &ParsedFile,
    hotspots: &'h [Hotspot],
    config: &EncounterConfig,
    defeated: Option<&BTreeSet<String>>,
) -> Option<&'h Hotspot> {
    hotspots.iter().find(|h| {
        h.path == file.path
            && h.risk_score >= config.miniboss_risk_threshold
            && defeated.is_none_or(|set| !set.contains(&h.path))
    })
}

fn bug_commit<'c>(
    file: &ParsedFile,
    commits: &'c [ParsedCommit],
    defeated: Option<&BTreeSet<String>>,
) -> Option<&'c ParsedCommit> {
    commits.iter().find(|c| {
        c.is_bug_fix && c.touches(&file.path) && defeated.is_none_or(|set| !set.contains(&c.hash))
    })
}

/// Checks whether visiting `file` triggers an encounter.
///
/// Always counts the step. A triggered encounter resets the counter to zero.
/// The random roll is only drawn when no scripted trigger applies.
pub fn check_encounter(
    file: &ParsedFile,
    commits: &[ParsedCommit],
    hotspots: &[Hotspot],
    state: &mut EncounterState,
    rng: RngState,
    config: &EncounterConfig,
    env: &GameEnv<'_>,
) -> (Option<Encounter>, RngState) {
    state.steps_since_last_encounter += 1;
    if state.steps_since_last_encounter < config.encounter_cooldown {
        return (None, rng);
    }

    let (encounter, rng) = if is_boss_file(file, config)
        && !state.defeated_bosses.contains(&file.path)
    {
        boss_encounter(file, rng, env)
    } else if let Some(hotspot) =
        risky_hotspot(file, hotspots, config, Some(&state.defeated_minibosses))
    {
        miniboss_encounter(hotspot, rng, env)
    } else if let Some(commit) = bug_commit(file, commits, Some(&state.defeated_bugs)) {
        bug_encounter(file, commit, rng, env)
    } else {
        let (hit, rng) = rng::chance(config.random_encounter_chance, rng);
        match commits.first() {
            Some(commit) if hit => {
                let (monster, rng) = generate_random_bug(commit, rng, env);
                let encounter = Encounter {
                    kind: EncounterKind::Bug,
                    monster,
                    trigger: EncounterTrigger::Random {
                        file: file.path.clone(),
                    },
                };
                (encounter, rng)
            }
            _ => return (None, rng),
        }
    };

    state.steps_since_last_encounter = 0;
    (Some(encounter), rng)
}

fn boss_encounter(file: &ParsedFile, rng: RngState, env: &GameEnv<'_>) -> (Encounter, RngState) {
    let (monster, rng) = generate_boss(file, rng, env);
    let encounter = Encounter {
        kind: EncounterKind::Boss,
        monster,
        trigger: EncounterTrigger::Complexity {
            complexity: file.complexity,
        },
    };
    (encounter, rng)
}

fn miniboss_encounter(
    hotspot: &Hotspot,
    rng: RngState,
    env: &GameEnv<'_>,
) -> (Encounter, RngState) {
    let (monster, rng) = generate_miniboss(hotspot, rng, env);
    let encounter = Encounter {
        kind: EncounterKind::Miniboss,
        monster,
        trigger: EncounterTrigger::Complexity {
            complexity: hotspot.complexity,
        },
    };
    (encounter, rng)
}

fn bug_encounter(
    file: &ParsedFile,
    commit: &ParsedCommit,
    rng: RngState,
    env: &GameEnv<'_>,
) -> (Encounter, RngState) {
    let (monster, rng) = generate_bug_monster(commit, rng, env);
    let encounter = Encounter {
        kind: EncounterKind::Bug,
        monster,
        trigger: EncounterTrigger::BugFix {
            file: file.path.clone(),
        },
    };
    (encounter, rng)
}

/// An encounter found by [`scan_all_encounters`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScannedEncounter<'a> {
    pub file: &'a ParsedFile,
    pub encounter: Encounter,
}

/// Lists every scripted encounter in `files`, ignoring cooldowns, defeats
/// and random rolls. The RNG is threaded through each spawn in file order.
pub fn scan_all_encounters<'a>(
    files: &'a [ParsedFile],
    commits: &[ParsedCommit],
    hotspots: &[Hotspot],
    mut rng: RngState,
    config: &EncounterConfig,
    env: &GameEnv<'_>,
) -> (Vec<ScannedEncounter<'a>>, RngState) {
    let mut found = Vec::new();

    for file in files {
        let spawned = if is_boss_file(file, config) {
            boss_encounter(file, rng.clone(), env)
        } else if let Some(hotspot) = risky_hotspot(file, hotspots, config, None) {
            miniboss_encounter(hotspot, rng.clone(), env)
        } else if let Some(commit) = bug_commit(file, commits, None) {
            bug_encounter(file, commit, rng.clone(), env)
        } else {
            continue;
        };

        let (encounter, next) = spawned;
        rng = next;
        found.push(ScannedEncounter { file, encounter });
    }

    (found, rng)
}

/// Fractions of files that would trigger an encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterDensity {
    /// Files that would spawn a boss. Used for difficulty tuning.
    pub boss: f64,
    /// Files that would spawn any scripted encounter.
    pub any: f64,
}

pub fn encounter_density(
    files: &[ParsedFile],
    commits: &[ParsedCommit],
    hotspots: &[Hotspot],
    config: &EncounterConfig,
) -> EncounterDensity {
    if files.is_empty() {
        return EncounterDensity::default();
    }

    let mut bosses = 0usize;
    let mut any = 0usize;
    for file in files {
        if is_boss_file(file, config) {
            bosses += 1;
            any += 1;
        } else if risky_hotspot(file, hotspots, config, None).is_some()
            || bug_commit(file, commits, None).is_some()
        {
            any += 1;
        }
    }

    let total = files.len() as f64;
    EncounterDensity {
        boss: bosses as f64 / total,
        any: any as f64 / total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MonsterRank;

    fn file(path: &str, complexity: u32) -> ParsedFile {
        ParsedFile {
            path: path.into(),
            language: "rust".into(),
            complexity,
            loc: 200,
            ..Default::default()
        }
    }

    fn bug_fix(hash: &str, path: &str) -> ParsedCommit {
        ParsedCommit {
            hash: hash.into(),
            message: "fix: null check in parser".into(),
            files_changed: vec![path.into()],
            insertions: 12,
            deletions: 3,
            is_bug_fix: true,
            ..Default::default()
        }
    }

    fn hotspot(path: &str, risk: f64) -> Hotspot {
        Hotspot {
            path: path.into(),
            churn_rate: 20,
            complexity: 18,
            risk_score: risk,
        }
    }

    fn ready() -> EncounterState {
        EncounterState {
            steps_since_last_encounter: 10,
            ..Default::default()
        }
    }

    #[test]
    fn boss_outranks_miniboss_and_bug() {
        let env = GameEnv::builtin();
        let config = EncounterConfig::default();
        let target = file("src/core.rs", 40);
        let commits = vec![bug_fix("abc1234", "src/core.rs")];
        let hotspots = vec![hotspot("src/core.rs", 9.0)];
        let mut state = ready();

        let (encounter, _) = check_encounter(
            &target,
            &commits,
            &hotspots,
            &mut state,
            RngState::from_seed(1),
            &config,
            &env,
        );

        let encounter = encounter.expect("boss");
        assert_eq!(encounter.kind, EncounterKind::Boss);
        assert_eq!(encounter.monster.rank, MonsterRank::Boss);
        assert_eq!(state.steps_since_last_encounter, 0);
    }

    #[test]
    fn defeated_boss_falls_through_to_miniboss() {
        let env = GameEnv::builtin();
        let config = EncounterConfig::default();
        let target = file("src/core.rs", 40);
        let hotspots = vec![hotspot("src/core.rs", 9.0)];
        let mut state = ready();
        state.mark_boss_defeated("src/core.rs");

        let (encounter, _) = check_encounter(
            &target,
            &[],
            &hotspots,
            &mut state,
            RngState::from_seed(1),
            &config,
            &env,
        );

        assert_eq!(encounter.map(|e| e.kind), Some(EncounterKind::Miniboss));
    }

    #[test]
    fn bug_fix_commit_spawns_bug_until_defeated() {
        let env = GameEnv::builtin();
        let mut config = EncounterConfig::default();
        config.random_encounter_chance = 0.0;
        let target = file("src/parser.rs", 5);
        let commits = vec![bug_fix("abc1234", "src/parser.rs")];
        let mut state = ready();

        let (encounter, _) = check_encounter(
            &target,
            &commits,
            &[],
            &mut state,
            RngState::from_seed(1),
            &config,
            &env,
        );
        let encounter = encounter.expect("bug");
        assert_eq!(encounter.kind, EncounterKind::Bug);
        assert_eq!(
            encounter.trigger,
            EncounterTrigger::BugFix {
                file: "src/parser.rs".into()
            }
        );

        let mut state = ready();
        state.mark_bug_defeated("abc1234");
        let (encounter, _) = check_encounter(
            &target,
            &commits,
            &[],
            &mut state,
            RngState::from_seed(1),
            &config,
            &env,
        );
        assert!(encounter.is_none());
    }

    #[test]
    fn cooldown_suppresses_and_leaves_rng_untouched() {
        let env = GameEnv::builtin();
        let config = EncounterConfig::default();
        let target = file("src/core.rs", 40);
        let mut state = EncounterState::new();
        let rng = RngState::from_seed(5);

        let (first, after) =
            check_encounter(&target, &[], &[], &mut state, rng.clone(), &config, &env);
        assert!(first.is_none());
        assert_eq!(after, rng);
        assert_eq!(state.steps_since_last_encounter, 1);

        check_encounter(&target, &[], &[], &mut state, rng.clone(), &config, &env);
        let (third, _) = check_encounter(&target, &[], &[], &mut state, rng, &config, &env);
        assert_eq!(third.map(|e| e.kind), Some(EncounterKind::Boss));
    }

    #[test]
    fn guaranteed_random_encounter_uses_first_commit() {
        let env = GameEnv::builtin();
        let mut config = EncounterConfig::default();
        config.random_encounter_chance = 1.0;
        let commits = vec![ParsedCommit {
            hash: "fff0000".into(),
            message: "chore: bump deps".into(),
            files_changed: vec!["Cargo.toml".into()],
            ..Default::default()
        }];
        let mut state = ready();

        let (encounter, _) = check_encounter(
            &file("README.md", 1),
            &commits,
            &[],
            &mut state,
            RngState::from_seed(9),
            &config,
            &env,
        );

        let encounter = encounter.expect("random bug");
        assert_eq!(encounter.monster.severity.get(), 1);
        assert!(matches!(encounter.trigger, EncounterTrigger::Random { .. }));
    }

    #[test]
    fn scan_and_density_agree() {
        let env = GameEnv::builtin();
        let config = EncounterConfig::default();
        let files = vec![
            file("src/core.rs", 40),
            file("src/hot.rs", 5),
            file("src/parser.rs", 5),
            file("README.md", 1),
        ];
        let commits = vec![bug_fix("abc1234", "src/parser.rs")];
        let hotspots = vec![hotspot("src/hot.rs", 6.0)];

        let (found, _) = scan_all_encounters(
            &files,
            &commits,
            &hotspots,
            RngState::from_seed(3),
            &config,
            &env,
        );
        let kinds: Vec<_> = found.iter().map(|s| s.encounter.kind).collect();
        assert_eq!(
            kinds,
            vec![EncounterKind::Boss, EncounterKind::Miniboss, EncounterKind::Bug]
        );

        let density = encounter_density(&files, &commits, &hotspots, &config);
        assert_eq!(density.boss, 0.25);
        assert_eq!(density.any, 0.75);
        assert_eq!(
            encounter_density(&[], &commits, &hotspots, &config),
            EncounterDensity::default()
        );
    }
}
