//! Simulation settings read from the environment.
use std::env;
use std::path::PathBuf;

use codequest_core::{CharacterClass, Severity};
use codequest_runtime::SimulationConfig;

/// Which sweep to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Mode {
    /// Every class against every bug type.
    #[default]
    Full,
    /// One class across levels and severities.
    Progression,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

#[derive(Clone, Debug)]
pub struct CliConfig {
    pub mode: Mode,
    pub format: OutputFormat,
    /// Directory holding `balance.toml`, `spells.ron` and `items.ron`.
    pub data_dir: Option<PathBuf>,
    /// Preset name or TOML path; overrides the data directory's balance.
    pub balance: Option<String>,
    pub simulation: SimulationConfig,
    pub level: u32,
    pub severity: Severity,
    pub complexity: u32,
    pub class: CharacterClass,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            format: OutputFormat::default(),
            data_dir: None,
            balance: None,
            simulation: SimulationConfig::default(),
            level: 5,
            severity: Severity::clamped(2),
            complexity: 0,
            class: CharacterClass::Dps,
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(mode) = read_env::<Mode>("CODEQUEST_MODE") {
            config.mode = mode;
        }
        if let Some(format) = read_env::<OutputFormat>("CODEQUEST_FORMAT") {
            config.format = format;
        }
        config.data_dir = env::var_os("CODEQUEST_DATA_DIR").map(PathBuf::from);
        config.balance = env::var("CODEQUEST_BALANCE").ok();

        // Simulation parameters
        if let Some(trials) = read_env::<u32>("CODEQUEST_TRIALS") {
            config.simulation.trials = trials.max(1);
        }
        if let Some(seed) = read_env::<u32>("CODEQUEST_SEED") {
            config.simulation.base_seed = seed;
        }
        if let Some(turns) = read_env::<u32>("CODEQUEST_MAX_TURNS") {
            config.simulation.max_turns = turns.max(1);
        }

        // Matchup parameters
        if let Some(level) = read_env::<u32>("CODEQUEST_LEVEL") {
            config.level = level.max(1);
        }
        if let Some(severity) = read_env::<i64>("CODEQUEST_SEVERITY") {
            config.severity = Severity::clamped(severity);
        }
        if let Some(complexity) = read_env::<u32>("CODEQUEST_COMPLEXITY") {
            config.complexity = complexity;
        }
        if let Some(class) = read_env::<CharacterClass>("CODEQUEST_CLASS") {
            config.class = class;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
