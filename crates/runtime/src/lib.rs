//! Session orchestration for CodeQuest.
//!
//! This crate composes the pure rules in `codequest-core` into a single
//! synchronous [`Session`]: encounters trigger battles, battle outcomes feed
//! progression and statistics, and every observable change is published as a
//! [`GameEvent`] in the session's outbox.
//!
//! Modules are organized by responsibility:
//! - [`session`] owns the mutable game session
//! - [`events`] maps engine telemetry to domain events
//! - [`simulation`] runs Monte Carlo balance sweeps
//! - [`error`] is the unified error surface
pub mod error;
pub mod events;
pub mod session;
pub mod simulation;

pub use error::{Result, RuntimeError};
pub use events::{CombatOutcome, GameEvent, StatChanges, extract_events};
pub use session::{Session, SessionSnapshot};
pub use simulation::{
    BalanceFlag, BattleOutcome, BattleResult, MatchupResult, SimulationConfig, SimulationReport,
    Strategy, format_csv, format_report, run_full_simulation, run_progression_simulation,
    simulate_battle, simulate_matchup,
};
