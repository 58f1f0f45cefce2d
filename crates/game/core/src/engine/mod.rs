//! Battle reducer.
//!
//! [`BattleEngine`] is the only way a [`BattleState`] moves forward. One
//! accepted action runs the player's turn and, unless the battle ends first,
//! the whole enemy phase. The engine validates every action before touching
//! the state, so a rejected action leaves it exactly as it was.
//!
//! Replaying the same actions from the same seed always yields the same
//! state, bit for bit.

mod action;
mod enemy;
mod errors;
mod player;
mod resolve;

pub use action::{ActionMask, AvailableActions, BattleAction, available_actions};
pub use errors::TurnError;

use crate::env::{GameEnv, RngState};
use crate::state::{BattlePhase, BattleState, Character, CombatEvent, LogEntry, Monster};

/// What one accepted action produced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOutcome {
    /// Phase after the transition.
    pub phase: BattlePhase,
    /// Events in the order the engine computed them.
    pub events: Vec<CombatEvent>,
    /// Log lines appended by this transition.
    pub log: Vec<LogEntry>,
}

/// Drives a battle state through player actions.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState) -> Self {
        Self { state }
    }

    /// Validates and applies one player action.
    ///
    /// On `Err` the state is untouched, including its RNG and log.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &BattleAction,
    ) -> Result<TurnOutcome, TurnError> {
        player::validate(self.state, action, &env)?;

        let log_start = self.state.log.len();
        self.state.events.clear();
        player::run(self.state, action, &env);

        Ok(TurnOutcome {
            phase: self.state.phase.clone(),
            events: self.state.events.clone(),
            log: self.state.log[log_start..].to_vec(),
        })
    }
}

/// Sets up a fresh battle.
///
/// Clears status effects on every combatant and the player's cooldowns.
pub fn init_battle(mut player: Character, mut enemies: Vec<Monster>, seed: u32) -> BattleState {
    player.reset_for_battle();
    for enemy in &mut enemies {
        enemy.effects.clear();
    }

    BattleState {
        turn: 1,
        phase: BattlePhase::PlayerTurn,
        player,
        enemies,
        log: Vec::new(),
        rng: RngState::from_seed(seed),
        events: Vec::new(),
    }
}

/// Applies `action`, returning the input unchanged when it is rejected.
pub fn execute_turn(
    mut state: BattleState,
    action: &BattleAction,
    env: GameEnv<'_>,
) -> BattleState {
    // Rejections are already reflected by the unchanged state.
    let _ = BattleEngine::new(&mut state).execute(env, action);
    state
}

/// Re-runs a recorded battle from its seed.
///
/// Actions after the battle ends are ignored.
pub fn replay_battle(
    player: Character,
    enemies: Vec<Monster>,
    seed: u32,
    actions: &[BattleAction],
    env: GameEnv<'_>,
) -> BattleState {
    let mut state = init_battle(player, enemies, seed);
    for action in actions {
        if state.is_terminal() {
            break;
        }
        state = execute_turn(state, action, env);
    }
    state
}
