//! Battle state machine data.

use crate::env::RngState;

use super::{Actor, Character, CombatEvent, Monster};

/// Phase of a battle.
///
/// `Victory` and `Defeat` are absorbing: the engine accepts no further
/// transitions once either is reached.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum BattlePhase {
    PlayerTurn,
    EnemyTurn { current_enemy: usize },
    Victory { xp_gained: u32, loot: Vec<String> },
    Defeat { cause: String },
}

impl BattlePhase {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, BattlePhase::Victory { .. } | BattlePhase::Defeat { .. })
    }
}

/// One line of the chronological battle log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub turn: u32,
    pub actor: Actor,
    pub text: String,
}

/// Complete state of one battle.
///
/// Everything a replay needs is in here, including the generator state, so
/// two equal values evolve identically under equal action sequences.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// Starts at 1; advances each time control returns to the player.
    pub turn: u32,
    pub phase: BattlePhase,
    pub player: Character,
    pub enemies: Vec<Monster>,
    pub log: Vec<LogEntry>,
    pub rng: RngState,
    /// Events produced by the most recent transition.
    pub events: Vec<CombatEvent>,
}

impl BattleState {
    /// Runs one randomness-consuming operation against the battle's generator.
    pub fn roll<T>(&mut self, draw: impl FnOnce(RngState) -> (T, RngState)) -> T {
        let (value, next) = draw(core::mem::take(&mut self.rng));
        self.rng = next;
        value
    }

    pub fn push_log(&mut self, actor: Actor, text: impl Into<String>) {
        self.log.push(LogEntry {
            turn: self.turn,
            actor,
            text: text.into(),
        });
    }

    pub fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Index of the first enemy still standing.
    pub fn first_living_enemy(&self) -> Option<usize> {
        self.enemies.iter().position(Monster::is_alive)
    }

    pub fn all_enemies_defeated(&self) -> bool {
        self.enemies.iter().all(|e| !e.is_alive())
    }

    /// Display name of an actor, as used in log lines.
    pub fn actor_name(&self, actor: Actor) -> &str {
        match actor {
            Actor::Player => &self.player.name,
            Actor::Enemy(index) => self
                .enemies
                .get(index)
                .map_or("Unknown", |e| e.name.as_str()),
            Actor::System => "System",
        }
    }

    /// SHA-256 over the bincode encoding of the whole state.
    ///
    /// Two replays of the same battle produce the same digest; a single
    /// differing log line or RNG word changes it.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}
