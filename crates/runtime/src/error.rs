//! Unified error types surfaced by the session API.
//!
//! Wraps rule rejections from the core together with session-level
//! preconditions so callers can bubble them up with consistent context.
use codequest_core::{ErrorSeverity, GameError, QuestError, TurnError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no battle is in progress")]
    NoActiveBattle,

    #[error("a battle is already in progress")]
    BattleInProgress,

    #[error("cannot start a battle without enemies")]
    NoEnemies,

    #[error("unknown file '{0}'")]
    UnknownFile(String),

    #[error("item '{0}' is not in the inventory")]
    ItemNotOwned(String),

    #[error("item '{item_id}' was not used: {reason}")]
    ItemRejected { item_id: String, reason: String },

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Quest(#[from] QuestError),

    #[error("failed to encode session snapshot")]
    Snapshot(#[source] serde_json::Error),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Turn(err) => err.severity(),
            Self::Quest(err) => err.severity(),
            Self::NoActiveBattle | Self::BattleInProgress => ErrorSeverity::Recoverable,
            Self::NoEnemies
            | Self::UnknownFile(_)
            | Self::ItemNotOwned(_)
            | Self::ItemRejected { .. } => ErrorSeverity::Validation,
            Self::Snapshot(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Turn(err) => err.error_code(),
            Self::Quest(err) => err.error_code(),
            Self::NoActiveBattle => "RUNTIME_NO_ACTIVE_BATTLE",
            Self::BattleInProgress => "RUNTIME_BATTLE_IN_PROGRESS",
            Self::NoEnemies => "RUNTIME_NO_ENEMIES",
            Self::UnknownFile(_) => "RUNTIME_UNKNOWN_FILE",
            Self::ItemNotOwned(_) => "RUNTIME_ITEM_NOT_OWNED",
            Self::ItemRejected { .. } => "RUNTIME_ITEM_REJECTED",
            Self::Snapshot(_) => "RUNTIME_SNAPSHOT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_rule_errors_keep_their_codes() {
        let err = RuntimeError::from(TurnError::BattleOver);
        assert_eq!(err.error_code(), "TURN_BATTLE_OVER");
        assert_eq!(err.severity(), ErrorSeverity::Validation);

        let err = RuntimeError::from(QuestError::UnknownQuest("quest-9".into()));
        assert_eq!(err.error_code(), "QUEST_UNKNOWN");
    }

    #[test]
    fn session_preconditions_are_recoverable() {
        assert!(RuntimeError::NoActiveBattle.severity().is_recoverable());
        assert_eq!(
            RuntimeError::UnknownFile("src/x.rs".into()).to_string(),
            "unknown file 'src/x.rs'"
        );
    }
}
