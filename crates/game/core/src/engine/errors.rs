//! Reasons a battle action is rejected.

use crate::env::RegistryError;
use crate::error::{ErrorSeverity, GameError};

/// Errors surfaced while validating a battle action.
///
/// A rejected action never touches the battle state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("battle is over; no further actions are accepted")]
    BattleOver,

    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("spell '{0}' has not been learned")]
    SpellNotLearned(String),

    #[error("not enough mana for '{spell_id}': need {required}, have {available}")]
    InsufficientMana {
        spell_id: String,
        required: i32,
        available: i32,
    },

    #[error("spell '{spell_id}' is on cooldown for {remaining} more turn(s)")]
    OnCooldown { spell_id: String, remaining: u32 },

    #[error("item '{0}' cannot be used in battle")]
    ItemNotUsable(String),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotPlayerTurn => ErrorSeverity::Internal,
            Self::Registry(err) => err.severity(),
            Self::BattleOver | Self::SpellNotLearned(_) | Self::ItemNotUsable(_) => {
                ErrorSeverity::Validation
            }
            Self::InsufficientMana { .. } | Self::OnCooldown { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BattleOver => "TURN_BATTLE_OVER",
            Self::NotPlayerTurn => "TURN_NOT_PLAYER_TURN",
            Self::Registry(err) => err.error_code(),
            Self::SpellNotLearned(_) => "TURN_SPELL_NOT_LEARNED",
            Self::InsufficientMana { .. } => "TURN_INSUFFICIENT_MANA",
            Self::OnCooldown { .. } => "TURN_ON_COOLDOWN",
            Self::ItemNotUsable(_) => "TURN_ITEM_NOT_USABLE",
        }
    }
}
