//! Registry lookup errors.

use crate::error::{ErrorSeverity, GameError};

/// A content id that no registry knows about.
///
/// These are validation errors: the caller referenced data that was never
/// registered. The engine rejects the action and leaves state untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegistryError {
    #[error("unknown spell '{0}'")]
    UnknownSpell(String),

    #[error("unknown item '{0}'")]
    UnknownItem(String),
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RegistryError::UnknownSpell(_) | RegistryError::UnknownItem(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RegistryError::UnknownSpell(_) => "REGISTRY_UNKNOWN_SPELL",
            RegistryError::UnknownItem(_) => "REGISTRY_UNKNOWN_ITEM",
        }
    }
}
