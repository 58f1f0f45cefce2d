//! Shared error classification.
//!
//! Each domain error (`TurnError`, `RegistryError`, `QuestError`) lives next
//! to the operation that raises it and reports through [`GameError`] so the
//! session layer can decide whether to surface, log, or abort.

/// How a caller should react to a rejected operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The player can pick another action this turn (mana short, spell cooling down).
    Recoverable,
    /// The request named something that is not there (unknown spell, unlearned spell, unknown quest).
    Validation,
    /// Engine bookkeeping disagrees with itself.
    Internal,
    /// Nothing more can happen in this battle.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Whether the same turn can continue with a different choice.
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Whether the failure points at a defect rather than at player input.
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Implemented by every error the combat and progression layers raise.
///
/// `error_code` is a stable SCREAMING_SNAKE identifier that logs and tests
/// match on instead of message text.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_recoverable_errors_keep_the_turn_open() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(!ErrorSeverity::Fatal.is_recoverable());
    }

    #[test]
    fn internal_covers_bookkeeping_and_fatal_errors() {
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }
}
