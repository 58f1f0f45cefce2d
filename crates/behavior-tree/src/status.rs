//! Node results.

/// Outcome of one tick.
///
/// There is no `Running` state: a decision is made and recorded within the
/// tick that asked for it, so every node settles immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// A guard held, or an action recorded its decision.
    Success,
    /// A guard did not hold, or an action had nothing to record.
    Failure,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        self == Status::Success
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        self == Status::Failure
    }

    #[inline]
    pub fn invert(self) -> Self {
        Self::from_bool(self.is_failure())
    }

    #[inline]
    pub fn from_bool(held: bool) -> Self {
        if held { Status::Success } else { Status::Failure }
    }
}

impl From<bool> for Status {
    fn from(held: bool) -> Self {
        Self::from_bool(held)
    }
}
