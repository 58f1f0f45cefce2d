//! Leaf behavior nodes backed by closures.
//!
//! Most decision tables are a handful of predicates and outcomes. Wrapping
//! closures avoids a dedicated struct per rule while keeping every node a
//! plain [`Behavior`].

use core::marker::PhantomData;

use crate::{Behavior, Status};

/// Read-only predicate node.
///
/// Returns `Success` when the predicate holds, `Failure` otherwise. A
/// condition never mutates the context.
pub struct Condition<C, F> {
    predicate: F,
    _context: PhantomData<fn(&C)>,
}

impl<C, F> Condition<C, F>
where
    F: Fn(&C) -> bool,
{
    /// Creates a condition from a predicate.
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            _context: PhantomData,
        }
    }
}

impl<C, F> Behavior<C> for Condition<C, F>
where
    F: Fn(&C) -> bool + Send + Sync,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool((self.predicate)(ctx))
    }
}

/// Action node that writes its outcome into the context.
pub struct Action<C, F> {
    run: F,
    _context: PhantomData<fn(&mut C)>,
}

impl<C, F> Action<C, F>
where
    F: Fn(&mut C) -> Status,
{
    /// Creates an action from a closure.
    pub fn new(run: F) -> Self {
        Self {
            run,
            _context: PhantomData,
        }
    }
}

impl<C, F> Behavior<C> for Action<C, F>
where
    F: Fn(&mut C) -> Status + Send + Sync,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (self.run)(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext {
        value: i32,
    }

    #[test]
    fn condition_reflects_predicate() {
        let positive = Condition::new(|ctx: &TestContext| ctx.value > 0);

        let mut ctx = TestContext { value: 3 };
        assert_eq!(positive.tick(&mut ctx), Status::Success);

        ctx.value = -3;
        assert_eq!(positive.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn action_mutates_context() {
        let double = Action::new(|ctx: &mut TestContext| {
            ctx.value *= 2;
            Status::Success
        });

        let mut ctx = TestContext { value: 4 };
        assert_eq!(double.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 8);
    }
}
