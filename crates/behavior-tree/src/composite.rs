//! Multi-child nodes.
//!
//! An enemy decision table is a [`Selector`] of rows; each row is a
//! [`Sequence`] of guard and action.

use crate::{Behavior, Status};

/// All-of: stops at the first failing child.
pub struct Sequence<C> {
    steps: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    /// # Panics
    ///
    /// An empty sequence would succeed vacuously, so it is rejected.
    pub fn new(steps: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(!steps.is_empty(), "sequence needs at least one step");
        Self { steps }
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool(self.steps.iter().all(|step| step.tick(ctx).is_success()))
    }
}

/// First-match: tries rows in priority order and stops at the first one that
/// succeeds, like an if/else-if chain.
pub struct Selector<C> {
    rows: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    /// # Panics
    ///
    /// Panics on an empty row list.
    pub fn new(rows: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(!rows.is_empty(), "selector needs at least one row");
        Self { rows }
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool(self.rows.iter().any(|row| row.tick(ctx).is_success()))
    }
}
