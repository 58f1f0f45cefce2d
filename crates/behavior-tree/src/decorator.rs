//! Single-child wrappers.

use crate::{Behavior, Status};

/// Negates a guard: ticks the wrapped node and flips success and failure.
///
/// Writes made by the wrapped node are kept, so wrap conditions rather than
/// actions unless the write is wanted either way.
pub struct Inverter<C> {
    inner: Box<dyn Behavior<C>>,
}

impl<C> Inverter<C> {
    pub fn new(inner: Box<dyn Behavior<C>>) -> Self {
        Self { inner }
    }
}

impl<C> Behavior<C> for Inverter<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        self.inner.tick(ctx).invert()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Condition;

    struct Gauge {
        health_pct: u32,
    }

    fn wounded() -> Box<dyn Behavior<Gauge>> {
        Box::new(Condition::new(|g: &Gauge| g.health_pct < 30))
    }

    #[test]
    fn healthy_gauge_passes_the_negated_guard() {
        let not_wounded = Inverter::new(wounded());

        let mut gauge = Gauge { health_pct: 80 };
        assert_eq!(not_wounded.tick(&mut gauge), Status::Success);
    }

    #[test]
    fn wounded_gauge_fails_the_negated_guard() {
        let not_wounded = Inverter::new(wounded());

        let mut gauge = Gauge { health_pct: 10 };
        assert_eq!(not_wounded.tick(&mut gauge), Status::Failure);
    }
}
