//! Builder utilities for ergonomic behavior tree construction.
//!
//! Instead of writing `Box::new(Sequence::new(vec![...]))`, decision tables
//! read as nested calls: `selector(vec![guard(cond, act), action(fallback)])`.

use crate::{Action, Behavior, Condition, Inverter, Selector, Sequence, Status};

/// Creates a sequence node.
///
/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(children))
}

/// Creates a selector node.
///
/// Shorthand for `Box::new(Selector::new(children))`.
#[inline]
pub fn selector<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Selector::new(children))
}

/// Creates an inverter node.
///
/// Shorthand for `Box::new(Inverter::new(child))`.
#[inline]
pub fn inverter<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(Inverter::new(child))
}

/// Creates a condition leaf from a predicate.
#[inline]
pub fn condition<C, F>(predicate: F) -> Box<dyn Behavior<C>>
where
    C: 'static,
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    Box::new(Condition::new(predicate))
}

/// Creates an action leaf from a closure.
#[inline]
pub fn action<C, F>(run: F) -> Box<dyn Behavior<C>>
where
    C: 'static,
    F: Fn(&mut C) -> Status + Send + Sync + 'static,
{
    Box::new(Action::new(run))
}

/// Runs `then` only when `when` succeeds.
///
/// Shorthand for `sequence(vec![when, then])`, the usual shape of one row
/// in a decision table.
#[inline]
pub fn guard<C: 'static>(
    when: Box<dyn Behavior<C>>,
    then: Box<dyn Behavior<C>>,
) -> Box<dyn Behavior<C>> {
    sequence(vec![when, then])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Blackboard {
        roll: u32,
        choice: Option<&'static str>,
    }

    fn pick(label: &'static str) -> Box<dyn Behavior<Blackboard>> {
        action(move |ctx: &mut Blackboard| {
            ctx.choice = Some(label);
            Status::Success
        })
    }

    #[test]
    fn guarded_rows_fall_through_in_order() {
        let table = selector(vec![
            guard(condition(|ctx: &Blackboard| ctx.roll < 10), pick("low")),
            guard(condition(|ctx: &Blackboard| ctx.roll < 50), pick("mid")),
            pick("high"),
        ]);

        for (roll, expected) in [(3, "low"), (30, "mid"), (90, "high")] {
            let mut ctx = Blackboard { roll, ..Default::default() };
            assert!(table.tick(&mut ctx).is_success());
            assert_eq!(ctx.choice, Some(expected));
        }
    }

    #[test]
    fn inverted_guard_blocks_when_flag_set() {
        let table = guard(
            inverter(condition(|ctx: &Blackboard| ctx.roll == 0)),
            pick("acted"),
        );

        let mut ctx = Blackboard::default();
        assert!(table.tick(&mut ctx).is_failure());
        assert_eq!(ctx.choice, None);
    }
}
