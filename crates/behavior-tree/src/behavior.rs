//! The node trait.

use crate::Status;

/// One node of a decision tree, evaluated against a blackboard `C`.
///
/// Conditions only read the blackboard; actions write their decision into it.
/// A node holds no mutable state of its own, so ticking the same tree against
/// equal blackboards always yields the same status and the same writes.
pub trait Behavior<C>: Send + Sync {
    fn tick(&self, ctx: &mut C) -> Status;
}

impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(Status);

    impl Behavior<Vec<Status>> for Always {
        fn tick(&self, log: &mut Vec<Status>) -> Status {
            log.push(self.0);
            self.0
        }
    }

    #[test]
    fn boxed_nodes_forward_to_the_inner_node() {
        let node: Box<dyn Behavior<Vec<Status>>> = Box::new(Always(Status::Failure));
        let mut log = Vec::new();

        assert_eq!(node.tick(&mut log), Status::Failure);
        assert_eq!(log, vec![Status::Failure]);
    }
}
