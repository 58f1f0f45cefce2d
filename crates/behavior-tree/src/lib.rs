//! Deterministic behavior trees for one-shot decisions.
//!
//! A tree is ticked once per decision against a caller-owned blackboard and
//! either succeeds or fails before `tick` returns. Nodes are immutable, so
//! all scratch data (including the decision itself) lives in the blackboard.
//!
//! Build trees with the free functions in [`builder`]: [`condition`] and
//! [`action`] leaves, [`sequence`] and [`selector`] composites, [`inverter`],
//! and the [`guard`] shorthand for "if this holds, do that".

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod status;

pub use behavior::Behavior;
pub use builder::{action, condition, guard, inverter, selector, sequence};
pub use composite::{Selector, Sequence};
pub use decorator::Inverter;
pub use leaf::{Action, Condition};
pub use status::Status;
