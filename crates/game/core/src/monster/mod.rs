//! Monster templates and the factory that scales them.
//!
//! Every constructor threads an [`RngState`](crate::env::RngState): a name
//! draw for severities 2 and up, then an id draw. Monsters created along one
//! RNG lineage therefore never share an id.

mod factory;
mod templates;

pub use factory::{
    bug_type_for_language, create_monster, generate_boss, generate_bug_monster,
    generate_miniboss, generate_random_bug, infer_bug_type, infer_severity, loot_table,
};
pub use templates::{BuiltinTemplates, MonsterTemplate, MonsterTemplates};
