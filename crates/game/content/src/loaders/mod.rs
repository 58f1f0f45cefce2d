//! File readers for balance tables (TOML) and spell and item catalogs (RON).
//!
//! Each loader yields the core type directly, ready to be borrowed by a
//! [`GameEnv`](codequest_core::GameEnv).

pub mod config;
pub mod factory;
pub mod item;
pub mod spell;

pub use config::ConfigLoader;
pub use factory::{ContentFactory, LoadedContent};
pub use item::{ItemFile, ItemLoader};
pub use spell::{SpellFile, SpellLoader};

use std::path::Path;

use anyhow::Context;

pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
