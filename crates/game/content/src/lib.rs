//! On-disk CodeQuest content.
//!
//! Balance tables come from TOML (partial files keep defaults for whatever
//! they omit) and spell and item catalogs from RON. The loaded catalogs
//! implement the core registry traits and reach the rules only through
//! [`GameEnv`](codequest_core::GameEnv), never through battle state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, ItemFile, ItemLoader, LoadResult, LoadedContent, SpellFile,
    SpellLoader,
};
