//! Content factory for building a game environment from data files.

use std::path::{Path, PathBuf};

use codequest_core::inventory::ItemCatalog;
use codequest_core::spell::SpellCatalog;
use codequest_core::{BalanceConfig, GameEnv};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult, SpellLoader};

/// Reads every content file from one data directory.
///
/// # Layout
///
/// ```text
/// data_dir/
/// ├── balance.toml
/// ├── spells.ron
/// └── items.ron
/// ```
///
/// Every file is optional; a missing one falls back to the built-in content.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `balance.toml`, or the default tables when absent.
    pub fn load_balance(&self) -> LoadResult<BalanceConfig> {
        Ok(self
            .load_optional("balance.toml", ConfigLoader::load)?
            .unwrap_or_default())
    }

    pub fn load_spells(&self) -> LoadResult<Option<SpellCatalog>> {
        self.load_optional("spells.ron", SpellLoader::load)
    }

    pub fn load_items(&self) -> LoadResult<Option<ItemCatalog>> {
        self.load_optional("items.ron", ItemLoader::load)
    }

    fn load_optional<T>(
        &self,
        file_name: &str,
        load: impl FnOnce(&Path) -> LoadResult<T>,
    ) -> LoadResult<Option<T>> {
        let path = self.data_dir.join(file_name);
        if !path.exists() {
            tracing::debug!(target: "content", file = file_name, "not present, using built-ins");
            return Ok(None);
        }
        load(&path).map(Some)
    }

    pub fn load_all(&self) -> LoadResult<LoadedContent> {
        Ok(LoadedContent {
            balance: self.load_balance()?,
            spells: self.load_spells()?,
            items: self.load_items()?,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Everything [`ContentFactory::load_all`] read.
#[derive(Clone, Debug, Default)]
pub struct LoadedContent {
    pub balance: BalanceConfig,
    /// `None` keeps the built-in spells.
    pub spells: Option<SpellCatalog>,
    /// `None` keeps the built-in items.
    pub items: Option<ItemCatalog>,
}

impl LoadedContent {
    /// Environment borrowing this content, built-ins filling any gaps.
    pub fn env(&self) -> GameEnv<'_> {
        let mut env = GameEnv::with_balance(&self.balance);
        if let Some(spells) = &self.spells {
            env = env.with_spells(spells);
        }
        if let Some(items) = &self.items {
            env = env.with_items(items);
        }
        env
    }
}
