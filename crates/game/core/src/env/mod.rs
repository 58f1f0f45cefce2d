//! Read-only content and randomness.
//!
//! Registries expose spells, items, and monster templates. [`GameEnv`]
//! bundles them with the balance tables so every rule function can reach
//! the data it needs without ambient globals.
mod error;
pub mod rng;

pub use error::RegistryError;
pub use rng::RngState;

use std::sync::LazyLock;

use crate::config::BalanceConfig;
use crate::inventory::{BuiltinItems, ItemRegistry};
use crate::monster::{BuiltinTemplates, MonsterTemplates};
use crate::spell::{BuiltinSpells, SpellRegistry};

static DEFAULT_BALANCE: LazyLock<BalanceConfig> = LazyLock::new(BalanceConfig::default);

/// Aggregates the registries and balance tables used by the rules.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    spells: &'a dyn SpellRegistry,
    items: &'a dyn ItemRegistry,
    monsters: &'a dyn MonsterTemplates,
    balance: &'a BalanceConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        spells: &'a dyn SpellRegistry,
        items: &'a dyn ItemRegistry,
        monsters: &'a dyn MonsterTemplates,
        balance: &'a BalanceConfig,
    ) -> Self {
        Self {
            spells,
            items,
            monsters,
            balance,
        }
    }

    /// Built-in content with the supplied balance tables.
    pub fn with_balance(balance: &'a BalanceConfig) -> Self {
        Self::new(&BuiltinSpells, &BuiltinItems, &BuiltinTemplates, balance)
    }

    /// Replaces the spell registry (builder pattern).
    #[must_use]
    pub fn with_spells(mut self, spells: &'a dyn SpellRegistry) -> Self {
        self.spells = spells;
        self
    }

    /// Replaces the item registry (builder pattern).
    #[must_use]
    pub fn with_items(mut self, items: &'a dyn ItemRegistry) -> Self {
        self.items = items;
        self
    }

    #[inline]
    pub fn spells(&self) -> &'a dyn SpellRegistry {
        self.spells
    }

    #[inline]
    pub fn items(&self) -> &'a dyn ItemRegistry {
        self.items
    }

    #[inline]
    pub fn monsters(&self) -> &'a dyn MonsterTemplates {
        self.monsters
    }

    #[inline]
    pub fn balance(&self) -> &'a BalanceConfig {
        self.balance
    }
}

impl GameEnv<'static> {
    /// Built-in content with the default balance.
    pub fn builtin() -> Self {
        Self::with_balance(&DEFAULT_BALANCE)
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("spells", &self.spells.all_spells().len())
            .field("items", &self.items.all_items().len())
            .field("balance", self.balance)
            .finish_non_exhaustive()
    }
}
