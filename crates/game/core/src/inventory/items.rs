//! Item definitions and registries.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::env::RegistryError;

/// Broad item category. Only consumables can be used.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ItemKind {
    Consumable,
    Equipment,
    Knowledge,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ItemEffectKind {
    HealHp,
    HealMana,
    BuffAttack,
    BuffDefense,
    Cleanse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemEffect {
    pub kind: ItemEffectKind,
    pub value: i32,
    /// Buff duration; defaults to 3 turns when unset.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<u32>,
}

impl ItemEffect {
    pub const DEFAULT_BUFF_TURNS: u32 = 3;

    pub const fn new(kind: ItemEffectKind, value: i32) -> Self {
        Self {
            kind,
            value,
            duration: None,
        }
    }

    #[must_use]
    pub const fn lasting(mut self, turns: u32) -> Self {
        self.duration = Some(turns);
        self
    }

    pub fn buff_turns(&self) -> u32 {
        self.duration.unwrap_or(Self::DEFAULT_BUFF_TURNS)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    pub effect: ItemEffect,
}

impl Item {
    pub fn consumable(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        effect: ItemEffect,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            kind: ItemKind::Consumable,
            effect,
        }
    }
}

/// Read-only item lookup.
pub trait ItemRegistry: Send + Sync {
    fn item(&self, id: &str) -> Option<&Item>;

    /// Every registered item in registration order.
    fn all_items(&self) -> Vec<&Item>;

    fn item_or_err(&self, id: &str) -> Result<&Item, RegistryError> {
        self.item(id)
            .ok_or_else(|| RegistryError::UnknownItem(id.to_string()))
    }
}

/// Owned item registry. Later registrations of an id replace earlier ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemCatalog {
    items: Vec<Item>,
    index: BTreeMap<String, usize>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, item: Item) {
        match self.index.get(&item.id) {
            Some(&slot) => self.items[slot] = item,
            None => {
                self.index.insert(item.id.clone(), self.items.len());
                self.items.push(item);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Item> for ItemCatalog {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for item in iter {
            catalog.register(item);
        }
        catalog
    }
}

impl From<Vec<Item>> for ItemCatalog {
    fn from(items: Vec<Item>) -> Self {
        items.into_iter().collect()
    }
}

impl ItemRegistry for ItemCatalog {
    fn item(&self, id: &str) -> Option<&Item> {
        self.index.get(id).map(|&slot| &self.items[slot])
    }

    fn all_items(&self) -> Vec<&Item> {
        self.items.iter().collect()
    }
}

/// The ten shipped consumables.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinItems;

impl BuiltinItems {
    pub fn catalog() -> &'static ItemCatalog {
        &BUILTIN
    }
}

impl ItemRegistry for BuiltinItems {
    fn item(&self, id: &str) -> Option<&Item> {
        BUILTIN.item(id)
    }

    fn all_items(&self) -> Vec<&Item> {
        BUILTIN.all_items()
    }
}

static BUILTIN: LazyLock<ItemCatalog> = LazyLock::new(|| {
    use ItemEffectKind::*;

    [
        ("item-debug-log", "Debug Log", "A scrap of console output. Restores a little HP.", ItemEffect::new(HealHp, 20)),
        ("item-stack-trace", "Stack Trace", "Points at the fault. Restores mana.", ItemEffect::new(HealMana, 25)),
        ("item-core-dump", "Core Dump", "Everything at the moment of the crash. Restores a lot of HP.", ItemEffect::new(HealHp, 50)),
        ("item-memory-snapshot", "Memory Snapshot", "A full heap image. Restores HP.", ItemEffect::new(HealHp, 35)),
        ("item-root-cause", "Root Cause Analysis", "The real reason. Attack up for a while.", ItemEffect::new(BuffAttack, 5).lasting(5)),
        ("item-caffeine", "Caffeine Boost", "Strong coffee. Attack up briefly.", ItemEffect::new(BuffAttack, 3).lasting(3)),
        ("item-rubber-duck", "Rubber Duck", "Explain it to the duck. Removes every debuff.", ItemEffect::new(Cleanse, 0)),
        ("item-energy-drink", "Energy Drink", "Too much caffeine. Restores a lot of mana.", ItemEffect::new(HealMana, 50)),
        ("item-code-review", "Code Review", "A second pair of eyes. Defense up briefly.", ItemEffect::new(BuffDefense, 5).lasting(3)),
        ("item-pair-programming", "Pair Programming Session", "Two people, one keyboard. Restores a huge amount of HP.", ItemEffect::new(HealHp, 100)),
    ]
    .into_iter()
    .map(|(id, name, description, effect)| Item::consumable(id, name, description, effect))
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_ten_consumables() {
        let items = BuiltinItems.all_items();
        assert_eq!(items.len(), 10);
        assert!(items.iter().all(|i| i.kind == ItemKind::Consumable));
    }

    #[test]
    fn lookup_by_id() {
        let duck = BuiltinItems.item("item-rubber-duck").unwrap();
        assert_eq!(duck.effect.kind, ItemEffectKind::Cleanse);
        assert_eq!(
            BuiltinItems.item_or_err("item-nope"),
            Err(RegistryError::UnknownItem("item-nope".into()))
        );
    }
}
