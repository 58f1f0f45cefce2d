//! Inventory slots, item use, and loot resolution.
//!
//! Slots hold distinct item ids; quantities stack within a slot without
//! limit. Capacity only bounds the number of distinct ids.

mod items;

pub use items::{
    BuiltinItems, Item, ItemCatalog, ItemEffect, ItemEffectKind, ItemKind, ItemRegistry,
};

use crate::config::GameConfig;
use crate::env::{RngState, rng};
use crate::state::{ApplyOutcome, Character, LootEntry, StatusEffect, StatusKind};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySlot {
    pub item_id: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    pub slots: Vec<InventorySlot>,
    pub max_slots: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_INVENTORY_SLOTS)
    }
}

impl Inventory {
    pub fn new(max_slots: usize) -> Self {
        Self {
            slots: Vec::new(),
            max_slots,
        }
    }

    fn slot_index(&self, item_id: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.item_id == item_id)
    }

    /// Adds `quantity` of an item.
    ///
    /// Stacks onto an existing slot, otherwise opens a new one. When every
    /// slot is taken by other items the addition is dropped; returns whether
    /// anything was stored.
    pub fn add_item(&mut self, item_id: &str, quantity: u32) -> bool {
        if let Some(index) = self.slot_index(item_id) {
            self.slots[index].quantity += quantity;
            return true;
        }
        if self.slots.len() >= self.max_slots {
            return false;
        }
        self.slots.push(InventorySlot {
            item_id: item_id.to_string(),
            quantity,
        });
        true
    }

    /// Removes `quantity` of an item, dropping the slot at zero.
    ///
    /// Removing more than is held changes nothing and returns `false`.
    pub fn remove_item(&mut self, item_id: &str, quantity: u32) -> bool {
        let Some(index) = self.slot_index(item_id) else {
            return false;
        };
        let slot = &mut self.slots[index];
        if slot.quantity < quantity {
            return false;
        }
        slot.quantity -= quantity;
        if slot.quantity == 0 {
            self.slots.remove(index);
        }
        true
    }

    pub fn has_item(&self, item_id: &str, quantity: u32) -> bool {
        self.item_count(item_id) >= quantity
    }

    pub fn item_count(&self, item_id: &str) -> u32 {
        self.slot_index(item_id)
            .map_or(0, |index| self.slots[index].quantity)
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.max_slots
    }
}

// ============================================================================
// Item use
// ============================================================================

/// What using an item did to the character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemOutcome {
    /// HP actually restored after clamping.
    Healed(i32),
    /// Mana actually restored after clamping.
    ManaRestored(i32),
    Buffed {
        kind: StatusKind,
        value: i32,
        duration: u32,
        applied: ApplyOutcome,
    },
    Cleansed(Vec<StatusEffect>),
    /// Unknown id or not a consumable; nothing changed.
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemUse {
    pub consumed: bool,
    pub log: String,
    pub outcome: ItemOutcome,
}

impl ItemUse {
    fn rejected(log: String) -> Self {
        Self {
            consumed: false,
            log,
            outcome: ItemOutcome::Rejected,
        }
    }
}

/// Applies a consumable to a character.
///
/// Unknown ids and non-consumables leave the character untouched and report
/// `consumed == false`. Inventory bookkeeping is the caller's job.
pub fn use_item(character: &mut Character, item_id: &str, items: &dyn ItemRegistry) -> ItemUse {
    let Some(item) = items.item(item_id) else {
        return ItemUse::rejected(format!("Unknown item: {item_id}"));
    };
    if item.kind != ItemKind::Consumable {
        return ItemUse::rejected(format!("{} is not a consumable!", item.name));
    }

    let who = &character.name;
    let (log, outcome) = match item.effect.kind {
        ItemEffectKind::HealHp => {
            let healed = character.stats.apply_health_delta(item.effect.value);
            (
                format!("{who} uses {}, restoring {healed} HP", item.name),
                ItemOutcome::Healed(healed),
            )
        }
        ItemEffectKind::HealMana => {
            let restored = character.stats.apply_mana_delta(item.effect.value);
            (
                format!("{who} uses {}, restoring {restored} mana", item.name),
                ItemOutcome::ManaRestored(restored),
            )
        }
        ItemEffectKind::BuffAttack | ItemEffectKind::BuffDefense => {
            let (kind, label) = if item.effect.kind == ItemEffectKind::BuffAttack {
                (StatusKind::AttackUp, "ATK")
            } else {
                (StatusKind::DefenseUp, "DEF")
            };
            let value = item.effect.value;
            let duration = item.effect.buff_turns();
            let applied = character
                .effects
                .apply(StatusEffect::new(kind, item.name.clone(), value, duration));
            (
                format!("{who} uses {}, {label} +{value} for {duration} turns", item.name),
                ItemOutcome::Buffed {
                    kind,
                    value,
                    duration,
                    applied,
                },
            )
        }
        ItemEffectKind::Cleanse => {
            let removed = character.effects.cleanse();
            (
                format!("{who} uses {}, all debuffs removed!", item.name),
                ItemOutcome::Cleansed(removed),
            )
        }
    };

    ItemUse {
        consumed: true,
        log,
        outcome,
    }
}

// ============================================================================
// Loot
// ============================================================================

/// Rolls one independent draw per loot entry.
///
/// A chance of `1.0` always drops and `0.0` never does; the RNG advances
/// once per entry either way.
pub fn resolve_loot(table: &[LootEntry], mut state: RngState) -> (Vec<String>, RngState) {
    let mut drops = Vec::new();
    for entry in table {
        let (hit, next) = rng::chance(entry.chance, state);
        state = next;
        if hit {
            drops.push(entry.item_id.clone());
        }
    }
    (drops, state)
}

/// Rolls loot and stores every drop in `inventory`.
///
/// Returns the dropped ids, including any that did not fit.
pub fn resolve_loot_into(
    table: &[LootEntry],
    inventory: &mut Inventory,
    state: RngState,
) -> (Vec<String>, RngState) {
    let (drops, state) = resolve_loot(table, state);
    for item_id in &drops {
        inventory.add_item(item_id, 1);
    }
    (drops, state)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::state::{CharacterClass, StatusEffects, Stats};

    fn hero() -> Character {
        Character {
            id: "char-1".into(),
            name: "Ada".into(),
            class: CharacterClass::Dps,
            level: 1,
            experience: 50,
            stats: Stats {
                health: 40,
                max_health: 80,
                mana: 70,
                max_mana: 75,
                attack: 15,
                defense: 5,
                speed: 7,
            },
            spells: Vec::new(),
            effects: StatusEffects::empty(),
            cooldowns: BTreeMap::new(),
        }
    }

    #[test]
    fn add_stacks_and_respects_capacity() {
        let mut inventory = Inventory::new(2);
        assert!(inventory.add_item("item-debug-log", 1));
        assert!(inventory.add_item("item-debug-log", 2));
        assert!(inventory.add_item("item-core-dump", 1));
        assert!(!inventory.add_item("item-caffeine", 1));

        assert_eq!(inventory.item_count("item-debug-log"), 3);
        assert_eq!(inventory.slots.len(), 2);
        assert!(inventory.add_item("item-core-dump", 4));
        assert_eq!(inventory.item_count("item-core-dump"), 5);
    }

    #[test]
    fn remove_more_than_held_is_a_no_op() {
        let mut inventory = Inventory::default();
        inventory.add_item("item-debug-log", 2);

        assert!(!inventory.remove_item("item-debug-log", 3));
        assert_eq!(inventory.item_count("item-debug-log"), 2);

        assert!(inventory.remove_item("item-debug-log", 2));
        assert!(inventory.slots.is_empty());
        assert!(!inventory.has_item("item-debug-log", 1));
    }

    #[test]
    fn healing_items_clamp_to_max() {
        let mut character = hero();
        let used = use_item(&mut character, "item-pair-programming", &BuiltinItems);
        assert!(used.consumed);
        assert_eq!(used.outcome, ItemOutcome::Healed(40));
        assert_eq!(used.log, "Ada uses Pair Programming Session, restoring 40 HP");
        assert_eq!(character.stats.health, 80);

        let mana = use_item(&mut character, "item-stack-trace", &BuiltinItems);
        assert_eq!(mana.outcome, ItemOutcome::ManaRestored(5));
    }

    #[test]
    fn buff_items_apply_status() {
        let mut character = hero();
        let used = use_item(&mut character, "item-code-review", &BuiltinItems);
        assert_eq!(used.log, "Ada uses Code Review, DEF +5 for 3 turns");
        assert_eq!(character.effects.stat_modifiers().defense, 5);
    }

    #[test]
    fn unknown_item_changes_nothing() {
        let mut character = hero();
        let before = character.clone();
        let used = use_item(&mut character, "item-missing", &BuiltinItems);
        assert!(!used.consumed);
        assert_eq!(used.outcome, ItemOutcome::Rejected);
        assert_eq!(character, before);
    }

    #[test]
    fn loot_extremes_are_exact() {
        let table = vec![
            LootEntry::new("item-always", 1.0),
            LootEntry::new("item-never", 0.0),
        ];
        let mut state = RngState::from_seed(9);
        for _ in 0..50 {
            let (drops, next) = resolve_loot(&table, state);
            assert_eq!(drops, vec!["item-always".to_string()]);
            state = next;
        }
    }

    #[test]
    fn loot_is_deterministic_per_state() {
        let table = vec![
            LootEntry::new("item-debug-log", 0.5),
            LootEntry::new("item-stack-trace", 0.3),
            LootEntry::new("item-core-dump", 0.2),
        ];
        let seed = RngState::from_seed(1234);
        let (a, rng_a) = resolve_loot(&table, seed.clone());
        let (b, rng_b) = resolve_loot(&table, seed);
        assert_eq!(a, b);
        assert_eq!(rng_a, rng_b);
    }
}
