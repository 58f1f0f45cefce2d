//! Player actions and the availability mask.

use bitflags::bitflags;

use crate::spell::SpellRegistry;
use crate::state::{BattlePhase, BattleState};

/// An action submitted by the player during `PlayerTurn`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum BattleAction {
    /// Basic attack. A dead or missing target falls back to the first living enemy.
    Attack { target: usize },
    CastSpell { spell_id: String, target: usize },
    Defend,
    UseItem { item_id: String },
}

impl BattleAction {
    pub fn attack(target: usize) -> Self {
        Self::Attack { target }
    }

    pub fn cast(spell_id: impl Into<String>, target: usize) -> Self {
        Self::CastSpell {
            spell_id: spell_id.into(),
            target,
        }
    }

    pub fn use_item(item_id: impl Into<String>) -> Self {
        Self::UseItem {
            item_id: item_id.into(),
        }
    }
}

bitflags! {
    /// Action categories the player may currently choose from.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActionMask: u8 {
        const ATTACK     = 1 << 0;
        const CAST_SPELL = 1 << 1;
        const DEFEND     = 1 << 2;
        const USE_ITEM   = 1 << 3;
    }
}

/// What the player can do right now.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvailableActions {
    pub mask: ActionMask,
    /// Known spells that are affordable and off cooldown, in learned order.
    pub spells: Vec<String>,
}

impl AvailableActions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn can_attack(&self) -> bool {
        self.mask.contains(ActionMask::ATTACK)
    }

    pub fn can_defend(&self) -> bool {
        self.mask.contains(ActionMask::DEFEND)
    }

    pub fn can_use_item(&self) -> bool {
        self.mask.contains(ActionMask::USE_ITEM)
    }

    pub fn can_cast(&self, spell_id: &str) -> bool {
        self.spells.iter().any(|s| s == spell_id)
    }
}

/// Lists the player's options.
///
/// Empty outside `PlayerTurn` and while the player is stunned.
pub fn available_actions(state: &BattleState, spells: &dyn SpellRegistry) -> AvailableActions {
    if state.phase != BattlePhase::PlayerTurn || state.player.effects.is_stunned() {
        return AvailableActions::none();
    }

    let player = &state.player;
    let castable: Vec<String> = player
        .spells
        .iter()
        .filter(|id| {
            spells.spell(id).is_some_and(|spell| {
                spell.mana_cost <= player.stats.mana && player.cooldown(id) == 0
            })
        })
        .cloned()
        .collect();

    let mut mask = ActionMask::ATTACK | ActionMask::DEFEND | ActionMask::USE_ITEM;
    if !castable.is_empty() {
        mask |= ActionMask::CAST_SPELL;
    }

    AvailableActions {
        mask,
        spells: castable,
    }
}
