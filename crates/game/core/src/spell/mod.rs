//! Spells: definitions, registries, and symbol-driven generation.
//!
//! Spells are immutable and registry-resident. Characters and monsters only
//! hold spell ids; the engine resolves them through a [`SpellRegistry`]
//! injected by reference, so tests can swap in their own catalog.

mod builtin;
mod generate;
mod registry;

pub use builtin::BuiltinSpells;
pub use generate::{SpellModifier, SpellShape, SpellSymbol, generate_spell};
pub use registry::{SpellCatalog, SpellRegistry};

use crate::state::Element;

/// What a spell does when resolved.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SpellEffectKind {
    Damage,
    AoeDamage,
    Heal,
    Shield,
    Buff,
    Debuff,
    Dot,
    Cleanse,
    Revive,
    Taunt,
}

/// Who a spell lands on, relative to the caster.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SpellTarget {
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    #[strum(serialize = "self")]
    SelfCast,
    Enemy,
    AllEnemies,
    AllAllies,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellEffect {
    pub kind: SpellEffectKind,
    pub target: SpellTarget,
    pub value: i32,
    /// Turns the resulting status lasts; `None` means the kind's default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<u32>,
}

impl SpellEffect {
    pub const fn new(kind: SpellEffectKind, target: SpellTarget, value: i32) -> Self {
        Self {
            kind,
            target,
            value,
            duration: None,
        }
    }

    #[must_use]
    pub const fn lasting(mut self, turns: u32) -> Self {
        self.duration = Some(turns);
        self
    }

    /// Duration, falling back to `default` when unset.
    pub fn duration_or(&self, default: u32) -> u32 {
        self.duration.unwrap_or(default)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spell {
    pub id: String,
    pub name: String,
    pub description: String,
    pub mana_cost: i32,
    /// Turns before the spell can be cast again.
    pub cooldown: u32,
    pub element: Element,
    pub effect: SpellEffect,
}

impl Spell {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mana_cost: i32,
        cooldown: u32,
        element: Element,
        effect: SpellEffect,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            mana_cost,
            cooldown,
            element,
            effect,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
