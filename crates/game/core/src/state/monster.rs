use super::{BugType, Element, Severity, StatusEffects, Stats};

/// Encounter tier of a monster.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum MonsterRank {
    #[default]
    Normal,
    Miniboss,
    Boss,
}

impl MonsterRank {
    /// Name suffix shown for elevated ranks.
    pub const fn marker(self) -> Option<&'static str> {
        match self {
            MonsterRank::Normal => None,
            MonsterRank::Miniboss => Some("[MINIBOSS]"),
            MonsterRank::Boss => Some("[BOSS]"),
        }
    }

    /// Bosses and minibosses share the elevated decision table.
    pub const fn is_elevated(self) -> bool {
        !matches!(self, MonsterRank::Normal)
    }
}

/// One line of a loot table: an item and its independent drop chance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item_id: String,
    /// Probability in `[0, 1]`.
    pub chance: f64,
}

impl LootEntry {
    pub fn new(item_id: impl Into<String>, chance: f64) -> Self {
        Self {
            item_id: item_id.into(),
            chance,
        }
    }
}

/// A bug monster.
///
/// Immutable template until a battle starts; afterwards its stats and
/// effects evolve like the player's.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub id: String,
    pub name: String,
    pub bug_type: BugType,
    pub element: Element,
    pub severity: Severity,
    pub stats: Stats,
    pub spells: Vec<String>,
    pub effects: StatusEffects,
    pub xp_reward: u32,
    pub loot_table: Vec<LootEntry>,
    /// Commit hash the monster was spawned from, for bug encounters.
    pub source_commit: Option<String>,
    /// File path the monster guards, for boss and miniboss encounters.
    pub source_file: Option<String>,
    pub rank: MonsterRank,
    /// Set once an elevated monster has used its one-time ultimate.
    pub ultimate_used: bool,
}

impl Monster {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn is_boss(&self) -> bool {
        self.rank == MonsterRank::Boss
    }
}
