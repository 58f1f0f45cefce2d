//! Vocabulary shared by characters, monsters, and spells.

use core::fmt;

use crate::config::GameConfig;

/// Combat stats shared by characters and monsters.
///
/// `health`/`mana` are current pools; the `max_*` fields cap them. Monsters
/// carry zero mana.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub health: i32,
    pub max_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

impl Stats {
    /// True while health is above zero.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Current health as a fraction of the maximum.
    pub fn health_ratio(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        f64::from(self.health) / f64::from(self.max_health)
    }

    /// Adds `delta` to health, clamped to `[0, max_health]`.
    ///
    /// Returns the change actually applied.
    pub fn apply_health_delta(&mut self, delta: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + delta).clamp(0, self.max_health);
        self.health - before
    }

    /// Adds `delta` to mana, clamped to `[0, max_mana]`.
    ///
    /// Returns the change actually applied.
    pub fn apply_mana_delta(&mut self, delta: i32) -> i32 {
        let before = self.mana;
        self.mana = (self.mana + delta).clamp(0, self.max_mana);
        self.mana - before
    }
}

/// Playable class.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum CharacterClass {
    /// Infrastructure developer: high health and defense.
    Tank,
    /// Bug fixer: large mana pool, support spells.
    Healer,
    /// Feature developer: high attack, fragile.
    Dps,
}

/// Elemental affinity of a spell or monster.
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
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    /// Neutral; always a 1.0 multiplier in both directions.
    #[default]
    None,
}

impl Element {
    /// Chart order used by [`crate::config::ElementConfig`].
    pub const ALL: [Element; 5] = [
        Element::Fire,
        Element::Water,
        Element::Earth,
        Element::Air,
        Element::None,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Element::Fire => 0,
            Element::Water => 1,
            Element::Earth => 2,
            Element::Air => 3,
            Element::None => 4,
        }
    }
}

/// Monster archetype; selects base stats, element, spells, and AI table.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum BugType {
    NullPointer,
    MemoryLeak,
    RaceCondition,
    OffByOne,
}

/// Monster severity, always within `1..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Severity(u8);

impl Severity {
    pub const MIN: Self = Self(GameConfig::MIN_SEVERITY);
    pub const MAX: Self = Self(GameConfig::MAX_SEVERITY);

    /// Builds a severity, clamping out-of-range values into `1..=5`.
    pub const fn clamped(value: i64) -> Self {
        let min = GameConfig::MIN_SEVERITY as i64;
        let max = GameConfig::MAX_SEVERITY as i64;
        let clamped = if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        };
        Self(clamped as u8)
    }

    /// Builds a severity, rejecting out-of-range values.
    pub const fn new(value: u8) -> Option<Self> {
        if value >= GameConfig::MIN_SEVERITY && value <= GameConfig::MAX_SEVERITY {
            Some(Self(value))
        } else {
            None
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Every severity from lowest to highest.
    pub fn all() -> impl Iterator<Item = Severity> {
        (GameConfig::MIN_SEVERITY..=GameConfig::MAX_SEVERITY).map(Severity)
    }
}

impl TryFrom<u8> for Severity {
    type Error = SeverityOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(SeverityOutOfRange(value))
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejected severity value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("severity {0} is outside 1..=5")]
pub struct SeverityOutOfRange(pub u8);

/// Sequential string identifiers (`quest-1`, `quest-2`, …).
///
/// Owned by whoever generates the entities, so generation stays a pure
/// function of its inputs plus this counter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdSequence {
    prefix: String,
    next: u32,
}

impl IdSequence {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// Returns the next identifier and advances the counter.
    pub fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }

    /// Number the next identifier will carry.
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Restarts numbering at 1.
    pub fn reset(&mut self) {
        self.next = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_clamps_into_range() {
        assert_eq!(Severity::clamped(0).get(), 1);
        assert_eq!(Severity::clamped(3).get(), 3);
        assert_eq!(Severity::clamped(12).get(), 5);
        assert!(Severity::new(6).is_none());
        assert_eq!(Severity::all().count(), 5);
    }

    #[test]
    fn enum_tags_are_kebab_case() {
        assert_eq!(BugType::NullPointer.to_string(), "null-pointer");
        assert_eq!("race-condition".parse::<BugType>(), Ok(BugType::RaceCondition));
        assert_eq!(Element::None.as_ref(), "none");
        assert_eq!("DPS".parse::<CharacterClass>(), Ok(CharacterClass::Dps));
    }

    #[test]
    fn health_delta_is_clamped() {
        let mut stats = Stats { health: 10, max_health: 20, ..Default::default() };
        assert_eq!(stats.apply_health_delta(50), 10);
        assert_eq!(stats.apply_health_delta(-100), -20);
        assert!(!stats.is_alive());
    }

    #[test]
    fn id_sequence_counts_from_one_and_resets() {
        let mut ids = IdSequence::new("quest");
        assert_eq!(ids.next_id(), "quest-1");
        assert_eq!(ids.next_id(), "quest-2");
        ids.reset();
        assert_eq!(ids.next_id(), "quest-1");
    }
}
