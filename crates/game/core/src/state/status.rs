//! Timed status effects on a combatant.
//!
//! Effects are stored in a bounded ledger. Each ledger hands out its own
//! sequential [`EffectId`]s, so identifiers are stable across replays without
//! any process-wide counter.
//!
//! # Stacking
//!
//! At most one effect of each [`StatusKind`] lives in the ledger:
//! - stackable: values add up, remaining turns take the maximum
//! - non-stackable: the stronger application wins (new value ≥ current)

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Identifier of an effect, unique within one ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectId(pub u32);

impl core::fmt::Display for EffectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "fx-{}", self.0)
    }
}

/// Kinds of status effects.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum StatusKind {
    // ========================================================================
    // Over time
    // ========================================================================
    /// Loses `value` HP at the start of each turn.
    Poison,
    /// Gains `value` HP at the start of each turn.
    Regen,

    // ========================================================================
    // Defensive
    // ========================================================================
    /// Absorbs up to `value` incoming damage.
    Shield,

    // ========================================================================
    // Crowd control
    // ========================================================================
    /// Cannot act.
    Stun,

    // ========================================================================
    // Stat modifiers
    // ========================================================================
    AttackUp,
    AttackDown,
    DefenseUp,
    DefenseDown,
    SpeedUp,
    SpeedDown,
}

impl StatusKind {
    /// Negative effects are the ones a cleanse strips.
    pub const fn is_negative(self) -> bool {
        matches!(
            self,
            StatusKind::Poison
                | StatusKind::Stun
                | StatusKind::AttackDown
                | StatusKind::DefenseDown
                | StatusKind::SpeedDown
        )
    }
}

/// A single timed effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    /// Assigned by the ledger on application.
    pub id: EffectId,
    /// Display name, usually the spell or item that produced it.
    pub name: String,
    pub kind: StatusKind,
    pub value: i32,
    pub remaining_turns: u32,
    pub stackable: bool,
}

impl StatusEffect {
    /// Creates a non-stackable effect. The id is assigned by [`StatusEffects::apply`].
    pub fn new(kind: StatusKind, name: impl Into<String>, value: i32, duration: u32) -> Self {
        Self {
            id: EffectId::default(),
            name: name.into(),
            kind,
            value,
            remaining_turns: duration,
            stackable: false,
        }
    }

    /// Marks the effect as stackable (builder pattern).
    #[must_use]
    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }
}

/// What [`StatusEffects::apply`] did with an incoming effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Appended as a new entry.
    Added(EffectId),
    /// Merged into the existing stackable entry.
    Stacked(EffectId),
    /// Replaced a weaker non-stackable entry.
    Replaced(EffectId),
    /// Dropped: the existing entry is stronger, or the ledger is full.
    Rejected,
}

impl ApplyOutcome {
    /// Id of the entry that now carries the effect, if any.
    pub fn effect_id(self) -> Option<EffectId> {
        match self {
            Self::Added(id) | Self::Stacked(id) | Self::Replaced(id) => Some(id),
            Self::Rejected => None,
        }
    }
}

/// Result of ticking a ledger at the start of its owner's turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Net HP change: negative for poison, positive for regen.
    pub hp_delta: i32,
    /// One line per damage/heal/stun tick and per expiry.
    pub log: Vec<String>,
    /// Effects that reached zero remaining turns and were removed.
    pub expired: Vec<StatusEffect>,
}

/// Result of routing incoming damage through shields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Absorption {
    pub absorbed: i32,
    /// Damage that passes through to health.
    pub remaining: i32,
}

/// Signed stat deltas summed over all active effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatModifiers {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

/// Bounded ledger of active status effects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
    next_id: u32,
}

impl StatusEffects {
    /// Creates an empty ledger.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Returns the entry of the given kind, if present.
    pub fn find(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    fn allocate_id(&mut self) -> EffectId {
        self.next_id += 1;
        EffectId(self.next_id)
    }

    /// Applies an effect following the stacking rules.
    pub fn apply(&mut self, mut effect: StatusEffect) -> ApplyOutcome {
        if let Some(index) = self.effects.iter().position(|e| e.kind == effect.kind) {
            let existing = &mut self.effects[index];
            if effect.stackable {
                existing.value += effect.value;
                existing.remaining_turns = existing.remaining_turns.max(effect.remaining_turns);
                return ApplyOutcome::Stacked(existing.id);
            }
            if effect.value >= existing.value {
                effect.id = self.allocate_id();
                let id = effect.id;
                self.effects[index] = effect;
                return ApplyOutcome::Replaced(id);
            }
            return ApplyOutcome::Rejected;
        }

        if self.effects.is_full() {
            return ApplyOutcome::Rejected;
        }
        effect.id = self.allocate_id();
        let id = effect.id;
        self.effects.push(effect);
        ApplyOutcome::Added(id)
    }

    /// Removes the effect with the given id.
    pub fn remove(&mut self, id: EffectId) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.id == id)?;
        Some(self.effects.remove(index))
    }

    /// Strips every negative effect, leaving buffs and shields intact.
    ///
    /// Returns the removed effects in ledger order.
    pub fn cleanse(&mut self) -> Vec<StatusEffect> {
        let mut removed = Vec::new();
        let mut kept = ArrayVec::new();
        for effect in self.effects.drain(..) {
            if effect.kind.is_negative() {
                removed.push(effect);
            } else {
                kept.push(effect);
            }
        }
        self.effects = kept;
        removed
    }

    /// Removes every effect. The id sequence keeps counting.
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// True while a stun with turns left is active.
    pub fn is_stunned(&self) -> bool {
        self.effects
            .iter()
            .any(|e| e.kind == StatusKind::Stun && e.remaining_turns > 0)
    }

    /// Total shield HP across all shield entries.
    pub fn shield_hp(&self) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.kind == StatusKind::Shield)
            .map(|e| e.value)
            .sum()
    }

    pub fn stat_modifiers(&self) -> StatModifiers {
        let mut mods = StatModifiers::default();
        for effect in &self.effects {
            match effect.kind {
                StatusKind::AttackUp => mods.attack += effect.value,
                StatusKind::AttackDown => mods.attack -= effect.value,
                StatusKind::DefenseUp => mods.defense += effect.value,
                StatusKind::DefenseDown => mods.defense -= effect.value,
                StatusKind::SpeedUp => mods.speed += effect.value,
                StatusKind::SpeedDown => mods.speed -= effect.value,
                StatusKind::Poison | StatusKind::Regen | StatusKind::Shield | StatusKind::Stun => {}
            }
        }
        mods
    }

    /// Advances every effect by one turn.
    ///
    /// Poison and regen contribute to `hp_delta`; every effect loses a turn
    /// and is removed when none remain. `label` names the owner in log lines.
    pub fn tick(&mut self, label: &str) -> TickReport {
        let mut report = TickReport::default();
        let mut kept = ArrayVec::new();

        for mut effect in self.effects.drain(..) {
            match effect.kind {
                StatusKind::Poison => {
                    report.hp_delta -= effect.value;
                    report
                        .log
                        .push(format!("{label} takes {} poison damage", effect.value));
                }
                StatusKind::Regen => {
                    report.hp_delta += effect.value;
                    report
                        .log
                        .push(format!("{label} regenerates {} HP", effect.value));
                }
                StatusKind::Stun => report.log.push(format!("{label} is stunned!")),
                // Shields are consumed by damage, modifiers are read on demand.
                StatusKind::Shield
                | StatusKind::AttackUp
                | StatusKind::AttackDown
                | StatusKind::DefenseUp
                | StatusKind::DefenseDown
                | StatusKind::SpeedUp
                | StatusKind::SpeedDown => {}
            }

            effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
            if effect.remaining_turns > 0 {
                kept.push(effect);
            } else {
                report.log.push(format!("{label}'s {} expired", effect.name));
                report.expired.push(effect);
            }
        }

        self.effects = kept;
        report
    }

    /// Routes incoming damage through shields in ledger order.
    ///
    /// A shield that is fully consumed is removed; a partially consumed one
    /// keeps the difference.
    pub fn absorb_damage(&mut self, incoming: i32) -> Absorption {
        let mut remaining = incoming.max(0);
        let mut kept = ArrayVec::new();

        for mut effect in self.effects.drain(..) {
            if effect.kind == StatusKind::Shield && remaining > 0 {
                if effect.value > remaining {
                    effect.value -= remaining;
                    remaining = 0;
                    kept.push(effect);
                } else {
                    remaining -= effect.value;
                }
            } else {
                kept.push(effect);
            }
        }

        self.effects = kept;
        Absorption {
            absorbed: incoming.max(0) - remaining,
            remaining,
        }
    }
}
