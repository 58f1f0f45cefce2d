use std::collections::BTreeMap;

use crate::env::RegistryError;

use super::Spell;

/// Read-only spell lookup.
pub trait SpellRegistry: Send + Sync {
    fn spell(&self, id: &str) -> Option<&Spell>;

    /// Every registered spell in registration order.
    fn all_spells(&self) -> Vec<&Spell>;

    fn spell_or_err(&self, id: &str) -> Result<&Spell, RegistryError> {
        self.spell(id)
            .ok_or_else(|| RegistryError::UnknownSpell(id.to_string()))
    }

    /// Looks up a spell that must exist.
    ///
    /// # Panics
    ///
    /// Panics when `id` was never registered. That means content data
    /// references a spell nobody defined, which is a bug rather than a
    /// player-facing condition.
    fn expect_spell(&self, id: &str) -> &Spell {
        match self.spell(id) {
            Some(spell) => spell,
            None => panic!("spell '{id}' is not registered"),
        }
    }
}

/// Owned spell registry.
///
/// Keeps registration order for listing and a sorted index for lookups.
/// Registering an id twice replaces the earlier definition in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpellCatalog {
    spells: Vec<Spell>,
    index: BTreeMap<String, usize>,
}

impl SpellCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spell: Spell) {
        match self.index.get(&spell.id) {
            Some(&slot) => self.spells[slot] = spell,
            None => {
                self.index.insert(spell.id.clone(), self.spells.len());
                self.spells.push(spell);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}

impl FromIterator<Spell> for SpellCatalog {
    fn from_iter<I: IntoIterator<Item = Spell>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for spell in iter {
            catalog.register(spell);
        }
        catalog
    }
}

impl From<Vec<Spell>> for SpellCatalog {
    fn from(spells: Vec<Spell>) -> Self {
        spells.into_iter().collect()
    }
}

impl SpellRegistry for SpellCatalog {
    fn spell(&self, id: &str) -> Option<&Spell> {
        self.index.get(id).map(|&slot| &self.spells[slot])
    }

    fn all_spells(&self) -> Vec<&Spell> {
        self.spells.iter().collect()
    }
}
