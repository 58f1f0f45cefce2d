//! Spell catalog loader.

use std::path::Path;

use codequest_core::Spell;
use codequest_core::spell::SpellCatalog;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Spell catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellFile {
    pub spells: Vec<Spell>,
}

/// Loader for spell catalogs from RON files.
pub struct SpellLoader;

impl SpellLoader {
    /// Load a spell catalog from a RON file.
    ///
    /// A later definition of the same id replaces the earlier one.
    pub fn load(path: &Path) -> LoadResult<SpellCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpellCatalog> {
        let file: SpellFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell catalog RON: {}", e))?;
        Ok(SpellCatalog::from(file.spells))
    }

    /// Renders spells in the format [`SpellLoader::parse`] reads.
    pub fn render(spells: &[&Spell]) -> LoadResult<String> {
        let file = SpellFile {
            spells: spells.iter().map(|s| (*s).clone()).collect(),
        };
        ron::ser::to_string_pretty(&file, ron::ser::PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to render spell catalog RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use codequest_core::SpellRegistry;
    use codequest_core::spell::BuiltinSpells;

    use super::*;

    #[test]
    fn builtin_catalog_survives_a_file_round_trip() {
        let builtin = BuiltinSpells;
        let text = SpellLoader::render(&builtin.all_spells()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spells.ron");
        std::fs::write(&path, text).unwrap();

        let loaded = SpellLoader::load(&path).unwrap();
        assert_eq!(&loaded, BuiltinSpells::catalog());
        assert!(loaded.spell("spell-regex-nuke").is_some());
    }

    #[test]
    fn malformed_catalog_reports_context() {
        let err = SpellLoader::parse("(spells: [ oops ])").unwrap_err();
        assert!(err.to_string().contains("spell catalog"));
    }
}
