//! Balance configuration loader.

use std::path::Path;

use codequest_core::BalanceConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for balance tables from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load balance tables from a TOML file.
    ///
    /// Sections and keys the file leaves out keep their default values.
    pub fn load(path: &Path) -> LoadResult<BalanceConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BalanceConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse balance TOML: {}", e))
    }

    /// Resolves a preset name (`default`, `normal`, `easy`, `hard`) or a path
    /// to a TOML file.
    pub fn resolve(spec: &str) -> LoadResult<BalanceConfig> {
        match spec.to_ascii_lowercase().as_str() {
            "" | "default" | "normal" => Ok(BalanceConfig::default()),
            "easy" => Ok(BalanceConfig::easy()),
            "hard" => Ok(BalanceConfig::hard()),
            _ => Self::load(Path::new(spec)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let config = ConfigLoader::parse(
            r#"
            [damage]
            defense_constant = 15.0

            [encounters]
            encounter_cooldown = 5
            "#,
        )
        .unwrap();

        let defaults = BalanceConfig::default();
        assert_eq!(config.damage.defense_constant, 15.0);
        assert_eq!(config.damage.min_damage, defaults.damage.min_damage);
        assert_eq!(config.encounters.encounter_cooldown, 5);
        assert_eq!(config.xp, defaults.xp);
    }

    #[test]
    fn presets_resolve_by_name() {
        assert_eq!(ConfigLoader::resolve("HARD").unwrap(), BalanceConfig::hard());
        assert_eq!(ConfigLoader::resolve("normal").unwrap(), BalanceConfig::default());
        assert!(ConfigLoader::resolve("/definitely/not/here.toml").is_err());
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balance.toml");
        std::fs::write(&path, "[combat]\ndefend_defense_bonus = 9\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.combat.defend_defense_bonus, 9);
    }
}
