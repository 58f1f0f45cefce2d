//! Repository-analysis artifacts consumed by the generators.
//!
//! These are produced by an external analysis pass and treated as read-only
//! input: quests come from commits, bosses from files, minibosses from
//! hotspots. Dates are kept as the ISO-8601 strings the analysis emits.

/// A source file with its static metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ParsedFile {
    pub path: String,
    pub hash: String,
    /// Language name as reported by the analyzer (`"typescript"`, `"rust"`…).
    pub language: String,
    /// Cyclomatic complexity.
    pub complexity: u32,
    /// Lines of code.
    pub loc: u32,
    pub last_modified: String,
    pub author: String,
}

impl ParsedFile {
    /// Final path component, used in quest titles.
    pub fn basename(&self) -> &str {
        basename(&self.path)
    }
}

/// A commit with its change statistics and classification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ParsedCommit {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub date: String,
    pub files_changed: Vec<String>,
    pub insertions: u32,
    pub deletions: u32,
    pub is_bug_fix: bool,
    pub is_feature: bool,
    pub is_merge: bool,
}

impl ParsedCommit {
    /// Lines added plus lines removed.
    pub fn total_changes(&self) -> u32 {
        self.insertions + self.deletions
    }

    /// First seven characters of the hash.
    pub fn short_hash(&self) -> &str {
        let end = self
            .hash
            .char_indices()
            .nth(7)
            .map_or(self.hash.len(), |(i, _)| i);
        &self.hash[..end]
    }

    pub fn touches(&self, path: &str) -> bool {
        self.files_changed.iter().any(|f| f == path)
    }
}

/// A file that changes often and is hard to change.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Hotspot {
    pub path: String,
    /// Number of commits touching the file.
    pub churn_rate: u32,
    pub complexity: u32,
    pub risk_score: f64,
}

impl Hotspot {
    pub fn basename(&self) -> &str {
        basename(&self.path)
    }
}

pub(crate) fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hash_truncates_to_seven_chars() {
        let commit = ParsedCommit {
            hash: "abcdef0123456789".into(),
            ..Default::default()
        };
        assert_eq!(commit.short_hash(), "abcdef0");

        let short = ParsedCommit {
            hash: "abc".into(),
            ..Default::default()
        };
        assert_eq!(short.short_hash(), "abc");
    }

    #[test]
    fn basename_takes_last_component() {
        assert_eq!(basename("src/engine/core.ts"), "core.ts");
        assert_eq!(basename("README.md"), "README.md");
    }
}
