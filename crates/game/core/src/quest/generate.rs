//! Quest generation from commits, complex files and hotspots.

use crate::artifacts::{Hotspot, ParsedCommit, ParsedFile};
use crate::config::QuestConfig;
use crate::state::IdSequence;

use super::{Quest, QuestKind, QuestReward, QuestStatus};

const BUG_HUNT_VERBS: [&str; 5] = ["Squash", "Hunt", "Debug", "Exterminate", "Patch"];
const FEATURE_VERBS: [&str; 5] = ["Build", "Implement", "Forge", "Craft", "Deploy"];
const REFACTOR_VERBS: [&str; 5] = ["Refactor", "Restructure", "Optimize", "Rebuild", "Rewrite"];
const ARCHAEOLOGY_VERBS: [&str; 5] = ["Explore", "Excavate", "Unearth", "Discover", "Decode"];

const CONVENTIONAL_TYPES: [&str; 10] = [
    "fix", "feat", "refactor", "chore", "docs", "style", "test", "perf", "ci", "build",
];

/// Commits with more changed lines than this, and no bug/feature flag, are refactors.
const REFACTOR_CHANGE_THRESHOLD: u32 = 80;

/// Builds quests and owns the `quest-N` id sequence.
///
/// Ids are unique per generator; call [`QuestGenerator::reset`] to restart
/// numbering for a fresh session.
#[derive(Clone, Debug)]
pub struct QuestGenerator {
    ids: IdSequence,
    max_quests: usize,
    archaeology_threshold: u32,
    knowledge_min_files: usize,
}

impl Default for QuestGenerator {
    fn default() -> Self {
        Self::new(&QuestConfig::default())
    }
}

impl QuestGenerator {
    pub fn new(config: &QuestConfig) -> Self {
        Self {
            ids: IdSequence::new("quest"),
            max_quests: config.max_quests,
            archaeology_threshold: config.archaeology_threshold,
            knowledge_min_files: config.knowledge_min_files,
        }
    }

    pub fn reset(&mut self) {
        self.ids.reset();
    }

    pub fn max_quests(&self) -> usize {
        self.max_quests
    }

    /// One quest per sampled commit, chained linearly.
    ///
    /// The first quest is available; each later one requires its predecessor.
    pub fn generate_quest_graph(&mut self, commits: &[ParsedCommit], max: usize) -> Vec<Quest> {
        let mut quests: Vec<Quest> = Vec::new();

        let refs: Vec<&ParsedCommit> = commits.iter().collect();
        for commit in sample_evenly(&refs, max) {
            let kind = infer_kind(commit);
            let changes = commit.total_changes();

            let mut rewards = vec![QuestReward::Experience(xp_for_changes(changes))];
            if let Some(item) = item_for_changes(changes) {
                rewards.push(QuestReward::Item(item.to_string()));
            }
            if commit.files_changed.len() >= self.knowledge_min_files {
                rewards.push(QuestReward::Knowledge(format!(
                    "knowledge-{}",
                    commit.short_hash()
                )));
            }

            let previous = quests.last().map(|q| q.id.clone());
            quests.push(Quest {
                id: self.ids.next_id(),
                title: commit_title(kind, &commit.message),
                description: commit_description(kind, commit),
                kind,
                status: if previous.is_some() {
                    QuestStatus::Locked
                } else {
                    QuestStatus::Available
                },
                requirements: previous.into_iter().collect(),
                rewards,
            });
        }

        quests
    }

    /// [`generate_quest_graph`](Self::generate_quest_graph) over bug-fix commits only.
    pub fn generate_bug_hunt_quests(&mut self, commits: &[ParsedCommit], max: usize) -> Vec<Quest> {
        let bug_fixes: Vec<ParsedCommit> =
            commits.iter().filter(|c| c.is_bug_fix).cloned().collect();
        self.generate_quest_graph(&bug_fixes, max)
    }

    /// Independent quests for files above the archaeology complexity threshold,
    /// most complex first.
    pub fn generate_archaeology_quests(&mut self, files: &[ParsedFile], max: usize) -> Vec<Quest> {
        let mut complex: Vec<&ParsedFile> = files
            .iter()
            .filter(|f| f.complexity > self.archaeology_threshold)
            .collect();
        complex.sort_by(|a, b| b.complexity.cmp(&a.complexity));

        sample_evenly(&complex, max)
            .into_iter()
            .map(|file| {
                let verb = ARCHAEOLOGY_VERBS[file.path.chars().count() % ARCHAEOLOGY_VERBS.len()];
                let knowledge = file.path.replace(['/', '\\'], "-");
                Quest {
                    id: self.ids.next_id(),
                    title: format!("{verb} the {}", file.basename()),
                    description: format!(
                        "Ancient code at {} has cyclomatic complexity of {}. \
                         Navigate its depths to uncover hidden knowledge.",
                        file.path, file.complexity
                    ),
                    kind: QuestKind::Archaeology,
                    status: QuestStatus::Available,
                    requirements: Vec::new(),
                    rewards: vec![
                        QuestReward::Experience(50 + file.complexity * 5),
                        QuestReward::Knowledge(format!("knowledge-{knowledge}")),
                    ],
                }
            })
            .collect()
    }

    /// Independent bug-hunt quests for hotspots, riskiest first.
    pub fn generate_hotspot_quests(&mut self, hotspots: &[Hotspot], max: usize) -> Vec<Quest> {
        let mut sorted: Vec<&Hotspot> = hotspots.iter().collect();
        sorted.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));

        sample_evenly(&sorted, max)
            .into_iter()
            .map(|hotspot| Quest {
                id: self.ids.next_id(),
                title: format!("Confront the {} Hotspot", hotspot.basename()),
                description: format!(
                    "The file {} has a risk score of {}. It has been changed {} times \
                     and has complexity {}. A powerful enemy guards this code.",
                    hotspot.path, hotspot.risk_score, hotspot.churn_rate, hotspot.complexity
                ),
                kind: QuestKind::BugHunt,
                status: QuestStatus::Available,
                requirements: Vec::new(),
                rewards: vec![
                    QuestReward::Experience((100.0 + hotspot.risk_score * 50.0).floor() as u32),
                    QuestReward::Item("item-core-dump".into()),
                ],
            })
            .collect()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Picks `n` items at regular intervals, preserving order.
fn sample_evenly<T: Copy>(items: &[T], n: usize) -> Vec<T> {
    if items.len() <= n {
        return items.to_vec();
    }
    (0..n).map(|i| items[i * items.len() / n]).collect()
}

fn infer_kind(commit: &ParsedCommit) -> QuestKind {
    if commit.is_bug_fix {
        QuestKind::BugHunt
    } else if commit.is_feature {
        QuestKind::Feature
    } else if commit.total_changes() > REFACTOR_CHANGE_THRESHOLD {
        QuestKind::Refactor
    } else {
        QuestKind::Feature
    }
}

fn xp_for_changes(changes: u32) -> u32 {
    match changes {
        201.. => 500,
        101..=200 => 300,
        51..=100 => 200,
        21..=50 => 100,
        _ => 50,
    }
}

fn item_for_changes(changes: u32) -> Option<&'static str> {
    match changes {
        201.. => Some("item-root-cause"),
        101..=200 => Some("item-memory-snapshot"),
        51..=100 => Some("item-core-dump"),
        _ => None,
    }
}

fn verbs(kind: QuestKind) -> &'static [&'static str; 5] {
    match kind {
        QuestKind::BugHunt => &BUG_HUNT_VERBS,
        QuestKind::Feature => &FEATURE_VERBS,
        QuestKind::Refactor => &REFACTOR_VERBS,
        QuestKind::Archaeology => &ARCHAEOLOGY_VERBS,
    }
}

/// Drops a leading `type:` or `type(scope):` conventional-commit prefix.
fn strip_conventional_prefix(message: &str) -> &str {
    let lower = message.to_ascii_lowercase();
    let Some(kind) = CONVENTIONAL_TYPES.iter().find(|t| lower.starts_with(**t)) else {
        return message;
    };

    let mut rest = &message[kind.len()..];
    if let Some(scoped) = rest.strip_prefix('(') {
        match scoped.find(')') {
            Some(close) if close > 0 => rest = &scoped[close + 1..],
            _ => return message,
        }
    }
    match rest.strip_prefix(':') {
        Some(subject) => subject.trim_start(),
        None => message,
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn commit_title(kind: QuestKind, message: &str) -> String {
    let list = verbs(kind);
    let verb = list[message.chars().count() % list.len()];
    let subject = strip_conventional_prefix(message).trim();
    format!("{verb} the {}", capitalize(subject))
}

fn plural(count: usize) -> &'static str {
    if count > 1 { "s" } else { "" }
}

fn commit_description(kind: QuestKind, commit: &ParsedCommit) -> String {
    let hash = commit.short_hash();
    let files = commit.files_changed.len();
    let s = plural(files);

    match kind {
        QuestKind::BugHunt => format!(
            "A bug was introduced in commit {hash}. Track it down across {files} file{s} \
             and defeat the monster it spawned."
        ),
        QuestKind::Feature => format!(
            "New functionality was added in commit {hash}. Navigate the {files} changed \
             file{s} and master the new code paths."
        ),
        QuestKind::Refactor => format!(
            "A major restructuring occurred in commit {hash}. {} lines added, {} removed. \
             Survive the refactoring storm.",
            commit.insertions, commit.deletions
        ),
        QuestKind::Archaeology => format!(
            "Ancient code from commit {hash} lies dormant. Explore its {files} artifact{s} \
             to uncover forgotten knowledge."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(hash: &str, message: &str, insertions: u32, files: usize) -> ParsedCommit {
        ParsedCommit {
            hash: hash.into(),
            message: message.into(),
            author: "dev".into(),
            date: "2024-01-01T00:00:00Z".into(),
            files_changed: (0..files).map(|i| format!("src/file{i}.rs")).collect(),
            insertions,
            deletions: 0,
            ..Default::default()
        }
    }

    #[test]
    fn commit_graph_is_a_linear_chain() {
        let mut generator = QuestGenerator::default();
        let commits = vec![
            commit("aaaaaaa1", "feat: login", 10, 1),
            commit("bbbbbbb2", "tidy", 10, 1),
            commit("ccccccc3", "more", 10, 1),
        ];

        let quests = generator.generate_quest_graph(&commits, 100);

        assert_eq!(quests.len(), 3);
        assert_eq!(quests[0].id, "quest-1");
        assert_eq!(quests[0].status, QuestStatus::Available);
        assert!(quests[0].requirements.is_empty());
        assert_eq!(quests[2].status, QuestStatus::Locked);
        assert_eq!(quests[2].requirements, vec!["quest-2".to_string()]);
    }

    #[test]
    fn rewards_scale_with_change_size() {
        let mut generator = QuestGenerator::default();
        let mut big = commit("deadbeefcafe", "fix: crash on empty input", 150, 3);
        big.deletions = 60;
        big.is_bug_fix = true;

        let quest = &generator.generate_quest_graph(&[big], 10)[0];

        assert_eq!(quest.kind, QuestKind::BugHunt);
        assert_eq!(
            quest.rewards,
            vec![
                QuestReward::Experience(500),
                QuestReward::Item("item-root-cause".into()),
                QuestReward::Knowledge("knowledge-deadbee".into()),
            ]
        );
        assert!(quest.description.contains("across 3 files"));
    }

    #[test]
    fn single_file_commit_has_no_knowledge_reward() {
        let mut generator = QuestGenerator::default();
        let quest = &generator.generate_quest_graph(&[commit("abc", "x", 5, 1)], 10)[0];
        assert_eq!(quest.rewards, vec![QuestReward::Experience(50)]);
        assert!(quest.description.contains("1 changed file and"));
    }

    #[test]
    fn large_unlabelled_commit_is_a_refactor() {
        let mut generator = QuestGenerator::default();
        let quest = &generator.generate_quest_graph(&[commit("abc", "shuffle", 81, 1)], 10)[0];
        assert_eq!(quest.kind, QuestKind::Refactor);
        assert!(quest.description.contains("81 lines added, 0 removed"));
    }

    #[test]
    fn titles_strip_conventional_prefix() {
        // "fix(parser): handle eof" has 23 chars; 23 % 5 == 3.
        assert_eq!(
            commit_title(QuestKind::BugHunt, "fix(parser): handle eof"),
            "Exterminate the Handle eof"
        );
        assert_eq!(strip_conventional_prefix("FEAT: Shiny"), "Shiny");
        assert_eq!(strip_conventional_prefix("fixup things"), "fixup things");
        assert_eq!(strip_conventional_prefix("docs(): nope"), "docs(): nope");
    }

    #[test]
    fn sampling_spans_the_history() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(sample_evenly(&items, 4), vec![0, 2, 5, 7]);
        assert_eq!(sample_evenly(&items, 20).len(), 10);
    }

    #[test]
    fn archaeology_quests_favour_complex_files() {
        let mut generator = QuestGenerator::default();
        let files = vec![
            ParsedFile {
                path: "src/simple.rs".into(),
                complexity: 3,
                ..Default::default()
            },
            ParsedFile {
                path: "src/core/engine.rs".into(),
                complexity: 40,
                ..Default::default()
            },
            ParsedFile {
                path: "src/parser.rs".into(),
                complexity: 20,
                ..Default::default()
            },
        ];

        let quests = generator.generate_archaeology_quests(&files, 10);

        assert_eq!(quests.len(), 2);
        assert!(quests[0].title.ends_with("the engine.rs"));
        assert_eq!(
            quests[0].rewards,
            vec![
                QuestReward::Experience(250),
                QuestReward::Knowledge("knowledge-src-core-engine.rs".into()),
            ]
        );
        assert!(quests.iter().all(|q| q.status == QuestStatus::Available));
    }

    #[test]
    fn hotspot_quests_are_riskiest_first() {
        let mut generator = QuestGenerator::default();
        let hotspots = vec![
            Hotspot {
                path: "src/a.rs".into(),
                churn_rate: 3,
                complexity: 10,
                risk_score: 1.5,
            },
            Hotspot {
                path: "src/b.rs".into(),
                churn_rate: 12,
                complexity: 30,
                risk_score: 7.25,
            },
        ];

        let quests = generator.generate_hotspot_quests(&hotspots, 10);

        assert_eq!(quests[0].title, "Confront the b.rs Hotspot");
        assert_eq!(quests[0].rewards[0], QuestReward::Experience(462));
        assert!(quests[0].description.contains("risk score of 7.25"));
        assert_eq!(quests[0].kind, QuestKind::BugHunt);
    }

    #[test]
    fn reset_restarts_numbering() {
        let mut generator = QuestGenerator::default();
        generator.generate_quest_graph(&[commit("a", "x", 1, 1)], 1);
        generator.reset();
        let again = generator.generate_quest_graph(&[commit("a", "x", 1, 1)], 1);
        assert_eq!(again[0].id, "quest-1");
    }
}
