//! Quests derived from repository history, and their lifecycle.
//!
//! A quest moves `Locked -> Available -> Active -> Completed`. Completing a
//! quest re-evaluates every locked quest whose requirements are now all met.

mod generate;

pub use generate::QuestGenerator;

use std::collections::BTreeSet;

use crate::error::{ErrorSeverity, GameError};

/// Flavor of a quest, inferred from its source artifact.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum QuestKind {
    BugHunt,
    Feature,
    Refactor,
    Archaeology,
}

#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum QuestStatus {
    Locked,
    Available,
    Active,
    Completed,
}

/// One reward descriptor attached to a quest.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "value", rename_all = "kebab-case")
)]
pub enum QuestReward {
    Experience(u32),
    Item(String),
    Knowledge(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: QuestKind,
    pub status: QuestStatus,
    /// Ids of quests that must be completed first.
    pub requirements: Vec<String>,
    pub rewards: Vec<QuestReward>,
}

/// Rewards of a quest grouped by kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardTotals {
    pub xp: u32,
    pub items: Vec<String>,
    pub knowledge: Vec<String>,
}

/// A lifecycle transition that does not apply.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuestError {
    #[error("unknown quest '{0}'")]
    UnknownQuest(String),

    #[error("quest '{id}' is {status}, expected {expected}")]
    WrongStatus {
        id: String,
        status: QuestStatus,
        expected: QuestStatus,
    },
}

impl GameError for QuestError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownQuest(_) => ErrorSeverity::Validation,
            Self::WrongStatus { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownQuest(_) => "QUEST_UNKNOWN",
            Self::WrongStatus { .. } => "QUEST_WRONG_STATUS",
        }
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Flips locked quests to available when every requirement is completed.
///
/// Returns the ids that were unlocked.
pub fn unlock_available_quests(quests: &mut [Quest], completed: &BTreeSet<String>) -> Vec<String> {
    let mut unlocked = Vec::new();
    for quest in quests.iter_mut() {
        if quest.status == QuestStatus::Locked
            && quest.requirements.iter().all(|req| completed.contains(req))
        {
            quest.status = QuestStatus::Available;
            unlocked.push(quest.id.clone());
        }
    }
    unlocked
}

fn transition(
    quests: &mut [Quest],
    quest_id: &str,
    from: QuestStatus,
    to: QuestStatus,
) -> Result<(), QuestError> {
    let quest = quests
        .iter_mut()
        .find(|q| q.id == quest_id)
        .ok_or_else(|| QuestError::UnknownQuest(quest_id.to_string()))?;
    if quest.status != from {
        return Err(QuestError::WrongStatus {
            id: quest.id.clone(),
            status: quest.status,
            expected: from,
        });
    }
    quest.status = to;
    Ok(())
}

/// `Available -> Active`. Anything else is rejected and changes nothing.
pub fn start_quest(quests: &mut [Quest], quest_id: &str) -> Result<(), QuestError> {
    transition(quests, quest_id, QuestStatus::Available, QuestStatus::Active)
}

/// `Active -> Completed`, then unlocks dependents.
///
/// Returns the ids unlocked by the completion.
pub fn complete_quest(quests: &mut [Quest], quest_id: &str) -> Result<Vec<String>, QuestError> {
    transition(quests, quest_id, QuestStatus::Active, QuestStatus::Completed)?;

    let completed: BTreeSet<String> = quests
        .iter()
        .filter(|q| q.status == QuestStatus::Completed)
        .map(|q| q.id.clone())
        .collect();
    Ok(unlock_available_quests(quests, &completed))
}

pub fn quests_by_status(quests: &[Quest], status: QuestStatus) -> Vec<&Quest> {
    quests.iter().filter(|q| q.status == status).collect()
}

pub fn quest_rewards(quest: &Quest) -> RewardTotals {
    let mut totals = RewardTotals::default();
    for reward in &quest.rewards {
        match reward {
            QuestReward::Experience(xp) => totals.xp += xp,
            QuestReward::Item(id) => totals.items.push(id.clone()),
            QuestReward::Knowledge(id) => totals.knowledge.push(id.clone()),
        }
    }
    totals
}
