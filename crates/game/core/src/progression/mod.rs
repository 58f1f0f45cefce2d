//! Post-battle rewards and character growth.
//!
//! A victory turns into [`BattleRewards`] (experience plus rolled loot), which
//! [`apply_battle_rewards`] feeds through levelling and the inventory.

mod statistics;

pub use statistics::{BattleStatistics, update_battle_statistics};

use crate::character::{LevelUp, gain_experience};
use crate::config::BalanceConfig;
use crate::env::RngState;
use crate::inventory::{Inventory, resolve_loot};
use crate::quest::{Quest, quest_rewards};
use crate::state::{BattlePhase, BattleState, Character, MonsterRank};

/// What a won battle pays out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRewards {
    pub xp: u32,
    pub loot_items: Vec<String>,
    pub monsters_defeated: u32,
    pub boss_defeated: bool,
    pub turns_elapsed: u32,
}

/// Extracts rewards from a won battle, rolling each defeated enemy's loot.
///
/// Returns `None`, with the generator untouched, unless the phase is victory.
pub fn resolve_battle_rewards(
    state: &BattleState,
    mut rng: RngState,
) -> (Option<BattleRewards>, RngState) {
    let BattlePhase::Victory { xp_gained, .. } = &state.phase else {
        return (None, rng);
    };

    let mut loot_items = Vec::new();
    for enemy in state.enemies.iter().filter(|e| !e.is_alive()) {
        if enemy.loot_table.is_empty() {
            continue;
        }
        let (drops, next) = resolve_loot(&enemy.loot_table, rng);
        loot_items.extend(drops);
        rng = next;
    }

    let defeated = state.enemies.iter().filter(|e| !e.is_alive());
    let rewards = BattleRewards {
        xp: *xp_gained,
        loot_items,
        monsters_defeated: defeated.clone().count() as u32,
        boss_defeated: defeated.clone().any(|e| e.rank == MonsterRank::Boss),
        turns_elapsed: state.turn,
    };
    (Some(rewards), rng)
}

/// Outcome of applying rewards to a character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionResult {
    pub level_up: LevelUp,
    pub rewards: BattleRewards,
    pub log: Vec<String>,
}

fn monster_label(count: u32) -> &'static str {
    if count > 1 { "monsters" } else { "monster" }
}

/// Grants experience (possibly several levels at once) and stores loot.
pub fn apply_battle_rewards(
    character: &mut Character,
    inventory: &mut Inventory,
    rewards: BattleRewards,
    config: &BalanceConfig,
) -> ProgressionResult {
    let mut log = Vec::new();

    let level_up = gain_experience(character, rewards.xp, config);
    log.push(format!("Gained {} XP", rewards.xp));
    if level_up.leveled_up {
        log.push(format!(
            "LEVEL UP! Now level {} (+{})",
            character.level, level_up.levels_gained
        ));
        for spell in &level_up.new_spells {
            log.push(format!("New spell unlocked: {spell}"));
        }
    }

    for item_id in &rewards.loot_items {
        inventory.add_item(item_id, 1);
        log.push(format!("Obtained: {item_id}"));
    }

    log.push(format!(
        "Defeated {} {} in {} turns",
        rewards.monsters_defeated,
        monster_label(rewards.monsters_defeated),
        rewards.turns_elapsed
    ));
    if rewards.boss_defeated {
        log.push("BOSS DEFEATED!".to_string());
    }

    ProgressionResult {
        level_up,
        rewards,
        log,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestRewardResult {
    pub level_up: LevelUp,
    pub knowledge: Vec<String>,
    pub log: Vec<String>,
}

/// Pays out a quest's experience, items and knowledge.
pub fn apply_quest_rewards(
    character: &mut Character,
    inventory: &mut Inventory,
    quest: &Quest,
    config: &BalanceConfig,
) -> QuestRewardResult {
    let totals = quest_rewards(quest);
    let mut log = vec![
        format!("Quest \"{}\" completed!", quest.title),
        format!("Gained {} XP", totals.xp),
    ];

    let level_up = gain_experience(character, totals.xp, config);
    if level_up.leveled_up {
        log.push(format!("LEVEL UP! Now level {}", character.level));
        for spell in &level_up.new_spells {
            log.push(format!("New spell unlocked: {spell}"));
        }
    }

    for item_id in &totals.items {
        inventory.add_item(item_id, 1);
        log.push(format!("Obtained: {item_id}"));
    }
    for knowledge in &totals.knowledge {
        log.push(format!("Knowledge unlocked: {knowledge}"));
    }

    QuestRewardResult {
        level_up,
        knowledge: totals.knowledge,
        log,
    }
}

/// Summary shown after a victory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VictoryScreen {
    pub title: String,
    pub xp_gained: u32,
    pub level_before: u32,
    pub level_after: u32,
    pub levels_gained: u32,
    pub new_spells: Vec<String>,
    pub loot_items: Vec<String>,
    pub turns_elapsed: u32,
    pub boss_defeated: bool,
}

pub fn build_victory_screen(progression: &ProgressionResult, level_before: u32) -> VictoryScreen {
    let rewards = &progression.rewards;
    let title = if rewards.boss_defeated {
        "BOSS DEFEATED!"
    } else {
        "VICTORY!"
    };
    VictoryScreen {
        title: title.to_string(),
        xp_gained: rewards.xp,
        level_before,
        level_after: level_before + progression.level_up.levels_gained,
        levels_gained: progression.level_up.levels_gained,
        new_spells: progression.level_up.new_spells.clone(),
        loot_items: rewards.loot_items.clone(),
        turns_elapsed: rewards.turns_elapsed,
        boss_defeated: rewards.boss_defeated,
    }
}
