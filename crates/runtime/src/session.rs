//! The mutable game session.
//!
//! A [`Session`] owns everything that outlives a single battle: the
//! character, inventory, quest log, encounter bookkeeping, lifetime
//! statistics, and the session RNG. Battles run through the core
//! [`BattleEngine`]; when one ends the session resolves rewards, updates the
//! bookkeeping, and clears it.

use codequest_core::encounter::Encounter;
use codequest_core::env::rng;
use codequest_core::inventory::ItemUse;
use codequest_core::progression::QuestRewardResult;
use codequest_core::quest::{self, QuestStatus};
use codequest_core::{
    BattleAction, BattleEngine, BattlePhase, BattleState, BattleStatistics, Character,
    EncounterKind, EncounterState, GameEnv, Hotspot, Inventory, Monster, MonsterRank,
    ParsedCommit, ParsedFile, Quest, QuestGenerator, RngState, Stats, TurnOutcome, VictoryScreen,
    apply_battle_rewards, apply_quest_rewards, build_victory_screen, check_encounter, init_battle,
    resolve_battle_rewards, update_battle_statistics, use_item,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};
use crate::events::{CombatOutcome, GameEvent, StatChanges, extract_events};

/// Archaeology and hotspot quests each add at most this many side quests.
const SIDE_QUEST_LIMIT: usize = 5;

/// Serializable view of a session.
///
/// Every saved field is snake_case, down through the nested rule types. The
/// camelCase analysis records are inputs and never part of a save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionSnapshot {
    pub character: Character,
    pub inventory: Inventory,
    pub active_quests: Vec<Quest>,
    pub completed_quests: Vec<Quest>,
    pub battle_state: Option<BattleState>,
    pub statistics: BattleStatistics,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(RuntimeError::Snapshot)
    }
}

/// A single player's game session over one analyzed repository.
pub struct Session<'a> {
    env: GameEnv<'a>,
    seed: u32,
    initial_character: Character,

    files: Vec<ParsedFile>,
    commits: Vec<ParsedCommit>,
    hotspots: Vec<Hotspot>,

    character: Character,
    inventory: Inventory,
    quests: Vec<Quest>,
    quest_generator: QuestGenerator,
    encounters: EncounterState,
    statistics: BattleStatistics,
    rng: RngState,

    battle: Option<BattleState>,
    /// The most recently concluded battle.
    last_battle: Option<BattleState>,
    last_victory: Option<VictoryScreen>,
    events: Vec<GameEvent>,
}

impl<'a> Session<'a> {
    /// Builds a session and its quest log from repository artifacts.
    ///
    /// Encounter, inventory and quest tuning come from `env`'s balance tables.
    pub fn new(
        character: Character,
        files: Vec<ParsedFile>,
        commits: Vec<ParsedCommit>,
        hotspots: Vec<Hotspot>,
        seed: u32,
        env: GameEnv<'a>,
    ) -> Self {
        let balance = env.balance();
        let mut quest_generator = QuestGenerator::new(&balance.quests);
        let quests = build_quests(&mut quest_generator, &files, &commits, &hotspots);

        tracing::info!(
            character = %character.name,
            class = %character.class,
            files = files.len(),
            commits = commits.len(),
            quests = quests.len(),
            seed,
            "session created"
        );

        Self {
            env,
            seed,
            initial_character: character.clone(),
            files,
            commits,
            hotspots,
            character,
            inventory: Inventory::new(balance.inventory.max_slots),
            quests,
            quest_generator,
            encounters: EncounterState::new(),
            statistics: BattleStatistics::default(),
            rng: RngState::from_seed(seed),
            battle: None,
            last_battle: None,
            last_victory: None,
            events: Vec::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn encounters(&self) -> &EncounterState {
        &self.encounters
    }

    pub fn statistics(&self) -> &BattleStatistics {
        &self.statistics
    }

    /// The battle in progress, if any.
    pub fn battle(&self) -> Option<&BattleState> {
        self.battle.as_ref()
    }

    pub fn last_battle(&self) -> Option<&BattleState> {
        self.last_battle.as_ref()
    }

    /// Summary of the most recent victory.
    pub fn last_victory(&self) -> Option<&VictoryScreen> {
        self.last_victory.as_ref()
    }

    /// Takes every event emitted since the previous drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let by_status = |status| {
            quest::quests_by_status(&self.quests, status)
                .into_iter()
                .cloned()
                .collect()
        };
        SessionSnapshot {
            character: self.character.clone(),
            inventory: self.inventory.clone(),
            active_quests: by_status(QuestStatus::Active),
            completed_quests: by_status(QuestStatus::Completed),
            battle_state: self.battle.clone(),
            statistics: self.statistics.clone(),
        }
    }

    /// Restores the session to how [`Session::new`] left it.
    pub fn reset(&mut self) {
        self.character = self.initial_character.clone();
        self.inventory = Inventory::new(self.env.balance().inventory.max_slots);
        self.quests = build_quests(
            &mut self.quest_generator,
            &self.files,
            &self.commits,
            &self.hotspots,
        );
        self.encounters = EncounterState::new();
        self.statistics = BattleStatistics::default();
        self.rng = RngState::from_seed(self.seed);
        self.battle = None;
        self.last_battle = None;
        self.last_victory = None;
        self.events.clear();
        tracing::debug!(seed = self.seed, "session reset");
    }

    // ========================================================================
    // Exploration
    // ========================================================================

    /// Visits a file, starting a battle if it triggers an encounter.
    pub fn visit_file(&mut self, path: &str) -> Result<Option<EncounterKind>> {
        if self.battle.is_some() {
            return Err(RuntimeError::BattleInProgress);
        }
        let file = self
            .files
            .iter()
            .find(|f| f.path == path)
            .ok_or_else(|| RuntimeError::UnknownFile(path.to_string()))?;

        let (encounter, rng) = check_encounter(
            file,
            &self.commits,
            &self.hotspots,
            &mut self.encounters,
            std::mem::take(&mut self.rng),
            &self.env.balance().encounters,
            &self.env,
        );
        self.rng = rng;

        let Some(Encounter { kind, monster, .. }) = encounter else {
            tracing::trace!(path, "no encounter");
            return Ok(None);
        };

        tracing::info!(path, %kind, monster = %monster.name, "encounter triggered");
        self.events.push(GameEvent::EncounterTriggered {
            kind,
            file: path.to_string(),
            monster_id: monster.id.clone(),
            severity: monster.severity,
        });
        self.start_battle(vec![monster])?;
        Ok(Some(kind))
    }

    /// Uses a consumable outside of battle.
    pub fn use_item(&mut self, item_id: &str) -> Result<ItemUse> {
        if self.battle.is_some() {
            return Err(RuntimeError::BattleInProgress);
        }
        if !self.inventory.has_item(item_id, 1) {
            return Err(RuntimeError::ItemNotOwned(item_id.to_string()));
        }

        let result = use_item(&mut self.character, item_id, self.env.items());
        if !result.consumed {
            return Err(RuntimeError::ItemRejected {
                item_id: item_id.to_string(),
                reason: result.log,
            });
        }
        self.inventory.remove_item(item_id, 1);
        tracing::debug!(item_id, log = %result.log, "item used");
        Ok(result)
    }

    // ========================================================================
    // Quests
    // ========================================================================

    pub fn start_quest(&mut self, quest_id: &str) -> Result<()> {
        quest::start_quest(&mut self.quests, quest_id)?;
        self.events.push(GameEvent::QuestUpdated {
            quest_id: quest_id.to_string(),
            status: QuestStatus::Active,
        });
        Ok(())
    }

    /// Completes an active quest, pays its rewards, and unlocks dependents.
    pub fn complete_quest(&mut self, quest_id: &str) -> Result<QuestRewardResult> {
        let unlocked = quest::complete_quest(&mut self.quests, quest_id)?;
        let completed = self
            .quests
            .iter()
            .find(|q| q.id == quest_id)
            .cloned()
            .ok_or_else(|| RuntimeError::Quest(quest::QuestError::UnknownQuest(quest_id.into())))?;

        self.events.push(GameEvent::QuestUpdated {
            quest_id: quest_id.to_string(),
            status: QuestStatus::Completed,
        });
        for id in unlocked {
            self.events.push(GameEvent::QuestUpdated {
                quest_id: id,
                status: QuestStatus::Available,
            });
        }

        let stats_before = self.character.stats;
        let result = apply_quest_rewards(
            &mut self.character,
            &mut self.inventory,
            &completed,
            self.env.balance(),
        );
        let xp = quest::quest_rewards(&completed).xp;
        self.publish_growth(xp, result.level_up.leveled_up, &stats_before);
        Ok(result)
    }

    // ========================================================================
    // Battles
    // ========================================================================

    /// Starts a scripted battle against `enemies`.
    ///
    /// The battle seed is drawn from the session RNG.
    pub fn start_battle(&mut self, enemies: Vec<Monster>) -> Result<&BattleState> {
        if self.battle.is_some() {
            return Err(RuntimeError::BattleInProgress);
        }
        let Some(lead) = enemies.first() else {
            return Err(RuntimeError::NoEnemies);
        };

        self.events.push(GameEvent::CombatStarted {
            monster_id: lead.id.clone(),
            monster_name: lead.name.clone(),
            bug_type: lead.bug_type,
            severity: lead.severity,
            monster_health: lead.stats.health,
            monster_max_health: lead.stats.max_health,
        });
        tracing::info!(
            enemies = enemies.len(),
            lead = %lead.name,
            severity = %lead.severity,
            "combat started"
        );

        let (seed, rng) = rng::next_u32(std::mem::take(&mut self.rng));
        self.rng = rng;
        let battle = init_battle(self.character.clone(), enemies, seed);
        Ok(&*self.battle.insert(battle))
    }

    /// Applies a player action to the running battle.
    ///
    /// Returns `None` when no battle is running. A rejected action is logged
    /// and leaves the battle unchanged.
    pub fn dispatch_action(&mut self, action: &BattleAction) -> Option<&BattleState> {
        match self.try_dispatch(action) {
            Ok(_) => {}
            Err(RuntimeError::NoActiveBattle) => return None,
            Err(err) => {
                tracing::warn!(?action, error = %err, "action rejected");
            }
        }
        self.battle.as_ref().or(self.last_battle.as_ref())
    }

    /// Fallible form of [`Session::dispatch_action`].
    pub fn try_dispatch(&mut self, action: &BattleAction) -> Result<TurnOutcome> {
        let battle = self.battle.as_mut().ok_or(RuntimeError::NoActiveBattle)?;
        if let BattleAction::UseItem { item_id } = action {
            if !self.inventory.has_item(item_id, 1) {
                return Err(RuntimeError::ItemNotOwned(item_id.clone()));
            }
        }

        let outcome = BattleEngine::new(battle).execute(self.env, action)?;
        tracing::debug!(
            ?action,
            turn = battle.turn,
            events = outcome.events.len(),
            "action dispatched"
        );

        if let BattleAction::UseItem { item_id } = action {
            self.inventory.remove_item(item_id, 1);
        }
        self.events.extend(extract_events(&outcome.events));

        if outcome.phase.is_terminal() {
            self.conclude_battle();
        }
        Ok(outcome)
    }

    fn conclude_battle(&mut self) {
        let Some(battle) = self.battle.take() else {
            return;
        };

        let (outcome, xp_gained) = match &battle.phase {
            BattlePhase::Victory { xp_gained, .. } => {
                self.settle_victory(&battle);
                (CombatOutcome::Victory, Some(*xp_gained))
            }
            _ => {
                self.statistics = update_battle_statistics(&self.statistics, &battle, None);
                (CombatOutcome::Defeat, None)
            }
        };

        tracing::info!(%outcome, turns = battle.turn, "combat ended");
        self.events.push(GameEvent::CombatEnded {
            outcome,
            turns: battle.turn,
            xp_gained,
        });
        self.last_battle = Some(battle);
    }

    fn settle_victory(&mut self, battle: &BattleState) {
        let (rewards, rng) = resolve_battle_rewards(battle, std::mem::take(&mut self.rng));
        self.rng = rng;
        let Some(rewards) = rewards else {
            return;
        };

        let level_before = self.character.level;
        let stats_before = self.character.stats;
        let progression = apply_battle_rewards(
            &mut self.character,
            &mut self.inventory,
            rewards,
            self.env.balance(),
        );
        self.statistics =
            update_battle_statistics(&self.statistics, battle, Some(&progression.rewards));

        for enemy in &battle.enemies {
            self.mark_defeated(enemy);
        }

        self.publish_growth(
            progression.rewards.xp,
            progression.level_up.leveled_up,
            &stats_before,
        );
        if !progression.rewards.loot_items.is_empty() {
            if let Some(monster) = battle.enemies.first() {
                self.events.push(GameEvent::LootDropped {
                    monster_id: monster.id.clone(),
                    items: progression.rewards.loot_items.clone(),
                });
            }
        }

        self.last_victory = Some(build_victory_screen(&progression, level_before));
    }

    fn mark_defeated(&mut self, enemy: &Monster) {
        match (enemy.rank, &enemy.source_file, &enemy.source_commit) {
            (MonsterRank::Boss, Some(path), _) => self.encounters.mark_boss_defeated(path),
            (MonsterRank::Miniboss, Some(path), _) => self.encounters.mark_miniboss_defeated(path),
            (MonsterRank::Normal, _, Some(hash)) => self.encounters.mark_bug_defeated(hash),
            _ => {}
        }
    }

    fn publish_growth(&mut self, xp: u32, leveled_up: bool, stats_before: &Stats) {
        self.events.push(GameEvent::ExperienceGained {
            character_id: self.character.id.clone(),
            amount: xp,
            total_experience: self.character.experience,
        });
        if leveled_up {
            tracing::info!(
                character = %self.character.name,
                level = self.character.level,
                "level up"
            );
            self.events.push(GameEvent::LevelUp {
                character_id: self.character.id.clone(),
                new_level: self.character.level,
                stat_changes: StatChanges::between(stats_before, &self.character.stats),
            });
        }
    }
}

fn build_quests(
    generator: &mut QuestGenerator,
    files: &[ParsedFile],
    commits: &[ParsedCommit],
    hotspots: &[Hotspot],
) -> Vec<Quest> {
    generator.reset();
    let max = generator.max_quests();

    let mut quests = generator.generate_quest_graph(commits, max);
    let room = max.saturating_sub(quests.len()).min(SIDE_QUEST_LIMIT);
    quests.extend(generator.generate_archaeology_quests(files, room));
    let room = max.saturating_sub(quests.len()).min(SIDE_QUEST_LIMIT);
    quests.extend(generator.generate_hotspot_quests(hotspots, room));
    quests
}

#[cfg(test)]
mod tests {
    use super::*;
    use codequest_core::{CharacterClass, IdSequence, create_character};

    fn hero() -> Character {
        let env = GameEnv::builtin();
        create_character(
            CharacterClass::Tank,
            "Grace",
            2,
            env.balance(),
            &mut IdSequence::new("char"),
        )
    }

    fn commits() -> Vec<ParsedCommit> {
        (0..3)
            .map(|i| ParsedCommit {
                hash: format!("abc{i}def"),
                message: format!("feat: step {i}"),
                files_changed: vec!["src/lib.rs".into()],
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn quests_combine_graph_and_side_quests() {
        let files = vec![ParsedFile {
            path: "src/tangle.rs".into(),
            language: "rust".into(),
            complexity: 40,
            ..Default::default()
        }];
        let session = Session::new(hero(), files, commits(), vec![], 7, GameEnv::builtin());

        assert_eq!(session.quests().len(), 4);
        let ids: Vec<&str> = session.quests().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["quest-1", "quest-2", "quest-3", "quest-4"]);
    }

    #[test]
    fn reset_regenerates_identical_quests() {
        let mut session = Session::new(hero(), vec![], commits(), vec![], 7, GameEnv::builtin());
        let before = session.quests().to_vec();

        session.start_quest("quest-1").unwrap();
        session.reset();

        assert_eq!(session.quests(), before.as_slice());
        assert!(session.drain_events().is_empty());
    }

    fn assert_snake_case_keys(value: &serde_json::Value) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, nested) in map {
                    assert!(
                        !key.chars().any(|c| c.is_ascii_uppercase()),
                        "camelCase key '{key}' in snapshot"
                    );
                    assert_snake_case_keys(nested);
                }
            }
            serde_json::Value::Array(items) => items.iter().for_each(assert_snake_case_keys),
            _ => {}
        }
    }

    #[test]
    fn snapshot_keys_share_one_naming_policy() {
        let mut session = Session::new(hero(), vec![], commits(), vec![], 7, GameEnv::builtin());
        session.start_quest("quest-1").unwrap();

        let json = session.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_snake_case_keys(&value);
        assert!(value["active_quests"].as_array().is_some_and(|q| !q.is_empty()));
        assert!(value["character"]["stats"].get("max_health").is_some());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let session = Session::new(hero(), vec![], commits(), vec![], 7, GameEnv::builtin());
        let json = session.snapshot().to_json().unwrap();
        assert!(json.contains("\"character\""));
        assert!(json.contains("\"battle_state\": null"));
    }
}
