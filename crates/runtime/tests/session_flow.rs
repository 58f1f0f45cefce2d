use codequest_core::monster::create_monster;
use codequest_core::quest::QuestStatus;
use codequest_core::{
    BattleAction, BugType, Character, CharacterClass, EncounterKind, GameEnv, Hotspot, IdSequence,
    Monster, ParsedCommit, ParsedFile, RngState, Severity, create_character,
};
use codequest_runtime::{CombatOutcome, GameEvent, RuntimeError, Session};

const BOSS_FILE: &str = "src/core.rs";
const QUIET_FILE: &str = "src/util.rs";
const BUG_HASH: &str = "b0gus42";

fn hero(level: u32) -> Character {
    let env = GameEnv::builtin();
    create_character(
        CharacterClass::Dps,
        "Ada",
        level,
        env.balance(),
        &mut IdSequence::new("char"),
    )
}

fn files() -> Vec<ParsedFile> {
    vec![
        ParsedFile {
            path: BOSS_FILE.into(),
            language: "rust".into(),
            complexity: 45,
            ..Default::default()
        },
        ParsedFile {
            path: QUIET_FILE.into(),
            language: "rust".into(),
            complexity: 3,
            ..Default::default()
        },
    ]
}

fn commits() -> Vec<ParsedCommit> {
    vec![
        ParsedCommit {
            hash: "aaaa111".into(),
            message: "feat: scaffold the core".into(),
            files_changed: vec![BOSS_FILE.into()],
            ..Default::default()
        },
        ParsedCommit {
            hash: "bbbb222".into(),
            message: "refactor: split helpers".into(),
            files_changed: vec![QUIET_FILE.into(), BOSS_FILE.into()],
            ..Default::default()
        },
    ]
}

fn fragile_bug() -> Monster {
    let env = GameEnv::builtin();
    let (mut monster, _) = create_monster(
        BugType::NullPointer,
        Severity::MIN,
        0,
        RngState::from_seed(5),
        &env,
    );
    monster.stats.health = 1;
    monster.source_commit = Some(BUG_HASH.into());
    monster
}

fn session(level: u32) -> Session<'static> {
    Session::new(
        hero(level),
        files(),
        commits(),
        Vec::<Hotspot>::new(),
        2024,
        GameEnv::builtin(),
    )
}

/// End-to-end session scenario
///
/// 1. Exploring quiet files counts steps without spawning anything
/// 2. The complex file spawns its boss once the cooldown has passed
/// 3. The boss fight runs to completion and is settled
/// 4. A scripted battle against a one-HP bug pays out and is remembered
/// 5. Items, quests, snapshots and reset behave as a player expects
#[test]
fn complete_session_scenario() {
    println!("\n════════════════════════════════════════════════════════");
    println!("  CODEQUEST - Complete Session Scenario Test");
    println!("════════════════════════════════════════════════════════\n");

    let mut session = session(30);

    // ================================================================
    // PHASE 1: Exploration
    // ================================================================
    println!("PHASE 1: Exploration");

    assert_eq!(session.visit_file(QUIET_FILE).unwrap(), None);
    assert_eq!(session.visit_file(QUIET_FILE).unwrap(), None);
    assert_eq!(session.encounters().steps_since_last_encounter, 2);
    assert!(matches!(
        session.visit_file("src/missing.rs"),
        Err(RuntimeError::UnknownFile(_))
    ));
    println!("  ✓ two quiet steps, no encounter");

    // ================================================================
    // PHASE 2: Boss encounter
    // ================================================================
    println!("PHASE 2: Boss encounter");

    assert_eq!(
        session.visit_file(BOSS_FILE).unwrap(),
        Some(EncounterKind::Boss)
    );
    assert!(session.battle().is_some());
    assert!(matches!(
        session.visit_file(QUIET_FILE),
        Err(RuntimeError::BattleInProgress)
    ));

    let events = session.drain_events();
    assert!(matches!(
        events.as_slice(),
        [
            GameEvent::EncounterTriggered {
                kind: EncounterKind::Boss,
                ..
            },
            GameEvent::CombatStarted { .. },
        ]
    ));
    println!("  ✓ boss spawned: {:?}", events[1]);

    // ================================================================
    // PHASE 3: Boss fight
    // ================================================================
    println!("PHASE 3: Boss fight");

    let mut actions = 0;
    while session.battle().is_some() && actions < 1_000 {
        session.dispatch_action(&BattleAction::attack(0));
        actions += 1;
    }
    assert!(session.battle().is_none(), "boss fight did not finish");

    let finished = session.last_battle().expect("finished battle is kept");
    assert!(finished.is_terminal());
    let events = session.drain_events();
    let Some(GameEvent::CombatEnded { outcome, .. }) = events
        .iter()
        .rev()
        .find(|e| matches!(e, GameEvent::CombatEnded { .. }))
    else {
        panic!("combat ended event missing");
    };

    assert_eq!(session.statistics().total_battles, 1);
    match outcome {
        CombatOutcome::Victory => {
            assert!(session.encounters().defeated_bosses.contains(BOSS_FILE));
            assert_eq!(
                session.last_victory().map(|v| v.title.as_str()),
                Some("BOSS DEFEATED!")
            );
            assert_eq!(session.statistics().bosses_defeated, 1);
        }
        CombatOutcome::Defeat => {
            assert!(session.encounters().defeated_bosses.is_empty());
            assert_eq!(session.statistics().defeats, 1);
        }
    }
    println!("  ✓ boss fight ended in {outcome} after {actions} actions");

    // ================================================================
    // PHASE 4: Scripted battle
    // ================================================================
    println!("PHASE 4: Scripted battle");

    let xp_before = session.character().experience;
    session.start_battle(vec![fragile_bug()]).unwrap();
    let state = session
        .dispatch_action(&BattleAction::attack(0))
        .expect("battle state returned");
    assert!(state.is_terminal());
    assert!(session.battle().is_none());
    assert!(session.encounters().defeated_bugs.contains(BUG_HASH));
    assert!(session.character().experience > xp_before);
    assert!(session.dispatch_action(&BattleAction::Defend).is_none());

    let events = session.drain_events();
    assert!(matches!(events.first(), Some(GameEvent::CombatStarted { .. })));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::ExperienceGained { .. }))
    );
    assert!(matches!(
        events.last(),
        Some(GameEvent::CombatEnded {
            outcome: CombatOutcome::Victory,
            ..
        })
    ));
    println!("  ✓ one-HP bug defeated, {} events", events.len());

    // ================================================================
    // PHASE 5: Items, quests, snapshot, reset
    // ================================================================
    println!("PHASE 5: Items, quests, snapshot, reset");

    assert!(matches!(
        session.use_item("item-debug-log"),
        Err(RuntimeError::ItemNotOwned(_))
    ));
    session.inventory_mut().add_item("item-debug-log", 2);
    let used = session.use_item("item-debug-log").unwrap();
    assert!(used.consumed);
    assert_eq!(session.inventory().item_count("item-debug-log"), 1);

    session.start_quest("quest-1").unwrap();
    let rewards = session.complete_quest("quest-1").unwrap();
    assert!(!rewards.log.is_empty());
    assert!(matches!(
        session.complete_quest("quest-1"),
        Err(RuntimeError::Quest(_))
    ));
    let quest_events: Vec<(String, QuestStatus)> = session
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::QuestUpdated { quest_id, status } => Some((quest_id, status)),
            _ => None,
        })
        .collect();
    assert_eq!(
        quest_events,
        vec![
            ("quest-1".to_string(), QuestStatus::Active),
            ("quest-1".to_string(), QuestStatus::Completed),
            ("quest-2".to_string(), QuestStatus::Available),
        ]
    );

    let snapshot = session.snapshot();
    assert_eq!(snapshot.completed_quests.len(), 1);
    assert!(snapshot.battle_state.is_none());
    assert!(snapshot.to_json().unwrap().contains("quest-1"));

    session.reset();
    assert_eq!(session.character(), &hero(30));
    assert_eq!(session.statistics().total_battles, 0);
    assert!(session.encounters().defeated_bugs.is_empty());
    assert!(session.inventory().slots.is_empty());
    println!("  ✓ session reset to its initial state\n");
}

#[test]
fn rejected_actions_leave_the_battle_untouched() {
    let mut session = session(1);
    session.start_battle(vec![fragile_bug()]).unwrap();
    let before = session.battle().cloned();

    let err = session
        .try_dispatch(&BattleAction::use_item("item-caffeine"))
        .unwrap_err();
    assert!(matches!(err, RuntimeError::ItemNotOwned(_)));

    let state = session.dispatch_action(&BattleAction::cast("spell-not-learned", 0));
    assert_eq!(state.cloned(), before);
}

#[test]
fn items_used_in_battle_leave_the_inventory() {
    let mut session = session(1);
    session.inventory_mut().add_item("item-caffeine", 1);
    let mut sturdy = fragile_bug();
    sturdy.stats.health = 500;
    sturdy.stats.max_health = 500;
    session.start_battle(vec![sturdy]).unwrap();

    session
        .try_dispatch(&BattleAction::use_item("item-caffeine"))
        .unwrap();

    assert_eq!(session.inventory().item_count("item-caffeine"), 0);
    assert!(matches!(
        session.use_item("item-caffeine"),
        Err(RuntimeError::BattleInProgress)
    ));
}

#[test]
fn same_seed_sessions_replay_identically() {
    let run = || {
        let mut session = session(10);
        for _ in 0..2 {
            session.visit_file(QUIET_FILE).unwrap();
        }
        session.visit_file(BOSS_FILE).unwrap();
        for _ in 0..25 {
            session.dispatch_action(&BattleAction::attack(0));
        }
        let digest = session
            .battle()
            .or(session.last_battle())
            .map(|battle| hex::encode(battle.digest().unwrap()));
        (session.snapshot(), session.drain_events(), digest)
    };

    let (snapshot, events, digest) = run();
    assert!(digest.as_ref().is_some_and(|d| d.len() == 64));
    assert_eq!((snapshot, events, digest), run());
}
