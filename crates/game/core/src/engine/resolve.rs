//! State mutations shared by the player and enemy phases.
//!
//! Every helper records the matching [`CombatEvent`] so the phases only
//! decide what happens, never how it is reported.

use crate::state::{
    Absorption, Actor, ApplyOutcome, BattlePhase, BattleState, CombatEvent, Element, StatusEffect,
    StatusEffects, Stats,
};

fn parts_mut(state: &mut BattleState, actor: Actor) -> Option<(&mut Stats, &mut StatusEffects)> {
    match actor {
        Actor::Player => Some((&mut state.player.stats, &mut state.player.effects)),
        Actor::Enemy(index) => state
            .enemies
            .get_mut(index)
            .map(|enemy| (&mut enemy.stats, &mut enemy.effects)),
        Actor::System => None,
    }
}

/// Ticks the actor's status effects at the start of its turn.
///
/// Returns whether the actor was stunned going into the turn. The stun is
/// sampled before the tick so a one-turn stun still costs its turn.
pub(super) fn start_turn(state: &mut BattleState, actor: Actor) -> bool {
    let turn = state.turn;
    state.emit(CombatEvent::TurnStart { turn, actor });

    let label = state.actor_name(actor).to_owned();
    let Some((_, effects)) = parts_mut(state, actor) else {
        return false;
    };
    let stunned = effects.is_stunned();
    let report = effects.tick(&label);

    for line in report.log {
        state.push_log(actor, line);
    }
    for effect in report.expired {
        state.emit(CombatEvent::StatusExpired {
            target: actor,
            effect_id: effect.id,
            kind: effect.kind,
        });
    }
    if report.hp_delta != 0 {
        change_health(state, actor, report.hp_delta);
    }
    stunned
}

/// Applies a clamped health change and reports the actual delta.
pub(super) fn change_health(state: &mut BattleState, actor: Actor, delta: i32) -> i32 {
    let Some((stats, _)) = parts_mut(state, actor) else {
        return 0;
    };
    let applied = stats.apply_health_delta(delta);
    let (health, max_health) = (stats.health, stats.max_health);
    if applied != 0 {
        state.emit(CombatEvent::HealthChanged {
            target: actor,
            delta: applied,
            health,
            max_health,
        });
    }
    applied
}

pub(super) fn change_mana(state: &mut BattleState, actor: Actor, delta: i32) -> i32 {
    let Some((stats, _)) = parts_mut(state, actor) else {
        return 0;
    };
    let applied = stats.apply_mana_delta(delta);
    let (mana, max_mana) = (stats.mana, stats.max_mana);
    if applied != 0 {
        state.emit(CombatEvent::ManaChanged {
            target: actor,
            delta: applied,
            mana,
            max_mana,
        });
    }
    applied
}

pub(super) fn apply_status(
    state: &mut BattleState,
    target: Actor,
    effect: StatusEffect,
) -> ApplyOutcome {
    let (kind, value, duration) = (effect.kind, effect.value, effect.remaining_turns);
    let Some((_, effects)) = parts_mut(state, target) else {
        return ApplyOutcome::Rejected;
    };
    let outcome = effects.apply(effect);
    if let Some(effect_id) = outcome.effect_id() {
        state.emit(CombatEvent::StatusApplied {
            target,
            effect_id,
            kind,
            value,
            duration,
        });
    }
    outcome
}

/// Reports effects removed outside of a tick, such as by cleanse.
pub(super) fn record_removed(state: &mut BattleState, target: Actor, removed: Vec<StatusEffect>) {
    for effect in removed {
        state.emit(CombatEvent::StatusExpired {
            target,
            effect_id: effect.id,
            kind: effect.kind,
        });
    }
}

/// Routes damage through the target's shields, then into its health.
pub(super) fn deal_damage(
    state: &mut BattleState,
    source: Actor,
    target: Actor,
    amount: i32,
    element: Element,
    is_critical: bool,
) -> Absorption {
    let Some((_, effects)) = parts_mut(state, target) else {
        return Absorption::default();
    };
    let absorption = effects.absorb_damage(amount);
    state.emit(CombatEvent::Damage {
        source,
        target,
        amount: absorption.remaining,
        absorbed: absorption.absorbed,
        element,
        is_critical,
    });
    change_health(state, target, -absorption.remaining);
    absorption
}

/// Suffix appended to hit log lines when a shield soaked part of the hit.
pub(super) fn absorbed_suffix(absorption: Absorption, long: bool) -> String {
    match (absorption.absorbed, long) {
        (0, _) => String::new(),
        (n, true) => format!(" ({n} absorbed by shield)"),
        (n, false) => format!(" ({n} absorbed)"),
    }
}

/// Enters `Victory`, awarding the summed xp of every enemy.
pub(super) fn declare_victory(state: &mut BattleState) {
    let xp_gained = state.enemies.iter().map(|e| e.xp_reward).sum();
    state.phase = BattlePhase::Victory {
        xp_gained,
        loot: Vec::new(),
    };
}

pub(super) fn declare_defeat(state: &mut BattleState, cause: impl Into<String>) {
    state.phase = BattlePhase::Defeat {
        cause: cause.into(),
    };
}
