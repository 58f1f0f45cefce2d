//! Player phase: validation and resolution of the submitted action.

use crate::combat::{
    DamageInput, basic_attack, effective_attack, effective_defense, healing, shield_value,
    spell_damage,
};
use crate::env::GameEnv;
use crate::inventory::{ItemKind, ItemOutcome, use_item};
use crate::spell::{Spell, SpellEffectKind};
use crate::state::{
    Actor, BattlePhase, BattleState, CombatEvent, Element, StatusEffect, StatusKind,
};

use super::action::BattleAction;
use super::errors::TurnError;
use super::{enemy, resolve};

const DEFAULT_BUFF_TURNS: u32 = 3;
const DEFAULT_STUN_TURNS: u32 = 1;
const DEFAULT_DEBUFF_TURNS: u32 = 3;
const DEFAULT_DOT_TURNS: u32 = 3;

/// Checks an action against the current state without mutating it.
pub(super) fn validate(
    state: &BattleState,
    action: &BattleAction,
    env: &GameEnv<'_>,
) -> Result<(), TurnError> {
    if state.is_terminal() {
        return Err(TurnError::BattleOver);
    }
    if state.phase != BattlePhase::PlayerTurn {
        return Err(TurnError::NotPlayerTurn);
    }

    match action {
        BattleAction::Attack { .. } | BattleAction::Defend => Ok(()),
        BattleAction::CastSpell { spell_id, .. } => {
            let spell = env.spells().spell_or_err(spell_id)?;
            let player = &state.player;
            if !player.knows_spell(spell_id) {
                return Err(TurnError::SpellNotLearned(spell_id.clone()));
            }
            if spell.mana_cost > player.stats.mana {
                return Err(TurnError::InsufficientMana {
                    spell_id: spell_id.clone(),
                    required: spell.mana_cost,
                    available: player.stats.mana,
                });
            }
            let remaining = player.cooldown(spell_id);
            if remaining > 0 {
                return Err(TurnError::OnCooldown {
                    spell_id: spell_id.clone(),
                    remaining,
                });
            }
            Ok(())
        }
        BattleAction::UseItem { item_id } => {
            let item = env.items().item_or_err(item_id)?;
            if item.kind != ItemKind::Consumable {
                return Err(TurnError::ItemNotUsable(item_id.clone()));
            }
            Ok(())
        }
    }
}

/// Runs the player's turn and, if the battle goes on, the enemy phase.
pub(super) fn run(state: &mut BattleState, action: &BattleAction, env: &GameEnv<'_>) {
    let stunned = resolve::start_turn(state, Actor::Player);

    if !state.player.is_alive() {
        resolve::declare_defeat(state, "Killed by status effect");
        return;
    }

    if stunned {
        let line = format!("{} is stunned and cannot act!", state.player.name);
        state.push_log(Actor::Player, line);
        enemy::run(state, env);
        return;
    }

    state.player.tick_cooldowns();

    match action {
        BattleAction::Attack { target } => attack(state, *target, env),
        BattleAction::CastSpell { spell_id, target } => {
            if let Some(spell) = env.spells().spell(spell_id) {
                cast(state, spell, *target, env);
            }
        }
        BattleAction::Defend => defend(state, env),
        BattleAction::UseItem { item_id } => item(state, item_id, env),
    }

    if state.all_enemies_defeated() {
        resolve::declare_victory(state);
        return;
    }

    enemy::run(state, env);
}

/// The requested target if it is still standing, else the first living enemy.
fn retarget(state: &BattleState, target: usize) -> Option<usize> {
    match state.enemies.get(target) {
        Some(enemy) if enemy.is_alive() => Some(target),
        _ => state.first_living_enemy(),
    }
}

fn player_attack(state: &BattleState) -> i32 {
    let mods = state.player.effects.stat_modifiers();
    effective_attack(state.player.stats.attack, mods.attack)
}

fn player_speed(state: &BattleState) -> i32 {
    let mods = state.player.effects.stat_modifiers();
    (state.player.stats.speed + mods.speed).max(0)
}

fn enemy_defense(state: &BattleState, index: usize) -> i32 {
    let enemy = &state.enemies[index];
    effective_defense(enemy.stats.defense, enemy.effects.stat_modifiers().defense)
}

fn attack(state: &mut BattleState, target: usize, env: &GameEnv<'_>) {
    let Some(index) = retarget(state, target) else {
        return;
    };
    let balance = env.balance();
    let attack = player_attack(state);
    let speed = player_speed(state);
    let defense = enemy_defense(state, index);

    let roll = state.roll(|rng| {
        basic_attack(attack, defense, speed, rng, &balance.damage, &balance.elements)
    });
    let absorption = resolve::deal_damage(
        state,
        Actor::Player,
        Actor::Enemy(index),
        roll.damage,
        Element::None,
        roll.is_critical,
    );

    let line = format!(
        "{} attacks {} for {}{}",
        state.player.name,
        state.enemies[index].name,
        roll.describe(),
        resolve::absorbed_suffix(absorption, true),
    );
    state.push_log(Actor::Player, line);
}

/// Hits one enemy with a damage spell.
///
/// Returns the rendered roll and the shield suffix for the log line.
fn spell_hit(
    state: &mut BattleState,
    spell: &Spell,
    index: usize,
    env: &GameEnv<'_>,
) -> (String, String) {
    let balance = env.balance();
    let input = DamageInput {
        attack: player_attack(state),
        speed: player_speed(state),
        power: spell.effect.value,
        defense: enemy_defense(state, index),
        attack_element: spell.element,
        defender_element: state.enemies[index].element,
    };
    let roll = state.roll(|rng| spell_damage(input, rng, &balance.damage, &balance.elements));
    let absorption = resolve::deal_damage(
        state,
        Actor::Player,
        Actor::Enemy(index),
        roll.damage,
        spell.element,
        roll.is_critical,
    );
    (roll.describe(), resolve::absorbed_suffix(absorption, false))
}

fn cast(state: &mut BattleState, spell: &Spell, target: usize, env: &GameEnv<'_>) {
    let combat = &env.balance().combat;
    let caster = state.player.name.clone();

    resolve::change_mana(state, Actor::Player, -spell.mana_cost);
    state.player.set_cooldown(&spell.id, spell.cooldown);
    state.emit(CombatEvent::SpellResolved {
        caster: Actor::Player,
        spell_id: spell.id.clone(),
    });

    let value = spell.effect.value;
    let line = match spell.effect.kind {
        SpellEffectKind::Damage => {
            let Some(index) = retarget(state, target) else {
                return;
            };
            let (damage, absorbed) = spell_hit(state, spell, index, env);
            let name = &state.enemies[index].name;
            format!("{caster} casts {} on {name} for {damage}{absorbed}", spell.name)
        }
        SpellEffectKind::AoeDamage => {
            let living: Vec<usize> = (0..state.enemies.len())
                .filter(|&i| state.enemies[i].is_alive())
                .collect();
            for index in living {
                let (damage, _) = spell_hit(state, spell, index, env);
                let name = &state.enemies[index].name;
                let line = format!("{} hits {name} for {damage}", spell.name);
                state.push_log(Actor::Player, line);
            }
            return;
        }
        SpellEffectKind::Heal => {
            let amount = healing(value, player_attack(state), combat);
            resolve::change_health(state, Actor::Player, amount);
            let line = format!("{caster} casts {}, healing for {amount} HP", spell.name);
            if let Some(turns) = spell.effect.duration.filter(|&d| d > 1) {
                let name = format!("{} HoT", spell.name);
                let hot = StatusEffect::new(StatusKind::Regen, name, value / 2, turns);
                resolve::apply_status(state, Actor::Player, hot);
            }
            line
        }
        SpellEffectKind::Shield => {
            let amount = shield_value(value, state.player.stats.defense, combat);
            let turns = combat.shield_duration;
            let shield = StatusEffect::new(StatusKind::Shield, spell.name.clone(), amount, turns);
            resolve::apply_status(state, Actor::Player, shield);
            format!("{caster} casts {}, gaining {amount} shield", spell.name)
        }
        SpellEffectKind::Buff => {
            let turns = spell.effect.duration_or(DEFAULT_BUFF_TURNS);
            let buff = StatusEffect::new(StatusKind::AttackUp, spell.name.clone(), value, turns);
            resolve::apply_status(state, Actor::Player, buff);
            format!("{caster} casts {}, ATK +{value}", spell.name)
        }
        SpellEffectKind::Debuff => {
            let Some(index) = retarget(state, target) else {
                return;
            };
            let name = state.enemies[index].name.clone();
            if value == 0 {
                let turns = spell.effect.duration_or(DEFAULT_STUN_TURNS);
                let stun = StatusEffect::new(StatusKind::Stun, spell.name.clone(), 0, turns);
                resolve::apply_status(state, Actor::Enemy(index), stun);
                format!("{caster} casts {}, stunning {name}!", spell.name)
            } else {
                let turns = spell.effect.duration_or(DEFAULT_DEBUFF_TURNS);
                let down =
                    StatusEffect::new(StatusKind::DefenseDown, spell.name.clone(), value, turns);
                resolve::apply_status(state, Actor::Enemy(index), down);
                format!("{caster} casts {}, DEF -{value} on {name}", spell.name)
            }
        }
        SpellEffectKind::Dot => {
            let Some(index) = retarget(state, target) else {
                return;
            };
            let name = state.enemies[index].name.clone();
            let turns = spell.effect.duration_or(DEFAULT_DOT_TURNS);
            let poison = StatusEffect::new(StatusKind::Poison, spell.name.clone(), value, turns);
            resolve::apply_status(state, Actor::Enemy(index), poison);
            format!("{caster} casts {}, poisoning {name} for {value}/turn", spell.name)
        }
        SpellEffectKind::Cleanse => {
            let removed = state.player.effects.cleanse();
            resolve::record_removed(state, Actor::Player, removed);
            format!("{caster} casts {}, removing all debuffs!", spell.name)
        }
        SpellEffectKind::Revive => {
            resolve::change_health(state, Actor::Player, value);
            format!("{caster} casts {}, restoring {value} HP!", spell.name)
        }
        SpellEffectKind::Taunt => {
            format!("{caster} casts {}, drawing enemy attention!", spell.name)
        }
    };
    state.push_log(Actor::Player, line);
}

fn defend(state: &mut BattleState, env: &GameEnv<'_>) {
    let combat = &env.balance().combat;
    let bonus = combat.defend_defense_bonus;
    let stance = StatusEffect::new(StatusKind::DefenseUp, "Defend", bonus, combat.defend_duration);
    resolve::apply_status(state, Actor::Player, stance);

    let line = format!(
        "{} takes a defensive stance! DEF +{bonus} this turn",
        state.player.name
    );
    state.push_log(Actor::Player, line);
}

fn item(state: &mut BattleState, item_id: &str, env: &GameEnv<'_>) {
    let used = use_item(&mut state.player, item_id, env.items());
    let (health, max_health, mana, max_mana) = {
        let stats = &state.player.stats;
        (stats.health, stats.max_health, stats.mana, stats.max_mana)
    };

    match used.outcome {
        ItemOutcome::Healed(delta) if delta != 0 => state.emit(CombatEvent::HealthChanged {
            target: Actor::Player,
            delta,
            health,
            max_health,
        }),
        ItemOutcome::ManaRestored(delta) if delta != 0 => state.emit(CombatEvent::ManaChanged {
            target: Actor::Player,
            delta,
            mana,
            max_mana,
        }),
        ItemOutcome::Buffed {
            kind,
            value,
            duration,
            applied,
        } => {
            if let Some(effect_id) = applied.effect_id() {
                state.emit(CombatEvent::StatusApplied {
                    target: Actor::Player,
                    effect_id,
                    kind,
                    value,
                    duration,
                });
            }
        }
        ItemOutcome::Cleansed(removed) => resolve::record_removed(state, Actor::Player, removed),
        _ => {}
    }

    state.push_log(Actor::Player, used.log);
}
