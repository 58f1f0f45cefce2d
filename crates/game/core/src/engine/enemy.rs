//! Enemy phase: every living enemy acts once, in order.

use crate::ai::{self, EnemyIntent};
use crate::combat::{
    DamageInput, effective_attack, effective_defense, healing, shield_value, spell_damage,
};
use crate::env::GameEnv;
use crate::spell::{Spell, SpellEffectKind};
use crate::state::{Actor, BattlePhase, BattleState, CombatEvent, Element, StatusEffect, StatusKind};

use super::resolve;

/// Monster self-buffs last for the rest of the fight unless the spell says otherwise.
const DEFAULT_SELF_BUFF_TURNS: u32 = 99;
const DEFAULT_STUN_TURNS: u32 = 1;
const DEFAULT_DEBUFF_TURNS: u32 = 3;
const DEFAULT_DOT_TURNS: u32 = 3;

/// Runs the enemy phase, then hands control back to the player.
///
/// Stops early on defeat. Otherwise checks victory (enemies may fall to their
/// own status effects or self-hits) before advancing the turn counter.
pub(super) fn run(state: &mut BattleState, env: &GameEnv<'_>) {
    for index in 0..state.enemies.len() {
        if !state.enemies[index].is_alive() {
            continue;
        }
        state.phase = BattlePhase::EnemyTurn {
            current_enemy: index,
        };
        act(state, index, env);

        if !state.player.is_alive() {
            let cause = format!("Killed by {}", state.enemies[index].name);
            resolve::declare_defeat(state, cause);
            return;
        }
    }

    if state.all_enemies_defeated() {
        resolve::declare_victory(state);
        return;
    }

    let turn = state.turn;
    state.emit(CombatEvent::TurnEnd { turn });
    state.turn += 1;
    state.phase = BattlePhase::PlayerTurn;
}

fn act(state: &mut BattleState, index: usize, env: &GameEnv<'_>) {
    let actor = Actor::Enemy(index);
    let stunned = resolve::start_turn(state, actor);

    let name = state.enemies[index].name.clone();
    if !state.enemies[index].is_alive() {
        state.push_log(actor, format!("{name} was defeated by status effects!"));
        return;
    }
    if stunned {
        state.push_log(actor, format!("{name} is stunned and cannot act!"));
        return;
    }

    let Some((decision, rng)) = ai::choose_action(index, state) else {
        return;
    };
    state.rng = rng;
    state.push_log(actor, decision.log);

    match decision.intent {
        EnemyIntent::Skip => {}
        EnemyIntent::HealPlayer { amount } => {
            resolve::change_health(state, Actor::Player, amount);
        }
        EnemyIntent::HitSelf { amount } => {
            let element = state.enemies[index].element;
            state.emit(CombatEvent::Damage {
                source: actor,
                target: actor,
                amount,
                absorbed: 0,
                element,
                is_critical: false,
            });
            resolve::change_health(state, actor, -amount);
        }
        EnemyIntent::Attack => strike(state, index, None, env),
        EnemyIntent::DoubleAttack => {
            strike(state, index, None, env);
            if state.player.is_alive() {
                strike(state, index, None, env);
            }
        }
        intent @ (EnemyIntent::Special | EnemyIntent::Ultimate | EnemyIntent::Cast { .. }) => {
            if intent == EnemyIntent::Ultimate {
                state.enemies[index].ultimate_used = true;
            }
            let spell = ai::resolve_spell(&state.enemies[index], &intent)
                .and_then(|id| env.spells().spell(id));
            match spell {
                Some(spell) => cast(state, index, spell, env),
                None => strike(state, index, None, env),
            }
        }
    }
}

/// Basic attack or damage spell against the player, through the player's shields.
fn strike(state: &mut BattleState, index: usize, spell: Option<&Spell>, env: &GameEnv<'_>) {
    let balance = env.balance();
    let actor = Actor::Enemy(index);
    let enemy = &state.enemies[index];
    let enemy_mods = enemy.effects.stat_modifiers();
    let player_mods = state.player.effects.stat_modifiers();

    let (power, element) = spell.map_or((0, enemy.element), |s| (s.effect.value, s.element));
    let input = DamageInput {
        attack: effective_attack(enemy.stats.attack, enemy_mods.attack),
        speed: (enemy.stats.speed + enemy_mods.speed).max(0),
        power,
        defense: effective_defense(state.player.stats.defense, player_mods.defense),
        attack_element: element,
        defender_element: Element::None,
    };

    let roll = state.roll(|rng| spell_damage(input, rng, &balance.damage, &balance.elements));
    let absorption =
        resolve::deal_damage(state, actor, Actor::Player, roll.damage, element, roll.is_critical);

    let line = format!(
        "{} deals {} to {}{}",
        state.enemies[index].name,
        roll.describe(),
        state.player.name,
        resolve::absorbed_suffix(absorption, true),
    );
    state.push_log(actor, line);
}

fn cast(state: &mut BattleState, index: usize, spell: &Spell, env: &GameEnv<'_>) {
    let combat = &env.balance().combat;
    let actor = Actor::Enemy(index);
    let value = spell.effect.value;

    state.emit(CombatEvent::SpellResolved {
        caster: actor,
        spell_id: spell.id.clone(),
    });

    match spell.effect.kind {
        SpellEffectKind::Buff => {
            let turns = spell.effect.duration_or(DEFAULT_SELF_BUFF_TURNS);
            let name = spell.name.clone();
            let buff = StatusEffect::new(StatusKind::AttackUp, name, value, turns).stackable();
            resolve::apply_status(state, actor, buff);
        }
        SpellEffectKind::Debuff => {
            let effect = if value == 0 {
                let turns = spell.effect.duration_or(DEFAULT_STUN_TURNS);
                StatusEffect::new(StatusKind::Stun, spell.name.clone(), 0, turns)
            } else {
                let turns = spell.effect.duration_or(DEFAULT_DEBUFF_TURNS);
                StatusEffect::new(StatusKind::DefenseDown, spell.name.clone(), value, turns)
            };
            resolve::apply_status(state, Actor::Player, effect);
        }
        SpellEffectKind::Dot => {
            let turns = spell.effect.duration_or(DEFAULT_DOT_TURNS);
            let poison = StatusEffect::new(StatusKind::Poison, spell.name.clone(), value, turns);
            resolve::apply_status(state, Actor::Player, poison);
        }
        SpellEffectKind::Heal => {
            let enemy = &state.enemies[index];
            let modifier = enemy.effects.stat_modifiers().attack;
            let attack = effective_attack(enemy.stats.attack, modifier);
            let amount = healing(value, attack, combat);
            resolve::change_health(state, actor, amount);
        }
        SpellEffectKind::Revive => {
            resolve::change_health(state, actor, value);
        }
        SpellEffectKind::Shield => {
            let amount = shield_value(value, state.enemies[index].stats.defense, combat);
            let turns = combat.shield_duration;
            let shield = StatusEffect::new(StatusKind::Shield, spell.name.clone(), amount, turns);
            resolve::apply_status(state, actor, shield);
        }
        SpellEffectKind::Cleanse => {
            let removed = state.enemies[index].effects.cleanse();
            resolve::record_removed(state, actor, removed);
        }
        SpellEffectKind::Taunt => {}
        SpellEffectKind::Damage | SpellEffectKind::AoeDamage => {
            strike(state, index, Some(spell), env);
        }
    }
}
