//! Symbol-driven spell generation.
//!
//! A drawn symbol (shape, element, modifier) maps to a spell:
//! - shape picks the effect and target
//! - element scales power
//! - modifier scales mana cost and sets the cooldown

use crate::state::{Element, IdSequence};

use super::{Spell, SpellEffect, SpellEffectKind, SpellTarget};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SpellShape {
    Circle,
    Triangle,
    Square,
    Star,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SpellModifier {
    Swift,
    Heavy,
    Precise,
    Chaotic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellSymbol {
    pub shape: SpellShape,
    pub element: Element,
    pub modifier: SpellModifier,
}

const BASE_POWER: f64 = 20.0;
const BASE_COST: f64 = 15.0;

impl SpellShape {
    fn effect(self) -> (SpellEffectKind, SpellTarget) {
        match self {
            SpellShape::Circle => (SpellEffectKind::Heal, SpellTarget::SelfCast),
            SpellShape::Triangle => (SpellEffectKind::Damage, SpellTarget::Enemy),
            SpellShape::Square => (SpellEffectKind::Shield, SpellTarget::SelfCast),
            SpellShape::Star => (SpellEffectKind::Buff, SpellTarget::SelfCast),
        }
    }
}

impl SpellModifier {
    fn cost_multiplier(self) -> f64 {
        match self {
            SpellModifier::Swift => 0.8,
            SpellModifier::Heavy => 1.5,
            SpellModifier::Precise => 1.2,
            SpellModifier::Chaotic => 0.9,
        }
    }

    fn cooldown(self) -> u32 {
        match self {
            SpellModifier::Heavy => 2,
            SpellModifier::Swift => 0,
            SpellModifier::Precise | SpellModifier::Chaotic => 1,
        }
    }
}

fn power_multiplier(element: Element) -> f64 {
    match element {
        Element::Fire => 1.5,
        Element::Water => 1.0,
        Element::Earth => 1.2,
        Element::Air => 0.8,
        Element::None => 1.0,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds a spell from a symbol, taking the id from `ids` (`spell-gen-N`).
pub fn generate_spell(symbol: SpellSymbol, ids: &mut IdSequence) -> Spell {
    let SpellSymbol {
        shape,
        element,
        modifier,
    } = symbol;
    let (kind, target) = shape.effect();
    let power = (BASE_POWER * power_multiplier(element)).floor() as i32;
    let cost = (BASE_COST * modifier.cost_multiplier()).floor() as i32;

    let name = format!(
        "{} {} {}",
        capitalize(modifier.as_ref()),
        capitalize(element.as_ref()),
        capitalize(shape.as_ref())
    );
    let description = format!("A {modifier} {element}-aspected {shape} spell.");

    Spell::new(
        ids.next_id(),
        name,
        cost,
        modifier.cooldown(),
        element,
        SpellEffect::new(kind, target, power),
    )
    .with_description(description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heavy_fire_triangle() {
        let mut ids = IdSequence::new("spell-gen");
        let spell = generate_spell(
            SpellSymbol {
                shape: SpellShape::Triangle,
                element: Element::Fire,
                modifier: SpellModifier::Heavy,
            },
            &mut ids,
        );

        assert_eq!(spell.id, "spell-gen-1");
        assert_eq!(spell.name, "Heavy Fire Triangle");
        assert_eq!(spell.description, "A heavy fire-aspected triangle spell.");
        assert_eq!(spell.effect.kind, SpellEffectKind::Damage);
        assert_eq!(spell.effect.target, SpellTarget::Enemy);
        assert_eq!(spell.effect.value, 30);
        assert_eq!(spell.mana_cost, 22);
        assert_eq!(spell.cooldown, 2);
    }

    #[test]
    fn ids_advance_per_call() {
        let mut ids = IdSequence::new("spell-gen");
        let symbol = SpellSymbol {
            shape: SpellShape::Circle,
            element: Element::Air,
            modifier: SpellModifier::Swift,
        };
        let first = generate_spell(symbol, &mut ids);
        let second = generate_spell(symbol, &mut ids);

        assert_eq!(second.id, "spell-gen-2");
        assert_eq!(first.effect.value, 16);
        assert_eq!(first.mana_cost, 12);
        assert_eq!(first.cooldown, 0);
        assert_eq!(first.effect.target, SpellTarget::SelfCast);
    }
}
