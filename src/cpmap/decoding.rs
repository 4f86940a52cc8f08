//! Human-readable labels for prime-encoded attributes
//!
//! Several fields pack a set of boolean attributes into one number: the product of
//! a distinct prime per attribute. Decoding tests divisibility against a fixed
//! table and reports the labels in table order. Decoders are pure and never fail;
//! anything that is not a number greater than 1 decodes to no labels.

use crate::cpmap::raw::Tag;
use crate::cpmap::values::{EffectInstanceData, EffectValue, BOUNCE_STATUS};
use serde::Serialize;

type PrimeTable = &'static [(u32, &'static str)];

/// Checkpoint prime switches
const CHECKPOINT_PRIMES: PrimeTable = &[
    (2, "Rocket Punch disabled"),
    (3, "Rising Uppercut disabled"),
    (5, "Seismic Slam disabled"),
    (7, "Centerless upon completion"),
    (11, "Multilevel Level Select"),
    (13, "First checkpoint of a level"),
    (17, "Effect Lock"),
];

const MISSION_PRIMES: PrimeTable = &[
    (2, "No Rocket Punch"),
    (3, "No Uppercut"),
    (5, "No Seismic Slam"),
    (7, "Stallless"),
    (11, "Headbounce"),
    (13, "360 Spin"),
    (17, "Use Rocket Punch First"),
    (19, "Use Uppercut First"),
    (23, "Use Seismic Slam First"),
    (29, "Diagonal Rocket Punch"),
    (31, "Down Diagonal Rocket Punch"),
    (37, "Rocket Punch Bounce"),
];

const ABILITY_EFFECT_PRIMES: PrimeTable = &[
    (2, "Punch Disabled"),
    (3, "Uppercut Disabled"),
    (5, "Slam Disabled"),
    (7, "Force Stall"),
    (11, "No Change to Abilities"),
    (29, "Empowered Punch"),
];

const PERMEATION_EFFECT_PRIMES: PrimeTable = &[
    (2, "Punch Disabled"),
    (3, "Uppercut Disabled"),
    (5, "Slam Disabled"),
    (11, "No Change to Abilities"),
    (29, "Empowered Punch"),
    (31, "Collision not changed"),
];

const CHECKPOINT_EFFECT_PRIMES: PrimeTable = &[
    (2, "Punch Disabled"),
    (3, "Uppercut Disabled"),
    (5, "Slam Disabled"),
    (7, "Centerless"),
    (11, "No Change to Abilities"),
    (29, "Empowered Punch"),
];

/// Shared by entry portals, exit portals and shootable orbs
const PORTAL_AND_ORB_PRIMES: PrimeTable = &[
    (2, "Punch Disabled"),
    (3, "Uppercut Disabled"),
    (5, "Slam Disabled"),
    (11, "No Change to Abilities"),
    (29, "Empowered Punch"),
];

/// Bounce power that stalls the player
const STALL_POWER: f64 = 0.016;

fn decode_product(product: f64, table: PrimeTable) -> Vec<&'static str> {
    if product.is_nan() || product <= 1.0 {
        return Vec::new();
    }
    table
        .iter()
        .filter(|(prime, _)| product % f64::from(*prime) == 0.0)
        .map(|(_, label)| *label)
        .collect()
}

/// Labels for a checkpoint prime tag.
///
/// `True` counts as 1 and so decodes to nothing.
pub fn decode_prime(tag: &Tag) -> Vec<&'static str> {
    match tag {
        Tag::Number(product) => decode_product(*product, CHECKPOINT_PRIMES),
        Tag::Flag(true) => decode_product(1.0, CHECKPOINT_PRIMES),
        Tag::Flag(false) | Tag::Absent => Vec::new(),
    }
}

/// Labels for a mission prime product
pub fn decode_mission(prime_product: i64) -> Vec<&'static str> {
    decode_product(prime_product as f64, MISSION_PRIMES)
}

/// Display name of an effect status
pub fn effect_name(status: i64) -> &'static str {
    match status {
        0 => "Time Effect",
        1 => "Death Effect",
        2 => "Ability Effect",
        3 => "Permeation Effect",
        4 => "Checkpoint Effect",
        5 => "Entry Portal",
        6 => "Exit Portal",
        7 => "Blackhole Effect",
        8 => "Zipline Start",
        9 => "Zipline End",
        10 => "Shootable Orb Effect",
        11 => "Bounce Effect",
        _ => "Unknown Effect",
    }
}

fn effect_prime_table(status: i64) -> Option<PrimeTable> {
    match status {
        2 => Some(ABILITY_EFFECT_PRIMES),
        3 => Some(PERMEATION_EFFECT_PRIMES),
        4 => Some(CHECKPOINT_EFFECT_PRIMES),
        5 | 6 | 10 => Some(PORTAL_AND_ORB_PRIMES),
        _ => None,
    }
}

/// Readable summary of one effect
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedEffect {
    pub name: &'static str,
    pub radius: String,
    /// Empty for statuses that carry no readable value
    pub value: String,
    pub notes: Vec<&'static str>,
}

/// Decode an effect for display.
pub fn decode_effect(effect: &EffectInstanceData) -> DecodedEffect {
    let mut notes = Vec::new();

    if effect.radius < 0.0 {
        match effect.status {
            1 | 2 | 3 | BOUNCE_STATUS => notes.push("Light Shaft"),
            0 => notes.push("Shootable"),
            _ => {}
        }
    }

    let value = match (effect.status, &effect.value) {
        (0, EffectValue::Number(time)) => format!("Time: {}", time),
        (0, value) => format!("Time: {}", value),
        (BOUNCE_STATUS, value) => {
            let power = match value {
                EffectValue::Bounce(bounce) => bounce.power,
                EffectValue::Number(power) => *power,
            };
            if power == STALL_POWER {
                notes.push("Stall effect");
            }
            if power == 0.0 {
                notes.push("Stop effect (kills momentum)");
            }
            format!("Power: {:.3}", power)
        }
        (status, value) => match effect_prime_table(status) {
            Some(table) => {
                let attributes = value
                    .as_number()
                    .map(|product| decode_product(product, table))
                    .unwrap_or_default();
                if attributes.is_empty() {
                    "Attributes: None".to_string()
                } else {
                    format!("Attributes: {}", attributes.join(", "))
                }
            }
            None => String::new(),
        },
    };

    if effect.value.as_number().is_some_and(|n| n < 0.0) {
        notes.push("Resets cooldown");
    }

    DecodedEffect {
        name: effect_name(effect.status),
        radius: format!("Radius: {:.2}", effect.radius.abs()),
        value,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpmap::values::{EffectBounceData, Vector3D};
    use rstest::rstest;

    fn effect(radius: f64, status: i64, value: EffectValue) -> EffectInstanceData {
        EffectInstanceData::new(Vector3D::new(0.0, 0.0, 0.0), radius, status, value)
    }

    #[rstest]
    #[case(Tag::Number(6.0), vec!["Rocket Punch disabled", "Rising Uppercut disabled"])]
    #[case(Tag::Number(1.0), vec![])]
    #[case(Tag::Number(0.0), vec![])]
    #[case(Tag::Number(-6.0), vec![])]
    #[case(Tag::Flag(true), vec![])]
    #[case(Tag::Flag(false), vec![])]
    #[case(Tag::Absent, vec![])]
    #[case(Tag::Number(143.0), vec!["Multilevel Level Select", "First checkpoint of a level"])]
    #[case(Tag::Number(17.0), vec!["Effect Lock"])]
    fn test_decode_prime(#[case] tag: Tag, #[case] expected: Vec<&str>) {
        assert_eq!(decode_prime(&tag), expected);
    }

    #[test]
    fn test_true_decodes_like_one() {
        assert_eq!(
            decode_prime(&Tag::Flag(true)),
            decode_prime(&Tag::Number(1.0))
        );
    }

    #[rstest]
    #[case(0, vec![])]
    #[case(1, vec![])]
    #[case(14, vec!["No Rocket Punch", "Stallless"])]
    #[case(37, vec!["Rocket Punch Bounce"])]
    fn test_decode_mission(#[case] product: i64, #[case] expected: Vec<&str>) {
        assert_eq!(decode_mission(product), expected);
    }

    #[test]
    fn test_time_effect_with_negative_radius() {
        let decoded = decode_effect(&effect(-2.5, 0, EffectValue::Number(3.0)));
        assert_eq!(decoded.name, "Time Effect");
        assert_eq!(decoded.radius, "Radius: 2.50");
        assert_eq!(decoded.value, "Time: 3");
        assert_eq!(decoded.notes, vec!["Shootable"]);
    }

    #[rstest]
    #[case(2.5, "Time: 2.5")]
    #[case(0.125, "Time: 0.125")]
    #[case(-4.0, "Time: -4")]
    fn test_time_effect_uses_shortest_number(#[case] time: f64, #[case] expected: &str) {
        let decoded = decode_effect(&effect(1.0, 0, EffectValue::Number(time)));
        assert_eq!(decoded.value, expected);
    }

    #[rstest]
    #[case(2, 7.0, "Attributes: Force Stall")]
    #[case(3, 31.0, "Attributes: Collision not changed")]
    #[case(4, 14.0, "Attributes: Punch Disabled, Centerless")]
    #[case(5, 1.0, "Attributes: None")]
    #[case(10, 58.0, "Attributes: Punch Disabled, Empowered Punch")]
    fn test_effect_attributes(#[case] status: i64, #[case] value: f64, #[case] expected: &str) {
        let decoded = decode_effect(&effect(1.0, status, EffectValue::Number(value)));
        assert_eq!(decoded.value, expected);
    }

    #[test]
    fn test_bounce_stall_and_light_shaft() {
        let bounce = EffectBounceData::new(Vector3D::new(0.0, 1.0, 0.0), 0.016);
        let decoded = decode_effect(&effect(-1.0, 11, EffectValue::Bounce(bounce)));
        assert_eq!(decoded.name, "Bounce Effect");
        assert_eq!(decoded.value, "Power: 0.016");
        assert_eq!(decoded.notes, vec!["Light Shaft", "Stall effect"]);
    }

    #[test]
    fn test_bounce_with_plain_number_is_power() {
        let decoded = decode_effect(&effect(1.0, 11, EffectValue::Number(0.0)));
        assert_eq!(decoded.value, "Power: 0.000");
        assert_eq!(decoded.notes, vec!["Stop effect (kills momentum)"]);
    }

    #[test]
    fn test_negative_value_resets_cooldown() {
        let decoded = decode_effect(&effect(1.0, 2, EffectValue::Number(-1.0)));
        assert_eq!(decoded.value, "Attributes: None");
        assert_eq!(decoded.notes, vec!["Resets cooldown"]);
    }

    #[test]
    fn test_statuses_without_value_labels() {
        let decoded = decode_effect(&effect(1.0, 7, EffectValue::Number(0.0)));
        assert_eq!(decoded.name, "Blackhole Effect");
        assert_eq!(decoded.value, "");
        assert!(decoded.notes.is_empty());
        assert_eq!(effect_name(42), "Unknown Effect");
    }
}
