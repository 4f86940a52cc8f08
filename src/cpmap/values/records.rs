//! Composite per-checkpoint records

use super::{format_number, parse_bool_literal, parse_integer, parse_number, split_triple};
use crate::cpmap::splitting::{split_array_elements, strip_call};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Checkpoint radius, view angle and the index "go back" returns to.
///
/// A go-back index of -1 means none (the spawn). The index is recomputed on export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__type", rename = "RadiusVAGoBackData", rename_all = "PascalCase")]
pub struct RadiusVAGoBackData {
    pub radius: f64,
    pub view_angle: f64,
    pub go_back_index: i64,
}

impl RadiusVAGoBackData {
    pub fn new(radius: f64, view_angle: f64, go_back_index: i64) -> Self {
        Self {
            radius,
            view_angle,
            go_back_index,
        }
    }

    pub fn try_parse(text: &str) -> Option<Self> {
        let [radius, view_angle, go_back] = split_triple(strip_call(text, "Vector")?)?;
        Some(Self::new(
            parse_number(radius)?,
            parse_number(view_angle)?,
            parse_integer(go_back)?,
        ))
    }

    /// Copy of this record pointing at another checkpoint
    pub fn with_go_back_index(self, go_back_index: i64) -> Self {
        Self {
            go_back_index,
            ..self
        }
    }
}

impl fmt::Display for RadiusVAGoBackData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vector({}, {}, {})",
            format_number(self.radius),
            format_number(self.view_angle),
            self.go_back_index
        )
    }
}

/// Mission modifiers: a product of distinct primes plus the mission parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__type", rename = "CheckpointMissionData")]
pub struct CheckpointMissionData {
    #[serde(rename = "MissionPrimeProduct")]
    pub prime_product: i64,
    #[serde(rename = "MissionValues")]
    pub values: Vec<f64>,
}

impl CheckpointMissionData {
    pub fn new(prime_product: i64, values: Vec<f64>) -> Self {
        Self {
            prime_product,
            values,
        }
    }

    /// Parse `Array(p, v1, v2, ...)`.
    pub fn try_parse(text: &str) -> Option<Self> {
        let inner = strip_call(text, "Array")?;
        let mut parts = inner.split(',').map(str::trim);
        let prime_product = parse_integer(parts.next()?)?;
        let values = parts.map(parse_number).collect::<Option<Vec<_>>>()?;
        Some(Self::new(prime_product, values))
    }
}

impl fmt::Display for CheckpointMissionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array({}", self.prime_product)?;
        for value in &self.values {
            write!(f, ", {}", format_number(*value))?;
        }
        write!(f, ")")
    }
}

/// Per-checkpoint ability usage limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__type", rename = "AbilityCountData", rename_all = "PascalCase")]
pub struct AbilityCountData {
    pub is_active: bool,
    pub ability1_state: i64,
    pub ability2_state: i64,
    pub ability3_state: i64,
}

impl AbilityCountData {
    pub fn new(ability1_state: i64, ability2_state: i64, ability3_state: i64) -> Self {
        Self {
            is_active: true,
            ability1_state,
            ability2_state,
            ability3_state,
        }
    }

    /// Parse `Array(True, Vector(a, b, c))`.
    pub fn try_parse(text: &str) -> Option<Self> {
        let parts = split_array_elements(strip_call(text, "Array")?);
        let [active, states] = parts.as_slice() else {
            return None;
        };
        if parse_bool_literal(active) != Some(true) {
            return None;
        }
        let [a, b, c] = split_triple(strip_call(states, "Vector")?)?;
        Some(Self::new(
            parse_integer(a)?,
            parse_integer(b)?,
            parse_integer(c)?,
        ))
    }
}

impl fmt::Display for AbilityCountData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Array({}, Vector({}, {}, {}))",
            super::format_bool(self.is_active),
            self.ability1_state,
            self.ability2_state,
            self.ability3_state
        )
    }
}

/// Hidden checkpoint target, teleport radius and time-trial value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__type", rename = "HiddenCpTtData", rename_all = "PascalCase")]
pub struct HiddenCpTtData {
    pub target_cp_index: i64,
    pub teleport_radius: f64,
    pub time_trial_value: f64,
}

impl HiddenCpTtData {
    pub fn new(target_cp_index: i64, teleport_radius: f64, time_trial_value: f64) -> Self {
        Self {
            target_cp_index,
            teleport_radius,
            time_trial_value,
        }
    }

    pub fn try_parse(text: &str) -> Option<Self> {
        let [target, radius, time_trial] = split_triple(strip_call(text, "Vector")?)?;
        Some(Self::new(
            parse_integer(target)?,
            parse_number(radius)?,
            parse_number(time_trial)?,
        ))
    }
}

impl fmt::Display for HiddenCpTtData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vector({}, {}, {})",
            self.target_cp_index,
            format_number(self.teleport_radius),
            format_number(self.time_trial_value)
        )
    }
}
