//! Effect instances attached to checkpoints

use super::{format_number, parse_integer, parse_number, Vector3D};
use crate::cpmap::splitting::{split_array_elements, strip_call};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status code of the bounce effect, the only effect with a composite value
pub const BOUNCE_STATUS: i64 = 11;

/// Highest known effect status code
pub const MAX_STATUS: i64 = 11;

/// Launch direction and strength of a bounce pad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__type", rename = "EffectBounceData", rename_all = "PascalCase")]
pub struct EffectBounceData {
    pub direction: Vector3D,
    pub power: f64,
}

impl EffectBounceData {
    pub fn new(direction: Vector3D, power: f64) -> Self {
        Self { direction, power }
    }

    /// Parse `Array(Vector(x, y, z), power)`.
    pub fn try_parse(text: &str) -> Option<Self> {
        let parts = split_array_elements(strip_call(text, "Array")?);
        let [direction, power] = parts.as_slice() else {
            return None;
        };
        Some(Self::new(
            Vector3D::try_parse(direction)?,
            parse_number(power)?,
        ))
    }
}

impl fmt::Display for EffectBounceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array({}, {:.3})", self.direction, self.power)
    }
}

/// Value slot of an effect; its meaning depends on the effect status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EffectValue {
    Number(f64),
    Bounce(EffectBounceData),
}

impl EffectValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            EffectValue::Number(n) => Some(*n),
            EffectValue::Bounce(_) => None,
        }
    }
}

impl fmt::Display for EffectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectValue::Number(n) => write!(f, "{}", format_number(*n)),
            EffectValue::Bounce(bounce) => write!(f, "{}", bounce),
        }
    }
}

/// One effect: where it is, how big, what kind, and its parameter.
///
/// The sign of `radius` is a side channel (light shaft / shootable variants); the
/// magnitude is the actual radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__type", rename = "EffectInstanceData", rename_all = "PascalCase")]
pub struct EffectInstanceData {
    pub position: Vector3D,
    pub radius: f64,
    pub status: i64,
    pub value: EffectValue,
}

impl EffectInstanceData {
    pub fn new(position: Vector3D, radius: f64, status: i64, value: EffectValue) -> Self {
        Self {
            position,
            radius,
            status,
            value,
        }
    }

    /// Parse `Array(position, radius, status, value)`.
    ///
    /// The status must be a known effect code. For the bounce status an
    /// `Array(direction, power)` value becomes a bounce record; every other value
    /// must be a plain number.
    pub fn try_parse(text: &str) -> Option<Self> {
        let parts = split_array_elements(strip_call(text, "Array")?);
        let [position, radius, status, value] = parts.as_slice() else {
            return None;
        };

        let position = Vector3D::try_parse(position)?;
        let radius = parse_number(radius)?;
        let status = parse_integer(status).filter(|s| (0..=MAX_STATUS).contains(s))?;

        let value = if status == BOUNCE_STATUS && value.starts_with("Array(") {
            EffectValue::Bounce(EffectBounceData::try_parse(value)?)
        } else {
            EffectValue::Number(parse_number(value)?)
        };

        Some(Self::new(position, radius, status, value))
    }
}

impl fmt::Display for EffectInstanceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Array({}, {:.3}, {}, {})",
            self.position, self.radius, self.status, self.value
        )
    }
}
