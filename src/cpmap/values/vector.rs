use super::{parse_number, split_triple};
use crate::cpmap::splitting::strip_call;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point or direction in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__type", rename = "Vector3D", rename_all = "PascalCase")]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Parse `Vector(x, y, z)`. The inner content is split on literal commas.
    pub fn try_parse(text: &str) -> Option<Self> {
        let [x, y, z] = split_triple(strip_call(text, "Vector")?)?;
        Some(Self::new(parse_number(x)?, parse_number(y)?, parse_number(z)?))
    }
}

impl fmt::Display for Vector3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
