//! Checkpoint graph: a spawn checkpoint plus ordered levels of checkpoints
//!
//! The graph is what editors manipulate. It is built by the composer and written
//! back out by the exporter; in between, callers may freely move, add or remove
//! checkpoints and levels. Field values can no longer be malformed here: the
//! composer has already turned placeholders into absent values.
//!
//! Serde attributes on these types define the JSON snapshot shape (see
//! [`crate::cpmap::snapshot`]); the native document grammar is handled elsewhere.

use crate::cpmap::raw::{Entry, Tag};
use crate::cpmap::values::{
    AbilityCountData, CheckpointMissionData, EffectInstanceData, HiddenCpTtData,
    RadiusVAGoBackData, Vector3D,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A checkpoint field that is either a record, a literal flag, a literal number, or nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Variant<T> {
    Data(T),
    Flag(bool),
    Number(f64),
    Absent,
}

impl<T> Default for Variant<T> {
    fn default() -> Self {
        Variant::Absent
    }
}

impl<T> Variant<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Variant::Data(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Variant::Absent)
    }
}

impl<T> From<Entry<T>> for Variant<T> {
    /// Placeholders carry no usable value and become absent
    fn from(entry: Entry<T>) -> Self {
        match entry {
            Entry::Data(value) => Variant::Data(value),
            Entry::Flag(b) => Variant::Flag(b),
            Entry::Number(n) => Variant::Number(n),
            Entry::Absent | Entry::Malformed(_) => Variant::Absent,
        }
    }
}

impl<T> From<Variant<T>> for Entry<T> {
    fn from(variant: Variant<T>) -> Self {
        match variant {
            Variant::Data(value) => Entry::Data(value),
            Variant::Flag(b) => Entry::Flag(b),
            Variant::Number(n) => Entry::Number(n),
            Variant::Absent => Entry::Absent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Checkpoint {
    /// Row in the flattened order the map was composed from
    pub index: usize,
    pub position: Option<Vector3D>,
    #[serde(rename = "RadiusVAGoBack")]
    pub radius_va_go_back: Option<RadiusVAGoBackData>,
    /// Stored as read; recomputed on export
    pub connection: Tag,
    pub mission: Variant<CheckpointMissionData>,
    pub prime: Tag,
    pub ability_count: Variant<AbilityCountData>,
    pub hidden_cp_tt: Variant<HiddenCpTtData>,
    pub teleport: Variant<Vector3D>,
    pub effects: Vec<EffectInstanceData>,
    #[serde(rename = "IsFakeUpperCP")]
    pub is_fake_upper_cp: bool,
}

impl Checkpoint {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            position: None,
            radius_va_go_back: None,
            connection: Tag::Absent,
            mission: Variant::Absent,
            prime: Tag::Absent,
            ability_count: Variant::Absent,
            hidden_cp_tt: Variant::Absent,
            teleport: Variant::Absent,
            effects: Vec::new(),
            is_fake_upper_cp: false,
        }
    }

    /// Spawn candidates carry a numeric prime tag divisible by 11
    pub fn is_spawn_tagged(&self) -> bool {
        self.prime.is_divisible_by(11)
    }

    /// Level starts carry a numeric prime tag divisible by 13
    pub fn is_level_start_tagged(&self) -> bool {
        self.prime.is_divisible_by(13)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: usize,
    #[serde(rename = "Checkpoints")]
    pub checkpoints: Vec<Checkpoint>,
}

impl Level {
    pub fn new(id: usize, checkpoints: Vec<Checkpoint>) -> Self {
        Self { id, checkpoints }
    }

    /// Index of the entry checkpoint, if the level has any
    pub fn start_index(&self) -> Option<usize> {
        self.checkpoints.first().map(|cp| cp.index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Map {
    pub spawn: Checkpoint,
    pub levels: Vec<Level>,
}

impl Map {
    pub fn new(spawn: Checkpoint) -> Self {
        Self {
            spawn,
            levels: Vec::new(),
        }
    }

    /// Spawn first, then every level's checkpoints in order
    pub fn flattened(&self) -> impl Iterator<Item = &Checkpoint> {
        std::iter::once(&self.spawn).chain(self.levels.iter().flat_map(|l| l.checkpoints.iter()))
    }

    pub fn checkpoint_count(&self) -> usize {
        1 + self.levels.iter().map(|l| l.checkpoints.len()).sum::<usize>()
    }

    pub fn level(&self, id: usize) -> Option<&Level> {
        self.levels.iter().find(|level| level.id == id)
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Map(spawn #{}, {} levels, {} checkpoints)",
            self.spawn.index,
            self.levels.len(),
            self.checkpoint_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpmap::values::MalformedDataPlaceholder;

    #[test]
    fn test_malformed_entries_become_absent() {
        let entry: Entry<Vector3D> = Entry::Malformed(MalformedDataPlaceholder::new("x", "bad"));
        assert!(Variant::from(entry).is_absent());
        assert_eq!(
            Variant::from(Entry::<Vector3D>::Number(0.0)),
            Variant::Number(0.0)
        );
    }

    #[test]
    fn test_flattened_order_and_count() {
        let mut map = Map::new(Checkpoint::new(3));
        map.levels.push(Level::new(1, vec![Checkpoint::new(0), Checkpoint::new(1)]));
        map.levels.push(Level::new(2, vec![Checkpoint::new(2)]));

        let order: Vec<usize> = map.flattened().map(|cp| cp.index).collect();
        assert_eq!(order, vec![3, 0, 1, 2]);
        assert_eq!(map.checkpoint_count(), 4);
        assert_eq!(map.level(2).and_then(Level::start_index), Some(2));
        assert_eq!(
            map.to_string(),
            "Map(spawn #3, 2 levels, 4 checkpoints)"
        );
    }

    #[test]
    fn test_prime_tagging() {
        let mut checkpoint = Checkpoint::new(0);
        checkpoint.prime = Tag::Number(39.0);
        assert!(checkpoint.is_level_start_tagged());
        assert!(!checkpoint.is_spawn_tagged());
    }
}
