//! RawMapData → Map
//!
//! Composition runs in three passes over the rows:
//!
//! 1. Build one checkpoint per row of the position column and copy every column's
//!    entry for that row onto it. Placeholders become absent values.
//! 2. Pick the spawn: the first checkpoint whose prime tag is a multiple of 11. If
//!    there is none, checkpoint 0 is used and a warning is reported.
//! 3. Walk the remaining checkpoints in row order. A prime tag that is a multiple of
//!    13 opens a new level; anything else joins the open level. Checkpoints seen
//!    before the first level opens belong nowhere and are dropped.
//!
//! The only hard failure is an empty position column.

use crate::cpmap::diagnostics::{Diagnostic, Report};
use crate::cpmap::graph::{Checkpoint, Level, Map, Variant};
use crate::cpmap::raw::{ColumnName, Entry, RawMapData, Tag};
use std::fmt;

/// Reasons composition cannot produce a map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// The position column is empty, so there are no checkpoints to compose
    NoCheckpoints,
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeError::NoCheckpoints => write!(
                f,
                "Cannot compose map: raw data is empty or contains no checkpoints"
            ),
        }
    }
}

impl std::error::Error for ComposeError {}

/// Compose the column bag into a checkpoint graph.
pub fn compose(raw: RawMapData) -> Result<Report<Map>, ComposeError> {
    let row_count = raw.cp_position.len();
    if row_count == 0 {
        return Err(ComposeError::NoCheckpoints);
    }

    let mut diagnostics = check_column_lengths(&raw, row_count);
    let checkpoints = build_checkpoints(raw, row_count);

    let spawn_index = match checkpoints.iter().position(Checkpoint::is_spawn_tagged) {
        Some(index) => index,
        None => {
            diagnostics.push(Diagnostic::warning(
                "No spawn point (prime divisible by 11) found. Using checkpoint 0 as default.",
            ));
            0
        }
    };

    let mut spawn = None;
    let mut levels: Vec<Level> = Vec::new();
    let mut dropped = Vec::new();

    for checkpoint in checkpoints {
        if checkpoint.index == spawn_index {
            spawn = Some(checkpoint);
        } else if checkpoint.is_level_start_tagged() {
            levels.push(Level::new(levels.len() + 1, vec![checkpoint]));
        } else if let Some(level) = levels.last_mut() {
            level.checkpoints.push(checkpoint);
        } else {
            dropped.push(checkpoint.index);
        }
    }

    if !dropped.is_empty() {
        diagnostics.push(Diagnostic::info(format!(
            "Checkpoints {:?} appear before any level start and were left out of the map",
            dropped
        )));
    }

    let Some(spawn) = spawn else {
        // spawn_index always comes from 0..row_count
        return Err(ComposeError::NoCheckpoints);
    };

    let mut map = Map::new(spawn);
    map.levels = levels;

    diagnostics.push(Diagnostic::info(format!(
        "Composed {} checkpoints into {} levels, spawn at index {}",
        row_count,
        map.levels.len(),
        map.spawn.index
    )));

    Ok(Report::new(map, diagnostics))
}

/// Report every column whose length differs from the position column
fn check_column_lengths(raw: &RawMapData, row_count: usize) -> Vec<Diagnostic> {
    ColumnName::ALL
        .into_iter()
        .filter_map(|column| {
            let len = raw.column_len(column);
            if len < row_count {
                Some(Diagnostic::warning(format!(
                    "column {} has {} entries for {} checkpoints; missing rows are treated as absent",
                    column, len, row_count
                )))
            } else if len > row_count {
                Some(Diagnostic::warning(format!(
                    "column {} has {} entries for {} checkpoints; extra rows are ignored",
                    column, len, row_count
                )))
            } else {
                None
            }
        })
        .collect()
}

/// Take the entry for each row, padding short columns with a default
fn rows<T: Default>(column: Vec<T>, row_count: usize) -> impl Iterator<Item = T> {
    column
        .into_iter()
        .chain(std::iter::repeat_with(T::default))
        .take(row_count)
}

fn build_checkpoints(raw: RawMapData, row_count: usize) -> Vec<Checkpoint> {
    let RawMapData {
        cp_position,
        radius_va_go_back,
        connections,
        mission,
        prime,
        ability_count,
        hidden_cp_tp_rad_tt,
        tp,
        effect,
        fake_upper_cp,
    } = raw;

    let mut positions = rows(cp_position, row_count);
    let mut go_backs = rows(radius_va_go_back, row_count);
    let mut connections = rows(connections, row_count);
    let mut missions = rows(mission, row_count);
    let mut primes = rows(prime, row_count);
    let mut abilities = rows(ability_count, row_count);
    let mut hiddens = rows(hidden_cp_tp_rad_tt, row_count);
    let mut teleports = rows(tp, row_count);
    let mut effects = rows(effect, row_count);
    let mut fake_uppers = rows(fake_upper_cp, row_count);

    (0..row_count)
        .map(|index| {
            let mut checkpoint = Checkpoint::new(index);
            checkpoint.position = positions.next().and_then(into_data);
            checkpoint.radius_va_go_back = go_backs.next().and_then(into_data);
            checkpoint.connection = connections.next().unwrap_or(Tag::Absent);
            checkpoint.mission = missions.next().map(Variant::from).unwrap_or_default();
            checkpoint.prime = primes.next().unwrap_or(Tag::Absent);
            checkpoint.ability_count = abilities.next().map(Variant::from).unwrap_or_default();
            checkpoint.hidden_cp_tt = hiddens.next().map(Variant::from).unwrap_or_default();
            checkpoint.teleport = teleports.next().map(Variant::from).unwrap_or_default();
            // Only an actual list carries effects; flags, numbers and placeholders do not
            checkpoint.effects = effects
                .next()
                .and_then(into_data)
                .map(|list| list.0)
                .unwrap_or_default();
            checkpoint.is_fake_upper_cp = fake_uppers.next().unwrap_or(false);
            checkpoint
        })
        .collect()
}

fn into_data<T>(entry: Entry<T>) -> Option<T> {
    match entry {
        Entry::Data(value) => Some(value),
        _ => None,
    }
}
