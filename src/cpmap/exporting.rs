//! Map → RawMapData → document text
//!
//! Export flattens the graph to `[spawn, level 1..., level 2..., ...]` and copies
//! stored fields back into columns, except for two fields that are derived from the
//! checkpoint's position in that order:
//!
//! - Connections: row 0 is always `0`. The last checkpoint of a level and the last
//!   row overall get `False`; every other row points at the next row.
//! - Go-back index (only where a checkpoint has go-back data): row 0 gets `-1`, the
//!   first checkpoint of a level gets `0` (the spawn) and every other row gets the
//!   previous row.
//!
//! Export never writes these values into the caller's graph. Use [`relink`] to
//! update a graph in place.

use crate::cpmap::graph::{Checkpoint, Map};
use crate::cpmap::raw::{ColumnName, EffectList, Entry, RawMapData, Tag};

/// Formatting knobs for the document writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// One level of indentation
    pub indent: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
        }
    }
}

/// Values derived for one row of the flattened map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedLinks {
    pub connection: Tag,
    /// `None` when the checkpoint has no go-back data to carry it
    pub go_back_index: Option<i64>,
}

/// Where a checkpoint sits in the flattened order
#[derive(Debug, Clone, Copy)]
struct RowPlacement {
    first_of_level: bool,
    last_of_level: bool,
}

/// Flattened checkpoints with their level placement
fn placed_rows(map: &Map) -> Vec<(&Checkpoint, RowPlacement)> {
    let mut rows = vec![(
        &map.spawn,
        RowPlacement {
            first_of_level: false,
            last_of_level: false,
        },
    )];
    for level in &map.levels {
        let last = level.checkpoints.len().saturating_sub(1);
        for (position, checkpoint) in level.checkpoints.iter().enumerate() {
            rows.push((
                checkpoint,
                RowPlacement {
                    first_of_level: position == 0,
                    last_of_level: position == last,
                },
            ));
        }
    }
    rows
}

fn derive_row(
    row: usize,
    row_count: usize,
    checkpoint: &Checkpoint,
    placement: RowPlacement,
) -> DerivedLinks {
    let is_last_row = row + 1 == row_count;
    let connection = if row == 0 {
        Tag::Number(0.0)
    } else if placement.last_of_level || is_last_row {
        Tag::Flag(false)
    } else {
        Tag::Number((row + 1) as f64)
    };

    let go_back_index = checkpoint.radius_va_go_back.map(|_| {
        if row == 0 {
            -1
        } else if placement.first_of_level {
            0
        } else {
            row as i64 - 1
        }
    });

    DerivedLinks {
        connection,
        go_back_index,
    }
}

/// Connections and go-back indices for every row of the flattened map
pub fn derive_links(map: &Map) -> Vec<DerivedLinks> {
    let rows = placed_rows(map);
    let row_count = rows.len();
    rows.into_iter()
        .enumerate()
        .map(|(row, (checkpoint, placement))| derive_row(row, row_count, checkpoint, placement))
        .collect()
}

/// Flatten the graph back into columns, with derived fields recomputed.
pub fn flatten(map: &Map) -> RawMapData {
    let mut raw = RawMapData::new();
    let links = derive_links(map);

    for (checkpoint, link) in map.flattened().zip(links) {
        raw.cp_position
            .push(checkpoint.position.map_or(Entry::Absent, Entry::Data));
        raw.radius_va_go_back.push(
            match (checkpoint.radius_va_go_back, link.go_back_index) {
                (Some(data), Some(index)) => Entry::Data(data.with_go_back_index(index)),
                _ => Entry::Absent,
            },
        );
        raw.connections.push(link.connection);
        raw.mission.push(checkpoint.mission.clone().into());
        raw.prime.push(checkpoint.prime);
        raw.ability_count
            .push(checkpoint.ability_count.clone().into());
        raw.hidden_cp_tp_rad_tt
            .push(checkpoint.hidden_cp_tt.clone().into());
        raw.tp.push(checkpoint.teleport.clone().into());
        raw.effect
            .push(Entry::Data(EffectList(checkpoint.effects.clone())));
        raw.fake_upper_cp.push(checkpoint.is_fake_upper_cp);
    }

    raw
}

/// Write the go-back indices export would produce into the graph itself.
pub fn relink(map: &mut Map) {
    let links = derive_links(map);
    let checkpoints = std::iter::once(&mut map.spawn).chain(
        map.levels
            .iter_mut()
            .flat_map(|level| level.checkpoints.iter_mut()),
    );
    for (checkpoint, link) in checkpoints.zip(links) {
        if let (Some(data), Some(index)) = (checkpoint.radius_va_go_back.as_mut(), link.go_back_index)
        {
            data.go_back_index = index;
        }
    }
}

/// Render the `variables` block and the `actions` block for a column bag.
pub fn render_document(raw: &RawMapData, options: &ExportOptions) -> String {
    let indent = options.indent.as_str();
    let mut output = String::new();

    output.push_str("variables\n{\n");
    output.push_str(&format!("{}global:\n", indent));
    for (slot, column) in ColumnName::ALL.iter().enumerate() {
        output.push_str(&format!("{indent}{indent}{}: {}\n", slot, column));
    }
    output.push_str("}\n\nactions\n{\n");

    let lines: Vec<String> = ColumnName::ALL
        .iter()
        .map(|column| render_assignment(raw, *column, indent))
        .collect();
    output.push_str(&lines.join("\n"));
    output.push_str("\n}");

    output
}

/// One `Global.<Name> = Array(...);` line
pub fn render_assignment(raw: &RawMapData, column: ColumnName, indent: &str) -> String {
    format!(
        "{}Global.{} = Array({});",
        indent,
        column,
        raw.rendered_column(column).join(", ")
    )
}

/// Export a map with default options.
pub fn export_to_string(map: &Map) -> String {
    export_with(map, &ExportOptions::default())
}

pub fn export_with(map: &Map, options: &ExportOptions) -> String {
    render_document(&flatten(map), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpmap::graph::{Level, Variant};
    use crate::cpmap::values::{CheckpointMissionData, RadiusVAGoBackData, Vector3D};

    fn checkpoint(index: usize, go_back: bool) -> Checkpoint {
        let mut cp = Checkpoint::new(index);
        cp.position = Some(Vector3D::new(index as f64, 0.0, 0.0));
        if go_back {
            cp.radius_va_go_back = Some(RadiusVAGoBackData::new(2.0, 0.0, 99));
        }
        cp
    }

    fn spawn_and_one_level() -> Map {
        let mut map = Map::new(checkpoint(0, true));
        map.levels.push(Level::new(
            1,
            vec![checkpoint(1, true), checkpoint(2, true)],
        ));
        map
    }

    #[test]
    fn test_connections_for_single_level() {
        let raw = flatten(&spawn_and_one_level());
        assert_eq!(
            raw.connections,
            vec![Tag::Number(0.0), Tag::Number(2.0), Tag::Flag(false)]
        );
    }

    #[test]
    fn test_go_back_for_single_level() {
        let raw = flatten(&spawn_and_one_level());
        let go_backs: Vec<i64> = raw
            .radius_va_go_back
            .iter()
            .map(|entry| entry.data().map(|d| d.go_back_index).unwrap())
            .collect();
        assert_eq!(go_backs, vec![-1, 0, 1]);
    }

    #[test]
    fn test_export_does_not_mutate_the_graph() {
        let map = spawn_and_one_level();
        let before = map.clone();
        let _ = export_to_string(&map);
        assert_eq!(map, before);
    }

    #[test]
    fn test_relink_updates_in_place() {
        let mut map = spawn_and_one_level();
        relink(&mut map);
        assert_eq!(map.spawn.radius_va_go_back.unwrap().go_back_index, -1);
        assert_eq!(
            map.levels[0].checkpoints[1]
                .radius_va_go_back
                .unwrap()
                .go_back_index,
            1
        );
    }

    #[test]
    fn test_multi_level_links() {
        let mut map = Map::new(checkpoint(0, true));
        map.levels
            .push(Level::new(1, vec![checkpoint(1, true), checkpoint(2, true)]));
        map.levels.push(Level::new(
            2,
            vec![checkpoint(3, true), checkpoint(4, false), checkpoint(5, true)],
        ));

        let links = derive_links(&map);
        let connections: Vec<Tag> = links.iter().map(|l| l.connection).collect();
        assert_eq!(
            connections,
            vec![
                Tag::Number(0.0),
                Tag::Number(2.0),
                Tag::Flag(false),
                Tag::Number(4.0),
                Tag::Number(5.0),
                Tag::Flag(false),
            ]
        );
        let go_backs: Vec<Option<i64>> = links.iter().map(|l| l.go_back_index).collect();
        assert_eq!(
            go_backs,
            vec![Some(-1), Some(0), Some(1), Some(0), None, Some(4)]
        );
    }

    #[test]
    fn test_single_checkpoint_level_is_closed() {
        let mut map = Map::new(checkpoint(0, false));
        map.levels.push(Level::new(1, vec![checkpoint(1, true)]));
        map.levels.push(Level::new(2, vec![checkpoint(2, true)]));
        let connections: Vec<Tag> = derive_links(&map).iter().map(|l| l.connection).collect();
        assert_eq!(
            connections,
            vec![Tag::Number(0.0), Tag::Flag(false), Tag::Flag(false)]
        );
    }

    #[test]
    fn test_spawn_only_map() {
        let map = Map::new(checkpoint(0, true));
        let links = derive_links(&map);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].connection, Tag::Number(0.0));
        assert_eq!(links[0].go_back_index, Some(-1));
    }

    #[test]
    fn test_rendering_absent_values_and_empty_effects() {
        let mut map = Map::new(Checkpoint::new(0));
        map.spawn.mission = Variant::Data(CheckpointMissionData::new(6, vec![1.5]));
        map.spawn.prime = Tag::Number(11.0);
        let document = export_to_string(&map);

        assert!(document.contains("\tGlobal.CPposition = Array(False);"));
        assert!(document.contains("\tGlobal.Radius_VA_GoBackCP = Array(False);"));
        assert!(document.contains("\tGlobal.Connections = Array(0);"));
        assert!(document.contains("\tGlobal.Mission = Array(Array(6, 1.500));"));
        assert!(document.contains("\tGlobal.Prime = Array(11);"));
        assert!(document.contains("\tGlobal.Effect = Array(False);"));
        assert!(document.contains("\tGlobal.FakeUpperCP = Array(False);"));
    }

    #[test]
    fn test_document_layout() {
        let document = export_with(
            &Map::new(Checkpoint::new(0)),
            &ExportOptions {
                indent: "  ".to_string(),
            },
        );
        let lines: Vec<&str> = document.lines().collect();
        assert_eq!(lines[0], "variables");
        assert_eq!(lines[1], "{");
        assert_eq!(lines[2], "  global:");
        assert_eq!(lines[3], "    0: CPposition");
        assert_eq!(lines[12], "    9: FakeUpperCP");
        assert_eq!(lines[13], "}");
        assert_eq!(lines[14], "");
        assert_eq!(lines[15], "actions");
        assert_eq!(lines[16], "{");
        assert!(lines[17].starts_with("  Global.CPposition = "));
        assert!(lines[26].starts_with("  Global.FakeUpperCP = "));
        assert_eq!(lines[27], "}");
        assert!(!document.ends_with('\n'));
    }
}
