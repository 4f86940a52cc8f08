//! Treeviz formatter for checkpoint maps
//!
//! Treeviz renders the graph one line per node, which makes a map easy to scan in a
//! terminal. Nesting is drawn with `├─` / `└─` connectors.
//!
//! The format is:
//! <prefix><connector> <icon> <label>
//!
//! Example:
//!
//!   ⧉ Map: 4 checkpoints, 1 level
//!   ├─ ⚑ Spawn #0
//!   │ └─ ℙ Multilevel Level Select
//!   └─ § Level 1: 3 checkpoints
//!     ├─ ◉ Checkpoint #1
//!     │ ├─ ℙ First checkpoint of a level
//!     │ └─ ✦ Time Effect · Radius: 1.00 · Time: 5
//!     ├─ ◉ Checkpoint #2
//!     └─ ◉ Checkpoint #3
//!
//! Icons
//!     Map: ⧉
//!     Spawn: ⚑
//!     Level: §
//!     Checkpoint: ◉
//!     Prime label: ℙ
//!     Mission: ☰
//!     Abilities: ▣
//!     Hidden checkpoint: ◌
//!     Teleport: ⇢
//!     Effect: ✦
//!     Fake upper checkpoint: ↑

use crate::cpmap::decoding::{decode_effect, decode_mission, decode_prime};
use crate::cpmap::formats::registry::{FormatError, Formatter};
use crate::cpmap::graph::{Checkpoint, Level, Map, Variant};
use crate::cpmap::values::{EffectInstanceData, Vector3D};

const MAX_LABEL_CHARS: usize = 72;

/// Rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreevizOptions {
    /// Show effects as decoded labels instead of their raw `Array(...)` text
    pub decode_effects: bool,
    /// Append checkpoint positions to checkpoint labels
    pub show_positions: bool,
}

/// A node of the rendered tree, before layout
struct TreeNode {
    icon: &'static str,
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(icon: &'static str, label: impl Into<String>) -> Self {
        Self {
            icon,
            label: label.into(),
            children: Vec::new(),
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn position_suffix(position: Option<Vector3D>, options: TreevizOptions) -> String {
    match position {
        Some(p) if options.show_positions => format!(" @ ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z),
        _ => String::new(),
    }
}

fn effect_node(effect: &EffectInstanceData, options: TreevizOptions) -> TreeNode {
    if !options.decode_effects {
        return TreeNode::leaf("✦", effect.to_string());
    }
    let decoded = decode_effect(effect);
    let mut parts = vec![decoded.name.to_string(), decoded.radius];
    if !decoded.value.is_empty() {
        parts.push(decoded.value);
    }
    parts.extend(decoded.notes.iter().map(|note| note.to_string()));
    TreeNode::leaf("✦", parts.join(" · "))
}

fn checkpoint_node(
    checkpoint: &Checkpoint,
    icon: &'static str,
    title: &str,
    options: TreevizOptions,
) -> TreeNode {
    let mut children: Vec<TreeNode> = decode_prime(&checkpoint.prime)
        .into_iter()
        .map(|label| TreeNode::leaf("ℙ", label))
        .collect();

    if let Variant::Data(mission) = &checkpoint.mission {
        let labels = decode_mission(mission.prime_product);
        let label = if labels.is_empty() {
            format!("Mission {}", mission)
        } else {
            format!("Mission: {}", labels.join(", "))
        };
        children.push(TreeNode::leaf("☰", label));
    }
    if let Variant::Data(abilities) = &checkpoint.ability_count {
        children.push(TreeNode::leaf(
            "▣",
            format!(
                "Abilities {}/{}/{}",
                abilities.ability1_state, abilities.ability2_state, abilities.ability3_state
            ),
        ));
    }
    if let Variant::Data(hidden) = &checkpoint.hidden_cp_tt {
        children.push(TreeNode::leaf(
            "◌",
            format!(
                "Hidden checkpoint #{}, radius {:.2}, time trial {}",
                hidden.target_cp_index, hidden.teleport_radius, hidden.time_trial_value
            ),
        ));
    }
    if let Variant::Data(target) = &checkpoint.teleport {
        children.push(TreeNode::leaf("⇢", format!("Teleport {}", target)));
    }
    children.extend(
        checkpoint
            .effects
            .iter()
            .map(|effect| effect_node(effect, options)),
    );
    if checkpoint.is_fake_upper_cp {
        children.push(TreeNode::leaf("↑", "Fake upper checkpoint"));
    }

    TreeNode {
        icon,
        label: format!(
            "{} #{}{}",
            title,
            checkpoint.index,
            position_suffix(checkpoint.position, options)
        ),
        children,
    }
}

fn level_node(level: &Level, options: TreevizOptions) -> TreeNode {
    TreeNode {
        icon: "§",
        label: format!(
            "Level {}: {}",
            level.id,
            plural(level.checkpoints.len(), "checkpoint")
        ),
        children: level
            .checkpoints
            .iter()
            .map(|cp| checkpoint_node(cp, "◉", "Checkpoint", options))
            .collect(),
    }
}

fn map_node(map: &Map, options: TreevizOptions) -> TreeNode {
    let mut children = vec![checkpoint_node(&map.spawn, "⚑", "Spawn", options)];
    children.extend(map.levels.iter().map(|level| level_node(level, options)));
    TreeNode {
        icon: "⧉",
        label: format!(
            "Map: {}, {}",
            plural(map.checkpoint_count(), "checkpoint"),
            plural(map.levels.len(), "level")
        ),
        children,
    }
}

fn format_node(node: &TreeNode, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        node.icon,
        truncate(&node.label, MAX_LABEL_CHARS)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(&node.children, &child_prefix, output);
}

fn format_children(children: &[TreeNode], prefix: &str, output: &mut String) {
    let child_count = children.len();
    for (i, child) in children.iter().enumerate() {
        format_node(child, prefix, i + 1 == child_count, output);
    }
}

pub fn to_treeviz_str_with(map: &Map, options: TreevizOptions) -> String {
    let root = map_node(map, options);
    let mut output = format!("{} {}\n", root.icon, root.label);
    format_children(&root.children, "", &mut output);
    output
}

/// Formatter implementation for treeviz format
#[derive(Debug, Clone, Copy, Default)]
pub struct TreevizFormatter {
    pub options: TreevizOptions,
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, map: &Map) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with(map, self.options))
    }

    fn description(&self) -> &str {
        "Visual tree representation with Unicode icons"
    }
}
