//! Document text → RawMapData
//!
//! The parser does not try to understand the whole document. It scans for
//! `Global.<Name> = Array(<content>);` assignments anywhere in the text (content may
//! span lines), dispatches each recognized name to its column parser and ignores
//! everything else.
//!
//! Column parsers never fail. Entries that do not have their expected shape become
//! [`Entry::Malformed`] placeholders, except inside effect lists where a bad effect
//! entry is silently dropped from its list.

use crate::cpmap::diagnostics::{Diagnostic, Report};
use crate::cpmap::raw::{ColumnName, EffectList, Entry, RawMapData, Tag};
use crate::cpmap::splitting::{split_array_elements, strip_call};
use crate::cpmap::values::{
    parse_bool_literal, parse_number, AbilityCountData, CheckpointMissionData,
    EffectInstanceData, HiddenCpTtData, MalformedDataPlaceholder, RadiusVAGoBackData, Vector3D,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static GLOBAL_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)Global\.([A-Za-z0-9_]+)\s*=\s*Array\((.*?)\);")
        .expect("global assignment pattern is valid")
});

/// Parse a document into its columns.
pub fn parse(document: &str) -> Report<RawMapData> {
    let mut raw = RawMapData::new();
    let mut diagnostics = Vec::new();
    let mut seen = HashSet::new();

    for captures in GLOBAL_ASSIGNMENT.captures_iter(document) {
        let name = &captures[1];
        let content = captures[2].trim();

        let column = match name.parse::<ColumnName>() {
            Ok(column) => column,
            Err(_) => {
                diagnostics.push(Diagnostic::warning(format!(
                    "unhandled global variable encountered: {}",
                    name
                )));
                continue;
            }
        };

        if !seen.insert(column) {
            diagnostics.push(Diagnostic::warning(format!(
                "global variable {} assigned more than once; using the last assignment",
                column
            )));
        }

        let elements = split_array_elements(content);
        match column {
            ColumnName::CpPosition => {
                raw.cp_position = parse_record_column(&elements, Vector3D::try_parse)
            }
            ColumnName::RadiusVaGoBackCp => {
                raw.radius_va_go_back =
                    parse_record_column(&elements, RadiusVAGoBackData::try_parse)
            }
            ColumnName::Connections => raw.connections = parse_tag_column(&elements),
            ColumnName::Prime => raw.prime = parse_tag_column(&elements),
            ColumnName::Mission => raw.mission = elements.iter().map(|e| parse_mission(e)).collect(),
            ColumnName::AbilityCount => {
                raw.ability_count = elements.iter().map(|e| parse_ability_count(e)).collect()
            }
            ColumnName::HiddenCpTpRadTt => {
                raw.hidden_cp_tp_rad_tt = elements.iter().map(|e| parse_hidden_cp(e)).collect()
            }
            ColumnName::Tp => raw.tp = elements.iter().map(|e| parse_teleport(e)).collect(),
            ColumnName::Effect => raw.effect = elements.iter().map(|e| parse_effects(e)).collect(),
            ColumnName::FakeUpperCp => {
                raw.fake_upper_cp = elements
                    .iter()
                    .map(|e| parse_bool_literal(e).unwrap_or(false))
                    .collect()
            }
        }
    }

    for (column, row, placeholder) in raw.malformed_entries() {
        diagnostics.push(Diagnostic::warning(format!(
            "{}[{}]: {} ({})",
            column, row, placeholder.error, placeholder.raw
        )));
    }

    Report::new(raw, diagnostics)
}

/// Vector-shaped columns: record or placeholder
fn parse_record_column<T>(elements: &[String], try_parse: fn(&str) -> Option<T>) -> Vec<Entry<T>> {
    elements
        .iter()
        .map(|element| match try_parse(element) {
            Some(value) => Entry::Data(value),
            None => Entry::Malformed(MalformedDataPlaceholder::new(
                element.as_str(),
                "Invalid Vector-like format",
            )),
        })
        .collect()
}

/// Connections / Prime: `True`/`False` or a number; unparseable numbers are kept as NaN.
fn parse_tag_column(elements: &[String]) -> Vec<Tag> {
    elements
        .iter()
        .map(|element| match parse_bool_literal(element) {
            Some(flag) => Tag::Flag(flag),
            None => Tag::Number(parse_number(element).unwrap_or(f64::NAN)),
        })
        .collect()
}

fn parse_mission(element: &str) -> Entry<CheckpointMissionData> {
    if let Some(flag) = parse_bool_literal(element) {
        return Entry::Flag(flag);
    }
    match CheckpointMissionData::try_parse(element) {
        Some(mission) => Entry::Data(mission),
        None => Entry::Malformed(MalformedDataPlaceholder::new(
            element,
            "Invalid Mission format",
        )),
    }
}

fn parse_ability_count(element: &str) -> Entry<AbilityCountData> {
    if parse_bool_literal(element) == Some(false) {
        return Entry::Flag(false);
    }
    if element == "0" {
        return Entry::Number(0.0);
    }
    match AbilityCountData::try_parse(element) {
        Some(ability) => Entry::Data(ability),
        None => Entry::Malformed(MalformedDataPlaceholder::new(
            element,
            "Invalid AbilityCount format",
        )),
    }
}

fn parse_hidden_cp(element: &str) -> Entry<HiddenCpTtData> {
    if parse_bool_literal(element) == Some(false) {
        return Entry::Flag(false);
    }
    match HiddenCpTtData::try_parse(element) {
        Some(hidden) => Entry::Data(hidden),
        None => Entry::Malformed(MalformedDataPlaceholder::new(
            element,
            "Invalid HiddenCpTtData format",
        )),
    }
}

fn parse_teleport(element: &str) -> Entry<Vector3D> {
    if parse_bool_literal(element) == Some(false) {
        return Entry::Flag(false);
    }
    if element == "0" {
        return Entry::Number(0.0);
    }
    match Vector3D::try_parse(element) {
        Some(target) => Entry::Data(target),
        None => Entry::Malformed(MalformedDataPlaceholder::new(element, "Invalid TP format")),
    }
}

/// An effect list. Entries that fail their own shape check are dropped, not reported.
fn parse_effects(element: &str) -> Entry<EffectList> {
    if parse_bool_literal(element) == Some(false) {
        return Entry::Flag(false);
    }
    if element == "0" {
        return Entry::Number(0.0);
    }
    match strip_call(element, "Array") {
        Some(inner) => Entry::Data(EffectList(
            split_array_elements(inner)
                .iter()
                .filter_map(|effect| EffectInstanceData::try_parse(effect))
                .collect(),
        )),
        None => Entry::Malformed(MalformedDataPlaceholder::new(
            element,
            "Invalid Effect format",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpmap::values::EffectValue;

    fn wrap(name: &str, content: &str) -> String {
        format!("actions\n{{\n\tGlobal.{} = Array({});\n}}", name, content)
    }

    #[test]
    fn test_parses_positions_and_placeholders() {
        let report = parse(&wrap("CPposition", "Vector(1, 2, 3), Vector(1, 2), False"));
        let positions = &report.value.cp_position;
        assert_eq!(positions.len(), 3);
        assert_eq!(positions[0], Entry::Data(Vector3D::new(1.0, 2.0, 3.0)));
        assert!(positions[1].is_malformed());
        assert_eq!(
            positions[2].malformed().map(|p| p.raw.as_str()),
            Some("False")
        );
        assert_eq!(report.warnings().count(), 2);
    }

    #[test]
    fn test_tag_columns_never_produce_placeholders() {
        let report = parse(&wrap("Prime", "11, TRUE, false, 2.5, junk"));
        let prime = &report.value.prime;
        assert_eq!(prime[0], Tag::Number(11.0));
        assert_eq!(prime[1], Tag::Flag(true));
        assert_eq!(prime[2], Tag::Flag(false));
        assert_eq!(prime[3], Tag::Number(2.5));
        assert!(prime[4].as_number().is_some_and(f64::is_nan));
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_mission_column() {
        let report = parse(&wrap("Mission", "False, Array(6, 1.5), Vector(1, 2, 3)"));
        let mission = &report.value.mission;
        assert_eq!(mission[0], Entry::Flag(false));
        assert_eq!(
            mission[1],
            Entry::Data(CheckpointMissionData::new(6, vec![1.5]))
        );
        assert!(mission[2].is_malformed());
    }

    #[test]
    fn test_ability_count_column() {
        let report = parse(&wrap(
            "AbilityCount",
            "False, 0, Array(True, Vector(1, 1, 0)), 5",
        ));
        let ability = &report.value.ability_count;
        assert_eq!(ability[0], Entry::Flag(false));
        assert_eq!(ability[1], Entry::Number(0.0));
        assert_eq!(ability[2], Entry::Data(AbilityCountData::new(1, 1, 0)));
        assert!(ability[3].is_malformed());
    }

    #[test]
    fn test_teleport_and_hidden_columns() {
        let report = parse(&format!(
            "{}\n{}",
            wrap("TP", "False, 0, Vector(4, 5, 6)"),
            wrap("HiddenCP_TpRad_TT", "False, Vector(2, 1.5, 0), 0")
        ));
        assert_eq!(report.value.tp[1], Entry::Number(0.0));
        assert_eq!(
            report.value.tp[2],
            Entry::Data(Vector3D::new(4.0, 5.0, 6.0))
        );
        assert_eq!(
            report.value.hidden_cp_tp_rad_tt[1],
            Entry::Data(HiddenCpTtData::new(2, 1.5, 0.0))
        );
        // Hidden checkpoints have no `0` shorthand
        assert!(report.value.hidden_cp_tp_rad_tt[2].is_malformed());
    }

    #[test]
    fn test_effect_list_drops_malformed_entries() {
        let report = parse(&wrap(
            "Effect",
            "Array(Array(Vector(0,0,0), 1.0, 99, 0), Array(Vector(0,0,0), 1.0, 0, 5.0))",
        ));
        let Entry::Data(list) = &report.value.effect[0] else {
            panic!("expected an effect list");
        };
        assert_eq!(list.0.len(), 1);
        assert_eq!(list.0[0].status, 0);
        assert_eq!(list.0[0].value, EffectValue::Number(5.0));
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_effect_column_shorthands() {
        let report = parse(&wrap("Effect", "False, 0, Array(), Vector(1, 2, 3)"));
        let effect = &report.value.effect;
        assert_eq!(effect[0], Entry::Flag(false));
        assert_eq!(effect[1], Entry::Number(0.0));
        assert_eq!(effect[2], Entry::Data(EffectList::default()));
        assert!(effect[3].is_malformed());
    }

    #[test]
    fn test_fake_upper_column() {
        let report = parse(&wrap("FakeUpperCP", "True, False, 0"));
        assert_eq!(report.value.fake_upper_cp, vec![true, false, false]);
    }

    #[test]
    fn test_unknown_names_are_skipped_with_a_warning() {
        let report = parse(&wrap("Unused", "1, 2, 3"));
        assert_eq!(report.value, RawMapData::default());
        assert_eq!(report.warnings().count(), 1);
        assert!(report.diagnostics[0].message.contains("Unused"));
    }

    #[test]
    fn test_repeated_assignment_keeps_the_last() {
        let report = parse(&format!(
            "{}\n{}",
            wrap("Prime", "1"),
            wrap("Prime", "2, 3")
        ));
        assert_eq!(report.value.prime, vec![Tag::Number(2.0), Tag::Number(3.0)]);
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_multiline_content() {
        let document = "Global.CPposition = Array(\n\tVector(0, 0, 0),\n\tVector(1, 1, 1)\n);";
        let report = parse(document);
        assert_eq!(report.value.cp_position.len(), 2);
    }

    #[test]
    fn test_empty_document() {
        let report = parse("");
        assert_eq!(report.value, RawMapData::default());
        assert!(report.diagnostics.is_empty());
    }
}
