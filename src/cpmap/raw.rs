//! The column bag: one vector per named global, one entry per checkpoint row
//!
//! Column entries are closed enums. Typed columns carry an explicit
//! `Malformed` case so a bad entry keeps its row (and its original text) instead of
//! shifting every following row.

use crate::cpmap::values::{
    format_bool, format_number, AbilityCountData, CheckpointMissionData, EffectInstanceData,
    HiddenCpTtData, MalformedDataPlaceholder, RadiusVAGoBackData, Vector3D,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The ten recognized global arrays, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnName {
    CpPosition,
    RadiusVaGoBackCp,
    Connections,
    Mission,
    Prime,
    AbilityCount,
    HiddenCpTpRadTt,
    Tp,
    Effect,
    FakeUpperCp,
}

impl ColumnName {
    pub const ALL: [ColumnName; 10] = [
        ColumnName::CpPosition,
        ColumnName::RadiusVaGoBackCp,
        ColumnName::Connections,
        ColumnName::Mission,
        ColumnName::Prime,
        ColumnName::AbilityCount,
        ColumnName::HiddenCpTpRadTt,
        ColumnName::Tp,
        ColumnName::Effect,
        ColumnName::FakeUpperCp,
    ];

    /// The variable name as written in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnName::CpPosition => "CPposition",
            ColumnName::RadiusVaGoBackCp => "Radius_VA_GoBackCP",
            ColumnName::Connections => "Connections",
            ColumnName::Mission => "Mission",
            ColumnName::Prime => "Prime",
            ColumnName::AbilityCount => "AbilityCount",
            ColumnName::HiddenCpTpRadTt => "HiddenCP_TpRad_TT",
            ColumnName::Tp => "TP",
            ColumnName::Effect => "Effect",
            ColumnName::FakeUpperCp => "FakeUpperCP",
        }
    }
}

impl FromStr for ColumnName {
    type Err = String;

    /// Names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnName::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| format!("unknown global variable: {}", s))
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Connections / Prime entries: a literal flag, a number, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tag {
    Flag(bool),
    /// Unparseable literals are kept as NaN
    Number(#[serde(with = "non_finite")] f64),
    #[default]
    Absent,
}

impl Tag {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Tag::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// True when the tag is numeric and an exact multiple of `prime`
    pub fn is_divisible_by(&self, prime: u32) -> bool {
        self.as_number()
            .is_some_and(|n| n % f64::from(prime) == 0.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Flag(b) => write!(f, "{}", format_bool(*b)),
            Tag::Number(n) => write!(f, "{}", format_number(*n)),
            Tag::Absent => write!(f, "False"),
        }
    }
}

/// Serde helper writing non-finite numbers as `"NaN"` / `"inf"` / `"-inf"`,
/// since JSON has no literal for them and would otherwise write `null`.
mod non_finite {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if n.is_finite() {
            serializer.serialize_f64(*n)
        } else {
            serializer.serialize_str(&n.to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(text) => text
                .parse::<f64>()
                .ok()
                .filter(|n| !n.is_finite())
                .ok_or_else(|| D::Error::custom(format!("expected a number, got {:?}", text))),
        }
    }
}

/// One entry of a typed column.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<T> {
    Data(T),
    Flag(bool),
    /// Literal numbers other than the data shape; the format only uses `0`
    Number(f64),
    Absent,
    Malformed(MalformedDataPlaceholder),
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Entry::Absent
    }
}

impl<T> Entry<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Entry::Data(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Entry::Malformed(_))
    }

    pub fn malformed(&self) -> Option<&MalformedDataPlaceholder> {
        match self {
            Entry::Malformed(placeholder) => Some(placeholder),
            _ => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Entry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Data(value) => write!(f, "{}", value),
            Entry::Flag(b) => write!(f, "{}", format_bool(*b)),
            Entry::Number(n) => write!(f, "{}", format_number(*n)),
            Entry::Absent => write!(f, "False"),
            // Written back verbatim so a round trip does not lose the entry
            Entry::Malformed(placeholder) => write!(f, "{}", placeholder.raw),
        }
    }
}

/// Ordered effect list of a single checkpoint
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EffectList(pub Vec<EffectInstanceData>);

impl fmt::Display for EffectList {
    /// An empty list is written as `False`, never `Array()`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "False");
        }
        let effects: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "Array({})", effects.join(", "))
    }
}

/// All ten columns of a document.
///
/// Columns are expected to have equal length; the parser does not enforce this,
/// the composer checks it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawMapData {
    pub cp_position: Vec<Entry<Vector3D>>,
    pub radius_va_go_back: Vec<Entry<RadiusVAGoBackData>>,
    pub connections: Vec<Tag>,
    pub mission: Vec<Entry<CheckpointMissionData>>,
    pub prime: Vec<Tag>,
    pub ability_count: Vec<Entry<AbilityCountData>>,
    pub hidden_cp_tp_rad_tt: Vec<Entry<HiddenCpTtData>>,
    pub tp: Vec<Entry<Vector3D>>,
    pub effect: Vec<Entry<EffectList>>,
    pub fake_upper_cp: Vec<bool>,
}

impl RawMapData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in a column
    pub fn column_len(&self, column: ColumnName) -> usize {
        match column {
            ColumnName::CpPosition => self.cp_position.len(),
            ColumnName::RadiusVaGoBackCp => self.radius_va_go_back.len(),
            ColumnName::Connections => self.connections.len(),
            ColumnName::Mission => self.mission.len(),
            ColumnName::Prime => self.prime.len(),
            ColumnName::AbilityCount => self.ability_count.len(),
            ColumnName::HiddenCpTpRadTt => self.hidden_cp_tp_rad_tt.len(),
            ColumnName::Tp => self.tp.len(),
            ColumnName::Effect => self.effect.len(),
            ColumnName::FakeUpperCp => self.fake_upper_cp.len(),
        }
    }

    /// Rendered elements of a column, in row order
    pub fn rendered_column(&self, column: ColumnName) -> Vec<String> {
        fn render<T: fmt::Display>(items: &[T]) -> Vec<String> {
            items.iter().map(ToString::to_string).collect()
        }

        match column {
            ColumnName::CpPosition => render(&self.cp_position),
            ColumnName::RadiusVaGoBackCp => render(&self.radius_va_go_back),
            ColumnName::Connections => render(&self.connections),
            ColumnName::Mission => render(&self.mission),
            ColumnName::Prime => render(&self.prime),
            ColumnName::AbilityCount => render(&self.ability_count),
            ColumnName::HiddenCpTpRadTt => render(&self.hidden_cp_tp_rad_tt),
            ColumnName::Tp => render(&self.tp),
            ColumnName::Effect => render(&self.effect),
            ColumnName::FakeUpperCp => self
                .fake_upper_cp
                .iter()
                .map(|b| format_bool(*b).to_string())
                .collect(),
        }
    }

    /// Every placeholder in the bag, with its column and row
    pub fn malformed_entries(&self) -> Vec<(ColumnName, usize, &MalformedDataPlaceholder)> {
        fn collect<'a, T>(
            column: ColumnName,
            entries: &'a [Entry<T>],
            out: &mut Vec<(ColumnName, usize, &'a MalformedDataPlaceholder)>,
        ) {
            for (row, entry) in entries.iter().enumerate() {
                if let Some(placeholder) = entry.malformed() {
                    out.push((column, row, placeholder));
                }
            }
        }

        let mut out = Vec::new();
        collect(ColumnName::CpPosition, &self.cp_position, &mut out);
        collect(
            ColumnName::RadiusVaGoBackCp,
            &self.radius_va_go_back,
            &mut out,
        );
        collect(ColumnName::Mission, &self.mission, &mut out);
        collect(ColumnName::AbilityCount, &self.ability_count, &mut out);
        collect(
            ColumnName::HiddenCpTpRadTt,
            &self.hidden_cp_tp_rad_tt,
            &mut out,
        );
        collect(ColumnName::Tp, &self.tp, &mut out);
        collect(ColumnName::Effect, &self.effect, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_round_trip() {
        for column in ColumnName::ALL {
            assert_eq!(column.as_str().parse::<ColumnName>(), Ok(column));
        }
        assert!("cpposition".parse::<ColumnName>().is_err());
    }

    #[test]
    fn test_tag_divisibility() {
        assert!(Tag::Number(143.0).is_divisible_by(11));
        assert!(Tag::Number(143.0).is_divisible_by(13));
        assert!(!Tag::Number(6.0).is_divisible_by(11));
        assert!(!Tag::Flag(true).is_divisible_by(11));
        assert!(!Tag::Number(f64::NAN).is_divisible_by(11));
        assert!(!Tag::Absent.is_divisible_by(13));
    }

    #[test]
    fn test_entry_rendering() {
        assert_eq!(Entry::<Vector3D>::Absent.to_string(), "False");
        assert_eq!(Entry::<Vector3D>::Number(0.0).to_string(), "0");
        assert_eq!(Entry::<Vector3D>::Flag(true).to_string(), "True");
        assert_eq!(
            Entry::<Vector3D>::Malformed(MalformedDataPlaceholder::new("Vector(1)", "bad"))
                .to_string(),
            "Vector(1)"
        );
    }

    #[test]
    fn test_empty_effect_list_renders_false() {
        assert_eq!(EffectList::default().to_string(), "False");
    }

    #[test]
    fn test_rendered_fake_upper_column() {
        let raw = RawMapData {
            fake_upper_cp: vec![true, false],
            ..RawMapData::default()
        };
        assert_eq!(
            raw.rendered_column(ColumnName::FakeUpperCp),
            vec!["True", "False"]
        );
        assert_eq!(raw.column_len(ColumnName::FakeUpperCp), 2);
    }
}
