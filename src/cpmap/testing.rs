//! Shared sample documents and fixtures for tests
//!
//! Keep save-format text here instead of scattering it across test files, so a
//! change to the format only has to be reflected in one place.
//!
//! - [`MINIMAL_DOCUMENT`]: a spawn and one level of two checkpoints.
//! - [`TWO_LEVEL_DOCUMENT`]: a spawn and two levels, with every column populated.
//! - [`MESSY_DOCUMENT`]: malformed entries, an unknown global, a repeated
//!   assignment and an invalid effect, for exercising the tolerant paths.

use crate::cpmap::composing::compose;
use crate::cpmap::graph::Map;
use crate::cpmap::parsing::parse;

pub const MINIMAL_DOCUMENT: &str = "variables
{
\tglobal:
\t\t0: CPposition
\t\t4: Prime
}

actions
{
\tGlobal.CPposition = Array(Vector(0, 0, 0), Vector(10, 0, 0), Vector(20, 0, 0));
\tGlobal.Radius_VA_GoBackCP = Array(Vector(2, 0, -1), Vector(2, 0, 0), Vector(2, 0, 1));
\tGlobal.Connections = Array(0, 2, False);
\tGlobal.Prime = Array(11, 13, False);
}";

pub const TWO_LEVEL_DOCUMENT: &str = "actions
{
\tGlobal.CPposition = Array(Vector(0, 5, 0), Vector(10, 5, 0), Vector(20, 5, 0), Vector(30, 5, 0), Vector(40, 5, 0));
\tGlobal.Radius_VA_GoBackCP = Array(Vector(2, 0, -1), Vector(2, 0, 0), Vector(1.5, 90, 1), Vector(2, 0, 0), Vector(2, 0, 3));
\tGlobal.Connections = Array(0, 2, False, 4, False);
\tGlobal.Mission = Array(False, Array(6, 1.5), False, False, Array(14, 2, 3));
\tGlobal.Prime = Array(11, 13, 2, 26, False);
\tGlobal.AbilityCount = Array(False, Array(True, Vector(1, 1, 0)), 0, False, False);
\tGlobal.HiddenCP_TpRad_TT = Array(False, False, Vector(4, 2.5, 30), False, False);
\tGlobal.TP = Array(False, False, Vector(1, 2, 3), 0, False);
\tGlobal.Effect = Array(False, Array(Array(Vector(10, 6, 0), 1, 0, 5), Array(Vector(12, 6, 0), -2, 11, Array(Vector(0, 1, 0), 0.016))), False, 0, Array(Array(Vector(40, 6, 0), 3, 4, 14)));
\tGlobal.FakeUpperCP = Array(False, False, False, True, False);
}";

pub const MESSY_DOCUMENT: &str = "actions
{
\tGlobal.CPposition = Array(Vector(0, 0, 0), Vector(1, 2), Vector(2, 0, 0));
\tGlobal.Prime = Array(11, 13, banana);
\tGlobal.Prime = Array(11, 13, 1);
\tGlobal.Mission = Array(False, Vector(1, 2, 3), False);
\tGlobal.Effect = Array(False, Array(Array(Vector(0, 0, 0), 1, 99, 5), Array(Vector(0, 0, 0), 1, 1, 0)), False);
\tGlobal.Unknown = Array(1, 2, 3);
}";

/// Parse and compose a document, panicking on failure
pub fn compose_document(document: &str) -> Map {
    compose(parse(document).value)
        .unwrap_or_else(|e| panic!("Sample document failed to compose: {}", e))
        .value
}
