//! # cpmap
//!
//! A parser, composer and exporter for checkpoint map save documents.
//!
//! A save document is a flat set of `Global.<Name> = Array(...);` assignments, one
//! array per field and one array entry per checkpoint. This crate turns those
//! parallel arrays into a graph (a spawn checkpoint plus an ordered list of levels)
//! and writes a graph back out as a document.
//!
//! File Layout
//!
//! src/cpmap
//!   ├── splitting     Depth-aware splitting of `Array(...)` contents
//!   ├── values        Typed field values and their try-parse functions
//!   ├── raw           The column bag produced by the document parser
//!   ├── parsing       Document text → RawMapData
//!   ├── graph         Checkpoint / Level / Map
//!   ├── composing     RawMapData → Map
//!   ├── exporting     Map → RawMapData → document text
//!   ├── decoding      Prime / effect / mission labels, display only
//!   ├── diagnostics   Severity-tagged messages returned alongside results
//!   ├── snapshot      JSON / YAML encoding of the graph
//!   ├── formats       Named output formats (cpmap, json, yaml, treeviz)
//!   ├── transforms    Composable stages and the standard pipelines
//!   ├── loader        MapLoader: string or file in, report out
//!   ├── config        Layered configuration over embedded defaults
//!   └── testing       Sample documents shared by the test suite
//!
//! Data flows one way per direction:
//!
//!   text → parsing → RawMapData → composing → Map → exporting → text
//!
//! For the fixtures used across the test suite, see the [testing module](cpmap::testing).

pub mod cpmap;

pub use cpmap::composing::{compose, ComposeError};
pub use cpmap::decoding::{decode_effect, decode_mission, decode_prime, DecodedEffect};
pub use cpmap::exporting::export_to_string;
pub use cpmap::parsing::parse;
