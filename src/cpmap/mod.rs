//! Main module for cpmap library functionality

pub mod composing;
pub mod config;
pub mod decoding;
pub mod diagnostics;
pub mod exporting;
pub mod formats;
pub mod graph;
pub mod loader;
pub mod parsing;
pub mod raw;
pub mod snapshot;
pub mod splitting;
pub mod testing;
pub mod transforms;
pub mod values;
