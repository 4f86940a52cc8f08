//! Command-line interface for cpmap
//! This binary inspects, normalizes and snapshots checkpoint map save documents.
//!
//! Usage:
//!   cpmap [--config `<file>`] inspect `<path>` [--positions]     - Print the checkpoint tree
//!   cpmap [--config `<file>`] export `<path>` [--output `<file>`] - Write the normalized document
//!   cpmap [--config `<file>`] snapshot `<path>` [--format json|yaml] - Print a graph snapshot

use clap::{Arg, ArgAction, ArgMatches, Command};
use cpmap::cpmap::config::{CpmapConfig, Loader};
use cpmap::cpmap::diagnostics::Report;
use cpmap::cpmap::exporting::{export_with, ExportOptions};
use cpmap::cpmap::formats::{to_treeviz_str_with, FormatRegistry, TreevizOptions};
use cpmap::cpmap::graph::Map;
use cpmap::cpmap::loader::MapLoader;

fn main() {
    let matches = Command::new("cpmap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and normalizing checkpoint map save documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the composed checkpoint tree")
                .arg(path_arg())
                .arg(
                    Arg::new("positions")
                        .long("positions")
                        .help("Show checkpoint positions")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Compose the document and write it back out")
                .arg(path_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write to this file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Print the composed graph as JSON or YAML")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["json", "yaml"])
                        .default_value("json"),
                ),
        )
        .get_matches();

    let config = load_config(&matches);

    match matches.subcommand() {
        Some(("inspect", sub)) => handle_inspect_command(sub, &config),
        Some(("export", sub)) => handle_export_command(sub, &config),
        Some(("snapshot", sub)) => handle_snapshot_command(sub, &config),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the save document")
        .required(true)
        .index(1)
}

fn load_config(matches: &ArgMatches) -> CpmapConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

/// Load and compose the document at `path`, printing diagnostics to stderr
fn load_map(sub: &ArgMatches, config: &CpmapConfig) -> Map {
    let path = sub
        .get_one::<String>("path")
        .expect("path is a required argument");

    let report: Report<Map> = MapLoader::from_path(path)
        .and_then(|loader| loader.compose())
        .unwrap_or_else(|e| {
            eprintln!("Error loading {}: {}", path, e);
            std::process::exit(1);
        });

    for diagnostic in report.at_least(config.diagnostics.min_severity) {
        eprintln!("{}", diagnostic);
    }
    report.value
}

/// Handle the inspect command
fn handle_inspect_command(sub: &ArgMatches, config: &CpmapConfig) {
    let map = load_map(sub, config);
    let mut options = TreevizOptions::from(&config.inspect);
    if sub.get_flag("positions") {
        options.show_positions = true;
    }
    print!("{}", to_treeviz_str_with(&map, options));
}

/// Handle the export command
fn handle_export_command(sub: &ArgMatches, config: &CpmapConfig) {
    let map = load_map(sub, config);
    let document = export_with(&map, &ExportOptions::from(&config.export));

    match sub.get_one::<String>("output") {
        Some(output) => std::fs::write(output, document).unwrap_or_else(|e| {
            eprintln!("Error writing {}: {}", output, e);
            std::process::exit(1);
        }),
        None => println!("{}", document),
    }
}

/// Handle the snapshot command
fn handle_snapshot_command(sub: &ArgMatches, config: &CpmapConfig) {
    let map = load_map(sub, config);
    let format = sub
        .get_one::<String>("format")
        .expect("format has a default value");

    let output = FormatRegistry::with_defaults()
        .serialize(&map, format)
        .unwrap_or_else(|e| {
            eprintln!("Error formatting snapshot: {}", e);
            std::process::exit(1);
        });
    println!("{}", output);
}
