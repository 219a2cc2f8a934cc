//! Argument builders for the `stogen` command.
//!
//! Each function returns a `clap::Arg` that `commands.rs` composes.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Schema file (positional).
pub fn schema_path_arg() -> Arg {
    Arg::new("schema_path")
        .value_name("SCHEMA")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("INI schema describing the record types")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write the header to FILE instead of stdout")
}

/// Wrapping namespace (-n/--namespace).
pub fn namespace_arg() -> Arg {
    Arg::new("namespace")
        .short('n')
        .long("namespace")
        .value_name("NS")
        .help("Namespace wrapping every record, e.g. bench::tpcc")
}

/// Extra includes (-I/--include), repeatable.
pub fn include_arg() -> Arg {
    Arg::new("include")
        .short('I')
        .long("include")
        .value_name("HEADER")
        .action(ArgAction::Append)
        .help("Extra #include line; bare names are quoted")
}

/// Omit `#pragma once` (--no-pragma-once).
pub fn no_pragma_once_arg() -> Arg {
    Arg::new("no_pragma_once")
        .long("no-pragma-once")
        .action(ArgAction::SetTrue)
        .help("Don't start the header with #pragma once")
}

/// Validate only (--check).
pub fn check_arg() -> Arg {
    Arg::new("check")
        .long("check")
        .action(ArgAction::SetTrue)
        .conflicts_with("plan")
        .help("Load and plan the schema, print diagnostics, emit nothing")
}

/// Print the layout plan (--plan).
pub fn plan_arg() -> Arg {
    Arg::new("plan")
        .long("plan")
        .action(ArgAction::SetTrue)
        .help("Print the layout plan as JSON instead of C++")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Log verbosity (-v), repeatable.
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Log more (-v info, -vv debug, -vvv trace)")
}
