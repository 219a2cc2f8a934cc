//! Command builder for the CLI.

use clap::Command;

use super::args::*;

/// Build the `stogen` command.
pub fn build_cli() -> Command {
    Command::new("stogen")
        .about("Generate split columnar record headers from an INI schema")
        .override_usage(
            "\
  stogen <SCHEMA> [-o <FILE>] [-n <NS>] [-I <HEADER>]...
  stogen <SCHEMA> --check
  stogen <SCHEMA> --plan",
        )
        .after_help(
            r#"EXAMPLES:
  stogen tpcc.ini -o tpcc.hh              # header to a file
  stogen tpcc.ini -n bench::tpcc          # wrap records in a namespace
  stogen tpcc.ini -I tpcc_types.h         # extra include
  stogen tpcc.ini --check --strict        # validate, warnings fail
  stogen tpcc.ini --plan                  # layout plan as JSON"#,
        )
        .arg(schema_path_arg())
        .arg(output_arg())
        .arg(namespace_arg())
        .arg(include_arg())
        .arg(no_pragma_once_arg())
        .arg(check_arg())
        .arg(plan_arg())
        .arg(strict_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}
