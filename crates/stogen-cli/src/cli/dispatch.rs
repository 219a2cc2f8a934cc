//! Dispatch logic: extract params from `ArgMatches` and convert them to
//! command args.

use std::path::PathBuf;

use clap::ArgMatches;
use log::LevelFilter;

use super::ColorChoice;
use crate::commands::generate::{GenerateArgs, Mode};

pub struct GenerateParams {
    pub schema_path: PathBuf,
    pub output: Option<PathBuf>,
    pub namespace: Option<String>,
    pub includes: Vec<String>,
    pub pragma_once: bool,
    pub check: bool,
    pub plan: bool,
    pub strict: bool,
    pub color: ColorChoice,
    pub verbosity: LevelFilter,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: m
                .get_one::<PathBuf>("schema_path")
                .cloned()
                .unwrap_or_default(),
            output: m.get_one::<PathBuf>("output").cloned(),
            namespace: m.get_one::<String>("namespace").cloned(),
            includes: m
                .get_many::<String>("include")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            pragma_once: !m.get_flag("no_pragma_once"),
            check: m.get_flag("check"),
            plan: m.get_flag("plan"),
            strict: m.get_flag("strict"),
            color: parse_color(m),
            verbosity: parse_verbosity(m),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        let mode = if p.check {
            Mode::Check
        } else if p.plan {
            Mode::Plan
        } else {
            Mode::Header
        };
        Self {
            schema_path: p.schema_path,
            output: p.output,
            namespace: p.namespace,
            includes: p.includes,
            pragma_once: p.pragma_once,
            mode,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_verbosity(m: &ArgMatches) -> LevelFilter {
    match m.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
