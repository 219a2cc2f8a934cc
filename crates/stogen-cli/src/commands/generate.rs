use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use stogen_lib::{Config, Generator};

use super::CliError;

/// What a run produces once the schema is valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Header,
    Plan,
    Check,
}

pub struct GenerateArgs {
    pub schema_path: PathBuf,
    pub output: Option<PathBuf>,
    pub namespace: Option<String>,
    pub includes: Vec<String>,
    pub pragma_once: bool,
    pub mode: Mode,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: GenerateArgs) {
    match execute(&args) {
        Ok(Some(warnings)) => eprint!("{warnings}"),
        Ok(None) => {}
        Err(e) => {
            eprintln!("{}", e.render(args.color).trim_end());
            std::process::exit(1);
        }
    }
}

/// Load, plan and write. Returns rendered warnings, if any.
///
/// Output is written only after every record type planned cleanly.
pub fn execute(args: &GenerateArgs) -> Result<Option<String>, CliError> {
    let schema = fs::read_to_string(&args.schema_path).map_err(|source| CliError::Read {
        path: args.schema_path.clone(),
        source,
    })?;
    let generate_error = |error: stogen_lib::Error| CliError::Generate {
        error,
        schema: schema.clone(),
        path: args.schema_path.clone(),
    };

    let config = build_config(args).map_err(generate_error)?;
    let generated = Generator::new(&schema)
        .strict(args.strict)
        .run()
        .map_err(generate_error)?;
    info!(
        "`{}`: {} record type(s)",
        args.schema_path.display(),
        generated.plans.len()
    );

    let warnings = (!generated.warnings.is_empty()).then(|| {
        let path = args.schema_path.display().to_string();
        generated
            .warnings
            .printer(&schema)
            .path(&path)
            .colored(args.color)
            .render()
            + "\n"
    });

    let text = match args.mode {
        Mode::Check => return Ok(warnings),
        Mode::Plan => serde_json::to_string_pretty(&generated.dump())? + "\n",
        Mode::Header => generated.emit(&config),
    };
    write_output(args.output.as_deref(), &text)?;

    Ok(warnings)
}

fn build_config(args: &GenerateArgs) -> stogen_lib::Result<Config> {
    let mut config = Config::new().pragma_once(args.pragma_once);
    if let Some(ns) = &args.namespace {
        config = config.namespace_path(ns)?;
    }
    for header in &args.includes {
        config = config.include(header.as_str());
    }
    Ok(config)
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            debug!("writing {} byte(s) to `{}`", text.len(), path.display());
            fs::write(path, text).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| CliError::Write {
                    path: PathBuf::from("<stdout>"),
                    source,
                })
        }
    }
}
