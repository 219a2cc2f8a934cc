#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Columnar record generator.
//!
//! Turns an INI-style schema into C++ headers that lay every record type out
//! as columns grouped into storage cells by split policies.
//!
//! Pipeline: [`schema::load`] → [`layout::plan`] → [`emit::emit_record`].
//! [`Generator`] wires the stages together and turns failures into
//! [`Diagnostics`].
//!
//! # Example
//!
//! ```
//! use stogen_lib::{Config, Generator};
//!
//! let source = "[point]\nx = int32_t\ny = int32_t\n";
//! let generated = Generator::new(source).run().unwrap();
//! let header = generated.emit(&Config::new());
//! assert!(header.contains("enum class NamedColumn : int {"));
//! ```

pub mod diagnostics;
pub mod emit;
pub mod layout;
pub mod schema;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use emit::{Config, emit_record, emit_schema};
pub use layout::{LayoutPlan, Placement, PlanWarning, SplitPolicy, plan};
pub use schema::{Column, RecordType, Schema, SchemaError};

use log::debug;

/// Errors that abort a generator run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The schema failed to load or plan. Every failing section contributes
    /// its first error.
    #[error("schema has {} error(s)", .0.error_count())]
    Schema(Diagnostics),

    /// Warnings were reported and strict mode promotes them to errors.
    #[error("schema has {} warning(s) and strict mode is on", .0.warning_count())]
    Strict(Diagnostics),

    /// The namespace passed to the emitter is not a `::`-delimited identifier path.
    #[error("invalid namespace `{path}`: `{segment}` is not an identifier")]
    InvalidNamespace { path: String, segment: String },
}

impl Error {
    /// Diagnostics carried by the error, if any.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::Schema(d) | Error::Strict(d) => Some(d),
            Error::InvalidNamespace { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Runs the load and plan stages over one schema source.
pub struct Generator<'s> {
    source: &'s str,
    strict: bool,
}

impl<'s> Generator<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            strict: false,
        }
    }

    /// Treat warnings as errors.
    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    /// Load and plan every record type.
    ///
    /// Nothing is produced unless every section loads and plans cleanly.
    pub fn run(self) -> Result<Generated> {
        let schema = schema::load(self.source).map_err(|errors| {
            debug!("schema load failed with {} error(s)", errors.len());
            Error::Schema(to_diagnostics(&errors))
        })?;
        debug!("loaded {} record type(s)", schema.len());

        let plans = layout::plan_schema(&schema)
            .map_err(|errors| Error::Schema(to_diagnostics(&errors)))?;
        debug!("planned {} record type(s)", plans.len());

        let mut warnings = Diagnostics::new();
        for plan in &plans {
            for warning in &plan.warnings {
                warning.report(&plan.record, &mut warnings);
            }
        }

        if self.strict && warnings.has_warnings() {
            return Err(Error::Strict(warnings));
        }

        Ok(Generated {
            schema,
            plans,
            warnings,
        })
    }
}

/// A schema that loaded and planned cleanly.
#[derive(Debug, Clone)]
pub struct Generated {
    pub schema: Schema,
    pub plans: Vec<LayoutPlan>,
    pub warnings: Diagnostics,
}

impl Generated {
    pub fn emit(&self, config: &Config) -> String {
        emit::emit_plans(&self.plans, config)
    }

    /// Serializable view of every plan, in schema order.
    pub fn dump(&self) -> Vec<layout::RecordDump<'_>> {
        self.plans.iter().map(LayoutPlan::dump).collect()
    }
}

pub(crate) fn to_diagnostics(errors: &[SchemaError]) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    for error in errors {
        error.report(&mut diagnostics);
    }
    diagnostics
}
