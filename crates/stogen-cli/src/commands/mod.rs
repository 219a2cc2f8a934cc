pub mod generate;


use std::path::PathBuf;

/// Failures of a CLI run. Each one ends the process with status 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot serialize layout plan: {0}")]
    Plan(#[from] serde_json::Error),

    /// Schema, strict-mode or namespace failure. Keeps the schema text so
    /// diagnostics can point into it.
    #[error("{error}")]
    Generate {
        error: stogen_lib::Error,
        schema: String,
        path: PathBuf,
    },
}

impl CliError {
    /// Text printed to stderr before exiting.
    pub fn render(&self, color: bool) -> String {
        if let CliError::Generate {
            error,
            schema,
            path,
        } = self
            && let Some(diagnostics) = error.diagnostics()
        {
            let path = path.display().to_string();
            return diagnostics
                .printer(schema)
                .path(&path)
                .colored(color)
                .render();
        }
        format!("error: {self}")
    }
}
