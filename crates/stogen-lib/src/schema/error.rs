use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Errors detected while loading or planning a schema.
///
/// Every variant carries the source range it is reported at.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("{message}")]
    Syntax { message: String, range: TextRange },

    #[error("column `{key}` has a malformed array suffix: {reason}")]
    InvalidArity {
        section: String,
        key: String,
        reason: String,
        range: TextRange,
    },

    #[error("`{name}` is not a valid identifier")]
    InvalidIdentifier { name: String, range: TextRange },

    #[error("column `{section}` has the same name as its record type")]
    ColumnNamedAfterRecord { section: String, range: TextRange },

    #[error("record type `{name}` is declared twice")]
    DuplicateSection {
        name: String,
        range: TextRange,
        first: TextRange,
    },

    #[error("`{name}` is declared twice in `{section}`")]
    DuplicateColumn {
        section: String,
        name: String,
        range: TextRange,
        first: TextRange,
    },

    #[error("record type `{section}` declares no columns")]
    EmptyRecord { section: String, range: TextRange },

    #[error("record type `{section}` needs {count} column slots, the limit is {limit}")]
    TooManyColumns {
        section: String,
        count: usize,
        limit: usize,
        range: TextRange,
    },

    #[error("unknown metadata key `{key}` in `{section}`")]
    UnknownMetadata {
        section: String,
        key: String,
        range: TextRange,
    },

    #[error("split row {row} of `{section}` must list {expected} cell ids: {reason}")]
    MalformedSplit {
        section: String,
        /// 1-based row number within `@splits`.
        row: usize,
        expected: usize,
        text: String,
        reason: String,
        range: TextRange,
    },

    #[error("`@default` of `{section}` is invalid: {reason}")]
    InvalidDefaultSplit {
        section: String,
        reason: String,
        range: TextRange,
    },
}

impl SchemaError {
    pub fn range(&self) -> TextRange {
        match self {
            Self::Syntax { range, .. }
            | Self::InvalidArity { range, .. }
            | Self::InvalidIdentifier { range, .. }
            | Self::ColumnNamedAfterRecord { range, .. }
            | Self::DuplicateSection { range, .. }
            | Self::DuplicateColumn { range, .. }
            | Self::EmptyRecord { range, .. }
            | Self::TooManyColumns { range, .. }
            | Self::UnknownMetadata { range, .. }
            | Self::MalformedSplit { range, .. }
            | Self::InvalidDefaultSplit { range, .. } => *range,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::Syntax { .. } => DiagnosticKind::Syntax,
            Self::InvalidArity { .. } => DiagnosticKind::InvalidArity,
            Self::InvalidIdentifier { .. } | Self::ColumnNamedAfterRecord { .. } => {
                DiagnosticKind::InvalidIdentifier
            }
            Self::DuplicateSection { .. } => DiagnosticKind::DuplicateSection,
            Self::DuplicateColumn { .. } => DiagnosticKind::DuplicateColumn,
            Self::EmptyRecord { .. } => DiagnosticKind::EmptyRecord,
            Self::TooManyColumns { .. } => DiagnosticKind::TooManyColumns,
            Self::UnknownMetadata { .. } => DiagnosticKind::UnknownMetadata,
            Self::MalformedSplit { .. } => DiagnosticKind::MalformedSplit,
            Self::InvalidDefaultSplit { .. } => DiagnosticKind::InvalidDefaultSplit,
        }
    }

    /// Append this error to `diagnostics`.
    pub fn report(&self, diagnostics: &mut Diagnostics) {
        let builder = diagnostics
            .report(self.kind(), self.range())
            .message(self.to_string());
        match self {
            Self::DuplicateSection { first, .. } | Self::DuplicateColumn { first, .. } => {
                builder.related_to("first declared here", *first).emit()
            }
            Self::TooManyColumns { .. } => builder
                .hint("split wide arrays into several record types")
                .emit(),
            _ => builder.emit(),
        }
    }
}
