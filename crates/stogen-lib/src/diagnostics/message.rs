use rowan::TextRange;

/// What went wrong, independent of where.
///
/// Errors come first, warnings last. Each kind has a fallback message used
/// when the reporter does not supply one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Source shape
    Syntax,

    // Column declarations
    InvalidArity,
    InvalidIdentifier,
    DuplicateSection,
    DuplicateColumn,
    EmptyRecord,
    TooManyColumns,

    // Metadata
    UnknownMetadata,
    MalformedSplit,
    InvalidDefaultSplit,

    // Policy lint
    RedundantPolicy,
    UnusedCells,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::RedundantPolicy | Self::UnusedCells => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Hint attached to every diagnostic of this kind.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArity => Some("array suffixes look like `name[4]` or `name[3][2]`"),
            Self::MalformedSplit => Some("each row lists one cell id per column slot"),
            Self::UnknownMetadata => Some("known keys are `@default` and `@splits`"),
            Self::RedundantPolicy => Some("remove the row or change its cell assignment"),
            _ => None,
        }
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::Syntax => "syntax error",
            Self::InvalidArity => "malformed array suffix",
            Self::InvalidIdentifier => "not a valid identifier",
            Self::DuplicateSection => "record type declared twice",
            Self::DuplicateColumn => "key declared twice",
            Self::EmptyRecord => "record type declares no columns",
            Self::TooManyColumns => "too many column slots",
            Self::UnknownMetadata => "unknown metadata key",
            Self::MalformedSplit => "malformed split row",
            Self::InvalidDefaultSplit => "invalid default split",
            Self::RedundantPolicy => "split policy has no effect",
            Self::UnusedCells => "split policy skips cell ids",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range underlined in rendered output.
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
