use std::fmt;

/// Keywords that cannot name a generated column or namespace.
const RESERVED_WORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

/// Names the generator itself declares inside every datatypes namespace,
/// either as types, accessor members, or template parameters.
const GENERATED_NAMES: &[&str] = &[
    "Args", "COLCOUNT", "CellCount", "ColCount", "Column", "DEFAULT_SPLIT", "MAX_POINTERS",
    "MAX_SPLITS", "NamedColumn", "POLICIES", "RecordAccessor", "RoundedNamedColumn",
    "SplitPolicy", "SplitType", "StructAccessor", "T", "ValueType", "accessor_info",
    "cell_col_count", "cell_columns", "cell_of", "column_to_cell", "copy_cell", "copy_into",
    "copy_split_cell", "get_raw", "get_value", "is_array", "offset", "pointer_of", "policy",
    "set_split", "split", "split_of", "splitindex_", "struct_type", "type", "value_type",
    "vptrs_", "width",
];

/// Check whether `s` is a plain C++ identifier: `[A-Za-z_][A-Za-z0-9_]*`.
///
/// Reserved words are rejected too, since the name ends up verbatim in
/// generated declarations.
///
/// # Examples
/// ```
/// use stogen_core::utils::is_cpp_identifier;
/// assert!(is_cpp_identifier("d_next_o_id"));
/// assert!(!is_cpp_identifier("2fast"));
/// assert!(!is_cpp_identifier("class"));
/// ```
pub fn is_cpp_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }
    !is_reserved_word(s)
}

/// Check whether `s` is a C++ keyword or a name reserved by the generator.
pub fn is_reserved_word(s: &str) -> bool {
    RESERVED_WORDS.contains(&s) || GENERATED_NAMES.contains(&s)
}

/// A `::`-delimited namespace path such as `bench::tpcc`.
///
/// The empty path is valid and means "global namespace".
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    /// The global namespace.
    pub fn global() -> Self {
        Self::default()
    }

    /// Parse a `::`-delimited path. A single leading `::` is accepted.
    ///
    /// Returns the offending segment on failure.
    ///
    /// # Examples
    /// ```
    /// use stogen_core::utils::QualifiedName;
    /// let ns = QualifiedName::parse("bench::tpcc").unwrap();
    /// assert_eq!(ns.segments(), ["bench", "tpcc"]);
    /// assert!(QualifiedName::parse("bench::").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Self, String> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Ok(Self::global());
        }
        let body = trimmed.strip_prefix("::").unwrap_or(trimmed);
        let mut segments = Vec::new();
        for segment in body.split("::") {
            let segment = segment.trim();
            if !is_cpp_identifier(segment) {
                return Err(segment.to_string());
            }
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_global(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("::"))
    }
}
