//! Configuration for header emission.

use stogen_core::QualifiedName;

/// Configuration for header emission.
#[derive(Clone, Debug)]
pub struct Config {
    /// Namespace wrapping every record. Global when empty.
    pub(crate) namespace: QualifiedName,
    /// Extra headers, emitted after the standard ones.
    pub(crate) includes: Vec<String>,
    /// Whether to start with `#pragma once`
    pub(crate) pragma_once: bool,
    /// Spaces per indentation level
    pub(crate) indent_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: QualifiedName::global(),
            includes: Vec::new(),
            pragma_once: true,
            indent_width: 4,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wrapping namespace.
    pub fn namespace(mut self, value: QualifiedName) -> Self {
        self.namespace = value;
        self
    }

    /// Parse and set the wrapping namespace from its `::` spelling.
    pub fn namespace_path(self, path: &str) -> crate::Result<Self> {
        let name = QualifiedName::parse(path).map_err(|segment| crate::Error::InvalidNamespace {
            path: path.to_string(),
            segment,
        })?;
        Ok(self.namespace(name))
    }

    /// Add an `#include`. Bare names are quoted, `<...>` and `"..."` are kept as written.
    pub fn include(mut self, header: impl Into<String>) -> Self {
        self.includes.push(header.into());
        self
    }

    /// Set whether to emit `#pragma once`.
    pub fn pragma_once(mut self, value: bool) -> Self {
        self.pragma_once = value;
        self
    }

    /// Set the number of spaces per indentation level.
    pub fn indent_width(mut self, value: usize) -> Self {
        self.indent_width = value;
        self
    }
}
