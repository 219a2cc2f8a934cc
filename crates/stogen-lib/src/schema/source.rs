//! Line reader for the INI-style schema format.
//!
//! Produces sections with their raw `key = value` entries and byte ranges.
//! Interpreting keys and values is left to the loader.

use rowan::{TextRange, TextSize};

use super::error::SchemaError;

/// One physical line of an entry's value, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueLine {
    pub text: String,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub key_range: TextRange,
    /// The inline value (if any) followed by every continuation line.
    pub lines: Vec<ValueLine>,
}

impl Entry {
    /// Value lines joined with `\n`.
    pub fn value(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn value_range(&self) -> TextRange {
        match (self.lines.first(), self.lines.last()) {
            (Some(first), Some(last)) => first.range.cover(last.range),
            _ => TextRange::empty(self.key_range.end()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    /// Range of the name inside the brackets.
    pub range: TextRange,
    pub entries: Vec<Entry>,
    /// Set once the section reported a syntax error. The rest of it is skipped.
    pub poisoned: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub sections: Vec<Section>,
}

/// Split `source` into sections and entries.
///
/// Each section reports at most one syntax error. Entries before the first
/// header report one error in total.
pub fn parse(source: &str) -> (Document, Vec<SchemaError>) {
    let mut reader = Reader::default();
    let mut offset = 0;
    for raw in source.split_inclusive('\n') {
        let line = raw.trim_end_matches(['\n', '\r']);
        reader.line(line, offset);
        offset += raw.len();
    }
    (
        Document {
            sections: reader.sections,
        },
        reader.errors,
    )
}

#[derive(Default)]
struct Reader {
    sections: Vec<Section>,
    errors: Vec<SchemaError>,
    in_entry: bool,
    preamble_failed: bool,
}

impl Reader {
    fn line(&mut self, line: &str, offset: usize) {
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') || text.starts_with(';') {
            return;
        }

        let indent = line.len() - line.trim_start().len();
        let start = offset + indent;
        let range = span(start, start + text.len());

        if indent > 0 && self.in_entry {
            self.continuation(text, range);
        } else if text.starts_with('[') {
            self.header(text, start);
        } else {
            self.entry(text, start);
        }
    }

    fn header(&mut self, text: &str, start: usize) {
        self.in_entry = false;
        let range = span(start, start + text.len());

        let problem = match text.find(']') {
            None => Some("section header is missing `]`"),
            Some(close) if !text[close + 1..].trim().is_empty() => {
                Some("unexpected text after section header")
            }
            Some(close) if text[1..close].trim().is_empty() => Some("section header has no name"),
            Some(_) => None,
        };

        if let Some(message) = problem {
            // Swallow entries up to the next header instead of attributing
            // them to the previous section.
            self.sections.push(Section {
                name: String::new(),
                range,
                entries: Vec::new(),
                poisoned: true,
            });
            self.errors.push(SchemaError::Syntax {
                message: message.to_string(),
                range,
            });
            return;
        }

        let inner = &text[1..text.find(']').unwrap_or(text.len())];
        let name = inner.trim();
        let name_start = start + 1 + (inner.len() - inner.trim_start().len());
        self.sections.push(Section {
            name: name.to_string(),
            range: span(name_start, name_start + name.len()),
            entries: Vec::new(),
            poisoned: false,
        });
    }

    fn entry(&mut self, text: &str, start: usize) {
        self.in_entry = false;
        let range = span(start, start + text.len());

        let Some(section) = self.sections.last_mut() else {
            if !self.preamble_failed {
                self.preamble_failed = true;
                self.errors.push(SchemaError::Syntax {
                    message: "entry appears before any section header".to_string(),
                    range,
                });
            }
            return;
        };
        if section.poisoned {
            return;
        }

        let Some(delim) = text.find(['=', ':']) else {
            self.poison("expected `key = value`", range);
            return;
        };
        let key = text[..delim].trim_end();
        if key.is_empty() {
            self.poison("entry has no key", range);
            return;
        }

        let value = text[delim + 1..].trim_start();
        let end = start + text.len();
        let mut lines = Vec::new();
        if !value.is_empty() {
            lines.push(ValueLine {
                text: value.to_string(),
                range: span(end - value.len(), end),
            });
        }

        section.entries.push(Entry {
            key: key.to_string(),
            key_range: span(start, start + key.len()),
            lines,
        });
        self.in_entry = true;
    }

    fn continuation(&mut self, text: &str, range: TextRange) {
        let Some(section) = self.sections.last_mut() else {
            return;
        };
        if section.poisoned {
            return;
        }
        if let Some(entry) = section.entries.last_mut() {
            entry.lines.push(ValueLine {
                text: text.to_string(),
                range,
            });
        }
    }

    fn poison(&mut self, message: &str, range: TextRange) {
        if let Some(section) = self.sections.last_mut() {
            section.poisoned = true;
        }
        self.errors.push(SchemaError::Syntax {
            message: message.to_string(),
            range,
        });
    }
}

pub(crate) fn span(start: usize, end: usize) -> TextRange {
    TextRange::new(size(start), size(end))
}

fn size(offset: usize) -> TextSize {
    TextSize::new(u32::try_from(offset).unwrap_or(u32::MAX))
}
