//! Line writer with scoped indentation.

use std::ops::{Deref, DerefMut};

pub struct Writer {
    out: String,
    depth: usize,
    unit: String,
}

impl Writer {
    pub fn new(indent_width: usize) -> Self {
        Self {
            out: String::new(),
            depth: 0,
            unit: " ".repeat(indent_width),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Write `text` at the current depth. Empty text writes a bare newline.
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.line_at(self.depth, text.as_ref());
    }

    /// Write one level out, for `public:` style labels.
    pub fn label(&mut self, text: impl AsRef<str>) {
        self.line_at(self.depth.saturating_sub(1), text.as_ref());
    }

    /// Write at column zero.
    pub fn flush_left(&mut self, text: impl AsRef<str>) {
        self.line_at(0, text.as_ref());
    }

    /// Append pre-rendered text unchanged.
    pub fn raw(&mut self, text: &str) {
        self.out.push_str(text);
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Indent one level until the guard drops.
    pub fn indent(&mut self) -> IndentGuard<'_> {
        self.depth += 1;
        IndentGuard { writer: self }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line_at(&mut self, depth: usize, text: &str) {
        if !text.is_empty() {
            for _ in 0..depth {
                self.out.push_str(&self.unit);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }
}

/// Restores the writer's depth when dropped.
pub struct IndentGuard<'w> {
    writer: &'w mut Writer,
}

impl Deref for IndentGuard<'_> {
    type Target = Writer;

    fn deref(&self) -> &Writer {
        self.writer
    }
}

impl DerefMut for IndentGuard<'_> {
    fn deref_mut(&mut self) -> &mut Writer {
        self.writer
    }
}

impl Drop for IndentGuard<'_> {
    fn drop(&mut self) {
        self.writer.depth -= 1;
    }
}
