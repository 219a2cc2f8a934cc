//! Renders collected diagnostics, with source excerpts when the schema text is known.

use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// Schema path shown in the excerpt header.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// One block per diagnostic, in report order.
    ///
    /// Without source text each block is the message's one-line form.
    pub fn render(&self) -> String {
        let Some(source) = self.source else {
            return self
                .diagnostics
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };
        self.diagnostics
            .iter()
            .map(|diag| renderer.render(&[group(diag, source, self.path)]))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn group<'a>(diag: &'a DiagnosticMessage, source: &'a str, path: Option<&'a str>) -> Group<'a> {
    let mut snippet = Snippet::source(source).line_start(1).annotation(
        AnnotationKind::Primary
            .span(caret_span(diag.range, source))
            .label(diag.kind.fallback_message()),
    );
    if let Some(path) = path {
        snippet = snippet.path(path);
    }
    let snippet = diag.related.iter().fold(snippet, |snippet, related| {
        snippet.annotation(
            AnnotationKind::Context
                .span(caret_span(related.range, source))
                .label(&related.message),
        )
    });

    let level = match diag.severity() {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    };
    diag.hints.iter().fold(
        level.primary_title(&diag.message).element(snippet),
        |group, hint| group.element(Level::HELP.message(hint.as_str())),
    )
}

/// Byte span of an annotation. An empty range still marks one byte.
fn caret_span(range: TextRange, source: &str) -> Range<usize> {
    let start = usize::from(range.start());
    let end = usize::from(range.end()).max((start + 1).min(source.len()));
    start..end
}
