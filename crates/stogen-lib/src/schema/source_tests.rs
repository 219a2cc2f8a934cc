use indoc::indoc;

use super::SchemaError;
use super::source::parse;

fn slice(source: &str, range: rowan::TextRange) -> &str {
    &source[usize::from(range.start())..usize::from(range.end())]
}

#[test]
fn sections_and_entries_in_order() {
    let source = indoc! {"
        [ first ]
        a = int32_t
        b: float

        [second]
        c = double
    "};
    let (doc, errors) = parse(source);

    assert!(errors.is_empty());
    let names: Vec<_> = doc.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["first", "second"]);
    assert_eq!(slice(source, doc.sections[0].range), "first");

    let first = &doc.sections[0];
    assert_eq!(first.entries.len(), 2);
    assert_eq!(first.entries[0].key, "a");
    assert_eq!(first.entries[0].value(), "int32_t");
    assert_eq!(first.entries[1].key, "b");
    assert_eq!(first.entries[1].value(), "float");
    assert_eq!(slice(source, first.entries[1].value_range()), "float");
}

#[test]
fn comments_are_skipped() {
    let source = indoc! {"
        # leading comment
        [t]
        ; another
        a = int
          # indented comment
    "};
    let (doc, errors) = parse(source);

    assert!(errors.is_empty());
    assert_eq!(doc.sections[0].entries.len(), 1);
    assert_eq!(doc.sections[0].entries[0].value(), "int");
}

#[test]
fn continuation_lines_extend_value() {
    let source = indoc! {"
        [t]
        @splits =
            0,0,1
            1,1,0
        a = int
    "};
    let (doc, errors) = parse(source);

    assert!(errors.is_empty());
    let splits = &doc.sections[0].entries[0];
    assert_eq!(splits.key, "@splits");
    assert_eq!(splits.value(), "0,0,1\n1,1,0");
    assert_eq!(slice(source, splits.lines[1].range), "1,1,0");
    assert_eq!(doc.sections[0].entries[1].key, "a");
}

#[test]
fn value_keeps_namespace_colons() {
    let (doc, errors) = parse("[t]\nname = std::string\n");

    assert!(errors.is_empty());
    assert_eq!(doc.sections[0].entries[0].value(), "std::string");
}

#[test]
fn crlf_line_endings() {
    let source = "[t]\r\na = int\r\n";
    let (doc, errors) = parse(source);

    assert!(errors.is_empty());
    assert_eq!(doc.sections[0].entries[0].value(), "int");
    assert_eq!(slice(source, doc.sections[0].entries[0].key_range), "a");
}

#[test]
fn entry_before_any_section() {
    let (doc, errors) = parse("a = int\nb = int\n[t]\nc = int\n");

    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], SchemaError::Syntax { message, .. } if message.contains("before any section")));
    assert_eq!(doc.sections.len(), 1);
    assert!(!doc.sections[0].poisoned);
}

#[test]
fn line_without_delimiter_poisons_section() {
    let source = indoc! {"
        [bad]
        just some words
        also = ignored
        [good]
        a = int
    "};
    let (doc, errors) = parse(source);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "expected `key = value`");
    assert!(doc.sections[0].poisoned);
    assert!(doc.sections[0].entries.is_empty());
    assert!(!doc.sections[1].poisoned);
}

#[test]
fn malformed_header() {
    let (doc, errors) = parse("[open\na = int\n[]\n[ok] trailing\n");

    let messages: Vec<_> = errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "section header is missing `]`",
            "section header has no name",
            "unexpected text after section header",
        ]
    );
    assert!(doc.sections.iter().all(|s| s.poisoned));
}

#[test]
fn empty_value_is_kept_as_no_lines() {
    let (doc, errors) = parse("[t]\na =\n");

    assert!(errors.is_empty());
    assert!(doc.sections[0].entries[0].lines.is_empty());
}
