use indoc::indoc;

use super::{SchemaError, load};

#[test]
fn preserves_declaration_order() {
    let schema = load(indoc! {"
        [zeta]
        z = int
        a = int
        m = int

        [alpha]
        x = double
    "})
    .unwrap();

    let records: Vec<_> = schema.records().map(|r| r.name.as_str()).collect();
    assert_eq!(records, ["zeta", "alpha"]);

    let zeta = schema.get("zeta").unwrap();
    let columns: Vec<_> = zeta.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(columns, ["z", "a", "m"]);
}

#[test]
fn colcount_sums_flat_widths() {
    let schema = load(indoc! {"
        [t]
        a = int32_t
        field[3][2] = int16_t
        b = float
    "})
    .unwrap();

    let t = schema.get("t").unwrap();
    assert_eq!(t.columns[1].arity, [3, 2]);
    assert_eq!(t.columns[1].flat_width(), 6);
    assert!(t.columns[1].is_array());
    assert!(!t.columns[0].is_array());
    assert_eq!(t.colcount(), 8);
}

#[test]
fn scalar_types_pass_through() {
    let schema = load("[t]\nname = std::array<char, 16>\nv = MyOpaque_t\n").unwrap();
    let t = schema.get("t").unwrap();

    assert_eq!(t.columns[0].scalar_type, "std::array<char, 16>");
    assert_eq!(t.columns[1].scalar_type, "MyOpaque_t");
}

#[test]
fn metadata_is_parsed() {
    let schema = load(indoc! {"
        [t]
        @default = 2
        a = int
        c[2] = int
        @splits =
            0,0,1
            0,1,1
    "})
    .unwrap();

    let t = schema.get("t").unwrap();
    assert_eq!(t.default_split.map(|d| d.index), Some(2));
    assert_eq!(t.splits.len(), 2);
    assert_eq!(t.splits[0].cells, [0, 0, 1]);
    assert_eq!(t.splits[1].cells, [0, 1, 1]);
}

#[test]
fn split_row_may_be_inline() {
    let schema = load("[t]\na = int\nb = int\n@splits = 1, 0\n").unwrap();
    assert_eq!(schema.get("t").unwrap().splits[0].cells, [1, 0]);
}

#[test]
fn invalid_arity() {
    let errors = load("[t]\nfield[abc] = int\n").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        SchemaError::InvalidArity { section, key, .. } if section == "t" && key == "field[abc]"
    ));
    insta::assert_snapshot!(
        errors[0].to_string(),
        @"column `field[abc]` has a malformed array suffix: `abc` is not a positive integer"
    );
}

#[test]
fn split_row_with_wrong_length() {
    let errors = load(indoc! {"
        [t]
        c[4] = int32_t
        @splits =
            0,0,1,1
            0,0,1
    "})
    .unwrap_err();

    assert_eq!(errors.len(), 1);
    let SchemaError::MalformedSplit {
        section,
        row,
        expected,
        text,
        ..
    } = &errors[0]
    else {
        panic!("expected MalformedSplit, got {:?}", errors[0]);
    };
    assert_eq!(section, "t");
    assert_eq!(*row, 2);
    assert_eq!(*expected, 4);
    assert_eq!(text, "0,0,1");
    insta::assert_snapshot!(
        errors[0].to_string(),
        @"split row 2 of `t` must list 4 cell ids: found 3 entries in `0,0,1`"
    );
}

#[test]
fn split_row_with_bad_cell() {
    let errors = load("[t]\na = int\nb = int\n@splits = 0,x\n").unwrap_err();
    insta::assert_snapshot!(
        errors[0].to_string(),
        @"split row 1 of `t` must list 2 cell ids: `x` is not a cell id"
    );

    let errors = load("[t]\na = int\n@splits = 64\n").unwrap_err();
    insta::assert_snapshot!(
        errors[0].to_string(),
        @"split row 1 of `t` must list 1 cell ids: cell 64 exceeds the limit of 64 cells"
    );

    let errors = load("[t]\na = int\n@splits = -1\n").unwrap_err();
    assert!(matches!(errors[0], SchemaError::MalformedSplit { .. }));
}

#[test]
fn split_rows_are_validated_after_all_columns() {
    // `@splits` precedes the columns it describes.
    let schema = load("[t]\n@splits = 0,1\na = int\nb = int\n").unwrap();
    assert_eq!(schema.get("t").unwrap().splits[0].cells, [0, 1]);
}

#[test]
fn invalid_default() {
    let errors = load("[t]\na = int\n@default = first\n").unwrap_err();
    insta::assert_snapshot!(
        errors[0].to_string(),
        @"`@default` of `t` is invalid: `first` is not a policy index"
    );
}

#[test]
fn unknown_metadata() {
    let errors = load("[t]\na = int\n@color = red\n").unwrap_err();
    assert!(matches!(
        &errors[0],
        SchemaError::UnknownMetadata { key, .. } if key == "@color"
    ));
}

#[test]
fn duplicate_column_names_ignore_suffix() {
    let errors = load("[t]\nc[2] = int\nc = int\n").unwrap_err();
    assert!(matches!(
        &errors[0],
        SchemaError::DuplicateColumn { name, .. } if name == "c"
    ));
}

#[test]
fn duplicate_section() {
    let errors = load("[t]\na = int\n[t]\nb = int\n").unwrap_err();

    assert_eq!(errors.len(), 1);
    let SchemaError::DuplicateSection { range, first, .. } = &errors[0] else {
        panic!("expected DuplicateSection");
    };
    assert_eq!(u32::from(first.start()), 1);
    assert_eq!(u32::from(range.start()), 13);
}

#[test]
fn invalid_identifiers() {
    let errors = load("[my-record]\na = int\n").unwrap_err();
    assert!(matches!(&errors[0], SchemaError::InvalidIdentifier { name, .. } if name == "my-record"));

    let errors = load("[t]\nclass = int\n").unwrap_err();
    assert!(matches!(&errors[0], SchemaError::InvalidIdentifier { name, .. } if name == "class"));

    let errors = load("[t]\nCOLCOUNT = int\n").unwrap_err();
    assert!(matches!(&errors[0], SchemaError::InvalidIdentifier { .. }));
}

#[test]
fn generated_names_cannot_name_columns() {
    for name in ["split", "ValueType", "NamedColumn", "RecordAccessor", "get_raw"] {
        let errors = load(&format!("[t]\n{name} = int\n")).unwrap_err();
        assert!(
            matches!(&errors[0], SchemaError::InvalidIdentifier { name: n, .. } if n == name),
            "{name}"
        );
    }

    let errors = load("[SplitPolicy]\na = int\n").unwrap_err();
    assert!(matches!(&errors[0], SchemaError::InvalidIdentifier { name, .. } if name == "SplitPolicy"));
}

#[test]
fn column_named_after_record() {
    let errors = load("[rec]\na = int\nrec = int\n").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], SchemaError::ColumnNamedAfterRecord { section, .. } if section == "rec"));
    insta::assert_snapshot!(errors[0].to_string(), @"column `rec` has the same name as its record type");
    assert_eq!(u32::from(errors[0].range().start()), 14);

    let errors = load("[rec]\nrec[2] = int\n").unwrap_err();
    assert!(matches!(&errors[0], SchemaError::ColumnNamedAfterRecord { .. }));
}

#[test]
fn empty_record() {
    let errors = load("[t]\n@default = 0\n").unwrap_err();
    assert!(matches!(&errors[0], SchemaError::EmptyRecord { section, .. } if section == "t"));
}

#[test]
fn missing_value() {
    let errors = load("[t]\na =\n").unwrap_err();
    insta::assert_snapshot!(errors[0].to_string(), @"`a` has no value");
}

#[test]
fn too_many_slots() {
    let errors = load("[t]\na[4096][16] = int\nb = int\n").unwrap_err();
    assert!(matches!(
        &errors[0],
        SchemaError::TooManyColumns { count: 65537, limit: 65536, .. }
    ));

    let errors = load("[t]\na[4096][4096] = int\n").unwrap_err();
    assert!(matches!(&errors[0], SchemaError::TooManyColumns { .. }));
}

#[test]
fn one_error_per_failing_section_in_source_order() {
    let errors = load(indoc! {"
        [first]
        a[x] = int
        b[y] = int

        [fine]
        a = int

        [third]
        @bogus = 1
    "})
    .unwrap_err();

    assert_eq!(errors.len(), 2);
    assert!(matches!(&errors[0], SchemaError::InvalidArity { key, .. } if key == "a[x]"));
    assert!(matches!(&errors[1], SchemaError::UnknownMetadata { .. }));
}

#[test]
fn empty_source_is_an_empty_schema() {
    let schema = load("# nothing here\n").unwrap();
    assert!(schema.is_empty());
}
