use indoc::indoc;
use stogen_core::QualifiedName;

use super::{Config, emit_plans, emit_record, emit_schema};
use crate::Error;
use crate::layout::{LayoutPlan, plan, plan_schema};
use crate::schema;

fn plan_one(source: &str) -> LayoutPlan {
    let schema = schema::load(source).unwrap();
    plan(schema.records().next().unwrap()).unwrap()
}

fn record(source: &str) -> String {
    emit_record(&plan_one(source), &Config::new())
}

#[test]
fn scalar_record() {
    let out = record("[t]\na = int32_t\nb = float\n");

    assert!(out.starts_with("namespace t_datatypes {\n\nenum class NamedColumn;\n"));
    assert!(out.ends_with("}  // namespace t_datatypes\n\nusing t = t_datatypes::t;\n"));

    insta::assert_snapshot!(section(&out, "enum class NamedColumn : int {", "};"), @r"
    enum class NamedColumn : int {
        a = 0,
        b = 1,
        COLCOUNT = 2
    };
    ");
    insta::assert_snapshot!(section(&out, "struct t {", "};"), @r"
    struct t {
        using RecordAccessor = t_datatypes::RecordAccessor;
        using NamedColumn = t_datatypes::NamedColumn;

        int32_t a;
        float b;
    };
    ");

    assert_eq!(out.matches("static constexpr bool is_array = false;").count(), 2);
    assert!(out.contains("        return vptrs_[cell_of(NamedColumn::a)]->a;\n"));
    assert!(out.contains("        return vptrs_[cell_of(NamedColumn::b)]->b;\n"));
}

#[test]
fn uniform_policy_copies_whole_value() {
    let out = record("[t]\na = int32_t\nb = float\n");

    insta::assert_snapshot!(section(&out, "struct SplitPolicy<0> {", "};"), @r"
    struct SplitPolicy<0> {
        static constexpr auto ColCount = static_cast<std::underlying_type_t<NamedColumn>>(NamedColumn::COLCOUNT);
        static constexpr auto CellCount = 1;
        static constexpr int policy[ColCount] = { 0, 0 };
        static constexpr NamedColumn cell0_columns[] = { NamedColumn::a, NamedColumn::b };
        inline static constexpr int column_to_cell(NamedColumn column) {
            return policy[static_cast<std::underlying_type_t<NamedColumn>>(column)];
        }
        inline static constexpr size_t cell_col_count(int cell) {
            if (cell == 0) {
                return 2;
            }
            return 0;
        }
        inline static constexpr const NamedColumn* cell_columns(int cell) {
            if (cell == 0) {
                return cell0_columns;
            }
            return nullptr;
        }
        template <int Cell>
        inline static constexpr void copy_cell(t* dest, t* src) {
            if constexpr (Cell == 0) {
                *dest = *src;
            }
            (void) dest;
            (void) src;
        }
    };
    ");
    assert!(out.contains("    static constexpr auto DEFAULT_SPLIT = 0;\n"));
    assert!(out.contains("    static constexpr auto MAX_SPLITS = 1;\n"));
    assert!(out.contains("    static constexpr auto POLICIES = 1;\n"));
}

#[test]
fn scattered_array_copies_per_element() {
    let out = record("[t]\nc[4] = int32_t\n@splits = 0,0,1,1\n");

    assert!(out.contains(
        "static constexpr NamedColumn cell0_columns[] = { NamedColumn::c, NamedColumn::c + 1 };"
    ));
    assert!(out.contains(
        "static constexpr NamedColumn cell1_columns[] = { NamedColumn::c + 2, NamedColumn::c + 3 };"
    ));

    assert!(out.contains(concat!(
        "        if constexpr (Cell == 0) {\n",
        "            dest->c[0] = src->c[0];\n",
        "            dest->c[1] = src->c[1];\n",
        "        }\n",
        "        if constexpr (Cell == 1) {\n",
        "            dest->c[2] = src->c[2];\n",
        "            dest->c[3] = src->c[3];\n",
        "        }\n",
        "        (void) dest;\n",
        "        (void) src;\n",
    )));

    assert!(out.contains("    static constexpr auto MAX_SPLITS = 2;\n"));
    assert!(out.contains("    static constexpr auto POLICIES = 2;\n"));
    assert!(out.contains("static constexpr bool is_array = true;"));
    assert!(out.contains("static constexpr size_t width = 4;"));
}

#[test]
fn scattered_array_resolves_each_element() {
    let out = record("[t]\nc[4] = int32_t\n@splits = 0,0,1,1\n");

    // no whole-value getter once elements can live apart
    assert!(!out.contains("return vptrs_[cell_of(NamedColumn::c)]->c;"));
    assert!(!out.contains("(vptrs_[cell_of(NamedColumn::c)]->c)"));
    assert!(out.contains("        return vptrs_[cell_of(NamedColumn::c + index)]->c[index];\n"));
    assert!(out.contains("inline typename accessor_info<NamedColumn::c>::type& c(size_t index) {"));
    assert!(out.contains(
        "inline const typename accessor_info<NamedColumn::c>::type& c(size_t index) const {"
    ));

    assert!(out.contains(concat!(
        "    template <NamedColumn Column>\n",
        "    inline decltype(auto) get_raw() {\n",
        "        if constexpr (NamedColumn::c <= Column && Column < NamedColumn::COLCOUNT) {\n",
        "            constexpr auto offset = static_cast<size_t>(Column - NamedColumn::c);\n",
        "            return (vptrs_[cell_of(Column)]->c[offset]);\n",
        "        }\n",
        "        static_assert(Column < NamedColumn::COLCOUNT);\n",
        "    }\n",
    )));
}

#[test]
fn homogeneous_array_keeps_whole_getter() {
    let out = record("[t]\nc[4] = int32_t\nd = int\n@splits = 1,1,1,1,0\n");

    assert!(out.contains("        return vptrs_[cell_of(NamedColumn::c)]->c;\n"));
    assert!(out.contains("        return vptrs_[cell_of(NamedColumn::c)]->c[index];\n"));
    assert!(out.contains("            dest->c = src->c;\n"));
    assert!(out.contains("            dest->d = src->d;\n"));
    assert!(out.contains("static constexpr int policy[ColCount] = { 1, 1, 1, 1, 0 };"));
}

#[test]
fn multi_dimensional_column() {
    let out = record("[t]\na = int32_t\nfield[3][2] = int16_t\nb = float\n");

    assert!(out.contains("    std::array<std::array<int16_t, 2>, 3> field;\n"));
    assert!(out.contains("    using value_type = std::array<std::array<int16_t, 2>, 3>;\n"));
    assert!(out.contains("    b = 7,\n"));
    assert!(out.contains("    COLCOUNT = 8\n"));
    assert!(out.contains("size_t i0, size_t i1"));
    assert!(out.contains("        return vptrs_[cell_of(NamedColumn::field)]->field[i0][i1];\n"));
    assert!(out.contains(
        "    if constexpr (NamedColumn::field <= Column && Column < NamedColumn::b) {\n"
    ));
}

#[test]
fn scattered_multi_dimensional_subscripts() {
    let out = record("[t]\nfield[3][2] = int16_t\n@splits = 0,0,0,1,1,1\n");

    assert!(out.contains(
        "return vptrs_[cell_of(NamedColumn::field + (i0 * 2 + i1))]->field[i0][i1];"
    ));
    assert!(out.contains("return (vptrs_[cell_of(Column)]->field[offset / 2][offset % 2]);"));
    assert!(out.contains("dest->field[1][1] = src->field[1][1];"));
    assert!(out.contains(
        "cell1_columns[] = { NamedColumn::field + 3, NamedColumn::field + 4, NamedColumn::field + 5 };"
    ));
}

#[test]
fn rounded_named_column_walks_columns() {
    let out = record("[t]\na = int32_t\nfield[3][2] = int16_t\nb = float\n");

    insta::assert_snapshot!(section(&out, "template <NamedColumn Column>\nconstexpr NamedColumn RoundedNamedColumn() {", "}"), @r"
    template <NamedColumn Column>
    constexpr NamedColumn RoundedNamedColumn() {
        static_assert(Column < NamedColumn::COLCOUNT);
        if constexpr (Column < NamedColumn::field) {
            return NamedColumn::a;
        }
        if constexpr (Column < NamedColumn::b) {
            return NamedColumn::field;
        }
        return NamedColumn::b;
    }
    ");
}

#[test]
fn dispatch_covers_every_policy() {
    let out = record(indoc! {"
        [t]
        a = int
        b = int
        @default = 2
        @splits =
            0,1
            1,0
    "});

    assert!(out.contains("    static constexpr auto DEFAULT_SPLIT = 2;\n"));
    assert!(out.contains("    SplitType splitindex_ = DEFAULT_SPLIT;\n"));
    for i in 0..3 {
        assert!(out.contains(&format!("struct SplitPolicy<{i}> {{")));
        assert!(out.contains(&format!("return SplitPolicy<{i}>::column_to_cell(column);")));
        assert!(out.contains(&format!("copy_cell<{i}>(cell, dest, src);")));
    }
    assert!(out.contains("if (vptrs_[1]) {"));
    assert!(!out.contains("if (vptrs_[2]) {"));
}

#[test]
fn operators_are_emitted_once_per_record() {
    let out = record("[t]\na = int\n");

    for op in ["operator+(", "operator-(", "operator+=(", "operator-=(", "operator/("] {
        assert!(out.contains(op), "missing {op}");
    }
    assert_eq!(out.matches("inline NamedColumn& operator++(").count(), 2);
    assert!(out.contains("inline std::ostream& operator<<(std::ostream& out, NamedColumn nc) {"));
}

#[test]
fn header_preamble() {
    let plans = vec![plan_one("[t]\na = int\n")];
    let out = emit_plans(&plans, &Config::new());

    insta::assert_snapshot!(section(&out, "#pragma once", "namespace t_datatypes {"), @r"
    #pragma once

    #include <array>
    #include <cstddef>
    #include <ostream>
    #include <type_traits>
    #include <utility>

    namespace t_datatypes {
    ");
}

#[test]
fn user_includes_and_no_pragma() {
    let config = Config::new()
        .pragma_once(false)
        .include("types.h")
        .include("<cstdint>")
        .include("\"local.hh\"");
    let out = emit_plans(&[plan_one("[t]\na = int\n")], &config);

    assert!(!out.contains("#pragma once"));
    assert!(out.starts_with("#include <array>\n"));
    assert!(out.contains("#include <utility>\n#include \"types.h\"\n#include <cstdint>\n#include \"local.hh\"\n"));
}

#[test]
fn user_namespace_wraps_every_record() {
    let schema = schema::load("[a]\nx = int\n\n[b]\ny = int\n").unwrap();
    let plans = plan_schema(&schema).unwrap();
    let config = Config::new().namespace(QualifiedName::parse("bench::tpcc").unwrap());
    let out = emit_plans(&plans, &config);

    assert!(out.contains("\nnamespace bench::tpcc {\n\nnamespace a_datatypes {\n"));
    assert!(out.contains("using a = a_datatypes::a;\n\nnamespace b_datatypes {\n"));
    assert!(out.ends_with("using b = b_datatypes::b;\n\n}  // namespace bench::tpcc\n"));
    assert_eq!(out.matches("namespace ").count(), 6);
}

#[test]
fn records_keep_schema_order() {
    let schema = schema::load("[zeta]\nx = int\n\n[alpha]\ny = int\n").unwrap();
    let out = emit_schema(&schema, &Config::new()).unwrap();

    let zeta = out.find("namespace zeta_datatypes").unwrap();
    let alpha = out.find("namespace alpha_datatypes").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn emission_is_deterministic() {
    let source = "[t]\nc[4] = int32_t\nd = double\n@splits = 0,0,1,1,2\n";
    let schema = schema::load(source).unwrap();
    let config = Config::new().indent_width(2);

    let first = emit_schema(&schema, &config).unwrap();
    let second = emit_schema(&schema, &config).unwrap();
    assert_eq!(first, second);
    assert!(first.contains("\n  c = 0,\n"));
}

#[test]
fn plan_errors_become_diagnostics() {
    let schema = schema::load("[t]\na = int\n@default = 3\n").unwrap();
    let err = emit_schema(&schema, &Config::new()).unwrap_err();

    let Error::Schema(diagnostics) = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(diagnostics.error_count(), 1);
}

#[test]
fn namespace_path_rejects_bad_segment() {
    let err = Config::new().namespace_path("bench::2fast").unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid namespace `bench::2fast`: `2fast` is not an identifier"
    );
    assert!(Config::new().namespace_path("").is_ok());
}

/// Text from the first line starting with `start` through the next line equal to `end`.
fn section<'a>(text: &'a str, start: &str, end: &str) -> &'a str {
    let from = text
        .find(start)
        .unwrap_or_else(|| panic!("`{start}` not found"));
    let rest = &text[from..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        offset += line.len();
        if offset > start.len() && line.trim_end_matches('\n') == end {
            break;
        }
    }
    &rest[..offset]
}
