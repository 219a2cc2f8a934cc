//! `RecordAccessor`: resolves columns to cells at access time.

use super::{ColumnContext, RecordContext};
use crate::emit::ir::{Access, Function, Keyword, Member, Stmt, Struct};

const VALUE_PTR: &str = "ValueType*";

pub(super) fn record_accessor(ctx: &RecordContext<'_>) -> Struct {
    let ns = ctx.datatypes();
    let plan = ctx.plan;
    let policies = plan.policies.len();
    let max_cells = plan.max_cells();

    let mut members = vec![
        Member::Access(Access::Public),
        Member::Line(format!("using NamedColumn = {ns}::NamedColumn;")),
        Member::Line(format!("using SplitType = {ns}::SplitType;")),
        Member::Line(format!("using ValueType = {};", ctx.record)),
        Member::Line(format!(
            "static constexpr auto DEFAULT_SPLIT = {};",
            plan.default_policy
        )),
        Member::Line(format!("static constexpr auto MAX_SPLITS = {max_cells};")),
        Member::Line("static constexpr auto MAX_POINTERS = MAX_SPLITS;".to_string()),
        Member::Line(format!("static constexpr auto POLICIES = {policies};")),
        Member::Blank,
        Member::Function(Function::new("", "RecordAccessor").defaulted()),
        Member::Function(
            Function::new("", "RecordAccessor")
                .template(&["typename... T"])
                .param("T ...vals")
                .init("vptrs_({ pointer_of(vals)... })"),
        ),
        Member::Blank,
        Member::Function(
            Function::new("", "operator bool")
                .specifiers(&["inline"])
                .constant()
                .body(vec![Stmt::ret("vptrs_[0] != nullptr")]),
        ),
        Member::Blank,
        Member::Function(
            Function::new(VALUE_PTR, "pointer_of")
                .specifiers(&["inline", "static"])
                .param("ValueType* vptr")
                .body(vec![Stmt::ret("vptr")]),
        ),
        Member::Blank,
        Member::Function(
            Function::new("SplitType", "split")
                .specifiers(&["inline"])
                .constant()
                .body(vec![Stmt::ret("splitindex_")]),
        ),
        Member::Blank,
        Member::Function(
            Function::new("void", "set_split")
                .specifiers(&["inline"])
                .param("SplitType index")
                .body(vec![Stmt::line("splitindex_ = index;")]),
        ),
    ];

    for f in dispatch(policies, max_cells) {
        members.push(Member::Blank);
        members.push(Member::Function(f));
    }

    for column in ctx.columns() {
        for f in getters(&column) {
            members.push(Member::Blank);
            members.push(Member::Function(f));
        }
    }

    members.push(Member::Blank);
    members.push(Member::Function(get_raw(ctx)));
    members.push(Member::Blank);
    members.push(Member::Function(
        Function::new(
            "typename accessor_info<RoundedNamedColumn<Column>()>::value_type&",
            "get_value",
        )
        .template(&["NamedColumn Column", "typename... Args"])
        .specifiers(&["static", "inline"])
        .param("Args&&... args")
        .body(vec![Stmt::ret(
            "StructAccessor::template get_value<Column>(std::forward<Args>(args)...)",
        )]),
    ));
    members.push(Member::Blank);
    members.push(Member::Line(
        "std::array<ValueType*, MAX_POINTERS> vptrs_ = { nullptr, };".to_string(),
    ));
    members.push(Member::Line(
        "SplitType splitindex_ = DEFAULT_SPLIT;".to_string(),
    ));

    Struct::new(Keyword::Class, "RecordAccessor").members(members)
}

/// Policy and cell dispatch: compile-time indices fan out to `SplitPolicy<N>`.
fn dispatch(policies: usize, max_cells: usize) -> Vec<Function> {
    let mut split_of_static: Vec<Stmt> = (0..policies)
        .map(|i| {
            Stmt::if_constexpr(
                format!("Index == {i}"),
                vec![Stmt::ret(format!(
                    "SplitPolicy<{i}>::column_to_cell(column)"
                ))],
            )
        })
        .collect();
    split_of_static.push(Stmt::ret("0"));

    let mut split_of_runtime = per_policy(policies, |i| {
        vec![Stmt::ret(format!("SplitPolicy<{i}>::column_to_cell(column)"))]
    });
    split_of_runtime.push(Stmt::ret("0"));

    let cells: Vec<Stmt> = (0..max_cells)
        .map(|c| {
            Stmt::if_(
                format!("cell == {c}"),
                vec![
                    Stmt::line(format!(
                        "SplitPolicy<Index>::template copy_cell<{c}>(dest, src);"
                    )),
                    Stmt::ret(""),
                ],
            )
        })
        .collect();
    let copy_cell_static = vec![
        Stmt::if_constexpr("Index >= 0 && Index < POLICIES", cells),
        Stmt::line("(void) cell;"),
        Stmt::line("(void) dest;"),
        Stmt::line("(void) src;"),
    ];

    let copy_cell_runtime = per_policy(policies, |i| {
        vec![
            Stmt::line(format!("copy_cell<{i}>(cell, dest, src);")),
            Stmt::ret(""),
        ]
    });

    let copy_split_cell = per_policy(policies, |i| {
        vec![
            Stmt::line(format!(
                "SplitPolicy<{i}>::template copy_cell<Cell>(dest, src);"
            )),
            Stmt::ret(""),
        ]
    });

    let mut cell_col_count = per_policy(policies, |i| {
        vec![Stmt::ret(format!("SplitPolicy<{i}>::cell_col_count(cell)"))]
    });
    cell_col_count.push(Stmt::ret("0"));

    let copy_into: Vec<Stmt> = (0..max_cells)
        .map(|c| {
            Stmt::if_(
                format!("vptrs_[{c}]"),
                vec![Stmt::line(format!(
                    "copy_split_cell<{c}>(index, vptr, vptrs_[{c}]);"
                ))],
            )
        })
        .collect();

    vec![
        Function::new("int", "split_of")
            .template(&["int Index"])
            .specifiers(&["inline", "static", "constexpr"])
            .param("NamedColumn column")
            .body(split_of_static),
        Function::new("int", "split_of")
            .specifiers(&["inline", "static", "constexpr"])
            .param("int index")
            .param("NamedColumn column")
            .body(split_of_runtime),
        Function::new("int", "cell_of")
            .specifiers(&["inline"])
            .param("NamedColumn column")
            .constant()
            .body(vec![Stmt::ret("split_of(splitindex_, column)")]),
        Function::new("void", "copy_cell")
            .template(&["int Index"])
            .specifiers(&["inline", "static", "constexpr"])
            .param("int cell")
            .param("ValueType* dest")
            .param("ValueType* src")
            .body(copy_cell_static),
        Function::new("void", "copy_cell")
            .specifiers(&["inline", "static", "constexpr"])
            .param("int index")
            .param("int cell")
            .param("ValueType* dest")
            .param("ValueType* src")
            .body(copy_cell_runtime),
        Function::new("void", "copy_split_cell")
            .template(&["int Cell"])
            .specifiers(&["inline", "static", "constexpr"])
            .param("int index")
            .param("ValueType* dest")
            .param("ValueType* src")
            .body(copy_split_cell),
        Function::new("size_t", "cell_col_count")
            .specifiers(&["inline", "static", "constexpr"])
            .param("int index")
            .param("int cell")
            .body(cell_col_count),
        Function::new("void", "copy_into")
            .specifiers(&["inline"])
            .param("ValueType* vptr")
            .param("int index")
            .body(copy_into),
        Function::new("void", "copy_into")
            .specifiers(&["inline"])
            .param("ValueType* vptr")
            .body(vec![Stmt::line("copy_into(vptr, splitindex_);")]),
    ]
}

/// Getters for one column, mutable then const.
///
/// A column that is never scattered gets a whole-value getter, resolved
/// through its first slot. Arrays also get element getters; a scattered
/// array resolves each element's own slot.
fn getters(column: &ColumnContext<'_>) -> Vec<Function> {
    let name = column.name();
    let info = format!("typename accessor_info<{}>", column.enumerator());
    let mut out = Vec::new();

    if !column.scattered {
        let target = format!("vptrs_[cell_of({})]->{name}", column.enumerator());
        out.push(
            Function::new(format!("{info}::value_type&"), name)
                .specifiers(&["inline"])
                .body(vec![Stmt::ret(target.clone())]),
        );
        out.push(
            Function::new(format!("const {info}::value_type&"), name)
                .specifiers(&["inline"])
                .constant()
                .body(vec![Stmt::ret(target)]),
        );
    }

    if column.column.is_array() {
        let slot = if column.scattered {
            format!("{} + {}", column.enumerator(), flat_index(column))
        } else {
            column.enumerator()
        };
        let target = format!("vptrs_[cell_of({slot})]->{}", index_path(column));
        for constant in [false, true] {
            let ret = if constant {
                format!("const {info}::type&")
            } else {
                format!("{info}::type&")
            };
            let mut f = Function::new(ret, name)
                .specifiers(&["inline"])
                .body(vec![Stmt::ret(target.clone())]);
            for p in index_params(column) {
                f = f.param(p);
            }
            if constant {
                f = f.constant();
            }
            out.push(f);
        }
    }

    out
}

fn index_names(column: &ColumnContext<'_>) -> Vec<String> {
    match column.column.dims.len() {
        1 => vec!["index".to_string()],
        n => (0..n).map(|i| format!("i{i}")).collect(),
    }
}

fn index_params(column: &ColumnContext<'_>) -> Vec<String> {
    index_names(column)
        .into_iter()
        .map(|n| format!("size_t {n}"))
        .collect()
}

/// `c[index]` or `c[i0][i1]`.
fn index_path(column: &ColumnContext<'_>) -> String {
    let mut path = column.name().to_string();
    for n in index_names(column) {
        path.push_str(&format!("[{n}]"));
    }
    path
}

/// Row-major flat offset of the element getter's indices.
fn flat_index(column: &ColumnContext<'_>) -> String {
    let names = index_names(column);
    if names.len() == 1 {
        return names[0].clone();
    }
    let terms: Vec<String> = names
        .iter()
        .zip(strides(&column.column.dims))
        .map(|(n, stride)| {
            if stride == 1 {
                n.clone()
            } else {
                format!("{n} * {stride}")
            }
        })
        .collect();
    format!("({})", terms.join(" + "))
}

fn strides(dims: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; dims.len()];
    for i in (0..dims.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * dims[i + 1];
    }
    strides
}

/// Subscripts selecting flat element `var` of an array with `dims`.
fn subscripts(var: &str, dims: &[usize]) -> String {
    let strides = strides(dims);
    let last = dims.len().saturating_sub(1);
    dims.iter()
        .zip(&strides)
        .enumerate()
        .map(|(i, (dim, stride))| match (i, *stride) {
            (0, 1) => format!("[{var}]"),
            (0, s) => format!("[{var} / {s}]"),
            (i, _) if i == last => format!("[{var} % {dim}]"),
            (_, s) => format!("[{var} / {s} % {dim}]"),
        })
        .collect()
}

/// `if (index == N) { ... }` for every policy.
fn per_policy(policies: usize, then: impl Fn(usize) -> Vec<Stmt>) -> Vec<Stmt> {
    (0..policies)
        .map(|i| Stmt::if_(format!("index == {i}"), then(i)))
        .collect()
}

/// `get_raw<Column>()`: reference to the slot `Column` names.
fn get_raw(ctx: &RecordContext<'_>) -> Function {
    let mut body: Vec<Stmt> = ctx
        .columns()
        .map(|column| {
            let then = if column.scattered {
                vec![
                    Stmt::line(format!(
                        "constexpr auto offset = static_cast<size_t>(Column - {});",
                        column.enumerator()
                    )),
                    Stmt::ret(format!(
                        "(vptrs_[cell_of(Column)]->{}{})",
                        column.name(),
                        subscripts("offset", &column.column.dims)
                    )),
                ]
            } else {
                vec![Stmt::ret(format!(
                    "(vptrs_[cell_of({})]->{})",
                    column.enumerator(),
                    column.name()
                ))]
            };
            Stmt::if_constexpr(column.range_check("Column"), then)
        })
        .collect();
    body.push(Stmt::line("static_assert(Column < NamedColumn::COLCOUNT);"));

    Function::new("decltype(auto)", "get_raw")
        .template(&["NamedColumn Column"])
        .specifiers(&["inline"])
        .body(body)
}
