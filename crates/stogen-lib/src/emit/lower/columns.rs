//! Value struct, `NamedColumn`, column arithmetic and per-column traits.

use super::RecordContext;
use crate::emit::ir::{Enum, Function, Item, Keyword, Member, Stmt, Struct, Template};

const UNDERLYING: &str = "std::underlying_type_t<NamedColumn>";

pub(super) fn value_struct(ctx: &RecordContext<'_>) -> Struct {
    let ns = ctx.datatypes();
    Struct::new(Keyword::Struct, ctx.record)
        .member(Member::Line(format!(
            "using RecordAccessor = {ns}::RecordAccessor;"
        )))
        .member(Member::Line(format!("using NamedColumn = {ns}::NamedColumn;")))
        .member(Member::Blank)
        .members(
            ctx.columns()
                .map(|c| Member::Line(format!("{} {};", c.value_type(), c.name()))),
        )
}

pub(super) fn named_column(ctx: &RecordContext<'_>) -> Enum {
    let mut enumerators: Vec<_> = ctx
        .plan
        .columns
        .iter()
        .map(|c| (c.name.clone(), c.start))
        .collect();
    enumerators.push(("COLCOUNT".to_string(), ctx.plan.colcount));
    Enum {
        name: "NamedColumn".to_string(),
        underlying: "int".to_string(),
        enumerators,
    }
}

/// Operators that let generated code step through column slots.
pub(super) fn arithmetic(ctx: &RecordContext<'_>) -> Vec<Item> {
    let offset = |op: &str, rhs: &str| {
        Function::new("NamedColumn", format!("operator{op}"))
            .specifiers(&["inline", "constexpr"])
            .param("NamedColumn nc")
            .param(format!("{UNDERLYING} {rhs}"))
            .body(vec![Stmt::ret(format!(
                "NamedColumn(static_cast<{UNDERLYING}>(nc) {op} {rhs})"
            ))])
    };
    let between = |op: &str| {
        Function::new("NamedColumn", format!("operator{op}"))
            .specifiers(&["inline", "constexpr"])
            .param("NamedColumn nc")
            .param("NamedColumn off")
            .body(vec![Stmt::ret(format!(
                "nc {op} static_cast<{UNDERLYING}>(off)"
            ))])
    };
    let assign = |op: &str| {
        Function::new("NamedColumn&", format!("operator{op}="))
            .specifiers(&["inline"])
            .param("NamedColumn& nc")
            .param(format!("{UNDERLYING} index"))
            .body(vec![
                Stmt::line(format!(
                    "nc = static_cast<NamedColumn>(static_cast<{UNDERLYING}>(nc) {op} index);"
                )),
                Stmt::ret("nc"),
            ])
    };
    let increment = |postfix: bool| {
        let f = Function::new("NamedColumn&", "operator++")
            .specifiers(&["inline"])
            .param("NamedColumn& nc");
        let f = if postfix { f.param("int") } else { f };
        f.body(vec![Stmt::ret("nc += 1")])
    };

    let mut functions = vec![
        offset("+", "index"),
        between("+"),
        assign("+"),
        increment(false),
        increment(true),
        offset("-", "index"),
        between("-"),
        assign("-"),
        offset("/", "denom"),
        Function::new("std::ostream&", "operator<<")
            .specifiers(&["inline"])
            .param("std::ostream& out")
            .param("NamedColumn nc")
            .body(vec![
                Stmt::line(format!("out << static_cast<{UNDERLYING}>(nc);")),
                Stmt::ret("out"),
            ]),
    ];
    functions.push(rounded_named_column(ctx));

    functions.into_iter().map(Item::Function).collect()
}

/// `RoundedNamedColumn<Column>()`: the first slot of the column owning `Column`.
fn rounded_named_column(ctx: &RecordContext<'_>) -> Function {
    let mut body = vec![Stmt::line(
        "static_assert(Column < NamedColumn::COLCOUNT);",
    )];
    let columns: Vec<_> = ctx.columns().collect();
    if let Some((last, init)) = columns.split_last() {
        for column in init {
            body.push(Stmt::if_constexpr(
                format!("Column < {}", column.upper_bound()),
                vec![Stmt::ret(column.enumerator())],
            ));
        }
        body.push(Stmt::ret(last.enumerator()));
    }

    Function::new("NamedColumn", "RoundedNamedColumn")
        .template(&["NamedColumn Column"])
        .specifiers(&["constexpr"])
        .body(body)
}

/// `accessor_info` specializations, the rounding fallback and `StructAccessor`.
pub(super) fn traits(ctx: &RecordContext<'_>) -> Vec<Item> {
    let ns = ctx.datatypes();
    let mut items = vec![Item::Struct(
        Struct::new(Keyword::Struct, "accessor_info")
            .template(Template::Params(vec!["NamedColumn Column".to_string()]))
            .forward(),
    )];

    for column in ctx.columns() {
        items.push(Item::Struct(
            Struct::new(
                Keyword::Struct,
                format!("accessor_info<{}>", column.enumerator()),
            )
            .template(Template::Specialization)
            .members([
                Member::Line(format!("using NamedColumn = {ns}::NamedColumn;")),
                Member::Line("using struct_type = RecordAccessor;".to_string()),
                Member::Line(format!("using type = {};", column.column.scalar_type)),
                Member::Line(format!("using value_type = {};", column.value_type())),
                Member::Line(format!(
                    "static constexpr NamedColumn Column = {};",
                    column.enumerator()
                )),
                Member::Line(format!(
                    "static constexpr bool is_array = {};",
                    column.column.is_array()
                )),
                Member::Line(format!(
                    "static constexpr size_t width = {};",
                    column.column.width
                )),
            ]),
        ));
    }

    items.push(Item::Struct(
        Struct::new(Keyword::Struct, "accessor_info")
            .template(Template::Params(vec!["NamedColumn ColumnValue".to_string()]))
            .base("accessor_info<RoundedNamedColumn<ColumnValue>()>")
            .member(Member::Line(
                "static constexpr NamedColumn Column = ColumnValue;".to_string(),
            )),
    ));

    let mut body: Vec<Stmt> = ctx
        .columns()
        .map(|c| {
            Stmt::if_constexpr(
                c.range_check("Column"),
                vec![Stmt::ret(format!("ptr->{}", c.name()))],
            )
        })
        .collect();
    body.push(Stmt::line("static_assert(Column < NamedColumn::COLCOUNT);"));

    items.push(Item::Struct(
        Struct::new(Keyword::Struct, "StructAccessor").member(Member::Function(
            Function::new(
                "typename accessor_info<RoundedNamedColumn<Column>()>::value_type&",
                "get_value",
            )
            .template(&["NamedColumn Column"])
            .specifiers(&["static", "inline"])
            .param(format!("{}* ptr", ctx.record))
            .body(body),
        )),
    ));

    items
}
