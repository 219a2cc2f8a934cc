//! `SplitPolicy<N>`: per-policy slot tables and cell copy routines.

use super::{PolicyContext, RecordContext};
use crate::emit::ir::{Function, Item, Keyword, Member, Stmt, Struct, Template};
use crate::layout::{CellId, Placement};

pub(super) fn policies(ctx: &RecordContext<'_>) -> Vec<Item> {
    let mut items = vec![Item::Struct(
        Struct::new(Keyword::Struct, "SplitPolicy")
            .template(Template::Params(vec!["size_t Variant".to_string()]))
            .forward(),
    )];
    items.extend(ctx.policies().map(|p| Item::Struct(split_policy(ctx, &p))));
    items
}

fn split_policy(ctx: &RecordContext<'_>, p: &PolicyContext<'_>) -> Struct {
    let cells = p.policy.policy.cells();
    let used: Vec<CellId> = (0..p.cell_count() as CellId)
        .filter(|c| !p.policy.policy.members_of(*c).is_empty())
        .collect();

    let table = cells
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut members = vec![
        Member::Line(
            "static constexpr auto ColCount = static_cast<std::underlying_type_t<NamedColumn>>(NamedColumn::COLCOUNT);"
                .to_string(),
        ),
        Member::Line(format!(
            "static constexpr auto CellCount = {};",
            p.cell_count()
        )),
        Member::Line(format!(
            "static constexpr int policy[ColCount] = {{ {table} }};"
        )),
    ];

    for &cell in &used {
        let slots = p
            .policy
            .policy
            .members_of(cell)
            .iter()
            .map(|m| ctx.column(m.column).slot(m.element.unwrap_or(0)))
            .collect::<Vec<_>>()
            .join(", ");
        members.push(Member::Line(format!(
            "static constexpr NamedColumn cell{cell}_columns[] = {{ {slots} }};"
        )));
    }

    members.push(Member::Function(
        Function::new("int", "column_to_cell")
            .specifiers(&["inline", "static", "constexpr"])
            .param("NamedColumn column")
            .body(vec![Stmt::ret(
                "policy[static_cast<std::underlying_type_t<NamedColumn>>(column)]",
            )]),
    ));

    let mut count_body: Vec<Stmt> = used
        .iter()
        .map(|&cell| {
            Stmt::if_(
                format!("cell == {cell}"),
                vec![Stmt::ret(
                    p.policy.policy.members_of(cell).len().to_string(),
                )],
            )
        })
        .collect();
    count_body.push(Stmt::ret("0"));
    members.push(Member::Function(
        Function::new("size_t", "cell_col_count")
            .specifiers(&["inline", "static", "constexpr"])
            .param("int cell")
            .body(count_body),
    ));

    let mut columns_body: Vec<Stmt> = used
        .iter()
        .map(|&cell| Stmt::if_(format!("cell == {cell}"), vec![Stmt::ret(format!("cell{cell}_columns"))]))
        .collect();
    columns_body.push(Stmt::ret("nullptr"));
    members.push(Member::Function(
        Function::new("const NamedColumn*", "cell_columns")
            .specifiers(&["inline", "static", "constexpr"])
            .param("int cell")
            .body(columns_body),
    ));

    let mut copy_body: Vec<Stmt> = used
        .iter()
        .map(|&cell| Stmt::if_constexpr(format!("Cell == {cell}"), copy_statements(ctx, p, cell)))
        .collect();
    copy_body.push(Stmt::line("(void) dest;"));
    copy_body.push(Stmt::line("(void) src;"));
    members.push(Member::Function(
        Function::new("void", "copy_cell")
            .template(&["int Cell"])
            .specifiers(&["inline", "static", "constexpr"])
            .param(format!("{}* dest", ctx.record))
            .param(format!("{}* src", ctx.record))
            .body(copy_body),
    ));

    Struct::new(Keyword::Struct, format!("SplitPolicy<{}>", p.index))
        .template(Template::Specialization)
        .members(members)
}

/// Assignments moving every slot of `cell` from `src` to `dest`.
///
/// A column placed whole in the cell is copied in one assignment; a
/// scattered column is copied element by element.
fn copy_statements(ctx: &RecordContext<'_>, p: &PolicyContext<'_>, cell: CellId) -> Vec<Stmt> {
    let members = p.policy.policy.members_of(cell);
    if members.len() == ctx.plan.colcount {
        return vec![Stmt::line("*dest = *src;")];
    }

    let mut stmts = Vec::new();
    for member in members {
        let column = ctx.column(member.column);
        let element = member.element.unwrap_or(0);
        match p.placement(member.column) {
            Placement::Single(_) if element == 0 => {
                stmts.push(Stmt::line(format!(
                    "dest->{0} = src->{0};",
                    column.name()
                )));
            }
            Placement::Single(_) => {}
            Placement::Scattered(_) => {
                stmts.push(Stmt::line(format!(
                    "dest->{0} = src->{0};",
                    column.element_path(element)
                )));
            }
        }
    }
    stmts
}
