//! Lowering from a layout plan to emission IR.
//!
//! Each record becomes one `<record>_datatypes` namespace followed by a
//! `using` alias. The phases run in a fixed order and only read from the
//! contexts below.

mod accessor;
mod columns;
mod policy;

use crate::layout::{LayoutPlan, Placement, PlannedColumn, PolicyPlan};

use super::ir::{Item, Namespace, spaced};

/// Bindings shared by every phase of one record.
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'p> {
    pub plan: &'p LayoutPlan,
    /// The value struct, also the name the record is exported as.
    pub record: &'p str,
}

impl<'p> RecordContext<'p> {
    pub fn new(plan: &'p LayoutPlan) -> Self {
        Self {
            plan,
            record: &plan.record,
        }
    }

    pub fn datatypes(&self) -> String {
        format!("{}_datatypes", self.record)
    }

    pub fn column(&self, position: usize) -> ColumnContext<'p> {
        ColumnContext {
            column: &self.plan.columns[position],
            next: self.plan.columns.get(position + 1),
            scattered: self.plan.is_scattered(position),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = ColumnContext<'p>> + '_ {
        (0..self.plan.columns.len()).map(|i| self.column(i))
    }

    pub fn policy(&self, index: usize) -> PolicyContext<'p> {
        PolicyContext {
            index,
            policy: &self.plan.policies[index],
            columns: &self.plan.columns,
            record: self.record,
        }
    }

    pub fn policies(&self) -> impl Iterator<Item = PolicyContext<'p>> + '_ {
        (0..self.plan.policies.len()).map(|i| self.policy(i))
    }
}

/// One column and its neighbor, for range checks on `NamedColumn`.
#[derive(Debug, Clone, Copy)]
pub struct ColumnContext<'p> {
    pub column: &'p PlannedColumn,
    pub next: Option<&'p PlannedColumn>,
    /// Elements live in different cells under some policy.
    pub scattered: bool,
}

impl ColumnContext<'_> {
    pub fn name(&self) -> &str {
        &self.column.name
    }

    pub fn enumerator(&self) -> String {
        format!("NamedColumn::{}", self.column.name)
    }

    /// First enumerator past this column.
    pub fn upper_bound(&self) -> String {
        match self.next {
            Some(next) => format!("NamedColumn::{}", next.name),
            None => "NamedColumn::COLCOUNT".to_string(),
        }
    }

    /// `NamedColumn::x <= Column && Column < NamedColumn::y`
    pub fn range_check(&self, var: &str) -> String {
        format!(
            "{} <= {var} && {var} < {}",
            self.enumerator(),
            self.upper_bound()
        )
    }

    /// Scalar type wrapped in one `std::array` per dimension.
    pub fn value_type(&self) -> String {
        value_type(&self.column.scalar_type, &self.column.dims)
    }

    /// `NamedColumn` expression naming one slot of this column.
    pub fn slot(&self, element: usize) -> String {
        if element == 0 {
            self.enumerator()
        } else {
            format!("{} + {element}", self.enumerator())
        }
    }

    /// Member access path of one element, e.g. `c[1][0]`.
    pub fn element_path(&self, element: usize) -> String {
        let mut path = self.column.name.clone();
        for i in self.column.multi_index(element) {
            path.push_str(&format!("[{i}]"));
        }
        path
    }
}

/// One split policy with the columns it places.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'p> {
    pub index: usize,
    pub policy: &'p PolicyPlan,
    pub columns: &'p [PlannedColumn],
    pub record: &'p str,
}

impl PolicyContext<'_> {
    pub fn placement(&self, column: usize) -> &Placement {
        &self.policy.placements[column]
    }

    pub fn cell_count(&self) -> usize {
        self.policy.policy.cell_count()
    }
}

pub(crate) fn value_type(scalar: &str, dims: &[usize]) -> String {
    dims.iter()
        .rev()
        .fold(scalar.to_string(), |inner, d| format!("std::array<{inner}, {d}>"))
}

/// Lower one planned record.
pub fn lower_record(plan: &LayoutPlan) -> Vec<Item> {
    let ctx = RecordContext::new(plan);

    let mut body = vec![
        Item::Line("enum class NamedColumn;".to_string()),
        Item::Line("using SplitType = int;".to_string()),
        Item::Line("class RecordAccessor;".to_string()),
        Item::Struct(columns::value_struct(&ctx)),
        Item::Enum(columns::named_column(&ctx)),
    ];
    body.extend(columns::arithmetic(&ctx));
    body.extend(columns::traits(&ctx));
    body.extend(policy::policies(&ctx));
    body.push(Item::Struct(accessor::record_accessor(&ctx)));

    let datatypes = ctx.datatypes();
    vec![
        Item::Namespace(Namespace {
            name: datatypes.clone(),
            items: spaced(body),
        }),
        Item::Blank,
        Item::Line(format!("using {0} = {datatypes}::{0};", ctx.record)),
    ]
}
