use log::trace;
use rowan::TextRange;

use super::split::{CellId, SplitPolicy};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::schema::{RecordType, SchemaError};

/// A column with its slot range resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedColumn {
    /// Index in declaration order.
    pub position: usize,
    pub name: String,
    pub scalar_type: String,
    pub dims: Vec<usize>,
    /// First slot.
    pub start: usize,
    /// Number of slots.
    pub width: usize,
}

impl PlannedColumn {
    pub fn end(&self) -> usize {
        self.start + self.width
    }

    pub fn is_array(&self) -> bool {
        !self.dims.is_empty()
    }

    /// Row-major multi-index of a flat element offset.
    ///
    /// For `dims = [3, 2]`, offset 3 is `[1, 1]`.
    pub fn multi_index(&self, element: usize) -> Vec<usize> {
        let mut index = vec![0; self.dims.len()];
        let mut rest = element;
        for (slot, dim) in index.iter_mut().zip(&self.dims).rev() {
            *slot = rest % dim;
            rest /= dim;
        }
        index
    }
}

/// Where a column's slots live under one policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// All slots in one cell. Copied as a whole.
    Single(CellId),
    /// Elements spread over several cells, one cell id per element.
    Scattered(Vec<CellId>),
}

impl Placement {
    fn of(policy: &SplitPolicy, column: &PlannedColumn) -> Self {
        let cells = &policy.cells()[column.start..column.end()];
        match cells {
            [first, rest @ ..] if rest.iter().all(|c| c == first) => Placement::Single(*first),
            _ => Placement::Scattered(cells.to_vec()),
        }
    }

    pub fn is_scattered(&self) -> bool {
        matches!(self, Placement::Scattered(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyPlan {
    pub policy: SplitPolicy,
    /// One entry per column, in declaration order.
    pub placements: Vec<Placement>,
    /// The `@splits` row this policy came from. `None` for policy 0.
    pub range: Option<TextRange>,
}

impl PolicyPlan {
    fn new(policy: SplitPolicy, columns: &[PlannedColumn], range: Option<TextRange>) -> Self {
        let placements = columns.iter().map(|c| Placement::of(&policy, c)).collect();
        Self {
            policy,
            placements,
            range,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanWarning {
    /// A declared policy repeats the slot table of an earlier one.
    RedundantPolicy {
        policy: usize,
        same_as: usize,
        range: TextRange,
    },
    /// A declared policy leaves cell ids below its maximum empty.
    UnusedCells {
        policy: usize,
        cells: Vec<CellId>,
        range: TextRange,
    },
}

impl PlanWarning {
    pub fn report(&self, record: &str, diagnostics: &mut Diagnostics) {
        match self {
            PlanWarning::RedundantPolicy {
                policy,
                same_as,
                range,
            } => {
                let message = if *same_as == 0 {
                    format!("split policy {policy} of `{record}` is the default layout")
                } else {
                    format!("split policy {policy} of `{record}` repeats policy {same_as}")
                };
                diagnostics
                    .report(DiagnosticKind::RedundantPolicy, *range)
                    .message(message)
                    .emit();
            }
            PlanWarning::UnusedCells {
                policy,
                cells,
                range,
            } => {
                let list = cells
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                diagnostics
                    .report(DiagnosticKind::UnusedCells, *range)
                    .message(format!(
                        "split policy {policy} of `{record}` leaves cell(s) {list} empty"
                    ))
                    .emit();
            }
        }
    }
}

/// Layout of one record type: slot ranges and every policy's placements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub record: String,
    pub colcount: usize,
    pub columns: Vec<PlannedColumn>,
    /// Policy 0 (uniform) followed by the declared ones.
    pub policies: Vec<PolicyPlan>,
    pub default_policy: usize,
    pub warnings: Vec<PlanWarning>,
}

impl LayoutPlan {
    /// The column owning `slot`.
    pub fn round(&self, slot: usize) -> Option<&PlannedColumn> {
        let i = self.columns.partition_point(|c| c.end() <= slot);
        self.columns.get(i)
    }

    /// `(column position, element offset)` of `slot`.
    pub fn locate(&self, slot: usize) -> Option<(usize, usize)> {
        self.round(slot).map(|c| (c.position, slot - c.start))
    }

    /// Largest cell count over all policies.
    pub fn max_cells(&self) -> usize {
        self.policies
            .iter()
            .map(|p| p.policy.cell_count())
            .max()
            .unwrap_or(1)
    }

    /// Whether `column` is scattered under any policy.
    pub fn is_scattered(&self, column: usize) -> bool {
        self.policies
            .iter()
            .any(|p| p.placements[column].is_scattered())
    }
}

/// Plan one record type.
pub fn plan(record: &RecordType) -> Result<LayoutPlan, SchemaError> {
    let columns = plan_columns(record);
    let colcount = columns.last().map_or(0, PlannedColumn::end);

    let mut policies = Vec::with_capacity(record.splits.len() + 1);
    policies.push(PolicyPlan::new(
        SplitPolicy::uniform(0, &columns),
        &columns,
        None,
    ));

    for (i, row) in record.splits.iter().enumerate() {
        let policy = SplitPolicy::new(i + 1, row.cells.clone(), &columns).map_err(|e| {
            SchemaError::MalformedSplit {
                section: record.name.clone(),
                row: i + 1,
                expected: colcount,
                text: row
                    .cells
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
                reason: e.to_string(),
                range: row.range,
            }
        })?;
        policies.push(PolicyPlan::new(policy, &columns, Some(row.range)));
    }

    let default_policy = match record.default_split {
        None => 0,
        Some(d) if d.index < policies.len() => d.index,
        Some(d) => {
            return Err(SchemaError::InvalidDefaultSplit {
                section: record.name.clone(),
                reason: format!(
                    "policy {} does not exist, valid indices are 0..={}",
                    d.index,
                    policies.len() - 1
                ),
                range: d.range,
            });
        }
    };

    let warnings = lint(&policies);
    trace!(
        "planned `{}`: {} slot(s), {} policy(ies), default {}",
        record.name,
        colcount,
        policies.len(),
        default_policy
    );

    Ok(LayoutPlan {
        record: record.name.clone(),
        colcount,
        columns,
        policies,
        default_policy,
        warnings,
    })
}

fn plan_columns(record: &RecordType) -> Vec<PlannedColumn> {
    let mut start = 0;
    record
        .columns
        .iter()
        .enumerate()
        .map(|(position, column)| {
            let planned = PlannedColumn {
                position,
                name: column.name.clone(),
                scalar_type: column.scalar_type.clone(),
                dims: column.arity.clone(),
                start,
                width: column.flat_width(),
            };
            start += planned.width;
            planned
        })
        .collect()
}

fn lint(policies: &[PolicyPlan]) -> Vec<PlanWarning> {
    let mut warnings = Vec::new();
    for (i, plan) in policies.iter().enumerate().skip(1) {
        let Some(range) = plan.range else {
            continue;
        };
        if let Some(same_as) = policies[..i]
            .iter()
            .position(|earlier| earlier.policy.same_layout(&plan.policy))
        {
            warnings.push(PlanWarning::RedundantPolicy {
                policy: i,
                same_as,
                range,
            });
            continue;
        }
        let cells = plan.policy.unused_cells();
        if !cells.is_empty() {
            warnings.push(PlanWarning::UnusedCells {
                policy: i,
                cells,
                range,
            });
        }
    }
    warnings
}
