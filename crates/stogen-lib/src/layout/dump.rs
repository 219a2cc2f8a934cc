//! Serializable view of a layout plan, printed by `stogen --plan`.

use serde::Serialize;

use super::plan::{LayoutPlan, Placement};
use super::split::{CellId, Member};

#[derive(Debug, Serialize)]
pub struct RecordDump<'a> {
    pub record: &'a str,
    pub colcount: usize,
    pub default_policy: usize,
    pub columns: Vec<ColumnDump<'a>>,
    pub policies: Vec<PolicyDump<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ColumnDump<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub scalar_type: &'a str,
    #[serde(skip_serializing_if = "is_scalar")]
    pub dims: &'a [usize],
    pub start: usize,
    pub width: usize,
}

#[derive(Debug, Serialize)]
pub struct PolicyDump<'a> {
    pub index: usize,
    pub cells: &'a [CellId],
    pub members: Vec<&'a [Member]>,
    pub placements: Vec<PlacementDump<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PlacementDump<'a> {
    Single { column: &'a str, cell: CellId },
    Scattered { column: &'a str, cells: &'a [CellId] },
}

fn is_scalar(dims: &&[usize]) -> bool {
    dims.is_empty()
}

impl LayoutPlan {
    pub fn dump(&self) -> RecordDump<'_> {
        let columns = self
            .columns
            .iter()
            .map(|c| ColumnDump {
                name: &c.name,
                scalar_type: &c.scalar_type,
                dims: &c.dims,
                start: c.start,
                width: c.width,
            })
            .collect();

        let policies = self
            .policies
            .iter()
            .map(|p| PolicyDump {
                index: p.policy.index(),
                cells: p.policy.cells(),
                members: (0..p.policy.cell_count() as CellId)
                    .map(|cell| p.policy.members_of(cell))
                    .collect(),
                placements: p
                    .placements
                    .iter()
                    .zip(&self.columns)
                    .map(|(placement, column)| match placement {
                        Placement::Single(cell) => PlacementDump::Single {
                            column: &column.name,
                            cell: *cell,
                        },
                        Placement::Scattered(cells) => PlacementDump::Scattered {
                            column: &column.name,
                            cells,
                        },
                    })
                    .collect(),
            })
            .collect();

        RecordDump {
            record: &self.record,
            colcount: self.colcount,
            default_policy: self.default_policy,
            columns,
            policies,
        }
    }
}
