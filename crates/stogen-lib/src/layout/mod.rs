//! Layout planning: slot ranges, split policies and array placement.

mod dump;
mod plan;
mod split;


pub use dump::{ColumnDump, PlacementDump, PolicyDump, RecordDump};
pub use plan::{LayoutPlan, PlanWarning, Placement, PlannedColumn, PolicyPlan, plan};
pub use split::{CellId, Member, PolicyError, SplitPolicy};

use crate::schema::{Schema, SchemaError};

/// Plan every record type, collecting one error per failing record.
pub fn plan_schema(schema: &Schema) -> Result<Vec<LayoutPlan>, Vec<SchemaError>> {
    let mut plans = Vec::with_capacity(schema.len());
    let mut errors = Vec::new();
    for record in schema.records() {
        match plan(record) {
            Ok(p) => plans.push(p),
            Err(e) => errors.push(e),
        }
    }
    if errors.is_empty() {
        Ok(plans)
    } else {
        Err(errors)
    }
}
