//! Split policies: which storage cell holds each column slot.

use serde::Serialize;
use stogen_core::MAX_CELLS;

use super::plan::PlannedColumn;

pub type CellId = u32;

/// A column slot as seen from a cell: the column and, for arrays, the
/// row-major element offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Member {
    pub column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("found {found} entries, expected {expected}")]
    Length { found: usize, expected: usize },

    #[error("cell {cell} of slot {slot} exceeds the limit of {limit} cells")]
    CellOutOfRange { slot: usize, cell: CellId, limit: CellId },
}

/// Assignment of every column slot to a cell.
///
/// Built only through [`SplitPolicy::new`] or [`SplitPolicy::uniform`], so
/// the slot table always covers the whole record and every cell is in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPolicy {
    index: usize,
    cells: Vec<CellId>,
    members: Vec<Vec<Member>>,
}

impl SplitPolicy {
    /// Validate `cells` against the planned columns.
    pub fn new(
        index: usize,
        cells: Vec<CellId>,
        columns: &[PlannedColumn],
    ) -> Result<Self, PolicyError> {
        let expected = columns.last().map_or(0, PlannedColumn::end);
        if cells.len() != expected {
            return Err(PolicyError::Length {
                found: cells.len(),
                expected,
            });
        }
        if let Some((slot, &cell)) = cells.iter().enumerate().find(|(_, c)| **c >= MAX_CELLS) {
            return Err(PolicyError::CellOutOfRange {
                slot,
                cell,
                limit: MAX_CELLS,
            });
        }
        Ok(Self::build(index, cells, columns))
    }

    /// Every slot in cell 0.
    pub fn uniform(index: usize, columns: &[PlannedColumn]) -> Self {
        let colcount = columns.last().map_or(0, PlannedColumn::end);
        Self::build(index, vec![0; colcount], columns)
    }

    fn build(index: usize, cells: Vec<CellId>, columns: &[PlannedColumn]) -> Self {
        let cell_count = cells.iter().max().map_or(1, |m| *m as usize + 1);
        let mut members = vec![Vec::new(); cell_count];
        for column in columns {
            for element in 0..column.width {
                let cell = cells[column.start + element] as usize;
                members[cell].push(Member {
                    column: column.position,
                    element: column.is_array().then_some(element),
                });
            }
        }
        Self {
            index,
            cells,
            members,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The slot table, one cell id per slot.
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    /// Highest cell id plus one.
    pub fn cell_count(&self) -> usize {
        self.members.len()
    }

    /// # Panics
    /// If `slot` is outside the record.
    pub fn cell_of(&self, slot: usize) -> CellId {
        self.cells[slot]
    }

    /// Slots stored in `cell`, in slot order. Empty for an unused or
    /// out-of-range cell.
    pub fn members_of(&self, cell: CellId) -> &[Member] {
        self.members
            .get(cell as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cell ids below the maximum that hold no slot.
    pub fn unused_cells(&self) -> Vec<CellId> {
        (0..self.cell_count() as CellId)
            .filter(|c| self.members_of(*c).is_empty())
            .collect()
    }

    /// Same slot table as `other`, ignoring the index.
    pub fn same_layout(&self, other: &SplitPolicy) -> bool {
        self.cells == other.cells
    }
}
