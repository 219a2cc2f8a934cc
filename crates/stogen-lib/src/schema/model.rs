use indexmap::IndexMap;
use rowan::TextRange;

use super::column::Column;

/// Record types in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    records: IndexMap<String, RecordType>,
}

impl Schema {
    pub(crate) fn new(records: IndexMap<String, RecordType>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> impl Iterator<Item = &RecordType> {
        self.records.values()
    }

    pub fn get(&self, name: &str) -> Option<&RecordType> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One schema section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordType {
    pub name: String,
    pub range: TextRange,
    pub columns: Vec<Column>,
    pub default_split: Option<DefaultSplit>,
    /// Declared split rows. They become policies `1..=splits.len()`.
    pub splits: Vec<SplitRow>,
}

impl RecordType {
    /// Total number of column slots.
    pub fn colcount(&self) -> usize {
        self.columns.iter().map(Column::flat_width).sum()
    }
}

/// `@default = N`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultSplit {
    pub index: usize,
    pub range: TextRange,
}

/// One `@splits` row: a cell id per column slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRow {
    pub cells: Vec<u32>,
    pub range: TextRange,
}
