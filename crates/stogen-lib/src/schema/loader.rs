use indexmap::IndexMap;
use indexmap::map::Entry as MapEntry;
use log::trace;
use rowan::TextRange;
use stogen_core::{MAX_CELLS, MAX_COLCOUNT, MAX_POLICIES, is_cpp_identifier};

use super::column::{Column, parse_declaration};
use super::error::SchemaError;
use super::model::{DefaultSplit, RecordType, Schema, SplitRow};
use super::source::{self, Entry, Section};

/// Load a schema from source text.
///
/// Every failing section contributes its first error; the result lists them
/// in source order.
pub fn load(source: &str) -> Result<Schema, Vec<SchemaError>> {
    let (document, mut errors) = source::parse(source);

    let mut seen: IndexMap<String, TextRange> = IndexMap::new();
    let mut records = IndexMap::new();

    for section in &document.sections {
        if section.poisoned {
            continue;
        }
        match seen.entry(section.name.clone()) {
            MapEntry::Occupied(first) => {
                errors.push(SchemaError::DuplicateSection {
                    name: section.name.clone(),
                    range: section.range,
                    first: *first.get(),
                });
                continue;
            }
            MapEntry::Vacant(slot) => {
                slot.insert(section.range);
            }
        }

        match build_record(section) {
            Ok(record) => {
                trace!(
                    "record `{}`: {} column(s), {} slot(s), {} split row(s)",
                    record.name,
                    record.columns.len(),
                    record.colcount(),
                    record.splits.len()
                );
                records.insert(record.name.clone(), record);
            }
            Err(error) => errors.push(error),
        }
    }

    if errors.is_empty() {
        Ok(Schema::new(records))
    } else {
        errors.sort_by_key(|e| e.range().start());
        Err(errors)
    }
}

fn build_record(section: &Section) -> Result<RecordType, SchemaError> {
    let name = &section.name;
    if !is_cpp_identifier(name) {
        return Err(SchemaError::InvalidIdentifier {
            name: name.clone(),
            range: section.range,
        });
    }

    let mut keys: IndexMap<String, TextRange> = IndexMap::new();
    let mut columns = Vec::new();
    let mut colcount: usize = 0;
    let mut default_entry = None;
    let mut splits_entry = None;

    for entry in &section.entries {
        if entry.lines.is_empty() {
            return Err(SchemaError::Syntax {
                message: format!("`{}` has no value", entry.key),
                range: entry.key_range,
            });
        }

        if let Some(meta) = entry.key.strip_prefix('@') {
            claim_key(&mut keys, name, &entry.key, entry.key_range)?;
            match meta {
                "default" => default_entry = Some(entry),
                "splits" => splits_entry = Some(entry),
                _ => {
                    return Err(SchemaError::UnknownMetadata {
                        section: name.clone(),
                        key: entry.key.clone(),
                        range: entry.key_range,
                    });
                }
            }
            continue;
        }

        let column = build_column(name, entry)?;
        if column.name == *name {
            return Err(SchemaError::ColumnNamedAfterRecord {
                section: name.clone(),
                range: entry.key_range,
            });
        }
        claim_key(&mut keys, name, &column.name, entry.key_range)?;

        colcount = colcount.saturating_add(column.flat_width());
        if colcount > MAX_COLCOUNT {
            return Err(SchemaError::TooManyColumns {
                section: name.clone(),
                count: colcount,
                limit: MAX_COLCOUNT,
                range: entry.key_range,
            });
        }
        columns.push(column);
    }

    if columns.is_empty() {
        return Err(SchemaError::EmptyRecord {
            section: name.clone(),
            range: section.range,
        });
    }

    let default_split = default_entry
        .map(|entry| parse_default(name, entry))
        .transpose()?;
    let splits = match splits_entry {
        Some(entry) => parse_splits(name, entry, colcount)?,
        None => Vec::new(),
    };

    Ok(RecordType {
        name: name.clone(),
        range: section.range,
        columns,
        default_split,
        splits,
    })
}

fn claim_key(
    keys: &mut IndexMap<String, TextRange>,
    section: &str,
    key: &str,
    range: TextRange,
) -> Result<(), SchemaError> {
    match keys.entry(key.to_string()) {
        MapEntry::Occupied(first) => Err(SchemaError::DuplicateColumn {
            section: section.to_string(),
            name: key.to_string(),
            range,
            first: *first.get(),
        }),
        MapEntry::Vacant(slot) => {
            slot.insert(range);
            Ok(())
        }
    }
}

fn build_column(section: &str, entry: &Entry) -> Result<Column, SchemaError> {
    let (name, arity) =
        parse_declaration(&entry.key).map_err(|reason| SchemaError::InvalidArity {
            section: section.to_string(),
            key: entry.key.clone(),
            reason,
            range: entry.key_range,
        })?;

    if !is_cpp_identifier(name) {
        return Err(SchemaError::InvalidIdentifier {
            name: name.to_string(),
            range: entry.key_range,
        });
    }

    let width = arity
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d));
    if !width.is_some_and(|w| w <= MAX_COLCOUNT) {
        return Err(SchemaError::TooManyColumns {
            section: section.to_string(),
            count: arity.iter().fold(1usize, |acc, &d| acc.saturating_mul(d)),
            limit: MAX_COLCOUNT,
            range: entry.key_range,
        });
    }

    if entry.lines.len() > 1 {
        return Err(SchemaError::Syntax {
            message: format!("type of column `{name}` must fit on one line"),
            range: entry.value_range(),
        });
    }

    Ok(Column {
        name: name.to_string(),
        scalar_type: entry.value(),
        arity,
        range: entry.key_range,
    })
}

fn parse_default(section: &str, entry: &Entry) -> Result<DefaultSplit, SchemaError> {
    let text = entry.value();
    let text = text.trim();
    let index = text
        .parse::<usize>()
        .map_err(|_| SchemaError::InvalidDefaultSplit {
            section: section.to_string(),
            reason: format!("`{text}` is not a policy index"),
            range: entry.value_range(),
        })?;
    Ok(DefaultSplit {
        index,
        range: entry.value_range(),
    })
}

fn parse_splits(section: &str, entry: &Entry, colcount: usize) -> Result<Vec<SplitRow>, SchemaError> {
    let mut rows = Vec::with_capacity(entry.lines.len());

    for (i, line) in entry.lines.iter().enumerate() {
        let row = i + 1;
        let malformed = |reason: String| SchemaError::MalformedSplit {
            section: section.to_string(),
            row,
            expected: colcount,
            text: line.text.clone(),
            reason,
            range: line.range,
        };

        if row > MAX_POLICIES {
            return Err(malformed(format!(
                "at most {MAX_POLICIES} split policies are allowed"
            )));
        }

        let parts: Vec<&str> = line.text.split(',').map(str::trim).collect();
        if parts.len() != colcount {
            return Err(malformed(format!(
                "found {} in `{}`",
                plural(parts.len(), "entry", "entries"),
                line.text
            )));
        }

        let mut cells = Vec::with_capacity(colcount);
        for part in parts {
            let cell = part
                .parse::<u32>()
                .map_err(|_| malformed(format!("`{part}` is not a cell id")))?;
            if cell >= MAX_CELLS {
                return Err(malformed(format!(
                    "cell {cell} exceeds the limit of {MAX_CELLS} cells"
                )));
            }
            cells.push(cell);
        }

        rows.push(SplitRow {
            cells,
            range: line.range,
        });
    }

    Ok(rows)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}
