//! Header emission.
//!
//! Lowering turns each [`LayoutPlan`] into [`ir`] nodes; [`render`] writes
//! them out. Records are rendered into separate buffers and joined only
//! once all of them are done.

mod config;
pub mod ir;
pub mod lower;
pub mod render;
pub mod writer;

#[cfg(test)]
mod emit_tests;

pub use config::Config;

use log::{debug, trace};

use crate::layout::{self, LayoutPlan};
use crate::schema::Schema;
use crate::{Error, Result};

use ir::{Item, Namespace, spaced};
use writer::Writer;

const STANDARD_INCLUDES: &[&str] = &["<array>", "<cstddef>", "<ostream>", "<type_traits>", "<utility>"];

/// Render one record's definitions, without preamble or user namespace.
pub fn emit_record(plan: &LayoutPlan, config: &Config) -> String {
    trace!("emitting `{}`", plan.record);
    let mut w = Writer::new(config.indent_width);
    render::render_items(&lower::lower_record(plan), &mut w);
    w.finish()
}

/// Plan and render a whole schema.
pub fn emit_schema(schema: &Schema, config: &Config) -> Result<String> {
    let plans = layout::plan_schema(schema)
        .map_err(|errors| Error::Schema(crate::to_diagnostics(&errors)))?;
    Ok(emit_plans(&plans, config))
}

/// Render planned records into one header.
pub fn emit_plans(plans: &[LayoutPlan], config: &Config) -> String {
    let records: Vec<Item> = plans
        .iter()
        .map(|p| Item::Rendered(emit_record(p, config)))
        .collect();
    debug!("rendered {} record(s)", records.len());

    let mut items = preamble(config);
    if !records.is_empty() {
        items.push(Item::Blank);
        let records = spaced(records);
        if config.namespace.is_global() {
            items.extend(records);
        } else {
            items.push(Item::Namespace(Namespace {
                name: config.namespace.to_string(),
                items: records,
            }));
        }
    }

    let mut w = Writer::new(config.indent_width);
    render::render_items(&items, &mut w);
    w.finish()
}

fn preamble(config: &Config) -> Vec<Item> {
    let mut items = Vec::new();
    if config.pragma_once {
        items.push(Item::Directive("#pragma once".to_string()));
        items.push(Item::Blank);
    }
    for header in STANDARD_INCLUDES {
        items.push(Item::Directive(format!("#include {header}")));
    }
    for header in &config.includes {
        items.push(Item::Directive(format!("#include {}", include_spelling(header))));
    }
    items
}

/// Quote bare header names; keep `<...>` and `"..."` as written.
fn include_spelling(header: &str) -> String {
    let header = header.trim();
    if (header.starts_with('<') && header.ends_with('>'))
        || (header.starts_with('"') && header.ends_with('"') && header.len() > 1)
    {
        header.to_string()
    } else {
        format!("\"{header}\"")
    }
}
