//! Schema loading.
//!
//! A schema is an INI-style file. Each section declares one record type:
//!
//! ```ini
//! [district]
//! d_ytd = int64_t
//! d_next_o_id = uint64_t
//! d_tax[4] = int32_t
//! @splits =
//!     0,1,1,1,1,1
//! @default = 1
//! ```
//!
//! Keys are columns with optional `[N]` array suffixes, values are scalar
//! types. Keys starting with `@` are metadata.

mod column;
mod error;
mod loader;
mod model;
pub(crate) mod source;

#[cfg(test)]
mod loader_tests;
#[cfg(test)]
mod source_tests;

pub use column::Column;
pub use error::SchemaError;
pub use loader::load;
pub use model::{DefaultSplit, RecordType, Schema, SplitRow};
