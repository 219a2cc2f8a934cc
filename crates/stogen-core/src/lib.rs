#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared helpers for the stogen crates.
//!
//! - `utils`: C++ identifier validation and qualified-name splitting
//! - resource limits enforced while loading schemas

pub mod utils;


pub use utils::{QualifiedName, is_cpp_identifier, is_reserved_word};

/// Maximum number of logical column slots a single record type may declare.
pub const MAX_COLCOUNT: usize = 1 << 16;

/// Maximum number of elements in a single array dimension.
pub const MAX_DIMENSION: usize = 4096;

/// Maximum number of storage cells a split policy may address.
pub const MAX_CELLS: u32 = 64;

/// Maximum number of declared split policies per record type.
pub const MAX_POLICIES: usize = 256;
