#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Data types shared by the contract ABI codec.
//!
//! - [`Schema`]: the interface description a contract publishes, parsed
//!   from its JSON document or from a compact binary cache.
//! - [`Value`]: the dynamic, JSON-like tree the codec produces on decode
//!   and consumes on encode.

pub mod schema;
mod value;

#[cfg(test)]
mod value_tests;

pub use schema::{ActionDef, FieldDef, Schema, SchemaError, StructDef, TableDef, TypeDef};
pub use value::Value;
