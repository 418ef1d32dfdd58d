//! Contract interface descriptions.
//!
//! This module provides the types of a contract's ABI document, with support
//! for JSON deserialization and compact binary serialization.

mod binary;
mod json;
mod types;

#[cfg(test)]
mod binary_tests;
#[cfg(test)]
mod json_tests;

pub use json::SchemaError;
pub use types::{ActionDef, FieldDef, Schema, StructDef, TableDef, TypeDef};
