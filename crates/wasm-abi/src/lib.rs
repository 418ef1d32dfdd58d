#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Schema-driven codec for contract ABI payloads.
//!
//! A [`Registry`] is loaded from a [`Schema`], validated once, and then
//! translates binary action arguments and table rows into [`Value`] trees
//! and back.
//!
//! ```
//! use std::time::Duration;
//! use wasm_abi::{CodecLimits, Registry};
//!
//! let registry = Registry::from_json(
//!     r#"{
//!         "version": "wasm::abi/1.0",
//!         "types": [{ "new_type_name": "amount", "type": "uint64" }],
//!         "structs": [{
//!             "name": "transfer",
//!             "base": "",
//!             "fields": [
//!                 { "name": "to", "type": "string" },
//!                 { "name": "amount", "type": "amount" }
//!             ]
//!         }],
//!         "actions": [{ "name": "transfer", "type": "transfer" }]
//!     }"#,
//!     CodecLimits::default(),
//! )
//! .expect("valid schema");
//!
//! let bytes = [3, b'a', b'b', b'c', 100, 0, 0, 0, 0, 0, 0, 0];
//! let value = registry
//!     .decode_action("transfer", &bytes, Duration::from_millis(10))
//!     .expect("decodes");
//! assert_eq!(value.to_string(), r#"{"to":"abc","amount":100}"#);
//! ```

pub mod builtin;
mod codec;
pub mod context;
pub mod error;
pub mod limits;
pub mod registry;
mod shared;
pub mod type_expr;
mod validate;

#[cfg(test)]
mod error_tests;
#[cfg(test)]
mod limits_tests;
#[cfg(test)]
mod shared_tests;

pub use builtin::{BuiltinKind, Shape};
pub use context::TraversalContext;
pub use error::{CodecError, DefinitionKind, Scope};
pub use limits::{CodecLimits, MAX_ABI_ARRAY_SIZE};
pub use registry::{Registry, ResolvedType, StructId};
pub use shared::SharedRegistry;
pub use wasm_abi_core::{Schema, SchemaError, Value};

/// Accepted prefix of a schema's `version` string.
pub const VERSION_PREFIX: &str = "wasm::abi/1.";

/// Result type for schema loading and coding.
pub type Result<T> = std::result::Result<T, CodecError>;
