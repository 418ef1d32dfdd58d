//! Errors raised while loading a schema or running the codec.

use std::fmt;
use std::time::Duration;

use wasm_abi_core::SchemaError;
use wasm_abi_wire::WireError;

/// Which table a duplicate name was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Type,
    Struct,
    Action,
    Table,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Type => "type",
            Self::Struct => "struct",
            Self::Action => "action",
            Self::Table => "table",
        })
    }
}

/// Schema element an error is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Alias(String),
    Struct(String),
    Field { struct_name: String, field: String },
    Action(String),
    Table(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alias(name) => write!(f, "alias '{name}'"),
            Self::Struct(name) => write!(f, "struct '{name}'"),
            Self::Field { struct_name, field } => write!(f, "field '{struct_name}.{field}'"),
            Self::Action(name) => write!(f, "action '{name}'"),
            Self::Table(name) => write!(f, "table '{name}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("unsupported schema version '{0}' (expected {prefix}x)", prefix = crate::VERSION_PREFIX)]
    UnsupportedSchemaVersion(String),

    #[error("duplicate {kind} definition '{name}'")]
    DuplicateDefinition { kind: DefinitionKind, name: String },

    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("circular type alias '{0}'")]
    CircularTypeAlias(String),

    #[error("circular base chain through struct '{0}'")]
    CircularStructBase(String),

    #[error("struct '{0}' contains itself")]
    CircularStructContainment(String),

    /// A regular field follows a binary-extension field.
    #[error("field '{field}' of struct '{struct_name}' follows a binary extension field")]
    InvalidBinaryExtension { struct_name: String, field: String },

    #[error("unexpected end of input while decoding '{type_name}' at offset {offset}")]
    TruncatedInput { type_name: String, offset: usize },

    /// Bytes are present but invalid for the type (bool not 0/1, bad UTF-8,
    /// overlong varint, ...).
    #[error("malformed '{type_name}' at offset {offset}: {reason}")]
    MalformedInput {
        type_name: String,
        offset: usize,
        reason: String,
    },

    #[error("array '{type_name}' declares {size} elements (limit {limit})")]
    ArraySizeExceedsLimit {
        type_name: String,
        size: u64,
        limit: usize,
    },

    #[error("array '{0}' contains a null element")]
    InvalidArrayElement(String),

    #[error("type mismatch for '{type_name}': {detail}")]
    TypeMismatch { type_name: String, detail: String },

    #[error("missing field '{field}' of struct '{struct_name}'")]
    MissingField { struct_name: String, field: String },

    #[error("struct '{struct_name}' has {expected} fields, got {found} positional values")]
    FieldCountMismatch {
        struct_name: String,
        expected: usize,
        found: usize,
    },

    #[error("struct '{0}' has a base and cannot be encoded from an array")]
    UnsupportedPositionalBase(String),

    #[error("{remaining} trailing bytes after '{type_name}' at offset {offset}")]
    TrailingBytes {
        type_name: String,
        offset: usize,
        remaining: usize,
    },

    #[error("deadline exceeded (budget {budget:?})")]
    DeadlineExceeded { budget: Duration },

    #[error("recursion limit of {limit} exceeded")]
    RecursionLimitExceeded { limit: u32 },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("in {scope}: {source}")]
    Context {
        scope: Scope,
        #[source]
        source: Box<CodecError>,
    },
}

impl CodecError {
    /// The innermost error, with every [`Context`](Self::Context) stripped.
    pub fn root(&self) -> &CodecError {
        let mut err = self;
        while let CodecError::Context { source, .. } = err {
            err = source;
        }
        err
    }

    /// Scopes from outermost to innermost.
    pub fn scopes(&self) -> Vec<&Scope> {
        let mut scopes = Vec::new();
        let mut err = self;
        while let CodecError::Context { scope, source } = err {
            scopes.push(scope);
            err = source;
        }
        scopes
    }

    pub(crate) fn in_scope(self, scope: Scope) -> Self {
        CodecError::Context {
            scope,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_field(self, struct_name: &str, field: &str) -> Self {
        self.in_scope(Scope::Field {
            struct_name: struct_name.to_owned(),
            field: field.to_owned(),
        })
    }

    pub(crate) fn from_wire(err: WireError, type_name: &str) -> Self {
        let type_name = type_name.to_owned();
        match err {
            WireError::Truncated { offset, .. } => CodecError::TruncatedInput { type_name, offset },
            WireError::Malformed { offset, reason } => CodecError::MalformedInput {
                type_name,
                offset,
                reason: reason.to_owned(),
            },
            WireError::Invalid(detail) => CodecError::TypeMismatch { type_name, detail },
        }
    }
}

impl From<SchemaError> for CodecError {
    fn from(err: SchemaError) -> Self {
        CodecError::Json(err.to_string())
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Json(err.to_string())
    }
}
