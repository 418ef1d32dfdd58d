//! JSON deserialization for ABI documents.
//!
//! The document uses `type` as the key for type expressions. Unknown keys
//! (`ricardian_clauses`, `error_messages`, `abi_extensions`, ...) are ignored
//! and missing sections default to empty.

use serde::Deserialize;

use super::types::{ActionDef, FieldDef, Schema, StructDef, TableDef, TypeDef};

/// Error during schema parsing.
#[derive(Debug)]
pub enum SchemaError {
    Json(serde_json::Error),
    Binary(postcard::Error),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Binary(e) => write!(f, "binary schema error: {e}"),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Binary(e) => Some(e),
        }
    }
}

impl Schema {
    /// Parse a schema from its JSON document.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let raw: RawSchema = serde_json::from_str(json).map_err(SchemaError::Json)?;
        Ok(raw.into())
    }
}

/// Raw structure matching the ABI JSON document.
#[derive(Debug, Deserialize)]
struct RawSchema {
    #[serde(default)]
    version: String,
    #[serde(default)]
    types: Vec<RawTypeDef>,
    #[serde(default)]
    structs: Vec<RawStructDef>,
    #[serde(default)]
    actions: Vec<RawActionDef>,
    #[serde(default)]
    tables: Vec<RawTableDef>,
}

#[derive(Debug, Deserialize)]
struct RawTypeDef {
    new_type_name: String,
    #[serde(rename = "type")]
    type_name: String,
}

#[derive(Debug, Deserialize)]
struct RawStructDef {
    name: String,
    #[serde(default)]
    base: String,
    #[serde(default)]
    fields: Vec<RawFieldDef>,
}

#[derive(Debug, Deserialize)]
struct RawFieldDef {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

#[derive(Debug, Deserialize)]
struct RawActionDef {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    ricardian_contract: String,
}

#[derive(Debug, Deserialize)]
struct RawTableDef {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    index_type: String,
    #[serde(default)]
    key_names: Vec<String>,
    #[serde(default)]
    key_types: Vec<String>,
}

impl From<RawSchema> for Schema {
    fn from(raw: RawSchema) -> Self {
        Self {
            version: raw.version,
            types: raw.types.into_iter().map(Into::into).collect(),
            structs: raw.structs.into_iter().map(Into::into).collect(),
            actions: raw.actions.into_iter().map(Into::into).collect(),
            tables: raw.tables.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<RawTypeDef> for TypeDef {
    fn from(raw: RawTypeDef) -> Self {
        Self {
            new_type_name: raw.new_type_name,
            type_name: raw.type_name,
        }
    }
}

impl From<RawStructDef> for StructDef {
    fn from(raw: RawStructDef) -> Self {
        Self {
            name: raw.name,
            base: raw.base,
            fields: raw
                .fields
                .into_iter()
                .map(|f| FieldDef {
                    name: f.name,
                    type_name: f.type_name,
                })
                .collect(),
        }
    }
}

impl From<RawActionDef> for ActionDef {
    fn from(raw: RawActionDef) -> Self {
        Self {
            name: raw.name,
            type_name: raw.type_name,
            ricardian_contract: raw.ricardian_contract,
        }
    }
}

impl From<RawTableDef> for TableDef {
    fn from(raw: RawTableDef) -> Self {
        Self {
            name: raw.name,
            type_name: raw.type_name,
            index_type: raw.index_type,
            key_names: raw.key_names,
            key_types: raw.key_types,
        }
    }
}
