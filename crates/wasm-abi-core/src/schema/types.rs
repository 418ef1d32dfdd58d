//! Schema type definitions.
//!
//! These are the loaded form of the document. Every field is always
//! serialized so the binary form stays positional.

use serde::{Deserialize, Serialize};

/// Complete contract interface description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Format version, e.g. `wasm::abi/1.0`.
    pub version: String,
    /// Aliases, in declaration order.
    pub types: Vec<TypeDef>,
    /// Record types, in declaration order.
    pub structs: Vec<StructDef>,
    /// Callable actions and their argument types.
    pub actions: Vec<ActionDef>,
    /// Persistent tables and their row types.
    pub tables: Vec<TableDef>,
}

/// `new_type_name` is another name for `type_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub new_type_name: String,
    pub type_name: String,
}

/// Record type with optional single inheritance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    /// Base struct name; empty when the struct has no base.
    pub base: String,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    /// Type expression, possibly suffixed with `[]`, `?` or `$`.
    pub type_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDef {
    pub name: String,
    pub type_name: String,
    /// Human-readable contract text. Carried through, never interpreted.
    pub ricardian_contract: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,
    pub type_name: String,
    pub index_type: String,
    pub key_names: Vec<String>,
    pub key_types: Vec<String>,
}

impl Schema {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, new_type_name: &str, type_name: &str) -> Self {
        self.types.push(TypeDef {
            new_type_name: new_type_name.to_owned(),
            type_name: type_name.to_owned(),
        });
        self
    }

    pub fn with_struct(mut self, def: StructDef) -> Self {
        self.structs.push(def);
        self
    }

    pub fn with_action(mut self, name: &str, type_name: &str) -> Self {
        self.actions.push(ActionDef {
            name: name.to_owned(),
            type_name: type_name.to_owned(),
            ricardian_contract: String::new(),
        });
        self
    }

    pub fn with_table(mut self, name: &str, type_name: &str) -> Self {
        self.tables.push(TableDef {
            name: name.to_owned(),
            type_name: type_name.to_owned(),
            ..TableDef::default()
        });
        self
    }
}

impl StructDef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    pub fn base(mut self, base: &str) -> Self {
        self.base = base.to_owned();
        self
    }

    pub fn field(mut self, name: &str, type_name: &str) -> Self {
        self.fields.push(FieldDef {
            name: name.to_owned(),
            type_name: type_name.to_owned(),
        });
        self
    }

    /// Whether the struct inherits from a base.
    pub fn has_base(&self) -> bool {
        !self.base.is_empty()
    }
}
