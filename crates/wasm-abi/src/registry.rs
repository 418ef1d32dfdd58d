//! Validated, immutable schema.
//!
//! Loading populates the name tables, runs the validator over them, then
//! compiles every struct, action and table type into a [`ResolvedType`] so
//! the codec dispatches on an enum instead of re-parsing type strings.

use std::time::Duration;

use indexmap::IndexMap;
use indexmap::map::Entry;
use wasm_abi_core::{Schema, StructDef};

use crate::builtin::{BuiltinKind, Shape};
use crate::context::TraversalContext;
use crate::type_expr::{fundamental_type, is_array, is_extension, is_optional, strip_extension};
use crate::{CodecError, CodecLimits, DefinitionKind, Result, Scope, VERSION_PREFIX};

/// Index of a struct in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StructId(pub(crate) u32);

impl StructId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A type expression with aliases and suffixes resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedType {
    /// A builtin in one of its shapes; the builtin owns the container bytes.
    Builtin(BuiltinKind, Shape),
    /// Array of a non-builtin element.
    Array(Box<ResolvedType>),
    /// Optional of a non-builtin value; the codec owns the presence byte.
    Optional(Box<ResolvedType>),
    Struct(StructId),
}

impl ResolvedType {
    /// Whether a missing value is encoded as an absent optional.
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            ResolvedType::Optional(_) | ResolvedType::Builtin(_, Shape::Optional)
        )
    }
}

#[derive(Debug)]
pub(crate) struct CompiledBase {
    pub(crate) name: String,
    pub(crate) ty: ResolvedType,
}

#[derive(Debug)]
pub(crate) struct CompiledField {
    pub(crate) name: String,
    pub(crate) ty: ResolvedType,
    pub(crate) extension: bool,
}

#[derive(Debug)]
pub(crate) struct CompiledStruct {
    pub(crate) name: String,
    pub(crate) base: Option<CompiledBase>,
    pub(crate) fields: Vec<CompiledField>,
}

/// Name tables as declared, before compilation.
#[derive(Debug, Default)]
pub(crate) struct SchemaTables {
    pub(crate) version: String,
    pub(crate) aliases: IndexMap<String, String>,
    pub(crate) structs: IndexMap<String, StructDef>,
    pub(crate) actions: IndexMap<String, String>,
    pub(crate) tables: IndexMap<String, String>,
}

impl SchemaTables {
    /// Populate the tables, rejecting duplicate names.
    ///
    /// Alias targets are not checked here; the validator reports cycles
    /// before unresolvable targets.
    fn populate(schema: &Schema) -> Result<Self> {
        if !schema.version.starts_with(VERSION_PREFIX) {
            return Err(CodecError::UnsupportedSchemaVersion(schema.version.clone()));
        }

        let mut tables = SchemaTables {
            version: schema.version.clone(),
            ..SchemaTables::default()
        };

        for def in &schema.structs {
            match tables.structs.entry(def.name.clone()) {
                Entry::Occupied(_) => return Err(duplicate(DefinitionKind::Struct, &def.name)),
                Entry::Vacant(slot) => {
                    slot.insert(def.clone());
                }
            }
        }

        for def in &schema.types {
            let name = &def.new_type_name;
            if BuiltinKind::from_name(name).is_some()
                || tables.structs.contains_key(name)
                || tables.aliases.contains_key(name)
            {
                return Err(duplicate(DefinitionKind::Type, name));
            }
            tables.aliases.insert(name.clone(), def.type_name.clone());
        }

        for def in &schema.actions {
            if tables
                .actions
                .insert(def.name.clone(), def.type_name.clone())
                .is_some()
            {
                return Err(duplicate(DefinitionKind::Action, &def.name));
            }
        }

        for def in &schema.tables {
            if tables
                .tables
                .insert(def.name.clone(), def.type_name.clone())
                .is_some()
            {
                return Err(duplicate(DefinitionKind::Table, &def.name));
            }
        }

        Ok(tables)
    }

    /// Chase aliases on the whole expression, at most one hop per alias.
    pub(crate) fn resolve_type<'a>(&'a self, type_name: &'a str) -> &'a str {
        let mut current = type_name;
        for _ in 0..self.aliases.len() {
            match self.aliases.get(current) {
                Some(target) => current = target.as_str(),
                None => break,
            }
        }
        current
    }

    /// A builtin, a struct, or an alias of one, optionally behind one
    /// `[]`/`?` suffix.
    pub(crate) fn is_type(&self, type_name: &str) -> bool {
        let mut current = type_name;
        for _ in 0..=self.aliases.len() {
            let fundamental = fundamental_type(current);
            if BuiltinKind::from_name(fundamental).is_some()
                || self.structs.contains_key(fundamental)
            {
                return true;
            }
            match self.aliases.get(fundamental) {
                Some(target) => current = target.as_str(),
                None => return false,
            }
        }
        false
    }
}

fn duplicate(kind: DefinitionKind, name: &str) -> CodecError {
    CodecError::DuplicateDefinition {
        kind,
        name: name.to_owned(),
    }
}

/// A validated schema ready for coding.
#[derive(Debug)]
pub struct Registry {
    tables: SchemaTables,
    structs: Vec<CompiledStruct>,
    action_types: Vec<ResolvedType>,
    table_types: Vec<ResolvedType>,
    limits: CodecLimits,
}

impl Registry {
    /// Validate `schema` and build a registry from it.
    ///
    /// All-or-nothing: any failure leaves nothing behind.
    pub fn load(schema: &Schema, limits: CodecLimits) -> Result<Self> {
        let result = Self::build(schema, limits);
        match &result {
            Ok(registry) => tracing::debug!(
                version = %registry.tables.version,
                aliases = registry.tables.aliases.len(),
                structs = registry.tables.structs.len(),
                actions = registry.tables.actions.len(),
                tables = registry.tables.tables.len(),
                "schema loaded"
            ),
            Err(error) => tracing::debug!(%error, "schema rejected"),
        }
        result
    }

    /// Parse a JSON schema document and load it.
    pub fn from_json(json: &str, limits: CodecLimits) -> Result<Self> {
        Self::load(&Schema::from_json(json)?, limits)
    }

    fn build(schema: &Schema, limits: CodecLimits) -> Result<Self> {
        let tables = SchemaTables::populate(schema)?;

        let mut ctx = TraversalContext::new(limits.get_max_time(), limits.get_recursion_limit());
        tables.validate(&mut ctx)?;

        let mut registry = Registry {
            tables,
            structs: Vec::new(),
            action_types: Vec::new(),
            table_types: Vec::new(),
            limits,
        };
        registry.compile(&mut ctx)?;
        Ok(registry)
    }

    fn compile(&mut self, ctx: &mut TraversalContext) -> Result<()> {
        let mut structs = Vec::with_capacity(self.tables.structs.len());
        for def in self.tables.structs.values() {
            structs.push(
                self.compile_struct(def, ctx)
                    .map_err(|e| e.in_scope(Scope::Struct(def.name.clone())))?,
            );
        }

        let mut action_types = Vec::with_capacity(self.tables.actions.len());
        for (name, type_name) in &self.tables.actions {
            action_types.push(
                self.resolve_expr(type_name, ctx)
                    .map_err(|e| e.in_scope(Scope::Action(name.clone())))?,
            );
        }

        let mut table_types = Vec::with_capacity(self.tables.tables.len());
        for (name, type_name) in &self.tables.tables {
            table_types.push(
                self.resolve_expr(type_name, ctx)
                    .map_err(|e| e.in_scope(Scope::Table(name.clone())))?,
            );
        }

        self.structs = structs;
        self.action_types = action_types;
        self.table_types = table_types;
        Ok(())
    }

    fn compile_struct(&self, def: &StructDef, ctx: &mut TraversalContext) -> Result<CompiledStruct> {
        let base = if def.has_base() {
            Some(CompiledBase {
                name: def.base.clone(),
                ty: self.resolve_expr(&def.base, ctx)?,
            })
        } else {
            None
        };

        let mut fields = Vec::with_capacity(def.fields.len());
        for field in &def.fields {
            let ty = self
                .resolve_expr(strip_extension(&field.type_name), ctx)
                .map_err(|e| e.in_field(&def.name, &field.name))?;
            fields.push(CompiledField {
                name: field.name.clone(),
                ty,
                extension: is_extension(&field.type_name),
            });
        }

        Ok(CompiledStruct {
            name: def.name.clone(),
            base,
            fields,
        })
    }

    /// Resolve a type expression against this registry.
    pub(crate) fn resolve_expr(
        &self,
        type_name: &str,
        ctx: &mut TraversalContext,
    ) -> Result<ResolvedType> {
        ctx.descend(|ctx| {
            let resolved = self.tables.resolve_type(type_name);
            let fundamental = fundamental_type(resolved);

            if let Some(kind) = BuiltinKind::from_name(fundamental) {
                return Ok(ResolvedType::Builtin(kind, Shape::of(resolved)));
            }
            if is_array(resolved) {
                let element = self.resolve_expr(fundamental, ctx)?;
                return Ok(ResolvedType::Array(Box::new(element)));
            }
            if is_optional(resolved) {
                let inner = self.resolve_expr(fundamental, ctx)?;
                return Ok(ResolvedType::Optional(Box::new(inner)));
            }
            match self.tables.structs.get_index_of(resolved) {
                Some(index) => Ok(ResolvedType::Struct(StructId(index as u32))),
                None => Err(CodecError::UnknownType(type_name.to_owned())),
            }
        })
    }

    pub(crate) fn compiled(&self, id: StructId) -> &CompiledStruct {
        &self.structs[id.index()]
    }

    pub(crate) fn action_type(&self, action: &str) -> Result<(&str, &ResolvedType)> {
        match self.tables.actions.get_full(action) {
            Some((index, _, type_name)) => Ok((type_name.as_str(), &self.action_types[index])),
            None => Err(CodecError::UnknownType(action.to_owned())),
        }
    }

    pub(crate) fn table_type(&self, table: &str) -> Result<(&str, &ResolvedType)> {
        match self.tables.tables.get_full(table) {
            Some((index, _, type_name)) => Ok((type_name.as_str(), &self.table_types[index])),
            None => Err(CodecError::UnknownType(table.to_owned())),
        }
    }

    /// Render a resolved type as a type name, for error messages.
    pub(crate) fn describe(&self, ty: &ResolvedType) -> String {
        match ty {
            ResolvedType::Builtin(kind, shape) => kind.describe(*shape),
            ResolvedType::Array(inner) => format!("{}[]", self.describe(inner)),
            ResolvedType::Optional(inner) => format!("{}?", self.describe(inner)),
            ResolvedType::Struct(id) => self.compiled(*id).name.clone(),
        }
    }

    pub(crate) fn context(&self, budget: Duration) -> TraversalContext {
        TraversalContext::new(budget, self.limits.get_recursion_limit())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn version(&self) -> &str {
        &self.tables.version
    }

    pub fn limits(&self) -> &CodecLimits {
        &self.limits
    }

    pub fn is_builtin(&self, type_name: &str) -> bool {
        BuiltinKind::from_name(type_name).is_some()
    }

    /// Whether `type_name` names a struct, directly or through aliases.
    pub fn is_struct(&self, type_name: &str) -> bool {
        self.tables
            .structs
            .contains_key(self.tables.resolve_type(type_name))
    }

    pub fn is_array(&self, type_name: &str) -> bool {
        is_array(type_name)
    }

    pub fn is_optional(&self, type_name: &str) -> bool {
        is_optional(type_name)
    }

    pub fn fundamental_type<'a>(&self, type_name: &'a str) -> &'a str {
        fundamental_type(type_name)
    }

    /// Follow aliases from `type_name` to the expression they name.
    pub fn resolve_type<'a>(&'a self, type_name: &'a str) -> &'a str {
        self.tables.resolve_type(type_name)
    }

    pub fn is_type(&self, type_name: &str) -> bool {
        self.tables.is_type(type_name)
    }

    /// Struct definition for `type_name`, following aliases.
    pub fn get_struct(&self, type_name: &str) -> Option<&StructDef> {
        self.tables.structs.get(self.tables.resolve_type(type_name))
    }

    /// Type bound to `action`, or `""` when the action is not declared.
    pub fn get_action_type(&self, action: &str) -> &str {
        self.tables.actions.get(action).map_or("", String::as_str)
    }

    /// Type bound to `table`, or `""` when the table is not declared.
    pub fn get_table_type(&self, table: &str) -> &str {
        self.tables.tables.get(table).map_or("", String::as_str)
    }

    pub fn structs(&self) -> impl Iterator<Item = &StructDef> {
        self.tables.structs.values()
    }

    /// `(new name, target expression)` pairs in declaration order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tables
            .aliases
            .iter()
            .map(|(name, target)| (name.as_str(), target.as_str()))
    }

    /// `(action, type)` pairs in declaration order.
    pub fn actions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tables
            .actions
            .iter()
            .map(|(name, ty)| (name.as_str(), ty.as_str()))
    }

    /// `(table, type)` pairs in declaration order.
    pub fn tables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tables
            .tables
            .iter()
            .map(|(name, ty)| (name.as_str(), ty.as_str()))
    }
}
