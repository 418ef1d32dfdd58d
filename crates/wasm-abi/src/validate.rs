//! Schema validation passes.
//!
//! Runs over populated name tables, in order:
//! 1. alias chains are acyclic
//! 2. alias targets name types
//! 3. struct bases and field types are well-formed
//! 4. no struct contains itself through its fields
//! 5. action and table bindings name types

use crate::context::TraversalContext;
use crate::registry::SchemaTables;
use crate::type_expr::{fundamental_type, is_extension, strip_extension};
use crate::{CodecError, Result, Scope};

/// Visit state of a struct during the containment search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    OnPath,
    Done,
}

impl SchemaTables {
    pub(crate) fn validate(&self, ctx: &mut TraversalContext) -> Result<()> {
        self.check_alias_cycles(ctx)?;
        self.check_alias_targets(ctx)?;
        self.check_structs(ctx)?;
        self.check_containment(ctx)?;
        self.check_bindings(ctx)
    }

    /// A chase longer than the alias count must have revisited an alias.
    fn check_alias_cycles(&self, ctx: &mut TraversalContext) -> Result<()> {
        for (name, target) in &self.aliases {
            ctx.check_deadline()?;
            let mut current = fundamental_type(target);
            let mut hops = 0;
            while let Some(next) = self.aliases.get(current) {
                hops += 1;
                if current == name || hops > self.aliases.len() {
                    return Err(CodecError::CircularTypeAlias(name.clone())
                        .in_scope(Scope::Alias(name.clone())));
                }
                current = fundamental_type(next);
            }
        }
        Ok(())
    }

    fn check_alias_targets(&self, ctx: &mut TraversalContext) -> Result<()> {
        for (name, target) in &self.aliases {
            ctx.check_deadline()?;
            if !self.is_type(target) {
                return Err(CodecError::UnknownType(target.clone())
                    .in_scope(Scope::Alias(name.clone())));
            }
        }
        Ok(())
    }

    fn check_structs(&self, ctx: &mut TraversalContext) -> Result<()> {
        for def in self.structs.values() {
            ctx.check_deadline()?;
            let scope = || Scope::Struct(def.name.clone());

            // base chain: ends at a struct without base or at a non-struct type
            let mut chain = vec![def.name.as_str()];
            let mut current = def;
            while current.has_base() {
                ctx.check_deadline()?;
                if !self.is_type(&current.base) {
                    return Err(CodecError::UnknownType(current.base.clone()).in_scope(scope()));
                }
                let Some(base) = self.structs.get(self.resolve_type(&current.base)) else {
                    break;
                };
                if chain.contains(&base.name.as_str()) {
                    return Err(CodecError::CircularStructBase(def.name.clone()).in_scope(scope()));
                }
                chain.push(&base.name);
                current = base;
            }

            let mut in_extensions = false;
            for field in &def.fields {
                let field_type = strip_extension(&field.type_name);
                if !self.is_type(field_type) {
                    return Err(CodecError::UnknownType(field_type.to_owned())
                        .in_field(&def.name, &field.name));
                }
                if is_extension(&field.type_name) {
                    in_extensions = true;
                } else if in_extensions {
                    return Err(CodecError::InvalidBinaryExtension {
                        struct_name: def.name.clone(),
                        field: field.name.clone(),
                    }
                    .in_scope(scope()));
                }
            }
        }
        Ok(())
    }

    fn check_containment(&self, ctx: &mut TraversalContext) -> Result<()> {
        let mut states = vec![VisitState::Unvisited; self.structs.len()];
        for index in 0..self.structs.len() {
            if states[index] == VisitState::Unvisited {
                self.visit_containment(index, &mut states, ctx)?;
            }
        }
        Ok(())
    }

    /// Depth-first search over struct-typed bases and fields.
    ///
    /// Once a struct type repeats among the fields of one struct, the rest of
    /// that struct's fields are not scanned.
    fn visit_containment(
        &self,
        index: usize,
        states: &mut [VisitState],
        ctx: &mut TraversalContext,
    ) -> Result<()> {
        ctx.descend(|ctx| {
            states[index] = VisitState::OnPath;
            let Some((name, def)) = self.structs.get_index(index) else {
                return Ok(());
            };

            let base = def
                .has_base()
                .then(|| self.resolve_type(&def.base))
                .and_then(|base| self.structs.get_index_of(base));
            if let Some(child) = base {
                self.visit_child(child, name, states, ctx)
                    .map_err(|e| e.in_scope(Scope::Struct(name.clone())))?;
            }

            let mut seen: Vec<&str> = Vec::new();
            for field in &def.fields {
                let field_type =
                    self.resolve_type(fundamental_type(strip_extension(&field.type_name)));
                let Some(child) = self.structs.get_index_of(field_type) else {
                    continue;
                };
                if seen.contains(&field_type) {
                    break;
                }
                seen.push(field_type);
                self.visit_child(child, name, states, ctx)
                    .map_err(|e| e.in_field(name, &field.name))?;
            }

            states[index] = VisitState::Done;
            Ok(())
        })
    }

    fn visit_child(
        &self,
        child: usize,
        parent: &str,
        states: &mut [VisitState],
        ctx: &mut TraversalContext,
    ) -> Result<()> {
        match states[child] {
            VisitState::OnPath => Err(CodecError::CircularStructContainment(parent.to_owned())),
            VisitState::Done => Ok(()),
            VisitState::Unvisited => self.visit_containment(child, states, ctx),
        }
    }

    fn check_bindings(&self, ctx: &mut TraversalContext) -> Result<()> {
        for (name, type_name) in &self.actions {
            ctx.check_deadline()?;
            if !self.is_type(type_name) {
                return Err(CodecError::UnknownType(type_name.clone())
                    .in_scope(Scope::Action(name.clone())));
            }
        }
        for (name, type_name) in &self.tables {
            ctx.check_deadline()?;
            if !self.is_type(type_name) {
                return Err(CodecError::UnknownType(type_name.clone())
                    .in_scope(Scope::Table(name.clone())));
            }
        }
        Ok(())
    }
}
