//! Binary ⇄ value coding driven by a [`Registry`].

use std::time::Duration;

use wasm_abi_core::Value;
use wasm_abi_wire::{Pack, Reader, VarUint32, Writer};

use crate::context::TraversalContext;
use crate::registry::{Registry, ResolvedType, StructId};
use crate::{CodecError, Result};

static NULL: Value = Value::Null;

impl Registry {
    /// Decode a value of `type_name` from the front of `bytes`.
    ///
    /// Bytes after the value are left unread; see [`decode_exact`](Self::decode_exact).
    pub fn decode(&self, type_name: &str, bytes: &[u8], budget: Duration) -> Result<Value> {
        tracing::trace!(type_name, len = bytes.len(), "decode");
        let mut ctx = self.context(budget);
        let ty = self.resolve_expr(type_name, &mut ctx)?;
        self.decode_top(&ty, type_name, bytes, &mut ctx, false)
    }

    /// Decode a value of `type_name` that must span all of `bytes`.
    pub fn decode_exact(&self, type_name: &str, bytes: &[u8], budget: Duration) -> Result<Value> {
        tracing::trace!(type_name, len = bytes.len(), "decode exact");
        let mut ctx = self.context(budget);
        let ty = self.resolve_expr(type_name, &mut ctx)?;
        self.decode_top(&ty, type_name, bytes, &mut ctx, true)
    }

    /// Encode `value` as `type_name`.
    pub fn encode(&self, type_name: &str, value: &Value, budget: Duration) -> Result<Vec<u8>> {
        tracing::trace!(type_name, "encode");
        let mut ctx = self.context(budget);
        let ty = self.resolve_expr(type_name, &mut ctx)?;
        self.encode_top(&ty, value, &mut ctx)
    }

    /// Decode the arguments of `action`.
    pub fn decode_action(&self, action: &str, bytes: &[u8], budget: Duration) -> Result<Value> {
        let (type_name, ty) = self.action_type(action)?;
        tracing::trace!(action, type_name, len = bytes.len(), "decode action");
        self.decode_top(ty, type_name, bytes, &mut self.context(budget), false)
    }

    /// Encode the arguments of `action`.
    pub fn encode_action(&self, action: &str, value: &Value, budget: Duration) -> Result<Vec<u8>> {
        let (type_name, ty) = self.action_type(action)?;
        tracing::trace!(action, type_name, "encode action");
        self.encode_top(ty, value, &mut self.context(budget))
    }

    /// Decode a row of `table`.
    pub fn decode_table(&self, table: &str, bytes: &[u8], budget: Duration) -> Result<Value> {
        let (type_name, ty) = self.table_type(table)?;
        tracing::trace!(table, type_name, len = bytes.len(), "decode table row");
        self.decode_top(ty, type_name, bytes, &mut self.context(budget), false)
    }

    /// Encode a row of `table`.
    pub fn encode_table(&self, table: &str, value: &Value, budget: Duration) -> Result<Vec<u8>> {
        let (type_name, ty) = self.table_type(table)?;
        tracing::trace!(table, type_name, "encode table row");
        self.encode_top(ty, value, &mut self.context(budget))
    }

    /// [`decode`](Self::decode) straight to JSON.
    pub fn decode_to_json(
        &self,
        type_name: &str,
        bytes: &[u8],
        budget: Duration,
    ) -> Result<serde_json::Value> {
        self.decode(type_name, bytes, budget).map(|v| v.to_json())
    }

    /// [`encode`](Self::encode) straight from JSON.
    pub fn encode_from_json(
        &self,
        type_name: &str,
        json: &serde_json::Value,
        budget: Duration,
    ) -> Result<Vec<u8>> {
        self.encode(type_name, &Value::from_json(json), budget)
    }

    fn decode_top(
        &self,
        ty: &ResolvedType,
        type_name: &str,
        bytes: &[u8],
        ctx: &mut TraversalContext,
        exact: bool,
    ) -> Result<Value> {
        let mut r = Reader::new(bytes);
        let value = self.decode_value(ty, &mut r, ctx)?;
        if exact && !r.is_empty() {
            return Err(CodecError::TrailingBytes {
                type_name: type_name.to_owned(),
                offset: r.position(),
                remaining: r.remaining(),
            });
        }
        Ok(value)
    }

    fn encode_top(
        &self,
        ty: &ResolvedType,
        value: &Value,
        ctx: &mut TraversalContext,
    ) -> Result<Vec<u8>> {
        let mut w = Writer::with_capacity(self.limits().get_initial_buffer_capacity());
        self.encode_value(ty, value, &mut w, ctx)?;
        Ok(w.into_bytes())
    }

    fn decode_value(
        &self,
        ty: &ResolvedType,
        r: &mut Reader<'_>,
        ctx: &mut TraversalContext,
    ) -> Result<Value> {
        ctx.descend(|ctx| match ty {
            ResolvedType::Builtin(kind, shape) => kind.decode(r, *shape, self.limits()),
            ResolvedType::Array(element) => {
                let len = VarUint32::unpack(r)
                    .map_err(|e| CodecError::from_wire(e, &self.describe(ty)))?
                    .0;
                let limit = self.limits().get_max_array_size();
                if len as usize > limit {
                    return Err(CodecError::ArraySizeExceedsLimit {
                        type_name: self.describe(ty),
                        size: len.into(),
                        limit,
                    });
                }
                let mut items = Vec::new();
                for _ in 0..len {
                    ctx.check_deadline()?;
                    let item = self.decode_value(element, r, ctx)?;
                    if item.is_null() {
                        return Err(CodecError::InvalidArrayElement(self.describe(ty)));
                    }
                    items.push(item);
                }
                Ok(Value::Array(items))
            }
            ResolvedType::Optional(inner) => {
                let flag = u8::unpack(r).map_err(|e| CodecError::from_wire(e, &self.describe(ty)))?;
                if flag == 0 {
                    Ok(Value::Null)
                } else {
                    self.decode_value(inner, r, ctx)
                }
            }
            ResolvedType::Struct(id) => {
                let mut fields = Vec::new();
                self.decode_struct(*id, r, ctx, &mut fields)?;
                Ok(Value::Object(fields))
            }
        })
    }

    /// Base fields first, then own fields. Null fields are omitted.
    fn decode_struct(
        &self,
        id: StructId,
        r: &mut Reader<'_>,
        ctx: &mut TraversalContext,
        out: &mut Vec<(String, Value)>,
    ) -> Result<()> {
        let def = self.compiled(id);

        // a struct base merges into this object, any other base is stored
        // under its own name
        if let Some(base) = &def.base {
            match (&base.ty, self.decode_value(&base.ty, r, ctx)?) {
                (ResolvedType::Struct(_), Value::Object(fields)) => out.extend(fields),
                (_, Value::Null) => {}
                (_, other) => out.push((base.name.clone(), other)),
            }
        }

        for field in &def.fields {
            ctx.check_deadline()?;
            // older encodings end before their binary extensions
            if field.extension && r.is_empty() {
                break;
            }
            let value = self
                .decode_value(&field.ty, r, ctx)
                .map_err(|e| e.in_field(&def.name, &field.name))?;
            if !value.is_null() {
                out.push((field.name.clone(), value));
            }
        }
        Ok(())
    }

    fn encode_value(
        &self,
        ty: &ResolvedType,
        value: &Value,
        w: &mut Writer,
        ctx: &mut TraversalContext,
    ) -> Result<()> {
        ctx.descend(|ctx| match ty {
            ResolvedType::Builtin(kind, shape) => kind.encode(value, w, *shape),
            ResolvedType::Array(element) => {
                let Value::Array(items) = value else {
                    return Err(CodecError::TypeMismatch {
                        type_name: self.describe(ty),
                        detail: format!("expected array, got {}", value.kind_name()),
                    });
                };
                let len = u32::try_from(items.len()).map_err(|_| CodecError::TypeMismatch {
                    type_name: self.describe(ty),
                    detail: format!("{} elements do not fit a length prefix", items.len()),
                })?;
                VarUint32(len).pack(w);
                for item in items {
                    ctx.check_deadline()?;
                    self.encode_value(element, item, w, ctx)?;
                }
                Ok(())
            }
            ResolvedType::Optional(inner) => {
                if value.is_null() {
                    w.write_u8(0);
                    Ok(())
                } else {
                    w.write_u8(1);
                    self.encode_value(inner, value, w, ctx)
                }
            }
            ResolvedType::Struct(id) => self.encode_struct(*id, value, w, ctx),
        })
    }

    fn encode_struct(
        &self,
        id: StructId,
        value: &Value,
        w: &mut Writer,
        ctx: &mut TraversalContext,
    ) -> Result<()> {
        let def = self.compiled(id);
        match value {
            Value::Object(_) => {
                if let Some(base) = &def.base {
                    // a struct base reads its fields from the same object,
                    // any other base is stored under its own name
                    let base_value = match base.ty {
                        ResolvedType::Struct(_) => value,
                        _ => match value.get(&base.name) {
                            Some(v) => v,
                            None if base.ty.is_optional() => &NULL,
                            None => {
                                return Err(CodecError::MissingField {
                                    struct_name: def.name.clone(),
                                    field: base.name.clone(),
                                });
                            }
                        },
                    };
                    self.encode_value(&base.ty, base_value, w, ctx)?;
                }

                let mut skipped: Option<&str> = None;
                for field in &def.fields {
                    ctx.check_deadline()?;
                    match value.get(&field.name) {
                        Some(v) => {
                            if let Some(missing) = skipped {
                                return Err(CodecError::MissingField {
                                    struct_name: def.name.clone(),
                                    field: missing.to_owned(),
                                });
                            }
                            self.encode_value(&field.ty, v, w, ctx)
                                .map_err(|e| e.in_field(&def.name, &field.name))?;
                        }
                        None if field.extension => {
                            if skipped.is_none() {
                                skipped = Some(&field.name);
                            }
                        }
                        None if field.ty.is_optional() => w.write_u8(0),
                        None => {
                            return Err(CodecError::MissingField {
                                struct_name: def.name.clone(),
                                field: field.name.clone(),
                            });
                        }
                    }
                }
                Ok(())
            }
            Value::Array(items) => {
                if def.base.is_some() {
                    return Err(CodecError::UnsupportedPositionalBase(def.name.clone()));
                }
                if items.len() != def.fields.len() {
                    return Err(CodecError::FieldCountMismatch {
                        struct_name: def.name.clone(),
                        expected: def.fields.len(),
                        found: items.len(),
                    });
                }
                for (field, item) in def.fields.iter().zip(items) {
                    ctx.check_deadline()?;
                    self.encode_value(&field.ty, item, w, ctx)
                        .map_err(|e| e.in_field(&def.name, &field.name))?;
                }
                Ok(())
            }
            other => Err(CodecError::TypeMismatch {
                type_name: def.name.clone(),
                detail: format!("expected object or array, got {}", other.kind_name()),
            }),
        }
    }
}
