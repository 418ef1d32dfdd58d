//! Primitive kinds and their binary/value conversions.
//!
//! Each kind is coded in one of three shapes: a single value, a
//! length-prefixed array, or an optional with a presence byte. A builtin
//! owns the container bytes of its own shape.

use std::fmt;

use wasm_abi_core::Value;
use wasm_abi_wire::{
    Asset, Checksum, Checksum160, Checksum256, Checksum512, Name, Pack, Reader, Symbol,
    SymbolCode, TimePoint, VarInt32, VarUint32, WireError, Writer, checked_len,
};

use crate::{CodecError, CodecLimits, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Int128,
    UInt128,
    VarInt32,
    VarUint32,
    Float32,
    Float64,
    TimePoint,
    Name,
    ActionName,
    TableName,
    Bytes,
    String,
    Checksum160,
    Checksum256,
    Checksum512,
    Symbol,
    SymbolCode,
    Asset,
}

/// Container a builtin is coded in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar,
    Array,
    Optional,
}

impl Shape {
    pub fn of(type_name: &str) -> Self {
        if crate::type_expr::is_array(type_name) {
            Shape::Array
        } else if crate::type_expr::is_optional(type_name) {
            Shape::Optional
        } else {
            Shape::Scalar
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Shape::Scalar => "",
            Shape::Array => "[]",
            Shape::Optional => "?",
        }
    }
}

/// Binds `$T` to the Rust type that carries `$kind` on the wire.
macro_rules! with_builtin_type {
    ($kind:expr, $T:ident => $body:expr) => {
        match $kind {
            BuiltinKind::Bool => { type $T = bool; $body }
            BuiltinKind::Int8 => { type $T = i8; $body }
            BuiltinKind::UInt8 => { type $T = u8; $body }
            BuiltinKind::Int16 => { type $T = i16; $body }
            BuiltinKind::UInt16 => { type $T = u16; $body }
            BuiltinKind::Int32 => { type $T = i32; $body }
            BuiltinKind::UInt32 => { type $T = u32; $body }
            BuiltinKind::Int64 => { type $T = i64; $body }
            BuiltinKind::UInt64 => { type $T = u64; $body }
            BuiltinKind::Int128 => { type $T = i128; $body }
            BuiltinKind::UInt128 => { type $T = u128; $body }
            BuiltinKind::VarInt32 => { type $T = VarInt32; $body }
            BuiltinKind::VarUint32 => { type $T = VarUint32; $body }
            BuiltinKind::Float32 => { type $T = f32; $body }
            BuiltinKind::Float64 => { type $T = f64; $body }
            BuiltinKind::TimePoint => { type $T = TimePoint; $body }
            BuiltinKind::Name | BuiltinKind::ActionName | BuiltinKind::TableName => {
                type $T = Name;
                $body
            }
            BuiltinKind::Bytes => { type $T = Vec<u8>; $body }
            BuiltinKind::String => { type $T = String; $body }
            BuiltinKind::Checksum160 => { type $T = Checksum160; $body }
            BuiltinKind::Checksum256 => { type $T = Checksum256; $body }
            BuiltinKind::Checksum512 => { type $T = Checksum512; $body }
            BuiltinKind::Symbol => { type $T = Symbol; $body }
            BuiltinKind::SymbolCode => { type $T = SymbolCode; $body }
            BuiltinKind::Asset => { type $T = Asset; $body }
        }
    };
}

impl BuiltinKind {
    pub const ALL: [BuiltinKind; 27] = [
        Self::Bool,
        Self::Int8,
        Self::UInt8,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Int128,
        Self::UInt128,
        Self::VarInt32,
        Self::VarUint32,
        Self::Float32,
        Self::Float64,
        Self::TimePoint,
        Self::Name,
        Self::ActionName,
        Self::TableName,
        Self::Bytes,
        Self::String,
        Self::Checksum160,
        Self::Checksum256,
        Self::Checksum512,
        Self::Symbol,
        Self::SymbolCode,
        Self::Asset,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Int128 => "int128",
            Self::UInt128 => "uint128",
            Self::VarInt32 => "varint32",
            Self::VarUint32 => "varuint32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::TimePoint => "time_point",
            Self::Name => "name",
            Self::ActionName => "action_name",
            Self::TableName => "table_name",
            Self::Bytes => "bytes",
            Self::String => "string",
            Self::Checksum160 => "checksum160",
            Self::Checksum256 => "checksum256",
            Self::Checksum512 => "checksum512",
            Self::Symbol => "symbol",
            Self::SymbolCode => "symbol_code",
            Self::Asset => "asset",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Type name of this kind in `shape`, e.g. `uint8[]`.
    pub fn describe(self, shape: Shape) -> String {
        format!("{}{}", self.name(), shape.suffix())
    }

    /// Decode one value of this kind in `shape`.
    pub fn decode(self, r: &mut Reader<'_>, shape: Shape, limits: &CodecLimits) -> Result<Value> {
        with_builtin_type!(self, T => decode_as::<T>(self, r, shape, limits))
    }

    /// Encode `value` as this kind in `shape`.
    pub fn encode(self, value: &Value, w: &mut Writer, shape: Shape) -> Result<()> {
        with_builtin_type!(self, T => encode_as::<T>(self, value, w, shape))
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn decode_as<T: BuiltinValue>(
    kind: BuiltinKind,
    r: &mut Reader<'_>,
    shape: Shape,
    limits: &CodecLimits,
) -> Result<Value> {
    let wire = |e: WireError| CodecError::from_wire(e, &kind.describe(shape));
    match shape {
        Shape::Scalar => Ok(T::unpack(r).map_err(wire)?.into_value()),
        Shape::Optional => match u8::unpack(r).map_err(wire)? {
            0 => Ok(Value::Null),
            _ => Ok(T::unpack(r).map_err(wire)?.into_value()),
        },
        Shape::Array => {
            let len = VarUint32::unpack(r).map_err(wire)?.0;
            let limit = limits.get_max_array_size();
            if len as usize > limit {
                return Err(CodecError::ArraySizeExceedsLimit {
                    type_name: kind.describe(shape),
                    size: len.into(),
                    limit,
                });
            }
            // grows with the bytes actually read, never with the declared length
            let mut items = Vec::new();
            for _ in 0..len {
                items.push(T::unpack(r).map_err(wire)?.into_value());
            }
            Ok(Value::Array(items))
        }
    }
}

fn encode_as<T: BuiltinValue>(
    kind: BuiltinKind,
    value: &Value,
    w: &mut Writer,
    shape: Shape,
) -> Result<()> {
    let mismatch = |detail: String| CodecError::TypeMismatch {
        type_name: kind.describe(shape),
        detail,
    };
    match shape {
        Shape::Scalar => T::from_value(value).map_err(mismatch)?.pack(w),
        Shape::Optional => match value {
            Value::Null => w.write_u8(0),
            value => {
                let item = T::from_value(value).map_err(mismatch)?;
                w.write_u8(1);
                item.pack(w);
            }
        },
        Shape::Array => {
            let Value::Array(items) = value else {
                return Err(mismatch(format!("expected array, got {}", value.kind_name())));
            };
            let len = u32::try_from(items.len())
                .map_err(|_| mismatch(format!("{} elements do not fit a length prefix", items.len())))?;
            VarUint32(len).pack(w);
            for item in items {
                T::from_value(item).map_err(&mismatch)?.pack(w);
            }
        }
    }
    Ok(())
}

/// Conversion between a wire type and the dynamic value surface.
trait BuiltinValue: Pack {
    fn into_value(self) -> Value;
    /// On failure, returns a human-readable reason.
    fn from_value(value: &Value) -> std::result::Result<Self, String>;
}

fn unexpected(expected: &str, value: &Value) -> String {
    format!("expected {expected}, got {}", value.kind_name())
}

/// Integral value of a dynamic number or numeric string.
enum Integral {
    Signed(i128),
    Unsigned(u128),
}

fn integral(value: &Value) -> std::result::Result<Integral, String> {
    match value {
        Value::Int(v) => Ok(Integral::Signed(*v)),
        Value::UInt(v) => Ok(Integral::Unsigned(*v)),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            if *f >= 0.0 && *f < u128::MAX as f64 {
                Ok(Integral::Unsigned(*f as u128))
            } else if *f < 0.0 && *f >= i128::MIN as f64 {
                Ok(Integral::Signed(*f as i128))
            } else {
                Err(format!("{f} is out of range"))
            }
        }
        Value::Float(f) => Err(format!("{f} is not an integer")),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(v) = s.parse::<u128>() {
                Ok(Integral::Unsigned(v))
            } else if let Ok(v) = s.parse::<i128>() {
                Ok(Integral::Signed(v))
            } else {
                Err(format!("'{s}' is not an integer"))
            }
        }
        other => Err(unexpected("integer", other)),
    }
}

macro_rules! builtin_int {
    ($variant:ident, $wide:ty => $($ty:ty),*) => {
        $(impl BuiltinValue for $ty {
            fn into_value(self) -> Value {
                Value::$variant(<$wide>::from(self))
            }

            fn from_value(value: &Value) -> std::result::Result<Self, String> {
                let converted = match integral(value)? {
                    Integral::Signed(v) => <$ty>::try_from(v).ok(),
                    Integral::Unsigned(v) => <$ty>::try_from(v).ok(),
                };
                converted.ok_or_else(|| format!("{value} is out of range for {}", stringify!($ty)))
            }
        })*
    };
}

builtin_int!(Int, i128 => i8, i16, i32, i64, i128);
builtin_int!(UInt, u128 => u8, u16, u32, u64, u128);

impl BuiltinValue for VarInt32 {
    fn into_value(self) -> Value {
        self.0.into_value()
    }

    fn from_value(value: &Value) -> std::result::Result<Self, String> {
        i32::from_value(value).map(VarInt32)
    }
}

impl BuiltinValue for VarUint32 {
    fn into_value(self) -> Value {
        self.0.into_value()
    }

    fn from_value(value: &Value) -> std::result::Result<Self, String> {
        u32::from_value(value).map(VarUint32)
    }
}

impl BuiltinValue for TimePoint {
    fn into_value(self) -> Value {
        self.as_micros().into_value()
    }

    fn from_value(value: &Value) -> std::result::Result<Self, String> {
        i64::from_value(value).map(TimePoint::from_micros)
    }
}

impl BuiltinValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> std::result::Result<Self, String> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Int(0) | Value::UInt(0) => Ok(false),
            Value::Int(1) | Value::UInt(1) => Ok(true),
            other => Err(unexpected("bool", other)),
        }
    }
}

fn float(value: &Value) -> std::result::Result<f64, String> {
    match value {
        Value::Float(f) => Ok(*f),
        Value::Int(v) => Ok(*v as f64),
        Value::UInt(v) => Ok(*v as f64),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("'{s}' is not a number")),
        other => Err(unexpected("number", other)),
    }
}

impl BuiltinValue for f32 {
    fn into_value(self) -> Value {
        Value::Float(self.into())
    }

    fn from_value(value: &Value) -> std::result::Result<Self, String> {
        float(value).map(|f| f as f32)
    }
}

impl BuiltinValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> std::result::Result<Self, String> {
        float(value)
    }
}

impl BuiltinValue for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: &Value) -> std::result::Result<Self, String> {
        let text = value.as_str().ok_or_else(|| unexpected("string", value))?;
        checked_len(text.len()).map_err(|e| e.to_string())?;
        Ok(text.to_owned())
    }
}

impl BuiltinValue for Vec<u8> {
    fn into_value(self) -> Value {
        Value::Bytes(self)
    }

    fn from_value(value: &Value) -> std::result::Result<Self, String> {
        let bytes: Vec<u8> = match value {
            Value::Bytes(b) => b.clone(),
            Value::String(s) => hex::decode(s).map_err(|e| format!("'{s}' is not hex: {e}"))?,
            Value::Array(items) => items
                .iter()
                .map(u8::from_value)
                .collect::<std::result::Result<_, _>>()?,
            other => return Err(unexpected("bytes", other)),
        };
        checked_len(bytes.len()).map_err(|e| e.to_string())?;
        Ok(bytes)
    }
}

impl<const N: usize> BuiltinValue for Checksum<N> {
    fn into_value(self) -> Value {
        Value::Bytes(self.as_bytes().to_vec())
    }

    fn from_value(value: &Value) -> std::result::Result<Self, String> {
        match value {
            Value::Bytes(b) => Checksum::from_slice(b).map_err(|e| e.to_string()),
            Value::String(s) => s.parse().map_err(|e: WireError| e.to_string()),
            other => Err(unexpected("checksum bytes or hex string", other)),
        }
    }
}

/// Scalars whose value surface is their canonical text form.
macro_rules! builtin_text {
    ($($ty:ty),*) => {
        $(impl BuiltinValue for $ty {
            fn into_value(self) -> Value {
                Value::String(self.to_string())
            }

            fn from_value(value: &Value) -> std::result::Result<Self, String> {
                let text = value.as_str().ok_or_else(|| unexpected("string", value))?;
                text.parse().map_err(|e: WireError| e.to_string())
            }
        })*
    };
}

builtin_text!(Name, Symbol, SymbolCode, Asset);
