//! Fixed-field binary serialization.
//!
//! `Pack` is the conventional field-by-field serializer: a record packs its
//! fields in declaration order and unpacks them in the same order. Fixed-layout
//! records (transactions, ledger entries) implement it directly; the
//! schema-driven codec reuses the same impls for its builtin types.

use super::{Reader, VarUint32, WireError, Writer};

/// Binary serialization with a fixed, schema-free layout.
pub trait Pack: Sized {
    fn pack(&self, w: &mut Writer);
    fn unpack(r: &mut Reader<'_>) -> Result<Self, WireError>;
}

/// Pack a value into a fresh buffer.
pub fn pack_to_vec<T: Pack>(value: &T) -> Vec<u8> {
    let mut w = Writer::new();
    value.pack(&mut w);
    w.into_bytes()
}

/// Length prefix for a sequence of `len` items or bytes.
///
/// The wire prefix is a varuint32; longer sequences cannot be represented.
pub fn checked_len(len: usize) -> Result<u32, WireError> {
    u32::try_from(len)
        .map_err(|_| WireError::Invalid(format!("length {len} does not fit a varuint32 prefix")))
}

/// Unpack a value that must consume `bytes` entirely.
pub fn unpack_exact<T: Pack>(bytes: &[u8]) -> Result<T, WireError> {
    let mut r = Reader::new(bytes);
    let value = T::unpack(&mut r)?;
    if !r.is_empty() {
        return Err(r.malformed(r.position(), "trailing bytes after value"));
    }
    Ok(value)
}

macro_rules! pack_le {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Pack for $ty {
                #[inline]
                fn pack(&self, w: &mut Writer) {
                    w.write_bytes(&self.to_le_bytes());
                }

                #[inline]
                fn unpack(r: &mut Reader<'_>) -> Result<Self, WireError> {
                    Ok(<$ty>::from_le_bytes(r.read_array()?))
                }
            }
        )*
    };
}

pack_le!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, f32, f64);

impl Pack for bool {
    fn pack(&self, w: &mut Writer) {
        w.write_u8(u8::from(*self));
    }

    fn unpack(r: &mut Reader<'_>) -> Result<Self, WireError> {
        let offset = r.position();
        match r.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(r.malformed(offset, "bool must be 0 or 1")),
        }
    }
}

/// Length-prefixed UTF-8.
///
/// `pack` expects at most `u32::MAX` bytes; callers holding untrusted input
/// check with [`checked_len`] first.
impl Pack for String {
    fn pack(&self, w: &mut Writer) {
        debug_assert!(checked_len(self.len()).is_ok());
        VarUint32(self.len() as u32).pack(w);
        w.write_bytes(self.as_bytes());
    }

    fn unpack(r: &mut Reader<'_>) -> Result<Self, WireError> {
        let len = VarUint32::unpack(r)?.0 as usize;
        let offset = r.position();
        let bytes = r.read_bytes(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| r.malformed(offset, "string is not valid UTF-8"))
    }
}

/// Length-prefixed sequence.
///
/// Every `Pack` impl consumes at least one byte, so a length prefix larger
/// than the unread input is rejected before any element is decoded. `pack`
/// expects at most `u32::MAX` elements, as for `String`.
impl<T: Pack> Pack for Vec<T> {
    fn pack(&self, w: &mut Writer) {
        debug_assert!(checked_len(self.len()).is_ok());
        VarUint32(self.len() as u32).pack(w);
        for item in self {
            item.pack(w);
        }
    }

    fn unpack(r: &mut Reader<'_>) -> Result<Self, WireError> {
        let len = VarUint32::unpack(r)?.0 as usize;
        if len > r.remaining() {
            return Err(WireError::Truncated {
                offset: r.position(),
                needed: len - r.remaining(),
            });
        }
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(T::unpack(r)?);
        }
        Ok(items)
    }
}

/// Presence byte followed by the value when present.
impl<T: Pack> Pack for Option<T> {
    fn pack(&self, w: &mut Writer) {
        match self {
            Some(value) => {
                w.write_u8(1);
                value.pack(w);
            }
            None => w.write_u8(0),
        }
    }

    fn unpack(r: &mut Reader<'_>) -> Result<Self, WireError> {
        match r.read_u8()? {
            0 => Ok(None),
            _ => T::unpack(r).map(Some),
        }
    }
}
