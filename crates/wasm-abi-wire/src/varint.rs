//! Compact variable-length integers (LEB128).
//!
//! `VarUint32` is plain unsigned LEB128. `VarInt32` zigzag-maps the signed
//! value first so small negative numbers stay short.

use super::{Pack, Reader, WireError, Writer};

/// Maximum encoded length of a 32-bit LEB128 value.
const MAX_VARINT32_BYTES: usize = 5;

/// Unsigned 32-bit compact integer. Also used for every length prefix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarUint32(pub u32);

/// Signed 32-bit compact integer (zigzag + LEB128).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarInt32(pub i32);

impl Pack for VarUint32 {
    fn pack(&self, w: &mut Writer) {
        let mut value = self.0;
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                w.write_u8(byte);
                return;
            }
            w.write_u8(byte | 0x80);
        }
    }

    fn unpack(r: &mut Reader<'_>) -> Result<Self, WireError> {
        let start = r.position();
        let mut value: u64 = 0;
        for i in 0..MAX_VARINT32_BYTES {
            let byte = r.read_u8()?;
            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return u32::try_from(value)
                    .map(Self)
                    .map_err(|_| r.malformed(start, "varuint32 overflows 32 bits"));
            }
        }
        Err(r.malformed(start, "varuint32 longer than 5 bytes"))
    }
}

impl Pack for VarInt32 {
    fn pack(&self, w: &mut Writer) {
        let zigzag = ((self.0 as u32) << 1) ^ ((self.0 >> 31) as u32);
        VarUint32(zigzag).pack(w);
    }

    fn unpack(r: &mut Reader<'_>) -> Result<Self, WireError> {
        let raw = VarUint32::unpack(r)?.0;
        Ok(Self(((raw >> 1) as i32) ^ -((raw & 1) as i32)))
    }
}

impl From<u32> for VarUint32 {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<i32> for VarInt32 {
    fn from(value: i32) -> Self {
        Self(value)
    }
}
