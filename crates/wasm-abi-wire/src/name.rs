//! Account and resource names.
//!
//! A name packs up to 13 characters from `.12345a-z` into a `u64`: twelve
//! 5-bit symbols from the high bits down, plus a 13th 4-bit symbol in the
//! lowest nibble (so the 13th character is limited to `.12345a-j`).

use std::fmt;
use std::str::FromStr;

use super::{Pack, Reader, WireError, Writer};

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";
const MAX_NAME_LEN: usize = 13;

/// 64-bit encoded account/resource name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(u64);

impl Name {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some(u64::from(c - b'a') + 6),
        b'1'..=b'5' => Some(u64::from(c - b'1') + 1),
        b'.' => Some(0),
        _ => None,
    }
}

impl FromStr for Name {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() > MAX_NAME_LEN {
            return Err(WireError::Invalid(format!(
                "name '{s}' is longer than {MAX_NAME_LEN} characters"
            )));
        }

        let mut value = 0u64;
        for (i, &c) in bytes.iter().enumerate() {
            let symbol = char_to_symbol(c).ok_or_else(|| {
                WireError::Invalid(format!("name '{s}' contains invalid character '{}'", c as char))
            })?;
            if i < 12 {
                value |= symbol << (64 - 5 * (i + 1));
            } else {
                if symbol > 0x0f {
                    return Err(WireError::Invalid(format!(
                        "thirteenth character of name '{s}' must be in [.1-5a-j]"
                    )));
                }
                value |= symbol;
            }
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = [b'.'; MAX_NAME_LEN];
        let mut tmp = self.0;
        for i in 0..MAX_NAME_LEN {
            let mask = if i == 0 { 0x0f } else { 0x1f };
            out[MAX_NAME_LEN - 1 - i] = CHARMAP[(tmp & mask) as usize];
            tmp >>= if i == 0 { 4 } else { 5 };
        }
        let end = out.iter().rposition(|&c| c != b'.').map_or(0, |p| p + 1);
        // CHARMAP is ASCII, so the slice is valid UTF-8.
        f.write_str(std::str::from_utf8(&out[..end]).map_err(|_| fmt::Error)?)
    }
}

impl Pack for Name {
    fn pack(&self, w: &mut Writer) {
        self.0.pack(w);
    }

    fn unpack(r: &mut Reader<'_>) -> Result<Self, WireError> {
        u64::unpack(r).map(Self)
    }
}
