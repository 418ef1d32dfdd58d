//! Token symbols and asset amounts.
//!
//! Text forms:
//! - `SymbolCode`: `SYS` (1-7 uppercase letters)
//! - `Symbol`: `4,SYS` (precision, code)
//! - `Asset`: `1.0000 SYS` (the fraction digits carry the precision)

use std::fmt;
use std::str::FromStr;

use super::{Pack, Reader, WireError, Writer};

/// Largest number of fraction digits a symbol may declare.
pub const MAX_PRECISION: u8 = 18;

/// Largest absolute asset amount, in the smallest unit.
pub const MAX_ASSET_AMOUNT: i64 = (1 << 62) - 1;

const MAX_CODE_LEN: usize = 7;

/// Up to seven uppercase letters packed little-endian into a `u64`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolCode(u64);

impl SymbolCode {
    /// Wrap a raw value, checking that it spells a valid code.
    pub fn from_raw(raw: u64) -> Result<Self, WireError> {
        if is_valid_code(raw) {
            Ok(Self(raw))
        } else {
            Err(WireError::Invalid(format!("invalid symbol code 0x{raw:016x}")))
        }
    }

    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }

    fn letters(self) -> impl Iterator<Item = u8> {
        self.0.to_le_bytes().into_iter().take_while(|&b| b != 0)
    }
}

/// Letters are contiguous from the low byte, and nothing follows the first
/// zero byte.
fn is_valid_code(raw: u64) -> bool {
    let bytes = raw.to_le_bytes();
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    (1..=MAX_CODE_LEN).contains(&len)
        && bytes[..len].iter().all(u8::is_ascii_uppercase)
        && bytes[len..].iter().all(|&b| b == 0)
}

impl FromStr for SymbolCode {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > MAX_CODE_LEN {
            return Err(WireError::Invalid(format!(
                "symbol code '{s}' must be 1 to {MAX_CODE_LEN} letters"
            )));
        }
        let mut raw = 0u64;
        for (i, c) in s.bytes().enumerate() {
            if !c.is_ascii_uppercase() {
                return Err(WireError::Invalid(format!(
                    "symbol code '{s}' must contain only A-Z"
                )));
            }
            raw |= u64::from(c) << (8 * i);
        }
        Ok(Self(raw))
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.letters() {
            fmt::Write::write_char(f, char::from(b))?;
        }
        Ok(())
    }
}

impl Pack for SymbolCode {
    fn pack(&self, w: &mut Writer) {
        self.0.pack(w);
    }

    fn unpack(r: &mut Reader<'_>) -> Result<Self, WireError> {
        let offset = r.position();
        let raw = u64::unpack(r)?;
        if !is_valid_code(raw) {
            return Err(r.malformed(offset, "invalid symbol code"));
        }
        Ok(Self(raw))
    }
}

/// Precision and code, packed as `code << 8 | precision`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    precision: u8,
    code: SymbolCode,
}

impl Symbol {
    pub fn new(precision: u8, code: SymbolCode) -> Result<Self, WireError> {
        if precision > MAX_PRECISION {
            return Err(WireError::Invalid(format!(
                "symbol precision {precision} exceeds {MAX_PRECISION}"
            )));
        }
        Ok(Self { precision, code })
    }

    #[inline]
    pub fn precision(self) -> u8 {
        self.precision
    }

    #[inline]
    pub fn code(self) -> SymbolCode {
        self.code
    }

    pub fn as_u64(self) -> u64 {
        (self.code.0 << 8) | u64::from(self.precision)
    }

    fn from_packed(raw: u64) -> Option<Self> {
        let precision = (raw & 0xff) as u8;
        let code = raw >> 8;
        (precision <= MAX_PRECISION && is_valid_code(code)).then_some(Self {
            precision,
            code: SymbolCode(code),
        })
    }
}

impl FromStr for Symbol {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, code) = s
            .split_once(',')
            .ok_or_else(|| WireError::Invalid(format!("symbol '{s}' must look like '4,SYS'")))?;
        let precision = precision
            .trim()
            .parse::<u8>()
            .map_err(|_| WireError::Invalid(format!("symbol '{s}' has an invalid precision")))?;
        Self::new(precision, code.trim().parse()?)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

impl Pack for Symbol {
    fn pack(&self, w: &mut Writer) {
        self.as_u64().pack(w);
    }

    fn unpack(r: &mut Reader<'_>) -> Result<Self, WireError> {
        let offset = r.position();
        let raw = u64::unpack(r)?;
        Self::from_packed(raw).ok_or_else(|| r.malformed(offset, "invalid symbol"))
    }
}

/// Signed amount in the symbol's smallest unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Asset {
    amount: i64,
    symbol: Symbol,
}

impl Asset {
    pub fn new(amount: i64, symbol: Symbol) -> Result<Self, WireError> {
        if !(-MAX_ASSET_AMOUNT..=MAX_ASSET_AMOUNT).contains(&amount) {
            return Err(WireError::Invalid(format!(
                "asset amount {amount} is out of range"
            )));
        }
        Ok(Self { amount, symbol })
    }

    #[inline]
    pub fn amount(self) -> i64 {
        self.amount
    }

    #[inline]
    pub fn symbol(self) -> Symbol {
        self.symbol
    }
}

impl FromStr for Asset {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |why: &str| WireError::Invalid(format!("asset '{s}': {why}"));

        let (amount, code) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| invalid("expected '<amount> <code>'"))?;
        let code: SymbolCode = code.trim().parse()?;

        let (negative, digits) = match amount.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, amount),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
        if int_part.is_empty() || digits.ends_with('.') {
            return Err(invalid("amount needs digits on both sides of '.'"));
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("amount must be decimal"));
        }
        let precision = u8::try_from(frac_part.len())
            .ok()
            .filter(|&p| p <= MAX_PRECISION)
            .ok_or_else(|| invalid("too many fraction digits"))?;

        let mut value: i64 = 0;
        for b in int_part.bytes().chain(frac_part.bytes()) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(b - b'0')))
                .ok_or_else(|| invalid("amount overflows"))?;
        }
        if negative {
            value = -value;
        }
        Self::new(value, Symbol::new(precision, code)?)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        let precision = u32::from(self.symbol.precision);
        if precision == 0 {
            return write!(f, "{sign}{abs} {}", self.symbol.code);
        }
        let scale = 10u64.pow(precision);
        write!(
            f,
            "{sign}{}.{:0width$} {}",
            abs / scale,
            abs % scale,
            self.symbol.code,
            width = precision as usize
        )
    }
}

impl Pack for Asset {
    fn pack(&self, w: &mut Writer) {
        self.amount.pack(w);
        self.symbol.pack(w);
    }

    fn unpack(r: &mut Reader<'_>) -> Result<Self, WireError> {
        let offset = r.position();
        let amount = i64::unpack(r)?;
        let symbol = Symbol::unpack(r)?;
        Self::new(amount, symbol).map_err(|_| r.malformed(offset, "asset amount out of range"))
    }
}
