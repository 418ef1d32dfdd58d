//! Fixed-size digests.

use std::fmt;
use std::str::FromStr;

use super::{Pack, Reader, WireError, Writer};

/// `N` raw digest bytes, written without a length prefix.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checksum<const N: usize>(pub [u8; N]);

pub type Checksum160 = Checksum<20>;
pub type Checksum256 = Checksum<32>;
pub type Checksum512 = Checksum<64>;

impl<const N: usize> Checksum<N> {
    pub const LEN: usize = N;

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Copy a digest out of a slice of exactly `N` bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, WireError> {
        <[u8; N]>::try_from(bytes).map(Self).map_err(|_| {
            WireError::Invalid(format!(
                "checksum needs {} bytes, got {}",
                N,
                bytes.len()
            ))
        })
    }
}

impl<const N: usize> Default for Checksum<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> fmt::Debug for Checksum<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum<{}>({})", N, self)
    }
}

impl<const N: usize> fmt::Display for Checksum<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl<const N: usize> FromStr for Checksum<N> {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes =
            hex::decode(s).map_err(|e| WireError::Invalid(format!("checksum '{s}': {e}")))?;
        Self::from_slice(&bytes)
    }
}

impl<const N: usize> Pack for Checksum<N> {
    fn pack(&self, w: &mut Writer) {
        w.write_bytes(&self.0);
    }

    fn unpack(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.read_array().map(Self)
    }
}
