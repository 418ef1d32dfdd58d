#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Wire-level primitives for the contract ABI binary format.
//!
//! This crate contains:
//! - Byte cursor and byte buffer ([`Reader`], [`Writer`])
//! - Compact LEB128 integers ([`VarUint32`], [`VarInt32`])
//! - The fixed-field [`Pack`] trait shared by every binary record
//! - Domain scalars ([`Name`], [`SymbolCode`], [`Symbol`], [`Asset`],
//!   [`Checksum`], [`TimePoint`])
//!
//! Everything here is schema-free. Schema-driven encoding lives in the
//! `wasm-abi` crate and is built on top of these primitives.

mod checksum;
mod error;
mod name;
mod pack;
mod stream;
mod symbol;
mod time;
mod varint;

#[cfg(test)]
mod pack_tests;
#[cfg(test)]
mod stream_tests;
#[cfg(test)]
mod symbol_tests;

pub use checksum::{Checksum, Checksum160, Checksum256, Checksum512};
pub use error::WireError;
pub use name::Name;
pub use pack::{Pack, checked_len, pack_to_vec, unpack_exact};
pub use stream::{Reader, Writer};
pub use symbol::{Asset, MAX_ASSET_AMOUNT, MAX_PRECISION, Symbol, SymbolCode};
pub use time::TimePoint;
pub use varint::{VarInt32, VarUint32};
