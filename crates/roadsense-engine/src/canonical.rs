//! Canonical binary encoding for deterministic config hashing.
//!
//! JSON/TOML text hashing is risky for determinism: floats serialize
//! inconsistently, optional fields can be omitted vs defaulted, and
//! serializer versions can change formatting. Configs are therefore
//! hashed over a fixed-order binary encoding instead.
//!
//! Encoding rules:
//! - First byte: `CONFIG_ENCODING_VERSION`
//! - Fields in fixed (struct definition) order
//! - Integers as little-endian fixed-width bytes
//! - f64 as the little-endian bytes of its IEEE-754 bit pattern
//! - Strings as u32 LE length + UTF-8 bytes

use sha2::{Digest, Sha256};

/// Config encoding version. Bump when encoding rules change.
pub const CONFIG_ENCODING_VERSION: u8 = 0x01;

/// Deterministic binary encoding of a config struct.
///
/// Implementations must encode fields in fixed order with no padding or
/// platform-dependent representations.
pub trait CanonicalBytes {
    /// Encode to canonical bytes. The first byte MUST be
    /// `CONFIG_ENCODING_VERSION`.
    fn canonical_bytes(&self) -> Vec<u8>;
}

/// SHA-256 over the canonical bytes, hex-encoded.
pub fn canonical_hash<T: CanonicalBytes>(value: &T) -> String {
    let bytes = value.canonical_bytes();
    let hash = Sha256::digest(&bytes);
    hex::encode(hash)
}

#[inline]
pub fn encode_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

#[inline]
pub fn encode_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// f64 encoded through its bit pattern, so equal values hash equally on
/// every platform.
#[inline]
pub fn encode_f64(buf: &mut Vec<u8>, value: f64) {
    encode_u64(buf, value.to_bits());
}

#[inline]
pub fn encode_string(buf: &mut Vec<u8>, value: &str) {
    encode_u32(buf, value.len() as u32);
    buf.extend_from_slice(value.as_bytes());
}
