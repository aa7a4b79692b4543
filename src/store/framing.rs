//! Record framing
//!
//! Encodes and decodes the fixed-width length prefix that precedes every
//! record payload.

use bytes::{Buf, BufMut};

/// Width of the default length prefix in bytes
pub const LEN_WIDTH: u64 = 8;

/// A fixed-width length prefix encoding
///
/// The width is part of the on-disk format: every record in a file uses the
/// same prefix, so a store is bound to exactly one implementation for its
/// whole lifetime.
pub trait LengthPrefix: Send + Sync + 'static {
    /// Number of bytes the prefix occupies
    const WIDTH: usize;

    /// Write `len` into `dst`, which is exactly `WIDTH` bytes long
    fn encode(len: u64, dst: &mut [u8]);

    /// Read a length from `src`, which is exactly `WIDTH` bytes long
    fn decode(src: &[u8]) -> u64;
}

/// 8-byte big-endian unsigned length prefix
#[derive(Debug, Clone, Copy, Default)]
pub struct BigEndianU64;

impl LengthPrefix for BigEndianU64 {
    const WIDTH: usize = LEN_WIDTH as usize;

    fn encode(len: u64, mut dst: &mut [u8]) {
        dst.put_u64(len);
    }

    fn decode(mut src: &[u8]) -> u64 {
        src.get_u64()
    }
}

/// Encode a length into a freshly allocated prefix
pub fn encode_prefix<P: LengthPrefix>(len: u64) -> Vec<u8> {
    let mut prefix = vec![0u8; P::WIDTH];
    P::encode(len, &mut prefix);
    prefix
}

/// Total bytes a record with `payload_len` bytes of payload occupies
pub fn framed_len<P: LengthPrefix>(payload_len: u64) -> u64 {
    P::WIDTH as u64 + payload_len
}
