//! Tests for record framing
//!
//! These tests verify:
//! - The default prefix is 8-byte big-endian
//! - Stores with a different prefix encoding frame records with it

use std::fs::OpenOptions;

use bytes::{Buf, BufMut};
use logstore::store::{encode_prefix, framed_len, BigEndianU64, LengthPrefix};
use logstore::{RecordStore, StoreConfig, StoreError};
use tempfile::TempDir;

/// 4-byte little-endian prefix
struct LittleEndianU32;

impl LengthPrefix for LittleEndianU32 {
    const WIDTH: usize = 4;

    fn encode(len: u64, mut dst: &mut [u8]) {
        dst.put_u32_le(len as u32);
    }

    fn decode(mut src: &[u8]) -> u64 {
        src.get_u32_le() as u64
    }
}

// =============================================================================
// Codec Tests
// =============================================================================

#[test]
fn test_big_endian_prefix_layout() {
    assert_eq!(BigEndianU64::WIDTH, 8);
    assert_eq!(encode_prefix::<BigEndianU64>(11), vec![0, 0, 0, 0, 0, 0, 0, 11]);
    assert_eq!(
        encode_prefix::<BigEndianU64>(0x0102_0304_0506_0708),
        vec![1, 2, 3, 4, 5, 6, 7, 8]
    );
}

#[test]
fn test_big_endian_prefix_decode() {
    assert_eq!(BigEndianU64::decode(&[0, 0, 0, 0, 0, 0, 1, 0]), 256);
    assert_eq!(BigEndianU64::decode(&[0xFF; 8]), u64::MAX);
}

#[test]
fn test_framed_len() {
    assert_eq!(framed_len::<BigEndianU64>(0), 8);
    assert_eq!(framed_len::<BigEndianU64>(11), 19);
    assert_eq!(framed_len::<LittleEndianU32>(11), 15);
}

// =============================================================================
// Custom Framing Tests
// =============================================================================

#[test]
fn test_store_with_custom_prefix() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.log");
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&path)
        .unwrap();

    let store: RecordStore<LittleEndianU32> =
        RecordStore::with_framing(file, &StoreConfig::default()).unwrap();

    let (w1, p1) = store.append(b"hello world").unwrap();
    let (w2, p2) = store.append(b"abc").unwrap();
    assert_eq!((w1, p1), (15, 0));
    assert_eq!((w2, p2), (7, 15));

    assert_eq!(store.read(p1).unwrap(), b"hello world");
    assert_eq!(store.read(p2).unwrap(), b"abc");

    let mut raw = [0u8; 7];
    store.read_at(&mut raw, p2).unwrap();
    assert_eq!(&raw, &[3, 0, 0, 0, b'a', b'b', b'c']);

    // Past the last record: prefix of 4 bytes does not fit
    assert!(matches!(
        store.read(22),
        Err(StoreError::OutOfRange { offset: 22, len: 4, size: 22 })
    ));
}
