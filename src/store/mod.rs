//! Record Store Module
//!
//! A durable, offset-addressed sequence of variable-length records in one
//! file.
//!
//! ## Responsibilities
//! - Frame each record with a fixed-width length prefix
//! - Coalesce small appends in a write buffer
//! - Hand out monotonic byte offsets as record addresses
//! - Recover the logical size from the file length on open
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Record 1                                │
//! │ ┌──────────────────┬──────────────────┐ │
//! │ │ Len (8, BE u64)  │ Payload (Len)    │ │
//! │ └──────────────────┴──────────────────┘ │
//! ├─────────────────────────────────────────┤
//! │ Record 2                                │
//! │ ┌──────────────────┬──────────────────┐ │
//! │ │ Len (8, BE u64)  │ Payload (Len)    │ │
//! │ └──────────────────┴──────────────────┘ │
//! └─────────────────────────────────────────┘
//! ```
//!
//! No header, footer, checksum or magic number. The file length is the only
//! recovery signal; a record torn by a crash is left for the caller to deal
//! with.

mod framing;
mod positioned;
mod record_store;

pub use framing::{encode_prefix, framed_len, BigEndianU64, LengthPrefix, LEN_WIDTH};
pub use record_store::RecordStore;
