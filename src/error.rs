//! Error types for logstore
//!
//! Provides a unified error type for all store operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for record store operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    /// Writing the length prefix of a record failed
    #[error("Framing error: failed to write length prefix: {0}")]
    Framing(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // Addressing Errors
    // -------------------------------------------------------------------------
    /// A read at `offset` needed `len` bytes but the store only holds `size`
    #[error("Read out of range: offset {offset} + {len} bytes exceeds store size {size}")]
    OutOfRange { offset: u64, len: u64, size: u64 },

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("Store is closed")]
    Closed,

    /// An earlier append failed part-way; the store only accepts `close`
    #[error("Store failed on an earlier append and must be closed")]
    Failed,
}

impl StoreError {
    /// Whether the store that returned this error should be discarded.
    ///
    /// I/O and framing failures may leave the buffer and the size counter
    /// out of step, so the instance must not be reused. Out-of-range reads
    /// are caller errors and leave the store intact.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StoreError::Io(_) | StoreError::Framing(_) | StoreError::Failed
        )
    }
}
