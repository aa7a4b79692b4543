//! # logstore
//!
//! The append-only record store at the base of a write-ahead log:
//! - Length-prefixed binary records in a single file
//! - Monotonic, gap-free byte offsets as stable record identifiers
//! - Buffered appends that stay visible to concurrent readers
//! - Size recovery from the file length after a restart
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Segment / Index layer (external)                │
//! │        (chooses the file, remembers record offsets)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ append / read / read_at / close
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      RecordStore                             │
//! │                  (single Mutex, &self API)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  BufWriter  │          │ Positioned  │
//!   │  (appends)  │          │   reads     │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          └──────────┬─────────────┘
//!                     ▼
//!              ┌─────────────┐
//!              │    File     │
//!              └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::StoreConfig;
pub use store::{RecordStore, LEN_WIDTH};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of logstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
