//! Configuration for logstore
//!
//! Centralized configuration with sensible defaults.

/// Default write buffer capacity (8 KiB)
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Configuration for a single record store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    // -------------------------------------------------------------------------
    // Buffering
    // -------------------------------------------------------------------------
    /// Capacity of the write-behind buffer (in bytes)
    /// Appends smaller than this are coalesced before hitting the file.
    pub buffer_capacity: usize,

    // -------------------------------------------------------------------------
    // Durability
    // -------------------------------------------------------------------------
    /// fsync the file after the final flush in `close`
    pub sync_on_close: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            sync_on_close: false,
        }
    }
}

impl StoreConfig {
    /// Create a new config builder
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }
}

/// Builder for StoreConfig
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set the write buffer capacity (in bytes)
    pub fn buffer_capacity(mut self, bytes: usize) -> Self {
        self.config.buffer_capacity = bytes;
        self
    }

    /// Sync the file to disk when the store is closed
    pub fn sync_on_close(mut self, enabled: bool) -> Self {
        self.config.sync_on_close = enabled;
        self
    }

    pub fn build(self) -> StoreConfig {
        self.config
    }
}
