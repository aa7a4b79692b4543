//! Record Store
//!
//! Owns one file, its write buffer and the logical size counter, and
//! serializes every operation through a single lock.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::Path;

use parking_lot::Mutex;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

use super::framing::{encode_prefix, framed_len, BigEndianU64, LengthPrefix};
use super::positioned::read_full_at;

/// Append-only store of length-prefixed records in a single file
///
/// ## Concurrency:
/// - One `parking_lot::Mutex` guards the writer, the file and `size`
///   together; every operation holds it for its full duration
/// - All methods use `&self`, so a store is shared with `Arc<RecordStore>`
/// - Reads flush the buffer first, so they see every append that returned
///   before the read started
///
/// ## Lifecycle:
/// `Open` until `close` succeeds or fails; afterwards every call returns
/// `StoreError::Closed`. A failed `append` leaves the store `Failed`: only
/// `size` and `close` are accepted from then on. Dropping an open store
/// flushes best-effort.
pub struct RecordStore<P: LengthPrefix = BigEndianU64> {
    /// `None` once the store has been closed
    state: Mutex<Option<Inner>>,

    /// fsync after the final flush in `close`
    sync_on_close: bool,

    _prefix: PhantomData<P>,
}

/// State only touched with the lock held
struct Inner {
    /// Write-behind buffer wrapping the exclusively owned file
    writer: BufWriter<File>,

    /// Bytes committed to the store, flushed or still buffered.
    /// Always the offset the next record starts at.
    size: u64,

    /// Set when an append failed; the buffer may hold bytes `size` does
    /// not count
    failed: bool,
}

impl Inner {
    /// Reject use of a store whose buffer is out of step with `size`
    fn usable(&mut self) -> Result<&mut Self> {
        if self.failed {
            return Err(StoreError::Failed);
        }
        Ok(self)
    }
}

impl RecordStore {
    /// Create a store over an open, readable and writable file
    ///
    /// The file's current length becomes the store's size.
    pub fn new(file: File) -> Result<Self> {
        Self::with_framing(file, &StoreConfig::default())
    }

    /// Create a store over an open file with the given config
    pub fn with_config(file: File, config: &StoreConfig) -> Result<Self> {
        Self::with_framing(file, config)
    }

    /// Open or create the file at `path` and build a store over it
    ///
    /// Existing contents are kept; new records are appended after them.
    pub fn open(path: &Path, config: &StoreConfig) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        tracing::debug!("Opening record store at {}", path.display());
        Self::with_framing(file, config)
    }
}

impl<P: LengthPrefix> RecordStore<P> {
    /// Create a store using the length prefix encoding `P`
    ///
    /// No data is read; the size is recovered from the file length alone.
    /// A partially written record at the tail is not detected.
    pub fn with_framing(mut file: File, config: &StoreConfig) -> Result<Self> {
        let size = file.metadata()?.len();

        // Buffered writes go through the cursor, so it must sit at the end
        file.seek(SeekFrom::Start(size))?;

        tracing::debug!(
            "Record store opened: size={}, buffer_capacity={}",
            size,
            config.buffer_capacity
        );

        Ok(Self {
            state: Mutex::new(Some(Inner {
                writer: BufWriter::with_capacity(config.buffer_capacity, file),
                size,
                failed: false,
            })),
            sync_on_close: config.sync_on_close,
            _prefix: PhantomData,
        })
    }

    /// Append a record
    ///
    /// Returns `(bytes_written, start_offset)` where `bytes_written` counts
    /// the prefix and the payload, and `start_offset` is the record's
    /// address for `read`. The bytes may still be buffered on return.
    pub fn append(&self, payload: &[u8]) -> Result<(u64, u64)> {
        let mut state = self.state.lock();
        let inner = state.as_mut().ok_or(StoreError::Closed)?.usable()?;

        let pos = inner.size;

        let prefix = encode_prefix::<P>(payload.len() as u64);

        let queued = inner
            .writer
            .write_all(&prefix)
            .map_err(StoreError::Framing)
            .and_then(|_| inner.writer.write_all(payload).map_err(StoreError::Io));

        if let Err(e) = queued {
            inner.failed = true;
            tracing::warn!("Append at {} failed, store is unusable: {}", pos, e);
            return Err(e);
        }

        // Only advance once both writes are queued
        let written = framed_len::<P>(payload.len() as u64);
        inner.size += written;

        tracing::trace!("Appended record at {} ({} bytes)", pos, written);
        Ok((written, pos))
    }

    /// Read the record that starts at `pos`
    ///
    /// `pos` should be an offset returned by `append`. Any other offset
    /// decodes whatever bytes sit there as a length; it is only rejected if
    /// that length runs past the end of the store.
    pub fn read(&self, pos: u64) -> Result<Vec<u8>> {
        let mut state = self.state.lock();
        let inner = state.as_mut().ok_or(StoreError::Closed)?.usable()?;

        inner.writer.flush()?;

        let size = inner.size;
        let width = P::WIDTH as u64;
        check_range(pos, width, size)?;

        let mut prefix = vec![0u8; P::WIDTH];
        let n = read_full_at(inner.writer.get_ref(), &mut prefix, pos)?;
        if n < P::WIDTH {
            return Err(out_of_range(pos, width, pos + n as u64));
        }

        let len = P::decode(&prefix);
        let start = pos + width;
        check_range(start, len, size)?;

        let payload_len = usize::try_from(len).map_err(|_| out_of_range(start, len, size))?;
        let mut payload = vec![0u8; payload_len];
        let n = read_full_at(inner.writer.get_ref(), &mut payload, start)?;
        if (n as u64) < len {
            return Err(out_of_range(start, len, start + n as u64));
        }

        tracing::trace!("Read record at {} ({} byte payload)", pos, len);
        Ok(payload)
    }

    /// Read raw bytes at `offset` into `buf`
    ///
    /// Returns how many bytes were read. A count below `buf.len()` means the
    /// end of the file was reached and is not an error.
    pub fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
        let mut state = self.state.lock();
        let inner = state.as_mut().ok_or(StoreError::Closed)?.usable()?;

        inner.writer.flush()?;

        let n = read_full_at(inner.writer.get_ref(), buf, offset)?;
        tracing::trace!("Raw read at {}: {} of {} bytes", offset, n, buf.len());
        Ok(n)
    }

    /// Current logical size, including bytes still in the buffer
    pub fn size(&self) -> Result<u64> {
        let state = self.state.lock();
        state.as_ref().map(|inner| inner.size).ok_or(StoreError::Closed)
    }

    /// Flush buffered records and fsync the file
    pub fn sync(&self) -> Result<()> {
        let mut state = self.state.lock();
        let inner = state.as_mut().ok_or(StoreError::Closed)?.usable()?;

        inner.writer.flush()?;
        inner.writer.get_ref().sync_all()?;

        tracing::debug!("Record store synced at size {}", inner.size);
        Ok(())
    }

    /// Flush buffered records and release the file
    ///
    /// The store is closed whether or not this succeeds; on failure the
    /// on-disk state of the buffered tail is unknown.
    /// Closing a failed store still flushes, so a partial record may be
    /// left at the tail of the file.
    pub fn close(&self) -> Result<()> {
        let mut state = self.state.lock();
        let inner = state.take().ok_or(StoreError::Closed)?;

        let size = inner.size;
        let file = inner.writer.into_inner().map_err(|e| e.into_error())?;
        if self.sync_on_close {
            file.sync_all()?;
        }
        drop(file);

        tracing::debug!("Record store closed at size {}", size);
        Ok(())
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.state.lock().is_none()
    }
}

/// Reject a read of `len` bytes at `offset` that would pass `size`
fn check_range(offset: u64, len: u64, size: u64) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(()),
        _ => Err(out_of_range(offset, len, size)),
    }
}

fn out_of_range(offset: u64, len: u64, size: u64) -> StoreError {
    tracing::warn!(
        "Read past end of store: offset {} + {} bytes, size {}",
        offset,
        len,
        size
    );
    StoreError::OutOfRange { offset, len, size }
}
