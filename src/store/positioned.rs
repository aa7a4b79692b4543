//! Positioned reads
//!
//! Reads at an absolute offset without moving the cursor that buffered
//! writes append through.

use std::fs::File;
use std::io;

/// Fill `buf` from `offset` until it is full or end-of-file is reached.
///
/// Returns the number of bytes read; fewer than `buf.len()` means EOF.
pub fn read_full_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match read_once(file, &mut buf[filled..], offset + filled as u64) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(unix)]
fn read_once(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::unix::fs::FileExt;
    file.read_at(buf, offset)
}

#[cfg(windows)]
fn read_once(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::io::{Seek, SeekFrom};
    use std::os::windows::fs::FileExt;

    // seek_read moves the cursor; put it back at the end for the writer
    let n = file.seek_read(buf, offset);
    let mut handle = file;
    handle.seek(SeekFrom::End(0))?;
    n
}
