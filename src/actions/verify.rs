//! Byte-for-byte content comparison for paranoid deletion.
//!
//! Digest equality implies identical content only up to hash collisions and
//! time-of-check races. Paranoid mode closes both gaps by re-reading the
//! doomed file and the retained copy side by side immediately before the
//! destructive step.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Comparison read buffer (64 KiB, matching the hasher's chunk size).
const COMPARE_BUFFER_SIZE: usize = 64 * 1024;

/// Compare two files byte for byte, streaming both.
///
/// Returns `Ok(false)` as soon as a differing chunk (or length mismatch) is
/// seen; neither file is ever fully loaded into memory.
///
/// # Errors
///
/// Propagates any I/O error from opening or reading either file.
pub fn files_identical(a: &Path, b: &Path) -> io::Result<bool> {
    let meta_a = std::fs::metadata(a)?;
    let meta_b = std::fs::metadata(b)?;
    if meta_a.len() != meta_b.len() {
        return Ok(false);
    }

    let mut reader_a = BufReader::with_capacity(COMPARE_BUFFER_SIZE, File::open(a)?);
    let mut reader_b = BufReader::with_capacity(COMPARE_BUFFER_SIZE, File::open(b)?);

    let mut buf_a = [0u8; COMPARE_BUFFER_SIZE];
    let mut buf_b = [0u8; COMPARE_BUFFER_SIZE];

    loop {
        let read_a = read_full(&mut reader_a, &mut buf_a)?;
        let read_b = read_full(&mut reader_b, &mut buf_b)?;

        if read_a != read_b || buf_a[..read_a] != buf_b[..read_b] {
            return Ok(false);
        }
        if read_a == 0 {
            return Ok(true);
        }
    }
}

/// Read until the buffer is full or EOF; plain `read` may return short.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
