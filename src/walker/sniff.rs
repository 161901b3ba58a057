//! Binary sniffing
//!
//! A file is text when its first `SNIFF_LEN` bytes are well-formed UTF-8 with
//! no NUL bytes. Anything else, including files that cannot be opened or read,
//! is treated as binary. Text in other encodings (Latin-1, UTF-16) is
//! classified as binary; that is a known limitation of the heuristic.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Maximum number of bytes inspected per file
pub const SNIFF_LEN: usize = 8000;

/// Whether the file at `path` should be treated as binary
pub fn is_binary(path: &Path) -> bool {
    match read_prefix(path) {
        Ok(mut prefix) => {
            let cut = prefix.len() > SNIFF_LEN;
            prefix.truncate(SNIFF_LEN);
            is_binary_prefix(&prefix, cut)
        }
        Err(_) => true,
    }
}

/// Read at most `SNIFF_LEN + 1` bytes from the start of the file.
///
/// The extra byte tells a file that continues past the cap from one that
/// ends exactly at it.
pub fn read_prefix(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut prefix = Vec::with_capacity(SNIFF_LEN + 1);
    file.take(SNIFF_LEN as u64 + 1).read_to_end(&mut prefix)?;
    Ok(prefix)
}

/// Classify a byte prefix. `cut` is true when the file continues past it, in
/// which case a multi-byte sequence split at the very end is not counted as
/// invalid.
pub fn is_binary_prefix(prefix: &[u8], cut: bool) -> bool {
    if prefix.contains(&0) {
        return true;
    }

    match std::str::from_utf8(prefix) {
        Ok(_) => false,
        Err(e) => e.error_len().is_some() || !cut,
    }
}
