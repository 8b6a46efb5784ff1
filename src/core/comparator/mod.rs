//! # Comparator Module
//!
//! Decides whether a naming collision is a true duplicate by comparing
//! file contents byte for byte.
//!
//! ## Algorithm
//! 1. Different sizes are never equal (no file is opened)
//! 2. Both files are streamed in blocks
//! 3. Each block is compared as 64-bit words, the tail byte-wise

use crate::core::fs::FileSystem;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

/// Width of one comparison unit
const WORD: usize = std::mem::size_of::<u64>();

/// Bytes read from each file per step
const BLOCK_LEN: usize = 8 * 1024 * WORD;

/// Byte-equality check between two files
#[derive(Clone)]
pub struct ContentComparator {
    fs: Arc<dyn FileSystem>,
}

impl ContentComparator {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Check whether two files have identical contents
    pub fn equal(&self, first: &Path, second: &Path) -> io::Result<bool> {
        if self.fs.file_size(first)? != self.fs.file_size(second)? {
            return Ok(false);
        }

        let mut one = self.fs.open_read(first)?;
        let mut two = self.fs.open_read(second)?;
        let mut block_one = vec![0u8; BLOCK_LEN];
        let mut block_two = vec![0u8; BLOCK_LEN];

        loop {
            let read_one = read_block(&mut one, &mut block_one)?;
            let read_two = read_block(&mut two, &mut block_two)?;

            // A file changed size while we were reading it
            if read_one != read_two {
                return Ok(false);
            }
            if read_one == 0 {
                return Ok(true);
            }
            if !blocks_equal(&block_one[..read_one], &block_two[..read_two]) {
                return Ok(false);
            }
        }
    }
}

/// Fill `buf` as far as the reader allows, returning the bytes read.
fn read_block(reader: &mut dyn Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn blocks_equal(one: &[u8], two: &[u8]) -> bool {
    let mut words_one = one.chunks_exact(WORD);
    let mut words_two = two.chunks_exact(WORD);

    for (a, b) in (&mut words_one).zip(&mut words_two) {
        if word(a) != word(b) {
            return false;
        }
    }

    words_one.remainder() == words_two.remainder()
}

fn word(chunk: &[u8]) -> u64 {
    let mut bytes = [0u8; WORD];
    bytes.copy_from_slice(chunk);
    u64::from_ne_bytes(bytes)
}
