//! Read-only byte buffers backing the graph views.
//!
//! A buffer is either a read-only memory map of one of the graph files or an
//! owned `Vec<u8>` (graphs built in memory by [`GraphBuilder`](crate::GraphBuilder)).
//! All multi-byte values are big-endian.  Accessors are bounds checked by
//! slice indexing: an out-of-range id is a programming error and panics.

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

use crate::{GraphError, GraphResult};

pub enum Buffer {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    /// Map the file at `path` read-only.
    pub fn map(path: &Path) -> GraphResult<Self> {
        let file = File::open(path).map_err(|e| GraphError::io(path, e))?;
        let len = file.metadata().map_err(|e| GraphError::io(path, e))?.len();
        if len == 0 {
            return Ok(Buffer::Owned(Vec::new()));
        }
        // SAFETY: the graph files are opened read-only and are never written
        // while a graph is loaded.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| GraphError::io(path, e))?;
        Ok(Buffer::Mapped(mmap))
    }

    #[inline]
    fn array<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self[offset..offset + N]);
        out
    }

    #[inline]
    pub fn i32_at(&self, offset: usize) -> i32 {
        i32::from_be_bytes(self.array(offset))
    }

    #[inline]
    pub fn u16_at(&self, offset: usize) -> u16 {
        u16::from_be_bytes(self.array(offset))
    }

    #[inline]
    pub fn u64_at(&self, offset: usize) -> u64 {
        u64::from_be_bytes(self.array(offset))
    }

    /// Number of whole records of `record_size` bytes, or an error naming
    /// `what` if the length is not a multiple of the record size.
    pub(crate) fn record_count(&self, record_size: usize, what: &str) -> GraphResult<usize> {
        if self.len() % record_size != 0 {
            return Err(GraphError::InvalidFormat(format!(
                "{what}: {} bytes is not a multiple of the {record_size}-byte record",
                self.len()
            )));
        }
        Ok(self.len() / record_size)
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Buffer::Mapped(m) => &m[..],
            Buffer::Owned(v) => &v[..],
        }
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Buffer::Owned(bytes)
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Buffer::Mapped(_) => "Mapped",
            Buffer::Owned(_) => "Owned",
        };
        write!(f, "Buffer::{kind}({} bytes)", self.len())
    }
}
