//! Scoped bump arena for transient buffers.
//!
//! Allocation only moves forward from the current watermark; truncating to
//! a savepoint releases everything allocated after it. Scopes nest strictly
//! LIFO: a `RegionGuard` mutably borrows its parent, so an inner scope is
//! always closed before the enclosing one can be used again.

#[cfg(test)]
mod tests;

use crate::error::InternalError;
use std::{
    io,
    ops::{Deref, DerefMut},
};

///
/// CONSTANTS
///

/// Default region capacity (1 MiB).
pub const DEFAULT_REGION_CAPACITY: usize = 1024 * 1024;

///
/// RegionSavepoint
/// Watermark captured from a region.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct RegionSavepoint(usize);

///
/// RegionSpan
/// Location of one allocation inside a region.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RegionSpan {
    offset: usize,
    len: usize,
}

impl RegionSpan {
    #[must_use]
    pub const fn len(self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

///
/// Region
///

#[derive(Debug)]
pub struct Region {
    buf: Vec<u8>,
    capacity: usize,
}

impl Region {
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::new(),
            capacity,
        }
    }

    /// Bytes currently allocated.
    #[must_use]
    pub const fn used(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub const fn savepoint(&self) -> RegionSavepoint {
        RegionSavepoint(self.buf.len())
    }

    /// Allocate `size` zeroed bytes past the current watermark.
    pub fn alloc(&mut self, size: usize, object: &str) -> Result<RegionSpan, InternalError> {
        let offset = self.buf.len();
        self.reserve(size, object)?;
        self.buf.resize(offset + size, 0);

        Ok(RegionSpan { offset, len: size })
    }

    /// Allocate and fill with a copy of `bytes`.
    pub fn alloc_copy(&mut self, bytes: &[u8], object: &str) -> Result<RegionSpan, InternalError> {
        let offset = self.buf.len();
        self.reserve(bytes.len(), object)?;
        self.buf.extend_from_slice(bytes);

        Ok(RegionSpan {
            offset,
            len: bytes.len(),
        })
    }

    /// Open a streaming allocation; bytes written become one span.
    pub fn writer(&mut self) -> RegionWriter<'_> {
        let start = self.buf.len();

        RegionWriter {
            region: self,
            start,
            overflow: None,
        }
    }

    #[must_use]
    pub fn bytes(&self, span: RegionSpan) -> &[u8] {
        &self.buf[span.offset..span.offset + span.len]
    }

    /// Release everything allocated after `savepoint`.
    ///
    /// A savepoint above the current watermark is a LIFO violation: it
    /// asserts in debug builds and leaves the region untouched otherwise.
    pub fn truncate(&mut self, savepoint: RegionSavepoint) {
        debug_assert!(
            savepoint.0 <= self.buf.len(),
            "region savepoint {} above watermark {}",
            savepoint.0,
            self.buf.len()
        );
        if savepoint.0 > self.buf.len() {
            return;
        }
        self.buf.truncate(savepoint.0);
    }

    /// Open a scope that truncates back to the current watermark on drop.
    pub fn scope(&mut self) -> RegionGuard<'_> {
        let savepoint = self.savepoint();

        RegionGuard {
            region: self,
            savepoint,
        }
    }

    fn reserve(&self, size: usize, object: &str) -> Result<(), InternalError> {
        match self.buf.len().checked_add(size) {
            Some(end) if end <= self.capacity => Ok(()),
            _ => Err(InternalError::memory_issue(size, "region", object)),
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new(DEFAULT_REGION_CAPACITY)
    }
}

///
/// RegionGuard
///
/// Scope over a region. Dropping the guard truncates to the watermark taken
/// when it was opened, on every exit path.
///

#[derive(Debug)]
pub struct RegionGuard<'r> {
    region: &'r mut Region,
    savepoint: RegionSavepoint,
}

impl RegionGuard<'_> {
    #[must_use]
    pub const fn savepoint(&self) -> RegionSavepoint {
        self.savepoint
    }
}

impl Deref for RegionGuard<'_> {
    type Target = Region;

    fn deref(&self) -> &Region {
        self.region
    }
}

impl DerefMut for RegionGuard<'_> {
    fn deref_mut(&mut self) -> &mut Region {
        self.region
    }
}

impl Drop for RegionGuard<'_> {
    fn drop(&mut self) {
        self.region.truncate(self.savepoint);
    }
}

///
/// RegionWriter
///
/// `io::Write` sink that appends to a region within its capacity.
///

#[derive(Debug)]
pub struct RegionWriter<'r> {
    region: &'r mut Region,
    start: usize,
    overflow: Option<usize>,
}

impl RegionWriter<'_> {
    /// Size of the first write refused for lack of capacity, if any.
    #[must_use]
    pub const fn overflow(&self) -> Option<usize> {
        self.overflow
    }

    /// Close the writer and return the span covering everything written.
    #[must_use]
    pub fn finish(self) -> RegionSpan {
        RegionSpan {
            offset: self.start,
            len: self.region.buf.len() - self.start,
        }
    }
}

impl io::Write for RegionWriter<'_> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.region.reserve(data.len(), "writer").is_err() {
            self.overflow.get_or_insert(data.len());
            return Err(io::Error::new(
                io::ErrorKind::OutOfMemory,
                format!(
                    "region capacity {} exceeded by {} byte write",
                    self.region.capacity,
                    data.len()
                ),
            ));
        }
        self.region.buf.extend_from_slice(data);

        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
