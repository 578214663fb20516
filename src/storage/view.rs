//! Random-access views
//!
//! Index-addressable, read-only access to a run of records. The search
//! algorithms work against [`RandomAccessView`] so the same code serves the
//! memory level and the disk levels.

use crate::error::Result;
use crate::types::{Key, Record, Value};

use super::LevelFiles;

/// Read-only indexable run of records
///
/// Indices at or beyond `count()` are a contract violation.
pub trait RandomAccessView {
    fn key(&self, i: usize) -> Result<Key>;
    fn value(&self, i: usize) -> Result<Value>;
    fn count(&self) -> usize;

    /// Keys at `lower..upper`, in index order
    fn keys_in(&self, lower: usize, upper: usize) -> Result<Vec<Key>> {
        (lower..upper).map(|i| self.key(i)).collect()
    }
}

/// View over an in-memory slice
pub struct MemView<'a> {
    records: &'a [Record],
}

impl<'a> MemView<'a> {
    pub fn new(records: &'a [Record]) -> Self {
        Self { records }
    }
}

impl RandomAccessView for MemView<'_> {
    fn key(&self, i: usize) -> Result<Key> {
        Ok(self.records[i].key)
    }

    fn value(&self, i: usize) -> Result<Value> {
        Ok(self.records[i].value)
    }

    fn count(&self) -> usize {
        self.records.len()
    }

    fn keys_in(&self, lower: usize, upper: usize) -> Result<Vec<Key>> {
        Ok(self.records[lower..upper].iter().map(|r| r.key).collect())
    }
}

/// View over the first `count` records of a level's files.
///
/// Every access is a positioned read with no caching. Searches only touch
/// one fence region, so this stays cheap enough. `keys_in` reads the whole
/// range in one call.
pub struct FileView<'a> {
    files: &'a LevelFiles,
    count: usize,
}

impl<'a> FileView<'a> {
    pub fn new(files: &'a LevelFiles, count: usize) -> Self {
        Self { files, count }
    }
}

impl RandomAccessView for FileView<'_> {
    fn key(&self, i: usize) -> Result<Key> {
        debug_assert!(i < self.count, "index {} out of {}", i, self.count);
        self.files.keys.read_one(i)
    }

    fn value(&self, i: usize) -> Result<Value> {
        debug_assert!(i < self.count, "index {} out of {}", i, self.count);
        self.files.values.read_one(i)
    }

    fn count(&self) -> usize {
        self.count
    }

    fn keys_in(&self, lower: usize, upper: usize) -> Result<Vec<Key>> {
        debug_assert!(upper <= self.count, "range end {} out of {}", upper, self.count);
        self.files.keys.read_range(lower, upper.saturating_sub(lower))
    }
}
