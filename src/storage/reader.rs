//! Sequential readers
//!
//! Forward-only cursors over a run of records. A merge consumes its input
//! through [`SequentialReader`] without knowing whether the run lives in the
//! memory level or in a disk level's files.

use crate::error::Result;
use crate::types::{Key, Record, Value};

use super::LevelFiles;

/// Forward-only cursor over a run of records
pub trait SequentialReader {
    /// `true` while at least one record remains
    fn has_next(&self) -> bool;

    /// Return the next record and advance.
    ///
    /// Calling this after `has_next()` returned `false` is a contract
    /// violation and panics.
    fn next_record(&mut self) -> Result<Record>;
}

/// Pull the next record if there is one
pub fn advance<R: SequentialReader + ?Sized>(reader: &mut R) -> Result<Option<Record>> {
    if reader.has_next() {
        reader.next_record().map(Some)
    } else {
        Ok(None)
    }
}

// =============================================================================
// Memory Reader
// =============================================================================

/// Reader over an in-memory slice, used when the memory level flushes
pub struct MemReader<'a> {
    records: &'a [Record],
    pos: usize,
}

impl<'a> MemReader<'a> {
    pub fn new(records: &'a [Record]) -> Self {
        Self { records, pos: 0 }
    }
}

impl SequentialReader for MemReader<'_> {
    fn has_next(&self) -> bool {
        self.pos < self.records.len()
    }

    fn next_record(&mut self) -> Result<Record> {
        let record = self.records[self.pos];
        self.pos += 1;
        Ok(record)
    }
}

// =============================================================================
// File Reader
// =============================================================================

/// Reader over the first `count` records of a level's files.
///
/// Loads `page_size` records at a time and refills when the page is used
/// up. `has_next` is exact on the final partial page because consumption is
/// tracked against `count`, not against what the page holds.
pub struct FileReader<'a> {
    files: &'a LevelFiles,
    count: usize,
    page_size: usize,
    /// Records handed out so far
    consumed: usize,
    /// File position of the next page to load
    loaded: usize,
    keys: Vec<Key>,
    values: Vec<Value>,
    /// Cursor within the current page
    cursor: usize,
}

impl<'a> FileReader<'a> {
    pub fn new(files: &'a LevelFiles, count: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            files,
            count,
            page_size,
            consumed: 0,
            loaded: 0,
            keys: Vec::with_capacity(page_size),
            values: Vec::with_capacity(page_size),
            cursor: 0,
        }
    }

    fn fetch(&mut self) -> Result<()> {
        let n = self.page_size.min(self.count - self.loaded);
        self.files
            .keys
            .read_range_into(self.loaded, n, &mut self.keys)?;
        self.files
            .values
            .read_range_into(self.loaded, n, &mut self.values)?;
        self.loaded += n;
        self.cursor = 0;
        Ok(())
    }
}

impl SequentialReader for FileReader<'_> {
    fn has_next(&self) -> bool {
        self.consumed < self.count
    }

    fn next_record(&mut self) -> Result<Record> {
        assert!(self.has_next(), "read past the end of a {}-record run", self.count);

        if self.cursor == self.keys.len() {
            self.fetch()?;
        }

        let record = Record::new(self.keys[self.cursor], self.values[self.cursor]);
        self.cursor += 1;
        self.consumed += 1;
        Ok(record)
    }
}
