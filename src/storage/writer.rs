//! Buffered writer
//!
//! Appends records to a level's key/value files one page at a time.

use crate::error::Result;
use crate::types::{Key, Record, Value};

use super::LevelFiles;

/// Page-buffered appender to a pair of level files
///
/// Records pushed are written at consecutive positions starting at `start`.
/// A full page is written out automatically; [`flush`](Self::flush) writes
/// a partial page. Dropping the writer flushes whatever is still buffered.
pub struct BufferedWriter<'a> {
    files: &'a mut LevelFiles,
    page_size: usize,
    /// File position where the buffered page will be written
    position: usize,
    keys: Vec<Key>,
    values: Vec<Value>,
}

impl<'a> BufferedWriter<'a> {
    pub fn new(files: &'a mut LevelFiles, page_size: usize, start: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            files,
            page_size,
            position: start,
            keys: Vec::with_capacity(page_size),
            values: Vec::with_capacity(page_size),
        }
    }

    /// Append a record, writing the page out when it fills
    pub fn push(&mut self, record: Record) -> Result<()> {
        self.keys.push(record.key);
        self.values.push(record.value);

        if self.keys.len() == self.page_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Write any buffered records. Calling it with nothing buffered is a no-op.
    pub fn flush(&mut self) -> Result<()> {
        if self.keys.is_empty() {
            return Ok(());
        }

        self.files.keys.write_range(&self.keys, self.position)?;
        self.files.values.write_range(&self.values, self.position)?;
        self.position += self.keys.len();
        self.keys.clear();
        self.values.clear();
        Ok(())
    }

    /// Position the next flushed record will land at, counting buffered ones
    pub fn next_position(&self) -> usize {
        self.position + self.keys.len()
    }
}

impl Drop for BufferedWriter<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(
                "Failed to flush {} buffered records at position {}: {}",
                self.keys.len(),
                self.position,
                e
            );
        }
    }
}
