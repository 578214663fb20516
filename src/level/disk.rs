//! Disk level
//!
//! One level of the tree backed by a key file and a value file. Each level
//! owns a bloom filter and fence posts over what it stores, plus the next
//! (larger) level, which is created the first time this one overflows.

use std::path::PathBuf;

use crate::bloom::BloomFilter;
use crate::config::CompactionPolicy;
use crate::error::Result;
use crate::search;
use crate::storage::{advance, BufferedWriter, FileReader, FileView, LevelFiles, SequentialReader};
use crate::types::{Key, Record, Value};

use super::fence::{Fence, FencePosts};

/// Shape of one disk level
#[derive(Debug, Clone)]
pub struct LevelOptions {
    pub data_dir: PathBuf,
    pub policy: CompactionPolicy,
    /// Records per buffered read or write
    pub page_size: usize,
    /// Records this level holds when full
    pub capacity: usize,
    pub ratio: usize,
    pub bloom_bits: u64,
    pub bloom_hashes: u32,
}

impl LevelOptions {
    /// Options of the level below: same shape, `ratio` times the capacity
    pub fn next_level(&self) -> Self {
        Self {
            capacity: self.capacity * self.ratio,
            ..self.clone()
        }
    }
}

/// In-memory summary of a level's contents. Kept apart from the files so a
/// merge can read the files while building the next summary.
#[derive(Clone)]
struct LevelIndex {
    bloom: BloomFilter,
    fences: FencePosts,
    count: usize,
}

impl LevelIndex {
    fn empty(options: &LevelOptions) -> Self {
        Self {
            bloom: BloomFilter::new(
                options.bloom_bits,
                options.bloom_hashes,
                options.capacity as u32,
            ),
            fences: FencePosts::new(options.ratio, options.capacity / options.ratio),
            count: 0,
        }
    }

    /// Account for `key` written at position `count`
    fn observe(&mut self, key: Key) {
        self.bloom.add(key);
        self.fences.include(self.count, key);
        self.count += 1;
    }

    fn reset(&mut self) {
        self.bloom.clear();
        self.fences.clear();
        self.count = 0;
    }
}

pub struct DiskLevel {
    depth: usize,
    options: LevelOptions,
    files: LevelFiles,
    index: LevelIndex,
    next: Option<Box<DiskLevel>>,
}

impl DiskLevel {
    /// Create an empty level, truncating any files left at its paths.
    ///
    /// The bloom filter is seeded with the capacity so each level hashes
    /// differently.
    pub fn create(depth: usize, options: LevelOptions) -> Result<Self> {
        tracing::debug!(
            "Creating disk level {} ({}, capacity {})",
            depth,
            options.policy,
            options.capacity
        );

        let files = LevelFiles::create(&options.data_dir, options.capacity)?;
        let index = LevelIndex::empty(&options);

        Ok(Self {
            depth,
            options,
            files,
            index,
            next: None,
        })
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Newest value for `key` in this level or any level below it
    pub fn get(&self, key: Key) -> Result<Option<Value>> {
        if self.index.bloom.test(key) {
            let found = match self.options.policy {
                CompactionPolicy::Leveling => self.get_sorted(key)?,
                CompactionPolicy::Tiering => self.get_tiered(key)?,
            };
            if found.is_some() {
                return Ok(found);
            }
        }

        match &self.next {
            Some(next) => next.get(key),
            None => Ok(None),
        }
    }

    /// The level is one sorted run, so the first region whose fence covers
    /// the key is the only place it can be.
    fn get_sorted(&self, key: Key) -> Result<Option<Value>> {
        let Some(region) = self.index.fences.candidates(key).next() else {
            return Ok(None);
        };
        let range = self.index.fences.region_range(region, self.index.count);
        let view = FileView::new(&self.files, self.index.count);
        search::binary_search_in(&view, key, range.start, range.end)
    }

    /// Each region is an appended run; later regions are newer.
    fn get_tiered(&self, key: Key) -> Result<Option<Value>> {
        let view = FileView::new(&self.files, self.index.count);
        for region in self.index.fences.candidates(key).rev() {
            let range = self.index.fences.region_range(region, self.index.count);
            if let Some(value) = search::linear_search_in(&view, key, range.start, range.end)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    // =========================================================================
    // Merging
    // =========================================================================

    /// Absorb `count` records from `input`, the level directly above.
    ///
    /// A level with no room left is flushed into the next one first, so it
    /// is empty by the time the input arrives. If the merge fails, the level
    /// keeps serving what it held before.
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds the capacity of this level.
    pub fn merge(&mut self, input: &mut dyn SequentialReader, count: usize) -> Result<()> {
        assert!(
            count <= self.options.capacity,
            "cannot merge {} records into level {} of capacity {}",
            count,
            self.depth,
            self.options.capacity
        );

        if self.index.count + count > self.options.capacity {
            self.flush()?;
        }

        tracing::trace!(
            "Merging {} records into level {} ({} present)",
            count,
            self.depth,
            self.index.count
        );

        match self.options.policy {
            CompactionPolicy::Leveling => self.merge_sorted(input),
            CompactionPolicy::Tiering => self.append_run(input),
        }
    }

    /// Sorted merge of `input` with the current contents into staging
    /// files, then swap them in. On equal keys the input record goes first
    /// since it is newer.
    fn merge_sorted(&mut self, input: &mut dyn SequentialReader) -> Result<()> {
        let existing = self.index.count;
        let page_size = self.options.page_size;
        let mut staged = self.files.stage()?;
        let mut index = LevelIndex::empty(&self.options);

        {
            let mut current = FileReader::new(&self.files, existing, page_size);
            let mut output = BufferedWriter::new(&mut staged, page_size, 0);

            let mut left = advance(&mut *input)?;
            let mut right = advance(&mut current)?;

            loop {
                let record = match (left, right) {
                    (Some(l), Some(r)) if l.key <= r.key => {
                        left = advance(&mut *input)?;
                        l
                    }
                    (Some(l), None) => {
                        left = advance(&mut *input)?;
                        l
                    }
                    (_, Some(r)) => {
                        right = advance(&mut current)?;
                        r
                    }
                    (None, None) => break,
                };
                output.push(record)?;
                index.observe(record.key);
            }

            output.flush()?;
        }

        self.files.commit(staged)?;
        self.index = index;
        tracing::debug!(
            "Committed level {} after merge ({} records)",
            self.depth,
            self.index.count
        );
        Ok(())
    }

    /// Append `input` as a new run after the existing records. The run only
    /// becomes visible once all of it is written.
    fn append_run(&mut self, input: &mut dyn SequentialReader) -> Result<()> {
        let page_size = self.options.page_size;
        let mut index = self.index.clone();

        {
            let mut output = BufferedWriter::new(&mut self.files, page_size, index.count);
            while let Some(record) = advance(&mut *input)? {
                output.push(record)?;
                index.observe(record.key);
            }
            output.flush()?;
        }

        self.index = index;
        Ok(())
    }

    /// Push every record of this level into the next one and empty it
    fn flush(&mut self) -> Result<()> {
        if self.next.is_none() {
            let level = DiskLevel::create(self.depth + 1, self.options.next_level())?;
            self.next = Some(Box::new(level));
        }

        let count = self.index.count;
        tracing::debug!(
            "Flushing level {} ({} records) into level {}",
            self.depth,
            count,
            self.depth + 1
        );

        if let Some(next) = self.next.as_mut() {
            let mut input = FileReader::new(&self.files, count, self.options.page_size);
            next.merge(&mut input, count)?;
        }

        self.index.reset();
        Ok(())
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Records held by this level and every level below it
    pub fn count(&self) -> usize {
        self.index.count + self.next.as_ref().map_or(0, |next| next.count())
    }

    /// Records held by this level alone
    pub fn len(&self) -> usize {
        self.index.count
    }

    pub fn is_empty(&self) -> bool {
        self.index.count == 0
    }

    /// 1 for the level right below memory
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn capacity(&self) -> usize {
        self.options.capacity
    }

    pub fn policy(&self) -> CompactionPolicy {
        self.options.policy
    }

    pub fn fences(&self) -> &[Fence] {
        self.index.fences.fences()
    }

    pub fn next(&self) -> Option<&DiskLevel> {
        self.next.as_deref()
    }

    /// Read back every live record, in file order
    pub fn records(&self) -> Result<Vec<Record>> {
        let mut reader = FileReader::new(&self.files, self.index.count, self.options.page_size);
        let mut records = Vec::with_capacity(self.index.count);
        while let Some(record) = advance(&mut reader)? {
            records.push(record);
        }
        Ok(records)
    }

    /// Append the description of this level and all levels below to `out`
    pub fn dump(&self, verbose: bool, out: &mut String) -> Result<()> {
        out.push_str(&format!(
            "DiskLevel {} {} capacity: {} ratio: {} count: {} total: {}\n",
            self.depth,
            self.options.policy,
            self.options.capacity,
            self.options.ratio,
            self.index.count,
            self.count()
        ));

        if verbose {
            out.push_str("  fences:");
            for fence in self.fences() {
                out.push_str(&format!(" {}", fence));
            }
            out.push('\n');

            for record in self.records()? {
                out.push_str(&format!("  {}=\"{}\"\n", record.key, record.value));
            }
        }

        match &self.next {
            Some(next) => next.dump(verbose, out),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for DiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskLevel")
            .field("depth", &self.depth)
            .field("policy", &self.options.policy)
            .field("capacity", &self.options.capacity)
            .field("count", &self.index.count)
            .field("next", &self.next)
            .finish()
    }
}
