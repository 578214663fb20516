//! Memory level
//!
//! Level 0 of the tree: a bounded in-memory buffer that absorbs every put
//! and is flushed into the first disk level whenever it fills up.

use crate::config::{CompactionPolicy, Config};
use crate::error::Result;
use crate::search;
use crate::storage::{MemReader, MemView};
use crate::types::{Key, Record, Value};

use super::disk::{DiskLevel, LevelOptions};

#[derive(Debug)]
pub struct MemoryLevel {
    policy: CompactionPolicy,
    capacity: usize,
    ratio: usize,
    /// Sorted by key under leveling (newest first among equal keys),
    /// insertion order under tiering
    records: Vec<Record>,
    /// Shape of the first disk level, used when it gets created
    first_disk: LevelOptions,
    next: Option<Box<DiskLevel>>,
}

impl MemoryLevel {
    pub fn new(config: &Config) -> Self {
        let first_disk = LevelOptions {
            data_dir: config.data_dir.clone(),
            policy: config.policy,
            page_size: config.top_level_size,
            capacity: config.top_level_size * config.size_ratio,
            ratio: config.size_ratio,
            bloom_bits: config.bloom_bits,
            bloom_hashes: config.bloom_hashes,
        };

        Self {
            policy: config.policy,
            capacity: config.top_level_size,
            ratio: config.size_ratio,
            records: Vec::with_capacity(config.top_level_size),
            first_disk,
            next: None,
        }
    }

    /// Buffer a record, flushing the level first if it is full
    pub fn put(&mut self, record: Record) -> Result<()> {
        if self.records.len() == self.capacity {
            self.flush()?;
        }

        match self.policy {
            CompactionPolicy::Leveling => {
                let pos = self.records.partition_point(|r| r.key < record.key);
                self.records.insert(pos, record);
            }
            CompactionPolicy::Tiering => self.records.push(record),
        }
        Ok(())
    }

    /// Newest value for `key` here or in any disk level
    pub fn get(&self, key: Key) -> Result<Option<Value>> {
        let view = MemView::new(&self.records);
        let found = match self.policy {
            CompactionPolicy::Leveling => search::binary_search(&view, key)?,
            CompactionPolicy::Tiering => search::linear_search(&view, key)?,
        };

        match (found, &self.next) {
            (Some(value), _) => Ok(Some(value)),
            (None, Some(next)) => next.get(key),
            (None, None) => Ok(None),
        }
    }

    fn flush(&mut self) -> Result<()> {
        if self.next.is_none() {
            let level = DiskLevel::create(1, self.first_disk.clone())?;
            self.next = Some(Box::new(level));
        }

        tracing::debug!("Flushing memory level ({} records)", self.records.len());

        if let Some(next) = self.next.as_mut() {
            let count = self.records.len();
            next.merge(&mut MemReader::new(&self.records), count)?;
        }

        self.records.clear();
        Ok(())
    }

    /// Records held in memory and on disk
    pub fn count(&self) -> usize {
        self.records.len() + self.next.as_ref().map_or(0, |next| next.count())
    }

    /// Records held in memory
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// First disk level, once the memory level has flushed at least once
    pub fn next(&self) -> Option<&DiskLevel> {
        self.next.as_deref()
    }

    /// Human-readable description of the whole tree, one header per level.
    /// `verbose` adds fence posts and every stored record.
    pub fn dump(&self, verbose: bool) -> Result<String> {
        let mut out = format!(
            "MemoryLevel 0 {} capacity: {} ratio: {} count: {} total: {}\n",
            self.policy,
            self.capacity,
            self.ratio,
            self.records.len(),
            self.count()
        );

        if verbose {
            for record in &self.records {
                out.push_str(&format!("  {}=\"{}\"\n", record.key, record.value));
            }
        }

        if let Some(next) = &self.next {
            next.dump(verbose, &mut out)?;
        }
        Ok(out)
    }
}
