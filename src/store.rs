//! Store Module
//!
//! The public face of the tree.
//!
//! ## Responsibilities
//! - Validate the configuration and prepare the data directory
//! - Convert string values to fixed-width values on the way in and back out
//! - Route puts and gets to the memory level, which owns the disk chain

use std::fs;
use std::path::PathBuf;

use crate::config::{CompactionPolicy, Config};
use crate::error::Result;
use crate::level::{DiskLevel, MemoryLevel};
use crate::types::{Key, Record, Value};

/// A single-threaded LSM key-value store
///
/// Every operation runs to completion before returning: a put that fills
/// the memory level finishes the whole flush cascade first, so the next
/// get sees a consistent tree.
#[derive(Debug)]
pub struct Store {
    config: Config,
    memory: MemoryLevel,
}

impl Store {
    /// Open a store with the given config.
    ///
    /// Level files are always created fresh: anything left in `data_dir`
    /// by a previous store with the same level capacities is truncated.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        fs::create_dir_all(&config.data_dir)?;

        tracing::debug!(
            "Opening {} store in {} (top level {}, ratio {}, bloom {} bits / {} hashes)",
            config.policy,
            config.data_dir.display(),
            config.top_level_size,
            config.size_ratio,
            config.bloom_bits,
            config.bloom_hashes
        );

        let memory = MemoryLevel::new(&config);
        Ok(Self { config, memory })
    }

    /// Positional form of [`open`](Self::open)
    pub fn new(
        policy: CompactionPolicy,
        top_level_size: usize,
        size_ratio: usize,
        bloom_bits: u64,
        bloom_hashes: u32,
        data_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let config = Config {
            data_dir: data_dir.into(),
            ..Config::new(policy, top_level_size, size_ratio, bloom_bits, bloom_hashes)
        };
        Self::open(config)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Insert or overwrite `key`.
    ///
    /// Fails with `ValueTooLong` or `ValueContainsNul` before touching the
    /// tree if `value` does not fit in a fixed-width value.
    pub fn put(&mut self, key: Key, value: &str) -> Result<()> {
        let value: Value = value.parse()?;
        self.memory.put(Record::new(key, value))
    }

    /// Most recently put value for `key`
    pub fn get(&self, key: Key) -> Result<Option<String>> {
        Ok(self.memory.get(key)?.map(|value| value.as_string()))
    }

    pub fn contains(&self, key: Key) -> Result<bool> {
        Ok(self.memory.get(key)?.is_some())
    }

    /// Total records inserted, duplicates included
    pub fn count(&self) -> usize {
        self.memory.count()
    }

    /// Per-level summary; `verbose` lists fences and every record
    pub fn dump(&self, verbose: bool) -> Result<String> {
        self.memory.dump(verbose)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn memory_level(&self) -> &MemoryLevel {
        &self.memory
    }

    /// Number of levels in the chain, the memory level included
    pub fn level_count(&self) -> usize {
        let mut levels = 1;
        let mut level: Option<&DiskLevel> = self.memory.next();
        while let Some(current) = level {
            levels += 1;
            level = current.next();
        }
        levels
    }
}
