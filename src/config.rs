//! Configuration for levelkv
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{LsmError, Result};

/// Main configuration for a levelkv store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory for all level files.
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── lsm.0004.key     (keys of the disk level with capacity 4)
    ///     ├── lsm.0004.dat     (values of the same level)
    ///     └── ...              (one pair per disk level)
    pub data_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Tree Shape
    // -------------------------------------------------------------------------
    /// Compaction policy shared by every level
    pub policy: CompactionPolicy,

    /// Capacity of the memory level (records). Also used as the page size
    /// for buffered disk I/O.
    pub top_level_size: usize,

    /// Capacity ratio between adjacent levels
    pub size_ratio: usize,

    // -------------------------------------------------------------------------
    // Bloom Filter Configuration
    // -------------------------------------------------------------------------
    /// Number of bits in each disk level's bloom filter
    pub bloom_bits: u64,

    /// Number of hash functions per bloom filter
    pub bloom_hashes: u32,
}

/// How a disk level absorbs data merged into it from above
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactionPolicy {
    /// Every level is one fully sorted run; merges are sorted merges.
    Leveling,

    /// Incoming runs are appended as-is; a level holds several runs.
    Tiering,
}

impl CompactionPolicy {
    pub fn is_leveling(self) -> bool {
        matches!(self, CompactionPolicy::Leveling)
    }
}

impl fmt::Display for CompactionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompactionPolicy::Leveling => f.write_str("leveling"),
            CompactionPolicy::Tiering => f.write_str("tiering"),
        }
    }
}

impl FromStr for CompactionPolicy {
    type Err = LsmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "leveling" => Ok(CompactionPolicy::Leveling),
            "tiering" => Ok(CompactionPolicy::Tiering),
            other => Err(LsmError::Config(format!(
                "unknown compaction policy '{}', expected 'leveling' or 'tiering'",
                other
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./levelkv_data"),
            policy: CompactionPolicy::Leveling,
            top_level_size: 1024,
            size_ratio: 4,
            bloom_bits: 128 * 1024,
            bloom_hashes: 4,
        }
    }
}

impl Config {
    /// Positional constructor matching the tree parameters; the data
    /// directory keeps its default.
    pub fn new(
        policy: CompactionPolicy,
        top_level_size: usize,
        size_ratio: usize,
        bloom_bits: u64,
        bloom_hashes: u32,
    ) -> Self {
        Self {
            policy,
            top_level_size,
            size_ratio,
            bloom_bits,
            bloom_hashes,
            ..Self::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject parameters the level arithmetic cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.top_level_size == 0 {
            return Err(LsmError::Config("top_level_size must be > 0".to_string()));
        }
        // Level files are named by capacity, so every level must grow
        if self.size_ratio < 2 {
            return Err(LsmError::Config("size_ratio must be >= 2".to_string()));
        }
        if self.bloom_bits == 0 {
            return Err(LsmError::Config("bloom_bits must be > 0".to_string()));
        }
        if self.bloom_hashes == 0 {
            return Err(LsmError::Config("bloom_hashes must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all level files)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the compaction policy
    pub fn policy(mut self, policy: CompactionPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Set the memory level capacity (in records)
    pub fn top_level_size(mut self, size: usize) -> Self {
        self.config.top_level_size = size;
        self
    }

    /// Set the size ratio between adjacent levels
    pub fn size_ratio(mut self, ratio: usize) -> Self {
        self.config.size_ratio = ratio;
        self
    }

    /// Set the number of bloom filter bits per level
    pub fn bloom_bits(mut self, bits: u64) -> Self {
        self.config.bloom_bits = bits;
        self
    }

    /// Set the number of bloom filter hash functions
    pub fn bloom_hashes(mut self, hashes: u32) -> Self {
        self.config.bloom_hashes = hashes;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
