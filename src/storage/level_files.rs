//! Level files
//!
//! The key file and value file backing one disk level, plus the staging
//! pair a leveling merge writes into before swapping it over the live pair.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{Key, Value};

use super::FixedWidthFile;

/// Suffix of the key file
const KEY_EXT: &str = "key";
/// Suffix of the value file
const VALUE_EXT: &str = "dat";
/// Extra suffix of staging files
const STAGING_EXT: &str = "tmp";

/// Parallel key and value files; record `i` is `(keys[i], values[i])`
#[derive(Debug)]
pub struct LevelFiles {
    pub keys: FixedWidthFile<Key>,
    pub values: FixedWidthFile<Value>,
}

impl LevelFiles {
    /// Create (truncating) the live files for the level with `capacity`
    pub fn create(dir: &Path, capacity: usize) -> Result<Self> {
        Self::open_pair(
            &Self::key_path(dir, capacity),
            &Self::value_path(dir, capacity),
            true,
        )
    }

    /// Open fresh, empty staging files next to the live ones.
    ///
    /// Nothing written to the staging pair is visible through `self` until
    /// [`commit`](Self::commit) succeeds.
    pub fn stage(&self) -> Result<LevelFiles> {
        Self::open_pair(
            &staging_path(self.keys.path()),
            &staging_path(self.values.path()),
            true,
        )
    }

    /// Atomically replace the live files with `staged`.
    ///
    /// The staged pair is synced and closed, renamed over the live paths,
    /// and the live handles are reopened on the new content.
    pub fn commit(&mut self, staged: LevelFiles) -> Result<()> {
        staged.keys.sync()?;
        staged.values.sync()?;

        let staged_keys = staged.keys.path().to_path_buf();
        let staged_values = staged.values.path().to_path_buf();
        drop(staged);

        let live_keys = self.keys.path().to_path_buf();
        let live_values = self.values.path().to_path_buf();

        fs::rename(&staged_keys, &live_keys)?;
        self.keys = FixedWidthFile::open(&live_keys, false)?;

        fs::rename(&staged_values, &live_values)?;
        self.values = FixedWidthFile::open(&live_values, false)?;

        Ok(())
    }

    /// Path of the key file for the level with `capacity`
    /// `"{dir}/lsm.0004.key"`
    pub fn key_path(dir: &Path, capacity: usize) -> PathBuf {
        dir.join(format!("lsm.{:04}.{}", capacity, KEY_EXT))
    }

    /// Path of the value file for the level with `capacity`
    /// `"{dir}/lsm.0004.dat"`
    pub fn value_path(dir: &Path, capacity: usize) -> PathBuf {
        dir.join(format!("lsm.{:04}.{}", capacity, VALUE_EXT))
    }

    fn open_pair(key_path: &Path, value_path: &Path, truncate: bool) -> Result<Self> {
        Ok(Self {
            keys: FixedWidthFile::open(key_path, truncate)?,
            values: FixedWidthFile::open(value_path, truncate)?,
        })
    }
}

/// "lsm.0004.key" → "lsm.0004.key.tmp"
pub fn staging_path(live: &Path) -> PathBuf {
    let mut name = live.as_os_str().to_os_string();
    name.push(".");
    name.push(STAGING_EXT);
    PathBuf::from(name)
}
