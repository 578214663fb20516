//! Fence posts
//!
//! A disk level is cut into `ratio` equally sized regions by record
//! position. Each region keeps the min and max key physically stored in it,
//! so a lookup can skip every region whose range excludes the key.

use std::fmt;
use std::ops::Range;

use crate::types::Key;

/// Key bounds of one region. Empty regions have `min > max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    pub min: Key,
    pub max: Key,
}

impl Fence {
    pub const EMPTY: Fence = Fence {
        min: Key::MAX,
        max: Key::MIN,
    };

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, key: Key) -> bool {
        self.min <= key && key <= self.max
    }

    fn include(&mut self, key: Key) {
        self.min = self.min.min(key);
        self.max = self.max.max(key);
    }
}

impl fmt::Display for Fence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("[empty]")
        } else {
            write!(f, "[{}, {}]", self.min, self.max)
        }
    }
}

/// Per-region key bounds for one level
#[derive(Debug, Clone)]
pub struct FencePosts {
    fences: Vec<Fence>,
    region_size: usize,
}

impl FencePosts {
    /// `region_count` regions of `region_size` records each, all empty
    pub fn new(region_count: usize, region_size: usize) -> Self {
        assert!(region_size > 0, "region_size must be > 0");
        Self {
            fences: vec![Fence::EMPTY; region_count],
            region_size,
        }
    }

    /// Widen the fence of the region holding position `pos` to cover `key`
    pub fn include(&mut self, pos: usize, key: Key) {
        let region = pos / self.region_size;
        self.fences[region].include(key);
    }

    /// Reset every region to empty
    pub fn clear(&mut self) {
        self.fences.fill(Fence::EMPTY);
    }

    /// Regions whose bounds contain `key`, in ascending region order
    pub fn candidates(&self, key: Key) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.fences
            .iter()
            .enumerate()
            .filter(move |(_, fence)| fence.contains(key))
            .map(|(region, _)| region)
    }

    /// Record positions covered by `region`, clamped to `count` live records
    pub fn region_range(&self, region: usize, count: usize) -> Range<usize> {
        let start = (region * self.region_size).min(count);
        let end = ((region + 1) * self.region_size).min(count);
        start..end
    }

    pub fn fences(&self) -> &[Fence] {
        &self.fences
    }

    pub fn region_count(&self) -> usize {
        self.fences.len()
    }

    pub fn region_size(&self) -> usize {
        self.region_size
    }
}
