//! Level Module
//!
//! The chain of levels making up the tree.
//!
//! ```text
//! MemoryLevel (0)   capacity C          Vec<Record>
//!      │ flush when full
//!      ▼
//! DiskLevel  (1)    capacity C·R        lsm.{C·R}.key / .dat
//!      │ flush when full
//!      ▼
//! DiskLevel  (2)    capacity C·R²       created on first overflow
//!      ⋮
//! ```
//!
//! Lookups walk the chain from the top and stop at the first hit, so a
//! newer value always shadows an older one deeper down.

mod disk;
mod fence;
mod memory;

pub use disk::{DiskLevel, LevelOptions};
pub use fence::{Fence, FencePosts};
pub use memory::MemoryLevel;
