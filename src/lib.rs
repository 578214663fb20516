//! # levelkv
//!
//! An embeddable log-structured merge tree with:
//! - A bounded in-memory top level absorbing every write
//! - A lazily grown chain of disk levels, each `ratio` times larger
//! - Leveling (one sorted run per level) or tiering (appended runs) compaction
//! - Per-level bloom filters and fence posts to skip needless reads
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Store                              │
//! │              (put / get / contains / dump)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    MemoryLevel (0)                          │
//! │          sorted Vec (leveling) / append Vec (tiering)       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ flush when full
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    DiskLevel (1..)                          │
//! │   BloomFilter ─ FencePosts ─ lsm.NNNN.key / lsm.NNNN.dat    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ flush when full
//!                       ▼
//!                      ...
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use levelkv::{CompactionPolicy, Config, Store};
//!
//! let config = Config::builder()
//!     .data_dir("/tmp/levelkv")
//!     .policy(CompactionPolicy::Tiering)
//!     .top_level_size(1024)
//!     .build();
//!
//! let mut store = Store::open(config)?;
//! store.put(42, "answer")?;
//! assert_eq!(store.get(42)?, Some("answer".to_string()));
//! # Ok::<(), levelkv::LsmError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod types;

pub mod bloom;
pub mod storage;
pub mod search;
pub mod level;
pub mod store;
pub mod workload;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LsmError, Result};
pub use config::{CompactionPolicy, Config};
pub use store::Store;
pub use types::{Key, Record, Value, VALUE_LEN};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of levelkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
