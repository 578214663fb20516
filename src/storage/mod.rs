//! Storage Module
//!
//! File and buffer plumbing shared by every disk level.
//!
//! ## Responsibilities
//! - Fixed-width record files addressed by record index
//! - The key/value file pair of a level, with staged replacement
//! - Sequential readers feeding merges (memory or file backed)
//! - Page-buffered appends producing merge output
//! - Random-access views for searches (memory or file backed)
//!
//! ## File Format
//! ```text
//! lsm.NNNN.key                    lsm.NNNN.dat
//! ┌──────────────┐                ┌──────────────────────┐
//! │ key 0  (i32) │  ◄── pos 0 ──► │ value 0  (20 bytes)  │
//! ├──────────────┤                ├──────────────────────┤
//! │ key 1  (i32) │  ◄── pos 1 ──► │ value 1  (20 bytes)  │
//! ├──────────────┤                ├──────────────────────┤
//! │ ...          │                │ ...                  │
//! └──────────────┘                └──────────────────────┘
//! ```
//! Little-endian keys, NUL-padded values. No header, no checksum: the
//! files only live as long as the store that wrote them.

mod file;
mod level_files;
mod reader;
mod view;
mod writer;

pub use file::{FixedWidth, FixedWidthFile};
pub use level_files::{staging_path, LevelFiles};
pub use reader::{advance, FileReader, MemReader, SequentialReader};
pub use view::{FileView, MemView, RandomAccessView};
pub use writer::BufferedWriter;
