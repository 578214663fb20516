//! Fixed-width record files
//!
//! A file holding a flat array of same-sized records. Positions are record
//! indices; the byte offset is `pos * T::WIDTH`. There is no header.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{Key, Value, VALUE_LEN};

/// A type with a fixed-size binary encoding
pub trait FixedWidth: Sized {
    /// Encoded size in bytes
    const WIDTH: usize;

    /// Write exactly `WIDTH` bytes into `buf`
    fn encode(&self, buf: &mut [u8]);

    /// Read from exactly `WIDTH` bytes
    fn decode(buf: &[u8]) -> Self;
}

impl FixedWidth for Key {
    const WIDTH: usize = std::mem::size_of::<Key>();

    fn encode(&self, buf: &mut [u8]) {
        buf.copy_from_slice(&self.to_le_bytes());
    }

    fn decode(buf: &[u8]) -> Self {
        let mut bytes = [0u8; std::mem::size_of::<Key>()];
        bytes.copy_from_slice(buf);
        Key::from_le_bytes(bytes)
    }
}

impl FixedWidth for Value {
    const WIDTH: usize = VALUE_LEN;

    fn encode(&self, buf: &mut [u8]) {
        buf.copy_from_slice(self.as_bytes());
    }

    fn decode(buf: &[u8]) -> Self {
        let mut bytes = [0u8; VALUE_LEN];
        bytes.copy_from_slice(buf);
        Value::from_bytes(bytes)
    }
}

/// Random-access file of `T` records
///
/// Writes go straight to the OS; there is no user-space buffer here.
/// Buffering lives in [`BufferedWriter`](super::BufferedWriter) and
/// [`FileReader`](super::FileReader).
pub struct FixedWidthFile<T> {
    path: PathBuf,
    file: File,
    _record: PhantomData<T>,
}

impl<T: FixedWidth> FixedWidthFile<T> {
    /// Open (creating if needed) a file for reading and writing.
    ///
    /// With `truncate` any existing content is discarded.
    pub fn open(path: impl AsRef<Path>, truncate: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(truncate)
            .open(&path)?;

        Ok(Self {
            path,
            file,
            _record: PhantomData,
        })
    }

    /// Read the record at `pos`
    pub fn read_one(&self, pos: usize) -> Result<T> {
        let mut buf = vec![0u8; T::WIDTH];
        let mut file = &self.file;
        file.seek(SeekFrom::Start(Self::offset(pos)))?;
        file.read_exact(&mut buf)?;
        Ok(T::decode(&buf))
    }

    /// Read `count` records starting at `pos`
    pub fn read_range(&self, pos: usize, count: usize) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(count);
        self.read_range_into(pos, count, &mut out)?;
        Ok(out)
    }

    /// Read `count` records starting at `pos`, replacing the contents of `out`
    pub fn read_range_into(&self, pos: usize, count: usize, out: &mut Vec<T>) -> Result<()> {
        out.clear();
        if count == 0 {
            return Ok(());
        }

        let mut buf = vec![0u8; count * T::WIDTH];
        let mut file = &self.file;
        file.seek(SeekFrom::Start(Self::offset(pos)))?;
        file.read_exact(&mut buf)?;

        out.extend(buf.chunks_exact(T::WIDTH).map(T::decode));
        Ok(())
    }

    /// Overwrite the record at `pos`
    pub fn write_one(&mut self, value: &T, pos: usize) -> Result<()> {
        self.write_range(std::slice::from_ref(value), pos)
    }

    /// Overwrite `values.len()` records starting at `pos`
    pub fn write_range(&mut self, values: &[T], pos: usize) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        let mut buf = vec![0u8; values.len() * T::WIDTH];
        for (value, slot) in values.iter().zip(buf.chunks_exact_mut(T::WIDTH)) {
            value.encode(slot);
        }

        self.file.seek(SeekFrom::Start(Self::offset(pos)))?;
        self.file.write_all(&buf)?;
        self.file.flush()?;
        Ok(())
    }

    /// Force file contents to stable storage
    pub fn sync(&self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    /// Number of whole records currently in the file
    pub fn len(&self) -> Result<usize> {
        let bytes = self.file.metadata()?.len() as usize;
        Ok(bytes / T::WIDTH)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn offset(pos: usize) -> u64 {
        (pos * T::WIDTH) as u64
    }
}

impl<T> std::fmt::Debug for FixedWidthFile<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedWidthFile")
            .field("path", &self.path)
            .finish()
    }
}
