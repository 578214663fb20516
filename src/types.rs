//! Key and value types
//!
//! Keys are fixed-width signed integers. Values are fixed-length byte
//! buffers holding a NUL-terminated string, so every record has the same
//! width in memory and on disk.

use std::fmt;
use std::str::FromStr;

use crate::error::{LsmError, Result};

/// Length of a value slot in bytes (including the NUL terminator)
pub const VALUE_LEN: usize = 20;

/// The key type
pub type Key = i32;

/// A fixed-length value
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Value([u8; VALUE_LEN]);

impl Value {
    /// Wrap raw bytes read back from storage
    pub fn from_bytes(bytes: [u8; VALUE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; VALUE_LEN] {
        &self.0
    }

    /// The string up to the first NUL byte
    pub fn as_string(&self) -> String {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(VALUE_LEN);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl FromStr for Value {
    type Err = LsmError;

    /// Strings of `VALUE_LEN` bytes or more, or with a NUL byte anywhere,
    /// are rejected; the rest are NUL-terminated and zero-padded.
    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() >= VALUE_LEN {
            return Err(LsmError::ValueTooLong {
                len: bytes.len(),
                max: VALUE_LEN - 1,
            });
        }
        if let Some(position) = bytes.iter().position(|&b| b == 0) {
            return Err(LsmError::ValueContainsNul { position });
        }
        let mut buf = [0u8; VALUE_LEN];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(buf))
    }
}

impl Default for Value {
    fn default() -> Self {
        Self([0u8; VALUE_LEN])
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({:?})", self.as_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

/// A key/value pair, the unit every level stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub key: Key,
    pub value: Value,
}

impl Record {
    pub fn new(key: Key, value: Value) -> Self {
        Self { key, value }
    }
}
