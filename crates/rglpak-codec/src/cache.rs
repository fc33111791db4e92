//! On-disk cache file that remembers a recovered AES key alongside the SHA-1 of the
//! launcher executable it was extracted from.

use std::fs;
use std::path::Path;

use thiserror::Error;

const CACHE_MAGIC: &[u8; 4] = b"REcf";
const CACHE_VERSION: u8 = 1;
const CACHE_MIN_LEN: usize = 4 + 1 + 20 + 32;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("I/O error accessing cache file")]
    Io(#[from] std::io::Error),
    #[error("cache file is stale or malformed")]
    ClearCache,
}

pub struct CacheRecord {
    pub hash: [u8; 20],
    pub key: [u8; 32],
}

impl CacheRecord {
    /// Loads and validates a cache file at `path`.
    ///
    /// Returns [`CacheError::ClearCache`] when the magic, version, or length don't match —
    /// the caller should treat this the same as "no cache" and fall back to a rescan.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        let content = fs::read(path)?;

        if content.len() < CACHE_MIN_LEN {
            return Err(CacheError::ClearCache);
        }

        if &content[0..4] != CACHE_MAGIC {
            return Err(CacheError::ClearCache);
        }

        if content[4] != CACHE_VERSION {
            return Err(CacheError::ClearCache);
        }

        let mut hash = [0u8; 20];
        hash.copy_from_slice(&content[5..25]);

        let mut key = [0u8; 32];
        key.copy_from_slice(&content[25..57]);

        Ok(Self { hash, key })
    }

    /// Writes this record to `path`, overwriting any existing file.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        let mut content = Vec::with_capacity(CACHE_MIN_LEN);
        content.extend_from_slice(CACHE_MAGIC);
        content.push(CACHE_VERSION);
        content.extend_from_slice(&self.hash);
        content.extend_from_slice(&self.key);

        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
