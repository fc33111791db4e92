//! Recovers the AES-256 key embedded in the launcher executable, with a SHA-1-keyed cache
//! so subsequent runs over an unchanged executable skip the scan entirely.

use std::fs;
use std::path::Path;

use sha1::{Digest, Sha1};
use thiserror::Error;

use crate::cache::CacheRecord;
use crate::cursor::ByteReader;

/// SHA-1 of the 32-byte AES key embedded in the launcher executable.
const AES_KEY_HASH: [u8; 20] = [
    0x0E, 0x6B, 0x42, 0x74, 0x7E, 0xDF, 0x51, 0xDC, 0xE7, 0x8E, 0xD0, 0xA0, 0xA8, 0xFB, 0x22, 0xE9, 0x71, 0xC3, 0x16,
    0x83,
];

/// Byte stride between successive 32-byte scan windows.
///
/// Overlapping by design: the windows are 32 bytes wide but the scan only advances 8 bytes
/// per step. Do not "optimize" this to a 32-byte, non-overlapping stride — it changes which
/// executables the scan can find the key in.
const SCAN_STEP: usize = 8;
const KEY_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("launcher.exe does not exist")]
    NoExecutable,
    #[error("failed to find encryption keys in launcher.exe")]
    NoEncryptionKeys,
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Recovers the archive-wide AES-256 key for a launcher installation rooted at `install_root`.
///
/// `cache_path` is injectable so tests and alternate front-ends can point it at a scratch
/// location instead of always using the current working directory's `cache.bin`.
pub fn recover_key(install_root: &Path, cache_path: &Path) -> Result<[u8; 32], KeyError> {
    let executable = fs::read(install_root.join("launcher.exe")).map_err(|_| KeyError::NoExecutable)?;

    let mut hasher = Sha1::new();
    hasher.update(&executable);
    let current_hash: [u8; 20] = hasher.finalize().into();

    if let Ok(cache) = CacheRecord::load(cache_path) {
        if cache.hash == current_hash {
            return Ok(cache.key);
        }
    }

    let key = scan_for_key(&executable, &AES_KEY_HASH)?;

    let fresh = CacheRecord { hash: current_hash, key };
    if let Err(err) = fresh.save(cache_path) {
        tracing::warn!(%err, "failed to save key-recovery cache, continuing without it");
    }

    Ok(key)
}

fn scan_for_key(executable: &[u8], fingerprint: &[u8; 20]) -> Result<[u8; 32], KeyError> {
    let mut reader = ByteReader::new(executable);
    let mut offset = 0usize;

    loop {
        reader.set_offset(offset);
        let window = match reader.read(KEY_LEN) {
            Ok(window) => window,
            Err(_) => return Err(KeyError::NoEncryptionKeys),
        };

        let mut hasher = Sha1::new();
        hasher.update(window);
        let digest: [u8; 20] = hasher.finalize().into();

        if &digest == fingerprint {
            let mut key = [0u8; 32];
            key.copy_from_slice(window);
            return Ok(key);
        }

        offset += SCAN_STEP;
    }
}
