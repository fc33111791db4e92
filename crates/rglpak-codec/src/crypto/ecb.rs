use aes::Aes256;
use cipher::{BlockDecrypt, KeyInit};

/// AES-256-ECB decryption over the archive-wide key.
///
/// The archive's encrypted regions (entry table, name table) are always a multiple of 16
/// bytes by construction, but per-file payloads carry their encoded length exactly. The
/// original tool decrypts block-by-block and leaves a short trailing remainder untouched
/// rather than padding or discarding it; this type preserves that behavior bit-for-bit.
pub struct EcbCipher {
    cipher: Aes256,
}

impl EcbCipher {
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            cipher: Aes256::new(key.into()),
        }
    }

    /// Decrypts `data`, returning a buffer of the same length.
    ///
    /// Every full 16-byte block is decrypted independently. A trailing remainder shorter
    /// than 16 bytes is copied through unchanged.
    pub fn decrypt(&self, data: &[u8]) -> Vec<u8> {
        let full_len = data.len() - data.len() % 16;
        let mut out = vec![0u8; data.len()];

        for chunk_start in (0..full_len).step_by(16) {
            let mut block = aes::Block::clone_from_slice(&data[chunk_start..chunk_start + 16]);
            self.cipher.decrypt_block(&mut block);
            out[chunk_start..chunk_start + 16].copy_from_slice(&block);
        }

        out[full_len..].copy_from_slice(&data[full_len..]);
        out
    }
}
