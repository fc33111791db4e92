use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Decrypts `data` under AES-256-CBC with an all-zero key and all-zero IV, as used for
/// `.rgl` title payloads.
///
/// `data.len()` must be a multiple of 16; the title container always carries an exact,
/// pre-validated `length`, so no padding is added or removed.
pub fn decrypt_cbc_zero(data: &[u8]) -> Vec<u8> {
    let key = [0u8; 32];
    let iv = [0u8; 16];

    let mut buffer = data.to_vec();
    let decryptor = Aes256CbcDec::new(&key.into(), &iv.into());
    let decrypted_len = decryptor
        .decrypt_padded_mut::<NoPadding>(&mut buffer)
        .expect("NoPadding never rejects a multiple-of-block-size buffer")
        .len();
    buffer.truncate(decrypted_len);
    buffer
}
