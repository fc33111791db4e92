use super::*;

#[test]
fn zero_key_cbc_round_trip() {
    use ::cbc::cipher::block_padding::NoPadding;
    use ::cbc::cipher::{BlockEncryptMut, KeyIvInit};

    type Aes256CbcEnc = ::cbc::Encryptor<aes::Aes256>;

    let plaintext = b"padding{\"a\":1}padding-pad-pad!!"; // 32 bytes
    assert_eq!(plaintext.len() % 16, 0);

    let mut buffer = plaintext.to_vec();
    let encryptor = Aes256CbcEnc::new(&[0u8; 32].into(), &[0u8; 16].into());
    let ciphertext_len = encryptor
        .encrypt_padded_mut::<NoPadding>(&mut buffer, plaintext.len())
        .unwrap()
        .len();
    buffer.truncate(ciphertext_len);

    let decrypted = decrypt_cbc_zero(&buffer);
    assert_eq!(decrypted, plaintext);
}
