use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockEncryptMut, KeyIvInit};

use super::*;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

fn encrypt_cbc_zero(plaintext: &[u8]) -> Vec<u8> {
    assert_eq!(plaintext.len() % 16, 0);
    let mut buffer = plaintext.to_vec();
    let encryptor = Aes256CbcEnc::new(&[0u8; 32].into(), &[0u8; 16].into());
    let len = encryptor
        .encrypt_padded_mut::<NoPadding>(&mut buffer, plaintext.len())
        .unwrap()
        .len();
    buffer.truncate(len);
    buffer
}

fn build_title_file(plaintext: &[u8]) -> Vec<u8> {
    let ciphertext = encrypt_cbc_zero(plaintext);

    let mut buffer = Vec::new();
    buffer.extend_from_slice(TITLE_MAGIC);
    buffer.extend_from_slice(&TITLE_VERSION.to_le_bytes());
    buffer.extend_from_slice(&(ciphertext.len() as u32).to_le_bytes());
    buffer.resize(DATA_OFFSET, 0);
    buffer.extend_from_slice(&ciphertext);
    buffer
}

#[test]
fn decodes_json_object_from_padded_payload() {
    let plaintext = b"noise---{\"name\":\"Some Title\"}---pad"; // 37 bytes, needs padding to 48
    let mut padded = plaintext.to_vec();
    padded.resize(48, b'!');

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.rgl");
    std::fs::write(&path, build_title_file(&padded)).unwrap();

    let decoded = decode_title(&path).unwrap();
    assert_eq!(decoded, "{\"name\":\"Some Title\"}");
}

#[test]
fn returns_empty_string_when_no_braces_found() {
    let plaintext = vec![b'x'; 32];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.rgl");
    std::fs::write(&path, build_title_file(&plaintext)).unwrap();

    let decoded = decode_title(&path).unwrap();
    assert_eq!(decoded, "");
}

#[test]
fn rejects_wrong_magic() {
    let mut bytes = build_title_file(&[0u8; 16]);
    bytes[0] = b'X';

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad-magic.rgl");
    std::fs::write(&path, bytes).unwrap();

    assert!(matches!(decode_title(&path), Err(TitleError::InvalidMagic)));
}

#[test]
fn rejects_length_beyond_file_size() {
    let mut bytes = build_title_file(&[0u8; 16]);
    bytes[8..12].copy_from_slice(&1_000_000u32.to_le_bytes());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad-length.rgl");
    std::fs::write(&path, bytes).unwrap();

    assert!(matches!(decode_title(&path), Err(TitleError::UnknownVersion)));
}

#[test]
fn rejects_short_read_at_data_offset_as_size_mismatch() {
    // Header declares a length that fits within the file, but the file is truncated
    // before the data region actually contains that many bytes.
    let mut bytes = build_title_file(&[0u8; 32]);
    bytes.truncate(DATA_OFFSET + 16);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.rgl");
    std::fs::write(&path, bytes).unwrap();

    assert!(matches!(decode_title(&path), Err(TitleError::SizeMismatch)));
}

#[test]
fn rejects_unknown_version() {
    let mut bytes = build_title_file(&[0u8; 16]);
    bytes[4..8].copy_from_slice(&2u32.to_le_bytes());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad-version.rgl");
    std::fs::write(&path, bytes).unwrap();

    assert!(matches!(decode_title(&path), Err(TitleError::UnknownVersion)));
}
