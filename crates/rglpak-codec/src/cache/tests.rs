use super::*;

#[test]
fn round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.bin");

    let record = CacheRecord {
        hash: [0xAB; 20],
        key: [0xCD; 32],
    };
    record.save(&path).unwrap();

    let loaded = CacheRecord::load(&path).unwrap();
    assert_eq!(loaded.hash, record.hash);
    assert_eq!(loaded.key, record.key);
}

#[test]
fn rejects_wrong_magic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.bin");

    let mut content = vec![b'X', b'X', b'X', b'X', CACHE_VERSION];
    content.extend_from_slice(&[0u8; 52]);
    fs::write(&path, content).unwrap();

    assert!(matches!(CacheRecord::load(&path), Err(CacheError::ClearCache)));
}

#[test]
fn rejects_short_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.bin");
    fs::write(&path, b"REcf\x01short").unwrap();

    assert!(matches!(CacheRecord::load(&path), Err(CacheError::ClearCache)));
}

#[test]
fn rejects_wrong_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.bin");

    let mut content = Vec::new();
    content.extend_from_slice(CACHE_MAGIC);
    content.push(2);
    content.extend_from_slice(&[0u8; 52]);
    fs::write(&path, content).unwrap();

    assert!(matches!(CacheRecord::load(&path), Err(CacheError::ClearCache)));
}
