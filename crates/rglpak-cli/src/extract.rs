use std::path::{Path, PathBuf};

use rglpak_codec::crypto::EcbCipher;
use rglpak_codec::{recover_key, Archive};

use crate::CliError;

/// Extracts every `.rpf` file found directly under `install_root` into `out_dir`.
///
/// Mirrors the source tool's assumption that pack files live only in the installation
/// root, not nested subdirectories. A failure aborts extraction of the archive in which it
/// occurred — already-written files from that archive remain on disk — but later `.rpf`
/// files still run.
pub fn run(install_root: &Path, out_dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(out_dir)?;

    let cache_path = PathBuf::from("cache.bin");
    let key = recover_key(install_root, &cache_path)?;
    let cipher = EcbCipher::new(&key);

    for entry in std::fs::read_dir(install_root)? {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("rpf") {
            continue;
        }

        tracing::info!(path = %path.display(), "extracting pack file");
        if let Err(err) = extract_one(&path, out_dir, &cipher) {
            tracing::error!(path = %path.display(), %err, "failed to extract pack file, skipping");
        }
    }

    Ok(())
}

fn extract_one(path: &Path, out_dir: &Path, cipher: &EcbCipher) -> Result<(), rglpak_codec::ArchiveError> {
    let archive = Archive::open(path, cipher)?;
    archive.extract_all(out_dir, cipher)
}
