use std::collections::BTreeMap;
use std::fs;
use std::io::Read as _;
use std::path::Path;

use flate2::read::DeflateDecoder;
use thiserror::Error;

use crate::crypto::EcbCipher;
use crate::cursor::{ByteReader, CursorError};

use super::entry::EntryVariant;
use super::header::HeaderError;
use super::{PackEntry, PackHeader};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Header(#[from] HeaderError),
    #[error(transparent)]
    Cursor(#[from] CursorError),
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    #[error("archive is not ready for reading")]
    NotReadable,
    #[error("cannot extract a directory or resource entry")]
    CannotExtract,
    #[error("directory entry {index} references an out-of-bounds child range")]
    MalformedDirectoryTree { index: usize },
}

/// A fully decoded RPF7 package: header, entry table, and name table, all read into memory
/// up front (payloads are extracted lazily, entry by entry).
pub struct Archive {
    buffer: Vec<u8>,
    header: PackHeader,
    entries: Vec<PackEntry>,
    names: Vec<u8>,
    readable: bool,
}

impl Archive {
    /// Reads `path` fully into memory, validates the header, and decrypts the entry table
    /// and name table. Any failure here leaves no archive object visible to the caller.
    pub fn open(path: &Path, cipher: &EcbCipher) -> Result<Self, ArchiveError> {
        let buffer = fs::read(path)?;

        let header = {
            let mut reader = ByteReader::new(&buffer);
            PackHeader::read(&mut reader)?
        };

        // The header occupies the first 16 bytes; entry table and name table follow.
        let mut reader = ByteReader::new(&buffer);
        reader.set_offset(16);

        let encrypted_entries = reader.read(header.entry_count as usize * 16)?;
        let decrypted_entries = cipher.decrypt(encrypted_entries);
        let mut entries = Vec::with_capacity(header.entry_count as usize);
        let mut entry_reader = ByteReader::new(&decrypted_entries);
        for _ in 0..header.entry_count {
            entries.push(PackEntry::read(&mut entry_reader)?);
        }

        let encrypted_names = reader.read(header.names_length as usize)?;
        let names = cipher.decrypt(encrypted_names);

        Ok(Self {
            buffer,
            header,
            entries,
            names,
            readable: true,
        })
    }

    pub fn header(&self) -> &PackHeader {
        &self.header
    }

    pub fn entries(&self) -> &[PackEntry] {
        &self.entries
    }

    /// Scans the name table from `entry.name_offset` to the next NUL byte. Returns an empty
    /// string if the scan would run past `names_length` (this is how the root entry's empty
    /// name is represented, not an error).
    fn entry_name(&self, entry: &PackEntry) -> String {
        let start = entry.name_offset as usize;
        let mut end = start;

        loop {
            if end >= self.header.names_length as usize || end >= self.names.len() {
                return String::new();
            }
            if self.names[end] == 0 {
                break;
            }
            end += 1;
        }

        String::from_utf8_lossy(&self.names[start..end]).into_owned()
    }

    /// Builds the map from entry index to backslash-separated logical path by a depth-first
    /// walk of the directory tree rooted at entry 0.
    ///
    /// The traversal is bounded to `entry_count` steps: the archive namespace is a tree by
    /// construction, but a maliciously crafted archive could otherwise cause unbounded work
    /// via a directory whose child range overlaps itself.
    pub fn build_path_map(&self) -> Result<BTreeMap<usize, String>, ArchiveError> {
        if !self.readable {
            return Err(ArchiveError::NotReadable);
        }

        let mut path_map = BTreeMap::new();

        if self.entries.is_empty() {
            return Ok(path_map);
        }

        let mut stack = vec![0usize];
        let mut steps = 0usize;

        while let Some(index) = stack.pop() {
            steps += 1;
            if steps > self.entries.len() {
                return Err(ArchiveError::MalformedDirectoryTree { index });
            }

            let entry = &self.entries[index];
            let parent_name = self.entry_name(entry);

            let EntryVariant::Directory {
                child_start_index,
                child_count,
            } = entry.variant()
            else {
                continue;
            };

            let end = child_start_index as u64 + child_count as u64;
            if end > self.entries.len() as u64 {
                return Err(ArchiveError::MalformedDirectoryTree { index });
            }

            for child_index in child_start_index as usize..end as usize {
                let child = &self.entries[child_index];
                let child_name = self.entry_name(child);

                let path = if parent_name.is_empty() {
                    child_name
                } else {
                    format!("{parent_name}\\{child_name}")
                };
                path_map.insert(child_index, path);

                if child.is_directory() {
                    stack.push(child_index);
                }
            }
        }

        Ok(path_map)
    }

    /// Reads and, if necessary, decrypts and inflates the payload of the binary entry at
    /// `index`. Fails with [`ArchiveError::CannotExtract`] for directory or resource
    /// entries.
    pub fn extract_entry(&self, index: usize, cipher: &EcbCipher) -> Result<Vec<u8>, ArchiveError> {
        if !self.readable {
            return Err(ArchiveError::NotReadable);
        }

        let entry = &self.entries[index];
        let EntryVariant::Binary {
            uncompressed_size,
            decryption_flag,
        } = entry.variant()
        else {
            return Err(ArchiveError::CannotExtract);
        };

        let read_size = if entry.on_disk_size == 0 {
            uncompressed_size
        } else {
            entry.on_disk_size
        } as usize;

        let mut reader = ByteReader::new(&self.buffer);
        reader.set_offset(entry.offset as usize);
        let mut content = reader.read(read_size)?.to_vec();

        if decryption_flag {
            content = cipher.decrypt(&content);
        }

        if entry.on_disk_size > 0 {
            let mut decompressed = vec![0u8; uncompressed_size as usize];
            let mut inflater = DeflateDecoder::new(content.as_slice());
            inflater.read_exact(&mut decompressed)?;
            content = decompressed;
        }

        Ok(content)
    }

    /// Extracts every binary entry to `out_dir`, mirroring the archive's logical paths.
    /// Directory and resource entries are skipped.
    pub fn extract_all(&self, out_dir: &Path, cipher: &EcbCipher) -> Result<(), ArchiveError> {
        let path_map = self.build_path_map()?;

        for (&index, logical_path) in &path_map {
            let entry = &self.entries[index];
            if !matches!(entry.variant(), EntryVariant::Binary { .. }) {
                continue;
            }

            tracing::debug!(path = %logical_path, "extracting pack entry");

            let mut content = self.extract_entry(index, cipher)?;
            let mut native_path = out_dir.join(logical_path.replace('\\', std::path::MAIN_SEPARATOR_STR));

            if native_path.extension().is_none() {
                let extension = sniff_extension(&content);
                native_path.set_extension(extension);
            }

            if let Some(parent) = native_path.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::write(&native_path, &mut content)?;
        }

        Ok(())
    }
}

/// Guesses a file extension from the decoded bytes of an extensionless entry.
fn sniff_extension(content: &[u8]) -> &'static str {
    let has = |range: std::ops::Range<usize>, needle: &[u8]| content.get(range).is_some_and(|s| s == needle);

    if has(1..4, b"PNG") || has(6..10, b"Exif") {
        "png"
    } else if has(0..3, b"GIF") {
        "gif"
    } else {
        "bin"
    }
}
