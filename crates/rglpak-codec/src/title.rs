//! Decoder for `.rgl` title-descriptor files: a small `RGLM`-tagged container whose payload
//! is AES-256-CBC encrypted under a fixed zero key/IV and holds a JSON object wrapped in
//! some amount of noise.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::crypto::decrypt_cbc_zero;
use crate::cursor::{ByteReader, CursorError};

const TITLE_MAGIC: &[u8; 4] = b"RGLM";
const TITLE_VERSION: u32 = 1;

/// Offset of the data region within the file.
// Hardcoded offset? The container has no field that derives this value; every sample file
// observed places the payload here regardless of header contents.
const DATA_OFFSET: usize = 0x50;

#[derive(Debug, Error)]
pub enum TitleError {
    #[error(transparent)]
    Cursor(#[from] CursorError),
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    #[error("not an RGLM title file")]
    InvalidMagic,
    #[error("unsupported title version")]
    UnknownVersion,
    #[error("declared payload length exceeds file size")]
    SizeMismatch,
}

/// Decodes the title descriptor at `path`, returning the JSON object found within it.
///
/// Returns an empty string if the decrypted payload contains no `{`/`}` pair — callers must
/// tolerate this rather than treat it as an error, since the trim is a heuristic over noisy
/// data, not a strict parse.
pub fn decode_title(path: &Path) -> Result<String, TitleError> {
    let buffer = fs::read(path)?;
    let mut reader = ByteReader::new(&buffer);

    let magic = reader.read(4)?;
    if magic != TITLE_MAGIC {
        return Err(TitleError::InvalidMagic);
    }

    let version = reader.read_u32_le()?;
    let length = reader.read_u32_le()? as usize;
    if version != TITLE_VERSION || length > buffer.len() {
        return Err(TitleError::UnknownVersion);
    }

    reader.set_offset(DATA_OFFSET);
    let encrypted = reader.read(length).map_err(|_| TitleError::SizeMismatch)?;
    let decrypted = decrypt_cbc_zero(encrypted);

    Ok(trim_to_json_object(&decrypted, path))
}

/// Returns the substring from the first `{` to the last `}` inclusive, or an empty string
/// if no brace pair is present.
fn trim_to_json_object(decrypted: &[u8], path: &Path) -> String {
    let text = String::from_utf8_lossy(decrypted);

    let start = text.find('{');
    let end = text.rfind('}');

    match (start, end) {
        (Some(start), Some(end)) if start <= end => text[start..=end].to_string(),
        _ => {
            tracing::warn!(path = %path.display(), "title payload has no recognizable JSON object");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests;
