use crate::cursor::{ByteReader, CursorError};

use super::{DECRYPTION_TAG, RPF7_MAGIC};

/// Fixed 16-byte prefix of every `.rpf` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackHeader {
    pub entry_count: u32,
    pub names_length: u32,
    pub name_shift: u8,
    pub platform_bit: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error(transparent)]
    Cursor(#[from] CursorError),
    #[error("unsupported file type, expected RPF7 magic")]
    UnsupportedFileType,
    #[error("unsupported encryption scheme")]
    UnsupportedEncryption,
}

impl PackHeader {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self, HeaderError> {
        let magic = reader.read_u32_le()?;
        if magic != RPF7_MAGIC {
            return Err(HeaderError::UnsupportedFileType);
        }

        let entry_count = reader.read_u32_le()?;
        let packed = reader.read_u32_le()?;
        let decryption_tag = reader.read_u32_le()?;

        if decryption_tag != DECRYPTION_TAG {
            return Err(HeaderError::UnsupportedEncryption);
        }

        Ok(Self {
            entry_count,
            names_length: packed & 0x0FFF_FFFF,
            name_shift: ((packed >> 28) & 0x7) as u8,
            platform_bit: (packed >> 31) & 1 == 1,
        })
    }
}
