//! Decoder for the RPF7 launcher package format and the RGLM title-descriptor payloads
//! shipped alongside it, plus the AES key-recovery step both formats depend on.

pub mod archive;
pub mod cache;
pub mod crypto;
pub mod cursor;
pub mod key;
pub mod title;

pub use archive::{Archive, ArchiveError};
pub use cache::{CacheError, CacheRecord};
pub use key::{recover_key, KeyError};
pub use title::{decode_title, TitleError};
