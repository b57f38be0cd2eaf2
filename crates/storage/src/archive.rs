//! Property-list archive format
//!
//! The backend's own binary encoding of a [`NativeValue`]. Collection files
//! are archives of a dictionary, and byte blobs read from a store are first
//! tried as archives before falling back to JSON and then to raw bytes.
//!
//! # Format
//!
//! ```text
//! +--------------------+
//! | Magic: "PPLA"      | 4 bytes
//! | Format Version     | 4 bytes (u32 LE)
//! | Payload Length     | 4 bytes (u32 LE)
//! | Payload            | MessagePack encoded NativeValue
//! | CRC32              | 4 bytes, over all preceding bytes
//! +--------------------+
//! ```

use crate::native::NativeValue;
use thiserror::Error;

/// Archive magic bytes: "PPLA"
pub const ARCHIVE_MAGIC: [u8; 4] = *b"PPLA";

/// Current archive format version
pub const ARCHIVE_FORMAT_VERSION: u32 = 1;

const HEADER_LEN: usize = 12;
const TRAILER_LEN: usize = 4;

/// Errors that can occur encoding or decoding an archive
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArchiveError {
    /// Input shorter than header plus trailer
    #[error("archive too short")]
    TooShort,

    /// Invalid magic bytes
    #[error("invalid magic bytes")]
    InvalidMagic,

    /// Format version this build cannot read
    #[error("unsupported archive version {0}")]
    UnsupportedVersion(u32),

    /// Declared payload length disagrees with the input
    #[error("payload length mismatch: header says {declared}, found {actual}")]
    LengthMismatch {
        /// Length from the header
        declared: usize,
        /// Length available
        actual: usize,
    },

    /// Checksum mismatch
    #[error("checksum mismatch: expected {expected:08x}, computed {computed:08x}")]
    ChecksumMismatch {
        /// CRC32 stored in the trailer
        expected: u32,
        /// CRC32 of the bytes read
        computed: u32,
    },

    /// Payload could not be encoded
    #[error("encode error: {0}")]
    Encode(String),

    /// Payload could not be decoded
    #[error("decode error: {0}")]
    Decode(String),
}

/// Check whether bytes start with the archive magic
pub fn is_archive(bytes: &[u8]) -> bool {
    bytes.len() >= ARCHIVE_MAGIC.len() && bytes[..ARCHIVE_MAGIC.len()] == ARCHIVE_MAGIC
}

/// Encode a value as an archive
pub fn encode(value: &NativeValue) -> Result<Vec<u8>, ArchiveError> {
    let payload = rmp_serde::to_vec(value).map_err(|e| ArchiveError::Encode(e.to_string()))?;
    let payload_len = u32::try_from(payload.len())
        .map_err(|_| ArchiveError::Encode(format!("payload too large: {} bytes", payload.len())))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len() + TRAILER_LEN);
    bytes.extend_from_slice(&ARCHIVE_MAGIC);
    bytes.extend_from_slice(&ARCHIVE_FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&payload_len.to_le_bytes());
    bytes.extend_from_slice(&payload);

    let crc = crc32fast::hash(&bytes);
    bytes.extend_from_slice(&crc.to_le_bytes());
    Ok(bytes)
}

/// Decode an archive
pub fn decode(bytes: &[u8]) -> Result<NativeValue, ArchiveError> {
    if bytes.len() < HEADER_LEN + TRAILER_LEN {
        return Err(ArchiveError::TooShort);
    }
    if !is_archive(bytes) {
        return Err(ArchiveError::InvalidMagic);
    }

    let version = read_u32(&bytes[4..8]);
    if version != ARCHIVE_FORMAT_VERSION {
        return Err(ArchiveError::UnsupportedVersion(version));
    }

    let declared = read_u32(&bytes[8..12]) as usize;
    let actual = bytes.len() - HEADER_LEN - TRAILER_LEN;
    if declared != actual {
        return Err(ArchiveError::LengthMismatch { declared, actual });
    }

    let body = &bytes[..bytes.len() - TRAILER_LEN];
    let expected = read_u32(&bytes[bytes.len() - TRAILER_LEN..]);
    let computed = crc32fast::hash(body);
    if expected != computed {
        return Err(ArchiveError::ChecksumMismatch { expected, computed });
    }

    rmp_serde::from_slice(&body[HEADER_LEN..]).map_err(|e| ArchiveError::Decode(e.to_string()))
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(buf)
}
