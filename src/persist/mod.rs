//! Self-describing binary and JSON persistence for histograms.
//!
//! The binary format is a fixed 24-byte header followed by a
//! Postcard-encoded [`HistogramSchema`] payload:
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0       4     Magic ("NDHG")
//! 4       1     Version major
//! 5       1     Version minor
//! 6       2     Reserved
//! 8       4     Dimension count
//! 12      4     Payload size (bytes)
//! 16      4     CRC32 checksum of payload
//! 20      4     Reserved
//! ```
//!
//! All header integers are little-endian. The JSON form serializes the
//! same schema as text and round-trips any histogram exactly.

mod schema;

pub use schema::{HistogramSchema, StorageSchema};

use std::io::{Read, Write};

use thiserror::Error;

use crate::histogram::Histogram;

// ============================================================================
// Constants
// ============================================================================

/// Magic bytes identifying a histogram file.
pub const MAGIC: &[u8; 4] = b"NDHG";

/// Current format version (major).
pub const VERSION_MAJOR: u8 = 1;

/// Current format version (minor).
pub const VERSION_MINOR: u8 = 0;

/// Size of the binary header in bytes.
pub const HEADER_SIZE: usize = 24;

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur while encoding a histogram.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Postcard encoding error.
    #[error("encoding error: {0}")]
    Encoding(#[from] postcard::Error),

    /// JSON encoding error.
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while decoding a histogram.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Wrong magic bytes.
    #[error("not a histogram file")]
    NotAHistogram,

    /// The file was written by a newer format version.
    #[error("histogram file requires format {major}.{minor} or later")]
    UnsupportedVersion {
        /// Version major of the file.
        major: u8,
        /// Version minor of the file.
        minor: u8,
    },

    /// The input ended before the declared payload.
    #[error("file truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes the header promised.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },

    /// The payload does not match its checksum.
    #[error("checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        /// Checksum recorded in the header.
        expected: u32,
        /// Checksum of the payload as read.
        actual: u32,
    },

    /// The payload decodes to an inconsistent histogram.
    #[error("corrupt payload: {0}")]
    CorruptPayload(String),

    /// The decoded state fails histogram validation.
    #[error("invalid histogram: {0}")]
    Invalid(#[from] crate::error::Error),

    /// I/O error during reading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Postcard decoding error.
    #[error("decoding error: {0}")]
    Decoding(#[from] postcard::Error),

    /// JSON decoding error.
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Header
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FormatHeader {
    version_major: u8,
    version_minor: u8,
    dim: u32,
    payload_len: u32,
    checksum: u32,
}

impl FormatHeader {
    fn to_bytes(self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(MAGIC);
        buf[4] = self.version_major;
        buf[5] = self.version_minor;
        buf[8..12].copy_from_slice(&self.dim.to_le_bytes());
        buf[12..16].copy_from_slice(&self.payload_len.to_le_bytes());
        buf[16..20].copy_from_slice(&self.checksum.to_le_bytes());
        buf
    }

    fn from_bytes(buf: &[u8; HEADER_SIZE]) -> Result<Self, DecodeError> {
        if &buf[0..4] != MAGIC {
            return Err(DecodeError::NotAHistogram);
        }
        let version_major = buf[4];
        let version_minor = buf[5];
        if version_major > VERSION_MAJOR {
            return Err(DecodeError::UnsupportedVersion {
                major: version_major,
                minor: version_minor,
            });
        }
        Ok(Self {
            version_major,
            version_minor,
            dim: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            payload_len: u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
            checksum: u32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]),
        })
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Serialize a histogram to the binary format.
pub fn to_bytes(hist: &Histogram) -> Result<Vec<u8>, EncodeError> {
    let payload = postcard::to_allocvec(&HistogramSchema::from(hist))?;
    let header = FormatHeader {
        version_major: VERSION_MAJOR,
        version_minor: VERSION_MINOR,
        dim: hist.dim() as u32,
        payload_len: payload.len() as u32,
        checksum: crc32fast::hash(&payload),
    };
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Serialize a histogram into a writer.
pub fn write_into<W: Write>(hist: &Histogram, writer: &mut W) -> Result<(), EncodeError> {
    writer.write_all(&to_bytes(hist)?)?;
    Ok(())
}

/// Serialize a histogram to the JSON text form.
pub fn to_json(hist: &Histogram) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(&HistogramSchema::from(hist))?)
}

// ============================================================================
// Decoding
// ============================================================================

fn decode_payload(header: FormatHeader, payload: &[u8]) -> Result<Histogram, DecodeError> {
    let actual = crc32fast::hash(payload);
    if actual != header.checksum {
        return Err(DecodeError::ChecksumMismatch {
            expected: header.checksum,
            actual,
        });
    }
    let schema: HistogramSchema = postcard::from_bytes(payload)?;
    if schema.axes.len() as u32 != header.dim {
        return Err(DecodeError::CorruptPayload(format!(
            "header declares {} axes, payload has {}",
            header.dim,
            schema.axes.len()
        )));
    }
    Ok(schema.into_histogram()?)
}

/// Deserialize a histogram from the binary format.
pub fn from_bytes(bytes: &[u8]) -> Result<Histogram, DecodeError> {
    if bytes.len() < HEADER_SIZE {
        return Err(DecodeError::Truncated {
            expected: HEADER_SIZE,
            actual: bytes.len(),
        });
    }
    let mut header_buf = [0u8; HEADER_SIZE];
    header_buf.copy_from_slice(&bytes[..HEADER_SIZE]);
    let header = FormatHeader::from_bytes(&header_buf)?;
    let end = HEADER_SIZE + header.payload_len as usize;
    if bytes.len() < end {
        return Err(DecodeError::Truncated {
            expected: end,
            actual: bytes.len(),
        });
    }
    decode_payload(header, &bytes[HEADER_SIZE..end])
}

/// Deserialize a histogram from a reader.
pub fn read_from<R: Read>(reader: &mut R) -> Result<Histogram, DecodeError> {
    let mut header_buf = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header_buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            DecodeError::Truncated {
                expected: HEADER_SIZE,
                actual: 0,
            }
        } else {
            DecodeError::Io(e)
        }
    })?;
    let header = FormatHeader::from_bytes(&header_buf)?;
    let mut payload = vec![0u8; header.payload_len as usize];
    reader.read_exact(&mut payload).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            DecodeError::Truncated {
                expected: HEADER_SIZE + header.payload_len as usize,
                actual: HEADER_SIZE,
            }
        } else {
            DecodeError::Io(e)
        }
    })?;
    decode_payload(header, &payload)
}

/// Deserialize a histogram from the JSON text form.
pub fn from_json(json: &str) -> Result<Histogram, DecodeError> {
    let schema: HistogramSchema = serde_json::from_str(json)?;
    Ok(schema.into_histogram()?)
}
