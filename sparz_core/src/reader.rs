//! Reading SPZ1 container files back into archive records.
//!
//! Open sequence:
//! 1. Read and validate the 64-byte header (magic, version, kind).
//! 2. Read the index stream, then the value stream, at their recorded
//!    lengths.
//! 3. Verify each stream's xxhash3-64 checksum when the checksum flag is
//!    set.
//!
//! The header is returned alongside the record so callers can resolve the
//! codecs that produced the streams (`index_codec_id`/`value_codec_id`).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use xxhash_rust::xxh3::xxh3_64;

use crate::archive::{ArchivedMatrix, ArchivedVector};
use crate::error::{Result, SparzError};
use crate::format::{
    SpzHeader, FLAG_EMPTY_SENTINEL, FLAG_HAS_CHECKSUM, HEADER_SIZE, KIND_MATRIX, KIND_VECTOR,
};

/// An archive record of either kind, as read from a container file.
#[derive(Debug, Clone, PartialEq)]
pub enum Archive {
    Vector(ArchivedVector),
    Matrix(ArchivedMatrix),
}

/// Read an SPZ1 container file.
pub fn read_archive(path: impl AsRef<Path>) -> Result<(SpzHeader, Archive)> {
    let mut file = File::open(path)?;

    let mut header_buf = [0u8; HEADER_SIZE as usize];
    file.read_exact(&mut header_buf)?;
    let header = SpzHeader::from_bytes(&header_buf)?;

    if header.version != 1 {
        return Err(SparzError::Corrupt(format!(
            "unsupported container version {}",
            header.version
        )));
    }

    if header.has_flag(FLAG_EMPTY_SENTINEL) {
        let archive = match header.kind {
            KIND_VECTOR => Archive::Vector(ArchivedVector::invalid()),
            _ => Archive::Matrix(ArchivedMatrix::invalid()),
        };
        return Ok((header, archive));
    }

    let indexes = read_stream(&mut file, header.index_len as usize, "index stream")?;
    let values = read_stream(&mut file, header.value_len as usize, "value stream")?;

    if header.has_flag(FLAG_HAS_CHECKSUM) {
        verify_checksum("index stream", &indexes, header.index_checksum)?;
        verify_checksum("value stream", &values, header.value_checksum)?;
    }

    let archive = match header.kind {
        KIND_VECTOR => Archive::Vector(ArchivedVector::from_parts(
            header.nonzero_count,
            header.dim0,
            indexes,
            values,
        )),
        KIND_MATRIX => Archive::Matrix(ArchivedMatrix::from_parts(
            header.nonzero_count,
            header.dim0,
            header.dim1,
            indexes,
            values,
        )),
        // from_bytes already rejected every other kind
        other => {
            return Err(SparzError::Corrupt(format!("unknown archive kind {other}")));
        }
    };

    Ok((header, archive))
}

fn read_stream(file: &mut File, len: usize, what: &str) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    file.read_exact(&mut buf)
        .map_err(|_| SparzError::Corrupt(format!("{what} shorter than header claims")))?;
    Ok(buf)
}

fn verify_checksum(what: &str, data: &[u8], expected: u64) -> Result<()> {
    let computed = xxh3_64(data);
    if computed != expected {
        return Err(SparzError::Corrupt(format!(
            "{what} checksum mismatch: expected {expected:016x}, got {computed:016x}"
        )));
    }
    Ok(())
}
