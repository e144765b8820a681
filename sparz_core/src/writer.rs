//! Persisting archive records as SPZ1 container files.
//!
//! Layout written:
//! ```text
//! [HEADER: 64 bytes]
//! [INDEX STREAM: index_len bytes]
//! [VALUE STREAM: value_len bytes]
//! ```
//! A sentinel (invalid/empty) archive writes a header-only file with the
//! empty flag set.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use xxhash_rust::xxh3::xxh3_64;

use crate::archive::{ArchivedMatrix, ArchivedVector};
use crate::error::{Result, SparzError};
use crate::format::{SpzHeader, FLAG_EMPTY_SENTINEL, FLAG_HAS_CHECKSUM, KIND_MATRIX, KIND_VECTOR};

/// Write a vector archive to `path`, overwriting any existing file.
///
/// The codec ids identify the codecs that produced the streams so the reader
/// side can resolve matching decoders from the header alone.
pub fn write_vector(
    path: impl AsRef<Path>,
    archive: &ArchivedVector,
    index_codec_id: u16,
    value_codec_id: u16,
) -> Result<()> {
    write_container(
        path,
        KIND_VECTOR,
        archive.is_valid(),
        archive.nonzero_count(),
        archive.original_length(),
        1,
        archive.compressed_indexes(),
        archive.compressed_values(),
        index_codec_id,
        value_codec_id,
    )
}

/// Write a matrix archive to `path`, overwriting any existing file.
pub fn write_matrix(
    path: impl AsRef<Path>,
    archive: &ArchivedMatrix,
    index_codec_id: u16,
    value_codec_id: u16,
) -> Result<()> {
    write_container(
        path,
        KIND_MATRIX,
        archive.is_valid(),
        archive.nonzero_count(),
        archive.rows(),
        archive.cols(),
        archive.compressed_indexes(),
        archive.compressed_values(),
        index_codec_id,
        value_codec_id,
    )
}

#[allow(clippy::too_many_arguments)]
fn write_container(
    path: impl AsRef<Path>,
    kind: u8,
    is_valid: bool,
    nonzero_count: u64,
    dim0: u64,
    dim1: u64,
    indexes: &[u8],
    values: &[u8],
    index_codec_id: u16,
    value_codec_id: u16,
) -> Result<()> {
    if indexes.len() > u32::MAX as usize || values.len() > u32::MAX as usize {
        return Err(SparzError::Corrupt(
            "compressed stream exceeds the container length field".into(),
        ));
    }

    let header = if is_valid {
        SpzHeader {
            version: 1,
            kind,
            flags: FLAG_HAS_CHECKSUM,
            index_codec_id,
            value_codec_id,
            nonzero_count,
            dim0,
            dim1,
            index_len: indexes.len() as u32,
            value_len: values.len() as u32,
            index_checksum: xxh3_64(indexes),
            value_checksum: xxh3_64(values),
        }
    } else {
        SpzHeader {
            version: 1,
            kind,
            flags: FLAG_EMPTY_SENTINEL,
            index_codec_id,
            value_codec_id,
            nonzero_count: 0,
            dim0: 0,
            dim1: 0,
            index_len: 0,
            value_len: 0,
            index_checksum: 0,
            value_checksum: 0,
        }
    };

    let mut file = File::create(path)?;
    file.write_all(&header.to_bytes())?;
    if is_valid {
        file.write_all(indexes)?;
        file.write_all(values)?;
    }
    file.flush()?;
    Ok(())
}
