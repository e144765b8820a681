use crate::archive::{ArchivedMatrix, ArchivedVector};
use crate::codec::{IndexCodec, ValueCodec};
use crate::error::{Result, SparzError};
use crate::flatten;
use crate::matrix::DenseMatrix;

/// Archive assembler: drives the full compress/decompress round trip.
///
/// Compression flattens the dense input into ascending (index, value) pairs
/// and hands the two streams to the injected codecs independently; the codec
/// outputs plus the shape metadata become the immutable archive record.
/// Decompression reverses this, supplying the recorded `nonzero_count` as the
/// expected decode length for both streams.
///
/// Each call owns its working buffers exclusively and releases them before
/// returning, so independent calls may run concurrently without
/// synchronization.
pub struct SparseCompressor {
    index_codec: Box<dyn IndexCodec>,
    value_codec: Box<dyn ValueCodec>,
}

impl SparseCompressor {
    pub fn new(index_codec: Box<dyn IndexCodec>, value_codec: Box<dyn ValueCodec>) -> Self {
        Self {
            index_codec,
            value_codec,
        }
    }

    /// Id of the index codec, as stored in container headers.
    pub fn index_codec_id(&self) -> u16 {
        self.index_codec.id()
    }

    /// Id of the value codec, as stored in container headers.
    pub fn value_codec_id(&self) -> u16 {
        self.value_codec.id()
    }

    /// Compress a dense vector.
    ///
    /// An empty or all-zero vector short-circuits to the invalid sentinel;
    /// neither codec is invoked in that case.
    pub fn compress_vector(&self, vector: &[f32], precision: u32) -> Result<ArchivedVector> {
        if vector.is_empty() {
            return Ok(ArchivedVector::invalid());
        }
        if vector.len() as u64 > u32::MAX as u64 + 1 {
            return Err(SparzError::InvalidInput(
                "vector exceeds the u32 flat index space",
            ));
        }

        let (indexes, values) = flatten::flatten_vector(vector);
        if indexes.is_empty() {
            return Ok(ArchivedVector::invalid());
        }

        let compressed_indexes = self.index_codec.encode(&indexes)?;
        let compressed_values = self.value_codec.encode(&values, precision)?;

        Ok(ArchivedVector::from_parts(
            indexes.len() as u64,
            vector.len() as u64,
            compressed_indexes,
            compressed_values,
        ))
    }

    /// Reconstruct a dense vector from its archive.
    ///
    /// The invalid sentinel decompresses to a zero-length vector — this is
    /// deliberately not an error, unlike the matrix path.
    pub fn decompress_vector(&self, archive: &ArchivedVector) -> Result<Vec<f32>> {
        if !archive.is_valid() {
            return Ok(Vec::new());
        }

        let count = archive.nonzero_count() as usize;
        let indexes = self.index_codec.decode(archive.compressed_indexes(), count)?;
        let values = self.value_codec.decode(archive.compressed_values(), count)?;

        // Indexes are ascending, so the last one bounds them all.
        if let Some(&last) = indexes.last() {
            if u64::from(last) >= archive.original_length() {
                return Err(SparzError::InvalidArchive(
                    "decoded index beyond original length",
                ));
            }
        }

        Ok(flatten::unflatten_vector(
            archive.original_length() as usize,
            &indexes,
            &values,
        ))
    }

    /// Compress a dense matrix.
    ///
    /// Always extracts and compresses — an all-zero matrix archives as a
    /// valid record with `nonzero_count == 0`. Fails with `InvalidInput`
    /// when either dimension is zero.
    pub fn compress_matrix(&self, matrix: &DenseMatrix, precision: u32) -> Result<ArchivedMatrix> {
        let (indexes, values) = flatten::flatten_matrix(matrix)?;

        let compressed_indexes = self.index_codec.encode(&indexes)?;
        let compressed_values = self.value_codec.encode(&values, precision)?;

        Ok(ArchivedMatrix::from_parts(
            values.len() as u64,
            matrix.rows() as u64,
            matrix.cols() as u64,
            compressed_indexes,
            compressed_values,
        ))
    }

    /// Reconstruct a dense matrix from its archive.
    ///
    /// Fails with `InvalidArchive` when the valid flag is unset.
    pub fn decompress_matrix(&self, archive: &ArchivedMatrix) -> Result<DenseMatrix> {
        if !archive.is_valid() {
            return Err(SparzError::InvalidArchive("matrix archive flagged invalid"));
        }

        let count = archive.nonzero_count() as usize;
        let indexes = self.index_codec.decode(archive.compressed_indexes(), count)?;
        let values = self.value_codec.decode(archive.compressed_values(), count)?;

        if let Some(&last) = indexes.last() {
            if u64::from(last) >= archive.rows().saturating_mul(archive.cols()) {
                return Err(SparzError::InvalidArchive(
                    "decoded index beyond matrix bounds",
                ));
            }
        }

        Ok(flatten::unflatten_matrix(
            archive.rows() as usize,
            archive.cols() as usize,
            &indexes,
            &values,
        ))
    }
}
