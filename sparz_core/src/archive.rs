/// Archived form of a sparse `f32` vector.
///
/// Immutable once produced: fields are private and only read accessors are
/// exposed. An archive with `is_valid() == false` is the empty sentinel —
/// it carries no codec data and its other fields are defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedVector {
    is_valid: bool,
    nonzero_count: u64,
    original_length: u64,
    compressed_indexes: Vec<u8>,
    compressed_values: Vec<u8>,
}

impl ArchivedVector {
    /// The empty/invalid sentinel, produced when compressing an empty or
    /// all-zero vector.
    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            nonzero_count: 0,
            original_length: 0,
            compressed_indexes: Vec::new(),
            compressed_values: Vec::new(),
        }
    }

    /// Assemble a valid archive from its parts.
    ///
    /// The record layout is the wire contract, so archives received from
    /// elsewhere (a file, the network) can be rebuilt without re-encoding.
    pub fn from_parts(
        nonzero_count: u64,
        original_length: u64,
        compressed_indexes: Vec<u8>,
        compressed_values: Vec<u8>,
    ) -> Self {
        Self {
            is_valid: true,
            nonzero_count,
            original_length,
            compressed_indexes,
            compressed_values,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    #[inline]
    pub fn nonzero_count(&self) -> u64 {
        self.nonzero_count
    }

    #[inline]
    pub fn original_length(&self) -> u64 {
        self.original_length
    }

    pub fn compressed_indexes(&self) -> &[u8] {
        &self.compressed_indexes
    }

    pub fn compressed_values(&self) -> &[u8] {
        &self.compressed_values
    }

    /// Total compressed payload size in bytes (both streams).
    pub fn compressed_len(&self) -> usize {
        self.compressed_indexes.len() + self.compressed_values.len()
    }
}

/// Archived form of a sparse `f32` matrix.
///
/// Same immutability contract as [`ArchivedVector`]. Unlike vectors, an
/// all-zero matrix still archives as a valid record with
/// `nonzero_count() == 0`; the invalid sentinel only arises from
/// [`ArchivedMatrix::invalid`] or a sentinel container file.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedMatrix {
    is_valid: bool,
    nonzero_count: u64,
    rows: u64,
    cols: u64,
    compressed_indexes: Vec<u8>,
    compressed_values: Vec<u8>,
}

impl ArchivedMatrix {
    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            nonzero_count: 0,
            rows: 0,
            cols: 0,
            compressed_indexes: Vec::new(),
            compressed_values: Vec::new(),
        }
    }

    pub fn from_parts(
        nonzero_count: u64,
        rows: u64,
        cols: u64,
        compressed_indexes: Vec<u8>,
        compressed_values: Vec<u8>,
    ) -> Self {
        Self {
            is_valid: true,
            nonzero_count,
            rows,
            cols,
            compressed_indexes,
            compressed_values,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    #[inline]
    pub fn nonzero_count(&self) -> u64 {
        self.nonzero_count
    }

    #[inline]
    pub fn rows(&self) -> u64 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u64 {
        self.cols
    }

    pub fn compressed_indexes(&self) -> &[u8] {
        &self.compressed_indexes
    }

    pub fn compressed_values(&self) -> &[u8] {
        &self.compressed_values
    }

    pub fn compressed_len(&self) -> usize {
        self.compressed_indexes.len() + self.compressed_values.len()
    }
}
