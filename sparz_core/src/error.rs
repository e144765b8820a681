use crate::codec::CodecError;

/// Errors surfaced by archive assembly and the SPZ1 container.
///
/// Every failure is synchronous and all-or-nothing: no partial archive or
/// partially reconstructed vector/matrix is ever returned alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum SparzError {
    /// Compression was asked to process input it cannot represent
    /// (a matrix with zero rows or zero columns).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Decompression was handed an archive that cannot be reconstructed:
    /// a matrix archive with the valid flag unset, or a record whose decoded
    /// indexes fall outside the recorded dimensions.
    #[error("invalid archive: {0}")]
    InvalidArchive(&'static str),

    /// The index or value codec rejected its stream.
    #[error("codec failure: {0}")]
    Codec(#[from] CodecError),

    /// An SPZ1 container file is damaged or not an SPZ1 file at all.
    #[error("corrupt container: {0}")]
    Corrupt(String),

    /// Underlying file I/O failed while reading or writing a container.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SparzError>;
