pub mod archive;
pub mod codec;
pub mod compressor;
pub mod error;
pub mod format;
pub mod matrix;
pub mod reader;
pub mod writer;

mod flatten;

pub use archive::{ArchivedMatrix, ArchivedVector};
pub use codec::{CodecError, IndexCodec, ValueCodec};
pub use compressor::SparseCompressor;
pub use error::{Result, SparzError};
pub use format::{SpzHeader, HEADER_SIZE, MAGIC};
pub use matrix::DenseMatrix;
pub use reader::{read_archive, Archive};
pub use writer::{write_matrix, write_vector};
