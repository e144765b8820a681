mod delta_vbyte;
mod mantissa;
mod raw;

pub use delta_vbyte::DeltaVbyteCodec;
pub use mantissa::{MantissaCodec, MAX_PRECISION};
pub use raw::RawValueCodec;

use sparz_core::format::{INDEX_CODEC_DELTA_VBYTE, VALUE_CODEC_MANTISSA, VALUE_CODEC_RAW};
use sparz_core::{IndexCodec, Result, SparzError, ValueCodec};

/// Resolve an index codec from its container `index_codec_id`.
///
/// Called when opening an existing SPZ1 file, so decompression can be
/// initialized with the codec that produced the stream.
pub fn index_codec_by_id(id: u16) -> Result<Box<dyn IndexCodec>> {
    match id {
        INDEX_CODEC_DELTA_VBYTE => Ok(Box::new(DeltaVbyteCodec)),
        _ => Err(SparzError::Corrupt(format!("unknown index codec id {id}"))),
    }
}

/// Resolve a value codec from its container `value_codec_id`.
pub fn value_codec_by_id(id: u16) -> Result<Box<dyn ValueCodec>> {
    match id {
        VALUE_CODEC_RAW => Ok(Box::new(RawValueCodec)),
        VALUE_CODEC_MANTISSA => Ok(Box::new(MantissaCodec)),
        _ => Err(SparzError::Corrupt(format!("unknown value codec id {id}"))),
    }
}
