/// Errors reported by index and value codecs.
///
/// These are the only failures a codec may surface; the assembler wraps them
/// in [`SparzError::Codec`](crate::error::SparzError) unchanged so callers can
/// still branch on the concrete kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The stream ended before the expected number of entries was decoded.
    #[error("stream ended after {got} of {expected} entries")]
    Truncated { got: usize, expected: usize },

    /// A variable-byte run never terminated within the 5 bytes a u32 allows.
    #[error("variable-byte run exceeds 5 bytes")]
    MalformedVarint,

    /// The value stream's self-describing header is unreadable or names a
    /// type this codec does not handle.
    #[error("bad stream header: {0}")]
    BadHeader(&'static str),

    /// The value stream's header disagrees with the caller-supplied count.
    #[error("stream declares {in_stream} values but caller expects {expected}")]
    CountMismatch { in_stream: usize, expected: usize },

    /// The input is too large for the stream header to describe.
    #[error("input of {0} values exceeds the stream header limit")]
    Oversize(usize),
}

/// Compressor for a strictly ascending `u32` index sequence.
///
/// Implementations must be lossless: `decode(encode(xs), xs.len()) == xs`
/// exactly. The encoded stream is not self-describing for length, so the
/// expected count is supplied externally on decode. Both directions are a
/// single linear pass.
pub trait IndexCodec: Send + Sync {
    /// Stable codec id stored in the SPZ1 container header.
    fn id(&self) -> u16;

    /// Human-readable codec name for CLI display.
    fn name(&self) -> &'static str;

    /// Encode an ascending index sequence into a compressed byte stream.
    fn encode(&self, indexes: &[u32]) -> Result<Vec<u8>, CodecError>;

    /// Decode exactly `count` ascending indexes from `bytes`.
    fn decode(&self, bytes: &[u8], count: usize) -> Result<Vec<u32>, CodecError>;
}

/// Compressor for an `f32` sequence under a configurable precision budget.
///
/// `precision` bounds the retained mantissa bits — an accuracy knob, not a
/// losslessness guarantee. Decoded values must lie within the codec's
/// documented error bound for the precision used at encode time. Codecs hold
/// no state between calls; whatever session a call acquires it releases
/// before returning, on success and on failure alike.
pub trait ValueCodec: Send + Sync {
    /// Stable codec id stored in the SPZ1 container header.
    fn id(&self) -> u16;

    /// Human-readable codec name for CLI display.
    fn name(&self) -> &'static str;

    /// Encode `values` into a self-describing compressed byte stream.
    fn encode(&self, values: &[f32], precision: u32) -> Result<Vec<u8>, CodecError>;

    /// Decode exactly `count` values from `bytes`.
    ///
    /// `count` is supplied externally for safety even though the stream
    /// header could describe it; a disagreement between the two is fatal.
    fn decode(&self, bytes: &[u8], count: usize) -> Result<Vec<f32>, CodecError>;
}
