use sparz_core::codec::{CodecError, IndexCodec};
use sparz_core::format::INDEX_CODEC_DELTA_VBYTE;

/// Delta + variable-byte index codec.
///
/// Each index is stored as its difference from the previous one (the first
/// relative to 0), then the delta is packed as a little-endian base-128
/// varint: 7 payload bits per byte, high bit as continuation. Ascending
/// inputs keep the deltas small, so dense index runs cost one byte each.
///
/// A u32 delta occupies at most [`MAX_VARINT_BYTES`] bytes; the encoder
/// reserves that worst case up front and lets the buffer grow normally, so
/// there is no scratch-buffer bound to get wrong and no trailing padding.
pub struct DeltaVbyteCodec;

/// Worst-case encoded size of one u32 delta.
const MAX_VARINT_BYTES: usize = 5;

impl IndexCodec for DeltaVbyteCodec {
    fn id(&self) -> u16 {
        INDEX_CODEC_DELTA_VBYTE
    }

    fn name(&self) -> &'static str {
        "delta-vbyte"
    }

    fn encode(&self, indexes: &[u32]) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(indexes.len() * MAX_VARINT_BYTES);
        let mut prev = 0u32;
        for &index in indexes {
            let mut delta = index.wrapping_sub(prev);
            loop {
                let byte = (delta & 0x7F) as u8;
                delta >>= 7;
                if delta == 0 {
                    out.push(byte);
                    break;
                }
                out.push(byte | 0x80);
            }
            prev = index;
        }
        Ok(out)
    }

    fn decode(&self, bytes: &[u8], count: usize) -> Result<Vec<u32>, CodecError> {
        let mut out = Vec::with_capacity(count);
        let mut prev = 0u32;
        let mut pos = 0usize;

        for _ in 0..count {
            let mut delta = 0u32;
            let mut shift = 0u32;
            loop {
                let byte = *bytes.get(pos).ok_or(CodecError::Truncated {
                    got: out.len(),
                    expected: count,
                })?;
                pos += 1;
                delta |= u32::from(byte & 0x7F) << shift;
                if byte & 0x80 == 0 {
                    break;
                }
                shift += 7;
                if shift >= MAX_VARINT_BYTES as u32 * 7 {
                    return Err(CodecError::MalformedVarint);
                }
            }
            prev = prev.wrapping_add(delta);
            out.push(prev);
        }

        Ok(out)
    }
}
