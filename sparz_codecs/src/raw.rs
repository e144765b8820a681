use sparz_core::codec::{CodecError, ValueCodec};
use sparz_core::format::VALUE_CODEC_RAW;

/// Verbatim value codec: stores each `f32` as its little-endian word.
///
/// `precision` is ignored and the round trip is bit-exact. Useful for
/// verifying the archive and container round trip independently of lossy
/// value coding, and for data whose values must survive unchanged.
pub struct RawValueCodec;

impl ValueCodec for RawValueCodec {
    fn id(&self) -> u16 {
        VALUE_CODEC_RAW
    }

    fn name(&self) -> &'static str {
        "raw"
    }

    fn encode(&self, values: &[f32], _precision: u32) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(values.len() * 4);
        for value in values {
            out.extend_from_slice(&value.to_le_bytes());
        }
        Ok(out)
    }

    fn decode(&self, bytes: &[u8], count: usize) -> Result<Vec<f32>, CodecError> {
        if bytes.len() != count * 4 {
            return Err(CodecError::Truncated {
                got: bytes.len() / 4,
                expected: count,
            });
        }
        Ok(bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes(chunk.try_into().unwrap()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_bit_exact() {
        let codec = RawValueCodec;
        let values = [0.0f32, -0.0, 3.5, f32::MIN_POSITIVE, f32::NAN];
        let encoded = codec.encode(&values, 0).unwrap();
        assert_eq!(encoded.len(), values.len() * 4);
        let decoded = codec.decode(&encoded, values.len()).unwrap();
        for (a, b) in values.iter().zip(decoded.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let codec = RawValueCodec;
        let encoded = codec.encode(&[1.0, 2.0], 0).unwrap();
        assert!(matches!(
            codec.decode(&encoded, 3),
            Err(CodecError::Truncated { .. })
        ));
        assert!(matches!(
            codec.decode(&encoded[..7], 2),
            Err(CodecError::Truncated { .. })
        ));
    }
}
