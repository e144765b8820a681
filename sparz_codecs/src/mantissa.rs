use sparz_core::codec::{CodecError, ValueCodec};
use sparz_core::format::VALUE_CODEC_MANTISSA;

/// Highest useful precision: all 23 explicit mantissa bits of an `f32`.
pub const MAX_PRECISION: u32 = 23;

/// Stream type tag for IEEE-754 single precision.
const TYPE_F32: u8 = 0;

/// Bytes of self-describing header: type tag, precision, count.
const HEADER_LEN: usize = 6;

/// Bounded-precision `f32` codec.
///
/// `precision` is the number of explicit mantissa bits retained per value,
/// clamped to [0, 23]. Each value is bit-packed as
/// `sign(1) | exponent(8) | mantissa(precision)` after a 6-byte header
/// `[type:u8][precision:u8][count:u32 LE]`, so a value costs
/// `9 + precision` bits instead of 32.
///
/// Truncation is toward zero. For normal values the relative reconstruction
/// error is at most 2^-precision; precision 23 reproduces every bit,
/// including NaN payloads. Subnormals lose low mantissa bits like any other
/// value and may round to zero at coarse precisions.
pub struct MantissaCodec;

impl ValueCodec for MantissaCodec {
    fn id(&self) -> u16 {
        VALUE_CODEC_MANTISSA
    }

    fn name(&self) -> &'static str {
        "mantissa"
    }

    fn encode(&self, values: &[f32], precision: u32) -> Result<Vec<u8>, CodecError> {
        if values.len() > u32::MAX as usize {
            return Err(CodecError::Oversize(values.len()));
        }
        let precision = precision.min(MAX_PRECISION);
        let drop = MAX_PRECISION - precision;

        // The bit session lives exactly as long as this call; every early
        // return releases it.
        let mut writer = BitWriter::with_capacity(HEADER_LEN + payload_len(values.len(), precision));
        writer.push_byte(TYPE_F32);
        writer.push_byte(precision as u8);
        writer.push_bytes(&(values.len() as u32).to_le_bytes());

        for &value in values {
            let bits = value.to_bits();
            writer.write_bits(bits >> 31, 1);
            writer.write_bits((bits >> 23) & 0xFF, 8);
            if precision > 0 {
                writer.write_bits((bits & 0x007F_FFFF) >> drop, precision);
            }
        }

        Ok(writer.finish())
    }

    fn decode(&self, bytes: &[u8], count: usize) -> Result<Vec<f32>, CodecError> {
        if bytes.len() < HEADER_LEN {
            return Err(CodecError::BadHeader("stream shorter than header"));
        }
        if bytes[0] != TYPE_F32 {
            return Err(CodecError::BadHeader("stream is not f32 data"));
        }
        let precision = u32::from(bytes[1]);
        if precision > MAX_PRECISION {
            return Err(CodecError::BadHeader("precision out of range"));
        }
        let in_stream = u32::from_le_bytes(bytes[2..6].try_into().unwrap()) as usize;
        if in_stream != count {
            return Err(CodecError::CountMismatch {
                in_stream,
                expected: count,
            });
        }

        let drop = MAX_PRECISION - precision;
        let mut reader = BitReader::new(&bytes[HEADER_LEN..]);
        let mut out = Vec::with_capacity(count);

        for _ in 0..count {
            let truncated = CodecError::Truncated {
                got: out.len(),
                expected: count,
            };
            let sign = reader.read_bits(1).ok_or(truncated.clone())?;
            let exponent = reader.read_bits(8).ok_or(truncated.clone())?;
            let mantissa = if precision > 0 {
                reader.read_bits(precision).ok_or(truncated)?
            } else {
                0
            };
            let bits = (sign << 31) | (exponent << 23) | (mantissa << drop);
            out.push(f32::from_bits(bits));
        }

        Ok(out)
    }
}

fn payload_len(count: usize, precision: u32) -> usize {
    let bits = count * (9 + precision as usize);
    bits.div_ceil(8)
}

// ── Bit packing ────────────────────────────────────────────────────────────

/// MSB-first bit writer over a growable buffer.
struct BitWriter {
    buf: Vec<u8>,
    /// Bits already used in the final byte of `buf`; 0 means byte-aligned.
    used: u32,
}

impl BitWriter {
    fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bytes),
            used: 0,
        }
    }

    /// Append a whole byte; only legal while byte-aligned (header writing).
    fn push_byte(&mut self, byte: u8) {
        debug_assert_eq!(self.used, 0);
        self.buf.push(byte);
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        debug_assert_eq!(self.used, 0);
        self.buf.extend_from_slice(bytes);
    }

    /// Write the low `nbits` bits of `value`, most significant first.
    fn write_bits(&mut self, value: u32, nbits: u32) {
        for i in (0..nbits).rev() {
            let bit = ((value >> i) & 1) as u8;
            if self.used == 0 {
                self.buf.push(0);
            }
            let last = self.buf.last_mut().unwrap();
            *last |= bit << (7 - self.used);
            self.used = (self.used + 1) % 8;
        }
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// MSB-first bit reader over a byte slice.
struct BitReader<'a> {
    bytes: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, bit_pos: 0 }
    }

    /// Read `nbits` bits, most significant first; `None` past end of input.
    fn read_bits(&mut self, nbits: u32) -> Option<u32> {
        if self.bit_pos + nbits as usize > self.bytes.len() * 8 {
            return None;
        }
        let mut value = 0u32;
        for _ in 0..nbits {
            let byte = self.bytes[self.bit_pos / 8];
            let bit = (byte >> (7 - (self.bit_pos % 8))) & 1;
            value = (value << 1) | u32::from(bit);
            self.bit_pos += 1;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_precision_is_bit_exact() {
        let codec = MantissaCodec;
        let values = [3.5f32, -2.25, 0.1, 1e-38, f32::MAX, -0.0];
        let encoded = codec.encode(&values, MAX_PRECISION).unwrap();
        let decoded = codec.decode(&encoded, values.len()).unwrap();
        for (a, b) in values.iter().zip(decoded.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn clamps_excess_precision() {
        let codec = MantissaCodec;
        let values = [1.625f32, -9.75];
        let encoded = codec.encode(&values, 1000).unwrap();
        assert_eq!(encoded[1], MAX_PRECISION as u8);
        let decoded = codec.decode(&encoded, values.len()).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn error_stays_within_relative_bound() {
        let codec = MantissaCodec;
        let values = [1.23456f32, -987.654, 3.0e-5, 4096.25];
        for precision in [4u32, 8, 12, 16, 20] {
            let encoded = codec.encode(&values, precision).unwrap();
            let decoded = codec.decode(&encoded, values.len()).unwrap();
            let bound = (2.0f32).powi(-(precision as i32));
            for (a, b) in values.iter().zip(decoded.iter()) {
                let rel = ((a - b) / a).abs();
                assert!(
                    rel <= bound,
                    "precision {precision}: {a} -> {b}, rel {rel} > {bound}"
                );
            }
        }
    }

    #[test]
    fn error_is_monotonic_in_precision() {
        let codec = MantissaCodec;
        let values: Vec<f32> = (1..64).map(|i| (i as f32).sin() * 100.0).collect();
        let mut previous = f32::INFINITY;
        for precision in 0..=MAX_PRECISION {
            let encoded = codec.encode(&values, precision).unwrap();
            let decoded = codec.decode(&encoded, values.len()).unwrap();
            let worst = values
                .iter()
                .zip(decoded.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0f32, f32::max);
            assert!(
                worst <= previous,
                "precision {precision}: error {worst} grew past {previous}"
            );
            previous = worst;
        }
    }

    #[test]
    fn truncation_is_toward_zero() {
        let codec = MantissaCodec;
        let values = [1.999f32, -1.999];
        let encoded = codec.encode(&values, 4).unwrap();
        let decoded = codec.decode(&encoded, 2).unwrap();
        assert!(decoded[0] <= values[0] && decoded[0] > 0.0);
        assert!(decoded[1] >= values[1] && decoded[1] < 0.0);
    }

    #[test]
    fn empty_input_is_header_only() {
        let codec = MantissaCodec;
        let encoded = codec.encode(&[], 16).unwrap();
        assert_eq!(encoded.len(), HEADER_LEN);
        assert!(codec.decode(&encoded, 0).unwrap().is_empty());
    }

    #[test]
    fn count_mismatch_is_fatal() {
        let codec = MantissaCodec;
        let encoded = codec.encode(&[1.0, 2.0, 3.0], 10).unwrap();
        let err = codec.decode(&encoded, 2).unwrap_err();
        assert_eq!(
            err,
            CodecError::CountMismatch {
                in_stream: 3,
                expected: 2
            }
        );
    }

    #[test]
    fn wrong_type_tag_is_fatal() {
        let codec = MantissaCodec;
        let mut encoded = codec.encode(&[1.0], 8).unwrap();
        encoded[0] = 7;
        assert!(matches!(
            codec.decode(&encoded, 1),
            Err(CodecError::BadHeader(_))
        ));
    }

    #[test]
    fn truncated_payload_is_fatal() {
        let codec = MantissaCodec;
        let encoded = codec.encode(&[1.0, 2.0, 3.0, 4.0], 23).unwrap();
        let err = codec.decode(&encoded[..encoded.len() - 4], 4).unwrap_err();
        assert!(matches!(err, CodecError::Truncated { expected: 4, .. }));
    }

    #[test]
    fn short_stream_has_no_header() {
        let codec = MantissaCodec;
        assert!(matches!(
            codec.decode(&[0, 1, 2], 0),
            Err(CodecError::BadHeader(_))
        ));
    }
}
