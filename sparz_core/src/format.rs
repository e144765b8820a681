use crate::error::SparzError;

/// Magic bytes for SPZ version 1 containers: "SPZ1\n" plus a null byte.
pub const MAGIC: &[u8; 6] = b"SPZ1\n\x00";

/// Fixed size of the SPZ1 container header in bytes.
///   magic[6] + version:u16 + kind:u8 + flags:u8
///   + index_codec_id:u16 + value_codec_id:u16
///   + nonzero_count:u64 + dim0:u64 + dim1:u64
///   + index_len:u32 + value_len:u32
///   + index_checksum:u64 + value_checksum:u64 + reserved[2]
///   = 6 + 2 + 1 + 1 + 2 + 2 + 8 + 8 + 8 + 4 + 4 + 8 + 8 + 2 = 64
pub const HEADER_SIZE: u64 = 64;

// ── Flags ──────────────────────────────────────────────────────────────────

/// Both streams carry an xxhash3-64 checksum in the header.
pub const FLAG_HAS_CHECKSUM: u8 = 1 << 0;

/// Empty sentinel: the archive is invalid/empty and no payload follows the
/// header.
pub const FLAG_EMPTY_SENTINEL: u8 = 1 << 1;

// ── Archive kinds ──────────────────────────────────────────────────────────

pub const KIND_VECTOR: u8 = 1;
pub const KIND_MATRIX: u8 = 2;

// ── Codec ids ──────────────────────────────────────────────────────────────

pub const INDEX_CODEC_DELTA_VBYTE: u16 = 0;

pub const VALUE_CODEC_RAW: u16 = 0;
pub const VALUE_CODEC_MANTISSA: u16 = 1;

// ── Header ─────────────────────────────────────────────────────────────────

/// Decoded representation of the 64-byte SPZ1 container header.
///
/// `dim0`/`dim1` hold `original_length`/1 for vectors and rows/cols for
/// matrices. `index_len`/`value_len` are the byte lengths of the two
/// compressed streams that follow the header, in that order.
#[derive(Debug, Clone)]
pub struct SpzHeader {
    pub version: u16,
    pub kind: u8,
    pub flags: u8,
    pub index_codec_id: u16,
    pub value_codec_id: u16,
    pub nonzero_count: u64,
    pub dim0: u64,
    pub dim1: u64,
    pub index_len: u32,
    pub value_len: u32,
    pub index_checksum: u64,
    pub value_checksum: u64,
}

impl SpzHeader {
    /// Serialize to exactly `HEADER_SIZE` bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE as usize] {
        let mut buf = [0u8; HEADER_SIZE as usize];
        buf[..6].copy_from_slice(MAGIC);
        buf[6..8].copy_from_slice(&self.version.to_le_bytes());
        buf[8] = self.kind;
        buf[9] = self.flags;
        buf[10..12].copy_from_slice(&self.index_codec_id.to_le_bytes());
        buf[12..14].copy_from_slice(&self.value_codec_id.to_le_bytes());
        buf[14..22].copy_from_slice(&self.nonzero_count.to_le_bytes());
        buf[22..30].copy_from_slice(&self.dim0.to_le_bytes());
        buf[30..38].copy_from_slice(&self.dim1.to_le_bytes());
        buf[38..42].copy_from_slice(&self.index_len.to_le_bytes());
        buf[42..46].copy_from_slice(&self.value_len.to_le_bytes());
        buf[46..54].copy_from_slice(&self.index_checksum.to_le_bytes());
        buf[54..62].copy_from_slice(&self.value_checksum.to_le_bytes());
        // reserved[2] stays zero
        buf
    }

    /// Deserialize from `HEADER_SIZE` bytes, checking magic and kind.
    pub fn from_bytes(buf: &[u8; HEADER_SIZE as usize]) -> Result<Self, SparzError> {
        if &buf[..6] != MAGIC {
            return Err(SparzError::Corrupt(
                "bad magic bytes — not an SPZ1 container".into(),
            ));
        }
        let header = Self {
            version: u16::from_le_bytes([buf[6], buf[7]]),
            kind: buf[8],
            flags: buf[9],
            index_codec_id: u16::from_le_bytes([buf[10], buf[11]]),
            value_codec_id: u16::from_le_bytes([buf[12], buf[13]]),
            nonzero_count: u64::from_le_bytes(buf[14..22].try_into().unwrap()),
            dim0: u64::from_le_bytes(buf[22..30].try_into().unwrap()),
            dim1: u64::from_le_bytes(buf[30..38].try_into().unwrap()),
            index_len: u32::from_le_bytes(buf[38..42].try_into().unwrap()),
            value_len: u32::from_le_bytes(buf[42..46].try_into().unwrap()),
            index_checksum: u64::from_le_bytes(buf[46..54].try_into().unwrap()),
            value_checksum: u64::from_le_bytes(buf[54..62].try_into().unwrap()),
        };
        if header.kind != KIND_VECTOR && header.kind != KIND_MATRIX {
            return Err(SparzError::Corrupt(format!(
                "unknown archive kind {}",
                header.kind
            )));
        }
        Ok(header)
    }

    pub fn has_flag(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SpzHeader {
        SpzHeader {
            version: 1,
            kind: KIND_MATRIX,
            flags: FLAG_HAS_CHECKSUM,
            index_codec_id: INDEX_CODEC_DELTA_VBYTE,
            value_codec_id: VALUE_CODEC_MANTISSA,
            nonzero_count: 42,
            dim0: 7,
            dim1: 9,
            index_len: 120,
            value_len: 333,
            index_checksum: 0xDEAD_BEEF_CAFE_F00D,
            value_checksum: 0x0123_4567_89AB_CDEF,
        }
    }

    #[test]
    fn header_round_trips() {
        let h = sample();
        let bytes = h.to_bytes();
        let back = SpzHeader::from_bytes(&bytes).unwrap();
        assert_eq!(back.version, h.version);
        assert_eq!(back.kind, h.kind);
        assert_eq!(back.flags, h.flags);
        assert_eq!(back.index_codec_id, h.index_codec_id);
        assert_eq!(back.value_codec_id, h.value_codec_id);
        assert_eq!(back.nonzero_count, h.nonzero_count);
        assert_eq!(back.dim0, h.dim0);
        assert_eq!(back.dim1, h.dim1);
        assert_eq!(back.index_len, h.index_len);
        assert_eq!(back.value_len, h.value_len);
        assert_eq!(back.index_checksum, h.index_checksum);
        assert_eq!(back.value_checksum, h.value_checksum);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut bytes = sample().to_bytes();
        bytes[0] = b'X';
        assert!(matches!(
            SpzHeader::from_bytes(&bytes),
            Err(SparzError::Corrupt(_))
        ));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let mut h = sample();
        h.kind = 9;
        let bytes = h.to_bytes();
        assert!(matches!(
            SpzHeader::from_bytes(&bytes),
            Err(SparzError::Corrupt(_))
        ));
    }
}
