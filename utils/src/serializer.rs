use crate::{Endian, COMPACT_SIZE_U16_MARKER, COMPACT_SIZE_U32_MARKER, COMPACT_SIZE_U64_MARKER};

macro_rules! write_fixed {
    ($name:ident, $ty:ty) => {
        pub fn $name(&mut self, value: $ty, endian: Endian) -> &mut Self {
            match endian {
                Endian::Big => self.bytes.extend_from_slice(&value.to_be_bytes()),
                Endian::Little => self.bytes.extend_from_slice(&value.to_le_bytes()),
            }
            self
        }
    };
}

/// Append-only byte writer. Every write returns `&mut Self` so fields can be chained.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Serializer {
    bytes: Vec<u8>,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Serializer { bytes: Vec::with_capacity(capacity) }
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.bytes.push(value);
        self
    }

    write_fixed!(write_u16, u16);
    write_fixed!(write_u32, u32);
    write_fixed!(write_u64, u64);
    // two's complement
    write_fixed!(write_i64, i64);

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Writes `bytes` last-to-first, the stored order of hash-like protocol fields.
    pub fn write_bytes_reversed(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend(bytes.iter().rev());
        self
    }

    /// Bitcoin compactSize: one byte up to 252, otherwise a marker byte
    /// followed by a 2, 4 or 8 byte little-endian value.
    pub fn write_compact_size(&mut self, value: u64) -> &mut Self {
        match value {
            0..=0xfc => self.write_u8(value as u8),
            0xfd..=0xffff => self.write_u8(COMPACT_SIZE_U16_MARKER).write_u16(value as u16, Endian::Little),
            0x10000..=0xffff_ffff => self.write_u8(COMPACT_SIZE_U32_MARKER).write_u32(value as u32, Endian::Little),
            _ => self.write_u8(COMPACT_SIZE_U64_MARKER).write_u64(value, Endian::Little),
        }
    }

    /// compactSize length prefix followed by the bytes.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_compact_size(bytes.len() as u64).write_bytes(bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn to_hex(&self) -> String {
        faster_hex::hex_string(&self.bytes)
    }
}

impl AsRef<[u8]> for Serializer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Serializer> for Vec<u8> {
    fn from(serializer: Serializer) -> Self {
        serializer.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width_endianness() {
        let mut s = Serializer::new();
        s.write_u8(0xab).write_u16(0x0102, Endian::Little).write_u16(0x0102, Endian::Big);
        s.write_u32(0xdeadbeef, Endian::Little).write_u32(0xdeadbeef, Endian::Big);
        assert_eq!(s.to_hex(), "ab02010102efbeaddedeadbeef");

        let mut s = Serializer::new();
        s.write_u64(0x0102030405060708, Endian::Big);
        assert_eq!(s.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_write_i64_twos_complement() {
        let vectors: &[(i64, &str)] = &[
            (0, "0000000000000000"),
            (1, "0100000000000000"),
            (-1, "ffffffffffffffff"),
            (1000, "e803000000000000"),
            (-1000, "18fcffffffffffff"),
            (2_100_000_000_000_000, "0040075af0750700"),
            (-2_100_000_000_000_000, "00c0f8a50f8af8ff"),
            (-9_007_199_254_740_991, "010000000000e0ff"),
            (9_007_199_254_740_991, "ffffffffffff1f00"),
        ];
        for (value, expected) in vectors {
            let mut s = Serializer::new();
            s.write_i64(*value, Endian::Little);
            assert_eq!(&s.to_hex(), expected, "value {value}");
        }
    }

    #[test]
    fn test_compact_size_widths() {
        let vectors: &[(u64, &str)] = &[
            (0, "00"),
            (232, "e8"),
            (252, "fc"),
            (253, "fdfd00"),
            (32767, "fdff7f"),
            (65535, "fdffff"),
            (65536, "fe00000100"),
            (4_294_967_295, "feffffffff"),
            (4_294_967_296, "ff0000000001000000"),
        ];
        for (value, expected) in vectors {
            let mut s = Serializer::new();
            s.write_compact_size(*value);
            assert_eq!(&s.to_hex(), expected, "value {value}");
        }
    }

    #[test]
    fn test_bytes() {
        let mut s = Serializer::with_capacity(16);
        s.write_bytes(&[1, 2, 3]).write_bytes_reversed(&[1, 2, 3]).write_var_bytes(&[0xaa, 0xbb]);
        assert_eq!(s.len(), 9);
        assert_eq!(Vec::from(s), vec![1, 2, 3, 3, 2, 1, 2, 0xaa, 0xbb]);
        assert!(Serializer::new().is_empty());
    }
}
