use crate::{Endian, Result, SerializationError, COMPACT_SIZE_U16_MARKER, COMPACT_SIZE_U32_MARKER, COMPACT_SIZE_U64_MARKER};

macro_rules! read_fixed {
    ($name:ident, $ty:ty) => {
        pub fn $name(&mut self, endian: Endian) -> Result<$ty> {
            let bytes: [u8; std::mem::size_of::<$ty>()] = self.read_array()?;
            Ok(match endian {
                Endian::Big => <$ty>::from_be_bytes(bytes),
                Endian::Little => <$ty>::from_le_bytes(bytes),
            })
        }
    };
}

/// Cursor over a borrowed byte slice. Reads past the end fail with
/// [`SerializationError::UnexpectedEof`] and leave the cursor in place.
#[derive(Debug, Clone)]
pub struct Deserializer<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Deserializer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Deserializer { data, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(SerializationError::UnexpectedEof { needed: len, remaining });
        }
        let data = self.data;
        let slice = &data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(self.take(N)?);
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    read_fixed!(read_u16, u16);
    read_fixed!(read_u32, u32);
    read_fixed!(read_u64, u64);
    read_fixed!(read_i64, i64);

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    pub fn read_bytes_reversed(&mut self, len: usize) -> Result<Vec<u8>> {
        Ok(self.take(len)?.iter().rev().copied().collect())
    }

    /// Reads a compactSize varint. Values that fit a shorter form are rejected.
    pub fn read_compact_size(&mut self) -> Result<u64> {
        let start = self.offset;
        let result = self.read_compact_size_inner();
        if result.is_err() {
            self.offset = start;
        }
        result
    }

    fn read_compact_size_inner(&mut self) -> Result<u64> {
        let (value, minimum) = match self.read_u8()? {
            COMPACT_SIZE_U16_MARKER => (self.read_u16(Endian::Little)? as u64, 0xfd),
            COMPACT_SIZE_U32_MARKER => (self.read_u32(Endian::Little)? as u64, 0x1_0000),
            COMPACT_SIZE_U64_MARKER => (self.read_u64(Endian::Little)?, 0x1_0000_0000),
            byte => return Ok(byte as u64),
        };
        if value < minimum {
            return Err(SerializationError::NonCanonicalCompactSize(value));
        }
        Ok(value)
    }

    pub fn read_var_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.offset;
        let len = self.read_compact_size()?;
        let remaining = self.remaining();
        match usize::try_from(len) {
            Ok(len) if len <= remaining => self.take(len),
            _ => {
                self.offset = start;
                Err(SerializationError::UnexpectedEof { needed: usize::try_from(len).unwrap_or(usize::MAX), remaining })
            }
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

/// Hex input is decoded into an owned buffer first.
pub fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return Err(SerializationError::InvalidHex(format!("odd length {}", hex.len())));
    }
    let mut bytes = vec![0u8; hex.len() / 2];
    faster_hex::hex_decode(hex.as_bytes(), &mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Serializer;

    #[test]
    fn test_fixed_width_reads() {
        let bytes = decode_hex("ab02010102efbeaddedeadbeef").unwrap();
        let mut d = Deserializer::new(&bytes);
        assert_eq!(d.read_u8().unwrap(), 0xab);
        assert_eq!(d.read_u16(Endian::Little).unwrap(), 0x0102);
        assert_eq!(d.read_u16(Endian::Big).unwrap(), 0x0102);
        assert_eq!(d.read_u32(Endian::Little).unwrap(), 0xdeadbeef);
        assert_eq!(d.read_u32(Endian::Big).unwrap(), 0xdeadbeef);
        assert!(d.is_empty());
    }

    #[test]
    fn test_i64_round_trip() {
        for value in [0i64, 1, -1, 1000, -1000, i64::MIN, i64::MAX, -9_007_199_254_740_991] {
            let mut s = Serializer::new();
            s.write_i64(value, Endian::Little).write_i64(value, Endian::Big);
            let mut d = Deserializer::new(s.as_bytes());
            assert_eq!(d.read_i64(Endian::Little).unwrap(), value);
            assert_eq!(d.read_i64(Endian::Big).unwrap(), value);
        }
    }

    #[test]
    fn test_compact_size_boundaries() {
        for (value, width) in [(0u64, 1), (252, 1), (253, 3), (65535, 3), (65536, 5), (4_294_967_295, 5), (4_294_967_296, 9), (u64::MAX, 9)] {
            let mut s = Serializer::new();
            s.write_compact_size(value);
            assert_eq!(s.len(), width, "value {value}");
            let mut d = Deserializer::new(s.as_bytes());
            assert_eq!(d.read_compact_size().unwrap(), value);
            assert!(d.is_empty());
        }
    }

    #[test]
    fn test_non_canonical_compact_size() {
        for hex in ["fdfc00", "feffff0000"] {
            let bytes = decode_hex(hex).unwrap();
            let mut d = Deserializer::new(&bytes);
            assert!(matches!(d.read_compact_size(), Err(SerializationError::NonCanonicalCompactSize(_))));
            assert_eq!(d.offset(), 0);
        }
    }

    #[test]
    fn test_truncated_input() {
        let mut d = Deserializer::new(&[0x01, 0x02, 0x03]);
        assert_eq!(d.read_u32(Endian::Little), Err(SerializationError::UnexpectedEof { needed: 4, remaining: 3 }));
        assert_eq!(d.offset(), 0);
        assert_eq!(d.read_u16(Endian::Big).unwrap(), 0x0102);
        assert!(d.read_bytes(2).is_err());

        let mut d = Deserializer::new(&[0xfe, 0x01]);
        assert!(matches!(d.read_compact_size(), Err(SerializationError::UnexpectedEof { .. })));
        assert_eq!(d.remaining(), 2);

        let mut d = Deserializer::new(&[0x03, 0xaa]);
        assert!(d.read_var_bytes().is_err());
        assert_eq!(d.offset(), 0);
    }

    #[test]
    fn test_bytes_and_reversal() {
        let mut s = Serializer::new();
        s.write_bytes_reversed(&[1, 2, 3, 4]).write_var_bytes(b"abc");
        let mut d = Deserializer::new(s.as_bytes());
        assert_eq!(d.read_bytes_reversed(4).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(d.read_var_bytes().unwrap(), b"abc");
        assert!(d.is_empty());
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("00ff").unwrap(), vec![0x00, 0xff]);
        assert!(decode_hex("abc").is_err());
        assert!(decode_hex("zz").is_err());
    }
}
