use crate::{Error, Result};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Index of a particular child key for a given (extended) private key.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct ChildNumber(pub u32);

impl ChildNumber {
    /// Hardened child keys use indices 2^31 through 2^32-1.
    pub const HARDENED_FLAG: u32 = 1 << 31;

    /// Create new [`ChildNumber`] with the given index and hardened flag.
    ///
    /// Returns an error if the index is already at or above 2^31.
    pub fn new(index: u32, hardened: bool) -> Result<Self> {
        if index & Self::HARDENED_FLAG == 0 {
            let mut child = index;
            if hardened {
                child |= Self::HARDENED_FLAG;
            }
            Ok(ChildNumber(child))
        } else {
            Err(Error::ChildNumber(index))
        }
    }

    /// Get the index number for this [`ChildNumber`], i.e. with the hardened bit cleared.
    pub fn index(self) -> u32 {
        self.0 & !Self::HARDENED_FLAG
    }

    /// Is this child number within the hardened range?
    pub fn is_hardened(&self) -> bool {
        self.0 & Self::HARDENED_FLAG != 0
    }

    /// Serialize this child number as bytes.
    pub fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parse a child number from the bytes serialization.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        u32::from_be_bytes(bytes).into()
    }

    /// The next index in the same (normal or hardened) range, used when a
    /// child index produces invalid key material.
    pub fn checked_next(self) -> Option<Self> {
        let next = self.0.checked_add(1)?;
        (next & Self::HARDENED_FLAG == self.0 & Self::HARDENED_FLAG).then_some(ChildNumber(next))
    }
}

impl From<u32> for ChildNumber {
    fn from(n: u32) -> ChildNumber {
        ChildNumber(n)
    }
}

impl From<ChildNumber> for u32 {
    fn from(n: ChildNumber) -> u32 {
        n.0
    }
}

impl Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())?;

        if self.is_hardened() {
            f.write_str("'")?;
        }

        Ok(())
    }
}

impl FromStr for ChildNumber {
    type Err = Error;

    fn from_str(child: &str) -> Result<ChildNumber> {
        let (digits, hardened) = match child.strip_suffix(['\'', 'h', 'H']) {
            Some(digits) => (digits, true),
            None => (child, false),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidFormat(format!("invalid derivation level `{child}`")));
        }

        let index = digits.parse::<u32>().map_err(|_| Error::InvalidFormat(format!("derivation level `{child}` is out of range")))?;
        ChildNumber::new(index, hardened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("0".parse::<ChildNumber>().unwrap(), ChildNumber(0));
        assert_eq!("5'".parse::<ChildNumber>().unwrap(), ChildNumber(5 + ChildNumber::HARDENED_FLAG));
        assert_eq!("5h".parse::<ChildNumber>().unwrap(), ChildNumber(5 + ChildNumber::HARDENED_FLAG));
        assert_eq!("5H".parse::<ChildNumber>().unwrap(), ChildNumber(5 + ChildNumber::HARDENED_FLAG));
        assert_eq!("2147483647".parse::<ChildNumber>().unwrap(), ChildNumber(2147483647));

        assert_eq!("2147483648".parse::<ChildNumber>(), Err(Error::ChildNumber(2147483648)));
        for bad in ["", "'", "-1", "+1", "1''", "a", "1x", "4294967296"] {
            assert!(matches!(bad.parse::<ChildNumber>(), Err(Error::InvalidFormat(_))), "{bad}");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ChildNumber::new(44, true).unwrap().to_string(), "44'");
        assert_eq!(ChildNumber::new(1, false).unwrap().to_string(), "1");
    }

    #[test]
    fn test_hardened_range() {
        let child = ChildNumber::new(7, true).unwrap();
        assert!(child.is_hardened());
        assert_eq!(child.index(), 7);
        assert_eq!(child.to_bytes(), [0x80, 0, 0, 7]);
        assert_eq!(ChildNumber::from_bytes(child.to_bytes()), child);
    }

    #[test]
    fn test_checked_next_stays_in_range() {
        assert_eq!(ChildNumber(0).checked_next(), Some(ChildNumber(1)));
        assert_eq!(ChildNumber(ChildNumber::HARDENED_FLAG - 1).checked_next(), None);
        assert_eq!(ChildNumber(ChildNumber::HARDENED_FLAG).checked_next(), Some(ChildNumber(ChildNumber::HARDENED_FLAG + 1)));
        assert_eq!(ChildNumber(u32::MAX).checked_next(), None);
    }
}
