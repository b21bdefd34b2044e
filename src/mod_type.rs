use serde::{Deserialize, Serialize};
use std::fmt;

/// Enum representing the supported modulation types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModType {
    Bpsk,
    Qpsk,
}

impl ModType {
    /// Number of bits carried by one symbol
    pub fn bits_per_symbol(&self) -> u8 {
        match self {
            ModType::Bpsk => 1,
            ModType::Qpsk => 2,
        }
    }

    /// Number of symbols in the constellation
    pub fn num_symbols(&self) -> usize {
        1 << self.bits_per_symbol()
    }

    /// Number of symbols needed to carry `num_bits`
    pub fn symbols_for_bits(&self, num_bits: usize) -> usize {
        num_bits / self.bits_per_symbol() as usize
    }
}

impl fmt::Display for ModType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModType::Bpsk => write!(f, "BPSK"),
            ModType::Qpsk => write!(f, "QPSK"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_per_symbol() {
        assert_eq!(ModType::Bpsk.bits_per_symbol(), 1);
        assert_eq!(ModType::Qpsk.bits_per_symbol(), 2);
        assert_eq!(ModType::Bpsk.num_symbols(), 2);
        assert_eq!(ModType::Qpsk.num_symbols(), 4);
    }

    #[test]
    fn test_symbols_for_bits() {
        assert_eq!(ModType::Bpsk.symbols_for_bits(20), 20);
        assert_eq!(ModType::Qpsk.symbols_for_bits(20), 10);
    }

    #[test]
    fn test_display() {
        assert_eq!(ModType::Bpsk.to_string(), "BPSK");
        assert_eq!(ModType::Qpsk.to_string(), "QPSK");
    }
}
