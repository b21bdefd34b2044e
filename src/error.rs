//! Error types for the simulation crate.

use thiserror::Error;

/// Simulation error type
#[derive(Error, Debug)]
pub enum SimError {
    /// QPSK consumes bits in pairs
    #[error("QPSK needs an even number of bits, got {0}")]
    OddBitCount(usize),

    /// Two sequences that must line up do not
    #[error("sequence length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Bits per symbol must be at least 1
    #[error("invalid modulation order: {0}")]
    InvalidModulationOrder(u8),

    /// Sweep configuration rejected before running
    #[error("configuration error: {0}")]
    InvalidConfig(String),

    /// A computed result came out NaN or infinite
    #[error("non-finite result at {snr_db} dB: {value}")]
    NonFinite { snr_db: f64, value: f64 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;
