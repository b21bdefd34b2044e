//! BPSK/QPSK modulation, AWGN channel and bit-error-rate simulation.
//!
//! The pipeline exercised once per SNR point is
//! bits -> [`modem`] -> [`channel`] -> [`modem`] -> [`metrics`].
//! [`sweep`] drives it over a list of SNR values and [`theory`] supplies the
//! closed-form curve to compare against. Plot output goes through the
//! [`plot::SeriesSink`] abstraction.

pub mod channel;
pub mod error;
pub mod fft;
pub mod generate;
pub mod metrics;
pub mod mod_type;
pub mod modem;
pub mod plot;
pub mod symbol_maps;
pub mod sweep;
pub mod theory;
pub mod vector_ops;

/// A single binary value, 0 or 1
pub type Bit = u8;

pub use error::{Result, SimError};
pub use generate::RandomSource;
pub use metrics::{BerCurve, BerPoint};
pub use mod_type::ModType;
pub use modem::Modem;
pub use sweep::{BerSweep, SweepConfig};
