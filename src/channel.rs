use num_complex::Complex;
use num_traits::Float;

use crate::error::{Result, SimError};
use crate::generate::awgn::AWGN;
use crate::generate::random_source::RandomSource;
use crate::vector_ops::{add, from_db, to_db};

/// Convert a per-bit SNR (Eb/N0) to a per-symbol SNR (Es/N0), both in dB
///
/// Es/N0 = 10*log10(10^(Eb/N0 / 10) * bits_per_symbol). With one bit per
/// symbol the value passes through unchanged.
///
/// # Arguments
/// * `ebno_db` - Energy per bit to noise PSD ratio in dB
/// * `modulation_order` - Bits per symbol (1 for BPSK, 2 for QPSK)
pub fn ebno_to_esno(ebno_db: f64, modulation_order: u8) -> Result<f64> {
    match modulation_order {
        0 => Err(SimError::InvalidModulationOrder(modulation_order)),
        1 => Ok(ebno_db),
        order => Ok(to_db(from_db(ebno_db) * order as f64)),
    }
}

/// [`ebno_to_esno`] over a whole SNR list, order preserved
pub fn ebno_to_esno_list(ebno_db: &[f64], modulation_order: u8) -> Result<Vec<f64>> {
    ebno_db
        .iter()
        .map(|&snr| ebno_to_esno(snr, modulation_order))
        .collect()
}

/// Pass symbols through an AWGN channel
///
/// Draws one complex noise sample per symbol from `source`, scaled for
/// `snr_db` (Es/N0 against unit-energy symbols), and returns symbols + noise.
pub fn add_noise<T: Float>(source: &mut RandomSource, symbols: &[Complex<T>], snr_db: f64) -> Vec<Complex<T>> {
    let noise = AWGN::new(snr_db).generate_block::<T>(source, symbols.len());
    symbols.iter().zip(noise).map(|(s, n)| *s + n).collect()
}

/// Superpose a transmitted sequence and an externally generated noise sequence
pub fn combine<T: Float>(symbols: &[Complex<T>], noise: &[Complex<T>]) -> Result<Vec<Complex<T>>> {
    add(symbols, noise)
}
