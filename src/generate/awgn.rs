use num_complex::Complex;
use num_traits::Float;

use crate::generate::random_source::RandomSource;

/// Per-component scale factor for a given SNR in dB
///
/// scale = 10^(-snr_db/20) / sqrt(2), so each of I and Q has variance
/// scale^2 and the total noise power is 10^(-snr_db/10) against unit-energy
/// symbols.
pub fn noise_scale(snr_db: f64) -> f64 {
    10.0_f64.powf(-snr_db / 20.0) / 2.0_f64.sqrt()
}

/// Additive White Gaussian Noise (AWGN) generator
///
/// Generates complex Gaussian noise for a target SNR. Each component (I and Q)
/// is an independent N(0, 1) draw multiplied by [`noise_scale`].
/// The generator holds no RNG of its own; samples are drawn from the
/// [`RandomSource`] passed in, which keeps bits and noise on a single seed.
#[derive(Debug, Clone, Copy)]
pub struct AWGN {
    snr_db: f64,
    scale: f64,
}

impl AWGN {
    /// Create an AWGN generator
    ///
    /// # Arguments
    /// * `snr_db` - Symbol energy to noise ratio in dB. Zero and negative
    ///   values are valid and give noise power >= signal power.
    pub fn new(snr_db: f64) -> Self {
        AWGN {
            snr_db,
            scale: noise_scale(snr_db),
        }
    }

    pub fn snr_db(&self) -> f64 {
        self.snr_db
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Generate a block of complex Gaussian noise samples
    ///
    /// Returns `block_size` samples, one per symbol slot.
    pub fn generate_block<T: Float>(&self, source: &mut RandomSource, block_size: usize) -> Vec<Complex<T>> {
        let mut samples = Vec::with_capacity(block_size);
        let scale_t = T::from(self.scale).unwrap();

        for _ in 0..block_size {
            let i: T = source.standard_normal();
            let q: T = source.standard_normal();
            samples.push(Complex::new(i * scale_t, q * scale_t));
        }

        samples
    }
}
