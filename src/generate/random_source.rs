use num_complex::Complex;
use num_traits::Float;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::StandardNormal;

use crate::generate::awgn::AWGN;
use crate::Bit;

/// Seedable source of uniform bits and standard normal samples
///
/// A single `RandomSource` feeds both the bit generator and the noise
/// generator of a sweep, so one seed pins down the whole simulation.
/// Parallel sweeps need one source per worker.
pub struct RandomSource {
    rng: StdRng,
    bit_dist: Uniform<u8>,
}

impl RandomSource {
    pub fn new_from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            bit_dist: Uniform::new_inclusive(0, 1),
        }
    }

    pub fn new_from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            bit_dist: Uniform::new_inclusive(0, 1),
        }
    }

    // Single bit from U{0, 1}
    pub fn gen_bit(&mut self) -> Bit {
        self.bit_dist.sample(&mut self.rng)
    }

    /// Generate `count` independent, uniformly distributed bits
    pub fn generate_bits(&mut self, count: usize) -> Vec<Bit> {
        let mut bits = Vec::with_capacity(count);
        for _ in 0..count {
            bits.push(self.gen_bit());
        }
        bits
    }

    /// Draw one sample from N(0, 1)
    pub fn standard_normal<T: Float>(&mut self) -> T {
        let sample: f64 = StandardNormal.sample(&mut self.rng);
        T::from(sample).unwrap()
    }

    /// Generate `count` complex AWGN samples for the given SNR in dB
    ///
    /// See [`AWGN`] for the scaling law.
    pub fn generate_noise<T: Float>(&mut self, count: usize, snr_db: f64) -> Vec<Complex<T>> {
        AWGN::new(snr_db).generate_block(self, count)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new_from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_bits_from_entropy() {
        let mut source = RandomSource::new_from_entropy();
        let bits = source.generate_bits(1000);
        assert_eq!(bits.len(), 1000);
        assert!(bits.iter().all(|&b| b == 0 || b == 1));
    }

    #[test]
    fn gen_bits_from_seed_is_reproducible() {
        let mut source1 = RandomSource::new_from_seed(42);
        let mut source2 = RandomSource::new_from_seed(42);
        assert_eq!(source1.generate_bits(256), source2.generate_bits(256));
    }

    #[test]
    fn different_seeds_differ() {
        let mut source1 = RandomSource::new_from_seed(1);
        let mut source2 = RandomSource::new_from_seed(2);
        assert_ne!(source1.generate_bits(256), source2.generate_bits(256));
    }

    #[test]
    fn bits_are_roughly_balanced() {
        let mut source = RandomSource::new_from_seed(7);
        let n = 100_000;
        let ones: usize = source.generate_bits(n).iter().map(|&b| b as usize).sum();
        let fraction = ones as f64 / n as f64;
        // 0.5 +- 5 sigma where sigma = sqrt(0.25 / n)
        assert!((fraction - 0.5).abs() < 5.0 * (0.25 / n as f64).sqrt(), "fraction of ones = {}", fraction);
    }

    #[test]
    fn standard_normal_moments() {
        let mut source = RandomSource::new_from_seed(3);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| source.standard_normal::<f64>()).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        assert!(mean.abs() < 0.05, "mean = {}", mean);
        assert!((var - 1.0).abs() < 0.05, "variance = {}", var);
    }

    #[test]
    fn empty_requests() {
        let mut source = RandomSource::new_from_seed(0);
        assert!(source.generate_bits(0).is_empty());
        assert!(source.generate_noise::<f64>(0, 10.0).is_empty());
    }
}
