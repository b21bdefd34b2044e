//! Monte-Carlo BER sweep over a list of SNR values
//!
//! Each SNR point runs one full cycle: generate bits, modulate, add AWGN,
//! demodulate, count errors. Points are independent apart from the shared
//! [`RandomSource`], which the sweep owns.
//!
//! ## Example
//!
//! ```
//! use psk_sim::generate::RandomSource;
//! use psk_sim::sweep::{BerSweep, SweepConfig};
//!
//! let config = SweepConfig::qpsk(vec![0.0, 4.0, 8.0], 10_000);
//! let mut sweep = BerSweep::new(config, RandomSource::new_from_seed(1)).unwrap();
//! let curve = sweep.run().unwrap();
//! assert_eq!(curve.len(), 3);
//! ```

use std::f64::consts::PI;

use num_complex::Complex;
use tracing::{debug, info};

use crate::channel::{add_noise, ebno_to_esno};
use crate::error::{Result, SimError};
use crate::generate::random_source::RandomSource;
use crate::metrics::{count_errors, BerCurve, BerPoint};
use crate::mod_type::ModType;
use crate::modem::Modem;
use crate::theory::theoretical_curve;

/// Bits per SNR point used by the simulation drivers
pub const DEFAULT_NUM_BITS: usize = 1_000_000;

/// BPSK phase reference used by the simulation driver
pub const DEFAULT_BPSK_PHASE: f64 = PI;

/// 0, 1, ..., 10 dB followed by 10.6 dB
pub fn default_snr_points() -> Vec<f64> {
    let mut snr: Vec<f64> = (0..=10).map(|x| x as f64).collect();
    snr.push(10.6);
    snr
}

/// Parameters of one BER sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub modulation: ModType,
    /// Bits transmitted per SNR point
    pub num_bits: usize,
    /// SNR values in dB, swept in the given order
    pub snr_db: Vec<f64>,
    /// Treat `snr_db` as Eb/N0 and convert to Es/N0 before adding noise
    pub snr_is_ebno: bool,
    /// BPSK phase reference in radians, ignored for QPSK
    pub phase_offset: f64,
}

impl SweepConfig {
    pub fn bpsk(snr_db: Vec<f64>, num_bits: usize) -> Self {
        SweepConfig {
            modulation: ModType::Bpsk,
            num_bits,
            snr_db,
            snr_is_ebno: true,
            phase_offset: DEFAULT_BPSK_PHASE,
        }
    }

    pub fn qpsk(snr_db: Vec<f64>, num_bits: usize) -> Self {
        SweepConfig {
            modulation: ModType::Qpsk,
            num_bits,
            snr_db,
            snr_is_ebno: true,
            phase_offset: 0.0,
        }
    }

    pub fn with_phase_offset(mut self, phase_offset: f64) -> Self {
        self.phase_offset = phase_offset;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_bits == 0 {
            return Err(SimError::InvalidConfig("num_bits must be positive".into()));
        }
        let bits_per_symbol = self.modulation.bits_per_symbol() as usize;
        if self.num_bits % bits_per_symbol != 0 {
            return Err(SimError::OddBitCount(self.num_bits));
        }
        if let Some(snr) = self.snr_db.iter().find(|snr| !snr.is_finite()) {
            return Err(SimError::InvalidConfig(format!("SNR values must be finite, got {}", snr)));
        }
        Ok(())
    }

    /// SNR handed to the channel for a configured sweep value
    pub fn channel_snr(&self, snr_db: f64) -> Result<f64> {
        if self.snr_is_ebno {
            ebno_to_esno(snr_db, self.modulation.bits_per_symbol())
        } else {
            Ok(snr_db)
        }
    }
}

/// BER sweep driver
pub struct BerSweep {
    config: SweepConfig,
    modem: Modem,
    source: RandomSource,
}

impl BerSweep {
    /// Create a sweep, validating the configuration
    ///
    /// # Arguments
    /// * `config` - Sweep parameters
    /// * `source` - Random source for bits and noise; seed it for reproducible curves
    pub fn new(config: SweepConfig, source: RandomSource) -> Result<Self> {
        config.validate()?;
        let modem = Modem::new(config.modulation).with_phase_offset(config.phase_offset);
        Ok(BerSweep { config, modem, source })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Run one modulate -> corrupt -> demodulate -> count cycle
    ///
    /// `snr_db` is interpreted as configured; the returned point carries it
    /// unchanged.
    pub fn simulate_point(&mut self, snr_db: f64) -> Result<BerPoint> {
        let num_bits = self.config.num_bits;
        let channel_snr = self.config.channel_snr(snr_db)?;

        let bits = self.source.generate_bits(num_bits);
        let symbols: Vec<Complex<f64>> = self.modem.modulate(&bits)?;
        debug_assert_eq!(symbols.len(), self.config.modulation.symbols_for_bits(num_bits));

        let received = add_noise(&mut self.source, &symbols, channel_snr);
        let demodulated = self.modem.demodulate(&received);

        let errors = count_errors(&bits, &demodulated)?;
        let point = BerPoint::measured(snr_db, errors, num_bits);
        debug!(
            "{} snr={:.2} dB (channel {:.2} dB): {} errors / {} bits, BER={:.4e}",
            self.config.modulation, snr_db, channel_snr, errors, num_bits, point.ber
        );
        Ok(point)
    }

    /// Sweep every configured SNR value, preserving input order
    pub fn run(&mut self) -> Result<BerCurve> {
        info!(
            "Running {} sweep: {} SNR points, {} bits per point",
            self.config.modulation,
            self.config.snr_db.len(),
            self.config.num_bits
        );

        let snr_list = self.config.snr_db.clone();
        let mut curve = BerCurve::with_capacity(snr_list.len());
        for snr in snr_list {
            curve.push(self.simulate_point(snr)?);
        }
        curve.validate()?;

        info!("{} sweep finished", self.config.modulation);
        Ok(curve)
    }

    /// Closed-form BER for the configured SNR list
    pub fn theory(&self) -> BerCurve {
        theoretical_curve(&self.config.snr_db)
    }
}
