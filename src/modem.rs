//! BPSK and QPSK modulation and hard-decision demodulation
//!
//! All mappings are stateless. Sequence order is transmission order:
//! BPSK keeps one symbol per bit, QPSK one symbol per bit pair.
//!
//! ## Example
//!
//! ```
//! use psk_sim::modem::{qpsk_demodulate, qpsk_modulate};
//!
//! let bits: Vec<u8> = vec![0, 1, 1, 0];
//! let symbols = qpsk_modulate::<f64>(&bits).unwrap();
//! assert_eq!(symbols.len(), 2);
//! assert_eq!(qpsk_demodulate(&symbols), bits);
//! ```

use num_complex::Complex;
use num_traits::Float;

use crate::error::{Result, SimError};
use crate::mod_type::ModType;
use crate::symbol_maps::{bpsk_decision, bpsk_point, qpsk_decision, qpsk_point};
use crate::Bit;

/// Map each bit onto an antipodal BPSK symbol rotated by `offset` radians
pub fn bpsk_modulate<T: Float>(bits: &[Bit], offset: T) -> Vec<Complex<T>> {
    bits.iter().map(|&bit| bpsk_point(bit, offset)).collect()
}

/// Recover bits from BPSK symbols using the same phase reference as the modulator
///
/// A mismatched `offset` rotates the decision boundary and degrades the BER.
pub fn bpsk_demodulate<T: Float>(symbols: &[Complex<T>], offset: T) -> Vec<Bit> {
    symbols.iter().map(|symbol| bpsk_decision(symbol, offset)).collect()
}

/// Map bit pairs onto unit-power QPSK symbols
///
/// Returns [`SimError::OddBitCount`] when `bits` has odd length.
pub fn qpsk_modulate<T: Float>(bits: &[Bit]) -> Result<Vec<Complex<T>>> {
    if bits.len() % 2 != 0 {
        return Err(SimError::OddBitCount(bits.len()));
    }
    Ok(bits
        .chunks_exact(2)
        .map(|pair| qpsk_point(pair[0], pair[1]))
        .collect())
}

/// Demodulate QPSK symbols into a caller-provided bit buffer
///
/// `output` must hold exactly two bits per symbol.
pub fn qpsk_demodulate_into<T: Float>(symbols: &[Complex<T>], output: &mut [Bit]) -> Result<()> {
    if output.len() != symbols.len() * 2 {
        return Err(SimError::LengthMismatch {
            expected: symbols.len() * 2,
            actual: output.len(),
        });
    }
    for (symbol, pair) in symbols.iter().zip(output.chunks_exact_mut(2)) {
        let (first, second) = qpsk_decision(symbol);
        pair[0] = first;
        pair[1] = second;
    }
    Ok(())
}

/// Demodulate QPSK symbols, two bits per symbol
pub fn qpsk_demodulate<T: Float>(symbols: &[Complex<T>]) -> Vec<Bit> {
    let mut bits = Vec::with_capacity(symbols.len() * 2);
    for symbol in symbols {
        let (first, second) = qpsk_decision(symbol);
        bits.push(first);
        bits.push(second);
    }
    bits
}

/// Modulator/demodulator pair for one modulation type
///
/// The phase offset only applies to BPSK.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modem {
    mod_type: ModType,
    phase_offset: f64,
}

impl Modem {
    pub fn new(mod_type: ModType) -> Self {
        Modem { mod_type, phase_offset: 0.0 }
    }

    pub fn bpsk(phase_offset: f64) -> Self {
        Modem { mod_type: ModType::Bpsk, phase_offset }
    }

    pub fn qpsk() -> Self {
        Self::new(ModType::Qpsk)
    }

    pub fn with_phase_offset(mut self, phase_offset: f64) -> Self {
        self.phase_offset = phase_offset;
        self
    }

    pub fn mod_type(&self) -> ModType {
        self.mod_type
    }

    pub fn phase_offset(&self) -> f64 {
        self.phase_offset
    }

    pub fn modulate<T: Float>(&self, bits: &[Bit]) -> Result<Vec<Complex<T>>> {
        match self.mod_type {
            ModType::Bpsk => Ok(bpsk_modulate(bits, T::from(self.phase_offset).unwrap())),
            ModType::Qpsk => qpsk_modulate(bits),
        }
    }

    pub fn demodulate<T: Float>(&self, symbols: &[Complex<T>]) -> Vec<Bit> {
        match self.mod_type {
            ModType::Bpsk => bpsk_demodulate(symbols, T::from(self.phase_offset).unwrap()),
            ModType::Qpsk => qpsk_demodulate(symbols),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::count_errors;
    use std::f64::consts::PI;

    const FIXTURE: [Bit; 20] = [0, 1, 0, 0, 1, 1, 1, 0, 1, 1, 0, 0, 1, 0, 0, 0, 1, 1, 0, 1];

    // 0 plus pi/k for k in -10..10, k != 0
    fn offset_list() -> Vec<f64> {
        (-10..10)
            .map(|k: i32| if k == 0 { 0.0 } else { PI / k as f64 })
            .collect()
    }

    #[test]
    fn test_bpsk_round_trip_all_offsets() {
        for offset in offset_list() {
            let symbols = bpsk_modulate::<f64>(&FIXTURE, offset);
            assert_eq!(symbols.len(), FIXTURE.len());
            let demodulated = bpsk_demodulate(&symbols, offset);
            assert_eq!(demodulated, FIXTURE, "round trip failed at offset {}", offset);
        }
    }

    #[test]
    fn test_bpsk_round_trip_f32() {
        let symbols = bpsk_modulate::<f32>(&FIXTURE, std::f32::consts::PI);
        assert_eq!(bpsk_demodulate(&symbols, std::f32::consts::PI), FIXTURE);
    }

    #[test]
    fn test_bpsk_zero_offset_points() {
        let symbols = bpsk_modulate::<f64>(&[1, 0], 0.0);
        assert_eq!(symbols[0], Complex::new(1.0, 0.0));
        assert_eq!(symbols[1].re, -1.0);
    }

    #[test]
    fn test_bpsk_unit_energy() {
        for offset in offset_list() {
            for symbol in bpsk_modulate::<f64>(&FIXTURE, offset) {
                assert!((symbol.norm() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_bpsk_offset_mismatch_degrades() {
        // Demodulating with the reference rotated by pi flips every decision
        let symbols = bpsk_modulate::<f64>(&FIXTURE, 0.0);
        let demodulated = bpsk_demodulate(&symbols, PI);
        let errors = count_errors(&FIXTURE, &demodulated).unwrap();
        assert_eq!(errors, FIXTURE.len());
    }

    #[test]
    fn test_qpsk_round_trip_fixture() {
        let symbols = qpsk_modulate::<f64>(&FIXTURE).unwrap();
        assert_eq!(symbols.len(), FIXTURE.len() / 2);
        assert_eq!(qpsk_demodulate(&symbols), FIXTURE);
    }

    #[test]
    fn test_qpsk_round_trip_all_pairs() {
        let bits: Vec<Bit> = vec![0, 0, 0, 1, 1, 0, 1, 1];
        let symbols = qpsk_modulate::<f32>(&bits).unwrap();
        assert_eq!(qpsk_demodulate(&symbols), bits);
    }

    #[test]
    fn test_qpsk_unit_energy() {
        for symbol in qpsk_modulate::<f64>(&FIXTURE).unwrap() {
            assert!((symbol.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_qpsk_odd_length_is_error() {
        let result = qpsk_modulate::<f64>(&[0, 1, 1]);
        assert!(matches!(result, Err(SimError::OddBitCount(3))));
    }

    #[test]
    fn test_qpsk_empty() {
        let symbols = qpsk_modulate::<f64>(&[]).unwrap();
        assert!(symbols.is_empty());
        assert!(qpsk_demodulate(&symbols).is_empty());
    }

    #[test]
    fn test_qpsk_demodulate_into() {
        let symbols = qpsk_modulate::<f64>(&FIXTURE).unwrap();
        let mut output = vec![0; FIXTURE.len()];
        qpsk_demodulate_into(&symbols, &mut output).unwrap();
        assert_eq!(output, FIXTURE);
    }

    #[test]
    fn test_qpsk_demodulate_into_length_mismatch() {
        let symbols = qpsk_modulate::<f64>(&FIXTURE).unwrap();
        let mut output = vec![0; FIXTURE.len() - 1];
        let result = qpsk_demodulate_into(&symbols, &mut output);
        assert!(matches!(
            result,
            Err(SimError::LengthMismatch { expected: 20, actual: 19 })
        ));
    }

    #[test]
    fn test_modem_dispatch() {
        let bpsk = Modem::bpsk(PI);
        let symbols = bpsk.modulate::<f64>(&FIXTURE).unwrap();
        assert_eq!(symbols.len(), 20);
        assert_eq!(bpsk.demodulate(&symbols), FIXTURE);

        let qpsk = Modem::qpsk();
        let symbols = qpsk.modulate::<f64>(&FIXTURE).unwrap();
        assert_eq!(symbols.len(), 10);
        assert_eq!(qpsk.demodulate(&symbols), FIXTURE);
    }

    #[test]
    fn test_modem_qpsk_ignores_phase_offset() {
        let qpsk = Modem::qpsk().with_phase_offset(1.0);
        let symbols = qpsk.modulate::<f64>(&FIXTURE).unwrap();
        assert_eq!(qpsk.demodulate(&symbols), FIXTURE);
    }
}
