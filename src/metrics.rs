//! Bit error counting and BER curves
//!
//! ## Example
//!
//! ```
//! use psk_sim::metrics::count_errors;
//!
//! assert_eq!(count_errors(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap(), 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Number of positions where two equal-length sequences differ
pub fn count_errors<T: PartialEq>(a: &[T], b: &[T]) -> Result<usize> {
    if a.len() != b.len() {
        return Err(SimError::LengthMismatch { expected: a.len(), actual: b.len() });
    }
    Ok(a.iter().zip(b.iter()).filter(|(x, y)| x != y).count())
}

/// Error fraction; zero transmitted bits yields NaN
pub fn bit_error_rate(errors: usize, bits: usize) -> f64 {
    errors as f64 / bits as f64
}

/// One point of a BER curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BerPoint {
    pub snr_db: f64,
    pub ber: f64,
    /// Counted bit errors, zero for closed-form points
    pub errors: usize,
    /// Transmitted bits, zero for closed-form points
    pub bits: usize,
}

impl BerPoint {
    pub fn measured(snr_db: f64, errors: usize, bits: usize) -> Self {
        BerPoint {
            snr_db,
            ber: bit_error_rate(errors, bits),
            errors,
            bits,
        }
    }

    pub fn theoretical(snr_db: f64, ber: f64) -> Self {
        BerPoint { snr_db, ber, errors: 0, bits: 0 }
    }
}

/// Ordered (SNR, BER) series, in sweep order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BerCurve {
    points: Vec<BerPoint>,
}

impl BerCurve {
    pub fn new() -> Self {
        BerCurve { points: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        BerCurve { points: Vec::with_capacity(capacity) }
    }

    /// Pair SNR values with BER values position by position
    pub fn zip_with(snr_db: &[f64], ber: &[f64]) -> Result<Self> {
        if snr_db.len() != ber.len() {
            return Err(SimError::LengthMismatch { expected: snr_db.len(), actual: ber.len() });
        }
        Ok(BerCurve {
            points: snr_db
                .iter()
                .zip(ber.iter())
                .map(|(&snr, &rate)| BerPoint::theoretical(snr, rate))
                .collect(),
        })
    }

    pub fn push(&mut self, point: BerPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[BerPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn snr_db(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.snr_db).collect()
    }

    pub fn ber(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.ber).collect()
    }

    /// (snr, ber) pairs for plotting
    pub fn pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.snr_db, p.ber)).collect()
    }

    /// Reject curves holding NaN or infinite values
    pub fn validate(&self) -> Result<()> {
        for p in &self.points {
            if !p.snr_db.is_finite() {
                return Err(SimError::NonFinite { snr_db: p.snr_db, value: p.snr_db });
            }
            if !p.ber.is_finite() {
                return Err(SimError::NonFinite { snr_db: p.snr_db, value: p.ber });
            }
        }
        Ok(())
    }

    pub fn to_csv(&self) -> String {
        let mut csv = String::from("snr_db,ber,errors,bits\n");
        for p in &self.points {
            csv.push_str(&format!("{:.2},{:.10e},{},{}\n", p.snr_db, p.ber, p.errors, p.bits));
        }
        csv
    }
}

impl fmt::Display for BerCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.points {
            writeln!(f, "[{:5.2}, {:.4e}]", p.snr_db, p.ber)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_errors() {
        assert_eq!(count_errors(&[0u8, 1, 1, 0], &[0, 1, 0, 0]).unwrap(), 1);
        assert_eq!(count_errors(&[1u8, 1, 1], &[0, 0, 0]).unwrap(), 3);
        assert_eq!(count_errors::<u8>(&[], &[]).unwrap(), 0);
    }

    #[test]
    fn test_count_errors_length_mismatch() {
        let result = count_errors(&[0u8, 1], &[0]);
        assert!(matches!(result, Err(SimError::LengthMismatch { expected: 2, actual: 1 })));
    }

    #[test]
    fn test_bit_error_rate() {
        assert_eq!(bit_error_rate(2, 10), 0.2);
        assert_eq!(bit_error_rate(0, 10), 0.0);
        assert!(bit_error_rate(0, 0).is_nan());
    }

    #[test]
    fn test_curve_keeps_order() {
        let mut curve = BerCurve::new();
        curve.push(BerPoint::measured(5.0, 1, 100));
        curve.push(BerPoint::measured(0.0, 10, 100));
        assert_eq!(curve.snr_db(), vec![5.0, 0.0]);
        assert_eq!(curve.ber(), vec![0.01, 0.1]);
        assert_eq!(curve.pairs(), vec![(5.0, 0.01), (0.0, 0.1)]);
    }

    #[test]
    fn test_zip_with() {
        let curve = BerCurve::zip_with(&[0.0, 1.0], &[0.1, 0.05]).unwrap();
        assert_eq!(curve.len(), 2);
        assert_eq!(curve.points()[1], BerPoint::theoretical(1.0, 0.05));
        assert!(BerCurve::zip_with(&[0.0], &[]).is_err());
    }

    #[test]
    fn test_validate_flags_non_finite() {
        let mut curve = BerCurve::new();
        curve.push(BerPoint::measured(1.0, 3, 100));
        assert!(curve.validate().is_ok());

        curve.push(BerPoint::measured(2.0, 0, 0));
        assert!(matches!(curve.validate(), Err(SimError::NonFinite { .. })));

        let mut curve = BerCurve::new();
        curve.push(BerPoint::theoretical(f64::INFINITY, 0.0));
        assert!(curve.validate().is_err());
    }

    #[test]
    fn test_display_and_csv() {
        let mut curve = BerCurve::new();
        curve.push(BerPoint::measured(10.6, 1, 1_000_000));
        assert_eq!(curve.to_string(), "[10.60, 1.0000e-6]\n");

        let csv = curve.to_csv();
        assert!(csv.starts_with("snr_db,ber,errors,bits\n"));
        assert!(csv.contains("10.60,"));
        assert!(csv.trim_end().ends_with(",1,1000000"));
    }

    #[test]
    fn test_json_round_trip() {
        let mut curve = BerCurve::new();
        curve.push(BerPoint::measured(3.0, 4, 1000));
        let json = serde_json::to_string(&curve).unwrap();
        let parsed: BerCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, curve);
    }
}
