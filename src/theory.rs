//! Closed-form bit error probabilities for comparison against simulation

use crate::metrics::{BerCurve, BerPoint};
use crate::vector_ops::from_db;

/// Complementary error function
///
/// Chebyshev fit from Numerical Recipes (`erfcc`), fractional error below
/// 1.2e-7 over the whole real line, which keeps the deep tail usable on a
/// semilog plot.
pub fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let ans = t
        * (-z * z - 1.26551223
            + t * (1.00002368
                + t * (0.37409196
                    + t * (0.09678418
                        + t * (-0.18628806
                            + t * (0.27886807
                                + t * (-1.13520398
                                    + t * (1.48851587 + t * (-0.82215223 + t * 0.17087277)))))))))
            .exp();
    if x >= 0.0 { ans } else { 2.0 - ans }
}

/// Bit error probability of coherent BPSK, and of Gray-mapped QPSK per bit,
/// at a given Eb/N0 in dB: 0.5 * erfc(sqrt(Eb/N0))
///
/// QPSK shares the curve because its I and Q bits are two independent BPSK
/// streams.
pub fn theoretical_ber(snr_db: f64) -> f64 {
    0.5 * erfc(from_db(snr_db).sqrt())
}

/// [`theoretical_ber`] for every SNR in `snr_db`, order preserved
pub fn theoretical_curve(snr_db: &[f64]) -> BerCurve {
    let mut curve = BerCurve::with_capacity(snr_db.len());
    for &snr in snr_db {
        curve.push(BerPoint::theoretical(snr, theoretical_ber(snr)));
    }
    curve
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rel(actual: f64, expected: f64, tol: f64) {
        let rel = ((actual - expected) / expected).abs();
        assert!(rel < tol, "actual {} expected {} (rel err {})", actual, expected, rel);
    }

    #[test]
    fn test_erfc_known_values() {
        assert_rel(erfc(0.0), 1.0, 1e-6);
        assert_rel(erfc(0.5), 0.4795001221869535, 1e-6);
        assert_rel(erfc(1.0), 0.15729920705028513, 1e-6);
        assert_rel(erfc(2.0), 0.004677734981047266, 1e-6);
        assert_rel(erfc(3.0), 2.209049699858544e-5, 1e-6);
    }

    #[test]
    fn test_erfc_negative_arguments() {
        assert_rel(erfc(-1.0), 2.0 - 0.15729920705028513, 1e-6);
        assert_rel(erfc(-3.0), 2.0 - 2.209049699858544e-5, 1e-6);
    }

    #[test]
    fn test_theoretical_ber_reference_points() {
        // 0 dB: 0.5 * erfc(1)
        assert_rel(theoretical_ber(0.0), 0.07864960352514257, 1e-6);
        // 9.6 dB is the textbook 1e-5 point
        let ber = theoretical_ber(9.6);
        assert!(ber > 1e-6 && ber < 1e-4 && (ber.log10() + 5.0).abs() < 0.1, "BER at 9.6 dB = {}", ber);
    }

    #[test]
    fn test_theoretical_curve_is_decreasing() {
        let snr: Vec<f64> = (0..=10).map(|x| x as f64).collect();
        let curve = theoretical_curve(&snr);
        assert_eq!(curve.len(), snr.len());
        assert_eq!(curve.snr_db(), snr);
        let ber = curve.ber();
        for pair in ber.windows(2) {
            assert!(pair[1] < pair[0]);
        }
        assert!(curve.validate().is_ok());
    }

    #[test]
    fn test_negative_snr_is_valid() {
        let ber = theoretical_ber(-10.0);
        assert!(ber > 0.3 && ber < 0.5);
    }
}
