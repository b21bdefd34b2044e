use std::collections::HashMap;
use num_complex::Complex;
use num_traits::Float;

use crate::Bit;

/// QPSK hard-decision table, indexed `[re > 0][im > 0]`
///
/// Entries are (first bit, second bit) in modulation input order.
const QPSK_DECISION: [[(Bit, Bit); 2]; 2] = [
    [(1, 1), (1, 0)], // re <= 0: (-,-) -> 11, (-,+) -> 10
    [(0, 1), (0, 0)], // re >  0: (+,-) -> 01, (+,+) -> 00
];

/// BPSK constellation point for one bit, rotated by `offset` radians
///
/// 1 -> cos(offset) + i sin(offset), 0 -> the antipodal point.
pub fn bpsk_point<T: Float>(bit: Bit, offset: T) -> Complex<T> {
    let point = Complex::new(offset.cos(), offset.sin());
    if bit == 0 { -point } else { point }
}

/// BPSK map for a given phase reference
pub fn bpsk_map<T: Float>(offset: T) -> HashMap<Bit, Complex<T>> {
    let mut map = HashMap::new();
    map.insert(0, bpsk_point(0, offset));
    map.insert(1, bpsk_point(1, offset));
    map
}

/// BPSK hard decision: project onto the signal axis and slice at zero
pub fn bpsk_decision<T: Float>(symbol: &Complex<T>, offset: T) -> Bit {
    let projection = symbol.im * offset.sin() + symbol.re * offset.cos();
    if projection < T::zero() { 0 } else { 1 }
}

/// QPSK constellation point for a bit pair, normalized to unit power
///
/// Each bit drives one axis: b -> 1 - 2b, so
///   00 -> ( 1,  1)
///   01 -> ( 1, -1)
///   10 -> (-1,  1)
///   11 -> (-1, -1)
/// before the 1/sqrt(2) scaling.
pub fn qpsk_point<T: Float>(first: Bit, second: Bit) -> Complex<T> {
    let scale = T::one() / T::from(2.0).unwrap().sqrt();
    let axis = |bit: Bit| if bit == 0 { T::one() } else { -T::one() };
    Complex::new(axis(first), axis(second)) * scale
}

/// QPSK map keyed by the bit pair packed as `first << 1 | second`
pub fn qpsk_map<T: Float>() -> HashMap<u8, Complex<T>> {
    let mut map = HashMap::new();
    for bits in 0u8..4 {
        map.insert(bits, qpsk_point((bits >> 1) & 1, bits & 1));
    }
    map
}

/// QPSK hard decision on the signs of the I and Q components
pub fn qpsk_decision<T: Float>(symbol: &Complex<T>) -> (Bit, Bit) {
    let re_positive = (symbol.re > T::zero()) as usize;
    let im_positive = (symbol.im > T::zero()) as usize;
    QPSK_DECISION[re_positive][im_positive]
}
