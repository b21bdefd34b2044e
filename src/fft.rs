use num_complex::Complex;
use num_traits::Float;
use rustfft::{FftNum, FftPlanner};

/// Forward FFT in place, scaled by 1/N
pub fn fft<T: Float + FftNum>(input: &mut [Complex<T>]) {
    let mut planner = FftPlanner::<T>::new();
    let fft_forward = planner.plan_fft_forward(input.len());
    fft_forward.process(input);
    scale(input);
}

/// Inverse FFT in place (unscaled, undoes [`fft`])
pub fn ifft<T: Float + FftNum>(input: &mut [Complex<T>]) {
    let mut planner = FftPlanner::<T>::new();
    let fft_inverse = planner.plan_fft_inverse(input.len());
    fft_inverse.process(input);
}

pub fn scale<T: Float>(input: &mut [Complex<T>]) {
    if input.is_empty() {
        return;
    }
    let nfft = T::from(input.len()).unwrap();
    input.iter_mut().for_each(|x| *x = *x / nfft);
}

/// Move the zero-frequency bin to the center
pub fn fftshift<T>(input: &mut [T]) {
    let n = input.len();
    input.rotate_right(n / 2);
}

/// Bin frequencies, in cycles per sample, matching [`fftshift`] order
pub fn fftfreqs_shifted<T: Float>(n: usize) -> Vec<T> {
    let nf = T::from(n).unwrap();
    let half = T::from(n / 2).unwrap();
    (0..n).map(|i| (T::from(i).unwrap() - half) / nf).collect()
}

/// Test tone sin(k) + i cos(k), k = 0..n
///
/// Equal to i*exp(-ik): a single line at -1/(2*pi) cycles per sample.
pub fn test_tone<T: Float>(n: usize) -> Vec<Complex<T>> {
    (0..n)
        .map(|k| {
            let k = T::from(k).unwrap();
            Complex::new(k.sin(), k.cos())
        })
        .collect()
}

/// Magnitude spectrum of the test tone as (frequency, |X|) pairs, centered
pub fn tone_spectrum(n: usize) -> Vec<(f64, f64)> {
    let mut tone = test_tone::<f64>(n);
    fft(&mut tone);
    let mut magnitude: Vec<f64> = tone.iter().map(|x| x.norm()).collect();
    fftshift(&mut magnitude);
    fftfreqs_shifted::<f64>(n).into_iter().zip(magnitude).collect()
}
