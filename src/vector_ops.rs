use std::cmp::PartialOrd;
use std::ops::Add;

use num_traits::Float;

use crate::error::{Result, SimError};

pub fn max<T: Copy + PartialOrd>(vector: &[T]) -> Option<(usize, T)> {
    let mut iter = vector.iter().copied().enumerate();
    let (mut max_idx, mut max_val) = iter.next()?;

    for (i, val) in iter {
        if val > max_val {
            max_val = val;
            max_idx = i;
        }
    }

    Some((max_idx, max_val))
}

/// Power ratio to decibels
pub fn to_db<T: Float>(value: T) -> T {
    T::from(10.0).unwrap() * value.log10()
}

/// Decibels to power ratio
pub fn from_db<T: Float>(value_db: T) -> T {
    T::from(10.0).unwrap().powf(value_db / T::from(10.0).unwrap())
}

/// Elementwise sum of two equal-length sequences
pub fn add<T>(a: &[T], b: &[T]) -> Result<Vec<T>>
where
    T: Add<Output = T> + Copy,
{
    if a.len() != b.len() {
        return Err(SimError::LengthMismatch { expected: a.len(), actual: b.len() });
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| *x + *y).collect())
}

/// In-place elementwise sum, `target += other`
pub fn add_in_place<T>(target: &mut [T], other: &[T]) -> Result<()>
where
    T: Add<Output = T> + Copy,
{
    if target.len() != other.len() {
        return Err(SimError::LengthMismatch { expected: target.len(), actual: other.len() });
    }
    target.iter_mut().zip(other.iter()).for_each(|(x, y)| *x = *x + *y);
    Ok(())
}
