pub mod awgn;
pub mod random_source;

pub use awgn::{noise_scale, AWGN};
pub use random_source::RandomSource;
