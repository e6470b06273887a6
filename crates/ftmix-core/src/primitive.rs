use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use num_complex::Complex;
use rustfft::{Fft, FftDirection, FftPlanner};

/// Direction of a 1-D transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Inverse,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "Forward"),
            Self::Inverse => write!(f, "Inverse"),
        }
    }
}

/// In-place 1-D discrete Fourier transform of a complex sequence.
///
/// Implementations must accept any power-of-two length and must NOT
/// normalize the inverse transform: `inverse(forward(x)) == n * x`.
pub trait SpectrumPrimitive: Send + Sync {
    /// Human-readable name, used in logs and summaries.
    fn name(&self) -> &str;

    fn transform(&self, sequence: &mut [Complex<f64>]);

    fn inverse_transform(&self, sequence: &mut [Complex<f64>]);

    fn process(&self, sequence: &mut [Complex<f64>], direction: Direction) {
        match direction {
            Direction::Forward => self.transform(sequence),
            Direction::Inverse => self.inverse_transform(sequence),
        }
    }
}

/// `rustfft`-backed primitive. Plans are built once per (length, direction)
/// and shared across threads.
#[derive(Default)]
pub struct RustFftPrimitive {
    plans: RwLock<HashMap<(usize, Direction), Arc<dyn Fft<f64>>>>,
}

impl RustFftPrimitive {
    pub fn new() -> Self {
        Self::default()
    }

    fn plan(&self, len: usize, direction: Direction) -> Arc<dyn Fft<f64>> {
        let key = (len, direction);
        if let Some(plan) = self
            .plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(plan);
        }

        let fft_direction = match direction {
            Direction::Forward => FftDirection::Forward,
            Direction::Inverse => FftDirection::Inverse,
        };
        let plan = FftPlanner::new().plan_fft(len, fft_direction);
        self.plans
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(plan)
            .clone()
    }
}

impl SpectrumPrimitive for RustFftPrimitive {
    fn name(&self) -> &str {
        "rustfft"
    }

    fn transform(&self, sequence: &mut [Complex<f64>]) {
        if sequence.len() > 1 {
            self.plan(sequence.len(), Direction::Forward).process(sequence);
        }
    }

    fn inverse_transform(&self, sequence: &mut [Complex<f64>]) {
        if sequence.len() > 1 {
            self.plan(sequence.len(), Direction::Inverse).process(sequence);
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn forward_of_impulse_is_flat() {
        let prim = RustFftPrimitive::new();
        let mut seq = vec![Complex::new(0.0, 0.0); 8];
        seq[0] = Complex::new(1.0, 0.0);
        prim.transform(&mut seq);
        for c in &seq {
            assert_abs_diff_eq!(c.re, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(c.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn inverse_is_unnormalized() {
        let prim = RustFftPrimitive::new();
        let original: Vec<Complex<f64>> = (0..16).map(|i| Complex::new(i as f64, 0.0)).collect();
        let mut seq = original.clone();
        prim.transform(&mut seq);
        prim.inverse_transform(&mut seq);
        for (a, b) in seq.iter().zip(&original) {
            assert_abs_diff_eq!(a.re, 16.0 * b.re, epsilon = 1e-9);
        }
    }

    #[test]
    fn plans_are_cached_per_length_and_direction() {
        let prim = RustFftPrimitive::new();
        let mut seq = vec![Complex::new(1.0, 0.0); 4];
        prim.transform(&mut seq);
        prim.transform(&mut seq);
        prim.inverse_transform(&mut seq);
        assert_eq!(prim.plans.read().unwrap().len(), 2);
    }
}
