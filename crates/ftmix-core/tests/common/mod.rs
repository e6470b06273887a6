#![allow(dead_code)]

use std::f64::consts::TAU;

use approx::abs_diff_eq;
use ndarray::Array2;
use num_complex::Complex;

use ftmix_core::grid::IntensityGrid;
use ftmix_core::primitive::SpectrumPrimitive;

/// Build a grid from row-major samples.
pub fn grid(width: usize, height: usize, samples: &[f32]) -> IntensityGrid {
    IntensityGrid::from_samples(width, height, samples.to_vec()).expect("valid shape")
}

/// Deterministic pseudo-random grid with values in [0, 255].
pub fn noise_grid(width: usize, height: usize, seed: u32) -> IntensityGrid {
    let mut state = seed.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    let data = Array2::from_shape_fn((height, width), |_| {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 24) as f32
    });
    IntensityGrid::new(data)
}

/// Horizontal ramp from 0 to 255.
pub fn ramp_grid(width: usize, height: usize) -> IntensityGrid {
    let data = Array2::from_shape_fn((height, width), |(_, c)| {
        255.0 * c as f32 / (width.max(2) - 1) as f32
    });
    IntensityGrid::new(data)
}

pub fn assert_grids_close(a: &IntensityGrid, b: &IntensityGrid, tol: f32) {
    assert_eq!(a.data.dim(), b.data.dim(), "shape mismatch");
    for ((idx, &x), &y) in a.data.indexed_iter().zip(b.data.iter()) {
        assert!(
            abs_diff_eq!(x, y, epsilon = tol),
            "mismatch at {idx:?}: {x} vs {y}"
        );
    }
}

pub fn assert_spectra_close(a: &Array2<Complex<f64>>, b: &Array2<Complex<f64>>, tol: f64) {
    assert_eq!(a.dim(), b.dim(), "shape mismatch");
    for ((idx, x), y) in a.indexed_iter().zip(b.iter()) {
        assert!(
            abs_diff_eq!(x.re, y.re, epsilon = tol) && abs_diff_eq!(x.im, y.im, epsilon = tol),
            "mismatch at {idx:?}: {x} vs {y}"
        );
    }
}

/// O(n^2) reference DFT, unnormalized in both directions.
pub struct NaiveDft;

impl NaiveDft {
    fn dft(sequence: &mut [Complex<f64>], sign: f64) {
        let n = sequence.len();
        let input = sequence.to_vec();
        for (k, out) in sequence.iter_mut().enumerate() {
            *out = input
                .iter()
                .enumerate()
                .map(|(j, &v)| {
                    let angle = sign * TAU * (j * k) as f64 / n as f64;
                    v * Complex::new(angle.cos(), angle.sin())
                })
                .sum();
        }
    }
}

impl SpectrumPrimitive for NaiveDft {
    fn name(&self) -> &str {
        "naive-dft"
    }

    fn transform(&self, sequence: &mut [Complex<f64>]) {
        Self::dft(sequence, -1.0);
    }

    fn inverse_transform(&self, sequence: &mut [Complex<f64>]) {
        Self::dft(sequence, 1.0);
    }
}
