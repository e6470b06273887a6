use std::fmt;

use ndarray::{Array2, Zip};
use num_complex::Complex;

use crate::consts::INTENSITY_MAX;
use crate::spectral::PolarSpectrum;

/// One plane of a complex spectrum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpectrumComponent {
    Magnitude,
    Phase,
    Real,
    Imaginary,
}

impl SpectrumComponent {
    pub const ALL: [SpectrumComponent; 4] =
        [Self::Magnitude, Self::Phase, Self::Real, Self::Imaginary];

    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::Magnitude => "magnitude",
            Self::Phase => "phase",
            Self::Real => "real",
            Self::Imaginary => "imaginary",
        }
    }

    /// Phase is already bounded; the other planes span many decades.
    pub fn default_log_scale(&self) -> bool {
        !matches!(self, Self::Phase)
    }

    pub fn plane(&self, data: &Array2<Complex<f64>>, polar: &PolarSpectrum) -> Array2<f64> {
        match self {
            Self::Magnitude => polar.magnitude.clone(),
            Self::Phase => polar.phase.clone(),
            Self::Real => data.mapv(|c| c.re),
            Self::Imaginary => data.mapv(|c| c.im),
        }
    }
}

impl fmt::Display for SpectrumComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Magnitude => write!(f, "Magnitude"),
            Self::Phase => write!(f, "Phase"),
            Self::Real => write!(f, "Real"),
            Self::Imaginary => write!(f, "Imaginary"),
        }
    }
}

/// Stretch arbitrary values to 0..=255 for viewing.
///
/// With `log_scale`, values are compressed with `ln(1 + |v|)` first.
/// A flat plane maps to 0.
pub fn spectrum_view(values: &Array2<f64>, log_scale: bool) -> Array2<u8> {
    let processed = if log_scale {
        values.mapv(|v| v.abs().ln_1p())
    } else {
        values.clone()
    };

    let (min, max) = processed
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = if max - min > 0.0 { max - min } else { 1.0 };

    processed.mapv(|v| (((v - min) / range) * INTENSITY_MAX as f64).round() as u8)
}

/// Dim the cells a region mask rejects, for previewing a mask over a view.
pub fn dim_inactive(view: &Array2<u8>, mask: &Array2<bool>) -> Array2<u8> {
    Zip::from(view)
        .and(mask)
        .map_collect(|&v, &active| if active { v } else { v / 4 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_plane_maps_to_zero() {
        let view = spectrum_view(&Array2::from_elem((3, 3), 42.0), false);
        assert!(view.iter().all(|&v| v == 0));
    }

    #[test]
    fn linear_stretch_spans_full_range() {
        let values = Array2::from_shape_vec((1, 3), vec![-1.0, 0.0, 1.0]).unwrap();
        let view = spectrum_view(&values, false);
        assert_eq!(view.as_slice().unwrap(), &[0, 128, 255]);
    }

    #[test]
    fn dim_inactive_keeps_active_cells() {
        let view = Array2::from_elem((1, 2), 200u8);
        let mask = Array2::from_shape_vec((1, 2), vec![true, false]).unwrap();
        let dimmed = dim_inactive(&view, &mask);
        assert_eq!(dimmed.as_slice().unwrap(), &[200, 50]);
    }

    #[test]
    fn log_scale_is_symmetric_in_sign() {
        let values = Array2::from_shape_vec((1, 3), vec![-100.0, 0.0, 100.0]).unwrap();
        let view = spectrum_view(&values, true);
        assert_eq!(view[[0, 0]], 255);
        assert_eq!(view[[0, 1]], 0);
        assert_eq!(view[[0, 2]], 255);
    }
}
