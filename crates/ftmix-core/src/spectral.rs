use ndarray::{Array2, Zip};
use num_complex::Complex;

use crate::error::{FtMixError, Result};

/// Polar form of a complex spectrum.
#[derive(Clone, Debug, PartialEq)]
pub struct PolarSpectrum {
    /// Always >= 0.
    pub magnitude: Array2<f64>,
    /// In (-pi, pi].
    pub phase: Array2<f64>,
}

/// Centered 2-D spectrum of one padded image.
#[derive(Clone, Debug)]
pub struct Spectrum {
    /// Complex coefficients, zero frequency at `(h/2, w/2)`.
    pub data: Array2<Complex<f64>>,
    /// Magnitude/phase of `data`, derived once at construction.
    pub polar: PolarSpectrum,
    /// Width of the image before padding.
    pub source_width: usize,
    /// Height of the image before padding.
    pub source_height: usize,
}

impl Spectrum {
    pub fn new(data: Array2<Complex<f64>>, source_width: usize, source_height: usize) -> Self {
        let polar = to_polar(&data);
        Self {
            data,
            polar,
            source_width,
            source_height,
        }
    }

    pub fn padded_width(&self) -> usize {
        self.data.ncols()
    }

    pub fn padded_height(&self) -> usize {
        self.data.nrows()
    }

    /// `(height, width)` of the padded grid.
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn real(&self) -> Array2<f64> {
        self.data.mapv(|c| c.re)
    }

    pub fn imag(&self) -> Array2<f64> {
        self.data.mapv(|c| c.im)
    }
}

/// `(magnitude, phase)` of one coefficient. `atan2(0, 0)` is 0.
pub fn polar_sample(c: Complex<f64>) -> (f64, f64) {
    ((c.re * c.re + c.im * c.im).sqrt(), c.im.atan2(c.re))
}

/// Complex coefficient from magnitude and phase.
pub fn cartesian_sample(magnitude: f64, phase: f64) -> Complex<f64> {
    Complex::new(magnitude * phase.cos(), magnitude * phase.sin())
}

pub fn to_polar(data: &Array2<Complex<f64>>) -> PolarSpectrum {
    PolarSpectrum {
        magnitude: data.mapv(|c| polar_sample(c).0),
        phase: data.mapv(|c| polar_sample(c).1),
    }
}

pub fn to_cartesian(polar: &PolarSpectrum) -> Result<Array2<Complex<f64>>> {
    let expected = polar.magnitude.dim();
    let got = polar.phase.dim();
    if expected != got {
        return Err(FtMixError::SpectrumSizeMismatch { expected, got });
    }
    Ok(Zip::from(&polar.magnitude)
        .and(&polar.phase)
        .map_collect(|&m, &p| cartesian_sample(m, p)))
}
