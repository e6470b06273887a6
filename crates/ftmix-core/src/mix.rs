use std::fmt;

use ndarray::{Array2, Zip};
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::consts::{DEFAULT_GAIN, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{FtMixError, Result};
use crate::region::RegionSpec;
use crate::spectral::{cartesian_sample, to_polar, PolarSpectrum, Spectrum};

/// Per-image gains for the two components of the selected basis.
///
/// Gains are not normalized; negative values and sums above 1 are allowed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub component1_gain: f64,
    pub component2_gain: f64,
}

impl Weight {
    pub fn new(component1_gain: f64, component2_gain: f64) -> Self {
        Self {
            component1_gain,
            component2_gain,
        }
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::new(DEFAULT_GAIN, DEFAULT_GAIN)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.component1_gain, self.component2_gain)
    }
}

/// Which pair of spectral components the gains apply to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Basis {
    #[default]
    MagPhase,
    RealImag,
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MagPhase => write!(f, "Mag/Phase"),
            Self::RealImag => write!(f, "Real/Imag"),
        }
    }
}

/// Result of mixing several spectra. Cells outside the active region are
/// exactly zero.
#[derive(Clone, Debug)]
pub struct MixedSpectrum {
    pub data: Array2<Complex<f64>>,
    /// Magnitude/phase of `data` for display.
    pub polar: PolarSpectrum,
    pub basis: Basis,
    pub region: RegionSpec,
}

impl MixedSpectrum {
    pub fn padded_width(&self) -> usize {
        self.data.ncols()
    }

    pub fn padded_height(&self) -> usize {
        self.data.nrows()
    }
}

/// Weighted sum of `spectra` in the chosen basis, gated by `region`.
///
/// In `MagPhase` the weighted phases are summed as plain scalars, not as
/// unit phasors, before converting back to cartesian form.
pub fn mix(
    spectra: &[&Spectrum],
    weights: &[Weight],
    basis: Basis,
    region: &RegionSpec,
) -> Result<MixedSpectrum> {
    let first = spectra.first().ok_or(FtMixError::EmptyInput)?;
    if weights.len() != spectra.len() {
        return Err(FtMixError::WeightCountMismatch {
            expected: spectra.len(),
            got: weights.len(),
        });
    }
    let dim = first.dim();
    if let Some(other) = spectra.iter().find(|s| s.dim() != dim) {
        return Err(FtMixError::SpectrumSizeMismatch {
            expected: dim,
            got: other.dim(),
        });
    }

    let mix_sample = |(y, x): (usize, usize), out: &mut Complex<f64>| {
        if !region.classify(x, y) {
            return;
        }
        let mut comp1 = 0.0;
        let mut comp2 = 0.0;
        for (spectrum, weight) in spectra.iter().zip(weights) {
            let (a, b) = match basis {
                Basis::MagPhase => (
                    spectrum.polar.magnitude[[y, x]],
                    spectrum.polar.phase[[y, x]],
                ),
                Basis::RealImag => {
                    let c = spectrum.data[[y, x]];
                    (c.re, c.im)
                }
            };
            comp1 += a * weight.component1_gain;
            comp2 += b * weight.component2_gain;
        }
        *out = match basis {
            Basis::MagPhase => cartesian_sample(comp1, comp2),
            Basis::RealImag => Complex::new(comp1, comp2),
        };
    };

    let mut data = Array2::<Complex<f64>>::zeros(dim);
    if data.len() >= PARALLEL_PIXEL_THRESHOLD {
        Zip::indexed(&mut data).par_for_each(mix_sample);
    } else {
        Zip::indexed(&mut data).for_each(mix_sample);
    }

    info!(
        images = spectra.len(),
        basis = %basis,
        padded_width = dim.1,
        padded_height = dim.0,
        pass_inside = region.pass_inside,
        "Mixed spectra"
    );

    let polar = to_polar(&data);
    Ok(MixedSpectrum {
        data,
        polar,
        basis,
        region: *region,
    })
}
