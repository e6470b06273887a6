use ndarray::{s, Array2};
use num_complex::Complex;
use tracing::debug;

use crate::consts::INTENSITY_MAX;
use crate::error::{FtMixError, Result};
use crate::grid::{IntensityGrid, OutputGrid};
use crate::transform::Transform2d;

/// Inverse-transform a centered spectrum back to intensities.
///
/// Divides by `padded_w * padded_h`, clamps to [0, 255], and keeps the
/// top-left `original_width`x`original_height` block.
pub fn reconstruct(
    transform: &Transform2d,
    spectrum: &Array2<Complex<f64>>,
    original_width: usize,
    original_height: usize,
) -> Result<OutputGrid> {
    let (ph, pw) = spectrum.dim();
    if original_width > pw || original_height > ph {
        return Err(FtMixError::DimensionMismatch {
            original_width,
            original_height,
            padded_width: pw,
            padded_height: ph,
        });
    }

    let spatial = transform.inverse_transform(spectrum);
    let scale = 1.0 / (pw * ph) as f64;
    let cropped = spatial
        .slice(s![..original_height, ..original_width])
        .mapv(|c| (c.re * scale).clamp(0.0, INTENSITY_MAX as f64) as f32);

    debug!(
        padded_width = pw,
        padded_height = ph,
        width = original_width,
        height = original_height,
        "Reconstructed spatial grid"
    );
    Ok(IntensityGrid::new(cropped))
}
