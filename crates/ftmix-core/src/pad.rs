use ndarray::{s, Array2};
use tracing::debug;

use crate::grid::{IntensityGrid, PaddedGrid};

/// Smallest power of two >= `n`, with `next_pow2(0) == 1`.
pub fn next_pow2(n: usize) -> usize {
    n.next_power_of_two()
}

/// Copy `grid` into the top-left corner of a zeroed power-of-two canvas.
///
/// No resampling happens; the margin is exactly zero.
pub fn pad(grid: &IntensityGrid) -> PaddedGrid {
    let (h, w) = grid.data.dim();
    let (ph, pw) = (next_pow2(h), next_pow2(w));

    let mut data = Array2::<f32>::zeros((ph, pw));
    data.slice_mut(s![..h, ..w]).assign(&grid.data);
    debug!(width = w, height = h, padded_width = pw, padded_height = ph, "Padded grid");

    PaddedGrid {
        grid: IntensityGrid::new(data),
        source_width: w,
        source_height: h,
    }
}
