use std::sync::Arc;

use ndarray::{Array2, ArrayViewMut1, Axis, Zip};
use num_complex::Complex;
use num_traits::Zero;
use tracing::debug;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::grid::PaddedGrid;
use crate::primitive::{Direction, RustFftPrimitive, SpectrumPrimitive};
use crate::spectral::Spectrum;

/// Separable 2-D transform built on an injected 1-D primitive.
///
/// Both dimensions must be powers of two; feed it through [`crate::pad::pad`].
#[derive(Clone)]
pub struct Transform2d {
    primitive: Arc<dyn SpectrumPrimitive>,
}

impl Default for Transform2d {
    fn default() -> Self {
        Self::new(Arc::new(RustFftPrimitive::new()))
    }
}

impl Transform2d {
    pub fn new(primitive: Arc<dyn SpectrumPrimitive>) -> Self {
        Self { primitive }
    }

    pub fn primitive_name(&self) -> &str {
        self.primitive.name()
    }

    /// Forward-transform a padded intensity grid into a centered spectrum.
    pub fn forward(&self, padded: &PaddedGrid) -> Spectrum {
        let complex = padded.grid.data.mapv(|v| Complex::new(v as f64, 0.0));
        let data = self.forward_transform(&complex);
        debug!(
            width = padded.width(),
            height = padded.height(),
            primitive = self.primitive_name(),
            "Forward transform complete"
        );
        Spectrum::new(data, padded.source_width, padded.source_height)
    }

    /// Rows, then columns, then shift the zero frequency to the center.
    pub fn forward_transform(&self, data: &Array2<Complex<f64>>) -> Array2<Complex<f64>> {
        let mut work = data.to_owned();
        transform_lanes(&mut work, Axis(1), self.primitive.as_ref(), Direction::Forward);
        transform_lanes(&mut work, Axis(0), self.primitive.as_ref(), Direction::Forward);
        shift(&work)
    }

    /// Unshift, then columns, then rows. The result is NOT divided by `h*w`.
    pub fn inverse_transform(&self, data: &Array2<Complex<f64>>) -> Array2<Complex<f64>> {
        let mut work = shift(data);
        transform_lanes(&mut work, Axis(0), self.primitive.as_ref(), Direction::Inverse);
        transform_lanes(&mut work, Axis(1), self.primitive.as_ref(), Direction::Inverse);
        work
    }
}

/// Swap diagonal quadrants: `(y, x)` moves to `((y + h/2) % h, (x + w/2) % w)`.
///
/// Self-inverse for even dimensions; a 1-wide axis is left untouched.
pub fn shift<T: Clone + Zero>(data: &Array2<T>) -> Array2<T> {
    let (h, w) = data.dim();
    let (half_h, half_w) = (h / 2, w / 2);
    let mut shifted = Array2::<T>::zeros((h, w));
    for ((y, x), value) in data.indexed_iter() {
        shifted[[(y + half_h) % h, (x + half_w) % w]] = value.clone();
    }
    shifted
}

/// Run the primitive over every 1-D lane along `axis`.
/// `Axis(1)` lanes are rows, `Axis(0)` lanes are columns.
fn transform_lanes(
    data: &mut Array2<Complex<f64>>,
    axis: Axis,
    primitive: &dyn SpectrumPrimitive,
    direction: Direction,
) {
    let parallel = data.len() >= PARALLEL_PIXEL_THRESHOLD;
    let lanes = Zip::from(data.lanes_mut(axis));
    if parallel {
        lanes.par_for_each(|mut lane| process_lane(&mut lane, primitive, direction));
    } else {
        lanes.for_each(|mut lane| process_lane(&mut lane, primitive, direction));
    }
}

fn process_lane(
    lane: &mut ArrayViewMut1<'_, Complex<f64>>,
    primitive: &dyn SpectrumPrimitive,
    direction: Direction,
) {
    if let Some(contiguous) = lane.as_slice_mut() {
        primitive.process(contiguous, direction);
        return;
    }
    // Columns of a row-major array are strided
    let mut buffer = lane.to_vec();
    primitive.process(&mut buffer, direction);
    for (dst, src) in lane.iter_mut().zip(buffer) {
        *dst = src;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_moves_origin_to_center() {
        let mut data = Array2::<f64>::zeros((4, 8));
        data[[0, 0]] = 1.0;
        let shifted = shift(&data);
        assert_eq!(shifted[[2, 4]], 1.0);
        assert_eq!(shifted.sum(), 1.0);
    }

    #[test]
    fn shift_single_column_is_identity_along_width() {
        let data = Array2::from_shape_vec((4, 1), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let shifted = shift(&data);
        assert_eq!(shifted.column(0).to_vec(), vec![3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn one_by_one_is_identity() {
        let t = Transform2d::default();
        let data = Array2::from_elem((1, 1), Complex::new(7.0, 0.0));
        let f = t.forward_transform(&data);
        assert_eq!(f[[0, 0]], Complex::new(7.0, 0.0));
        let i = t.inverse_transform(&f);
        assert_eq!(i[[0, 0]], Complex::new(7.0, 0.0));
    }
}
