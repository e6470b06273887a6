use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};
use ndarray::Array2;

use crate::consts::INTENSITY_MAX;
use crate::error::{FtMixError, Result};

/// A single-channel intensity image.
/// Samples are f32 in [0.0, 255.0].
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityGrid {
    /// Sample data, row-major, shape = (height, width)
    pub data: Array2<f32>,
}

/// Reconstructed mix result, cropped back to the source dimensions.
pub type OutputGrid = IntensityGrid;

impl IntensityGrid {
    pub fn new(data: Array2<f32>) -> Self {
        Self { data }
    }

    pub fn zeros(width: usize, height: usize) -> Self {
        Self::new(Array2::zeros((height, width)))
    }

    /// Build a grid from a row-major sample buffer.
    pub fn from_samples(width: usize, height: usize, samples: Vec<f32>) -> Result<Self> {
        let data = Array2::from_shape_vec((height, width), samples)
            .map_err(|_| FtMixError::InvalidDimensions { width, height })?;
        Ok(Self::new(data))
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn area(&self) -> usize {
        self.data.len()
    }

    /// Resample to `width`x`height` with a Lanczos3 filter.
    ///
    /// Filter overshoot is clamped back into the intensity range.
    pub fn resized(&self, width: usize, height: usize) -> Result<Self> {
        if width == self.width() && height == self.height() {
            return Ok(self.clone());
        }
        if width == 0 || height == 0 || self.area() == 0 {
            return Ok(Self::zeros(width, height));
        }

        let source = ImageBuffer::<Luma<f32>, Vec<f32>>::from_raw(
            self.width() as u32,
            self.height() as u32,
            self.data.iter().copied().collect(),
        )
        .ok_or(FtMixError::InvalidDimensions {
            width: self.width(),
            height: self.height(),
        })?;

        let resized = imageops::resize(&source, width as u32, height as u32, FilterType::Lanczos3);
        let samples = resized
            .into_raw()
            .into_iter()
            .map(|v| v.clamp(0.0, INTENSITY_MAX))
            .collect();
        Self::from_samples(width, height, samples)
    }
}

/// An intensity grid lifted to power-of-two dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct PaddedGrid {
    pub grid: IntensityGrid,
    /// Width before padding.
    pub source_width: usize,
    /// Height before padding.
    pub source_height: usize,
}

impl PaddedGrid {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }
}

/// Dimensions of the smallest-area grid, as `(width, height)`.
///
/// Ties resolve to the first grid. Returns `None` for an empty iterator.
pub fn unified_size<'a, I>(grids: I) -> Option<(usize, usize)>
where
    I: IntoIterator<Item = &'a IntensityGrid>,
{
    grids
        .into_iter()
        .min_by_key(|g| g.area())
        .map(|g| (g.width(), g.height()))
}
