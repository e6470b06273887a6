use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, Luma, RgbImage};
use ndarray::Array2;
use num_complex::Complex;

use crate::consts::{INTENSITY_MAX, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::display::{spectrum_view, SpectrumComponent};
use crate::error::Result;
use crate::grid::IntensityGrid;
use crate::spectral::PolarSpectrum;

/// Load any supported image and reduce it to BT.601 luminance in [0, 255].
pub fn load_grayscale(path: &Path) -> Result<IntensityGrid> {
    let img = image::open(path)?;
    Ok(grayscale_from_rgb(&img.to_rgb8()))
}

pub fn grayscale_from_rgb(img: &RgbImage) -> IntensityGrid {
    let (w, h) = img.dimensions();
    let data = Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
        let [r, g, b] = img.get_pixel(col as u32, row as u32).0;
        LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32
    });
    IntensityGrid::new(data)
}

/// Save an intensity grid as 8-bit grayscale PNG.
pub fn save_png(grid: &IntensityGrid, path: &Path) -> Result<()> {
    let img = GrayImage::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
        let v = grid.data[[y as usize, x as usize]];
        Luma([v.clamp(0.0, INTENSITY_MAX).round() as u8])
    });
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save an already-stretched 8-bit view as PNG.
pub fn save_view(view: &Array2<u8>, path: &Path) -> Result<()> {
    let (h, w) = view.dim();
    let img = GrayImage::from_fn(w as u32, h as u32, |x, y| Luma([view[[y as usize, x as usize]]]));
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Write `{prefix}_{component}.png` for every spectrum component into `dir`.
pub fn save_spectrum_views(
    data: &Array2<Complex<f64>>,
    polar: &PolarSpectrum,
    dir: &Path,
    prefix: &str,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(SpectrumComponent::ALL.len());
    for component in SpectrumComponent::ALL {
        let plane = component.plane(data, polar);
        let view = spectrum_view(&plane, component.default_log_scale());
        let path = dir.join(format!("{prefix}_{}.png", component.file_stem()));
        save_view(&view, &path)?;
        written.push(path);
    }
    Ok(written)
}
