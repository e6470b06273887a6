use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ftmix_core::io::image_io::load_grayscale;
use ftmix_core::pad::next_pow2;

#[derive(Args)]
pub struct InfoArgs {
    /// Image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let grid = load_grayscale(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let (min, max, sum) = grid
        .data
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY, 0.0f64), |(lo, hi, s), &v| {
            (lo.min(v), hi.max(v), s + v as f64)
        });
    let mean = if grid.area() > 0 {
        sum / grid.area() as f64
    } else {
        0.0
    };

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", grid.width(), grid.height());
    println!(
        "Spectrum:    {}x{} (padded)",
        next_pow2(grid.width()),
        next_pow2(grid.height())
    );
    println!("Intensity:   min {:.1}, max {:.1}, mean {:.1}", min, max, mean);

    Ok(())
}
