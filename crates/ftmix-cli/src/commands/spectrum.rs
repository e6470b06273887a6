use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ftmix_core::display::{dim_inactive, spectrum_view, SpectrumComponent};
use ftmix_core::io::image_io::{load_grayscale, save_spectrum_views, save_view};
use ftmix_core::pad::pad;
use ftmix_core::region::MixMode;
use ftmix_core::transform::Transform2d;

#[derive(Args)]
pub struct SpectrumArgs {
    /// Image file
    pub file: PathBuf,

    /// Also write a magnitude view with a region mask preview (0.1-1.0)
    #[arg(long)]
    pub region_size: Option<f64>,

    /// Preview the outer region instead of the inner one
    #[arg(long)]
    pub outer: bool,

    /// Output directory
    #[arg(short, long, default_value = "spectrum")]
    pub output: PathBuf,
}

pub fn run(args: &SpectrumArgs) -> Result<()> {
    let grid = load_grayscale(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    println!("Loaded {}x{} image", grid.width(), grid.height());

    let padded = pad(&grid);
    let spectrum = Transform2d::default().forward(&padded);
    println!(
        "Spectrum size {}x{}",
        spectrum.padded_width(),
        spectrum.padded_height()
    );

    let written = save_spectrum_views(&spectrum.data, &spectrum.polar, &args.output, "spectrum")?;
    for path in &written {
        println!("Saved {}", path.display());
    }

    if let Some(size) = args.region_size {
        let mode = MixMode::Region {
            size,
            pass_inside: !args.outer,
        };
        let region = mode.region_for(spectrum.padded_width(), spectrum.padded_height())?;
        let magnitude = SpectrumComponent::Magnitude;
        let view = spectrum_view(
            &magnitude.plane(&spectrum.data, &spectrum.polar),
            magnitude.default_log_scale(),
        );
        let mask = region.mask(spectrum.padded_width(), spectrum.padded_height());
        let path = args.output.join("spectrum_region.png");
        save_view(&dim_inactive(&view, &mask), &path)?;
        println!("Saved {} ({})", path.display(), mode);
    }

    Ok(())
}
