use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use ftmix_core::engine::{CancellationToken, OutputSlot};
use ftmix_core::mix::{Basis, Weight};
use ftmix_core::pipeline::config::MixConfig;
use ftmix_core::pipeline::run_mix_reported;
use ftmix_core::primitive::{RustFftPrimitive, SpectrumPrimitive};
use ftmix_core::region::MixMode;

use crate::progress::BarReporter;
use crate::summary::print_mix_summary;

#[derive(Clone, Copy, ValueEnum)]
pub enum BasisArg {
    MagPhase,
    RealImag,
}

impl From<BasisArg> for Basis {
    fn from(arg: BasisArg) -> Self {
        match arg {
            BasisArg::MagPhase => Basis::MagPhase,
            BasisArg::RealImag => Basis::RealImag,
        }
    }
}

#[derive(Args)]
pub struct MixArgs {
    /// Input images, up to four, assigned to slots in order
    pub files: Vec<PathBuf>,

    /// Mix config file (TOML); replaces all other mix options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Gains "component1,component2" for one input; repeat once per input
    #[arg(long = "gains")]
    pub gains: Vec<String>,

    /// Spectral components the gains apply to
    #[arg(long, value_enum, default_value = "mag-phase")]
    pub basis: BasisArg,

    /// Region edge length as a fraction of the spectrum (0.1-1.0);
    /// omit to mix the whole spectrum
    #[arg(long)]
    pub region_size: Option<f64>,

    /// Keep frequencies outside the region instead of inside
    #[arg(long)]
    pub outer: bool,

    /// Output slot (1 or 2)
    #[arg(long, default_value = "1")]
    pub slot: usize,

    /// Write views of the mixed spectrum to this directory
    #[arg(long)]
    pub spectrum_dir: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "mixed.png")]
    pub output: PathBuf,
}

pub fn run(args: &MixArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid mix config")?
    } else {
        build_config_from_args(args)?
    };
    config.validate().context("Invalid mix config")?;
    tracing::debug!(?config, "Resolved mix config");

    let primitive = Arc::new(RustFftPrimitive::new());
    print_mix_summary(&config, primitive.name());

    let reporter = Arc::new(BarReporter::new()?);
    let output = run_mix_reported(
        &config,
        primitive,
        reporter.clone(),
        &CancellationToken::new(),
    )?;
    reporter.finish();

    println!(
        "\n{}: {}x{} saved to {}",
        output.slot,
        output.grid.width(),
        output.grid.height(),
        config.output.display()
    );
    if let Some(ref dir) = config.spectrum_dir {
        println!("Spectrum views saved to {}", dir.display());
    }

    Ok(())
}

fn build_config_from_args(args: &MixArgs) -> Result<MixConfig> {
    if args.files.is_empty() {
        anyhow::bail!("At least one input image is required");
    }

    let weights = args
        .gains
        .iter()
        .map(|g| parse_gains(g))
        .collect::<Result<Vec<_>>>()?;

    let mode = match args.region_size {
        Some(size) => MixMode::Region {
            size,
            pass_inside: !args.outer,
        },
        None => MixMode::Component,
    };

    Ok(MixConfig {
        inputs: args.files.clone(),
        output: args.output.clone(),
        weights,
        basis: args.basis.into(),
        mode,
        output_slot: OutputSlot::from_id(args.slot)?,
        spectrum_dir: args.spectrum_dir.clone(),
    })
}

fn parse_gains(s: &str) -> Result<Weight> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Invalid gains '{s}' (expected 'component1,component2')"))?;
    if parts.len() != 2 {
        anyhow::bail!("Gains require exactly 2 values: component1,component2");
    }
    Ok(Weight::new(parts[0], parts[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_gains_accepts_negative_and_spaces() {
        let w = parse_gains(" -0.5, 1.25").unwrap();
        assert_eq!(w, Weight::new(-0.5, 1.25));
    }

    #[test]
    fn parse_gains_rejects_wrong_arity() {
        assert!(parse_gains("0.5").is_err());
        assert!(parse_gains("0.5,0.5,0.5").is_err());
        assert!(parse_gains("a,b").is_err());
    }
}
