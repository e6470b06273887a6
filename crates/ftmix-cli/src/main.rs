mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ftmix", about = "Frequency-domain image mixer")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and padded spectrum size
    Info(commands::info::InfoArgs),
    /// Write magnitude/phase/real/imaginary views of an image's spectrum
    Spectrum(commands::spectrum::SpectrumArgs),
    /// Mix up to four images in the frequency domain
    Mix(commands::mix::MixArgs),
    /// Print or save a default mix config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Spectrum(args) => commands::spectrum::run(args),
        Commands::Mix(args) => commands::mix::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
