use std::sync::Arc;

use tracing::info;

use crate::engine::{CancellationToken, FourierMixer, MixOutput};
use crate::error::Result;
use crate::grid::IntensityGrid;
use crate::io::image_io::{load_grayscale, save_png, save_spectrum_views};
use crate::primitive::{RustFftPrimitive, SpectrumPrimitive};
use crate::transform::Transform2d;

use super::config::MixConfig;
use super::types::{MixStage, NoOpReporter, ProgressReporter};

/// Load, mix and write according to `config`, with a thread-safe progress
/// reporter and a cancellation token checked between stages.
pub fn run_mix_reported(
    config: &MixConfig,
    primitive: Arc<dyn SpectrumPrimitive>,
    reporter: Arc<dyn ProgressReporter>,
    cancel: &CancellationToken,
) -> Result<MixOutput> {
    config.validate()?;
    info!(
        inputs = config.inputs.len(),
        primitive = primitive.name(),
        "Starting mix"
    );

    reporter.begin_stage(MixStage::Loading, Some(config.inputs.len()));
    let mut grids: Vec<IntensityGrid> = Vec::with_capacity(config.inputs.len());
    for path in &config.inputs {
        grids.push(load_grayscale(path)?);
        reporter.advance(grids.len());
    }
    reporter.finish_stage();
    cancel.check(MixStage::Loading)?;

    let mut mixer = FourierMixer::new(Transform2d::new(primitive));
    mixer.load_all_reported(grids, cancel, reporter.as_ref())?;
    let output = mixer.mix_reported(&config.request(), cancel, reporter.as_ref())?;

    reporter.begin_stage(MixStage::Writing, None);
    save_png(&output.grid, &config.output)?;
    if let Some(ref dir) = config.spectrum_dir {
        save_spectrum_views(&output.spectrum.data, &output.spectrum.polar, dir, "mixed")?;
    }
    reporter.finish_stage();
    info!(
        output = %config.output.display(),
        primitive = mixer.transform().primitive_name(),
        "Mix written"
    );

    Ok(output)
}

/// Run [`run_mix_reported`] with the `rustfft` primitive and no progress
/// reporting or cancellation.
pub fn run_mix(config: &MixConfig) -> Result<MixOutput> {
    run_mix_reported(
        config,
        Arc::new(RustFftPrimitive::new()),
        Arc::new(NoOpReporter),
        &CancellationToken::new(),
    )
}
