use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::consts::{MAX_INPUT_SLOTS, OUTPUT_SLOT_COUNT};
use crate::error::{FtMixError, Result};
use crate::grid::{unified_size, IntensityGrid, OutputGrid, PaddedGrid};
use crate::mix::{mix, Basis, MixedSpectrum, Weight};
use crate::pad::pad;
use crate::pipeline::{MixStage, NoOpReporter, ProgressReporter};
use crate::reconstruct::reconstruct;
use crate::region::MixMode;
use crate::spectral::Spectrum;
use crate::transform::Transform2d;

/// Cooperative cancellation flag shared between the caller and a running mix.
///
/// Sampled only at stage boundaries.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once [`cancel`](Self::cancel) has been called.
    pub fn check(&self, after: MixStage) -> Result<()> {
        if self.is_cancelled() {
            warn!(stage = %after, "Mix cancelled");
            return Err(FtMixError::Cancelled);
        }
        Ok(())
    }
}

/// Destination of a finished mix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputSlot {
    #[default]
    First,
    Second,
}

impl OutputSlot {
    pub fn index(&self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// Slot from its 1-based id.
    pub fn from_id(id: usize) -> Result<Self> {
        match id {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            _ => Err(FtMixError::InvalidSlot {
                slot: id,
                count: OUTPUT_SLOT_COUNT,
            }),
        }
    }
}

impl fmt::Display for OutputSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Output {}", self.index() + 1)
    }
}

/// Everything a single mix needs besides the loaded spectra.
#[derive(Clone, Debug, PartialEq)]
pub struct MixRequest {
    /// One weight per input slot; weights of empty slots are ignored.
    pub weights: [Weight; MAX_INPUT_SLOTS],
    pub basis: Basis,
    pub mode: MixMode,
    pub output_slot: OutputSlot,
}

impl Default for MixRequest {
    fn default() -> Self {
        Self {
            weights: [Weight::default(); MAX_INPUT_SLOTS],
            basis: Basis::default(),
            mode: MixMode::default(),
            output_slot: OutputSlot::default(),
        }
    }
}

/// A finished mix.
#[derive(Clone, Debug)]
pub struct MixOutput {
    pub slot: OutputSlot,
    pub grid: OutputGrid,
    pub spectrum: MixedSpectrum,
}

/// One loaded input image and everything derived from it.
#[derive(Clone, Debug)]
pub struct SlotImage {
    /// The grid as supplied by the loader.
    pub original: IntensityGrid,
    /// `original` resampled to the unified size.
    pub unified: IntensityGrid,
    /// Centered spectrum of the padded `unified` grid.
    pub spectrum: Spectrum,
}

/// Four input slots sharing one unified size, plus the transform used to
/// derive their spectra.
#[derive(Clone, Default)]
pub struct FourierMixer {
    transform: Transform2d,
    slots: [Option<SlotImage>; MAX_INPUT_SLOTS],
}

impl FourierMixer {
    pub fn new(transform: Transform2d) -> Self {
        Self {
            transform,
            slots: Default::default(),
        }
    }

    pub fn transform(&self) -> &Transform2d {
        &self.transform
    }

    pub fn slot(&self, index: usize) -> Option<&SlotImage> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn loaded_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|_| i))
            .collect()
    }

    /// Unified `(width, height)` of every loaded slot.
    pub fn unified_size(&self) -> Option<(usize, usize)> {
        self.slots
            .iter()
            .flatten()
            .next()
            .map(|s| (s.unified.width(), s.unified.height()))
    }

    pub fn load(&mut self, index: usize, grid: IntensityGrid) -> Result<()> {
        self.load_reported(index, grid, &CancellationToken::new(), &NoOpReporter)
    }

    /// Put `grid` into slot `index` and re-derive every slot.
    ///
    /// On error or cancellation the mixer is left unchanged.
    pub fn load_reported(
        &mut self,
        index: usize,
        grid: IntensityGrid,
        cancel: &CancellationToken,
        reporter: &dyn ProgressReporter,
    ) -> Result<()> {
        check_input_slot(index)?;
        if grid.width() == 0 || grid.height() == 0 {
            return Err(FtMixError::InvalidDimensions {
                width: grid.width(),
                height: grid.height(),
            });
        }
        let mut originals = self.originals();
        originals[index] = Some(grid);
        self.slots = self.derive(originals, cancel, reporter)?;
        Ok(())
    }

    /// Fill slots `0..grids.len()` in order, replacing all current content.
    pub fn load_all_reported(
        &mut self,
        grids: Vec<IntensityGrid>,
        cancel: &CancellationToken,
        reporter: &dyn ProgressReporter,
    ) -> Result<()> {
        if grids.len() > MAX_INPUT_SLOTS {
            return Err(FtMixError::InvalidSlot {
                slot: grids.len() - 1,
                count: MAX_INPUT_SLOTS,
            });
        }
        if let Some(empty) = grids.iter().find(|g| g.area() == 0) {
            return Err(FtMixError::InvalidDimensions {
                width: empty.width(),
                height: empty.height(),
            });
        }
        let mut originals: [Option<IntensityGrid>; MAX_INPUT_SLOTS] = Default::default();
        for (slot, grid) in originals.iter_mut().zip(grids) {
            *slot = Some(grid);
        }
        self.slots = self.derive(originals, cancel, reporter)?;
        Ok(())
    }

    /// Empty slot `index`; remaining slots are re-derived at the new unified size.
    pub fn clear(&mut self, index: usize) -> Result<()> {
        check_input_slot(index)?;
        let mut originals = self.originals();
        originals[index] = None;
        self.slots = self.derive(originals, &CancellationToken::new(), &NoOpReporter)?;
        Ok(())
    }

    fn originals(&self) -> [Option<IntensityGrid>; MAX_INPUT_SLOTS] {
        self.slots
            .each_ref()
            .map(|s| s.as_ref().map(|s| s.original.clone()))
    }

    /// Resample to the smallest loaded size, pad and forward-transform every
    /// slot into fresh buffers.
    fn derive(
        &self,
        originals: [Option<IntensityGrid>; MAX_INPUT_SLOTS],
        cancel: &CancellationToken,
        reporter: &dyn ProgressReporter,
    ) -> Result<[Option<SlotImage>; MAX_INPUT_SLOTS]> {
        let mut slots: [Option<SlotImage>; MAX_INPUT_SLOTS] = Default::default();
        let Some((width, height)) = unified_size(originals.iter().flatten()) else {
            return Ok(slots);
        };
        let count = originals.iter().flatten().count();

        reporter.begin_stage(MixStage::Padding, Some(count));
        let done = AtomicUsize::new(0);
        let prepared: Vec<Option<(IntensityGrid, IntensityGrid, PaddedGrid)>> =
            Vec::from(originals)
                .into_par_iter()
                .map(|original| -> Result<_> {
                    let Some(original) = original else {
                        return Ok(None);
                    };
                    let unified = original.resized(width, height)?;
                    let padded = pad(&unified);
                    reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
                    Ok(Some((original, unified, padded)))
                })
                .collect::<Result<_>>()?;
        reporter.finish_stage();
        cancel.check(MixStage::Padding)?;

        reporter.begin_stage(MixStage::ForwardTransform, Some(count));
        let done = AtomicUsize::new(0);
        let derived: Vec<Option<SlotImage>> = prepared
            .into_par_iter()
            .map(|entry| {
                entry.map(|(original, unified, padded)| {
                    let spectrum = self.transform.forward(&padded);
                    reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
                    SlotImage {
                        original,
                        unified,
                        spectrum,
                    }
                })
            })
            .collect();
        reporter.finish_stage();
        cancel.check(MixStage::ForwardTransform)?;

        for (slot, image) in slots.iter_mut().zip(derived) {
            *slot = image;
        }
        info!(images = count, width, height, "Prepared input spectra");
        Ok(slots)
    }

    pub fn mix(&self, request: &MixRequest, cancel: &CancellationToken) -> Result<MixOutput> {
        self.mix_reported(request, cancel, &NoOpReporter)
    }

    /// Mix every loaded slot into fresh buffers and reconstruct the result.
    pub fn mix_reported(
        &self,
        request: &MixRequest,
        cancel: &CancellationToken,
        reporter: &dyn ProgressReporter,
    ) -> Result<MixOutput> {
        let (indices, loaded): (Vec<usize>, Vec<&SlotImage>) = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (i, s)))
            .unzip();
        let first = loaded.first().ok_or(FtMixError::EmptyInput)?;
        let (width, height) = (first.unified.width(), first.unified.height());

        let spectra: Vec<&Spectrum> = loaded.iter().map(|s| &s.spectrum).collect();
        let weights: Vec<Weight> = indices.iter().map(|&i| request.weights[i]).collect();
        let region = request
            .mode
            .region_for(first.spectrum.padded_width(), first.spectrum.padded_height())?;

        reporter.begin_stage(MixStage::Mixing, None);
        let mixed = mix(&spectra, &weights, request.basis, &region)?;
        reporter.finish_stage();
        cancel.check(MixStage::Mixing)?;

        reporter.begin_stage(MixStage::Reconstruction, None);
        let grid = reconstruct(&self.transform, &mixed.data, width, height)?;
        reporter.finish_stage();
        cancel.check(MixStage::Reconstruction)?;

        info!(
            slot = %request.output_slot,
            mode = %request.mode,
            basis = %request.basis,
            width,
            height,
            "Mix complete"
        );
        Ok(MixOutput {
            slot: request.output_slot,
            grid,
            spectrum: mixed,
        })
    }

    /// Mix and publish to `request.output_slot`; nothing is published on error.
    pub fn mix_into(
        &self,
        request: &MixRequest,
        cancel: &CancellationToken,
        bank: &OutputBank,
    ) -> Result<Arc<MixOutput>> {
        let output = self.mix(request, cancel)?;
        Ok(bank.publish(output))
    }
}

fn check_input_slot(index: usize) -> Result<()> {
    if index >= MAX_INPUT_SLOTS {
        return Err(FtMixError::InvalidSlot {
            slot: index,
            count: MAX_INPUT_SLOTS,
        });
    }
    Ok(())
}

/// Output slots holding the latest finished mix each.
///
/// Publishing replaces a slot wholesale under a lock; the last writer wins.
#[derive(Debug, Default)]
pub struct OutputBank {
    slots: Mutex<[Option<Arc<MixOutput>>; OUTPUT_SLOT_COUNT]>,
}

impl OutputBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, output: MixOutput) -> Arc<MixOutput> {
        let index = output.slot.index();
        let output = Arc::new(output);
        self.lock()[index] = Some(Arc::clone(&output));
        output
    }

    pub fn get(&self, slot: OutputSlot) -> Option<Arc<MixOutput>> {
        self.lock()[slot.index()].clone()
    }

    pub fn clear(&self, slot: OutputSlot) {
        self.lock()[slot.index()] = None;
    }

    fn lock(&self) -> MutexGuard<'_, [Option<Arc<MixOutput>>; OUTPUT_SLOT_COUNT]> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
