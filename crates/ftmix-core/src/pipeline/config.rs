use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_INPUT_SLOTS;
use crate::engine::{MixRequest, OutputSlot};
use crate::error::{FtMixError, Result};
use crate::mix::{Basis, Weight};
use crate::region::MixMode;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MixConfig {
    /// Input images, one per slot, in slot order.
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    /// Per-input weights. Empty means the default weight for every input.
    #[serde(default)]
    pub weights: Vec<Weight>,
    #[serde(default)]
    pub basis: Basis,
    #[serde(default)]
    pub mode: MixMode,
    #[serde(default)]
    pub output_slot: OutputSlot,
    /// Directory for magnitude/phase/real/imaginary views of the mixed spectrum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectrum_dir: Option<PathBuf>,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            inputs: vec![PathBuf::from("a.png"), PathBuf::from("b.png")],
            output: PathBuf::from("mixed.png"),
            weights: vec![Weight::default(); 2],
            basis: Basis::default(),
            mode: MixMode::default(),
            output_slot: OutputSlot::default(),
            spectrum_dir: None,
        }
    }
}

impl MixConfig {
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(FtMixError::EmptyInput);
        }
        if self.inputs.len() > MAX_INPUT_SLOTS {
            return Err(FtMixError::InvalidConfig(format!(
                "{} inputs given, at most {} supported",
                self.inputs.len(),
                MAX_INPUT_SLOTS
            )));
        }
        if !self.weights.is_empty() && self.weights.len() != self.inputs.len() {
            return Err(FtMixError::WeightCountMismatch {
                expected: self.inputs.len(),
                got: self.weights.len(),
            });
        }
        self.mode.validate()
    }

    /// Per-slot request; slots without an explicit weight get the default.
    pub fn request(&self) -> MixRequest {
        let mut weights = [Weight::default(); MAX_INPUT_SLOTS];
        for (slot, weight) in weights.iter_mut().zip(&self.weights) {
            *slot = *weight;
        }
        MixRequest {
            weights,
            basis: self.basis,
            mode: self.mode,
            output_slot: self.output_slot,
        }
    }
}
