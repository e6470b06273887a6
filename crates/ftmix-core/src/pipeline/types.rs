/// Mix processing stage, used for progress reporting and cancellation checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MixStage {
    Loading,
    Padding,
    ForwardTransform,
    Mixing,
    Reconstruction,
    Writing,
}

impl std::fmt::Display for MixStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading images"),
            Self::Padding => write!(f, "Padding"),
            Self::ForwardTransform => write!(f, "Forward transform"),
            Self::Mixing => write!(f, "Mixing spectra"),
            Self::Reconstruction => write!(f, "Reconstructing"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// Thread-safe progress reporting for a mix.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items
    /// in this stage (e.g., image count), if known.
    fn begin_stage(&self, _stage: MixStage, _total_items: Option<usize>) {}

    /// `items_done` work items within the current stage have completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
