use thiserror::Error;

#[derive(Error, Debug)]
pub enum FtMixError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Nothing to mix: no images loaded")]
    EmptyInput,

    #[error(
        "Dimension mismatch: original {original_width}x{original_height} \
         exceeds padded {padded_width}x{padded_height}"
    )]
    DimensionMismatch {
        original_width: usize,
        original_height: usize,
        padded_width: usize,
        padded_height: usize,
    },

    #[error("Mix cancelled")]
    Cancelled,

    #[error("Expected {expected} weights, got {got}")]
    WeightCountMismatch { expected: usize, got: usize },

    #[error("Spectrum size mismatch: {expected:?} vs {got:?}")]
    SpectrumSizeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("Region size {0} outside [0.1, 1.0]")]
    InvalidRegionSize(f64),

    #[error("Slot {slot} out of range (slots: {count})")]
    InvalidSlot { slot: usize, count: usize },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid mix config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FtMixError>;
