/// Minimum pixel count (h*w) to use Rayon parallelism for transform passes
/// and per-pixel mixing.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Upper bound of the intensity range. Reconstructed samples are clamped to
/// `[0.0, INTENSITY_MAX]`.
pub const INTENSITY_MAX: f32 = 255.0;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Number of input image slots the mixer exposes.
pub const MAX_INPUT_SLOTS: usize = 4;

/// Number of output slots a mix can be published to.
pub const OUTPUT_SLOT_COUNT: usize = 2;

/// Default gain for both components of a freshly created weight.
pub const DEFAULT_GAIN: f64 = 0.25;

/// Default edge length of the region rectangle as a fraction of the padded size.
pub const DEFAULT_REGION_FRACTION: f64 = 0.5;

/// Smallest accepted region fraction.
pub const MIN_REGION_FRACTION: f64 = 0.1;

/// Largest accepted region fraction (the whole padded grid).
pub const MAX_REGION_FRACTION: f64 = 1.0;
