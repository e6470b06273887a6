use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_REGION_FRACTION, MAX_REGION_FRACTION, MIN_REGION_FRACTION};
use crate::error::{FtMixError, Result};

/// Rectangle in padded-grid coordinates, bounds inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionSpec {
    pub start_x: usize,
    pub start_y: usize,
    pub end_x: usize,
    pub end_y: usize,
    /// `true` keeps frequencies inside the rectangle, `false` keeps those outside.
    pub pass_inside: bool,
}

impl RegionSpec {
    /// Pass-through region covering the whole grid.
    pub fn whole(width: usize, height: usize) -> Self {
        Self {
            start_x: 0,
            start_y: 0,
            end_x: width,
            end_y: height,
            pass_inside: true,
        }
    }

    /// Rectangle centered on the grid, each side `fraction` of the grid size.
    pub fn centered(width: usize, height: usize, fraction: f64, pass_inside: bool) -> Result<Self> {
        check_fraction(fraction)?;
        let (start_x, end_x) = centered_span(width, fraction);
        let (start_y, end_y) = centered_span(height, fraction);
        Ok(Self {
            start_x,
            start_y,
            end_x,
            end_y,
            pass_inside,
        })
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.start_x..=self.end_x).contains(&x) && (self.start_y..=self.end_y).contains(&y)
    }

    /// Whether the coefficient at `(x, y)` survives the mask.
    pub fn classify(&self, x: usize, y: usize) -> bool {
        self.contains(x, y) == self.pass_inside
    }

    /// Active/inactive flag for every cell of a `width`x`height` grid.
    pub fn mask(&self, width: usize, height: usize) -> Array2<bool> {
        Array2::from_shape_fn((height, width), |(y, x)| self.classify(x, y))
    }
}

pub fn classify(x: usize, y: usize, region: &RegionSpec) -> bool {
    region.classify(x, y)
}

fn check_fraction(fraction: f64) -> Result<()> {
    if (MIN_REGION_FRACTION..=MAX_REGION_FRACTION).contains(&fraction) {
        Ok(())
    } else {
        Err(FtMixError::InvalidRegionSize(fraction))
    }
}

fn centered_span(size: usize, fraction: f64) -> (usize, usize) {
    let extent = size as f64 * fraction;
    let center = size as f64 / 2.0;
    let start = (center - extent / 2.0).floor().max(0.0) as usize;
    let end = (center + extent / 2.0).floor() as usize;
    (start, end)
}

/// Which part of the spectrum takes part in a mix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum MixMode {
    /// Whole spectrum.
    #[default]
    Component,
    /// Centered rectangle, `size` in [0.1, 1.0] of the padded grid.
    Region { size: f64, pass_inside: bool },
}

impl MixMode {
    pub fn default_region() -> Self {
        Self::Region {
            size: DEFAULT_REGION_FRACTION,
            pass_inside: true,
        }
    }

    /// Resolve the mode into a concrete rectangle for a padded grid.
    pub fn region_for(&self, width: usize, height: usize) -> Result<RegionSpec> {
        match *self {
            Self::Component => Ok(RegionSpec::whole(width, height)),
            Self::Region { size, pass_inside } => {
                RegionSpec::centered(width, height, size, pass_inside)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Component => Ok(()),
            Self::Region { size, .. } => check_fraction(size),
        }
    }
}

impl fmt::Display for MixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component => write!(f, "Component (whole spectrum)"),
            Self::Region { size, pass_inside } => write!(
                f,
                "Region ({:.0}%, {})",
                size * 100.0,
                if *pass_inside { "inner" } else { "outer" }
            ),
        }
    }
}
