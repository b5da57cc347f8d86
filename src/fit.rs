//! Height fitting over a descending scale ladder.
//!
//! Lays the full item set out at each ladder step in turn, always from the
//! natural dimensions, until the sheet height is within the limit. If the
//! ladder runs out, the last layout is returned tagged as unfittable; the
//! controller never clips or paginates.
//!
//! # Example
//!
//! ```
//! use zensheet::{Fit, FitOutcome, SheetItem};
//!
//! let items = [SheetItem::new("tall.png", 400, 8950).unwrap()];
//! let outcome = Fit::new(8000).run(&items);
//!
//! assert!(outcome.is_fitted());
//! assert_eq!(outcome.scale(), 0.75);
//! assert_eq!(outcome.to_string(), "330×6763 px (scaled to 75%)");
//! ```

use alloc::vec::Vec;
use core::fmt;

use log::{debug, warn};
use num_traits::Float;

use crate::sheet::{SheetConfig, SheetError, SheetItem, SheetLayout};

/// Sheet height limit.
pub const DEFAULT_MAX_HEIGHT: u32 = 8000;
/// Scale steps tried in order.
pub const DEFAULT_LADDER: [f64; 3] = [1.0, 0.75, 0.5];

/// Non-empty, strictly descending sequence of scale factors in `(0, 1]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct ScaleLadder {
    steps: Vec<f64>,
}

impl ScaleLadder {
    /// Validate and build a ladder.
    ///
    /// ```
    /// use zensheet::{ScaleLadder, SheetError};
    ///
    /// assert!(ScaleLadder::new(&[1.0, 0.8, 0.6, 0.4]).is_ok());
    /// assert_eq!(ScaleLadder::new(&[0.5, 0.75]), Err(SheetError::LadderNotDescending));
    /// ```
    pub fn new(steps: &[f64]) -> Result<Self, SheetError> {
        if steps.is_empty() {
            return Err(SheetError::EmptyLadder);
        }
        if let Some(&bad) = steps
            .iter()
            .find(|&&s| !(s.is_finite() && s > 0.0 && s <= 1.0))
        {
            return Err(SheetError::ScaleOutOfRange(bad));
        }
        if steps.windows(2).any(|pair| pair[1] >= pair[0]) {
            return Err(SheetError::LadderNotDescending);
        }
        Ok(Self {
            steps: steps.to_vec(),
        })
    }

    /// Scale factors, largest first.
    pub fn steps(&self) -> &[f64] {
        &self.steps
    }

    /// Largest factor, tried first.
    pub fn first(&self) -> f64 {
        self.steps[0]
    }

    /// Smallest factor, tried last.
    pub fn last(&self) -> f64 {
        self.steps[self.steps.len() - 1]
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a validated ladder.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for ScaleLadder {
    fn default() -> Self {
        Self {
            steps: DEFAULT_LADDER.to_vec(),
        }
    }
}

impl TryFrom<Vec<f64>> for ScaleLadder {
    type Error = SheetError;

    fn try_from(steps: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(&steps)
    }
}

impl From<ScaleLadder> for Vec<f64> {
    fn from(ladder: ScaleLadder) -> Self {
        ladder.steps
    }
}

/// Fit parameters: layout config, height limit, and ladder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fit {
    pub config: SheetConfig,
    pub max_height: u32,
    pub ladder: ScaleLadder,
}

impl Default for Fit {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEIGHT)
    }
}

impl Fit {
    /// Fit with default layout config and ladder.
    pub fn new(max_height: u32) -> Self {
        Self {
            config: SheetConfig::default(),
            max_height,
            ladder: ScaleLadder::default(),
        }
    }

    /// Set the layout config.
    pub fn config(mut self, config: SheetConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the scale ladder.
    pub fn ladder(mut self, ladder: ScaleLadder) -> Self {
        self.ladder = ladder;
        self
    }

    /// Run the fit loop over `items`.
    pub fn run(&self, items: &[SheetItem]) -> FitOutcome {
        fit(items, self.max_height, &self.ladder, &self.config)
    }
}

/// Lay out `items` at each `ladder` step until the sheet height is at most
/// `max_height`.
pub fn fit(
    items: &[SheetItem],
    max_height: u32,
    ladder: &ScaleLadder,
    config: &SheetConfig,
) -> FitOutcome {
    let steps = ladder.steps();
    let mut attempts = 1;
    let mut layout = config.layout(items, ladder.first());

    loop {
        debug!(
            "sheet attempt {attempts}/{}: scale {}, {}x{} (limit {max_height})",
            steps.len(),
            layout.scale,
            layout.width,
            layout.height,
        );
        if layout.fits(max_height) {
            return FitOutcome::Fitted { layout, attempts };
        }
        match steps.get(attempts) {
            Some(&scale) => {
                layout = config.layout(items, scale);
                attempts += 1;
            }
            None => break,
        }
    }

    warn!(
        "sheet height {} still exceeds {max_height} at smallest scale {}",
        layout.height, layout.scale,
    );
    FitOutcome::Unfittable {
        layout,
        max_height,
        attempts,
    }
}

/// Result of the fit loop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitOutcome {
    /// The sheet fits at `layout.scale`.
    Fitted {
        layout: SheetLayout,
        /// Ladder steps tried, including the successful one.
        attempts: usize,
    },
    /// Even the smallest step left the sheet too tall. `layout` is the
    /// over-height result at that step, for callers that proceed anyway.
    Unfittable {
        layout: SheetLayout,
        max_height: u32,
        attempts: usize,
    },
}

impl FitOutcome {
    /// The final layout, fitted or not.
    pub fn layout(&self) -> &SheetLayout {
        match self {
            Self::Fitted { layout, .. } | Self::Unfittable { layout, .. } => layout,
        }
    }

    /// Take the final layout, fitted or not.
    pub fn into_layout(self) -> SheetLayout {
        match self {
            Self::Fitted { layout, .. } | Self::Unfittable { layout, .. } => layout,
        }
    }

    /// Scale of the final layout.
    pub fn scale(&self) -> f64 {
        self.layout().scale
    }

    /// Ladder steps tried.
    pub fn attempts(&self) -> usize {
        match self {
            Self::Fitted { attempts, .. } | Self::Unfittable { attempts, .. } => *attempts,
        }
    }

    /// Whether the height limit was met.
    pub fn is_fitted(&self) -> bool {
        matches!(self, Self::Fitted { .. })
    }

    /// Whether the final layout is below natural size.
    pub fn is_scaled(&self) -> bool {
        self.scale() < 1.0
    }

    /// Treat an unfittable sheet as an error.
    pub fn into_result(self) -> Result<SheetLayout, SheetError> {
        match self {
            Self::Fitted { layout, .. } => Ok(layout),
            Self::Unfittable {
                layout, max_height, ..
            } => Err(SheetError::Unfittable {
                scale: layout.scale,
                height: layout.height,
                max_height,
            }),
        }
    }
}

impl fmt::Display for FitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = self.layout();
        write!(f, "{}×{} px", layout.width, layout.height)?;
        if self.is_scaled() {
            let percent = Float::round(layout.scale * 100.0) as u32;
            write!(f, " (scaled to {percent}%)")?;
        }
        if let Self::Unfittable { max_height, .. } = self {
            write!(f, ", exceeds max height {max_height}")?;
        }
        Ok(())
    }
}
