//! Contact sheet layout: row-wrapped placement of labeled image boxes, and a
//! fit controller that steps down a scale ladder until the sheet is short
//! enough.
//!
//! Pure geometry. Layout never touches pixels; renderers consume the
//! placements it produces. `no_std` compatible (needs `alloc`).
//!
//! # Modules
//!
//! - [`sheet`]: items, config, the row-wrap layout pass
//! - [`fit`]: scale ladder and the height-fitting loop
//! - [`order`]: natural label ordering for sorting items before layout
//! - [`preview`]: preview bounds and export file names
//! - [`theme`]: light/dark color presets
//! - `svg`: SVG rendering of a finished sheet (feature `svg`)
//! - `params`: query-string configuration (feature `params`)
//!
//! # Example
//!
//! ```
//! use zensheet::{Fit, SheetItem};
//!
//! let items = [
//!     SheetItem::new("a.png", 100, 50).unwrap(),
//!     SheetItem::new("b.png", 100, 50).unwrap(),
//! ];
//! let outcome = Fit::default().run(&items);
//! assert!(outcome.is_fitted());
//! assert_eq!(outcome.layout().size().width, 245);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod fit;
pub mod order;
pub mod preview;
pub mod sheet;
pub mod theme;

#[cfg(feature = "params")]
pub mod params;
#[cfg(feature = "svg")]
pub mod svg;

pub use fit::{Fit, FitOutcome, ScaleLadder, fit};
pub use sheet::{
    Placement, Rect, Row, SheetConfig, SheetError, SheetItem, SheetLayout, Size, layout,
};
pub use theme::{Color, Theme, ThemeMode};
