//! Query-string sheet configuration.
//!
//! Parses strings like `?max_w=6000&gap=10&scales=1,0.8,0.6&theme=dark` into
//! [`SheetParams`]: layout config, height limit, scale ladder, preview bound,
//! and theme. Anything not given keeps its default. Bad input never fails
//! the parse; it produces a [`ParseWarning`] and the default stays in place.
//!
//! # Example
//!
//! ```
//! use zensheet::params;
//!
//! let result = params::parse("max_w=6000&scales=1,0.8,0.6&theme=dark&text=%23ffcc00");
//! assert!(result.warnings.is_empty());
//!
//! let params = result.params;
//! assert_eq!(params.config.max_row_width, 6000);
//! assert_eq!(params.ladder.steps(), &[1.0, 0.8, 0.6]);
//! assert_eq!(params.theme.text.to_string(), "#ffcc00");
//!
//! let fit = params.fit();
//! assert_eq!(fit.max_height, 8000);
//! ```
//!
//! # Keys
//!
//! | Key | Value |
//! |---|---|
//! | `max_w`, `maxwidth` | row width ceiling, > 0 |
//! | `max_h`, `maxheight` | sheet height limit, > 0 |
//! | `gap` | spacing between boxes |
//! | `label`, `label_band` | label band height |
//! | `margin` | sheet border |
//! | `scales`, `ladder` | comma-separated descending factors in `(0, 1]` |
//! | `preview` | longest preview edge, > 0 |
//! | `theme` | `light` or `dark` |
//! | `bg`, `box`, `text`, `stroke` | hex colors overriding the theme |

mod color;
mod parse;

use alloc::string::String;
use alloc::vec::Vec;

use crate::fit::{DEFAULT_MAX_HEIGHT, Fit, ScaleLadder};
use crate::preview::DEFAULT_PREVIEW_MAX;
use crate::sheet::SheetConfig;
use crate::theme::{Theme, ThemeMode};

/// Everything needed to fit, render, and preview a sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetParams {
    pub config: SheetConfig,
    pub max_height: u32,
    pub ladder: ScaleLadder,
    pub preview_max: u32,
    /// Preset the theme started from.
    pub theme_mode: ThemeMode,
    /// Preset colors with any per-color overrides applied.
    pub theme: Theme,
}

impl Default for SheetParams {
    fn default() -> Self {
        Self {
            config: SheetConfig::default(),
            max_height: DEFAULT_MAX_HEIGHT,
            ladder: ScaleLadder::default(),
            preview_max: DEFAULT_PREVIEW_MAX,
            theme_mode: ThemeMode::default(),
            theme: Theme::default(),
        }
    }
}

impl SheetParams {
    /// Fit controller for these parameters.
    pub fn fit(&self) -> Fit {
        Fit::new(self.max_height)
            .config(self.config)
            .ladder(self.ladder.clone())
    }
}

/// Result of parsing a configuration query string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed parameters, defaults filled in.
    pub params: SheetParams,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from query string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key was not recognized.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parse a configuration query string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let (params, warnings) = parse::parse_query(query);
    ParseResult { params, warnings }
}
