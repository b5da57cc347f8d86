//! Row-wrapped sheet layout.
//!
//! Places an ordered list of rectangles left to right, top to bottom, starting
//! a new row whenever the next box would cross the row width ceiling. Every
//! box reserves a fixed label band above its image. Pure geometry, one pass,
//! no pixel operations.
//!
//! # Example
//!
//! ```
//! use zensheet::{SheetConfig, SheetItem, Size};
//!
//! let items = [
//!     SheetItem::new("a.png", 100, 50).unwrap(),
//!     SheetItem::new("b.png", 100, 50).unwrap(),
//! ];
//!
//! let sheet = SheetConfig::default().layout(&items, 1.0);
//!
//! assert_eq!(sheet.size(), Size::new(245, 100));
//! assert_eq!(sheet.placements[1].x, 130);
//! assert_eq!(sheet.row_count(), 1);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use num_traits::Float;
use thiserror::Error;

/// Row width ceiling before wrapping.
pub const DEFAULT_MAX_ROW_WIDTH: u32 = 8000;
/// Spacing between neighbouring boxes, horizontally and between rows.
pub const DEFAULT_GAP: u32 = 15;
/// Height reserved above each image for its caption.
pub const DEFAULT_LABEL_BAND: u32 = 20;
/// Uniform border around the whole sheet.
pub const DEFAULT_MARGIN: u32 = 15;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Scale both axes from these dimensions, rounding half away from zero.
    pub fn scaled(self, scale: f64) -> Self {
        Self {
            width: scale_dimension(self.width, scale),
            height: scale_dimension(self.height, scale),
        }
    }
}

/// Axis-aligned rectangle in sheet pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Whether the two rects share any pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// One image to place on the sheet.
///
/// Position in the input slice is the item's order; layout never reorders.
/// Sorting (see [`crate::order`]) is the caller's job.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetItem {
    /// Caption drawn in the label band. Opaque to layout.
    pub label: String,
    /// Natural pixel width.
    pub width: u32,
    /// Natural pixel height.
    pub height: u32,
    /// Image reference a renderer may embed. Opaque to layout.
    pub href: Option<String>,
}

impl SheetItem {
    /// Create an item from its natural dimensions.
    pub fn new(label: impl Into<String>, width: u32, height: u32) -> Result<Self, SheetError> {
        if width == 0 || height == 0 {
            return Err(SheetError::ZeroItemDimension);
        }
        Ok(Self {
            label: label.into(),
            width,
            height,
            href: None,
        })
    }

    /// Attach an image reference for renderers.
    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Natural dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Layout parameters. All values in sheet pixels.
///
/// ```
/// use zensheet::SheetConfig;
///
/// let config = SheetConfig::default().max_row_width(4000).gap(10);
/// assert_eq!(config.max_row_width, 4000);
/// assert_eq!(config.margin, 15);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetConfig {
    /// Row width ceiling. A row-start box may still exceed it.
    pub max_row_width: u32,
    /// Horizontal spacing between boxes and vertical spacing between rows.
    pub gap: u32,
    /// Height reserved above every image for its caption.
    pub label_band: u32,
    /// Border padding on all four sides.
    pub margin: u32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            max_row_width: DEFAULT_MAX_ROW_WIDTH,
            gap: DEFAULT_GAP,
            label_band: DEFAULT_LABEL_BAND,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl SheetConfig {
    /// Set the row width ceiling.
    pub fn max_row_width(mut self, max_row_width: u32) -> Self {
        self.max_row_width = max_row_width;
        self
    }

    /// Set the spacing between boxes.
    pub fn gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the label band height.
    pub fn label_band(mut self, label_band: u32) -> Self {
        self.label_band = label_band;
        self
    }

    /// Set the sheet margin.
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Lay out `items` at a uniform `scale`.
    ///
    /// Dimensions are always scaled from the items' natural sizes. Never
    /// fails: an empty slice yields a `2 * margin` square sheet, and a box
    /// wider than [`max_row_width`](Self::max_row_width) is placed alone at
    /// the start of its row, widening the sheet.
    pub fn layout(&self, items: &[SheetItem], scale: f64) -> SheetLayout {
        let margin = self.margin;
        let mut x = margin;
        let mut y = margin;
        let mut row_height = 0u32;
        let mut max_right = margin.saturating_mul(2);
        let mut placements = Vec::with_capacity(items.len());
        let mut rows: Vec<Row> = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let Size {
                width: w,
                height: h,
            } = item.size().scaled(scale);

            // `x > margin` exempts the first box of a row, so oversized items
            // are placed instead of wrapping forever.
            let wrap = x > margin && x.saturating_add(w).saturating_add(margin) > self.max_row_width;
            if wrap {
                x = margin;
                y = y.saturating_add(row_height).saturating_add(self.gap);
                row_height = 0;
            }
            if wrap || rows.is_empty() {
                rows.push(Row {
                    y,
                    height: 0,
                    start: index,
                    len: 0,
                });
            }

            let row = rows.len() - 1;
            placements.push(Placement {
                index,
                row,
                x,
                y,
                width: w,
                height: h,
            });

            x = x.saturating_add(w).saturating_add(self.gap);
            row_height = row_height.max(h.saturating_add(self.label_band));
            max_right = max_right.max(x.saturating_sub(self.gap).saturating_add(margin));

            let current = &mut rows[row];
            current.height = row_height;
            current.len += 1;
        }

        SheetLayout {
            width: max_right,
            height: y.saturating_add(row_height).saturating_add(margin),
            scale,
            placements,
            rows,
        }
    }
}

/// Lay out `items` at `scale` with `config`. See [`SheetConfig::layout`].
pub fn layout(items: &[SheetItem], scale: f64, config: &SheetConfig) -> SheetLayout {
    config.layout(items, scale)
}

/// Where one item landed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Position of the placed item in the input slice.
    pub index: usize,
    /// Zero-based row number.
    pub row: usize,
    /// Left edge of the box.
    pub x: u32,
    /// Top edge of the box (top of the label band).
    pub y: u32,
    /// Scaled image width.
    pub width: u32,
    /// Scaled image height, excluding the label band.
    pub height: u32,
}

impl Placement {
    /// Full box: label band plus image.
    pub fn box_rect(&self, label_band: u32) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.width,
            self.height.saturating_add(label_band),
        )
    }

    /// Image area below the label band.
    pub fn image_rect(&self, label_band: u32) -> Rect {
        Rect::new(
            self.x,
            self.y.saturating_add(label_band),
            self.width,
            self.height,
        )
    }
}

/// A horizontal band of boxes sharing the same top edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    /// Top edge.
    pub y: u32,
    /// Tallest box in the row, label band included.
    pub height: u32,
    /// Index of the first placement in the row.
    pub start: usize,
    /// Number of placements in the row.
    pub len: usize,
}

impl Row {
    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }
}

/// Result of one layout pass. Never mutated; the fit loop replaces it wholesale.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetLayout {
    /// Sheet width including both margins.
    pub width: u32,
    /// Sheet height including both margins.
    pub height: u32,
    /// Scale factor the layout was computed at.
    pub scale: f64,
    /// One entry per input item, in input order.
    pub placements: Vec<Placement>,
    /// Rows, top to bottom.
    pub rows: Vec<Row>,
}

impl SheetLayout {
    /// Sheet dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Placements belonging to `row`, left to right.
    pub fn row_placements(&self, row: usize) -> &[Placement] {
        match self.rows.get(row) {
            Some(r) => self
                .placements
                .get(r.start..r.start.saturating_add(r.len))
                .unwrap_or(&[]),
            None => &[],
        }
    }

    /// Whether the placement at `index` opens its row.
    pub fn is_row_start(&self, index: usize) -> bool {
        self.placements
            .get(index)
            .and_then(|p| self.rows.get(p.row))
            .is_some_and(|r| r.start == index)
    }

    /// Whether the sheet height is within `max_height`.
    pub fn fits(&self, max_height: u32) -> bool {
        self.height <= max_height
    }
}

/// Errors from building sheet inputs or from a failed fit.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum SheetError {
    /// Item has zero width or height.
    #[error("item has zero width or height")]
    ZeroItemDimension,
    /// Scale ladder has no steps.
    #[error("scale ladder is empty")]
    EmptyLadder,
    /// Scale factor is not finite or not in `(0, 1]`.
    #[error("scale factor {0} is outside (0, 1]")]
    ScaleOutOfRange(f64),
    /// Scale ladder steps do not strictly decrease.
    #[error("scale ladder must be strictly descending")]
    LadderNotDescending,
    /// Every ladder step left the sheet taller than allowed.
    #[error("sheet height {height} exceeds {max_height} at smallest scale {scale}")]
    Unfittable {
        /// Last scale attempted.
        scale: f64,
        /// Sheet height at that scale.
        height: u32,
        /// The limit that was not met.
        max_height: u32,
    },
}

fn scale_dimension(value: u32, scale: f64) -> u32 {
    // `as` saturates: negative and NaN map to 0, overflow to u32::MAX.
    Float::round(f64::from(value) * scale) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn item(label: &str, w: u32, h: u32) -> SheetItem {
        SheetItem::new(label, w, h).unwrap()
    }

    // ── Single row ──────────────────────────────────────────────────────

    #[test]
    fn two_items_share_one_row() {
        let items = vec![item("a", 100, 50), item("b", 100, 50)];
        let sheet = SheetConfig::default().layout(&items, 1.0);

        assert_eq!(sheet.row_count(), 1);
        assert_eq!((sheet.placements[0].x, sheet.placements[0].y), (15, 15));
        assert_eq!((sheet.placements[1].x, sheet.placements[1].y), (130, 15));
        assert_eq!(sheet.width, 245);
        assert_eq!(sheet.height, 100);
    }

    #[test]
    fn row_height_is_tallest_box() {
        let items = vec![item("short", 100, 40), item("tall", 100, 90), item("mid", 100, 60)];
        let sheet = SheetConfig::default().layout(&items, 1.0);

        assert_eq!(sheet.rows[0].height, 110);
        assert_eq!(sheet.height, 15 + 110 + 15);
    }

    #[test]
    fn label_band_is_reserved_per_box() {
        let items = vec![item("a", 10, 10)];
        let config = SheetConfig::default().label_band(0);
        assert_eq!(config.layout(&items, 1.0).height, 15 + 10 + 15);

        let config = SheetConfig::default().label_band(40);
        let sheet = config.layout(&items, 1.0);
        assert_eq!(sheet.height, 15 + 50 + 15);
        let p = sheet.placements[0];
        assert_eq!(p.box_rect(40), Rect::new(15, 15, 10, 50));
        assert_eq!(p.image_rect(40), Rect::new(15, 55, 10, 10));
    }

    // ── Wrapping ────────────────────────────────────────────────────────

    #[test]
    fn forced_wrap_starts_second_row() {
        let items = vec![item("a", 5000, 100), item("b", 5000, 100)];
        let sheet = SheetConfig::default().layout(&items, 1.0);

        assert_eq!(sheet.row_count(), 2);
        let b = sheet.placements[1];
        assert_eq!((b.x, b.y, b.row), (15, 15 + 120 + 15, 1));
        assert_eq!(sheet.width, 5030);
        assert_eq!(sheet.height, 150 + 120 + 15);
    }

    #[test]
    fn exact_fit_does_not_wrap() {
        // 15 + 100 + 15 + 100 + 15 = 245 == max_row_width
        let items = vec![item("a", 100, 10), item("b", 100, 10)];
        let sheet = SheetConfig::default().max_row_width(245).layout(&items, 1.0);
        assert_eq!(sheet.row_count(), 1);

        let sheet = SheetConfig::default().max_row_width(244).layout(&items, 1.0);
        assert_eq!(sheet.row_count(), 2);
    }

    #[test]
    fn oversized_item_is_placed_at_margin() {
        let items = vec![item("huge", 10000, 10)];
        let sheet = SheetConfig::default().layout(&items, 1.0);

        assert_eq!(sheet.placements[0].x, 15);
        assert_eq!(sheet.row_count(), 1);
        assert!(sheet.width >= 10000 + 2 * 15);
    }

    #[test]
    fn oversized_item_after_others_gets_own_row() {
        let items = vec![item("a", 100, 10), item("huge", 9000, 10), item("b", 100, 10)];
        let sheet = SheetConfig::default().layout(&items, 1.0);

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.placements[1].x, 15);
        assert_eq!(sheet.placements[2].x, 15);
        assert_eq!(sheet.width, 9030);
        assert!(sheet.is_row_start(1));
        assert!(sheet.is_row_start(2));
    }

    #[test]
    fn row_placements_slices_by_row() {
        let items = vec![item("a", 5000, 10), item("b", 2000, 10), item("c", 5000, 10)];
        let sheet = SheetConfig::default().layout(&items, 1.0);

        assert_eq!(sheet.row_placements(0).len(), 2);
        assert_eq!(sheet.row_placements(1)[0].index, 2);
        assert!(sheet.row_placements(7).is_empty());
        assert!(!sheet.is_row_start(1));
    }

    #[test]
    fn row_placements_tolerates_inconsistent_rows() {
        // Layouts can arrive from records, not only from `layout`.
        let mut sheet = SheetConfig::default().layout(&[item("a", 10, 10)], 1.0);
        sheet.rows[0].len = 5;
        assert!(sheet.row_placements(0).is_empty());

        sheet.rows[0].start = usize::MAX;
        sheet.rows[0].len = usize::MAX;
        assert!(sheet.row_placements(0).is_empty());
    }

    // ── Scaling ─────────────────────────────────────────────────────────

    #[test]
    fn scaled_dimensions_round_half_up() {
        let items = vec![item("a", 101, 3)];
        let sheet = SheetConfig::default().layout(&items, 0.75);
        // 75.75 -> 76, 2.25 -> 2
        assert_eq!(sheet.placements[0].width, 76);
        assert_eq!(sheet.placements[0].height, 2);

        let sheet = SheetConfig::default().layout(&[item("b", 3, 3)], 0.5);
        // 1.5 -> 2
        assert_eq!(sheet.placements[0].width, 2);
    }

    #[test]
    fn scale_is_recorded() {
        let sheet = SheetConfig::default().layout(&[item("a", 10, 10)], 0.5);
        assert_eq!(sheet.scale, 0.5);
    }

    // ── Degenerate input ────────────────────────────────────────────────

    #[test]
    fn empty_input_yields_margin_square() {
        let sheet = SheetConfig::default().layout(&[], 1.0);
        assert!(sheet.is_empty());
        assert_eq!(sheet.size(), Size::new(30, 30));
        assert_eq!(sheet.row_count(), 0);
    }

    #[test]
    fn zero_dimension_item_rejected() {
        assert_eq!(
            SheetItem::new("a", 0, 10),
            Err(SheetError::ZeroItemDimension)
        );
        assert_eq!(
            SheetItem::new("a", 10, 0),
            Err(SheetError::ZeroItemDimension)
        );
    }

    #[test]
    fn huge_dimensions_saturate() {
        let items = vec![item("a", u32::MAX, u32::MAX), item("b", u32::MAX, 1)];
        let sheet = SheetConfig::default().layout(&items, 1.0);
        assert_eq!(sheet.width, u32::MAX);
        assert_eq!(sheet.height, u32::MAX);
        assert_eq!(sheet.placements.len(), 2);
    }

    #[test]
    fn free_function_matches_method() {
        let items = vec![item("a", 300, 200), item("b", 7000, 100), item("c", 50, 50)];
        let config = SheetConfig::default();
        assert_eq!(layout(&items, 0.75, &config), config.layout(&items, 0.75));
    }

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(9, 9, 5, 5)));
        assert!(!a.intersects(&Rect::new(10, 0, 5, 5)));
        assert!(!a.intersects(&Rect::new(0, 10, 5, 5)));
    }
}
