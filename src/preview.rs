//! Preview sizing and export naming for finished sheets.

use alloc::format;
use alloc::string::String;

use num_traits::Float;

use crate::sheet::Size;

/// Longest preview edge.
pub const DEFAULT_PREVIEW_MAX: u32 = 4000;

/// Factor that brings `sheet` within `max` on both axes, never above 1.
pub fn preview_scale(sheet: Size, max: u32) -> f64 {
    if sheet.width == 0 || sheet.height == 0 {
        return 1.0;
    }
    let max = f64::from(max);
    let by_width = max / f64::from(sheet.width);
    let by_height = max / f64::from(sheet.height);
    Float::min(Float::min(by_width, by_height), 1.0)
}

/// Preview dimensions for `sheet` bounded by `max`.
///
/// Returns `sheet` unchanged when it already fits. Each axis is rounded and
/// kept at least 1.
///
/// ```
/// use zensheet::{Size, preview::preview_size};
///
/// assert_eq!(preview_size(Size::new(8000, 2000), 4000), Size::new(4000, 1000));
/// assert_eq!(preview_size(Size::new(300, 200), 4000), Size::new(300, 200));
/// ```
pub fn preview_size(sheet: Size, max: u32) -> Size {
    let scale = preview_scale(sheet, max);
    if scale >= 1.0 {
        return sheet;
    }
    let scaled = sheet.scaled(scale);
    Size::new(scaled.width.max(1), scaled.height.max(1))
}

/// File name for an exported sheet: the first label without its extension,
/// plus `_preview.jpg`. Falls back to `output` when there is no usable stem.
///
/// ```
/// use zensheet::preview::export_file_name;
///
/// assert_eq!(export_file_name(Some("scan 01.png")), "scan 01_preview.jpg");
/// assert_eq!(export_file_name(None), "output_preview.jpg");
/// ```
pub fn export_file_name(first_label: Option<&str>) -> String {
    let stem = first_label
        .map(strip_extension)
        .filter(|s| !s.is_empty())
        .unwrap_or("output");
    format!("{stem}_preview.jpg")
}

/// Drop a trailing `.ext` where `ext` is non-empty and has no dot.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) if pos + 1 < name.len() => &name[..pos],
        _ => name,
    }
}
