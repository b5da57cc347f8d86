//! SVG rendering of a finished sheet.
//!
//! Reference rasterizer for a [`SheetLayout`]: draws the sheet background,
//! then for every placement a filled box, its caption in the label band, the
//! image (or a placeholder), and a border. Colors come from an explicit
//! [`Theme`].
//!
//! # Example
//!
//! ```
//! use zensheet::{SheetConfig, SheetItem, Theme, svg::render_sheet_svg};
//!
//! let items = [
//!     SheetItem::new("a.png", 100, 50).unwrap().href("a.png"),
//!     SheetItem::new("b.png", 100, 50).unwrap(),
//! ];
//! let config = SheetConfig::default();
//! let layout = config.layout(&items, 1.0);
//!
//! let svg = render_sheet_svg(&items, &layout, &config, &Theme::dark());
//! assert!(svg.starts_with("<svg"));
//! assert!(svg.contains("a.png"));
//! ```

#[cfg(not(feature = "std"))]
use alloc::format;
use alloc::string::String;

use crate::sheet::{Placement, SheetConfig, SheetItem, SheetLayout};
use crate::theme::Theme;

/// Caption inset from the box's top-left corner.
const LABEL_INSET_X: u32 = 8;
const LABEL_INSET_Y: u32 = 3;
/// Caption font size in pixels.
const LABEL_FONT_PX: u32 = 16;
const FONT_STACK: &str =
    r#"-apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif"#;

/// Render `layout` as a complete SVG document at sheet resolution.
///
/// `items` must be the slice the layout was computed from; placements whose
/// index falls outside it are drawn without caption or image.
pub fn render_sheet_svg(
    items: &[SheetItem],
    layout: &SheetLayout,
    config: &SheetConfig,
    theme: &Theme,
) -> String {
    let mut svg = String::with_capacity(512 + layout.placements.len() * 384);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = layout.width,
        h = layout.height,
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"<style>
  .label {{ font-family: {font}; font-size: {size}px; fill: {text}; dominant-baseline: hanging; }}
  .box {{ fill: {fill}; }}
  .placeholder {{ fill: {stroke}; }}
  .frame {{ fill: none; stroke: {stroke}; stroke-width: 1; }}
</style>
"#,
        font = FONT_STACK,
        size = LABEL_FONT_PX,
        text = theme.text,
        fill = theme.box_fill,
        stroke = theme.stroke,
    ));

    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        layout.width, layout.height, theme.background
    ));
    svg.push('\n');

    for placement in &layout.placements {
        render_placement(&mut svg, items.get(placement.index), placement, config.label_band);
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_placement(svg: &mut String, item: Option<&SheetItem>, p: &Placement, label_band: u32) {
    let outer = p.box_rect(label_band);
    let image = p.image_rect(label_band);

    svg.push_str(&format!(r#"<g data-index="{}">"#, p.index));
    svg.push('\n');

    svg.push_str(&format!(
        r#"  <rect x="{}" y="{}" width="{}" height="{}" class="box"/>"#,
        outer.x, outer.y, outer.width, outer.height
    ));
    svg.push('\n');

    if let Some(item) = item
        && !item.label.is_empty()
    {
        svg.push_str(&format!(
            r#"  <text x="{}" y="{}" class="label">{}</text>"#,
            p.x.saturating_add(LABEL_INSET_X),
            p.y.saturating_add(LABEL_INSET_Y),
            escape_xml(&item.label)
        ));
        svg.push('\n');
    }

    match item.and_then(|i| i.href.as_deref()) {
        Some(href) => svg.push_str(&format!(
            r#"  <image href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none"/>"#,
            escape_xml(href),
            image.x,
            image.y,
            image.width,
            image.height
        )),
        None => svg.push_str(&format!(
            r#"  <rect x="{}" y="{}" width="{}" height="{}" class="placeholder"/>"#,
            image.x, image.y, image.width, image.height
        )),
    }
    svg.push('\n');

    svg.push_str(&format!(
        r#"  <rect x="{}" y="{}" width="{}" height="{}" class="frame"/>"#,
        outer.x, outer.y, outer.width, outer.height
    ));
    svg.push_str("\n</g>\n");
}

/// Escape special characters for XML text and attribute content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
