//! Query string tokenizer and value parsers.

use alloc::string::String;
use alloc::vec::Vec;

use super::color::parse_color;
use super::{ParseWarning, SheetParams};
use crate::fit::ScaleLadder;
use crate::sheet::SheetConfig;
use crate::theme::{Color, Theme, ThemeMode};

/// Values seen so far. `None` means "keep the default".
#[derive(Default)]
struct Seen {
    max_row_width: Option<u32>,
    max_height: Option<u32>,
    gap: Option<u32>,
    label_band: Option<u32>,
    margin: Option<u32>,
    ladder: Option<ScaleLadder>,
    preview_max: Option<u32>,
    theme_mode: Option<ThemeMode>,
    background: Option<Color>,
    box_fill: Option<Color>,
    text: Option<Color>,
    stroke: Option<Color>,
}

impl Seen {
    fn resolve(self) -> SheetParams {
        let defaults = SheetParams::default();
        let theme_mode = self.theme_mode.unwrap_or(defaults.theme_mode);
        let preset = Theme::for_mode(theme_mode);

        SheetParams {
            config: SheetConfig {
                max_row_width: self.max_row_width.unwrap_or(defaults.config.max_row_width),
                gap: self.gap.unwrap_or(defaults.config.gap),
                label_band: self.label_band.unwrap_or(defaults.config.label_band),
                margin: self.margin.unwrap_or(defaults.config.margin),
            },
            max_height: self.max_height.unwrap_or(defaults.max_height),
            ladder: self.ladder.unwrap_or(defaults.ladder),
            preview_max: self.preview_max.unwrap_or(defaults.preview_max),
            theme_mode,
            // Per-color overrides win over the preset regardless of key order.
            theme: Theme {
                background: self.background.unwrap_or(preset.background),
                box_fill: self.box_fill.unwrap_or(preset.box_fill),
                text: self.text.unwrap_or(preset.text),
                stroke: self.stroke.unwrap_or(preset.stroke),
            },
        }
    }
}

/// Parse a configuration query string into params + warnings.
pub(crate) fn parse_query(query: &str) -> (SheetParams, Vec<ParseWarning>) {
    let mut seen = Seen::default();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);

        dispatch_key(&key, &value, &mut seen, &mut warnings);
    }

    (seen.resolve(), warnings)
}

const POSITIVE: &str = "expected integer > 0";
const NON_NEGATIVE: &str = "expected integer >= 0";
const COLOR: &str = "expected hex color";

fn dispatch_key(key: &str, value: &str, seen: &mut Seen, warnings: &mut Vec<ParseWarning>) {
    let mut field = Field {
        key,
        value,
        warnings,
    };
    match key {
        "max_w" | "maxwidth" => field.set(&mut seen.max_row_width, parse_positive(value), POSITIVE),
        "max_h" | "maxheight" => field.set(&mut seen.max_height, parse_positive(value), POSITIVE),
        "gap" => field.set(&mut seen.gap, parse_u32(value), NON_NEGATIVE),
        "label" | "label_band" => field.set(&mut seen.label_band, parse_u32(value), NON_NEGATIVE),
        "margin" => field.set(&mut seen.margin, parse_u32(value), NON_NEGATIVE),
        "scales" | "ladder" => field.set(
            &mut seen.ladder,
            parse_ladder(value),
            "expected descending factors in (0, 1]",
        ),
        "preview" => field.set(&mut seen.preview_max, parse_positive(value), POSITIVE),
        "theme" => field.set(&mut seen.theme_mode, parse_theme_mode(value), "expected light|dark"),
        "bg" | "background" => field.set(&mut seen.background, parse_color(value), COLOR),
        "box" => field.set(&mut seen.box_fill, parse_color(value), COLOR),
        "text" => field.set(&mut seen.text, parse_color(value), COLOR),
        "stroke" => field.set(&mut seen.stroke, parse_color(value), COLOR),
        _ => field.warnings.push(ParseWarning::KeyNotRecognized {
            key: String::from(key),
            value: String::from(value),
        }),
    }
}

/// One key/value pair being applied.
struct Field<'a> {
    key: &'a str,
    value: &'a str,
    warnings: &'a mut Vec<ParseWarning>,
}

impl Field<'_> {
    /// Store `parsed`, warning on duplicates. Unparseable values warn and
    /// leave the field untouched.
    fn set<T>(&mut self, slot: &mut Option<T>, parsed: Option<T>, reason: &'static str) {
        let Some(v) = parsed else {
            self.warnings.push(ParseWarning::ValueInvalid {
                key: canonical_key(self.key),
                value: String::from(self.value),
                reason,
            });
            return;
        };
        if slot.is_some() {
            self.warnings.push(ParseWarning::DuplicateKey {
                key: String::from(self.key),
                value: String::from(self.value),
            });
        }
        *slot = Some(v);
    }
}

// ---- Value parsers ----

fn parse_u32(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok()
}

fn parse_positive(s: &str) -> Option<u32> {
    parse_u32(s).filter(|&v| v > 0)
}

fn parse_ladder(s: &str) -> Option<ScaleLadder> {
    let steps = s
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;
    ScaleLadder::new(&steps).ok()
}

fn parse_theme_mode(s: &str) -> Option<ThemeMode> {
    match s.trim() {
        v if v.eq_ignore_ascii_case("light") => Some(ThemeMode::Light),
        v if v.eq_ignore_ascii_case("dark") => Some(ThemeMode::Dark),
        _ => None,
    }
}

// ---- Query string tokenizer ----

/// Split query string on '&'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space. Invalid UTF-8
/// after decoding is replaced, not rejected.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

/// Stable key name for warnings.
fn canonical_key(key: &str) -> &'static str {
    match key {
        "max_w" | "maxwidth" => "max_w",
        "max_h" | "maxheight" => "max_h",
        "gap" => "gap",
        "label" | "label_band" => "label",
        "margin" => "margin",
        "scales" | "ladder" => "scales",
        "preview" => "preview",
        "theme" => "theme",
        "bg" | "background" => "bg",
        "box" => "box",
        "text" => "text",
        "stroke" => "stroke",
        _ => "unknown",
    }
}
