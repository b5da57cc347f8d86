//! Color values: hex (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, `#` optional)
//! and a handful of names.

use crate::theme::Color;

/// Parse a color string into a [`Color`].
pub(crate) fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(named) = lookup_named(s) {
        return Some(named);
    }

    let hex = s.strip_prefix('#').unwrap_or(s).as_bytes();
    if !hex.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }

    match hex.len() {
        3 | 4 => {
            // Short form: each nibble doubled, 'a' -> 0xaa.
            let channel = |i: usize| hex_val(hex[i]).map(|n| n << 4 | n);
            let a = if hex.len() == 4 { channel(3)? } else { 255 };
            Some(Color::rgba(channel(0)?, channel(1)?, channel(2)?, a))
        }
        6 | 8 => {
            let channel = |i: usize| Some(hex_val(hex[i])? << 4 | hex_val(hex[i + 1])?);
            let a = if hex.len() == 8 { channel(6)? } else { 255 };
            Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a))
        }
        _ => None,
    }
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn lookup_named(name: &str) -> Option<Color> {
    NAMED
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, c)| c)
}

const NAMED: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("gray", Color::rgb(128, 128, 128)),
    ("transparent", Color::rgba(0, 0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
];
