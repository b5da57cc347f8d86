//! Sheet colors.
//!
//! A [`Theme`] is passed explicitly to renderers; nothing reads ambient UI
//! state.

use core::fmt;

/// 8-bit sRGB color with alpha.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether alpha is 255.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

/// Formats as `#rrggbb`, or `#rrggbbaa` when not opaque.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Light or dark preset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Colors used to draw a sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Theme {
    /// Whole-sheet fill behind the boxes.
    pub background: Color,
    /// Fill of each box (label band and image area).
    pub box_fill: Color,
    /// Caption text.
    pub text: Color,
    /// One-pixel border around each box.
    pub stroke: Color,
}

impl Theme {
    /// Light gray sheet with white boxes.
    pub const fn light() -> Self {
        Self {
            background: Color::rgb(0xee, 0xee, 0xee),
            box_fill: Color::rgb(0xff, 0xff, 0xff),
            text: Color::rgba(0x00, 0x00, 0x00, 0xe0),
            stroke: Color::rgb(0xf0, 0xf0, 0xf0),
        }
    }

    /// Charcoal sheet with dark gray boxes.
    pub const fn dark() -> Self {
        Self {
            background: Color::rgb(0x1f, 0x1f, 0x1f),
            box_fill: Color::rgb(0x30, 0x30, 0x30),
            text: Color::rgb(0xff, 0xff, 0xff),
            stroke: Color::rgb(0x43, 0x43, 0x43),
        }
    }

    /// Preset for `mode`.
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
