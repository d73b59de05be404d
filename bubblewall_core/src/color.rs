// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ARGB colors and the bubble palette.
//!
//! [`Color`] is an opaque 8-bit-per-channel ARGB value. [`Palette`] holds the
//! ordered list of bubble colors supplied by the host (at least two entries),
//! which the placement engine consumes two at a time as `(outline, fill)`
//! pairs.

use alloc::vec::Vec;
use core::fmt;

/// An 8-bit-per-channel ARGB color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Alpha channel (0 = transparent, 255 = opaque).
    pub a: u8,
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color(#{:02x}{:02x}{:02x}{:02x})",
            self.a, self.r, self.g, self.b
        )
    }
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::from_argb(0, 0, 0, 0);

    /// Opaque black.
    pub const BLACK: Self = Self::from_argb(255, 0, 0, 0);

    /// Opaque white.
    pub const WHITE: Self = Self::from_argb(255, 255, 255, 255);

    /// Creates a color from its four channels.
    #[inline]
    #[must_use]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Creates an opaque grey with all three color channels set to `level`.
    #[inline]
    #[must_use]
    pub const fn grey(level: u8) -> Self {
        Self::from_argb(255, level, level, level)
    }

    /// Returns this color with its alpha channel replaced.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parses `#RRGGBB` or `#AARRGGBB` (hex digits are case-insensitive).
    ///
    /// Six-digit colors are opaque.
    pub fn parse(s: &str) -> Result<Self, ParseColorError> {
        let hex = s.strip_prefix('#').ok_or(ParseColorError::MissingHash)?;
        let digits = hex.as_bytes();
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ParseColorError::BadLength(digits.len()));
        }
        let mut channels = [255_u8; 4];
        let skip = if digits.len() == 6 { 1 } else { 0 };
        for (slot, pair) in channels[skip..].iter_mut().zip(digits.chunks_exact(2)) {
            *slot = (hex_digit(pair[0])? << 4) | hex_digit(pair[1])?;
        }
        let [a, r, g, b] = channels;
        Ok(Self::from_argb(a, r, g, b))
    }

    /// Composites `self` (source) over the opaque `dst`.
    ///
    /// The result is always opaque.
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        let a = u16::from(self.a);
        let mix = |s: u8, d: u8| -> u8 {
            let v = (u16::from(s) * a + u16::from(d) * (255 - a) + 127) / 255;
            #[expect(
                clippy::cast_possible_truncation,
                reason = "weighted average of two u8 values fits in u8"
            )]
            let v = v as u8;
            v
        };
        Self::from_argb(
            255,
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
        )
    }
}

fn hex_digit(c: u8) -> Result<u8, ParseColorError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(ParseColorError::BadDigit(char::from(c))),
    }
}

/// Errors from [`Color::parse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseColorError {
    /// The string does not start with `#`.
    MissingHash,
    /// The number of hex digits is neither 6 nor 8.
    BadLength(usize),
    /// A character is not a hex digit.
    BadDigit(char),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHash => f.write_str("color must start with '#'"),
            Self::BadLength(n) => write!(f, "expected 6 or 8 hex digits, found {n}"),
            Self::BadDigit(c) => write!(f, "invalid hex digit {c:?}"),
        }
    }
}

impl core::error::Error for ParseColorError {}

/// Errors from [`Palette`] construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteError {
    /// A palette needs at least one `(outline, fill)` pair.
    TooFewColors(usize),
    /// The entry at `index` is not a valid color.
    InvalidColor {
        /// Position of the offending entry.
        index: usize,
        /// Why it failed to parse.
        source: ParseColorError,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewColors(n) => write!(f, "palette needs at least 2 colors, got {n}"),
            Self::InvalidColor { index, source } => {
                write!(f, "palette entry {index} is invalid: {source}")
            }
        }
    }
}

impl core::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidColor { source, .. } => Some(source),
            Self::TooFewColors(_) => None,
        }
    }
}

/// Ordered bubble colors, consumed as `(outline, fill)` pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Creates a palette, rejecting lists with fewer than two colors.
    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        if colors.len() < 2 {
            return Err(PaletteError::TooFewColors(colors.len()));
        }
        Ok(Self { colors })
    }

    /// Parses every entry with [`Color::parse`].
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self, PaletteError> {
        let colors = entries
            .iter()
            .enumerate()
            .map(|(index, s)| {
                Color::parse(s.as_ref()).map_err(|source| PaletteError::InvalidColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Number of colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; a palette holds at least two colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the color at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// All colors in order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}
