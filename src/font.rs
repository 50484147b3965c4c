//! Fonts and per-glyph pixel widths for scrolling text.
//!
//! [`GlyphMetrics`] measures each printable ASCII glyph of a [`MonoFont`] once, so text can be
//! packed proportionally (an `I` is narrower than an `M`) even though the underlying fonts are
//! monospaced bitmaps.

use core::convert::Infallible;

use embedded_graphics::{
    mono_font::{
        DecorationDimensions, MonoFont, MonoTextStyle,
        ascii::{
            FONT_4X6, FONT_5X7, FONT_5X8, FONT_6X10, FONT_6X13, FONT_6X13_BOLD, FONT_7X13,
            FONT_8X13, FONT_9X15, FONT_10X20,
        },
        mapping::{GlyphMapping, StrGlyphMapping},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

/// Blank column after every proportional glyph.
pub const LETTER_GAP: i32 = 1;

const FIRST_GLYPH: u32 = ' ' as u32;
const GLYPH_COUNT: usize = 95; // ' ' ..= '~'
// Noncharacter no font maps; its glyph index is the font's replacement glyph.
const UNMAPPED_PROBE: char = '\u{FFFF}';

// Packed bitmap for the internal 3x4 font (ASCII 0x20-0x7E).
const BIT_MATRIX3X4_FONT_DATA: [u8; 144] = [
    0x0a, 0xd5, 0x10, 0x4a, 0xa0, 0x01, 0x0a, 0xfe, 0x68, 0x85, 0x70, 0x02, 0x08, 0x74, 0x90, 0x86,
    0xa5, 0xc4, 0x08, 0x5e, 0x68, 0x48, 0x08, 0x10, 0xeb, 0x7b, 0xe7, 0xfd, 0x22, 0x27, 0xb8, 0x9b,
    0x39, 0xb4, 0x05, 0xd1, 0xa9, 0x3e, 0xea, 0x5d, 0x28, 0x0a, 0xff, 0xf3, 0xfc, 0xe4, 0x45, 0xd2,
    0xff, 0x7d, 0xff, 0xbc, 0xd9, 0xff, 0xb7, 0xcb, 0xb4, 0xe8, 0xe9, 0xfd, 0xfe, 0xcb, 0x25, 0xaa,
    0xd9, 0x7d, 0x97, 0x7d, 0xe7, 0xbf, 0xdf, 0x6f, 0xdf, 0x7f, 0x6d, 0xb7, 0xe0, 0xd0, 0xf7, 0xe5,
    0x6d, 0x48, 0xc0, 0x68, 0xdf, 0x35, 0x6f, 0x49, 0x40, 0x40, 0x86, 0xf5, 0xd7, 0xab, 0xe0, 0xc7,
    0x5f, 0x7d, 0xff, 0xbc, 0xd9, 0xff, 0x37, 0xcb, 0xb4, 0xe8, 0xe9, 0xfd, 0x1e, 0xcb, 0x25, 0xaa,
    0xd9, 0x7d, 0x17, 0x7d, 0xe7, 0xbf, 0xdf, 0x6f, 0xdf, 0x7f, 0x6d, 0xb7, 0xb1, 0x80, 0xf7, 0xe5,
    0x6d, 0x48, 0xa0, 0xa8, 0xdf, 0x35, 0x6f, 0x49, 0x20, 0x90, 0x86, 0xf5, 0xd7, 0xab, 0xb1, 0x80,
];
const BIT_MATRIX3X4_IMAGE_WIDTH: u32 = 48;
const BIT_MATRIX3X4_GLYPH_MAPPING: StrGlyphMapping<'static> = StrGlyphMapping::new("\0 \u{7e}", 0);

/// Monospace 3x4 font for 4-row matrices.
#[must_use]
pub const fn bit_matrix3x4_font() -> MonoFont<'static> {
    MonoFont {
        image: embedded_graphics::image::ImageRaw::new(
            &BIT_MATRIX3X4_FONT_DATA,
            BIT_MATRIX3X4_IMAGE_WIDTH,
        ),
        glyph_mapping: &BIT_MATRIX3X4_GLYPH_MAPPING,
        character_size: Size::new(3, 4),
        character_spacing: 0,
        baseline: 3,
        underline: DecorationDimensions::new(3, 1),
        strikethrough: DecorationDimensions::new(2, 1),
    }
}

/// Built-in fonts for [`ScrollingTextDisplay`](crate::ScrollingTextDisplay).
///
/// Fonts with `Trim` suffix drop one blank column of cell padding in monospace mode to pack
/// text more tightly on small displays. In proportional mode the trim makes no difference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixFont {
    Font3x4Trim,
    Font4x6,
    Font3x5Trim,
    #[default]
    Font5x7,
    Font4x6Trim,
    Font5x8,
    Font4x7Trim,
    Font6x10,
    Font5x9Trim,
    Font6x13,
    Font5x12Trim,
    Font6x13Bold,
    Font7x13,
    Font6x12Trim,
    Font8x13,
    Font7x12Trim,
    Font9x15,
    Font8x14Trim,
    Font10x20,
    Font9x19Trim,
}

impl MatrixFont {
    /// Return the `MonoFont` for this variant.
    #[must_use]
    pub const fn to_font(self) -> MonoFont<'static> {
        match self {
            Self::Font3x4Trim => bit_matrix3x4_font(),
            Self::Font4x6 | Self::Font3x5Trim => FONT_4X6,
            Self::Font5x7 | Self::Font4x6Trim => FONT_5X7,
            Self::Font5x8 | Self::Font4x7Trim => FONT_5X8,
            Self::Font6x10 | Self::Font5x9Trim => FONT_6X10,
            Self::Font6x13 | Self::Font5x12Trim => FONT_6X13,
            Self::Font6x13Bold => FONT_6X13_BOLD,
            Self::Font7x13 | Self::Font6x12Trim => FONT_7X13,
            Self::Font8x13 | Self::Font7x12Trim => FONT_8X13,
            Self::Font9x15 | Self::Font8x14Trim => FONT_9X15,
            Self::Font10x20 | Self::Font9x19Trim => FONT_10X20,
        }
    }

    /// Columns removed from the monospace advance.
    #[must_use]
    pub const fn trim(self) -> i32 {
        match self {
            Self::Font3x5Trim
            | Self::Font4x6Trim
            | Self::Font4x7Trim
            | Self::Font5x9Trim
            | Self::Font5x12Trim
            | Self::Font6x12Trim
            | Self::Font7x12Trim
            | Self::Font8x14Trim
            | Self::Font9x19Trim => 1,
            Self::Font3x4Trim
            | Self::Font4x6
            | Self::Font5x7
            | Self::Font5x8
            | Self::Font6x10
            | Self::Font6x13
            | Self::Font6x13Bold
            | Self::Font7x13
            | Self::Font8x13
            | Self::Font9x15
            | Self::Font10x20 => 0,
        }
    }
}

/// How far the pen moves after each glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlyphSpacing {
    /// Inked width of the glyph plus [`LETTER_GAP`].
    #[default]
    Proportional,
    /// Cell width of the font, less the font's trim.
    Monospace,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Ink {
    left: u8,
    width: u8,
}

/// Pixel widths of every glyph in one font.
///
/// Widths are total: any `char` has one. Characters outside printable ASCII, and printable
/// characters the font does not map, get [`default_width`](Self::default_width) and are drawn
/// with the font's replacement glyph.
///
/// A printable character is unmapped when it shares the replacement glyph with other printable
/// characters. If exactly one printable character lands on the replacement glyph, it is taken
/// to own that glyph.
///
/// ```
/// use ws_flow::{GlyphMetrics, GlyphSpacing, MatrixFont};
///
/// let metrics = GlyphMetrics::new(&MatrixFont::Font5x7.to_font(), GlyphSpacing::Proportional, 0);
/// let text = "Scroll me";
/// let sum: i32 = text.chars().map(|c| metrics.char_width(c)).sum();
/// assert_eq!(metrics.string_width(text), sum);
/// assert_eq!(metrics.char_width('\u{1F600}'), metrics.default_width());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphMetrics {
    ink: [Option<Ink>; GLYPH_COUNT],
    cell_width: i32,
    cell_height: i32,
    space_width: i32,
    monospace_width: i32,
    spacing: GlyphSpacing,
}

impl GlyphMetrics {
    /// Measure every printable ASCII glyph of `font`.
    ///
    /// `trim` narrows the monospace advance (see [`MatrixFont::trim`]).
    #[must_use]
    pub fn new(font: &MonoFont<'_>, spacing: GlyphSpacing, trim: i32) -> Self {
        let cell_width = i32::try_from(font.character_size.width).unwrap_or(i32::MAX);
        let cell_height = i32::try_from(font.character_size.height).unwrap_or(i32::MAX);

        let mapping = font.glyph_mapping;
        let replacement = mapping.index(UNMAPPED_PROBE);
        let on_replacement = printable_chars()
            .filter(|&c| mapping.index(c) == replacement)
            .count();

        let mut ink = [None; GLYPH_COUNT];
        for (slot, c) in ink.iter_mut().zip(printable_chars()) {
            if on_replacement > 1 && mapping.index(c) == replacement {
                continue;
            }
            *slot = Some(measure_glyph(font, c));
        }

        Self {
            ink,
            cell_width,
            cell_height,
            space_width: (cell_width + 1) / 2 + LETTER_GAP,
            monospace_width: (cell_width - trim).max(1),
            spacing,
        }
    }

    /// Metrics for a built-in font.
    #[must_use]
    pub fn for_font(font: MatrixFont, spacing: GlyphSpacing) -> Self {
        Self::new(&font.to_font(), spacing, font.trim())
    }

    #[must_use]
    pub const fn cell_height(&self) -> i32 {
        self.cell_height
    }

    /// Width used for characters the font does not map.
    #[must_use]
    pub const fn default_width(&self) -> i32 {
        match self.spacing {
            GlyphSpacing::Proportional => self.cell_width,
            GlyphSpacing::Monospace => self.monospace_width,
        }
    }

    /// Pen advance in pixels for `c`.
    #[must_use]
    pub fn char_width(&self, c: char) -> i32 {
        match self.spacing {
            GlyphSpacing::Monospace => self.monospace_width,
            GlyphSpacing::Proportional => match self.ink(c) {
                None => self.default_width(),
                Some(Ink { width: 0, .. }) => self.space_width,
                Some(Ink { width, .. }) => i32::from(width) + LETTER_GAP,
            },
        }
    }

    /// Sum of [`char_width`](Self::char_width) over `text`.
    #[must_use]
    pub fn string_width(&self, text: &str) -> i32 {
        text.chars()
            .fold(0_i32, |total, c| total.saturating_add(self.char_width(c)))
    }

    /// Horizontal shift that puts the glyph's first inked column on the pen position.
    #[must_use]
    pub fn draw_offset(&self, c: char) -> i32 {
        match (self.spacing, self.ink(c)) {
            (GlyphSpacing::Proportional, Some(ink)) => i32::from(ink.left),
            _ => 0,
        }
    }

    fn ink(&self, c: char) -> Option<Ink> {
        let index = u32::from(c).checked_sub(FIRST_GLYPH)?;
        self.ink.get(usize::try_from(index).ok()?).copied().flatten()
    }
}

fn printable_chars() -> impl Iterator<Item = char> {
    (FIRST_GLYPH..).take(GLYPH_COUNT).filter_map(char::from_u32)
}

/// Draws one glyph into an [`InkProbe`] and reads back its inked columns.
fn measure_glyph(font: &MonoFont<'_>, c: char) -> Ink {
    let mut buf = [0u8; 4];
    let mut probe = InkProbe::new(font.character_size);
    let style = MonoTextStyle::new(font, BinaryColor::On);
    if let Err(never) =
        Text::with_baseline(c.encode_utf8(&mut buf), Point::zero(), style, Baseline::Top)
            .draw(&mut probe)
    {
        match never {}
    }
    probe.ink()
}

/// Draw target that only records which columns received an "on" pixel.
struct InkProbe {
    size: Size,
    first: Option<i32>,
    last: i32,
}

impl InkProbe {
    const fn new(size: Size) -> Self {
        Self {
            size,
            first: None,
            last: 0,
        }
    }

    fn ink(&self) -> Ink {
        self.first.map_or_else(Ink::default, |first| Ink {
            left: u8::try_from(first).unwrap_or(u8::MAX),
            width: u8::try_from(self.last - first + 1).unwrap_or(u8::MAX),
        })
    }
}

impl OriginDimensions for InkProbe {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for InkProbe {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let width = i32::try_from(self.size.width).unwrap_or(i32::MAX);
        for Pixel(point, color) in pixels {
            if color.is_off() || point.x < 0 || point.x >= width {
                continue;
            }
            self.first = Some(self.first.map_or(point.x, |first| first.min(point.x)));
            self.last = self.last.max(point.x);
        }
        Ok(())
    }
}
