//! Host-level tests for glyph and string widths.

use embedded_graphics::{
    geometry::Size,
    image::ImageRaw,
    mono_font::{DecorationDimensions, MonoFont, mapping::StrGlyphMapping},
};
use proptest::prelude::*;
use ws_flow::font::LETTER_GAP;
use ws_flow::{GlyphMetrics, GlyphSpacing, MatrixFont};

// Three 5x2 glyphs side by side, the last one the replacement box:
//   H: #...#   I: .###.   \u{FFFD}: #####
//      #...#      ..#..              #...#
const HI_FONT_DATA: [u8; 4] = [0x8b, 0xbe, 0x89, 0x22];
const HI_GLYPH_MAPPING: StrGlyphMapping<'static> = StrGlyphMapping::new("HI\u{FFFD}", 2);
const HI_FONT: MonoFont<'static> = MonoFont {
    image: ImageRaw::new(&HI_FONT_DATA, 15),
    glyph_mapping: &HI_GLYPH_MAPPING,
    character_size: Size::new(5, 2),
    character_spacing: 0,
    baseline: 1,
    underline: DecorationDimensions::new(2, 1),
    strikethrough: DecorationDimensions::new(1, 1),
};

#[test]
fn hi_measures_ten_pixels() {
    let metrics = GlyphMetrics::new(&HI_FONT, GlyphSpacing::Proportional, 0);
    assert_eq!(metrics.char_width('H'), 6);
    assert_eq!(metrics.char_width('I'), 4);
    assert_eq!(metrics.string_width("HI"), 10);
}

#[test]
fn narrow_glyph_is_drawn_from_its_first_inked_column() {
    let metrics = GlyphMetrics::new(&HI_FONT, GlyphSpacing::Proportional, 0);
    assert_eq!(metrics.draw_offset('H'), 0);
    assert_eq!(metrics.draw_offset('I'), 1);
}

// Same two letters, but H doubles as the replacement glyph.
const HI_FONT_DATA_NO_BOX: [u8; 4] = [0x8b, 0x80, 0x89, 0x00];
const HI_GLYPH_MAPPING_NO_BOX: StrGlyphMapping<'static> = StrGlyphMapping::new("HI", 0);
const HI_FONT_NO_BOX: MonoFont<'static> = MonoFont {
    image: ImageRaw::new(&HI_FONT_DATA_NO_BOX, 10),
    glyph_mapping: &HI_GLYPH_MAPPING_NO_BOX,
    ..HI_FONT
};

#[test]
fn printable_characters_missing_from_a_custom_font_use_default_width() {
    let metrics = GlyphMetrics::new(&HI_FONT, GlyphSpacing::Proportional, 0);
    assert_eq!(metrics.default_width(), 5);
    for c in ['A', 'h', ' ', '?', '~'] {
        assert_eq!(metrics.char_width(c), metrics.default_width(), "{c:?}");
        assert_eq!(metrics.draw_offset(c), 0, "{c:?}");
    }
    assert_eq!(metrics.string_width("HAI"), 6 + 5 + 4);
}

#[test]
fn replacement_glyph_shared_with_a_letter_is_not_measured_for_unmapped_characters() {
    let metrics = GlyphMetrics::new(&HI_FONT_NO_BOX, GlyphSpacing::Proportional, 0);
    assert_eq!(metrics.char_width('A'), metrics.default_width());
    assert_eq!(metrics.char_width('I'), 4);
}

#[test]
fn unmapped_characters_use_default_width() {
    let metrics = GlyphMetrics::for_font(MatrixFont::Font5x7, GlyphSpacing::Proportional);
    assert_eq!(metrics.default_width(), 5);
    for c in ['\0', '\n', '\u{7f}', 'é', '\u{1F600}', char::MAX] {
        assert_eq!(metrics.char_width(c), metrics.default_width(), "{c:?}");
        assert_eq!(metrics.draw_offset(c), 0, "{c:?}");
    }
}

#[test]
fn every_printable_glyph_has_positive_width() {
    for font in [
        MatrixFont::Font3x4Trim,
        MatrixFont::Font4x6,
        MatrixFont::Font5x7,
        MatrixFont::Font6x10,
        MatrixFont::Font10x20,
    ] {
        let metrics = GlyphMetrics::for_font(font, GlyphSpacing::Proportional);
        for c in ' '..='~' {
            let width = metrics.char_width(c);
            assert!(width > LETTER_GAP, "{font:?} {c:?} has width {width}");
            assert!(width <= metrics.default_width() + LETTER_GAP, "{font:?} {c:?}");
        }
    }
}

#[test]
fn space_is_half_a_cell_plus_gap() {
    let metrics = GlyphMetrics::for_font(MatrixFont::Font5x7, GlyphSpacing::Proportional);
    assert_eq!(metrics.char_width(' '), 3 + LETTER_GAP);
}

#[test]
fn proportional_packs_narrow_letters_tighter() {
    let metrics = GlyphMetrics::for_font(MatrixFont::Font5x7, GlyphSpacing::Proportional);
    assert!(metrics.char_width('I') < metrics.char_width('M'));
}

#[test]
fn monospace_uses_trimmed_cell_width() {
    let plain = GlyphMetrics::for_font(MatrixFont::Font5x7, GlyphSpacing::Monospace);
    let trimmed = GlyphMetrics::for_font(MatrixFont::Font4x6Trim, GlyphSpacing::Monospace);
    for c in ['I', 'M', ' ', '\u{1F600}'] {
        assert_eq!(plain.char_width(c), 5);
        assert_eq!(trimmed.char_width(c), 4);
    }
    assert_eq!(trimmed.string_width("RUST"), 16);
}

#[test]
fn widths_are_deterministic() {
    let first = GlyphMetrics::for_font(MatrixFont::Font6x10, GlyphSpacing::Proportional);
    let second = GlyphMetrics::for_font(MatrixFont::Font6x10, GlyphSpacing::Proportional);
    assert_eq!(first, second);
    for c in ' '..='~' {
        assert_eq!(first.char_width(c), first.char_width(c));
    }
}

proptest! {
    #[test]
    fn string_width_is_sum_of_char_widths(text in ".{0,64}") {
        let metrics = GlyphMetrics::for_font(MatrixFont::Font5x7, GlyphSpacing::Proportional);
        let sum: i32 = text.chars().map(|c| metrics.char_width(c)).sum();
        prop_assert_eq!(metrics.string_width(&text), sum);
    }

    #[test]
    fn ascii_string_width_is_sum_in_every_mode(
        text in "[ -~]{0,64}",
        monospace in any::<bool>(),
    ) {
        let spacing = if monospace { GlyphSpacing::Monospace } else { GlyphSpacing::Proportional };
        let metrics = GlyphMetrics::for_font(MatrixFont::Font3x4Trim, spacing);
        let sum: i32 = text.chars().map(|c| metrics.char_width(c)).sum();
        prop_assert_eq!(metrics.string_width(&text), sum);
    }
}
