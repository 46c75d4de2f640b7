use rustc_hash::FxHashMap;

use crate::id::AssetId;
use crate::math::Vec2;

/// Metrics of one glyph at font size `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphData {
    #[cfg_attr(feature = "serde", serde(with = "crate::math::serde_vec2"))]
    pub quad_size: Vec2,
    /// Offset of the quad from the pen; `y` points up from the baseline.
    #[cfg_attr(feature = "serde", serde(with = "crate::math::serde_vec2"))]
    pub quad_offset: Vec2,
    pub advance: f32,
}

/// Line metrics and glyphs of one font, keyed by character code point.
///
/// The resolver does not rasterize anything; the host supplies these numbers
/// from whatever produced its glyph atlas.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontData {
    pub line_height: f32,
    pub ascender: f32,
    pub descender: f32,
    pub glyphs: FxHashMap<u32, GlyphData>,
}

pub type FontMap = FxHashMap<AssetId, FontData>;

/// A character the font has no glyph for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingGlyph(pub char);

/// A glyph quad in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub ch: char,
    pub xy: Vec2,
    pub wh: Vec2,
}

impl FontData {
    pub fn new(line_height: f32, ascender: f32, descender: f32) -> Self {
        Self {
            line_height,
            ascender,
            descender,
            glyphs: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn with_glyph(mut self, ch: char, glyph: GlyphData) -> Self {
        self.glyphs.insert(ch as u32, glyph);
        self
    }

    #[inline]
    pub fn glyph(&self, ch: char) -> Option<&GlyphData> {
        self.glyphs.get(&(ch as u32))
    }

    /// Loads metrics exported as JSON, e.g.
    /// `{"line_height":1.2,"ascender":0.9,"descender":-0.3,"glyphs":{"65":{...}}}`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Lays out `text` word by word starting at `origin` (the element's top-left),
    /// wrapping to a new line when a word would cross `right_edge`.
    ///
    /// Every word is followed by one space glyph. The wrap decision is taken once
    /// per word, so a word wider than the line still overflows it.
    pub fn layout_words(
        &self,
        text: &str,
        font_size: f32,
        origin: Vec2,
        right_edge: f32,
        out: &mut Vec<PlacedGlyph>,
    ) -> Result<(), MissingGlyph> {
        let line_height = self.line_height * font_size;
        let mut pen = Vec2::new(origin.x, origin.y + self.ascender * font_size);

        for word in text.split_whitespace() {
            let chars = word.chars().chain(core::iter::once(' '));

            let mut word_width = 0.0;
            for ch in chars.clone() {
                word_width += self.glyph(ch).ok_or(MissingGlyph(ch))?.advance * font_size;
            }
            if pen.x + word_width > right_edge {
                pen.x = origin.x;
                pen.y += line_height;
            }

            for ch in chars {
                let glyph = self.glyph(ch).ok_or(MissingGlyph(ch))?;
                let quad_offset = glyph.quad_offset * font_size;
                out.push(PlacedGlyph {
                    ch,
                    xy: Vec2::new(pen.x + quad_offset.x, pen.y - quad_offset.y),
                    wh: glyph.quad_size * font_size,
                });
                pen.x += glyph.advance * font_size;
            }
        }
        Ok(())
    }
}
