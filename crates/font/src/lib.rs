//! Bitmap font module - decoder for compiled `MFNT` font assets
//!
//! A compiled font is a little-endian binary blob:
//!
//! | Part | Layout |
//! |------|--------|
//! | magic | `b"MFNT"` |
//! | glyph count N | `u32` |
//! | line advance | `u32` |
//! | N glyphs | `i32 offset_x, i32 offset_y, u32 width, u32 height, f32 tx, f32 ty, f32 tx2, f32 ty2, u32 x_advance` (36 bytes) |
//! | N encodings | `u32 codepoint, u32 glyph_index` (1-based index) |
//! | texture | PNG image, the rest of the blob |
//!
//! The texture is kept as opaque bytes; nothing here rasterizes glyphs.
//! Text is measured with [`BitmapFont::width`] and laid out as textured
//! quads with [`BitmapFont::layout`].

use std::collections::HashMap;
use std::path::Path;

use graytris_types::TextMetrics;

pub use error::{FontError, Result};

mod error;
mod reader;

use reader::Reader;

/// Leading magic of every compiled font
pub const MAGIC: &[u8; 4] = b"MFNT";

/// Encoded size of one glyph record
pub const GLYPH_RECORD_LEN: usize = 36;

/// Encoded size of one encoding record
pub const ENCODING_RECORD_LEN: usize = 8;

/// Placement and texture coordinates of one glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub offset_x: i32,
    pub offset_y: i32,
    pub width: u32,
    pub height: u32,
    pub tx: f32,
    pub ty: f32,
    pub tx2: f32,
    pub ty2: f32,
    pub x_advance: u32,
}

/// One positioned glyph of laid-out text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Texture rectangle `(u, v, u2, v2)`
    pub uv: (f32, f32, f32, f32),
}

/// A decoded bitmap font.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapFont {
    glyphs: Vec<Glyph>,
    /// Codepoint to 0-based glyph index
    encoding: HashMap<char, usize>,
    y_advance: u32,
    texture: Vec<u8>,
}

impl BitmapFont {
    /// Read and decode a font file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Self::decode(&data)?;
        tracing::info!(
            path = %path.display(),
            glyphs = font.glyphs.len(),
            y_advance = font.y_advance,
            "font loaded"
        );
        Ok(font)
    }

    /// Decode a compiled font blob. Stops at the first malformed part.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut r = Reader::new(data);

        if r.bytes(MAGIC.len(), "magic")? != MAGIC {
            return Err(FontError::BadMagic);
        }
        let count = r.u32("glyph count")? as usize;
        let y_advance = r.u32("line advance")?;

        // Reject counts the blob cannot hold before allocating for them.
        let needed = count.saturating_mul(GLYPH_RECORD_LEN + ENCODING_RECORD_LEN);
        if needed > r.remaining() {
            return Err(FontError::Truncated {
                what: "glyph table",
                offset: r.offset(),
            });
        }

        let mut glyphs = Vec::with_capacity(count);
        for _ in 0..count {
            glyphs.push(Glyph {
                offset_x: r.i32("glyph offset_x")?,
                offset_y: r.i32("glyph offset_y")?,
                width: r.u32("glyph width")?,
                height: r.u32("glyph height")?,
                tx: r.f32("glyph tx")?,
                ty: r.f32("glyph ty")?,
                tx2: r.f32("glyph tx2")?,
                ty2: r.f32("glyph ty2")?,
                x_advance: r.u32("glyph x_advance")?,
            });
        }

        let mut encoding = HashMap::with_capacity(count);
        for _ in 0..count {
            let codepoint = r.u32("encoding codepoint")?;
            let index = r.u32("encoding index")?;
            let ch = char::from_u32(codepoint).ok_or(FontError::BadCodepoint(codepoint))?;
            if index == 0 || index as usize > count {
                return Err(FontError::BadGlyphIndex { ch, index });
            }
            encoding.insert(ch, index as usize - 1);
        }

        let texture = r.rest();
        if texture.is_empty() {
            return Err(FontError::MissingTexture);
        }

        Ok(Self {
            glyphs,
            encoding,
            y_advance,
            texture: texture.to_vec(),
        })
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn y_advance(&self) -> u32 {
        self.y_advance
    }

    /// Raw PNG bytes of the glyph atlas.
    pub fn texture(&self) -> &[u8] {
        &self.texture
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.encoding.get(&ch).map(|&i| &self.glyphs[i])
    }

    /// Total horizontal advance of `text` in pixels. Characters without a
    /// glyph take no space.
    pub fn width(&self, text: &str) -> u32 {
        text.chars()
            .filter_map(|ch| self.glyph(ch))
            .fold(0u32, |sum, g| sum.saturating_add(g.x_advance))
    }

    /// Position every mapped character of `text`, left to right, starting
    /// at pen position (x, y).
    pub fn layout(&self, x: i32, y: i32, text: &str) -> Vec<GlyphQuad> {
        let mut pen = x;
        let mut quads = Vec::with_capacity(text.len());
        for g in text.chars().filter_map(|ch| self.glyph(ch)) {
            quads.push(GlyphQuad {
                x: pen.saturating_add(g.offset_x),
                y: y.saturating_add(g.offset_y),
                width: g.width,
                height: g.height,
                uv: (g.tx, g.ty, g.tx2, g.ty2),
            });
            pen = pen.saturating_add(i32::try_from(g.x_advance).unwrap_or(i32::MAX));
        }
        quads
    }
}

/// Terminal columns: a character cell is half as wide as a line is tall,
/// so `y_advance` pixels span two columns.
impl TextMetrics for BitmapFont {
    fn text_width(&self, text: &str) -> u32 {
        let px = self.width(text);
        if self.y_advance == 0 {
            return text.chars().count() as u32;
        }
        px.saturating_mul(2).div_ceil(self.y_advance)
    }
}
