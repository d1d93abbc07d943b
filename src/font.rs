//! Font atlas construction.
//!
//! A [`Font`] is built once per (font bytes, resolution) pair: every glyph in
//! the configured codepoint range is rasterized through fontdue, flipped to
//! the bottom-up atlas convention, and shelf-packed into a single coverage
//! bitmap. The glyph table records layout metrics plus each glyph's
//! normalized texture rectangle. Fonts are read-only after construction and
//! should be passed by reference.

use fontdue::FontSettings;

use crate::constants::{ATLAS_PAD_X, ATLAS_PAD_Y, DESIRED_ATLAS_WIDTH, MAX_FONT_RESOLUTION};
use crate::error::{FontError, FontResult};

/// Inclusive contiguous ASCII window of codepoints covered by a [`Font`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodepointRange {
    from: char,
    to: char,
}

impl CodepointRange {
    pub fn new(from: char, to: char) -> FontResult<Self> {
        if from > to || !from.is_ascii() || !to.is_ascii() {
            return Err(FontError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Printable ASCII, `' '` through `'~'`.
    pub fn ascii_printable() -> Self {
        Self { from: ' ', to: '~' }
    }

    pub fn start(&self) -> char {
        self.from
    }

    pub fn end(&self) -> char {
        self.to
    }

    pub fn len(&self) -> usize {
        self.to as usize - self.from as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false // always at least one codepoint
    }

    pub fn contains(&self, ch: char) -> bool {
        self.from <= ch && ch <= self.to
    }

    /// Index of `ch` into a glyph table covering this range.
    pub fn index_of(&self, ch: char) -> Option<usize> {
        self.contains(ch).then(|| ch as usize - self.from as usize)
    }

    pub fn chars(&self) -> impl Iterator<Item = char> {
        self.from..=self.to
    }
}

impl Default for CodepointRange {
    fn default() -> Self {
        Self::ascii_printable()
    }
}

/// Single-channel coverage bitmap, row-major, origin bottom-left.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bitmap {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

/// One rendered character shape plus its layout metrics.
///
/// All geometry fields are expressed at the owning font's base pixel height
/// and kept as floats so later rescaling does not accumulate rounding jitter.
/// `offset_y` is the distance from the baseline to the bitmap top in a
/// y-down screen convention (negative for glyphs above the baseline).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Glyph {
    pub codepoint: char,
    pub width: f32,
    pub height: f32,
    pub advance: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub min_u: f32,
    pub min_v: f32,
    pub max_u: f32,
    pub max_v: f32,
}

/// A rasterized font: vertical metrics, the composited texture atlas, and a
/// glyph table indexed by codepoint. KB-scale, so pass it by reference.
#[derive(Clone, Debug)]
pub struct Font {
    /// Base rasterization height in pixels; rendering at other sizes scales
    /// every glyph metric by `target / pixel_height`.
    pub pixel_height: u32,
    pub ascender: f32,
    pub descender: f32,
    pub linegap: f32,
    pub atlas: Bitmap,
    pub glyphs: Vec<Glyph>,
    pub range: CodepointRange,
}

impl Font {
    /// Rasterizes every glyph in `range` at `pixel_height` and packs the
    /// bitmaps into a single atlas.
    ///
    /// Expensive; do this once per font and resolution and keep the result
    /// around. Fails if `pixel_height` exceeds [`MAX_FONT_RESOLUTION`] or the
    /// font data cannot be parsed.
    pub fn init(font_bytes: &[u8], pixel_height: u32, range: CodepointRange) -> FontResult<Self> {
        if pixel_height > MAX_FONT_RESOLUTION {
            tracing::warn!(
                requested = pixel_height,
                max = MAX_FONT_RESOLUTION,
                "refusing to build font atlas above maximum resolution"
            );
            return Err(FontError::ResolutionTooHigh {
                requested: pixel_height,
                max: MAX_FONT_RESOLUTION,
            });
        }

        let settings = FontSettings {
            scale: pixel_height as f32,
            ..Default::default()
        };
        let provider =
            fontdue::Font::from_bytes(font_bytes, settings).map_err(FontError::InvalidFontData)?;

        let px = pixel_height as f32;
        let line = provider
            .horizontal_line_metrics(px)
            .ok_or(FontError::MissingLineMetrics)?;

        // Rasterize every glyph in the range, tracking the dimensions that
        // drive the atlas allocation.
        let mut glyphs = Vec::with_capacity(range.len());
        let mut bitmaps = Vec::with_capacity(range.len());
        let mut tallest = 0usize;
        let mut aggregate_width = 0usize;
        for ch in range.chars() {
            let (metrics, coverage) = provider.rasterize(ch, px);
            glyphs.push(Glyph {
                codepoint: ch,
                width: metrics.width as f32,
                height: metrics.height as f32,
                advance: metrics.advance_width,
                offset_x: metrics.xmin as f32,
                // fontdue reports the bitmap bottom relative to the baseline
                // with y up; quads are placed from the baseline with y down.
                offset_y: -(metrics.ymin as f32 + metrics.height as f32),
                min_u: 0.0,
                min_v: 0.0,
                max_u: 0.0,
                max_v: 0.0,
            });
            // The provider emits rows top-down; the atlas convention is
            // bottom-up. This flip is a hard contract of the output format.
            bitmaps.push(Bitmap {
                width: metrics.width,
                height: metrics.height,
                pixels: flip_rows(&coverage, metrics.width, metrics.height),
            });
            aggregate_width += metrics.width + ATLAS_PAD_X;
            tallest = tallest.max(metrics.height);
        }

        let atlas_width = DESIRED_ATLAS_WIDTH;
        let glyph_widths: Vec<usize> = bitmaps.iter().map(|b| b.width).collect();
        let atlas_height = required_atlas_height(tallest, aggregate_width, &glyph_widths, atlas_width);
        let mut atlas = Bitmap {
            width: atlas_width,
            height: atlas_height,
            pixels: vec![0u8; atlas_width * atlas_height],
        };

        // Shelf-pack left to right in codepoint order. Row height is the
        // globally tallest glyph, which keeps the packer bounded and
        // deterministic at the cost of some wasted space for small glyphs.
        let mut pack_x = 0usize;
        let mut pack_y = 0usize;
        for (glyph, bitmap) in glyphs.iter_mut().zip(&bitmaps) {
            if pack_x + bitmap.width > atlas.width {
                pack_x = 0;
                pack_y += tallest + ATLAS_PAD_Y;
            }

            for row in 0..bitmap.height {
                let src = row * bitmap.width;
                let dst = (pack_y + row) * atlas.width + pack_x;
                atlas.pixels[dst..dst + bitmap.width]
                    .copy_from_slice(&bitmap.pixels[src..src + bitmap.width]);
            }

            glyph.min_u = pack_x as f32 / atlas.width as f32;
            glyph.min_v = pack_y as f32 / atlas.height as f32;
            glyph.max_u = (pack_x + bitmap.width) as f32 / atlas.width as f32;
            glyph.max_v = (pack_y + bitmap.height) as f32 / atlas.height as f32;

            pack_x += bitmap.width + ATLAS_PAD_X;
        }

        tracing::debug!(
            glyphs = glyphs.len(),
            atlas_width,
            atlas_height,
            "built font atlas"
        );

        Ok(Self {
            pixel_height,
            ascender: line.ascent,
            descender: line.descent,
            linegap: line.line_gap,
            atlas,
            glyphs,
            range,
        })
    }

    /// Looks up the glyph for `ch`, or `None` when it falls outside the
    /// covered range.
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.range.index_of(ch).map(|i| &self.glyphs[i])
    }

    /// Baseline-to-baseline distance at the base pixel height, before any
    /// canvas linegap offset.
    pub fn line_height(&self) -> f32 {
        self.ascender - self.descender + self.linegap
    }
}

/// Shelf-packed atlas height: row height is the globally tallest glyph, row
/// count is whichever is larger of the aggregate-width estimate and the rows
/// the packing cursor actually needs. The estimate alone can undershoot
/// because each row may strand nearly a glyph's width of slack at its right
/// edge; any extra rows it allocates simply stay blank.
fn required_atlas_height(
    tallest: usize,
    aggregate_width: usize,
    glyph_widths: &[usize],
    atlas_width: usize,
) -> usize {
    let estimated_rows = (aggregate_width as f32 / atlas_width as f32).ceil() as usize;

    // Same wrap rule and cursor step as the blit loop below.
    let mut packed_rows = 1usize;
    let mut pack_x = 0usize;
    for &width in glyph_widths {
        if pack_x + width > atlas_width {
            pack_x = 0;
            packed_rows += 1;
        }
        pack_x += width + ATLAS_PAD_X;
    }

    (tallest + ATLAS_PAD_Y) * estimated_rows.max(packed_rows)
}

fn flip_rows(pixels: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut out = vec![0u8; width * height];
    for row in 0..height {
        let src = (height - row - 1) * width;
        out[row * width..(row + 1) * width].copy_from_slice(&pixels[src..src + width]);
    }
    out
}
