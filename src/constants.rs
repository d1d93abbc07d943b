// src/constants.rs

/// Highest base rasterization height, in pixels, accepted when building a font.
pub const MAX_FONT_RESOLUTION: u32 = 100;

/// Fixed atlas width in pixels; atlas height is derived from the glyph set.
pub const DESIRED_ATLAS_WIDTH: usize = 400;

/// Horizontal padding between glyph bitmaps on the atlas.
pub const ATLAS_PAD_X: usize = 1;

/// Vertical padding between glyph rows on the atlas.
pub const ATLAS_PAD_Y: usize = 1;

/// Default capacity of a canvas, in characters.
pub const DEFAULT_MAX_CHARACTERS: usize = 800;

pub const DEFAULT_BACKBUFFER_WIDTH: u32 = 800;
pub const DEFAULT_BACKBUFFER_HEIGHT: u32 = 600;

pub const DEFAULT_CURSOR_X: f32 = 0.0;
pub const DEFAULT_CURSOR_Y: f32 = 100.0;

/// Longest prefix of a line considered when pre-measuring for alignment.
pub const MAX_LINE_MEASURE: usize = 256;

/// Interleaved `(x, y, u, v)` layout.
pub const FLOATS_PER_VERTEX: usize = 4;

/// Vertex storage is sized for the non-indexed worst case of six per glyph.
pub const VERTICES_PER_CHAR: usize = 6;

/// Two triangles per glyph quad.
pub const INDICES_PER_CHAR: usize = 6;
