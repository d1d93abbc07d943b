// src/config.rs
use crate::constants::{
    DEFAULT_BACKBUFFER_HEIGHT, DEFAULT_BACKBUFFER_WIDTH, DEFAULT_MAX_CHARACTERS,
};

/// Rendering configuration for a [`TextCanvas`](crate::TextCanvas).
///
/// Plain named options instead of bit flags. By default the canvas emits six
/// non-indexed vertices per glyph, in screen-space coordinates, with new lines
/// moving the cursor below the current line.
#[derive(Clone, Debug)]
pub struct CanvasConfig {
    /// Emit 4 unique vertices plus 6 indices per glyph instead of 6 vertices.
    pub create_index_buffer: bool,
    /// Normalize output positions to clip space `[-1, 1]` using the
    /// backbuffer size.
    pub clipspace_coords: bool,
    /// New lines move the cursor above the current line instead of below.
    pub newline_above: bool,
    /// Invert the y-axis sign convention (for renderers where "up" is -y).
    pub flip_y: bool,
    /// Backbuffer width in pixels; only used when `clipspace_coords` is set.
    pub backbuffer_width: u32,
    /// Backbuffer height in pixels; only used when `clipspace_coords` is set.
    pub backbuffer_height: u32,
    /// Additive adjustment to the font's linegap, in base-height pixels.
    pub linegap_offset: f32,
    /// Capacity of the canvas in characters; sizes the vertex/index storage.
    pub max_characters: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            create_index_buffer: false,
            clipspace_coords: false,
            newline_above: false,
            flip_y: false,
            backbuffer_width: DEFAULT_BACKBUFFER_WIDTH,
            backbuffer_height: DEFAULT_BACKBUFFER_HEIGHT,
            linegap_offset: 0.0,
            max_characters: DEFAULT_MAX_CHARACTERS,
        }
    }
}

impl CanvasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index_buffer(mut self, enabled: bool) -> Self {
        self.create_index_buffer = enabled;
        self
    }

    pub fn with_clipspace_coords(mut self, enabled: bool) -> Self {
        self.clipspace_coords = enabled;
        self
    }

    pub fn with_newline_above(mut self, enabled: bool) -> Self {
        self.newline_above = enabled;
        self
    }

    pub fn with_flip_y(mut self, enabled: bool) -> Self {
        self.flip_y = enabled;
        self
    }

    pub fn with_backbuffer_size(mut self, width: u32, height: u32) -> Self {
        self.backbuffer_width = width.max(1);
        self.backbuffer_height = height.max(1);
        self
    }

    pub fn with_linegap_offset(mut self, offset: f32) -> Self {
        self.linegap_offset = offset;
        self
    }

    pub fn with_max_characters(mut self, max: usize) -> Self {
        self.max_characters = max.max(1);
        self
    }
}
