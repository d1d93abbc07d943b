//! Text canvas: cursor state, quad assembly, and the accumulation buffer.
//!
//! A [`TextCanvas`] owns everything the original process kept global: the
//! cursor, the active configuration, and a fixed-capacity vertex/index store
//! that grows only by appends and shrinks only by an explicit [`clear`].
//! Several canvases can coexist, one per logical text surface.
//!
//! Appending is best-effort by design: a glyph outside the font's covered
//! range is skipped, and a full buffer truncates the rest of the run. Both
//! cases surface through boolean returns rather than errors, because in a
//! per-frame pipeline a dropped glyph is cosmetic but a crash is not.
//!
//! [`clear`]: TextCanvas::clear

use crate::config::CanvasConfig;
use crate::constants::{
    DEFAULT_CURSOR_X, DEFAULT_CURSOR_Y, FLOATS_PER_VERTEX, INDICES_PER_CHAR, MAX_LINE_MEASURE,
    VERTICES_PER_CHAR,
};
use crate::font::Font;

/// Borrowed view of the assembled geometry.
///
/// This is a view into the canvas's live storage, not a copy: the borrow
/// keeps the canvas immutable, so upload or copy the data before the next
/// append or clear.
#[derive(Debug)]
pub struct VertexSnapshot<'a> {
    /// Number of vertices currently in the buffer.
    pub vertex_count: usize,
    /// Interleaved `(x, y, u, v)`, stride 4.
    pub vertices: &'a [f32],
    /// Six entries per glyph forming two counter-clockwise triangles; empty
    /// when indexing is disabled.
    pub indices: &'a [u32],
}

#[derive(Clone, Copy)]
enum Alignment {
    Center,
    Right,
}

/// An owned text-assembly context: cursor, configuration, and the
/// fixed-capacity buffer geometry accumulates into.
pub struct TextCanvas {
    config: CanvasConfig,
    cursor_x: f32,
    cursor_y: f32,
    vertices: Vec<f32>,
    indices: Vec<u32>,
    vertex_count: usize,
    index_count: usize,
}

impl Default for TextCanvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl TextCanvas {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            vertices: vec![0.0; config.max_characters * VERTICES_PER_CHAR * FLOATS_PER_VERTEX],
            indices: vec![0; config.max_characters * INDICES_PER_CHAR],
            vertex_count: 0,
            index_count: 0,
            cursor_x: DEFAULT_CURSOR_X,
            cursor_y: DEFAULT_CURSOR_Y,
            config,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// Toggling `create_index_buffer` clears the buffer: stale data must
    /// never be reinterpreted under a different vertex stride and topology.
    /// Changing `max_characters` re-sizes the storage and clears as well.
    pub fn set_config(&mut self, config: CanvasConfig) {
        let mode_changed = self.config.create_index_buffer != config.create_index_buffer;
        let capacity_changed = self.config.max_characters != config.max_characters;
        self.config = config;
        if capacity_changed {
            let max = self.config.max_characters;
            self.vertices.resize(max * VERTICES_PER_CHAR * FLOATS_PER_VERTEX, 0.0);
            self.indices.resize(max * INDICES_PER_CHAR, 0);
        }
        if mode_changed || capacity_changed {
            self.clear();
        }
    }

    /// Updates the backbuffer size used for clip-space normalization. Call
    /// again whenever the backbuffer is resized.
    pub fn set_backbuffer_size(&mut self, width: u32, height: u32) {
        self.config.backbuffer_width = width.max(1);
        self.config.backbuffer_height = height.max(1);
    }

    /// Additive adjustment applied to the font linegap on every line break.
    pub fn set_linegap_offset(&mut self, offset: f32) {
        self.config.linegap_offset = offset;
    }

    /// Places the cursor. The cursor marks the baseline position where the
    /// next glyph is drawn.
    pub fn move_cursor(&mut self, x: f32, y: f32) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn cursor(&self) -> (f32, f32) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    /// How many more glyphs can be appended before the buffer truncates.
    pub fn remaining_capacity(&self) -> usize {
        let max_vertices = self.config.max_characters * VERTICES_PER_CHAR;
        if max_vertices < self.vertex_count + VERTICES_PER_CHAR {
            return 0;
        }
        // Every append reserves a full six-vertex quad of headroom, even in
        // indexed mode where only four vertices land.
        let step = if self.config.create_index_buffer { 4 } else { VERTICES_PER_CHAR };
        let by_vertices = (max_vertices - self.vertex_count - VERTICES_PER_CHAR) / step + 1;
        if self.config.create_index_buffer {
            let max_indices = self.config.max_characters * INDICES_PER_CHAR;
            let by_indices = (max_indices - self.index_count) / INDICES_PER_CHAR;
            by_vertices.min(by_indices)
        } else {
            by_vertices
        }
    }

    fn has_capacity(&self) -> bool {
        let max_vertices = self.config.max_characters * VERTICES_PER_CHAR;
        if max_vertices < self.vertex_count + VERTICES_PER_CHAR {
            return false;
        }
        if self.config.create_index_buffer {
            let max_indices = self.config.max_characters * INDICES_PER_CHAR;
            if max_indices < self.index_count + INDICES_PER_CHAR {
                return false;
            }
        }
        true
    }

    /// Assembles the quad for one glyph at the cursor and advances the
    /// cursor by the scaled advance width.
    ///
    /// Returns `false` without touching the buffer when the codepoint is
    /// outside the font's covered range or the buffer is full.
    pub fn append_glyph(&mut self, ch: char, font: &Font, text_height_px: u32) -> bool {
        self.append_glyph_offset(ch, font, text_height_px, 0.0)
    }

    fn append_glyph_offset(
        &mut self,
        ch: char,
        font: &Font,
        text_height_px: u32,
        x_offset_from_cursor: f32,
    ) -> bool {
        let Some(glyph) = font.glyph(ch) else {
            return false;
        };
        if !self.has_capacity() {
            return false;
        }

        // One font serves many text sizes: all base-height metrics scale
        // uniformly to the requested height.
        let scale = text_height_px as f32 / font.pixel_height as f32;
        let advance = glyph.advance * scale;
        let width = glyph.width * scale;
        let height = glyph.height * scale;
        let offset_x = glyph.offset_x * scale;
        let offset_y = glyph.offset_y * scale;
        let (min_u, min_v, max_u, max_v) = (glyph.min_u, glyph.min_v, glyph.max_u, glyph.max_v);

        let mut left = self.cursor_x + offset_x + x_offset_from_cursor;
        let mut right = left + width;
        let (mut top, mut bot) = if self.config.flip_y {
            (self.cursor_y - offset_y, self.cursor_y - offset_y - height)
        } else {
            (self.cursor_y + offset_y, self.cursor_y + offset_y + height)
        };

        if self.config.clipspace_coords {
            // Screen-space top-left origin maps to clip-space top at +1.
            let w = self.config.backbuffer_width as f32;
            let h = self.config.backbuffer_height as f32;
            top = 1.0 - (top / h) * 2.0;
            bot = 1.0 - (bot / h) * 2.0;
            left = (left / w) * 2.0 - 1.0;
            right = (right / w) * 2.0 - 1.0;
        }

        if self.config.create_index_buffer {
            // Counter-clockwise winding: bottom-left, top-left, top-right,
            // bottom-right, with triangles (0,2,1) and (0,3,2).
            let base = self.vertex_count as u32;
            self.write_vertex(self.vertex_count, left, bot, min_u, min_v);
            self.write_vertex(self.vertex_count + 1, left, top, min_u, max_v);
            self.write_vertex(self.vertex_count + 2, right, top, max_u, max_v);
            self.write_vertex(self.vertex_count + 3, right, bot, max_u, min_v);

            let at = self.index_count;
            self.indices[at..at + INDICES_PER_CHAR]
                .copy_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);

            self.vertex_count += 4;
            self.index_count += INDICES_PER_CHAR;
        } else {
            // Same two triangles spelled out directly.
            self.write_vertex(self.vertex_count, left, bot, min_u, min_v);
            self.write_vertex(self.vertex_count + 1, right, top, max_u, max_v);
            self.write_vertex(self.vertex_count + 2, left, top, min_u, max_v);
            self.write_vertex(self.vertex_count + 3, right, bot, max_u, min_v);
            self.write_vertex(self.vertex_count + 4, right, top, max_u, max_v);
            self.write_vertex(self.vertex_count + 5, left, bot, min_u, min_v);

            self.vertex_count += VERTICES_PER_CHAR;
        }

        self.cursor_x += advance;
        true
    }

    fn write_vertex(&mut self, vertex: usize, x: f32, y: f32, u: f32, v: f32) {
        let at = vertex * FLOATS_PER_VERTEX;
        self.vertices[at] = x;
        self.vertices[at + 1] = y;
        self.vertices[at + 2] = u;
        self.vertices[at + 3] = v;
    }

    /// Moves the cursor to the next line and resets its x position.
    ///
    /// The step is `(ascender - descender + linegap + linegap_offset)`
    /// scaled to the text height. Direction follows `newline_above` and
    /// `flip_y` together: the cursor moves toward +y when the two flags
    /// agree and toward -y when they differ.
    pub fn new_line(&mut self, x: f32, font: &Font, text_height_px: u32) {
        let scale = text_height_px as f32 / font.pixel_height as f32;
        let linegap = font.linegap + self.config.linegap_offset;
        let step = (font.ascender - font.descender + linegap) * scale;
        self.cursor_x = x;
        if self.config.newline_above == self.config.flip_y {
            self.cursor_y += step;
        } else {
            self.cursor_y -= step;
        }
    }

    /// Appends a run of text at the cursor.
    ///
    /// Embedded `'\n'` starts a new line at the x position the run began at.
    /// Unsupported codepoints are skipped. Returns `false` when the buffer
    /// filled before the whole run was appended.
    pub fn append_line(&mut self, text: &str, font: &Font, text_height_px: u32) -> bool {
        let line_start_x = self.cursor_x;
        for ch in text.chars() {
            if ch == '\n' {
                self.new_line(line_start_x, font, text_height_px);
                continue;
            }
            if !self.has_capacity() {
                tracing::debug!("vertex buffer full, truncating text run");
                return false;
            }
            self.append_glyph(ch, font, text_height_px);
        }
        true
    }

    /// [`append_line`](Self::append_line), but each line is centered
    /// horizontally on the cursor.
    pub fn append_line_centered(&mut self, text: &str, font: &Font, text_height_px: u32) -> bool {
        self.append_aligned(text, font, text_height_px, Alignment::Center)
    }

    /// [`append_line`](Self::append_line), but each line ends at the cursor.
    pub fn append_line_right_aligned(
        &mut self,
        text: &str,
        font: &Font,
        text_height_px: u32,
    ) -> bool {
        self.append_aligned(text, font, text_height_px, Alignment::Right)
    }

    fn append_aligned(
        &mut self,
        text: &str,
        font: &Font,
        text_height_px: u32,
        align: Alignment,
    ) -> bool {
        let line_start_x = self.cursor_x;
        let scale = text_height_px as f32 / font.pixel_height as f32;

        // Each line is measured and aligned on its own, not the whole block.
        let mut lines = text.split('\n').peekable();
        while let Some(line) = lines.next() {
            let mut line_length = 0.0f32;
            for ch in line.chars().take(MAX_LINE_MEASURE) {
                if let Some(glyph) = font.glyph(ch) {
                    line_length += glyph.advance * scale;
                }
            }
            let x_offset = match align {
                Alignment::Center => -line_length / 2.0,
                Alignment::Right => -line_length,
            };

            for ch in line.chars().take(MAX_LINE_MEASURE) {
                if !self.has_capacity() {
                    tracing::debug!("vertex buffer full, truncating aligned text run");
                    return false;
                }
                self.append_glyph_offset(ch, font, text_height_px, x_offset);
            }

            if lines.peek().is_some() {
                self.new_line(line_start_x, font, text_height_px);
            }
        }
        true
    }

    /// Width and height of the minimum bounding box containing `text` at the
    /// given height.
    ///
    /// Width is the widest single line, where the final supported glyph of a
    /// line contributes its visual extent (`offset_x + width`) instead of its
    /// pen advance. Height accumulates one full line height per line that
    /// holds at least one supported glyph. Unsupported codepoints are
    /// excluded from both sums.
    pub fn measure(&self, text: &str, font: &Font, text_height_px: u32) -> (f32, f32) {
        let scale = text_height_px as f32 / font.pixel_height as f32;
        let line_height =
            (font.ascender - font.descender + font.linegap + self.config.linegap_offset) * scale;

        let mut widest = 0.0f32;
        let mut height = 0.0f32;
        for line in text.split('\n') {
            let mut line_width = 0.0f32;
            let mut last_glyph = None;
            for ch in line.chars() {
                if let Some(glyph) = font.glyph(ch) {
                    line_width += glyph.advance * scale;
                    last_glyph = Some(glyph);
                }
            }
            let Some(last) = last_glyph else {
                continue; // empty lines add neither width nor height
            };
            // Swap the final glyph's advance for its visual extent.
            line_width += (last.offset_x + last.width - last.advance) * scale;
            widest = widest.max(line_width);
            height += line_height;
        }
        (widest, height)
    }

    /// Returns a view of the accumulated geometry.
    pub fn grab(&self) -> VertexSnapshot<'_> {
        let indices = if self.config.create_index_buffer {
            &self.indices[..self.index_count]
        } else {
            &self.indices[..0]
        };
        VertexSnapshot {
            vertex_count: self.vertex_count,
            vertices: &self.vertices[..self.vertex_count * FLOATS_PER_VERTEX],
            indices,
        }
    }

    /// Resets the counts to zero. The backing storage is not wiped; later
    /// appends simply overwrite it.
    pub fn clear(&mut self) {
        self.vertex_count = 0;
        self.index_count = 0;
    }
}
