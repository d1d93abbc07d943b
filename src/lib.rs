//! quadtext - glyph atlas packing and textured-quad assembly for text rendering
//!
//! This crate rasterizes a contiguous ASCII range of a TrueType font into a
//! single coverage-bitmap texture atlas, then assembles vertex (and optionally
//! index) buffers of textured quads for runs of text positioned by a movable
//! cursor. It performs no rendering itself: callers grab the assembled buffer
//! and upload it with whatever graphics API they use.
//!
//! ```no_run
//! use quadtext::{CanvasConfig, CodepointRange, Font, TextCanvas};
//!
//! let bytes = std::fs::read("fonts/arial.ttf").unwrap();
//! let font = Font::init(&bytes, 32, CodepointRange::ascii_printable()).unwrap();
//!
//! let mut canvas = TextCanvas::new(CanvasConfig::default());
//! canvas.move_cursor(100.0, 100.0);
//! canvas.append_line("Hello, world!", &font, 30);
//!
//! let snapshot = canvas.grab();
//! // upload snapshot.vertices (and snapshot.indices) to the GPU, then:
//! canvas.clear();
//! ```

pub mod canvas;
pub mod config;
pub mod constants;
pub mod error;
pub mod font;

// Re-export main types
pub use canvas::{TextCanvas, VertexSnapshot};
pub use config::CanvasConfig;
pub use error::{FontError, FontResult};
pub use font::{Bitmap, CodepointRange, Font, Glyph};
