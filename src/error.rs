// src/error.rs
use thiserror::Error;

/// Failure modes for font parsing and atlas construction.
///
/// Canvas operations never error: capacity overflow truncates and reports
/// through a boolean return, and unsupported codepoints are skipped, so a
/// dropped glyph stays cosmetic instead of becoming a crash in a per-frame
/// pipeline.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("font resolution {requested}px exceeds maximum of {max}px")]
    ResolutionTooHigh { requested: u32, max: u32 },

    #[error("failed to parse font data: {0}")]
    InvalidFontData(&'static str),

    #[error("font reports no horizontal line metrics at the requested size")]
    MissingLineMetrics,

    #[error("invalid codepoint range {from:?}..={to:?}: must be an ascending ASCII window")]
    InvalidRange { from: char, to: char },
}

pub type FontResult<T> = Result<T, FontError>;
