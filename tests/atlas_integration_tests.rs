//! Integration tests that build real atlases from system fonts.
//!
//! These tests discover a TrueType font under the platform's usual font
//! directories and skip gracefully when none is available, so they can run
//! on minimal CI images without bundled font files.

use std::path::{Path, PathBuf};

use quadtext::{CanvasConfig, CodepointRange, Font, TextCanvas};

fn font_search_paths() -> Vec<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        vec![
            "/usr/share/fonts".into(),
            "/usr/local/share/fonts".into(),
        ]
    }

    #[cfg(target_os = "macos")]
    {
        vec!["/System/Library/Fonts".into(), "/Library/Fonts".into()]
    }

    #[cfg(target_os = "windows")]
    {
        vec!["C:\\Windows\\Fonts".into()]
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        vec![]
    }
}

/// First system font file that quadtext can actually build an atlas from.
fn find_system_font() -> Option<Vec<u8>> {
    for root in font_search_paths() {
        if let Some(bytes) = scan_for_usable_font(&root, 0) {
            return Some(bytes);
        }
    }
    None
}

fn scan_for_usable_font(dir: &Path, depth: usize) -> Option<Vec<u8>> {
    if depth > 3 {
        return None;
    }
    let entries = std::fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Some(bytes) = scan_for_usable_font(&path, depth + 1) {
                return Some(bytes);
            }
            continue;
        }
        if !matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("ttf") | Some("otf")
        ) {
            continue;
        }
        if let Ok(bytes) = std::fs::read(&path) {
            if Font::init(&bytes, 32, CodepointRange::ascii_printable()).is_ok() {
                return Some(bytes);
            }
        }
    }
    None
}

macro_rules! system_font_or_skip {
    () => {
        match find_system_font() {
            Some(bytes) => bytes,
            None => {
                eprintln!("no usable system fonts found, skipping");
                return;
            }
        }
    };
}

#[test]
fn atlas_build_is_deterministic() {
    let bytes = system_font_or_skip!();
    let a = Font::init(&bytes, 32, CodepointRange::ascii_printable()).unwrap();
    let b = Font::init(&bytes, 32, CodepointRange::ascii_printable()).unwrap();
    assert_eq!(a.pixel_height, b.pixel_height);
    assert_eq!(a.glyphs, b.glyphs);
    assert_eq!(a.atlas, b.atlas);
}

#[test]
fn atlas_rects_are_normalized_and_disjoint() {
    let bytes = system_font_or_skip!();
    let font = Font::init(&bytes, 32, CodepointRange::ascii_printable()).unwrap();

    let rects: Vec<(usize, usize, usize, usize)> = font
        .glyphs
        .iter()
        .filter(|g| g.width > 0.0 && g.height > 0.0)
        .map(|g| {
            assert!(0.0 <= g.min_u && g.min_u < g.max_u && g.max_u <= 1.0, "{:?}", g.codepoint);
            assert!(0.0 <= g.min_v && g.min_v < g.max_v && g.max_v <= 1.0, "{:?}", g.codepoint);
            (
                (g.min_u * font.atlas.width as f32).round() as usize,
                (g.min_v * font.atlas.height as f32).round() as usize,
                (g.max_u * font.atlas.width as f32).round() as usize,
                (g.max_v * font.atlas.height as f32).round() as usize,
            )
        })
        .collect();
    assert!(!rects.is_empty());

    for (i, a) in rects.iter().enumerate() {
        for b in rects.iter().skip(i + 1) {
            let overlaps = a.0 < b.2 && b.0 < a.2 && a.1 < b.3 && b.1 < a.3;
            assert!(!overlaps, "glyph rects {a:?} and {b:?} overlap");
        }
    }
}

#[test]
fn resolution_above_maximum_is_rejected() -> anyhow::Result<()> {
    let Some(bytes) = find_system_font() else {
        eprintln!("no usable system fonts found, skipping");
        return Ok(());
    };
    assert!(Font::init(&bytes, 101, CodepointRange::ascii_printable()).is_err());
    Font::init(&bytes, 100, CodepointRange::ascii_printable())?;
    Ok(())
}

#[test]
fn atlas_allocation_covers_packing_at_high_resolutions() {
    let bytes = system_font_or_skip!();
    // Larger glyphs strand more slack at row ends, where an undersized
    // allocation would make the blit index past the atlas.
    for px in [48, 64, 100] {
        let font = Font::init(&bytes, px, CodepointRange::ascii_printable())
            .unwrap_or_else(|e| panic!("build at {px}px failed: {e}"));
        assert_eq!(font.atlas.pixels.len(), font.atlas.width * font.atlas.height);
        for g in &font.glyphs {
            assert!(g.max_u <= 1.0 && g.max_v <= 1.0, "{:?} at {px}px", g.codepoint);
        }
    }
}

#[test]
fn narrow_range_builds_only_its_glyphs() {
    let bytes = system_font_or_skip!();
    let range = CodepointRange::new('a', 'z').unwrap();
    let font = Font::init(&bytes, 24, range).unwrap();
    assert_eq!(font.glyphs.len(), 26);
    assert!(font.glyph('m').is_some());
    assert!(font.glyph('A').is_none());
}

#[test]
fn append_line_scenario_produces_expected_geometry() {
    let bytes = system_font_or_skip!();
    let font = Font::init(&bytes, 32, CodepointRange::ascii_printable()).unwrap();

    let mut canvas = TextCanvas::default();
    canvas.move_cursor(100.0, 100.0);
    assert!(canvas.append_line("Hi", &font, 30));
    assert_eq!(canvas.vertex_count(), 2 * 6);

    let scale = 30.0 / 32.0;
    let h = font.glyph('H').unwrap();
    let snapshot = canvas.grab();
    let first_left = snapshot.vertices[0];
    assert!((first_left - (100.0 + h.offset_x * scale)).abs() < 1e-4);
}

#[test]
fn indexed_scenario_produces_expected_counts() {
    let bytes = system_font_or_skip!();
    let font = Font::init(&bytes, 32, CodepointRange::ascii_printable()).unwrap();

    let mut canvas = TextCanvas::new(CanvasConfig::new().with_index_buffer(true));
    canvas.move_cursor(100.0, 100.0);
    assert!(canvas.append_line("Hi", &font, 30));
    assert_eq!(canvas.vertex_count(), 2 * 4);
    assert_eq!(canvas.index_count(), 2 * 6);
}

#[test]
fn measured_box_covers_the_appended_run() {
    let bytes = system_font_or_skip!();
    let font = Font::init(&bytes, 32, CodepointRange::ascii_printable()).unwrap();

    let canvas = TextCanvas::default();
    let (width, height) = canvas.measure("Hello, world!", &font, 24);
    assert!(width > 0.0);
    let scale = 24.0 / 32.0;
    assert!((height - font.line_height() * scale).abs() < 1e-3);
}
