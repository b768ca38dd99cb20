//! Font tests - loading compiled fonts from disk and measuring banners

use std::path::PathBuf;

use graytris::font::{BitmapFont, FontError, MAGIC};
use graytris::term::{GameView, Viewport};
use graytris::types::TextMetrics;

/// One glyph per char of `chars`, all `x_advance` pixels wide, 16px lines.
fn font_blob(chars: &str, x_advance: u32) -> Vec<u8> {
    let count = chars.chars().count() as u32;
    let mut out = Vec::new();
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&16u32.to_le_bytes());
    for _ in 0..count {
        out.extend_from_slice(&0i32.to_le_bytes());
        out.extend_from_slice(&0i32.to_le_bytes());
        out.extend_from_slice(&x_advance.to_le_bytes());
        out.extend_from_slice(&16u32.to_le_bytes());
        for uv in [0.0f32, 0.0, 0.1, 0.1] {
            out.extend_from_slice(&uv.to_le_bytes());
        }
        out.extend_from_slice(&x_advance.to_le_bytes());
    }
    for (i, ch) in chars.chars().enumerate() {
        out.extend_from_slice(&(ch as u32).to_le_bytes());
        out.extend_from_slice(&(i as u32 + 1).to_le_bytes());
    }
    out.extend_from_slice(b"\x89PNG\r\n\x1a\n");
    out
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("graytris-{}-{}", std::process::id(), name))
}

#[test]
fn test_load_font_from_file() {
    let path = temp_path("load.mfnt");
    std::fs::write(&path, font_blob("abc", 8)).unwrap();

    let font = BitmapFont::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(font.glyphs().len(), 3);
    assert_eq!(font.width("cab"), 24);
    assert_eq!(font.text_width("cab"), 3);
    assert!(font.texture().starts_with(b"\x89PNG"));
}

#[test]
fn test_load_missing_file_reports_path() {
    let path = temp_path("missing.mfnt");
    match BitmapFont::load(&path) {
        Err(FontError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn test_wide_font_shifts_banner_left() {
    // 16px glyphs on 16px lines are two columns each.
    let font = BitmapFont::decode(&font_blob("abcd", 16)).unwrap();
    let vp = Viewport::new(20, 5);

    let plain = GameView::default();
    let wide = GameView::default().with_metrics(Box::new(font));
    assert_eq!(plain.centered_x("abcd", vp), 8);
    assert_eq!(wide.centered_x("abcd", vp), 6);
}
