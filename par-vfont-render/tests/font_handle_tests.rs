//! Integration tests for the font handle lifecycle and text rendering.

mod common;

use std::path::Path;

use common::{FakeGlyph, FakeRasterizer, SharedLog, new_log};
use par_vfont_render::{PixelBuffer, RenderError, VFont};

const WHITE: u32 = 0xFFFF_FFFF;
const BLACK: u32 = 0xFF00_0000;
const RED_NO_ALPHA: u32 = 0x00FF_0000;
const RED: u32 = 0xFFFF_0000;

fn open_fake(log: &SharedLog, size: u32) -> VFont<FakeRasterizer> {
    let log = log.clone();
    VFont::open_with(
        move || {
            Ok(FakeRasterizer::new(&log)
                .with_glyph('A', FakeGlyph::solid(2, 2, 3))
                .with_glyph('B', FakeGlyph::solid(1, 3, 2))
                .with_glyph(
                    'M',
                    FakeGlyph::mono_row(8, vec![0b1011_0001], 8),
                )
                .with_glyph('z', FakeGlyph::gray(2, 1, vec![0, 255], 2))
                .max_size(64))
        },
        Path::new("fake.ttf"),
        0,
        size,
    )
    .unwrap()
}

/// Render into a `width` x `height` buffer filled with `background`.
fn render(
    font: &mut VFont<FakeRasterizer>,
    text: &[u8],
    (width, height): (usize, usize),
    background: u32,
    (x, y): (i32, i32),
    color: u32,
) -> Vec<u32> {
    let mut pixels = vec![background; width * height];
    let mut buffer = PixelBuffer::new(&mut pixels, width, height).unwrap();
    font.render_text(text, &mut buffer, x, y, color, None);
    pixels
}

fn pixel(pixels: &[u32], width: usize, x: usize, y: usize) -> u32 {
    pixels[y * width + x]
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_open_rejects_empty_path_before_creating_rasterizer() {
    let log = new_log();
    let result = VFont::open_with(|| Ok(FakeRasterizer::new(&log)), Path::new(""), 0, 16);
    assert!(matches!(result, Err(RenderError::EmptyPath)));
    assert_eq!(log.lock().rasterizers_created, 0);
}

#[test]
fn test_open_rejects_zero_size_before_creating_rasterizer() {
    let log = new_log();
    let result = VFont::open_with(|| Ok(FakeRasterizer::new(&log)), Path::new("a.ttf"), 0, 0);
    assert!(matches!(result, Err(RenderError::InvalidSize(0))));
    assert_eq!(log.lock().rasterizers_created, 0);
}

#[test]
fn test_open_propagates_rasterizer_init_failure() {
    let result: Result<VFont<FakeRasterizer>, _> = VFont::open_with(
        || Err(RenderError::RasterizerInit("out of memory".to_string())),
        Path::new("a.ttf"),
        0,
        16,
    );
    assert!(matches!(result, Err(RenderError::RasterizerInit(_))));
}

#[test]
fn test_failed_face_load_releases_rasterizer() {
    let log = new_log();
    let result = VFont::open_with(
        || Ok(FakeRasterizer::new(&log).failing_open()),
        Path::new("missing.ttf"),
        0,
        16,
    );
    assert!(matches!(result, Err(RenderError::InvalidFont { .. })));

    let log = log.lock();
    assert_eq!(log.rasterizers_created, 1);
    assert_eq!(log.rasterizers_dropped, 1);
    assert_eq!(log.faces_opened, 0);
}

#[test]
fn test_rejected_initial_size_releases_face_then_rasterizer() {
    let log = new_log();
    let result = VFont::open_with(
        || Ok(FakeRasterizer::new(&log).max_size(8)),
        Path::new("a.ttf"),
        0,
        16,
    );
    assert!(matches!(result, Err(RenderError::SizeOutOfRange { .. })));
    assert_eq!(log.lock().events, vec!["face", "rasterizer"]);
}

#[test]
fn test_open_configures_initial_size() {
    let log = new_log();
    let font = open_fake(&log, 16);
    assert_eq!(font.current_size(), 16);
    assert_eq!(log.lock().size_calls, vec![16]);
    assert_eq!(log.lock().faces_opened, 1);
}

#[test]
fn test_drop_releases_face_before_rasterizer() {
    let log = new_log();
    let font = open_fake(&log, 16);
    drop(font);

    let log = log.lock();
    assert_eq!(log.events, vec!["face", "rasterizer"]);
    assert_eq!(log.faces_dropped, 1);
    assert_eq!(log.rasterizers_dropped, 1);
}

#[test]
fn test_dropping_absent_handle_is_noop() {
    let handle: Option<VFont<FakeRasterizer>> = None;
    drop(handle);
}

// ---------------------------------------------------------------------------
// set_size
// ---------------------------------------------------------------------------

#[test]
fn test_set_size_same_value_skips_reconfiguration() {
    let log = new_log();
    let mut font = open_fake(&log, 16);

    assert!(font.set_size(24).is_ok());
    assert!(font.set_size(24).is_ok());
    assert_eq!(font.current_size(), 24);
    assert_eq!(log.lock().size_calls, vec![16, 24]);
}

#[test]
fn test_set_size_to_current_size_does_no_work() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    assert!(font.set_size(16).is_ok());
    assert_eq!(log.lock().size_calls, vec![16]);
}

#[test]
fn test_set_size_zero_fails_and_keeps_size() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    assert!(matches!(font.set_size(0), Err(RenderError::InvalidSize(0))));
    assert_eq!(font.current_size(), 16);
    assert_eq!(log.lock().size_calls, vec![16]);
}

#[test]
fn test_set_size_rejected_by_rasterizer_keeps_size() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    assert!(matches!(
        font.set_size(100),
        Err(RenderError::SizeOutOfRange { size: 100, max: 64 })
    ));
    assert_eq!(font.current_size(), 16);
}

// ---------------------------------------------------------------------------
// render_text
// ---------------------------------------------------------------------------

#[test]
fn test_render_empty_text_leaves_buffer_unchanged() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let pixels = render(&mut font, b"", (4, 4), 0x1234_5678, (0, 3), WHITE);
    assert!(pixels.iter().all(|&p| p == 0x1234_5678));
}

#[test]
fn test_render_malformed_utf8_leaves_buffer_unchanged() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let pixels = render(
        &mut font,
        &[0x80, 0xBF, 0xFF, 0xF8, 0xC3],
        (4, 4),
        0x1234_5678,
        (0, 3),
        WHITE,
    );
    assert!(pixels.iter().all(|&p| p == 0x1234_5678));
}

#[test]
fn test_render_places_glyph_above_baseline() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let width = 6;
    let pixels = render(&mut font, b"A", (width, 4), WHITE, (1, 3), RED_NO_ALPHA);

    for y in 0..4 {
        for x in 0..width {
            let expected = if (1..3).contains(&x) && (1..3).contains(&y) {
                RED
            } else {
                WHITE
            };
            assert_eq!(pixel(&pixels, width, x, y), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn test_render_applies_left_bearing() {
    let log = new_log();
    let mut font = VFont::open_with(
        || {
            Ok(FakeRasterizer::new(&log)
                .with_glyph('A', FakeGlyph::solid(1, 1, 2).with_bearing(2, 3)))
        },
        Path::new("a.ttf"),
        0,
        16,
    )
    .unwrap();
    let mut pixels = vec![BLACK; 16];
    let mut buffer = PixelBuffer::new(&mut pixels, 4, 4).unwrap();
    font.render_text("A", &mut buffer, 0, 3, WHITE, None);

    assert_eq!(pixels[2], WHITE);
    assert_eq!(pixels.iter().filter(|&&p| p == WHITE).count(), 1);
}

#[test]
fn test_pen_advances_by_glyph_advance() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let width = 8;
    let pixels = render(&mut font, b"AA", (width, 2), BLACK, (0, 2), WHITE);

    let row: Vec<u32> = (0..width).map(|x| pixel(&pixels, width, x, 1)).collect();
    assert_eq!(
        row,
        vec![WHITE, WHITE, BLACK, WHITE, WHITE, BLACK, BLACK, BLACK]
    );
}

#[test]
fn test_missing_glyph_is_skipped_without_advancing() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let with_gap = render(&mut font, "A\u{4E2D}A".as_bytes(), (8, 2), BLACK, (0, 2), WHITE);
    let without = render(&mut font, b"AA", (8, 2), BLACK, (0, 2), WHITE);
    assert_eq!(with_gap, without);
}

#[test]
fn test_malformed_bytes_between_glyphs_are_dropped() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let noisy = render(&mut font, &[b'A', 0xFF, 0x80, b'A'], (8, 2), BLACK, (0, 2), WHITE);
    let clean = render(&mut font, b"AA", (8, 2), BLACK, (0, 2), WHITE);
    assert_eq!(noisy, clean);
}

#[test]
fn test_render_far_off_buffer_writes_nothing() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    for (x, y) in [(-1000, 2), (1000, 2), (0, -1000), (0, 1000), (i32::MIN, i32::MAX)] {
        let pixels = render(&mut font, b"AABM", (4, 4), BLACK, (x, y), WHITE);
        assert!(pixels.iter().all(|&p| p == BLACK), "pen at ({x}, {y})");
    }
}

#[test]
fn test_render_partially_off_buffer_clips() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let width = 3;
    // 'A' is 2x2; with the pen at x = -1 only its right column is visible,
    // and with the baseline at y = 1 only its bottom row.
    let pixels = render(&mut font, b"A", (width, 3), BLACK, (-1, 1), WHITE);
    assert_eq!(pixel(&pixels, width, 0, 0), WHITE);
    assert_eq!(pixels.iter().filter(|&&p| p == WHITE).count(), 1);
}

#[test]
fn test_color_alpha_ignored_and_output_opaque() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let pixels = render(&mut font, b"A", (2, 2), WHITE, (0, 2), RED_NO_ALPHA);
    assert!(pixels.iter().all(|&p| p == RED));
}

#[test]
fn test_zero_coverage_leaves_destination_untouched() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    // 'z' is one row: coverage 0 then 255.
    let translucent = 0x1234_5678;
    let pixels = render(&mut font, b"z", (2, 1), translucent, (0, 1), WHITE);
    assert_eq!(pixels, vec![translucent, 0xFFFF_FFFF]);
}

#[test]
fn test_mono_glyph_bits_are_msb_first() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let pixels = render(&mut font, b"M", (8, 1), BLACK, (0, 1), WHITE);
    assert_eq!(
        pixels,
        vec![WHITE, BLACK, WHITE, WHITE, BLACK, BLACK, BLACK, WHITE]
    );
}

#[test]
fn test_render_into_strided_buffer_keeps_padding() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let padding = 0xDEAD_BEEF;
    let mut pixels = vec![padding; 4 * 2];
    {
        let mut buffer = PixelBuffer::with_stride(&mut pixels, 2, 2, 4).unwrap();
        buffer.fill(BLACK);
        font.render_text(b"AAAA", &mut buffer, 0, 2, WHITE, None);
    }
    assert_eq!(
        pixels,
        vec![WHITE, WHITE, padding, padding, WHITE, WHITE, padding, padding]
    );
}

// ---------------------------------------------------------------------------
// Size overrides
// ---------------------------------------------------------------------------

#[test]
fn test_size_override_is_persisted() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let mut pixels = vec![BLACK; 16];
    let mut buffer = PixelBuffer::new(&mut pixels, 4, 4).unwrap();

    font.render_text(b"A", &mut buffer, 0, 2, WHITE, Some(32));
    assert_eq!(font.current_size(), 32);

    font.render_text(b"A", &mut buffer, 0, 2, WHITE, Some(32));
    font.render_text(b"A", &mut buffer, 0, 2, WHITE, None);
    font.render_text(b"A", &mut buffer, 0, 2, WHITE, Some(0));
    assert_eq!(font.current_size(), 32);
    assert_eq!(log.lock().size_calls, vec![16, 32]);
}

#[test]
fn test_size_override_ignored_for_empty_text() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let mut pixels = vec![BLACK; 4];
    let mut buffer = PixelBuffer::new(&mut pixels, 2, 2).unwrap();
    font.render_text(b"", &mut buffer, 0, 2, WHITE, Some(20));
    assert_eq!(font.current_size(), 16);
}

#[test]
fn test_rejected_size_override_renders_at_previous_size() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let mut pixels = vec![BLACK; 4];
    let mut buffer = PixelBuffer::new(&mut pixels, 2, 2).unwrap();

    font.render_text(b"A", &mut buffer, 0, 2, WHITE, Some(500));

    assert_eq!(font.current_size(), 16);
    assert!(pixels.iter().all(|&p| p == WHITE));
}

// ---------------------------------------------------------------------------
// measure_text
// ---------------------------------------------------------------------------

#[test]
fn test_measure_text_sums_advances_and_skips_missing() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let extent = font.measure_text("AB?A\u{FFFD}", None);
    assert_eq!(extent.width, 3 + 2 + 3);
    assert_eq!(extent.glyphs, 3);
}

#[test]
fn test_measure_empty_text() {
    let log = new_log();
    let mut font = open_fake(&log, 16);
    let extent = font.measure_text("", Some(40));
    assert_eq!(extent.width, 0);
    assert_eq!(font.current_size(), 16);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn test_independent_handles_on_separate_threads() {
    let results: Vec<Vec<u32>> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let log = new_log();
                    let mut font = open_fake(&log, 16);
                    render(&mut font, b"AA", (8, 2), BLACK, (0, 2), WHITE)
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    for pixels in &results[1..] {
        assert_eq!(pixels, &results[0]);
    }
}
