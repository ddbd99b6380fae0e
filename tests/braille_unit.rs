//! Unit tests for the braille rendering stages.
//!
//! These tests pin down the behavior of each stage through the public API:
//! - Color adjustment identity and range
//! - Flat-field sharpening
//! - Aspect-preserving fit
//! - Dot thresholding and invert symmetry
//! - The full render

use braille_art::braille::*;
use braille_art::frame::PixelBuffer;
use braille_art::params::{AdjustmentParams, GlyphGridRequest};
use braille_art::pipeline::{render, RenderError};

/// Deterministic pseudo-random RGBA buffer (64-bit LCG).
fn noise(width: u32, height: u32, seed: u64) -> PixelBuffer {
    let mut state = seed;
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height * 4 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        data.push((state >> 56) as u8);
    }
    PixelBuffer::new(width, height, data).unwrap()
}

fn block(rgba: [u8; 4]) -> PixelBuffer {
    PixelBuffer::filled(2, 4, rgba)
}

// ==================== Color Adjustment Tests ====================

#[test]
fn test_identity_for_zero_adjustments() {
    for seed in [1, 7, 42] {
        let buf = noise(13, 9, seed);
        // sharpness is not part of color adjustment
        let params = AdjustmentParams {
            sharpness: 3.0,
            ..Default::default()
        };
        assert_eq!(adjust(&buf, &params), buf);
    }
}

#[test]
fn test_adjust_preserves_alpha_and_size() {
    let buf = noise(7, 5, 3);
    let params = AdjustmentParams {
        brightness: 40.0,
        contrast: -30.0,
        saturation: 80.0,
        sharpness: 0.0,
    };
    let out = adjust(&buf, &params);
    assert_eq!((out.width, out.height), (buf.width, buf.height));
    for (a, b) in out.data.chunks_exact(4).zip(buf.data.chunks_exact(4)) {
        assert_eq!(a[3], b[3]);
    }
}

#[test]
fn test_extreme_adjustments_stay_in_range() {
    // every channel is a u8, so this checks the extremes do not panic and
    // actually saturate where expected
    let buf = noise(16, 16, 99);
    let bright = adjust(
        &buf,
        &AdjustmentParams {
            brightness: 100.0,
            contrast: 100.0,
            ..Default::default()
        },
    );
    let dark = adjust(
        &buf,
        &AdjustmentParams {
            brightness: -100.0,
            contrast: 100.0,
            ..Default::default()
        },
    );
    for px in bright.data.chunks_exact(4) {
        assert!(px[..3].iter().all(|&c| c == 255));
    }
    for px in dark.data.chunks_exact(4) {
        assert!(px[..3].iter().all(|&c| c == 0));
    }
}

#[test]
fn test_full_desaturation_is_gray() {
    let buf = noise(8, 8, 5);
    let out = adjust(
        &buf,
        &AdjustmentParams {
            saturation: -100.0,
            ..Default::default()
        },
    );
    for px in out.data.chunks_exact(4) {
        assert!(px[0].abs_diff(px[1]) <= 1);
        assert!(px[1].abs_diff(px[2]) <= 1);
    }
}

#[test]
fn test_contrast_factor_at_zero_is_one() {
    assert!((contrast_factor(0.0) - 1.0).abs() < 1e-12);
    assert!(contrast_factor(100.0) > 1.0);
    assert!(contrast_factor(-100.0) < 1.0);
}

// ==================== Sharpening Tests ====================

#[test]
fn test_flat_field_sharpening() {
    for (v, s, expected) in [(50u8, 0.5, 100u8), (50, 1.5, 200), (40, 1.0, 120), (100, 2.0, 255)] {
        let buf = PixelBuffer::filled(6, 5, [v, v, v, v]);
        let out = sharpen(&buf, s);
        assert!(
            out.data.iter().all(|&c| c == expected),
            "v={} s={} expected {}",
            v,
            s,
            expected
        );
    }
}

#[test]
fn test_kernel_is_unnormalized() {
    for s in [0.0, 0.5, 1.0, 5.0] {
        let k = ConvolutionKernel::sharpen(s);
        assert!((k.sum() - (1.0 + 2.0 * s)).abs() < 1e-12);
    }
}

#[test]
fn test_sharpness_below_cutoff_is_skipped() {
    let buf = noise(5, 5, 11);
    assert_eq!(apply_sharpness(buf.clone(), 0.0), buf);
    assert_eq!(apply_sharpness(buf.clone(), MIN_SHARPNESS), buf);
    assert_ne!(apply_sharpness(buf.clone(), 1.0), buf);
}

#[test]
fn test_sharpen_output_in_range() {
    let buf = noise(10, 10, 21);
    let out = sharpen(&buf, 5.0);
    assert_eq!((out.width, out.height), (10, 10));
    assert_eq!(out.data.len(), buf.data.len());
}

// ==================== Resampling Tests ====================

#[test]
fn test_aspect_fit_layout() {
    let layout = fit_layout(100, 50, 20, 40);
    assert_eq!(
        layout,
        FitLayout {
            dw: 20,
            dh: 10,
            dx: 0,
            dy: 15
        }
    );
}

#[test]
fn test_aspect_fit_blank_margins() {
    let src = PixelBuffer::filled(100, 50, [255, 255, 255, 255]);
    let out = fit(&src, 10, 10);
    assert_eq!((out.width, out.height), (20, 40));

    for y in (0..15).chain(25..40) {
        for x in 0..20 {
            assert_eq!(out.pixel(x, y), [0, 0, 0, 0], "pixel ({}, {})", x, y);
        }
    }
    for y in 15..25 {
        for x in 0..20 {
            assert_eq!(out.pixel(x, y), [255, 255, 255, 255], "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_keep_aspect_height() {
    // 40 dots wide, 640x480 -> 30 dots tall -> 7.5 rows -> 8
    assert_eq!(derive_chars_h(640, 480, 20, 400), 8);
    // very tall source clamps to the limit
    assert_eq!(derive_chars_h(10, 100_000, 80, 400), 400);
    // very wide source never drops below one row
    assert_eq!(derive_chars_h(100_000, 1, 10, 400), 1);
}

#[test]
fn test_resolve_grid_ignores_height_with_keep_aspect() {
    let req = GlyphGridRequest {
        keep_aspect: true,
        ..GlyphGridRequest::new(10, 77)
    };
    assert_eq!(resolve_grid(100, 100, &req), (10, 5));
    assert_eq!(resolve_grid(100, 100, &GlyphGridRequest::new(10, 77)), (10, 77));
}

// ==================== Encoding Tests ====================

#[test]
fn test_dot_table() {
    assert_eq!(position_bit(0, 0), 0x01);
    assert_eq!(position_bit(0, 1), 0x02);
    assert_eq!(position_bit(0, 2), 0x04);
    assert_eq!(position_bit(1, 0), 0x08);
    assert_eq!(position_bit(1, 1), 0x10);
    assert_eq!(position_bit(1, 2), 0x20);
    assert_eq!(position_bit(0, 3), 0x40);
    assert_eq!(position_bit(1, 3), 0x80);
}

#[test]
fn test_all_dark_cell() {
    let grid = encode(&block([0, 0, 0, 255]), 1, 1, 128, false).unwrap();
    assert_eq!(grid.mask(0, 0), 0x00);
    assert_eq!(grid.cell(0, 0), '\u{2800}');
}

#[test]
fn test_all_bright_cell() {
    let grid = encode(&block([255, 255, 255, 255]), 1, 1, 128, false).unwrap();
    assert_eq!(grid.mask(0, 0), 0xFF);
    assert_eq!(grid.cell(0, 0), '\u{28FF}');
}

#[test]
fn test_alpha_is_ignored_by_encoder() {
    let grid = encode(&block([255, 255, 255, 0]), 1, 1, 128, false).unwrap();
    assert_eq!(grid.mask(0, 0), 0xFF);
}

#[test]
fn test_invert_symmetry() {
    for (seed, threshold) in [(1u64, 128u8), (2, 0), (3, 255), (4, 77)] {
        let px = noise(8, 12, seed);
        let plain = encode(&px, 4, 3, threshold, false).unwrap();
        let inverted = encode(&px, 4, 3, threshold, true).unwrap();

        for cy in 0..3 {
            for cx in 0..4 {
                let mut ties = 0u8;
                for row in 0..4 {
                    for column in 0..2 {
                        let p = px.pixel(cx * 2 + column as u32, cy * 4 + row as u32);
                        if pixel_luma(p) == f64::from(threshold) {
                            ties |= position_bit(column, row);
                        }
                    }
                }
                assert_eq!(
                    inverted.mask(cx, cy),
                    !plain.mask(cx, cy) & !ties,
                    "cell ({}, {}) threshold {}",
                    cx,
                    cy,
                    threshold
                );
            }
        }
    }
}

#[test]
fn test_threshold_tie_is_off_both_ways() {
    // black has luma exactly 0, so threshold 0 is a tie on every dot
    let black = block([0, 0, 0, 255]);
    assert_eq!(pixel_luma(black.pixel(0, 0)), 0.0);
    assert_eq!(encode(&black, 1, 1, 0, false).unwrap().mask(0, 0), 0);
    assert_eq!(encode(&black, 1, 1, 0, true).unwrap().mask(0, 0), 0);
    // one step above the tie turns every dot on when inverted
    assert_eq!(encode(&black, 1, 1, 1, true).unwrap().mask(0, 0), 0xFF);
    assert!(!dot_on(128.0, 128, false));
    assert!(!dot_on(128.0, 128, true));
}

#[test]
fn test_rows_end_with_newline() {
    let grid = encode(&PixelBuffer::blank(6, 8), 3, 2, 128, false).unwrap();
    assert_eq!(grid.to_text(), "\u{2800}\u{2800}\u{2800}\n\u{2800}\u{2800}\u{2800}\n");
    assert_eq!(grid.rows().count(), 2);
}

#[test]
fn test_char_mask_round_trip_bounds() {
    assert_eq!(mask_to_char(0), BRAILLE_BASE);
    assert_eq!(mask_to_char(0xFF), '\u{28FF}');
    assert_eq!(char_to_mask('\u{28FF}'), Some(0xFF));
    assert_eq!(char_to_mask('a'), None);
}

#[test]
fn test_dimension_mismatch_fails_fast() {
    let err = encode(&PixelBuffer::blank(3, 4), 1, 1, 128, false).unwrap_err();
    assert_eq!(
        err,
        EncodeError::DimensionMismatch {
            expected_w: 2,
            expected_h: 4,
            actual_w: 3,
            actual_h: 4,
        }
    );
}

// ==================== End-to-End Tests ====================

#[test]
fn test_end_to_end_single_white_cell() {
    let grid = render(
        &block([255, 255, 255, 255]),
        &AdjustmentParams::default(),
        &GlyphGridRequest {
            threshold: 128,
            invert: false,
            ..GlyphGridRequest::new(1, 1)
        },
    )
    .unwrap();
    assert_eq!(grid.to_text(), "⣿\n");
}

#[test]
fn test_render_is_deterministic() {
    let src = noise(37, 23, 8);
    let params = AdjustmentParams {
        brightness: 10.0,
        contrast: 20.0,
        saturation: -15.0,
        sharpness: 0.7,
    };
    let req = GlyphGridRequest::new(9, 5);
    let a: Result<BrailleGrid, RenderError> = render(&src, &params, &req);
    let b = render(&src, &params, &req);
    assert_eq!(a, b);
    let grid = a.unwrap();
    assert_eq!((grid.width(), grid.height()), (9, 5));
    assert_eq!(grid.to_text().lines().count(), 5);
    assert!(grid
        .to_text()
        .lines()
        .all(|line| line.chars().count() == 9
            && line.chars().all(|c| ('\u{2800}'..='\u{28FF}').contains(&c))));
}

#[test]
fn test_empty_source_renders_nothing() {
    let grid = render(
        &PixelBuffer::blank(10, 0),
        &AdjustmentParams::default(),
        &GlyphGridRequest::default(),
    )
    .unwrap();
    assert!(grid.is_empty());
    assert_eq!(grid.to_text(), "");
}
