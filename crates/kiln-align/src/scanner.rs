//! Interface width measurement.
//!
//! The interface of a fragment is the edge that abuts its neighbour. Its
//! width is the opaque horizontal span averaged over a short band of rows
//! starting at the first row (counted from that edge) that contains any
//! opaque pixel. Averaging a band absorbs jagged or anti-aliased edges; the
//! alpha threshold tolerates the soft fringe left by background removal.

use serde::{Deserialize, Serialize};

use crate::config::AlignConfig;
use crate::raster::PixelBuffer;

/// Which edge of a fragment to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
}

/// Measure the interface width of `buf` along `side`, in source pixels.
///
/// Returns 0.0 when no opaque pixel exists anywhere in the buffer, and also
/// for a one-pixel-wide object (its span is zero).
pub fn measure_interface(buf: &PixelBuffer, side: Side, config: &AlignConfig) -> f64 {
    let threshold = config.opacity_threshold;
    let Some(edge_row) = find_edge_row(buf, side, threshold) else {
        return 0.0;
    };

    let spans: Vec<u32> = band_rows(buf.height(), edge_row, side, config.effective_band_rows())
        .filter_map(|y| buf.opaque_extent(y, threshold))
        .map(|(min_x, max_x)| max_x - min_x)
        .collect();

    if spans.is_empty() {
        return 0.0;
    }
    spans.iter().map(|&s| s as f64).sum::<f64>() / spans.len() as f64
}

/// First row, scanning inward from `side`, that holds an opaque pixel.
fn find_edge_row(buf: &PixelBuffer, side: Side, threshold: u8) -> Option<u32> {
    let height = buf.height();
    match side {
        Side::Top => (0..height).find(|&y| buf.row_has_opaque(y, threshold)),
        Side::Bottom => (0..height).rev().find(|&y| buf.row_has_opaque(y, threshold)),
    }
}

/// Rows of the sampling band: `count` rows from `edge_row` moving away from
/// `side`, clipped to the buffer.
fn band_rows(height: u32, edge_row: u32, side: Side, count: usize) -> Box<dyn Iterator<Item = u32>> {
    let count = count.min(height as usize) as u32;
    match side {
        Side::Top => {
            let end = edge_row.saturating_add(count).min(height);
            Box::new(edge_row..end)
        }
        Side::Bottom => {
            let start = (edge_row + 1).saturating_sub(count);
            Box::new((start..=edge_row).rev())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
    const SOLID: Rgba<u8> = Rgba([120, 80, 40, 255]);

    /// Buffer with opaque pixels where `paint(x, y)` is true.
    fn buffer(width: u32, height: u32, paint: impl Fn(u32, u32) -> bool) -> PixelBuffer {
        PixelBuffer::new(RgbaImage::from_fn(width, height, |x, y| if paint(x, y) { SOLID } else { CLEAR }))
    }

    #[test]
    fn test_transparent_buffer_measures_zero() {
        let buf = buffer(20, 20, |_, _| false);
        let cfg = AlignConfig::default();
        assert_eq!(measure_interface(&buf, Side::Top, &cfg), 0.0);
        assert_eq!(measure_interface(&buf, Side::Bottom, &cfg), 0.0);
    }

    #[test]
    fn test_full_rectangle() {
        let buf = buffer(50, 10, |_, _| true);
        let cfg = AlignConfig::default();
        assert!((measure_interface(&buf, Side::Top, &cfg) - 49.0).abs() < 1e-9);
        assert!((measure_interface(&buf, Side::Bottom, &cfg) - 49.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_skips_transparent_margin() {
        // Rows 0-3 empty; object starts on row 4.
        let buf = buffer(100, 30, |x, y| y >= 4 && (10..=70).contains(&x));
        let w = measure_interface(&buf, Side::Top, &AlignConfig::default());
        assert!((w - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_bottom_band_is_averaged() {
        // Bottom rows widen by 2 px per row moving up: spans 10, 14, 18, 22, 26.
        let buf = buffer(60, 20, |x, y| {
            let half = 5 + 2 * (19 - y as i64);
            (x as i64 - 30).abs() <= half
        });
        let w = measure_interface(&buf, Side::Bottom, &AlignConfig::default());
        assert!((w - 18.0).abs() < 1e-9, "got {w}");
    }

    #[test]
    fn test_band_clipped_to_buffer() {
        let buf = buffer(10, 2, |x, _| x <= 4);
        let w = measure_interface(&buf, Side::Top, &AlignConfig::default().with_band_rows(8));
        assert!((w - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_rows_include_row_zero_from_bottom() {
        let rows: Vec<u32> = band_rows(3, 2, Side::Bottom, 5).collect();
        assert_eq!(rows, vec![2, 1, 0]);
        let rows: Vec<u32> = band_rows(10, 7, Side::Top, 5).collect();
        assert_eq!(rows, vec![7, 8, 9]);
    }

    #[test]
    fn test_gap_rows_in_band_are_skipped() {
        // Object on row 0 and row 2 only; row 1 contributes no span.
        let buf = buffer(20, 10, |x, y| (y == 0 && x <= 10) || (y == 2 && x <= 4));
        let w = measure_interface(&buf, Side::Top, &AlignConfig::default());
        assert!((w - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_pixel_column_is_degenerate() {
        let buf = buffer(9, 9, |x, _| x == 4);
        assert_eq!(measure_interface(&buf, Side::Top, &AlignConfig::default()), 0.0);
    }

    #[test]
    fn test_threshold_ignores_faint_fringe() {
        let img = RgbaImage::from_fn(30, 5, |x, _| {
            if (10..=20).contains(&x) {
                SOLID
            } else {
                Rgba([0, 0, 0, 40])
            }
        });
        let buf = PixelBuffer::new(img);
        let w = measure_interface(&buf, Side::Top, &AlignConfig::default());
        assert!((w - 10.0).abs() < 1e-9);
        let loose = measure_interface(&buf, Side::Top, &AlignConfig::default().with_threshold(10));
        assert!((loose - 29.0).abs() < 1e-9);
    }
}
