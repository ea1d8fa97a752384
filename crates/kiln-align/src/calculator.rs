use serde::{Deserialize, Serialize};

use crate::error::AlignError;

/// Scale multipliers for the top and bottom fragments, relative to the
/// display width chosen for the middle fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentResult {
    pub top_scale: f64,
    pub base_scale: f64,
}

impl AlignmentResult {
    /// Unscaled canonical proportions.
    pub const IDENTITY: AlignmentResult = AlignmentResult {
        top_scale: 1.0,
        base_scale: 1.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Both scales strictly positive and finite.
    pub fn is_valid(&self) -> bool {
        valid_scale(self.top_scale) && valid_scale(self.base_scale)
    }
}

impl Default for AlignmentResult {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn valid_scale(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0
}

/// The four seam measurements, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InterfaceWidths {
    pub neck_bottom: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub base_top: f64,
}

/// Native pixel widths of the three decoded fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NativeWidths {
    pub neck: u32,
    pub body: u32,
    pub base: u32,
}

/// Derive scale ratios from seam widths.
///
/// Each interface width is taken as a proportion of its fragment's own
/// native width, so fragments exported at different resolutions still line
/// up by interface proportion rather than raw pixel count:
///
/// ```text
/// top_scale  = (body_top    / body_w) / (neck_bottom / neck_w)
/// base_scale = (body_bottom / body_w) / (base_top    / base_w)
/// ```
pub fn try_compute_scales(
    interfaces: &InterfaceWidths,
    widths: &NativeWidths,
) -> Result<AlignmentResult, AlignError> {
    if interfaces.neck_bottom < 1.0 || interfaces.base_top < 1.0 {
        return Err(AlignError::Degenerate {
            neck_bottom: interfaces.neck_bottom,
            base_top: interfaces.base_top,
        });
    }

    let body_w = widths.body as f64;
    let top_scale = (interfaces.body_top / body_w) / (interfaces.neck_bottom / widths.neck as f64);
    let base_scale = (interfaces.body_bottom / body_w) / (interfaces.base_top / widths.base as f64);

    let result = AlignmentResult { top_scale, base_scale };
    if !result.is_valid() {
        return Err(AlignError::InvalidRatio { top_scale, base_scale });
    }
    Ok(result)
}

/// Like [`try_compute_scales`], but any failure is logged and replaced by
/// [`AlignmentResult::IDENTITY`].
pub fn compute_scales(interfaces: &InterfaceWidths, widths: &NativeWidths) -> AlignmentResult {
    match try_compute_scales(interfaces, widths) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("{}; using default proportions", e);
            AlignmentResult::IDENTITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widths(neck: u32, body: u32, base: u32) -> NativeWidths {
        NativeWidths { neck, body, base }
    }

    #[test]
    fn test_reference_scenario() {
        let interfaces = InterfaceWidths {
            neck_bottom: 60.0,
            body_top: 120.0,
            body_bottom: 140.0,
            base_top: 80.0,
        };
        let r = try_compute_scales(&interfaces, &widths(100, 200, 100)).unwrap();
        assert!((r.top_scale - 1.0).abs() < 1e-12);
        assert!((r.base_scale - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_resolution_cancels_out() {
        let base = InterfaceWidths {
            neck_bottom: 30.0,
            body_top: 90.0,
            body_bottom: 100.0,
            base_top: 50.0,
        };
        // Same neck exported at four times the resolution.
        let hires = InterfaceWidths {
            neck_bottom: 120.0,
            ..base
        };
        let a = try_compute_scales(&base, &widths(60, 300, 100)).unwrap();
        let b = try_compute_scales(&hires, &widths(240, 300, 100)).unwrap();
        assert!((a.top_scale - b.top_scale).abs() < 1e-12);
        assert!((a.base_scale - b.base_scale).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_neck_or_base() {
        let interfaces = InterfaceWidths {
            neck_bottom: 0.5,
            body_top: 10.0,
            body_bottom: 10.0,
            base_top: 10.0,
        };
        let err = try_compute_scales(&interfaces, &widths(10, 10, 10)).unwrap_err();
        assert!(matches!(err, AlignError::Degenerate { .. }));
        assert!(compute_scales(&interfaces, &widths(10, 10, 10)).is_identity());

        let interfaces = InterfaceWidths {
            neck_bottom: 10.0,
            base_top: 0.0,
            ..interfaces
        };
        assert!(compute_scales(&interfaces, &widths(10, 10, 10)).is_identity());
    }

    #[test]
    fn test_zero_body_interface_is_invalid() {
        let interfaces = InterfaceWidths {
            neck_bottom: 10.0,
            body_top: 0.0,
            body_bottom: 0.0,
            base_top: 10.0,
        };
        let err = try_compute_scales(&interfaces, &widths(10, 10, 10)).unwrap_err();
        assert!(matches!(err, AlignError::InvalidRatio { .. }));
        assert_eq!(compute_scales(&interfaces, &widths(10, 10, 10)), AlignmentResult::IDENTITY);
    }

    #[test]
    fn test_zero_native_width_is_invalid() {
        let interfaces = InterfaceWidths {
            neck_bottom: 10.0,
            body_top: 10.0,
            body_bottom: 10.0,
            base_top: 10.0,
        };
        let r = compute_scales(&interfaces, &widths(10, 0, 10));
        assert!(r.is_identity());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&AlignmentResult::IDENTITY).unwrap();
        assert_eq!(json, r#"{"topScale":1.0,"baseScale":1.0}"#);
    }
}
