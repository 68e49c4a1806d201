//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{Bounds, ResizeParams};

/// Whether an image of `source` dimensions is larger than `bounds` on either axis.
pub fn exceeds_bounds(source: (u32, u32), bounds: Bounds) -> bool {
    let (w, h) = source;
    w > bounds.max_width || h > bounds.max_height
}

/// Calculate fit-inside dimensions: scale down (never up) so both edges are
/// within `bounds`, preserving the aspect ratio.
///
/// The axis that limits the scale factor lands exactly on its bound; the other
/// axis is rounded and kept at least 1px.
///
/// # Examples
/// ```
/// # use imgopt::imaging::{Bounds, fit_inside};
/// let bounds = Bounds { max_width: 1920, max_height: 1080 };
/// // 2:1 landscape is width-limited
/// let r = fit_inside((2000, 1000), bounds);
/// assert_eq!((r.width, r.height), (1920, 960));
/// // already inside: untouched
/// let r = fit_inside((800, 600), bounds);
/// assert_eq!((r.width, r.height), (800, 600));
/// ```
pub fn fit_inside(source: (u32, u32), bounds: Bounds) -> ResizeParams {
    let (src_w, src_h) = source;

    if !exceeds_bounds(source, bounds) || src_w == 0 || src_h == 0 {
        return ResizeParams {
            width: src_w,
            height: src_h,
        };
    }

    let w_ratio = bounds.max_width as f64 / src_w as f64;
    let h_ratio = bounds.max_height as f64 / src_h as f64;

    if w_ratio <= h_ratio {
        // Width-limited
        let h = (src_h as f64 * w_ratio).round() as u32;
        ResizeParams {
            width: bounds.max_width,
            height: h.clamp(1, bounds.max_height),
        }
    } else {
        // Height-limited
        let w = (src_w as f64 * h_ratio).round() as u32;
        ResizeParams {
            width: w.clamp(1, bounds.max_width),
            height: bounds.max_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HD: Bounds = Bounds {
        max_width: 1920,
        max_height: 1080,
    };

    // =========================================================================
    // exceeds_bounds tests
    // =========================================================================

    #[test]
    fn within_bounds_is_not_exceeding() {
        assert!(!exceeds_bounds((800, 600), HD));
    }

    #[test]
    fn exactly_at_bounds_is_not_exceeding() {
        assert!(!exceeds_bounds((1920, 1080), HD));
    }

    #[test]
    fn wider_than_bounds_exceeds() {
        assert!(exceeds_bounds((1921, 100), HD));
    }

    #[test]
    fn taller_than_bounds_exceeds() {
        assert!(exceeds_bounds((100, 1081), HD));
    }

    // =========================================================================
    // fit_inside tests
    // =========================================================================

    #[test]
    fn fit_landscape_width_limited() {
        // 2000x1000 → width clamps to 1920, height 1000 * 0.96 = 960
        assert_eq!(
            fit_inside((2000, 1000), HD),
            ResizeParams {
                width: 1920,
                height: 960
            }
        );
    }

    #[test]
    fn fit_portrait_height_limited() {
        // 3000x4000 → height clamps to 1080, width 3000 * 0.27 = 810
        assert_eq!(
            fit_inside((3000, 4000), HD),
            ResizeParams {
                width: 810,
                height: 1080
            }
        );
    }

    #[test]
    fn fit_16_9_lands_on_both_bounds() {
        assert_eq!(
            fit_inside((3840, 2160), HD),
            ResizeParams {
                width: 1920,
                height: 1080
            }
        );
    }

    #[test]
    fn fit_only_height_over() {
        // 1900x2000: width fits, height doesn't → height-limited
        let r = fit_inside((1900, 2000), HD);
        assert_eq!(r.height, 1080);
        assert_eq!(r.width, 1026); // 1900 * 0.54
    }

    #[test]
    fn fit_never_upscales() {
        assert_eq!(
            fit_inside((640, 480), HD),
            ResizeParams {
                width: 640,
                height: 480
            }
        );
    }

    #[test]
    fn fit_extreme_panorama_keeps_one_pixel() {
        let r = fit_inside((100_000, 10), HD);
        assert_eq!(r.width, 1920);
        assert_eq!(r.height, 1);
    }

    #[test]
    fn fit_preserves_aspect_ratio_within_rounding() {
        let (w, h) = (4032, 3024);
        let r = fit_inside((w, h), HD);
        assert!(r.width <= HD.max_width && r.height <= HD.max_height);
        let src_aspect = w as f64 / h as f64;
        let out_aspect = r.width as f64 / r.height as f64;
        assert!((src_aspect - out_aspect).abs() < 0.01);
        assert_eq!(r.height, 1080);
    }
}
