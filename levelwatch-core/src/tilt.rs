//! Tilt mapping for the gauge
//!
//! Converts a normalized axis reading into the gauge's response curve.

use core::f32::consts::FRAC_PI_2;

/// Map a normalized axis reading onto the gauge response curve
///
/// The input is clamped to [-1, 1] and warped with `sin(x · π/2)`, which
/// flattens the slope at both extremes. The result is in [-1, 1].
pub fn map(x: f32) -> f32 {
    let x = if x.is_nan() { 0.0 } else { x.clamp(-1.0, 1.0) };
    libm::sinf(x * FRAC_PI_2)
}

/// Normalize a raw axis value by the gauge scale and map it
pub fn map_axis(value: i32, scale: f32) -> f32 {
    map(value as f32 / scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_zero_maps_to_zero() {
        assert_eq!(map(0.0), 0.0);
    }

    #[test]
    fn test_endpoints() {
        assert!((map(1.0) - 1.0).abs() < EPS);
        assert!((map(-1.0) + 1.0).abs() < EPS);
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(map(2.0), map(1.0));
        assert_eq!(map(-5.0), map(-1.0));
        assert_eq!(map(f32::INFINITY), map(1.0));
    }

    #[test]
    fn test_half_tilt() {
        // sin(π/4)
        assert!((map(0.5) - core::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn test_map_axis_scale() {
        assert!((map_axis(1000, 1000.0) - 1.0).abs() < EPS);
        assert!((map_axis(-4096, 1000.0) + 1.0).abs() < EPS);
        assert_eq!(map_axis(0, 1000.0), 0.0);
    }
}
