//! Biot–Savart induction of a straight, finite vortex filament
//!
//! ```text
//!              r0 = P2 - P1
//!     P1 ------------------> P2
//!       \                  /
//!     r1 \                / r2
//!         \              /
//!          \            /
//!                 P
//! ```
//!
//! v(P) = Γ / (4π |r1 × r2|²) · (r0·r1/|r1| − r0·r2/|r2|) · (r1 × r2)
//!
//! # References
//!
//! - Katz & Plotkin (2001), *Low-Speed Aerodynamics*, 2nd ed., ch. 10:
//!   straight vortex segment and its singular core

use crate::core_types::Vec3;
use std::f64::consts::PI;

/// Default singularity cutoff R in geometry units
pub const DEFAULT_CUTOFF: f64 = 1e-10;

/// Velocity induced at `point` by a vortex filament from `p1` to `p2` with
/// circulation `circulation`
///
/// Returns the zero vector when the point is within `cutoff` of either
/// endpoint, or when `|r1 × r2|²` is below `cutoff`.
///
/// The second test compares a squared length against a linear cutoff, so its
/// effective radius is `sqrt(cutoff) / |r0|` rather than `cutoff`. Points very
/// close to the filament axis (but not to its endpoints) may therefore be
/// zeroed at a larger distance than the cutoff suggests. Existing
/// configurations depend on this comparison, so it is kept as is.
///
/// # Arguments
/// * `point` - Field point P
/// * `p1` - Filament start
/// * `p2` - Filament end
/// * `circulation` - Filament strength Γ
/// * `cutoff` - Singularity cutoff R
#[inline]
#[must_use]
pub fn line_vortex(point: &Vec3, p1: &Vec3, p2: &Vec3, circulation: f64, cutoff: f64) -> Vec3 {
    let r1 = point - p1;
    let r2 = point - p2;
    let r1_norm = r1.norm();
    let r2_norm = r2.norm();

    if r1_norm < cutoff || r2_norm < cutoff {
        return Vec3::zeros();
    }

    let r1xr2 = r1.cross(&r2);
    let r1xr2_sq = r1xr2.norm_squared();
    if r1xr2_sq < cutoff {
        return Vec3::zeros();
    }

    let r0 = p2 - p1;
    let k = circulation / (4.0 * PI * r1xr2_sq) * (r0.dot(&r1) / r1_norm - r0.dot(&r2) / r2_norm);
    r1xr2 * k
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perpendicular_bisector_matches_closed_form() {
        // Segment of length 2 along y, point at distance h on the x axis:
        // |v| = Γ / (4π h) · 2 · (1 / sqrt(1 + h²))
        let h = 0.5;
        let v = line_vortex(
            &Vec3::new(h, 0.0, 0.0),
            &Vec3::new(0.0, -1.0, 0.0),
            &Vec3::new(0.0, 1.0, 0.0),
            1.0,
            DEFAULT_CUTOFF,
        );
        let expected = 1.0 / (4.0 * PI * h) * 2.0 / (1.0 + h * h).sqrt();
        assert_relative_eq!(v.norm(), expected, epsilon = 1e-12);
        // Right-hand rule: filament along +y, point at +x gives -z
        assert!(v.z < 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-15);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_long_filament_approaches_infinite_line() {
        let h = 0.3;
        let v = line_vortex(
            &Vec3::new(h, 0.0, 0.0),
            &Vec3::new(0.0, -1e5, 0.0),
            &Vec3::new(0.0, 1e5, 0.0),
            2.0,
            DEFAULT_CUTOFF,
        );
        assert_relative_eq!(v.norm(), 2.0 / (2.0 * PI * h), max_relative = 1e-8);
    }

    #[test]
    fn test_scales_linearly_with_circulation() {
        let p = Vec3::new(0.3, 0.2, 0.1);
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let v1 = line_vortex(&p, &a, &b, 1.0, DEFAULT_CUTOFF);
        let v3 = line_vortex(&p, &a, &b, 3.0, DEFAULT_CUTOFF);
        assert_relative_eq!(v3, v1 * 3.0, epsilon = 1e-14);
    }

    #[test]
    fn test_endpoint_returns_zero() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(line_vortex(&a, &a, &b, 1.0, DEFAULT_CUTOFF), Vec3::zeros());
        assert_eq!(line_vortex(&b, &a, &b, 1.0, DEFAULT_CUTOFF), Vec3::zeros());
    }

    #[test]
    fn test_point_on_axis_returns_zero() {
        let v = line_vortex(
            &Vec3::new(0.0, 0.5, 0.0),
            &Vec3::new(0.0, 0.0, 0.0),
            &Vec3::new(0.0, 1.0, 0.0),
            1.0,
            DEFAULT_CUTOFF,
        );
        assert_eq!(v, Vec3::zeros());

        // Beyond the end of the filament, still collinear
        let v = line_vortex(
            &Vec3::new(0.0, 3.0, 0.0),
            &Vec3::new(0.0, 0.0, 0.0),
            &Vec3::new(0.0, 1.0, 0.0),
            1.0,
            DEFAULT_CUTOFF,
        );
        assert_eq!(v, Vec3::zeros());
    }

    #[test]
    fn test_squared_cross_cutoff_is_wider_than_radius() {
        // |r1 × r2|² = (d · |r0|)² for a point at distance d from the axis
        // of a unit segment, so d = 1e-6 gives 1e-12 < 1e-10 and is zeroed
        // even though d itself is far above the cutoff.
        let v = line_vortex(
            &Vec3::new(1e-6, 0.5, 0.0),
            &Vec3::new(0.0, 0.0, 0.0),
            &Vec3::new(0.0, 1.0, 0.0),
            1.0,
            DEFAULT_CUTOFF,
        );
        assert_eq!(v, Vec3::zeros());
    }
}
