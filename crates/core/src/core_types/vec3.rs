//! Vector type alias for 3D points and velocities.

use nalgebra::Vector3;

/// 3D vector type for lattice points, normals and induced velocities.
///
/// This is a simple alias for `nalgebra::Vector3<f64>`. The body axes are
/// x downstream (chordwise), y to starboard (spanwise) and z up.
pub type Vec3 = Vector3<f64>;
